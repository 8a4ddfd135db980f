//! Expansion of a stored link into its final, parameter-substituted URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use super::{decode_entities, has_structured_prefix, starts_with_ignore_ascii_case};
use crate::config::ExtlinkConfig;
use crate::context::RenderContext;
use crate::resource::LinkResource;

/// Complement of the characters allowed to stay literal in a structurally
/// known URL: `A-Za-z0-9` and `;/?:@=&$_.+!*(),-#%`. Everything else
/// (including all non-ASCII) gets percent-encoded.
const URL_REPAIR_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'~');

/// RFC 3986 component encoding: everything except unreserved characters.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Returns the stored link fully expanded for embedding in markup: entities
/// decoded, characters repaired, configured parameters substituted from the
/// render context, and every `&` re-encoded as `&amp;`.
///
/// Parameters whose variable has no value in this context (no logged-in
/// user, role substitution disabled, ...) are dropped from the output, not
/// emitted empty. Callers that need a raw URL (HTTP redirects, content
/// export) should use [`full_url_raw`].
///
/// No XSS protection happens here.
pub fn full_url(resource: &LinkResource, ctx: &RenderContext, config: &ExtlinkConfig) -> String {
    // Make sure there are no encoded entities; doing this twice is harmless.
    let mut full = decode_entities(&resource.external_url);

    if has_structured_prefix(&full) {
        // Encode stray characters. This does not make every link valid, but
        // it fixes the usual UTF-8 and whitespace problems.
        full = utf8_percent_encode(&full, URL_REPAIR_SET).to_string();
    } else {
        // Unknown scheme: touch only the characters that always break markup.
        full = full
            .replace('"', "%22")
            .replace('\'', "%27")
            .replace(' ', "%20")
            .replace('<', "%3C")
            .replace('>', "%3E");
    }

    let pairs: Vec<String> = resource
        .parameters()
        .iter()
        .filter_map(|param| {
            param.variable.resolve(ctx, config).map(|value| {
                format!(
                    "{}={}",
                    utf8_percent_encode(&param.name, COMPONENT_SET),
                    utf8_percent_encode(&value, COMPONENT_SET)
                )
            })
        })
        .collect();

    if !pairs.is_empty() {
        if starts_with_ignore_ascii_case(&full, "teamspeak://") {
            // Legacy teamspeak joining: every pair after its own '?'.
            full = format!("{full}?{}", pairs.join("?"));
        } else {
            let join = if full.contains('?') { '&' } else { '?' };
            full = format!("{full}{join}{}", pairs.join("&"));
        }
    }

    full.replace('&', "&amp;")
}

/// Like [`full_url`] but returns a raw URL (no `&amp;` encoding), suitable
/// for HTTP redirects and content export.
pub fn full_url_raw(resource: &LinkResource, ctx: &RenderContext, config: &ExtlinkConfig) -> String {
    full_url(resource, ctx, config).replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CourseContext, ModuleContext, RoleContext, SiteContext, UserContext};
    use crate::display::DisplayMode;
    use crate::resource::LinkParameter;
    use crate::variables::UrlVariable;

    fn ctx() -> RenderContext {
        RenderContext {
            course: CourseContext {
                id: 7,
                full_name: "Course Seven".into(),
                short_name: "C7".into(),
                id_number: "c-7".into(),
                summary: "about".into(),
                format: "topics".into(),
            },
            module: ModuleContext {
                instance_id: 3,
                cmid: 12,
                name: "My Link".into(),
                id_number: "m-3".into(),
            },
            site: SiteContext {
                name: "Example Site".into(),
                server_url: "https://lms.example.com".into(),
            },
            user: None,
            roles: vec![RoleContext {
                short_name: "student".into(),
                display_name: "Learner".into(),
            }],
            lang: "en".into(),
            now: 1_700_000_000,
            remote_addr: "192.0.2.1".into(),
        }
    }

    fn resource(url: &str, params: Vec<LinkParameter>) -> LinkResource {
        let mut r = LinkResource::new(1, "link", url);
        r.display = DisplayMode::Auto;
        r.set_parameters(&params);
        r
    }

    fn param(name: &str, variable: UrlVariable) -> LinkParameter {
        LinkParameter {
            name: name.into(),
            variable,
        }
    }

    #[test]
    fn encodes_spaces_in_structured_urls() {
        let r = resource("http://x.com/a b", vec![]);
        assert_eq!(
            full_url(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/a%20b"
        );
    }

    #[test]
    fn custom_scheme_only_special_chars_touched() {
        let r = resource("weird://host/a b\"c'd<e>f|g", vec![]);
        assert_eq!(
            full_url(&r, &ctx(), &ExtlinkConfig::default()),
            "weird://host/a%20b%22c%27d%3Ce%3Ef|g"
        );
    }

    #[test]
    fn appends_parameters_with_question_then_ampersand() {
        let r = resource(
            "http://x.com/page",
            vec![
                param("cid", UrlVariable::CourseId),
                param("l", UrlVariable::Lang),
            ],
        );
        assert_eq!(
            full_url_raw(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/page?cid=7&l=en"
        );
    }

    #[test]
    fn appends_with_ampersand_when_query_present() {
        let r = resource("http://x.com/page?fixed=1", vec![param("cid", UrlVariable::CourseId)]);
        assert_eq!(
            full_url_raw(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/page?fixed=1&cid=7"
        );
        assert_eq!(
            full_url(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/page?fixed=1&amp;cid=7"
        );
    }

    #[test]
    fn teamspeak_joins_every_pair_with_question_mark() {
        let r = resource(
            "teamspeak://voice.example.com",
            vec![
                param("k1", UrlVariable::CourseShortName),
                param("k2", UrlVariable::Lang),
            ],
        );
        assert_eq!(
            full_url_raw(&r, &ctx(), &ExtlinkConfig::default()),
            "teamspeak://voice.example.com?k1=C7?k2=en"
        );
    }

    #[test]
    fn unresolvable_parameters_are_dropped() {
        // No logged-in user: userid has no value, so `q` disappears.
        let r = resource(
            "http://x.com/",
            vec![
                param("q", UrlVariable::UserId),
                param("cid", UrlVariable::CourseId),
            ],
        );
        assert_eq!(
            full_url_raw(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/?cid=7"
        );
    }

    #[test]
    fn all_parameters_dropped_leaves_base_untouched() {
        let r = resource("http://x.com/", vec![param("q", UrlVariable::UserId)]);
        assert_eq!(
            full_url_raw(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/"
        );
    }

    #[test]
    fn parameter_keys_and_values_are_component_encoded() {
        let mut c = ctx();
        c.course.full_name = "A & B / C".into();
        let r = resource(
            "http://x.com/",
            vec![param("course name", UrlVariable::CourseFullName)],
        );
        assert_eq!(
            full_url_raw(&r, &c, &ExtlinkConfig::default()),
            "http://x.com/?course%20name=A%20%26%20B%20%2F%20C"
        );
    }

    #[test]
    fn decodes_entities_in_stored_url() {
        let r = resource("http://x.com/?a=1&amp;b=2", vec![]);
        assert_eq!(
            full_url_raw(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/?a=1&b=2"
        );
        assert_eq!(
            full_url(&r, &ctx(), &ExtlinkConfig::default()),
            "http://x.com/?a=1&amp;b=2"
        );
    }

    #[test]
    fn user_parameters_resolve_when_logged_in() {
        let mut c = ctx();
        c.user = Some(UserContext {
            id: 42,
            username: "jdoe".into(),
            id_number: String::new(),
            first_name: "J".into(),
            last_name: "Doe".into(),
            email: "jdoe@example.com".into(),
            icq: String::new(),
            phone1: String::new(),
            phone2: String::new(),
            institution: String::new(),
            department: String::new(),
            address: String::new(),
            city: String::new(),
            timezone_offset_hours: 5.5,
            url: String::new(),
        });
        let r = resource(
            "http://x.com/",
            vec![
                param("u", UrlVariable::UserId),
                param("tz", UrlVariable::UserTimezone),
            ],
        );
        assert_eq!(
            full_url_raw(&r, &c, &ExtlinkConfig::default()),
            "http://x.com/?u=42&tz=5.5"
        );
    }

    #[test]
    fn role_parameters_honor_config_flag() {
        let r = resource(
            "http://x.com/",
            vec![param("r", UrlVariable::CourseRole("student".into()))],
        );
        let off = ExtlinkConfig::default();
        assert_eq!(full_url_raw(&r, &ctx(), &off), "http://x.com/");

        let on = ExtlinkConfig {
            roles_in_params: true,
            ..ExtlinkConfig::default()
        };
        assert_eq!(full_url_raw(&r, &ctx(), &on), "http://x.com/?r=Learner");
    }
}
