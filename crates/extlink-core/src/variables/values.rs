//! Render-time resolution of catalog variables against a context snapshot.

use sha2::{Digest, Sha256};

use super::UrlVariable;
use crate::config::ExtlinkConfig;
use crate::context::RenderContext;

impl UrlVariable {
    /// Resolves this variable against the render context.
    ///
    /// Returns `None` when the variable has no value here: user fields
    /// without a logged-in user, `encryptedcode` without a secret phrase,
    /// role entries when role substitution is disabled or the role is not
    /// present. Callers drop such parameters from the output.
    pub fn resolve(&self, ctx: &RenderContext, config: &ExtlinkConfig) -> Option<String> {
        let user = ctx.user.as_ref();
        match self {
            UrlVariable::CourseId => Some(ctx.course.id.to_string()),
            UrlVariable::CourseFullName => Some(ctx.course.full_name.clone()),
            UrlVariable::CourseShortName => Some(ctx.course.short_name.clone()),
            UrlVariable::CourseIdNumber => Some(ctx.course.id_number.clone()),
            UrlVariable::CourseSummary => Some(ctx.course.summary.clone()),
            UrlVariable::CourseFormat => Some(ctx.course.format.clone()),

            UrlVariable::LinkInstance => Some(ctx.module.instance_id.to_string()),
            UrlVariable::LinkCmid => Some(ctx.module.cmid.to_string()),
            UrlVariable::LinkName => Some(ctx.module.name.clone()),
            UrlVariable::LinkIdNumber => Some(ctx.module.id_number.clone()),

            UrlVariable::SiteName => Some(ctx.site.name.clone()),
            UrlVariable::ServerUrl => Some(ctx.site.server_url.clone()),
            UrlVariable::CurrentTime => Some(ctx.now.to_string()),
            UrlVariable::Lang => Some(ctx.lang.clone()),
            UrlVariable::EncryptedCode => {
                if config.secret_phrase.is_empty() {
                    None
                } else {
                    Some(encrypted_code(&ctx.remote_addr, &config.secret_phrase))
                }
            }

            UrlVariable::UserId => user.map(|u| u.id.to_string()),
            UrlVariable::UserUsername => user.map(|u| u.username.clone()),
            UrlVariable::UserIdNumber => user.map(|u| u.id_number.clone()),
            UrlVariable::UserFirstName => user.map(|u| u.first_name.clone()),
            UrlVariable::UserLastName => user.map(|u| u.last_name.clone()),
            UrlVariable::UserFullName => user.map(|u| u.full_name()),
            UrlVariable::UserEmail => user.map(|u| u.email.clone()),
            UrlVariable::UserIcq => user.map(|u| u.icq.clone()),
            UrlVariable::UserPhone1 => user.map(|u| u.phone1.clone()),
            UrlVariable::UserPhone2 => user.map(|u| u.phone2.clone()),
            UrlVariable::UserInstitution => user.map(|u| u.institution.clone()),
            UrlVariable::UserDepartment => user.map(|u| u.department.clone()),
            UrlVariable::UserAddress => user.map(|u| u.address.clone()),
            UrlVariable::UserCity => user.map(|u| u.city.clone()),
            UrlVariable::UserTimezone => {
                user.map(|u| format_offset_hours(u.timezone_offset_hours))
            }
            UrlVariable::UserUrl => user.map(|u| u.url.clone()),

            UrlVariable::CourseRole(short) => {
                if !config.roles_in_params {
                    return None;
                }
                ctx.roles
                    .iter()
                    .find(|role| role.short_name == *short)
                    .map(|role| role.display_name.clone())
            }
        }
    }
}

/// Legacy compatibility token: hex SHA-256 of the caller address and the
/// secret phrase. A weak imitation of single-sign-on kept only so stored
/// links that carry it keep working. Never treat this as authentication.
pub fn encrypted_code(remote_addr: &str, secret_phrase: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(remote_addr.as_bytes());
    hasher.update(secret_phrase.as_bytes());
    hex::encode(hasher.finalize())
}

/// Timezone offsets travel as plain hours: whole offsets without a decimal
/// point ("2", "-7"), fractional ones as-is ("5.5").
fn format_offset_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CourseContext, ModuleContext, SiteContext, UserContext};

    fn ctx() -> RenderContext {
        RenderContext {
            course: CourseContext {
                id: 9,
                full_name: "Nine".into(),
                short_name: "N9".into(),
                id_number: String::new(),
                summary: String::new(),
                format: "weeks".into(),
            },
            module: ModuleContext {
                instance_id: 4,
                cmid: 21,
                name: "Link".into(),
                id_number: String::new(),
            },
            site: SiteContext {
                name: "Site".into(),
                server_url: "https://lms.example.com".into(),
            },
            user: None,
            roles: vec![],
            lang: "en".into(),
            now: 1_700_000_000,
            remote_addr: "203.0.113.9".into(),
        }
    }

    #[test]
    fn site_and_time_values() {
        let cfg = ExtlinkConfig::default();
        assert_eq!(
            UrlVariable::CurrentTime.resolve(&ctx(), &cfg).as_deref(),
            Some("1700000000")
        );
        assert_eq!(
            UrlVariable::ServerUrl.resolve(&ctx(), &cfg).as_deref(),
            Some("https://lms.example.com")
        );
    }

    #[test]
    fn user_values_need_a_user() {
        let cfg = ExtlinkConfig::default();
        assert_eq!(UrlVariable::UserEmail.resolve(&ctx(), &cfg), None);

        let mut c = ctx();
        c.user = Some(UserContext {
            id: 5,
            username: "amy".into(),
            id_number: String::new(),
            first_name: "Amy".into(),
            last_name: "Pond".into(),
            email: "amy@example.com".into(),
            icq: String::new(),
            phone1: String::new(),
            phone2: String::new(),
            institution: String::new(),
            department: String::new(),
            address: String::new(),
            city: String::new(),
            timezone_offset_hours: -7.0,
            url: String::new(),
        });
        assert_eq!(
            UrlVariable::UserFullName.resolve(&c, &cfg).as_deref(),
            Some("Amy Pond")
        );
        assert_eq!(
            UrlVariable::UserTimezone.resolve(&c, &cfg).as_deref(),
            Some("-7")
        );
    }

    #[test]
    fn encrypted_code_needs_secret() {
        let cfg = ExtlinkConfig::default();
        assert_eq!(UrlVariable::EncryptedCode.resolve(&ctx(), &cfg), None);

        let cfg = ExtlinkConfig {
            secret_phrase: "hunter2".into(),
            ..ExtlinkConfig::default()
        };
        let code = UrlVariable::EncryptedCode.resolve(&ctx(), &cfg).unwrap();
        assert_eq!(code, encrypted_code("203.0.113.9", "hunter2"));
        assert_eq!(code.len(), 64);
    }

    #[test]
    fn offset_formatting() {
        assert_eq!(format_offset_hours(2.0), "2");
        assert_eq!(format_offset_hours(0.0), "0");
        assert_eq!(format_offset_hours(5.5), "5.5");
        assert_eq!(format_offset_hours(-3.5), "-3.5");
    }
}
