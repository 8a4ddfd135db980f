//! Assembly of a link resource from an editing-form submission.

use super::{encode_parameters, DisplayOptions, IntroFormat, LinkParameter, LinkResource};
use crate::display::DisplayMode;
use crate::variables::{UnknownVariable, UrlVariable};
use crate::weburl::fix_submitted;

/// Editing forms offer at most this many parameter rows.
pub const MAX_PARAMETER_ROWS: usize = 100;

/// Raw values from the add/update form, before normalization.
///
/// `parameters` holds the raw (query key, variable name) rows in form
/// order; blank rows are skipped and unknown variable names are rejected
/// when the submission is applied.
#[derive(Debug, Clone, Default)]
pub struct LinkSubmission {
    pub name: String,
    pub intro: String,
    pub intro_format: IntroFormat,
    pub external_url: String,
    pub display: DisplayMode,
    pub popup_width: u32,
    pub popup_height: u32,
    pub print_intro: bool,
    pub parameters: Vec<(String, String)>,
}

impl LinkSubmission {
    /// Creates a new resource record from this submission.
    pub fn create(self, id: i64, now: u64) -> Result<LinkResource, UnknownVariable> {
        let mut resource = LinkResource::new(id, "", "");
        self.apply(&mut resource, now)?;
        Ok(resource)
    }

    /// Applies this submission onto an existing record: repairs the URL,
    /// re-encodes both option blobs, and stamps the modification time.
    pub fn apply(self, resource: &mut LinkResource, now: u64) -> Result<(), UnknownVariable> {
        let parameters = collect_parameters(&self.parameters)?;

        let mut options = DisplayOptions::default();
        if self.display == DisplayMode::Popup {
            options.popup_width = Some(self.popup_width);
            options.popup_height = Some(self.popup_height);
        }
        if matches!(
            self.display,
            DisplayMode::Auto | DisplayMode::Embed | DisplayMode::Frame
        ) {
            options.print_intro = Some(self.print_intro);
        }

        resource.name = self.name;
        resource.intro = self.intro;
        resource.intro_format = self.intro_format;
        resource.external_url = fix_submitted(&self.external_url);
        resource.display = self.display;
        resource.display_options = options.encode();
        resource.parameters = encode_parameters(&parameters);
        resource.time_modified = now;
        Ok(())
    }
}

/// Collects submitted parameter rows into an ordered, unique mapping.
///
/// Blank keys or variable names are skipped; a duplicate key keeps its
/// first position but takes the later variable. Rows past the form limit
/// are ignored.
fn collect_parameters(
    rows: &[(String, String)],
) -> Result<Vec<LinkParameter>, UnknownVariable> {
    let mut parameters: Vec<LinkParameter> = Vec::new();
    for (name, variable) in rows.iter().take(MAX_PARAMETER_ROWS) {
        if name.is_empty() || variable.is_empty() {
            continue;
        }
        let variable: UrlVariable = variable.parse()?;
        match parameters.iter_mut().find(|p| p.name == *name) {
            Some(existing) => existing.variable = variable,
            None => parameters.push(LinkParameter {
                name: name.clone(),
                variable,
            }),
        }
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(url: &str) -> LinkSubmission {
        LinkSubmission {
            name: "My link".into(),
            external_url: url.into(),
            popup_width: 800,
            popup_height: 600,
            print_intro: true,
            ..LinkSubmission::default()
        }
    }

    #[test]
    fn create_repairs_url_and_stamps_time() {
        let resource = submission("example.com").create(7, 1_700_000_100).unwrap();
        assert_eq!(resource.id, 7);
        assert_eq!(resource.external_url, "http://example.com");
        assert_eq!(resource.time_modified, 1_700_000_100);
    }

    #[test]
    fn popup_sizes_stored_only_for_popup_display() {
        let mut s = submission("http://example.com");
        s.display = DisplayMode::Popup;
        let resource = s.create(1, 0).unwrap();
        let options = resource.display_options();
        assert_eq!(options.popup_size(), (800, 600));
        // Popup display does not persist print_intro.
        assert_eq!(options.print_intro, None);

        let mut s = submission("http://example.com");
        s.display = DisplayMode::Open;
        let options = s.create(1, 0).unwrap().display_options();
        assert_eq!(options.popup_width, None);
        assert_eq!(options.popup_height, None);
    }

    #[test]
    fn print_intro_stored_for_inline_displays() {
        for display in [DisplayMode::Auto, DisplayMode::Embed, DisplayMode::Frame] {
            let mut s = submission("http://example.com");
            s.display = display;
            let options = s.create(1, 0).unwrap().display_options();
            assert_eq!(options.print_intro, Some(true));
        }

        let mut s = submission("http://example.com");
        s.display = DisplayMode::New;
        let options = s.create(1, 0).unwrap().display_options();
        assert_eq!(options.print_intro, None);
    }

    #[test]
    fn parameter_rows_skip_blanks_and_dedupe() {
        let mut s = submission("http://example.com");
        s.parameters = vec![
            ("a".into(), "courseid".into()),
            (String::new(), "lang".into()),
            ("b".into(), String::new()),
            ("c".into(), "lang".into()),
            ("a".into(), "sitename".into()),
        ];
        let resource = s.create(1, 0).unwrap();
        let parameters = resource.parameters();
        assert_eq!(parameters.len(), 2);
        // "a" keeps first position but takes the later variable.
        assert_eq!(parameters[0].name, "a");
        assert_eq!(parameters[0].variable, UrlVariable::SiteName);
        assert_eq!(parameters[1].name, "c");
        assert_eq!(parameters[1].variable, UrlVariable::Lang);
    }

    #[test]
    fn unknown_variable_rejected_at_submission() {
        let mut s = submission("http://example.com");
        s.parameters = vec![("a".into(), "nonsense".into())];
        let err = s.create(1, 0).unwrap_err();
        assert_eq!(err, UnknownVariable("nonsense".into()));
    }

    #[test]
    fn update_replaces_blobs() {
        let mut resource = submission("http://example.com").create(3, 100).unwrap();

        let mut s = submission("ftp://example.org/pub");
        s.parameters = vec![("u".into(), "userid".into())];
        s.apply(&mut resource, 200).unwrap();

        assert_eq!(resource.id, 3);
        assert_eq!(resource.external_url, "ftp://example.org/pub");
        assert_eq!(resource.time_modified, 200);
        assert_eq!(resource.parameters().len(), 1);
    }
}
