//! The closed catalog of substitutable link variables.
//!
//! A stored link may carry query parameters whose values come from the
//! render context (course, module, user, site, time). The catalog is a
//! closed enumeration: unknown names are rejected when a submission is
//! loaded. Resolution happens in [`values`] and may still come up empty at
//! render time (no logged-in user, role substitution off), in which case
//! the parameter is silently dropped from the output.

mod values;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A variable name that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown link variable: {0}")]
pub struct UnknownVariable(pub String);

/// One substitutable variable.
///
/// `CourseRole` covers the dynamic `course<roleshortname>` entries that
/// resolve to the role's display name when role substitution is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UrlVariable {
    // Course fields.
    CourseId,
    CourseFullName,
    CourseShortName,
    CourseIdNumber,
    CourseSummary,
    CourseFormat,

    // Link module fields.
    LinkInstance,
    LinkCmid,
    LinkName,
    LinkIdNumber,

    // Site / miscellaneous.
    SiteName,
    ServerUrl,
    CurrentTime,
    Lang,
    /// Legacy compatibility token derived from the caller address and the
    /// configured secret phrase. Not an authentication mechanism.
    EncryptedCode,

    // User fields, present only for a logged-in user.
    UserId,
    UserUsername,
    UserIdNumber,
    UserFirstName,
    UserLastName,
    UserFullName,
    UserEmail,
    UserIcq,
    UserPhone1,
    UserPhone2,
    UserInstitution,
    UserDepartment,
    UserAddress,
    UserCity,
    UserTimezone,
    UserUrl,

    /// `course<roleshortname>` → localized role name.
    CourseRole(String),
}

impl UrlVariable {
    /// Catalog name as it appears in stored parameter blobs and editing
    /// forms.
    pub fn name(&self) -> String {
        match self {
            UrlVariable::CourseId => "courseid".into(),
            UrlVariable::CourseFullName => "coursefullname".into(),
            UrlVariable::CourseShortName => "courseshortname".into(),
            UrlVariable::CourseIdNumber => "courseidnumber".into(),
            UrlVariable::CourseSummary => "coursesummary".into(),
            UrlVariable::CourseFormat => "courseformat".into(),
            UrlVariable::LinkInstance => "linkinstance".into(),
            UrlVariable::LinkCmid => "linkcmid".into(),
            UrlVariable::LinkName => "linkname".into(),
            UrlVariable::LinkIdNumber => "linkidnumber".into(),
            UrlVariable::SiteName => "sitename".into(),
            UrlVariable::ServerUrl => "serverurl".into(),
            UrlVariable::CurrentTime => "currenttime".into(),
            UrlVariable::Lang => "lang".into(),
            UrlVariable::EncryptedCode => "encryptedcode".into(),
            UrlVariable::UserId => "userid".into(),
            UrlVariable::UserUsername => "userusername".into(),
            UrlVariable::UserIdNumber => "useridnumber".into(),
            UrlVariable::UserFirstName => "userfirstname".into(),
            UrlVariable::UserLastName => "userlastname".into(),
            UrlVariable::UserFullName => "userfullname".into(),
            UrlVariable::UserEmail => "useremail".into(),
            UrlVariable::UserIcq => "usericq".into(),
            UrlVariable::UserPhone1 => "userphone1".into(),
            UrlVariable::UserPhone2 => "userphone2".into(),
            UrlVariable::UserInstitution => "userinstitution".into(),
            UrlVariable::UserDepartment => "userdepartment".into(),
            UrlVariable::UserAddress => "useraddress".into(),
            UrlVariable::UserCity => "usercity".into(),
            UrlVariable::UserTimezone => "usertimezone".into(),
            UrlVariable::UserUrl => "userurl".into(),
            UrlVariable::CourseRole(short) => format!("course{short}"),
        }
    }

    /// All fixed catalog entries, in presentation order. `encryptedcode` is
    /// listed only when a secret phrase is configured; role entries are
    /// dynamic and not included.
    pub fn fixed_catalog(with_encrypted_code: bool) -> Vec<UrlVariable> {
        let mut catalog = vec![
            UrlVariable::CourseId,
            UrlVariable::CourseFullName,
            UrlVariable::CourseShortName,
            UrlVariable::CourseIdNumber,
            UrlVariable::CourseSummary,
            UrlVariable::CourseFormat,
            UrlVariable::LinkInstance,
            UrlVariable::LinkCmid,
            UrlVariable::LinkName,
            UrlVariable::LinkIdNumber,
            UrlVariable::SiteName,
            UrlVariable::ServerUrl,
            UrlVariable::CurrentTime,
            UrlVariable::Lang,
        ];
        if with_encrypted_code {
            catalog.push(UrlVariable::EncryptedCode);
        }
        catalog.extend([
            UrlVariable::UserId,
            UrlVariable::UserUsername,
            UrlVariable::UserIdNumber,
            UrlVariable::UserFirstName,
            UrlVariable::UserLastName,
            UrlVariable::UserFullName,
            UrlVariable::UserEmail,
            UrlVariable::UserIcq,
            UrlVariable::UserPhone1,
            UrlVariable::UserPhone2,
            UrlVariable::UserInstitution,
            UrlVariable::UserDepartment,
            UrlVariable::UserAddress,
            UrlVariable::UserCity,
            UrlVariable::UserTimezone,
            UrlVariable::UserUrl,
        ]);
        catalog
    }
}

impl fmt::Display for UrlVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for UrlVariable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let var = match s {
            "courseid" => UrlVariable::CourseId,
            "coursefullname" => UrlVariable::CourseFullName,
            "courseshortname" => UrlVariable::CourseShortName,
            "courseidnumber" => UrlVariable::CourseIdNumber,
            "coursesummary" => UrlVariable::CourseSummary,
            "courseformat" => UrlVariable::CourseFormat,
            "linkinstance" => UrlVariable::LinkInstance,
            "linkcmid" => UrlVariable::LinkCmid,
            "linkname" => UrlVariable::LinkName,
            "linkidnumber" => UrlVariable::LinkIdNumber,
            "sitename" => UrlVariable::SiteName,
            "serverurl" => UrlVariable::ServerUrl,
            "currenttime" => UrlVariable::CurrentTime,
            "lang" => UrlVariable::Lang,
            "encryptedcode" => UrlVariable::EncryptedCode,
            "userid" => UrlVariable::UserId,
            "userusername" => UrlVariable::UserUsername,
            "useridnumber" => UrlVariable::UserIdNumber,
            "userfirstname" => UrlVariable::UserFirstName,
            "userlastname" => UrlVariable::UserLastName,
            "userfullname" => UrlVariable::UserFullName,
            "useremail" => UrlVariable::UserEmail,
            "usericq" => UrlVariable::UserIcq,
            "userphone1" => UrlVariable::UserPhone1,
            "userphone2" => UrlVariable::UserPhone2,
            "userinstitution" => UrlVariable::UserInstitution,
            "userdepartment" => UrlVariable::UserDepartment,
            "useraddress" => UrlVariable::UserAddress,
            "usercity" => UrlVariable::UserCity,
            "usertimezone" => UrlVariable::UserTimezone,
            "userurl" => UrlVariable::UserUrl,
            other => {
                // Role entries: "course" + role shortname (lowercase alnum).
                let short = other
                    .strip_prefix("course")
                    .filter(|rest| {
                        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
                    })
                    .ok_or_else(|| UnknownVariable(other.to_string()))?;
                UrlVariable::CourseRole(short.to_string())
            }
        };
        Ok(var)
    }
}

impl TryFrom<String> for UrlVariable {
    type Error = UnknownVariable;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UrlVariable> for String {
    fn from(var: UrlVariable) -> Self {
        var.name()
    }
}
