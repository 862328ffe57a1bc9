use std::path::{Path, PathBuf};

use url::Url;

use crate::validation::{ValidationErrorCategory, ValidationIssue, ValidationIssues};

use super::AppConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// The command directory the configuration points at
    ///
    pub(crate) command_directory: PathBuf,

    /// List of validation issues found
    ///
    pub(crate) issues: ValidationIssues,
}

impl ValidationResult {
    #[must_use]
    pub fn command_directory(&self) -> &Path {
        &self.command_directory
    }

    #[must_use]
    pub fn issues(&self) -> &ValidationIssues {
        &self.issues
    }

    /// Add issues found outside the configuration itself, e.g. broken definition files
    ///
    pub fn extend<I: IntoIterator<Item = ValidationIssue>>(&mut self, issues: I) {
        self.issues.extend(issues);
    }
}

impl AppConfig {
    /// Full validation for the `AppConfig`
    ///
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut issues = Vec::new();

        issues.extend(validate_rest_url(self.rest_url.as_deref()));
        issues.extend(validate_command_directory(&self.command_directory));

        if self.token.is_some() && self.rest_url.is_none() {
            issues.push(ValidationIssue::warning(
                ValidationErrorCategory::Other,
                "token",
                "A token is set but there is no `rest_url` to send it to",
                Some("Set `rest_url` or remove `token`"),
            ));
        }

        ValidationResult {
            command_directory: self.command_directory.clone(),
            issues: issues.into(),
        }
    }
}

fn validate_rest_url(rest_url: Option<&str>) -> Option<ValidationIssue> {
    let Some(rest_url) = rest_url else {
        return Some(ValidationIssue::error(
            ValidationErrorCategory::RequiredField,
            "rest_url",
            "No REST URL is configured",
            Some("Set `rest_url` in config.yaml or export OS_REST_URL"),
        ));
    };

    match Url::parse(rest_url) {
        Err(e) => Some(ValidationIssue::error(
            ValidationErrorCategory::UrlFormat,
            "rest_url",
            &format!("`{rest_url}` is not a valid URL: {e}"),
            Some("Use an absolute URL. Ex. `rest_url: http://localhost:61200`"),
        )),
        Ok(url) if !matches!(url.scheme(), "http" | "https") => Some(ValidationIssue::error(
            ValidationErrorCategory::UrlFormat,
            "rest_url",
            &format!("Unsupported URL scheme `{}`", url.scheme()),
            Some("Use an http or https URL"),
        )),
        Ok(_) => None,
    }
}

fn validate_command_directory(command_directory: &Path) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if command_directory.as_os_str().is_empty() {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::RequiredField,
            "command_directory",
            "The `command_directory` field exists, but has no value",
            Some("Set a value for `command_directory`. Ex. `command_directory: ~/.config/hostcli/commands`"),
        ));
        return issues;
    }

    let command_dir = command_directory.to_string_lossy();
    let expanded_path = shellexpand::tilde(&command_dir);
    let expanded_path = Path::new(expanded_path.as_ref());

    if !expanded_path.is_absolute() {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::PathFormat,
            "command_directory",
            "The path at `command_directory` is not absolute",
            Some("Provide an absolute path or one starting with `~`"),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfigBuilder;

    #[test]
    fn test_valid_config_has_no_issues() {
        let config = AppConfigBuilder::default()
            .rest_url("http://localhost:61200")
            .command_directory("/etc/hostcli/commands")
            .build();

        let result = config.validate();

        assert!(result.issues().is_empty());
        assert_eq!(result.command_directory(), Path::new("/etc/hostcli/commands"));
    }

    #[test]
    fn test_missing_rest_url() {
        let config = AppConfigBuilder::default()
            .command_directory("/etc/hostcli/commands")
            .token("secret")
            .build();

        let result = config.validate();
        let errors = result.issues().errors();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "rest_url");
        assert_eq!(errors[0].category(), ValidationErrorCategory::RequiredField);
        assert_eq!(result.issues().warnings()[0].field(), "token");
    }

    #[test]
    fn test_bad_rest_urls() {
        let not_a_url = validate_rest_url(Some("localhost 61200")).unwrap();
        assert_eq!(not_a_url.category(), ValidationErrorCategory::UrlFormat);

        let wrong_scheme = validate_rest_url(Some("ftp://localhost")).unwrap();
        assert!(wrong_scheme.message().contains("ftp"));

        assert!(validate_rest_url(Some("https://backend:8443/api")).is_none());
    }

    #[test]
    fn test_command_directory_checks() {
        let empty = validate_command_directory(Path::new(""));
        assert_eq!(empty[0].category(), ValidationErrorCategory::RequiredField);

        let relative = validate_command_directory(Path::new("commands"));
        assert_eq!(relative[0].category(), ValidationErrorCategory::PathFormat);

        assert!(validate_command_directory(Path::new("/srv/hostcli/commands")).is_empty());
    }
}
