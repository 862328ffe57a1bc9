//! Command definition and config directory helpers for repository and CLI tests.

use std::{fs, path::PathBuf};

use tempfile::TempDir;

/// A command group equivalent to the specs in [`crate::specs`].
pub const ALARMS_YAML: &str = r#"
resource_prefix: "fm/v1/"
fields:
  name: { display: Name, help: Alarm name }
  id: { display: Id, help: Alarm id }
  time: { display: Time, help: Time the alarm was raised }
  severity:
    display: Severity
    help: Alarm severity
    values: [critical, major, minor]
  text: { display: Text, help: Alarm text, detail: true }
  starttime: { display: Start, help: Only alarms raised after this time }
  endtime: { display: End, help: Only alarms raised before this time }
  detailed: { help: Show all details }
  utc: { help: Show times in UTC }
  sort: { display: Sort, help: Sort order }
commands:
  - name: alarm list
    help: List alarms
    endpoint: alarms
    arguments: [severity, starttime, endtime, detailed, utc, sort]
    positional_count: 0
    columns: [name, time, severity]
    detailed_columns: [text]
  - name: alarm show
    help: Show one alarm
    mode: show
    endpoint: alarm
    arguments: [name, utc]
    columns: [name, time, severity, text]
  - name: alarm clear
    help: Clear an alarm
    mode: action
    operation: delete
    endpoint: alarms
    arguments: [name]
    mandatory_positional: true
    use_body: true
    message: "Cleared ##name"
"#;

/// Writes `content` as `<name>.yaml` into `dir`.
///
/// # Example
/// ```rust
/// let temp_dir = TempDir::new().unwrap();
/// let path = create_command_file(temp_dir.path(), "alarms", ALARMS_YAML);
/// ```
#[must_use]
pub fn create_command_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let file_path = dir.join(format!("{name}.yaml"));
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Writes the sample alarm command group into `dir`.
#[must_use]
pub fn write_alarm_commands(dir: &std::path::Path) -> PathBuf {
    create_command_file(dir, "alarms", ALARMS_YAML)
}

/// Creates a command definition file with malformed YAML.
#[must_use]
pub fn create_invalid_command_file(dir: &std::path::Path, name: &str) -> PathBuf {
    let content = r#"# Invalid YAML - syntax error
fields:
  name: { display: Name, help: "unterminated
commands: []
"#;
    create_command_file(dir, name, content)
}

/// Creates a config directory holding `config.yaml` and a `commands/` directory with the
/// sample alarm commands.
///
/// `rest_url` is written to the config file when given.
#[must_use]
pub fn create_config_dir(rest_url: Option<&str>) -> TempDir {
    let config_dir = TempDir::new().unwrap();
    let command_dir = config_dir.path().join("commands");
    fs::create_dir_all(&command_dir).unwrap();
    let _ = write_alarm_commands(&command_dir);

    let mut config = format!("command_directory: \"{}\"\n", command_dir.display());
    if let Some(rest_url) = rest_url {
        config.push_str(&format!("rest_url: \"{rest_url}\"\n"));
    }
    config.push_str("retry_backoff: 0\n");
    fs::write(config_dir.path().join("config.yaml"), config).unwrap();

    config_dir
}
