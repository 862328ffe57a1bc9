use assert_cmd::Command;
use tempfile::TempDir;

/// A `hostcli` command isolated from the caller's environment, reading its configuration
/// from `config_dir`
#[must_use]
pub fn get_command_with_config(config_dir: &TempDir) -> Command {
    let mut cmd = get_command();
    cmd.env("HOSTCLI_CONFIG_DIR", config_dir.path());
    cmd
}

/// A `hostcli` command isolated from the caller's environment
#[must_use]
pub fn get_command() -> Command {
    let mut cmd = Command::cargo_bin("hostcli").unwrap();
    cmd.env_remove("OS_REST_URL")
        .env_remove("OS_TOKEN")
        .env_remove("HOSTCLI_REST_URL")
        .env_remove("HOSTCLI_TOKEN")
        .env("TZ", "UTC");
    cmd
}
