pub mod common;

use common::{get_command, get_command_with_config};
use predicates::prelude::*;
use test_common::{TEST_REST_URL, create_config_dir};

#[test]
fn test_cli_help() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("REST-managed host backend"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("alarm"));
}

#[test]
fn test_cli_version() {
    let mut cmd = get_command();
    cmd.arg("--version");
    cmd.assert().success();
}

#[test]
fn test_cli_without_command_shows_help() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_invalid_command() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.arg("invalid-command");
    cmd.assert().failure();
}

#[test]
fn test_group_help_lists_commands() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.args(["alarm", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_command_help_shows_metadata() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.args(["alarm", "list", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--severity"))
        .stdout(predicate::str::contains("[critical,major,minor]"))
        .stdout(predicate::str::contains("[Name,Time,Severity]"))
        .stdout(predicate::str::contains("--column"))
        .stdout(predicate::str::contains("--detailed"));
}

#[test]
fn test_cli_missing_required_positional() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.args(["alarm", "clear"]);
    cmd.assert().failure();
}

#[test]
fn test_cli_invalid_format() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.args(["--format", "xml", "config", "validate"]);
    cmd.assert().failure();
}

#[test]
fn test_cli_global_flags_are_accepted() {
    let config_dir = create_config_dir(Some(TEST_REST_URL));
    let mut cmd = get_command_with_config(&config_dir);
    cmd.args(["-v", "--no-color", "-f", "json", "config", "validate"]);
    cmd.assert().success();
}
