use hostcli::{
    command::{CommandRepository, DisplayMode, Operation, YamlCommandRepository},
    fs::RealFileSystem,
};
use test_common::{
    TempDir, create_command_file, create_invalid_command_file, write_alarm_commands,
};

#[test]
fn test_loads_alarm_group_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let _ = write_alarm_commands(temp_dir.path());
    std::fs::write(temp_dir.path().join("notes.txt"), "not a command file").unwrap();

    let repo = YamlCommandRepository::new(RealFileSystem, temp_dir.path().to_path_buf());
    let output = repo.load_commands().unwrap();

    assert!(output.invalid().is_empty());
    assert_eq!(output.commands().len(), 3);

    let list = output.get("alarm list").unwrap();
    assert_eq!(list.mode(), DisplayMode::List);
    assert_eq!(list.path(), "fm/v1/alarms");
    assert!(list.positional_arguments().is_empty());

    let show = output.get("alarm show").unwrap();
    assert_eq!(show.mode(), DisplayMode::ShowOne);
    assert_eq!(show.positional_arguments(), ["name"]);

    let clear = output.get("alarm clear").unwrap();
    assert_eq!(clear.operation(), Operation::Delete);
    assert!(clear.use_body());
}

#[test]
fn test_invalid_file_does_not_hide_valid_ones() {
    let temp_dir = TempDir::new().unwrap();
    let _ = write_alarm_commands(temp_dir.path());
    let broken = create_invalid_command_file(temp_dir.path(), "broken");

    let repo = YamlCommandRepository::new(RealFileSystem, temp_dir.path().to_path_buf());
    let output = repo.load_commands().unwrap();

    assert_eq!(output.commands().len(), 3);
    assert_eq!(output.invalid().len(), 1);
    assert_eq!(output.invalid()[0].path(), broken);
}

#[test]
fn test_duplicate_command_across_files_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let _ = write_alarm_commands(temp_dir.path());
    let _ = create_command_file(
        temp_dir.path(),
        "more_alarms",
        r#"
fields:
  name: { display: Name, help: Alarm name }
commands:
  - name: alarm list
    endpoint: other
"#,
    );

    let repo = YamlCommandRepository::new(RealFileSystem, temp_dir.path().to_path_buf());
    let output = repo.load_commands().unwrap();

    assert_eq!(output.commands().len(), 3);
    assert_eq!(output.invalid().len(), 1);
    assert!(output.invalid()[0].to_string().contains("alarm list"));
}

#[test]
fn test_missing_directory_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let repo = YamlCommandRepository::new(RealFileSystem, temp_dir.path().join("missing"));

    assert!(repo.load_commands().is_err());
}
