use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info};

use crate::{
    command::{
        CommandGroupDefinition, CommandSpec,
        port::{CommandListError, CommandRepository, DefinitionError, LoadCommandsOutput},
    },
    error::ConfigurationError,
    fs::FileSystem,
};

use super::BUILTIN_COMMANDS;

/// Loads command groups from the `*.yaml`/`*.yml` files of one directory
///
#[derive(Debug, Clone)]
pub struct YamlCommandRepository<F: FileSystem> {
    fs: F,
    command_dir: PathBuf,
}

impl<F: FileSystem> YamlCommandRepository<F> {
    pub fn new(fs: F, command_dir: PathBuf) -> Self {
        Self { fs, command_dir }
    }

    /// List all YAML files in the command directory, in a stable order
    ///
    fn list_yaml_files(&self) -> Result<Vec<PathBuf>, std::io::Error> {
        let entries = self
            .fs
            .list_directory(&self.command_dir)
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        let mut yaml_files: Vec<PathBuf> = entries
            .into_iter()
            .filter(|path| {
                path.extension().is_some_and(|ext| {
                    let ext_str = ext.to_string_lossy().to_lowercase();
                    ext_str == "yaml" || ext_str == "yml"
                })
            })
            .collect();
        yaml_files.sort();

        Ok(yaml_files)
    }

    fn load_group_from_file(&self, path: &Path) -> Result<Vec<CommandSpec>, DefinitionError> {
        let content =
            self.fs
                .read_file(path)
                .map_err(|e| DefinitionError::FileSystemError {
                    path: path.to_path_buf(),
                    source_message: e.to_string(),
                })?;

        let group: CommandGroupDefinition =
            serde_yaml::from_str(&content).map_err(|e| DefinitionError::YamlParse {
                path: path.to_path_buf(),
                source: Arc::new(e),
            })?;

        group
            .into_specs()
            .map_err(|source| DefinitionError::Configuration {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Reject names that are built in, already taken, or a prefix of another command's name
///
fn check_names(
    loaded: &[CommandSpec],
    candidates: &[CommandSpec],
) -> Result<(), ConfigurationError> {
    for (index, spec) in candidates.iter().enumerate() {
        if BUILTIN_COMMANDS.contains(&spec.name_words()[0].as_str()) {
            return Err(ConfigurationError::ReservedCommand(spec.name()));
        }

        for other in loaded.iter().chain(&candidates[..index]) {
            if other.name_words() == spec.name_words() {
                return Err(ConfigurationError::DuplicateCommand(spec.name()));
            }
            if other.name_words().starts_with(spec.name_words())
                || spec.name_words().starts_with(other.name_words())
            {
                return Err(ConfigurationError::OverlappingCommand(
                    spec.name(),
                    other.name(),
                ));
            }
        }
    }

    Ok(())
}

impl<F: FileSystem> CommandRepository for YamlCommandRepository<F> {
    fn load_commands(&self) -> Result<LoadCommandsOutput, CommandListError> {
        if !self.fs.path_exists(&self.command_dir) {
            return Err(CommandListError::CommandDirectoryNotFound(
                self.command_dir.clone(),
            ));
        }

        let yaml_files = self.list_yaml_files().map_err(Arc::new)?;

        let mut output = LoadCommandsOutput::default();

        for path in yaml_files {
            debug!("Loading command definitions from {}", path.display());

            let group = self.load_group_from_file(&path).and_then(|specs| {
                check_names(&output.commands, &specs)
                    .map(|()| specs)
                    .map_err(|source| DefinitionError::Configuration {
                        path: path.clone(),
                        source,
                    })
            });

            match group {
                Ok(specs) => output.commands.extend(specs),
                Err(e) => output.invalid.push(e),
            }
        }

        info!(
            "Loaded {} command(s), {} invalid definition file(s)",
            output.commands.len(),
            output.invalid.len()
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    const ALARMS_YAML: &str = r#"
fields:
  name: { display: Name, help: Alarm name }
commands:
  - name: alarm list
    endpoint: alarms
    arguments: [name]
    columns: [name]
"#;

    const NODES_YAML: &str = r#"
fields:
  name: { display: Name, help: Node name }
commands:
  - name: node list
    endpoint: nodes
    columns: [name]
  - name: node show
    mode: show
    endpoint: node
    arguments: [name]
    columns: [name]
"#;

    fn command_dir() -> PathBuf {
        PathBuf::from("/test/commands")
    }

    fn mock_fs(files: &[(&str, &'static str)]) -> MockFileSystem {
        let mut fs = MockFileSystem::default();
        let dir = command_dir();
        fs.mock_path_exists(&dir, true);

        let mut entries: Vec<PathBuf> = files.iter().map(|(name, _)| dir.join(name)).collect();
        entries.push(dir.join("README.md"));
        fs.mock_list_directory(dir.clone(), &entries);

        for (name, content) in files {
            fs.mock_read_file(dir.join(name), *content);
        }

        fs
    }

    #[test]
    fn test_load_commands_from_all_yaml_files() {
        let fs = mock_fs(&[("alarms.yaml", ALARMS_YAML), ("nodes.yml", NODES_YAML)]);
        let repo = YamlCommandRepository::new(fs, command_dir());

        let output = repo.load_commands().unwrap();

        let names: Vec<_> = output.commands().iter().map(CommandSpec::name).collect();
        assert_eq!(names, vec!["alarm list", "node list", "node show"]);
        assert!(output.invalid().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let mut fs = MockFileSystem::default();
        fs.mock_path_exists(command_dir(), false);
        let repo = YamlCommandRepository::new(fs, command_dir());

        assert!(matches!(
            repo.load_commands(),
            Err(CommandListError::CommandDirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_files_are_reported_next_to_valid_ones() {
        let fs = mock_fs(&[
            ("alarms.yaml", ALARMS_YAML),
            ("broken.yaml", "commands: [unclosed"),
        ]);
        let repo = YamlCommandRepository::new(fs, command_dir());

        let output = repo.load_commands().unwrap();

        assert_eq!(output.commands().len(), 1);
        assert_eq!(output.invalid().len(), 1);
        assert!(matches!(
            output.invalid()[0],
            DefinitionError::YamlParse { .. }
        ));
        assert_eq!(output.invalid()[0].path(), command_dir().join("broken.yaml"));
    }

    #[test]
    fn test_duplicate_command_across_files() {
        let fs = mock_fs(&[("a.yaml", ALARMS_YAML), ("b.yaml", ALARMS_YAML)]);
        let repo = YamlCommandRepository::new(fs, command_dir());

        let output = repo.load_commands().unwrap();

        assert_eq!(output.commands().len(), 1);
        assert!(matches!(
            &output.invalid()[0],
            DefinitionError::Configuration {
                source: ConfigurationError::DuplicateCommand(name),
                ..
            } if name == "alarm list"
        ));
    }

    #[test]
    fn test_overlapping_and_builtin_names() {
        assert!(matches!(
            check_names(&[], &[spec("node"), spec("node list")]),
            Err(ConfigurationError::OverlappingCommand(..))
        ));
        assert!(matches!(
            check_names(&[], &[spec("config show")]),
            Err(ConfigurationError::ReservedCommand(_))
        ));
        assert!(check_names(&[spec("node list")], &[spec("node show")]).is_ok());
    }

    fn spec(name: &str) -> CommandSpec {
        CommandSpec::builder(name, Arc::default()).build().unwrap()
    }
}
