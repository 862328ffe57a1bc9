use std::{
    fs,
    path::{Path, PathBuf},
};

use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};

use super::{FileSystem, FileSystemError};

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "HOSTCLI_CONFIG_DIR";

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        Ok(fs::read_to_string(path)?)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        let binding = path.to_string_lossy();
        let expanded = shellexpand::tilde(&binding);

        Ok(PathBuf::from(expanded.as_ref()))
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(path)? {
            paths.push(entry?.path());
        }

        Ok(paths)
    }

    fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        choose_app_strategy(AppStrategyArgs {
            top_level_domain: "org".to_string(),
            author: "hostcli".to_string(),
            app_name: "hostcli".to_string(),
        })
        .map(|xdg| xdg.config_dir())
        .map_err(|_| FileSystemError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_and_list() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("alarms.yaml");

        assert!(!fs.path_exists(&file_path));

        std::fs::write(&file_path, "commands: []").unwrap();

        assert!(fs.path_exists(&file_path));
        assert_eq!(fs.read_file(&file_path).unwrap(), "commands: []");
        assert_eq!(fs.list_directory(dir.path()).unwrap(), vec![file_path]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();

        let result = fs.read_file(&dir.path().join("missing.yaml"));

        assert!(matches!(result, Err(FileSystemError::IoError(_))));
    }

    #[test]
    fn test_expand_path_leaves_absolute_paths_alone() {
        let fs = RealFileSystem;

        let expanded = fs.expand_path(Path::new("/etc/hostcli/commands")).unwrap();

        assert_eq!(expanded, PathBuf::from("/etc/hostcli/commands"));
    }
}
