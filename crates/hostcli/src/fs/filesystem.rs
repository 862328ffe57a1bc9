//! File system abstraction layer
//!
//! This module provides a trait-based abstraction for the file system operations the
//! configuration loader and the command repository need, so both can be tested without
//! touching the disk.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

/// Port for file system operations (Hexagonal Architecture)
///
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Read a file and return its contents as a string
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the file cannot be read or is not valid UTF-8.
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Check if a path exists
    ///
    fn path_exists(&self, path: &Path) -> bool;

    /// Expand a leading `~` to the user's home directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if the home directory is unknown.
    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError>;

    /// List the entries of a directory as full paths
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the directory cannot be read.
    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError>;

    /// Get the hostcli configuration directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if no configuration directory can be
    /// determined for the current user.
    fn config_dir(&self) -> Result<PathBuf, FileSystemError>;
}

#[derive(Error, Debug, Clone)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    IoError(Arc<io::Error>),

    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl From<io::Error> for FileSystemError {
    fn from(error: io::Error) -> Self {
        Self::IoError(Arc::new(error))
    }
}

#[cfg(any(test, feature = "with_mocks"))]
impl MockFileSystem {
    /// Return `content` whenever `path` is read
    ///
    pub fn mock_read_file<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: ToString,
    {
        let path_buf = PathBuf::from(path);
        let content_string = content.to_string();
        self.expect_read_file()
            .with(mockall::predicate::eq(path_buf))
            .returning(move |_| Ok(content_string.clone()));
    }

    /// Return `entries` whenever `path` is listed
    ///
    pub fn mock_list_directory<P>(&mut self, path: P, entries: &[P])
    where
        PathBuf: From<P>,
        P: Clone,
    {
        let dir = PathBuf::from(path);
        let paths: Vec<PathBuf> = entries.iter().cloned().map(PathBuf::from).collect();

        self.expect_list_directory()
            .with(mockall::predicate::eq(dir))
            .returning(move |_| Ok(paths.clone()));
    }

    pub fn mock_path_exists<P>(&mut self, path: P, exists: bool)
    where
        PathBuf: From<P>,
    {
        self.expect_path_exists()
            .with(mockall::predicate::eq(PathBuf::from(path)))
            .returning(move |_| exists);
    }

    pub fn mock_config_dir_ok<P>(&mut self, path: P)
    where
        PathBuf: From<P>,
    {
        let p = PathBuf::from(path);
        self.expect_config_dir().return_once(|| Ok(p));
    }

    pub fn mock_expand_path<P>(&mut self, input: P, output: P)
    where
        PathBuf: From<P>,
    {
        let input = PathBuf::from(input);
        let output = PathBuf::from(output);

        self.expect_expand_path()
            .with(mockall::predicate::eq(input))
            .return_once(|_| Ok(output));
    }

    /// Set up a config directory holding a single `config.yaml`
    ///
    pub fn mock_config_file(&mut self, config_dir: &Path, config_yaml: &str) {
        let config_path = config_dir.join("config.yaml");

        self.mock_config_dir_ok(config_dir);
        self.mock_path_exists(&config_path, true);
        self.mock_path_exists(config_dir.join("config.yml"), false);
        self.mock_read_file(&config_path, config_yaml);
    }
}
