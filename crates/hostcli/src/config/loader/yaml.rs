use std::path::{Path, PathBuf};

use config::{Environment, FileFormat, Map};
use tracing::debug;

use crate::{
    config::AppConfig,
    fs::{FileSystem, FileSystemError},
};

use super::{ConfigLoadError, ConfigLoader};

const ENV_PREFIX: &str = "HOSTCLI";
const OS_REST_URL: &str = "OS_REST_URL";
const OS_TOKEN: &str = "OS_TOKEN";

/// Loads `config.yaml`/`config.yml` from the config directory, then the environment
///
/// Precedence, lowest first: defaults, the config file, `OS_REST_URL`/`OS_TOKEN`,
/// `HOSTCLI_*` variables.
pub struct Yaml<'a, F: FileSystem> {
    fs: &'a F,
    environment: Map<String, String>,
}

impl<'a, F: FileSystem> Yaml<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            environment: std::env::vars().collect(),
        }
    }

    /// Replace the process environment with `environment`
    ///
    #[must_use]
    pub fn with_environment<I>(mut self, environment: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.environment = environment.into_iter().collect();
        self
    }

    fn config_files_in(&self, config_dir: &Path) -> Vec<PathBuf> {
        ["config.yaml", "config.yml"]
            .into_iter()
            .map(|name| config_dir.join(name))
            .filter(|path| self.fs.path_exists(path))
            .collect()
    }

    fn os_variables(&self) -> Map<String, String> {
        [(OS_REST_URL, "rest_url"), (OS_TOKEN, "token")]
            .into_iter()
            .filter_map(|(var, key)| {
                self.environment
                    .get(var)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect()
    }
}

impl<F: FileSystem> ConfigLoader for Yaml<'_, F> {
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError> {
        let config_dir = self.fs.config_dir()?;
        let config_paths = self.config_files_in(&config_dir);

        if config_paths.len() > 1 {
            return Err(ConfigLoadError::MultipleFound(
                config_paths
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
            ));
        }

        let mut builder = config::Config::builder();

        if let Some(config_path) = config_paths.first() {
            debug!("Reading configuration from {}", config_path.display());
            let file_contents = self.fs.read_file(config_path)?;
            builder = builder.add_source(config::File::from_str(&file_contents, FileFormat::Yaml));
        } else {
            debug!(
                "No configuration file in {}, using defaults",
                config_dir.display()
            );
        }

        let config = builder
            .add_source(Environment::default().source(Some(self.os_variables())))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(self.environment.clone())),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        app_config.command_directory = if app_config.command_directory.as_os_str().is_empty() {
            config_dir.join("commands")
        } else {
            self.fs.expand_path(&app_config.command_directory)?
        };

        Ok(app_config)
    }

    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, FileSystemError> {
        let config_dir = self.fs.config_dir()?;
        Ok(self.config_files_in(&config_dir))
    }
}
