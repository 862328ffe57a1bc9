pub mod yaml;

pub use self::yaml::YamlCommandRepository;

/// Sub-command names the CLI claims for itself
pub const BUILTIN_COMMANDS: &[&str] = &["config", "help"];
