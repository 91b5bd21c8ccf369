use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, DisplaySettings, ImportSettings, LoggingSettings, OutputFormat};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tradebook.toml";

/// Prefix for environment overrides, e.g. `TRADEBOOK__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "TRADEBOOK";

/// Loads the application configuration from `tradebook.toml`.
///
/// This function is the primary entry point for this crate. The file is
/// optional; every setting has a default.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration from a specific file, overlaid with environment
/// variables, and validates it.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, path = %path.display(), "Configuration loaded.");
    Ok(config)
}
