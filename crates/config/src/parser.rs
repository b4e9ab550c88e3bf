use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    parse_config(&content)
}

/// Parse configuration text, substituting environment variables first.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    parse_config_with(content, |name| std::env::var(name).ok())
}

/// [`parse_config`] with a caller-supplied variable lookup.
pub fn parse_config_with<F>(content: &str, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let substituted = substitution::substitute_with(content, lookup)?;

    let mut config: AppConfig = serde_yaml::from_str(&substituted.content)
        .with_context(|| "Failed to parse YAML configuration")?;
    config.unresolved_env_vars = substituted.unresolved;

    info!("Configuration loaded successfully");
    Ok(config)
}

#[instrument]
pub fn generate_default_config() -> AppConfig {
    AppConfig {
        application: ApplicationConfig {
            name: Some("xray-demo".to_string()),
        },
        server: Some(HttpConfig::default()),
        storage: Some(StorageConfig::default()),
        remote: Some(RemoteConfig::default()),
        database: DatabaseConfig {
            url: "${DATABASE_URL}".to_string(),
            ..DatabaseConfig::default()
        },
        logging: Some(LoggingConfig::default()),
        monitoring: None,
        unresolved_env_vars: vec!["DATABASE_URL".to_string()],
    }
}

#[instrument(skip(config))]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &AppConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
