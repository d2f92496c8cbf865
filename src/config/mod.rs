pub mod init;
mod schema;

pub use init::{default_config, run_init_wizard, write_config};
pub use schema::{
    Config, DispatchConfig, VerificationConfig, DEFAULT_DISPATCH_ENDPOINT,
    DEFAULT_DISPATCH_TIMEOUT, DEFAULT_VERIFY_ENDPOINT, DEFAULT_VERIFY_TIMEOUT,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/regroup/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("regroup"))
}

/// Get the default config file path (~/.config/regroup/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/regroup/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default location is not an error; built-in
/// defaults apply.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                log::debug!("No config at {}, using defaults", default_path.display());
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

/// Parse configuration from YAML text
pub fn parse_config(yaml: &str) -> Result<Config> {
    let config: Config = serde_saphyr::from_str(yaml)?;
    Ok(config)
}

/// Validate everything in the config that can be checked up front.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(sections) = config.sections {
        if sections < 1 {
            errors.push(format!("sections: must be at least 1, got {}", sections));
        }
    }

    if let Err(scoring_errors) = crate::scoring::validate_scoring(&config.effective_scoring()) {
        errors.extend(scoring_errors);
    }

    if let Err(e) = config.verify_timeout() {
        errors.push(format!("{:#}", e));
    }
    if let Err(e) = config.dispatch_timeout() {
        errors.push(format!("{:#}", e));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
