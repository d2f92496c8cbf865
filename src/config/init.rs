use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{
    get_config_path, Config, DispatchConfig, VerificationConfig, DEFAULT_DISPATCH_ENDPOINT,
    DEFAULT_DISPATCH_TIMEOUT, DEFAULT_VERIFY_ENDPOINT, DEFAULT_VERIFY_TIMEOUT,
};
use crate::scoring::{ScoringConfig, DEFAULT_CGPA_WEIGHT, DEFAULT_PRACTICE_WEIGHT};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt until the answer parses as a non-negative number
fn prompt_weight(message: &str, default: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            _ => println!("  Invalid: must be a non-negative number. Try again."),
        }
    }
}

/// Prompt until the answer parses as a humantime duration
fn prompt_duration(message: &str, default: &str) -> Result<String> {
    loop {
        let input = prompt_with_default(message, default)?;
        match humantime::parse_duration(&input) {
            Ok(_) => return Ok(input),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

/// Serialize `config` as YAML and write it to `path` atomically.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_config(path: &Path, config: &Config, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }
    }

    let yaml = serde_saphyr::to_string(config).context("Failed to serialize config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Config written by `init --defaults`.
///
/// `sections` stays unset so the count is inferred from each roster.
pub fn default_config() -> Config {
    Config {
        sections: None,
        scoring: Some(ScoringConfig::default()),
        verification: Some(VerificationConfig {
            endpoint: Some(DEFAULT_VERIFY_ENDPOINT.to_string()),
            timeout: Some(DEFAULT_VERIFY_TIMEOUT.to_string()),
        }),
        dispatch: Some(DispatchConfig {
            endpoint: Some(DEFAULT_DISPATCH_ENDPOINT.to_string()),
            timeout: Some(DEFAULT_DISPATCH_TIMEOUT.to_string()),
            subject: None,
            template: None,
        }),
    }
}

/// Run the interactive init wizard to create a config file.
///
/// With `use_defaults` no questions are asked.
pub fn run_init_wizard(path: Option<&Path>, use_defaults: bool, force: bool) -> Result<()> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    let config = if use_defaults {
        default_config()
    } else {
        println!();
        println!("regroup configuration");
        println!("=====================");
        println!();

        let sections: Option<i64> = loop {
            let input = prompt("Default number of sections (blank: keep the roster's own count): ")?;
            if input.is_empty() {
                break None;
            }
            match input.parse::<i64>() {
                Ok(n) if n >= 1 => break Some(n),
                _ => println!("  Invalid: must be a whole number of at least 1. Try again."),
            }
        };

        println!();
        println!("Final score = cgpa_weight x CGPA + practice_weight x normalized practice (0-10).");
        let scoring = if prompt_yes_no("Use default weights (4 and 2)?", true)? {
            ScoringConfig::default()
        } else {
            ScoringConfig {
                cgpa_weight: Some(prompt_weight("CGPA weight", DEFAULT_CGPA_WEIGHT)?),
                practice_weight: Some(prompt_weight("Practice weight", DEFAULT_PRACTICE_WEIGHT)?),
            }
        };

        println!();
        let verification = VerificationConfig {
            endpoint: Some(prompt_with_default(
                "Verification service URL",
                DEFAULT_VERIFY_ENDPOINT,
            )?),
            timeout: Some(prompt_duration("Verification timeout", DEFAULT_VERIFY_TIMEOUT)?),
        };
        let dispatch = DispatchConfig {
            endpoint: Some(prompt_with_default(
                "Email dispatch service URL",
                DEFAULT_DISPATCH_ENDPOINT,
            )?),
            timeout: Some(prompt_duration("Dispatch timeout", DEFAULT_DISPATCH_TIMEOUT)?),
            subject: None,
            template: None,
        };

        Config {
            sections,
            scoring: Some(scoring),
            verification: Some(verification),
            dispatch: Some(dispatch),
        }
    };

    write_config(&config_path, &config, force)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `regroup allocate <roster.csv>` to get started.");

    Ok(())
}
