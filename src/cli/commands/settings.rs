//! Configuration command.

use super::{Cli, load_config};
use crate::config::{self, Config};

/// Print the effective configuration, or create a default config file
pub fn cmd_config(cli: &Cli, init: bool) -> anyhow::Result<()> {
    if init {
        if let Some(path) = config::config_path().filter(|p| p.exists()) {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        let path = config::save(&Config::default())?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    match config::config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not found, showing defaults)", path.display()),
        None => println!("# no config directory, showing defaults"),
    }

    let shown = redact(load_config(cli));
    println!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}

/// Hide API keys in printed output
fn redact(mut config: Config) -> Config {
    let mask = |key: &mut Option<String>| {
        if key.is_some() {
            *key = Some("********".to_string());
        }
    };
    mask(&mut config.credentials.google_books_api_key);
    mask(&mut config.credentials.translate_api_key);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_keys() {
        let config = Config::default().with_credentials(Some("secret".to_string()), None);
        let shown = redact(config);
        assert_eq!(
            shown.credentials.google_books_api_key.as_deref(),
            Some("********")
        );
        assert!(shown.credentials.translate_api_key.is_none());
    }
}
