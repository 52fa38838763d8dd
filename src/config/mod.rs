mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./ffcompose.toml",
        "~/.config/ffcompose/config.toml",
        "/etc/ffcompose/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.program.trim().is_empty() {
        anyhow::bail!("Config 'program' cannot be empty");
    }

    if let Some(dir) = &config.font_dir {
        if !dir.exists() {
            tracing::warn!("Font directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.program, "ffmpeg");
        assert!(config.overwrite);
        assert!(config.hide_banner);
        assert!(config.loglevel.is_none());
    }

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "program = \"/usr/bin/ffmpeg\"\noverwrite = false\nloglevel = \"error\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.program, "/usr/bin/ffmpeg");
        assert!(!config.overwrite);
        assert_eq!(
            config.base_command().build().unwrap(),
            ["-hide_banner", "-loglevel", "error"]
        );
    }

    #[test]
    fn test_empty_program_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "program = \"\"").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_font_dir_resolver() {
        let config = Config {
            font_dir: Some("/opt/fonts".into()),
            ..Default::default()
        };
        assert_eq!(
            config.font_resolver().resolve_font_path("a.ttf"),
            std::path::PathBuf::from("/opt/fonts/a.ttf")
        );
    }
}
