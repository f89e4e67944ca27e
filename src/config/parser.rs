use super::{Config, ConfigError};
use std::path::Path;
use tracing::debug;

/// Read, parse and validate a TOML config file.
pub fn parse_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config_str(&content)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parse and validate TOML config text.
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    // Validation errors are returned as-is, not wrapped in a parse error
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{SortOrder, WriteMode};
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_gives_defaults() -> anyhow::Result<()> {
        assert_eq!(parse_config_str("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_full_config() -> anyhow::Result<()> {
        let config = parse_config_str(
            r#"
            [media]
            dir = "public/img"
            manifest_file = "images.json"
            extensions = [".PNG", "avif"]
            sort = "case-insensitive"
            write_mode = "direct"

            [watch]
            quiet_period = "2s"
            "#,
        )?;

        assert_eq!(config.media.dir, PathBuf::from("public/img"));
        assert_eq!(config.media.manifest_file, "images.json");
        assert_eq!(config.media.extensions, [".PNG", "avif"]);
        assert_eq!(config.media.sort, SortOrder::CaseInsensitive);
        assert_eq!(config.media.write_mode, WriteMode::Direct);
        assert_eq!(config.watch.quiet_period, Duration::from_secs(2));
        Ok(())
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() -> anyhow::Result<()> {
        let config = parse_config_str("[watch]\nquiet_period = \"50ms\"")?;

        assert_eq!(config.watch.quiet_period, Duration::from_millis(50));
        assert_eq!(config.media, Config::default().media);
        Ok(())
    }

    #[test]
    fn test_malformed_configs() {
        let cases = [
            "invalid toml content {{ broken",
            "[media\ndir = \"x\"",
            "[media]\nsort = \"random\"",
            "[media]\nextensions = \"png\"",
            "[media]\nwrite_mode = \"sometimes\"",
            "[watch]\nquiet_period = 300",
            "[watch]\nquiet_period = \"soon\"",
        ];

        for content in cases {
            assert!(
                matches!(parse_config_str(content), Err(ConfigError::Parse(_))),
                "expected parse error for {content:?}"
            );
        }
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        assert!(matches!(
            parse_config_str("[media]\nextensions = []"),
            Err(ConfigError::EmptyAllowList)
        ));
        assert!(matches!(
            parse_config_str("[watch]\nquiet_period = \"0s\""),
            Err(ConfigError::ZeroQuietPeriod)
        ));
    }

    #[test]
    fn test_parse_config_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("media-manifest.toml");
        std::fs::write(&path, "[media]\ndir = \"assets\"\n")?;

        let config = parse_config_file(&path)?;

        assert_eq!(config.media.dir, PathBuf::from("assets"));
        Ok(())
    }
}
