use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "argus.toml";

/// Load configuration from `path`, or from `./argus.toml` when no path is
/// given. A missing file is not an error; everything can come from flags
/// and environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {:?}", path))?;

    let config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse TOML config file")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(config.access_token.is_none());
        assert!(!config.insecure);
    }

    #[test]
    fn parses_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("argus.toml");
        fs::write(
            &path,
            "access_token = \"abc\"\nregion = \"saudi\"\ninsecure = true\n",
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.region.as_deref(), Some("saudi"));
        assert!(config.insecure);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("argus.toml");
        fs::write(&path, "access_token = [").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
