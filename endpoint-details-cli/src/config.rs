//! Config file loading

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use endpoint_details_core::PanelConfig;
use serde::Deserialize;

/// Contents of `config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: Option<String>,
    pub panel: PanelConfig,
}

/// `<config dir>/endpoint-details/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("endpoint-details").join("config.toml"))
}

/// Load the explicit path, else the default path if it exists, else defaults
pub fn load(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(FileConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn parse(content: &str) -> anyhow::Result<FileConfig> {
    let config: FileConfig = toml::from_str(content)?;
    config.panel.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use endpoint_details_core::i18n::Language;

    #[test]
    fn empty_file_is_default() {
        let config = parse("").unwrap();
        assert_eq!(config.panel, PanelConfig::default());
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn panel_section_overrides_defaults() {
        let config = parse(
            r#"
log_level = "debug"

[panel]
language = "zh-CN"
activity_log_page_size = 20
"#,
        )
        .unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.panel.language, Language::ZhCn);
        assert_eq!(config.panel.activity_log_page_size, 20);
        assert_eq!(config.panel.max_cached_endpoints, 16);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse("[panel]\nmax_cached_endpoints = 0\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }
}
