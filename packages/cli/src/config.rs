use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tsdefgen_emitter::EmitOptions;

pub const DEFAULT_CONFIG_NAME: &str = "tsdefgen.config.json";

/// tsdefgen configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Emitter options applied to every generated file
    #[serde(default)]
    pub emit: EmitOptions,

    /// Output directory; generated files land beside their sources when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute output directory, if one is configured
    pub fn get_out_dir(&self, cwd: &str) -> Option<PathBuf> {
        self.out_dir.as_ref().map(|dir| PathBuf::from(cwd).join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsdefgen_emitter::{IndentStyle, MissingReferencePolicy};

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "emit": {
                "declareModule": true,
                "indent": "tab",
                "missingReferences": "fail",
                "camelCasePropertyNames": false
            },
            "outDir": "typings"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.emit.declare_module);
        assert_eq!(config.emit.indent, IndentStyle::Tab);
        assert_eq!(config.emit.missing_references, MissingReferencePolicy::Fail);
        assert!(!config.emit.camel_case_property_names);
        assert_eq!(config.out_dir, Some("typings".to_string()));
        assert_eq!(
            config.get_out_dir("/project"),
            Some(PathBuf::from("/project/typings"))
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.emit, EmitOptions::default());
        assert_eq!(config.out_dir, None);
        assert_eq!(config.get_out_dir("/project"), None);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(&temp_dir.path().display().to_string()).unwrap();
        assert_eq!(config.emit, EmitOptions::default());
    }
}
