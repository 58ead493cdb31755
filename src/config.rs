use crate::FolioError;
use folio_drawing::PathParseOptions;
use folio_layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, e.g.
///
/// ```json
/// { "layout": { "hyphenation": { "minCharsBefore": 3 } }, "path": { "strict": false } }
/// ```
///
/// Missing sections and fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FolioConfig {
    pub layout: LayoutConfig,
    pub path: PathParseOptions,
}

impl FolioConfig {
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        let config: FolioConfig = serde_json::from_str(json)?;
        config.layout.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn path_options(&self) -> PathParseOptions {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = FolioConfig::from_json("{}").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert!(config.path_options().strict);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = FolioConfig::from_json(
            r#"{ "layout": { "hyphenate": false }, "path": { "strict": false } }"#,
        )
        .unwrap();
        assert!(!config.layout.hyphenate);
        assert!(!config.path_options().strict);
    }

    #[test]
    fn test_invalid_strategy_is_rejected() {
        let result = FolioConfig::from_json(r#"{ "layout": { "hyphenation": { "hyphenAppend": "a" } } }"#);
        assert!(matches!(result, Err(FolioError::Layout(_))));
        assert!(matches!(FolioConfig::from_json("{"), Err(FolioError::Json(_))));
    }
}
