//! JSON configuration for the offline `screen` tool.

use crate::screen::FilterOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Tool configuration: filter overrides plus optional outputs.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScreenToolConfig {
    pub filter: FilterOptions,
    pub output: ScreenOutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScreenOutputConfig {
    /// Where to write the JSON screen report.
    pub report_json: Option<PathBuf>,
    /// Where to write the binary edge map as a PNG.
    pub edge_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ScreenToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_reference_thresholds() {
        let config: ScreenToolConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.filter.min_edge_density, 0.01);
        assert_eq!(config.filter.max_edge_density, 0.3);
        assert_eq!(config.filter.hough.vote_threshold, 100);
        assert!(config.output.report_json.is_none());
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config: ScreenToolConfig = serde_json::from_str(
            r#"{
                "filter": {
                    "min_horizontal_segments": 5,
                    "canny": { "low_threshold": 40.0 }
                },
                "output": { "report_json": "out/report.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.filter.min_horizontal_segments, 5);
        assert_eq!(config.filter.canny.low_threshold, 40.0);
        assert_eq!(config.filter.canny.high_threshold, 150.0);
        assert_eq!(config.filter.horizontal_tol_px, 5);
        assert_eq!(
            config.output.report_json.as_deref(),
            Some(Path::new("out/report.json"))
        );
    }
}
