//! Pipeline configuration.
//!
//! Settings can come from a YAML file, from command-line flags, or both.
//! [`PipelineSettings`] holds the partially-specified form so that flag
//! values can be layered over file values before [`PipelineSettings::build`]
//! produces a validated [`PipelineConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Frame duration used when none is configured.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 300;

/// Fully-resolved settings for one conversion + composition run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory tree scanned for `.tif` files
    pub input_dir: PathBuf,
    /// Flat directory receiving the normalized PNGs
    pub output_dir: PathBuf,
    /// Destination of the animated GIF
    pub gif_path: PathBuf,
    /// Sample value zeroed before stretching
    pub nodata: Option<f64>,
    /// Display time of every frame, in milliseconds
    pub duration_ms: u32,
    /// Preferred TrueType font for frame labels
    pub font_path: Option<PathBuf>,
    /// Loop the GIF forever instead of playing it once
    pub repeat: bool,
}

impl PipelineConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        gif_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            gif_path: gif_path.into(),
            nodata: None,
            duration_ms: DEFAULT_FRAME_DURATION_MS,
            font_path: None,
            repeat: true,
        }
    }

    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_font_path(mut self, font_path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(font_path.into());
        self
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Check the values that cannot be caught by the type system.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.duration_ms == 0 {
            return Err(ConfigError::InvalidSetting {
                setting: "duration_ms",
                message: "frame duration must be greater than zero".to_string(),
            });
        }
        if let Some(nodata) = self.nodata {
            if !nodata.is_finite() {
                return Err(ConfigError::InvalidSetting {
                    setting: "nodata",
                    message: format!("no-data value must be finite, got {nodata}"),
                });
            }
        }
        for (setting, path) in [
            ("input_dir", &self.input_dir),
            ("output_dir", &self.output_dir),
            ("gif_path", &self.gif_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingSetting(setting));
            }
        }
        Ok(())
    }
}

/// Partially-specified settings, as read from a YAML file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSettings {
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub gif_path: Option<PathBuf>,
    #[serde(default)]
    pub nodata: Option<f64>,
    #[serde(default)]
    pub duration_ms: Option<u32>,
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default)]
    pub repeat: Option<bool>,
}

impl PipelineSettings {
    /// Load settings from a YAML file.
    pub fn from_yaml_file(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded pipeline settings");
        Ok(settings)
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: PipelineSettings) -> Self {
        Self {
            input_dir: overrides.input_dir.or(self.input_dir),
            output_dir: overrides.output_dir.or(self.output_dir),
            gif_path: overrides.gif_path.or(self.gif_path),
            nodata: overrides.nodata.or(self.nodata),
            duration_ms: overrides.duration_ms.or(self.duration_ms),
            font_path: overrides.font_path.or(self.font_path),
            repeat: overrides.repeat.or(self.repeat),
        }
    }

    /// Resolve defaults and validate.
    pub fn build(self) -> ConfigResult<PipelineConfig> {
        let config = PipelineConfig {
            input_dir: self.input_dir.ok_or(ConfigError::MissingSetting("input_dir"))?,
            output_dir: self.output_dir.ok_or(ConfigError::MissingSetting("output_dir"))?,
            gif_path: self.gif_path.ok_or(ConfigError::MissingSetting("gif_path"))?,
            nodata: self.nodata,
            duration_ms: self.duration_ms.unwrap_or(DEFAULT_FRAME_DURATION_MS),
            font_path: self.font_path,
            repeat: self.repeat.unwrap_or(true),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_settings() -> PipelineSettings {
        PipelineSettings {
            input_dir: Some("in".into()),
            output_dir: Some("png".into()),
            gif_path: Some("out.gif".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_applies_defaults() {
        let config = complete_settings().build().unwrap();
        assert_eq!(config.duration_ms, DEFAULT_FRAME_DURATION_MS);
        assert_eq!(config.nodata, None);
        assert!(config.repeat);
        assert_eq!(config, PipelineConfig::new("in", "png", "out.gif"));
    }

    #[test]
    fn test_build_requires_paths() {
        let settings = PipelineSettings {
            gif_path: None,
            ..complete_settings()
        };
        assert!(matches!(
            settings.build(),
            Err(ConfigError::MissingSetting("gif_path"))
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = PipelineConfig::new("in", "png", "out.gif").with_duration_ms(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { setting: "duration_ms", .. })
        ));
    }

    #[test]
    fn test_nan_nodata_rejected() {
        let config = PipelineConfig::new("in", "png", "out.gif").with_nodata(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = PipelineSettings {
            duration_ms: Some(500),
            nodata: Some(-9999.0),
            ..complete_settings()
        };
        let flags = PipelineSettings {
            duration_ms: Some(120),
            output_dir: Some("elsewhere".into()),
            ..Default::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.duration_ms, Some(120));
        assert_eq!(merged.nodata, Some(-9999.0));
        assert_eq!(merged.output_dir, Some(PathBuf::from("elsewhere")));
        assert_eq!(merged.input_dir, Some(PathBuf::from("in")));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        fs::write(
            &path,
            "input_dir: /data/tif\noutput_dir: /data/png\ngif_path: /data/out.gif\nnodata: 0\nduration_ms: 250\nrepeat: false\n",
        )
        .unwrap();

        let config = PipelineSettings::from_yaml_file(&path).unwrap().build().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/data/tif"));
        assert_eq!(config.nodata, Some(0.0));
        assert_eq!(config.duration_ms, 250);
        assert!(!config.repeat);
    }

    #[test]
    fn test_from_yaml_file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        fs::write(&path, "input_dir: a\nframe_rate: 12\n").unwrap();

        assert!(matches!(
            PipelineSettings::from_yaml_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = PipelineSettings::from_yaml_file(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
