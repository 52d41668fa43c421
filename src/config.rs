use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use uom::si::f64::Velocity;
use uom::si::velocity::{kilometer_per_hour, mile_per_hour};

use crate::LaptraceError;
use crate::chart::{SvgChartConfig, Theme};
use crate::color::ColorScale;

const CONFIG_DIR_NAME: &str = "laptrace";
const CONFIG_FILE_NAME: &str = "config.json";

/// Unit speeds are displayed in. Session data is always km/h.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SpeedUnit {
    #[default]
    Kph,
    Mph,
}

impl SpeedUnit {
    pub fn convert(&self, speed_kph: f64) -> f64 {
        let velocity = Velocity::new::<kilometer_per_hour>(speed_kph);
        match self {
            Self::Kph => velocity.get::<kilometer_per_hour>(),
            Self::Mph => velocity.get::<mile_per_hour>(),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Kph => "km/h",
            Self::Mph => "mph",
        }
    }

    pub fn axis_label(&self) -> String {
        format!("Speed [{}]", self.symbol())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Theme,
    pub speed_unit: SpeedUnit,
    pub color_scale: ColorScale,
    /// Canvas size of SVG charts without a preferred size
    pub svg_canvas_size: (u32, u32),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            speed_unit: SpeedUnit::default(),
            color_scale: ColorScale::default(),
            svg_canvas_size: SvgChartConfig::default().canvas_size,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf, LaptraceError> {
        Ok(dirs::config_dir()
            .ok_or(LaptraceError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// `None` when no config file has been saved yet
    pub fn from_local_file() -> Result<Option<Self>, LaptraceError> {
        Self::from_path(&Self::config_path()?)
    }

    pub fn from_path(config_path: &Path) -> Result<Option<Self>, LaptraceError> {
        if !config_path.exists() {
            debug!("No config file at {:?}", config_path);
            return Ok(None);
        }
        let file = File::open(config_path).map_err(|e| LaptraceError::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(file)
            .map_err(|e| LaptraceError::ConfigSerializeError { source: e })?;
        info!("Loaded config from {:?}", config_path);
        Ok(Some(config))
    }

    /// Returns the path the config was written to
    pub fn save(&self) -> Result<PathBuf, LaptraceError> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), LaptraceError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| LaptraceError::ConfigIOError { source: e })?;
            }
        }

        let file = File::create(config_path).map_err(|e| LaptraceError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| LaptraceError::ConfigSerializeError { source: e })
    }

    pub fn svg_config(&self) -> SvgChartConfig {
        SvgChartConfig {
            canvas_size: self.svg_canvas_size,
            theme: self.theme.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::DARK_THEME;
    use crate::color::Color;
    use tempfile::TempDir;

    #[test]
    fn test_speed_conversion() {
        assert_eq!(SpeedUnit::Kph.convert(250.), 250.);
        assert!((SpeedUnit::Mph.convert(100.) - 62.137_119).abs() < 1e-5);
        assert_eq!(SpeedUnit::Mph.axis_label(), "Speed [mph]");
        assert_eq!(SpeedUnit::Kph.axis_label(), "Speed [km/h]");
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::from_path(&temp_dir.path().join("config.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.speed_unit = SpeedUnit::Mph;
        config.color_scale = ColorScale::Viridis;
        config.theme.marker_radius = 5.;
        config.theme.delta_palette = [Color::WHITE, Color::CORNFLOWER_BLUE];
        config.save_to(&config_path).unwrap();

        let reloaded = AppConfig::from_path(&config_path).unwrap().unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r##"{"speed_unit": "Mph", "theme": {"background": "#000000"}}"##,
        )
        .unwrap();

        let config = AppConfig::from_path(&config_path).unwrap().unwrap();
        assert_eq!(config.speed_unit, SpeedUnit::Mph);
        assert_eq!(config.theme.background, Color::rgb(0, 0, 0));
        assert_eq!(config.theme.grid_alpha, DARK_THEME.grid_alpha);
        assert_eq!(config.color_scale, ColorScale::Plasma);
        assert_eq!(config.svg_canvas_size, (1000, 600));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").unwrap();

        assert!(matches!(
            AppConfig::from_path(&config_path),
            Err(LaptraceError::ConfigSerializeError { .. })
        ));
    }

    #[test]
    fn test_svg_config_uses_theme() {
        let mut config = AppConfig::default();
        config.svg_canvas_size = (800, 400);
        config.theme.background = Color::WHITE;
        let svg_config = config.svg_config();
        assert_eq!(svg_config.canvas_size, (800, 400));
        assert_eq!(svg_config.theme.background, Color::WHITE);
    }
}
