use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Colors and sizes shared by every chart backend
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    /// Axis lines, ticks, tick labels, titles and legend text
    pub foreground: Color,
    pub grid_alpha: f32,
    pub legend_background_alpha: f32,
    pub default_series_color: Color,
    pub default_line_width: f64,
    pub bar_width: f64,
    pub stacked_bar_width: f64,
    pub track_outline: Color,
    pub track_outline_width: f64,
    pub marker_radius: f64,
    /// Marker colors for the "slower" (0) and "faster" (1) categories of a delta map
    pub delta_palette: [Color; 2],
}

pub const DARK_THEME: Theme = Theme {
    background: Color::rgb(0x52, 0x51, 0x51),
    foreground: Color::WHITE,
    grid_alpha: 0.4,
    legend_background_alpha: 0.4,
    default_series_color: Color::CORNFLOWER_BLUE,
    default_line_width: 2.,
    bar_width: 0.8,
    stacked_bar_width: 0.7,
    track_outline: Color::rgb(0x9a, 0x9a, 0x9a),
    track_outline_width: 6.,
    marker_radius: 3.,
    delta_palette: [Color::rgb(0x17, 0x88, 0xff), Color::rgb(0xfc, 0x44, 0x32)],
};

impl Default for Theme {
    fn default() -> Self {
        DARK_THEME
    }
}
