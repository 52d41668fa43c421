// SVG chart generator, the headless backend for figures

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use super::{ChartRenderer, Figure, FigureBody, Theme, TrackColoring};
use crate::color::Color;
use crate::errors::LaptraceError;
use crate::shaper::{CompoundStack, Series};

const MARGIN_LEFT: f64 = 72.;
const MARGIN_RIGHT: f64 = 28.;
const MARGIN_TOP: f64 = 52.;
const MARGIN_BOTTOM: f64 = 56.;
const TARGET_TICKS: usize = 6;
const MIN_TRACK_CANVAS: u32 = 320;
const COLOR_BAR_WIDTH: f64 = 90.;
const COLOR_BAR_STOPS: usize = 11;
const MAX_SVG_BYTES: usize = 10_000_000;

/// Configuration for SVG chart generation
#[derive(Debug, Clone)]
pub struct SvgChartConfig {
    /// Canvas dimensions (width, height) in pixels for figures without a preferred size
    pub canvas_size: (u32, u32),
    /// Padding around a track map as a fraction of the canvas
    pub margin_percentage: f64,
    pub theme: Theme,
}

impl Default for SvgChartConfig {
    fn default() -> Self {
        Self {
            canvas_size: (1000, 600),
            margin_percentage: 0.1,
            theme: Theme::default(),
        }
    }
}

/// Represents a 2D coordinate point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box for coordinate calculations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn update(&mut self, point: Point2D) {
        if !point.x.is_finite() || !point.y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Widens zero-sized dimensions so that the box can be mapped onto a canvas
    fn padded(mut self) -> Self {
        if self.width() == 0. {
            let pad = (self.min_x.abs() * 0.05).max(0.5);
            self.min_x -= pad;
            self.max_x += pad;
        }
        if self.height() == 0. {
            let pad = (self.min_y.abs() * 0.05).max(0.5);
            self.min_y -= pad;
            self.max_y += pad;
        }
        self
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps data coordinates onto the pixel rectangle of a chart
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    bounds: BoundingBox,
}

impl PlotArea {
    fn map(&self, x: f64, y: f64) -> Point2D {
        Point2D::new(
            self.left + (x - self.bounds.min_x) / self.bounds.width() * self.width,
            self.top + self.height - (y - self.bounds.min_y) / self.bounds.height() * self.height,
        )
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const MAX_TICKS: usize = 100;

fn nice_step(range: f64, target_ticks: usize) -> f64 {
    let raw = range / target_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1. {
        1.
    } else if residual <= 2. {
        2.
    } else if residual <= 5. {
        5.
    } else {
        10.
    };
    nice * magnitude
}

/// Evenly spaced round tick values within `min..=max`
fn ticks(min: f64, max: f64, target_ticks: usize) -> (Vec<f64>, f64) {
    if !(max > min) || !min.is_finite() || !max.is_finite() {
        return (vec![min], 1.);
    }
    let step = nice_step(max - min, target_ticks);
    let first = (min / step).ceil() * step;
    let span = (max - first) / step + 1e-9;
    if span < 0. {
        return (Vec::new(), step);
    }
    // indexed, at large magnitudes `first + step` can round back to `first`
    let count = span.floor().min(MAX_TICKS as f64) as usize;
    let values = (0..=count).map(|i| first + i as f64 * step).collect();
    (values, step)
}

fn format_tick(value: f64, step: f64) -> String {
    if step >= 1. {
        format!("{:.0}", value)
    } else {
        let decimals = (-step.log10()).ceil().max(0.) as usize;
        format!("{:.*}", decimals, value)
    }
}

/// Generator for SVG documents from figures
pub struct SvgChartGenerator {
    config: SvgChartConfig,
}

impl SvgChartGenerator {
    pub fn new() -> Self {
        Self {
            config: SvgChartConfig::default(),
        }
    }

    pub fn with_config(config: SvgChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SvgChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SvgChartConfig) {
        self.config = config;
    }

    pub fn generate(&self, figure: &Figure) -> Result<String, LaptraceError> {
        self.validate_figure(figure)?;

        let svg = match &figure.body {
            FigureBody::Line(series) => self.generate_xy_chart(figure, series_bounds(series, None), |svg, area| {
                self.write_lines(svg, area, series)
            })?,
            FigureBody::Bar(series) => {
                let bounds = series_bounds(series, Some(self.config.theme.bar_width));
                self.generate_xy_chart(figure, bounds, |svg, area| self.write_bars(svg, area, series))?
            }
            FigureBody::StackedBar(stack) => {
                let bounds = stack_bounds(stack, self.config.theme.stacked_bar_width);
                self.generate_xy_chart(figure, bounds, |svg, area| {
                    self.write_stacked_bars(svg, area, stack)
                })?
            }
            FigureBody::TrackMap { x, y, coloring } => {
                self.generate_track_map(figure, x, y, coloring)?
            }
        };

        if svg.len() > MAX_SVG_BYTES {
            return Err(LaptraceError::SvgGenerationError {
                reason: format!("Generated SVG too large: {} bytes (max 10MB)", svg.len()),
            });
        }
        if !svg.starts_with("<svg") || !svg.ends_with("</svg>") {
            return Err(LaptraceError::SvgGenerationError {
                reason: "Generated SVG has invalid structure".to_string(),
            });
        }
        debug!("Generated SVG with {} characters", svg.len());
        Ok(svg)
    }

    fn validate_figure(&self, figure: &Figure) -> Result<(), LaptraceError> {
        if figure.is_empty() {
            return Err(LaptraceError::SvgGenerationError {
                reason: "Cannot generate SVG from an empty figure".to_string(),
            });
        }
        match &figure.body {
            FigureBody::Line(series) | FigureBody::Bar(series) => {
                for s in series {
                    if s.x.len() != s.y.len() {
                        return Err(LaptraceError::SvgGenerationError {
                            reason: format!(
                                "Series {} has {} x values and {} y values",
                                s.label.as_deref().unwrap_or("<unnamed>"),
                                s.x.len(),
                                s.y.len()
                            ),
                        });
                    }
                }
            }
            FigureBody::StackedBar(stack) => {
                if let Some((compound, column)) = stack
                    .columns
                    .iter()
                    .find(|(_, column)| column.len() != stack.lap_axis.len())
                {
                    return Err(LaptraceError::SvgGenerationError {
                        reason: format!(
                            "{} column has {} entries for {} laps",
                            compound,
                            column.len(),
                            stack.lap_axis.len()
                        ),
                    });
                }
            }
            FigureBody::TrackMap { x, y, coloring } => {
                if x.len() != y.len() || x.len() != coloring.len() {
                    return Err(LaptraceError::SvgGenerationError {
                        reason: format!(
                            "Track map has {} x, {} y and {} color values",
                            x.len(),
                            y.len(),
                            coloring.len()
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn write_header(&self, svg: &mut String, width: u32, height: u32) {
        let theme = &self.config.theme;
        let _ = write!(
            svg,
            r#"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" font-family="sans-serif">
  <rect class="background" width="{w}" height="{h}" fill="{bg}" />"#,
            w = width,
            h = height,
            bg = theme.background
        );
    }

    fn write_title(&self, svg: &mut String, figure: &Figure, width: f64) {
        if let Some(title) = &figure.labels.title {
            let _ = write!(
                svg,
                "\n  <text class=\"title\" x=\"{:.2}\" y=\"30\" fill=\"{}\" font-size=\"18\" text-anchor=\"middle\">{}</text>",
                width / 2.,
                self.config.theme.foreground,
                escape_xml(title)
            );
        }
    }

    fn generate_xy_chart(
        &self,
        figure: &Figure,
        bounds: BoundingBox,
        write_data: impl FnOnce(&mut String, &PlotArea),
    ) -> Result<String, LaptraceError> {
        if !bounds.is_valid() {
            return Err(LaptraceError::SvgGenerationError {
                reason: "Figure has no finite values to plot".to_string(),
            });
        }
        let (width, height) = figure.size.unwrap_or(self.config.canvas_size);
        let area = PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.),
            height: (height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.),
            bounds: bounds.padded(),
        };

        let mut svg = String::with_capacity(4096);
        self.write_header(&mut svg, width, height);
        self.write_title(&mut svg, figure, width as f64);
        self.write_axes(&mut svg, &area, figure);
        svg.push_str("\n  <g class=\"data\">");
        write_data(&mut svg, &area);
        svg.push_str("\n  </g>");
        self.write_legend(&mut svg, &figure.legend_entries(), area.right() - 8., area.top + 8., true);
        svg.push_str("\n</svg>");
        Ok(svg)
    }

    fn write_axes(&self, svg: &mut String, area: &PlotArea, figure: &Figure) {
        let theme = &self.config.theme;
        let fg = theme.foreground;

        svg.push_str("\n  <g class=\"grid\">");
        let (x_ticks, x_step) = ticks(area.bounds.min_x, area.bounds.max_x, TARGET_TICKS);
        let (y_ticks, y_step) = ticks(area.bounds.min_y, area.bounds.max_y, TARGET_TICKS);
        for tick in &x_ticks {
            let p = area.map(*tick, area.bounds.min_y);
            let _ = write!(
                svg,
                "\n    <line x1=\"{x:.2}\" y1=\"{:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"{fg}\" stroke-opacity=\"{}\" />",
                area.top,
                area.bottom(),
                theme.grid_alpha,
                x = p.x,
            );
        }
        for tick in &y_ticks {
            let p = area.map(area.bounds.min_x, *tick);
            let _ = write!(
                svg,
                "\n    <line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{fg}\" stroke-opacity=\"{}\" />",
                area.left,
                area.right(),
                theme.grid_alpha,
                y = p.y,
            );
        }
        svg.push_str("\n  </g>");

        svg.push_str("\n  <g class=\"axes\">");
        let _ = write!(
            svg,
            "\n    <line x1=\"{l:.2}\" y1=\"{b:.2}\" x2=\"{r:.2}\" y2=\"{b:.2}\" stroke=\"{fg}\" />\n    <line x1=\"{l:.2}\" y1=\"{t:.2}\" x2=\"{l:.2}\" y2=\"{b:.2}\" stroke=\"{fg}\" />",
            l = area.left,
            r = area.right(),
            t = area.top,
            b = area.bottom(),
        );
        for tick in &x_ticks {
            let p = area.map(*tick, area.bounds.min_y);
            let _ = write!(
                svg,
                "\n    <line x1=\"{x:.2}\" y1=\"{b:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"{fg}\" />\n    <text x=\"{x:.2}\" y=\"{:.2}\" fill=\"{fg}\" font-size=\"11\" text-anchor=\"middle\">{}</text>",
                area.bottom() + 5.,
                area.bottom() + 18.,
                format_tick(*tick, x_step),
                x = p.x,
                b = area.bottom(),
            );
        }
        for tick in &y_ticks {
            let p = area.map(area.bounds.min_x, *tick);
            let _ = write!(
                svg,
                "\n    <line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{l:.2}\" y2=\"{y:.2}\" stroke=\"{fg}\" />\n    <text x=\"{:.2}\" y=\"{:.2}\" fill=\"{fg}\" font-size=\"11\" text-anchor=\"end\">{}</text>",
                area.left - 5.,
                area.left - 8.,
                p.y + 4.,
                format_tick(*tick, y_step),
                y = p.y,
                l = area.left,
            );
        }
        if let Some(label) = &figure.labels.x_label {
            let _ = write!(
                svg,
                "\n    <text class=\"x-label\" x=\"{:.2}\" y=\"{:.2}\" fill=\"{fg}\" font-size=\"13\" text-anchor=\"middle\">{}</text>",
                area.left + area.width / 2.,
                area.bottom() + 42.,
                escape_xml(label)
            );
        }
        if let Some(label) = &figure.labels.y_label {
            let (x, y) = (20., area.top + area.height / 2.);
            let _ = write!(
                svg,
                "\n    <text class=\"y-label\" x=\"{x:.2}\" y=\"{y:.2}\" fill=\"{fg}\" font-size=\"13\" text-anchor=\"middle\" transform=\"rotate(-90 {x:.2} {y:.2})\">{}</text>",
                escape_xml(label)
            );
        }
        svg.push_str("\n  </g>");
    }

    /// Legend box anchored at its top right corner, or top left when `anchor_right` is false
    fn write_legend(
        &self,
        svg: &mut String,
        entries: &[(String, Color)],
        anchor_x: f64,
        anchor_y: f64,
        anchor_right: bool,
    ) {
        if entries.is_empty() {
            return;
        }
        let theme = &self.config.theme;
        let longest = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let box_width = 36. + longest as f64 * 7.5;
        let box_height = 10. + entries.len() as f64 * 20.;
        let left = if anchor_right {
            anchor_x - box_width
        } else {
            anchor_x
        };

        let _ = write!(
            svg,
            "\n  <g class=\"legend\">\n    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"none\" />",
            left, anchor_y, box_width, box_height, theme.background, theme.legend_background_alpha
        );
        for (i, (label, color)) in entries.iter().enumerate() {
            let y = anchor_y + 8. + i as f64 * 20.;
            let _ = write!(
                svg,
                "\n    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"14\" height=\"14\" fill=\"{}\" />\n    <text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"12\">{}</text>",
                left + 8.,
                y,
                color,
                left + 28.,
                y + 11.,
                theme.foreground,
                escape_xml(label)
            );
        }
        svg.push_str("\n  </g>");
    }

    fn write_lines(&self, svg: &mut String, area: &PlotArea, series: &[Series]) {
        for s in series {
            let mut path = String::with_capacity(s.len() * 20);
            let mut pen_down = false;
            let mut skipped = 0;
            for (x, y) in s.points() {
                if !x.is_finite() || !y.is_finite() {
                    pen_down = false;
                    skipped += 1;
                    continue;
                }
                let p = area.map(x, y);
                let command = if pen_down { 'L' } else { 'M' };
                let _ = write!(path, "{}{} {:.2},{:.2}", if path.is_empty() { "" } else { " " }, command, p.x, p.y);
                pen_down = true;
            }
            if skipped > 0 {
                debug!("Left {} gaps in series {:?}", skipped, s.label);
            }
            let _ = write!(
                svg,
                "\n    <path class=\"series-line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-linejoin=\"round\" />",
                path,
                s.color,
                s.width.unwrap_or(self.config.theme.default_line_width)
            );
        }
    }

    fn write_bar(svg: &mut String, area: &PlotArea, x: f64, (base, top): (f64, f64), width: f64, color: Color) {
        let left = area.map(x - width / 2., base);
        let right = area.map(x + width / 2., top);
        let _ = write!(
            svg,
            "\n    <rect class=\"bar\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" />",
            left.x,
            left.y.min(right.y),
            (right.x - left.x).abs(),
            (left.y - right.y).abs(),
            color
        );
    }

    fn write_bars(&self, svg: &mut String, area: &PlotArea, series: &[Series]) {
        for s in series {
            let width = s.width.unwrap_or(self.config.theme.bar_width);
            for (x, y) in s.points().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                Self::write_bar(svg, area, x, (0., y), width, s.color);
            }
        }
    }

    fn write_stacked_bars(&self, svg: &mut String, area: &PlotArea, stack: &CompoundStack) {
        let width = self.config.theme.stacked_bar_width;
        for (index, x) in stack.lap_axis.iter().enumerate() {
            let mut base = 0.;
            for ((_, column), color) in stack.columns.iter().zip(&stack.colors) {
                if let Some(Some(value)) = column.get(index) {
                    Self::write_bar(svg, area, *x, (base, base + value), width, *color);
                    base += value;
                }
            }
        }
    }

    fn generate_track_map(
        &self,
        figure: &Figure,
        x: &[f64],
        y: &[f64],
        coloring: &TrackColoring,
    ) -> Result<String, LaptraceError> {
        let theme = &self.config.theme;
        let mut bbox = BoundingBox::new();
        for (x, y) in x.iter().zip(y) {
            bbox.update(Point2D::new(*x, *y));
        }
        if !bbox.is_valid() {
            return Err(LaptraceError::SvgGenerationError {
                reason: "No finite track coordinates".to_string(),
            });
        }
        let bbox = bbox.padded();

        let (map_width, map_height) = figure.size.unwrap_or(self.config.canvas_size);
        let (map_width, map_height) = (
            map_width.max(MIN_TRACK_CANVAS) as f64,
            map_height.max(MIN_TRACK_CANVAS) as f64,
        );
        let title_height = if figure.labels.title.is_some() { MARGIN_TOP } else { 0. };
        let color_bar_width = match coloring {
            TrackColoring::Continuous { .. } => COLOR_BAR_WIDTH,
            TrackColoring::Categorical { .. } => 0.,
        };
        let width = map_width + color_bar_width;
        let height = map_height + title_height;

        // uniform scale so that the track keeps its shape
        let margin_x = map_width * self.config.margin_percentage;
        let margin_y = map_height * self.config.margin_percentage;
        let available_width = map_width - 2. * margin_x;
        let available_height = map_height - 2. * margin_y;
        let scale = (available_width / bbox.width()).min(available_height / bbox.height());
        let center = bbox.center();
        let to_canvas = |x: f64, y: f64| {
            Point2D::new(
                map_width / 2. + (x - center.x) * scale,
                title_height + map_height / 2. - (y - center.y) * scale,
            )
        };

        let mut svg = String::with_capacity(1024 + x.len() * 60);
        self.write_header(&mut svg, width.round() as u32, height.round() as u32);
        self.write_title(&mut svg, figure, width);

        let mut path = String::with_capacity(x.len() * 20);
        for (x, y) in x.iter().zip(y).filter(|(x, y)| x.is_finite() && y.is_finite()) {
            let p = to_canvas(*x, *y);
            let command = if path.is_empty() { "M" } else { " L" };
            let _ = write!(path, "{} {:.2},{:.2}", command, p.x, p.y);
        }
        let _ = write!(
            svg,
            "\n  <path class=\"track-line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-linecap=\"round\" stroke-linejoin=\"round\" />",
            path, theme.track_outline, theme.track_outline_width
        );

        svg.push_str("\n  <g class=\"markers\">");
        for ((x, y), color) in x.iter().zip(y).zip(coloring.marker_colors()) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let p = to_canvas(*x, *y);
            let _ = write!(
                svg,
                "\n    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" />",
                p.x, p.y, theme.marker_radius, color
            );
        }
        svg.push_str("\n  </g>");

        match coloring {
            TrackColoring::Continuous { scale, label, .. } => {
                let (min, max) = coloring.value_range().unwrap_or((0., 0.));
                let bar_left = map_width + 12.;
                let bar_top = title_height + 40.;
                let bar_height = (map_height - 80.).max(40.);
                svg.push_str(
                    "\n  <defs>\n    <linearGradient id=\"color-scale\" x1=\"0\" y1=\"1\" x2=\"0\" y2=\"0\">",
                );
                for stop in 0..COLOR_BAR_STOPS {
                    let t = stop as f64 / (COLOR_BAR_STOPS - 1) as f64;
                    let _ = write!(
                        svg,
                        "\n      <stop offset=\"{:.2}\" stop-color=\"{}\" />",
                        t,
                        scale.sample(t)
                    );
                }
                let _ = write!(
                    svg,
                    "\n    </linearGradient>\n  </defs>\n  <g class=\"color-bar\">\n    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"16\" height=\"{:.2}\" fill=\"url(#color-scale)\" />",
                    bar_left, bar_top, bar_height
                );
                let fg = theme.foreground;
                let _ = write!(
                    svg,
                    "\n    <text x=\"{l:.2}\" y=\"{:.2}\" fill=\"{fg}\" font-size=\"12\">{}</text>\n    <text x=\"{tl:.2}\" y=\"{:.2}\" fill=\"{fg}\" font-size=\"11\">{:.0}</text>\n    <text x=\"{tl:.2}\" y=\"{:.2}\" fill=\"{fg}\" font-size=\"11\">{:.0}</text>\n  </g>",
                    bar_top - 12.,
                    escape_xml(label),
                    bar_top + 8.,
                    max,
                    bar_top + bar_height,
                    min,
                    l = bar_left - 4.,
                    tl = bar_left + 22.,
                );
            }
            TrackColoring::Categorical { .. } => {
                self.write_legend(&mut svg, &figure.legend_entries(), 12., title_height + 12., false);
            }
        }

        svg.push_str("\n</svg>");
        info!(
            "Generated track map with {} markers on a {}x{} canvas",
            x.len(),
            width,
            height
        );
        Ok(svg)
    }
}

impl Default for SvgChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn series_bounds(series: &[Series], bar_width: Option<f64>) -> BoundingBox {
    let mut bbox = BoundingBox::new();
    for s in series {
        // bars reach down to zero and span their width around x
        let half_width = bar_width.map(|width| s.width.unwrap_or(width) / 2.);
        for (x, y) in s.points() {
            match half_width {
                Some(half) => {
                    bbox.update(Point2D::new(x - half, 0.));
                    bbox.update(Point2D::new(x + half, y));
                }
                None => bbox.update(Point2D::new(x, y)),
            }
        }
    }
    bbox
}

fn stack_bounds(stack: &CompoundStack, bar_width: f64) -> BoundingBox {
    let mut bbox = BoundingBox::new();
    for (index, x) in stack.lap_axis.iter().enumerate() {
        let total: f64 = stack
            .columns
            .values()
            .filter_map(|column| column.get(index).copied().flatten())
            .sum();
        bbox.update(Point2D::new(x - bar_width / 2., 0.));
        bbox.update(Point2D::new(x + bar_width / 2., total));
    }
    bbox
}

/// Writes every presented figure to an SVG file
pub struct SvgFileRenderer {
    path: PathBuf,
    generator: SvgChartGenerator,
}

impl SvgFileRenderer {
    pub fn new(path: PathBuf, config: SvgChartConfig) -> Self {
        Self {
            path,
            generator: SvgChartGenerator::with_config(config),
        }
    }
}

impl ChartRenderer for SvgFileRenderer {
    fn present(&mut self, figure: &Figure) -> Result<(), LaptraceError> {
        let svg = self.generator.generate(figure)?;
        fs::write(&self.path, svg).map_err(|e| LaptraceError::WriterError { source: e })?;
        info!("Saved chart to {:?}", self.path);
        Ok(())
    }
}
