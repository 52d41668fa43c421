// Backend independent chart descriptions and the render entry points

pub mod svg;
pub mod theme;
pub mod viewer;

use indexmap::IndexMap;
use itertools::{Itertools, MinMaxResult};

use crate::color::{Color, ColorScale};
use crate::errors::LaptraceError;
use crate::shaper::{CompoundStack, Series, track_figure_dimensions};

pub use svg::{SvgChartConfig, SvgChartGenerator, SvgFileRenderer};
pub use theme::{DARK_THEME, Theme};
pub use viewer::WindowRenderer;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartLabels {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl ChartLabels {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn x(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

/// How the markers of a track map are colored
#[derive(Clone, Debug, PartialEq)]
pub enum TrackColoring {
    /// A numeric channel (e.g. speed) painted with a continuous scale and a color bar
    Continuous {
        values: Vec<f64>,
        scale: ColorScale,
        label: String,
    },
    /// A 0/1 category painted with a two color palette and a legend
    Categorical {
        categories: Vec<u8>,
        palette: [Color; 2],
        labels: [String; 2],
    },
}

impl TrackColoring {
    pub fn len(&self) -> usize {
        match self {
            Self::Continuous { values, .. } => values.len(),
            Self::Categorical { categories, .. } => categories.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Min and max of the finite values of a continuous coloring
    pub fn value_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Continuous { values, .. } => {
                match values.iter().copied().filter(|v| v.is_finite()).minmax() {
                    MinMaxResult::MinMax(min, max) => Some((min, max)),
                    MinMaxResult::OneElement(value) => Some((value, value)),
                    MinMaxResult::NoElements => None,
                }
            }
            Self::Categorical { .. } => None,
        }
    }

    /// One color per marker
    pub fn marker_colors(&self) -> Vec<Color> {
        self.binned_marker_colors(None)
    }

    /// One color per marker, continuous values snapped to `bins` evenly spaced
    /// colors when given so that backends can batch markers by color
    pub fn binned_marker_colors(&self, bins: Option<usize>) -> Vec<Color> {
        match self {
            Self::Continuous { values, scale, .. } => {
                let (min, max) = self.value_range().unwrap_or((0., 0.));
                let span = max - min;
                values
                    .iter()
                    .map(|value| {
                        let t = if span > 0. { (value - min) / span } else { 0.5 };
                        let t = match bins {
                            Some(bins) if bins > 1 => {
                                (t * (bins - 1) as f64).round() / (bins - 1) as f64
                            }
                            _ => t,
                        };
                        scale.sample(t)
                    })
                    .collect()
            }
            Self::Categorical {
                categories,
                palette,
                ..
            } => categories
                .iter()
                .map(|category| palette[usize::from(*category > 0)])
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FigureBody {
    Line(Vec<Series>),
    Bar(Vec<Series>),
    StackedBar(CompoundStack),
    TrackMap {
        x: Vec<f64>,
        y: Vec<f64>,
        coloring: TrackColoring,
    },
}

/// A complete chart ready to be handed to a `ChartRenderer`
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub labels: ChartLabels,
    /// Preferred size in pixels, backends fall back to their own default
    pub size: Option<(u32, u32)>,
    pub body: FigureBody,
}

impl Figure {
    pub fn line(series: Vec<Series>, labels: ChartLabels) -> Self {
        Self {
            labels,
            size: None,
            body: FigureBody::Line(series),
        }
    }

    pub fn bar(series: Vec<Series>, labels: ChartLabels) -> Self {
        Self {
            labels,
            size: None,
            body: FigureBody::Bar(series),
        }
    }

    pub fn stacked_bar(stack: CompoundStack, labels: ChartLabels) -> Self {
        Self {
            labels,
            size: None,
            body: FigureBody::StackedBar(stack),
        }
    }

    /// Track maps are sized proportionally to the coordinate ranges
    pub fn track_map(x: Vec<f64>, y: Vec<f64>, coloring: TrackColoring, labels: ChartLabels) -> Self {
        let size = track_figure_dimensions(&x, &y);
        Self {
            labels,
            size: Some(size),
            body: FigureBody::TrackMap { x, y, coloring },
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.body {
            FigureBody::Line(series) | FigureBody::Bar(series) => {
                series.iter().all(Series::is_empty)
            }
            FigureBody::StackedBar(stack) => stack.is_empty(),
            FigureBody::TrackMap { x, .. } => x.is_empty(),
        }
    }

    /// Legend entries as (label, color), in drawing order
    pub fn legend_entries(&self) -> Vec<(String, Color)> {
        match &self.body {
            FigureBody::Line(series) | FigureBody::Bar(series) => series
                .iter()
                .filter_map(|s| s.label.clone().map(|label| (label, s.color)))
                .collect(),
            FigureBody::StackedBar(stack) => stack
                .compounds()
                .iter()
                .zip(&stack.colors)
                .map(|(compound, color)| (compound.to_string(), *color))
                .collect(),
            FigureBody::TrackMap {
                coloring: TrackColoring::Categorical { palette, labels, .. },
                ..
            } => vec![
                (labels[1].clone(), palette[1]),
                (labels[0].clone(), palette[0]),
            ],
            FigureBody::TrackMap { .. } => Vec::new(),
        }
    }
}

/// Groups marker positions by color, keeping the order colors first appear in
pub fn group_markers_by_color(
    x: &[f64],
    y: &[f64],
    colors: &[Color],
) -> IndexMap<Color, Vec<[f64; 2]>> {
    let mut groups: IndexMap<Color, Vec<[f64; 2]>> = IndexMap::new();
    for ((x, y), color) in x.iter().zip(y).zip(colors) {
        groups.entry(*color).or_default().push([*x, *y]);
    }
    groups
}

/// Presents a figure to the user
pub trait ChartRenderer {
    fn present(&mut self, figure: &Figure) -> Result<(), LaptraceError>;
}

pub fn render_line(
    renderer: &mut dyn ChartRenderer,
    series: Vec<Series>,
    labels: ChartLabels,
) -> Result<(), LaptraceError> {
    renderer.present(&Figure::line(series, labels))
}

pub fn render_bar(
    renderer: &mut dyn ChartRenderer,
    series: Vec<Series>,
    labels: ChartLabels,
) -> Result<(), LaptraceError> {
    renderer.present(&Figure::bar(series, labels))
}

pub fn render_stacked_bar(
    renderer: &mut dyn ChartRenderer,
    stack: CompoundStack,
    labels: ChartLabels,
) -> Result<(), LaptraceError> {
    renderer.present(&Figure::stacked_bar(stack, labels))
}

pub fn render_track_map(
    renderer: &mut dyn ChartRenderer,
    x: Vec<f64>,
    y: Vec<f64>,
    coloring: TrackColoring,
    labels: ChartLabels,
) -> Result<(), LaptraceError> {
    renderer.present(&Figure::track_map(x, y, coloring, labels))
}
