// Reshapes session laps and telemetry into chart-ready series

pub mod alignment;

use std::time::Duration;

use indexmap::IndexMap;
use itertools::{Itertools, MinMaxResult};
use log::debug;

use crate::color::Color;
use crate::errors::LaptraceError;
use crate::session::{Compound, Lap, LapSelector, Laps, SessionProvider};

pub use alignment::align_by_distance;

/// Divisor applied to the coordinate range when sizing track maps
const TRACK_MAP_SCALE: f64 = 15.;

/// A named, colored (x, y) data pair. Values are plain numbers, durations are
/// converted to seconds before a series is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    pub label: Option<String>,
    /// Line width for line charts, bar width for bar charts
    pub width: Option<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            label: None,
            width: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Runs of consecutive finite points, split wherever a value is missing
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (x, y) in self.points() {
            if x.is_finite() && y.is_finite() {
                current.push([x, y]);
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Per-lap values that can be charted against the lap number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LapField {
    LapNumber,
    LapTime,
    Sector1Time,
    Sector2Time,
    Sector3Time,
    SpeedTrap,
    TyreLife,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    Duration(Duration),
    Number(f64),
}

impl FieldValue {
    /// Numeric value handed to a renderer, durations become seconds
    pub fn to_plot_value(self) -> f64 {
        match self {
            Self::Duration(duration) => duration.as_secs_f64(),
            Self::Number(value) => value,
        }
    }
}

impl LapField {
    pub fn value(&self, lap: &Lap) -> Option<FieldValue> {
        match self {
            Self::LapNumber => Some(FieldValue::Number(lap.lap_number as f64)),
            Self::LapTime => lap.lap_time.map(FieldValue::Duration),
            Self::Sector1Time => lap.sector1_time.map(FieldValue::Duration),
            Self::Sector2Time => lap.sector2_time.map(FieldValue::Duration),
            Self::Sector3Time => lap.sector3_time.map(FieldValue::Duration),
            Self::SpeedTrap => lap.speed_trap_kph.map(FieldValue::Number),
            Self::TyreLife => lap.tyre_life.map(|life| FieldValue::Number(life as f64)),
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            Self::LapNumber => "Lap #",
            Self::LapTime => "Lap time [s]",
            Self::Sector1Time => "Sector 1 time [s]",
            Self::Sector2Time => "Sector 2 time [s]",
            Self::Sector3Time => "Sector 3 time [s]",
            Self::SpeedTrap => "Speed trap [km/h]",
            Self::TyreLife => "Tyre life [laps]",
        }
    }
}

pub fn select_driver_laps(
    provider: &dyn SessionProvider,
    driver: &str,
) -> Result<Laps, LaptraceError> {
    provider.driver_laps(driver)
}

/// `None` is an empty selection, the caller decides whether that is an error
pub fn pick_lap(laps: &Laps, selector: LapSelector) -> Option<&Lap> {
    laps.pick(selector)
}

/// Series of `field` against the lap number with one point per lap. Laps where
/// the field is not set get a NaN value, which renderers draw as a gap.
pub fn build_time_series(laps: &Laps, field: LapField, color: Color) -> Series {
    let (x, y): (Vec<f64>, Vec<f64>) = laps
        .iter()
        .map(|lap| {
            let value = field.value(lap).map_or(f64::NAN, FieldValue::to_plot_value);
            (lap.lap_number as f64, value)
        })
        .unzip();
    let missing = y.iter().filter(|value| value.is_nan()).count();
    if missing > 0 {
        debug!("{} of {} laps have no {:?} value", missing, laps.len(), field);
    }
    Series::new(x, y, color)
}

/// Speed against time for a single lap
pub fn build_speed_trace(lap: &Lap, color: Color) -> Series {
    let (x, y) = lap
        .telemetry()
        .iter()
        .map(|sample| (sample.time.as_secs_f64(), sample.speed_kph))
        .unzip();
    Series::new(x, y, color)
}

/// Fails with `MisalignedSeries` unless both series have the same length
pub fn ensure_aligned(left: &Series, right: &Series) -> Result<(), LaptraceError> {
    if left.len() != right.len() {
        return Err(LaptraceError::MisalignedSeries {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Lap times pivoted by tyre compound. Every lap of `lap_axis` has exactly one
/// non-null entry across the columns.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundStack {
    pub lap_axis: Vec<f64>,
    pub columns: IndexMap<Compound, Vec<Option<f64>>>,
    /// Compound colors in column order
    pub colors: Vec<Color>,
}

impl CompoundStack {
    pub fn compounds(&self) -> Vec<Compound> {
        self.columns.keys().copied().collect()
    }

    pub fn column(&self, compound: Compound) -> Option<&[Option<f64>]> {
        self.columns.get(&compound).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.lap_axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lap_axis.is_empty()
    }
}

/// Compounds are ordered by first use. Laps without a lap time carry nothing to
/// stack and are left out of the axis.
pub fn build_compound_stack(laps: &Laps) -> CompoundStack {
    let timed_laps: Vec<(&Lap, f64)> = laps
        .iter()
        .filter_map(|lap| lap.lap_time.map(|time| (lap, time.as_secs_f64())))
        .collect();

    let compounds: Vec<Compound> = timed_laps
        .iter()
        .map(|(lap, _)| lap.compound)
        .unique()
        .collect();

    let mut columns: IndexMap<Compound, Vec<Option<f64>>> = compounds
        .iter()
        .map(|compound| (*compound, Vec::with_capacity(timed_laps.len())))
        .collect();
    for (lap, time) in &timed_laps {
        for (compound, column) in columns.iter_mut() {
            column.push((*compound == lap.compound).then_some(*time));
        }
    }

    debug!(
        "Built compound stack with {} laps over {:?}",
        timed_laps.len(),
        compounds
    );
    CompoundStack {
        lap_axis: timed_laps
            .iter()
            .map(|(lap, _)| lap.lap_number as f64)
            .collect(),
        colors: compounds.iter().map(Compound::color).collect(),
        columns,
    }
}

/// Which of two drivers is faster at each telemetry point of the first
/// driver's lap. `faster[i]` is 1 when driver A is at least as fast.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedDeltaSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub delta_kph: Vec<f64>,
    pub faster: Vec<u8>,
}

pub fn build_speed_delta_series(
    lap_a: &Lap,
    lap_b: &Lap,
) -> Result<SpeedDeltaSeries, LaptraceError> {
    let (samples_a, samples_b) = (lap_a.telemetry(), lap_b.telemetry());
    if samples_a.len() != samples_b.len() {
        return Err(LaptraceError::MisalignedSeries {
            left: samples_a.len(),
            right: samples_b.len(),
        });
    }

    let delta_kph: Vec<f64> = samples_a
        .iter()
        .zip(samples_b)
        .map(|(a, b)| a.speed_kph - b.speed_kph)
        .collect();
    Ok(SpeedDeltaSeries {
        x: samples_a.iter().map(|sample| sample.x).collect(),
        y: samples_a.iter().map(|sample| sample.y).collect(),
        faster: delta_kph.iter().map(|delta| u8::from(*delta >= 0.)).collect(),
        delta_kph,
    })
}

/// Pixel size of a track map proportional to the coordinate ranges
pub fn track_figure_dimensions(x_coords: &[f64], y_coords: &[f64]) -> (u32, u32) {
    fn scaled_range(values: &[f64]) -> u32 {
        match values.iter().copied().filter(|v| v.is_finite()).minmax() {
            MinMaxResult::MinMax(min, max) => ((max - min) / TRACK_MAP_SCALE).round() as u32,
            MinMaxResult::OneElement(_) | MinMaxResult::NoElements => 0,
        }
    }
    (scaled_range(x_coords), scaled_range(y_coords))
}
