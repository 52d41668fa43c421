// Session data model and the provider interface the charts are built from

pub mod loader;
pub mod seconds;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::errors::LaptraceError;
use crate::palette;

pub use loader::load_session_jsonl;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    /// Session name, e.g. "Qualifying" or "Race"
    pub name: String,
    pub event: String,
    pub year: u16,
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            event: "Unknown".to_string(),
            year: 0,
        }
    }
}

/// Tyre compound fitted for a lap
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
}

impl Compound {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soft => "SOFT",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::Intermediate => "INTERMEDIATE",
            Self::Wet => "WET",
        }
    }

    pub fn color(&self) -> Color {
        palette::compound_color(*self)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TelemetrySample {
    /// Time elapsed since the start of the lap
    #[serde(with = "seconds")]
    pub time: Duration,
    pub x: f64,
    pub y: f64,
    pub speed_kph: f64,
    /// Meters traveled from the start of the lap
    #[serde(default)]
    pub distance: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lap {
    pub driver: String,
    pub team: String,
    pub lap_number: u32,
    #[serde(default, with = "seconds::option")]
    pub lap_time: Option<Duration>,
    #[serde(default, with = "seconds::option")]
    pub sector1_time: Option<Duration>,
    #[serde(default, with = "seconds::option")]
    pub sector2_time: Option<Duration>,
    #[serde(default, with = "seconds::option")]
    pub sector3_time: Option<Duration>,
    pub compound: Compound,
    /// Laps driven on this set of tyres
    #[serde(default)]
    pub tyre_life: Option<u32>,
    #[serde(default)]
    pub speed_trap_kph: Option<f64>,
    #[serde(default)]
    pub telemetry: Vec<TelemetrySample>,
}

impl Lap {
    pub fn telemetry(&self) -> &[TelemetrySample] {
        &self.telemetry
    }
}

/// Lap selection for single-lap charts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LapSelector {
    Number(u32),
    Fastest,
}

impl FromStr for LapSelector {
    type Err = LaptraceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("fastest") {
            return Ok(Self::Fastest);
        }
        value
            .parse::<u32>()
            .map(Self::Number)
            .map_err(|_| LaptraceError::InvalidLapSelector {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for LapSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "lap {n}"),
            Self::Fastest => f.write_str("fastest lap"),
        }
    }
}

/// The laps of a single driver, in the order the provider returned them
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Laps {
    laps: Vec<Lap>,
}

impl Laps {
    pub fn new(laps: Vec<Lap>) -> Self {
        Self { laps }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lap> {
        self.laps.iter()
    }

    pub fn as_slice(&self) -> &[Lap] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Lap with the minimum lap time. Laps without a time are ignored and the
    /// first lap wins a tie.
    pub fn fastest(&self) -> Option<&Lap> {
        self.laps
            .iter()
            .filter_map(|lap| lap.lap_time.map(|time| (time, lap)))
            .fold(None, |best: Option<(Duration, &Lap)>, (time, lap)| match best {
                Some((best_time, _)) if best_time <= time => best,
                _ => Some((time, lap)),
            })
            .map(|(_, lap)| lap)
    }

    pub fn pick(&self, selector: LapSelector) -> Option<&Lap> {
        match selector {
            LapSelector::Fastest => self.fastest(),
            LapSelector::Number(number) => self.laps.iter().find(|lap| lap.lap_number == number),
        }
    }

    /// Team of the first lap, the driver does not change team within a session
    pub fn team(&self) -> Option<&str> {
        self.laps.first().map(|lap| lap.team.as_str())
    }
}

impl<'a> IntoIterator for &'a Laps {
    type Item = &'a Lap;
    type IntoIter = std::slice::Iter<'a, Lap>;

    fn into_iter(self) -> Self::IntoIter {
        self.laps.iter()
    }
}

/// Read interface to a timing/telemetry data source
pub trait SessionProvider {
    fn session_info(&self) -> &SessionInfo;

    /// All laps of `driver`, failing with `DriverNotFound` if the driver did not run
    fn driver_laps(&self, driver: &str) -> Result<Laps, LaptraceError>;

    fn team_color(&self, team: &str) -> Result<Color, LaptraceError>;
}

/// A fully loaded session held in memory
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub info: SessionInfo,
    pub laps: Vec<Lap>,
    /// Team colors that take precedence over the built-in palette
    pub team_colors: HashMap<String, Color>,
}

impl Session {
    pub fn new(info: SessionInfo, laps: Vec<Lap>) -> Self {
        Self {
            info,
            laps,
            team_colors: HashMap::new(),
        }
    }

    /// Driver identifiers in order of first appearance
    pub fn drivers(&self) -> Vec<&str> {
        use itertools::Itertools;

        self.laps
            .iter()
            .map(|lap| lap.driver.as_str())
            .unique()
            .collect()
    }
}

impl SessionProvider for Session {
    fn session_info(&self) -> &SessionInfo {
        &self.info
    }

    fn driver_laps(&self, driver: &str) -> Result<Laps, LaptraceError> {
        let laps: Vec<Lap> = self
            .laps
            .iter()
            .filter(|lap| lap.driver.eq_ignore_ascii_case(driver))
            .cloned()
            .collect();
        if laps.is_empty() {
            return Err(LaptraceError::DriverNotFound {
                driver: driver.to_string(),
            });
        }
        debug!("Selected {} laps for {}", laps.len(), driver);
        Ok(Laps::new(laps))
    }

    fn team_color(&self, team: &str) -> Result<Color, LaptraceError> {
        self.team_colors
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(team))
            .map(|(_, color)| *color)
            .or_else(|| palette::team_color(team))
            .ok_or_else(|| LaptraceError::UnknownTeam {
                team: team.to_string(),
            })
    }
}
