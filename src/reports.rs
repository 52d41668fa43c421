// Ready-made session comparisons, each producing a figure for any renderer

use log::info;

use crate::LaptraceError;
use crate::chart::{ChartLabels, Figure, TrackColoring};
use crate::color::{Color, ColorScale};
use crate::config::SpeedUnit;
use crate::session::{Lap, LapSelector, Laps, SessionProvider};
use crate::shaper::{
    LapField, Series, align_by_distance, build_compound_stack, build_speed_delta_series,
    build_speed_trace, build_time_series, ensure_aligned, pick_lap, select_driver_laps,
};

/// How two laps are matched up sample by sample in a speed comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Alignment {
    /// Samples are compared by index and must already line up
    #[default]
    AsRecorded,
    /// The second lap is resampled at the distances of the first
    ByDistance,
}

fn driver_color(provider: &dyn SessionProvider, laps: &Laps) -> Result<Color, LaptraceError> {
    match laps.team() {
        Some(team) => provider.team_color(team),
        None => Ok(Color::CORNFLOWER_BLUE),
    }
}

fn select_lap<'a>(laps: &'a Laps, driver: &str, selector: LapSelector) -> Result<&'a Lap, LaptraceError> {
    pick_lap(laps, selector).ok_or_else(|| LaptraceError::LapNotFound {
        driver: driver.to_string(),
        selector: selector.to_string(),
    })
}

fn require_telemetry(lap: &Lap) -> Result<(), LaptraceError> {
    if lap.telemetry().is_empty() {
        return Err(LaptraceError::MissingTelemetry {
            driver: lap.driver.clone(),
            lap_number: lap.lap_number,
        });
    }
    Ok(())
}

/// Speed over time of both drivers' fastest laps
pub fn compare_session_bests(
    provider: &dyn SessionProvider,
    driver_1: &str,
    driver_2: &str,
    units: SpeedUnit,
) -> Result<Figure, LaptraceError> {
    let mut series = Vec::with_capacity(2);
    for driver in [driver_1, driver_2] {
        let laps = select_driver_laps(provider, driver)?;
        let fastest = select_lap(&laps, driver, LapSelector::Fastest)?;
        let mut trace = build_speed_trace(fastest, driver_color(provider, &laps)?).with_label(driver);
        trace.y = trace.y.iter().map(|speed| units.convert(*speed)).collect();
        series.push(trace);
    }

    let session = &provider.session_info().name;
    info!("Comparing fastest {} laps of {} and {}", session, driver_1, driver_2);
    Ok(Figure::line(
        series,
        ChartLabels::new(format!("{driver_1} v. {driver_2} Fastest {session} Lap"))
            .x("Time [s]")
            .y(units.axis_label()),
    ))
}

/// Lap time against lap number for two drivers. Both drivers must have the
/// same number of laps. Laps without a time show as gaps in the line.
pub fn compare_session_laps(
    provider: &dyn SessionProvider,
    driver_1: &str,
    driver_2: &str,
) -> Result<Figure, LaptraceError> {
    let mut series: Vec<Series> = Vec::with_capacity(2);
    for driver in [driver_1, driver_2] {
        let laps = select_driver_laps(provider, driver)?;
        let color = driver_color(provider, &laps)?;
        series.push(build_time_series(&laps, LapField::LapTime, color).with_label(driver));
    }
    ensure_aligned(&series[0], &series[1])?;

    let session = &provider.session_info().name;
    Ok(Figure::line(
        series,
        ChartLabels::new(format!("{driver_1} v. {driver_2} {session} Laps"))
            .x(LapField::LapNumber.axis_label())
            .y(LapField::LapTime.axis_label()),
    ))
}

/// Lap times stacked by the tyre compound each lap was driven on
pub fn compare_tire_lap_times(
    provider: &dyn SessionProvider,
    driver: &str,
) -> Result<Figure, LaptraceError> {
    let laps = select_driver_laps(provider, driver)?;
    let stack = build_compound_stack(&laps);
    if stack.is_empty() {
        return Err(LaptraceError::LapNotFound {
            driver: driver.to_string(),
            selector: "any timed lap".to_string(),
        });
    }

    let session = &provider.session_info().name;
    Ok(Figure::stacked_bar(
        stack,
        ChartLabels::new(format!("{driver} {session} Laps"))
            .x(LapField::LapNumber.axis_label())
            .y(LapField::LapTime.axis_label()),
    ))
}

pub fn lap_time_bars(provider: &dyn SessionProvider, driver: &str) -> Result<Figure, LaptraceError> {
    let laps = select_driver_laps(provider, driver)?;
    let color = driver_color(provider, &laps)?;
    let series = build_time_series(&laps, LapField::LapTime, color).with_label(driver);

    let session = &provider.session_info().name;
    Ok(Figure::bar(
        vec![series],
        ChartLabels::new(format!("{driver} {session} Lap Times"))
            .x(LapField::LapNumber.axis_label())
            .y(LapField::LapTime.axis_label()),
    ))
}

/// Track map of a single lap colored by speed
pub fn lap_speed_map(
    provider: &dyn SessionProvider,
    driver: &str,
    selector: LapSelector,
    scale: ColorScale,
    units: SpeedUnit,
) -> Result<Figure, LaptraceError> {
    let laps = select_driver_laps(provider, driver)?;
    let lap = select_lap(&laps, driver, selector)?;
    require_telemetry(lap)?;

    let samples = lap.telemetry();
    let session = &provider.session_info().name;
    Ok(Figure::track_map(
        samples.iter().map(|s| s.x).collect(),
        samples.iter().map(|s| s.y).collect(),
        TrackColoring::Continuous {
            values: samples.iter().map(|s| units.convert(s.speed_kph)).collect(),
            scale,
            label: units.axis_label(),
        },
        ChartLabels::new(format!("{driver} {session} Lap {} Speed", lap.lap_number)),
    ))
}

/// Track map of `driver_1`'s lap colored by which driver is faster at each
/// point. `palette` holds the colors for "`driver_2` faster" and "`driver_1` faster".
pub fn compare_speed_map(
    provider: &dyn SessionProvider,
    driver_1: &str,
    driver_2: &str,
    selector: LapSelector,
    alignment: Alignment,
    palette: [Color; 2],
) -> Result<Figure, LaptraceError> {
    let laps_1 = select_driver_laps(provider, driver_1)?;
    let laps_2 = select_driver_laps(provider, driver_2)?;
    let lap_1 = select_lap(&laps_1, driver_1, selector)?;
    let lap_2 = select_lap(&laps_2, driver_2, selector)?;
    require_telemetry(lap_1)?;
    require_telemetry(lap_2)?;

    let delta = match alignment {
        Alignment::AsRecorded => build_speed_delta_series(lap_1, lap_2)?,
        Alignment::ByDistance => {
            let (aligned_1, aligned_2) = align_by_distance(lap_1, lap_2)?;
            build_speed_delta_series(&aligned_1, &aligned_2)?
        }
    };

    let session = &provider.session_info().name;
    Ok(Figure::track_map(
        delta.x,
        delta.y,
        TrackColoring::Categorical {
            categories: delta.faster,
            palette,
            labels: [format!("{driver_2} faster"), format!("{driver_1} faster")],
        },
        ChartLabels::new(format!(
            "{driver_1} v. {driver_2} {session} Lap {} Speed",
            lap_1.lap_number
        )),
    ))
}
