// Distance based resampling of one lap's telemetry onto another lap's samples

use std::time::Duration;

use log::debug;

use crate::errors::LaptraceError;
use crate::session::{Lap, TelemetrySample};

fn distances(lap: &Lap) -> Result<Vec<f64>, LaptraceError> {
    if lap.telemetry().is_empty() {
        return Err(LaptraceError::MissingTelemetry {
            driver: lap.driver.clone(),
            lap_number: lap.lap_number,
        });
    }
    lap.telemetry()
        .iter()
        .map(|sample| sample.distance)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| LaptraceError::MissingDistance {
            driver: lap.driver.clone(),
            lap_number: lap.lap_number,
        })
}

fn interpolate(start: f64, end: f64, t: f64) -> f64 {
    start + t * (end - start)
}

/// Resamples `lap_b` at the distances of `lap_a`, returning copies of both
/// laps whose telemetry has the same length. Distances of `lap_a` outside the
/// range covered by `lap_b` take `lap_b`'s first or last sample.
pub fn align_by_distance(lap_a: &Lap, lap_b: &Lap) -> Result<(Lap, Lap), LaptraceError> {
    let distances_a = distances(lap_a)?;
    let distances_b = distances(lap_b)?;
    let samples_b = lap_b.telemetry();

    let resampled: Vec<TelemetrySample> = distances_a
        .iter()
        .map(|distance| {
            let upper = distances_b.partition_point(|d| d < distance);
            if upper == 0 {
                return TelemetrySample {
                    distance: Some(*distance),
                    ..samples_b[0].clone()
                };
            }
            if upper >= samples_b.len() {
                return TelemetrySample {
                    distance: Some(*distance),
                    ..samples_b[samples_b.len() - 1].clone()
                };
            }

            let (before, after) = (&samples_b[upper - 1], &samples_b[upper]);
            let span = distances_b[upper] - distances_b[upper - 1];
            let t = if span > 0. {
                (distance - distances_b[upper - 1]) / span
            } else {
                0.
            };
            TelemetrySample {
                time: Duration::from_secs_f64(
                    interpolate(before.time.as_secs_f64(), after.time.as_secs_f64(), t).max(0.),
                ),
                x: interpolate(before.x, after.x, t),
                y: interpolate(before.y, after.y, t),
                speed_kph: interpolate(before.speed_kph, after.speed_kph, t),
                distance: Some(*distance),
            }
        })
        .collect();

    debug!(
        "Resampled {} samples of {} lap {} onto {} samples of {} lap {}",
        samples_b.len(),
        lap_b.driver,
        lap_b.lap_number,
        resampled.len(),
        lap_a.driver,
        lap_a.lap_number
    );
    let aligned_b = Lap {
        telemetry: resampled,
        ..lap_b.clone()
    };
    Ok((lap_a.clone(), aligned_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Compound, tests::lap};
    use crate::shaper::build_speed_delta_series;

    fn lap_with_trace(driver: &str, trace: &[(f64, f64)]) -> Lap {
        let mut lap = lap(driver, 1, Some(90.), Compound::Soft);
        lap.telemetry = trace
            .iter()
            .map(|(distance, speed)| TelemetrySample {
                time: Duration::from_secs_f64(distance / 50.),
                x: *distance,
                y: 0.,
                speed_kph: *speed,
                distance: Some(*distance),
            })
            .collect();
        lap
    }

    #[test]
    fn test_align_by_distance_interpolates_speed() {
        let lap_a = lap_with_trace("VER", &[(0., 200.), (50., 210.), (100., 190.)]);
        let lap_b = lap_with_trace("HAM", &[(0., 100.), (100., 300.)]);

        let (aligned_a, aligned_b) = align_by_distance(&lap_a, &lap_b).unwrap();
        assert_eq!(aligned_a.telemetry().len(), aligned_b.telemetry().len());
        let speeds: Vec<f64> = aligned_b.telemetry().iter().map(|s| s.speed_kph).collect();
        assert_eq!(speeds, vec![100., 200., 300.]);

        let delta = build_speed_delta_series(&aligned_a, &aligned_b).unwrap();
        assert_eq!(delta.faster, vec![1, 1, 0]);
    }

    #[test]
    fn test_align_by_distance_clamps_outside_range() {
        let lap_a = lap_with_trace("VER", &[(0., 200.), (150., 210.)]);
        let lap_b = lap_with_trace("HAM", &[(10., 100.), (100., 300.)]);

        let (_, aligned_b) = align_by_distance(&lap_a, &lap_b).unwrap();
        let speeds: Vec<f64> = aligned_b.telemetry().iter().map(|s| s.speed_kph).collect();
        assert_eq!(speeds, vec![100., 300.]);
    }

    #[test]
    fn test_align_requires_distance_channel() {
        let lap_a = lap_with_trace("VER", &[(0., 200.)]);
        let mut lap_b = lap_with_trace("HAM", &[(0., 100.)]);
        lap_b.telemetry[0].distance = None;

        assert!(matches!(
            align_by_distance(&lap_a, &lap_b),
            Err(LaptraceError::MissingDistance { .. })
        ));
    }

    #[test]
    fn test_align_requires_telemetry() {
        let lap_a = lap_with_trace("VER", &[]);
        let lap_b = lap_with_trace("HAM", &[(0., 100.)]);

        assert!(matches!(
            align_by_distance(&lap_a, &lap_b),
            Err(LaptraceError::MissingTelemetry { .. })
        ));
    }
}
