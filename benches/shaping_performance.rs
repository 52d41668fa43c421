use criterion::{Criterion, black_box, criterion_group, criterion_main};
use laptrace::chart::{ChartLabels, Figure, SvgChartGenerator, TrackColoring};
use laptrace::color::{Color, ColorScale};
use laptrace::session::{Compound, Lap, Laps, TelemetrySample};
use laptrace::shaper::{
    LapField, align_by_distance, build_compound_stack, build_speed_delta_series,
    build_time_series, track_figure_dimensions,
};
use std::time::Duration;

const COMPOUNDS: [Compound; 3] = [Compound::Soft, Compound::Medium, Compound::Hard];

fn create_sample_lap(driver: &str, lap_number: u32, samples: usize) -> Lap {
    // a circle of 5 km, sampled at ~4Hz
    let telemetry = (0..samples)
        .map(|i| {
            let angle = i as f64 / samples as f64 * std::f64::consts::TAU;
            TelemetrySample {
                time: Duration::from_millis(i as u64 * 250),
                x: 800. * angle.cos(),
                y: 800. * angle.sin(),
                speed_kph: 180. + 120. * (angle * 3.).sin(),
                distance: Some(i as f64 / samples as f64 * 5000.),
            }
        })
        .collect();

    Lap {
        driver: driver.to_string(),
        team: "Ferrari".to_string(),
        lap_number,
        lap_time: Some(Duration::from_millis(90_000 + lap_number as u64 * 37 % 2000)),
        sector1_time: None,
        sector2_time: None,
        sector3_time: None,
        compound: COMPOUNDS[(lap_number as usize / 20) % COMPOUNDS.len()],
        tyre_life: Some(lap_number % 20),
        speed_trap_kph: Some(310.),
        telemetry,
    }
}

fn bench_lap_shaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("lap_shaping");

    let laps = Laps::new((1..=70).map(|n| create_sample_lap("LEC", n, 0)).collect());

    group.bench_function("build_time_series_70_laps", |b| {
        b.iter(|| black_box(build_time_series(&laps, LapField::LapTime, Color::WHITE)));
    });

    group.bench_function("build_compound_stack_70_laps", |b| {
        b.iter(|| black_box(build_compound_stack(&laps)));
    });

    group.finish();
}

fn bench_telemetry_shaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("telemetry_shaping");

    let lap_a = create_sample_lap("LEC", 1, 1000);
    let lap_b = create_sample_lap("SAI", 1, 950);
    let (aligned_a, aligned_b) = align_by_distance(&lap_a, &lap_b).unwrap();

    group.bench_function("align_by_distance_1000_samples", |b| {
        b.iter(|| black_box(align_by_distance(&lap_a, &lap_b).unwrap()));
    });

    group.bench_function("build_speed_delta_series_1000_samples", |b| {
        b.iter(|| black_box(build_speed_delta_series(&aligned_a, &aligned_b).unwrap()));
    });

    let x: Vec<f64> = lap_a.telemetry().iter().map(|s| s.x).collect();
    let y: Vec<f64> = lap_a.telemetry().iter().map(|s| s.y).collect();
    group.bench_function("track_figure_dimensions_1000_samples", |b| {
        b.iter(|| black_box(track_figure_dimensions(&x, &y)));
    });

    group.finish();
}

fn bench_svg_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("svg_generation");

    let lap = create_sample_lap("LEC", 1, 1000);
    let figure = Figure::track_map(
        lap.telemetry().iter().map(|s| s.x).collect(),
        lap.telemetry().iter().map(|s| s.y).collect(),
        TrackColoring::Continuous {
            values: lap.telemetry().iter().map(|s| s.speed_kph).collect(),
            scale: ColorScale::Plasma,
            label: "Speed [km/h]".to_string(),
        },
        ChartLabels::new("LEC Race Lap 1 Speed"),
    );
    let generator = SvgChartGenerator::new();

    group.bench_function("speed_map_1000_markers", |b| {
        b.iter(|| black_box(generator.generate(&figure).unwrap()));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = bench_lap_shaping, bench_telemetry_shaping, bench_svg_generation
}
criterion_main!(benches);
