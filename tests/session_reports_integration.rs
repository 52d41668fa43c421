// Integration tests running the reports over a recorded session file
//
// Covers the path the CLI takes:
// 1. Load a JSON lines session
// 2. Build a report figure from it
// 3. Present the figure with the SVG renderer

use std::path::Path;

use laptrace::chart::{FigureBody, SvgChartConfig, TrackColoring};
use laptrace::session::Compound;
use laptrace::writer::write_session;
use laptrace::{
    Alignment, ChartRenderer, Color, ColorScale, LapSelector, LaptraceError, Session,
    SessionProvider, SpeedUnit, SvgFileRenderer, load_session_jsonl, reports,
};
use tempfile::TempDir;

const SAMPLE_SESSION: &str = "session_samples/bahrain_qualifying.jsonl";

fn load_sample() -> Session {
    load_session_jsonl(Path::new(SAMPLE_SESSION)).expect("Failed to load sample session")
}

#[test]
fn test_load_sample_session() {
    let session = load_sample();

    assert_eq!(session.session_info().name, "Qualifying");
    assert_eq!(session.session_info().year, 2024);
    assert_eq!(session.drivers(), vec!["VER", "LEC"]);
    assert_eq!(session.laps.len(), 8);

    // team record overrides the built-in palette, other teams fall back to it
    assert_eq!(
        session.team_color("Red Bull Racing").unwrap(),
        Color::rgb(0x36, 0x71, 0xc6)
    );
    assert!(session.team_color("Ferrari").is_ok());

    let ver = session.driver_laps("ver").unwrap();
    assert_eq!(ver.len(), 4);
    assert_eq!(ver.fastest().unwrap().lap_number, 4);
    assert!(ver.pick(LapSelector::Number(3)).unwrap().lap_time.is_none());
}

#[test]
fn test_reports_on_sample_session() {
    let session = load_sample();

    let bests = reports::compare_session_bests(&session, "VER", "LEC", SpeedUnit::Kph).unwrap();
    assert_eq!(
        bests.labels.title.as_deref(),
        Some("VER v. LEC Fastest Qualifying Lap")
    );

    // lap 3 has no lap time for either driver, both series keep a gap there
    let laps = reports::compare_session_laps(&session, "VER", "LEC").unwrap();
    let FigureBody::Line(series) = &laps.body else {
        panic!("Expected a line chart");
    };
    assert_eq!(series[0].x, vec![1., 2., 3., 4.]);
    assert_eq!(series[1].x, vec![1., 2., 3., 4.]);
    assert!(series[0].y[2].is_nan() && series[1].y[2].is_nan());
    assert_eq!(series[0].segments().len(), 2);

    let tyres = reports::compare_tire_lap_times(&session, "LEC").unwrap();
    let FigureBody::StackedBar(stack) = &tyres.body else {
        panic!("Expected a stacked bar chart");
    };
    assert_eq!(stack.compounds(), vec![Compound::Soft, Compound::Hard]);
    assert_eq!(stack.lap_axis, vec![1., 2., 4.]);
    assert_eq!(stack.colors[1], Color::WHITE);

    let delta = reports::compare_speed_map(
        &session,
        "VER",
        "LEC",
        LapSelector::Fastest,
        Alignment::AsRecorded,
        [Color::rgb(0x17, 0x88, 0xff), Color::rgb(0xfc, 0x44, 0x32)],
    )
    .unwrap();
    let FigureBody::TrackMap { coloring, .. } = &delta.body else {
        panic!("Expected a track map");
    };
    let TrackColoring::Categorical { categories, .. } = coloring else {
        panic!("Expected a categorical coloring");
    };
    assert_eq!(categories, &vec![1, 0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(delta.size, Some((320, 160)));
}

#[test]
fn test_distance_alignment_on_sample_session() {
    let session = load_sample();

    let figure = reports::compare_speed_map(
        &session,
        "VER",
        "LEC",
        LapSelector::Number(2),
        Alignment::ByDistance,
        [Color::WHITE, Color::CORNFLOWER_BLUE],
    )
    .unwrap();
    let FigureBody::TrackMap { x, coloring, .. } = &figure.body else {
        panic!("Expected a track map");
    };
    assert_eq!(x.len(), 8);
    assert_eq!(coloring.len(), 8);

    let err = reports::compare_speed_map(
        &session,
        "VER",
        "LEC",
        LapSelector::Number(1),
        Alignment::ByDistance,
        [Color::WHITE, Color::CORNFLOWER_BLUE],
    )
    .unwrap_err();
    assert!(matches!(err, LaptraceError::MissingTelemetry { lap_number: 1, .. }));
}

#[test]
fn test_render_every_report_to_svg() {
    let session = load_sample();
    let temp_dir = TempDir::new().unwrap();

    let figures = vec![
        ("bests", reports::compare_session_bests(&session, "VER", "LEC", SpeedUnit::Mph)),
        ("laps", reports::compare_session_laps(&session, "VER", "LEC")),
        ("tyres", reports::compare_tire_lap_times(&session, "VER")),
        ("lap_times", reports::lap_time_bars(&session, "LEC")),
        (
            "speed_map",
            reports::lap_speed_map(
                &session,
                "VER",
                LapSelector::Fastest,
                ColorScale::Viridis,
                SpeedUnit::Kph,
            ),
        ),
        (
            "delta_map",
            reports::compare_speed_map(
                &session,
                "VER",
                "LEC",
                LapSelector::Fastest,
                Alignment::AsRecorded,
                [Color::WHITE, Color::CORNFLOWER_BLUE],
            ),
        ),
    ];

    for (name, figure) in figures {
        let figure = figure.unwrap_or_else(|e| panic!("Report {name} failed: {e}"));
        let path = temp_dir.path().join(format!("{name}.svg"));
        let mut renderer = SvgFileRenderer::new(path.clone(), SvgChartConfig::default());
        renderer.present(&figure).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"), "{name} is not an SVG document");
        assert!(svg.ends_with("</svg>"));
        if let Some(title) = &figure.labels.title {
            assert!(svg.contains(title.as_str()), "{name} is missing its title");
        }
    }
}

#[test]
fn test_written_session_loads_back() {
    let session = load_sample();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("copy.jsonl");

    write_session(&path, &session).unwrap();
    let reloaded = load_session_jsonl(&path).unwrap();

    assert_eq!(reloaded.info, session.info);
    assert_eq!(reloaded.laps.len(), session.laps.len());
    assert_eq!(reloaded.team_colors, session.team_colors);
    let original = session.driver_laps("LEC").unwrap();
    let copy = reloaded.driver_laps("LEC").unwrap();
    let (copy_fastest, original_fastest) = (copy.fastest().unwrap(), original.fastest().unwrap());
    assert_eq!(copy_fastest.lap_number, original_fastest.lap_number);
    let drift = copy_fastest.lap_time.unwrap().as_secs_f64() - original_fastest.lap_time.unwrap().as_secs_f64();
    assert!(drift.abs() < 1e-6);
    assert_eq!(copy_fastest.telemetry(), original_fastest.telemetry());
}

#[test]
fn test_missing_session_file() {
    assert!(matches!(
        load_session_jsonl(Path::new("session_samples/does_not_exist.jsonl")),
        Err(LaptraceError::InvalidSessionFile { .. })
    ));
}
