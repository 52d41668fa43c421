// Error types for laptrace

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LaptraceError {
    // Lookup errors, raised by the session provider
    #[snafu(display("Driver {driver} not found in session"))]
    DriverNotFound { driver: String },
    #[snafu(display("No lap matching {selector} for driver {driver}"))]
    LapNotFound { driver: String, selector: String },
    #[snafu(display("No team color known for {team}"))]
    UnknownTeam { team: String },

    // Shape errors, raised by the data shaper
    #[snafu(display("Misaligned series: {left} values compared against {right} values"))]
    MisalignedSeries { left: usize, right: usize },
    #[snafu(display("Lap {lap_number} of {driver} has no telemetry"))]
    MissingTelemetry { driver: String, lap_number: u32 },
    #[snafu(display("Lap {lap_number} of {driver} has no distance channel"))]
    MissingDistance { driver: String, lap_number: u32 },

    // Session file errors
    #[snafu(display("Invalid session file: {path}"))]
    InvalidSessionFile { path: String },
    #[snafu(display("Error loading session file"))]
    SessionLoaderError { source: io::Error },
    #[snafu(display("Session file {path} has no session info record"))]
    MissingSessionInfo { path: String },
    #[snafu(display("Error writing session file"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing session record"))]
    RecordSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Rendering errors
    #[snafu(display("SVG generation failed: {reason}"))]
    SvgGenerationError { reason: String },
    #[snafu(display("Chart viewer failed: {reason}"))]
    ViewerError { reason: String },

    // User input validation errors
    #[snafu(display("Invalid lap selector: {value} (expected a lap number or \"fastest\")"))]
    InvalidLapSelector { value: String },
    #[snafu(display("Invalid color: {value}"))]
    InvalidColor { value: String },
}
