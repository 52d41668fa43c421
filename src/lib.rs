// Library interface for laptrace
// The binary and the integration tests both go through these modules

pub mod chart;
pub mod color;
pub mod config;
pub mod errors;
pub mod palette;
pub mod reports;
pub mod session;
pub mod shaper;
pub mod writer;

// Re-export commonly used types
pub use chart::{ChartRenderer, Figure, SvgFileRenderer, WindowRenderer};
pub use color::{Color, ColorScale};
pub use config::{AppConfig, SpeedUnit};
pub use errors::LaptraceError;
pub use reports::Alignment;
pub use session::{Lap, LapSelector, Laps, Session, SessionInfo, SessionProvider, load_session_jsonl};
