use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{error, info, warn};

use laptrace::{
    Alignment, AppConfig, ChartRenderer, ColorScale, Figure, LapSelector, LaptraceError, SpeedUnit,
    SvgFileRenderer, WindowRenderer, load_session_jsonl, reports,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Write the chart to this SVG file instead of opening a window
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Overrides the configured speed unit
    #[arg(short, long, global = true, value_enum)]
    units: Option<SpeedUnit>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Chart(ChartCommand),
    /// Write the default configuration file
    InitConfig {
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug)]
struct SessionArgs {
    /// Session file in JSON lines format
    #[arg(short, long)]
    session: PathBuf,
}

#[derive(Subcommand, Debug)]
enum ChartCommand {
    /// Speed traces of two drivers' fastest laps
    Bests {
        driver_1: String,
        driver_2: String,
        #[command(flatten)]
        input: SessionArgs,
    },
    /// Lap times of two drivers over the session
    Laps {
        driver_1: String,
        driver_2: String,
        #[command(flatten)]
        input: SessionArgs,
    },
    /// Lap times of one driver stacked by tyre compound
    Tyres {
        driver: String,
        #[command(flatten)]
        input: SessionArgs,
    },
    /// Lap times of one driver as bars
    LapTimes {
        driver: String,
        #[command(flatten)]
        input: SessionArgs,
    },
    /// Track map of one lap colored by speed
    SpeedMap {
        driver: String,

        /// Lap number or "fastest"
        #[arg(short, long, default_value = "fastest")]
        lap: LapSelector,

        #[arg(long, value_enum)]
        scale: Option<ColorScale>,

        #[command(flatten)]
        input: SessionArgs,
    },
    /// Track map colored by which of two drivers is faster
    DeltaMap {
        driver_1: String,
        driver_2: String,

        /// Lap number or "fastest"
        #[arg(short, long, default_value = "fastest")]
        lap: LapSelector,

        #[arg(short, long, value_enum, default_value_t = Alignment::AsRecorded)]
        alignment: Alignment,

        #[command(flatten)]
        input: SessionArgs,
    },
}

impl ChartCommand {
    fn session_path(&self) -> &Path {
        match self {
            Self::Bests { input, .. }
            | Self::Laps { input, .. }
            | Self::Tyres { input, .. }
            | Self::LapTimes { input, .. }
            | Self::SpeedMap { input, .. }
            | Self::DeltaMap { input, .. } => &input.session,
        }
    }
}

fn init_config(force: bool) -> Result<(), LaptraceError> {
    let config_path = AppConfig::config_path()?;
    if config_path.exists() && !force {
        warn!("Config file {:?} already exists, use --force to overwrite it", config_path);
        return Ok(());
    }
    let saved_to = AppConfig::default().save()?;
    println!("Wrote default config to {}", saved_to.display());
    Ok(())
}

fn build_figure(
    args: &Args,
    command: &ChartCommand,
    config: &AppConfig,
) -> Result<Figure, LaptraceError> {
    let session = load_session_jsonl(command.session_path())?;
    let units = args.units.unwrap_or(config.speed_unit);

    match command {
        ChartCommand::Bests {
            driver_1, driver_2, ..
        } => reports::compare_session_bests(&session, driver_1, driver_2, units),
        ChartCommand::Laps {
            driver_1, driver_2, ..
        } => reports::compare_session_laps(&session, driver_1, driver_2),
        ChartCommand::Tyres { driver, .. } => reports::compare_tire_lap_times(&session, driver),
        ChartCommand::LapTimes { driver, .. } => reports::lap_time_bars(&session, driver),
        ChartCommand::SpeedMap {
            driver, lap, scale, ..
        } => reports::lap_speed_map(
            &session,
            driver,
            *lap,
            scale.unwrap_or(config.color_scale),
            units,
        ),
        ChartCommand::DeltaMap {
            driver_1,
            driver_2,
            lap,
            alignment,
            ..
        } => reports::compare_speed_map(
            &session,
            driver_1,
            driver_2,
            *lap,
            *alignment,
            config.theme.delta_palette,
        ),
    }
}

fn run(args: Args) -> Result<(), LaptraceError> {
    let command = match &args.command {
        Commands::InitConfig { force } => return init_config(*force),
        Commands::Chart(command) => command,
    };

    let config = match AppConfig::from_local_file() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            AppConfig::default()
        }
    };

    let figure = build_figure(&args, command, &config)?;
    let mut renderer: Box<dyn ChartRenderer> = match &args.output {
        Some(path) => Box::new(SvgFileRenderer::new(path.clone(), config.svg_config())),
        None => Box::new(WindowRenderer::new(config.theme.clone())),
    };
    renderer.present(&figure)?;
    info!("Done");
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    }) {
        warn!("Could not set Ctrl-C handler: {}", e);
    }

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
