mod animation;
mod app;
mod headless;
mod input;
mod render;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{to_io_error, App, AppConfig};
use drunk_cats::{IndexKind, Session, SimConfig, Viewport};
use headless::{run_headless, HeadlessConfig};
use render::DisplayMode;

/// Drunk cats: watch a population wander a plane, hiss and pick fights.
///
/// Cats within the fight radius of each other want to fight, and the
/// feeling spreads through every close group. Cats merely nearby may hiss,
/// more likely the closer they are.
#[derive(Parser, Debug)]
#[command(name = "drunk-cats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of cats
    #[arg(long, default_value_t = 500)]
    num_cats: usize,

    /// Distance at or under which cats want to fight
    #[arg(long, default_value_t = 15.0)]
    fight_radius: f64,

    /// Distance at or under which cats may hiss
    #[arg(long, default_value_t = 30.0)]
    hiss_radius: f64,

    /// Window width in pixels; the map is width x scale
    #[arg(long, default_value_t = 1000)]
    window_width: u32,

    /// Window height in pixels; the map is height x scale
    #[arg(long, default_value_t = 800)]
    window_height: u32,

    /// Device scale factor
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Largest step a cat takes along each axis per tick
    #[arg(long, default_value_t = 2.0)]
    speed: f64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Only the cat doing the hissing starts to hiss
    #[arg(long)]
    no_mutual_hiss: bool,

    /// Spatial index used for neighbour queries
    #[arg(long, value_enum, default_value_t = IndexArg::Auto)]
    index: IndexArg,

    /// Simulation ticks per second in the viewer
    #[arg(long, default_value_t = 10.0)]
    tick_rate: f64,

    /// Force debug logging and start the viewer in debug mode
    #[arg(long)]
    debug: bool,

    /// Write logs to this file (the viewer logs nowhere otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print JSON lines instead of opening the viewer
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Include every cat's mood in headless output
    #[arg(long)]
    with_moods: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IndexArg {
    Auto,
    Rtree,
    Grid,
    Linear,
}

impl From<IndexArg> for IndexKind {
    fn from(arg: IndexArg) -> Self {
        match arg {
            IndexArg::Auto => IndexKind::Auto,
            IndexArg::Rtree => IndexKind::RTree,
            IndexArg::Grid => IndexKind::Grid,
            IndexArg::Linear => IndexKind::Linear,
        }
    }
}

impl Cli {
    fn sim_config(&self) -> std::io::Result<SimConfig> {
        let viewport = Viewport::new(self.window_width, self.window_height, self.scale)
            .map_err(|e| to_io_error(e.into()))?;
        let (width, height) = viewport.plane_size();

        let mut config = SimConfig::default()
            .with_cat_count(self.num_cats)
            .with_map(width, height)
            .with_radii(self.fight_radius, self.hiss_radius)
            .with_speed(self.speed)
            .with_mutual_hiss(!self.no_mutual_hiss)
            .with_index(self.index.into());
        config.seed = self.seed;
        Ok(config)
    }
}

/// Install the log subscriber; returns whether one was installed
fn init_tracing(cli: &Cli) -> std::io::Result<bool> {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let installed = if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        // The viewer owns the terminal, so without a log file nothing is installed
        return Ok(false);
    };

    match installed {
        Ok(()) => Ok(true),
        Err(err) => {
            eprintln!("Warning: logging disabled: {}", err);
            Ok(false)
        }
    }
}

async fn run(cli: Cli) -> std::io::Result<()> {
    init_tracing(&cli)?;

    let config = cli.sim_config()?;
    let mut session = Session::new(config).map_err(to_io_error)?;
    info!(
        cats = cli.num_cats,
        fight_radius = cli.fight_radius,
        hiss_radius = cli.hiss_radius,
        headless = cli.headless,
        "Starting drunk cats"
    );

    if cli.headless {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let headless = HeadlessConfig {
            ticks: cli.ticks,
            with_moods: cli.with_moods,
        };
        run_headless(&mut session, headless, &mut out)?;
        session.dispose();
        return Ok(());
    }

    let app_config = AppConfig {
        tick_rate: cli.tick_rate,
        display_mode: if cli.debug {
            DisplayMode::Debug
        } else {
            DisplayMode::default()
        },
    };
    let mut app = App::new(session, app_config);
    app.run().await?;
    app.into_session().dispose();
    Ok(())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let cli = Cli::parse_from(["drunk-cats"]);
        let config = cli.sim_config().unwrap();
        assert_eq!(config.cat_count, 500);
        assert_eq!(config.map_width, 1000.0);
        assert_eq!(config.map_height, 800.0);
        assert_eq!(config.fight_radius, 15.0);
        assert_eq!(config.hiss_radius, 30.0);
        assert!(config.mutual_hiss);
        assert_eq!(config.index, IndexKind::Auto);
        assert_eq!(cli.ticks, 100);
    }

    #[test]
    fn test_flags_feed_the_config() {
        let cli = Cli::parse_from([
            "drunk-cats",
            "--window-width",
            "200",
            "--window-height",
            "100",
            "--scale",
            "2",
            "--index",
            "rtree",
            "--no-mutual-hiss",
            "--seed",
            "3",
        ]);
        let config = cli.sim_config().unwrap();
        assert_eq!(config.map_width, 400.0);
        assert_eq!(config.map_height, 200.0);
        assert_eq!(config.index, IndexKind::RTree);
        assert!(!config.mutual_hiss);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_bad_scale_is_an_error() {
        let cli = Cli::parse_from(["drunk-cats", "--scale", "0"]);
        assert!(cli.sim_config().is_err());
    }

    #[test]
    fn test_second_subscriber_is_reported() {
        let cli = Cli::parse_from(["drunk-cats", "--headless"]);
        init_tracing(&cli).unwrap();
        assert!(!init_tracing(&cli).unwrap());

        let viewer = Cli::parse_from(["drunk-cats"]);
        assert!(!init_tracing(&viewer).unwrap());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
