//! Card Layout CLI
//!
//! Usage:
//!   card-layout --cards <N> --width <W> --height <H> [OPTIONS]
//!
//! Options:
//!   --game-info, --warnings, --start-button, --result-display
//!                            Mounted UI panels that reserve height
//!   -c, --config <FILE>      Layout tuning overrides (TOML format)
//!   --seed <S>               Rotation jitter seed
//!   --no-jitter              Draw every card straight
//!   -d, --debug              Print the calculation history to stderr
//!   -h, --help               Print help
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;

use clap::Parser;

use card_layout::{ChromeFlags, ContainerSize, EngineConfig, Jitter, LayoutConfig, LayoutSession};

#[derive(Parser)]
#[command(name = "card-layout")]
#[command(about = "Compute card positions for a container and print them as JSON")]
struct Cli {
    /// Number of cards to lay out
    #[arg(short = 'n', long)]
    cards: usize,

    /// Container width in pixels
    #[arg(short = 'W', long, allow_negative_numbers = true)]
    width: f64,

    /// Container height in pixels
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    height: f64,

    /// Game info panel and status bar are mounted
    #[arg(long)]
    game_info: bool,

    /// Warning banner is mounted
    #[arg(long)]
    warnings: bool,

    /// Start button is mounted
    #[arg(long)]
    start_button: bool,

    /// Result panel is mounted
    #[arg(long)]
    result_display: bool,

    /// Layout tuning overrides (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rotation jitter seed
    #[arg(long, conflicts_with = "no_jitter")]
    seed: Option<u64>,

    /// Draw every card straight
    #[arg(long)]
    no_jitter: bool,

    /// Print the calculation history to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let layout = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };

    let jitter = if cli.no_jitter {
        Jitter::Disabled
    } else {
        cli.seed.map(Jitter::Seeded).unwrap_or_default()
    };

    let chrome = ChromeFlags::none()
        .with_game_info(cli.game_info)
        .with_warnings(cli.warnings)
        .with_start_button(cli.start_button)
        .with_result_display(cli.result_display);

    let config = EngineConfig::new()
        .with_layout(layout)
        .with_jitter(jitter)
        .with_debug(cli.debug);
    let mut session = LayoutSession::new(config);
    let result = session.calculate(cli.cards, ContainerSize::new(cli.width, cli.height), chrome);

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.debug {
        match session.export_debug_data() {
            Ok(json) => eprintln!("{}", json),
            Err(e) => {
                eprintln!("Error exporting debug data: {}", e);
                std::process::exit(1);
            }
        }
    }
}
