use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use grind_timer::OutputFormat;
use grind_timer::commands;
use grind_timer::config;
use grind_timer::timer::DurationParts;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grind")]
#[command(about = "Countdown timers for in-game grinding, grouped by game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct Span {
    #[arg(short, long, default_value_t = 0, help = "Days")]
    days: u32,
    #[arg(short = 'H', long, default_value_t = 0, help = "Hours")]
    hours: u32,
    #[arg(short, long, default_value_t = 0, help = "Minutes")]
    minutes: u32,
}

impl From<Span> for DurationParts {
    fn from(span: Span) -> Self {
        DurationParts::new(span.days, span.hours, span.minutes)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a section with its first timer
    New {
        #[arg(help = "Section (game) name")]
        section: String,
        #[arg(help = "Timer name")]
        timer: String,
        #[command(flatten)]
        span: Span,
    },
    /// Add a timer to an existing section
    Add {
        #[arg(help = "Section (game) name")]
        section: String,
        #[arg(help = "Timer name")]
        timer: String,
        #[command(flatten)]
        span: Span,
    },
    /// Replace a timer with a new name and duration, starting now
    Update {
        #[arg(help = "Section index as shown by 'list'")]
        section: usize,
        #[arg(help = "Timer index within the section")]
        timer: usize,
        #[arg(help = "New timer name")]
        name: String,
        #[command(flatten)]
        span: Span,
    },
    /// Start a timer again with its current duration
    Restart {
        #[arg(help = "Section index as shown by 'list'")]
        section: usize,
        #[arg(help = "Timer index within the section")]
        timer: usize,
    },
    /// Delete a timer (and its section when it was the last one)
    Delete {
        #[arg(help = "Section index as shown by 'list'")]
        section: usize,
        #[arg(help = "Timer index within the section")]
        timer: usize,
    },
    /// Show all timers with progress
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Keep refreshing progress and deliver alerts when timers finish
    Watch {
        #[arg(long, help = "Seconds between refreshes (defaults to display.refresh_secs)")]
        interval: Option<u64>,
        #[arg(long, help = "Refresh once and exit")]
        once: bool,
    },
    /// Show or change configuration
    Config(ConfigArgs),
}

#[derive(Parser)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Set { key: String, value: String },
    Get { key: String },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grind_timer={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Ignoring config ({:#}). Using defaults.", e);
        config::Config::default()
    });

    init_logging(&config.logging.level);

    match &cli.command {
        Commands::New {
            section,
            timer,
            span,
        } => {
            commands::timers::new_section(&config, section, timer, (*span).into())?;
        }
        Commands::Add {
            section,
            timer,
            span,
        } => {
            commands::timers::add(&config, section, timer, (*span).into())?;
        }
        Commands::Update {
            section,
            timer,
            name,
            span,
        } => {
            commands::timers::update(&config, *section, *timer, name, (*span).into())?;
        }
        Commands::Restart { section, timer } => {
            commands::timers::restart(&config, *section, *timer)?;
        }
        Commands::Delete { section, timer } => {
            commands::timers::delete(&config, *section, *timer)?;
        }
        Commands::List { format } => {
            commands::list::list(&config, *format)?;
        }
        Commands::Watch { interval, once } => {
            tokio::runtime::Runtime::new()?
                .block_on(commands::watch::watch(&config, *interval, *once))?;
        }
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Set { key, value } => commands::config::set(key, value)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
        },
    }

    Ok(())
}
