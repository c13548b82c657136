use clap::{Parser, Subcommand};
use fbp_cli::{
    commands::{deps, list, stats, validate},
    init_tracing,
    settings::Settings,
    GlobalOpts,
};
use fbp_config::Config;
use fbp_logger as logger;

#[derive(Parser)]
#[command(name = "fbp-manifest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Flow-based programming manifest tool",
    long_about = "Discovers the components of FBP projects and their dependencies, \
                  resolves what a component needs to run and validates fbp.json manifests."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all modules and components of a project
    List(list::ListCommand),
    /// Show the modules and components a component depends on
    Deps(deps::DepsCommand),
    /// Show component reuse statistics of a project
    Stats(stats::StatsCommand),
    /// Validate an FBP manifest file
    Validate(validate::ValidateCommand),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbosity_level(), cli.global.quiet);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            logger::warn(&format!("Failed to load config: {}", e));
            Config::default()
        }
    };
    let settings = Settings::from_config(&config);

    if let Err(e) = logger::init(
        cli.global.verbosity_level(),
        cli.global.quiet,
        settings.log_file.as_deref(),
    ) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let result = match cli.command {
        Commands::List(cmd) => list::handle_list(cmd, settings),
        Commands::Deps(cmd) => deps::handle_deps(cmd, settings),
        Commands::Stats(cmd) => stats::handle_stats(cmd, settings),
        Commands::Validate(cmd) => validate::handle_validate(cmd),
    };

    if let Err(e) = result {
        logger::spinner_stop();
        logger::error(&e.to_string());
        std::process::exit(1);
    }
}
