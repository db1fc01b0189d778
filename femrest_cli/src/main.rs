//! # Femrest CLI
//!
//! Shell access to a running analysis application: start a model, set
//! units, solve, save, and read single properties or results back.
//!
//! Connection settings come from `--config` (JSON), then the `FEMREST_*`
//! environment variables, then the command line flags, each overriding the
//! last.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use femrest_core::ops::{BeamForceQuery, ForceComponent};
use femrest_core::{ClientConfig, ClientError, ClientResult, ElementId, ForceUnit, LengthUnit, MaterialId, Session};
use tracing::debug;

/// Drive a running structural-analysis application over REST
#[derive(Parser, Debug)]
#[command(name = "femrest", author, version, about, long_about = None)]
struct Args {
    /// Base URL of the application (default: http://localhost:5151)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// User token sent in the `user` header
    #[arg(long, global = true, value_name = "TOKEN")]
    user: Option<String>,

    /// Request timeout in seconds (default: none, solves may take long)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// JSON connection settings file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an empty model, optionally setting its units
    New {
        #[arg(long, value_name = "UNIT", requires = "force")]
        length: Option<LengthUnit>,
        #[arg(long, value_name = "UNIT", requires = "length")]
        force: Option<ForceUnit>,
    },
    /// Run the analysis of the current model
    Run,
    /// Save the current model
    Save { path: PathBuf },
    /// Open a model file, replacing the current model
    Open { path: PathBuf },
    /// Refresh the application's model view
    Refresh {
        #[arg(long, default_value_t = 0)]
        view: u32,
        #[arg(long)]
        resize: bool,
    },
    /// Node and element counts of the current model
    Status,
    /// Read a material property
    Material { id: String, property: String },
    /// Read an element property
    Element { id: String, property: String },
    /// Internal force of a beam at an output station
    BeamForce {
        element: String,
        load_case: String,
        /// N, Vy, Vz, Mt, My or Mz
        #[arg(value_parser = parse_component)]
        component: ForceComponent,
        station: u32,
        #[arg(long, default_value = femrest_core::ops::results::DEFAULT_TIME)]
        time: String,
    },
}

fn parse_component(text: &str) -> Result<ForceComponent, String> {
    ForceComponent::parse(text).ok_or_else(|| format!("unknown force component '{}'", text))
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "femrest_core=debug,femrest=debug",
        _ => "femrest_core=trace,femrest=trace",
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> ClientResult<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)?.overlay_env()?,
        None => ClientConfig::from_env()?,
    };
    if let Some(url) = &args.url {
        config.base_url = url.clone();
    }
    if let Some(user) = &args.user {
        config.user = Some(user.clone());
    }
    if let Some(secs) = args.timeout {
        config.timeout_secs = Some(secs);
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> ClientResult<()> {
    let config = load_config(&args)?;
    debug!(base_url = %config.base_url, "connecting");
    let mut session = Session::connect(config)?;

    match args.command {
        Command::New { length, force } => {
            session.new_model()?;
            if let (Some(length), Some(force)) = (length, force) {
                session.set_units(length, force)?;
                println!("New model in {}, {}", length, force);
            } else {
                println!("New model");
            }
        }
        Command::Run => {
            session.run_model()?;
            println!("Analysis finished");
        }
        Command::Save { path } => {
            let saved = session.save_model(&path)?;
            println!("Saved to {}", saved);
        }
        Command::Open { path } => {
            session.open_model(&path)?;
            println!("Opened {}", path.display());
        }
        Command::Refresh { view, resize } => {
            session.refresh_designer_view(view, resize)?;
        }
        Command::Status => {
            let nodes = session.nodes_count()?;
            let elements = session.elements_count()?;
            println!("Application: {}", session.config().base_url);
            println!("  Nodes:    {}", nodes);
            println!("  Elements: {}", elements);
        }
        Command::Material { id, property } => {
            let value = session.material_property(&MaterialId::from(id), &property)?;
            println!("{}", value.as_text());
        }
        Command::Element { id, property } => {
            let value = session.element_property(&ElementId::from(id), &property)?;
            println!("{}", value.as_text());
        }
        Command::BeamForce {
            element,
            load_case,
            component,
            station,
            time,
        } => {
            let query = BeamForceQuery::new(ElementId::from(element), load_case, component, station).at_time(time);
            let value = session.beam_force(&query)?;
            println!("{} = {}", component, value);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbosity);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &ClientError) -> ExitCode {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    ExitCode::FAILURE
}
