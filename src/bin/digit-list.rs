use clap::Parser;
use digitscan::{Catalog, DeviceRecord, DiscoveryConfig, MetadataPolicy, Strategy};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "digit-list")]
#[command(about = "List DIGIT tactile sensors attached to this host")]
struct Args {
    /// TOML config file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Discovery strategy: scan, tool or auto
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Substring a device model must contain
    #[arg(short, long)]
    marker: Option<String>,

    /// Metadata policy for tool discovery: direct or upward
    #[arg(short, long)]
    policy: Option<MetadataPolicy>,

    /// Print JSON instead of one line per device
    #[arg(long)]
    json: bool,

    /// Only report the sensor with this serial number
    serial: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("digit-list: {e}");
            return ExitCode::from(2);
        }
    };

    let catalog = Catalog::from_config(&config);
    tracing::debug!(strategy = %config.strategy, marker = %config.marker, "using {} discovery", catalog.strategy());
    match &args.serial {
        Some(serial) => match catalog.find_digit(serial) {
            Some(record) => print_records(&[record], args.json),
            None => ExitCode::FAILURE,
        },
        None => print_records(&catalog.list_digits(), args.json),
    }
}

fn load_config(args: &Args) -> Result<DiscoveryConfig, digitscan::ConfigError> {
    let mut config = match &args.config {
        Some(path) => DiscoveryConfig::load(path)?,
        None => DiscoveryConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(marker) = &args.marker {
        config.marker = marker.clone();
    }
    if let Some(policy) = args.policy {
        config.metadata_policy = policy;
    }
    Ok(config)
}

fn print_records(records: &[DeviceRecord], json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(records) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("digit-list: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for record in records {
            println!("{record}");
        }
    }
    ExitCode::SUCCESS
}
