use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use spire_udl::config::Config;
use spire_udl::destination::Destination;
use spire_udl::ephemeris;
use spire_udl::record::Record;

#[derive(Parser)]
#[command(name = "spire-udl")]
#[command(about = "Submit Spire AIS, elset and ephemeris data to the UDL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configuration parameters
    Params,
    /// Validate a configuration file
    Validate {
        #[arg(long)]
        config: String,
    },
    /// Convert an SP3c file and print the UDL ephemeris body
    ConvertEphemeris { file: String },
    /// Submit records to the UDL as one batch
    Write {
        #[arg(long)]
        config: String,
        /// Treat every input as one raw payload instead of OpenCDC JSON lines
        #[arg(long)]
        raw: bool,
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params => params(),
        Commands::Validate { config } => validate(&config),
        Commands::ConvertEphemeris { file } => convert_ephemeris(&file),
        Commands::Write {
            config,
            raw,
            inputs,
        } => write(&config, raw, &inputs).await,
    }
}

fn params() -> ExitCode {
    for p in Config::parameters() {
        println!(
            "{:<24} {:<9} default: {:<34} {}",
            p.name,
            if p.required { "required" } else { "optional" },
            p.default.unwrap_or("-"),
            p.description
        );
    }
    ExitCode::SUCCESS
}

fn validate(path: &str) -> ExitCode {
    match Config::from_file(path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  base URL:       {}", config.base_url);
            println!("  data type:      {}", config.data_type);
            println!("  data mode:      {}", config.data_mode);
            println!("  classification: {}", config.classification_marking);
            println!(
                "  timeout:        {}",
                humantime::format_duration(config.request_timeout)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn convert_ephemeris(path: &str) -> ExitCode {
    let raw = match fs::read(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match ephemeris::to_udl_ephemeris(&raw) {
        Ok(report) => {
            println!("# idOnOrbit: {}", report.id);
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn write(config_path: &str, raw: bool, inputs: &[String]) -> ExitCode {
    let config = match Config::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut records = Vec::new();
    for input in inputs {
        match read_records(input, raw) {
            Ok(mut r) => records.append(&mut r),
            Err(e) => {
                eprintln!("Error reading {}: {}", input, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let destination = match Destination::open(config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error opening UDL destination: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match destination.write(&records).await {
        Ok(count) => {
            println!("Wrote {} records", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Write failed ({}): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn read_records(path: &str, raw: bool) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    if raw {
        return Ok(vec![Record::raw(fs::read(path)?)]);
    }
    Ok(Record::read_json_lines(&fs::read_to_string(path)?)?)
}
