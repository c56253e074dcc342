//! TUV command-line runner
//!
//! Runs the TUV binary once for a single zenith angle, altitude and
//! temperature and prints the extracted photolysis rates.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rtuv-cli -- --root /opt/tuv/V5.3.2 --zenith 60 --altitude 0 --temperature 298
//! ```
//!
//! The first run in a fresh checkout compiles TUV and exits without rates;
//! run the same command again to get them.

use clap::Parser;
use log::error;
use rtuv_core::errors::TuvResult;
use rtuv_core::{InvocationParameters, PhotolysisRates, TuvConfig, TuvOutcome, TuvRunner};
use std::path::PathBuf;
use std::process::ExitCode;

/// Run TUV and print photolysis rates
#[derive(Parser, Debug)]
#[command(name = "rtuv")]
#[command(about = "Run the TUV radiative-transfer model and print its photolysis rates")]
struct Args {
    /// TUV installation directory (overrides `root` from --config)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Solar zenith angle [deg]
    #[arg(long, default_value_t = 60.0, allow_negative_numbers = true)]
    zenith: f64,

    /// Altitude [km]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    altitude: f64,

    /// Temperature [K]
    #[arg(long, default_value_t = 298.0)]
    temperature: f64,

    /// Print rates as JSON
    #[arg(long)]
    json: bool,

    /// Log the commands being run
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn tuv_config(&self) -> TuvResult<TuvConfig> {
        let mut config = match &self.config {
            Some(path) => TuvConfig::from_file(path)?,
            None => TuvConfig::default(),
        };
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        Ok(config)
    }

    fn parameters(&self) -> InvocationParameters {
        InvocationParameters::new(self.zenith, self.altitude, self.temperature)
    }
}

fn format_table(rates: &PhotolysisRates) -> String {
    rates
        .iter()
        .map(|(key, value)| format!("{:<8} {:.4e}\n", key.as_str(), value))
        .collect()
}

fn run(args: &Args) -> TuvResult<Option<PhotolysisRates>> {
    let runner = TuvRunner::new(args.tuv_config()?)?;
    Ok(runner.run(&args.parameters())?.into_rates())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(Some(rates)) => {
            if args.json {
                match serde_json::to_string_pretty(&rates) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialise rates: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", format_table(&rates));
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("TUV was compiled on this run; run again to compute rates");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtuv_core::PhotolysisKey;

    #[test]
    fn test_defaults_match_reference_case() {
        let args = Args::try_parse_from(["rtuv", "--root", "/opt/tuv"]).unwrap();
        assert_eq!(args.parameters(), InvocationParameters::new(60.0, 0.0, 298.0));
        assert_eq!(args.tuv_config().unwrap(), TuvConfig::with_root("/opt/tuv"));
    }

    #[test]
    fn test_negative_altitude() {
        let args = Args::try_parse_from(["rtuv", "--altitude", "-0.5"]).unwrap();
        assert_eq!(args.altitude, -0.5);
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::try_parse_from(["rtuv", "--config", "/nonexistent/tuv.toml"]).unwrap();
        assert!(args.tuv_config().is_err());
    }

    #[test]
    fn test_format_table() {
        let pair_rates: Vec<f64> = (0..56).map(|i| i as f64).collect();
        let rates = PhotolysisRates::from_pair_rates(&pair_rates).unwrap();
        let table = format_table(&rates);
        assert_eq!(table.lines().count(), PhotolysisKey::all().count());
        assert!(table.starts_with("o1d      1.0000e0\n"));
    }
}
