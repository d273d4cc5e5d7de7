//! batch-predict: regime predictions for CSV uploads.
//!
//! Usage:
//!   batch-predict predict records.csv -o scored.csv   # remote model, heuristic fallback
//!   batch-predict predict records.csv --offline --by Zona
//!   batch-predict one '{"Grupo_etario": "> 75", "Zona": "Rural"}'
//!   batch-predict template -o plantilla.csv
//!   batch-predict sample --count 2000 --seed 42
//!
//! Logs and the summary go to stderr; data goes to the output file or stdout.

mod client;
mod error;
mod predictor;
mod sample;
mod table;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use regime_scorer::{breakdown, logging, Field, InputRecord};
use tracing::{error, info};

use crate::client::ApiClient;
use crate::error::ToolError;

#[derive(Parser)]
#[command(name = "batch-predict")]
#[command(about = "Regime risk predictions from CSV, with heuristic fallback")]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Base URL of the model API
  #[arg(long, global = true, default_value = "http://localhost:5000")]
  api_url: String,

  /// Skip the API and score with the local heuristic
  #[arg(long, global = true)]
  offline: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Score every row of a CSV file
  Predict {
    input: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also report the high-risk rate per value of this column
    #[arg(long)]
    by: Option<Field>,
  },
  /// Score one record given as JSON
  One { json: String },
  /// Write the upload template
  Template {
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Write seeded synthetic records
  Sample {
    #[arg(long, default_value_t = 2000)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

fn main() {
  logging::init();
  let cli = Cli::parse();
  if let Err(e) = run(cli) {
    error!("batch-predict: {}", e);
    process::exit(2);
  }
}

fn run(cli: Cli) -> Result<(), ToolError> {
  let client = if cli.offline {
    None
  } else {
    Some(ApiClient::new(&cli.api_url)?)
  };

  match cli.command {
    Commands::Predict { input, output, by } => {
      let table = table::read_table(File::open(&input)?)?;
      info!(records = table.records.len(), file = %input.display(), "loaded upload");

      let (source, rows) = predictor::predict_with_fallback(client.as_ref(), &table.records)?;
      table::write_scored(open_output(output.as_ref())?, &table, &rows)?;

      let s = predictor::summarize(&rows);
      info!(
        source,
        total = s.total,
        high_risk = s.high_risk_count,
        low_risk = s.low_risk_count,
        "high-risk rate {:.1}%, mean confidence {:.2}",
        s.high_risk_rate * 100.0,
        s.mean_confidence
      );

      if let Some(field) = by {
        let predictions: Vec<_> = rows.iter().map(|r| r.prediction).collect();
        for row in breakdown(&table.records, &predictions, field) {
          info!(
            "{} = {}: {}/{} high risk ({:.1}%)",
            field,
            row.value,
            row.high_risk_count,
            row.total,
            row.high_risk_rate * 100.0
          );
        }
      }
    }
    Commands::One { json } => {
      let record: InputRecord = serde_json::from_str(&json)?;
      let (source, response) = predictor::predict_one_with_fallback(client.as_ref(), &record)?;
      info!(source, "prediction complete");
      let mut out = io::stdout().lock();
      serde_json::to_writer_pretty(&mut out, &response)?;
      writeln!(out)?;
    }
    Commands::Template { output } => {
      table::write_records(open_output(output.as_ref())?, &sample::template())?;
    }
    Commands::Sample {
      count,
      seed,
      output,
    } => {
      let records = sample::generate(count, seed);
      table::write_records(open_output(output.as_ref())?, &records)?;
      info!(count, seed, "sample records written");
    }
  }
  Ok(())
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>, ToolError> {
  Ok(match path {
    Some(p) => Box::new(File::create(p)?),
    None => Box::new(io::stdout().lock()),
  })
}
