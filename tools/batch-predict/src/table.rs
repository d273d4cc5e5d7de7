//! CSV input/output: raw rows are kept so unknown columns pass through.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use regime_scorer::{BatchRunner, Field, InputRecord};

use crate::error::ToolError;
use crate::predictor::RowPrediction;

/// Columns appended to scored output.
pub const OUTPUT_COLUMNS: [&str; 2] = ["prediccion", "confianza"];
/// Extra column, only written when the heuristic produced the rows.
pub const INDICATOR_COLUMN: &str = "indicadores";

pub struct Table {
  pub headers: StringRecord,
  pub rows: Vec<StringRecord>,
  pub records: Vec<InputRecord>,
}

/// Read a CSV upload, check required columns, and reject an empty file.
pub fn read_table<R: Read>(input: R) -> Result<Table, ToolError> {
  let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
  let headers = reader.headers()?.clone();

  let missing = Field::missing_required(headers.iter());
  if !missing.is_empty() {
    let names: Vec<&str> = missing.iter().map(|f| f.column()).collect();
    return Err(ToolError::MissingColumns(names.join(", ")));
  }

  let mut rows = Vec::new();
  let mut records = Vec::new();
  for row in reader.records() {
    let row = row?;
    records.push(row.deserialize::<InputRecord>(Some(&headers))?);
    rows.push(row);
  }
  BatchRunner::require_non_empty(&records)?;

  Ok(Table {
    headers,
    rows,
    records,
  })
}

/// Write the original columns plus prediction and confidence. The indicator
/// count is appended only when the rows carry one (simulation mode).
pub fn write_scored<W: Write>(
  output: W,
  table: &Table,
  predictions: &[RowPrediction],
) -> Result<(), ToolError> {
  let with_indicators = predictions.iter().any(|p| p.indicators.is_some());
  let mut writer = Writer::from_writer(output);
  let mut header = table.headers.clone();
  for col in OUTPUT_COLUMNS {
    header.push_field(col);
  }
  if with_indicators {
    header.push_field(INDICATOR_COLUMN);
  }
  writer.write_record(&header)?;

  for (row, pred) in table.rows.iter().zip(predictions) {
    let mut out = row.clone();
    out.push_field(&u8::from(pred.prediction).to_string());
    out.push_field(&pred.confidence.map(|c| format!("{:.2}", c)).unwrap_or_default());
    if with_indicators {
      out.push_field(&pred.indicators.map(|n| n.to_string()).unwrap_or_default());
    }
    writer.write_record(&out)?;
  }
  writer.flush()?;
  Ok(())
}

/// Write records with every known column, in declaration order.
pub fn write_records<W: Write>(output: W, records: &[InputRecord]) -> Result<(), ToolError> {
  let mut writer = Writer::from_writer(output);
  writer.write_record(Field::ALL.iter().map(|f| f.column()))?;
  for record in records {
    writer.write_record(Field::ALL.iter().map(|f| f.get(record).unwrap_or("")))?;
  }
  writer.flush()?;
  Ok(())
}
