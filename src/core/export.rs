use crate::config::toml_config::OutputFormat;
use crate::domain::model::ExportTable;
use crate::utils::error::{EtlError, Result};

fn render_delimited(table: &ExportTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(table.headers())?;
    for row in &table.rows {
        writer.write_record(row.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Serializes the table as UTF-8 text: a header row then one line per municipality.
pub fn render(table: &ExportTable, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_delimited(table, b','),
        OutputFormat::Tsv => render_delimited(table, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(table)?),
    }
}
