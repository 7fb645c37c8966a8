//! CSV ingest for lead batches and CSV export for scored results.

use std::collections::BTreeSet;
use std::io::{Read, Write};

use super::domain::{Lead, ScoredResult, LEAD_FIELDS, RESULT_FIELDS};

/// Parse a header-driven CSV into leads, one per data row.
///
/// Cells are trimmed and rows may be ragged: a row shorter than the header simply lacks the
/// trailing columns.
pub fn parse_leads<R: Read>(reader: R) -> Result<Vec<Lead>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut leads = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let columns = headers
            .iter()
            .map(String::as_str)
            .zip(record.iter());
        leads.push(Lead::from_columns(columns));
    }

    Ok(leads)
}

/// Column order for an export: recognized lead fields present in any result, then extra
/// columns alphabetically, then the scoring fields.
pub fn export_headers(results: &[ScoredResult]) -> Vec<String> {
    let mut headers: Vec<String> = LEAD_FIELDS
        .iter()
        .filter(|field| results.iter().any(|result| result.lead.field(field).is_some()))
        .map(|field| field.to_string())
        .collect();

    let extra: BTreeSet<&String> = results
        .iter()
        .flat_map(|result| result.lead.extra.keys())
        .filter(|key| !RESULT_FIELDS.contains(&key.as_str()))
        .collect();
    headers.extend(extra.into_iter().cloned());
    headers.extend(RESULT_FIELDS.iter().map(|field| field.to_string()));
    headers
}

pub fn write_results<W: Write>(writer: W, results: &[ScoredResult]) -> Result<(), csv::Error> {
    let headers = export_headers(results);
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&headers)?;

    for result in results {
        let row: Vec<String> = headers
            .iter()
            .map(|header| match header.as_str() {
                "intent" => result.intent.clone(),
                "score" => result.score.to_string(),
                "reasoning" => result.reasoning.clone(),
                "rule_points" => result.rule_points.to_string(),
                "ai_points" => result.ai_points.to_string(),
                other => result.lead.field(other).unwrap_or_default().to_string(),
            })
            .collect();
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_results(results: &[ScoredResult]) -> Result<Vec<u8>, csv::Error> {
    let mut buffer = Vec::new();
    write_results(&mut buffer, results)?;
    Ok(buffer)
}
