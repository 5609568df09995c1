//! FILENAME: core/report-engine/src/format.rs
//! JSON load/save for report requests and responses.
//!
//! Responses are stored in the upstream wire shape, so a file written by
//! `save_response` can be read back by any consumer of that shape.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::definition::{ReportArgs, ReportRequest};
use crate::error::Result;
use crate::response::ReportResponse;

/// Parses dashboard report arguments and validates them into a request.
pub fn parse_request_json(json: &str) -> Result<ReportRequest> {
    let args: ReportArgs = serde_json::from_str(json)?;
    ReportRequest::from_args(&args)
}

pub fn parse_response_json(json: &str) -> Result<ReportResponse> {
    Ok(serde_json::from_str(json)?)
}

pub fn response_to_json(response: &ReportResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

pub fn load_response(path: impl AsRef<Path>) -> Result<ReportResponse> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_response(path: impl AsRef<Path>, response: &ReportResponse) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, response)?;
    writer.flush()?;
    Ok(())
}
