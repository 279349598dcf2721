//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a MetricsRequest (deployments + incidents + window).
//! Output lines are either:
//! - A MetricsReport for the request
//! - An ErrorOutput (when the line is malformed or the window is degenerate)

use dora_engine::types::ErrorOutput;
use dora_engine::{EngineError, MetricsReport, MetricsRequest};
use std::io::{self, BufRead, Write};

fn main() {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "dora-engine: read error: {}", e);
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    // Parse inbound request.
    let request: MetricsRequest = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        let err = ErrorOutput::new(format!("json parse: {}", e));
        let _ = serde_json::to_writer(&mut out, &err);
        let _ = writeln!(out);
        continue;
      }
    };

    if let Err(e) = request.validate() {
      let err = match &e {
        EngineError::Validation { field, reason } => {
          ErrorOutput::new(reason.clone()).with_field(field.clone())
        }
        _ => ErrorOutput::new(e.to_string()),
      };
      let _ = serde_json::to_writer(&mut out, &err);
      let _ = writeln!(out);
      continue;
    }

    match MetricsReport::build(&request.deployments, &request.incidents, &request.time_range) {
      Ok(report) => {
        let _ = serde_json::to_writer(&mut out, &report);
        let _ = writeln!(out);
      }
      Err(e) => {
        let _ = serde_json::to_writer(&mut out, &ErrorOutput::new(e.to_string()));
        let _ = writeln!(out);
      }
    }
  }

  let _ = out.flush();
}
