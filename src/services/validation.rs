use serde_json::Value;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::config::SchemaConfig;
use crate::error::ValidationError;

/// Итог прогона по потоку событий.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub accepted: usize,
    pub rejected: usize,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Читает события построчно (NDJSON), пишет нормализованные объекты в `output`.
pub fn validate_stream<R, W>(input: R, mut output: W, config: &SchemaConfig) -> io::Result<Report>
where
    R: BufRead,
    W: Write,
{
    let mut report = Report::default();

    // Делим по байтам: строка с битой кодировкой отклоняется, а не обрывает поток
    for (index, chunk) in input.split(b'\n').enumerate() {
        let mut bytes = chunk?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line_no = index + 1;

        let outcome = match std::str::from_utf8(&bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => normalize_line(line, config),
            Err(e) => Err(ValidationError::Malformed(format!(
                "line is not valid UTF-8: {}",
                e
            ))),
        };

        match outcome {
            Ok(normalized) => {
                serde_json::to_writer(&mut output, &normalized)?;
                output.write_all(b"\n")?;
                report.accepted += 1;
            }
            Err(e) => {
                warn!(line = line_no, fields = ?e.fields(), "Rejected event: {}", e);
                report.rejected += 1;
                if config.fail_fast {
                    break;
                }
            }
        }
    }

    output.flush()?;
    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        view = %config.view,
        "Validation finished"
    );
    Ok(report)
}

fn normalize_line(line: &str, config: &SchemaConfig) -> Result<Value, ValidationError> {
    let value: Value = serde_json::from_str(line)?;
    config.view.normalize(&value)
}
