//! Loading branch traces from text files.
//!
//! A trace holds one conditional branch per line: the program counter
//! in hexadecimal (an optional `0x` prefix is accepted) and the
//! resolved outcome as `1` (taken) or `0` (not taken), separated by
//! whitespace. Blank lines are ignored.

use crate::Outcome;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// One replayed conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub pc: u32,
    pub outcome: Outcome,
}

/// Failures while loading a trace file.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("i/o error reading trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("{name}:{line}: malformed trace record '{text}'")]
    Malformed {
        name: String,
        line: usize,
        text: String,
    },
}

/// An in-memory branch trace.
#[derive(Debug)]
pub struct Trace {
    name: String,
    records: Vec<TraceRecord>,
}

impl Trace {
    /// Load a trace from a file, using the file name as the trace
    /// name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let f = File::open(path)?;
        Self::from_reader(name, BufReader::new(f))
    }

    /// Read a trace from any buffered reader.
    pub fn from_reader(
        name: impl ToString,
        reader: impl BufRead,
    ) -> Result<Self, TraceError> {
        let name = name.to_string();
        let mut records = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let record = Self::parse_record(text).ok_or_else(|| {
                TraceError::Malformed {
                    name: name.clone(),
                    line: lineno + 1,
                    text: text.to_string(),
                }
            })?;
            records.push(record);
        }
        log::debug!("loaded {} records from '{}'", records.len(), name);
        Ok(Self { name, records })
    }

    fn parse_record(text: &str) -> Option<TraceRecord> {
        let mut fields = text.split_whitespace();
        let pc_str = fields.next()?;
        let outcome_str = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        let pc_str = pc_str
            .strip_prefix("0x")
            .or_else(|| pc_str.strip_prefix("0X"))
            .unwrap_or(pc_str);
        let pc = u32::from_str_radix(pc_str, 16).ok()?;
        let outcome = match outcome_str {
            "0" => Outcome::N,
            "1" => Outcome::T,
            _ => return None,
        };
        Some(TraceRecord { pc, outcome })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the number of records.
    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }
}

/// Lazily loads a sequence of trace files.
pub struct TraceSet {
    files: Vec<String>,
    cur: usize,
}

impl TraceSet {
    pub fn new_from_slice(strings: &[String]) -> Self {
        Self {
            files: strings.to_vec(),
            cur: 0,
        }
    }

    pub fn add_file(&mut self, s: impl ToString) {
        self.files.push(s.to_string());
    }
}

impl Iterator for TraceSet {
    type Item = Result<Trace, TraceError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == self.files.len() {
            return None;
        }
        let res = Trace::from_file(&self.files[self.cur]);
        self.cur += 1;
        Some(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome::{N, T};
    use std::io::Write;

    #[test]
    fn parses_records_and_skips_blank_lines() {
        let text = "0x40d7f9 1\n\n40d7fa 0\n  0X1000 1  \n";
        let trace = Trace::from_reader("t", text.as_bytes()).unwrap();
        assert_eq!(trace.num_records(), 3);
        assert_eq!(
            trace.records()[0],
            TraceRecord { pc: 0x40d7f9, outcome: T }
        );
        assert_eq!(
            trace.records()[1],
            TraceRecord { pc: 0x40d7fa, outcome: N }
        );
        assert_eq!(trace.records()[2].pc, 0x1000);
    }

    #[test]
    fn malformed_lines_report_their_position() {
        let text = "1000 1\nwat\n";
        let err = Trace::from_reader("t", text.as_bytes()).unwrap_err();
        match err {
            TraceError::Malformed { line, text, .. } => {
                assert_eq!(line, 2);
                assert_eq!(text, "wat");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_outcomes_other_than_binary_digits() {
        assert!(Trace::from_reader("t", "1000 2\n".as_bytes()).is_err());
        assert!(Trace::from_reader("t", "1000 1 extra\n".as_bytes()).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "deadbeef 1").unwrap();
        writeln!(f, "deadbef3 0").unwrap();
        f.flush().unwrap();

        let trace = Trace::from_file(f.path()).unwrap();
        assert_eq!(trace.num_records(), 2);
        assert_eq!(trace.records()[0].pc, 0xdeadbeef);
        assert_eq!(trace.records()[1].outcome, N);
    }
}
