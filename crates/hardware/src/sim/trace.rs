//! Access trace parsing.
//!
//! A trace is line oriented: `<r|w> <address>`, the address in hexadecimal
//! with an optional `0x` prefix. Blank lines are ignored. Malformed lines are
//! reported with their line number and never reach the engine.

use std::io::BufRead;

use crate::common::data::AccessType;
use crate::common::error::TraceError;

/// One decoded trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Read or write.
    pub kind: AccessType,
    /// Byte address.
    pub addr: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(kind: AccessType, addr: u64) -> Self {
        Self { kind, addr }
    }

    /// Parses one non-blank trace line.
    ///
    /// # Errors
    ///
    /// Returns a short description of what is wrong with the line.
    pub fn parse(line: &str) -> Result<Self, &'static str> {
        let mut fields = line.split_whitespace();

        let kind = fields.next().ok_or("empty record")?;
        let kind = AccessType::from_token(kind).ok_or("access kind must be 'r' or 'w'")?;

        let addr = fields.next().ok_or("missing address")?;
        let addr = parse_address(addr).ok_or("address is not a 64-bit hexadecimal value")?;

        if fields.next().is_some() {
            return Err("unexpected fields after address");
        }

        Ok(Self { kind, addr })
    }
}

/// Parses a hexadecimal address, with or without a `0x`/`0X` prefix.
pub fn parse_address(text: &str) -> Option<u64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Iterator over the records of a trace.
///
/// Yields [`TraceError::Malformed`] for lines that do not parse, including
/// lines that are not valid UTF-8; the iterator can continue past those.
/// [`TraceError::Io`] is terminal.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(TraceError::Io {
                        line: self.line,
                        source,
                    }));
                }
            }
            self.line += 1;

            let Ok(text) = std::str::from_utf8(&self.buf) else {
                return Some(Err(TraceError::Malformed {
                    line: self.line,
                    record: String::from_utf8_lossy(&self.buf).trim().to_owned(),
                    reason: "record is not valid UTF-8",
                }));
            };

            let record = text.trim();
            if record.is_empty() {
                continue;
            }

            return Some(
                TraceRecord::parse(record).map_err(|reason| TraceError::Malformed {
                    line: self.line,
                    record: record.to_owned(),
                    reason,
                }),
            );
        }
    }
}
