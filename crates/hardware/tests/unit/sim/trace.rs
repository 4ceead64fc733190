//! Trace parsing tests.

use std::io::{self, BufRead, Cursor, Read};

use cachesim_core::common::{AccessType, TraceError};
use cachesim_core::sim::trace::{TraceReader, TraceRecord, parse_address};
use rstest::rstest;

#[rstest]
#[case("r 0", AccessType::Read, 0)]
#[case("w 1f", AccessType::Write, 0x1f)]
#[case("R 0x7FFF0000", AccessType::Read, 0x7FFF_0000)]
#[case("w\t0XdeadBEEF", AccessType::Write, 0xDEAD_BEEF)]
#[case("r ffffffffffffffff", AccessType::Read, u64::MAX)]
fn parses_records(#[case] line: &str, #[case] kind: AccessType, #[case] addr: u64) {
    assert_eq!(TraceRecord::parse(line), Ok(TraceRecord::new(kind, addr)));
}

#[rstest]
#[case("x 10", "access kind must be 'r' or 'w'")]
#[case("r", "missing address")]
#[case("w 0x", "address is not a 64-bit hexadecimal value")]
#[case("w +10", "address is not a 64-bit hexadecimal value")]
#[case("r 10000000000000000", "address is not a 64-bit hexadecimal value")]
#[case("r 12 34", "unexpected fields after address")]
fn rejects_malformed_records(#[case] line: &str, #[case] reason: &str) {
    assert_eq!(TraceRecord::parse(line), Err(reason));
}

#[test]
fn address_prefix_is_optional() {
    assert_eq!(parse_address("abc"), Some(0xABC));
    assert_eq!(parse_address("0xabc"), Some(0xABC));
    assert_eq!(parse_address("0Xabc"), Some(0xABC));
    assert_eq!(parse_address("xabc"), None);
    assert_eq!(parse_address(""), None);
}

#[test]
fn reader_skips_blank_lines_and_numbers_from_one() {
    let trace = "r 0\n\n   \nw 4\nbogus\nr 8\n";
    let items: Vec<_> = TraceReader::new(Cursor::new(trace)).collect();

    assert_eq!(items.len(), 4);
    assert_eq!(
        items[0].as_ref().ok(),
        Some(&TraceRecord::new(AccessType::Read, 0))
    );
    assert_eq!(
        items[1].as_ref().ok(),
        Some(&TraceRecord::new(AccessType::Write, 4))
    );
    match &items[2] {
        Err(TraceError::Malformed { line, record, .. }) => {
            assert_eq!(*line, 5);
            assert_eq!(record, "bogus");
        }
        other => panic!("expected malformed record, got {other:?}"),
    }
    assert!(items[3].is_ok());
}

#[test]
fn reader_handles_crlf_and_missing_final_newline() {
    let records: Vec<_> = TraceReader::new(Cursor::new("r 10\r\nw 20"))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        records,
        vec![
            TraceRecord::new(AccessType::Read, 0x10),
            TraceRecord::new(AccessType::Write, 0x20),
        ]
    );
}

/// Yields one good line, then fails every read.
struct FailingReader {
    served: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::other("device gone"));
        }
        self.served = true;
        let line = b"r 0\n";
        buf[..line.len()].copy_from_slice(line);
        Ok(line.len())
    }
}

#[test]
fn reader_stops_after_io_error() {
    let mut trace = TraceReader::new(io::BufReader::new(FailingReader { served: false }));

    assert!(matches!(trace.next(), Some(Ok(_))));
    assert!(matches!(
        trace.next(),
        Some(Err(TraceError::Io { line: 1, .. }))
    ));
    assert!(trace.next().is_none());
    assert_eq!(trace.line(), 1);
}

#[test]
fn reader_is_usable_with_any_bufread() {
    fn count<R: BufRead>(reader: R) -> usize {
        TraceReader::new(reader).filter(Result::is_ok).count()
    }
    assert_eq!(count(Cursor::new(b"r 1\nw 2\n".to_vec())), 2);
    assert_eq!(count(io::empty()), 0);
}

#[test]
fn invalid_utf8_line_is_malformed_not_fatal() {
    let trace: &[u8] = b"r 0\n\xff\xfe garbage\nw 4\n";
    let items: Vec<_> = TraceReader::new(Cursor::new(trace)).collect();

    assert_eq!(items.len(), 3);
    assert!(matches!(
        &items[1],
        Err(TraceError::Malformed {
            line: 2,
            reason: "record is not valid UTF-8",
            ..
        })
    ));
    assert_eq!(
        items[2].as_ref().ok(),
        Some(&TraceRecord::new(AccessType::Write, 4))
    );
}
