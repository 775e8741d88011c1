//! Parsing of the tap table and generation of the magic-constant listing.
//!
//! The tap table is a plain-text file of two-line records: a decimal register width on
//! the first line and a comma-separated list of 1-based tap positions on the second.
//! Widths must run 3,4,...,64 in strict sequence. Each record collapses to a single
//! 64-bit "magic" bitmask with bit `t - 1` set for every tap `t`, emitted as a C
//! unsigned-long literal for pasting into the correlation library's source array.

use std::io::{self, BufRead, ErrorKind, Write};
use std::num::ParseIntError;

use log::{debug, trace};
use thiserror::Error;

/// Lowest register width covered by the tap table.
pub const MIN_WIDTH: u32 = 3;

/// Highest register width covered by the tap table.
pub const MAX_WIDTH: u32 = 64;

/// Number of records in a complete tap table.
pub const NUM_RECORDS: usize = (MAX_WIDTH - MIN_WIDTH + 1) as usize;

/// Errors that can result from reading a tap table.
#[derive(Debug, Error)]
pub enum TapsError {
    /// The width declared by a record did not match the expected position in the
    /// 3,4,...,64 sequence. The input file is corrupted or reordered.
    #[error("Expected width {expected}, input declared width {found}")]
    FormatMismatch {
        /// The width required at this point in the sequence.
        expected: u32,
        /// The width the input actually declared.
        found: u32,
    },
    /// A width line or tap field could not be parsed as an integer.
    #[error("Invalid integer {text:?} in tap table")]
    ParseError {
        /// The offending field, trimmed.
        text: String,
        #[source]
        source: ParseIntError,
    },
    /// A tap position fell outside `[1, width]` for its record.
    #[error("Tap position {tap} out of range for width {width}")]
    TapOutOfRange {
        /// The record's register width.
        width: u32,
        /// The out-of-range tap position.
        tap: u32,
    },
    /// The input ended before all 62 records were read.
    #[error("Unexpected end of tap table")]
    UnexpectedEof,
    /// A general IO error was encountered.
    #[error("Error while reading tap table: {0:?}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for TapsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof => TapsError::UnexpectedEof,
            _ => TapsError::Io(err),
        }
    }
}

/// A single width/tap-positions record from the tap table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TapRecord {
    width: u32,
    taps: Vec<u32>,
}

impl TapRecord {
    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Tap positions, 1-based from the low end of the register.
    pub fn taps(&self) -> &[u32] {
        &self.taps
    }

    /// Collapses the tap positions into the magic bitmask: bit `t - 1` is set for every
    /// tap `t`. Accumulated with OR rather than addition so a duplicate tap in
    /// ill-formed input cannot carry into unrelated bit positions.
    pub fn magic(&self) -> u64 {
        self.taps.iter().fold(0u64, |magic, &t| magic | 1 << (t - 1))
    }
}

fn parse_int(text: &str) -> Result<u32, TapsError> {
    let text = text.trim();
    text.parse().map_err(|source| TapsError::ParseError {
        text: text.to_owned(),
        source,
    })
}

fn next_line<R: BufRead>(lines: &mut io::Lines<R>) -> Result<String, TapsError> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(TapsError::UnexpectedEof),
    }
}

/// Parses one two-line record, checking the declared width against `expected` and
/// range-checking every tap position.
pub fn parse_record(
    width_line: &str,
    taps_line: &str,
    expected: u32,
) -> Result<TapRecord, TapsError> {
    let width = parse_int(width_line)?;
    if width != expected {
        return Err(TapsError::FormatMismatch {
            expected,
            found: width,
        });
    }
    let taps = taps_line
        .split(',')
        .map(parse_int)
        .collect::<Result<Vec<_>, _>>()?;
    for &tap in &taps {
        if tap < 1 || tap > width {
            return Err(TapsError::TapOutOfRange { width, tap });
        }
    }
    trace!("width {}: taps {:?}", width, taps);
    Ok(TapRecord { width, taps })
}

/// Reads a complete tap table: 62 records with widths 3..=64 in strict sequence.
pub fn parse_table<R: BufRead>(input: R) -> Result<Vec<TapRecord>, TapsError> {
    let mut lines = input.lines();
    let mut records = Vec::with_capacity(NUM_RECORDS);
    for width in MIN_WIDTH..=MAX_WIDTH {
        let width_line = next_line(&mut lines)?;
        let taps_line = next_line(&mut lines)?;
        records.push(parse_record(&width_line, &taps_line, width)?);
    }
    Ok(records)
}

/// Formats a magic value as one line of the correlation library's constant array: four
/// leading spaces, 16 zero-padded lowercase hex digits, C unsigned-long suffix.
pub fn format_magic(magic: u64) -> String {
    format!("    {:#018x}ul,", magic)
}

/// Runs the tap-table generator: reads 62 records from `input` and writes one formatted
/// constant line to `out` per record, as each record is parsed. Lines already written
/// stay written if a later record fails.
pub fn generate<R: BufRead, W: Write>(input: R, mut out: W) -> Result<(), TapsError> {
    let mut lines = input.lines();
    for width in MIN_WIDTH..=MAX_WIDTH {
        let width_line = next_line(&mut lines)?;
        let taps_line = next_line(&mut lines)?;
        let record = parse_record(&width_line, &taps_line, width)?;
        let magic = record.magic();
        debug!("width {}: magic {:#018x}", width, magic);
        writeln!(out, "{}", format_magic(magic))?;
    }
    Ok(())
}
