//! Maximal-length LFSR tap tables for widths 3 through 64, plus the generator that
//! turns `taps.txt` into the magic-constant array embedded in the matrix correlation
//! library.

pub mod lfsr;
pub mod taps;
