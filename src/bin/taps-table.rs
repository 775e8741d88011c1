//! Prints the magic tap constants for widths 3 through 64, one per line, in the form
//! expected by the correlation library's source array. The tap list is read from
//! `taps.txt` in the current directory; redirect stdout to capture the listing.

use std::fs::File;
use std::io::{self, BufReader};

use lfsr_taps::taps;

fn main() {
    env_logger::init();

    let file = File::open("taps.txt").expect("Unable to open taps.txt");
    taps::generate(BufReader::new(file), io::stdout().lock()).expect("Malformed tap table");
}
