//! Maximal-length linear-feedback shift registers driven by the tap table.
//!
//! The magic bitmasks here are parsed from the embedded canonical `taps.txt`, so the
//! registers step through the same configurations the generated constant array gives
//! the correlation library.

use log::debug;
use once_cell::sync::Lazy;

use crate::taps::{self, MAX_WIDTH, MIN_WIDTH, NUM_RECORDS};

/// The canonical tap table, embedded from `taps.txt`.
static TAPS_TXT: &str = include_str!("../taps.txt");

/// Magic bitmasks for widths 3..=64, indexed by `width - 3`.
static MAGICS: Lazy<[u64; NUM_RECORDS]> = Lazy::new(|| {
    let records =
        taps::parse_table(TAPS_TXT.as_bytes()).expect("embedded taps.txt is well-formed");
    let mut magics = [0u64; NUM_RECORDS];
    for (slot, record) in magics.iter_mut().zip(&records) {
        *slot = record.magic();
    }
    magics
});

/// Looks up the maximal-length tap mask for a register width.
///
/// # Panics
/// If `width` is outside `3..=64`.
pub fn magic_for_width(width: u32) -> u64 {
    assert!(
        (MIN_WIDTH..=MAX_WIDTH).contains(&width),
        "No tap entry for width {}",
        width
    );
    MAGICS[(width - MIN_WIDTH) as usize]
}

/// A Fibonacci-configuration LFSR using the maximal-length taps for its width.
///
/// Each step shifts the register left by one and feeds the parity of the tapped
/// positions into the low bit, cycling through every nonzero `width`-bit state before
/// repeating.
#[derive(Clone, Debug)]
pub struct MaximalLfsr {
    state: u64,
    magic: u64,
    mask: u64,
}

impl MaximalLfsr {
    /// Creates an LFSR of the given width, seeded with the given starting state.
    ///
    /// # Panics
    /// If `width` is outside `3..=64`, or `seed` is zero or does not fit in `width`
    /// bits. The all-zero state is not part of the cycle and would lock the register.
    pub fn new(width: u32, seed: u64) -> Self {
        let magic = magic_for_width(width);
        let mask = u64::MAX >> (64 - width);
        assert!(seed != 0, "LFSR seed must be nonzero");
        assert!(
            seed & !mask == 0,
            "Seed {:#x} does not fit in {} bits",
            seed,
            width
        );
        MaximalLfsr { state: seed, magic, mask }
    }

    /// Current register state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the register one shift and returns the new state.
    pub fn step(&mut self) -> u64 {
        let feedback = ((self.state & self.magic).count_ones() & 1) as u64;
        self.state = ((self.state << 1) & self.mask) | feedback;
        self.state
    }
}

/// Produces every value in `1..modulus` exactly once per period, in pseudorandom order.
///
/// Wraps a [`MaximalLfsr`] of the smallest width whose cycle covers the range and skips
/// states outside it. Since the register never visits zero, the skip loop always
/// terminates and zero is never produced.
#[derive(Clone, Debug)]
pub struct MaximalLfsrMod {
    lfsr: MaximalLfsr,
    modulus: u64,
}

impl MaximalLfsrMod {
    /// Creates a generator over `1..modulus`.
    ///
    /// # Panics
    /// If `modulus < 2` (the range would be empty).
    pub fn new(modulus: u64) -> Self {
        assert!(modulus >= 2, "Modulus must be at least 2");
        // Smallest width with 2^width >= modulus, so all of 1..modulus are states.
        let width = MIN_WIDTH.max(64 - (modulus - 1).leading_zeros());
        debug!("modulus {}: using width-{} LFSR", modulus, width);
        MaximalLfsrMod {
            lfsr: MaximalLfsr::new(width, 1),
            modulus,
        }
    }

    /// Steps the register until it lands inside the range and returns it.
    pub fn next_value(&mut self) -> u64 {
        loop {
            let state = self.lfsr.step();
            if state < self.modulus {
                return state;
            }
        }
    }
}

impl Iterator for MaximalLfsrMod {
    type Item = u64;

    /// Never returns `None`; the sequence repeats after `modulus - 1` values.
    fn next(&mut self) -> Option<u64> {
        Some(self.next_value())
    }
}
