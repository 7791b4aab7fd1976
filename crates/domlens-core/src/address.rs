//! Short unique element addresses.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Symbols an address is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default address length.
pub const DEFAULT_LENGTH: usize = 3;

/// Draws random addresses that are unique within one stamping pass.
///
/// Every issued address is remembered. A draw that collides is repeated,
/// and once half of the current address space is used up the length grows
/// by one symbol, so a draw always terminates quickly.
pub struct AddressGenerator {
    rng: StdRng,
    length: usize,
    issued: HashSet<String>,
}

impl AddressGenerator {
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, StdRng::from_os_rng())
    }

    /// Deterministic generator for reproducible output.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }

    fn with_rng(length: usize, rng: StdRng) -> Self {
        Self {
            rng,
            length: length.max(1),
            issued: HashSet::new(),
        }
    }

    /// Current address length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of addresses issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    /// Draw the next unused address.
    pub fn next_address(&mut self) -> String {
        if self.issued.len().saturating_mul(2) >= capacity(self.length) {
            self.length += 1;
            debug!(
                "Address space half used after {} addresses, growing length to {}",
                self.issued.len(),
                self.length
            );
        }

        loop {
            let candidate = self.draw();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn draw(&mut self) -> String {
        (0..self.length)
            .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for AddressGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

/// Number of distinct addresses of `length` symbols, saturating.
fn capacity(length: usize) -> usize {
    let exponent = u32::try_from(length).unwrap_or(u32::MAX);
    ALPHABET.len().saturating_pow(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_use_alphabet_and_length() {
        let mut generator = AddressGenerator::seeded(3, 7);
        for _ in 0..100 {
            let address = generator.next_address();
            assert_eq!(address.len(), 3);
            assert!(address.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_addresses_are_unique() {
        let mut generator = AddressGenerator::seeded(2, 1);
        let mut seen = HashSet::new();
        for _ in 0..3000 {
            assert!(seen.insert(generator.next_address()));
        }
        assert_eq!(generator.issued(), 3000);
    }

    #[test]
    fn test_length_grows_at_half_capacity() {
        let mut generator = AddressGenerator::seeded(1, 3);
        for _ in 0..31 {
            assert_eq!(generator.next_address().len(), 1);
        }
        assert_eq!(generator.next_address().len(), 2);
        assert_eq!(generator.length(), 2);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = AddressGenerator::seeded(3, 42);
        let mut b = AddressGenerator::seeded(3, 42);
        let first: Vec<_> = (0..10).map(|_| a.next_address()).collect();
        let second: Vec<_> = (0..10).map(|_| b.next_address()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_length_is_clamped() {
        let mut generator = AddressGenerator::seeded(0, 9);
        assert_eq!(generator.next_address().len(), 1);
    }

    #[test]
    fn test_capacity_saturates() {
        assert_eq!(capacity(1), 62);
        assert_eq!(capacity(3), 238_328);
        assert_eq!(capacity(64), usize::MAX);
    }
}
