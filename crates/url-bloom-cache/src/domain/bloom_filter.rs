//! Membership filter over a packed bit array
//!
//! INVARIANTS:
//! - The bit array length is fixed at construction; every index is `< m`.
//! - Bits are only ever set, never cleared.
//! - After `insert(x)`, `contains(x)` is true for the lifetime of the filter.

use bitvec::prelude::*;
use tracing::debug;

use super::config::FilterConfig;
use super::hash_functions::HashBank;
use super::parameters::{calculate_fpr, estimate_elements};
use crate::error::FilterError;

/// Fixed-size Bloom filter
///
/// Answers "definitely absent" or "possibly present". The answer for an
/// inserted item is always "possibly present".
#[derive(Clone, Debug)]
pub struct BloomFilter {
    bits: BitVec<u8, Lsb0>,
    hash_bank: HashBank,
    /// m
    m: usize,
    /// Insert calls so far, duplicates included
    n: usize,
}

impl BloomFilter {
    /// `m`-bit filter over the reference bank (Murmur3, SHA-256, DJB2)
    ///
    /// Fails if `m` is 0.
    pub fn new(m: usize) -> Result<Self, FilterError> {
        Self::with_hash_bank(m, HashBank::standard())
    }

    pub fn with_hash_bank(m: usize, hash_bank: HashBank) -> Result<Self, FilterError> {
        if m == 0 {
            return Err(FilterError::InvalidSize { size: m });
        }

        debug!(size_bits = m, hash_bank = %hash_bank, "creating bloom filter");

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; m],
            hash_bank,
            m,
            n: 0,
        })
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        let hash_bank = config.hash_bank()?;
        Self::with_hash_bank(config.size_bits, hash_bank)
    }

    /// Set the `k` bits of `element`
    pub fn insert(&mut self, element: &[u8]) {
        let indices = self.hash_bank.indices(element, self.m);
        for index in indices {
            self.bits.set(index, true);
        }
        self.n += 1;
    }

    /// `false` means `element` was never inserted; `true` may be a false positive
    pub fn contains(&self, element: &[u8]) -> bool {
        let indices = self.hash_bank.indices(element, self.m);
        indices.into_iter().all(|index| self.bits[index])
    }

    /// Union `other` into this filter
    ///
    /// Both filters must share `m` and the hash bank.
    pub fn merge(&mut self, other: &BloomFilter) -> Result<(), FilterError> {
        if self.m != other.m {
            return Err(FilterError::IncompatibleFilters(format!(
                "size mismatch: {} bits vs {} bits",
                self.m, other.m
            )));
        }
        if self.hash_bank != other.hash_bank {
            return Err(FilterError::IncompatibleFilters(format!(
                "hash bank mismatch: {} vs {}",
                self.hash_bank, other.hash_bank
            )));
        }

        self.bits |= other.bits.as_bitslice();
        self.n += other.n;
        Ok(())
    }

    /// `(1 - e^(-kn/m))^k` for the current insert count
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.hash_count())
    }

    /// Distinct-item estimate from the number of set bits
    pub fn estimated_elements(&self) -> f64 {
        estimate_elements(self.m, self.hash_count(), self.bits_set())
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in [0, 1]
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.m as f64
    }

    pub fn size_bits(&self) -> usize {
        self.m
    }

    pub fn hash_count(&self) -> usize {
        self.hash_bank.hash_count()
    }

    pub fn elements_inserted(&self) -> usize {
        self.n
    }

    pub fn hash_bank(&self) -> &HashBank {
        &self.hash_bank
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    pub fn bits(&self) -> &BitSlice<u8, Lsb0> {
        &self.bits
    }
}
