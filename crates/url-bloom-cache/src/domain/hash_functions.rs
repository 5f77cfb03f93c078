//! Hash bank for the Bloom filter
//!
//! A hash bank is a fixed, ordered list of `k` deterministic hash functions,
//! each mapping an arbitrary byte string to an index in `[0, m)`. The bank is
//! chosen once when a filter is built and never changes afterwards.
//!
//! Three families are available:
//! - rolling hashes (`Polynomial`, `Djb2`, `ShiftAddXor`)
//! - well-mixing 64-bit hashes (`Murmur3`, `SipHash13`)
//! - a cryptographic digest reduced by big-integer modulo (`Sha256`)
//!
//! All reductions are unsigned, so every index is valid for the bit array.

use std::fmt;
use std::hash::Hasher;
use std::io::Cursor;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use siphasher::sip::SipHasher13;

use crate::error::FilterError;

/// Fixed SipHash keys. Indices must be stable across process restarts.
const SIP_KEY0: u64 = 0x0706_0504_0302_0100;
const SIP_KEY1: u64 = 0x0f0e_0d0c_0b0a_0908;

const POLYNOMIAL_BASE: u128 = 31;
const DJB2_SEED: u64 = 5381;
const SHIFT_ADD_XOR_SEED: u64 = 17;

/// A single deterministic hash function of the bank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// Polynomial rolling hash with base 31, reduced modulo `m` at every step
    Polynomial,
    /// DJB2: `h = h * 33 + byte`, starting at 5381
    Djb2,
    /// Shift-add-xor: `h ^= (h << 5) + (h >> 2) + byte`, starting at 17
    ShiftAddXor,
    /// MurmurHash3 x64/128, low 64 bits
    Murmur3 { seed: u32 },
    /// SipHash-1-3 with fixed keys
    SipHash13 { key0: u64, key1: u64 },
    /// SHA-256 digest taken as a 256-bit big-endian integer, modulo `m`
    Sha256,
}

impl HashFunction {
    /// SipHash-1-3 with the bank's default keys
    pub const fn sip_default() -> Self {
        HashFunction::SipHash13 {
            key0: SIP_KEY0,
            key1: SIP_KEY1,
        }
    }

    /// Map `element` to an index in `[0, m)`
    ///
    /// # Panics
    ///
    /// Panics if `m` is 0. [`BloomFilter`](crate::BloomFilter) rejects a zero
    /// size at construction, so filter operations never reach this.
    pub fn index(&self, element: &[u8], m: usize) -> usize {
        assert!(m > 0, "bit array size must be non-zero");
        let m = m as u64;

        let reduced = match *self {
            HashFunction::Polynomial => polynomial_hash(element, m),
            HashFunction::Djb2 => djb2_hash(element) % m,
            HashFunction::ShiftAddXor => shift_add_xor_hash(element) % m,
            HashFunction::Murmur3 { seed } => murmur_hash(element, seed) % m,
            HashFunction::SipHash13 { key0, key1 } => sip_hash(element, key0, key1) % m,
            HashFunction::Sha256 => sha256_mod(element, m),
        };

        reduced as usize
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFunction::Polynomial => write!(f, "polynomial"),
            HashFunction::Djb2 => write!(f, "djb2"),
            HashFunction::ShiftAddXor => write!(f, "shift-add-xor"),
            HashFunction::Murmur3 { seed } => write!(f, "murmur3(seed={seed})"),
            HashFunction::SipHash13 { key0, key1 } => {
                write!(f, "siphash13(key0={key0:#x}, key1={key1:#x})")
            }
            HashFunction::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Polynomial rolling hash, kept below `m` after every byte
pub fn polynomial_hash(element: &[u8], m: u64) -> u64 {
    let m = m as u128;
    let mut hash: u128 = 0;
    for &byte in element {
        hash = (hash * POLYNOMIAL_BASE + byte as u128) % m;
    }
    hash as u64
}

/// DJB2 with wrapping 64-bit arithmetic
pub fn djb2_hash(element: &[u8]) -> u64 {
    element.iter().fold(DJB2_SEED, |hash, &byte| {
        hash.wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(byte as u64)
    })
}

/// Shift-add-xor hash with wrapping 64-bit arithmetic
pub fn shift_add_xor_hash(element: &[u8]) -> u64 {
    element.iter().fold(SHIFT_ADD_XOR_SEED, |hash, &byte| {
        hash ^ hash
            .wrapping_shl(5)
            .wrapping_add(hash >> 2)
            .wrapping_add(byte as u64)
    })
}

/// Hash an element with MurmurHash3 using a seed
pub fn murmur_hash(element: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(element);

    // Use murmur3 128-bit hash and take the lower 64 bits
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// SipHash-1-3 of an element
pub fn sip_hash(element: &[u8], key0: u64, key1: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(key0, key1);
    hasher.write(element);
    hasher.finish()
}

/// SHA-256 digest reduced modulo `m` as an unsigned big integer
///
/// Horner's rule over the digest bytes keeps every intermediate below `m`.
pub fn sha256_mod(element: &[u8], m: u64) -> u64 {
    let digest = Sha256::digest(element);
    let m = m as u128;
    let mut rem: u128 = 0;
    for &byte in digest.iter() {
        rem = ((rem << 8) | byte as u128) % m;
    }
    rem as u64
}

/// Compute k hash positions for an element
///
/// Uses double hashing technique: h(i) = h1 + i * h2
/// This is more efficient than computing k independent hashes.
pub fn compute_hash_positions(element: &[u8], k: usize, m: usize) -> Vec<usize> {
    let h1 = murmur_hash(element, 0);
    let h2 = murmur_hash(element, 1);

    (0..k)
        .map(|i| {
            let hash = h1.wrapping_add((i as u64).wrapping_mul(h2));
            (hash % m as u64) as usize
        })
        .collect()
}

/// How a [`HashBank`] is assembled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashStrategy {
    /// Murmur3, SHA-256, DJB2, SipHash, polynomial, shift-add-xor
    #[default]
    Standard,
    /// Polynomial, DJB2, shift-add-xor
    Rolling,
    /// Kirsch-Mitzenmacher double hashing over two Murmur3 base hashes
    DoubleHashing,
}

impl HashStrategy {
    /// Hash functions a bank of this strategy starts with, in order
    fn families(self) -> &'static [HashFunction] {
        const STANDARD: [HashFunction; 6] = [
            HashFunction::Murmur3 { seed: 0 },
            HashFunction::Sha256,
            HashFunction::Djb2,
            HashFunction::sip_default(),
            HashFunction::Polynomial,
            HashFunction::ShiftAddXor,
        ];
        const ROLLING: [HashFunction; 3] = [
            HashFunction::Polynomial,
            HashFunction::Djb2,
            HashFunction::ShiftAddXor,
        ];

        match self {
            HashStrategy::Standard => &STANDARD,
            HashStrategy::Rolling => &ROLLING,
            HashStrategy::DoubleHashing => &[],
        }
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashStrategy::Standard => "standard",
            HashStrategy::Rolling => "rolling",
            HashStrategy::DoubleHashing => "double-hashing",
        };
        f.write_str(name)
    }
}

impl FromStr for HashStrategy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(HashStrategy::Standard),
            "rolling" => Ok(HashStrategy::Rolling),
            "double-hashing" | "double_hashing" | "double" => Ok(HashStrategy::DoubleHashing),
            other => Err(FilterError::InvalidConfig(format!(
                "unknown hash strategy {other:?} (expected standard, rolling or double-hashing)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BankKind {
    Independent(Vec<HashFunction>),
    DoubleHashing { k: usize },
}

/// Fixed ordered collection of `k` hash functions
///
/// The bank is stateless and can be shared freely between filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashBank {
    kind: BankKind,
}

impl HashBank {
    /// The reference bank: Murmur3, SHA-256 and DJB2
    pub fn standard() -> Self {
        Self {
            kind: BankKind::Independent(HashStrategy::Standard.families()[..3].to_vec()),
        }
    }

    /// Build a bank of `k` functions following `strategy`
    ///
    /// When `k` exceeds the strategy's family list, the extra positions
    /// alternate between Murmur3 and SipHash keyed by the position, so no two
    /// functions of the bank coincide.
    pub fn from_strategy(strategy: HashStrategy, k: usize) -> Result<Self, FilterError> {
        if k == 0 {
            return Err(FilterError::EmptyHashBank);
        }

        if strategy == HashStrategy::DoubleHashing {
            return Ok(Self {
                kind: BankKind::DoubleHashing { k },
            });
        }

        let families = strategy.families();
        let functions = (0..k)
            .map(|i| match families.get(i) {
                Some(function) => *function,
                None if i % 2 == 0 => HashFunction::Murmur3 { seed: i as u32 },
                None => HashFunction::SipHash13 {
                    key0: SIP_KEY0.wrapping_add(i as u64),
                    key1: SIP_KEY1,
                },
            })
            .collect();

        Ok(Self {
            kind: BankKind::Independent(functions),
        })
    }

    /// Build a bank from an explicit list of functions
    pub fn from_functions(functions: Vec<HashFunction>) -> Result<Self, FilterError> {
        if functions.is_empty() {
            return Err(FilterError::EmptyHashBank);
        }
        Ok(Self {
            kind: BankKind::Independent(functions),
        })
    }

    /// Number of hash functions (k)
    pub fn hash_count(&self) -> usize {
        match &self.kind {
            BankKind::Independent(functions) => functions.len(),
            BankKind::DoubleHashing { k } => *k,
        }
    }

    /// The independent functions of this bank, or `None` for double hashing
    pub fn functions(&self) -> Option<&[HashFunction]> {
        match &self.kind {
            BankKind::Independent(functions) => Some(functions),
            BankKind::DoubleHashing { .. } => None,
        }
    }

    /// Whether this bank derives its indices by double hashing
    pub fn is_double_hashing(&self) -> bool {
        matches!(self.kind, BankKind::DoubleHashing { .. })
    }

    /// Compute the `k` indices of `element` in a bit array of `m` bits
    ///
    /// # Panics
    ///
    /// Panics if `m` is 0.
    pub fn indices(&self, element: &[u8], m: usize) -> Vec<usize> {
        assert!(m > 0, "bit array size must be non-zero");
        match &self.kind {
            BankKind::Independent(functions) => functions
                .iter()
                .map(|function| function.index(element, m))
                .collect(),
            BankKind::DoubleHashing { k } => compute_hash_positions(element, *k, m),
        }
    }
}

impl Default for HashBank {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for HashBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BankKind::Independent(functions) => {
                f.write_str("[")?;
                for (i, function) in functions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{function}")?;
                }
                f.write_str("]")
            }
            BankKind::DoubleHashing { k } => write!(f, "double-hashing(k={k})"),
        }
    }
}
