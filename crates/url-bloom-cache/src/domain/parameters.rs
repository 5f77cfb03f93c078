//! Sizing arithmetic for Bloom filters
//!
//! With `m` bits, `k` hash functions and `n` inserted items:
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | false positive rate | `(1 - e^(-kn/m))^k` |
//! | bits for a target rate `p` | `m = -n ln(p) / ln(2)^2` |
//! | best hash count | `k = (m / n) ln(2)` |
//! | items behind `X` set bits | `n = -(m / k) ln(1 - X / m)` |

use std::f64::consts::LN_2;

/// Largest number of hash functions a filter accepts
pub const MAX_HASH_COUNT: usize = 32;

/// Derived filter shape
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    pub size_bits: usize,
    pub hash_count: usize,
    /// Rate the shape reaches at the capacity it was derived for
    pub expected_fpr: f64,
}

impl BloomFilterParams {
    /// Bits available per expected element
    pub fn bits_per_element(&self, num_elements: usize) -> f64 {
        if num_elements == 0 {
            return f64::INFINITY;
        }
        self.size_bits as f64 / num_elements as f64
    }
}

/// Smallest shape holding `num_elements` items at or below `target_fpr`
///
/// `num_elements == 0` yields the one-bit, one-hash shape.
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomFilterParams {
    if num_elements == 0 {
        return BloomFilterParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let size_bits = minimum_bits(num_elements, target_fpr).max(1);
    let hash_count = optimal_k(size_bits, num_elements);

    BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr: calculate_fpr(size_bits, num_elements, hash_count),
    }
}

/// Expected false positive rate; a zero-size filter always answers true
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let load = k as f64 * n as f64 / m as f64;
    (1.0 - (-load).exp()).powi(k as i32)
}

/// Hash count minimizing the false positive rate, within `1..=MAX_HASH_COUNT`
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = (m as f64 / n as f64 * LN_2).round() as usize;
    k.clamp(1, MAX_HASH_COUNT)
}

/// Bits needed for `n` items at `target_fpr` with the best hash count
pub fn minimum_bits(n: usize, target_fpr: f64) -> usize {
    (n as f64 * -target_fpr.ln() / (LN_2 * LN_2)).ceil() as usize
}

/// Distinct items likely behind `bits_set` set bits
///
/// Saturates to infinity once every bit is set.
pub fn estimate_elements(m: usize, k: usize, bits_set: usize) -> f64 {
    match (m, k) {
        (0, _) | (_, 0) => 0.0,
        _ if bits_set >= m => f64::INFINITY,
        _ => {
            let m = m as f64;
            -(m / k as f64) * (1.0 - bits_set as f64 / m).ln()
        }
    }
}
