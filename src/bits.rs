//! Small helpers for sequences of bits.
//!
//! Throughout this crate a bit sequence is a slice of `u8` values constrained
//! to 0 and 1. The helpers here fail with [`Error::NonBinary`] rather than
//! silently accepting other values.

use {
    crate::{Error, Result},
    docext::docext,
};

/// Left-pad a bit sequence with zeros to the given width.
///
/// Fails if the input is already longer than `width`.
pub fn pad_left_zeros(bits: &[u8], width: usize) -> Result<Vec<u8>> {
    if bits.len() > width {
        return Err(Error::InvalidArgument(format!(
            "input of length {} is larger than the padded length {width}",
            bits.len()
        )));
    }
    ensure_binary(bits)?;
    let mut padded = vec![0; width - bits.len()];
    padded.extend_from_slice(bits);
    Ok(padded)
}

/// Elementwise XOR of two equal-length bit sequences.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    ensure_binary(a)?;
    ensure_binary(b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// Expand bytes into bits, most significant bit first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Pack bits back into bytes, most significant bit first.
///
/// The inverse of [`bytes_to_bits`]. Fails unless the length is a multiple of
/// 8 and every value is binary.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(Error::RaggedBytes(bits.len()));
    }
    ensure_binary(bits)?;
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0, |byte, bit| (byte << 1) | bit))
        .collect())
}

/// Binary Shannon entropy of a bit sequence, together with the metric entropy
/// (the entropy divided by the sequence length).
///
/// $$S = -\sum_{i \in \{0,1\}} p(i) \log_2 p(i)$$
///
/// where $p(i)$ is the frequency of the value $i$ in the sequence. A constant
/// sequence has entropy 0 (the $0 \log_2 0$ term is taken as 0); a balanced
/// sequence reaches the 1-bit ceiling.
#[docext]
pub fn shannon_entropy(bits: &[u8]) -> Result<(f64, f64)> {
    ensure_binary(bits)?;
    if bits.is_empty() {
        return Err(Error::InvalidArgument(
            "cannot take the entropy of an empty sequence".into(),
        ));
    }
    let ones = bits.iter().filter(|&&b| b == 1).count() as f64;
    let len = bits.len() as f64;
    let term = |p: f64| if p == 0.0 { 0.0 } else { p * p.log2() };
    let entropy = -(term(ones / len) + term(1.0 - ones / len));
    Ok((entropy, entropy / len))
}

pub(crate) fn ensure_binary(bits: &[u8]) -> Result<()> {
    match bits.iter().find(|&&b| b > 1) {
        Some(&b) => Err(Error::NonBinary(b)),
        None => Ok(()),
    }
}
