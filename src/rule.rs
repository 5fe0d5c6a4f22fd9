use {
    crate::{bits, Error, Result},
    docext::docext,
    rand::{rngs::StdRng, Rng, SeedableRng},
};

/// How many rule tables are sampled before giving up on finding one with an
/// acceptable Z_right.
pub const RULE_GEN_CUTOFF: usize = 100;

/// A chain-rule table: the total function from k-bit neighborhoods to output
/// bits that drives the automaton.
///
/// The table is stored as one output bit per neighborhood, indexed by the
/// integer value of the neighborhood read left to right (the leftmost cell is
/// the most significant bit). Lookups during stepping are therefore a single
/// indexed load.
///
/// Every table constructed by this module satisfies Z_left = 1: for each
/// (k−1)-bit prefix p, the outputs of `p·0` and `p·1` differ. Because a
/// prefix and an output bit then pin down the final neighborhood bit
/// uniquely, the automaton can be run backwards by chain propagation (see
/// [`Automaton::step_backward`](crate::Automaton::step_backward)). Tables
/// built from raw bits are validated against the same pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    k: usize,
    out: Vec<u8>,
}

impl RuleTable {
    /// Draw a rule table with Z_left = 1.
    ///
    /// For each (k−1)-bit prefix one fair bit decides which of `p·0`, `p·1`
    /// outputs 0 and which outputs 1. The neighborhood size must be odd (the
    /// neighborhood is centered on the updated cell) and at least 1.
    pub fn random<R: Rng + ?Sized>(k: usize, rng: &mut R) -> Result<Self> {
        check_neighborhood(k)?;
        let mut out = Vec::with_capacity(1 << k);
        for _ in 0..1usize << (k - 1) {
            let bit = rng.gen_range(0..=1u8);
            out.push(bit);
            out.push(1 - bit);
        }
        Ok(Self { k, out })
    }

    /// Draw rule tables from `rng` until one has Z_right ≥ 0.5, giving up
    /// after [`RULE_GEN_CUTOFF`] attempts.
    pub fn random_reversible<R: Rng + ?Sized>(k: usize, rng: &mut R) -> Result<Self> {
        for _ in 0..RULE_GEN_CUTOFF {
            let table = Self::random(k, rng)?;
            if table.z_right() >= 0.5 {
                return Ok(table);
            }
        }
        Err(Error::RuleGenExhausted(RULE_GEN_CUTOFF))
    }

    /// Like [`RuleTable::random_reversible`], but reproducible: each attempt
    /// seeds a fresh [`StdRng`], and the seed advances by 1024 between
    /// attempts so that retries do not redraw the same table.
    pub fn random_reversible_seeded(k: usize, seed: u64) -> Result<Self> {
        let mut seed = seed;
        for _ in 0..RULE_GEN_CUTOFF {
            let table = Self::random(k, &mut StdRng::seed_from_u64(seed))?;
            if table.z_right() >= 0.5 {
                return Ok(table);
            }
            seed = seed.wrapping_add(1024);
        }
        Err(Error::RuleGenExhausted(RULE_GEN_CUTOFF))
    }

    /// Reconstruct a table from its output bits in index order, as stored in
    /// a key file.
    ///
    /// Fails unless there are exactly 2^k binary values and every even/odd
    /// index pair differs (the Z_left = 1 pairing the backward step depends
    /// on).
    pub fn from_output_bits(k: usize, out: Vec<u8>) -> Result<Self> {
        check_neighborhood(k)?;
        if out.len() != 1 << k {
            return Err(Error::LengthMismatch {
                left: out.len(),
                right: 1 << k,
            });
        }
        bits::ensure_binary(&out)?;
        if out.chunks_exact(2).any(|pair| pair[0] == pair[1]) {
            return Err(Error::InvalidArgument(
                "rule table is not left-reversible".into(),
            ));
        }
        Ok(Self { k, out })
    }

    /// The fraction of right (k−1)-bit suffixes s whose pair `0·s`, `1·s`
    /// produces distinct outputs.
    ///
    /// $$Z_{right} = \frac{2 \cdot |\{s : R(0 \cdot s) \neq R(1 \cdot s)\}|}{2^k}$$
    ///
    /// Z_right does not affect reversibility (Z_left = 1 alone makes the
    /// backward chain deterministic) but acts as a confusion gate: rules with
    /// low Z_right produce forward dynamics too close to a plain shift to be
    /// worth encrypting with. A well-formed key requires Z_right ≥ 0.5.
    #[docext]
    pub fn z_right(&self) -> f64 {
        let suffixes = 1 << (self.k - 1);
        let distinct = (0..suffixes)
            .filter(|&s| self.out[s] != self.out[suffixes + s])
            .count();
        (2 * distinct) as f64 / (2 * suffixes) as f64
    }

    /// The output bit for a neighborhood, given as the integer value of its
    /// cells read left to right.
    #[inline]
    pub fn output(&self, neighborhood: usize) -> u8 {
        self.out[neighborhood]
    }

    /// The neighborhood size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The output bits in index order, the canonical serialization: for each
    /// prefix p in ascending order, the output of `p·0` then of `p·1`.
    pub fn output_bits(&self) -> &[u8] {
        &self.out
    }
}

fn check_neighborhood(k: usize) -> Result<()> {
    if k < 1 {
        return Err(Error::InvalidArgument(
            "neighborhood size must be at least 1".into(),
        ));
    }
    if k % 2 == 0 {
        return Err(Error::InvalidArgument(format!(
            "neighborhood size must be odd, got {k}"
        )));
    }
    // The table holds 2^k outputs and the stepping window is a k-bit integer.
    if k >= usize::BITS as usize {
        return Err(Error::InvalidArgument(format!(
            "neighborhood size {k} is too large"
        )));
    }
    Ok(())
}
