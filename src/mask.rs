/// The multiplier and increment of the "Even Quicker and Dirtier Generator"
/// from Numerical Recipes, ch. 7.1.
const MULTIPLIER: u32 = 1664525;
const INCREMENT: u32 = 1013904223;

/// The Even Quicker and Dirtier Generator, a 32-bit linear congruential
/// generator used to derive the noise mask that is XOR-ed into the plaintext
/// before the backward automaton run.
///
/// Each output bit is produced by advancing the congruence
///
/// ```text
/// s = (1664525 * s + 1013904223) mod 2^32
/// ```
///
/// recentering the state into the signed range by subtracting 2^31, and
/// emitting 1 when the recentered state is negative. The recentered value is
/// the state carried into the next iteration.
///
/// This is a quick and dirty generator and NOT a cryptographically secure
/// one; it is used here with that knowledge. Anyone holding the seed can
/// reproduce the stream, which is exactly what decryption does.
///
/// The stream is exposed the same way on every construction: two generators
/// built from the same seed yield identical bits.
///
/// # References
///
/// Press W.H., Teukolsky S.A., Vetterling W.T., Flannery B.P., "Numerical
/// Recipes in Fortran 77: The Art of Scientific Computing", 2nd ed.,
/// Cambridge University Press, p. 275-276.
#[derive(Debug, Clone)]
pub struct Eqadg {
    state: u32,
}

impl Eqadg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the congruence once and derive the next mask bit.
    pub fn next_bit(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            .wrapping_sub(1 << 31);
        ((self.state as i32) < 0) as u8
    }
}

impl Iterator for Eqadg {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_bit())
    }
}

/// The deterministic noise mask for a given seed: `len` bits drawn from
/// [`Eqadg`].
pub fn mask(seed: u32, len: usize) -> Vec<u8> {
    Eqadg::new(seed).take(len).collect()
}
