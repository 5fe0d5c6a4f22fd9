//! A reversible one-dimensional binary cellular automaton.
//!
//! The automaton updates a circular tape of cells synchronously: the next
//! value of each cell is the rule-table output for the k-cell neighborhood
//! centered on it. Running such an automaton *forward* is trivial; the point
//! of this module is running it *backward*, which is what encryption does
//! here. The plaintext is treated as the final state of the automaton, and
//! the ciphertext is the state T steps earlier.
//!
//! Backward stepping is possible because the rule tables are chain rules
//! (Z_left = 1, see [`RuleTable`]): once the leftmost k−1 cells of the
//! predecessor are guessed, every further cell is pinned down uniquely by the
//! known output, so a candidate predecessor can be grown left to right in one
//! pass and then checked against the circular boundary. One of the 2^(k−1)
//! prefix guesses reproduces a genuine predecessor whenever the tape has one.
//!
//! Not every tape has a predecessor. States produced by a forward step always
//! reverse; an arbitrary state (such as a masked plaintext) may turn out to
//! be a garden-of-eden state, in which case the backward step fails with
//! [`Error::Irreversible`] and the caller must try a different key or seed.
//!
//! The scheme follows Wuensche's chain-rule encryption construction:
//!
//! * Wuensche A., "Encryption using cellular automata chain-rules", in
//!   Adamatzky A.R., Alonso-Sanz R.A. (eds.), Automata-2008, Luniver Press.
//! * Wuensche A., Lesser M., "The Global Dynamics of Cellular Automata",
//!   Addison Wesley, 1992.

use {
    crate::{bits, mask, Error, Key, Result, RuleTable},
    log::debug,
    rand::Rng,
    std::{num::NonZeroU32, time::Instant},
};

/// The cellular automaton engine: a rule table, a step count, and the tape
/// buffers the steps work on.
///
/// Three tape roles coexist. `start` anchors the plaintext side, `end`
/// anchors the ciphertext side, and `work` is the buffer the individual steps
/// mutate. [`Automaton::run_forward`] reads `start` and writes `end`;
/// [`Automaton::run_backward`] reads `end` and writes `start`. Installing a
/// tape with [`Automaton::set_start`] or [`Automaton::set_end`] initializes
/// all three.
///
/// The mask seed is kept as an [`Option`] so that "no seed" is a state of the
/// type rather than a magic value; a seed of zero cannot be represented.
#[derive(Debug, Clone)]
pub struct Automaton {
    rules: RuleTable,
    steps: usize,
    mask_seed: Option<NonZeroU32>,
    start: Option<Vec<u8>>,
    end: Option<Vec<u8>>,
    work: Option<Vec<u8>>,
}

impl Automaton {
    /// Build an engine from a shared key.
    pub fn new(key: Key) -> Self {
        let (rules, steps) = key.into_parts();
        Self {
            rules,
            steps,
            mask_seed: None,
            start: None,
            end: None,
            work: None,
        }
    }

    /// Build an engine from a rule table and a step count (at least 1).
    pub fn with_rules(rules: RuleTable, steps: usize) -> Result<Self> {
        Ok(Self::new(Key::new(rules, steps)?))
    }

    /// Install the plaintext-side tape. The tape must be binary and at least
    /// as long as the rule neighborhood.
    pub fn set_start(&mut self, tape: Vec<u8>) -> Result<()> {
        self.set_tape(tape)
    }

    /// Install the ciphertext-side tape, under the same constraints as
    /// [`Automaton::set_start`].
    pub fn set_end(&mut self, tape: Vec<u8>) -> Result<()> {
        self.set_tape(tape)
    }

    fn set_tape(&mut self, tape: Vec<u8>) -> Result<()> {
        bits::ensure_binary(&tape)?;
        if tape.len() < self.rules.k() {
            return Err(Error::TapeTooShort {
                len: tape.len(),
                k: self.rules.k(),
            });
        }
        self.start = Some(tape.clone());
        self.end = Some(tape.clone());
        self.work = Some(tape);
        Ok(())
    }

    /// Fix the noise-mask seed.
    pub fn set_mask_seed(&mut self, seed: NonZeroU32) {
        self.mask_seed = Some(seed);
    }

    /// Draw a random noise-mask seed from the upper half of the 32-bit range
    /// and install it.
    pub fn random_mask_seed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NonZeroU32 {
        let seed = NonZeroU32::new(rng.gen_range(1u32 << 31..=u32::MAX))
            .unwrap_or_else(|| unreachable!());
        self.mask_seed = Some(seed);
        seed
    }

    /// Advance `work` by one synchronous step.
    ///
    /// Every output cell is the rule output for the k-cell window centered on
    /// it in the old tape, with indices taken modulo the tape length. The
    /// window is carried as a k-bit integer, shifted and masked once per
    /// cell.
    pub fn step_forward(&mut self) -> Result<()> {
        let work = self.work.as_ref().ok_or(Error::Unset("tape"))?;
        self.work = Some(advance(&self.rules, work));
        Ok(())
    }

    /// Replace `work` with its unique predecessor under the rules.
    ///
    /// For each guess of the predecessor's first k−1 cells, the remaining
    /// cells are forced one at a time: Z_left = 1 means exactly one of the
    /// two candidate neighborhoods `prev·0`, `prev·1` maps to the known
    /// output cell. After the pass the reconstruction overlaps itself across
    /// the circular boundary, and the guess is accepted only if the first and
    /// last k−1 cells agree at every position. The accepted reconstruction,
    /// trimmed of the (k−1)/2 overhang cells on each side, is the
    /// predecessor.
    ///
    /// Fails with [`Error::Irreversible`] when no guess closes the circle,
    /// which happens exactly when `work` has no pre-image under the rules.
    pub fn step_backward(&mut self) -> Result<()> {
        let work = self.work.as_ref().ok_or(Error::Unset("tape"))?;
        self.work = Some(retreat(&self.rules, work)?);
        Ok(())
    }

    /// Run the configured number of forward steps from `start`, leaving the
    /// result in `end`.
    pub fn run_forward(&mut self) -> Result<()> {
        self.run_forward_with(|_, _| Ok(()))
    }

    /// Like [`Automaton::run_forward`], with a per-step observer that
    /// receives the step index and the tape after that step.
    pub fn run_forward_with<F>(&mut self, mut observe: F) -> Result<()>
    where
        F: FnMut(usize, &[u8]) -> Result<()>,
    {
        let mut work = self.start.clone().ok_or(Error::Unset("start tape"))?;
        for i in 0..self.steps {
            let clock = Instant::now();
            work = advance(&self.rules, &work);
            debug!(
                "forward step {}/{} took {:.3}s",
                i + 1,
                self.steps,
                clock.elapsed().as_secs_f64()
            );
            observe(i, &work)?;
        }
        self.end = Some(work.clone());
        self.work = Some(work);
        Ok(())
    }

    /// Run the configured number of backward steps from `end`, leaving the
    /// result in `start`.
    pub fn run_backward(&mut self) -> Result<()> {
        self.run_backward_with(|_, _| Ok(()))
    }

    /// Like [`Automaton::run_backward`], with a per-step observer that
    /// receives the step index and the tape after that step.
    pub fn run_backward_with<F>(&mut self, mut observe: F) -> Result<()>
    where
        F: FnMut(usize, &[u8]) -> Result<()>,
    {
        let mut work = self.end.clone().ok_or(Error::Unset("end tape"))?;
        for i in 0..self.steps {
            let clock = Instant::now();
            work = retreat(&self.rules, &work)?;
            debug!(
                "reverse step {}/{} took {:.3}s",
                i + 1,
                self.steps,
                clock.elapsed().as_secs_f64()
            );
            observe(i, &work)?;
        }
        self.start = Some(work.clone());
        self.work = Some(work);
        Ok(())
    }

    /// XOR the `start` tape with the noise mask for the configured seed.
    pub fn xor_start(&mut self) -> Result<()> {
        let seed = self.mask_seed.ok_or(Error::Unset("mask seed"))?;
        let start = self.start.as_ref().ok_or(Error::Unset("start tape"))?;
        self.start = Some(bits::xor(start, &mask::mask(seed.get(), start.len()))?);
        Ok(())
    }

    /// XOR the `end` tape with the noise mask for the configured seed.
    pub fn xor_end(&mut self) -> Result<()> {
        let seed = self.mask_seed.ok_or(Error::Unset("mask seed"))?;
        let end = self.end.as_ref().ok_or(Error::Unset("end tape"))?;
        self.end = Some(bits::xor(end, &mask::mask(seed.get(), end.len()))?);
        Ok(())
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn mask_seed(&self) -> Option<NonZeroU32> {
        self.mask_seed
    }

    pub fn start(&self) -> Option<&[u8]> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&[u8]> {
        self.end.as_deref()
    }

    pub fn work(&self) -> Option<&[u8]> {
        self.work.as_deref()
    }
}

/// One forward step over a circular tape.
fn advance(rules: &RuleTable, tape: &[u8]) -> Vec<u8> {
    let n = tape.len();
    let k = rules.k();
    let half = (k - 1) / 2;
    let window_mask = (1usize << k) - 1;

    // Preload the k-1 cells left of the first window's rightmost cell; the
    // loop shifts in one new cell per output.
    let mut window = 0;
    for offset in 0..k - 1 {
        window = (window << 1) | tape[(n - half + offset) % n] as usize;
    }

    let mut next = Vec::with_capacity(n);
    for cell in 0..n {
        window = ((window << 1) | tape[(cell + half) % n] as usize) & window_mask;
        next.push(rules.output(window));
    }
    next
}

/// One backward step over a circular tape: guess-and-verify chain
/// propagation.
fn retreat(rules: &RuleTable, tape: &[u8]) -> Result<Vec<u8>> {
    let n = tape.len();
    let k = rules.k();
    let overlap = k - 1;
    let half = overlap / 2;
    let guesses = 1usize << overlap;
    let prefix_mask = guesses - 1;

    for guess in 0..guesses {
        // The reconstruction covers tape positions -half .. n-1+half; it
        // begins with the guessed prefix, most significant bit leftmost.
        let mut candidate = Vec::with_capacity(n + overlap);
        for shift in (0..overlap).rev() {
            candidate.push(((guess >> shift) & 1) as u8);
        }

        let mut prev = guess;
        for cell in 0..n {
            // Z_left = 1: appending 1 and appending 0 give distinct outputs,
            // so testing one of them decides the appended cell.
            let bit = u8::from(rules.output((prev << 1) | 1) == tape[cell]);
            candidate.push(bit);
            prev = ((prev << 1) | bit as usize) & prefix_mask;
        }

        // The circular boundary: the guessed prefix must reappear verbatim at
        // the end of the reconstruction. All k-1 positions are compared.
        if candidate[..overlap] == candidate[n..] {
            candidate.drain(..half);
            candidate.truncate(n);
            return Ok(candidate);
        }
    }

    Err(Error::Irreversible)
}
