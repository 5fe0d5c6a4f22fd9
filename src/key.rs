use {
    crate::{Error, Result, RuleTable},
    std::{fmt::Write as _, fs, path::Path},
};

/// The shared secret: a chain-rule table plus the number of automaton steps
/// to run. Both ends of an exchange must hold the same key; the noise-mask
/// seed travels separately.
///
/// # Key file format
///
/// A key file is three whitespace-separated text lines:
///
/// ```text
/// # k ::: 7
/// # T ::: 5
/// # R ::: 0 1 1 0 ...
/// ```
///
/// The `R` line lists all 2^k rule outputs in canonical order: for each
/// (k−1)-bit prefix in ascending order, the output for appending 0 and then
/// the output for appending 1. [`Key::save`] and [`Key::load`] are exact
/// inverses.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    rules: RuleTable,
    steps: usize,
}

impl Key {
    /// Pair a rule table with a step count (at least 1).
    pub fn new(rules: RuleTable, steps: usize) -> Result<Self> {
        if steps < 1 {
            return Err(Error::InvalidArgument(
                "step count must be at least 1".into(),
            ));
        }
        Ok(Self { rules, steps })
    }

    /// Generate a fresh key: draw left-reversible rule tables until one
    /// passes the Z_right gate. A rule seed makes the draw reproducible;
    /// without one the thread RNG is used.
    pub fn generate(k: usize, steps: usize, rule_seed: Option<u64>) -> Result<Self> {
        let rules = match rule_seed {
            Some(seed) => RuleTable::random_reversible_seeded(k, seed)?,
            None => RuleTable::random_reversible(k, &mut rand::thread_rng())?,
        };
        Self::new(rules, steps)
    }

    /// Write the key file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut text = String::new();
        let _ = writeln!(text, "# k ::: {}", self.rules.k());
        let _ = writeln!(text, "# T ::: {}", self.steps);
        let _ = write!(text, "# R :::");
        for bit in self.rules.output_bits() {
            let _ = write!(text, " {bit}");
        }
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    /// Read a key file written by [`Key::save`].
    ///
    /// Parsing is whitespace-tolerant: blank lines are skipped and the `#`
    /// prefixes are optional. The rule table is re-validated on the way in,
    /// so a loaded key satisfies the same invariants as a generated one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_owned()));
        }
        let text = fs::read_to_string(path)?;
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let k = tagged(lines.next(), "k")?
            .next()
            .ok_or_else(|| Error::MalformedKey("missing neighborhood size".into()))?
            .parse::<usize>()
            .map_err(|e| Error::MalformedKey(format!("bad neighborhood size: {e}")))?;
        let steps = tagged(lines.next(), "T")?
            .next()
            .ok_or_else(|| Error::MalformedKey("missing step count".into()))?
            .parse::<usize>()
            .map_err(|e| Error::MalformedKey(format!("bad step count: {e}")))?;
        let outputs = tagged(lines.next(), "R")?
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|e| Error::MalformedKey(format!("bad rule output: {e}")))
            })
            .collect::<Result<Vec<u8>>>()?;

        let rules = RuleTable::from_output_bits(k, outputs)
            .map_err(|e| Error::MalformedKey(e.to_string()))?;
        Self::new(rules, steps)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn k(&self) -> usize {
        self.rules.k()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub(crate) fn into_parts(self) -> (RuleTable, usize) {
        (self.rules, self.steps)
    }
}

/// Match a `<tag> ::: value...` line, with an optional leading `#`, and
/// return the value tokens.
fn tagged<'a>(line: Option<&'a str>, tag: &str) -> Result<std::str::SplitWhitespace<'a>> {
    let line = line.ok_or_else(|| Error::MalformedKey(format!("missing '{tag}' line")))?;
    let rest = line.strip_prefix('#').unwrap_or(line);
    let mut tokens = rest.split_whitespace();
    if tokens.next() != Some(tag) || tokens.next() != Some(":::") {
        return Err(Error::MalformedKey(format!(
            "expected a '{tag} ::: ...' line, got '{line}'"
        )));
    }
    Ok(tokens)
}
