use {std::path::PathBuf, thiserror::Error};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All failures this crate can produce.
///
/// Every failure is fatal to the operation that raised it. Nothing is retried
/// internally except the bounded rule-generation search in
/// [`RuleTable::random_reversible`](crate::RuleTable::random_reversible).
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter violated a basic constraint (even neighborhood size, zero
    /// step count, a forbidden flag combination, and so on).
    #[error("{0}")]
    InvalidArgument(String),

    /// An input file does not exist.
    #[error("file '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    /// A key file could not be parsed.
    #[error("malformed key file: {0}")]
    MalformedKey(String),

    /// A tape shorter than the rule neighborhood cannot be stepped.
    #[error("tape of length {len} is shorter than the neighborhood size {k}")]
    TapeTooShort { len: usize, k: usize },

    /// Two sequences that must have equal lengths do not.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A sequence that must be binary contains another value.
    #[error("sequence contains non-binary value {0}")]
    NonBinary(u8),

    /// No rule table with Z_right >= 0.5 was found within the attempt budget.
    #[error("failed to generate a valid ruleset after {0} tries")]
    RuleGenExhausted(usize),

    /// The backward step found no consistent predecessor. This means the tape
    /// was not produced by a forward step under the same rules: corrupted
    /// input, the wrong key, or plaintext that simply has no pre-image.
    #[error("cannot reverse automaton step")]
    Irreversible,

    /// An operation was attempted before the state it needs was installed.
    #[error("{0} not set")]
    Unset(&'static str),

    /// A bit sequence that must pack into whole bytes does not.
    #[error("bit sequence length {0} is not a multiple of 8")]
    RaggedBytes(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
