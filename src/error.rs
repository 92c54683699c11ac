use thiserror::Error;

/// Errors raised by the coding pipeline.
///
/// All of them are surfaced at the offending call. Nothing is retried and no
/// partial result is returned alongside an error.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The input cannot be coded (e.g. an empty sequence).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An argument has the wrong shape: a non-binary character in a bit
    /// string or a tree that fails validation.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A symbol of the input ended up without a code. Indicates a bug in the
    /// tree builder or the code generator.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// The bit string does not partition into codes of the tree. Only raised
    /// by strict decoding.
    #[error("malformed input at bit {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
