use std::error::Error;

/// What the segmenter and decoder hand back when they fail.
pub type BoxError = Box<dyn Error + Send + Sync>;

pub type Result<T, E = G2pError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum G2pError {
    #[error("segmenter failed: {0}")]
    Segmenter(#[source] BoxError),

    #[error("decoder failed: {0}")]
    Decoder(#[source] BoxError),

    /// The decoder answered, but its labels don't line up with the tokens it was given.
    #[error("decoder returned {got} labels where {expected} were expected")]
    DecoderShape { expected: usize, got: usize },

    #[error("invalid dictionary: {0}")]
    InvalidDictionary(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl G2pError {
    pub(crate) fn invalid_dictionary<S: Into<String>>(msg: S) -> Self {
        G2pError::InvalidDictionary(msg.into())
    }
}
