use std::error::Error;

/// An error raised by a [`TripleStoreGateway`](crate::TripleStoreGateway).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store could not be reached or failed while processing the request.
    #[error("The triple store is unavailable: {0}")]
    Unavailable(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The store answered, but refused the request.
    #[error("The triple store rejected the request ({status}): {message}")]
    Rejected {
        /// The status reported by the store.
        status: String,
        /// The message returned by the store.
        message: String,
    },
    /// The answer to a count query had no row or no integer in its aggregate field.
    #[error("Invalid count result: {0}")]
    InvalidCount(String),
}

impl StoreError {
    /// Wraps any error of the underlying store client.
    #[inline]
    pub fn unavailable(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Unavailable(error.into())
    }
}
