// Sized OS queries: a caller-supplied buffer size, and one retry when the OS asks for more.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("could not allocate a {0} byte query buffer")]
    AllocationFailure(usize),
    #[error("query buffer too small, {required} bytes required")]
    BufferTooSmall { required: usize },
    #[error("query failed: {0}")]
    Failure(String),
}

/// An OS query that fills a buffer of roughly `size_hint` bytes.
pub trait SizedQuery {
    type Output;

    fn query(&self, size_hint: usize) -> Result<Self::Output, QueryError>;
}

impl<T, F> SizedQuery for F
where
    F: Fn(usize) -> Result<T, QueryError>,
{
    type Output = T;

    fn query(&self, size_hint: usize) -> Result<T, QueryError> {
        self(size_hint)
    }
}

/// Runs `query` with `initial_size`; if the OS reports the buffer too small, retries
/// exactly once with the size it asked for, provided that does not exceed `max_size`.
pub fn fetch_with_retry<Q: SizedQuery>(
    query: &Q,
    initial_size: usize,
    max_size: usize,
) -> Result<Q::Output, QueryError> {
    match query.query(initial_size) {
        Err(QueryError::BufferTooSmall { required }) if required <= max_size => {
            tracing::trace!(initial_size, required, "retrying query with larger buffer");
            query.query(required)
        }
        other => other,
    }
}
