//! Store and cursor abstraction used by the runner
//!
//! [`crate::Connection`] is the production implementation. The runner only
//! depends on these traits, so the connection lifecycle can be driven by an
//! in-memory store in tests.

use async_trait::async_trait;
use bson::Document as BsonDocument;
use docstream_common::Result;

use crate::query::FindRequest;

/// Forward-only cursor over the results of one find
#[async_trait]
pub trait DocumentCursor: Send {
    /// Move to the next document.
    ///
    /// Returns `Ok(false)` once the result set is exhausted. A fault while
    /// fetching, including one reported after the last batch, is a
    /// [`docstream_common::DocstreamError::Cursor`].
    async fn advance(&mut self) -> Result<bool>;

    /// Decode the document the cursor currently points at
    fn current(&self) -> Result<BsonDocument>;
}

/// An open session against a document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    type Cursor: DocumentCursor;

    /// Issue a single find and return a cursor over its results
    async fn find(&self, request: &FindRequest) -> Result<Self::Cursor>;

    /// Release the session. Consumes the store so it cannot be released twice.
    async fn disconnect(self);
}
