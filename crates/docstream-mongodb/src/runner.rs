//! The query run: connect, find, stream, disconnect

use docstream_common::Result;
use std::io::Write;
use tracing::debug;

use crate::config::RunnerConfig;
use crate::connection::{ConnectConfig, Connection};
use crate::document::to_json_line;
use crate::query::FindRequest;
use crate::store::{DocumentCursor, DocumentStore};

/// Outcome of a successful stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamSummary {
    /// Number of lines written
    pub documents: u64,
}

/// Validate `config`, connect and stream every matching document to `out`.
///
/// Validation happens before any network activity.
pub async fn execute<W: Write>(
    config: &RunnerConfig,
    connect: ConnectConfig,
    out: &mut W,
) -> Result<StreamSummary> {
    config.validate()?;

    let connection =
        Connection::connect(&config.connection_uri(), &config.database, connect).await?;

    run_query(connection, &config.find_request(), out).await
}

/// Stream `request` from `store` to `out`, then release the store.
///
/// The store is disconnected exactly once whether streaming succeeds or fails.
pub async fn run_query<S, W>(store: S, request: &FindRequest, out: &mut W) -> Result<StreamSummary>
where
    S: DocumentStore,
    W: Write,
{
    let result = stream_documents(&store, request, out).await;
    store.disconnect().await;
    result
}

/// Write one JSON line per document. Stops at the first error; lines already
/// written stay written.
pub async fn stream_documents<S, W>(
    store: &S,
    request: &FindRequest,
    out: &mut W,
) -> Result<StreamSummary>
where
    S: DocumentStore,
    W: Write,
{
    let mut cursor = store.find(request).await?;

    let mut summary = StreamSummary::default();
    while cursor.advance().await? {
        let line = to_json_line(cursor.current()?)?;
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        summary.documents += 1;
    }
    out.flush()?;

    debug!(
        collection = request.collection_name(),
        documents = summary.documents,
        "Stream complete"
    );
    Ok(summary)
}
