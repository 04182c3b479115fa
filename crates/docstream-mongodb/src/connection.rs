//! MongoDB connection management with a timed handshake

use async_trait::async_trait;
use bson::{doc, Document as BsonDocument};
use docstream_common::{DocstreamError, Result};
use mongodb::{options::ClientOptions, Client, Cursor, Database};
use std::time::Duration;
use tracing::{debug, info};

use crate::query::FindRequest;
use crate::store::{DocumentCursor, DocumentStore};

/// Upper bound on establishing the connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Deadline for the whole handshake, client side (default: 10s)
    pub connect_timeout: Duration,
    /// Server selection timeout passed to the driver (default: 10s)
    pub server_selection_timeout: Option<Duration>,
    /// Application name for server logs
    pub app_name: Option<String>,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            server_selection_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            app_name: Some("docstream".to_string()),
        }
    }
}

/// A live session bound to one database
///
/// Created by [`Connection::connect`] and released by
/// [`DocumentStore::disconnect`].
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Connect to `connection_string` and select `database_name`.
    ///
    /// The handshake is a `ping` against `admin`, bounded by
    /// `config.connect_timeout`.
    pub async fn connect(
        connection_string: &str,
        database_name: &str,
        config: ConnectConfig,
    ) -> Result<Self> {
        let mut client_options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| DocstreamError::Connection(format!("invalid connection string: {}", e)))?;

        client_options.connect_timeout = Some(config.connect_timeout);
        if let Some(server_sel) = config.server_selection_timeout {
            client_options.server_selection_timeout = Some(server_sel);
        }
        if let Some(app) = config.app_name {
            client_options.app_name = Some(app);
        }

        let hosts: Vec<String> = client_options.hosts.iter().map(|h| h.to_string()).collect();
        debug!(hosts = ?hosts, database = database_name, "Connecting to MongoDB");

        let client = Client::with_options(client_options)
            .map_err(|e| DocstreamError::Connection(format!("failed to create client: {}", e)))?;

        let admin = client.database("admin");
        let handshake = async { admin.run_command(doc! { "ping": 1 }).await };
        match tokio::time::timeout(config.connect_timeout, handshake).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(DocstreamError::Connection(format!("ping failed: {}", e)));
            }
            Err(_) => {
                return Err(DocstreamError::Timeout(format!(
                    "no response from {} within {:?}",
                    hosts.join(","),
                    config.connect_timeout
                )));
            }
        }

        info!(database = database_name, "Connected");

        let database = client.database(database_name);
        Ok(Self { client, database })
    }

    /// Get the database name
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

#[async_trait]
impl DocumentStore for Connection {
    type Cursor = MongoCursor;

    async fn find(&self, request: &FindRequest) -> Result<MongoCursor> {
        debug!(
            collection = request.collection_name(),
            filter = %request.get_filter(),
            "Executing find"
        );

        let cursor = self
            .database
            .collection::<BsonDocument>(request.collection_name())
            .find(request.get_filter().clone())
            .projection(request.get_projection().clone())
            .await
            .map_err(|e| DocstreamError::Query(e.to_string()))?;

        Ok(MongoCursor { inner: cursor })
    }

    async fn disconnect(self) {
        debug!(database = self.database_name(), "Disconnecting");
        self.client.shutdown().await;
    }
}

/// Driver cursor adapted to [`DocumentCursor`]
pub struct MongoCursor {
    inner: Cursor<BsonDocument>,
}

#[async_trait]
impl DocumentCursor for MongoCursor {
    async fn advance(&mut self) -> Result<bool> {
        self.inner
            .advance()
            .await
            .map_err(|e| DocstreamError::Cursor(e.to_string()))
    }

    fn current(&self) -> Result<BsonDocument> {
        self.inner
            .deserialize_current()
            .map_err(|e| DocstreamError::Deserialization(e.to_string()))
    }
}
