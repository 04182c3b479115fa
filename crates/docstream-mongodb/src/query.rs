//! Find request construction

use bson::{doc, Document as BsonDocument};

/// Build the filter for a full-text search on `query`.
///
/// Requires a text index on the target collection; the server rejects the
/// find otherwise.
pub fn text_filter(query: &str) -> BsonDocument {
    doc! { "$text": { "$search": query } }
}

/// A single find against one collection
///
/// The filter defaults to `{}` (every document) and the projection always
/// suppresses `_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct FindRequest {
    collection_name: String,
    filter: BsonDocument,
    projection: BsonDocument,
}

impl FindRequest {
    /// Create a request matching every document in `collection_name`
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            filter: BsonDocument::new(),
            projection: doc! { "_id": 0 },
        }
    }

    /// Set the filter document
    pub fn filter(mut self, filter: BsonDocument) -> Self {
        self.filter = filter;
        self
    }

    /// Restrict to a text search when `query` is non-empty
    pub fn text_search(self, query: &str) -> Self {
        if query.is_empty() {
            self
        } else {
            self.filter(text_filter(query))
        }
    }

    /// Get the collection name
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Get the filter document
    pub fn get_filter(&self) -> &BsonDocument {
        &self.filter
    }

    /// Get the projection document
    pub fn get_projection(&self) -> &BsonDocument {
        &self.projection
    }
}
