//! Store handle and connection seams.
//!
//! A [`DocumentStore`] is created once at process start, injected into the
//! [`crate::Retriever`], and closed at shutdown. Every search acquires a
//! [`StoreConnection`] from it and releases it before returning.

use futures::future::BoxFuture;

use crate::errors::RagError;
use crate::record::{RagHit, VectorSearch};

/// Long-lived handle to the external document store.
pub trait DocumentStore: Send + Sync {
    /// Acquires a connection for a single search.
    fn connect(&self) -> BoxFuture<'_, Result<Box<dyn StoreConnection>, RagError>>;

    /// Releases everything held by the handle. Later `connect` calls fail with
    /// [`RagError::Closed`].
    fn close(&self) -> BoxFuture<'_, ()>;
}

/// One acquired connection.
pub trait StoreConnection: Send + Sync {
    /// Runs a nearest-neighbour query. Hits come back in store ranking order.
    fn vector_search<'a>(
        &'a self,
        search: &'a VectorSearch,
    ) -> BoxFuture<'a, Result<Vec<RagHit>, RagError>>;

    /// Releases the connection.
    fn close(self: Box<Self>) -> BoxFuture<'static, ()>;
}
