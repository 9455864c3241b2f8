//! Read-only retrieval over a Qdrant collection of pre-embedded chunks.
//!
//! The crate provides:
//! - a [`DocumentStore`] seam with a Qdrant implementation ([`QdrantStore`])
//! - a [`Retriever`] that runs one scoped nearest-neighbour search per call
//!
//! Connections are acquired per search and released on every path, so the
//! store handle can be injected once and shared across requests.

mod config;
mod errors;
mod qdrant_facade;
mod record;
mod retrieve;
mod store;

pub use config::{ConnectionMode, RagConfig};
pub use errors::RagError;
pub use qdrant_facade::{QdrantConnection, QdrantStore};
pub use record::{RagHit, VectorSearch};
pub use retrieve::Retriever;
pub use store::{DocumentStore, StoreConnection};
