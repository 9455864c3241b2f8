//! Core data models used by the library.

/// Parameters of one nearest-neighbour query.
///
/// Mirrors the document-store contract
/// `{ queryVector, path, numCandidates, limit, index, similarity: cosine }`.
/// Cosine similarity is a property of the collection in Qdrant.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorSearch {
    pub query_vector: Vec<f32>,
    /// Named vector holding chunk embeddings (`None` = default vector).
    pub path: Option<String>,
    /// Candidates examined by the ANN search.
    pub num_candidates: u64,
    /// Maximum number of hits.
    pub limit: u64,
    /// Collection name.
    pub index: String,
    /// Payload field carrying chunk text.
    pub text_field: String,
    /// Exact (brute force) instead of HNSW.
    pub exact: bool,
}

/// A single retrieval hit with score and text.
#[derive(Clone, Debug, PartialEq)]
pub struct RagHit {
    pub score: f32,
    pub text: String,
}
