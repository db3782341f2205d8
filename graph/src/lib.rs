//! RDF graph primitives for merging NIDM documents.
//!
//! The `nidm-graph` crate provides owned, ordered RDF terms, the
//! [`TripleStore`] abstraction with an in-memory implementation, the PROV-O
//! vocabulary the duplicate resolver keys on, and writers that render a store
//! as Turtle or N-Triples.
//!
//! # Entry Point
//!
//! ```
//! use nidm_graph::{MemoryStore, Node, Triple, TripleStore};
//!
//! let mut store = MemoryStore::new();
//! store.insert(Triple::new(
//!     Node::iri("http://iri.nidash.org/acq1"),
//!     Node::iri(nidm_graph::vocab::PROV_QUALIFIED_ASSOCIATION),
//!     Node::blank("n1"),
//! ));
//! assert_eq!(store.len(), 1);
//! ```
//!
//! # Serialization
//!
//! ```
//! let store = nidm_graph::MemoryStore::new();
//! let turtle = nidm_graph::serializer::turtle::to_turtle(&store);
//! let ntriples = nidm_graph::serializer::ntriples::to_ntriples(&store);
//! assert!(turtle.starts_with("@prefix"));
//! assert!(ntriples.is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod model;
pub mod serializer;
pub mod store;
pub mod vocab;

pub use model::{Literal, Node, Triple};
pub use store::{MemoryStore, TripleStore};
