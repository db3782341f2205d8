//! N-Triples serializer.
//!
//! One triple per line, absolute IRIs, sorted. Blank node labels are written as
//! stored.

use crate::store::TripleStore;

/// Serializes every triple in the store to an N-Triples string.
#[must_use]
pub fn to_ntriples<S: TripleStore + ?Sized>(store: &S) -> String {
    let mut triples = store.triples();
    triples.sort();

    let mut out = String::with_capacity(triples.len() * 96);
    for triple in &triples {
        out.push_str(&triple.to_string());
        out.push('\n');
    }
    out
}
