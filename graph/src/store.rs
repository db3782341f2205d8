//! Triple store abstraction and the in-memory implementation.
//!
//! [`TripleStore`] is the seam the merge pipeline is written against: the
//! loader only inserts, the resolver queries by pattern and removes. Anything
//! that can answer a `(subject?, predicate?, object?)` pattern can stand in for
//! [`MemoryStore`].

use std::fmt;

use sophia_api::graph::{Graph, MutableGraph};
use sophia_api::term::matcher::TermMatcher;
use sophia_api::term::{SimpleTerm, Term};
use sophia_api::triple::Triple as _;
use sophia_inmem::graph::FastGraph;

use crate::model::{Node, Triple};

/// A mutable set of triples queried by pattern.
///
/// `None` in a pattern position is a wildcard. Stores have set semantics:
/// inserting a triple that is already present is a no-op.
pub trait TripleStore {
    /// Inserts a triple. Returns `true` if it was not already present.
    fn insert(&mut self, triple: Triple) -> bool;

    /// Removes a triple. Returns `true` if it was present.
    fn remove(&mut self, triple: &Triple) -> bool;

    /// Returns every triple matching the pattern.
    fn matching(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<Triple>;

    /// Number of triples in the store.
    fn len(&self) -> usize;

    /// Returns true if the store holds no triples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every triple matching the pattern and returns how many were removed.
    fn remove_matching(
        &mut self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> usize {
        let doomed = self.matching(subject, predicate, object);
        doomed.iter().filter(|t| self.remove(t)).count()
    }

    /// Returns true if the store contains the triple.
    fn contains(&self, triple: &Triple) -> bool {
        !self
            .matching(
                Some(&triple.subject),
                Some(&triple.predicate),
                Some(&triple.object),
            )
            .is_empty()
    }

    /// All triples in the store.
    fn triples(&self) -> Vec<Triple> {
        self.matching(None, None, None)
    }

    /// Every `(subject, object)` pair linked by `predicate`.
    fn subject_objects(&self, predicate: &Node) -> Vec<(Node, Node)> {
        self.matching(None, Some(predicate), None)
            .into_iter()
            .map(|t| (t.subject, t.object))
            .collect()
    }

    /// Every object of `subject predicate ?o`.
    fn objects(&self, subject: &Node, predicate: &Node) -> Vec<Node> {
        self.matching(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    /// A single object of `subject predicate ?o`, or `None` if there is none.
    ///
    /// When several objects exist the smallest one is returned, so the answer
    /// does not depend on the store's iteration order.
    fn value(&self, subject: &Node, predicate: &Node) -> Option<Node> {
        self.objects(subject, predicate).into_iter().min()
    }
}

/// An in-memory store backed by sophia's [`FastGraph`].
///
/// Pattern results are returned in sorted term order.
pub struct MemoryStore {
    graph: FastGraph,
    len: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: FastGraph::new(),
            len: 0,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore").field("len", &self.len).finish()
    }
}

/// One pattern position: a fixed term, or any term when empty.
struct Slot<'a>(Option<SimpleTerm<'a>>);

impl<'a> Slot<'a> {
    fn new(node: Option<&'a Node>) -> Self {
        Slot(node.map(Node::as_term))
    }
}

impl<'a> TermMatcher for Slot<'a> {
    type Term = SimpleTerm<'a>;

    fn matches<T: Term + ?Sized>(&self, term: &T) -> bool {
        match &self.0 {
            Some(mine) => Term::eq(mine, term.borrow_term()),
            None => true,
        }
    }

    fn constant(&self) -> Option<&Self::Term> {
        self.0.as_ref()
    }
}

impl TripleStore for MemoryStore {
    fn insert(&mut self, triple: Triple) -> bool {
        let inserted = matches!(
            self.graph.insert(
                triple.subject.as_term(),
                triple.predicate.as_term(),
                triple.object.as_term(),
            ),
            Ok(true)
        );
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        let removed = matches!(
            self.graph.remove(
                triple.subject.as_term(),
                triple.predicate.as_term(),
                triple.object.as_term(),
            ),
            Ok(true)
        );
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn matching(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<Triple> {
        let mut out: Vec<Triple> = self
            .graph
            .triples_matching(Slot::new(subject), Slot::new(predicate), Slot::new(object))
            .filter_map(Result::ok)
            .filter_map(|t| {
                Some(Triple::new(
                    Node::from_term(t.s())?,
                    Node::from_term(t.p())?,
                    Node::from_term(t.o())?,
                ))
            })
            .collect();
        out.sort();
        out
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Extend<Triple> for MemoryStore {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    fn ex(local: &str) -> Node {
        Node::iri(format!("http://example.org/{local}"))
    }

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(ex(s), ex(p), ex(o))
    }

    #[test]
    fn insert_has_set_semantics() {
        let mut store = MemoryStore::new();
        assert!(store.insert(t("a", "p", "b")));
        assert!(!store.insert(t("a", "p", "b")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_presence_and_tracks_len() {
        let mut store: MemoryStore = [t("a", "p", "b"), t("a", "q", "c")].into_iter().collect();
        assert!(store.remove(&t("a", "p", "b")));
        assert!(!store.remove(&t("a", "p", "b")));
        assert_eq!(store.len(), 1);
        assert!(store.remove(&t("a", "q", "c")));
        assert!(store.is_empty());
        assert!(store.triples().is_empty());
    }

    #[test]
    fn literals_and_blank_nodes_are_matched_exactly() {
        let s = Node::blank("n1");
        let p = ex("label");
        let mut store = MemoryStore::new();
        store.insert(Triple::new(s.clone(), p.clone(), Node::string("T1w")));
        store.insert(Triple::new(
            s.clone(),
            p.clone(),
            Node::Literal(Literal::lang("T1w", "en")),
        ));
        store.insert(Triple::new(Node::blank("n2"), p.clone(), Node::string("T1w")));

        assert_eq!(store.len(), 3);
        assert_eq!(store.objects(&s, &p).len(), 2);
        assert_eq!(store.matching(None, None, Some(&Node::string("T1w"))).len(), 2);
    }

    #[test]
    fn matching_is_sorted_whatever_the_insertion_order() {
        let forward: MemoryStore = [t("a", "p", "b"), t("c", "p", "d"), t("b", "p", "a")]
            .into_iter()
            .collect();
        let backward: MemoryStore = [t("b", "p", "a"), t("c", "p", "d"), t("a", "p", "b")]
            .into_iter()
            .collect();
        let triples = forward.triples();
        assert_eq!(triples, backward.triples());
        assert!(triples.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn pattern_queries() {
        let store: MemoryStore = [
            t("a", "p", "b"),
            t("a", "p", "c"),
            t("a", "q", "c"),
            t("d", "p", "c"),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.matching(Some(&ex("a")), None, None).len(), 3);
        assert_eq!(store.matching(None, Some(&ex("p")), None).len(), 3);
        assert_eq!(store.matching(None, None, Some(&ex("c"))).len(), 3);
        assert_eq!(
            store.matching(Some(&ex("a")), Some(&ex("p")), Some(&ex("c"))),
            vec![t("a", "p", "c")]
        );
        assert!(store.contains(&t("d", "p", "c")));
        assert!(!store.contains(&t("d", "q", "c")));
        assert_eq!(store.triples().len(), 4);
    }

    #[test]
    fn subject_objects_lists_linked_pairs() {
        let store: MemoryStore = [t("a", "p", "b"), t("c", "p", "d"), t("a", "q", "e")]
            .into_iter()
            .collect();
        assert_eq!(
            store.subject_objects(&ex("p")),
            vec![(ex("a"), ex("b")), (ex("c"), ex("d"))]
        );
    }

    #[test]
    fn value_picks_smallest_object() {
        let store: MemoryStore = [t("a", "p", "z"), t("a", "p", "m")].into_iter().collect();
        assert_eq!(store.value(&ex("a"), &ex("p")), Some(ex("m")));
        assert_eq!(store.value(&ex("a"), &ex("q")), None);
    }

    #[test]
    fn remove_matching_wildcard_subject() {
        let mut store: MemoryStore = [t("a", "p", "b"), t("a", "q", "c"), t("x", "p", "a")]
            .into_iter()
            .collect();
        assert_eq!(store.remove_matching(Some(&ex("a")), None, None), 2);
        assert_eq!(store.triples(), vec![t("x", "p", "a")]);
    }
}
