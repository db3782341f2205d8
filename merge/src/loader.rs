//! Turtle loading into a shared store.
//!
//! Every document is parsed completely before any of its triples reach the
//! store, so a document that fails halfway contributes nothing. Blank node
//! labels are scoped to their document: each `(document, label)` pair gets a
//! fresh store-wide label `n<k>`, numbered above any `n<k>` label the store
//! already holds.
//!
//! Files are parsed with their own `file://` IRI as base, so relative IRI
//! references resolve against the document's location. The parser normalizes
//! language tags to lower case.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use nidm_graph::{MemoryStore, Node, Triple, TripleStore};
use sophia_api::parser::TripleParser;
use sophia_api::prelude::Iri;
use sophia_api::source::{StreamError, TripleSource};
use sophia_api::term::Term;
use sophia_api::triple::Triple as _;
use sophia_turtle::parser::turtle::TurtleParser;
use url::Url;

use crate::error::LoadError;
use crate::report::{FileOutcome, LoadReport};

/// Accumulates parsed documents into one store.
#[derive(Debug, Default)]
pub struct GraphLoader<S = MemoryStore> {
    store: S,
    next_blank: usize,
}

impl GraphLoader<MemoryStore> {
    /// Creates a loader over an empty [`MemoryStore`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: TripleStore> GraphLoader<S> {
    /// Creates a loader that adds to an existing store.
    ///
    /// Fresh blank node labels start above the highest `n<k>` label already
    /// present, so loaded documents never share a blank node with the store.
    pub fn with_store(store: S) -> Self {
        let next_blank = highest_blank_index(&store);
        Self { store, next_blank }
    }

    /// Reads and merges one Turtle file. Returns the number of triples parsed.
    ///
    /// Relative IRI references resolve against the file's `file://` IRI.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if the file cannot be read and
    /// [`LoadError::Syntax`] if it is not valid Turtle. The store is left
    /// untouched in both cases.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, LoadError> {
        let content = fs::read_to_string(path)?;
        self.load(&content, file_base(path))
    }

    /// Parses and merges one Turtle document held in memory.
    ///
    /// The document has no base IRI, so relative IRI references are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Syntax`] if the document is not valid Turtle and
    /// [`LoadError::UnsupportedTerm`] if it contains RDF-star terms.
    pub fn load_str(&mut self, content: &str) -> Result<usize, LoadError> {
        self.load(content, None)
    }

    fn load(&mut self, content: &str, base: Option<Iri<String>>) -> Result<usize, LoadError> {
        let mut scope = BlankScope::new(self.next_blank);
        let mut parsed = Vec::new();

        TurtleParser { base }
            .parse_str(content)
            .try_for_each_triple(|t| -> Result<(), LoadError> {
                parsed.push(Triple::new(
                    scope.convert(t.s())?,
                    scope.convert(t.p())?,
                    scope.convert(t.o())?,
                ));
                Ok(())
            })
            .map_err(|e| match e {
                StreamError::SourceError(e) => LoadError::Syntax(e.to_string()),
                StreamError::SinkError(e) => e,
            })?;

        self.next_blank = scope.next;
        let count = parsed.len();
        for triple in parsed {
            self.store.insert(triple);
        }
        Ok(count)
    }

    /// Loads every path in order, recording a per-file outcome.
    ///
    /// Failures are recorded and skipped; they never stop the batch.
    pub fn load_all(&mut self, paths: &[PathBuf]) -> LoadReport {
        self.load_all_with(paths, |_| {})
    }

    /// Like [`load_all`](Self::load_all), calling `before_each` with each path
    /// just before it is parsed.
    pub fn load_all_with(
        &mut self,
        paths: &[PathBuf],
        mut before_each: impl FnMut(&Path),
    ) -> LoadReport {
        let mut report = LoadReport::new();
        for path in paths {
            before_each(path);
            let outcome = match self.load_file(path) {
                Ok(triples) => FileOutcome::loaded(path.clone(), triples),
                Err(error) => FileOutcome::failed(path.clone(), error),
            };
            report.push(outcome);
        }
        report
    }

    /// The store built so far.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the loader and returns the merged store.
    pub fn into_store(self) -> S {
        self.store
    }
}

/// The `file://` IRI of `path`, used as the document base.
fn file_base(path: &Path) -> Option<Iri<String>> {
    let absolute = path.canonicalize().ok()?;
    let url = Url::from_file_path(absolute).ok()?;
    Iri::new(String::from(url)).ok()
}

fn highest_blank_index<S: TripleStore>(store: &S) -> usize {
    store
        .triples()
        .iter()
        .flat_map(|t| [&t.subject, &t.object])
        .filter_map(|node| match node {
            Node::Blank(label) => label.strip_prefix('n')?.parse::<usize>().ok(),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Maps one document's blank node labels to store-wide labels.
struct BlankScope {
    labels: HashMap<String, String>,
    next: usize,
}

impl BlankScope {
    fn new(next: usize) -> Self {
        Self {
            labels: HashMap::new(),
            next,
        }
    }

    fn relabel(&mut self, label: &str) -> Node {
        let next = &mut self.next;
        let fresh = self.labels.entry(label.to_owned()).or_insert_with(|| {
            *next += 1;
            format!("n{}", next)
        });
        Node::blank(fresh.clone())
    }

    fn convert<T: Term>(&mut self, term: T) -> Result<Node, LoadError> {
        let kind = term.kind();
        match Node::from_term(term) {
            Some(Node::Blank(label)) => Ok(self.relabel(&label)),
            Some(node) => Ok(node),
            None => Err(LoadError::UnsupportedTerm(format!("{:?}", kind))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidm_graph::vocab::{PROV_AGENT, PROV_QUALIFIED_ASSOCIATION, XSD_STRING};
    use nidm_graph::Literal;

    const ACQ: &str = r#"
@prefix prov:  <http://www.w3.org/ns/prov#> .
@prefix niiri: <http://iri.nidash.org/> .

niiri:acq1 prov:qualifiedAssociation _:a .
_:a prov:agent niiri:agentA ;
    prov:hadRole niiri:roleX .
"#;

    #[test]
    fn loads_triples_and_counts_them() {
        let mut loader = GraphLoader::new();
        assert_eq!(loader.load_str(ACQ).expect("valid turtle"), 3);
        assert_eq!(loader.store().len(), 3);
    }

    #[test]
    fn blank_nodes_are_scoped_per_document() {
        let mut loader = GraphLoader::new();
        loader.load_str(ACQ).expect("first document");
        loader.load_str(ACQ).expect("second document");

        let store = loader.into_store();
        // The two `_:a` nodes stay distinct.
        assert_eq!(store.len(), 6);
        let links = store.subject_objects(&Node::iri(PROV_QUALIFIED_ASSOCIATION));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].1, Node::blank("n1"));
        assert_eq!(links[1].1, Node::blank("n2"));
    }

    #[test]
    fn same_label_within_one_document_is_one_node() {
        let mut loader = GraphLoader::new();
        loader.load_str(ACQ).expect("valid turtle");
        let store = loader.into_store();
        let assoc = Node::blank("n1");
        assert_eq!(
            store.value(&assoc, &Node::iri(PROV_AGENT)),
            Some(Node::iri("http://iri.nidash.org/agentA"))
        );
    }

    #[test]
    fn malformed_document_leaves_store_untouched() {
        let mut loader = GraphLoader::new();
        loader.load_str(ACQ).expect("valid turtle");
        let broken = "@prefix ex: <http://example.org/> .\nex:a ex:b _:q .\nex:d ex:e";
        let err = loader.load_str(broken).expect_err("truncated statement");
        assert!(matches!(err, LoadError::Syntax(_)), "unexpected error: {err}");
        assert_eq!(loader.store().len(), 3);

        // Labels allocated by the failed document are not consumed.
        loader.load_str("_:x <http://example.org/p> 1 .").expect("valid turtle");
        assert!(loader.store().contains(&Triple::new(
            Node::blank("n2"),
            Node::iri("http://example.org/p"),
            Node::Literal(Literal::typed("1", "http://www.w3.org/2001/XMLSchema#integer")),
        )));
    }

    #[test]
    fn converts_literal_forms() {
        let doc = r#"
<http://example.org/s> <http://example.org/label> "T1w" , "tête"@fr , "3.0"^^<http://www.w3.org/2001/XMLSchema#decimal> .
"#;
        let mut loader = GraphLoader::new();
        loader.load_str(doc).expect("valid turtle");
        let objects = loader.store().objects(
            &Node::iri("http://example.org/s"),
            &Node::iri("http://example.org/label"),
        );
        assert!(objects.contains(&Node::Literal(Literal::typed("T1w", XSD_STRING))));
        assert!(objects.contains(&Node::Literal(Literal::lang("tête", "fr"))));
        assert!(objects.contains(&Node::Literal(Literal::typed(
            "3.0",
            "http://www.w3.org/2001/XMLSchema#decimal"
        ))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut loader = GraphLoader::new();
        let err = loader
            .load_file(&dir.path().join("absent/nidm.ttl"))
            .expect_err("file does not exist");
        assert!(matches!(err, LoadError::Read(_)));
    }

    #[test]
    fn load_all_records_failures_and_continues() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.ttl");
        let bad = dir.path().join("bad.ttl");
        fs::write(&good, ACQ).expect("write good");
        fs::write(&bad, "this is not turtle").expect("write bad");

        let mut loader = GraphLoader::new();
        let report = loader.load_all(&[bad.clone(), good.clone()]);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.loaded_count(), 1);
        assert_eq!(report.failures().next().map(|o| o.path.clone()), Some(bad));
        assert_eq!(loader.store().len(), 3);
    }

    #[test]
    fn existing_blank_labels_are_not_reused() {
        let p = Node::iri("http://example.org/p");
        let seeded = Node::blank("n4");
        let mut store = MemoryStore::new();
        store.insert(Triple::new(seeded.clone(), p.clone(), Node::string("old")));

        let mut loader = GraphLoader::with_store(store);
        loader
            .load_str(r#"_:x <http://example.org/p> "new" ."#)
            .expect("valid turtle");

        let store = loader.into_store();
        assert_eq!(store.objects(&seeded, &p), vec![Node::string("old")]);
        assert_eq!(
            store.objects(&Node::blank("n5"), &p),
            vec![Node::string("new")]
        );
    }

    #[test]
    fn relative_iris_resolve_against_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nidm.ttl");
        fs::write(
            &path,
            "@prefix prov: <http://www.w3.org/ns/prov#> .\n\
             <acq1> prov:qualifiedAssociation _:a .\n\
             <> prov:wasDerivedFrom <acq1> .\n",
        )
        .expect("write document");

        let mut loader = GraphLoader::new();
        assert_eq!(loader.load_file(&path).expect("relative IRIs resolve"), 2);

        let canonical = path.canonicalize().expect("canonical path");
        let document = Url::from_file_path(&canonical).expect("file url");
        let acq = document.join("acq1").expect("sibling url");
        let links = loader
            .store()
            .subject_objects(&Node::iri(PROV_QUALIFIED_ASSOCIATION));
        assert_eq!(links, vec![(Node::iri(acq.as_str()), Node::blank("n1"))]);
        assert!(loader.store().contains(&Triple::new(
            Node::iri(document.as_str()),
            Node::iri("http://www.w3.org/ns/prov#wasDerivedFrom"),
            Node::iri(acq.as_str()),
        )));
    }

    #[test]
    fn in_memory_documents_reject_relative_iris() {
        let mut loader = GraphLoader::new();
        let err = loader
            .load_str("<acq1> <http://example.org/p> <acq2> .")
            .expect_err("no base to resolve against");
        assert!(matches!(err, LoadError::Syntax(_)));
        assert!(loader.store().is_empty());
    }

    #[test]
    fn language_tags_are_lowercased() {
        let mut loader = GraphLoader::new();
        loader
            .load_str(r#"<http://example.org/s> <http://example.org/p> "z"@en-US ."#)
            .expect("valid turtle");
        assert_eq!(
            loader.store().triples()[0].object,
            Node::Literal(Literal::lang("z", "en-us"))
        );
    }

    #[test]
    fn load_all_with_announces_each_path_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = dir.path().join("a.ttl");
        let second = dir.path().join("b.ttl");
        fs::write(&first, ACQ).expect("write first");
        fs::write(&second, "not turtle").expect("write second");

        let mut seen = Vec::new();
        let mut loader = GraphLoader::new();
        let report = loader.load_all_with(&[first.clone(), second.clone()], |path| {
            seen.push(path.to_path_buf())
        });

        assert_eq!(seen, vec![first, second.clone()]);
        assert_eq!(report.parsed_triples(), 3);
        assert_eq!(report.failures().map(|o| o.path.clone()).collect::<Vec<_>>(), vec![second]);
    }
}
