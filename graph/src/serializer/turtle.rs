//! Turtle 1.1 serializer.
//!
//! Produces one subject block per subject, predicates separated by `;` and
//! repeated objects by `,`. IRIs in the namespaces listed in
//! [`PREFIXES`](crate::vocab::PREFIXES) are written as prefixed names when the
//! local part is a plain name; everything else is written in full.

use crate::model::{Literal, Node, Triple};
use crate::store::TripleStore;
use crate::vocab::{PREFIXES, RDF_TYPE, XSD_STRING};

use super::{escape_iri, escape_string};

/// Serializes every triple in the store to a Turtle string.
///
/// Subjects appear in sorted order; within a subject, `rdf:type` comes first.
#[must_use]
pub fn to_turtle<S: TripleStore + ?Sized>(store: &S) -> String {
    let mut triples = store.triples();
    triples.sort_by(|a, b| order_key(a).cmp(&order_key(b)));

    let mut out = String::with_capacity(128 + triples.len() * 64);

    // Prefix declarations
    let width = PREFIXES.iter().map(|(p, _)| p.len()).max().unwrap_or(0) + 1;
    for (prefix, ns) in PREFIXES {
        out.push_str(&format!(
            "@prefix {:<width$} <{}> .\n",
            format!("{prefix}:"),
            ns,
            width = width
        ));
    }
    out.push('\n');

    for block in triples.chunk_by(|a, b| a.subject == b.subject) {
        let predicates: Vec<String> = block
            .chunk_by(|a, b| a.predicate == b.predicate)
            .map(|group| {
                let objects: Vec<String> = group.iter().map(|t| term(&t.object)).collect();
                format!("  {} {}", predicate(&group[0].predicate), objects.join(" , "))
            })
            .collect();
        out.push_str(&format!(
            "{}\n{} .\n\n",
            term(&block[0].subject),
            predicates.join(" ;\n")
        ));
    }

    out
}

fn order_key(t: &Triple) -> (&Node, bool, &Node, &Node) {
    let not_type = t.predicate.as_iri() != Some(RDF_TYPE);
    (&t.subject, not_type, &t.predicate, &t.object)
}

fn predicate(node: &Node) -> String {
    if node.as_iri() == Some(RDF_TYPE) {
        "a".to_owned()
    } else {
        term(node)
    }
}

fn term(node: &Node) -> String {
    match node {
        Node::Iri(iri) => iri_ref(iri),
        Node::Blank(label) => format!("_:{}", label),
        Node::Literal(lit) => literal(lit),
    }
}

fn iri_ref(iri: &str) -> String {
    compact(iri).unwrap_or_else(|| format!("<{}>", escape_iri(iri)))
}

/// Rewrites `iri` as `prefix:local` using the longest matching namespace.
fn compact(iri: &str) -> Option<String> {
    PREFIXES
        .iter()
        .filter_map(|(prefix, ns)| {
            iri.strip_prefix(ns)
                .filter(|local| is_local_name(local))
                .map(|local| (ns.len(), prefix, local))
        })
        .max_by_key(|(len, _, _)| *len)
        .map(|(_, prefix, local)| format!("{}:{}", prefix, local))
}

// Conservative subset of PN_LOCAL: no dots, colons, or escapes.
fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        None => true,
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        Some(_) => false,
    }
}

fn literal(lit: &Literal) -> String {
    let quoted = format!("\"{}\"", escape_string(&lit.lexical));
    match &lit.language {
        Some(lang) => format!("{}@{}", quoted, lang),
        None if lit.datatype == XSD_STRING => quoted,
        None => format!("{}^^{}", quoted, iri_ref(&lit.datatype)),
    }
}
