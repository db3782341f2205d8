//! Core RDF term and triple types.
//!
//! Terms are owned and totally ordered. The ordering (IRIs, then blank nodes,
//! then literals, each compared by their textual identity) is what gives the
//! store and the serializers a reproducible traversal order.

use std::fmt;

use sophia_api::term::{BnodeId, IriRef, LanguageTag, SimpleTerm, Term, TermKind};
use sophia_api::MownStr;

use crate::serializer::{escape_iri, escape_string};
use crate::vocab::{RDF_LANG_STRING, XSD_STRING};

/// An RDF term: a named resource, an anonymous node, or a literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// A named resource identified by an absolute IRI.
    Iri(String),
    /// A blank node, identified by a label scoped to the store.
    Blank(String),
    /// A literal value.
    Literal(Literal),
}

impl Node {
    /// Creates an IRI node.
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    /// Creates a blank node with the given store-scoped label.
    pub fn blank(label: impl Into<String>) -> Self {
        Node::Blank(label.into())
    }

    /// Creates a plain `xsd:string` literal.
    pub fn string(lexical: impl Into<String>) -> Self {
        Node::Literal(Literal::string(lexical))
    }

    /// Returns the IRI if this node is a named resource.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true if this node is a blank node.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    /// Converts any sophia term into a node.
    ///
    /// Returns `None` for terms with no counterpart here (RDF-star quoted
    /// triples and variables).
    pub fn from_term<T: Term>(term: T) -> Option<Self> {
        match term.kind() {
            TermKind::Iri => term.iri().map(|iri| Node::iri(iri.as_str())),
            TermKind::BlankNode => term.bnode_id().map(|id| Node::blank(id.as_str())),
            TermKind::Literal => {
                let lexical = term.lexical_form()?;
                let lexical: &str = &lexical;
                let literal = match term.language_tag() {
                    Some(tag) => Literal::lang(lexical, tag.as_str()),
                    None => Literal::typed(lexical, term.datatype()?.as_str()),
                };
                Some(Node::Literal(literal))
            }
            _ => None,
        }
    }

    /// Borrows the node as a sophia term.
    #[must_use]
    pub fn as_term(&self) -> SimpleTerm<'_> {
        match self {
            Node::Iri(iri) => SimpleTerm::Iri(IriRef::new_unchecked(MownStr::from(iri.as_str()))),
            Node::Blank(label) => {
                SimpleTerm::BlankNode(BnodeId::new_unchecked(MownStr::from(label.as_str())))
            }
            Node::Literal(lit) => {
                let lexical = MownStr::from(lit.lexical.as_str());
                match &lit.language {
                    Some(tag) => SimpleTerm::LiteralLanguage(
                        lexical,
                        LanguageTag::new_unchecked(MownStr::from(tag.as_str())),
                    ),
                    None => SimpleTerm::LiteralDatatype(
                        lexical,
                        IriRef::new_unchecked(MownStr::from(lit.datatype.as_str())),
                    ),
                }
            }
        }
    }
}

/// Formats the node in N-Triples syntax.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", escape_iri(iri)),
            Node::Blank(label) => write!(f, "_:{}", label),
            Node::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

/// A literal: lexical form plus either a datatype IRI or a language tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    /// The lexical form, unescaped.
    pub lexical: String,
    /// Full datatype IRI (`rdf:langString` when a language tag is present).
    pub datatype: String,
    /// Language tag, for language-tagged strings.
    pub language: Option<String>,
}

impl Literal {
    /// Creates an `xsd:string` literal.
    pub fn string(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: XSD_STRING.to_owned(),
            language: None,
        }
    }

    /// Creates a literal with an explicit datatype IRI.
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// Creates a language-tagged string.
    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: RDF_LANG_STRING.to_owned(),
            language: Some(language.into()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_string(&self.lexical))?;
        match &self.language {
            Some(lang) => write!(f, "@{}", lang),
            None => write!(f, "^^<{}>", escape_iri(&self.datatype)),
        }
    }
}

/// A single (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject: an IRI or blank node.
    pub subject: Node,
    /// Predicate: always an IRI in well-formed input.
    pub predicate: Node,
    /// Object: any term.
    pub object: Node,
}

impl Triple {
    /// Creates a triple from its three terms.
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iris_sort_before_blanks_before_literals() {
        let mut nodes = vec![
            Node::string("z"),
            Node::blank("n1"),
            Node::iri("http://example.org/a"),
        ];
        nodes.sort();
        assert_eq!(nodes[0], Node::iri("http://example.org/a"));
        assert_eq!(nodes[1], Node::blank("n1"));
        assert_eq!(nodes[2], Node::string("z"));
    }

    #[test]
    fn displays_ntriples_terms() {
        assert_eq!(
            Node::iri("http://example.org/a").to_string(),
            "<http://example.org/a>"
        );
        assert_eq!(Node::blank("n7").to_string(), "_:n7");
        assert_eq!(
            Node::Literal(Literal::lang("bonjour", "fr")).to_string(),
            "\"bonjour\"@fr"
        );
        assert_eq!(
            Node::string("say \"hi\"\n").to_string(),
            "\"say \\\"hi\\\"\\n\"^^<http://www.w3.org/2001/XMLSchema#string>"
        );
    }

    #[test]
    fn sophia_terms_convert_both_ways() {
        let nodes = [
            Node::iri("http://example.org/a"),
            Node::blank("n3"),
            Node::string("T1w"),
            Node::Literal(Literal::lang("tête", "fr")),
            Node::Literal(Literal::typed("2", "http://www.w3.org/2001/XMLSchema#integer")),
        ];
        for node in nodes {
            assert_eq!(Node::from_term(node.as_term()), Some(node));
        }
    }

    #[test]
    fn quoted_triples_have_no_node() {
        let [s, p, o] = ["s", "p", "o"].map(|l| Node::iri(format!("http://example.org/{l}")));
        let quoted = SimpleTerm::Triple(Box::new([s.as_term(), p.as_term(), o.as_term()]));
        assert_eq!(Node::from_term(quoted), None);
    }

    #[test]
    fn triple_display_ends_with_period() {
        let t = Triple::new(
            Node::iri("http://example.org/s"),
            Node::iri("http://example.org/p"),
            Node::blank("n1"),
        );
        assert_eq!(
            t.to_string(),
            "<http://example.org/s> <http://example.org/p> _:n1 ."
        );
    }
}
