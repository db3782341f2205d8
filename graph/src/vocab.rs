//! Vocabulary IRIs used by the merge pipeline and the writers.

/// The W3C PROV-O namespace.
pub const PROV: &str = "http://www.w3.org/ns/prov#";

/// `prov:qualifiedAssociation` — links an activity to its association node.
pub const PROV_QUALIFIED_ASSOCIATION: &str = "http://www.w3.org/ns/prov#qualifiedAssociation";
/// `prov:agent` — the agent of an association.
pub const PROV_AGENT: &str = "http://www.w3.org/ns/prov#agent";
/// `prov:hadRole` — the role the agent played.
pub const PROV_HAD_ROLE: &str = "http://www.w3.org/ns/prov#hadRole";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdf:langString`, the datatype of language-tagged literals.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
/// `xsd:string`, the datatype of plain literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Prefixes declared at the top of every Turtle document this crate writes.
///
/// Covers the W3C core vocabularies and the namespaces NIDM-Experiment
/// documents are built from.
pub const PREFIXES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("prov", PROV),
    ("nidm", "http://purl.org/nidash/nidm#"),
    ("niiri", "http://iri.nidash.org/"),
    ("sio", "http://semanticscience.org/resource/"),
    ("dct", "http://purl.org/dc/terms/"),
    ("dctypes", "http://purl.org/dc/dcmitype/"),
    ("nfo", "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#"),
];
