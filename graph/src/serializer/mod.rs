//! Writers for merged graphs.
//!
//! Two formats are supported:
//! - **Turtle** ([`turtle`]) — the default merge output, grouped by subject
//! - **N-Triples** ([`ntriples`]) — one triple per line, for line-oriented tooling
//!
//! Both writers emit triples in sorted term order, so the same graph always
//! produces the same bytes.

pub mod ntriples;
pub mod turtle;

/// Escapes a lexical form for use inside a double-quoted RDF string.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes the characters an `IRIREF` may not contain as `\uXXXX`.
pub(crate) fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') {
            out.push_str(&format!("\\u{:04X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}
