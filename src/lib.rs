//! Compiles a typed BACnet object and a free-form list of tag rows into an
//! RDF graph rendered as Turtle.
//!
//! A pass runs directive processing, statement building and object export in
//! that order over a fresh [`rdf::resolver::ResolverContext`]; see
//! [`compiler::Compiler`].

/* Exports */

pub mod compiler;
pub mod config;
pub mod datastore;
pub mod errors;
pub mod object;
pub mod primitive;
pub mod rdf;
pub mod table;

pub use compiler::Compiler;
pub use config::CompilerConfig;
pub use datastore::graph::Graph;
pub use errors::{CastError, CompileError, ParserError};
pub use primitive::{CastValue, DatatypeTag, NameValue};
pub use table::{Document, Edit, PropertyRow, PropertyTable};

/* Common Definitions */

pub type RdfTriple = [RdfNode; 3];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize, Hash)]
pub enum RdfNode {
  Named{ iri: String },
  Blank{ id: String },
  RawLit{ val: String },
  LangTaggedLit{ val: String, lang: String },
  TypedLit{ val: String, datatype: String },
}
impl RdfNode {
  pub fn named(iri: impl Into<String>) -> Self {
    RdfNode::Named{ iri: iri.into() }
  }
  pub fn blank(id: impl Into<String>) -> Self {
    RdfNode::Blank{ id: id.into() }
  }
  pub fn typed(val: impl Into<String>, datatype: impl Into<String>) -> Self {
    RdfNode::TypedLit{ val: val.into(), datatype: datatype.into() }
  }
  pub fn iri(&self) -> Option<&str> {
    match self {
      RdfNode::Named{ iri } => Some(iri),
      _ => None,
    }
  }
  pub fn is_literal(&self) -> bool {
    matches!(self, RdfNode::RawLit{..} | RdfNode::LangTaggedLit{..} | RdfNode::TypedLit{..})
  }
}
impl std::convert::From<&str> for RdfNode {
  fn from(s: &str) -> Self {
    Self::Named{ iri: s.to_string() }
  }
}
/* N-Triples form, unescaped; for logs */
impl std::fmt::Display for RdfNode {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      RdfNode::Named{ iri } => write!(f, "<{}>", iri),
      RdfNode::Blank{ id } => write!(f, "_:{}", id),
      RdfNode::RawLit{ val } => write!(f, "\"{}\"", val),
      RdfNode::LangTaggedLit{ val, lang } => write!(f, "\"{}\"@{}", val, lang),
      RdfNode::TypedLit{ val, datatype } => write!(f, "\"{}\"^^<{}>", val, datatype),
    }
  }
}
