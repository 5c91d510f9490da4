/*
  Name resolution, directive handling, statement building and
  Turtle reading/writing for the tag-to-graph pass.
*/

pub mod builder;
pub mod directives;
pub mod encode;
pub mod parser;
pub mod resolver;
pub mod turtle;

/// Vocabulary IRIs used by the compiler.
pub mod vocab {
  pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// Marks a `^^` suffix that asks for an untyped literal.
    pub const PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
  }
  pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
  }
  pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
  }
  pub mod bacnet {
    pub const PREFIX: &str = "bacnet";
    pub const NS: &str = "http://data.ashrae.org/bacnet/2020#";
  }
}
