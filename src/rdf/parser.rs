/*
  Reads Turtle back into triples, used to check that what the
  compiler writes is well-formed and means what the graph held.
*/

extern crate rio_turtle;
extern crate rio_api;

use {
  rio_turtle::{TurtleParser, TurtleError},
  rio_api::{
    parser::TriplesParser,
    model::{
      NamedOrBlankNode,
      NamedNode, BlankNode,
      Term,
      Literal,
    },
  },
  crate::{
    datastore::graph::Graph,
    errors::ParserError,
    RdfNode, RdfTriple,
  },
};

/* Only relative IRIs need it; the writer never emits any */
const PARSE_BASE: &str = "http://example.com/";

fn named(NamedNode { iri }: NamedNode) -> RdfNode {
  RdfNode::named(iri)
}
fn blank(BlankNode { id }: BlankNode) -> RdfNode {
  RdfNode::blank(id)
}

pub fn parse_turtle(text: &str) -> Result<Vec<RdfTriple>, ParserError> {
  let mut triples: Vec<RdfTriple> = Vec::new();
  TurtleParser::new(text.as_bytes(), PARSE_BASE)?
    .parse_all(&mut |t| {
      let s = match t.subject {
        NamedOrBlankNode::NamedNode(n) => named(n),
        NamedOrBlankNode::BlankNode(b) => blank(b),
      };
      let p = named(t.predicate);
      let o = match t.object {
        Term::NamedNode(n) => named(n),
        Term::BlankNode(b) => blank(b),
        Term::Literal(Literal::Simple { value }) => RdfNode::RawLit{ val: value.to_string() },
        Term::Literal(Literal::LanguageTaggedString { value, language }) => {
          RdfNode::LangTaggedLit{ val: value.to_string(), lang: language.to_string() }
        },
        Term::Literal(Literal::Typed { value, datatype: NamedNode { iri } }) => {
          RdfNode::typed(value, iri)
        },
      };
      triples.push([s, p, o]);
      Ok(()) as Result<(), TurtleError>
    })?;
  Ok(triples)
}

/// Parses Turtle into a [`Graph`]. Prefix declarations are not kept.
pub fn parse_turtle_graph(text: &str) -> Result<Graph, ParserError> {
  Ok(parse_turtle(text)?.into_iter().collect())
}
