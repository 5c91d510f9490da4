/*
  Turtle output: prefix declarations for the bindings that are
  used, then one block per subject with `rdf:type` first.
*/

use {
  std::{collections::BTreeSet, fmt::Write as FmtWrite},
  crate::{
    datastore::graph::Graph,
    rdf::{resolver::blank_label, vocab::rdf},
    RdfNode, RdfTriple,
  },
};

/// Escapes `\`, `"`, newline, carriage return and tab for a quoted literal.
pub fn escape_turtle_string(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    }
  }
  out
}

/// Writes an IRI between `<` and `>`, with the characters IRIREF
/// forbids written as `\uXXXX` escapes.
pub fn write_iri_ref(iri: &str) -> String {
  let mut out = String::with_capacity(iri.len() + 2);
  out.push('<');
  for ch in iri.chars() {
    match ch {
      '\u{0}'..='\u{20}' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
        let _ = write!(out, "\\u{:04X}", ch as u32);
      },
      c => out.push(c),
    }
  }
  out.push('>');
  out
}

/* Conservative PN_LOCAL: letters, digits, `_`, `-` and inner `.` */
fn is_safe_local(local: &str) -> bool {
  let mut chars = local.chars();
  match chars.next() {
    None => return true,
    Some(c) if c.is_ascii_alphanumeric() || c == '_' => {},
    Some(_) => return false,
  }
  !local.ends_with('.')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

fn is_safe_prefix(prefix: &str) -> bool {
  match prefix.chars().next() {
    None => true,
    Some(c) => {
      c.is_ascii_alphabetic()
        && !prefix.ends_with('.')
        && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    },
  }
}

struct Writer<'g> {
  graph: &'g Graph,
  used: BTreeSet<String>,
}
impl<'g> Writer<'g> {
  fn iri(&mut self, iri: &str) -> String {
    if let Some((prefix, local)) = self.graph.compact(iri) {
      if is_safe_prefix(prefix) && is_safe_local(local) {
        self.used.insert(prefix.to_string());
        return format!("{}:{}", prefix, local)
      }
    }
    write_iri_ref(iri)
  }
  fn term(&mut self, node: &RdfNode) -> String {
    match node {
      RdfNode::Named{ iri } => self.iri(iri),
      RdfNode::Blank{ id } => format!("_:{}", blank_label(id)),
      RdfNode::RawLit{ val } => format!("\"{}\"", escape_turtle_string(val)),
      RdfNode::LangTaggedLit{ val, lang } => format!("\"{}\"@{}", escape_turtle_string(val), lang),
      RdfNode::TypedLit{ val, datatype } => {
        format!("\"{}\"^^{}", escape_turtle_string(val), self.iri(datatype))
      },
    }
  }
  fn predicate(&mut self, node: &RdfNode) -> String {
    match node {
      RdfNode::Named{ iri } if iri == rdf::TYPE => "a".to_string(),
      _ => self.term(node),
    }
  }
}

pub fn serialize(graph: &Graph) -> String {
  let mut writer = Writer { graph, used: BTreeSet::new() };
  let mut body = String::new();
  /* the graph iterates in subject order, so each subject is one run */
  let triples: Vec<&RdfTriple> = graph.iter().collect();
  let mut start = 0;
  while start < triples.len() {
    let subject = &triples[start][0];
    let end = triples[start..].iter()
      .position(|[s, _, _]| s != subject)
      .map_or(triples.len(), |n| start + n);
    let mut pairs: Vec<(&RdfNode, &RdfNode)> = triples[start..end].iter()
      .map(|[_, p, o]| (p, o))
      .collect();
    pairs.sort_by_key(|(p, _)| p.iri() != Some(rdf::TYPE));
    let subject = writer.term(subject);
    let _ = write!(body, "\n{}", subject);
    for (i, (p, o)) in pairs.into_iter().enumerate() {
      let separator = if i == 0 { " " } else { " ;\n    " };
      let predicate = writer.predicate(p);
      let object = writer.term(o);
      let _ = write!(body, "{}{} {}", separator, predicate, object);
    }
    body.push_str(" .\n");
    start = end;
  }
  let mut out = String::new();
  for prefix in writer.used.iter() {
    if let Some(namespace) = graph.namespace(prefix) {
      let _ = writeln!(out, "@prefix {}: {} .", prefix, write_iri_ref(namespace));
    }
  }
  out.push_str(&body);
  out
}
