use {
  crate::{
    datastore::graph::Graph,
    primitive::CastValue,
    rdf::vocab::{bacnet, rdf, xsd},
    RdfNode,
  },
};

fn bacnet_term(local: &str) -> String {
  format!("{}{}", bacnet::NS, local)
}

/* XSD spells the infinities `INF` and `-INF`; `NaN` already matches */
fn xsd_floating(value: f64, text: String) -> String {
  if value == f64::INFINITY {
    "INF".to_string()
  }
  else if value == f64::NEG_INFINITY {
    "-INF".to_string()
  }
  else {
    text
  }
}

/// Encodes a non-text primitive as an RDF object. Structured values
/// (date-times) add their component triples to `graph` and return the
/// blank node that holds them.
pub fn atomic_encode(graph: &mut Graph, value: &CastValue) -> RdfNode {
  match value {
    CastValue::Null => RdfNode::named(bacnet_term("Null")),
    CastValue::Boolean(b) => RdfNode::typed(b.to_string(), xsd::BOOLEAN),
    CastValue::Integer(i) => RdfNode::typed(i.to_string(), xsd::INTEGER),
    CastValue::Unsigned(u) | CastValue::Enumerated(u) => {
      RdfNode::typed(u.to_string(), xsd::NON_NEGATIVE_INTEGER)
    },
    CastValue::Real(r) => RdfNode::typed(xsd_floating(f64::from(*r), r.to_string()), xsd::FLOAT),
    CastValue::Double(d) => RdfNode::typed(xsd_floating(*d, d.to_string()), xsd::DOUBLE),
    CastValue::CharacterString(s) => RdfNode::RawLit{ val: s.clone() },
    CastValue::BitString(bits) => RdfNode::typed(bits.to_string(), bacnet_term("BitString")),
    CastValue::ObjectType(t) => match t.name() {
      Some(name) => RdfNode::named(bacnet_term(&format!("ObjectType.{}", name))),
      None => RdfNode::typed(t.value().to_string(), bacnet_term("ObjectType")),
    },
    CastValue::PropertyIdentifier(p) => match p.name() {
      Some(name) => RdfNode::named(bacnet_term(&format!("PropertyIdentifier.{}", name))),
      None => RdfNode::typed(p.value().to_string(), bacnet_term("PropertyIdentifier")),
    },
    CastValue::ObjectIdentifier(id) => RdfNode::typed(id.to_string(), bacnet_term("ObjectIdentifier")),
    CastValue::Date(d) => RdfNode::typed(d.to_string(), bacnet_term("Date")),
    CastValue::Time(t) => RdfNode::typed(t.to_string(), bacnet_term("Time")),
    CastValue::DateTime(dt) => {
      let node = graph.fresh_blank();
      graph.insert_triple([node.clone(), RdfNode::named(rdf::TYPE), RdfNode::named(bacnet_term("DateTime"))]);
      graph.insert_triple([node.clone(), RdfNode::named(bacnet_term("date")), RdfNode::typed(dt.date.to_string(), bacnet_term("Date"))]);
      graph.insert_triple([node.clone(), RdfNode::named(bacnet_term("time")), RdfNode::typed(dt.time.to_string(), bacnet_term("Time"))]);
      node
    },
  }
}
