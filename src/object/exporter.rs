use {
  tracing::trace,
  crate::{
    datastore::graph::Graph,
    errors::CompileError,
    object::ObjectInstance,
    primitive::ObjectType,
    rdf::{encode::atomic_encode, vocab::{bacnet, rdf}},
    RdfNode,
  },
};

/// Writes the intrinsic triples of an object about a subject the
/// compiler has already chosen.
pub trait ObjectExporter {
  fn export(&self, object: &ObjectInstance, subject: &RdfNode, graph: &mut Graph) -> Result<(), CompileError>;
}

/// `analog-value` becomes `AnalogValueObject`.
pub fn class_name(object_type: ObjectType) -> Option<String> {
  let name = object_type.name()?;
  let mut class = String::with_capacity(name.len() + 6);
  for word in name.split('-') {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
      class.extend(first.to_uppercase());
      class.push_str(chars.as_str());
    }
  }
  class.push_str("Object");
  Some(class)
}

fn term(local: &str) -> RdfNode {
  RdfNode::named(format!("{}{}", bacnet::NS, local))
}

/// Exports into the `bacnet:` vocabulary: the object class, one triple
/// per property that has a value, and one blank node per tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacnetExporter;

impl ObjectExporter for BacnetExporter {
  fn export(&self, object: &ObjectInstance, subject: &RdfNode, graph: &mut Graph) -> Result<(), CompileError> {
    if subject.is_literal() {
      return Err(CompileError::Export(format!("{} cannot be a subject", subject)))
    }
    if let Some(class) = class_name(object.object_type) {
      graph.insert_triple([subject.clone(), RdfNode::named(rdf::TYPE), term(&class)]);
    }
    for (name, value) in object.properties.iter() {
      if let Some(value) = value {
        let node = atomic_encode(graph, value);
        trace!(property = %name, object = %node, "exported property");
        graph.insert_triple([subject.clone(), term(name), node]);
      }
    }
    for tag in object.tags.iter() {
      let node = graph.fresh_blank();
      graph.insert_triple([subject.clone(), term("tags"), node.clone()]);
      graph.insert_triple([node.clone(), term("name"), RdfNode::RawLit{ val: tag.name.clone() }]);
      if let Some(value) = &tag.value {
        let value = atomic_encode(graph, value);
        graph.insert_triple([node, term("value"), value]);
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod exporter_tests {
  use {
    super::*,
    crate::{
      primitive::{CastValue, NameValue},
      rdf::vocab::xsd,
    },
  };

  fn analog_value() -> ObjectInstance {
    let mut object = ObjectInstance::new(ObjectType::named("analog-value").unwrap());
    object.set_attribute("present-value", Some(CastValue::Real(72.5)));
    object.set_attribute("description", None);
    object
  }

  #[test]
  fn class_names() {
    assert_eq!(Some("AnalogValueObject".to_string()), class_name(ObjectType::named("analog-value").unwrap()));
    assert_eq!(Some("DeviceObject".to_string()), class_name(ObjectType::named("device").unwrap()));
    assert_eq!(None, class_name("900".parse().unwrap()));
  }
  #[test]
  fn properties_with_values_are_exported() {
    let subject = RdfNode::named("http://ex/av1");
    let mut graph = Graph::new();
    BacnetExporter.export(&analog_value(), &subject, &mut graph).unwrap();
    assert_eq!(2, graph.len());
    assert!(graph.contains(&[subject.clone(), RdfNode::named(rdf::TYPE), term("AnalogValueObject")]));
    assert!(graph.contains(&[subject, term("present-value"), RdfNode::typed("72.5", xsd::FLOAT)]));
  }
  #[test]
  fn tags_become_name_value_nodes() {
    let subject = RdfNode::blank("analog-value-1");
    let mut object = analog_value();
    object.tags = vec![NameValue::text("@id", "<http://ex/av1>"), NameValue::new("flag", None)];
    let mut graph = Graph::new();
    BacnetExporter.export(&object, &subject, &mut graph).unwrap();
    let (has_tag, has_value) = (term("tags"), term("value"));
    let tags: Vec<&RdfNode> = graph.objects(&subject, &has_tag).collect();
    assert_eq!(2, tags.len());
    let values = tags.iter()
      .filter(|node| graph.objects(node, &has_value).next().is_some())
      .count();
    assert_eq!(1, values);
    assert_eq!(2 + 2 + 2 + 1, graph.len());
  }
  #[test]
  fn literal_subjects_are_rejected() {
    let mut graph = Graph::new();
    let subject = RdfNode::RawLit{ val: "x".into() };
    assert!(matches!(
      BacnetExporter.export(&analog_value(), &subject, &mut graph),
      Err(CompileError::Export(_))
    ));
  }
}
