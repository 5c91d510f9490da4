/*
  The typed object a pass compiles alongside its tags: which
  properties a type admits, and how an instance lands in a graph.
*/

pub mod directory;
pub mod exporter;

use {
  std::collections::BTreeMap,
  crate::primitive::{CastValue, NameValue, ObjectType},
};

pub use {
  directory::{ObjectDirectory, StandardDirectory},
  exporter::{BacnetExporter, ObjectExporter},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
  pub object_type: ObjectType,
  /// Keyed by hyphenated property name; `None` is a property that was
  /// given with the `None` datatype.
  pub properties: BTreeMap<String, Option<CastValue>>,
  /// Every tag row of the pass, directives included, in row order.
  pub tags: Vec<NameValue>,
}
impl ObjectInstance {
  pub fn new(object_type: ObjectType) -> Self {
    ObjectInstance {
      object_type,
      properties: BTreeMap::new(),
      tags: Vec::new(),
    }
  }
  /// Sets a property, replacing any earlier value.
  pub fn set_attribute(&mut self, name: &str, value: Option<CastValue>) {
    self.properties.insert(name.to_string(), value);
  }
  pub fn attribute(&self, name: &str) -> Option<&CastValue> {
    self.properties.get(name).and_then(Option::as_ref)
  }
  /// Replaces the tag list. A `tags` property row is dropped, since the
  /// tag list is what the object's `tags` attribute holds.
  pub fn set_tags(&mut self, tags: Vec<NameValue>) {
    self.properties.remove(TAGS);
    self.tags = tags;
  }
}

const TAGS: &str = "tags";

#[cfg(test)]
mod instance_tests {
  use super::*;

  #[test]
  fn later_values_replace_earlier_ones() {
    let mut instance = ObjectInstance::new(ObjectType::named("analog-value").unwrap());
    instance.set_attribute("present-value", Some(CastValue::Real(1.0)));
    instance.set_attribute("present-value", Some(CastValue::Real(2.0)));
    instance.set_attribute("description", None);
    assert_eq!(2, instance.properties.len());
    assert_eq!(Some(&CastValue::Real(2.0)), instance.attribute("present-value"));
    assert_eq!(None, instance.attribute("description"));
    assert_eq!(None, instance.attribute("units"));
  }
  #[test]
  fn tag_lists_replace_a_tags_property() {
    let mut instance = ObjectInstance::new(ObjectType::named("analog-value").unwrap());
    instance.set_attribute("tags", Some(CastValue::CharacterString("stale".into())));
    instance.set_tags(vec![NameValue::text("site", "north")]);
    assert_eq!(None, instance.attribute("tags"));
    assert!(instance.properties.is_empty());
    assert_eq!(vec![NameValue::text("site", "north")], instance.tags);
  }
}
