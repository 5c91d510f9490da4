use {
  std::collections::{BTreeMap, BTreeSet},
  crate::{
    object::ObjectInstance,
    primitive::ObjectType,
  },
};

/// Answers which object types exist and which properties each admits.
pub trait ObjectDirectory {
  /// The hyphenated property names legal for `object_type`, or `None` when
  /// the type is unknown to the directory.
  fn attributes(&self, object_type: ObjectType) -> Option<&BTreeSet<String>>;
  /// An empty instance of `object_type`, or `None` when the type is unknown.
  fn instantiate(&self, object_type: ObjectType) -> Option<ObjectInstance> {
    self.attributes(object_type).map(|_| ObjectInstance::new(object_type))
  }
}

/* Property sets shared by several object types */
const COMMON: &[&str] = &[
  "object-identifier", "object-name", "object-type", "description",
  "property-list", "profile-name", "tags",
];
const STATUS: &[&str] = &["status-flags", "event-state", "reliability", "out-of-service"];
const COMMANDABLE: &[&str] = &["priority-array", "relinquish-default", "current-command-priority"];
const ANALOG: &[&str] = &[
  "present-value", "units", "cov-increment", "min-pres-value", "max-pres-value",
  "resolution", "high-limit", "low-limit", "deadband", "device-type",
];
const BINARY: &[&str] = &[
  "present-value", "polarity", "active-text", "inactive-text", "device-type",
  "change-of-state-count", "change-of-state-time", "elapsed-active-time",
];
const MULTI_STATE: &[&str] = &["present-value", "number-of-states", "state-text", "device-type"];
const DEVICE: &[&str] = &[
  "system-status", "vendor-name", "vendor-identifier", "model-name",
  "firmware-revision", "application-software-version", "location",
  "protocol-version", "protocol-revision", "protocol-services-supported",
  "protocol-object-types-supported", "object-list", "max-apdu-length-accepted",
  "segmentation-supported", "apdu-timeout", "number-of-apdu-retries",
  "device-address-binding", "database-revision", "serial-number",
];
const SCHEDULE: &[&str] = &[
  "present-value", "effective-period", "weekly-schedule", "exception-schedule",
  "schedule-default", "list-of-object-property-references", "priority-for-writing",
  "status-flags", "reliability", "out-of-service",
];
const VALUE: &[&str] = &["present-value"];
const UPDATE: &[&str] = &["update-interval"];

/// The built-in directory of common standard object types.
#[derive(Debug, Clone)]
pub struct StandardDirectory {
  classes: BTreeMap<ObjectType, BTreeSet<String>>,
}
impl Default for StandardDirectory {
  fn default() -> Self {
    StandardDirectory::new()
  }
}
impl StandardDirectory {
  pub fn new() -> Self {
    let mut directory = StandardDirectory { classes: BTreeMap::new() };
    directory.define("analog-input", &[COMMON, STATUS, ANALOG, UPDATE]);
    directory.define("analog-output", &[COMMON, STATUS, ANALOG, COMMANDABLE]);
    directory.define("analog-value", &[COMMON, STATUS, ANALOG, COMMANDABLE]);
    directory.define("binary-input", &[COMMON, STATUS, BINARY]);
    directory.define("binary-output", &[COMMON, STATUS, BINARY, COMMANDABLE]);
    directory.define("binary-value", &[COMMON, STATUS, BINARY, COMMANDABLE]);
    directory.define("multi-state-input", &[COMMON, STATUS, MULTI_STATE]);
    directory.define("multi-state-output", &[COMMON, STATUS, MULTI_STATE, COMMANDABLE]);
    directory.define("multi-state-value", &[COMMON, STATUS, MULTI_STATE, COMMANDABLE]);
    directory.define("device", &[COMMON, DEVICE]);
    directory.define("schedule", &[COMMON, SCHEDULE]);
    directory.define("characterstring-value", &[COMMON, STATUS, VALUE, COMMANDABLE]);
    directory.define("integer-value", &[COMMON, STATUS, VALUE, COMMANDABLE, &["units", "cov-increment"]]);
    directory
  }
  /// Adds or replaces the property set of an object type.
  pub fn insert(&mut self, object_type: ObjectType, attributes: BTreeSet<String>) {
    self.classes.insert(object_type, attributes);
  }
  pub fn object_types(&self) -> impl Iterator<Item = ObjectType> + '_ {
    self.classes.keys().copied()
  }

  fn define(&mut self, name: &str, groups: &[&[&str]]) {
    if let Some(object_type) = ObjectType::named(name) {
      let attributes = groups.iter()
        .flat_map(|group| group.iter())
        .map(|attribute| attribute.to_string())
        .collect();
      self.insert(object_type, attributes);
    }
  }
}
impl ObjectDirectory for StandardDirectory {
  fn attributes(&self, object_type: ObjectType) -> Option<&BTreeSet<String>> {
    self.classes.get(&object_type)
  }
}
