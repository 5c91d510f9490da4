use {
  std::{fmt, str::FromStr},
  crate::{errors::CastError, primitive::DatatypeTag},
};

const MAX_OBJECT_TYPE: u32 = 1023;
const MAX_PROPERTY_IDENTIFIER: u32 = 4_194_303;
const MAX_INSTANCE: u32 = 4_194_303;

/* Standard object type names, by enumeration value */
const OBJECT_TYPES: &[(&str, u16)] = &[
  ("analog-input", 0),
  ("analog-output", 1),
  ("analog-value", 2),
  ("binary-input", 3),
  ("binary-output", 4),
  ("binary-value", 5),
  ("calendar", 6),
  ("command", 7),
  ("device", 8),
  ("event-enrollment", 9),
  ("file", 10),
  ("group", 11),
  ("loop", 12),
  ("multi-state-input", 13),
  ("multi-state-output", 14),
  ("notification-class", 15),
  ("program", 16),
  ("schedule", 17),
  ("averaging", 18),
  ("multi-state-value", 19),
  ("trend-log", 20),
  ("life-safety-point", 21),
  ("life-safety-zone", 22),
  ("accumulator", 23),
  ("pulse-converter", 24),
  ("event-log", 25),
  ("global-group", 26),
  ("trend-log-multiple", 27),
  ("load-control", 28),
  ("structured-view", 29),
  ("access-door", 30),
  ("timer", 31),
  ("access-credential", 32),
  ("access-point", 33),
  ("access-rights", 34),
  ("access-user", 35),
  ("access-zone", 36),
  ("credential-data-input", 37),
  ("bitstring-value", 39),
  ("characterstring-value", 40),
  ("date-pattern-value", 41),
  ("date-value", 42),
  ("datetime-pattern-value", 43),
  ("datetime-value", 44),
  ("integer-value", 45),
  ("large-analog-value", 46),
  ("octetstring-value", 47),
  ("positive-integer-value", 48),
  ("time-pattern-value", 49),
  ("time-value", 50),
  ("notification-forwarder", 51),
  ("alert-enrollment", 52),
  ("channel", 53),
  ("lighting-output", 54),
  ("binary-lighting-output", 55),
  ("network-port", 56),
  ("elevator-group", 57),
  ("escalator", 58),
  ("lift", 59),
  ("staging", 60),
];

/* Standard property identifier names, by enumeration value */
const PROPERTY_IDENTIFIERS: &[(&str, u32)] = &[
  ("acked-transitions", 0),
  ("ack-required", 1),
  ("action", 2),
  ("active-text", 4),
  ("all", 8),
  ("apdu-timeout", 11),
  ("application-software-version", 12),
  ("cov-increment", 22),
  ("deadband", 25),
  ("description", 28),
  ("device-address-binding", 30),
  ("event-enable", 35),
  ("event-state", 36),
  ("exception-schedule", 38),
  ("firmware-revision", 44),
  ("high-limit", 45),
  ("inactive-text", 46),
  ("limit-enable", 52),
  ("local-date", 56),
  ("local-time", 57),
  ("location", 58),
  ("low-limit", 59),
  ("max-apdu-length-accepted", 62),
  ("max-pres-value", 65),
  ("min-pres-value", 69),
  ("model-name", 70),
  ("notification-class", 17),
  ("notify-type", 72),
  ("number-of-apdu-retries", 73),
  ("number-of-states", 74),
  ("object-identifier", 75),
  ("object-list", 76),
  ("object-name", 77),
  ("object-type", 79),
  ("out-of-service", 81),
  ("polarity", 84),
  ("present-value", 85),
  ("priority-array", 87),
  ("protocol-object-types-supported", 96),
  ("protocol-services-supported", 97),
  ("protocol-version", 98),
  ("reliability", 103),
  ("relinquish-default", 104),
  ("resolution", 106),
  ("segmentation-supported", 107),
  ("state-text", 110),
  ("status-flags", 111),
  ("system-status", 112),
  ("time-delay", 113),
  ("units", 117),
  ("vendor-identifier", 120),
  ("vendor-name", 121),
  ("weekly-schedule", 123),
  ("effective-period", 32),
  ("schedule-default", 174),
  ("database-revision", 155),
  ("profile-name", 168),
  ("protocol-revision", 139),
  ("event-time-stamps", 130),
  ("reliability-evaluation-inhibit", 357),
  ("profile-location", 485),
  ("tags", 486),
];

fn name_to_value<V: Copy>(table: &[(&'static str, V)], name: &str) -> Option<V> {
  table.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}
fn value_to_name<V: Copy + PartialEq>(table: &[(&'static str, V)], value: V) -> Option<&'static str> {
  table.iter().find(|(_, v)| *v == value).map(|(n, _)| *n)
}

/* Either a known name or a number no larger than `max` */
fn parse_enumeration(
  datatype: DatatypeTag,
  value: &str,
  max: u32,
  by_name: impl Fn(&str) -> Option<u32>,
) -> Result<u32, CastError> {
  let trimmed = value.trim();
  if let Some(v) = by_name(trimmed) {
    return Ok(v)
  }
  if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
    return Err(CastError::unknown_name(datatype, value))
  }
  match trimmed.parse::<u32>() {
    Ok(v) if v <= max => Ok(v),
    _ => Err(CastError::out_of_range(datatype, value)),
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectType(u16);
impl ObjectType {
  /// Looks up a standard object type by its hyphenated name.
  pub fn named(name: &str) -> Option<Self> {
    name_to_value(OBJECT_TYPES, name).map(ObjectType)
  }
  pub fn value(self) -> u16 {
    self.0
  }
  /// The standard name, absent for proprietary or unassigned values.
  pub fn name(self) -> Option<&'static str> {
    value_to_name(OBJECT_TYPES, self.0)
  }
}
impl FromStr for ObjectType {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self, CastError> {
    let v = parse_enumeration(DatatypeTag::ObjectType, s, MAX_OBJECT_TYPE, |name| {
      name_to_value(OBJECT_TYPES, name).map(u32::from)
    })?;
    Ok(ObjectType(v as u16))
  }
}
impl fmt::Display for ObjectType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.name() {
      Some(name) => f.write_str(name),
      None => write!(f, "{}", self.0),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyIdentifier(u32);
impl PropertyIdentifier {
  pub fn named(name: &str) -> Option<Self> {
    name_to_value(PROPERTY_IDENTIFIERS, name).map(PropertyIdentifier)
  }
  pub fn value(self) -> u32 {
    self.0
  }
  pub fn name(self) -> Option<&'static str> {
    value_to_name(PROPERTY_IDENTIFIERS, self.0)
  }
}
impl FromStr for PropertyIdentifier {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self, CastError> {
    parse_enumeration(DatatypeTag::PropertyIdentifier, s, MAX_PROPERTY_IDENTIFIER, |name| {
      name_to_value(PROPERTY_IDENTIFIERS, name)
    })
    .map(PropertyIdentifier)
  }
}
impl fmt::Display for PropertyIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.name() {
      Some(name) => f.write_str(name),
      None => write!(f, "{}", self.0),
    }
  }
}

/// `<object-type>,<instance>`; a `:` separator is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier {
  pub object_type: ObjectType,
  pub instance: u32,
}
impl FromStr for ObjectIdentifier {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self, CastError> {
    let (object_type, instance) = s.split_once(|c: char| c == ',' || c == ':')
      .ok_or_else(|| CastError::malformed(DatatypeTag::ObjectIdentifier, s))?;
    let object_type = object_type.parse::<ObjectType>()?;
    let instance = instance.trim();
    if instance.is_empty() || !instance.bytes().all(|b| b.is_ascii_digit()) {
      return Err(CastError::malformed(DatatypeTag::ObjectIdentifier, s))
    }
    match instance.parse::<u32>() {
      Ok(instance) if instance <= MAX_INSTANCE => Ok(ObjectIdentifier { object_type, instance }),
      _ => Err(CastError::out_of_range(DatatypeTag::ObjectIdentifier, s)),
    }
  }
}
impl fmt::Display for ObjectIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{},{}", self.object_type, self.instance)
  }
}

#[cfg(test)]
mod enum_tests {
  use super::*;

  #[test]
  fn object_types_by_name_or_number() {
    assert_eq!(Ok(ObjectType(2)), "analog-value".parse::<ObjectType>());
    assert_eq!(Ok(ObjectType(2)), "2".parse::<ObjectType>());
    assert_eq!(Some("device"), ObjectType(8).name());
    assert_eq!("700", ObjectType(700).to_string());
    assert!(matches!("analog-valu".parse::<ObjectType>(), Err(CastError::UnknownName { .. })));
    assert!(matches!("1024".parse::<ObjectType>(), Err(CastError::OutOfRange { .. })));
  }
  #[test]
  fn property_identifiers() {
    assert_eq!(Some(PropertyIdentifier(85)), PropertyIdentifier::named("present-value"));
    assert_eq!("tags", "486".parse::<PropertyIdentifier>().unwrap().to_string());
    assert!("presentValue".parse::<PropertyIdentifier>().is_err());
  }
  #[test]
  fn object_identifiers() {
    let id: ObjectIdentifier = "analog-value,1".parse().unwrap();
    assert_eq!(ObjectType(2), id.object_type);
    assert_eq!(1, id.instance);
    assert_eq!(id, "analog-value:1".parse::<ObjectIdentifier>().unwrap());
    assert_eq!("binary-input,4194303", "3,4194303".parse::<ObjectIdentifier>().unwrap().to_string());
    assert!("analog-value".parse::<ObjectIdentifier>().is_err());
    assert!("analog-value,x".parse::<ObjectIdentifier>().is_err());
    assert!(matches!("analog-value,4194304".parse::<ObjectIdentifier>(), Err(CastError::OutOfRange { .. })));
  }
}
