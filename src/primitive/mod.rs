/*
  The closed registry of primitive datatypes a property or tag
  row may declare, and the typed values their strings cast to.
*/

pub mod date_time;
pub mod enums;

use {
  std::{fmt, hash::{Hash, Hasher}, str::FromStr},
  bitvec::prelude::*,
  serde::{Serialize, Deserialize},
  crate::errors::CastError,
};

pub use {
  date_time::{Date, Time, DateTime},
  enums::{ObjectType, PropertyIdentifier, ObjectIdentifier},
};

type Result<T> = std::result::Result<T, CastError>;

/// The parse function registered for a datatype. `Ok(None)` is the
/// absent value, only produced by [`DatatypeTag::None`].
pub type CastFn = fn(&str) -> Result<Option<CastValue>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatatypeTag {
  None,
  Null,
  Boolean,
  Integer,
  Real,
  Double,
  CharacterString,
  BitString,
  Enumerated,
  ObjectIdentifier,
  ObjectType,
  PropertyIdentifier,
  Date,
  Time,
  Unsigned,
  DateTime,
}
impl DatatypeTag {
  /// Registry order, which is also the order offered to the editing surface.
  pub const ALL: [DatatypeTag; 16] = [
    DatatypeTag::None,
    DatatypeTag::Null,
    DatatypeTag::Boolean,
    DatatypeTag::Integer,
    DatatypeTag::Real,
    DatatypeTag::Double,
    DatatypeTag::CharacterString,
    DatatypeTag::BitString,
    DatatypeTag::Enumerated,
    DatatypeTag::ObjectIdentifier,
    DatatypeTag::ObjectType,
    DatatypeTag::PropertyIdentifier,
    DatatypeTag::Date,
    DatatypeTag::Time,
    DatatypeTag::Unsigned,
    DatatypeTag::DateTime,
  ];

  pub fn name(self) -> &'static str {
    match self {
      DatatypeTag::None => "None",
      DatatypeTag::Null => "Null",
      DatatypeTag::Boolean => "Boolean",
      DatatypeTag::Integer => "Integer",
      DatatypeTag::Real => "Real",
      DatatypeTag::Double => "Double",
      DatatypeTag::CharacterString => "CharacterString",
      DatatypeTag::BitString => "BitString",
      DatatypeTag::Enumerated => "Enumerated",
      DatatypeTag::ObjectIdentifier => "ObjectIdentifier",
      DatatypeTag::ObjectType => "ObjectType",
      DatatypeTag::PropertyIdentifier => "PropertyIdentifier",
      DatatypeTag::Date => "Date",
      DatatypeTag::Time => "Time",
      DatatypeTag::Unsigned => "Unsigned",
      DatatypeTag::DateTime => "DateTime",
    }
  }

  pub fn cast_fn(self) -> CastFn {
    match self {
      DatatypeTag::None => cast_none,
      DatatypeTag::Null => cast_null,
      DatatypeTag::Boolean => cast_boolean,
      DatatypeTag::Integer => cast_integer,
      DatatypeTag::Real => cast_real,
      DatatypeTag::Double => cast_double,
      DatatypeTag::CharacterString => cast_character_string,
      DatatypeTag::BitString => cast_bit_string,
      DatatypeTag::Enumerated => cast_enumerated,
      DatatypeTag::ObjectIdentifier => cast_object_identifier,
      DatatypeTag::ObjectType => cast_object_type,
      DatatypeTag::PropertyIdentifier => cast_property_identifier,
      DatatypeTag::Date => cast_date,
      DatatypeTag::Time => cast_time,
      DatatypeTag::Unsigned => cast_unsigned,
      DatatypeTag::DateTime => cast_date_time,
    }
  }

  pub fn cast(self, value: &str) -> Result<Option<CastValue>> {
    (self.cast_fn())(value)
  }
}
impl fmt::Display for DatatypeTag {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}
impl FromStr for DatatypeTag {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self> {
    DatatypeTag::ALL.iter()
      .copied()
      .find(|tag| tag.name() == s)
      .ok_or_else(|| CastError::UnknownDatatype(s.to_string()))
  }
}

/* Registered parse functions */

fn cast_none(value: &str) -> Result<Option<CastValue>> {
  if value.is_empty() { Ok(None) }
  else { Err(CastError::NotEmpty(DatatypeTag::None)) }
}
fn cast_null(value: &str) -> Result<Option<CastValue>> {
  if value.is_empty() { Ok(Some(CastValue::Null)) }
  else { Err(CastError::NotEmpty(DatatypeTag::Null)) }
}
fn cast_boolean(value: &str) -> Result<Option<CastValue>> {
  match value.to_ascii_lowercase().as_str() {
    "true" => Ok(Some(CastValue::Boolean(true))),
    "false" => Ok(Some(CastValue::Boolean(false))),
    _ => Err(CastError::malformed(DatatypeTag::Boolean, value)),
  }
}
fn cast_integer(value: &str) -> Result<Option<CastValue>> {
  parse_number::<i32>(DatatypeTag::Integer, value).map(|i| Some(CastValue::Integer(i)))
}
fn cast_unsigned(value: &str) -> Result<Option<CastValue>> {
  parse_number::<u32>(DatatypeTag::Unsigned, value).map(|u| Some(CastValue::Unsigned(u)))
}
fn cast_enumerated(value: &str) -> Result<Option<CastValue>> {
  parse_number::<u32>(DatatypeTag::Enumerated, value).map(|u| Some(CastValue::Enumerated(u)))
}
fn cast_real(value: &str) -> Result<Option<CastValue>> {
  value.trim().parse::<f32>()
    .map(|r| Some(CastValue::Real(r)))
    .map_err(|_| CastError::malformed(DatatypeTag::Real, value))
}
fn cast_double(value: &str) -> Result<Option<CastValue>> {
  value.trim().parse::<f64>()
    .map(|d| Some(CastValue::Double(d)))
    .map_err(|_| CastError::malformed(DatatypeTag::Double, value))
}
fn cast_character_string(value: &str) -> Result<Option<CastValue>> {
  Ok(Some(CastValue::CharacterString(value.to_string())))
}
fn cast_bit_string(value: &str) -> Result<Option<CastValue>> {
  value.parse::<BitString>().map(|bits| Some(CastValue::BitString(bits)))
}
fn cast_object_identifier(value: &str) -> Result<Option<CastValue>> {
  value.parse::<ObjectIdentifier>().map(|id| Some(CastValue::ObjectIdentifier(id)))
}
fn cast_object_type(value: &str) -> Result<Option<CastValue>> {
  value.parse::<ObjectType>().map(|t| Some(CastValue::ObjectType(t)))
}
fn cast_property_identifier(value: &str) -> Result<Option<CastValue>> {
  value.parse::<PropertyIdentifier>().map(|p| Some(CastValue::PropertyIdentifier(p)))
}
fn cast_date(value: &str) -> Result<Option<CastValue>> {
  value.parse::<Date>().map(|d| Some(CastValue::Date(d)))
}
fn cast_time(value: &str) -> Result<Option<CastValue>> {
  value.parse::<Time>().map(|t| Some(CastValue::Time(t)))
}
fn cast_date_time(value: &str) -> Result<Option<CastValue>> {
  value.parse::<DateTime>().map(|dt| Some(CastValue::DateTime(dt)))
}

/* Distinguishes "not a number" from "a number that does not fit" */
fn parse_number<N: FromStr>(datatype: DatatypeTag, value: &str) -> Result<N> {
  let trimmed = value.trim();
  let digits = trimmed.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(trimmed);
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return Err(CastError::malformed(datatype, value))
  }
  trimmed.parse::<N>().map_err(|_| CastError::out_of_range(datatype, value))
}

/// A strongly typed value produced by casting a row's text.
#[derive(Debug, Clone)]
pub enum CastValue {
  Null,
  Boolean(bool),
  Integer(i32),
  Unsigned(u32),
  Real(f32),
  Double(f64),
  CharacterString(String),
  BitString(BitString),
  Enumerated(u32),
  ObjectIdentifier(ObjectIdentifier),
  ObjectType(ObjectType),
  PropertyIdentifier(PropertyIdentifier),
  Date(Date),
  Time(Time),
  DateTime(DateTime),
}
impl CastValue {
  pub fn datatype(&self) -> DatatypeTag {
    match self {
      CastValue::Null => DatatypeTag::Null,
      CastValue::Boolean(_) => DatatypeTag::Boolean,
      CastValue::Integer(_) => DatatypeTag::Integer,
      CastValue::Unsigned(_) => DatatypeTag::Unsigned,
      CastValue::Real(_) => DatatypeTag::Real,
      CastValue::Double(_) => DatatypeTag::Double,
      CastValue::CharacterString(_) => DatatypeTag::CharacterString,
      CastValue::BitString(_) => DatatypeTag::BitString,
      CastValue::Enumerated(_) => DatatypeTag::Enumerated,
      CastValue::ObjectIdentifier(_) => DatatypeTag::ObjectIdentifier,
      CastValue::ObjectType(_) => DatatypeTag::ObjectType,
      CastValue::PropertyIdentifier(_) => DatatypeTag::PropertyIdentifier,
      CastValue::Date(_) => DatatypeTag::Date,
      CastValue::Time(_) => DatatypeTag::Time,
      CastValue::DateTime(_) => DatatypeTag::DateTime,
    }
  }
  /// Only character strings are text; every other kind is encoded.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      CastValue::CharacterString(s) => Some(s),
      _ => None,
    }
  }
}
/* Floats compare by bit pattern so that values can live in sets */
impl PartialEq for CastValue {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (CastValue::Null, CastValue::Null) => true,
      (CastValue::Boolean(a), CastValue::Boolean(b)) => a == b,
      (CastValue::Integer(a), CastValue::Integer(b)) => a == b,
      (CastValue::Unsigned(a), CastValue::Unsigned(b)) => a == b,
      (CastValue::Real(a), CastValue::Real(b)) => a.to_bits() == b.to_bits(),
      (CastValue::Double(a), CastValue::Double(b)) => a.to_bits() == b.to_bits(),
      (CastValue::CharacterString(a), CastValue::CharacterString(b)) => a == b,
      (CastValue::BitString(a), CastValue::BitString(b)) => a == b,
      (CastValue::Enumerated(a), CastValue::Enumerated(b)) => a == b,
      (CastValue::ObjectIdentifier(a), CastValue::ObjectIdentifier(b)) => a == b,
      (CastValue::ObjectType(a), CastValue::ObjectType(b)) => a == b,
      (CastValue::PropertyIdentifier(a), CastValue::PropertyIdentifier(b)) => a == b,
      (CastValue::Date(a), CastValue::Date(b)) => a == b,
      (CastValue::Time(a), CastValue::Time(b)) => a == b,
      (CastValue::DateTime(a), CastValue::DateTime(b)) => a == b,
      _ => false,
    }
  }
}
impl Eq for CastValue {}
impl Hash for CastValue {
  fn hash<H: Hasher>(&self, state: &mut H) {
    std::mem::discriminant(self).hash(state);
    match self {
      CastValue::Null => {},
      CastValue::Boolean(b) => b.hash(state),
      CastValue::Integer(i) => i.hash(state),
      CastValue::Unsigned(u) | CastValue::Enumerated(u) => u.hash(state),
      CastValue::Real(r) => r.to_bits().hash(state),
      CastValue::Double(d) => d.to_bits().hash(state),
      CastValue::CharacterString(s) => s.hash(state),
      CastValue::BitString(bits) => bits.hash(state),
      CastValue::ObjectIdentifier(id) => id.hash(state),
      CastValue::ObjectType(t) => t.hash(state),
      CastValue::PropertyIdentifier(p) => p.hash(state),
      CastValue::Date(d) => d.hash(state),
      CastValue::Time(t) => t.hash(state),
      CastValue::DateTime(dt) => dt.hash(state),
    }
  }
}
/* Canonical text: casting it under the same datatype gives the value back */
impl fmt::Display for CastValue {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      CastValue::Null => Ok(()),
      CastValue::Boolean(b) => write!(f, "{}", b),
      CastValue::Integer(i) => write!(f, "{}", i),
      CastValue::Unsigned(u) | CastValue::Enumerated(u) => write!(f, "{}", u),
      CastValue::Real(r) => write!(f, "{}", r),
      CastValue::Double(d) => write!(f, "{}", d),
      CastValue::CharacterString(s) => f.write_str(s),
      CastValue::BitString(bits) => write!(f, "{}", bits),
      CastValue::ObjectIdentifier(id) => write!(f, "{}", id),
      CastValue::ObjectType(t) => write!(f, "{}", t),
      CastValue::PropertyIdentifier(p) => write!(f, "{}", p),
      CastValue::Date(d) => write!(f, "{}", d),
      CastValue::Time(t) => write!(f, "{}", t),
      CastValue::DateTime(dt) => write!(f, "{}", dt),
    }
  }
}

/// A cast tag: the name as entered and its value, absent for `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameValue {
  pub name: String,
  pub value: Option<CastValue>,
}
impl NameValue {
  pub fn new(name: impl Into<String>, value: Option<CastValue>) -> Self {
    NameValue { name: name.into(), value }
  }
  pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
    NameValue::new(name, Some(CastValue::CharacterString(value.into())))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString(BitVec<u8, Msb0>);
impl BitString {
  pub fn len(&self) -> usize {
    self.0.len()
  }
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
  pub fn get(&self, index: usize) -> Option<bool> {
    self.0.get(index).map(|bit| *bit)
  }
}
impl FromStr for BitString {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self> {
    let mut bits = BitVec::<u8, Msb0>::with_capacity(s.len());
    for c in s.chars() {
      match c {
        '0' => bits.push(false),
        '1' => bits.push(true),
        _ => return Err(CastError::malformed(DatatypeTag::BitString, s)),
      }
    }
    Ok(BitString(bits))
  }
}
impl fmt::Display for BitString {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for bit in self.0.iter().by_vals() {
      f.write_str(if bit { "1" } else { "0" })?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod registry_tests {
  use super::*;

  #[test]
  fn datatype_names_round_trip() {
    for tag in DatatypeTag::ALL.iter() {
      assert_eq!(Ok(*tag), tag.name().parse::<DatatypeTag>());
    }
    assert_eq!(
      Err(CastError::UnknownDatatype("OctetString".into())),
      "OctetString".parse::<DatatypeTag>()
    );
  }
  #[test]
  fn none_and_null_only_accept_empty() {
    assert_eq!(Ok(None), DatatypeTag::None.cast(""));
    assert_eq!(Ok(Some(CastValue::Null)), DatatypeTag::Null.cast(""));
    assert_eq!(Err(CastError::NotEmpty(DatatypeTag::None)), DatatypeTag::None.cast("x"));
    assert_eq!(Err(CastError::NotEmpty(DatatypeTag::Null)), DatatypeTag::Null.cast(" "));
  }
  #[test]
  fn numbers_reject_instead_of_coercing() {
    assert!(matches!(DatatypeTag::Integer.cast("abc"), Err(CastError::Malformed { .. })));
    assert!(matches!(DatatypeTag::Integer.cast(""), Err(CastError::Malformed { .. })));
    assert!(matches!(DatatypeTag::Integer.cast("1.5"), Err(CastError::Malformed { .. })));
    assert!(matches!(DatatypeTag::Integer.cast("3000000000"), Err(CastError::OutOfRange { .. })));
    assert!(matches!(DatatypeTag::Unsigned.cast("-1"), Err(CastError::OutOfRange { .. })));
    assert!(matches!(DatatypeTag::Real.cast("warm"), Err(CastError::Malformed { .. })));
    assert_eq!(Ok(Some(CastValue::Integer(-12))), DatatypeTag::Integer.cast("-12"));
    assert_eq!(Ok(Some(CastValue::Real(72.5))), DatatypeTag::Real.cast("72.5"));
  }
  #[test]
  fn booleans_ignore_case() {
    assert_eq!(Ok(Some(CastValue::Boolean(true))), DatatypeTag::Boolean.cast("True"));
    assert_eq!(Ok(Some(CastValue::Boolean(false))), DatatypeTag::Boolean.cast("false"));
    assert!(DatatypeTag::Boolean.cast("1").is_err());
  }
  #[test]
  fn bit_strings() {
    let bits: BitString = "1011".parse().unwrap();
    assert_eq!(4, bits.len());
    assert_eq!(Some(false), bits.get(1));
    assert_eq!(None, bits.get(4));
    assert!("10a1".parse::<BitString>().is_err());
    assert!("".parse::<BitString>().unwrap().is_empty());
  }
  #[test]
  fn canonical_text_recasts_to_itself() {
    let samples = [
      (DatatypeTag::Null, ""),
      (DatatypeTag::Boolean, "true"),
      (DatatypeTag::Integer, "-40"),
      (DatatypeTag::Real, "72.5"),
      (DatatypeTag::Double, "0.125"),
      (DatatypeTag::CharacterString, "Analog Value 1"),
      (DatatypeTag::BitString, "0110"),
      (DatatypeTag::Enumerated, "3"),
      (DatatypeTag::ObjectIdentifier, "analog-value,1"),
      (DatatypeTag::ObjectType, "binary-input"),
      (DatatypeTag::PropertyIdentifier, "present-value"),
      (DatatypeTag::Date, "2024-01-15"),
      (DatatypeTag::Time, "13:45:30.25"),
      (DatatypeTag::Unsigned, "4000000000"),
      (DatatypeTag::DateTime, "2024-01-15 mon 08:00:00.00"),
    ];
    for (tag, text) in samples.iter() {
      let value = tag.cast(text).unwrap().unwrap();
      assert_eq!(*tag, value.datatype());
      assert_eq!(*text, value.to_string());
      assert_eq!(Ok(Some(value.clone())), tag.cast(&value.to_string()));
    }
  }
  #[test]
  fn float_values_compare_by_bits() {
    let nan = CastValue::Real(f32::NAN);
    assert_eq!(nan, nan.clone());
    assert_ne!(CastValue::Double(0.0), CastValue::Double(-0.0));
  }
}
