/*
  The two editable row sequences: object properties and tags.
  Rows carry their text as entered; `invalid` is derived.
*/

use {
  std::convert::TryFrom,
  serde::{Serialize, Deserialize},
  tracing::debug,
  crate::{
    errors::{CastError, ParserError},
    primitive::{CastValue, DatatypeTag},
  },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRow {
  pub id: u32,
  pub name: String,
  pub value: String,
  pub datatype: DatatypeTag,
  /// Recomputed by [`PropertyRow::validate`], never read from input.
  #[serde(default, skip_deserializing)]
  pub invalid: bool,
}
impl PropertyRow {
  pub fn new(id: u32, name: impl Into<String>, value: impl Into<String>, datatype: DatatypeTag) -> Self {
    let mut row = PropertyRow {
      id,
      name: name.into(),
      value: value.into(),
      datatype,
      invalid: false,
    };
    row.validate();
    row
  }
  /// Casts `value` under `datatype`.
  pub fn cast(&self) -> Result<Option<CastValue>, CastError> {
    self.datatype.cast(&self.value)
  }
  /// Refreshes `invalid` and returns true iff the value casts.
  pub fn validate(&mut self) -> bool {
    let result = self.cast();
    if let Err(err) = &result {
      debug!(id = self.id, name = %self.name, error = %err, "invalid row");
    }
    self.invalid = result.is_err();
    !self.invalid
  }
}

/// A change to one cell of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
  Name(String),
  Value(String),
  Datatype(DatatypeTag),
}

/// An ordered row sequence with monotonically assigned ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PropertyRow>", into = "Vec<PropertyRow>")]
pub struct PropertyTable {
  rows: Vec<PropertyRow>,
  /* one past the largest id handed out; reaches 2^32 once `u32::MAX` is used */
  next_id: u64,
}

/* Public */
impl PropertyTable {
  pub fn new(mut rows: Vec<PropertyRow>) -> Self {
    rows.iter_mut().for_each(|row| { row.validate(); });
    let next_id = rows.iter().map(|row| u64::from(row.id) + 1).max().unwrap_or(0);
    PropertyTable { rows, next_id }
  }
  pub fn rows(&self) -> &[PropertyRow] {
    &self.rows
  }
  pub fn len(&self) -> usize {
    self.rows.len()
  }
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
  pub fn get(&self, id: u32) -> Option<&PropertyRow> {
    self.rows.iter().find(|row| row.id == id)
  }
  /// Appends a placeholder character-string row and returns its id,
  /// or `None` once every id has been handed out.
  pub fn add_row(&mut self) -> Option<u32> {
    self.push("tag-name", "tag-value", DatatypeTag::CharacterString)
  }
  /// Appends a row with the next id and returns that id, or `None`
  /// (appending nothing) once every id has been handed out.
  pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>, datatype: DatatypeTag) -> Option<u32> {
    let id = self.take_id()?;
    self.rows.push(PropertyRow::new(id, name, value, datatype));
    Some(id)
  }
  pub fn delete_row(&mut self, id: u32) -> bool {
    match self.rows.iter().position(|row| row.id == id) {
      Some(index) => {
        self.rows.remove(index);
        true
      },
      None => {
        debug!(id, "no row to delete");
        false
      },
    }
  }
  /// Applies `edit` and returns the row's new validity, or `None` when no
  /// row has that id.
  pub fn edit(&mut self, id: u32, edit: Edit) -> Option<bool> {
    let row = self.rows.iter_mut().find(|row| row.id == id)?;
    match edit {
      Edit::Name(name) => row.name = name,
      Edit::Value(value) => row.value = value,
      Edit::Datatype(datatype) => row.datatype = datatype,
    }
    Some(row.validate())
  }
  pub fn invalid_rows(&self) -> impl Iterator<Item = &PropertyRow> {
    self.rows.iter().filter(|row| row.invalid)
  }
}

/* Private */
impl PropertyTable {
  fn take_id(&mut self) -> Option<u32> {
    match u32::try_from(self.next_id) {
      Ok(id) => {
        self.next_id += 1;
        Some(id)
      },
      Err(_) => {
        debug!(next_id = self.next_id, "row ids exhausted");
        None
      },
    }
  }
}

impl From<Vec<PropertyRow>> for PropertyTable {
  fn from(rows: Vec<PropertyRow>) -> Self {
    PropertyTable::new(rows)
  }
}
impl From<PropertyTable> for Vec<PropertyRow> {
  fn from(table: PropertyTable) -> Self {
    table.rows
  }
}

/// Both row sequences, in the JSON form
/// `{ "objectProperties": [...], "tags": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  pub object_properties: PropertyTable,
  #[serde(default)]
  pub tags: PropertyTable,
}
impl Document {
  pub fn from_json(text: &str) -> Result<Self, ParserError> {
    Ok(serde_json::from_str(text)?)
  }
  pub fn to_json(&self) -> Result<String, ParserError> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}
/* An analog value with a name and no tags */
impl Default for Document {
  fn default() -> Self {
    Document {
      object_properties: PropertyTable::new(vec![
        PropertyRow::new(0, "object-name", "Analog Value 1", DatatypeTag::CharacterString),
        PropertyRow::new(1, "object-identifier", "analog-value,1", DatatypeTag::ObjectIdentifier),
        PropertyRow::new(2, "object-type", "analog-value", DatatypeTag::ObjectType),
      ]),
      tags: PropertyTable::default(),
    }
  }
}
