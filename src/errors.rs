use {
  thiserror::Error,
  crate::primitive::DatatypeTag,
};

type Source<E> = Box<E>;

/* A value string that does not parse under its declared datatype */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
  #[error("value must be an empty string for {0}")]
  NotEmpty(DatatypeTag),
  #[error("invalid {datatype} value '{value}'")]
  Malformed { datatype: DatatypeTag, value: String },
  #[error("{datatype} value '{value}' is out of range")]
  OutOfRange { datatype: DatatypeTag, value: String },
  #[error("unknown {datatype} name '{value}'")]
  UnknownName { datatype: DatatypeTag, value: String },
  #[error("unknown datatype '{0}'")]
  UnknownDatatype(String),
}
impl CastError {
  pub(crate) fn malformed(datatype: DatatypeTag, value: &str) -> Self {
    CastError::Malformed { datatype, value: value.to_string() }
  }
  pub(crate) fn out_of_range(datatype: DatatypeTag, value: &str) -> Self {
    CastError::OutOfRange { datatype, value: value.to_string() }
  }
  pub(crate) fn unknown_name(datatype: DatatypeTag, value: &str) -> Self {
    CastError::UnknownName { datatype, value: value.to_string() }
  }
}

/* Everything that aborts a compilation pass. Tag rows are numbered from 1. */
#[derive(Debug, Error)]
pub enum CompileError {
  #[error("property '{name}': {source}")]
  PropertyCast { name: String, source: CastError },
  #[error("row {row}: {source}")]
  TagCast { row: usize, source: CastError },
  #[error("undefined prefix: {0}")]
  UndefinedPrefix(String),
  #[error("no base IRI to resolve '{0}' against")]
  MissingBase(String),
  #[error("'{0}' does not resolve to a datatype IRI")]
  BlankDatatype(String),
  #[error("row {row}: {directive} already specified")]
  DuplicateDirective { row: usize, directive: String },
  #[error("row {row}: unrecognized directive '{name}'")]
  UnrecognizedDirective { row: usize, name: String },
  #[error("{0} property is required in object properties")]
  MissingRequiredProperty(String),
  #[error("{0}")]
  SchemaMismatch(String),
  #[error("row {row}: {expected} string expected")]
  TypeMismatch { row: usize, expected: String },
  #[error("row {0}: tag name required")]
  EmptyTagName(usize),
  #[error("invalid language tag '{0}'")]
  InvalidLanguageTag(String),
  #[error("'{name}': a literal can only have one of language '{language}' or datatype <{datatype}>")]
  LanguageWithDatatype { name: String, language: String, datatype: String },
  #[error("export failed: {0}")]
  Export(String),
  #[error("{0}")]
  Parser(Source<ParserError>),
}
impl From<ParserError> for CompileError {
  fn from(err: ParserError) -> CompileError {
    CompileError::Parser(Box::new(err))
  }
}

#[derive(Debug, Error)]
pub enum ParserError {
  #[error("{0}")]
  Rio(Source<rio_turtle::TurtleError>),
  #[error("{0}")]
  Serde(Source<serde_json::Error>),
}
impl From<rio_turtle::TurtleError> for ParserError {
  fn from(err: rio_turtle::TurtleError) -> ParserError {
    ParserError::Rio(Box::new(err))
  }
}
impl From<serde_json::Error> for ParserError {
  fn from(err: serde_json::Error) -> ParserError {
    ParserError::Serde(Box::new(err))
  }
}
