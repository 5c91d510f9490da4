use {
  std::collections::BTreeMap,
  percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS},
  crate::{
    errors::CompileError,
    rdf::vocab::{rdf, rdfs, xsd},
    RdfNode,
  },
};

type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Namespace(String);
impl Namespace {
  pub fn new(iri: impl Into<String>) -> Self {
    Namespace(iri.into())
  }
  pub fn as_str(&self) -> &str {
    &self.0
  }
  pub fn term(&self, suffix: &str) -> RdfNode {
    iri_node(&format!("{}{}", self.0, suffix))
  }
}

/* Characters an IRI cannot carry as-is */
const IRI_UNSAFE: &AsciiSet = &CONTROLS
  .add(b' ').add(b'<').add(b'>').add(b'"').add(b'{').add(b'}')
  .add(b'|').add(b'^').add(b'`').add(b'\\');

/// A named node with spaces, delimiters and non-ASCII characters
/// percent-encoded, so that the IRI can be written between `<` and `>`.
pub fn iri_node(iri: &str) -> RdfNode {
  RdfNode::named(utf8_percent_encode(iri, IRI_UNSAFE).to_string())
}

/// Maps any text to a Turtle-safe blank node label: characters other than
/// ASCII letters, digits, `_` and `-` become `-`, and a label that would
/// start with `-` (or be empty) gets a leading `_`.
pub fn blank_label(text: &str) -> String {
  let label: String = text.trim()
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
    .collect();
  match label.chars().next() {
    None | Some('-') => format!("_{}", label),
    Some(_) => label,
  }
}

/// Strips one pair of surrounding angle brackets, if present.
pub fn strip_angle_brackets(text: &str) -> Option<&str> {
  text.strip_prefix('<').and_then(|rest| rest.strip_suffix('>'))
}

/// Name-resolution state for one compilation pass. Built fresh for every
/// pass; `base`, `subject_id` and `language` are set at most once by the
/// directive processor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverContext {
  pub base: Option<String>,
  pub subject_id: Option<String>,
  pub language: Option<String>,
  pub prefixes: BTreeMap<String, Namespace>,
}
impl Default for ResolverContext {
  fn default() -> Self {
    ResolverContext::new()
  }
}
impl ResolverContext {
  /// A context holding only the default `rdf`, `rdfs` and `xsd` prefixes.
  pub fn new() -> Self {
    let mut prefixes = BTreeMap::new();
    prefixes.insert("rdf".to_string(), Namespace::new(rdf::NS));
    prefixes.insert("rdfs".to_string(), Namespace::new(rdfs::NS));
    prefixes.insert("xsd".to_string(), Namespace::new(xsd::NS));
    ResolverContext {
      base: None,
      subject_id: None,
      language: None,
      prefixes,
    }
  }
  pub fn with_prefixes<'a, I>(extra: I) -> Self
  where
    I: IntoIterator<Item = (&'a String, &'a String)>,
  {
    let mut context = ResolverContext::new();
    for (prefix, iri) in extra {
      context.prefixes.insert(prefix.clone(), Namespace::new(iri.as_str()));
    }
    context
  }

  /// Resolves a short name:
  /// `<iri>` is taken as-is, a bare name is appended to the base,
  /// `_:label` is a blank node and `prefix:suffix` expands a known prefix.
  /// IRIs come out percent-encoded and blank labels Turtle-safe.
  pub fn resolve(&self, name: &str) -> Result<RdfNode> {
    if let Some(iri) = strip_angle_brackets(name) {
      return Ok(iri_node(iri))
    }
    match name.split_once(':') {
      None => match &self.base {
        Some(base) => Ok(iri_node(&format!("{}{}", base, name))),
        None => Err(CompileError::MissingBase(name.to_string())),
      },
      Some(("_", label)) => Ok(RdfNode::blank(blank_label(label))),
      Some((prefix, suffix)) => match self.prefixes.get(prefix) {
        Some(namespace) => Ok(namespace.term(suffix)),
        None => Err(CompileError::UndefinedPrefix(prefix.to_string())),
      },
    }
  }
}
