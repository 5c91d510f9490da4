/*
  Turns the statements left over by directive processing into
  triples about the subject.
*/

use {
  once_cell::sync::Lazy,
  regex_lite::Regex,
  tracing::debug,
  crate::{
    datastore::graph::Graph,
    errors::CompileError,
    primitive::CastValue,
    rdf::{
      directives::{strip_uniqueness_suffix, StatementSet},
      encode::atomic_encode,
      resolver::ResolverContext,
      vocab::{rdf, xsd},
    },
    RdfNode,
  },
};

type Result<T> = std::result::Result<T, CompileError>;

static LANGUAGE_TAG: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").expect("valid regex"));

/// A predicate name with its `@lang` or `^^type` annotation split off.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated<'n> {
  pub name: &'n str,
  pub language: Option<&'n str>,
  pub datatype: Option<&'n str>,
}

/// Splits `name@lang` or `name^^type`. `@` is looked for first, so a name
/// carrying both keeps everything after the `@` as its language.
pub fn split_annotation(name: &str) -> Annotated<'_> {
  if let Some((name, language)) = name.split_once('@') {
    return Annotated { name, language: Some(language), datatype: None }
  }
  if let Some((name, datatype)) = name.split_once("^^") {
    return Annotated { name, language: None, datatype: Some(datatype) }
  }
  Annotated { name, language: None, datatype: None }
}

fn language_tag(language: &str) -> Result<String> {
  if LANGUAGE_TAG.is_match(language) {
    Ok(language.to_ascii_lowercase())
  }
  else {
    Err(CompileError::InvalidLanguageTag(language.to_string()))
  }
}

fn literal(name: &str, value: &str, language: Option<&str>, datatype: Option<String>) -> Result<RdfNode> {
  match (language, datatype) {
    (Some(language), Some(datatype)) => Err(CompileError::LanguageWithDatatype {
      name: name.to_string(),
      language: language.to_string(),
      datatype,
    }),
    (Some(language), None) => Ok(RdfNode::LangTaggedLit{ val: value.to_string(), lang: language_tag(language)? }),
    (None, Some(datatype)) => Ok(RdfNode::TypedLit{ val: value.to_string(), datatype }),
    (None, None) => Ok(RdfNode::RawLit{ val: value.to_string() }),
  }
}

/// Adds one triple per statement to `graph`. A statement without a value
/// types the subject with its predicate instead.
///
/// Non-text values are encoded last, once every blank label the tags
/// name is in the graph, so generated nodes never reuse one of them.
pub fn build_statements(
  statements: &StatementSet,
  context: &ResolverContext,
  subject: &RdfNode,
  graph: &mut Graph,
) -> Result<()> {
  graph.reserve_blank(subject);
  let mut encoded = Vec::new();
  for statement in statements {
    let Annotated { name, language, datatype } = split_annotation(strip_uniqueness_suffix(&statement.name));
    let language = language.or_else(|| context.language.as_deref());
    let datatype = match datatype {
      Some(datatype) => match context.resolve(datatype)? {
        RdfNode::Named{ iri } => Some(iri),
        _ => return Err(CompileError::BlankDatatype(datatype.to_string())),
      },
      None => None,
    };
    let predicate = context.resolve(name)?;
    debug!(predicate = %predicate, ?language, ?datatype, "statement");

    let object = match &statement.value {
      None => {
        graph.insert_triple([subject.clone(), RdfNode::named(rdf::TYPE), predicate]);
        continue
      },
      Some(CastValue::CharacterString(text)) => match datatype.as_deref() {
        Some(xsd::ANY_URI) => context.resolve(text)?,
        Some(rdf::PLAIN_LITERAL) => literal(name, text, language, None)?,
        _ => literal(name, text, language, datatype)?,
      },
      Some(value) => {
        encoded.push((predicate, value));
        continue
      },
    };
    debug!(object = %object, "object");
    graph.insert_triple([subject.clone(), predicate, object]);
  }
  for (predicate, value) in encoded {
    let object = atomic_encode(graph, value);
    debug!(object = %object, "object");
    graph.insert_triple([subject.clone(), predicate, object]);
  }
  Ok(())
}
