/*
  Single left-to-right walk over the cast tags. Reserved `@`
  directives and `prefix:` declarations configure the resolver
  context; everything else becomes a statement.
*/

use {
  std::collections::HashSet,
  once_cell::sync::Lazy,
  regex_lite::Regex,
  tracing::{debug, trace},
  crate::{
    errors::CompileError,
    primitive::{CastValue, NameValue},
    rdf::resolver::{strip_angle_brackets, Namespace, ResolverContext},
  },
};

type Result<T> = std::result::Result<T, CompileError>;

/* Lets the editing surface show several rows with the same tag name */
static UNIQUENESS_SUFFIX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[(][0-9]+[)]$").expect("valid regex"));

/// Removes a trailing `(<digits>)` from a tag name.
pub fn strip_uniqueness_suffix(name: &str) -> &str {
  match UNIQUENESS_SUFFIX.find(name) {
    Some(m) => &name[..m.start()],
    None => name,
  }
}

/// A tag destined to become a triple. `name` is kept as entered,
/// uniqueness suffix included, so rows with the same logical name but
/// different values stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
  pub name: String,
  pub value: Option<CastValue>,
}

/// Statements in first-seen order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementSet {
  order: Vec<Statement>,
  seen: HashSet<Statement>,
}
impl StatementSet {
  pub fn new() -> Self {
    StatementSet { order: Vec::new(), seen: HashSet::new() }
  }
  /// Returns false when an identical statement was already present.
  pub fn insert(&mut self, statement: Statement) -> bool {
    if !self.seen.insert(statement.clone()) {
      return false
    }
    self.order.push(statement);
    true
  }
  pub fn len(&self) -> usize {
    self.order.len()
  }
  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
  pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
    self.order.iter()
  }
}
impl<'a> IntoIterator for &'a StatementSet {
  type Item = &'a Statement;
  type IntoIter = std::slice::Iter<'a, Statement>;

  fn into_iter(self) -> Self::IntoIter {
    self.order.iter()
  }
}

#[derive(Clone, Copy)]
enum Directive {
  Base,
  Id,
  Language,
}
impl Directive {
  fn from_name(name: &str) -> Option<Self> {
    match name {
      "@base" => Some(Directive::Base),
      "@id" => Some(Directive::Id),
      "@language" => Some(Directive::Language),
      _ => None,
    }
  }
  fn name(self) -> &'static str {
    match self {
      Directive::Base => "@base",
      Directive::Id => "@id",
      Directive::Language => "@language",
    }
  }
  fn slot(self, context: &mut ResolverContext) -> &mut Option<String> {
    match self {
      Directive::Base => &mut context.base,
      Directive::Id => &mut context.subject_id,
      Directive::Language => &mut context.language,
    }
  }
}

/* Directive and prefix values must be character strings */
fn text_value<'a>(value: &'a Option<CastValue>, row: usize, expected: &str) -> Result<&'a str> {
  value.as_ref()
    .and_then(CastValue::as_str)
    .ok_or_else(|| CompileError::TypeMismatch { row, expected: expected.to_string() })
}

/// Applies every directive and prefix declaration in `tags` to `context`
/// and collects the remaining tags. When no `@base` is given the base
/// becomes `fallback_base`.
pub fn process(
  tags: &[NameValue],
  mut context: ResolverContext,
  fallback_base: &str,
) -> Result<(ResolverContext, StatementSet)> {
  let mut statements = StatementSet::new();
  for (i, tag) in tags.iter().enumerate() {
    let row = i + 1;
    let name = strip_uniqueness_suffix(&tag.name);
    if let Some(directive) = Directive::from_name(name) {
      if directive.slot(&mut context).is_some() {
        return Err(CompileError::DuplicateDirective { row, directive: directive.name().to_string() })
      }
      let text = text_value(&tag.value, row, directive.name())?;
      let text = match directive {
        Directive::Base => strip_angle_brackets(text).unwrap_or(text),
        Directive::Id | Directive::Language => text,
      };
      debug!(row, directive = directive.name(), value = text, "directive");
      *directive.slot(&mut context) = Some(text.to_string());
      continue
    }
    if name.starts_with('@') {
      return Err(CompileError::UnrecognizedDirective { row, name: tag.name.clone() })
    }
    if let Some(prefix) = name.strip_suffix(':') {
      let text = text_value(&tag.value, row, "prefix")?;
      let iri = strip_angle_brackets(text).unwrap_or(text);
      debug!(row, prefix, iri, "prefix declaration");
      context.prefixes.insert(prefix.to_string(), Namespace::new(iri));
      continue
    }
    let inserted = statements.insert(Statement { name: tag.name.clone(), value: tag.value.clone() });
    trace!(row, name = %tag.name, inserted, "statement");
  }
  if context.base.is_none() {
    context.base = Some(fallback_base.to_string());
  }
  debug!(statements = statements.len(), base = ?context.base, "directives processed");
  Ok((context, statements))
}

#[cfg(test)]
mod directive_tests {
  use {
    super::*,
    crate::RdfNode,
  };

  const FALLBACK: &str = "http://example.com/vendor/999/";

  fn run(tags: &[NameValue]) -> Result<(ResolverContext, StatementSet)> {
    process(tags, ResolverContext::new(), FALLBACK)
  }

  #[test]
  fn uniqueness_suffix() {
    assert_eq!("note", strip_uniqueness_suffix("note(1)"));
    assert_eq!("note", strip_uniqueness_suffix("note(12)"));
    assert_eq!("note()", strip_uniqueness_suffix("note()"));
    assert_eq!("note(1)x", strip_uniqueness_suffix("note(1)x"));
    assert_eq!("label@en", strip_uniqueness_suffix("label@en(2)"));
  }
  #[test]
  fn base_defaults_to_fallback() {
    let (context, statements) = run(&[NameValue::text("foo", "x")]).unwrap();
    assert_eq!(Some(FALLBACK.to_string()), context.base);
    assert_eq!(None, context.subject_id);
    assert_eq!(None, context.language);
    assert_eq!(1, statements.len());
  }
  #[test]
  fn directives_configure_the_context() {
    let tags = [
      NameValue::text("@base", "<http://ex/>"),
      NameValue::text("@id", "<http://ex/av1>"),
      NameValue::text("@language", "en"),
      NameValue::text("p:", "<http://x/>"),
      NameValue::text("p:foo", "bar"),
    ];
    let (context, statements) = run(&tags).unwrap();
    assert_eq!(Some("http://ex/".to_string()), context.base);
    assert_eq!(Some("<http://ex/av1>".to_string()), context.subject_id);
    assert_eq!(Some("en".to_string()), context.language);
    assert_eq!(RdfNode::named("http://x/foo"), context.resolve("p:foo").unwrap());
    assert_eq!(vec!["p:foo"], statements.iter().map(|s| s.name.as_str()).collect::<Vec<_>>());
  }
  #[test]
  fn repeated_directives_fail() {
    for directive in ["@base", "@id", "@language"].iter() {
      let tags = [
        NameValue::text("a", "1"),
        NameValue::text(*directive, "http://one/"),
        NameValue::text(format!("{}(2)", directive), "http://two/"),
      ];
      match run(&tags) {
        Err(CompileError::DuplicateDirective { row, directive: d }) => {
          assert_eq!(3, row);
          assert_eq!(*directive, d);
        },
        other => panic!("unexpected {:?}", other),
      }
    }
  }
  #[test]
  fn unknown_directives_fail() {
    assert!(matches!(
      run(&[NameValue::text("@vocab", "http://x/")]),
      Err(CompileError::UnrecognizedDirective { row: 1, .. })
    ));
  }
  #[test]
  fn directive_values_must_be_strings() {
    assert!(matches!(
      run(&[NameValue::new("@base", Some(CastValue::Integer(1)))]),
      Err(CompileError::TypeMismatch { row: 1, .. })
    ));
    assert!(matches!(
      run(&[NameValue::new("p:", None)]),
      Err(CompileError::TypeMismatch { row: 1, .. })
    ));
  }
  #[test]
  fn prefixes_may_be_redeclared() {
    let tags = [
      NameValue::text("p:", "http://one/"),
      NameValue::text("p:", "<http://two/>"),
    ];
    let (context, _) = run(&tags).unwrap();
    assert_eq!(RdfNode::named("http://two/x"), context.resolve("p:x").unwrap());
  }
  #[test]
  fn statements_keep_suffixed_names_and_dedupe() {
    let tags = [
      NameValue::text("note(1)", "a"),
      NameValue::text("note(2)", "b"),
      NameValue::text("note(1)", "a"),
    ];
    let (_, statements) = run(&tags).unwrap();
    assert_eq!(2, statements.len());
  }
  #[test]
  fn large_sets_keep_first_seen_order() {
    let mut set = StatementSet::new();
    for round in 0..2 {
      for i in (0..20_000).rev() {
        let statement = Statement { name: format!("n{}", i), value: Some(CastValue::Unsigned(i)) };
        assert_eq!(round == 0, set.insert(statement));
      }
    }
    assert_eq!(20_000, set.len());
    let names: Vec<&str> = set.iter().take(2).map(|s| s.name.as_str()).collect();
    assert_eq!(vec!["n19999", "n19998"], names);
  }
}
