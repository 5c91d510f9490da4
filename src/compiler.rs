/*
  One compilation pass: object rows are cast into an instance of
  their declared type, tag rows run through directive processing
  and statement building, and the exporter adds the object itself.
  Nothing is kept between passes.
*/

use {
  tracing::{debug, warn},
  crate::{
    config::CompilerConfig,
    datastore::graph::Graph,
    errors::CompileError,
    object::{BacnetExporter, ObjectDirectory, ObjectExporter, StandardDirectory},
    primitive::{CastValue, NameValue, ObjectType},
    rdf::{
      builder::build_statements,
      directives,
      resolver::{blank_label, ResolverContext},
      vocab::bacnet,
    },
    table::{Document, PropertyRow},
    RdfNode,
  },
};

type Result<T> = std::result::Result<T, CompileError>;

const OBJECT_TYPE: &str = "object-type";
const OBJECT_IDENTIFIER: &str = "object-identifier";

fn required<'r>(rows: &'r [PropertyRow], name: &str) -> Result<&'r str> {
  rows.iter()
    .rev()
    .find(|row| row.name == name)
    .map(|row| row.value.as_str())
    .ok_or_else(|| CompileError::MissingRequiredProperty(name.to_string()))
}

/* Blank node label for an object without `@id`: `analog-value,1` becomes `analog-value-1` */
fn subject_label(identifier: &str) -> String {
  blank_label(identifier)
}

#[derive(Debug, Clone, Default)]
pub struct Compiler<D = StandardDirectory, E = BacnetExporter> {
  config: CompilerConfig,
  directory: D,
  exporter: E,
}

impl Compiler {
  /// A compiler over the built-in directory and `bacnet:` exporter.
  pub fn new(config: CompilerConfig) -> Self {
    Compiler::with_parts(config, StandardDirectory::new(), BacnetExporter)
  }
}

impl<D: ObjectDirectory, E: ObjectExporter> Compiler<D, E> {
  pub fn with_parts(config: CompilerConfig, directory: D, exporter: E) -> Self {
    Compiler { config, directory, exporter }
  }
  pub fn config(&self) -> &CompilerConfig {
    &self.config
  }

  /// Runs a full pass and returns the graph. Any error aborts the pass.
  pub fn compile_graph(&self, object_rows: &[PropertyRow], tag_rows: &[PropertyRow]) -> Result<Graph> {
    let type_text = required(object_rows, OBJECT_TYPE)?;
    let identifier_text = required(object_rows, OBJECT_IDENTIFIER)?;
    let object_type: ObjectType = type_text.parse()
      .map_err(|_| CompileError::SchemaMismatch(format!("Invalid object-type value: {}", type_text)))?;
    let unknown = || CompileError::SchemaMismatch(format!("Unknown object type: {}", object_type));
    let attributes = self.directory.attributes(object_type).ok_or_else(unknown)?;
    let mut object = self.directory.instantiate(object_type).ok_or_else(unknown)?;

    for row in object_rows {
      let value = row.cast()
        .map_err(|source| CompileError::PropertyCast { name: row.name.clone(), source })?;
      if !attributes.contains(&row.name) {
        return Err(CompileError::SchemaMismatch(
          format!("Property name '{}' is not an attribute of {}", row.name, object_type)
        ))
      }
      object.set_attribute(&row.name, value);
    }

    let mut tags = Vec::with_capacity(tag_rows.len());
    for (i, row) in tag_rows.iter().enumerate() {
      if row.name.is_empty() {
        return Err(CompileError::EmptyTagName(i + 1))
      }
      let value = row.cast()
        .map_err(|source| CompileError::TagCast { row: i + 1, source })?;
      debug!(row = i + 1, name = %row.name, datatype = %row.datatype, ?value, "cast tag");
      tags.push(NameValue::new(row.name.clone(), value));
    }

    let context = ResolverContext::with_prefixes(&self.config.extra_prefixes);
    let (context, statements) = directives::process(&tags, context, &self.config.fallback_base())?;

    let mut graph = Graph::new();
    graph.bind(bacnet::PREFIX, bacnet::NS);
    for (prefix, namespace) in context.prefixes.iter() {
      graph.bind(prefix, namespace.as_str());
    }

    let subject = match context.subject_id.as_deref().filter(|id| !id.is_empty()) {
      Some(id) => context.resolve(id)?,
      None => {
        let identifier = match object.attribute(OBJECT_IDENTIFIER) {
          Some(CastValue::ObjectIdentifier(id)) => id.to_string(),
          _ => {
            warn!(value = identifier_text, "object-identifier is not an ObjectIdentifier");
            identifier_text.to_string()
          },
        };
        RdfNode::blank(subject_label(&identifier))
      },
    };
    debug!(subject = %subject, "subject");

    build_statements(&statements, &context, &subject, &mut graph)?;
    object.set_tags(tags);
    self.exporter.export(&object, &subject, &mut graph)?;
    debug!(triples = graph.len(), "compiled");
    Ok(graph)
  }

  /// Runs a full pass and returns the graph as Turtle.
  pub fn compile(&self, object_rows: &[PropertyRow], tag_rows: &[PropertyRow]) -> Result<String> {
    Ok(self.compile_graph(object_rows, tag_rows)?.to_turtle())
  }

  pub fn compile_document(&self, document: &Document) -> Result<String> {
    self.compile(document.object_properties.rows(), document.tags.rows())
  }

  /// The Turtle text, or `Error: <message>` when the pass fails.
  pub fn render(&self, object_rows: &[PropertyRow], tag_rows: &[PropertyRow]) -> String {
    match self.compile(object_rows, tag_rows) {
      Ok(turtle) => turtle,
      Err(err) => {
        debug!(error = %err, "compilation failed");
        format!("Error: {}", err)
      },
    }
  }
}

#[cfg(test)]
mod compiler_tests {
  use {
    super::*,
    crate::{
      errors::CastError,
      primitive::DatatypeTag,
      rdf::vocab::rdf,
    },
  };

  fn object_rows() -> Vec<PropertyRow> {
    vec![
      PropertyRow::new(0, "object-identifier", "analog-value,1", DatatypeTag::ObjectIdentifier),
      PropertyRow::new(1, "object-type", "analog-value", DatatypeTag::ObjectType),
    ]
  }
  fn tag(id: u32, name: &str, value: &str, datatype: DatatypeTag) -> PropertyRow {
    PropertyRow::new(id, name, value, datatype)
  }
  fn compiler() -> Compiler {
    Compiler::new(CompilerConfig::default())
  }

  #[test]
  fn subject_labels() {
    assert_eq!("analog-value-1", subject_label("analog-value,1"));
    assert_eq!("my-device-7", subject_label(" my device:7 "));
  }
  #[test]
  fn blank_subject_from_the_identifier() {
    let graph = compiler().compile_graph(&object_rows(), &[]).unwrap();
    let subject = RdfNode::blank("analog-value-1");
    assert!(graph.contains(&[
      subject,
      RdfNode::named(rdf::TYPE),
      RdfNode::named("http://data.ashrae.org/bacnet/2020#AnalogValueObject"),
    ]));
  }
  #[test]
  fn colon_identifiers_give_the_same_subject() {
    let mut rows = object_rows();
    rows[0].value = "analog-value:1".into();
    let graph = compiler().compile_graph(&rows, &[]).unwrap();
    assert!(graph.iter().all(|[s, _, _]| s == &RdfNode::blank("analog-value-1")));
  }
  #[test]
  fn missing_required_properties() {
    let rows = object_rows();
    match compiler().compile_graph(&rows[..1], &[]) {
      Err(CompileError::MissingRequiredProperty(name)) => assert_eq!("object-type", name),
      other => panic!("unexpected {:?}", other),
    }
    match compiler().compile_graph(&rows[1..], &[]) {
      Err(CompileError::MissingRequiredProperty(name)) => assert_eq!("object-identifier", name),
      other => panic!("unexpected {:?}", other),
    }
  }
  #[test]
  fn schema_mismatches() {
    let mut rows = object_rows();
    rows[1].value = "hot-water".into();
    let err = compiler().compile_graph(&rows, &[]).unwrap_err();
    assert_eq!("Invalid object-type value: hot-water", err.to_string());

    rows[1].value = "trend-log".into();
    assert!(matches!(compiler().compile_graph(&rows, &[]), Err(CompileError::SchemaMismatch(_))));

    let mut rows = object_rows();
    rows.push(PropertyRow::new(2, "polarity", "normal", DatatypeTag::CharacterString));
    let err = compiler().compile_graph(&rows, &[]).unwrap_err();
    assert_eq!("Property name 'polarity' is not an attribute of analog-value", err.to_string());
  }
  #[test]
  fn cast_failures_name_their_source() {
    let mut rows = object_rows();
    rows.push(PropertyRow::new(2, "present-value", "warm", DatatypeTag::Real));
    assert!(matches!(
      compiler().compile_graph(&rows, &[]),
      Err(CompileError::PropertyCast { source: CastError::Malformed { .. }, .. })
    ));
    let tags = [tag(0, "a", "x", DatatypeTag::CharacterString), tag(1, "b", "1.5", DatatypeTag::Integer)];
    assert!(matches!(
      compiler().compile_graph(&object_rows(), &tags),
      Err(CompileError::TagCast { row: 2, .. })
    ));
  }
  #[test]
  fn empty_tag_names() {
    let tags = [tag(0, "", "x", DatatypeTag::CharacterString)];
    assert_eq!("row 1: tag name required", compiler().compile_graph(&object_rows(), &tags).unwrap_err().to_string());
  }
  #[test]
  fn render_reports_errors_as_text() {
    let tags = [tag(0, "@base", "<http://a/>", DatatypeTag::CharacterString), tag(1, "@base", "<http://b/>", DatatypeTag::CharacterString)];
    assert_eq!("Error: row 2: @base already specified", compiler().render(&object_rows(), &tags));
    assert!(compiler().render(&object_rows(), &[]).contains("bacnet:AnalogValueObject"));
  }
  #[test]
  fn a_tags_property_row_is_replaced_by_the_tag_list() {
    let mut rows = object_rows();
    rows.push(PropertyRow::new(2, "tags", "stale", DatatypeTag::CharacterString));
    let tags = [tag(0, "site", "north", DatatypeTag::CharacterString)];
    let graph = compiler().compile_graph(&rows, &tags).unwrap();
    let subject = RdfNode::blank("analog-value-1");
    let has_tags = RdfNode::named("http://data.ashrae.org/bacnet/2020#tags");
    let objects: Vec<&RdfNode> = graph.objects(&subject, &has_tags).collect();
    assert_eq!(1, objects.len());
    assert!(matches!(objects[0], RdfNode::Blank{..}));
    assert!(!graph.iter().any(|[_, _, o]| o == &RdfNode::RawLit{ val: "stale".into() }));
  }
  #[test]
  fn extra_prefixes_are_available() {
    let mut config = CompilerConfig::default();
    config.extra_prefixes.insert("brick".into(), "https://brickschema.org/schema/Brick#".into());
    let compiler = Compiler::new(config);
    let tags = [tag(0, "brick:Temperature_Sensor", "", DatatypeTag::None)];
    let graph = compiler.compile_graph(&object_rows(), &tags).unwrap();
    assert!(graph.contains(&[
      RdfNode::blank("analog-value-1"),
      RdfNode::named(rdf::TYPE),
      RdfNode::named("https://brickschema.org/schema/Brick#Temperature_Sensor"),
    ]));
    assert_eq!(Some("https://brickschema.org/schema/Brick#"), graph.namespace("brick"));
  }
}
