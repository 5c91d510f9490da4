use criterion::*;
use bacnet_tag_graph::{Compiler, CompilerConfig, DatatypeTag, PropertyRow};

fn object_rows() -> Vec<PropertyRow> {
  vec![
    PropertyRow::new(0, "object-name", "Zone Temperature", DatatypeTag::CharacterString),
    PropertyRow::new(1, "object-identifier", "analog-value,1", DatatypeTag::ObjectIdentifier),
    PropertyRow::new(2, "object-type", "analog-value", DatatypeTag::ObjectType),
    PropertyRow::new(3, "present-value", "72.5", DatatypeTag::Real),
  ]
}

fn tag_rows(statements: u32) -> Vec<PropertyRow> {
  let mut rows = vec![
    PropertyRow::new(0, "@base", "<http://example.com/site/>", DatatypeTag::CharacterString),
    PropertyRow::new(1, "@language", "en", DatatypeTag::CharacterString),
    PropertyRow::new(2, "ex:", "<http://example.com/ex/>", DatatypeTag::CharacterString),
  ];
  for i in 0..statements {
    let id = rows.len() as u32;
    rows.push(match i % 4 {
      0 => PropertyRow::new(id, format!("note({})", i), format!("note {}", i), DatatypeTag::CharacterString),
      1 => PropertyRow::new(id, format!("ex:reading({})", i), i.to_string(), DatatypeTag::Unsigned),
      2 => PropertyRow::new(id, format!("ex:since({})", i), "2024-01-15 08:30", DatatypeTag::DateTime),
      _ => PropertyRow::new(id, format!("ex:Kind{}", i), "", DatatypeTag::None),
    });
  }
  rows
}

pub fn compile(c: &mut Criterion) {
  let compiler = Compiler::new(CompilerConfig::default());
  let objects = object_rows();
  let mut group = c.benchmark_group("compiler");
  for &size in [10u32, 100, 500].iter() {
    let tags = tag_rows(size);
    group.bench_with_input(BenchmarkId::new("Compiler::compile()", size), &tags,
      |b, tags| b.iter(|| compiler.compile(black_box(&objects), black_box(tags)))
    );
  }
  group.finish();
}

criterion_group!(benches, compile);
criterion_main!(benches);
