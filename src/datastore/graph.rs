use {
  std::collections::BTreeSet,
  bimap::BiBTreeMap,
  crate::{
    RdfNode, RdfTriple,
    rdf::turtle,
  },
};

/* Triples are kept as an ordered set so that equal graphs
     serialize identically and subjects come out grouped.
   Prefix bindings map both ways: a prefix names one namespace
     and a namespace is written with at most one prefix.
   Reserved blanks are never handed out by `fresh_blank`. */
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Graph {
  triples: BTreeSet<RdfTriple>,
  namespaces: BiBTreeMap<String, String>,
  reserved: BTreeSet<RdfNode>,
  blank_max: usize,
}

/* Public */
impl Graph {
  /* Constructors */
  pub fn new() -> Self {
    Graph {
      triples: BTreeSet::new(),
      namespaces: BiBTreeMap::new(),
      reserved: BTreeSet::new(),
      blank_max: 0,
    }
  }
  /* Prefix bindings */
  /// Binds `prefix` to `namespace`, dropping any earlier binding of either.
  pub fn bind(&mut self, prefix: &str, namespace: &str) {
    self.namespaces.insert(prefix.to_string(), namespace.to_string());
  }
  pub fn namespace(&self, prefix: &str) -> Option<&str> {
    self.namespaces.get_by_left(prefix).map(String::as_str)
  }
  pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
    self.namespaces.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
  }
  /// The binding with the longest namespace that `iri` starts with.
  pub fn compact<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
    self.namespaces.iter()
      .filter(|(_, ns)| iri.starts_with(ns.as_str()))
      .max_by_key(|(_, ns)| ns.len())
      .map(|(prefix, ns)| (prefix.as_str(), &iri[ns.len()..]))
  }
  /* Triples */
  /// Returns false when the triple was already present.
  pub fn insert_triple(&mut self, val: RdfTriple) -> bool {
    self.triples.insert(val)
  }
  pub fn remove_triple(&mut self, val: &RdfTriple) -> bool {
    self.triples.remove(val)
  }
  pub fn contains(&self, val: &RdfTriple) -> bool {
    self.triples.contains(val)
  }
  pub fn len(&self) -> usize {
    self.triples.len()
  }
  pub fn is_empty(&self) -> bool {
    self.triples.is_empty()
  }
  pub fn iter(&self) -> impl Iterator<Item = &RdfTriple> {
    self.triples.iter()
  }
  pub fn objects<'a: 'b, 'b>(&'a self, subject: &'b RdfNode, predicate: &'b RdfNode) -> impl Iterator<Item = &'a RdfNode> + 'b {
    self.triples.iter()
      .filter(move |[s, p, _]| s == subject && p == predicate)
      .map(|[_, _, o]| o)
  }
  /// Keeps `node` out of `fresh_blank` even before any triple mentions it.
  pub fn reserve_blank(&mut self, node: &RdfNode) {
    if let RdfNode::Blank{..} = node {
      self.reserved.insert(node.clone());
    }
  }
  /// A blank node whose label is neither reserved nor used anywhere in the graph.
  pub fn fresh_blank(&mut self) -> RdfNode {
    loop {
      let node = RdfNode::blank(format!("b{}", self.blank_max));
      self.blank_max += 1;
      if !self.reserved.contains(&node) && !self.mentions(&node) {
        break node
      }
    }
  }
  /// Adds every triple and prefix binding of `other`.
  pub fn merge(&mut self, other: Graph) {
    for (prefix, namespace) in other.namespaces.iter() {
      self.bind(prefix, namespace);
    }
    self.triples.extend(other.triples);
  }
  pub fn to_turtle(&self) -> String {
    turtle::serialize(self)
  }
}

/* Private */
impl Graph {
  fn mentions(&self, node: &RdfNode) -> bool {
    self.triples.iter().any(|[s, _, o]| s == node || o == node)
  }
}

impl std::iter::FromIterator<RdfTriple> for Graph {
  fn from_iter<I: IntoIterator<Item = RdfTriple>>(iter: I) -> Self {
    let mut graph = Graph::new();
    graph.triples.extend(iter);
    graph
  }
}
