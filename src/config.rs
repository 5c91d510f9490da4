use {
  std::collections::BTreeMap,
  serde::{Serialize, Deserialize},
  crate::errors::ParserError,
};

pub const DEFAULT_VENDOR_ID: u16 = 999;

/// Settings shared by every pass of a [`crate::Compiler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
  /// Scopes the base used when the tags give no `@base`.
  pub vendor_id: u16,
  /// Replaces the vendor-scoped base outright.
  pub fallback_base: Option<String>,
  /// Prefixes available to every pass on top of `rdf`, `rdfs` and `xsd`.
  pub extra_prefixes: BTreeMap<String, String>,
}
impl Default for CompilerConfig {
  fn default() -> Self {
    CompilerConfig {
      vendor_id: DEFAULT_VENDOR_ID,
      fallback_base: None,
      extra_prefixes: BTreeMap::new(),
    }
  }
}
impl CompilerConfig {
  pub fn from_json(text: &str) -> Result<Self, ParserError> {
    Ok(serde_json::from_str(text)?)
  }
  pub fn fallback_base(&self) -> String {
    match &self.fallback_base {
      Some(base) => base.clone(),
      None => format!("http://example.com/vendor/{}/", self.vendor_id),
    }
  }
}
