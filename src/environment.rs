use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// The public properties of the documentation site the macros run in.
///
/// Deserializes from the site's json config; unknown keys end up in
/// `variables`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteEnvironment {
    pub site_name: String,
    pub site_url: Option<String>,
    pub site_description: Option<String>,
    pub docs_dir: String,
    pub site_dir: String,
    pub use_directory_urls: bool,
    /// Free-form template variables.
    #[serde(flatten)]
    pub variables: BTreeMap<String, Value>,
}

impl SiteEnvironment {
    pub fn new<T: ToString>(site_name: T) -> Self {
        Self {
            site_name: site_name.to_string(),
            ..Default::default()
        }
    }

    pub fn variable<K: ToString, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }
}

impl Default for SiteEnvironment {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            site_url: None,
            site_description: None,
            docs_dir: "docs".to_string(),
            site_dir: "site".to_string(),
            use_directory_urls: true,
            variables: BTreeMap::new(),
        }
    }
}

/// Key the registered macro names are listed under.
pub const MACROS_KEY: &str = "macros";

/// Whether a property is meant to be visible to templates.
#[inline]
pub fn is_public(name: &str) -> bool {
    !name.starts_with('_')
}

/// Maps every public property of `env` to its value.
///
/// [`MACROS_KEY`] lists the names of the registered macros. Properties
/// starting with an underscore are left out, and variables named like a
/// declared property or [`MACROS_KEY`] are dropped.
pub fn describe_environment(
    env: &SiteEnvironment,
    macros: &[&str],
) -> Result<BTreeMap<String, Value>> {
    let mut declared = env.clone();
    let variables = std::mem::take(&mut declared.variables);

    let mut description = BTreeMap::new();
    if let Value::Object(props) = serde_json::to_value(&declared)? {
        description.extend(props);
    }
    let mut names: Vec<_> = macros.iter().map(|name| Value::from(*name)).collect();
    names.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    description.insert(MACROS_KEY.to_string(), Value::Array(names));

    for (name, value) in variables {
        if description.contains_key(&name) {
            log::warn!("Ignoring variable `{}`, it shadows a site property", name);
            continue;
        }
        description.insert(name, value);
    }
    description.retain(|name, _| is_public(name));
    Ok(description)
}
