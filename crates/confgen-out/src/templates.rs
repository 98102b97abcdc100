//! Template loading and management.
//!
//! The artifact templates are compiled into the crate, one per output target.
//! A set can also be built by hand, or a template replaced from a file on disk.

use std::collections::BTreeMap;
use std::path::Path;

use crate::RenderError;

const GO_TEMPLATE: &str = include_str!("../templates/go.hbs");
const RUST_TEMPLATE: &str = include_str!("../templates/rust.hbs");

/// Named templates, iterated in name order
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: BTreeMap<String, String>,
}

impl TemplateSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut set = Self::empty();
        set.insert("go", GO_TEMPLATE);
        set.insert("rust", RUST_TEMPLATE);
        set
    }

    pub fn insert(&mut self, name: &str, template: &str) {
        self.templates.insert(name.to_string(), template.to_string());
    }

    /// Replace or add the template `name` with the content of a file.
    pub fn load_file(&mut self, name: &str, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RenderError::Template(format!("failed to read {}: {}", path.display(), e))
        })?;
        self.insert(name, &content);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
