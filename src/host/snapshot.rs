//! A `Host` backed by recorded data
//!
//! Captures what a live host would answer: its version string, the classes it
//! can load, how it flattens rich text, the item constructors it exposes, and
//! its advancement registry. Used for tests and for replaying snapshots taken
//! from a running server.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::value::{HostObject, HostValue, ItemStack, TypeRef};
use super::{Advancement, Host, NamespacedKey};
use crate::error::{LookupError, LookupResult};
use crate::text::Component;

/// Converts the host's internal item into the caller-facing item type
pub type ItemConstructor = Arc<dyn Fn(&HostObject) -> Result<ItemStack, String> + Send + Sync>;

/// Recorded host state
pub struct SnapshotHost {
    version: String,
    implementation_package: String,
    classes: HashSet<String>,
    text_methods: HashSet<String>,
    /// (constructed class, parameter class) -> constructor
    constructors: HashMap<(String, String), ItemConstructor>,
    advancements: HashMap<NamespacedKey, Advancement>,
}

impl SnapshotHost {
    /// Create a host reporting `version`, with implementation classes under `package`
    pub fn new(version: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            implementation_package: package.into(),
            classes: HashSet::new(),
            text_methods: HashSet::new(),
            constructors: HashMap::new(),
            advancements: HashMap::new(),
        }
    }

    /// Make a class loadable
    pub fn with_class(mut self, name: &str) -> Self {
        self.classes.insert(name.to_string());
        self
    }

    /// Make a rich-text conversion method available (`getString`, `toPlainText`)
    pub fn with_text_method(mut self, method: &str) -> Self {
        self.text_methods.insert(method.to_string());
        self
    }

    /// Register a constructor `class(param)`; both classes become loadable
    pub fn with_constructor(mut self, class: &str, param: &str, constructor: ItemConstructor) -> Self {
        self.classes.insert(class.to_string());
        self.classes.insert(param.to_string());
        self.constructors
            .insert((class.to_string(), param.to_string()), constructor);
        self
    }

    /// Add an advancement to the registry
    pub fn with_advancement(mut self, advancement: Advancement) -> Self {
        self.advancements
            .insert(advancement.key().clone(), advancement);
        self
    }

    /// Number of registered advancements
    pub fn advancement_count(&self) -> usize {
        self.advancements.len()
    }
}

impl fmt::Debug for SnapshotHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotHost")
            .field("version", &self.version)
            .field("implementation_package", &self.implementation_package)
            .field("classes", &self.classes.len())
            .field("constructors", &self.constructors.len())
            .field("advancements", &self.advancements.len())
            .finish()
    }
}

impl Host for SnapshotHost {
    fn version(&self) -> String {
        self.version.clone()
    }

    fn implementation_package(&self) -> String {
        self.implementation_package.clone()
    }

    fn find_class(&self, name: &str) -> Option<TypeRef> {
        self.classes.contains(name).then(|| TypeRef::new(name))
    }

    fn component_text(&self, component: &Component, method: &str) -> LookupResult<String> {
        if !self.text_methods.contains(method) {
            return Err(LookupError::not_found("chat component", format!("method `{}`", method)));
        }
        Ok(component.plain_text())
    }

    fn construct(&self, class: &TypeRef, arg: &HostObject) -> LookupResult<HostValue> {
        let constructor = self
            .constructors
            .get(&(class.name().to_string(), arg.class().name().to_string()))
            .ok_or_else(|| {
                LookupError::not_found(class.name(), format!("constructor({})", arg.class().simple_name()))
            })?;

        constructor(arg)
            .map(HostValue::Item)
            .map_err(|message| LookupError::invocation(format!("new {}", class.simple_name()), message))
    }

    fn advancement(&self, key: &NamespacedKey) -> Option<Advancement> {
        self.advancements.get(key).cloned()
    }
}
