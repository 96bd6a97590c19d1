//! Host boundary
//!
//! The host owns every object this crate reads. Access goes through the
//! `Host` trait so the resolver can run against a live bridge or against
//! recorded snapshots (`SnapshotHost`) in tests.

mod finder;
mod snapshot;
mod value;

pub use finder::FieldFinder;
pub use snapshot::{ItemConstructor, SnapshotHost};
pub use value::{
    types, FieldDecl, HostObject, HostObjectBuilder, HostValue, ItemStack, MethodDecl, TypeRef,
    Visibility,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::LookupResult;
use crate::text::Component;

/// Services the host application provides
pub trait Host {
    /// Free-form version string, e.g. `"git-Paper-196 (MC: 1.20.4)"`
    fn version(&self) -> String;

    /// Package holding the server implementation classes
    /// (e.g. `org.bukkit.craftbukkit.v1_16_R3`)
    fn implementation_package(&self) -> String;

    /// Look a class up by fully qualified name
    fn find_class(&self, name: &str) -> Option<TypeRef>;

    /// Call a zero-argument method on a host object
    fn invoke(&self, target: &HostObject, method: &str) -> LookupResult<HostValue> {
        target.invoke(method)
    }

    /// Flatten rich text with the named host conversion method
    fn component_text(&self, component: &Component, method: &str) -> LookupResult<String>;

    /// Run the constructor of `class` whose single parameter is `arg`'s runtime type
    fn construct(&self, class: &TypeRef, arg: &HostObject) -> LookupResult<HostValue>;

    /// Look an advancement up in the host registry
    fn advancement(&self, key: &NamespacedKey) -> Option<Advancement>;
}

/// A `namespace:key` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespacedKey {
    pub namespace: String,
    pub key: String,
}

impl NamespacedKey {
    /// Create a key from its namespace and path
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Key in the default `minecraft` namespace
    pub fn minecraft(key: impl Into<String>) -> Self {
        Self::new("minecraft", key)
    }

    /// Parse `namespace:key`; a bare key lands in the `minecraft` namespace
    pub fn parse(s: &str) -> Option<Self> {
        let (namespace, key) = match s.split_once(':') {
            Some((namespace, key)) => (namespace, key),
            None => ("minecraft", s),
        };
        if namespace.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self::new(namespace, key))
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

/// The public advancement object the host hands out
#[derive(Debug, Clone, PartialEq)]
pub struct Advancement {
    key: NamespacedKey,
    object: Arc<HostObject>,
}

impl Advancement {
    /// Pair a key with its public host object
    pub fn new(key: NamespacedKey, object: Arc<HostObject>) -> Self {
        Self { key, object }
    }

    /// Get the advancement key
    pub fn key(&self) -> &NamespacedKey {
        &self.key
    }

    /// Get the public host object
    pub fn object(&self) -> &Arc<HostObject> {
        &self.object
    }
}
