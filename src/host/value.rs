//! Runtime values and objects observed on the host
//!
//! A `HostObject` is a snapshot of one host instance: its runtime class, its
//! declared fields in declaration order, and the results of its zero-argument
//! accessor methods. Strategies only ever read these; nothing here mutates
//! host state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{LookupError, LookupResult};
use crate::text::Component;

/// Well-known host type names
pub mod types {
    pub const MAP: &str = "java.util.Map";
    pub const LIST: &str = "java.util.List";
    pub const STRING: &str = "java.lang.String";
    pub const STRING_GRID: &str = "java.lang.String[][]";
    pub const BOOLEAN: &str = "boolean";
    pub const FLOAT: &str = "float";
    pub const RESOURCE_KEY: &str = "net.minecraft.resources.MinecraftKey";
    pub const CHAT_COMPONENT: &str = "net.minecraft.network.chat.IChatBaseComponent";
}

/// A fully qualified host type name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef(String);

impl TypeRef {
    /// Create a type reference from a fully qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Fully qualified name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name without package or enclosing type (`a.b.Outer$Inner` -> `Inner`)
    pub fn simple_name(&self) -> &str {
        let base = self.0.rsplit('.').next().unwrap_or(&self.0);
        base.rsplit('$').next().unwrap_or(base)
    }

    /// Package portion of the name, empty for primitives
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(i) => &self.0[..i],
            None => "",
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::new(name)
    }
}

/// Member accessibility as declared by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Not visible, but the access check can be lifted
    Private,
    /// Not visible and the host refuses to open it
    Sealed,
}

/// The caller-facing item type produced from the host's internal item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: String,
    pub amount: u32,
}

impl ItemStack {
    /// Create an item stack
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
        }
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemStack{{{} x {}}}", self.material, self.amount)
    }
}

/// A value read from a host field or method
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An enum constant, by name
    Enum(String),
    Text(Component),
    Item(ItemStack),
    Object(Arc<HostObject>),
    List(Vec<HostValue>),
    Map(HashMap<String, HostValue>),
    /// A two-dimensional string array
    Grid(Vec<Vec<String>>),
}

impl HostValue {
    /// Whether this is the null reference
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Short description used in mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) => "int",
            HostValue::Float(_) => "float",
            HostValue::Str(_) => "string",
            HostValue::Enum(_) => "enum",
            HostValue::Text(_) => "text",
            HostValue::Item(_) => "item",
            HostValue::Object(_) => "object",
            HostValue::List(_) => "list",
            HostValue::Map(_) => "map",
            HostValue::Grid(_) => "grid",
        }
    }

    /// Read a boolean
    pub fn as_bool(&self) -> LookupResult<bool> {
        match self {
            HostValue::Bool(b) => Ok(*b),
            other => Err(LookupError::type_mismatch("bool", other.kind())),
        }
    }

    /// Read a float
    pub fn as_f32(&self) -> LookupResult<f32> {
        match self {
            HostValue::Float(f) => Ok(*f as f32),
            HostValue::Int(i) => Ok(*i as f32),
            other => Err(LookupError::type_mismatch("float", other.kind())),
        }
    }

    /// Read a string
    pub fn as_str(&self) -> LookupResult<&str> {
        match self {
            HostValue::Str(s) => Ok(s),
            other => Err(LookupError::type_mismatch("string", other.kind())),
        }
    }

    /// Read an object reference
    pub fn as_object(&self) -> LookupResult<&Arc<HostObject>> {
        match self {
            HostValue::Object(object) => Ok(object),
            other => Err(LookupError::type_mismatch("object", other.kind())),
        }
    }

    /// String form the host would print for this value (`toString`)
    pub fn display_string(&self) -> Option<String> {
        match self {
            HostValue::Null => None,
            HostValue::Bool(b) => Some(b.to_string()),
            HostValue::Int(i) => Some(i.to_string()),
            HostValue::Float(f) => Some(f.to_string()),
            HostValue::Str(s) | HostValue::Enum(s) => Some(s.clone()),
            HostValue::Text(component) => Some(component.plain_text()),
            HostValue::Item(item) => Some(item.to_string()),
            HostValue::Object(object) => Some(object.class().name().to_string()),
            HostValue::List(_) | HostValue::Map(_) | HostValue::Grid(_) => None,
        }
    }

    /// Interpret this value as groups of strings
    pub fn to_string_groups(&self) -> LookupResult<Vec<Vec<String>>> {
        match self {
            HostValue::Grid(grid) => Ok(grid.clone()),
            HostValue::List(groups) => groups
                .iter()
                .map(|group| match group {
                    HostValue::List(names) => names
                        .iter()
                        .map(|name| name.as_str().map(str::to_string))
                        .collect(),
                    other => Err(LookupError::type_mismatch("list of strings", other.kind())),
                })
                .collect(),
            other => Err(LookupError::type_mismatch("list of lists", other.kind())),
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<f32> for HostValue {
    fn from(value: f32) -> Self {
        HostValue::Float(value as f64)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Str(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Str(value)
    }
}

impl From<Component> for HostValue {
    fn from(value: Component) -> Self {
        HostValue::Text(value)
    }
}

impl From<ItemStack> for HostValue {
    fn from(value: ItemStack) -> Self {
        HostValue::Item(value)
    }
}

impl From<Arc<HostObject>> for HostValue {
    fn from(value: Arc<HostObject>) -> Self {
        HostValue::Object(value)
    }
}

// =============================================================================
// HOST OBJECTS
// =============================================================================

/// A declared field of a host object
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
    pub value: HostValue,
}

/// A zero-argument method and what calling it produced
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    /// `Err` holds the message of the exception the host threw
    pub outcome: Result<HostValue, String>,
}

/// Snapshot of one host instance
#[derive(Debug, Clone, PartialEq)]
pub struct HostObject {
    class: TypeRef,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
}

impl HostObject {
    /// Start building an object of the given runtime class
    pub fn builder(class: impl Into<TypeRef>) -> HostObjectBuilder {
        HostObjectBuilder {
            object: HostObject {
                class: class.into(),
                fields: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    /// Runtime class
    pub fn class(&self) -> &TypeRef {
        &self.class
    }

    /// Declared fields, in declaration order
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Call a zero-argument method
    pub fn invoke(&self, name: &str) -> LookupResult<HostValue> {
        let method = self
            .methods
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| LookupError::not_found(self.class.name(), format!("method `{}`", name)))?;

        method
            .outcome
            .clone()
            .map_err(|message| LookupError::invocation(name, message))
    }
}

/// Builder for `HostObject`
pub struct HostObjectBuilder {
    object: HostObject,
}

impl HostObjectBuilder {
    /// Declare a public field
    pub fn field(self, name: &str, ty: impl Into<TypeRef>, value: impl Into<HostValue>) -> Self {
        self.declare(name, ty, Visibility::Public, value)
    }

    /// Declare a private field
    pub fn private_field(self, name: &str, ty: impl Into<TypeRef>, value: impl Into<HostValue>) -> Self {
        self.declare(name, ty, Visibility::Private, value)
    }

    /// Declare a field with explicit visibility
    pub fn declare(
        mut self,
        name: &str,
        ty: impl Into<TypeRef>,
        visibility: Visibility,
        value: impl Into<HostValue>,
    ) -> Self {
        self.object.fields.push(FieldDecl {
            name: name.to_string(),
            ty: ty.into(),
            visibility,
            value: value.into(),
        });
        self
    }

    /// Declare a method returning `value`
    pub fn method(mut self, name: &str, value: impl Into<HostValue>) -> Self {
        self.object.methods.push(MethodDecl {
            name: name.to_string(),
            outcome: Ok(value.into()),
        });
        self
    }

    /// Declare a method that throws
    pub fn failing_method(mut self, name: &str, message: &str) -> Self {
        self.object.methods.push(MethodDecl {
            name: name.to_string(),
            outcome: Err(message.to_string()),
        });
        self
    }

    /// Finish the object
    pub fn build(self) -> Arc<HostObject> {
        Arc::new(self.object)
    }
}
