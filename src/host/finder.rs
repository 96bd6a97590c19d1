//! Field lookup over a host object's declared members
//!
//! Host member names are obfuscated and change between releases, while the
//! declared types and their relative order are comparatively stable. Lookups
//! therefore work by exact type, by a fragment of the type's simple name, or
//! by exact member name, always scanning in declaration order so the same
//! member wins on every call.

use super::value::{FieldDecl, HostObject, HostValue, TypeRef, Visibility};
use crate::error::{LookupError, LookupResult};

/// Locates and reads fields of a single host object
pub struct FieldFinder<'a> {
    parent: &'a HostObject,
}

impl<'a> FieldFinder<'a> {
    /// Create a finder over the given object
    pub fn new(parent: &'a HostObject) -> Self {
        Self { parent }
    }

    /// Runtime class of the object being searched
    pub fn class(&self) -> &TypeRef {
        self.parent.class()
    }

    /// First field whose declared type is exactly `target`
    pub fn search_type(&self, target: &TypeRef) -> Option<&'a FieldDecl> {
        self.parent.fields().iter().find(|field| &field.ty == target)
    }

    /// First field whose declared type's simple name contains `fragment`
    pub fn search_type_name(&self, fragment: &str) -> Option<&'a FieldDecl> {
        self.parent
            .fields()
            .iter()
            .find(|field| field.ty.simple_name().contains(fragment))
    }

    /// Field declared with exactly this name
    pub fn search_name(&self, name: &str) -> Option<&'a FieldDecl> {
        self.parent.fields().iter().find(|field| field.name == name)
    }

    /// Value of the first field of type `target`
    pub fn get_by_type(&self, target: &TypeRef) -> LookupResult<&'a HostValue> {
        let field = self
            .search_type(target)
            .ok_or_else(|| self.missing(format!("field of type {}", target)))?;
        self.read(field)
    }

    /// Value of the first field whose type name contains `fragment`
    pub fn get_by_type_name(&self, fragment: &str) -> LookupResult<&'a HostValue> {
        let field = self
            .search_type_name(fragment)
            .ok_or_else(|| self.missing(format!("field of type *{}*", fragment)))?;
        self.read(field)
    }

    /// Value of the field named `name`
    pub fn get_by_name(&self, name: &str) -> LookupResult<&'a HostValue> {
        let field = self
            .search_name(name)
            .ok_or_else(|| self.missing(format!("field `{}`", name)))?;
        self.read(field)
    }

    /// Non-null value of the field named `name`
    pub fn require_by_name(&self, name: &str) -> LookupResult<&'a HostValue> {
        self.non_null(self.get_by_name(name)?, || format!("value of field `{}`", name))
    }

    /// Non-null value of the first field of type `target`
    pub fn require_by_type(&self, target: &TypeRef) -> LookupResult<&'a HostValue> {
        self.non_null(self.get_by_type(target)?, || format!("value of type {}", target))
    }

    /// Non-null value of the first field whose type name contains `fragment`
    pub fn require_by_type_name(&self, fragment: &str) -> LookupResult<&'a HostValue> {
        self.non_null(self.get_by_type_name(fragment)?, || format!("value of type *{}*", fragment))
    }

    /// Read a located field, lifting the access check when the host allows it
    fn read(&self, field: &'a FieldDecl) -> LookupResult<&'a HostValue> {
        match field.visibility {
            Visibility::Public => Ok(&field.value),
            Visibility::Private => {
                log::trace!("Forcing access to {}.{}", self.class().simple_name(), field.name);
                Ok(&field.value)
            }
            Visibility::Sealed => Err(LookupError::access_denied(self.class().name(), &field.name)),
        }
    }

    fn non_null(
        &self,
        value: &'a HostValue,
        what: impl FnOnce() -> String,
    ) -> LookupResult<&'a HostValue> {
        if value.is_null() {
            Err(self.missing(what()))
        } else {
            Ok(value)
        }
    }

    fn missing(&self, what: String) -> LookupError {
        LookupError::not_found(self.class().name(), what)
    }
}
