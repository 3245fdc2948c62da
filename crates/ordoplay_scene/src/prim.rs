// SPDX-License-Identifier: MIT OR Apache-2.0
//! Prim (scene node) definitions.

use crate::path::Path;
use crate::property::{Attribute, AttributeValue, Collection, Property, Relationship};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node in the scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prim {
    /// Absolute prim path
    pub path: Path,
    /// Schema type name (`Xform`, `Mesh`, `Material`, `Shader`, ...), empty when untyped
    #[serde(default)]
    pub type_name: String,
    /// Properties by name, in authored order
    #[serde(default)]
    properties: IndexMap<String, Property>,
    /// Named collections (`collection:<name>`)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    collections: IndexMap<String, Collection>,
}

impl Prim {
    /// Create an empty prim
    pub fn new(path: Path, type_name: impl Into<String>) -> Self {
        Self {
            path,
            type_name: type_name.into(),
            properties: IndexMap::new(),
            collections: IndexMap::new(),
        }
    }

    /// Prim name (last path element)
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Whether the prim has the given schema type
    pub fn is_a(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }

    /// Get a property by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Get all properties in authored order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.property(name).and_then(Property::as_attribute)
    }

    /// Get a relationship by name
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.property(name).and_then(Property::as_relationship)
    }

    /// Relationships whose name starts with `prefix`, in authored order
    pub fn relationships_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Relationship)> + 'a {
        self.properties.iter().filter_map(move |(name, p)| {
            let rel = p.as_relationship()?;
            name.starts_with(prefix).then_some((name.as_str(), rel))
        })
    }

    /// Set (or replace) an attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.properties
            .insert(name.into(), Property::Attribute(Attribute::new(value)));
    }

    /// Connect an attribute to the attribute at `target`
    pub fn set_connection(&mut self, name: impl Into<String>, target: Path) {
        self.properties
            .insert(name.into(), Property::Attribute(Attribute::connection(target)));
    }

    /// Set (or replace) a relationship
    pub fn set_relationship(&mut self, name: impl Into<String>, relationship: Relationship) {
        self.properties
            .insert(name.into(), Property::Relationship(relationship));
    }

    /// Remove a property
    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        self.properties.shift_remove(name)
    }

    /// Builder form of [`Prim::set_attribute`]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Prim::set_connection`]
    pub fn with_connection(mut self, name: impl Into<String>, target: Path) -> Self {
        self.set_connection(name, target);
        self
    }

    /// Builder form of [`Prim::set_relationship`]
    pub fn with_relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.set_relationship(name, relationship);
        self
    }

    /// Get a collection by name
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Define (or replace) a collection
    pub fn set_collection(&mut self, name: impl Into<String>, collection: Collection) {
        self.collections.insert(name.into(), collection);
    }

    /// Get all collections
    pub fn collections(&self) -> impl Iterator<Item = (&str, &Collection)> {
        self.collections.iter().map(|(name, c)| (name.as_str(), c))
    }
}
