// SPDX-License-Identifier: MIT OR Apache-2.0
//! Properties held by prims: attributes and relationships.

use crate::path::Path;
use crate::time::{TimeCode, TimeSamples};
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadata key carrying a binding's strength token
pub const BIND_MATERIAL_AS: &str = "bindMaterialAs";

/// The active form of an attribute. Exactly one is authored at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A single, non-animated value
    Value(Value),
    /// Values indexed by time
    TimeSampled(TimeSamples),
    /// Reads its value from the attribute at this property path
    Connection(Path),
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<TimeSamples> for AttributeValue {
    fn from(samples: TimeSamples) -> Self {
        Self::TimeSampled(samples)
    }
}

/// A typed slot on a prim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Authored value, samples or connection
    pub value: AttributeValue,
    /// Attribute metadata
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

impl Attribute {
    /// Create an attribute from any authored form
    pub fn new(value: impl Into<AttributeValue>) -> Self {
        Self {
            value: value.into(),
            metadata: IndexMap::new(),
        }
    }

    /// Create a connection to the attribute at `target`
    pub fn connection(target: Path) -> Self {
        Self::new(AttributeValue::Connection(target))
    }

    /// Connection target, if this attribute is connected
    pub fn connection_target(&self) -> Option<&Path> {
        match &self.value {
            AttributeValue::Connection(target) => Some(target),
            _ => None,
        }
    }

    /// Whether this attribute is connected
    pub fn is_connected(&self) -> bool {
        self.connection_target().is_some()
    }

    /// Read the local value at `time`. Connections produce `None`; they are
    /// resolved by the caller.
    pub fn get(&self, time: TimeCode) -> Option<Value> {
        match &self.value {
            AttributeValue::Value(value) => Some(value.clone()),
            AttributeValue::TimeSampled(samples) => samples.sample(time),
            AttributeValue::Connection(_) => None,
        }
    }
}

/// A named set of target paths with metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Target paths in authored order
    pub targets: Vec<Path>,
    /// Relationship metadata
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

impl Relationship {
    /// Create a relationship with the given targets
    pub fn new(targets: impl IntoIterator<Item = Path>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            metadata: IndexMap::new(),
        }
    }

    /// Attach a metadatum
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up a metadatum
    pub fn metadatum(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

/// A property on a prim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    /// Attribute property
    Attribute(Attribute),
    /// Relationship property
    Relationship(Relationship),
}

impl Property {
    /// Get as attribute if possible
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(a) => Some(a),
            Self::Relationship(_) => None,
        }
    }

    /// Get as relationship if possible
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Self::Relationship(r) => Some(r),
            Self::Attribute(_) => None,
        }
    }
}

/// A named set of prims, expressed as include/exclude roots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Included prims; each brings its descendants along
    #[serde(default)]
    pub includes: Vec<Path>,
    /// Excluded prims; each removes its descendants too
    #[serde(default)]
    pub excludes: Vec<Path>,
}

impl Collection {
    /// Create a collection including the given prims
    pub fn including(includes: impl IntoIterator<Item = Path>) -> Self {
        Self {
            includes: includes.into_iter().collect(),
            excludes: Vec::new(),
        }
    }

    /// Exclude a prim and its descendants
    pub fn excluding(mut self, path: Path) -> Self {
        self.excludes.push(path);
        self
    }

    /// Whether `path` is a member by the include/exclude rules
    pub fn contains(&self, path: &Path) -> bool {
        self.includes.iter().any(|inc| path.has_prefix(inc))
            && !self.excludes.iter().any(|exc| path.has_prefix(exc))
    }
}
