// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stage: the scene graph containing all prims.

use crate::path::{Path, PathError};
use crate::prim::Prim;
use crate::property::Attribute;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only queries the shading resolvers need from a scene graph
pub trait SceneGraph {
    /// Look up a prim by path
    fn prim(&self, path: &Path) -> Option<&Prim>;

    /// Expand the collection at `collection_path` (`/prim.collection:name`)
    /// into its member prim paths
    fn expand_collection(&self, collection_path: &Path) -> Result<Vec<Path>, StageError>;

    /// Look up the attribute named by a property path
    fn attribute(&self, path: &Path) -> Option<&Attribute> {
        let name = path.property_name()?;
        self.prim(&path.prim_path())?.attribute(name)
    }
}

/// A scene description stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name
    pub name: String,
    /// Prims keyed by path; parents always precede their children
    prims: IndexMap<Path, Prim>,
}

impl Stage {
    /// Create a new empty stage
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prims: IndexMap::new(),
        }
    }

    /// Define a new prim. Its parent must already exist unless it is a root prim.
    pub fn define_prim(
        &mut self,
        path: &str,
        type_name: impl Into<String>,
    ) -> Result<&mut Prim, StageError> {
        let path = Path::parse(path)?;
        self.insert_prim(Prim::new(path, type_name))
    }

    /// Add a fully built prim, validating its place in the hierarchy
    pub fn insert_prim(&mut self, prim: Prim) -> Result<&mut Prim, StageError> {
        let path = prim.path.clone();
        if !path.is_prim_path() {
            return Err(StageError::NotAPrimPath(path));
        }
        if self.prims.contains_key(&path) {
            return Err(StageError::PrimAlreadyExists(path));
        }
        if let Some(parent) = path.parent().filter(|p| !p.is_root()) {
            if !self.prims.contains_key(&parent) {
                return Err(StageError::ParentNotFound { path, parent });
            }
        }

        tracing::trace!("Defining prim {} ({})", path, prim.type_name);
        let entry = self.prims.entry(path).or_insert(prim);
        Ok(entry)
    }

    /// Remove a prim and all its descendants
    pub fn remove_prim(&mut self, path: &Path) -> Option<Prim> {
        let removed = self.prims.shift_remove(path)?;
        self.prims.retain(|p, _| !p.has_prefix(path));
        Some(removed)
    }

    /// Get a prim by path
    pub fn prim_at(&self, path: &Path) -> Option<&Prim> {
        self.prims.get(path)
    }

    /// Get a mutable prim by path
    pub fn prim_mut(&mut self, path: &Path) -> Option<&mut Prim> {
        self.prims.get_mut(path)
    }

    /// Get all prims, parents before children
    pub fn prims(&self) -> impl Iterator<Item = &Prim> {
        self.prims.values()
    }

    /// Get the number of prims
    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }

    /// Direct children of `path` (pass [`Path::root`] for root prims)
    pub fn children<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Prim> + 'a {
        self.prims
            .values()
            .filter(move |p| p.path.parent().as_ref() == Some(path))
    }

    /// `path` and every prim below it
    pub fn subtree<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Prim> + 'a {
        self.prims.values().filter(move |p| p.path.has_prefix(path))
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> Result<String, StageError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| StageError::Serialization(e.to_string()))
    }

    /// Deserialize from RON, checking hierarchy invariants
    pub fn from_ron(text: &str) -> Result<Self, StageError> {
        let loaded: Stage =
            ron::from_str(text).map_err(|e| StageError::Serialization(e.to_string()))?;

        // Rebuild through insert_prim so keys, paths and parents are validated
        let mut stage = Stage::new(loaded.name);
        for (key, prim) in loaded.prims {
            if key != prim.path {
                return Err(StageError::PathMismatch {
                    key,
                    path: prim.path,
                });
            }
            // Names must form valid property paths on this prim
            for (name, _) in prim.properties() {
                prim.path.property(name)?;
            }
            for (name, _) in prim.collections() {
                prim.path.property(&format!("collection:{name}"))?;
            }
            stage.insert_prim(prim)?;
        }
        Ok(stage)
    }
}

impl SceneGraph for Stage {
    fn prim(&self, path: &Path) -> Option<&Prim> {
        self.prim_at(path)
    }

    fn expand_collection(&self, collection_path: &Path) -> Result<Vec<Path>, StageError> {
        let name = collection_path
            .property_name()
            .and_then(|p| p.strip_prefix("collection:"))
            .ok_or_else(|| StageError::CollectionNotFound(collection_path.clone()))?;
        let owner = self
            .prim_at(&collection_path.prim_path())
            .ok_or_else(|| StageError::PrimNotFound(collection_path.prim_path()))?;
        let collection = owner
            .collection(name)
            .ok_or_else(|| StageError::CollectionNotFound(collection_path.clone()))?;

        // The pseudo-root includes everything and has no prim of its own
        for include in collection.includes.iter().filter(|p| !p.is_root()) {
            if !self.prims.contains_key(include) {
                return Err(StageError::PrimNotFound(include.clone()));
            }
        }

        Ok(self
            .prims
            .keys()
            .filter(|p| collection.contains(p))
            .cloned()
            .collect())
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when building or loading a stage
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StageError {
    /// Path text is malformed
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathError),

    /// Path is not a prim path
    #[error("Not a prim path: {0}")]
    NotAPrimPath(Path),

    /// A prim already lives at this path
    #[error("Prim already exists: {0}")]
    PrimAlreadyExists(Path),

    /// Parent prim is missing
    #[error("Cannot define {path}: parent {parent} does not exist")]
    ParentNotFound {
        /// Prim being defined
        path: Path,
        /// Missing parent
        parent: Path,
    },

    /// Prim not found
    #[error("Prim not found: {0}")]
    PrimNotFound(Path),

    /// Collection not found
    #[error("Collection not found: {0}")]
    CollectionNotFound(Path),

    /// Map key and prim path disagree in serialized data
    #[error("Prim stored under {key} claims path {path}")]
    PathMismatch {
        /// Map key
        key: Path,
        /// Path inside the prim
        path: Path,
    },

    /// RON (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}
