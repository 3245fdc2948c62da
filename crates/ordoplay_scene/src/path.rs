// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hierarchical scene paths.
//!
//! A path names either a prim (`/World/Geom/mesh0`) or a property on a prim
//! (`/World/Looks/Red/Surface.outputs:surface`). Property names may be
//! namespaced with `:`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a prim or property in a [`Stage`](crate::Stage)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
    /// Absolute prim part, `/` for the pseudo-root
    prim: String,
    /// Property name, if this is a property path
    property: Option<String>,
}

impl Path {
    /// The pseudo-root path `/`
    pub fn root() -> Self {
        Self {
            prim: "/".to_string(),
            property: None,
        }
    }

    /// Parse an absolute prim or property path
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let (prim, property) = match text.split_once('.') {
            Some((prim, property)) => (prim, Some(property)),
            None => (text, None),
        };

        if !prim.starts_with('/') {
            return Err(PathError::NotAbsolute(text.to_string()));
        }

        if prim != "/" {
            for element in prim[1..].split('/') {
                if !is_identifier(element) {
                    return Err(PathError::InvalidElement {
                        path: text.to_string(),
                        element: element.to_string(),
                    });
                }
            }
        }

        if let Some(property) = property {
            if prim == "/" {
                return Err(PathError::PropertyOnRoot(text.to_string()));
            }
            if !is_property_name(property) {
                return Err(PathError::InvalidProperty {
                    path: text.to_string(),
                    property: property.to_string(),
                });
            }
        }

        Ok(Self {
            prim: prim.to_string(),
            property: property.map(str::to_string),
        })
    }

    /// Whether this is the pseudo-root `/`
    pub fn is_root(&self) -> bool {
        self.prim == "/" && self.property.is_none()
    }

    /// Whether this path names a prim (not a property)
    pub fn is_prim_path(&self) -> bool {
        self.property.is_none() && !self.is_root()
    }

    /// Whether this path names a property
    pub fn is_property_path(&self) -> bool {
        self.property.is_some()
    }

    /// The prim part of this path
    pub fn prim_path(&self) -> Path {
        Self {
            prim: self.prim.clone(),
            property: None,
        }
    }

    /// The property name, if this is a property path
    pub fn property_name(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Last element: the property name for property paths, the prim name otherwise
    pub fn name(&self) -> &str {
        if let Some(property) = &self.property {
            return property;
        }
        self.prim.rsplit('/').next().unwrap_or_default()
    }

    /// Parent path. A property's parent is its prim; root prims have the
    /// pseudo-root as parent; the pseudo-root has none.
    pub fn parent(&self) -> Option<Path> {
        if self.property.is_some() {
            return Some(self.prim_path());
        }
        if self.is_root() {
            return None;
        }
        let cut = self.prim.rfind('/').unwrap_or(0);
        let prim = if cut == 0 { "/" } else { &self.prim[..cut] };
        Some(Self {
            prim: prim.to_string(),
            property: None,
        })
    }

    /// Prim ancestors, nearest first, starting with this prim and ending at
    /// the root prim. The pseudo-root is not included.
    pub fn ancestors(&self) -> impl Iterator<Item = Path> {
        let start = if self.is_root() {
            None
        } else {
            Some(self.prim_path())
        };
        std::iter::successors(start, Path::parent).filter(|p| !p.is_root())
    }

    /// Append a child prim element
    pub fn child(&self, name: &str) -> Result<Path, PathError> {
        if self.property.is_some() {
            return Err(PathError::PropertyOnProperty(self.to_string()));
        }
        if !is_identifier(name) {
            return Err(PathError::InvalidElement {
                path: self.to_string(),
                element: name.to_string(),
            });
        }
        let prim = if self.is_root() {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.prim)
        };
        Ok(Self {
            prim,
            property: None,
        })
    }

    /// Append a property name
    pub fn property(&self, name: &str) -> Result<Path, PathError> {
        if self.property.is_some() {
            return Err(PathError::PropertyOnProperty(self.to_string()));
        }
        if self.is_root() {
            return Err(PathError::PropertyOnRoot(format!("/.{name}")));
        }
        if !is_property_name(name) {
            return Err(PathError::InvalidProperty {
                path: self.to_string(),
                property: name.to_string(),
            });
        }
        Ok(Self {
            prim: self.prim.clone(),
            property: Some(name.to_string()),
        })
    }

    /// Whether `prefix` is this prim path or one of its prim ancestors
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        if prefix.is_root() {
            return true;
        }
        if prefix.property.is_some() {
            return self == prefix;
        }
        self.prim == prefix.prim
            || (self.prim.starts_with(&prefix.prim)
                && self.prim.as_bytes().get(prefix.prim.len()) == Some(&b'/'))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}.{}", self.prim, property),
            None => f.write_str(&self.prim),
        }
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Path {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_property_name(s: &str) -> bool {
    s.split(':').all(is_identifier)
}

/// Error when parsing or building a path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path does not start with `/`
    #[error("Path is not absolute: {0:?}")]
    NotAbsolute(String),

    /// A prim element is not a valid identifier
    #[error("Invalid prim name {element:?} in path {path:?}")]
    InvalidElement {
        /// Offending path
        path: String,
        /// Offending element
        element: String,
    },

    /// Property part is not a valid (namespaced) identifier
    #[error("Invalid property name {property:?} in path {path:?}")]
    InvalidProperty {
        /// Offending path
        path: String,
        /// Offending property name
        property: String,
    },

    /// Properties cannot live on the pseudo-root
    #[error("Pseudo-root cannot hold properties: {0:?}")]
    PropertyOnRoot(String),

    /// Cannot extend a property path
    #[error("Cannot append to property path {0:?}")]
    PropertyOnProperty(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    #[test]
    fn test_parse_prim_and_property() {
        let prim = p("/World/Geom/mesh0");
        assert!(prim.is_prim_path());
        assert_eq!(prim.name(), "mesh0");

        let prop = p("/Looks/Red/Surface.outputs:surface");
        assert!(prop.is_property_path());
        assert_eq!(prop.property_name(), Some("outputs:surface"));
        assert_eq!(prop.prim_path(), p("/Looks/Red/Surface"));
        assert_eq!(prop.to_string(), "/Looks/Red/Surface.outputs:surface");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(Path::parse("World"), Err(PathError::NotAbsolute(_))));
        assert!(matches!(Path::parse("/a//b"), Err(PathError::InvalidElement { .. })));
        assert!(matches!(Path::parse("/a/1b"), Err(PathError::InvalidElement { .. })));
        assert!(matches!(Path::parse("/a.in::x"), Err(PathError::InvalidProperty { .. })));
        assert!(matches!(Path::parse("/.x"), Err(PathError::PropertyOnRoot(_))));
    }

    #[test]
    fn test_parent_chain() {
        assert_eq!(p("/a/b.x").parent(), Some(p("/a/b")));
        assert_eq!(p("/a/b").parent(), Some(p("/a")));
        assert_eq!(p("/a").parent(), Some(Path::root()));
        assert_eq!(Path::root().parent(), None);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let chain: Vec<String> = p("/a/b/c").ancestors().map(|p| p.to_string()).collect();
        assert_eq!(chain, vec!["/a/b/c", "/a/b", "/a"]);

        let from_property: Vec<String> = p("/a/b.x").ancestors().map(|p| p.to_string()).collect();
        assert_eq!(from_property, vec!["/a/b", "/a"]);

        assert_eq!(Path::root().ancestors().count(), 0);
    }

    #[test]
    fn test_child_and_property() {
        let root = Path::root();
        let a = root.child("a").unwrap();
        assert_eq!(a, p("/a"));
        assert_eq!(a.child("b").unwrap(), p("/a/b"));
        assert_eq!(a.property("inputs:x").unwrap(), p("/a.inputs:x"));
        assert!(a.property("inputs:x").unwrap().child("c").is_err());
    }

    #[test]
    fn test_has_prefix() {
        assert!(p("/a/b").has_prefix(&p("/a")));
        assert!(p("/a/b").has_prefix(&p("/a/b")));
        assert!(!p("/ab").has_prefix(&p("/a")));
        assert!(p("/a").has_prefix(&Path::root()));
    }

    #[test]
    fn test_serialization() {
        let path = p("/Looks/Mat.outputs:surface");
        let ron_str = ron::to_string(&path).unwrap();
        assert_eq!(ron_str, "\"/Looks/Mat.outputs:surface\"");
        let loaded: Path = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, path);
        assert!(ron::from_str::<Path>("\"no-slash\"").is_err());
    }
}
