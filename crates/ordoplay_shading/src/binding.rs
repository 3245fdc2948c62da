// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material binding.
//!
//! A prim binds a material through the `material:binding` relationship, or
//! `material:binding:<suffix>` for a purpose-specific channel. Collection
//! bindings (`material:binding:collection[:<suffix>]:<name>`) target a
//! collection and a material.
//!
//! Resolution walks from a prim up to its root prim:
//! 1. the nearest prim with a direct binding provides the candidate
//! 2. every ancestor further out whose binding is
//!    `strongerThanDescendants` replaces the candidate, the last one found
//!    walking outward winning

use crate::context::ShadingContext;
use crate::error::ShadingError;
use crate::schema::{Material, MaterialPurpose};
use ordoplay_scene::{Path, Prim, Property, Relationship, SceneGraph, Value, BIND_MATERIAL_AS};
use serde::{Deserialize, Serialize};

/// Base name of binding relationships
pub const MATERIAL_BINDING: &str = "material:binding";

/// Namespace segment marking collection bindings
const COLLECTION_SEGMENT: &str = "collection";

/// How a binding ranks against bindings on descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BindingStrength {
    /// Descendant bindings win (the default)
    #[default]
    WeakerThanDescendants,
    /// This binding overrides descendant bindings
    StrongerThanDescendants,
}

impl BindingStrength {
    /// The `bindMaterialAs` token for this strength
    pub fn token(&self) -> &'static str {
        match self {
            Self::WeakerThanDescendants => "weakerThanDescendants",
            Self::StrongerThanDescendants => "strongerThanDescendants",
        }
    }

    /// Parse a `bindMaterialAs` token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "weakerThanDescendants" => Some(Self::WeakerThanDescendants),
            "strongerThanDescendants" => Some(Self::StrongerThanDescendants),
            _ => None,
        }
    }
}

/// Name of the direct binding relationship for `suffix`
pub fn binding_relationship_name(suffix: &str) -> String {
    if suffix.is_empty() {
        MATERIAL_BINDING.to_string()
    } else {
        format!("{MATERIAL_BINDING}:{suffix}")
    }
}

fn collection_binding_prefix(suffix: &str) -> String {
    if suffix.is_empty() {
        format!("{MATERIAL_BINDING}:{COLLECTION_SEGMENT}:")
    } else {
        format!("{MATERIAL_BINDING}:{COLLECTION_SEGMENT}:{suffix}:")
    }
}

fn validate_suffix(suffix: &str) -> Result<(), ShadingError> {
    if suffix.is_empty() {
        return Ok(());
    }
    let valid_segment = |s: &str| {
        let mut chars = s.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    let first = suffix.split(':').next().unwrap_or_default();
    if first == COLLECTION_SEGMENT || !suffix.split(':').all(valid_segment) {
        return Err(ShadingError::InvalidSuffix(suffix.to_string()));
    }
    Ok(())
}

fn malformed(prim: &Prim, relationship: &str, reason: impl Into<String>) -> ShadingError {
    let error = ShadingError::MalformedBinding {
        prim: prim.path.clone(),
        relationship: relationship.to_string(),
        reason: reason.into(),
    };
    tracing::warn!("{}", error);
    error
}

fn read_strength(
    prim: &Prim,
    name: &str,
    relationship: &Relationship,
) -> Result<Option<BindingStrength>, ShadingError> {
    match relationship.metadatum(BIND_MATERIAL_AS) {
        None => Ok(None),
        Some(Value::Token(token)) if token.is_empty() => Ok(None),
        Some(Value::Token(token)) => BindingStrength::from_token(token)
            .map(Some)
            .ok_or_else(|| malformed(prim, name, format!("unknown {BIND_MATERIAL_AS} token {token:?}"))),
        Some(other) => Err(malformed(
            prim,
            name,
            format!("{BIND_MATERIAL_AS} must be a token, found {}", other.value_type()),
        )),
    }
}

/// Where a bound target came from
#[derive(Debug, Clone, PartialEq)]
pub enum BindingSource {
    /// The direct `material:binding[:<suffix>]` relationship
    Direct,
    /// A collection binding
    Collection {
        /// Relationship name
        relationship: String,
        /// Bound collection (`/prim.collection:name`)
        collection: Path,
        /// Collection members as expanded by the scene graph
        members: Vec<Path>,
    },
}

/// One material target of a prim's local binding
#[derive(Debug, Clone)]
pub struct BindingTarget<'a> {
    /// Bound material path
    pub material_path: Path,
    /// The material, when the path resolves to a `Material` prim
    pub material: Option<Material<'a>>,
    /// Authored `bindMaterialAs` strength, `None` when absent
    pub strength: Option<BindingStrength>,
    /// Direct or collection binding
    pub source: BindingSource,
}

/// The bindings authored on a single prim for one channel
#[derive(Debug, Clone, Default)]
pub struct LocalBinding<'a> {
    targets: Vec<BindingTarget<'a>>,
}

impl<'a> LocalBinding<'a> {
    /// Read `prim`'s bindings on the `suffix` channel without requiring the
    /// targets to resolve to materials
    pub fn read<G: SceneGraph + ?Sized>(
        graph: &'a G,
        prim: &Prim,
        suffix: &str,
    ) -> Result<Self, ShadingError> {
        ShadingContext::new(graph).read_local_binding(prim, suffix)
    }

    /// All targets, direct binding first
    pub fn targets(&self) -> &[BindingTarget<'a>] {
        &self.targets
    }

    /// Whether no binding is authored
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Bound material paths, one per target
    pub fn material_paths(&self) -> impl Iterator<Item = &Path> {
        self.targets.iter().map(|t| &t.material_path)
    }

    /// Resolved materials, one per target
    pub fn materials(&self) -> impl Iterator<Item = Option<Material<'a>>> + '_ {
        self.targets.iter().map(|t| t.material)
    }

    /// Strength of the direct binding, `None` when absent or not authored
    pub fn strength(&self) -> Option<BindingStrength> {
        self.direct().and_then(|t| t.strength)
    }

    /// The direct binding target, if any
    pub fn direct(&self) -> Option<&BindingTarget<'a>> {
        self.targets
            .iter()
            .find(|t| t.source == BindingSource::Direct)
    }

    /// Whether every target resolves to a material
    pub fn is_fully_resolved(&self) -> bool {
        self.targets.iter().all(|t| t.material.is_some())
    }
}

/// The material that applies to a prim
#[derive(Debug, Clone)]
pub struct BoundMaterial<'a> {
    /// Winning material path
    pub material_path: Path,
    /// The material, when the path resolves to a `Material` prim
    pub material: Option<Material<'a>>,
    /// Prim that authored the winning binding
    pub bound_at: Path,
    /// Strength of the winning binding
    pub strength: BindingStrength,
}

/// Pick the winning level from per-level binding strengths, nearest first.
/// `None` marks a level without a binding.
pub fn winning_level(levels: &[Option<BindingStrength>]) -> Option<usize> {
    let candidate = levels.iter().position(Option::is_some)?;
    let overriding = levels
        .iter()
        .enumerate()
        .skip(candidate + 1)
        .filter(|(_, strength)| **strength == Some(BindingStrength::StrongerThanDescendants))
        .map(|(index, _)| index)
        .last();
    Some(overriding.unwrap_or(candidate))
}

impl<'g, G: SceneGraph + ?Sized> ShadingContext<'g, G> {
    /// Read `prim`'s own bindings on the `suffix` channel. Targets that do
    /// not resolve to a material are kept with `material: None`.
    pub fn read_local_binding(&self, prim: &Prim, suffix: &str) -> Result<LocalBinding<'g>, ShadingError> {
        validate_suffix(suffix)?;
        self.ensure_owned(prim)?;
        let prim = self
            .graph
            .prim(&prim.path)
            .ok_or_else(|| ShadingError::NodeNotFound(prim.path.clone()))?;

        let mut targets = self.direct_targets(prim, suffix)?;
        targets.extend(self.collection_targets(prim, suffix)?);
        tracing::trace!("{} local binding(s) on {} for {:?}", targets.len(), prim.path, suffix);
        Ok(LocalBinding { targets })
    }

    /// Like [`ShadingContext::read_local_binding`], but fails unless every
    /// target resolves to a material
    pub fn local_binding(&self, prim: &Prim, suffix: &str) -> Result<LocalBinding<'g>, ShadingError> {
        let binding = self.read_local_binding(prim, suffix)?;
        if let Some(target) = binding.targets.iter().find(|t| t.material.is_none()) {
            return Err(ShadingError::UnresolvedMaterial {
                prim: prim.path.clone(),
                target: target.material_path.clone(),
            });
        }
        Ok(binding)
    }

    /// Resolve the material bound to `abs_path` on the `suffix` channel.
    ///
    /// `Ok(None)` means nothing is bound at the prim or any ancestor. An
    /// unresolvable material path is returned with `material: None`.
    pub fn bound_material(
        &self,
        abs_path: &Path,
        suffix: &str,
    ) -> Result<Option<BoundMaterial<'g>>, ShadingError> {
        validate_suffix(suffix)?;
        tracing::debug!("Resolving bound material of {} for {:?}", abs_path, suffix);

        if !abs_path.is_prim_path() || self.graph.prim(abs_path).is_none() {
            return Err(ShadingError::NodeNotFound(abs_path.clone()));
        }

        // Pass one: each level's direct binding, nearest first
        let mut levels = Vec::new();
        for path in abs_path.ancestors() {
            let prim = self
                .graph
                .prim(&path)
                .ok_or_else(|| ShadingError::NodeNotFound(path.clone()))?;
            let binding = self.direct_binding(prim, suffix)?;
            levels.push((path, binding));
        }

        // Pass two: strength overrides walking outward
        let strengths: Vec<Option<BindingStrength>> = levels
            .iter()
            .map(|(_, b)| b.as_ref().map(|t| t.strength.unwrap_or_default()))
            .collect();
        let Some(index) = winning_level(&strengths) else {
            tracing::debug!("No material bound to {} for {:?}", abs_path, suffix);
            return Ok(None);
        };

        let bound = levels
            .into_iter()
            .nth(index)
            .and_then(|(bound_at, target)| {
                target.map(|t| BoundMaterial {
                    material_path: t.material_path,
                    material: t.material,
                    bound_at,
                    strength: t.strength.unwrap_or_default(),
                })
            });
        if let Some(bound) = &bound {
            tracing::debug!(
                "{} bound to {} (authored on {})",
                abs_path,
                bound.material_path,
                bound.bound_at
            );
        }
        Ok(bound)
    }

    /// Resolve the material for `purpose`, falling back to the all-purpose
    /// channel when enabled in the config and nothing is bound for `purpose`
    pub fn bound_material_for_purpose(
        &self,
        abs_path: &Path,
        purpose: MaterialPurpose,
    ) -> Result<Option<BoundMaterial<'g>>, ShadingError> {
        let bound = self.bound_material(abs_path, purpose.suffix())?;
        if bound.is_some() || purpose == MaterialPurpose::All || !self.config.fallback_to_all_purpose {
            return Ok(bound);
        }
        tracing::trace!("No {:?} binding on {}, trying all-purpose", purpose, abs_path);
        self.bound_material(abs_path, MaterialPurpose::All.suffix())
    }

    fn resolve_material(&self, path: &Path) -> Option<Material<'g>> {
        self.graph.prim(path).and_then(Material::from_prim)
    }

    /// The single direct binding of one level, as used for precedence
    fn direct_binding(&self, prim: &'g Prim, suffix: &str) -> Result<Option<BindingTarget<'g>>, ShadingError> {
        let mut targets = self.direct_targets(prim, suffix)?;
        match targets.len() {
            0 | 1 => Ok(targets.pop()),
            n => Err(malformed(
                prim,
                &binding_relationship_name(suffix),
                format!("expected a single material target, found {n}"),
            )),
        }
    }

    fn direct_targets(&self, prim: &'g Prim, suffix: &str) -> Result<Vec<BindingTarget<'g>>, ShadingError> {
        let name = binding_relationship_name(suffix);
        let relationship = match prim.property(&name) {
            None => return Ok(Vec::new()),
            Some(Property::Relationship(relationship)) => relationship,
            Some(Property::Attribute(_)) => {
                return Err(malformed(prim, &name, "authored as an attribute, not a relationship"));
            }
        };
        let strength = read_strength(prim, &name, relationship)?;

        relationship
            .targets
            .iter()
            .map(|target| {
                if !target.is_prim_path() {
                    return Err(malformed(prim, &name, format!("target {target} is not a prim path")));
                }
                Ok(BindingTarget {
                    material_path: target.clone(),
                    material: self.resolve_material(target),
                    strength,
                    source: BindingSource::Direct,
                })
            })
            .collect()
    }

    fn collection_targets(&self, prim: &'g Prim, suffix: &str) -> Result<Vec<BindingTarget<'g>>, ShadingError> {
        let prefix = collection_binding_prefix(suffix);
        let mut targets = Vec::new();

        for (name, relationship) in prim.relationships_with_prefix(&prefix) {
            // Deeper names belong to a purpose-qualified channel
            if name[prefix.len()..].contains(':') {
                continue;
            }
            let [collection, material_path] = relationship.targets.as_slice() else {
                return Err(malformed(
                    prim,
                    name,
                    format!(
                        "expected [collection, material] targets, found {}",
                        relationship.targets.len()
                    ),
                ));
            };
            if !material_path.is_prim_path() {
                return Err(malformed(prim, name, format!("target {material_path} is not a prim path")));
            }
            let members = self
                .graph
                .expand_collection(collection)
                .map_err(|e| malformed(prim, name, format!("cannot expand {collection}: {e}")))?;
            let strength = read_strength(prim, name, relationship)?;

            targets.push(BindingTarget {
                material_path: material_path.clone(),
                material: self.resolve_material(material_path),
                strength,
                source: BindingSource::Collection {
                    relationship: name.to_string(),
                    collection: collection.clone(),
                    members,
                },
            });
        }
        Ok(targets)
    }
}

/// Read `prim`'s own material bindings on the `suffix` channel.
///
/// Never looks at ancestors. No binding is `Ok` with an empty result; a
/// target that does not resolve to a material is an error.
pub fn local_material_binding<'g, G: SceneGraph + ?Sized>(
    graph: &'g G,
    prim: &Prim,
    suffix: &str,
) -> Result<LocalBinding<'g>, ShadingError> {
    ShadingContext::new(graph).local_binding(prim, suffix)
}

/// Resolve the material bound to `abs_path` on the `suffix` channel,
/// honoring inherited bindings and binding strength
pub fn bound_material<'g, G: SceneGraph + ?Sized>(
    graph: &'g G,
    abs_path: &Path,
    suffix: &str,
) -> Result<Option<BoundMaterial<'g>>, ShadingError> {
    ShadingContext::new(graph).bound_material(abs_path, suffix)
}

/// Resolve the material bound to `abs_path` for `purpose`, falling back to
/// the all-purpose binding
pub fn bound_material_for_purpose<'g, G: SceneGraph + ?Sized>(
    graph: &'g G,
    abs_path: &Path,
    purpose: MaterialPurpose,
) -> Result<Option<BoundMaterial<'g>>, ShadingError> {
    ShadingContext::new(graph).bound_material_for_purpose(abs_path, purpose)
}
