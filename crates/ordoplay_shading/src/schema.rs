// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed views over shading prims.
//!
//! Views borrow a [`Prim`] from a stage and never copy its data. A view can
//! only be made from a prim of the matching schema type.

use ordoplay_scene::{Attribute, AttributeValue, Path, Prim};

/// Schema type name of material prims
pub const MATERIAL_TYPE: &str = "Material";
/// Schema type name of shader prims
pub const SHADER_TYPE: &str = "Shader";
/// Schema type name of node graph prims
pub const NODE_GRAPH_TYPE: &str = "NodeGraph";

/// Namespace of connectable inputs
pub const INPUTS_NAMESPACE: &str = "inputs:";
/// Namespace of connectable outputs
pub const OUTPUTS_NAMESPACE: &str = "outputs:";
/// Attribute naming a shader's implementation
pub const INFO_ID: &str = "info:id";

/// Material terminal output for surface shading
pub const SURFACE_OUTPUT: &str = "surface";
/// Material terminal output for displacement
pub const DISPLACEMENT_OUTPUT: &str = "displacement";
/// Material terminal output for volume shading
pub const VOLUME_OUTPUT: &str = "volume";

/// A `Material` prim
#[derive(Debug, Clone, Copy)]
pub struct Material<'a> {
    prim: &'a Prim,
}

impl<'a> Material<'a> {
    /// View `prim` as a material, if it is one
    pub fn from_prim(prim: &'a Prim) -> Option<Self> {
        prim.is_a(MATERIAL_TYPE).then_some(Self { prim })
    }

    /// Underlying prim
    pub fn prim(&self) -> &'a Prim {
        self.prim
    }

    /// Material path
    pub fn path(&self) -> &'a Path {
        &self.prim.path
    }

    /// Interface input `inputs:<name>`
    pub fn input(&self, name: &str) -> Option<&'a Attribute> {
        self.prim.attribute(&format!("{INPUTS_NAMESPACE}{name}"))
    }

    /// Output `outputs:<name>`
    pub fn output(&self, name: &str) -> Option<&'a Attribute> {
        self.prim.attribute(&format!("{OUTPUTS_NAMESPACE}{name}"))
    }
}

/// A `Shader` prim
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    prim: &'a Prim,
}

impl<'a> Shader<'a> {
    /// View `prim` as a shader, if it is one
    pub fn from_prim(prim: &'a Prim) -> Option<Self> {
        prim.is_a(SHADER_TYPE).then_some(Self { prim })
    }

    /// Underlying prim
    pub fn prim(&self) -> &'a Prim {
        self.prim
    }

    /// Shader path
    pub fn path(&self) -> &'a Path {
        &self.prim.path
    }

    /// Implementation identifier from `info:id` (e.g. `UsdPreviewSurface`)
    pub fn shader_id(&self) -> Option<&'a str> {
        match &self.prim.attribute(INFO_ID)?.value {
            AttributeValue::Value(value) => value.as_token(),
            _ => None,
        }
    }

    /// Input `inputs:<name>`
    pub fn input(&self, name: &str) -> Option<&'a Attribute> {
        self.prim.attribute(&format!("{INPUTS_NAMESPACE}{name}"))
    }

    /// Output `outputs:<name>`
    pub fn output(&self, name: &str) -> Option<&'a Attribute> {
        self.prim.attribute(&format!("{OUTPUTS_NAMESPACE}{name}"))
    }

    /// Names of authored inputs, without the namespace
    pub fn input_names(&self) -> impl Iterator<Item = &'a str> {
        self.prim
            .properties()
            .filter_map(|(name, _)| name.strip_prefix(INPUTS_NAMESPACE))
    }
}

/// A `NodeGraph` prim: a container whose outputs forward inner shader outputs
#[derive(Debug, Clone, Copy)]
pub struct NodeGraph<'a> {
    prim: &'a Prim,
}

impl<'a> NodeGraph<'a> {
    /// View `prim` as a node graph, if it is one
    pub fn from_prim(prim: &'a Prim) -> Option<Self> {
        prim.is_a(NODE_GRAPH_TYPE).then_some(Self { prim })
    }

    /// Underlying prim
    pub fn prim(&self) -> &'a Prim {
        self.prim
    }

    /// Node graph path
    pub fn path(&self) -> &'a Path {
        &self.prim.path
    }

    /// Output `outputs:<name>`
    pub fn output(&self, name: &str) -> Option<&'a Attribute> {
        self.prim.attribute(&format!("{OUTPUTS_NAMESPACE}{name}"))
    }
}

/// Binding channel selected by a purpose suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialPurpose {
    /// The unqualified `material:binding` channel
    #[default]
    All,
    /// Lightweight interactive shading (`material:binding:preview`)
    Preview,
    /// Final-quality shading (`material:binding:full`)
    Full,
}

impl MaterialPurpose {
    /// Relationship suffix for this purpose
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::All => "",
            Self::Preview => "preview",
            Self::Full => "full",
        }
    }
}
