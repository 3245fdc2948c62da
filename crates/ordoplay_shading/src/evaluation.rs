// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader attribute evaluation.
//!
//! An attribute either holds a value (possibly time sampled) or connects to
//! another attribute. Evaluation follows connections until it reaches a
//! terminal attribute and returns a copy of that attribute's value.
//!
//! The walk is iterative and bounded: every visited attribute is remembered,
//! and the number of hops is capped by
//! [`ShadingConfig::max_connection_depth`](crate::ShadingConfig).

use crate::context::ShadingContext;
use crate::error::ShadingError;
use crate::schema::{
    Material, NodeGraph, Shader, DISPLACEMENT_OUTPUT, OUTPUTS_NAMESPACE, SHADER_TYPE, SURFACE_OUTPUT,
    VOLUME_OUTPUT,
};
use crate::shader_value::ShaderValue;
use ordoplay_scene::{Attribute, Path, Prim, SceneGraph, TimeCode};
use std::collections::HashSet;

/// Where a connection walk ended
enum WalkEnd<'g> {
    /// Reached an attribute that is not connected
    Terminal {
        /// Property path of the terminal attribute
        path: Path,
        /// The terminal attribute
        attribute: &'g Attribute,
    },
    /// A hop landed on a prim the caller asked to stop at
    Stopped {
        /// Property path the last connection pointed to
        path: Path,
        /// Prim owning that property
        prim: &'g Prim,
    },
}

impl<'g, G: SceneGraph + ?Sized> ShadingContext<'g, G> {
    /// Evaluate `attr_name` on `shader` at `time`, following connections to
    /// the terminal value.
    pub fn evaluate<T: ShaderValue>(
        &self,
        shader: &Shader<'_>,
        attr_name: &str,
        time: TimeCode,
    ) -> Result<T, ShadingError> {
        tracing::debug!("Evaluating {}.{} at {:?}", shader.path(), attr_name, time);

        let (path, attribute) = self.terminal_attribute(shader.prim(), attr_name)?;
        let value = attribute
            .get(time)
            .ok_or_else(|| ShadingError::NoSampleAtTime {
                path: path.clone(),
                time,
            })?;

        T::from_value(&value).ok_or_else(|| ShadingError::TypeMismatch {
            path,
            expected: T::TYPE_NAME,
            found: value.value_type(),
        })
    }

    /// Property path of the attribute that finally supplies `attr_name`'s value
    pub fn attribute_source(&self, shader: &Shader<'_>, attr_name: &str) -> Result<Path, ShadingError> {
        self.terminal_attribute(shader.prim(), attr_name)
            .map(|(path, _)| path)
    }

    /// Shader producing the material output `outputs:<output>`, looking
    /// through node graph pass-throughs.
    ///
    /// Returns `None` when the output is not authored or does not lead to a
    /// shader.
    pub fn output_shader(
        &self,
        material: &Material<'_>,
        output: &str,
    ) -> Result<Option<Shader<'g>>, ShadingError> {
        self.connected_shader(material.prim(), output)
    }

    /// Shader behind the node graph output `outputs:<output>`
    pub fn node_graph_output_shader(
        &self,
        node_graph: &NodeGraph<'_>,
        output: &str,
    ) -> Result<Option<Shader<'g>>, ShadingError> {
        self.connected_shader(node_graph.prim(), output)
    }

    fn connected_shader(&self, prim: &Prim, output: &str) -> Result<Option<Shader<'g>>, ShadingError> {
        self.ensure_owned(prim)?;
        let name = format!("{OUTPUTS_NAMESPACE}{output}");
        let Some(attribute) = self.graph.prim(&prim.path).and_then(|p| p.attribute(&name)) else {
            return Ok(None);
        };
        let start = attribute_path(prim, &name)?;

        match self.walk(start, attribute, |p| p.is_a(SHADER_TYPE))? {
            WalkEnd::Stopped { prim, .. } => Ok(Shader::from_prim(prim)),
            WalkEnd::Terminal { path, .. } => {
                tracing::debug!("Output {} of {} ends at {} without a shader", output, prim.path, path);
                Ok(None)
            }
        }
    }

    fn terminal_attribute(
        &self,
        prim: &Prim,
        attr_name: &str,
    ) -> Result<(Path, &'g Attribute), ShadingError> {
        self.ensure_owned(prim)?;
        // Re-borrow from the graph so the result lives as long as the graph
        let attribute = self
            .graph
            .prim(&prim.path)
            .and_then(|p| p.attribute(attr_name))
            .ok_or_else(|| ShadingError::AttributeNotFound {
                prim: prim.path.clone(),
                attribute: attr_name.to_string(),
            })?;
        let start = attribute_path(prim, attr_name)?;

        match self.walk(start, attribute, |_| false)? {
            WalkEnd::Terminal { path, attribute } => Ok((path, attribute)),
            WalkEnd::Stopped { path, .. } => Err(ShadingError::AttributeNotFound {
                prim: path.prim_path(),
                attribute: path.name().to_string(),
            }),
        }
    }

    /// Follow connections from `attribute` (found at `start`) until an
    /// unconnected attribute is reached or `stop` accepts a target prim.
    fn walk(
        &self,
        start: Path,
        attribute: &'g Attribute,
        stop: impl Fn(&Prim) -> bool,
    ) -> Result<WalkEnd<'g>, ShadingError> {
        let limit = self.config.max_connection_depth;
        let mut visited = HashSet::new();
        visited.insert(start.clone());

        let mut path = start.clone();
        let mut attribute = attribute;
        let mut hops = 0usize;

        while let Some(target) = attribute.connection_target() {
            hops += 1;
            if !visited.insert(target.clone()) {
                tracing::warn!("Connection cycle through {} (starting at {})", target, start);
                return Err(ShadingError::ConnectionCycle {
                    path: target.clone(),
                    hops,
                });
            }
            if hops > limit {
                tracing::warn!("Connection chain from {} exceeds {} hops", start, limit);
                return Err(ShadingError::ConnectionChainTooLong { start, limit });
            }

            tracing::trace!("Following connection {} -> {}", path, target);
            let dangling = || ShadingError::DanglingConnection {
                from: path.clone(),
                target: target.clone(),
            };
            let prim = target
                .property_name()
                .and_then(|_| self.graph.prim(&target.prim_path()))
                .ok_or_else(dangling)?;
            if stop(prim) {
                return Ok(WalkEnd::Stopped {
                    path: target.clone(),
                    prim,
                });
            }
            attribute = target
                .property_name()
                .and_then(|name| prim.attribute(name))
                .ok_or_else(dangling)?;
            path = target.clone();
        }

        Ok(WalkEnd::Terminal { path, attribute })
    }
}

fn attribute_path(prim: &Prim, name: &str) -> Result<Path, ShadingError> {
    prim.path
        .property(name)
        .map_err(|_| ShadingError::AttributeNotFound {
            prim: prim.path.clone(),
            attribute: name.to_string(),
        })
}

impl<'a> Material<'a> {
    /// Shader connected to `outputs:surface`, if any
    pub fn surface_shader<G: SceneGraph + ?Sized>(
        &self,
        graph: &'a G,
    ) -> Result<Option<Shader<'a>>, ShadingError> {
        ShadingContext::new(graph).output_shader(self, SURFACE_OUTPUT)
    }

    /// Shader connected to `outputs:displacement`, if any
    pub fn displacement_shader<G: SceneGraph + ?Sized>(
        &self,
        graph: &'a G,
    ) -> Result<Option<Shader<'a>>, ShadingError> {
        ShadingContext::new(graph).output_shader(self, DISPLACEMENT_OUTPUT)
    }

    /// Shader connected to `outputs:volume`, if any
    pub fn volume_shader<G: SceneGraph + ?Sized>(
        &self,
        graph: &'a G,
    ) -> Result<Option<Shader<'a>>, ShadingError> {
        ShadingContext::new(graph).output_shader(self, VOLUME_OUTPUT)
    }
}

impl<'a> NodeGraph<'a> {
    /// Shader behind `outputs:<output>`, following nested node graphs
    pub fn output_shader<G: SceneGraph + ?Sized>(
        &self,
        graph: &'a G,
        output: &str,
    ) -> Result<Option<Shader<'a>>, ShadingError> {
        ShadingContext::new(graph).node_graph_output_shader(self, output)
    }
}

/// Evaluate the terminal value of `attr_name` on `shader` at `time`.
///
/// Follows any chain of connections and samples time-sampled values with the
/// store's interpolation policy. The value is returned by copy.
pub fn evaluate_shader_attribute<T: ShaderValue>(
    graph: &(impl SceneGraph + ?Sized),
    shader: &Shader<'_>,
    attr_name: &str,
    time: TimeCode,
) -> Result<T, ShadingError> {
    ShadingContext::new(graph).evaluate(shader, attr_name, time)
}

/// Property path of the attribute that supplies `attr_name`'s value
pub fn resolve_attribute_source(
    graph: &(impl SceneGraph + ?Sized),
    shader: &Shader<'_>,
    attr_name: &str,
) -> Result<Path, ShadingError> {
    ShadingContext::new(graph).attribute_source(shader, attr_name)
}

/// Shader producing `material`'s `outputs:<output>`
pub fn resolve_output_shader<'g, G: SceneGraph + ?Sized>(
    graph: &'g G,
    material: &Material<'_>,
    output: &str,
) -> Result<Option<Shader<'g>>, ShadingError> {
    ShadingContext::new(graph).output_shader(material, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShadingConfig;
    use crate::schema::{MATERIAL_TYPE, NODE_GRAPH_TYPE, INFO_ID};
    use ordoplay_scene::{Stage, TimeSamples, Value, ValueType, Vec3};

    fn p(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    fn shader<'a>(stage: &'a Stage, path: &str) -> Shader<'a> {
        Shader::from_prim(stage.prim_at(&p(path)).unwrap()).unwrap()
    }

    /// Red material: surface shader reading a texture and a material input
    fn preview_stage() -> Stage {
        let mut stage = Stage::new("preview");
        stage.define_prim("/Looks", "Scope").unwrap();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Red"), MATERIAL_TYPE)
                    .with_attribute("inputs:metallic", Value::Float(1.0))
                    .with_connection("outputs:surface", p("/Looks/Red/Surface.outputs:surface")),
            )
            .unwrap();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Red/Surface"), SHADER_TYPE)
                    .with_attribute(INFO_ID, Value::Token("UsdPreviewSurface".into()))
                    .with_attribute("inputs:roughness", Value::Float(0.4))
                    .with_attribute(
                        "inputs:opacity",
                        TimeSamples::new().with(0.0, 1.0f32).with(10.0, 0.0f32),
                    )
                    .with_attribute("inputs:ior", TimeSamples::new())
                    .with_attribute("outputs:surface", Value::Token(String::new()))
                    .with_connection("inputs:diffuseColor", p("/Looks/Red/Tex.outputs:rgb"))
                    .with_connection("inputs:metallic", p("/Looks/Red.inputs:metallic"))
                    .with_connection("inputs:normal", p("/Looks/Red/Missing.outputs:rgb"))
                    .with_connection("inputs:clearcoat", p("/Looks/Red/Tex.outputs:a"))
                    .with_connection("inputs:occlusion", p("/Looks/Red/Tex")),
            )
            .unwrap();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Red/Tex"), SHADER_TYPE)
                    .with_attribute(INFO_ID, Value::Token("UsdUVTexture".into()))
                    .with_attribute("outputs:rgb", Value::Float3([0.8, 0.1, 0.1])),
            )
            .unwrap();
        stage
    }

    /// `/Chain/s0.inputs:x -> /Chain/s1.inputs:x -> ... -> /Chain/s{n}.inputs:x = 7`
    fn chain_stage(n: usize) -> Stage {
        let mut stage = Stage::new("chain");
        stage.define_prim("/Chain", "Scope").unwrap();
        for i in 0..=n {
            let mut prim = Prim::new(p(&format!("/Chain/s{i}")), SHADER_TYPE);
            if i < n {
                prim.set_connection("inputs:x", p(&format!("/Chain/s{}.inputs:x", i + 1)));
            } else {
                prim.set_attribute("inputs:x", Value::Float(7.0));
            }
            stage.insert_prim(prim).unwrap();
        }
        stage
    }

    #[test]
    fn test_direct_value_roundtrip() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        let roughness: f32 =
            evaluate_shader_attribute(&stage, &surface, "inputs:roughness", TimeCode::Default).unwrap();
        assert_eq!(roughness, 0.4);

        let id = evaluate_shader_attribute::<String>(&stage, &surface, INFO_ID, TimeCode::Default).unwrap();
        assert_eq!(id, "UsdPreviewSurface");
    }

    #[test]
    fn test_follows_connection_to_other_shader() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        let color = evaluate_shader_attribute::<Vec3>(
            &stage,
            &surface,
            "inputs:diffuseColor",
            TimeCode::Default,
        )
        .unwrap();
        assert_eq!(color, [0.8, 0.1, 0.1]);

        let source = resolve_attribute_source(&stage, &surface, "inputs:diffuseColor").unwrap();
        assert_eq!(source, p("/Looks/Red/Tex.outputs:rgb"));
    }

    #[test]
    fn test_follows_connection_to_material_interface() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        let metallic =
            evaluate_shader_attribute::<f32>(&stage, &surface, "inputs:metallic", TimeCode::Default)
                .unwrap();
        assert_eq!(metallic, 1.0);
    }

    #[test]
    fn test_time_samples_at_distinct_times() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        let at = |t: f64| {
            evaluate_shader_attribute::<f32>(&stage, &surface, "inputs:opacity", TimeCode::Time(t))
                .unwrap()
        };
        assert_eq!(at(0.0), 1.0);
        assert_eq!(at(10.0), 0.0);
        assert_eq!(at(5.0), 0.5);
        assert_eq!(
            evaluate_shader_attribute::<f32>(&stage, &surface, "inputs:opacity", TimeCode::Default)
                .unwrap(),
            1.0
        );
    }

    #[test]
    fn test_time_carried_through_connection() {
        let mut stage = chain_stage(2);
        stage.prim_mut(&p("/Chain/s2")).unwrap().set_attribute(
            "inputs:x",
            TimeSamples::new().with(1.0, 10.0f32).with(2.0, 20.0f32),
        );
        let s0 = shader(&stage, "/Chain/s0");
        let early: f32 =
            evaluate_shader_attribute(&stage, &s0, "inputs:x", TimeCode::Time(1.0)).unwrap();
        let late: f32 =
            evaluate_shader_attribute(&stage, &s0, "inputs:x", TimeCode::Time(2.0)).unwrap();
        assert_eq!((early, late), (10.0, 20.0));
    }

    #[test]
    fn test_chain_of_any_length_reaches_terminal() {
        for n in [1, 2, 10, 100, 256] {
            let stage = chain_stage(n);
            let s0 = shader(&stage, "/Chain/s0");
            let value: f32 =
                evaluate_shader_attribute(&stage, &s0, "inputs:x", TimeCode::Default).unwrap();
            assert_eq!(value, 7.0, "chain length {n}");
        }
    }

    #[test]
    fn test_chain_longer_than_limit() {
        let stage = chain_stage(5);
        let s0 = shader(&stage, "/Chain/s0");

        let ctx = ShadingContext::with_config(&stage, ShadingConfig::default().with_max_connection_depth(5));
        assert_eq!(ctx.evaluate::<f32>(&s0, "inputs:x", TimeCode::Default), Ok(7.0));

        let ctx = ShadingContext::with_config(&stage, ShadingConfig::default().with_max_connection_depth(4));
        assert_eq!(
            ctx.evaluate::<f32>(&s0, "inputs:x", TimeCode::Default),
            Err(ShadingError::ConnectionChainTooLong {
                start: p("/Chain/s0.inputs:x"),
                limit: 4,
            })
        );
    }

    #[test]
    fn test_cycles_are_reported() {
        crate::init_test_tracing();
        // s0 -> s1 -> s2 -> s0
        let mut stage = chain_stage(2);
        stage
            .prim_mut(&p("/Chain/s2"))
            .unwrap()
            .set_connection("inputs:x", p("/Chain/s0.inputs:x"));
        let s0 = shader(&stage, "/Chain/s0");
        assert_eq!(
            evaluate_shader_attribute::<f32>(&stage, &s0, "inputs:x", TimeCode::Default),
            Err(ShadingError::ConnectionCycle {
                path: p("/Chain/s0.inputs:x"),
                hops: 3,
            })
        );

        // Self loop
        stage
            .prim_mut(&p("/Chain/s1"))
            .unwrap()
            .set_connection("inputs:x", p("/Chain/s1.inputs:x"));
        let s1 = shader(&stage, "/Chain/s1");
        assert!(matches!(
            evaluate_shader_attribute::<f32>(&stage, &s1, "inputs:x", TimeCode::Default),
            Err(ShadingError::ConnectionCycle { hops: 1, .. })
        ));
    }

    #[test]
    fn test_cycle_longer_than_limit_still_terminates() {
        let mut stage = chain_stage(300);
        stage
            .prim_mut(&p("/Chain/s300"))
            .unwrap()
            .set_connection("inputs:x", p("/Chain/s0.inputs:x"));
        let s0 = shader(&stage, "/Chain/s0");
        assert!(matches!(
            evaluate_shader_attribute::<f32>(&stage, &s0, "inputs:x", TimeCode::Default),
            Err(ShadingError::ConnectionChainTooLong { limit: 256, .. })
        ));
    }

    #[test]
    fn test_missing_attribute() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        assert_eq!(
            evaluate_shader_attribute::<f32>(&stage, &surface, "inputs:specular", TimeCode::Default),
            Err(ShadingError::AttributeNotFound {
                prim: p("/Looks/Red/Surface"),
                attribute: "inputs:specular".to_string(),
            })
        );
    }

    #[test]
    fn test_dangling_connections() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        for (input, target) in [
            ("inputs:normal", "/Looks/Red/Missing.outputs:rgb"),
            ("inputs:clearcoat", "/Looks/Red/Tex.outputs:a"),
            ("inputs:occlusion", "/Looks/Red/Tex"),
        ] {
            let from = surface.path().property(input).unwrap();
            assert_eq!(
                evaluate_shader_attribute::<f32>(&stage, &surface, input, TimeCode::Default),
                Err(ShadingError::DanglingConnection {
                    from,
                    target: p(target),
                })
            );
        }
    }

    #[test]
    fn test_type_mismatch() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        assert_eq!(
            evaluate_shader_attribute::<Vec3>(&stage, &surface, "inputs:roughness", TimeCode::Default),
            Err(ShadingError::TypeMismatch {
                path: p("/Looks/Red/Surface.inputs:roughness"),
                expected: "float3",
                found: ValueType::Float,
            })
        );
        // Mismatch is reported against the terminal attribute
        assert!(matches!(
            evaluate_shader_attribute::<f32>(&stage, &surface, "inputs:diffuseColor", TimeCode::Default),
            Err(ShadingError::TypeMismatch { path, .. }) if path == p("/Looks/Red/Tex.outputs:rgb")
        ));
    }

    #[test]
    fn test_no_sample() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        assert_eq!(
            evaluate_shader_attribute::<f32>(&stage, &surface, "inputs:ior", TimeCode::Time(3.0)),
            Err(ShadingError::NoSampleAtTime {
                path: p("/Looks/Red/Surface.inputs:ior"),
                time: TimeCode::Time(3.0),
            })
        );
    }

    #[test]
    fn test_foreign_shader_rejected() {
        let stage = preview_stage();
        let detached = stage.prim_at(&p("/Looks/Red/Surface")).unwrap().clone();
        let foreign = Shader::from_prim(&detached).unwrap();
        assert_eq!(
            evaluate_shader_attribute::<f32>(&stage, &foreign, "inputs:roughness", TimeCode::Default),
            Err(ShadingError::ForeignPrim(p("/Looks/Red/Surface")))
        );
    }

    #[test]
    fn test_any_value_evaluation() {
        let stage = preview_stage();
        let surface = shader(&stage, "/Looks/Red/Surface");
        let value =
            evaluate_shader_attribute::<Value>(&stage, &surface, "inputs:diffuseColor", TimeCode::Default)
                .unwrap();
        assert_eq!(value, Value::Float3([0.8, 0.1, 0.1]));
    }

    #[test]
    fn test_surface_shader_direct_and_through_node_graph() {
        let mut stage = preview_stage();
        let red = Material::from_prim(stage.prim_at(&p("/Looks/Red")).unwrap()).unwrap();
        let found = red.surface_shader(&stage).unwrap().unwrap();
        assert_eq!(found.path(), &p("/Looks/Red/Surface"));

        stage
            .insert_prim(
                Prim::new(p("/Looks/Blue"), MATERIAL_TYPE)
                    .with_connection("outputs:surface", p("/Looks/Blue/Graph.outputs:surface"))
                    .with_attribute("outputs:displacement", Value::Token(String::new())),
            )
            .unwrap();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Blue/Graph"), NODE_GRAPH_TYPE)
                    .with_connection("outputs:surface", p("/Looks/Blue/Graph/PBR.outputs:surface")),
            )
            .unwrap();
        stage
            .insert_prim(Prim::new(p("/Looks/Blue/Graph/PBR"), SHADER_TYPE))
            .unwrap();

        let blue = Material::from_prim(stage.prim_at(&p("/Looks/Blue")).unwrap()).unwrap();
        let found = blue.surface_shader(&stage).unwrap().unwrap();
        assert_eq!(found.path(), &p("/Looks/Blue/Graph/PBR"));

        assert!(resolve_output_shader(&stage, &blue, "displacement").unwrap().is_none());
        assert!(resolve_output_shader(&stage, &blue, "volume").unwrap().is_none());
    }

    #[test]
    fn test_displacement_volume_and_node_graph_outputs() {
        let mut stage = preview_stage();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Rock"), MATERIAL_TYPE)
                    .with_connection("outputs:displacement", p("/Looks/Rock/Graph.outputs:height"))
                    .with_attribute("outputs:volume", Value::Token(String::new())),
            )
            .unwrap();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Rock/Graph"), NODE_GRAPH_TYPE)
                    .with_connection("outputs:height", p("/Looks/Rock/Graph/Inner.outputs:height"))
                    .with_attribute("outputs:unused", Value::Float(0.0)),
            )
            .unwrap();
        stage
            .insert_prim(
                Prim::new(p("/Looks/Rock/Graph/Inner"), NODE_GRAPH_TYPE)
                    .with_connection("outputs:height", p("/Looks/Rock/Graph/Inner/Noise.outputs:result")),
            )
            .unwrap();
        stage
            .insert_prim(Prim::new(p("/Looks/Rock/Graph/Inner/Noise"), SHADER_TYPE))
            .unwrap();

        let rock = Material::from_prim(stage.prim_at(&p("/Looks/Rock")).unwrap()).unwrap();
        let noise = rock.displacement_shader(&stage).unwrap().unwrap();
        assert_eq!(noise.path(), &p("/Looks/Rock/Graph/Inner/Noise"));
        assert!(rock.volume_shader(&stage).unwrap().is_none());
        assert!(rock.surface_shader(&stage).unwrap().is_none());

        let graph_prim = stage.prim_at(&p("/Looks/Rock/Graph")).unwrap();
        assert!(Material::from_prim(graph_prim).is_none());
        let graph = NodeGraph::from_prim(graph_prim).unwrap();
        assert_eq!(graph.path(), &p("/Looks/Rock/Graph"));
        assert!(graph.output("height").unwrap().is_connected());
        assert_eq!(
            graph.output_shader(&stage, "height").unwrap().unwrap().path(),
            &p("/Looks/Rock/Graph/Inner/Noise")
        );
        assert!(graph.output_shader(&stage, "unused").unwrap().is_none());
        assert!(graph.output_shader(&stage, "missing").unwrap().is_none());

        let red = Material::from_prim(stage.prim_at(&p("/Looks/Red")).unwrap()).unwrap();
        assert!(red.displacement_shader(&stage).unwrap().is_none());
    }
}
