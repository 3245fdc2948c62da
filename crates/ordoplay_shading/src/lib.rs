// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shading queries over `OrdoPlay` scenes.
//!
//! This crate answers the questions a renderer asks of a scene:
//! - What value does a shader input have at a given time?
//! - Which shader drives a material output?
//! - Which material is bound to a prim?
//!
//! ## Architecture
//!
//! Queries run against any [`SceneGraph`](ordoplay_scene::SceneGraph)
//! through a [`ShadingContext`], which carries the [`ShadingConfig`].
//! Free functions cover the common case of default settings. Results
//! borrow from the graph; nothing is cached between calls.

pub mod config;
pub mod context;
pub mod error;
pub mod schema;
pub mod shader_value;
pub mod evaluation;
pub mod binding;

pub use config::{ConfigError, ShadingConfig, DEFAULT_MAX_CONNECTION_DEPTH};
pub use context::ShadingContext;
pub use error::ShadingError;
pub use schema::{Material, MaterialPurpose, NodeGraph, Shader};
pub use shader_value::ShaderValue;
pub use evaluation::{evaluate_shader_attribute, resolve_attribute_source, resolve_output_shader};
pub use binding::{
    bound_material, bound_material_for_purpose, local_material_binding, BindingSource,
    BindingStrength, BindingTarget, BoundMaterial, LocalBinding, MATERIAL_BINDING,
};

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("ordoplay_shading=trace".parse().unwrap());

    // Several tests may race to install it
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
