// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory scene description graph for `OrdoPlay`.
//!
//! This crate provides the data the shading resolvers read from:
//! - Hierarchical prim and property paths
//! - Prims with attributes, relationships and collections
//! - Type-erased values and time samples
//! - The [`SceneGraph`] query trait
//!
//! ## Architecture
//!
//! A [`Stage`] owns every prim, keyed by [`Path`]. Attributes hold exactly one
//! of a value, a set of time samples, or a connection to another attribute.
//! Stages serialize to RON.

pub mod path;
pub mod value;
pub mod time;
pub mod property;
pub mod prim;
pub mod stage;

pub use path::{Path, PathError};
pub use value::{Mat2, Mat3, Mat4, Value, ValueType, Vec2, Vec3, Vec4};
pub use time::{TimeCode, TimeSample, TimeSamples};
pub use property::{Attribute, AttributeValue, Collection, Property, Relationship, BIND_MATERIAL_AS};
pub use prim::Prim;
pub use stage::{SceneGraph, Stage, StageError};
