// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolver context shared by attribute evaluation and binding resolution.

use crate::config::ShadingConfig;
use crate::error::ShadingError;
use ordoplay_scene::{Prim, SceneGraph};

/// A scene graph paired with resolver settings.
///
/// The context holds no cache: every query walks the graph afresh, so a
/// context stays valid across edits made between calls.
pub struct ShadingContext<'g, G: SceneGraph + ?Sized> {
    /// The graph being queried
    pub(crate) graph: &'g G,
    /// Resolver settings
    pub(crate) config: ShadingConfig,
}

impl<'g, G: SceneGraph + ?Sized> ShadingContext<'g, G> {
    /// Create a context with default settings
    pub fn new(graph: &'g G) -> Self {
        Self::with_config(graph, ShadingConfig::default())
    }

    /// Create a context with explicit settings
    pub fn with_config(graph: &'g G, config: ShadingConfig) -> Self {
        Self { graph, config }
    }

    /// The graph being queried
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Active settings
    pub fn config(&self) -> &ShadingConfig {
        &self.config
    }

    /// Check that `prim` is the graph's own prim at its path
    pub(crate) fn ensure_owned(&self, prim: &Prim) -> Result<(), ShadingError> {
        match self.graph.prim(&prim.path) {
            Some(own) if std::ptr::eq(own, prim) => Ok(()),
            _ => Err(ShadingError::ForeignPrim(prim.path.clone())),
        }
    }
}

impl<G: SceneGraph + ?Sized> Clone for ShadingContext<'_, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            config: self.config.clone(),
        }
    }
}
