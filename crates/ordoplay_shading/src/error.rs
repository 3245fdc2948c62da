// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors reported by the shading resolvers.

use ordoplay_scene::{Path, TimeCode, ValueType};

/// Error during attribute evaluation or material binding resolution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShadingError {
    /// Attribute does not exist on the prim
    #[error("Attribute {attribute:?} not found on {prim}")]
    AttributeNotFound {
        /// Prim that was searched
        prim: Path,
        /// Requested attribute name
        attribute: String,
    },

    /// Prim does not exist
    #[error("Prim not found: {0}")]
    NodeNotFound(Path),

    /// Stored value cannot be converted to the requested type
    #[error("Attribute {path} holds a {found} value, expected {expected}")]
    TypeMismatch {
        /// Terminal attribute
        path: Path,
        /// Requested type
        expected: &'static str,
        /// Stored type
        found: ValueType,
    },

    /// No value can be produced at the requested time
    #[error("Attribute {path} has no value at {time:?}")]
    NoSampleAtTime {
        /// Terminal attribute
        path: Path,
        /// Requested time
        time: TimeCode,
    },

    /// A connection points at a prim or attribute that does not exist
    #[error("Connection on {from} targets {target}, which does not exist")]
    DanglingConnection {
        /// Connected attribute
        from: Path,
        /// Missing target
        target: Path,
    },

    /// A connection chain revisits an attribute
    #[error("Connection cycle through {path} after {hops} hops")]
    ConnectionCycle {
        /// First attribute visited twice
        path: Path,
        /// Hops taken before the repeat
        hops: usize,
    },

    /// A connection chain exceeds the configured hop limit
    #[error("Connection chain starting at {start} exceeds {limit} hops")]
    ConnectionChainTooLong {
        /// Attribute the walk started from
        start: Path,
        /// Configured limit
        limit: usize,
    },

    /// A binding relationship is not well formed
    #[error("Malformed binding {relationship:?} on {prim}: {reason}")]
    MalformedBinding {
        /// Prim carrying the relationship
        prim: Path,
        /// Relationship name
        relationship: String,
        /// What is wrong with it
        reason: String,
    },

    /// A bound target does not resolve to a Material prim
    #[error("Binding on {prim} targets {target}, which is not a Material")]
    UnresolvedMaterial {
        /// Prim carrying the binding
        prim: Path,
        /// Unresolved target
        target: Path,
    },

    /// Binding suffix is not a valid property namespace
    #[error("Invalid binding suffix: {0:?}")]
    InvalidSuffix(String),

    /// The prim passed in is not the stage's prim at that path
    #[error("Prim {0} does not belong to the queried stage")]
    ForeignPrim(Path),
}
