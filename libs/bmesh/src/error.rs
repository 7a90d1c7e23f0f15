//! # Mesh Errors
//!
//! Error types for skeleton construction and mesh generation.

use config::constants::ConfigError;
use thiserror::Error;

use crate::skeleton::BallId;

/// Errors that can occur while building or checking a skin mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Malformed skeleton
    #[error("Invalid skeleton: {0}")]
    Skeleton(#[from] SkeletonError),

    /// Rejected configuration values
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

/// Violations of the skeleton's structural invariants.
///
/// The sweep assumes a well-formed forest and never reports these itself;
/// callers check with [`Skeleton::validate`](crate::Skeleton::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// A ball index outside the skeleton
    #[error("ball {0} does not exist")]
    UnknownBall(BallId),

    /// A parent index outside the skeleton
    #[error("ball {ball} refers to missing parent {parent}")]
    DanglingParent { ball: BallId, parent: BallId },

    /// A parent that does not list the ball among its children
    #[error("parent {parent} does not list ball {ball} as a child")]
    MissingChildLink { ball: BallId, parent: BallId },

    /// A child whose parent link points elsewhere
    #[error("ball {parent} lists {child} as a child, but its parent is {actual:?}")]
    ForeignChild {
        parent: BallId,
        child: BallId,
        actual: Option<BallId>,
    },

    /// Following parent links from a ball never reaches a root
    #[error("ball {0} is part of a parent cycle")]
    Cycle(BallId),

    /// A radius axis that is zero, negative or NaN
    #[error("ball {0} has a non-positive radius")]
    NonPositiveRadius(BallId),
}
