// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration and its validation.

use tether_quadtree::{Aabb2D, DEFAULT_MAX_DEPTH};
use thiserror::Error;

/// Parameters injected into a [`Scene`](crate::Scene) at construction.
///
/// With the `serde` feature, missing fields fall back to [`SceneConfig::default`], so a
/// partial document such as `quadtree_capacity = 8` is enough.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Width of the world; the world spans `[0, world_width)`.
    pub world_width: i64,
    /// Height of the world; the world spans `[0, world_height)`.
    pub world_height: i64,
    /// Width of every created rectangle.
    pub rect_width: i64,
    /// Height of every created rectangle.
    pub rect_height: i64,
    /// Items a quadtree leaf holds before it subdivides.
    pub quadtree_capacity: usize,
    /// Depth at which quadtree leaves stop subdividing.
    pub quadtree_max_depth: usize,
    /// How far apart the two axis fractions of a delete click may be and still count
    /// as on a reference line.
    pub colinearity_tolerance: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world_width: 800,
            world_height: 600,
            rect_width: 50,
            rect_height: 50,
            quadtree_capacity: 4,
            quadtree_max_depth: DEFAULT_MAX_DEPTH,
            colinearity_tolerance: 0.2,
        }
    }
}

impl SceneConfig {
    /// The world boundary, anchored at the origin.
    pub fn world(&self) -> Aabb2D<i64> {
        Aabb2D::from_xywh(0, 0, self.world_width, self.world_height)
    }

    /// Check that the configuration describes a usable scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width <= 0 || self.world_height <= 0 {
            return Err(ConfigError::EmptyWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.rect_width <= 0 || self.rect_height <= 0 {
            return Err(ConfigError::EmptyRectangle {
                width: self.rect_width,
                height: self.rect_height,
            });
        }
        if self.rect_width > self.world_width || self.rect_height > self.world_height {
            return Err(ConfigError::RectangleLargerThanWorld);
        }
        if self.quadtree_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.colinearity_tolerance.is_finite() || self.colinearity_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.colinearity_tolerance));
        }
        Ok(())
    }
}

/// Reasons a [`SceneConfig`] is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The world has no area.
    #[error("world must have positive size, got {width}x{height}")]
    EmptyWorld {
        /// Configured width.
        width: i64,
        /// Configured height.
        height: i64,
    },
    /// Rectangles would have no area.
    #[error("rectangles must have positive size, got {width}x{height}")]
    EmptyRectangle {
        /// Configured width.
        width: i64,
        /// Configured height.
        height: i64,
    },
    /// A single rectangle cannot fit in the world.
    #[error("rectangle size exceeds the world size")]
    RectangleLargerThanWorld,
    /// Quadtree leaves must hold at least one item.
    #[error("quadtree capacity must be at least 1")]
    ZeroCapacity,
    /// The colinearity tolerance is negative or not finite.
    #[error("colinearity tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}
