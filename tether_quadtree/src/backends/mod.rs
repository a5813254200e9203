// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `quadtree`: region quadtree that splits a full leaf into four equal quadrants.
//! - `flatvec`: flat vector with linear scans (small, simple, easy to trust).

pub mod flatvec;
pub mod quadtree;
