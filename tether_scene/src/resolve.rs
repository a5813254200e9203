// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision-constrained movement.
//!
//! A moving box is swept along its requested displacement and tested against every
//! indexed obstacle inside the swept area with the slab method. The move is cut short at
//! the earliest time of impact, so the box ends up touching the nearest obstacle but
//! never overlapping it.
//!
//! Times are kept as exact fractions of the requested displacement. Scaling the delta
//! by an exact fraction and truncating toward zero lands the box precisely on the
//! obstacle's edge along the axis of impact.

use core::cmp::Ordering;
use core::fmt::Debug;

use tether_quadtree::{Aabb2D, SpatialIndex};
use tracing::trace;

/// Exact non-negative-denominator fraction of the requested displacement.
#[derive(Copy, Clone, Debug)]
pub struct Ratio {
    num: i64,
    den: i64,
}

impl Ratio {
    /// Zero.
    pub const ZERO: Self = Self { num: 0, den: 1 };
    /// One, the full displacement.
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// `num / den`. The sign is moved onto the numerator; `den` must be non-zero.
    pub const fn new(num: i64, den: i64) -> Self {
        debug_assert!(den != 0, "ratio with zero denominator");
        if den < 0 {
            Self {
                num: -num,
                den: -den,
            }
        } else {
            Self { num, den }
        }
    }

    /// `v * self`, truncated toward zero.
    pub fn scale(self, v: i64) -> i64 {
        let scaled = i128::from(v) * i128::from(self.num) / i128::from(self.den);
        // |self| <= 1 for every ratio the resolver scales by, so this fits.
        i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
    }

    /// Approximate value.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        (i128::from(self.num) * i128::from(other.den))
            .cmp(&(i128::from(other.num) * i128::from(self.den)))
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Entry and exit times of a moving box against one obstacle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sweep {
    /// Time the boxes start to overlap.
    pub entry: Ratio,
    /// Time the boxes stop overlapping.
    pub exit: Ratio,
}

impl Sweep {
    /// Whether the obstacle blocks the move.
    ///
    /// The overlap must begin at or after the start, last for a positive time, and
    /// begin before the end of the move. A graze (`entry == exit`) or a contact exactly
    /// at the end only touches, which is allowed.
    pub fn is_blocking(&self) -> bool {
        self.entry >= Ratio::ZERO && self.entry < self.exit && self.entry < Ratio::ONE
    }
}

/// Smallest box covering `bounds` at both ends of the move.
pub fn swept_bounds(bounds: Aabb2D<i64>, dx: i64, dy: i64) -> Aabb2D<i64> {
    bounds.union(&bounds.translate(dx, dy))
}

// Entry/exit along one axis; `None` for either bound means that axis never limits it.
type Span = (Option<Ratio>, Option<Ratio>);

fn axis_span(min_a: i64, max_a: i64, min_b: i64, max_b: i64, v: i64) -> Option<Span> {
    if v == 0 {
        // Without motion on this axis the boxes must already overlap on it.
        return (min_a < max_b && min_b < max_a).then_some((None, None));
    }
    let (entry, exit) = if v > 0 {
        (min_b - max_a, max_b - min_a)
    } else {
        (max_b - min_a, min_b - max_a)
    };
    Some((Some(Ratio::new(entry, v)), Some(Ratio::new(exit, v))))
}

fn later(a: Option<Ratio>, b: Option<Ratio>) -> Option<Ratio> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn earlier(a: Option<Ratio>, b: Option<Ratio>) -> Option<Ratio> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Slab test of `moving` displaced by `(dx, dy)` against a fixed `obstacle`.
///
/// Returns `None` when the boxes can never overlap along this motion (separated on an
/// axis without motion) or when there is no motion at all.
pub fn sweep(moving: Aabb2D<i64>, obstacle: Aabb2D<i64>, dx: i64, dy: i64) -> Option<Sweep> {
    let (entry_x, exit_x) = axis_span(
        moving.min_x,
        moving.max_x,
        obstacle.min_x,
        obstacle.max_x,
        dx,
    )?;
    let (entry_y, exit_y) = axis_span(
        moving.min_y,
        moving.max_y,
        obstacle.min_y,
        obstacle.max_y,
        dy,
    )?;
    Some(Sweep {
        entry: later(entry_x, entry_y)?,
        exit: earlier(exit_x, exit_y)?,
    })
}

/// Result of resolving a move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution<K> {
    /// Accepted horizontal displacement.
    pub dx: i64,
    /// Accepted vertical displacement.
    pub dy: i64,
    /// Nearest obstacle that cut the move short.
    pub blocker: Option<K>,
    /// Fraction of the requested move that was accepted, when blocked.
    pub time_of_impact: Option<f64>,
}

impl<K> Resolution<K> {
    fn full(dx: i64, dy: i64) -> Self {
        Self {
            dx,
            dy,
            blocker: None,
            time_of_impact: None,
        }
    }

    /// Whether an obstacle cut the move short.
    pub fn is_blocked(&self) -> bool {
        self.blocker.is_some()
    }

    /// Whether the accepted displacement equals the requested one.
    pub fn is_full(&self, dx: i64, dy: i64) -> bool {
        self.dx == dx && self.dy == dy
    }
}

/// Largest part of the displacement `(dx, dy)` that `id`, currently at `bounds`, can
/// travel without overlapping any other item in `index`.
///
/// Ties between obstacles hit at the same time go to the lowest id.
pub fn resolve<I, K, P>(index: &I, id: K, bounds: Aabb2D<i64>, dx: i64, dy: i64) -> Resolution<K>
where
    I: SpatialIndex<i64, K, P> + ?Sized,
    K: Copy + Eq + Debug,
{
    if dx == 0 && dy == 0 {
        return Resolution::full(0, 0);
    }
    let swept = swept_bounds(bounds, dx, dy);
    let mut nearest: Option<(Ratio, K)> = None;
    for item in index.query_rect(swept) {
        if item.id == id {
            continue;
        }
        let Some(hit) = sweep(bounds, item.bounds, dx, dy) else {
            continue;
        };
        if !hit.is_blocking() {
            continue;
        }
        if nearest.is_none_or(|(t, _)| hit.entry < t) {
            nearest = Some((hit.entry, item.id));
        }
    }
    let resolution = match nearest {
        None => Resolution::full(dx, dy),
        Some((t, blocker)) => Resolution {
            dx: t.scale(dx),
            dy: t.scale(dy),
            blocker: Some(blocker),
            time_of_impact: Some(t.to_f64()),
        },
    };
    trace!(
        moving = ?id,
        dx,
        dy,
        accepted_dx = resolution.dx,
        accepted_dy = resolution.dy,
        blocker = ?resolution.blocker,
        "resolved move"
    );
    resolution
}
