// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Abstract pointer gestures fed into the scene, and the outcomes it reports.
//!
//! Hosts translate their raw input events into [`Gesture`]s. A gesture sequence is a
//! [`Down`](GestureKind::Down), zero or more [`Move`](GestureKind::Move)s, and an
//! [`Up`](GestureKind::Up). A [`DoubleClick`](GestureKind::DoubleClick) stands alone.

use crate::geometry::Point;
use crate::types::{LineId, RectId};

/// Which pointer button a gesture came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary button: drags rectangles, or deletes lines with [`Modifiers::CONTROL`].
    Left,
    /// Secondary button: draws reference lines.
    Right,
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a gesture.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CONTROL = 0b0000_0001;
        /// Shift key.
        const SHIFT   = 0b0000_0010;
        /// Alt or Option key.
        const ALT     = 0b0000_0100;
        /// Meta, Command, or Windows key.
        const META    = 0b0000_1000;
    }
}

/// Phase of a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Button pressed.
    Down,
    /// Pointer moved while a button is held.
    Move,
    /// Button released.
    Up,
    /// Double click; independent of any press/release sequence.
    DoubleClick,
}

/// One abstract input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gesture {
    /// Phase.
    pub kind: GestureKind,
    /// Pointer position in world coordinates.
    pub point: Point,
    /// Button involved. Ignored for moves.
    pub button: Button,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl Gesture {
    /// A press of `button` at `point`.
    pub fn down(point: impl Into<Point>, button: Button) -> Self {
        Self::new(GestureKind::Down, point.into(), button)
    }

    /// A pointer move to `point`.
    pub fn move_to(point: impl Into<Point>) -> Self {
        Self::new(GestureKind::Move, point.into(), Button::Left)
    }

    /// A release at `point`.
    pub fn up(point: impl Into<Point>) -> Self {
        Self::new(GestureKind::Up, point.into(), Button::Left)
    }

    /// A double click at `point`.
    pub fn double_click(point: impl Into<Point>) -> Self {
        Self::new(GestureKind::DoubleClick, point.into(), Button::Left)
    }

    /// The same gesture with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    const fn new(kind: GestureKind, point: Point, button: Button) -> Self {
        Self {
            kind,
            point,
            button,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Observable effect of a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed.
    Ignored,
    /// A double click placed a rectangle.
    RectangleCreated(RectId),
    /// A press landed on a rectangle and will drag it.
    DragStarted(RectId),
    /// A move displaced the dragged rectangle.
    Dragged {
        /// Rectangle moved.
        rect: RectId,
        /// Accepted horizontal displacement.
        dx: i64,
        /// Accepted vertical displacement.
        dy: i64,
        /// Obstacle that cut the move short, if any.
        blocker: Option<RectId>,
    },
    /// A release committed the dragged rectangle into the index.
    DragCommitted(RectId),
    /// A press on a rectangle started a reference line.
    LineStarted(LineId),
    /// A move updated the pending line's end point.
    LineExtended(LineId),
    /// A release on a second rectangle finalized the line.
    LineFinalized(LineId),
    /// A release elsewhere discarded the pending line.
    LineDiscarded(LineId),
    /// A control-press removed the line under the pointer.
    LineDeleted(LineId),
}

impl GestureOutcome {
    /// Whether the gesture changed scene state.
    pub fn is_effective(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
