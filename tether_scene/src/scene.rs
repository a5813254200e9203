// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene coordinator: turns gestures into registry and resolver calls.

use tracing::debug;

use crate::config::{ConfigError, SceneConfig};
use crate::geometry::{Point, adjusted_origin, rect_at};
use crate::gesture::{Button, Gesture, GestureKind, GestureOutcome, Modifiers};
use crate::registry::Registry;
use crate::resolve::resolve;
use crate::types::{Color, LineId, LineView, RectId, RectangleView};

/// What the active gesture sequence is doing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Left press: dragging the rectangle under the press, if any.
    DraggingRect,
    /// Right press: drawing a reference line.
    CreatingLine,
    /// Control + left press: deleting the line under the press.
    DeletingLine,
}

impl Action {
    /// The action a press starts.
    pub fn for_press(button: Button, modifiers: Modifiers) -> Self {
        match button {
            Button::Left if modifiers.contains(Modifiers::CONTROL) => Self::DeletingLine,
            Button::Left => Self::DraggingRect,
            Button::Right => Self::CreatingLine,
        }
    }
}

/// Source of colors for new rectangles.
pub trait Palette {
    /// Color for the next rectangle.
    fn next_color(&mut self) -> Color;
}

/// Deterministic palette cycling through a fixed set of colors.
///
/// Used by [`Scene::new`].
#[derive(Copy, Clone, Debug, Default)]
pub struct CyclingPalette {
    next: usize,
}

impl CyclingPalette {
    const COLORS: [Color; 6] = [
        Color::rgb(0xe6, 0x4a, 0x19),
        Color::rgb(0x1e, 0x88, 0xe5),
        Color::rgb(0x43, 0xa0, 0x47),
        Color::rgb(0xfd, 0xd8, 0x35),
        Color::rgb(0x8e, 0x24, 0xaa),
        Color::rgb(0x00, 0x89, 0x7b),
    ];
}

impl Palette for CyclingPalette {
    fn next_color(&mut self) -> Color {
        let color = Self::COLORS[self.next % Self::COLORS.len()];
        self.next = self.next.wrapping_add(1);
        color
    }
}

/// Top-level scene: rectangles, reference lines, and the gesture state machine.
///
/// Every call runs to completion. A host sharing a scene across threads guards it with
/// one lock per session.
#[derive(Debug)]
pub struct Scene<C = CyclingPalette> {
    config: SceneConfig,
    registry: Registry,
    palette: C,
    action: Action,
    current_line: Option<LineId>,
    dragged: Option<RectId>,
}

impl Scene {
    /// Create an empty scene with the default palette.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        Self::with_palette(config, CyclingPalette::default())
    }
}

impl<C: Palette> Scene<C> {
    /// Create an empty scene drawing rectangle colors from `palette`.
    pub fn with_palette(config: SceneConfig, palette: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = Registry::new(
            config.world(),
            config.quadtree_capacity,
            config.quadtree_max_depth,
        );
        Ok(Self {
            config,
            registry,
            palette,
            action: Action::Idle,
            current_line: None,
            dragged: None,
        })
    }

    /// Feed one gesture.
    pub fn handle(&mut self, gesture: Gesture) -> GestureOutcome {
        match gesture.kind {
            GestureKind::DoubleClick => self.double_click(gesture.point),
            GestureKind::Down => {
                self.pointer_down(gesture.point, gesture.button, gesture.modifiers)
            }
            GestureKind::Move => self.pointer_move(gesture.point),
            GestureKind::Up => self.pointer_up(gesture.point),
        }
    }

    /// Place a rectangle centered on `point`, clamped to the world.
    pub fn double_click(&mut self, point: Point) -> GestureOutcome {
        let origin = adjusted_origin(
            point,
            self.config.rect_width,
            self.config.rect_height,
            self.config.world(),
        );
        let bounds = rect_at(origin, self.config.rect_width, self.config.rect_height);
        // Peek first so a rejected create does not advance the palette. A rectangle being
        // dragged counts at its live position, not where the index last saw it.
        if self.registry.overlapping(bounds).is_some() {
            debug!(?point, "double click on occupied space");
            return GestureOutcome::Ignored;
        }
        let color = self.palette.next_color();
        self.registry
            .create_rectangle(bounds, color)
            .map_or(GestureOutcome::Ignored, GestureOutcome::RectangleCreated)
    }

    /// Start a gesture sequence.
    ///
    /// Ignored while another sequence is active.
    pub fn pointer_down(
        &mut self,
        point: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> GestureOutcome {
        if self.action != Action::Idle {
            debug!(action = ?self.action, "press ignored: gesture already active");
            return GestureOutcome::Ignored;
        }
        self.action = Action::for_press(button, modifiers);
        debug!(action = ?self.action, ?point, "gesture started");
        match self.action {
            Action::DraggingRect => match self.registry.rect_at_point(point) {
                Some(rect) => {
                    self.dragged = Some(rect);
                    GestureOutcome::DragStarted(rect)
                }
                None => GestureOutcome::Ignored,
            },
            Action::CreatingLine => {
                let Some(line) = self
                    .registry
                    .rect_at_point(point)
                    .and_then(|rect| self.registry.create_line(rect, point))
                else {
                    return GestureOutcome::Ignored;
                };
                self.current_line = Some(line);
                GestureOutcome::LineStarted(line)
            }
            Action::DeletingLine => self
                .registry
                .delete_line_at(point, self.config.colinearity_tolerance)
                .map_or(GestureOutcome::Ignored, GestureOutcome::LineDeleted),
            Action::Idle => GestureOutcome::Ignored,
        }
    }

    /// Continue the active gesture sequence.
    pub fn pointer_move(&mut self, point: Point) -> GestureOutcome {
        match (self.action, self.dragged, self.current_line) {
            (Action::DraggingRect, Some(rect), _) => self.drag_to(rect, point),
            (Action::CreatingLine, _, Some(line)) if self.registry.extend_line(line, point) => {
                GestureOutcome::LineExtended(line)
            }
            _ => GestureOutcome::Ignored,
        }
    }

    /// Finish the active gesture sequence. The scene is idle afterwards.
    pub fn pointer_up(&mut self, point: Point) -> GestureOutcome {
        let outcome = match (self.action, self.dragged, self.current_line) {
            (Action::DraggingRect, Some(rect), _) => {
                if self.registry.sync_index(rect) {
                    GestureOutcome::DragCommitted(rect)
                } else {
                    GestureOutcome::Ignored
                }
            }
            (Action::CreatingLine, _, Some(line)) => {
                if self.registry.finalize_line(line, point) {
                    GestureOutcome::LineFinalized(line)
                } else {
                    GestureOutcome::LineDiscarded(line)
                }
            }
            _ => GestureOutcome::Ignored,
        };
        self.reset();
        outcome
    }

    fn drag_to(&mut self, rect: RectId, point: Point) -> GestureOutcome {
        let Some(bounds) = self.registry.rectangle(rect).map(|record| record.bounds) else {
            return GestureOutcome::Ignored;
        };
        let target = adjusted_origin(
            point,
            bounds.width(),
            bounds.height(),
            self.config.world(),
        );
        let dx = target.x - bounds.min_x;
        let dy = target.y - bounds.min_y;
        let resolution = resolve(self.registry.index(), rect, bounds, dx, dy);
        if resolution.dx == 0 && resolution.dy == 0 {
            return GestureOutcome::Ignored;
        }
        self.registry
            .translate_rectangle(rect, resolution.dx, resolution.dy);
        GestureOutcome::Dragged {
            rect,
            dx: resolution.dx,
            dy: resolution.dy,
            blocker: resolution.blocker,
        }
    }

    fn reset(&mut self) {
        if self.action != Action::Idle {
            debug!(action = ?self.action, "gesture finished");
        }
        self.action = Action::Idle;
        self.current_line = None;
        self.dragged = None;
    }
}

impl<C> Scene<C> {
    /// Delete a rectangle and the lines anchored to it.
    ///
    /// A drag of that rectangle becomes inert, and a line being drawn from it is dropped.
    pub fn delete_rectangle(&mut self, id: RectId) -> bool {
        if !self.registry.delete_rectangle(id) {
            return false;
        }
        if self.dragged == Some(id) {
            self.dragged = None;
        }
        if let Some(line) = self.current_line
            && self.registry.line(line).is_none()
        {
            self.current_line = None;
        }
        true
    }

    /// Snapshot of every rectangle, in id order.
    pub fn list_rectangles(&self) -> Vec<RectangleView> {
        self.registry.rectangles().map(RectangleView::from).collect()
    }

    /// Snapshot of every line, the one being drawn included, in id order.
    pub fn list_lines(&self) -> Vec<LineView> {
        self.registry.lines().map(LineView::from).collect()
    }

    /// Whether the spatial index agrees with the registry.
    ///
    /// A rectangle being dragged may run ahead of its indexed bounds until release.
    pub fn index_in_sync(&self) -> bool {
        self.registry.index_matches(self.dragged)
    }

    /// Current action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Rectangle being dragged, if any.
    pub fn dragged(&self) -> Option<RectId> {
        self.dragged
    }

    /// Line being drawn, if any.
    pub fn current_line(&self) -> Option<LineId> {
        self.current_line
    }

    /// The configuration the scene was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Read access to the entity registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
