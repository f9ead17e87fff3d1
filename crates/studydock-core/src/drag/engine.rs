//! Pointer-driven positioning.
//!
//! Pure transitions over [`DragState`]. The position is clamped after every
//! move and every resize, so `0 <= x <= viewport.width - widget.width` (and
//! likewise for `y`) holds at each intermediate step of a drag.

use serde::{Deserialize, Serialize};

use super::geometry::{clamp_axis, clamp_position, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorOverride {
    Grabbing,
}

/// Document-wide overrides the host applies for the duration of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerCapture {
    pub cursor: CursorOverride,
    /// Suppress text selection while the pointer sweeps over the page.
    pub disable_text_selection: bool,
}

impl Default for PointerCapture {
    fn default() -> Self {
        Self {
            cursor: CursorOverride::Grabbing,
            disable_text_selection: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragState {
    /// Top-left corner of the widget.
    pub position: Point,
    pub dragging: bool,
    /// Pointer minus position, fixed at drag start and corrected on clamp.
    pub pointer_offset: Point,
    /// Present exactly while `dragging`.
    pub capture: Option<PointerCapture>,
}

impl DragState {
    /// Idle state at `position`. Callers clamp it once sizes are known.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Grab the widget at `current_position` with the pointer at `pointer`.
pub fn begin_drag(pointer: Point, current_position: Point) -> DragState {
    DragState {
        position: current_position,
        dragging: true,
        pointer_offset: pointer - current_position,
        capture: Some(PointerCapture::default()),
    }
}

/// Follow the pointer, keeping the widget inside the viewport.
///
/// An axis that had to be clamped gets its offset re-anchored to the clamped
/// position, so the widget follows the pointer again as soon as it comes back
/// into range instead of lagging behind by the overshoot. Non-finite
/// pointer coordinates are dropped.
pub fn on_pointer_move(pointer: Point, state: DragState, widget: Size, viewport: Size) -> DragState {
    if !state.dragging || !pointer.x.is_finite() || !pointer.y.is_finite() {
        return state;
    }
    let target = pointer - state.pointer_offset;
    let clamped = Point::new(
        clamp_axis(target.x, viewport.width, widget.width),
        clamp_axis(target.y, viewport.height, widget.height),
    );

    let mut offset = state.pointer_offset;
    if clamped.x != target.x {
        offset.x = pointer.x - clamped.x;
    }
    if clamped.y != target.y {
        offset.y = pointer.y - clamped.y;
    }

    DragState {
        position: clamped,
        pointer_offset: offset,
        ..state
    }
}

/// Release the pointer. The position stays where the drag left it.
pub fn end_drag(state: DragState) -> DragState {
    DragState {
        dragging: false,
        capture: None,
        ..state
    }
}

/// Re-clamp after the viewport or the widget changed size.
pub fn on_viewport_or_size_change(position: Point, widget: Size, viewport: Size) -> Point {
    clamp_position(position, widget, viewport)
}

/// Re-clamp a whole drag state after a resize.
///
/// While dragging, a clamped axis is re-anchored to `last_pointer` exactly as
/// a clamped pointer move would be, so the next move does not jump.
pub fn reclamp(state: DragState, last_pointer: Point, widget: Size, viewport: Size) -> DragState {
    let position = on_viewport_or_size_change(state.position, widget, viewport);
    let mut offset = state.pointer_offset;
    if state.dragging {
        if position.x != state.position.x {
            offset.x = last_pointer.x - position.x;
        }
        if position.y != state.position.y {
            offset.y = last_pointer.y - position.y;
        }
    }
    DragState {
        position,
        pointer_offset: offset,
        ..state
    }
}
