//! Drag-constraint engine: free positioning that never leaves the viewport.

mod engine;
mod geometry;

pub use engine::{
    begin_drag, end_drag, on_pointer_move, on_viewport_or_size_change, reclamp, CursorOverride, DragState,
    PointerCapture,
};
pub use geometry::{clamp_axis, clamp_position, ElementSize, Point, Size};
