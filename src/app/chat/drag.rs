//! Pointer-drag reordering for the chat message list.
//!
//! The controller is a small state machine:
//!
//! ```text
//! Idle --begin--> Dragging { origin, current } --end/cancel--> Idle
//!                     |  ^
//!                     +--+  hover that crosses the hovered row's midpoint
//! ```
//!
//! A swap only fires once the pointer has crossed the vertical midpoint of
//! the hovered row in the direction of travel. Without that hysteresis two
//! rows of similar height would swap back and forth on every frame.
//!
//! The controller never touches the store itself; it returns a [`Reorder`]
//! for the caller to apply with `MessageStore::move_to`.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Index the dragged row started at
        origin: usize,
        /// Index the dragged row currently occupies
        current: usize,
    },
}

/// A committed move, to be applied as `move_to(from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Vertical extent of a rendered row, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f32,
    pub bottom: f32,
}

impl RowBounds {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Half the row height, measured from the top of the row
    pub fn middle_offset(&self) -> f32 {
        (self.bottom - self.top) / 2.0
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragReorderController {
    state: DragState,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Index the dragged row currently occupies, if a drag is active
    pub fn dragged_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { current, .. } => Some(current),
            DragState::Idle => None,
        }
    }

    pub fn begin(&mut self, index: usize) {
        trace!("Drag started at index {}", index);
        self.state = DragState::Dragging {
            origin: index,
            current: index,
        };
    }

    /// Feed one hover update over the row at `hover_index`.
    ///
    /// `pointer_y` is the pointer's screen y coordinate and `row` the hovered
    /// row's bounds. Returns the move to apply, if the pointer crossed the
    /// row's midpoint in the direction of travel.
    pub fn hover(
        &mut self,
        hover_index: usize,
        row: RowBounds,
        pointer_y: f32,
    ) -> Option<Reorder> {
        let DragState::Dragging { origin, current } = self.state else {
            return None;
        };

        if current == hover_index {
            return None;
        }

        let hover_middle_y = row.middle_offset();
        let hover_client_y = pointer_y - row.top;

        let moving_down = current < hover_index;
        if moving_down && hover_client_y < hover_middle_y {
            return None;
        }
        if !moving_down && hover_client_y > hover_middle_y {
            return None;
        }

        trace!("Drag crossed midpoint: {} -> {}", current, hover_index);
        self.state = DragState::Dragging {
            origin,
            current: hover_index,
        };
        Some(Reorder {
            from: current,
            to: hover_index,
        })
    }

    /// Finish the drag. Every crossing was already committed, so releasing
    /// only stops tracking.
    pub fn end(&mut self) {
        if let DragState::Dragging { origin, current } = self.state {
            trace!("Drag ended: {} -> {}", origin, current);
        }
        self.state = DragState::Idle;
    }
}
