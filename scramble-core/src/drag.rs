use crate::geom::Point;
use crate::region::Board;
use crate::session::SessionState;

/// Outcome of a gesture start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStart {
    /// A loose piece was grabbed and raised to the top of the draw order.
    /// `timer_started` is set on the session's very first grab.
    Grabbed { index: usize, timer_started: bool },
    /// Nothing under the pointer, the piece is already placed, or another
    /// drag is in flight.
    Ignored,
}

/// Outcome of a gesture end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    /// Released within tolerance: the piece snapped onto its centroid.
    Placed { index: usize, placed_count: usize },
    /// Released too far out; the piece stays where it was dropped.
    Dropped { index: usize },
    /// No drag was in flight.
    Ignored,
}

/// Single-pointer drag gesture tracker.
///
/// One gesture at a time: while a piece is in flight every other press is
/// ignored, matching single-pointer input. Each transition mutates the board
/// directly; proximity is only tested on release.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    index: usize,
    grab: (f64, f64),
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Index of the piece currently in flight, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// Gesture start. Grabs the topmost loose piece under `at`, captures the
    /// grab offset so later moves preserve the grip point, and raises the
    /// piece. Placed pieces swallow the gesture.
    pub fn press(&mut self, board: &mut Board, session: &mut SessionState, at: Point) -> GestureStart {
        if self.active.is_some() {
            return GestureStart::Ignored;
        }
        let Some(idx) = board.hit_test(at) else {
            return GestureStart::Ignored;
        };
        if board.regions[idx].placed {
            return GestureStart::Ignored;
        }
        let idx = board.raise(idx);
        let pos = board.regions[idx].pos;
        self.active = Some(ActiveDrag {
            index: idx,
            grab: (at.x - pos.x, at.y - pos.y),
        });
        GestureStart::Grabbed {
            index: idx,
            timer_started: session.start(),
        }
    }

    /// Gesture move: reposition the piece under the pointer, clamped into
    /// the frame. No proximity check happens here.
    pub fn drag(&mut self, board: &mut Board, at: Point) -> Option<usize> {
        let a = self.active.as_ref()?;
        board.regions[a.index].pos = board.frame.clamp(Point {
            x: at.x - a.grab.0,
            y: at.y - a.grab.1,
        });
        Some(a.index)
    }

    /// Gesture end: snap if released within `threshold` of the centroid,
    /// otherwise leave the piece where it lies (still draggable).
    pub fn release(
        &mut self,
        board: &mut Board,
        session: &mut SessionState,
        threshold: f64,
    ) -> GestureEnd {
        let Some(a) = self.active.take() else {
            return GestureEnd::Ignored;
        };
        let region = &mut board.regions[a.index];
        if let Some(target) = region.target
            && region.pos.distance(target) < threshold
        {
            region.pos = target;
            region.placed = true;
            GestureEnd::Placed {
                index: a.index,
                placed_count: session.record_placed(),
            }
        } else {
            GestureEnd::Dropped { index: a.index }
        }
    }
}
