use std::cell::RefCell;
use std::rc::Rc;

use scramble_core::{Board, DragController, GameConfig, SessionState};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
#[derive(Clone)]
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub config: GameConfig,
    /// None until the map finishes loading; an empty board renders as frame
    /// chrome only.
    pub board: Option<Board>,
    pub session: SessionState,
    pub drag: DragController,
    /// Snap tolerance resolved once against the viewport width.
    pub snap_threshold: f64,
    pub label_font_px: f64,
    /// Wall-clock stamp of the first gesture, ms since epoch.
    pub timer_start_ms: Option<f64>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
