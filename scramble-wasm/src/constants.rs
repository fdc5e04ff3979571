/// Application-wide drawing constants. Colors are CSS strings fed straight
/// to the canvas context.
pub const BASE_FILL: &str = "#f0f0f0";
pub const BASE_STROKE: &str = "#bbb";
pub const PIECE_FILL: &str = "#ccc";
pub const PIECE_STROKE: &str = "#333";
pub const PLACED_FILL: &str = "#43a047";
pub const PLACED_STROKE: &str = "#fff";
pub const LABEL_FILL: &str = "#444";
pub const FRAME_STROKE: &str = "#000";
pub const FRAME_STROKE_WIDTH: f64 = 4.0;
/// Label font sizes (px); the narrow value kicks in under the breakpoint.
pub const LABEL_FONT_PX: f64 = 9.0;
pub const LABEL_FONT_NARROW_PX: f64 = 8.0;
/// Timer refresh period (ms).
pub const TIMER_TICK_MS: i32 = 1000;
/// Map fetched when no `?m=` parameter is present.
pub const DEFAULT_MAP: &str = "turkiye";
/// The viewport keeps a fixed share of the window height.
pub const VIEWPORT_HEIGHT_SHARE: f64 = 0.9;
