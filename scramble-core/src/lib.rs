//! Core rules for the map scramble game: region outlines are projected onto
//! the screen, scattered along a frame's inner perimeter, and dragged back
//! onto their centroids, snapping within a tolerance while a session tracks
//! score and elapsed time.
//!
//! The crate is browser-free; the wasm front end owns rendering and event
//! plumbing and calls into these types.

pub mod config;
pub mod drag;
pub mod error;
pub mod geojson;
pub mod geom;
pub mod layout;
pub mod projection;
pub mod region;
pub mod session;

pub use config::{GameConfig, ProjectionConfig, SnapConfig};
pub use drag::{DragController, GestureEnd, GestureStart};
pub use error::{BoardError, LayoutError};
pub use geojson::FeatureCollection;
pub use geom::Point;
pub use layout::Frame;
pub use projection::Projector;
pub use region::{Board, Region};
pub use session::SessionState;
