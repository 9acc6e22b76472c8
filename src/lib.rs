pub mod point;
pub mod geometry;
pub mod errors;
pub mod listener;
pub mod douglas_peucker;
pub mod polyline;

pub use crate::errors::{ApproxError, ListenerError};
pub use crate::listener::{EventOptions, EventRecorder, Listener};
pub use crate::point::Point;
pub use crate::polyline::PolyLine;
