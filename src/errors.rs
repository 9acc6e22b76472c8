use std::fmt;

/// Failures raised by [`PolyLine::approximate`](crate::polyline::PolyLine::approximate)
/// and [`PolyLine::notify_all`](crate::polyline::PolyLine::notify_all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproxError {
    /// `approximate` needs at least one point; the last point of an empty
    /// path is undefined.
    EmptyPolyLine,
    /// A registered listener failed while receiving `event`.
    Listener { event: String },
}

impl fmt::Display for ApproxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApproxError::EmptyPolyLine => f.write_str("cannot approximate an empty polyline"),
            ApproxError::Listener { event } => write!(f, "listener failed to receive `{}`", event),
        }
    }
}

impl std::error::Error for ApproxError {}

/// Returned by a [`Listener`](crate::listener::Listener) that could not
/// handle an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError(pub String);

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener error: {}", self.0)
    }
}

impl std::error::Error for ListenerError {}
