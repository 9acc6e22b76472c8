//! Notification protocol between a [`PolyLine`](crate::polyline::PolyLine)
//! and presentation-layer observers.
//!
//! Two events are emitted while approximating, both with the payload
//! `{"p1": [x, y], "p2": [x, y]}` in model coordinates:
//!
//! * `trial_approx` - a segment that will be subdivided further.
//! * `final_approx_seg` - a segment kept in the approximation unchanged.

use std::cell::RefCell;
use std::io::Write;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::errors::ListenerError;
use crate::point::Point;

pub const TRIAL_APPROX: &str = "trial_approx";
pub const FINAL_APPROX_SEG: &str = "final_approx_seg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproxEvent {
    TrialApprox,
    FinalApproxSeg,
}

impl ApproxEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ApproxEvent::TrialApprox => TRIAL_APPROX,
            ApproxEvent::FinalApproxSeg => FINAL_APPROX_SEG,
        }
    }
}

/// Segment endpoints carried by every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventOptions {
    pub p1: (f64, f64),
    pub p2: (f64, f64),
}

impl EventOptions {
    pub fn segment(p1: &Point, p2: &Point) -> Self {
        EventOptions {
            p1: p1.as_tuple(),
            p2: p2.as_tuple(),
        }
    }
}

/// Anything that wants to watch an approximation run.
///
/// Called synchronously from inside `approximate`. An error aborts the run
/// and is handed back to the caller of `approximate`. Implementations must
/// not touch the polyline they observe.
pub trait Listener {
    fn receive(&self, event_name: &str, options: &EventOptions) -> Result<(), Report<ListenerError>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event: String,
    pub options: EventOptions,
}

/// Listener that keeps every event it receives, in order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: RefCell<Vec<RecordedEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of recorded events named `event_name`.
    pub fn count(&self, event_name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.event == event_name).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// One JSON object per line, `{"event":...,"options":{"p1":[..],"p2":[..]}}`.
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for event in self.events.borrow().iter() {
            serde_json::to_writer(&mut writer, event)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl Listener for EventRecorder {
    fn receive(&self, event_name: &str, options: &EventOptions) -> Result<(), Report<ListenerError>> {
        self.events.borrow_mut().push(RecordedEvent {
            event: event_name.to_string(),
            options: *options,
        });
        Ok(())
    }
}
