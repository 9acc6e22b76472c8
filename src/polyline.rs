use std::fmt;
use std::ops::Index;
use std::rc::{Rc, Weak};

use error_stack::{Report, ResultExt};
use log::{debug, info, warn};

use crate::douglas_peucker::douglas_peucker;
use crate::errors::ApproxError;
use crate::listener::{EventOptions, Listener};
use crate::point::Point;

/// An ordered sequence of points, the vertices of a piecewise-linear path.
///
/// Points are only ever appended. Listeners are held weakly; the polyline
/// never keeps an observer alive.
#[derive(Default)]
pub struct PolyLine {
    points: Vec<Point>,
    listeners: Vec<Weak<dyn Listener>>,
}

impl PolyLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Returns a new polyline holding a subset of these points that deviates
    /// from this one by less than `tolerance` units (Ramer-Douglas-Peucker).
    ///
    /// Registered listeners receive `trial_approx` and `final_approx_seg`
    /// events while the subset is chosen. The result has no listeners and
    /// this polyline is left untouched.
    ///
    /// Fails on an empty polyline, or when a listener fails.
    pub fn approximate(&self, tolerance: f64) -> Result<PolyLine, Report<ApproxError>> {
        if tolerance.is_nan() || tolerance < 0.0 {
            warn!("tolerance {} is not a non-negative number, every point will be kept", tolerance);
        }

        let points = douglas_peucker(&self.points, tolerance, |event, options| {
            self.notify_all(event.name(), options)
        })
        .attach_printable_lazy(|| format!("approximating {} points at tolerance {}", self.len(), tolerance))?;

        info!("approximate {} -> {} points (tolerance {})", self.len(), points.len(), tolerance);
        Ok(PolyLine::from(points))
    }

    /// Registers `listener` for every future event. The same listener may be
    /// added more than once and then hears each event once per registration.
    pub fn add_listener<L: Listener + 'static>(&mut self, listener: &Rc<L>) {
        let weak: Weak<L> = Rc::downgrade(listener);
        self.listeners.push(weak);
    }

    /// Number of registrations whose listener is still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners.iter().filter(|l| l.strong_count() > 0).count()
    }

    /// Hands `event_name` and `options` to every live listener in
    /// registration order. The first failure stops the broadcast.
    pub fn notify_all(&self, event_name: &str, options: &EventOptions) -> Result<(), Report<ApproxError>> {
        debug!("notify {} {:?} -> {:?}", event_name, options.p1, options.p2);
        for listener in self.listeners.iter() {
            let Some(listener) = listener.upgrade() else {
                debug!("skipping dropped listener");
                continue;
            };
            listener
                .receive(event_name, options)
                .change_context_lazy(|| ApproxError::Listener {
                    event: event_name.to_string(),
                })?;
        }
        Ok(())
    }
}

impl From<Vec<Point>> for PolyLine {
    fn from(points: Vec<Point>) -> Self {
        PolyLine {
            points,
            listeners: Vec::new(),
        }
    }
}

impl FromIterator<Point> for PolyLine {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        PolyLine::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<Point> for PolyLine {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PolyLine {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Index<usize> for PolyLine {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

/// Same points in the same order. Listeners are not compared.
impl PartialEq for PolyLine {
    fn eq(&self, other: &PolyLine) -> bool {
        self.points == other.points
    }
}

impl PartialEq<[Point]> for PolyLine {
    fn eq(&self, other: &[Point]) -> bool {
        self.points.as_slice() == other
    }
}

impl PartialEq<Vec<Point>> for PolyLine {
    fn eq(&self, other: &Vec<Point>) -> bool {
        &self.points == other
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points: Vec<String> = self.points.iter().map(|p| p.to_string()).collect();
        write!(f, "Polyline([{}])", points.join(", "))
    }
}

impl fmt::Debug for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyLine")
            .field("points", &self.points)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
