use error_stack::Report;
use log::debug;

use crate::errors::ApproxError;
use crate::geometry::perpendicular_distance;
use crate::listener::{ApproxEvent, EventOptions};
use crate::point::Point;

/// Largest deviation of the interior points `start+1..end` from the line
/// through `points[start]` and `points[end]`, with the index that reaches it.
/// The first index to reach the maximum wins; NaN deviations never win.
fn max_deviation(points: &[Point], start: usize, end: usize) -> (f64, usize) {
    let mut max_distance = 0.0;
    let mut max_index = start + 1;

    for i in start + 1..end {
        let distance = perpendicular_distance(&points[start], &points[end], &points[i]);
        if distance > max_distance {
            max_distance = distance;
            max_index = i;
        }
    }

    (max_distance, max_index)
}

/// Indices of the points kept by Ramer-Douglas-Peucker at `tolerance`,
/// strictly increasing, always starting at `0` and ending at the last index.
///
/// Subranges are visited in recursive pre-order (a range, then its left half,
/// then its right half) from an explicit stack. `notify` is called with
/// `TrialApprox` for every range that gets split and with `FinalApproxSeg`
/// for every range whose interior stays below `tolerance`; two-point ranges
/// are accepted silently. An error from `notify` aborts the run.
pub fn douglas_peucker_indices<F>(
    points: &[Point],
    tolerance: f64,
    mut notify: F,
) -> Result<Vec<usize>, Report<ApproxError>>
where
    F: FnMut(ApproxEvent, &EventOptions) -> Result<(), Report<ApproxError>>,
{
    let last = match points.len() {
        0 => {
            return Err(Report::new(ApproxError::EmptyPolyLine)
                .attach_printable("a polyline needs at least one point to be approximated"))
        }
        1 => return Ok(vec![0]),
        n => n - 1,
    };

    let mut result = Vec::new();
    let mut stack = vec![(0, last)];

    while let Some((start, end)) = stack.pop() {
        if end - start < 2 {
            result.push(start);
            continue;
        }

        let (max_distance, max_index) = max_deviation(points, start, end);
        let segment = EventOptions::segment(&points[start], &points[end]);

        if max_distance < tolerance {
            debug!("final {}..{} (max deviation {} < {})", start, end, max_distance, tolerance);
            notify(ApproxEvent::FinalApproxSeg, &segment)?;
            result.push(start);
        } else {
            debug!("split {}..{} at {} (max deviation {})", start, end, max_index, max_distance);
            notify(ApproxEvent::TrialApprox, &segment)?;
            // right half first so the left half pops next
            stack.push((max_index, end));
            stack.push((start, max_index));
        }
    }

    result.push(last);
    Ok(result)
}

/// Points kept by Ramer-Douglas-Peucker, in path order.
/// See [`douglas_peucker_indices`].
pub fn douglas_peucker<F>(
    points: &[Point],
    tolerance: f64,
    notify: F,
) -> Result<Vec<Point>, Report<ApproxError>>
where
    F: FnMut(ApproxEvent, &EventOptions) -> Result<(), Report<ApproxError>>,
{
    let indices = douglas_peucker_indices(points, tolerance, notify)?;
    Ok(indices.into_iter().map(|i| points[i]).collect())
}
