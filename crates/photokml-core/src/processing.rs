use geo::Point;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::info;

use crate::geo::point_distance;
use crate::models::{AnnotatedPlacemark, Placemark};

/// Outcome of the inclusion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Placemarks marked for export
    pub included: usize,

    /// Placemarks considered
    pub total: usize,
}

impl FilterReport {
    pub fn excluded(&self) -> usize {
        self.total - self.included
    }
}

/// Ordering used for export: group ascending, then latitude ascending
pub fn compare_placemarks(a: &Placemark, b: &Placemark) -> Ordering {
    a.group
        .cmp(&b.group)
        .then_with(|| {
            // -0.0 and 0.0 compare equal so the sort stays stable
            a.latitude()
                .partial_cmp(&b.latitude())
                .unwrap_or(Ordering::Equal)
        })
}

/// Sort placemarks and annotate each with its distance to the previous one
///
/// The sort is stable. The running previous point starts at (0°, 0°) and
/// advances to every placemark in sort order, included or not. The inclusion
/// filter is applied with `min_distance` before returning.
pub fn reorder(placemarks: &[Placemark], min_distance: f64) -> Vec<AnnotatedPlacemark> {
    let mut sorted = placemarks.to_vec();
    sorted.sort_by(compare_placemarks);

    let mut previous = Point::new(0.0, 0.0);
    let mut annotated: Vec<AnnotatedPlacemark> = sorted
        .into_iter()
        .map(|placemark| {
            let distance_from_previous = point_distance(placemark.location, previous);
            previous = placemark.location;
            AnnotatedPlacemark {
                placemark,
                distance_from_previous,
                include: false,
            }
        })
        .collect();

    mark_included(&mut annotated, min_distance);
    annotated
}

/// Re-run the inclusion filter with a new threshold
///
/// Returns a new sequence; the input is left untouched.
pub fn filter(
    placemarks: &[AnnotatedPlacemark],
    min_distance: f64,
) -> (Vec<AnnotatedPlacemark>, FilterReport) {
    let mut filtered = placemarks.to_vec();
    let report = mark_included(&mut filtered, min_distance);
    (filtered, report)
}

/// Count included placemarks without re-filtering
pub fn count_included(placemarks: &[AnnotatedPlacemark]) -> FilterReport {
    FilterReport {
        included: placemarks.iter().filter(|p| p.include).count(),
        total: placemarks.len(),
    }
}

fn mark_included(placemarks: &mut [AnnotatedPlacemark], min_distance: f64) -> FilterReport {
    info!("Min distance between placemarks set to {} meters", min_distance);

    for placemark in placemarks.iter_mut() {
        // Equal to the threshold is kept
        placemark.include = placemark.distance_from_previous >= min_distance;
    }

    let report = count_included(placemarks);
    info!(
        "{} / {} placemarks marked to export",
        report.included, report.total
    );
    report
}
