use geo::Point;
use std::fmt;
use std::path::Path;

/// A geotagged photo waiting to be exported
///
/// Raw placemarks carry no distance or inclusion state. Those only exist on
/// [`AnnotatedPlacemark`], which is produced by [`crate::processing::reorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    /// Position in decimal degrees (x = longitude, y = latitude)
    pub location: Point<f64>,

    /// Source file identifier, usually the full path of the photo
    pub label: String,

    /// Originating scan folder, used as the KML folder name
    pub group: String,
}

impl Placemark {
    pub fn new(
        latitude: f64,
        longitude: f64,
        label: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            location: Point::new(longitude, latitude),
            label: label.into(),
            group: group.into(),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    /// File name part of the label (directory stripped)
    pub fn file_name(&self) -> String {
        Path::new(&self.label)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory part of the label, empty when the label has none
    pub fn directory(&self) -> String {
        Path::new(&self.label)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for Placemark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) in {}",
            self.label,
            self.latitude(),
            self.longitude(),
            self.group
        )
    }
}

/// Placemark after the sort and distance pass
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPlacemark {
    pub placemark: Placemark,

    /// Great-circle distance in meters to the previous placemark in sort order
    pub distance_from_previous: f64,

    /// Whether the placemark is written to the KML document
    pub include: bool,
}
