use serde::{Deserialize, Serialize};

/// Document-level settings for a KML export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Map title, written as the document name
    pub name: String,

    /// Map description
    pub description: String,

    /// Minimum distance in meters a placemark must be from the previous
    /// sorted placemark to be exported. 0 exports everything.
    pub min_distance: f64,
}

impl MapSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            name: "Photos".to_string(),
            description: String::new(),
            min_distance: 0.0,
        }
    }
}
