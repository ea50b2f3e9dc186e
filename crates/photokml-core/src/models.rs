pub mod placemark;
pub mod settings;

pub use placemark::{AnnotatedPlacemark, Placemark};
pub use settings::MapSettings;
