//! EXIF GPS reader for JPEG and DNG files
//!
//! Uses kamadak-exif to parse the metadata container and decodes the
//! `GPSLatitude`/`GPSLongitude` rationals together with their hemisphere
//! references.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag, Value};
use tracing::debug;

use crate::error::{PhotoKmlError, Result};
use crate::formats::{GpsPosition, GpsReader};
use crate::geo::{dms_to_decimal, Dms, Hemisphere, Rational};

/// EXIF-based GPS reader
pub struct ExifGpsReader;

impl GpsReader for ExifGpsReader {
    fn read_gps(&self, path: &Path) -> Result<GpsPosition> {
        let file = File::open(path).map_err(|e| PhotoKmlError::FileUnreadable {
            path: path.to_path_buf(),
            reason: format!("Failed to open file: {}", e),
        })?;
        let mut reader = BufReader::new(file);

        let exif = match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            // A well-formed image without any EXIF block simply has no position
            Err(exif::Error::NotFound(_)) => {
                return Err(PhotoKmlError::GpsMissing {
                    path: path.to_path_buf(),
                    tag: "EXIF data".to_string(),
                })
            }
            Err(e) => {
                return Err(PhotoKmlError::FileUnreadable {
                    path: path.to_path_buf(),
                    reason: format!("Failed to parse EXIF: {}", e),
                })
            }
        };

        let latitude = read_coordinate(&exif, path, Axis::Latitude)?;
        let longitude = read_coordinate(&exif, path, Axis::Longitude)?;
        debug!("{}: lat {}, lon {}", path.display(), latitude, longitude);

        Ok(GpsPosition {
            latitude,
            longitude,
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["jpg", "jpeg", "dng"]
    }

    fn format_name(&self) -> &str {
        "EXIF"
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn value_tag(self) -> Tag {
        match self {
            Axis::Latitude => Tag::GPSLatitude,
            Axis::Longitude => Tag::GPSLongitude,
        }
    }

    fn ref_tag(self) -> Tag {
        match self {
            Axis::Latitude => Tag::GPSLatitudeRef,
            Axis::Longitude => Tag::GPSLongitudeRef,
        }
    }

    fn accepts(self, hemisphere: Hemisphere) -> bool {
        match self {
            Axis::Latitude => matches!(hemisphere, Hemisphere::North | Hemisphere::South),
            Axis::Longitude => matches!(hemisphere, Hemisphere::East | Hemisphere::West),
        }
    }
}

fn read_coordinate(exif: &exif::Exif, path: &Path, axis: Axis) -> Result<f64> {
    let missing = |tag: Tag| PhotoKmlError::GpsMissing {
        path: path.to_path_buf(),
        tag: tag.to_string(),
    };
    let invalid = |reason: String| PhotoKmlError::InvalidGps {
        path: path.to_path_buf(),
        reason,
    };

    let value_field = exif
        .get_field(axis.value_tag(), In::PRIMARY)
        .ok_or_else(|| missing(axis.value_tag()))?;
    let ref_field = exif
        .get_field(axis.ref_tag(), In::PRIMARY)
        .ok_or_else(|| missing(axis.ref_tag()))?;

    let dms = parse_dms(&value_field.value)
        .map_err(|reason| invalid(format!("{}: {}", axis.value_tag(), reason)))?;

    let hemisphere = parse_hemisphere(&ref_field.value)
        .filter(|h| axis.accepts(*h))
        .ok_or_else(|| {
            invalid(format!(
                "{}: unexpected reference {}",
                axis.ref_tag(),
                ref_field.display_value()
            ))
        })?;

    Ok(dms_to_decimal(&dms, hemisphere))
}

/// Decode a degree/minute/second rational triple
fn parse_dms(value: &Value) -> std::result::Result<Dms, String> {
    match value {
        Value::Rational(rationals) if rationals.len() >= 3 => {
            if rationals[..3].iter().any(|r| r.denom == 0) {
                return Err("zero denominator".to_string());
            }
            let convert = |r: &exif::Rational| Rational::new(r.num, r.denom);
            Ok(Dms::new(
                convert(&rationals[0]),
                convert(&rationals[1]),
                convert(&rationals[2]),
            ))
        }
        Value::Rational(rationals) => {
            Err(format!("expected 3 rationals, found {}", rationals.len()))
        }
        _ => Err("expected rational values".to_string()),
    }
}

/// First character of an ASCII reference tag (`N`, `S`, `E`, `W`)
fn parse_hemisphere(value: &Value) -> Option<Hemisphere> {
    match value {
        Value::Ascii(strings) => strings
            .first()
            .and_then(|s| s.first())
            .and_then(|b| Hemisphere::from_ref(*b as char)),
        _ => None,
    }
}
