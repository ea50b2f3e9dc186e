//! Sexagesimal (degree/minute/second) to decimal degree conversion


/// Unsigned rational as stored in EXIF GPS tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.denom)
    }
}

/// Degrees, minutes and seconds of a GPS coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl Dms {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }
}

/// Hemisphere reference from `GPSLatitudeRef` / `GPSLongitudeRef`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse the reference character written by cameras (`N`, `S`, `E`, `W`)
    pub fn from_ref(reference: char) -> Option<Self> {
        match reference {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Convert a DMS triple to signed decimal degrees
///
/// South latitudes and West longitudes are negative.
pub fn dms_to_decimal(dms: &Dms, hemisphere: Hemisphere) -> f64 {
    let degrees =
        dms.degrees.to_f64() + dms.minutes.to_f64() / 60.0 + dms.seconds.to_f64() / 3600.0;

    if hemisphere.is_negative() {
        -degrees
    } else {
        degrees
    }
}
