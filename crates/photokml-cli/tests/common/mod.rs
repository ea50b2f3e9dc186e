//! Shared helpers for building minimal geotagged JPEG files

#![allow(dead_code)]

use std::fs;
use std::path::Path;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_GPS_IFD: u16 = 0x8825;
const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
const TAG_GPS_LATITUDE: u16 = 0x0002;
const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
const TAG_GPS_LONGITUDE: u16 = 0x0004;

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

/// GPS block for a synthesized JPEG
#[derive(Debug, Clone, Copy)]
pub struct GpsTag {
    pub latitude: [(u32, u32); 3],
    pub latitude_ref: u8,
    pub longitude: [(u32, u32); 3],
    pub longitude_ref: u8,
}

impl GpsTag {
    /// Build a tag from signed decimal degrees, stored as d/1 m/1 s*1000/1000
    pub fn from_decimal(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: to_dms(latitude.abs()),
            latitude_ref: if latitude < 0.0 { b'S' } else { b'N' },
            longitude: to_dms(longitude.abs()),
            longitude_ref: if longitude < 0.0 { b'W' } else { b'E' },
        }
    }
}

fn to_dms(value: f64) -> [(u32, u32); 3] {
    let degrees = value.trunc();
    let minutes = ((value - degrees) * 60.0).trunc();
    let seconds = ((value - degrees) * 60.0 - minutes) * 60.0;
    [
        (degrees as u32, 1),
        (minutes as u32, 1),
        ((seconds * 1000.0).round() as u32, 1000),
    ]
}

struct Entry {
    tag: u16,
    kind: u16,
    count: u32,
    value: [u8; 4],
}

fn write_ifd(out: &mut Vec<u8>, entries: &[Entry]) {
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.kind.to_le_bytes());
        out.extend_from_slice(&entry.count.to_le_bytes());
        out.extend_from_slice(&entry.value);
    }
    // No next IFD
    out.extend_from_slice(&0u32.to_le_bytes());
}

fn ascii_ref(c: u8) -> [u8; 4] {
    [c, 0, 0, 0]
}

/// Little-endian TIFF block with an optional GPS IFD
fn tiff(gps: Option<GpsTag>) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    let Some(gps) = gps else {
        write_ifd(
            &mut out,
            &[Entry {
                tag: TAG_ORIENTATION,
                kind: TYPE_SHORT,
                count: 1,
                value: [1, 0, 0, 0],
            }],
        );
        return out;
    };

    // IFD0 at 8 holds one entry: 8 + 2 + 12 + 4 = 26
    let gps_ifd_offset: u32 = 26;
    write_ifd(
        &mut out,
        &[Entry {
            tag: TAG_GPS_IFD,
            kind: TYPE_LONG,
            count: 1,
            value: gps_ifd_offset.to_le_bytes(),
        }],
    );

    // GPS IFD holds four entries: 26 + 2 + 48 + 4 = 80
    let latitude_offset: u32 = 80;
    let longitude_offset: u32 = latitude_offset + 24;
    write_ifd(
        &mut out,
        &[
            Entry {
                tag: TAG_GPS_LATITUDE_REF,
                kind: TYPE_ASCII,
                count: 2,
                value: ascii_ref(gps.latitude_ref),
            },
            Entry {
                tag: TAG_GPS_LATITUDE,
                kind: TYPE_RATIONAL,
                count: 3,
                value: latitude_offset.to_le_bytes(),
            },
            Entry {
                tag: TAG_GPS_LONGITUDE_REF,
                kind: TYPE_ASCII,
                count: 2,
                value: ascii_ref(gps.longitude_ref),
            },
            Entry {
                tag: TAG_GPS_LONGITUDE,
                kind: TYPE_RATIONAL,
                count: 3,
                value: longitude_offset.to_le_bytes(),
            },
        ],
    );

    assert_eq!(out.len(), latitude_offset as usize);
    for (num, denom) in gps.latitude.iter().chain(gps.longitude.iter()) {
        out.extend_from_slice(&num.to_le_bytes());
        out.extend_from_slice(&denom.to_le_bytes());
    }
    out
}

/// Minimal JPEG: SOI, APP1 with EXIF, EOI
pub fn jpeg_bytes(gps: Option<GpsTag>) -> Vec<u8> {
    let tiff = tiff(gps);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Write a JPEG tagged with the given decimal position
pub fn write_geotagged(path: &Path, latitude: f64, longitude: f64) {
    write_jpeg(path, Some(GpsTag::from_decimal(latitude, longitude)));
}

/// Write a JPEG with EXIF data but no GPS block
pub fn write_untagged(path: &Path) {
    write_jpeg(path, None);
}

pub fn write_jpeg(path: &Path, gps: Option<GpsTag>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, jpeg_bytes(gps)).unwrap();
}
