//! Decoder for the encoded polyline format used by the Google Maps APIs.
//!
//! Each coordinate is stored as a delta from the previous one, multiplied by
//! `1e5`, zig-zag encoded and split into 5-bit chunks offset by 63.

use geo_types::Point;
use thiserror::Error;

const PRECISION: f64 = 1e5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid character {character:?} at byte {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("value at byte {index} overflows")]
    Overflow { index: usize },
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated)?;
        if !(63..127).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: byte as char,
                index: *index,
            });
        }

        if shift > 60 {
            return Err(PolylineError::Overflow { index: *index });
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

/// Decodes into points with `x = longitude`, `y = latitude`.
pub fn decode(encoded: &str) -> Result<Vec<Point>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let start = index;
        lat = lat
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow { index: start })?;

        let start = index;
        lng = lng
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow { index: start })?;

        points.push(Point::new(lng as f64 / PRECISION, lat as f64 / PRECISION));
    }

    Ok(points)
}
