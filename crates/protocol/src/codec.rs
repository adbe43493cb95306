//! Encoding and decoding of protocol lines.

use std::str::FromStr;

use handcursor_gesture::{GestureEvent, GestureKind, PinchSample};
use handcursor_landmarks::indices::{INDEX_FINGER_TIP, THUMB_TIP};
use handcursor_landmarks::LandmarkPoint;

use crate::{ProtocolError, Result};

/// Number of fields on every line.
pub const FIELD_COUNT: usize = 10;

/// Serialize an event as one protocol line, without the trailing newline.
pub fn encode(event: &GestureEvent) -> String {
    let s = &event.sample;
    format!(
        "{} {} {} {:.2} {} {} {:.4} {} {} {:.4}",
        event.kind.code(),
        s.cx,
        s.cy,
        s.distance,
        s.thumb.x,
        s.thumb.y,
        s.thumb.z,
        s.index.x,
        s.index.y,
        s.index.z,
    )
}

/// An event as read back from the wire.
///
/// The hand identity is not part of the protocol. `length` and the depths are
/// only as precise as their printed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireEvent {
    pub kind: GestureKind,
    pub sample: PinchSample,
}

impl WireEvent {
    pub fn midpoint(&self) -> (i32, i32) {
        self.sample.midpoint()
    }

    pub fn length(&self) -> f64 {
        self.sample.distance
    }
}

/// Parse one protocol line.
pub fn decode_line(line: &str) -> Result<WireEvent> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(ProtocolError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let code: u8 = parse_field(fields[0], "code")?;
    let kind = GestureKind::from_code(code).ok_or(ProtocolError::UnknownCode(code))?;

    let thumb = LandmarkPoint::new(
        THUMB_TIP,
        parse_field(fields[4], "x1")?,
        parse_field(fields[5], "y1")?,
        parse_field(fields[6], "z1")?,
    );
    let index = LandmarkPoint::new(
        INDEX_FINGER_TIP,
        parse_field(fields[7], "x2")?,
        parse_field(fields[8], "y2")?,
        parse_field(fields[9], "z2")?,
    );

    Ok(WireEvent {
        kind,
        sample: PinchSample {
            distance: parse_field(fields[3], "length")?,
            cx: parse_field(fields[1], "cx")?,
            cy: parse_field(fields[2], "cy")?,
            thumb,
            index,
        },
    })
}

fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T> {
    value.parse().map_err(|_| ProtocolError::InvalidField {
        field,
        value: value.to_string(),
    })
}
