// Copyright 2025 h-matched Contributors
// SPDX-License-Identifier: Apache-2.0

//! Stable pastel colors keyed by benchmark name.

use serde::Serialize;
use std::fmt;

/// An HSL color with integer components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HslColor {
    /// Degrees, 0..360
    pub hue: u16,
    /// Percent, 55..85
    pub saturation: u8,
    /// Percent, 55..75
    pub lightness: u8,
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Rolling `hash * 31 + unit` over UTF-16 code units, wrapped to `i32`.
pub fn hash_name(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Deterministic pastel color for `name`.
pub fn pastel_color(name: &str) -> HslColor {
    let hash = hash_name(name);

    let hue = (hash % 360).unsigned_abs();
    let saturation = 55 + ((hash >> 8) % 30).unsigned_abs();
    let lightness = 55 + ((hash >> 16) % 20).unsigned_abs();

    // Short names hash close together; rotate by length to spread them out.
    let length = name.encode_utf16().count() as u64;
    let rotation = (length * 37 % 360) as u32;

    HslColor {
        hue: ((hue + rotation) % 360) as u16,
        saturation: saturation as u8,
        lightness: lightness as u8,
    }
}
