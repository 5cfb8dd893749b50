//! Insertion-ordered color palette.
//!
//! Color keys are opaque strings compared by equality. Id 0 is reserved for
//! "empty" and never names a real color; real colors get ids from 1 upward in
//! first-seen order.

use std::collections::HashMap;

use crate::error::{MeshError, Result};

/// Palette index of a real color. Always >= 1.
pub type ColorId = u32;

/// Reserved palette slot for "no voxel".
pub const EMPTY_SLOT: ColorId = 0;

/// Ordered, de-duplicated set of color keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    /// `colors[id - 1]` is the key for `id`.
    colors: Vec<String>,
    lookup: HashMap<String, ColorId>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `key`, appending it if it has not been seen.
    ///
    /// # Examples
    /// ```
    /// # use quad_mesher::Palette;
    /// let mut palette = Palette::new();
    /// assert_eq!(palette.intern("ff0000").unwrap(), 1);
    /// assert_eq!(palette.intern("00ff00").unwrap(), 2);
    /// assert_eq!(palette.intern("ff0000").unwrap(), 1);
    /// ```
    pub fn intern(&mut self, key: &str) -> Result<ColorId> {
        if let Some(&id) = self.lookup.get(key) {
            return Ok(id);
        }
        let id = ColorId::try_from(self.colors.len() + 1)
            .map_err(|_| MeshError::PaletteOverflow { max: ColorId::MAX as u64 })?;
        self.colors.push(key.to_string());
        self.lookup.insert(key.to_string(), id);
        Ok(id)
    }

    /// Color key for `id`. `None` for the empty slot or unknown ids.
    pub fn get(&self, id: ColorId) -> Option<&str> {
        if id == EMPTY_SLOT {
            return None;
        }
        self.colors.get(id as usize - 1).map(String::as_str)
    }

    /// Id previously assigned to `key`.
    pub fn id_of(&self, key: &str) -> Option<ColorId> {
        self.lookup.get(key).copied()
    }

    /// Number of real colors (the empty slot is not counted).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `(id, key)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorId, &str)> {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, key)| (i as ColorId + 1, key.as_str()))
    }
}

/// Resolve a hex color key to RGB components in `[0, 1]`.
///
/// Accepts six hex digits with an optional `#` or `0x` prefix. The mesher
/// never calls this itself; it is for renderer-facing front ends.
pub fn parse_hex_rgb(key: &str) -> Option<[f32; 3]> {
    let digits = key
        .strip_prefix('#')
        .or_else(|| key.strip_prefix("0x"))
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some([
        ((value >> 16) & 0xFF) as f32 / 255.0,
        ((value >> 8) & 0xFF) as f32 / 255.0,
        (value & 0xFF) as f32 / 255.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_is_never_a_color() {
        let mut palette = Palette::new();
        palette.intern("000000").unwrap();
        assert_eq!(palette.get(EMPTY_SLOT), None);
        assert_eq!(palette.get(1), Some("000000"));
        assert_eq!(palette.get(2), None);
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut palette = Palette::new();
        for key in ["c", "a", "c", "b", "a"] {
            palette.intern(key).unwrap();
        }
        let keys: Vec<_> = palette.iter().collect();
        assert_eq!(keys, vec![(1, "c"), (2, "a"), (3, "b")]);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.id_of("b"), Some(3));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut palette = Palette::new();
        let lower = palette.intern("ff00aa").unwrap();
        let upper = palette.intern("FF00AA").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_rgb("ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(parse_hex_rgb("#00ff00"), Some([0.0, 1.0, 0.0]));
        assert_eq!(parse_hex_rgb("0x0000FF"), Some([0.0, 0.0, 1.0]));
        assert_eq!(parse_hex_rgb("fff"), None);
        assert_eq!(parse_hex_rgb("gg0000"), None);
        assert_eq!(parse_hex_rgb("+f0000"), None);
    }
}
