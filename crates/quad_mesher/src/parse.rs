//! Line-oriented voxel model parsing.
//!
//! Each record is `x y z color`, one per line. `color` is an opaque key,
//! conventionally a hex RGB triplet. Lines starting with `#` and lines with
//! no separator are ignored; anything else that fails to parse is reported
//! and skipped.

use log::warn;

use crate::config::CoordinateRounding;
use crate::error::{MeshError, RecordFault, Result};

/// One parsed voxel: integer cell coordinates plus a color key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
}

impl VoxelRecord {
    pub fn new(x: i32, y: i32, z: i32, color: impl Into<String>) -> Self {
        Self { x, y, z, color: color.into() }
    }

    #[inline]
    pub fn position(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Records that parsed plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<VoxelRecord>,
    /// One `MalformedRecord` per rejected line, in input order.
    pub skipped: Vec<MeshError>,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse one input line.
///
/// Returns `None` for lines that carry no record at all (comments, blank
/// lines, lines without a separator), `Some(Err(..))` for lines that look
/// like records but are malformed.
///
/// `line` is the 1-based line number used in error reports.
pub fn parse_record(
    line: usize,
    text: &str,
    rounding: CoordinateRounding,
) -> Option<Result<VoxelRecord>> {
    let text = text.trim();
    if text.starts_with('#') || !text.contains(char::is_whitespace) {
        return None;
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 4 {
        return Some(Err(MeshError::MalformedRecord {
            line,
            reason: RecordFault::TokenCount(tokens.len()),
        }));
    }

    let mut coords = [0i32; 3];
    for (slot, token) in coords.iter_mut().zip(&tokens[..3]) {
        match parse_coordinate(token, rounding) {
            Ok(value) => *slot = value,
            Err(reason) => return Some(Err(MeshError::MalformedRecord { line, reason })),
        }
    }

    Some(Ok(VoxelRecord::new(coords[0], coords[1], coords[2], tokens[3])))
}

fn parse_coordinate(token: &str, rounding: CoordinateRounding) -> std::result::Result<i32, RecordFault> {
    let value: f64 = token
        .parse()
        .map_err(|_| RecordFault::Coordinate(token.to_string()))?;
    if !value.is_finite() {
        return Err(RecordFault::NonFinite(token.to_string()));
    }
    rounding
        .apply(value)
        .ok_or_else(|| RecordFault::NonFinite(token.to_string()))
}

/// Parse a sequence of lines, skipping (and logging) malformed ones.
pub fn parse_lines<'a, I>(lines: I, rounding: CoordinateRounding) -> ParseReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = ParseReport::default();
    for (i, text) in lines.into_iter().enumerate() {
        match parse_record(i + 1, text, rounding) {
            None => {}
            Some(Ok(record)) => report.records.push(record),
            Some(Err(err)) => {
                warn!("skipping voxel record: {err}");
                report.skipped.push(err);
            }
        }
    }
    report
}

/// Parse a whole model file.
pub fn parse_text(text: &str, rounding: CoordinateRounding) -> ParseReport {
    parse_lines(text.lines(), rounding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<Result<VoxelRecord>> {
        parse_record(1, text, CoordinateRounding::Nearest)
    }

    #[test]
    fn parses_simple_record() {
        let record = parse("1 -2 3 ff0000").unwrap().unwrap();
        assert_eq!(record, VoxelRecord::new(1, -2, 3, "ff0000"));
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        assert!(parse("# Goxel 0.10.0").is_none());
        assert!(parse("   # indented comment").is_none());
        assert!(parse("").is_none());
        assert!(parse("ff0000").is_none());
    }

    #[test]
    fn tolerates_extra_whitespace_and_crlf() {
        let record = parse("  4\t5  6 00ff00\r").unwrap().unwrap();
        assert_eq!(record, VoxelRecord::new(4, 5, 6, "00ff00"));
    }

    #[test]
    fn wrong_token_count_is_malformed() {
        let err = parse("1 2 ff0000").unwrap().unwrap_err();
        assert_eq!(
            err,
            MeshError::MalformedRecord { line: 1, reason: RecordFault::TokenCount(3) }
        );

        let err = parse("1 2 3 ff0000 extra").unwrap().unwrap_err();
        assert!(matches!(
            err,
            MeshError::MalformedRecord { reason: RecordFault::TokenCount(5), .. }
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        let err = parse("1 two 3 ff0000").unwrap().unwrap_err();
        assert_eq!(
            err,
            MeshError::MalformedRecord {
                line: 1,
                reason: RecordFault::Coordinate("two".into()),
            }
        );
    }

    #[test]
    fn non_finite_coordinate_is_malformed() {
        for text in ["NaN 0 0 fff", "0 inf 0 fff", "0 0 1e40 fff"] {
            let err = parse(text).unwrap().unwrap_err();
            assert!(
                matches!(err, MeshError::MalformedRecord { reason: RecordFault::NonFinite(_), .. }),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn fractional_coordinates_follow_rounding_policy() {
        let nearest = parse_record(1, "0.6 -0.6 2.5 abc", CoordinateRounding::Nearest)
            .unwrap()
            .unwrap();
        assert_eq!(nearest.position(), [1, -1, 3]);

        let floor = parse_record(1, "0.6 -0.6 2.5 abc", CoordinateRounding::Floor)
            .unwrap()
            .unwrap();
        assert_eq!(floor.position(), [0, -1, 2]);
    }

    #[test]
    fn report_skips_bad_lines_and_keeps_going() {
        let text = "# header\n0 0 0 ff0000\nbroken line here\n1 0 0 00ff00\n";
        let report = parse_text(text, CoordinateRounding::Nearest);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            report.skipped[0],
            MeshError::MalformedRecord { line: 3, .. }
        ));
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let report = parse_text("", CoordinateRounding::Nearest);
        assert!(report.is_empty());
        assert!(report.skipped.is_empty());
    }
}
