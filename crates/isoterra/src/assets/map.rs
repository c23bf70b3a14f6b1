//! Map text parsing.
//!
//! A map is a whitespace-delimited grid where each cell is two integers,
//! `height type`:
//!
//! ```text
//! # three by three, raised center
//! 0 0  0 0  0 0
//! 0 0  3 0  0 0
//! 0 0  0 0  0 0
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A malformed cell is
//! logged and left empty so the rest of the row keeps its columns.

use crate::components::shape::SlopeShape;
use crate::components::tilemap::CellSpec;

/// Parse map text into rows of cells.
pub fn parse_rows(text: &str) -> Vec<Vec<CellSpec>> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push(parse_line(trimmed, line_no + 1));
    }
    rows
}

fn parse_line(line: &str, line_no: usize) -> Vec<CellSpec> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut cells = Vec::with_capacity(tokens.len() / 2 + 1);

    for (col, pair) in tokens.chunks(2).enumerate() {
        let cell = match pair {
            [height, kind] => parse_cell(height, kind, line_no, col),
            [dangling] => {
                log::warn!("map line {line_no}, cell {col}: '{dangling}' has no tile type, skipped");
                None
            }
            _ => None,
        };
        cells.push(cell);
    }
    cells
}

fn parse_cell(height: &str, kind: &str, line_no: usize, col: usize) -> CellSpec {
    let level = match height.parse::<i64>() {
        Ok(level) if level >= 0 => level,
        Ok(level) => {
            log::warn!("map line {line_no}, cell {col}: negative height {level}, skipped");
            return None;
        }
        Err(_) => {
            log::warn!("map line {line_no}, cell {col}: bad height '{height}', skipped");
            return None;
        }
    };
    let Ok(level) = u32::try_from(level) else {
        log::warn!("map line {line_no}, cell {col}: height {level} out of range, skipped");
        return None;
    };

    let shape = kind
        .parse::<u8>()
        .ok()
        .and_then(SlopeShape::from_code);
    match shape {
        Some(shape) => Some((shape, level)),
        None => {
            log::warn!("map line {line_no}, cell {col}: unknown tile type '{kind}', skipped");
            None
        }
    }
}
