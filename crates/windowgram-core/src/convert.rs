//! Conversions between the windowgram representations.
//!
//! The canonical form is a purified string: one line per row, each terminated
//! by `\n`, with comments and surrounding whitespace removed. Lines, chars and
//! parsed panes are derived from it on demand.

use crate::alphabet::{MASK_ONE, MASK_TRANSPARENT, PANE_CHAR_COMMENT, is_valid_pane, pane_index};
use crate::error::ParseError;
use crate::geometry::Pane;

/// Grid of cells, row-major.
pub type Chars = Vec<Vec<char>>;

/// Strip a trailing `#` comment and surrounding whitespace.
#[must_use]
pub fn strip_line(line: &str) -> &str {
    let line = match line.find(PANE_CHAR_COMMENT) {
        Some(at) => &line[..at],
        None => line,
    };
    line.trim()
}

/// Split into stripped, non-blank lines.
#[must_use]
pub fn string_to_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(strip_line)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Join lines, terminating each with `\n`.
#[must_use]
pub fn lines_to_string<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Strip comments, whitespace and blank lines.
///
/// Purifying a purified string returns it unchanged.
#[must_use]
pub fn purify(raw: &str) -> String {
    lines_to_string(&string_to_lines(raw))
}

#[must_use]
pub fn string_to_chars(text: &str) -> Chars {
    string_to_lines(text)
        .iter()
        .map(|line| line.chars().collect())
        .collect()
}

#[must_use]
pub fn chars_to_string(chars: &[Vec<char>]) -> String {
    let lines: Vec<String> = chars
        .iter()
        .map(|row| row.iter().collect::<String>())
        .collect();
    purify(&lines_to_string(&lines))
}

/// Swap rows and columns.
#[must_use]
pub fn transpose_chars(chars: &[Vec<char>]) -> Chars {
    let width = chars.first().map_or(0, Vec::len);
    (0..width)
        .map(|x| chars.iter().filter_map(|row| row.get(x).copied()).collect())
        .collect()
}

/// Parse a windowgram into panes in first-occurrence order.
///
/// Each pane gets the 1-based bounding box of all its cells.
pub fn string_to_parsed(text: &str, extended: bool) -> Result<Vec<Pane>, ParseError> {
    let mut panes: Vec<Pane> = Vec::new();
    let mut slots: [Option<usize>; crate::alphabet::EXTENDED_LEN] =
        [None; crate::alphabet::EXTENDED_LEN];
    let mut width = 0usize;
    let mut y = 0usize;
    for line in string_to_lines(text) {
        y += 1;
        if line.chars().any(|ch| !is_valid_pane(ch, extended)) {
            return Err(ParseError::new(
                "Windowgram must contain valid identifiers: [0-9a-zA-Z]",
                y,
            ));
        }
        let len = line.chars().count();
        if y > 1 && len != width {
            return Err(ParseError::new(
                "Windowgram width does not match previous lines",
                y,
            ));
        }
        width = len;
        for (ix, ch) in line.chars().enumerate() {
            let x = ix + 1;
            let Some(slot) = pane_index(ch) else {
                continue;
            };
            match slots[slot] {
                None => {
                    slots[slot] = Some(panes.len());
                    panes.push(Pane::new(ch, x, y, 1, 1));
                }
                Some(at) => {
                    let pane = &mut panes[at];
                    let right = pane.right().max(x + 1);
                    let bottom = pane.bottom().max(y + 1);
                    pane.x = pane.x.min(x);
                    pane.y = pane.y.min(y);
                    pane.w = right - pane.x;
                    pane.h = bottom - pane.y;
                }
            }
        }
    }
    if panes.is_empty() {
        return Err(ParseError::new("Windowgram not specified", y));
    }
    Ok(panes)
}

/// Stamp every pane's bounding box, in order, onto a fresh grid.
///
/// Later panes overwrite earlier ones. Zero-area panes stamp nothing, and
/// cells no pane reaches are left transparent.
#[must_use]
pub fn parsed_to_string(panes: &[Pane]) -> String {
    let live = panes.iter().filter(|pane| !pane.is_empty());
    let width = live.clone().map(|p| p.right() - 1).max().unwrap_or(0);
    let height = live.clone().map(|p| p.bottom() - 1).max().unwrap_or(0);
    let mut grid = vec![vec![MASK_TRANSPARENT; width]; height];
    for pane in live {
        for row in &mut grid[pane.y - 1..pane.bottom() - 1] {
            for cell in &mut row[pane.x - 1..pane.right() - 1] {
                *cell = pane.id;
            }
        }
    }
    chars_to_string(&grid)
}

/// Flatten mosaic layers onto a base, bottom to top.
///
/// A layer contributes its data wherever its mask is `@`.
#[must_use]
pub fn mosaic_to_string(base: &str, layers: &[(String, String)]) -> String {
    let mut grid = string_to_chars(base);
    for (data, mask) in layers {
        let data = string_to_chars(data);
        let mask = string_to_chars(mask);
        for (iy, row) in grid.iter_mut().enumerate() {
            for (ix, cell) in row.iter_mut().enumerate() {
                let selected = mask.get(iy).and_then(|r| r.get(ix)) == Some(&MASK_ONE);
                if selected && let Some(ch) = data.get(iy).and_then(|r| r.get(ix)) {
                    *cell = *ch;
                }
            }
        }
    }
    chars_to_string(&grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn purify_strips_comments_whitespace_and_blank_lines() {
        let raw = "\n   # heading\n  1122  # top\n\n  3344\n   \n";
        assert_eq!(purify(raw), "1122\n3344\n");
        assert_eq!(purify(&purify(raw)), purify(raw));
    }

    #[test]
    fn purify_of_nothing_is_empty() {
        assert_eq!(purify(""), "");
        assert_eq!(purify("  # only a comment\n\n"), "");
    }

    #[test]
    fn chars_round_trip() {
        let text = "112\n342\n";
        assert_eq!(chars_to_string(&string_to_chars(text)), text);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let chars = string_to_chars("123\n456\n");
        let t = transpose_chars(&chars);
        assert_eq!(chars_to_string(&t), "14\n25\n36\n");
        assert_eq!(transpose_chars(&t), chars);
    }

    #[test]
    fn parse_builds_bounding_boxes_in_first_occurrence_order() {
        let panes = string_to_parsed("1122\n1133\n4444\n", false).expect("valid");
        let ids: String = panes.iter().map(|p| p.id).collect();
        assert_eq!(ids, "1234");
        assert_eq!(panes[0], Pane::new('1', 1, 1, 2, 2));
        assert_eq!(panes[1], Pane::new('2', 3, 1, 2, 1));
        assert_eq!(panes[2], Pane::new('3', 3, 2, 2, 1));
        assert_eq!(panes[3], Pane::new('4', 1, 3, 4, 1));
    }

    #[test]
    fn parse_reports_invalid_identifier_line() {
        let err = string_to_parsed("12\n1-\n", false).expect_err("invalid char");
        assert_eq!(
            err.message,
            "Windowgram must contain valid identifiers: [0-9a-zA-Z]"
        );
        assert_eq!(err.line, 2);
    }

    #[test]
    fn parse_reports_width_mismatch() {
        let err = string_to_parsed("12\n12\n123\n", false).expect_err("ragged");
        assert_eq!(err.message, "Windowgram width does not match previous lines");
        assert_eq!(err.line, 3);
    }

    #[test]
    fn parse_reports_empty_input() {
        let err = string_to_parsed("  # nothing\n", false).expect_err("empty");
        assert_eq!(err.message, "Windowgram not specified");
        assert_eq!(err.line, 0);
    }

    #[test]
    fn mask_symbols_need_extended_parse() {
        assert!(string_to_parsed("@:\n", false).is_err());
        let panes = string_to_parsed("@:\n", true).expect("extended");
        assert_eq!(panes.len(), 2);
    }

    #[test]
    fn parsed_round_trip_for_rectangular_panes() {
        let text = "1122\n1133\n4444\n";
        let panes = string_to_parsed(text, false).expect("valid");
        assert_eq!(parsed_to_string(&panes), text);
    }

    #[test]
    fn parsed_to_string_skips_empty_panes() {
        let panes = vec![Pane::new('1', 1, 1, 2, 1), Pane::new('2', 3, 1, 0, 1)];
        assert_eq!(parsed_to_string(&panes), "11\n");
        assert_eq!(parsed_to_string(&[]), "");
    }

    #[test]
    fn later_panes_overwrite_earlier_ones() {
        let panes = vec![Pane::new('1', 1, 1, 3, 3), Pane::new('2', 2, 2, 1, 1)];
        assert_eq!(parsed_to_string(&panes), "111\n121\n111\n");
    }

    #[test]
    fn mosaic_layers_apply_bottom_to_top() {
        let base = "1122\n3344\n";
        let layers = vec![
            ("xxxx\nxxxx\n".to_owned(), "@@::\n@@::\n".to_owned()),
            ("yyyy\nyyyy\n".to_owned(), "@:::\n::::\n".to_owned()),
        ];
        assert_eq!(mosaic_to_string(base, &layers), "yx22\nxx44\n");
    }
}
