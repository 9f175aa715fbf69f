//! Windowgram groups: several windowgrams laid out side by side.
//!
//! A group pattern is plain text where windowgrams sit next to each other,
//! aligned on the column where each one starts:
//!
//! ```text
//!     1 22 33
//!     1 22
//!     1
//! ```
//!
//! The first line of a band fixes the starting columns. Blank lines end the
//! band; the next non-blank line starts a new one.

use crate::convert::string_to_lines;

/// Runs of non-blank characters with their starting column.
fn column_runs(line: &str) -> Vec<(usize, String)> {
    let mut runs: Vec<(usize, String)> = Vec::new();
    let mut current: Option<(usize, String)> = None;
    for (col, ch) in line.chars().enumerate() {
        if ch == ' ' || ch == '\t' {
            if let Some(run) = current.take() {
                runs.push(run);
            }
            continue;
        }
        current
            .get_or_insert_with(|| (col, String::new()))
            .1
            .push(ch);
    }
    runs.extend(current);
    runs
}

/// Split a group pattern into windowgram strings, left to right and band by
/// band.
///
/// Runs that do not start on one of the band's first-line columns are
/// dropped; windowgrams with no lines are omitted.
#[must_use]
pub fn pattern_to_list(pattern: &str) -> Vec<String> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut columns: Vec<usize> = Vec::new();
    for line in pattern.split('\n') {
        if line.trim().is_empty() {
            columns.clear();
            continue;
        }
        let runs = column_runs(line);
        if columns.is_empty() {
            columns = runs.iter().map(|(col, _)| *col).collect();
            groups.extend(columns.iter().map(|_| Vec::new()));
        }
        let band_start = groups.len() - columns.len();
        for (n, col) in columns.iter().enumerate() {
            if let Some((_, text)) = runs.iter().find(|(c, _)| c == col) {
                groups[band_start + n].push(text.clone());
            }
        }
    }
    groups
        .into_iter()
        .filter(|lines| !lines.is_empty())
        .map(|lines| {
            let mut text = lines.join("\n");
            text.push('\n');
            text
        })
        .collect()
}

/// Lay windowgrams out side by side.
///
/// Windowgrams are packed left to right into bands no wider than
/// `max_width` (a band always holds at least one). Each line starts with
/// `left_pad` spaces and windowgrams are separated by `mid_pad` spaces. Bands
/// are separated by an empty line and trailing spaces are removed.
#[must_use]
pub fn list_to_pattern<S: AsRef<str>>(
    list: &[S],
    max_width: usize,
    left_pad: usize,
    mid_pad: usize,
) -> String {
    let lines: Vec<Vec<String>> = list.iter().map(|wg| string_to_lines(wg.as_ref())).collect();
    let widths: Vec<usize> = lines
        .iter()
        .map(|l| l.iter().map(|line| line.chars().count()).max().unwrap_or(0))
        .collect();

    let mut pattern = String::new();
    let mut spent = 0;
    while spent < widths.len() {
        let start = spent;
        let mut band_width = left_pad + widths[spent];
        spent += 1;
        while spent < widths.len() {
            band_width += mid_pad + widths[spent];
            if band_width > max_width {
                break;
            }
            spent += 1;
        }
        if !pattern.is_empty() {
            pattern.push('\n');
        }
        let band = &lines[start..spent];
        let height = band.iter().map(Vec::len).max().unwrap_or(0);
        for iy in 0..height {
            let row: Vec<String> = band
                .iter()
                .zip(&widths[start..spent])
                .map(|(wg, width)| {
                    let line = wg.get(iy).map_or("", String::as_str);
                    format!("{line:<width$}")
                })
                .collect();
            pattern.push_str(&" ".repeat(left_pad));
            pattern.push_str(&row.join(&" ".repeat(mid_pad)));
            pattern.push('\n');
        }
    }
    pattern
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heights_may_differ() {
        let pattern = "
            1 2
              2
        ";
        assert_eq!(pattern_to_list(pattern), vec!["1\n", "2\n2\n"]);
    }

    #[test]
    fn transparency_is_carried_through() {
        let pattern = "
            1.. ...
            ... ..2
        ";
        assert_eq!(pattern_to_list(pattern), vec!["1..\n...\n", "...\n..2\n"]);
    }

    #[test]
    fn out_of_band_runs_are_dropped() {
        let pattern = "
            1 22 33 aa bb  XX Y ZZ
            1 22    aa bb     Y    0
            1          bb          0
                       bbb
        ";
        assert_eq!(
            pattern_to_list(pattern),
            vec![
                "1\n1\n1\n",
                "22\n22\n",
                "33\n",
                "aa\naa\n",
                "bb\nbb\nbb\nbbb\n",
                "XX\n",
                "Y\nY\n",
                "ZZ\n",
            ]
        );
    }

    #[test]
    fn misaligned_lines_are_clipped() {
        let pattern = "
            111  222  333
            111   222 333
            111
        ";
        assert_eq!(
            pattern_to_list(pattern),
            vec!["111\n111\n111\n", "222\n", "333\n333\n"]
        );
    }

    #[test]
    fn blank_lines_start_a_new_band() {
        let pattern = "
            1 2

            3
            3
        ";
        assert_eq!(pattern_to_list(pattern), vec!["1\n", "2\n", "3\n3\n"]);
    }

    #[test]
    fn list_to_pattern_pads_short_windowgrams() {
        let list = ["1\n", "2\n2\n"];
        assert_eq!(list_to_pattern(&list, 20, 4, 1), "    1 2\n      2\n");
    }

    #[test]
    fn list_to_pattern_wraps_bands() {
        let list = [
            "111\n".repeat(3),
            "2\n".repeat(2),
            "3333333333\n".repeat(5),
            "aaaaaaaaaaaaaaaaa\n".repeat(2),
            "bbbbbbbbbbbbbbbbb\n".repeat(1),
        ];
        let expected = [
            "  111    2    3333333333",
            "  111    2    3333333333",
            "  111         3333333333",
            "              3333333333",
            "              3333333333",
            "",
            "  aaaaaaaaaaaaaaaaa    bbbbbbbbbbbbbbbbb",
            "  aaaaaaaaaaaaaaaaa",
            "",
        ]
        .join("\n");
        assert_eq!(list_to_pattern(&list, 40, 2, 4), expected);
    }

    #[test]
    fn pattern_round_trip() {
        let list = vec!["11\n22\n".to_owned(), "3\n".to_owned(), "4.5\n".to_owned()];
        let pattern = list_to_pattern(&list, 80, 4, 2);
        assert_eq!(pattern_to_list(&pattern), list);
    }
}
