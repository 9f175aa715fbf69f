#![forbid(unsafe_code)]

//! The pane identifier alphabet and the extended mask symbols.
//!
//! Pane identifiers are single characters drawn from an ordered 62-symbol
//! alphabet. The ordering matters: every "next free pane" decision, every
//! sorted pane list, and every lost-pane report follows it.

/// Ordered pane identifier alphabet.
pub const PANE_CHARACTERS: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of distinct pane identifiers.
pub const MAXIMUM_PANES: usize = 62;

/// Transparent mask symbol (nothing is copied through it).
pub const MASK_TRANSPARENT: char = '.';

/// Mask symbol selecting a cell.
pub const MASK_ONE: char = '@';

/// Mask symbol rejecting a cell.
pub const MASK_ZERO: char = ':';

/// Mask symbols, in extended-alphabet order after the 62 pane identifiers.
pub const MASK_CHARACTERS: &str = ".@:";

/// Wildcard meaning "every pane in use" in flex arguments.
pub const PANE_CHAR_ALL: char = '*';

/// Starts a comment that runs to the end of the line.
pub const PANE_CHAR_COMMENT: char = '#';

/// Size of the extended alphabet (pane identifiers plus mask symbols).
pub const EXTENDED_LEN: usize = MAXIMUM_PANES + 3;

/// Ordinal of `ch` in the extended alphabet, or `None` if it is not a symbol.
///
/// Pane identifiers map to `0..62`, mask symbols to `62..65`.
#[must_use]
pub const fn pane_index(ch: char) -> Option<usize> {
    match ch {
        '0'..='9' => Some(ch as usize - '0' as usize),
        'a'..='z' => Some(10 + ch as usize - 'a' as usize),
        'A'..='Z' => Some(36 + ch as usize - 'A' as usize),
        '.' => Some(62),
        '@' => Some(63),
        ':' => Some(64),
        _ => None,
    }
}

/// Inverse of [`pane_index`].
#[must_use]
pub const fn pane_at(index: usize) -> Option<char> {
    let ch = match index {
        0..=9 => b'0' + index as u8,
        10..=35 => b'a' + (index - 10) as u8,
        36..=61 => b'A' + (index - 36) as u8,
        62 => b'.',
        63 => b'@',
        64 => b':',
        _ => return None,
    };
    Some(ch as char)
}

/// Whether `ch` is usable as a pane, optionally admitting mask symbols.
#[must_use]
pub const fn is_valid_pane(ch: char, extended: bool) -> bool {
    match pane_index(ch) {
        Some(ix) => ix < MAXIMUM_PANES || extended,
        None => false,
    }
}

/// All valid symbols in alphabet order.
pub fn valid_panes(extended: bool) -> impl Iterator<Item = char> {
    let len = if extended { EXTENDED_LEN } else { MAXIMUM_PANES };
    (0..len).filter_map(pane_at)
}

/// Whether every character of `text` is a valid pane, after removing the
/// characters listed in `also_allowed`.
#[must_use]
pub fn all_valid(text: &str, also_allowed: &str, extended: bool) -> bool {
    text.chars()
        .filter(|ch| !also_allowed.contains(*ch))
        .all(|ch| is_valid_pane(ch, extended))
}

/// Characters of `text` that are not valid panes, deduplicated in order of
/// first appearance.
#[must_use]
pub fn invalid_chars(text: &str, extended: bool) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        if !is_valid_pane(ch, extended) && !out.contains(ch) {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_whole_extended_alphabet() {
        for ix in 0..EXTENDED_LEN {
            let ch = pane_at(ix).expect("in range");
            assert_eq!(pane_index(ch), Some(ix));
        }
        assert_eq!(pane_at(EXTENDED_LEN), None);
    }

    #[test]
    fn alphabet_constant_matches_ordinals() {
        let collected: String = valid_panes(false).collect();
        assert_eq!(collected, PANE_CHARACTERS);
        assert_eq!(PANE_CHARACTERS.len(), MAXIMUM_PANES);
        let extended: String = valid_panes(true).collect();
        assert_eq!(extended, format!("{PANE_CHARACTERS}{MASK_CHARACTERS}"));
    }

    #[test]
    fn mask_symbols_need_extended_mode() {
        assert!(!is_valid_pane('@', false));
        assert!(is_valid_pane('@', true));
        assert!(!is_valid_pane('*', true));
        assert!(!is_valid_pane('#', true));
        assert!(!is_valid_pane(' ', true));
    }

    #[test]
    fn invalid_chars_are_deduplicated() {
        assert_eq!(invalid_chars("1-2-3!", false), "-!");
        assert!(all_valid("12*", "*", false));
        assert!(!all_valid("12*", "", false));
    }
}
