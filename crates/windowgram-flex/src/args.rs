//! Argument vocabulary shared by the flex commands.
//!
//! Sizes are bare character counts (`3`), percentages (`25%`) or multipliers
//! (`.5x`), resolved against the length of the axis they apply to. Directions
//! accept a generous set of synonyms; axes accept `v`/`vert`/`vertical` and
//! `h`/`horz`/`horizontal`.

use windowgram_core::{Axis, PANE_CHARACTERS};

use crate::notice::ValidationError;

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// A parsed size argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// `Nx` (or `N*`): a multiple of the axis length.
    Multiplier(f64),
    /// `N%`: a percentage of the axis length.
    Percentage(f64),
    /// `N`: an exact number of characters.
    Characters(i64),
}

fn parse_fraction(digits: &str) -> Option<f64> {
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    digits.parse::<f64>().ok()
}

impl Size {
    /// Parse one size argument; a leading `-` is not part of the grammar.
    #[must_use]
    pub fn parse(arg: &str) -> Option<Self> {
        if let Some(head) = arg
            .strip_suffix('x')
            .or_else(|| arg.strip_suffix('X'))
            .or_else(|| arg.strip_suffix('*'))
        {
            return parse_fraction(head).map(Self::Multiplier);
        }
        if let Some(head) = arg.strip_suffix('%') {
            return parse_fraction(head).map(Self::Percentage);
        }
        arg.parse::<i64>().ok().map(Self::Characters)
    }

    /// Whether the size covers the whole axis (`>= 1x`, `>= 100%`, `>= base`).
    #[must_use]
    pub fn reaches(self, base: usize) -> bool {
        match self {
            Self::Multiplier(m) => m >= 1.0,
            Self::Percentage(p) => p >= 100.0,
            Self::Characters(n) => n >= base as i64,
        }
    }

    /// Truncated character count against an axis of `base` characters.
    #[must_use]
    pub fn to_characters(self, base: usize) -> i64 {
        match self {
            Self::Multiplier(m) => (base as f64 * m) as i64,
            Self::Percentage(p) => (base as f64 * (p / 100.0)) as i64,
            Self::Characters(n) => n,
        }
    }

    fn full_range(self, base: usize) -> String {
        match self {
            Self::Multiplier(_) => "1x".to_owned(),
            Self::Percentage(_) => "100%".to_owned(),
            Self::Characters(_) => base.to_string(),
        }
    }
}

/// Resolve a size argument to a positive character count.
///
/// Leading `-` signs are ignored here; callers read them as the inverse flag.
/// With `restrict`, sizes that reach the full axis length are rejected.
/// `show_inverse` prefixes a `-` to the sizes quoted in error messages.
pub fn resolve_size(
    size: &str,
    axis_length: usize,
    show_inverse: bool,
    restrict: bool,
) -> Result<usize, ValidationError> {
    let sign = if show_inverse { "-" } else { "" };
    let bare = size.trim_start_matches('-');
    let Some(parsed) = Size::parse(bare) else {
        return ValidationError::fail(format!("Invalid size parameter: {size}"));
    };
    if restrict && parsed.reaches(axis_length) {
        return ValidationError::fail(format!(
            "Specified size ({size}) is greater or equal to the maximum range ({sign}{}) of this function",
            parsed.full_range(axis_length)
        ));
    }
    let chars = parsed.to_characters(axis_length);
    if restrict && chars >= axis_length as i64 {
        return ValidationError::fail(format!(
            "Resulting size ({sign}{chars} characters) is greater or equal to the axis length ({axis_length})"
        ));
    }
    if chars < 1 {
        return ValidationError::fail(format!(
            "Resulting size ({sign}{chars} characters) is not valid"
        ));
    }
    Ok(chars as usize)
}

// ---------------------------------------------------------------------------
// Directions and axes
// ---------------------------------------------------------------------------

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Right,
    Left,
}

const TOP_WORDS: &[&str] = &["top", "t", "tp", "north", "n", "up", "u", "over", "above"];
const BOTTOM_WORDS: &[&str] = &[
    "bottom", "b", "bt", "south", "s", "down", "d", "under", "below",
];
const RIGHT_WORDS: &[&str] = &["right", "r", "rt", "east", "e"];
const LEFT_WORDS: &[&str] = &["left", "l", "lt", "west", "w"];

impl Direction {
    /// Case-insensitive lookup of a direction word.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.trim().to_ascii_lowercase();
        let word = word.as_str();
        if TOP_WORDS.contains(&word) {
            Some(Self::Top)
        } else if BOTTOM_WORDS.contains(&word) {
            Some(Self::Bottom)
        } else if RIGHT_WORDS.contains(&word) {
            Some(Self::Right)
        } else if LEFT_WORDS.contains(&word) {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// The axis this side lies across, and whether it is the far side.
    ///
    /// Top and left are near sides, bottom and right far sides; `inverse`
    /// flips the flag.
    #[must_use]
    pub const fn axis_with_flag(self, inverse: bool) -> (Axis, bool) {
        match self {
            Self::Top => (Axis::Vertical, inverse),
            Self::Bottom => (Axis::Vertical, !inverse),
            Self::Right => (Axis::Horizontal, !inverse),
            Self::Left => (Axis::Horizontal, inverse),
        }
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Top => 't',
            Self::Bottom => 'b',
            Self::Right => 'r',
            Self::Left => 'l',
        }
    }
}

/// `v`, `vert` or `vertical`; `h`, `horz` or `horizontal`.
#[must_use]
pub fn parse_axis(word: &str) -> Option<Axis> {
    match word {
        "v" | "vertical" | "vert" => Some(Axis::Vertical),
        "h" | "horizontal" | "horz" => Some(Axis::Horizontal),
        _ => None,
    }
}

/// An axis or a side: the hint and direction arguments of `drag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    Axis(Axis),
    Side(Direction),
}

impl Hint {
    /// Reduce to one of `v h t b l r`.
    #[must_use]
    pub fn resolve(word: &str) -> Option<Self> {
        parse_axis(word)
            .map(Self::Axis)
            .or_else(|| Direction::parse(word).map(Self::Side))
    }

    /// `v`, `t` and `b` belong to the vertical family; `h`, `l`, `r` to the
    /// horizontal one.
    #[must_use]
    pub const fn family(self) -> Axis {
        match self {
            Self::Axis(axis) => axis,
            Self::Side(Direction::Top | Direction::Bottom) => Axis::Vertical,
            Self::Side(Direction::Left | Direction::Right) => Axis::Horizontal,
        }
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Axis(axis) => axis.code(),
            Self::Side(direction) => direction.code(),
        }
    }
}

/// `1`, `true`, `yes`, or the optional extra word, ignoring case.
#[must_use]
pub fn is_true(word: &str, alt: Option<&str>) -> bool {
    let word = word.to_ascii_lowercase();
    matches!(word.as_str(), "1" | "true" | "yes")
        || alt.is_some_and(|alt| alt.eq_ignore_ascii_case(&word))
}

// ---------------------------------------------------------------------------
// Pane arguments
// ---------------------------------------------------------------------------

/// `panes` unchanged if every character is a pane id or in `also_allowed`.
#[must_use]
pub fn thru_valid_panes<'a>(panes: &'a str, also_allowed: &str) -> Option<&'a str> {
    panes
        .chars()
        .all(|ch| PANE_CHARACTERS.contains(ch) || also_allowed.contains(ch))
        .then_some(panes)
}

/// The argument as a single pane id.
#[must_use]
pub fn single_pane(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if PANE_CHARACTERS.contains(ch) => Some(ch),
        _ => None,
    }
}

/// Error text for new pane ids that are already taken, if any are.
#[must_use]
pub fn panes_in_use_message(panes_in_use: &str) -> Option<String> {
    let count = panes_in_use.chars().count();
    if count == 0 {
        return None;
    }
    let (noun, verb) = if count > 1 {
        ("panes", "are")
    } else {
        ("pane", "is")
    };
    Some(format!(
        "Specified {noun} ({panes_in_use}) {verb} already in use"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn size_grammar() {
        assert_eq!(Size::parse("3"), Some(Size::Characters(3)));
        assert_eq!(Size::parse("25%"), Some(Size::Percentage(25.0)));
        assert_eq!(Size::parse(".5x"), Some(Size::Multiplier(0.5)));
        assert_eq!(Size::parse("2X"), Some(Size::Multiplier(2.0)));
        assert_eq!(Size::parse("2*"), Some(Size::Multiplier(2.0)));
        assert_eq!(Size::parse("x"), None);
        assert_eq!(Size::parse("%"), None);
        assert_eq!(Size::parse("abc"), None);
        assert_eq!(Size::parse("1.2.3x"), None);
    }

    #[test]
    fn size_conversion_truncates() {
        assert_eq!(Size::Percentage(50.0).to_characters(25), 12);
        assert_eq!(Size::Multiplier(0.5).to_characters(7), 3);
        assert_eq!(Size::Multiplier(2.0).to_characters(7), 14);
        assert_eq!(Size::Characters(4).to_characters(7), 4);
    }

    #[test]
    fn resolve_size_restricted() {
        assert_eq!(resolve_size("50%", 10, false, true), Ok(5));
        assert_eq!(resolve_size("-3", 10, true, true), Ok(3));
        assert_eq!(
            resolve_size("10", 10, false, true),
            Err(ValidationError::new(
                "Specified size (10) is greater or equal to the maximum range (10) of this function"
            ))
        );
        assert_eq!(
            resolve_size("-100%", 10, true, true),
            Err(ValidationError::new(
                "Specified size (-100%) is greater or equal to the maximum range (-100%) of this function"
            ))
        );
        assert_eq!(
            resolve_size("5%", 10, false, true),
            Err(ValidationError::new(
                "Resulting size (0 characters) is not valid"
            ))
        );
        assert_eq!(
            resolve_size("big", 10, false, true),
            Err(ValidationError::new("Invalid size parameter: big"))
        );
    }

    #[test]
    fn resolve_size_unrestricted_allows_growth() {
        assert_eq!(resolve_size("12", 3, false, false), Ok(12));
        assert_eq!(resolve_size("2x", 3, false, false), Ok(6));
    }

    #[test]
    fn direction_vocabulary() {
        assert_eq!(Direction::parse("North"), Some(Direction::Top));
        assert_eq!(Direction::parse("below"), Some(Direction::Bottom));
        assert_eq!(Direction::parse("rt"), Some(Direction::Right));
        assert_eq!(Direction::parse("west"), Some(Direction::Left));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn axis_with_flag_matches_sides() {
        assert_eq!(Direction::Top.axis_with_flag(false), (Axis::Vertical, false));
        assert_eq!(Direction::Bottom.axis_with_flag(false), (Axis::Vertical, true));
        assert_eq!(Direction::Right.axis_with_flag(false), (Axis::Horizontal, true));
        assert_eq!(Direction::Left.axis_with_flag(true), (Axis::Horizontal, true));
    }

    #[test]
    fn hint_resolution() {
        assert_eq!(Hint::resolve("vert"), Some(Hint::Axis(Axis::Vertical)));
        assert_eq!(Hint::resolve("up"), Some(Hint::Side(Direction::Top)));
        assert_eq!(Hint::resolve("12"), None);
        assert_eq!(Hint::resolve("l").map(Hint::family), Some(Axis::Horizontal));
        assert_eq!(Hint::resolve("b").map(Hint::code), Some('b'));
    }

    #[test]
    fn truthy_words() {
        assert!(is_true("Yes", None));
        assert!(is_true("limit", Some("limit")));
        assert!(!is_true("limit", None));
        assert!(!is_true("0", Some("limit")));
    }

    #[test]
    fn pane_argument_helpers() {
        assert_eq!(thru_valid_panes("12:ab", "*:"), Some("12:ab"));
        assert_eq!(thru_valid_panes("1-2", "*:"), None);
        assert_eq!(single_pane("a"), Some('a'));
        assert_eq!(single_pane("ab"), None);
        assert_eq!(single_pane("-"), None);
        assert_eq!(
            panes_in_use_message("AB").as_deref(),
            Some("Specified panes (AB) are already in use")
        );
        assert_eq!(
            panes_in_use_message("A").as_deref(),
            Some("Specified pane (A) is already in use")
        );
        assert_eq!(panes_in_use_message(""), None);
    }
}
