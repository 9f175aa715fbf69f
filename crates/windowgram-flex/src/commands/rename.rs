//! `rename <from> <to> ...` and `swap <from> <to> ...`.
//!
//! Both take pairs of equally long pane lists and map them position by
//! position. Every pair is validated before anything changes, so pairs may
//! be given in any order (`rename 12 21` and `rename 1 2 2 1` are the same).

use windowgram_core::{Mosaic, PANE_CHARACTERS, PaneSet, Windowgram, mask_generate};

use crate::notice::{Applied, FlexResult, ValidationError};

/// Split the argument list into `(from, to)` pairs.
fn pairs(args: &[String]) -> Result<Vec<(&str, &str)>, ValidationError> {
    if args.len() % 2 != 0 {
        return ValidationError::fail("Insufficient data, every <from> must be followed by <to>");
    }
    Ok(args
        .chunks_exact(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect())
}

fn check_counts(from: &str, to: &str, pair: usize) -> Result<(), ValidationError> {
    if from.chars().count() != to.chars().count() {
        return ValidationError::fail(format!(
            "Pair {pair} count error, both <from> and <to> pane counts must be identical"
        ));
    }
    Ok(())
}

/// `rename <from> <to> ...`
pub fn rename(wg: &Windowgram, args: &[String]) -> FlexResult {
    let pairs = pairs(args)?;
    let (used, unused) = wg.used_unused();

    let mut freed = PaneSet::EMPTY;
    for (ix, &(from, to)) in pairs.iter().enumerate() {
        let pair = ix + 1;
        check_counts(from, to, pair)?;
        if let Some((same, _)) = from.chars().zip(to.chars()).find(|(f, t)| f == t) {
            return ValidationError::fail(format!("Pane `{same}` renames to self in pair {pair}"));
        }
        for pane in from.chars() {
            if !PANE_CHARACTERS.contains(pane) {
                return ValidationError::fail(format!("Invalid pane `{pane}` in pair {pair}"));
            }
            if freed.contains(pane) {
                return ValidationError::fail(format!(
                    "The <from> pane `{pane}` in pair {pair} was renamed by another pair"
                ));
            }
            if !used.contains(pane) {
                return ValidationError::fail(format!(
                    "The <from> pane `{pane}` in pair {pair} is not being used"
                ));
            }
        }
        freed = freed.union(PaneSet::from_chars(from));
    }

    let available = unused.union(freed);
    let mut named = PaneSet::EMPTY;
    for (ix, &(_, to)) in pairs.iter().enumerate() {
        let pair = ix + 1;
        for pane in to.chars() {
            if !PANE_CHARACTERS.contains(pane) {
                return ValidationError::fail(format!("Invalid pane `{pane}` in pair {pair}"));
            }
            if named.contains(pane) {
                return ValidationError::fail(format!(
                    "The <to> pane `{pane}` in pair {pair} was already named by another pair"
                ));
            }
            if !available.contains(pane) {
                return ValidationError::fail(format!(
                    "The <to> pane `{pane}` in pair {pair} is already being used"
                ));
            }
        }
        named = named.union(PaneSet::from_chars(to));
    }

    let mut mosaic = Mosaic::new(wg.clone());
    for &(from, to) in &pairs {
        for (f, t) in from.chars().zip(to.chars()) {
            let pane = PaneSet::from_chars(&f.to_string());
            mosaic.push(wg.renamed(pane, t), mask_generate(wg, pane));
        }
    }
    Ok(Applied::new(mosaic.flatten()))
}

/// First character of `panes` that appears more than once.
fn repeated(panes: &str) -> Option<char> {
    panes
        .chars()
        .find(|ch| panes.chars().filter(|other| other == ch).count() > 1)
}

/// `swap <from> <to> ...`
pub fn swap(wg: &Windowgram, args: &[String]) -> FlexResult {
    let pairs = pairs(args)?;
    let (used, _) = wg.used_unused();

    let mut swapped = PaneSet::EMPTY;
    for (ix, &(from, to)) in pairs.iter().enumerate() {
        let pair = ix + 1;
        check_counts(from, to, pair)?;
        for (spot, panes) in [("<from>", from), ("<to>", to)] {
            if let Some(pane) = repeated(panes) {
                return ValidationError::fail(format!(
                    "Pane `{pane}` specified multiple times in {spot} of pair {pair}"
                ));
            }
        }
        if let Some((same, _)) = from.chars().zip(to.chars()).find(|(f, t)| f == t) {
            return ValidationError::fail(format!("Pane `{same}` swaps to self in pair {pair}"));
        }
        let spots = from
            .chars()
            .map(|pane| ("<from>", pane))
            .chain(to.chars().map(|pane| ("<to>", pane)));
        for (spot, pane) in spots {
            if !PANE_CHARACTERS.contains(pane) {
                return ValidationError::fail(format!(
                    "Invalid pane `{pane}` in {spot} of pair {pair}"
                ));
            }
            if swapped.contains(pane) {
                return ValidationError::fail(format!(
                    "The {spot} pane `{pane}` in pair {pair} is already swapped"
                ));
            }
            if !used.contains(pane) {
                return ValidationError::fail(format!(
                    "The {spot} pane `{pane}` in pair {pair} is not being used"
                ));
            }
        }
        swapped = swapped
            .union(PaneSet::from_chars(from))
            .union(PaneSet::from_chars(to));
    }

    let mut map: Vec<(char, char)> = Vec::new();
    for &(from, to) in &pairs {
        for (f, t) in from.chars().zip(to.chars()) {
            map.push((f, t));
            map.push((t, f));
        }
    }
    let chars: Vec<Vec<char>> = wg
        .chars()
        .iter()
        .map(|row| {
            row.iter()
                .map(|ch| {
                    map.iter()
                        .find(|(f, _)| f == ch)
                        .map_or(*ch, |&(_, t)| t)
                })
                .collect()
        })
        .collect();
    Ok(Applied::new(Windowgram::from_chars(&chars, wg.is_extended())))
}
