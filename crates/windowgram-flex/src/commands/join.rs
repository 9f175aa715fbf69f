//! `join <group>...`: merge each rectangular group into a single pane.
//!
//! A group is a run of pane ids, optionally followed by `.` and the id the
//! merged pane takes (`abcd.x`). Without a rename the first id listed names
//! the result. All groups are validated before any is applied, and the joins
//! are layered as a mosaic so renames cannot collide with each other.

use windowgram_core::{Mosaic, PANE_CHARACTERS, PaneSet, Windowgram, mask_generate};

use crate::cores::{GroupStatus, groupcore};
use crate::notice::{Applied, FlexResult, ValidationError};

struct JoinGroup<'a> {
    original: &'a str,
    panes: PaneSet,
    rename: char,
}

impl JoinGroup<'_> {
    fn label(&self, ix: usize) -> String {
        format!("{} (\"{}\")", ix + 1, self.original)
    }
}

fn parse_group<'a>(
    wg: &Windowgram,
    original: &'a str,
    clipped: &mut PaneSet,
) -> Result<JoinGroup<'a>, String> {
    let repacked = match original.chars().next() {
        Some(first) if !original.contains('.') => format!("{original}.{first}"),
        _ => original.to_owned(),
    };
    if repacked.matches('.').count() > 1 {
        return Err("Argument contains more than one rename delimiter".to_owned());
    }
    let mut invalids = String::new();
    for ch in repacked.chars() {
        if ch != '.' && !PANE_CHARACTERS.contains(ch) && !invalids.contains(ch) {
            invalids.push(ch);
        }
    }
    if !invalids.is_empty() {
        return Err(format!("Group contains invalid characters: {invalids}"));
    }
    let (left, right) = repacked.split_once('.').unwrap_or((repacked.as_str(), ""));
    let mut rename = right.chars();
    let Some(to) = rename.next() else {
        return Err("Rename delimiter used but subsequent pane unspecified".to_owned());
    };
    if rename.next().is_some() {
        return Err("Only one pane should be specified after the rename delimiter".to_owned());
    }
    let panes = PaneSet::from_chars(left);
    if panes.is_empty() {
        return Err("Group does not specify any panes".to_owned());
    }
    let mut notfound = String::new();
    for ch in panes.iter() {
        if clipped.contains(ch) {
            return Err(format!("Pane \"{ch}\" was already used by a previous group"));
        }
        if wg.has_pane(ch) {
            clipped.insert(ch);
        } else {
            notfound.push(ch);
        }
    }
    if !notfound.is_empty() {
        let noun = if notfound.chars().count() > 1 {
            "pane(s)"
        } else {
            "pane"
        };
        return Err(format!("Windowgram does not have {noun} {notfound}"));
    }
    Ok(JoinGroup {
        original,
        panes,
        rename: to,
    })
}

fn argument_error(ix: usize, original: &str, err: &str) -> ValidationError {
    ValidationError::new(format!(
        "Error with argument {} (\"{original}\"): {err}",
        ix + 1
    ))
}

/// `join <group>...`
pub fn join(wg: &Windowgram, args: &[String]) -> FlexResult {
    let mut clipped = PaneSet::EMPTY;
    let mut groups = Vec::with_capacity(args.len());
    for (ix, original) in args.iter().enumerate() {
        let group = parse_group(wg, original, &mut clipped)
            .map_err(|err| argument_error(ix, original, &err))?;
        groups.push(group);
    }

    let (used, _) = wg.used_unused();
    let mut used = used.difference(clipped);
    for (ix, group) in groups.iter().enumerate() {
        if used.contains(group.rename) {
            return Err(argument_error(
                ix,
                group.original,
                &format!(
                    "Attempting to rename to pane {} when it's in use",
                    group.rename
                ),
            ));
        }
        used.insert(group.rename);
    }

    let mut mosaic = Mosaic::new(wg.clone());
    for (ix, group) in groups.iter().enumerate() {
        match groupcore(wg, group.panes) {
            (GroupStatus::Success, _) => {}
            (GroupStatus::InvalidPanes, _) => {
                return ValidationError::fail(format!(
                    "Group #{} contains invalid panes",
                    group.label(ix)
                ));
            }
            (GroupStatus::InsufficientPanes, suggestions) => {
                return ValidationError::fail(format!(
                    "Group #{} isn't whole, but it would be if you add: {suggestions}",
                    group.label(ix)
                ));
            }
        }
        mosaic.push(
            wg.renamed(group.panes, group.rename),
            mask_generate(wg, group.panes),
        );
    }
    Ok(Applied::new(mosaic.flatten()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(wg: &str, args: &[&str]) -> FlexResult {
        let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
        join(&Windowgram::new(wg), &args)
    }

    fn joined(wg: &str, args: &[&str]) -> String {
        run(wg, args).unwrap().windowgram.as_str().to_owned()
    }

    fn error(wg: &str, args: &[&str]) -> String {
        run(wg, args).unwrap_err().message
    }

    #[test]
    fn joins_named_after_first_pane() {
        let wg = "1122\n3344\n";
        assert_eq!(joined(wg, &["12"]), "1111\n3344\n");
        assert_eq!(joined(wg, &["21"]), "2222\n3344\n");
        assert_eq!(joined(wg, &["12", "34"]), "1111\n3333\n");
        assert_eq!(joined("12\n34\n", &["13"]), "12\n14\n");
    }

    #[test]
    fn renames_are_applied_together() {
        let wg = "1122\n3344\n";
        assert_eq!(joined(wg, &["12.x"]), "xxxx\n3344\n");
        assert_eq!(joined(wg, &["12.3", "34.1"]), "3333\n1111\n");
    }

    #[test]
    fn argument_errors_name_the_argument() {
        let wg = "1122\n3344\n";
        assert_eq!(
            error(wg, &["1!"]),
            "Error with argument 1 (\"1!\"): Group contains invalid characters: !"
        );
        assert_eq!(
            error(wg, &["1.2.3"]),
            "Error with argument 1 (\"1.2.3\"): Argument contains more than one rename delimiter"
        );
        assert_eq!(
            error(wg, &["12."]),
            "Error with argument 1 (\"12.\"): Rename delimiter used but subsequent pane unspecified"
        );
        assert_eq!(
            error(wg, &["12.ab"]),
            "Error with argument 1 (\"12.ab\"): Only one pane should be specified after the rename delimiter"
        );
        assert_eq!(
            error(wg, &["12", "2"]),
            "Error with argument 2 (\"2\"): Pane \"2\" was already used by a previous group"
        );
        assert_eq!(
            error(wg, &["19"]),
            "Error with argument 1 (\"19\"): Windowgram does not have pane 9"
        );
        assert_eq!(
            error(wg, &["189"]),
            "Error with argument 1 (\"189\"): Windowgram does not have pane(s) 89"
        );
        assert_eq!(
            error(wg, &[".x"]),
            "Error with argument 1 (\".x\"): Group does not specify any panes"
        );
        assert_eq!(
            error(wg, &["12.3"]),
            "Error with argument 1 (\"12.3\"): Attempting to rename to pane 3 when it's in use"
        );
    }

    #[test]
    fn incomplete_groups_suggest_panes() {
        assert_eq!(
            error("12\n34\n", &["2", "14"]),
            "Group #2 (\"14\") isn't whole, but it would be if you add: 23"
        );
    }
}
