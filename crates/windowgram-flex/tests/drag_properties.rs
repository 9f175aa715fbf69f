//! Property invariants for drag and the group core on regular grids.

use proptest::prelude::*;
use windowgram_core::{PANE_CHARACTERS, PaneSet, Windowgram};
use windowgram_flex::cores::groupcore;
use windowgram_flex::{CommandTable, DispatchConfig, Dispatcher, GroupStatus};

/// `cols` by `rows` panes, each `cell_w` by `cell_h` characters.
fn grid(cols: usize, rows: usize, cell_w: usize, cell_h: usize) -> Windowgram {
    let ids: Vec<char> = PANE_CHARACTERS.chars().collect();
    let mut text = String::new();
    for y in 0..rows * cell_h {
        for x in 0..cols * cell_w {
            text.push(ids[(y / cell_h) * cols + x / cell_w]);
        }
        text.push('\n');
    }
    Windowgram::new(&text)
}

fn id_at(cols: usize, col: usize, row: usize) -> char {
    PANE_CHARACTERS.chars().nth(row * cols + col).unwrap_or('0')
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn limited_drag_never_loses_panes(
        cols in 2usize..5,
        rows in 1usize..4,
        cell_w in 1usize..4,
        cell_h in 1usize..3,
        pick in any::<prop::sample::Index>(),
        across in any::<bool>(),
        forward in any::<bool>(),
        size in 1usize..12,
    ) {
        let start = grid(cols, rows, cell_w, cell_h);
        // Stacked panes share a horizontal edge, dragged up or down.
        let across = across && rows > 1;
        let (hint, neighbours, direction) = if across {
            let (col, row) = (pick.index(cols), pick.index(rows - 1));
            let pair = [id_at(cols, col, row), id_at(cols, col, row + 1)];
            ("h", pair, if forward { "b" } else { "t" })
        } else {
            let (col, row) = (pick.index(cols - 1), pick.index(rows));
            let pair = [id_at(cols, col, row), id_at(cols, col + 1, row)];
            ("v", pair, if forward { "r" } else { "l" })
        };
        let edge: String = neighbours.iter().collect();

        let table = CommandTable::standard();
        let mut wg = start.clone();
        let report = Dispatcher::new(&table, DispatchConfig::default())
            .run(&mut wg, &format!("drag {hint} {edge} {direction} {size} limit"));

        let (before, _) = start.used_unused();
        let (after, _) = wg.used_unused();
        prop_assert!(before.is_subset(&after), "lost panes: {:?}", report.summary());
        if report.has_errors() {
            prop_assert_eq!(wg, start);
        }
    }

    #[test]
    fn grid_rectangles_are_whole(
        cols in 1usize..6,
        rows in 1usize..6,
        corner in any::<(prop::sample::Index, prop::sample::Index)>(),
        span in any::<(prop::sample::Index, prop::sample::Index)>(),
    ) {
        let wg = grid(cols, rows, 2, 1);
        let (x0, y0) = (corner.0.index(cols), corner.1.index(rows));
        let (w, h) = (span.0.index(cols - x0) + 1, span.1.index(rows - y0) + 1);
        let mut group = PaneSet::EMPTY;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                group.insert(id_at(cols, x, y));
            }
        }
        let (status, missing) = groupcore(&wg, group);
        prop_assert_eq!(status, GroupStatus::Success);
        prop_assert!(missing.is_empty());
    }
}

#[test]
fn l_shape_is_insufficient() {
    let wg = grid(2, 2, 1, 1);
    let (status, missing) = groupcore(&wg, PaneSet::from_chars("012"));
    assert_eq!(status, GroupStatus::InsufficientPanes);
    assert_eq!(missing, PaneSet::from_chars("3"));
}
