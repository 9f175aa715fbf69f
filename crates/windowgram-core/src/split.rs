//! Split processor: turns a windowgram into ordered binary splits.
//!
//! A split-based multiplexer can only create panes by dividing an existing
//! pane in two. The processor walks the windowgram recursively, looking for a
//! straight line that crosses the current region without cutting any pane
//! ("clean break"), splits there and recurses into both halves. A region that
//! exactly matches one pane is linked to it.
//!
//! Every created pane carries a link id (starting at 1001) so that the final
//! pane index can be recovered after later splits renumber the panes.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, ParseError};
use crate::geometry::{Axis, Pane, Rect};
use crate::windowgram::Windowgram;

/// First link id handed out (the full-screen root pane).
pub const FIRST_LINK_ID: u32 = 1001;

/// Screen size used when only the shape of the plan matters.
pub const ANALYSIS_SCREEN: u32 = 1024;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Split processor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    /// Target screen width in characters.
    pub screen_width: u32,
    /// Target screen height in characters.
    pub screen_height: u32,
    /// Subtract each split from its parent's remaining size.
    pub relative: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            screen_width: ANALYSIS_SCREEN,
            screen_height: ANALYSIS_SCREEN,
            relative: false,
        }
    }
}

impl SplitConfig {
    #[must_use]
    pub const fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    #[must_use]
    pub const fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// Load from environment variables.
    ///
    /// Reads:
    /// - `WINDOWGRAM_SCREEN_WIDTH`: Screen width in characters
    /// - `WINDOWGRAM_SCREEN_HEIGHT`: Screen height in characters
    /// - `WINDOWGRAM_SPLIT_RELATIVE`: Set to "1" or "true" for relative sizing
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("WINDOWGRAM_SCREEN_WIDTH")
            && let Ok(width) = val.parse::<u32>()
        {
            config.screen_width = width;
        }

        if let Ok(val) = std::env::var("WINDOWGRAM_SCREEN_HEIGHT")
            && let Ok(height) = val.parse::<u32>()
        {
            config.screen_height = height;
        }

        if let Ok(val) = std::env::var("WINDOWGRAM_SPLIT_RELATIVE") {
            config.relative = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config.validated()
    }

    /// Clamp screen dimensions to at least one character.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.screen_width = self.screen_width.max(1);
        self.screen_height = self.screen_height.max(1);
        self
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One pane creation step.
///
/// The first node is the full-screen root; it has no source pane and no axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    pub link_id: u32,
    /// Index of the pane being split, at the time of the split.
    pub source_pane: Option<u32>,
    pub axis: Option<Axis>,
    /// Size of the new pane in screen characters.
    pub width: i64,
    pub height: i64,
    /// Share of the source pane given to the new pane.
    pub percent: f64,
}

/// Final pane index of a link id once every split has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneLink {
    pub link_id: u32,
    pub pane_index: u32,
}

/// Which link a windowgram pane ended up on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneAssignment {
    pub pane: char,
    pub link_id: Option<u32>,
}

/// Ordered split instructions for one windowgram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPlan {
    pub nodes: Vec<SplitNode>,
    pub links: Vec<PaneLink>,
    /// Panes sorted top to bottom, left to right.
    pub assignments: Vec<PaneAssignment>,
}

impl SplitPlan {
    /// Nodes that no pane was linked to.
    #[must_use]
    pub fn unlinked_nodes(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| {
                !self
                    .assignments
                    .iter()
                    .any(|a| a.link_id == Some(node.link_id))
            })
            .count()
    }

    /// Every node carries a pane.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unlinked_nodes() == 0
    }

    /// Final pane index of a windowgram pane.
    #[must_use]
    pub fn pane_index(&self, pane: char) -> Option<u32> {
        let link_id = self
            .assignments
            .iter()
            .find(|a| a.pane == pane)
            .and_then(|a| a.link_id)?;
        self.links
            .iter()
            .find(|l| l.link_id == link_id)
            .map(|l| l.pane_index)
    }
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

struct SplitProcessor<'a> {
    config: &'a SplitConfig,
    window: (usize, usize),
    panes: Vec<Pane>,
    settled: FxHashMap<char, u32>,
    next_link: u32,
    nodes: Vec<SplitNode>,
    links: Vec<PaneLink>,
}

impl<'a> SplitProcessor<'a> {
    fn new(config: &'a SplitConfig, window: (usize, usize), panes: Vec<Pane>) -> Self {
        let root = SplitNode {
            link_id: FIRST_LINK_ID,
            source_pane: None,
            axis: None,
            width: i64::from(config.screen_width),
            height: i64::from(config.screen_height),
            percent: 100.0,
        };
        Self {
            config,
            window,
            panes,
            settled: FxHashMap::default(),
            next_link: FIRST_LINK_ID,
            nodes: vec![root],
            links: vec![PaneLink {
                link_id: FIRST_LINK_ID,
                pane_index: 0,
            }],
        }
    }

    fn is_settled(&self, pane: &Pane) -> bool {
        self.settled.contains_key(&pane.id)
    }

    fn run(mut self) -> SplitPlan {
        let (width, height) = self.window;
        self.fill(FIRST_LINK_ID, Rect::new(1, 1, width, height));
        let assignments = self
            .panes
            .iter()
            .map(|pane| PaneAssignment {
                pane: pane.id,
                link_id: self.settled.get(&pane.id).copied(),
            })
            .collect();
        SplitPlan {
            nodes: self.nodes,
            links: self.links,
            assignments,
        }
    }

    fn fill(&mut self, link_id: u32, area: Rect) {
        if let Some(pane) = self
            .panes
            .iter()
            .find(|p| !self.is_settled(p) && p.rect() == area)
            .copied()
        {
            tracing::trace!(
                target: "windowgram.split",
                pane = %pane.id,
                link_id,
                "linked pane"
            );
            self.settled.insert(pane.id, link_id);
            return;
        }

        for ix in 0..self.panes.len() {
            let pane = self.panes[ix];
            if self.is_settled(&pane) || !pane.rect().overlaps(&area) {
                continue;
            }

            let mut at = None;
            if pane.y > area.y && self.clean_break(Axis::Vertical, pane.y, area) {
                at = Some(pane.y);
            }
            if pane.bottom() < area.bottom() && self.clean_break(Axis::Vertical, pane.bottom(), area)
            {
                at = Some(pane.bottom());
            }
            if let Some(at) = at {
                let first = Rect::new(area.x, area.y, area.width, at - area.y);
                let second = Rect::new(area.x, at, area.width, area.bottom() - at);
                let new_link = self.split_window(link_id, Axis::Vertical, second.height);
                self.fill(link_id, first);
                self.fill(new_link, second);
                return;
            }

            if pane.x > area.x && self.clean_break(Axis::Horizontal, pane.x, area) {
                at = Some(pane.x);
            }
            if pane.right() < area.right() && self.clean_break(Axis::Horizontal, pane.right(), area)
            {
                at = Some(pane.right());
            }
            if let Some(at) = at {
                let first = Rect::new(area.x, area.y, at - area.x, area.height);
                let second = Rect::new(at, area.y, area.right() - at, area.height);
                let new_link = self.split_window(link_id, Axis::Horizontal, second.width);
                self.fill(link_id, first);
                self.fill(new_link, second);
                return;
            }
        }

        tracing::trace!(
            target: "windowgram.split",
            x = area.x,
            y = area.y,
            width = area.width,
            height = area.height,
            "no clean break found"
        );
    }

    /// Whether the line at `pos` crosses `area` along pane edges only.
    ///
    /// `Axis::Vertical` looks for a horizontal line at row `pos`, scanning
    /// across the area's width; `Axis::Horizontal` for a vertical line.
    fn clean_break(&self, axis: Axis, pos: usize, area: Rect) -> bool {
        let (begin, size) = match axis {
            Axis::Vertical => (area.x, area.width),
            Axis::Horizontal => (area.y, area.height),
        };
        let mut scanline = vec![false; size];
        for pane in &self.panes {
            if self.is_settled(pane) || !pane.rect().overlaps(&area) {
                continue;
            }
            let (near, far, start, len) = match axis {
                Axis::Vertical => (pane.y, pane.bottom(), pane.x, pane.w),
                Axis::Horizontal => (pane.x, pane.right(), pane.y, pane.h),
            };
            if near != pos && far != pos {
                continue;
            }
            let from = start.max(begin);
            let to = (start + len).min(begin + size);
            for covered in scanline.iter_mut().take(to - begin).skip(from - begin) {
                *covered = true;
            }
            if scanline.iter().all(|covered| *covered) {
                return true;
            }
        }
        false
    }

    /// Split the pane holding `at_link` and return the new pane's link id.
    ///
    /// `of_this` is the new pane's size in windowgram characters along the
    /// split axis.
    fn split_window(&mut self, at_link: u32, axis: Axis, of_this: usize) -> u32 {
        let at_index = self
            .links
            .iter()
            .find(|l| l.link_id == at_link)
            .map_or(0, |l| l.pane_index);
        for link in &mut self.links {
            if link.pane_index > at_index {
                link.pane_index += 1;
            }
        }
        self.next_link += 1;
        let new_link = self.next_link;

        let (window_w, window_h) = self.window;
        let config = self.config;
        let translate = |size: usize, window: usize, screen: u32| -> i64 {
            (size as f64 / window as f64 * f64::from(screen)) as i64
        };
        let mut width = 0;
        let mut height = 0;
        let mut percent = 0.0;
        if let Some(source) = self.nodes.iter_mut().find(|n| n.link_id == at_link) {
            match axis {
                Axis::Vertical => {
                    let size = translate(of_this, window_h, config.screen_height);
                    width = source.width;
                    height = size - 1;
                    percent = size as f64 / source.height as f64 * 100.0;
                    if config.relative {
                        source.height -= size;
                    }
                }
                Axis::Horizontal => {
                    let size = translate(of_this, window_w, config.screen_width);
                    width = size - 1;
                    height = source.height;
                    percent = size as f64 / source.width as f64 * 100.0;
                    if config.relative {
                        source.width -= size;
                    }
                }
            }
        }

        tracing::trace!(
            target: "windowgram.split",
            link_id = new_link,
            source_pane = at_index,
            axis = %axis.code(),
            width,
            height,
            percent,
            "split pane"
        );
        self.nodes.push(SplitNode {
            link_id: new_link,
            source_pane: Some(at_index),
            axis: Some(axis),
            width,
            height,
            percent,
        });
        self.links.push(PaneLink {
            link_id: new_link,
            pane_index: at_index + 1,
        });
        new_link
    }
}

/// Sort panes top to bottom, then left to right.
#[must_use]
pub fn sort_panes(mut panes: Vec<Pane>) -> Vec<Pane> {
    panes.sort_by_key(|p| (p.y, p.x));
    panes
}

/// First pair of panes whose bounding boxes overlap.
#[must_use]
pub fn pane_overlap(panes: &[Pane]) -> Option<(char, char)> {
    panes.iter().enumerate().find_map(|(ix, first)| {
        panes[ix + 1..]
            .iter()
            .find(|second| first.overlaps(second))
            .map(|second| (first.id, second.id))
    })
}

/// Run the split processor without judging the result.
///
/// The plan may leave nodes or panes unlinked; see [`compile`] for the
/// checked variant.
pub fn process(wg: &Windowgram, config: &SplitConfig) -> Result<SplitPlan, ParseError> {
    let panes = sort_panes(wg.parsed()?);
    let plan = SplitProcessor::new(config, wg.width_height(), panes).run();
    tracing::debug!(
        target: "windowgram.split",
        nodes = plan.nodes.len(),
        unlinked = plan.unlinked_nodes(),
        "split plan built"
    );
    Ok(plan)
}

/// Compile a windowgram into split instructions.
///
/// Fails if the windowgram does not parse, has overlapping panes, or needs
/// positioning that binary splits cannot express.
pub fn compile(wg: &Windowgram, config: &SplitConfig) -> Result<SplitPlan, CompileError> {
    let panes = sort_panes(wg.parsed()?);
    if let Some((first, second)) = pane_overlap(&panes) {
        return Err(CompileError::Layered { first, second });
    }
    let plan = SplitProcessor::new(config, wg.width_height(), panes).run();
    let unlinked = plan.unlinked_nodes();
    if unlinked > 0 || plan.assignments.iter().any(|a| a.link_id.is_none()) {
        return Err(CompileError::Tiled {
            unlinked: unlinked.max(1),
        });
    }
    Ok(plan)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// How a windowgram can be realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowgramType {
    /// Reproducible with binary splits alone.
    Split,
    /// No overlaps, but needs free positioning.
    Tiled,
    /// Pane bounding boxes overlap.
    Layered,
}

impl WindowgramType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Tiled => "tiled",
            Self::Layered => "layered",
        }
    }
}

impl fmt::Display for WindowgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Windowgram {
    /// Classify as split, tiled or layered.
    pub fn analyze_type(&self, relative: bool) -> Result<WindowgramType, ParseError> {
        let plain = Windowgram::new(self.as_str());
        let panes = sort_panes(plain.parsed()?);
        if pane_overlap(&panes).is_some() {
            return Ok(WindowgramType::Layered);
        }
        let config = SplitConfig::default().with_relative(relative);
        let plan = SplitProcessor::new(&config, plain.width_height(), panes).run();
        if plan.is_complete() {
            Ok(WindowgramType::Split)
        } else {
            Ok(WindowgramType::Tiled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wg(text: &str) -> Windowgram {
        Windowgram::new(text)
    }

    #[test]
    fn single_pane_is_the_root() {
        let plan = compile(&wg("1"), &SplitConfig::default()).expect("split");
        assert_eq!(plan.nodes.len(), 1);
        assert_eq!(plan.nodes[0].link_id, FIRST_LINK_ID);
        assert_eq!(plan.nodes[0].percent, 100.0);
        assert_eq!(plan.pane_index('1'), Some(0));
    }

    #[test]
    fn two_columns_split_horizontally() {
        let plan = compile(&wg("12\n"), &SplitConfig::default().with_screen(100, 50))
            .expect("split");
        assert_eq!(plan.nodes.len(), 2);
        let node = plan.nodes[1];
        assert_eq!(node.link_id, 1002);
        assert_eq!(node.source_pane, Some(0));
        assert_eq!(node.axis, Some(Axis::Horizontal));
        assert_eq!(node.width, 49);
        assert_eq!(node.height, 50);
        assert_eq!(node.percent, 50.0);
        assert_eq!(plan.pane_index('1'), Some(0));
        assert_eq!(plan.pane_index('2'), Some(1));
    }

    #[test]
    fn two_rows_split_vertically() {
        let plan = compile(&wg("1\n2\n2\n2\n"), &SplitConfig::default().with_screen(80, 40))
            .expect("split");
        let node = plan.nodes[1];
        assert_eq!(node.axis, Some(Axis::Vertical));
        assert_eq!(node.height, 29);
        assert_eq!(node.width, 80);
        assert_eq!(node.percent, 75.0);
    }

    #[test]
    fn later_splits_renumber_earlier_panes() {
        // 1 | 2 then 1 over 3: pane 2 moves from index 1 to index 2.
        let plan = compile(&wg("12\n32\n"), &SplitConfig::default()).expect("split");
        assert_eq!(plan.nodes.len(), 3);
        assert_eq!(plan.nodes[1].axis, Some(Axis::Horizontal));
        assert_eq!(plan.nodes[2].axis, Some(Axis::Vertical));
        assert_eq!(plan.pane_index('1'), Some(0));
        assert_eq!(plan.pane_index('3'), Some(1));
        assert_eq!(plan.pane_index('2'), Some(2));
    }

    #[test]
    fn relative_mode_shrinks_the_source() {
        let config = SplitConfig::default().with_screen(90, 30).with_relative(true);
        let plan = compile(&wg("123\n"), &config).expect("split");
        assert_eq!(plan.nodes.len(), 3);
        assert_eq!(plan.nodes[0].width, 30);
        assert!((plan.nodes[1].percent - 200.0 / 3.0).abs() < 1e-9);
        // The second split divides the first new pane, which shrinks too.
        assert_eq!(plan.nodes[1].width, 29);
        assert_eq!(plan.nodes[2].width, 29);
    }

    #[test]
    fn pinwheel_is_tiled() {
        let pinwheel = wg("1112\n4552\n4553\n4666\n");
        assert_eq!(pinwheel.analyze_type(false), Ok(WindowgramType::Tiled));
        assert!(matches!(
            compile(&pinwheel, &SplitConfig::default()),
            Err(CompileError::Tiled { .. })
        ));
    }

    #[test]
    fn overlapping_panes_are_layered() {
        let layered = wg("121\n111\n");
        assert_eq!(layered.analyze_type(false), Ok(WindowgramType::Layered));
        assert_eq!(
            compile(&layered, &SplitConfig::default()),
            Err(CompileError::Layered {
                first: '1',
                second: '2'
            })
        );
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(wg("12\n1\n").analyze_type(false).is_err());
        assert!(matches!(
            compile(&wg(""), &SplitConfig::default()),
            Err(CompileError::Parse(_))
        ));
    }

    #[test]
    fn nested_grid_is_split() {
        let grid = wg("1122\n1122\n3456\n3789\n");
        assert_eq!(grid.analyze_type(false), Ok(WindowgramType::Split));
        let plan = compile(&grid, &SplitConfig::default()).expect("split");
        assert_eq!(plan.nodes.len(), 9);
        assert!(plan.is_complete());
        let mut indices: Vec<u32> = "123456789"
            .chars()
            .filter_map(|p| plan.pane_index(p))
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn config_validated_clamps_zero_screen() {
        let config = SplitConfig::default().with_screen(0, 0).validated();
        assert_eq!((config.screen_width, config.screen_height), (1, 1));
    }

    #[test]
    fn plan_serializes_axis_as_code() {
        let plan = compile(&wg("12\n"), &SplitConfig::default()).expect("split");
        let json = serde_json::to_string(&plan).expect("serialize");
        assert!(json.contains("\"axis\":\"h\""));
        let back: SplitPlan = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, plan);
    }

    #[tracing_test::traced_test]
    #[test]
    fn process_logs_the_plan() {
        let plan = process(&wg("12\n"), &SplitConfig::default()).expect("split");
        assert_eq!(plan.nodes.len(), 2);
        assert!(logs_contain("split plan built"));
    }
}
