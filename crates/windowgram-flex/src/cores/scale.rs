//! Scale core: resize a windowgram pane by pane.
//!
//! Every pane edge is mapped through `round_half_up((v - 1) * m) + 1`, with
//! independent multipliers per axis. Panes that shrink to nothing are simply
//! gone from the result; callers compare pane sets to notice.

use windowgram_core::{Pane, Windowgram};

/// Retries allowed when hunting for an exact pane size.
pub const SCALE_RETRIES: usize = 16;

/// Map one 1-based edge coordinate.
#[must_use]
pub fn scale_one(element: usize, multiplier: f64) -> usize {
    let scaled = (element as f64 - 1.0) * multiplier;
    let mut whole = scaled.trunc();
    if scaled.fract() >= 0.5 {
        whole += 1.0;
    }
    if whole < 0.0 {
        return 0;
    }
    whole as usize + 1
}

fn scale_pane(pane: &Pane, ax: f64, ay: f64) -> Pane {
    let right = scale_one(pane.right(), ax);
    let bottom = scale_one(pane.bottom(), ay);
    let x = scale_one(pane.x, ax);
    let y = scale_one(pane.y, ay);
    Pane::new(
        pane.id,
        x,
        y,
        right.saturating_sub(x),
        bottom.saturating_sub(y),
    )
}

/// Scale `wg` to `width` by `height` characters.
///
/// A zero target, or a source that does not parse, yields a blank windowgram.
#[must_use]
pub fn scalecore(wg: &Windowgram, width: usize, height: usize) -> Windowgram {
    let source = Windowgram::new_extended(wg.as_str());
    let (from_w, from_h) = source.width_height();
    let panes = source.parsed().unwrap_or_default();
    if from_w == 0 || from_h == 0 || width == 0 || height == 0 || panes.is_empty() {
        return Windowgram::with_mode("", wg.is_extended());
    }
    let ax = width as f64 / from_w as f64;
    let ay = height as f64 / from_h as f64;
    let scaled: Vec<Pane> = panes.iter().map(|pane| scale_pane(pane, ax, ay)).collect();
    Windowgram::from_parsed(&scaled, wg.is_extended())
}

/// Scale towards `width` by `height`, nudging the target until `pane` comes
/// out exactly `exp_w` by `exp_h`.
///
/// Each retry moves each axis of the target by one character towards the
/// expected size. Gives up after [`SCALE_RETRIES`] attempts and returns the
/// last result. A pane that is not present gets a single plain scale.
#[must_use]
pub fn scalecore_retry(
    wg: &Windowgram,
    width: usize,
    height: usize,
    pane: char,
    exp_w: usize,
    exp_h: usize,
) -> Windowgram {
    if !wg.has_pane(pane) {
        return scalecore(wg, width, height);
    }
    let (mut try_w, mut try_h) = (width, height);
    let mut scaled = Windowgram::with_mode("", wg.is_extended());
    for attempt in 0..SCALE_RETRIES {
        scaled = scalecore(wg, try_w, try_h);
        let (new_w, new_h) = scaled.pane_xywh(pane).map_or((0, 0), |p| (p.w, p.h));
        if new_w == exp_w && new_h == exp_h {
            tracing::trace!(target: "windowgram.flex", attempt, "scale retry settled");
            break;
        }
        try_w = nudge(try_w, new_w, exp_w);
        try_h = nudge(try_h, new_h, exp_h);
    }
    scaled
}

fn nudge(target: usize, got: usize, expected: usize) -> usize {
    match got.cmp(&expected) {
        std::cmp::Ordering::Less => target + 1,
        std::cmp::Ordering::Greater => target.saturating_sub(1),
        std::cmp::Ordering::Equal => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scale_one_rounds_half_up() {
        assert_eq!(scale_one(1, 3.0), 1);
        assert_eq!(scale_one(2, 1.5), 3);
        assert_eq!(scale_one(3, 0.5), 2);
        assert_eq!(scale_one(3, 0.25), 2);
        assert_eq!(scale_one(4, 0.5), 3);
    }

    #[test]
    fn scales_up_and_back() {
        let wg = Windowgram::new("12\n34\n");
        let up = scalecore(&wg, 4, 4);
        assert_eq!(up.as_str(), "1122\n1122\n3344\n3344\n");
        assert_eq!(scalecore(&up, 2, 2), wg);
    }

    #[test]
    fn two_by_two_survives_three_by_three() {
        let wg = Windowgram::new("12\n34\n");
        let three = scalecore(&wg, 3, 3);
        assert_eq!(three.as_str(), "112\n112\n334\n");
        assert_eq!(scalecore(&three, 2, 2), wg);
    }

    #[test]
    fn panes_can_vanish() {
        let wg = Windowgram::new("1112\n");
        let narrow = scalecore(&wg, 1, 1);
        assert_eq!(narrow.as_str(), "1\n");
    }

    #[test]
    fn zero_target_is_blank() {
        let wg = Windowgram::new("12\n");
        assert!(scalecore(&wg, 0, 3).is_blank());
        assert!(scalecore(&Windowgram::default(), 3, 3).is_blank());
    }

    #[test]
    fn retry_finds_exact_pane_size() {
        let wg = Windowgram::new("1222\n");
        let scaled = scalecore_retry(&wg, 6, 1, '1', 2, 1);
        assert_eq!(scaled.pane_xywh('1').map(|p| (p.w, p.h)), Some((2, 1)));
    }

    #[test]
    fn retry_without_pane_is_plain_scale() {
        let wg = Windowgram::new("12\n");
        assert_eq!(scalecore_retry(&wg, 4, 1, 'z', 9, 9), scalecore(&wg, 4, 1));
    }
}
