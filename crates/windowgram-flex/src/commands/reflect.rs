//! `mirror` and `flip`: reflect the whole windowgram.

use windowgram_core::Windowgram;

use crate::notice::{Applied, FlexResult};

/// `mirror`: reverse every row, left becomes right.
pub fn mirror(wg: &Windowgram, _args: &[String]) -> FlexResult {
    Ok(Applied::new(wg.mirrored()))
}

/// `flip`: reverse the row order, top becomes bottom.
pub fn flip(wg: &Windowgram, _args: &[String]) -> FlexResult {
    Ok(Applied::new(wg.flipped()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mirror_and_flip() {
        let wg = Windowgram::new("1123\n4455\n");
        assert_eq!(mirror(&wg, &[]).unwrap().windowgram.as_str(), "3211\n5544\n");
        assert_eq!(flip(&wg, &[]).unwrap().windowgram.as_str(), "4455\n1123\n");
    }

    #[test]
    fn twice_is_identity() {
        let wg = Windowgram::new("12\n33\n");
        let back = mirror(&mirror(&wg, &[]).unwrap().windowgram, &[]).unwrap();
        assert_eq!(back.windowgram, wg);
    }
}
