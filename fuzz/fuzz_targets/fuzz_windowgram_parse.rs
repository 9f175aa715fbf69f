#![no_main]

use libfuzzer_sys::fuzz_target;
use windowgram_core::{SplitConfig, Windowgram, compile, convert::purify};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    // Keep grids small enough for the split processor.
    if raw.len() > 4096 {
        return;
    }

    let pure = purify(raw);
    assert_eq!(purify(&pure), pure, "purify is not idempotent");

    let Ok(wg) = Windowgram::parse(raw) else {
        return;
    };
    let (width, height) = wg.width_height();
    assert!(width > 0 && height > 0, "parsed windowgram is blank");
    for pane in wg.parsed().unwrap_or_default() {
        assert!(pane.w > 0 && pane.h > 0, "empty pane {}", pane.id);
        assert!(pane.x + pane.w - 1 <= width, "pane {} past the right edge", pane.id);
        assert!(pane.y + pane.h - 1 <= height, "pane {} past the bottom edge", pane.id);
    }

    let _ = wg.analyze_type(false);
    let _ = compile(&wg, &SplitConfig::default().with_screen(200, 60));
});
