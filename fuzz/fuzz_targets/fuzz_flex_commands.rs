#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use windowgram_core::Windowgram;
use windowgram_flex::{CommandTable, DispatchConfig, Dispatcher, NoticePolicy};

const WORDS: &[&str] = &[
    "scale", "add", "break", "join", "split", "rename", "swap", "drag", "mirror", "flip", "half",
    "double", "glue", "slide", "1", "2", "3", "a", "12", "13", "123", "*", "12:3", "1.z", "v",
    "h", "t", "b", "l", "r", "50%", "2x", "-1", "3x2", "limit", "",
];

#[derive(Debug, Arbitrary)]
struct Input {
    start: u8,
    words: Vec<u8>,
    separators: Vec<bool>,
}

fuzz_target!(|input: Input| {
    let starts = ["1\n", "12\n", "12\n34\n", "1122\n1133\n4444\n", "111\n234\n"];
    let mut wg = Windowgram::new(starts[usize::from(input.start) % starts.len()]);

    let mut commands = String::new();
    for (ix, word) in input.words.iter().take(12).enumerate() {
        commands.push_str(WORDS[usize::from(*word) % WORDS.len()]);
        let split = input.separators.get(ix).copied().unwrap_or(false);
        commands.push_str(if split { " ; " } else { " " });
    }

    let table = CommandTable::standard();
    let config = DispatchConfig::default().with_notice_policy(NoticePolicy::ContinueOnWarning);
    let before = wg.clone();
    let report = Dispatcher::new(&table, config).run(&mut wg, &commands);

    if report.executed == 0 {
        assert_eq!(wg, before, "rejected commands changed the windowgram");
    } else {
        assert!(wg.parsed().is_ok(), "command left a malformed windowgram: {wg:?}");
    }
});
