#![no_main]

//! The line parser must never panic on any input, and every accepted
//! instruction must carry a line inside the source.

use libfuzzer_sys::fuzz_target;
use rhizome_helix_core::{Program, parse_number};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    for line in source.lines() {
        let _ = parse_number(line);
    }

    let line_count = source.lines().count();
    match Program::parse(source) {
        Ok(program) => {
            for instruction in program.instructions() {
                assert!(instruction.line >= 1 && instruction.line <= line_count);
            }
        }
        Err(e) => {
            assert!(e.line >= 1 && e.line <= line_count.max(1));
            assert!(e.column >= 1);
        }
    }
});
