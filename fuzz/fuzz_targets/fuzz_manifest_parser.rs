//! Fuzz target for `go version -m` manifest parsing.
//!
//! Goal: the parser should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = licguard_manifest::fuzz::parse_manifest(&text);

    // Feeding line by line must agree with the whole-text entry point.
    let mut parser = licguard_manifest::Parser::new();
    let streamed = text
        .split('\n')
        .try_for_each(|line| parser.feed(line))
        .and_then(|()| parser.finish());
    assert_eq!(streamed, licguard_manifest::parse(&text));
});
