#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use trickle::{Buffered, Feed, ParserConfig, char, choice, many, parse_only, sep_by, take_while1};

fn grammar() -> trickle::Parser<Vec<Vec<u8>>> {
    let ident = take_while1(|b: u8| b.is_ascii_alphanumeric() || b == b'_');
    let value = take_while1(|b: u8| b.is_ascii_alphanumeric());
    let pair = ident.bind(move |key| {
        let value = value.clone();
        choice(vec![
            char(b'=').then(value).map(move |v| {
                let mut out = key.clone();
                out.push(b'=');
                out.extend(v);
                out
            }),
            trickle::pure(key.clone()),
        ])
    });
    sep_by(char(b';'), pair).before(many(char(b' ')))
}

#[derive(Debug, Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    /// Chunk boundary offsets, reduced modulo `bytes.len() + 1` each.
    cuts: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let Input { bytes, cuts } = input;
    if bytes.is_empty() {
        return;
    }

    let mut boundaries: Vec<usize> = cuts
        .iter()
        .map(|&c| (c as usize) % (bytes.len() + 1))
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut chunks = Vec::new();
    let mut start = 0;
    for &cut in &boundaries {
        if cut > start {
            chunks.push(&bytes[start..cut]);
            start = cut;
        }
    }
    chunks.push(&bytes[start..]);

    let p = grammar();
    let whole = parse_only(&p, bytes.clone());

    let mut driver = match Buffered::new(ParserConfig::default(), &p, chunks[0]) {
        Ok(driver) => driver,
        Err(_) => return,
    };
    for chunk in &chunks[1..] {
        driver.feed(Feed::Chunk(*chunk));
    }
    driver.feed(Feed::Eof);

    let chunked = driver.to_result().map(|r| r.map(|v| v.clone()));
    match (whole, chunked) {
        (Ok(expected), Some(Ok(actual))) => assert_eq!(expected, actual),
        (Err(_), Some(Err(_))) => {}
        (Ok(_), Some(Err(_))) | (Err(_), Some(Ok(_))) => {
            panic!("buffered driver disagreed with parse_only on Done/Fail")
        }
        (_, None) => panic!("buffered driver never reached a terminal state after Eof"),
    }
});
