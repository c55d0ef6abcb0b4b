#![no_main]

use libfuzzer_sys::fuzz_target;
use trickle::{char, choice, many, parse_only, sep_by, take_while1};

/// A small representative grammar: `ident(=value)?` pairs separated by `;`.
/// Exercises sequencing, choice, and repetition together.
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

fuzz_target!(|data: &[u8]| {
    let p = grammar();
    let first = parse_only(&p, data.to_vec());
    let second = parse_only(&p, data.to_vec());
    assert_eq!(first, second, "parse_only must be a pure function of (p, s)");
});
