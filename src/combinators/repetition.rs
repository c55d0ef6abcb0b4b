//! Repetition: `many`, `many1`, `many_till`, `sep_by`, `sep_by1`, `count`,
//! `skip_many`, `skip_many1`, `list`, and the `fix` fixpoint combinator.
//!
//! Every repetition here is built from the same fixpoint-plus-choice idiom
//! the data model names: `many p = fix (m => cons p m <|> return [])`. None
//! of them insert an implicit `commit` — a long-running `many` without one
//! pins arbitrary input in the buffer until the caller commits explicitly.

use crate::combinators::sequence::lift2;
use crate::config::ParserConfig;
use crate::error::Error;
use crate::engine::{Parser, fix, pure};

fn cons<T>(x: T, mut xs: Vec<T>) -> Vec<T> {
    xs.insert(0, x);
    xs
}

/// `fix (m => lift2(cons, p, m) <|> return [])`, using the default
/// [`ParserConfig`] for the recursion guard. See [`many_with_config`] to
/// supply limits explicitly.
pub fn many<T: Clone + 'static>(p: Parser<T>) -> Parser<Vec<T>> {
    many_with_config(ParserConfig::default(), p)
}

pub fn many_with_config<T: Clone + 'static>(config: ParserConfig, p: Parser<T>) -> Parser<Vec<T>> {
    fix(config, move |m| {
        lift2(cons, p.clone(), m).or(pure(Vec::new()))
    })
}

/// `lift2(cons, p, many(p))`: at least one match required.
pub fn many1<T: Clone + 'static>(p: Parser<T>) -> Parser<Vec<T>> {
    lift2(cons, p.clone(), many(p))
}

/// Repeats `p` until `end` matches, discarding `end`'s value. `end` is
/// tried first on each iteration (biased choice), so a `p` that could also
/// match where `end` matches will never shadow the terminator.
pub fn many_till<T: Clone + 'static, E: 'static>(p: Parser<T>, end: Parser<E>) -> Parser<Vec<T>> {
    many_till_with_config(ParserConfig::default(), p, end)
}

pub fn many_till_with_config<T: Clone + 'static, E: 'static>(
    config: ParserConfig,
    p: Parser<T>,
    end: Parser<E>,
) -> Parser<Vec<T>> {
    fix(config, move |m| {
        let stop = end.clone().map(|_| Vec::new());
        stop.or(lift2(cons, p.clone(), m))
    })
}

/// `option(sep_by1(sep, p), vec![])`: zero or more `p` separated by `sep`,
/// `Ok([])` on empty input.
pub fn sep_by<T: Clone + 'static, S: 'static>(sep: Parser<S>, p: Parser<T>) -> Parser<Vec<T>> {
    sep_by1(sep, p).or(pure(Vec::new()))
}

/// At least one `p` separated by `sep`.
pub fn sep_by1<T: Clone + 'static, S: 'static>(sep: Parser<S>, p: Parser<T>) -> Parser<Vec<T>> {
    let rest = many(sep.then(p.clone()));
    lift2(cons, p, rest)
}

/// `n`-fold `lift2(cons, p, ...)` onto `return([])`. A negative `n` is a
/// programmer error surfaced as [`Error::NegativeCount`], not a
/// [`crate::error::ParseFailure`]: it can never be satisfied by any input.
pub fn count<T: Clone + 'static>(n: i64, p: Parser<T>) -> Result<Parser<Vec<T>>, Error> {
    if n < 0 {
        return Err(Error::NegativeCount);
    }
    let mut acc: Parser<Vec<T>> = pure(Vec::new());
    for _ in 0..n {
        acc = lift2(cons, p.clone(), acc);
    }
    Ok(acc)
}

/// Like [`many`], but discards the accumulated values.
pub fn skip_many<T: Clone + 'static>(p: Parser<T>) -> Parser<()> {
    many(p).map(|_| ())
}

/// Like [`many1`], but discards the accumulated values.
pub fn skip_many1<T: Clone + 'static>(p: Parser<T>) -> Parser<()> {
    many1(p).map(|_| ())
}

/// Runs each parser in `parsers` in sequence, collecting their results in
/// order.
pub fn list<T: Clone + 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    parsers
        .into_iter()
        .rev()
        .fold(pure(Vec::new()), |acc, p| lift2(cons, p, acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::primitives::char;
    use crate::engine::State;
    use crate::input::{Input, More, Source};

    fn run<T>(p: &Parser<T>, bytes: &[u8]) -> State<T> {
        p.run(Input::create(0, Source::from(bytes.to_vec())), 0, More::Complete)
    }

    #[test]
    fn many_collects_zero_or_more_in_order() {
        match run(&many(char(b'a')), b"aaab") {
            State::Done(_, pos, _, value) => {
                assert_eq!(value, vec![b'a', b'a', b'a']);
                assert_eq!(pos, 3);
            }
            _ => panic!("expected Done"),
        }
        match run(&many(char(b'a')), b"b") {
            State::Done(_, pos, _, value) => {
                assert!(value.is_empty());
                assert_eq!(pos, 0);
            }
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn many1_requires_at_least_one() {
        match run(&many1(char(b'a')), b"b") {
            State::Fail(..) => {}
            _ => panic!("expected Fail"),
        }
    }

    #[test]
    fn sep_by_handles_empty_input_and_separated_items() {
        match run(&sep_by(char(b','), crate::combinators::primitives::take_while1(|b| b != b',')), b"a,bb,ccc") {
            State::Done(_, _, _, value) => {
                assert_eq!(
                    value,
                    vec![b"a".to_vec(), b"bb".to_vec(), b"ccc".to_vec()]
                );
            }
            _ => panic!("expected Done"),
        }
        let empty: Parser<Vec<u8>> = sep_by(char(b','), char(b'a'));
        match run(&empty, b"") {
            State::Done(_, _, _, value) => assert!(value.is_empty()),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn count_collects_exactly_n() {
        let p = count(3, char(b'a')).expect("non-negative count");
        match run(&p, b"aaab") {
            State::Done(_, pos, _, value) => {
                assert_eq!(value, vec![b'a', b'a', b'a']);
                assert_eq!(pos, 3);
            }
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn count_rejects_negative_n() {
        assert_eq!(count(-1, char(b'a')).unwrap_err(), Error::NegativeCount);
    }

    #[test]
    fn many_till_stops_at_the_terminator() {
        let p = many_till(char(b'a'), char(b';'));
        match run(&p, b"aaa;") {
            State::Done(_, pos, _, value) => {
                assert_eq!(value, vec![b'a', b'a', b'a']);
                assert_eq!(pos, 4);
            }
            _ => panic!("expected Done"),
        }
    }
}
