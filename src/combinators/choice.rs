//! Biased alternatives: `<|>`, `choice`, `<?>`, and `option`.

use crate::engine::{Parser, or, pure};

/// `p <|> q`. See [`crate::engine::or`] for the suspend-aware
/// implementation; re-exported here at the combinator-surface level named
/// by the data model.
pub fn alt<T: 'static>(p: Parser<T>, q: Parser<T>) -> Parser<T> {
    or(p, q)
}

/// Tries each parser in order, left-biased, returning the first success.
/// Fails with the *last* alternative's failure if none match, matching a
/// left fold of `<|>`.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let mut iter = parsers.into_iter();
    let Some(first) = iter.next() else {
        return crate::engine::fail("choice: empty alternative list");
    };
    iter.fold(first, |acc, next| or(acc, next))
}

/// `p` if it succeeds, else `default` without consuming input or failing.
pub fn option<T: Clone + 'static>(p: Parser<T>, default: T) -> Parser<T> {
    or(p, pure(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::primitives::char;
    use crate::engine::{State, fail};
    use crate::input::{Input, More, Source};

    fn run<T>(p: &Parser<T>, bytes: &[u8]) -> State<T> {
        p.run(Input::create(0, Source::from(bytes.to_vec())), 0, More::Complete)
    }

    #[test]
    fn choice_tries_alternatives_left_to_right() {
        let p = choice(vec![char(b'a'), char(b'b'), char(b'c')]);
        match run(&p, b"c") {
            State::Done(_, _, _, value) => assert_eq!(value, b'c'),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn option_falls_back_without_failing() {
        let p: Parser<u8> = option(fail("never"), b'z');
        match run(&p, b"") {
            State::Done(_, _, _, value) => assert_eq!(value, b'z'),
            _ => panic!("expected Done"),
        }
    }
}
