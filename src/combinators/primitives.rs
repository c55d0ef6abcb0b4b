//! Leaf parsers: single bytes, runs of bytes, and position queries.

use std::rc::Rc;

use crate::engine::{Parser, State, count_while, ensure};
use crate::input::More;

/// Succeeds with the next byte without consuming it. Fails (without
/// suspending past end-of-input on `Complete`) if the input is exhausted.
pub fn peek_char() -> Parser<u8> {
    Parser::new(|input, pos, more| {
        let message: Rc<str> = Rc::from("peek_char");
        ensure(
            1,
            input,
            pos,
            more,
            message,
            Rc::new(|input, pos, more| {
                let byte = input.get(pos);
                State::Done(input, pos, more, byte)
            }),
        )
    })
}

/// Like [`peek_char`], but the failure message is always `"peek_char_fail"`,
/// including on the `Complete`-at-eof branch that the generic primitive
/// path would otherwise report as `"peek_char"` (see `DESIGN.md`, open
/// question on the source's inconsistent message for this primitive).
pub fn peek_char_fail() -> Parser<u8> {
    Parser::new(|input, pos, more| {
        let message: Rc<str> = Rc::from("peek_char_fail");
        ensure(
            1,
            input,
            pos,
            more,
            message,
            Rc::new(|input, pos, more| {
                let byte = input.get(pos);
                State::Done(input, pos, more, byte)
            }),
        )
    })
}

/// Peeks at the next `n` bytes without consuming them.
pub fn peek_string(n: usize) -> Parser<Vec<u8>> {
    Parser::new(move |input, pos, more| {
        let message: Rc<str> = Rc::from("peek_string");
        ensure(
            n,
            input,
            pos,
            more,
            message,
            Rc::new(move |input, pos, more| {
                let bytes = input.substring(pos, n).to_vec();
                State::Done(input, pos, more, bytes)
            }),
        )
    })
}

/// Matches a single byte exactly. The failure message is the byte itself,
/// rendered as a character.
pub fn char(c: u8) -> Parser<u8> {
    Parser::new(move |input, pos, more| {
        let message: Rc<str> = Rc::from(format!("{}", c as char));
        ensure(
            1,
            input,
            pos,
            more,
            message.clone(),
            Rc::new(move |input, pos, more| {
                let byte = input.get(pos);
                if byte == c {
                    State::Done(input, pos + 1, more, byte)
                } else {
                    State::Fail(input, pos, more, Vec::new(), message.to_string())
                }
            }),
        )
    })
}

/// Matches any single byte other than `c`.
pub fn not_char(c: u8) -> Parser<u8> {
    Parser::new(move |input, pos, more| {
        let message: Rc<str> = Rc::from(format!("not {}", c as char));
        ensure(
            1,
            input,
            pos,
            more,
            message.clone(),
            Rc::new(move |input, pos, more| {
                let byte = input.get(pos);
                if byte != c {
                    State::Done(input, pos + 1, more, byte)
                } else {
                    State::Fail(input, pos, more, Vec::new(), message.to_string())
                }
            }),
        )
    })
}

/// Matches any single byte.
pub fn any_char() -> Parser<u8> {
    Parser::new(|input, pos, more| {
        let message: Rc<str> = Rc::from("any_char");
        ensure(
            1,
            input,
            pos,
            more,
            message,
            Rc::new(|input, pos, more| {
                let byte = input.get(pos);
                State::Done(input, pos + 1, more, byte)
            }),
        )
    })
}

/// Matches a single byte satisfying `pred`.
pub fn satisfy(pred: impl Fn(u8) -> bool + 'static) -> Parser<u8> {
    let pred: Rc<dyn Fn(u8) -> bool> = Rc::new(pred);
    Parser::new(move |input, pos, more| {
        let pred = pred.clone();
        let message: Rc<str> = Rc::from("satisfy");
        ensure(
            1,
            input,
            pos,
            more,
            message.clone(),
            Rc::new(move |input, pos, more| {
                let byte = input.get(pos);
                if pred(byte) {
                    State::Done(input, pos + 1, more, byte)
                } else {
                    State::Fail(input, pos, more, Vec::new(), message.to_string())
                }
            }),
        )
    })
}

/// Like [`satisfy`], but discards the matched byte.
pub fn skip(pred: impl Fn(u8) -> bool + 'static) -> Parser<()> {
    crate::engine::map(satisfy(pred), |_| ())
}

/// Matches an exact byte sequence.
pub fn string(s: impl Into<Vec<u8>>) -> Parser<Vec<u8>> {
    let wanted: Rc<[u8]> = Rc::from(s.into().into_boxed_slice());
    Parser::new(move |input, pos, more| {
        let wanted = wanted.clone();
        let message: Rc<str> = Rc::from(format!("string {:?}", String::from_utf8_lossy(&wanted)));
        let n = wanted.len();
        ensure(
            n,
            input,
            pos,
            more,
            message.clone(),
            Rc::new(move |input, pos, more| {
                let actual = input.substring(pos, n);
                if actual == &*wanted {
                    State::Done(input, pos + n, more, actual.to_vec())
                } else {
                    State::Fail(input, pos, more, Vec::new(), message.to_string())
                }
            }),
        )
    })
}

/// Matches a byte sequence case-insensitively, folding ASCII letters only
/// (no locale-dependent case folding; see `DESIGN.md`).
pub fn string_ci(s: impl Into<Vec<u8>>) -> Parser<Vec<u8>> {
    let wanted: Rc<[u8]> = Rc::from(s.into().into_boxed_slice());
    Parser::new(move |input, pos, more| {
        let wanted = wanted.clone();
        let message: Rc<str> = Rc::from("string_ci");
        let n = wanted.len();
        ensure(
            n,
            input,
            pos,
            more,
            message.clone(),
            Rc::new(move |input, pos, more| {
                let actual = input.substring(pos, n);
                let matches = actual
                    .iter()
                    .zip(wanted.iter())
                    .all(|(a, b)| a.to_ascii_lowercase() == b.to_ascii_lowercase());
                if matches {
                    State::Done(input, pos + n, more, actual.to_vec())
                } else {
                    State::Fail(input, pos, more, Vec::new(), message.to_string())
                }
            }),
        )
    })
}

/// Takes exactly `n` bytes.
pub fn take(n: usize) -> Parser<Vec<u8>> {
    Parser::new(move |input, pos, more| {
        let message: Rc<str> = Rc::from("take");
        ensure(
            n,
            input,
            pos,
            more,
            message,
            Rc::new(move |input, pos, more| {
                let bytes = input.substring(pos, n).to_vec();
                State::Done(input, pos + n, more, bytes)
            }),
        )
    })
}

/// Takes the longest run of bytes satisfying `pred`, possibly empty.
pub fn take_while(pred: impl Fn(u8) -> bool + 'static) -> Parser<Vec<u8>> {
    let pred: Rc<dyn Fn(u8) -> bool> = Rc::new(pred);
    Parser::new(move |input, pos, more| {
        count_while(
            input,
            pos,
            more,
            pred.clone(),
            0,
            Rc::new(move |input, pos, more, count| {
                let bytes = input.substring(pos, count).to_vec();
                State::Done(input, pos + count, more, bytes)
            }),
        )
    })
}

/// Like [`take_while`], but requires at least one matching byte.
pub fn take_while1(pred: impl Fn(u8) -> bool + 'static) -> Parser<Vec<u8>> {
    let pred: Rc<dyn Fn(u8) -> bool> = Rc::new(pred);
    Parser::new(move |input, pos, more| {
        let pred = pred.clone();
        count_while(
            input,
            pos,
            more,
            pred,
            0,
            Rc::new(move |input, pos, more, count| {
                if count == 0 {
                    State::Fail(input, pos, more, Vec::new(), "take_while1".to_string())
                } else {
                    let bytes = input.substring(pos, count).to_vec();
                    State::Done(input, pos + count, more, bytes)
                }
            }),
        )
    })
}

/// Takes bytes until `pred` holds (the matching byte is not consumed).
pub fn take_till(pred: impl Fn(u8) -> bool + 'static) -> Parser<Vec<u8>> {
    take_while(move |b| !pred(b))
}

/// Discards the longest run of bytes satisfying `pred`.
pub fn skip_while(pred: impl Fn(u8) -> bool + 'static) -> Parser<()> {
    crate::engine::map(take_while(pred), |_| ())
}

/// Takes every remaining byte, however many arrive before `end_of_input`.
pub fn take_rest() -> Parser<Vec<u8>> {
    take_while(|_| true)
}

/// Advances `n` bytes without inspecting them. Fails if fewer than `n`
/// bytes are available even after `more` goes `Complete`.
pub fn advance(n: usize) -> Parser<()> {
    Parser::new(move |input, pos, more| {
        let message: Rc<str> = Rc::from("advance");
        ensure(
            n,
            input,
            pos,
            more,
            message,
            Rc::new(move |input, pos, more| State::Done(input, pos + n, more, ())),
        )
    })
}

/// Succeeds iff every byte has been consumed and no more will arrive.
pub fn end_of_input() -> Parser<()> {
    Parser::new(|input, pos, more| {
        if pos < input.length() {
            // Bytes remain right now, regardless of `more`: the "every byte
            // consumed" half of the contract is already false.
            return State::Fail(input, pos, more, Vec::new(), "end_of_input".to_string());
        }
        if more.is_complete() {
            return State::Done(input, pos, more, ());
        }
        // Every currently-available byte is consumed, but more may still
        // arrive: suspend until it's known whether that's true.
        crate::engine::prompt(
            input,
            pos,
            more,
            |input, pos, more| State::Done(input, pos, more, ()),
            |input, pos, more| State::Fail(input, pos, more, Vec::new(), "end_of_input".to_string()),
        )
    })
}

/// Matches a line terminator: `"\n"` or `"\r\n"`.
pub fn end_of_line() -> Parser<()> {
    Parser::new(|input, pos, more| {
        let message: Rc<str> = Rc::from("end_of_line");
        ensure(
            1,
            input,
            pos,
            more,
            message,
            Rc::new(|input, pos, more| {
                if input.get(pos) == b'\n' {
                    return State::Done(input, pos + 1, more, ());
                }
                if input.get(pos) == b'\r' {
                    let message: Rc<str> = Rc::from("end_of_line");
                    return ensure(
                        2,
                        input,
                        pos,
                        more,
                        message,
                        Rc::new(|input, pos, more| {
                            if input.get(pos + 1) == b'\n' {
                                State::Done(input, pos + 2, more, ())
                            } else {
                                State::Fail(input, pos, more, Vec::new(), "end_of_line".to_string())
                            }
                        }),
                    );
                }
                State::Fail(input, pos, more, Vec::new(), "end_of_line".to_string())
            }),
        )
    })
}

/// Reports the number of bytes available in the current chunk without
/// consuming or prompting for more.
pub fn available() -> Parser<usize> {
    Parser::new(|input, pos, more| State::Done(input, pos, more, input.length() - pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Input, Source};
    use test_case::test_case;

    fn run_complete<T>(p: &Parser<T>, bytes: &[u8]) -> State<T> {
        let input = Input::create(0, Source::from(bytes.to_vec()));
        p.run(input, 0, More::Complete)
    }

    #[test_case(b"abc", b'a', true; "matches first byte")]
    #[test_case(b"abc", b'x', false; "rejects mismatch")]
    fn char_matches_expected_byte(bytes: &[u8], expected: u8, should_succeed: bool) {
        match run_complete(&char(expected), bytes) {
            State::Done(_, pos, _, value) => {
                assert!(should_succeed);
                assert_eq!(value, expected);
                assert_eq!(pos, 1);
            }
            State::Fail(..) => assert!(!should_succeed),
            State::Partial(_) => panic!("did not expect suspension on Complete"),
        }
    }

    #[test]
    fn take_while1_requires_at_least_one_match() {
        match run_complete(&take_while1(|b| b.is_ascii_digit()), b"123abc") {
            State::Done(_, pos, _, value) => {
                assert_eq!(value, b"123");
                assert_eq!(pos, 3);
            }
            _ => panic!("expected Done"),
        }
        match run_complete(&take_while1(|b| b.is_ascii_digit()), b"abc") {
            State::Fail(_, _, _, _, message) => assert_eq!(message, "take_while1"),
            _ => panic!("expected Fail"),
        }
    }

    #[test]
    fn string_matches_exact_bytes() {
        match run_complete(&string(b"ab".to_vec()), b"abcdef") {
            State::Done(_, pos, _, value) => {
                assert_eq!(value, b"ab");
                assert_eq!(pos, 2);
            }
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn string_ci_folds_ascii_case_only() {
        match run_complete(&string_ci(b"AbC".to_vec()), b"abc") {
            State::Done(..) => {}
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn end_of_input_succeeds_only_when_fully_consumed_and_complete() {
        match run_complete(&end_of_input(), b"") {
            State::Done(..) => {}
            _ => panic!("expected Done on empty complete input"),
        }
        match run_complete(&end_of_input(), b"x") {
            State::Fail(..) => {}
            _ => panic!("expected Fail with bytes remaining"),
        }
    }

    #[test]
    fn end_of_line_matches_both_lf_and_crlf() {
        match run_complete(&end_of_line(), b"\nrest") {
            State::Done(_, pos, ..) => assert_eq!(pos, 1),
            _ => panic!("expected Done"),
        }
        match run_complete(&end_of_line(), b"\r\nrest") {
            State::Done(_, pos, ..) => assert_eq!(pos, 2),
            _ => panic!("expected Done"),
        }
    }
}
