//! Unbuffered and buffered drivers.
//!
//! The unbuffered driver runs a parser once against a caller-supplied view;
//! manual resumption is the caller's responsibility (the engine's
//! `Suspended::resume` is public for exactly that). The buffered driver owns
//! a [`Buffer`] and threads it back into a fresh [`Input`] on every
//! resumption, which is what lets a grammar be fed chunk by chunk.

use crate::buffer::{Buffer, Unconsumed};
use crate::config::ParserConfig;
use crate::engine::{Parser, State};
use crate::error::{Error, ParseFailure};
use crate::input::{Input, More, Source};
use crate::state::Suspended;

/// Runs `p` against `input` once, with `more = Incomplete`. Returns the raw
/// engine state; a `Partial` is handed back to the caller to resume
/// manually.
pub fn parse<T: 'static>(p: &Parser<T>, input: impl Into<Source>) -> State<T> {
    let view = Input::create(0, input.into());
    p.run(view, 0, More::Incomplete)
}

/// Runs `p` against `input` with `more = Complete` and projects the result:
/// `Done -> Ok`, anything else -> `Err`. A `Partial` surviving `Complete`
/// input is itself folded into the error, since the engine's own contract
/// guarantees primitives only suspend under `Incomplete`.
pub fn parse_only<T: 'static>(p: &Parser<T>, input: impl Into<Source>) -> Result<T, ParseFailure> {
    let view = Input::create(0, input.into());
    match p.run(view, 0, More::Complete) {
        State::Done(_, _, _, value) => Ok(value),
        State::Fail(_, _, _, marks, message) => Err(ParseFailure { marks, message }),
        State::Partial(_) => Err(ParseFailure::new(
            "parse_only: parser suspended under Complete input",
        )),
    }
}

/// One chunk of fed input, or the end-of-stream marker.
pub enum Feed<'a> {
    Chunk(&'a [u8]),
    Eof,
}

enum Terminal<T> {
    Done(T),
    Fail(Vec<String>, String),
}

/// The buffered driver: owns a growable [`Buffer`] and re-enters the
/// parser's suspension on every [`Buffered::feed`].
pub struct Buffered<T> {
    buffer: Buffer,
    initial_committed: usize,
    pending: Option<Suspended<T>>,
    terminal: Option<Terminal<T>>,
    unconsumed: Option<Unconsumed>,
}

impl<T: 'static> Buffered<T> {
    /// Feeds `initial_input`, pre-sizing the buffer to
    /// `max(config.initial_buffer_size, initial_input.len())`, and runs `p`
    /// once. `config.initial_buffer_size < 1` is a hard error.
    pub fn new(config: ParserConfig, p: &Parser<T>, initial_input: &[u8]) -> Result<Self, Error> {
        if config.initial_buffer_size < 1 {
            return Err(Error::EmptyBuffer);
        }
        let capacity = config.initial_buffer_size.max(initial_input.len()).max(1);
        let mut buffer = Buffer::with_capacity(capacity)?;
        buffer.feed(initial_input);

        let mut driver = Self {
            buffer,
            initial_committed: 0,
            pending: None,
            terminal: None,
            unconsumed: None,
        };
        let view = Input::create(0, Source::from(driver.buffer.view().to_vec()));
        let state = p.run(view, 0, More::Incomplete);
        driver.absorb(state);
        Ok(driver)
    }

    /// `true` while the parser is still suspended awaiting input.
    pub fn is_partial(&self) -> bool {
        self.pending.is_some()
    }

    /// Feeds another chunk, or signals end-of-stream. A no-op if the parser
    /// has already reached `Done`/`Fail` and `input` is [`Feed::Eof`];
    /// extends the exported unconsumed tail (without re-running the parser)
    /// if `input` is a chunk arriving after a terminal state.
    pub fn feed(&mut self, input: Feed<'_>) {
        let Some(pending) = self.pending.take() else {
            if let Feed::Chunk(bytes) = input {
                self.buffer.feed(bytes);
                if let Some(unconsumed) = self.unconsumed.as_mut() {
                    *unconsumed = self.buffer.unconsumed();
                }
            }
            return;
        };

        let (more, view) = match input {
            Feed::Chunk(bytes) => {
                self.buffer.feed(bytes);
                (More::Incomplete, self.buffer.view().to_vec())
            }
            Feed::Eof => (More::Complete, self.buffer.view().to_vec()),
        };
        let view = Input::create(self.initial_committed, Source::from(view));
        let state = pending.resume(view, more);
        self.absorb(state);
    }

    fn absorb(&mut self, state: State<T>) {
        match state {
            State::Partial(suspended) => {
                self.buffer.consume(suspended.consumed);
                self.initial_committed += suspended.consumed;
                self.pending = Some(suspended);
            }
            State::Done(input, pos, _, value) => {
                self.finish_terminal(&input, pos);
                self.terminal = Some(Terminal::Done(value));
            }
            State::Fail(input, pos, _, marks, message) => {
                self.finish_terminal(&input, pos);
                self.terminal = Some(Terminal::Fail(marks, message));
            }
        }
    }

    fn finish_terminal(&mut self, input: &Input, pos: usize) {
        let consumed_to_pos = pos.saturating_sub(input.initial_committed());
        self.buffer.consume(consumed_to_pos);
        self.unconsumed = Some(self.buffer.unconsumed());
    }

    pub fn to_option(&self) -> Option<&T> {
        match &self.terminal {
            Some(Terminal::Done(value)) => Some(value),
            _ => None,
        }
    }

    pub fn to_result(&self) -> Option<Result<&T, ParseFailure>> {
        match &self.terminal {
            Some(Terminal::Done(value)) => Some(Ok(value)),
            Some(Terminal::Fail(marks, message)) => Some(Err(ParseFailure {
                marks: marks.clone(),
                message: message.clone(),
            })),
            None => None,
        }
    }

    pub fn to_unconsumed(&self) -> Option<&Unconsumed> {
        self.unconsumed.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::primitives::{char, string};
    use crate::combinators::sequence::lift2;

    #[test]
    fn unbuffered_parse_only_matches_s1() {
        let p = lift2(|a, b| (a, b), char(b'a'), char(b'b'));
        assert_eq!(parse_only(&p, "ab").unwrap(), (b'a', b'b'));
        let err = parse_only(&p, "ac").unwrap_err();
        assert_eq!(err.message, "b");
    }

    #[test]
    fn buffered_driver_assembles_string_across_chunks_s2() {
        let config = ParserConfig::default();
        let p = string(b"ab".to_vec());
        let mut driver = Buffered::new(config, &p, b"a").unwrap();
        assert!(driver.is_partial());
        driver.feed(Feed::Chunk(b"b"));
        driver.feed(Feed::Eof);
        assert!(!driver.is_partial());
        assert_eq!(driver.to_option(), Some(&b"ab".to_vec()));
        assert_eq!(driver.to_unconsumed().unwrap().length, 0);
    }

    #[test]
    fn buffered_driver_byte_at_a_time_respects_commit_s5() {
        let config = ParserConfig::default();
        let ab_then_cd = string(b"ab".to_vec())
            .then(crate::engine::commit())
            .then(string(b"cd".to_vec()));
        let p = ab_then_cd.or(string(b"abce".to_vec()));

        let mut driver = Buffered::new(config, &p, &[]).unwrap();
        for byte in b"abce" {
            driver.feed(Feed::Chunk(&[*byte]));
        }
        driver.feed(Feed::Eof);
        assert!(!driver.is_partial());
        match driver.to_result().unwrap() {
            Err(failure) => assert_eq!(failure.message, "string \"cd\""),
            Ok(_) => panic!("expected Fail once commit forecloses the second alternative"),
        }
    }
}
