//! The suspend/resume evaluation machine.
//!
//! A [`Parser<T>`] is a reusable value wrapping a function from
//! `(input, pos, more)` to a [`State<T>`]. Combinators compose these
//! functions directly rather than threading explicit fail/success
//! continuations (the engine has no rank-2 polymorphism to lean on), which
//! is the "trampolined CPS" encoding described in the design notes: each
//! primitive returns a `State` and composition happens through
//! [`and_then`](crate::state::and_then), which the driver walks to a fixed
//! point.

use std::rc::Rc;

use crate::config::{ParserConfig, RecursionGuard};
use crate::error::ParseFailure;
use crate::input::{Input, More};
use crate::state::{Suspended, and_then};

pub use crate::state::State;

/// A reusable parser: a value, not a one-shot closure. Cloning is an `Rc`
/// bump, which is what lets `many`, `fix`, and `<|>` re-enter the same
/// parser repeatedly.
pub struct Parser<T>(Rc<dyn Fn(Input, usize, More) -> State<T>>);

impl<T> Parser<T> {
    pub fn new(run: impl Fn(Input, usize, More) -> State<T> + 'static) -> Self {
        Self(Rc::new(run))
    }

    pub fn run(&self, input: Input, pos: usize, more: More) -> State<T> {
        (self.0)(input, pos, more)
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Fails immediately with `message` and no marks.
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message: Rc<str> = Rc::from(message.into());
    Parser::new(move |input, pos, more| State::Fail(input, pos, more, Vec::new(), message.to_string()))
}

/// Succeeds immediately with `value` cloned for every invocation.
pub fn pure<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::new(move |input, pos, more| State::Done(input, pos, more, value.clone()))
}

/// Packages one suspension: captures the committed prefix (see
/// [`Suspended::consumed`]) and the uncommitted byte count, and on resume
/// verifies the new view has strictly grown before re-entering `retry`. A
/// shrunk input is a fatal driver error surfaced as a failure carrying
/// [`crate::error::Error::ShrunkInput`]'s message, since primitives only
/// communicate through `ParseFailure`/`State`, never `panic!`.
pub fn prompt<T: 'static>(
    input: Input,
    pos: usize,
    more: More,
    on_fail: impl Fn(Input, usize, More) -> State<T> + 'static,
    on_success: impl Fn(Input, usize, More) -> State<T> + 'static,
) -> State<T> {
    match more {
        More::Complete => on_fail(input, pos, more),
        More::Incomplete => {
            let previous_length = input.length();
            let consumed = input.consumed();
            State::Partial(Suspended::new(consumed, move |new_input, new_more| {
                if new_input.length() > previous_length {
                    on_success(new_input, pos, new_more)
                } else if new_input.length() < previous_length {
                    State::Fail(
                        new_input,
                        pos,
                        new_more,
                        Vec::new(),
                        crate::error::Error::ShrunkInput.to_string(),
                    )
                } else if new_more.is_complete() {
                    on_fail(new_input, pos, new_more)
                } else {
                    prompt(new_input, pos, new_more, on_fail, on_success)
                }
            }))
        }
    }
}

/// Requires `n` bytes starting at `pos`; suspends (possibly repeatedly) via
/// [`prompt`] until satisfied or `more` goes `Complete`.
pub fn ensure<T: 'static>(
    n: usize,
    input: Input,
    pos: usize,
    more: More,
    fail_message: Rc<str>,
    on_success: Rc<dyn Fn(Input, usize, More) -> State<T>>,
) -> State<T> {
    if pos + n <= input.length() {
        on_success(input, pos, more)
    } else {
        let message_for_prompt = fail_message.clone();
        prompt(
            input,
            pos,
            more,
            move |input, pos, more| State::Fail(input, pos, more, Vec::new(), message_for_prompt.to_string()),
            move |input, pos, more| ensure(n, input, pos, more, fail_message.clone(), on_success.clone()),
        )
    }
}

/// Scans forward non-destructively via [`Input::count_while`], prompting for
/// more input if the chunk ends mid-scan while `more = Incomplete`. Does
/// *not* advance `pos`; callers follow up with `advance` or a direct
/// substring read.
pub fn count_while<T: 'static>(
    input: Input,
    pos: usize,
    more: More,
    pred: Rc<dyn Fn(u8) -> bool>,
    accumulated: usize,
    on_success: Rc<dyn Fn(Input, usize, More, usize) -> State<T>>,
) -> State<T> {
    let scanned = input.count_while(pos, |byte| pred(byte));
    let total = accumulated + scanned;
    let reached_chunk_end = pos + scanned >= input.length();
    if reached_chunk_end && !more.is_complete() {
        prompt(
            input,
            pos,
            more,
            move |input, pos, more| on_success(input, pos, more, total),
            move |input, new_pos, more| {
                let _ = new_pos;
                count_while(input, pos, more, pred.clone(), total, on_success.clone())
            },
        )
    } else {
        on_success(input, pos, more, total)
    }
}

/// Chains `p` into `f`, threading any suspension transparently. The
/// canonical `>>=`.
pub fn bind<T, U>(p: Parser<T>, f: impl Fn(T) -> Parser<U> + 'static) -> Parser<U>
where
    T: 'static,
    U: 'static,
{
    Parser::new(move |input, pos, more| {
        let state = p.run(input, pos, more);
        and_then(state, move |input, pos, more, value| f(value).run(input, pos, more))
    })
}

/// Maps a pure function over a parser's result.
pub fn map<T, U>(p: Parser<T>, f: impl Fn(T) -> U + 'static) -> Parser<U>
where
    T: 'static,
    U: 'static,
{
    let f: Rc<dyn Fn(T) -> U> = Rc::new(f);
    Parser::new(move |input, pos, more| {
        let state = p.run(input, pos, more);
        let f = f.clone();
        and_then(state, move |input, pos, more, value| State::Done(input, pos, more, f(value)))
    })
}

/// Sets `input.committed := pos`. After this, no enclosing `<|>` may rewind
/// past `pos`.
pub fn commit() -> Parser<()> {
    Parser::new(|input, pos, more| {
        let input = input.commit(pos);
        State::Done(input, pos, more, ())
    })
}

/// Reports the current absolute position without consuming anything.
pub fn pos() -> Parser<usize> {
    Parser::new(|input, pos, more| State::Done(input, pos, more, pos))
}

/// `p <|> q`: biased choice bounded by `commit`.
///
/// If `p` fails at a position still ahead of `input.committed`, `q` is
/// re-invoked at the position where `<|>` was entered, using the `more`
/// flag observed at the point of failure (which may differ from the one
/// seen on entry, since `p` may have suspended one or more times).
pub fn or<T: 'static>(p: Parser<T>, q: Parser<T>) -> Parser<T> {
    Parser::new(move |input, pos, more| {
        let original_pos = pos;
        let q = q.clone();
        choice_resume(p.run(input, pos, more), original_pos, q)
    })
}

fn choice_resume<T: 'static>(state: State<T>, original_pos: usize, q: Parser<T>) -> State<T> {
    match state {
        State::Done(input, pos, more, value) => State::Done(input, pos, more, value),
        State::Fail(input, fail_pos, more, marks, message) => {
            if original_pos < input.committed() {
                State::Fail(input, fail_pos, more, marks, message)
            } else {
                q.run(input, original_pos, more)
            }
        }
        State::Partial(suspended) => State::Partial(Suspended::new(suspended.consumed, move |input, more| {
            choice_resume(suspended.resume(input, more), original_pos, q)
        })),
    }
}

/// `p <?> mark`: prepends `mark` to the failure's mark trail, leaving
/// success and suspension untouched.
pub fn label<T: 'static>(p: Parser<T>, mark: impl Into<String>) -> Parser<T> {
    let mark: Rc<str> = Rc::from(mark.into());
    Parser::new(move |input, pos, more| label_resume(p.run(input, pos, more), mark.clone()))
}

fn label_resume<T: 'static>(state: State<T>, mark: Rc<str>) -> State<T> {
    match state {
        State::Done(input, pos, more, value) => State::Done(input, pos, more, value),
        State::Fail(input, pos, more, mut marks, message) => {
            marks.insert(0, mark.to_string());
            State::Fail(input, pos, more, marks, message)
        }
        State::Partial(suspended) => State::Partial(Suspended::new(suspended.consumed, move |input, more| {
            label_resume(suspended.resume(input, more), mark)
        })),
    }
}

/// Ties a recursive knot lazily: `f` receives a handle to the
/// not-yet-fully-built parser and must return the grammar that uses it.
/// Every invocation of the tied knot checks a [`RecursionGuard`] against
/// `config.max_recursion_depth`, surfacing a [`ParseFailure`] rather than
/// overflowing the stack on a pathological grammar (scenario S8).
pub fn fix<T: 'static>(
    config: ParserConfig,
    f: impl Fn(Parser<T>) -> Parser<T> + 'static,
) -> Parser<T> {
    use std::cell::RefCell;

    struct Knot<T> {
        parser: RefCell<Option<Parser<T>>>,
        guard: RefCell<RecursionGuard>,
    }

    let knot: Rc<Knot<T>> = Rc::new(Knot {
        parser: RefCell::new(None),
        guard: RefCell::new(RecursionGuard::new()),
    });

    let handle = {
        let knot = knot.clone();
        let limit = config.max_recursion_depth;
        Parser::new(move |input, pos, more| {
            let entered = knot.guard.borrow_mut().enter(limit);
            if let Err(error) = entered {
                return State::Fail(input, pos, more, Vec::new(), error.to_string());
            }
            let parser = knot.parser.borrow().clone();
            let Some(parser) = parser else {
                return State::Fail(
                    input,
                    pos,
                    more,
                    Vec::new(),
                    "fix: recursive parser invoked before it was tied".to_string(),
                );
            };
            let state = parser.run(input, pos, more);
            knot.guard.borrow_mut().exit();
            state
        })
    };

    let tied = f(handle);
    *knot.parser.borrow_mut() = Some(tied.clone());
    tied
}

/// Converts a [`ParseFailure`] into the `(marks, message)` pair `Fail`
/// carries; used by drivers when projecting a final state.
pub fn failure_of(marks: Vec<String>, message: String) -> ParseFailure {
    ParseFailure { marks, message }
}
