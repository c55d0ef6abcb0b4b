//! The terminal result of running a parser, and the suspension value that
//! lets a parse pause mid-grammar.

use crate::input::{Input, More};

/// The result of driving a parser as far as it will go without more input.
pub enum State<T> {
    /// Parsing succeeded; `pos` has advanced past the consumed prefix.
    Done(Input, usize, More, T),
    /// Parsing failed at `pos`; `marks` is outermost-first.
    Fail(Input, usize, More, Vec<String>, String),
    /// The parser needs more bytes than the current view holds.
    Partial(Suspended<T>),
}

/// A first-class suspension: the work still to do, plus how many bytes of
/// the committed prefix the driver may now discard.
pub struct Suspended<T> {
    /// Bytes of the committed prefix safe to drop from a buffered driver's
    /// backing store. Intentionally *not* `pos - initial_committed`: bytes
    /// between `committed` and `pos` may still be needed by an enclosing
    /// `<|>` if this suspension's primitive ultimately fails (see
    /// `DESIGN.md`, "resuming across a suspended choice").
    pub consumed: usize,
    resume: Box<dyn FnOnce(Input, More) -> State<T>>,
}

impl<T> Suspended<T> {
    pub fn new(consumed: usize, resume: impl FnOnce(Input, More) -> State<T> + 'static) -> Self {
        Self {
            consumed,
            resume: Box::new(resume),
        }
    }

    pub fn resume(self, input: Input, more: More) -> State<T> {
        (self.resume)(input, more)
    }
}

/// Chains `state` into `cont`, transparently threading any suspension
/// through: the inner primitive's `Partial` closes over `cont`, so resuming
/// it picks up exactly where the bind left off.
pub fn and_then<T, U>(
    state: State<T>,
    cont: impl FnOnce(Input, usize, More, T) -> State<U> + 'static,
) -> State<U>
where
    T: 'static,
    U: 'static,
{
    match state {
        State::Done(input, pos, more, value) => cont(input, pos, more, value),
        State::Fail(input, pos, more, marks, message) => State::Fail(input, pos, more, marks, message),
        State::Partial(suspended) => State::Partial(Suspended::new(
            suspended.consumed,
            move |input, more| and_then(suspended.resume(input, more), cont),
        )),
    }
}
