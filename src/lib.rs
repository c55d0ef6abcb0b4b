#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! `trickle` is an incremental, streaming parser-combinator engine: a
//! grammar built from [`engine::Parser`] values can be driven one byte chunk
//! at a time, suspending mid-primitive whenever a chunk runs out and
//! resuming transparently once more bytes arrive.
//!
//! Three layers:
//! - [`engine`] and [`state`] hold the suspend/resume machine `Parser<T>`
//!   runs on.
//! - [`combinators`] is the public grammar-building algebra: primitives,
//!   sequencing, choice, and repetition.
//! - [`driver`] runs a built grammar, either against one complete view or
//!   incrementally against a [`buffer::Buffer`]-backed stream.

mod buffer;
pub mod combinators;
mod config;
pub mod decode;
mod driver;
mod engine;
mod error;
mod input;
mod state;

pub use buffer::{Buffer, Unconsumed};
pub use config::{ParserConfig, RecursionGuard};
pub use driver::{Buffered, Feed, parse, parse_only};
pub use engine::{Parser, bind, commit, fail, fix, label, map, or, pos, pure};
pub use error::{Error, ParseFailure};
pub use input::{Input, More, Source};
pub use state::{State, Suspended, and_then};

pub use combinators::choice::{alt, choice, option};
pub use combinators::primitives::{
    advance, any_char, available, char, end_of_input, end_of_line, not_char, peek_char,
    peek_char_fail, peek_string, satisfy, skip, skip_while, string, string_ci, take, take_rest,
    take_till, take_while, take_while1,
};
pub use combinators::repetition::{
    count, list, many, many1, many_till, many_till_with_config, many_with_config, sep_by,
    sep_by1, skip_many, skip_many1,
};
pub use combinators::sequence::{lift1, lift2, lift3, lift4};
