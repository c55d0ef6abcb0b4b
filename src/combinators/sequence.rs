//! Sequencing combinators: `>>=`, `>>|`, `<$>`, `<*>`, `*>`, `<*`, and
//! `lift_n` for n in 1..=4.
//!
//! Rust has no custom infix operators for `>>=`/`*>`/`<*`, so these are
//! exposed as methods on [`Parser`] alongside the free functions the data
//! model names. Intermediate values threaded through `lift2..lift4` and
//! `before` are required to be `Clone`: the returned parser is itself a
//! reusable value (it may be re-entered by `many`, `<|>`, or `fix`), so any
//! closure it builds must be callable more than once.

use std::rc::Rc;

use crate::engine::{Parser, bind, map};

impl<T: 'static> Parser<T> {
    /// `p >>= f`.
    pub fn bind<U: 'static>(self, f: impl Fn(T) -> Parser<U> + 'static) -> Parser<U> {
        bind(self, f)
    }

    /// `p >>| f`: maps a pure function over the result.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U> {
        map(self, f)
    }

    /// `p *> q`: run both in sequence, keep only `q`'s value.
    pub fn then<U: 'static>(self, q: Parser<U>) -> Parser<U> {
        self.bind(move |_| q.clone())
    }

    /// `p <|> q`, available as a method for chaining; see
    /// [`crate::engine::or`] for the free function.
    pub fn or(self, q: Parser<T>) -> Parser<T> {
        crate::engine::or(self, q)
    }

    /// `p <?> mark`.
    pub fn label(self, mark: impl Into<String>) -> Parser<T> {
        crate::engine::label(self, mark)
    }
}

impl<T: Clone + 'static> Parser<T> {
    /// `p <* q`: run both in sequence, keep only `p`'s value.
    pub fn before<U: 'static>(self, q: Parser<U>) -> Parser<T> {
        self.bind(move |value| q.clone().map(move |_| value.clone()))
    }
}

/// `lift1` is just [`Parser::map`], included for parity with the data
/// model's `lift_n` family.
pub fn lift1<A: 'static, R: 'static>(f: impl Fn(A) -> R + 'static, pa: Parser<A>) -> Parser<R> {
    pa.map(f)
}

pub fn lift2<A, B, R>(f: impl Fn(A, B) -> R + 'static, pa: Parser<A>, pb: Parser<B>) -> Parser<R>
where
    A: Clone + 'static,
    B: 'static,
    R: 'static,
{
    let f = Rc::new(f);
    pa.bind(move |a| {
        let f = f.clone();
        pb.clone().map(move |b| f(a.clone(), b))
    })
}

pub fn lift3<A, B, C, R>(
    f: impl Fn(A, B, C) -> R + 'static,
    pa: Parser<A>,
    pb: Parser<B>,
    pc: Parser<C>,
) -> Parser<R>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: 'static,
    R: 'static,
{
    let f = Rc::new(f);
    pa.bind(move |a| {
        let f = f.clone();
        let pc = pc.clone();
        pb.clone().bind(move |b| {
            let f = f.clone();
            let a = a.clone();
            pc.clone().map(move |c| f(a.clone(), b.clone(), c))
        })
    })
}

pub fn lift4<A, B, C, D, R>(
    f: impl Fn(A, B, C, D) -> R + 'static,
    pa: Parser<A>,
    pb: Parser<B>,
    pc: Parser<C>,
    pd: Parser<D>,
) -> Parser<R>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    D: 'static,
    R: 'static,
{
    let f = Rc::new(f);
    pa.bind(move |a| {
        let f = f.clone();
        let pc = pc.clone();
        let pd = pd.clone();
        pb.clone().bind(move |b| {
            let f = f.clone();
            let a = a.clone();
            let pd = pd.clone();
            pc.clone().bind(move |c| {
                let f = f.clone();
                let a = a.clone();
                let b = b.clone();
                pd.clone().map(move |d| f(a.clone(), b.clone(), c.clone(), d))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{State, pure};
    use crate::input::{Input, More, Source};

    fn run<T>(p: &Parser<T>, bytes: &[u8]) -> State<T> {
        p.run(Input::create(0, Source::from(bytes.to_vec())), 0, More::Complete)
    }

    #[test]
    fn then_keeps_only_the_right_value() {
        let p = pure(1).then(pure(2));
        match run(&p, b"") {
            State::Done(_, _, _, value) => assert_eq!(value, 2),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn before_keeps_only_the_left_value() {
        let p = pure(1).before(pure(2));
        match run(&p, b"") {
            State::Done(_, _, _, value) => assert_eq!(value, 1),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn lift2_combines_both_results() {
        let p = lift2(|a: i32, b: i32| a + b, pure(2), pure(3));
        match run(&p, b"") {
            State::Done(_, _, _, value) => assert_eq!(value, 5),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn lift3_combines_all_three_results() {
        let p = lift3(|a: i32, b: i32, c: i32| a + b + c, pure(1), pure(2), pure(3));
        match run(&p, b"") {
            State::Done(_, _, _, value) => assert_eq!(value, 6),
            _ => panic!("expected Done"),
        }
    }
}
