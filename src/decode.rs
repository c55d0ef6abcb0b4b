//! Endian-decoding façade: fixed-width numeric readers in three
//! endianness flavors, each defined as `take k >>| decode`.
//!
//! Decoding a concrete grammar's numeric literals is explicitly out of
//! scope for the engine proper; this module is the thin `external
//! collaborator` the data model describes, built once here because every
//! consumer of a streaming byte parser eventually needs it.

use crate::combinators::primitives::take;
use crate::engine::Parser;

macro_rules! endian_module {
    ($name:ident, $from_bytes:ident) => {
        pub mod $name {
            use super::*;

            pub fn int8() -> Parser<i8> {
                take(1).map(|b| b[0] as i8)
            }

            pub fn uint8() -> Parser<u8> {
                take(1).map(|b| b[0])
            }

            pub fn int16() -> Parser<i16> {
                take(2).map(|b| i16::$from_bytes(array2(&b)))
            }

            pub fn uint16() -> Parser<u16> {
                take(2).map(|b| u16::$from_bytes(array2(&b)))
            }

            pub fn int32() -> Parser<i32> {
                take(4).map(|b| i32::$from_bytes(array4(&b)))
            }

            pub fn uint32() -> Parser<u32> {
                take(4).map(|b| u32::$from_bytes(array4(&b)))
            }

            pub fn int64() -> Parser<i64> {
                take(8).map(|b| i64::$from_bytes(array8(&b)))
            }

            pub fn uint64() -> Parser<u64> {
                take(8).map(|b| u64::$from_bytes(array8(&b)))
            }

            pub fn float() -> Parser<f32> {
                take(4).map(|b| f32::$from_bytes(array4(&b)))
            }

            pub fn double() -> Parser<f64> {
                take(8).map(|b| f64::$from_bytes(array8(&b)))
            }
        }
    };
}

fn array2(bytes: &[u8]) -> [u8; 2] {
    [bytes[0], bytes[1]]
}

fn array4(bytes: &[u8]) -> [u8; 4] {
    [bytes[0], bytes[1], bytes[2], bytes[3]]
}

fn array8(bytes: &[u8]) -> [u8; 8] {
    [
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ]
}

endian_module!(le, from_le_bytes);
endian_module!(be, from_be_bytes);
endian_module!(ne, from_ne_bytes);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::input::{Input, More, Source};

    fn run<T>(p: &Parser<T>, bytes: &[u8]) -> State<T> {
        p.run(Input::create(0, Source::from(bytes.to_vec())), 0, More::Complete)
    }

    #[test]
    fn le_uint32_decodes_little_endian() {
        match run(&le::uint32(), &[0x01, 0x00, 0x00, 0x00]) {
            State::Done(_, _, _, value) => assert_eq!(value, 1),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn be_uint32_decodes_big_endian() {
        match run(&be::uint32(), &[0x00, 0x00, 0x00, 0x01]) {
            State::Done(_, _, _, value) => assert_eq!(value, 1),
            _ => panic!("expected Done"),
        }
    }

    #[test]
    fn le_double_round_trips_a_known_value() {
        let bytes = 1.5f64.to_le_bytes();
        match run(&le::double(), &bytes) {
            State::Done(_, _, _, value) => assert_eq!(value, 1.5),
            _ => panic!("expected Done"),
        }
    }
}
