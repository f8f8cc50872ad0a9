//! Fixed test vectors for the bencode grammar
//!
//! Each vector pairs an input with either its expected decoded value and
//! canonical re-encoding, or the error class it must produce.

use bencodec_core::{decode, encode, BInt, BencodeError, Dict, ErrorKind, Value};
use bytes::Bytes;

fn bytes(s: &'static [u8]) -> Value {
    Value::Bytes(Bytes::from_static(s))
}

fn int(i: i64) -> Value {
    Value::from(i)
}

fn dict(entries: Vec<(&'static str, Value)>) -> Value {
    Value::Dict(
        entries
            .into_iter()
            .map(|(k, v)| (Bytes::from_static(k.as_bytes()), v))
            .collect::<Dict>(),
    )
}

type Valid = (&'static [u8], Value, &'static [u8]);
type Invalid = (&'static [u8], BencodeError);

fn ok(input: &'static [u8], value: Value, canonical: &'static [u8]) -> Valid {
    (input, value, canonical)
}

fn err(input: &'static [u8], error: BencodeError) -> Invalid {
    (input, error)
}

/// Well-formed inputs: (input, expected value, expected re-encoding)
fn valid_vectors() -> Vec<Valid> {
    vec![
        ok(b"i0e", int(0), b"i0e"),
        ok(b"i42e", int(42), b"i42e"),
        ok(b"i-42e", int(-42), b"i-42e"),
        ok(b"i-0e", int(0), b"i0e"),
        ok(b"i0042e", int(42), b"i42e"),
        ok(
            b"i9223372036854775808e",
            Value::Integer("9223372036854775808".parse::<BInt>().unwrap()),
            b"i9223372036854775808e",
        ),
        ok(b"0:", bytes(b""), b"0:"),
        ok(b"4:spam", bytes(b"spam"), b"4:spam"),
        ok(b"5:l1:ae", bytes(b"l1:ae"), b"5:l1:ae"),
        ok(b"le", Value::List(vec![]), b"le"),
        ok(b"lle0:e", Value::List(vec![Value::List(vec![]), bytes(b"")]), b"lle0:e"),
        ok(
            b"l4:spami42ee",
            Value::List(vec![bytes(b"spam"), int(42)]),
            b"l4:spami42ee",
        ),
        ok(b"de", dict(vec![]), b"de"),
        ok(
            b"d3:cow3:moo4:spam4:eggse",
            dict(vec![("cow", bytes(b"moo")), ("spam", bytes(b"eggs"))]),
            b"d3:cow3:moo4:spam4:eggse",
        ),
        ok(
            b"d3:keyl1:a1:bee",
            dict(vec![("key", Value::List(vec![bytes(b"a"), bytes(b"b")]))]),
            b"d3:keyl1:a1:bee",
        ),
        ok(
            b"d1:zi1e1:ai2ee",
            dict(vec![("z", int(1)), ("a", int(2))]),
            b"d1:zi1e1:ai2ee",
        ),
        ok(b"d0:dee", dict(vec![("", dict(vec![]))]), b"d0:dee"),
    ]
}

/// Malformed inputs and the error each must produce
fn invalid_vectors() -> Vec<Invalid> {
    vec![
        err(b"", BencodeError::Truncated { offset: 0, needed: 1 }),
        err(b"x", BencodeError::UnexpectedByte { offset: 0, byte: b'x' }),
        err(b"i1", BencodeError::Truncated { offset: 2, needed: 1 }),
        err(b"ie", BencodeError::InvalidInteger { offset: 0 }),
        err(b"i+1e", BencodeError::InvalidInteger { offset: 0 }),
        err(b"i1.5e", BencodeError::InvalidInteger { offset: 0 }),
        err(b"3:ab", BencodeError::Truncated { offset: 4, needed: 1 }),
        err(b"10:abc", BencodeError::Truncated { offset: 6, needed: 7 }),
        err(b"-1:a", BencodeError::UnexpectedByte { offset: 0, byte: b'-' }),
        err(b"1a", BencodeError::InvalidLength { offset: 0 }),
        err(b"l", BencodeError::Truncated { offset: 1, needed: 1 }),
        err(b"l1:a", BencodeError::Truncated { offset: 4, needed: 1 }),
        err(b"d1:a", BencodeError::Truncated { offset: 4, needed: 1 }),
        err(b"d1:ae", BencodeError::UnexpectedByte { offset: 4, byte: b'e' }),
        err(b"e", BencodeError::UnexpectedByte { offset: 0, byte: b'e' }),
        err(
            b"dlee",
            BencodeError::TypeMismatch {
                expected: "byte string dictionary key",
                found: "list",
            },
        ),
        err(b"i1ei2e", BencodeError::TrailingContent { offset: 3, remaining: 3 }),
        err(b"lee", BencodeError::TrailingContent { offset: 2, remaining: 1 }),
    ]
}

#[test]
fn test_valid_vectors_decode() {
    for (input, expected, _) in valid_vectors() {
        let decoded = decode(input)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", String::from_utf8_lossy(input), e));
        assert_eq!(decoded, expected, "input {:?}", String::from_utf8_lossy(input));
    }
}

#[test]
fn test_valid_vectors_reencode() {
    for (input, _, canonical) in valid_vectors() {
        let encoded = encode(&decode(input).unwrap()).unwrap();
        assert_eq!(
            encoded.as_ref(),
            canonical,
            "input {:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_invalid_vectors() {
    for (input, expected) in invalid_vectors() {
        let err = decode(input).unwrap_err();
        assert_eq!(err, expected, "input {:?}", String::from_utf8_lossy(input));
    }
}

#[test]
fn test_invalid_vector_kinds() {
    for (input, expected) in invalid_vectors() {
        let kind = decode(input).unwrap_err().kind();
        assert_eq!(kind, expected.kind());
        assert_ne!(kind, ErrorKind::Io);
    }
}
