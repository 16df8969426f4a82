//! Canonical JSON for flat objects of string members.
//!
//! Members are written in ascending byte-wise order of their names, with no
//! insignificant whitespace and no trailing newline. Only the escapes JSON
//! requires are applied, so identical members always produce identical bytes.

use crate::error::{Result, ThumbKitError};

/// Serializes `(name, value)` pairs as a canonical JSON object.
///
/// The input order does not matter. Duplicate names are rejected.
pub fn encode<I, K, V>(members: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut members: Vec<(K, V)> = members.into_iter().collect();
    members.sort_by(|(a, _), (b, _)| a.as_ref().as_bytes().cmp(b.as_ref().as_bytes()));

    if let Some(pair) = members
        .windows(2)
        .find(|pair| pair[0].0.as_ref() == pair[1].0.as_ref())
    {
        return Err(ThumbKitError::EncodingError(format!(
            "duplicate member {:?}",
            pair[0].0.as_ref()
        )));
    }

    let mut out = String::from("{");
    for (i, (name, value)) in members.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(&mut out, name.as_ref());
        out.push(':');
        write_string(&mut out, value.as_ref());
    }
    out.push('}');

    Ok(out.into_bytes())
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(members: &[(&str, &str)]) -> String {
        String::from_utf8(encode(members.iter().copied()).unwrap()).unwrap()
    }

    #[test]
    fn sorts_members_regardless_of_input_order() {
        let expected = r#"{"e":"AQAB","kty":"RSA","n":"0vx7"}"#;
        let permutations = [
            [("e", "AQAB"), ("kty", "RSA"), ("n", "0vx7")],
            [("e", "AQAB"), ("n", "0vx7"), ("kty", "RSA")],
            [("kty", "RSA"), ("e", "AQAB"), ("n", "0vx7")],
            [("kty", "RSA"), ("n", "0vx7"), ("e", "AQAB")],
            [("n", "0vx7"), ("e", "AQAB"), ("kty", "RSA")],
            [("n", "0vx7"), ("kty", "RSA"), ("e", "AQAB")],
        ];
        for members in permutations {
            assert_eq!(encode_str(&members), expected);
        }
    }

    #[test]
    fn ordering_is_bytewise() {
        // uppercase sorts before lowercase, shorter prefix first
        assert_eq!(
            encode_str(&[("x", "1"), ("X", "2"), ("xy", "3")]),
            r#"{"X":"2","x":"1","xy":"3"}"#
        );
    }

    #[test]
    fn no_whitespace_or_trailing_newline() {
        let out = encode_str(&[("crv", "P-256"), ("kty", "EC")]);
        assert_eq!(out, r#"{"crv":"P-256","kty":"EC"}"#);
        assert!(!out.contains(' '));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn escapes_only_what_json_requires() {
        assert_eq!(
            encode_str(&[("k", "a\"b\\c\nd\u{01}/é-_")]),
            "{\"k\":\"a\\\"b\\\\c\\nd\\u0001/é-_\"}"
        );
    }

    #[test]
    fn empty_object() {
        assert_eq!(encode_str(&[]), "{}");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = encode([("kty", "RSA"), ("kty", "EC")]).unwrap_err();
        assert!(matches!(err, ThumbKitError::EncodingError(_)));
    }
}
