//! Percent-encoding helpers with browser URI semantics.
//!
//! References inside documents were written by browsers, so decoding has to
//! follow the two flavours they use: whole-URI decoding, which leaves
//! escaped delimiters alone, and component decoding, which does not.

use std::borrow::Cow;

/// Characters whose escapes survive [`decode_uri`].
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Marks `encodeURIComponent` leaves unescaped but `urlencoding` escapes.
const UNESCAPED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

/// Decode every escape, like `decodeURIComponent`.
///
/// Escapes that do not form valid UTF-8 are copied through; the rest of
/// the input is still decoded.
pub fn decode_uri_component(input: &str) -> Cow<'_, str> {
    decode_escapes(input, &[])
}

/// Decode escapes except those of URI delimiters, like `decodeURI`.
///
/// `a%20b%2Fc` becomes `a b%2Fc`. Malformed escapes and escapes that do not
/// form valid UTF-8 are copied through.
pub fn decode_uri(input: &str) -> Cow<'_, str> {
    decode_escapes(input, RESERVED)
}

/// Percent-encode a single URL component, like `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> Cow<'_, str> {
    let encoded = urlencoding::encode(input);
    if !input.bytes().any(|b| b"!*'()".contains(&b)) {
        return encoded;
    }

    // `%` itself is escaped as `%25`, so these only come from the marks
    let mut encoded = encoded.into_owned();
    for (escape, mark) in UNESCAPED_MARKS {
        encoded = encoded.replace(escape, mark);
    }
    Cow::Owned(encoded)
}

fn decode_escapes<'a>(input: &'a str, keep: &[u8]) -> Cow<'a, str> {
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    // consecutive decoded escapes, starting at `run_start` in the input
    let mut run: Vec<u8> = Vec::new();
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                let byte = (hi << 4) | lo;
                if keep.contains(&byte) {
                    flush_run(&mut out, input, run_start, &mut run);
                    out.push_str(&input[i..i + 3]);
                } else {
                    if run.is_empty() {
                        run_start = i;
                    }
                    run.push(byte);
                }
                i += 3;
                continue;
            }
        }

        flush_run(&mut out, input, run_start, &mut run);
        let ch = input[i..].chars().next().unwrap_or_default();
        out.push(ch);
        i += ch.len_utf8().max(1);
    }

    flush_run(&mut out, input, run_start, &mut run);
    Cow::Owned(out)
}

/// Append a run of decoded escapes. Bytes that are not valid UTF-8 are
/// written back as their original three-character escapes.
fn flush_run(out: &mut String, input: &str, run_start: usize, run: &mut Vec<u8>) {
    let mut offset = run_start;
    for chunk in run.utf8_chunks() {
        out.push_str(chunk.valid());
        offset += chunk.valid().len() * 3;

        let invalid = chunk.invalid().len() * 3;
        out.push_str(&input[offset..offset + invalid]);
        offset += invalid;
    }
    run.clear();
}

/// Strip a query string (`?` and everything after it).
pub fn strip_query(reference: &str) -> &str {
    reference.split('?').next().unwrap_or(reference)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
