//! HTML entity decoding for stored and submitted link URLs.
//!
//! Stored links sometimes arrive with entity-encoded characters (pasted from
//! rendered HTML). The engine wants the raw URI, so the common named
//! references and numeric character references are decoded. Decoding is
//! idempotent on already-decoded input, so running it twice is safe.

/// Longest entity body we bother scanning for before giving up on a `&`.
const MAX_ENTITY_LEN: usize = 12;

/// Decodes the common HTML entities (`&amp;`, `&lt;`, `&gt;`, `&quot;`,
/// `&apos;`/`&#039;`, `&nbsp;`) and decimal/hex numeric references.
/// Anything that does not parse as an entity is passed through unchanged.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_one(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes a single entity at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed, or `None` when
/// the text after `&` is not a recognizable entity.
fn decode_one(s: &str) -> Option<(char, usize)> {
    // Byte-wise search: ';' is ASCII, so the position is a char boundary
    // even when the entity window crosses multi-byte characters.
    let semi = s
        .as_bytes()
        .iter()
        .take(MAX_ENTITY_LEN)
        .position(|&b| b == b';')
        .filter(|&p| p > 1)?;
    let body = &s[1..semi];

    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semi + 1))
}
