//! instrumentation-reporter Base64 VLQ module.
//!
//! Each symbol of the Base64 alphabet carries 5 data bits and a continuation bit
//! (the sixth, most significant bit). Groups are stored least significant first.
//! Bit 0 of the accumulated value is the sign.

use crate::error::{Error, Result};

const BASE_SHIFT: u32 = 5;
const CONTINUATION_BIT: u8 = 1 << BASE_SHIFT;
const BASE_MASK: u8 = CONTINUATION_BIT - 1;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Maps a symbol of the alphabet to its 6-bit value.
fn symbol_value(c: char) -> Result<u8> {
    let v = match c {
        'A'..='Z' => c as u8 - b'A',
        'a'..='z' => c as u8 - b'a' + 26,
        '0'..='9' => c as u8 - b'0' + 52,
        '+' => 62,
        '/' => 63,
        _ => return Err(Error::VlqSymbol(c)),
    };
    Ok(v)
}

/// Decodes one integer from the character stream, leaving the stream
/// positioned right after the consumed symbols.
pub fn decode(chars: &mut impl Iterator<Item = char>) -> Result<i64> {
    let mut accumulator = 0_u64;
    let mut shift = 0_u32;

    loop {
        let c = chars.next().ok_or(Error::VlqTruncated)?;
        let digit = symbol_value(c)?;
        let group = u64::from(digit & BASE_MASK);
        if shift >= u64::BITS || (group << shift) >> shift != group {
            return Err(Error::VlqOverflow);
        }
        accumulator |= group << shift;
        if digit & CONTINUATION_BIT == 0 {
            break;
        }
        shift += BASE_SHIFT;
    }

    let magnitude = (accumulator >> 1) as i64;
    Ok(if accumulator & 1 == 1 {
        -magnitude
    } else {
        magnitude
    })
}

/// Encodes an integer, appending the symbols to `out`.
/// Accepts `-i64::MAX..=i64::MAX`; `i64::MIN` has no sign-magnitude form.
pub fn encode(value: i64, out: &mut String) -> Result<()> {
    let mut v = match value {
        i64::MIN => return Err(Error::VlqOverflow),
        v if v < 0 => (v.unsigned_abs() << 1) | 1,
        v => (v as u64) << 1,
    };

    loop {
        let mut digit = (v & u64::from(BASE_MASK)) as u8;
        v >>= BASE_SHIFT;
        if v > 0 {
            digit |= CONTINUATION_BIT;
        }
        out.push(ALPHABET[usize::from(digit)] as char);
        if v == 0 {
            break;
        }
    }
    Ok(())
}
