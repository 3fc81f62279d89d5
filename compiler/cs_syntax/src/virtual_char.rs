//! Virtual characters: the characters a literal denotes, with source spans.
//!
//! A string literal `"a\tb"` spans six bytes of source but denotes three
//! characters. Each [`VirtualChar`] pairs a denoted character with the span
//! of source text that produced it, so a consumer can map a position in the
//! value back to the token text.

use thiserror::Error;

use crate::text::{text_len, TextSpan};

/// A denoted character and the source span that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VirtualChar {
    pub ch: char,
    pub span: TextSpan,
}

/// A literal that could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("unrecognized escape sequence at {0}")]
    UnrecognizedEscape(TextSpan),
    #[error("escape sequence at {0} does not denote a valid character")]
    InvalidCodePoint(TextSpan),
    #[error("literal is missing its closing quote")]
    Unterminated,
    #[error("character literal must contain exactly one character")]
    NotOneCharacter,
}

/// Decoded characters of one literal token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtualCharSequence {
    chars: Vec<VirtualChar>,
}

impl VirtualCharSequence {
    /// Decode a string literal token, regular or verbatim.
    ///
    /// `text` is the full token text including quotes and any `@` prefix;
    /// `offset` is the token's start position in the source.
    pub fn for_string_literal(text: &str, offset: u32) -> Result<Self, EscapeError> {
        if let Some(body) = text.strip_prefix("@\"") {
            let body = body.strip_suffix('"').ok_or(EscapeError::Unterminated)?;
            return Ok(Self::decode_verbatim(body, offset + 2));
        }
        let body = text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|_| text.len() >= 2)
            .ok_or(EscapeError::Unterminated)?;
        Self::decode_regular(body, offset + 1)
    }

    /// Decode a character literal token, which must denote one character.
    pub fn for_char_literal(text: &str, offset: u32) -> Result<Self, EscapeError> {
        let body = text
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
            .filter(|_| text.len() >= 2)
            .ok_or(EscapeError::Unterminated)?;
        let sequence = Self::decode_regular(body, offset + 1)?;
        if sequence.chars.len() == 1 {
            Ok(sequence)
        } else {
            Err(EscapeError::NotOneCharacter)
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VirtualChar> {
        self.chars.iter()
    }

    /// The denoted value as a string.
    pub fn value(&self) -> String {
        self.chars.iter().map(|vc| vc.ch).collect()
    }

    /// Virtual character whose source span contains `position`.
    pub fn find(&self, position: u32) -> Option<&VirtualChar> {
        self.chars.iter().find(|vc| vc.span.contains(position))
    }

    fn decode_verbatim(body: &str, start: u32) -> Self {
        let mut chars = Vec::with_capacity(body.len());
        let mut iter = body.char_indices().peekable();
        while let Some((index, ch)) = iter.next() {
            let pos = start + text_len(&body[..index]);
            if ch == '"' && matches!(iter.peek(), Some((_, '"'))) {
                iter.next();
                chars.push(VirtualChar {
                    ch,
                    span: TextSpan::at(pos, 2),
                });
            } else {
                chars.push(VirtualChar {
                    ch,
                    span: TextSpan::at(pos, text_len(ch.encode_utf8(&mut [0; 4]))),
                });
            }
        }
        VirtualCharSequence { chars }
    }

    fn decode_regular(body: &str, start: u32) -> Result<Self, EscapeError> {
        let mut chars = Vec::with_capacity(body.len());
        let bytes = body.as_bytes();
        let mut index = 0;
        while index < body.len() {
            let pos = start + text_len(&body[..index]);
            if bytes[index] != b'\\' {
                let ch = body[index..].chars().next().ok_or(EscapeError::Unterminated)?;
                let width = ch.len_utf8();
                chars.push(VirtualChar {
                    ch,
                    span: TextSpan::at(pos, text_len(&body[index..index + width])),
                });
                index += width;
                continue;
            }

            let (ch, width) = decode_escape(&body[index..], pos)?;
            chars.push(VirtualChar {
                ch,
                span: TextSpan::at(pos, text_len(&body[index..index + width])),
            });
            index += width;
        }
        Ok(VirtualCharSequence { chars })
    }
}

/// Decode one escape sequence at the start of `rest` (which begins with `\`).
///
/// Returns the character and the byte width of the escape.
fn decode_escape(rest: &str, pos: u32) -> Result<(char, usize), EscapeError> {
    let mut iter = rest.chars();
    iter.next();
    let Some(marker) = iter.next() else {
        return Err(EscapeError::UnrecognizedEscape(TextSpan::at(pos, 1)));
    };
    let simple = match marker {
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        '0' => Some('\0'),
        'a' => Some('\u{7}'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        _ => None,
    };
    if let Some(ch) = simple {
        return Ok((ch, 2));
    }

    let (min_digits, max_digits) = match marker {
        'x' => (1, 4),
        'u' => (4, 4),
        'U' => (8, 8),
        _ => {
            let width = 1 + marker.len_utf8();
            return Err(EscapeError::UnrecognizedEscape(TextSpan::at(
                pos,
                text_len(&rest[..width]),
            )));
        }
    };
    let digits: usize = rest[2..]
        .bytes()
        .take(max_digits)
        .take_while(u8::is_ascii_hexdigit)
        .count();
    let width = 2 + digits;
    let span = TextSpan::at(pos, text_len(&rest[..width]));
    if digits < min_digits {
        return Err(EscapeError::UnrecognizedEscape(span));
    }
    let value =
        u32::from_str_radix(&rest[2..width], 16).map_err(|_| EscapeError::InvalidCodePoint(span))?;
    let ch = char::from_u32(value).ok_or(EscapeError::InvalidCodePoint(span))?;
    Ok((ch, width))
}
