//! Decoder for the game's embedded dialogue text encoding.
//!
//! Messages are streams of 8-bit character codes; a byte whose top nibble is
//! 0xD is the high byte of a two-byte code. Code-points 0xE0-0xFF are control
//! codes (delays, colors, line breaks, message terminators), everything else
//! resolves through the font table. A message ends at `End` (0xFE) or `Close`
//! (0xFF); whatever follows the final message must be zero padding.
//!
//! Font and control-code assignments follow the community font research
//! (ffhacktics.com/wiki/Font, /wiki/Text_Format).

use log::debug;
use std::fmt::{Display, Error, Formatter};

/// Control codes that consume one extra byte as a numeric argument. This set
/// is hard-coded from observed data; extend it explicitly if more are found,
/// there is no general rule.
const ARG_CONTROL_CODES: [u16; 7] = [0xE2, 0xE3, 0xE6, 0xE8, 0xEC, 0xF5, 0xF6];

/// One decoded unit of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Displayable character from the font table
    Glyph(char),
    /// Named control code, rendered as `{Name}`
    Named(&'static str),
    /// Named control code with an argument byte, rendered as `{Name arg}`
    NamedArg(&'static str, u8),
    /// Unidentified control code, rendered as `{0xHH}`
    Hex(u8),
    /// Unidentified control code with an argument byte, rendered as `{0xHHAA}`
    HexArg(u8, u8),
    /// Code-point with no font mapping, rendered as `{unknown:HEX}`
    UnknownGlyph(u16),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Token::Glyph(ch) => write!(f, "{}", ch),
            Token::Named(name) => write!(f, "{{{}}}", name),
            Token::NamedArg(name, arg) => write!(f, "{{{} {}}}", name, arg),
            Token::Hex(code) => write!(f, "{{0x{:02X}}}", code),
            Token::HexArg(code, arg) => write!(f, "{{0x{:02X}{:02X}}}", code, arg),
            Token::UnknownGlyph(value) => write!(f, "{{unknown:{:X}}}", value),
        }
    }
}

/// One decoded message: an ordered token sequence ending in exactly one
/// `{End}` or `{Close}` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tokens: Vec<Token>,
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Decode a message block into its messages.
///
/// Returns a hard error if any nonzero byte follows the last terminated
/// message; per-character anomalies (unmapped glyphs) degrade to annotated
/// tokens instead.
pub fn decode_messages(data: &[u8]) -> Result<Vec<Message>, String> {
    let mut messages = Vec::new();
    let mut tokens = Vec::new();
    // first byte after the most recent End/Close
    let mut tail_start = 0;

    let mut i = 0;
    while i < data.len() {
        let first = data[i];
        i += 1;

        let value = if first & 0xF0 == 0xD0 {
            if i >= data.len() {
                // lone high byte at the end of the block; the padding check
                // below reports it
                break;
            }
            let low = data[i];
            i += 1;
            ((first as u16) << 8) | low as u16
        } else {
            first as u16
        };

        // 0xFA sits inside the control range but is the wide space in the
        // font research, so it stays a glyph
        if (0xE0..=0xFF).contains(&value) && value != 0xFA {
            let arg = if ARG_CONTROL_CODES.contains(&value) {
                if i >= data.len() {
                    debug!("control code {:02X} missing its argument byte", value);
                    break;
                }
                let arg = data[i];
                i += 1;
                Some(arg)
            } else {
                None
            };

            tokens.push(control_token(value as u8, arg));

            // message termination is keyed on the first byte of the
            // code-point; StayOpen (0xFD) and friends do not end the message
            if first == 0xFE || first == 0xFF {
                messages.push(Message { tokens });
                tokens = Vec::new();
                tail_start = i;
            }
            continue;
        }

        if value == 0xDA73 {
            // wide-space code-point shown by its research tag
            tokens.push(Token::Named("SP"));
        } else if let Some(ch) = glyph(value) {
            tokens.push(Token::Glyph(ch));
        } else {
            debug!("no font mapping for code-point {:X}", value);
            tokens.push(Token::UnknownGlyph(value));
        }
    }

    // anything after the last message must be zero padding
    if data[tail_start..].iter().any(|&b| b != 0) {
        return Err("unexpected data after messages".to_string());
    }

    Ok(messages)
}

/// Map a control code (and its optional argument byte) to a token
fn control_token(code: u8, arg: Option<u8>) -> Token {
    match (code, arg) {
        (0xE0, _) => Token::Named("Ramza"),
        (0xE1, _) => Token::Named("UnitName"),
        (0xE2, Some(arg)) => Token::NamedArg("Delay", arg),
        (0xE3, Some(arg)) => Token::NamedArg("Color", arg),
        (0xF4, _) => Token::Named("WaitPress"),
        (0xF8, _) => Token::Named("NewLine"),
        (0xFB, _) => Token::Named("BeginList"),
        (0xFC, _) => Token::Named("EndList"),
        (0xFD, _) => Token::Named("StayOpen"),
        (0xFE, _) => Token::Named("End"),
        (0xFF, _) => Token::Named("Close"),
        (code, Some(arg)) => Token::HexArg(code, arg),
        (code, None) => Token::Hex(code),
    }
}

/// Resolve a code-point through the font table.
///
/// Entries marked WotL only appear in the enhanced release's data but are
/// harmless to resolve everywhere.
fn glyph(value: u16) -> Option<char> {
    let ch = match value {
        0x00..=0x09 => (b'0' + value as u8) as char,
        0x0A..=0x23 => (b'A' + (value as u8 - 0x0A)) as char,
        0x24..=0x3D => (b'a' + (value as u8 - 0x24)) as char,
        0x3E => '!',
        0x40 => '?',
        0x42 => '+',
        0x44 => '/',
        0x46 => ':',
        0x5F => '.',
        0x8B => '\u{B7}',
        0x8D => '(',
        0x8E => ')',
        0x91 => '\\',
        0x93 => '\'',
        0x95 => ' ',        // WotL
        0xFA => '\u{3000}', // WotL
        0xD129..=0xD132 => '*',
        0xDA60 => '\u{E1}', // á, WotL
        0xDA61 => '\u{E0}', // à, WotL
        0xDA62 => '\u{E9}', // é, WotL
        0xDA63 => '\u{E8}', // è, WotL
        0xDA64 => '\u{ED}', // í, WotL
        0xDA65 => '\u{FA}', // ú, WotL
        0xDA66 => '\u{F9}', // ù, WotL
        0xDA67 => '\u{2013}', // en dash, WotL
        0xDA68 => '\u{2014}', // em dash, WotL
        0xDA74 => ',',
        _ => return None,
    };
    Some(ch)
}
