//! Container-layout handling: deciding which bytes are script, which are
//! messages, and which schema dialect applies.

use crate::instruction::ScriptMode;
use crate::text::{self, Message};
use log::debug;

/// Input layout selector. `FFTPack` is a container detail of the classic
/// release: the packed archive always holds classic-dialect scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Classic,
    Enhanced,
    FFTPack,
}

impl GameMode {
    pub fn parse(name: &str) -> Result<GameMode, String> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "enhanced" => Ok(GameMode::Enhanced),
            "fftpack" => Ok(GameMode::FFTPack),
            other => Err(format!(
                "unknown mode '{}' (expected classic, enhanced, or fftpack)",
                other
            )),
        }
    }

    /// Which schema dialect this layout decodes with
    pub fn script_mode(self) -> ScriptMode {
        match self {
            GameMode::Classic | GameMode::FFTPack => ScriptMode::Classic,
            GameMode::Enhanced => ScriptMode::Enhanced,
        }
    }
}

/// Every script in the packed container occupies one fixed-size slot
pub const FFTPACK_SLOT_SIZE: usize = 0x2800;

const PAD_OPCODE: u8 = 0xF2;

/// One carved script: its instruction bytes and, when the layout embeds
/// them, its decoded message table.
#[derive(Debug)]
pub struct CarvedScript<'a> {
    pub script: &'a [u8],
    pub messages: Option<Vec<Message>>,
}

/// Carve one script slot out of the packed container.
///
/// A slot opening with four pad opcodes holds no message block; otherwise it
/// starts with a little-endian u32 giving the offset of the message block,
/// the script body running from byte 4 up to that offset.
pub fn carve_fftpack(data: &[u8], index: usize) -> Result<CarvedScript<'_>, String> {
    let start = index * FFTPACK_SLOT_SIZE;
    let end = start + FFTPACK_SLOT_SIZE;
    if end > data.len() {
        return Err(format!(
            "script index {} out of range for a {}-byte container",
            index,
            data.len()
        ));
    }
    let slot = &data[start..end];

    if slot[..4].iter().all(|&b| b == PAD_OPCODE) {
        debug!("slot {} has no message block", index);
        return Ok(CarvedScript {
            script: slot,
            messages: None,
        });
    }

    let message_offset =
        u32::from_le_bytes([slot[0], slot[1], slot[2], slot[3]]) as usize;
    if message_offset < 4 || message_offset > slot.len() {
        return Err(format!(
            "slot {}: message block offset {:#X} outside the slot",
            index, message_offset
        ));
    }

    debug!(
        "slot {}: script bytes 4..{:#X}, messages at {:#X}",
        index, message_offset, message_offset
    );
    let messages = text::decode_messages(&slot[message_offset..])?;
    Ok(CarvedScript {
        script: &slot[4..message_offset],
        messages: Some(messages),
    })
}

/// Assemble a classic-layout script: the script file is the whole stream and
/// the message table, when present, comes from a separate file.
pub fn carve_classic<'a>(
    script: &'a [u8],
    message_data: Option<&[u8]>,
) -> Result<CarvedScript<'a>, String> {
    let messages = match message_data {
        Some(data) => Some(text::decode_messages(data)?),
        None => None,
    };
    Ok(CarvedScript { script, messages })
}
