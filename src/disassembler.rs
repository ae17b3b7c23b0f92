//! Thin formatting layer over the instruction decoder.

use crate::instruction::{Instruction, InstructionDecoder, Operands, OperandValue, ScriptMode};
use crate::opcode_tables;
use crate::text::Message;
use std::fmt::Write;

lazy_static! {
    /// Opcode name column width: one space past the longest name
    static ref OPCODE_PADDING: usize = (0u8..=255)
        .map(|op| opcode_tables::opcode_name(op).len())
        .max()
        .unwrap_or(0)
        + 1;
}

pub struct Disassembler<'a> {
    script: &'a [u8],
    mode: ScriptMode,
    messages: Option<&'a [Message]>,
    show_offsets: bool,
}

impl<'a> Disassembler<'a> {
    pub fn new(script: &'a [u8], mode: ScriptMode) -> Self {
        Disassembler {
            script,
            mode,
            messages: None,
            show_offsets: false,
        }
    }

    /// Supply a decoded message table for resolving message-index operands
    pub fn with_messages(mut self, messages: &'a [Message]) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Prefix each line with the instruction's byte offset
    pub fn show_offsets(mut self, show: bool) -> Self {
        self.show_offsets = show;
        self
    }

    /// Disassemble the whole script into formatted lines.
    ///
    /// Per-instruction anomalies appear inline; only structural problems
    /// (a message index outside the supplied table) abort with an error.
    pub fn disassemble(&self) -> Result<String, String> {
        let mut output = String::new();
        for instruction in InstructionDecoder::new(self.script, self.mode) {
            let line = self.format_instruction(&instruction)?;
            writeln!(output, "{}", line).unwrap();
        }
        Ok(output)
    }

    fn format_instruction(&self, instruction: &Instruction) -> Result<String, String> {
        let mut line = String::new();

        if self.show_offsets {
            write!(line, "    @{:04} ", instruction.offset).unwrap();
        }

        let name = instruction.name();
        match &instruction.operands {
            Operands::None => line.push_str(name),
            Operands::Raw(bytes) => {
                write!(line, "{:<width$} unknown:", name, width = *OPCODE_PADDING).unwrap();
                for byte in bytes {
                    write!(line, " {:02X}", byte).unwrap();
                }
            }
            Operands::Fields(values) => {
                write!(line, "{:<width$}", name, width = *OPCODE_PADDING).unwrap();
                for value in values {
                    match value {
                        OperandValue::MessageIndex(index) => {
                            write!(line, " {}", self.resolve_message(*index)?).unwrap();
                        }
                        other => write!(line, " {}", other).unwrap(),
                    }
                }
            }
        }

        if let Some(report) = &instruction.diagnostic {
            write!(line, " // error, {}", report).unwrap();
        }

        Ok(line)
    }

    /// Resolve a message-index operand against the message table. Without a
    /// table the numeric index is shown; with one, an out-of-range index is
    /// a hard error, never clamped.
    fn resolve_message(&self, index: u16) -> Result<String, String> {
        match self.messages {
            None => Ok(index.to_string()),
            Some(messages) => match messages.get(index as usize) {
                Some(message) => Ok(message.to_string()),
                None => Err(format!(
                    "message index {} out of range (table has {} messages)",
                    index,
                    messages.len()
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::decode_messages;

    fn message_table(count: usize) -> Vec<Message> {
        // messages "A{End}", "B{End}", ... one per table entry
        let mut data = Vec::new();
        for i in 0..count {
            data.push(0x0A + i as u8);
            data.push(0xFE);
        }
        decode_messages(&data).unwrap()
    }

    #[test]
    fn test_display_message_resolves_index() {
        let mut script = vec![0x10, 0x00, 0x00, 0x05, 0x00];
        script.extend_from_slice(&[0x00; 10]);
        let messages = message_table(6);
        let output = Disassembler::new(&script, ScriptMode::Classic)
            .with_messages(&messages)
            .disassemble()
            .unwrap();
        // message 5 is "F{End}"
        assert!(output.contains("DisplayMessage"), "{}", output);
        assert!(output.contains("F{End}"), "{}", output);
    }

    #[test]
    fn test_out_of_range_message_index_is_hard_error() {
        let mut script = vec![0x10, 0x00, 0x00, 0x09, 0x00];
        script.extend_from_slice(&[0x00; 10]);
        let messages = message_table(3);
        let err = Disassembler::new(&script, ScriptMode::Classic)
            .with_messages(&messages)
            .disassemble()
            .unwrap_err();
        assert_eq!(err, "message index 9 out of range (table has 3 messages)");
    }

    #[test]
    fn test_message_index_without_table_prints_number() {
        let mut script = vec![0x10, 0x00, 0x00, 0x07, 0x00];
        script.extend_from_slice(&[0x00; 10]);
        let output = Disassembler::new(&script, ScriptMode::Classic)
            .disassemble()
            .unwrap();
        assert!(output.contains(" 7"), "{}", output);
    }

    #[test]
    fn test_no_operand_instruction_renders_bare_name() {
        let script = [0x16, 0xF2];
        let output = Disassembler::new(&script, ScriptMode::Classic)
            .disassemble()
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["WaitTask", "_Pad"]);
    }

    #[test]
    fn test_boolean_rendering() {
        // 0x81 SetAnimationSound: u16 then an off/on boolean
        let script = [0x81, 0x02, 0x00, 0x00];
        let output = Disassembler::new(&script, ScriptMode::Classic)
            .disassemble()
            .unwrap();
        assert!(output.contains("SetAnimationSound"), "{}", output);
        assert!(output.contains(" 2 on"), "{}", output);
    }

    #[test]
    fn test_shortfall_rendered_inline() {
        // PlaySound truncated to one operand byte; the walk must not abort
        let script = [0x21, 0x34];
        let output = Disassembler::new(&script, ScriptMode::Classic)
            .disassemble()
            .unwrap();
        assert!(
            output.contains("// error, wanted 2 bytes, but 1 remaining bytes"),
            "{}",
            output
        );
    }

    #[test]
    fn test_raw_operand_rendering() {
        // an unmapped schema with declared bytes renders them as hex
        let instruction = Instruction {
            offset: 0,
            opcode: 0x17,
            size: 2,
            operands: Operands::Raw(vec![0xAB, 0xCD]),
            diagnostic: None,
        };
        let line = Disassembler::new(&[], ScriptMode::Classic)
            .format_instruction(&instruction)
            .unwrap();
        assert!(line.starts_with("Unknown17"), "{}", line);
        assert!(line.ends_with("unknown: AB CD"), "{}", line);
    }

    #[test]
    fn test_offsets_prefix() {
        let script = [0x16, 0x21, 0x01, 0x00];
        let output = Disassembler::new(&script, ScriptMode::Classic)
            .show_offsets(true)
            .disassemble()
            .unwrap();
        assert!(output.contains("    @0000 WaitTask"), "{}", output);
        assert!(output.contains("    @0001 PlaySound"), "{}", output);
    }
}
