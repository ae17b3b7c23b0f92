use crate::opcode_tables::{self, Schema};
use log::trace;
use std::fmt::{Display, Error, Formatter};

/// Which bytecode dialect's size and schema tables apply.
///
/// The PS1-era release and the "War of the Lions" style re-release share most
/// of the instruction set, but a handful of opcodes widened their operands in
/// the enhanced release (e.g. dialog indices grew from 16 to 32 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    Classic,
    Enhanced,
}

/// Operand field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandField {
    /// Boolean (1 byte)
    Bool8,
    /// Boolean (1 byte), rendered as on/off
    Bool8OnOff,
    /// Boolean (1 byte), rendered as off/on
    Bool8OffOn,
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Unsigned 16-bit index into the decoded message table
    UInt16MessageIndex,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
}

impl OperandField {
    /// Get the size in bytes for this field type
    pub fn size(&self) -> usize {
        match self {
            OperandField::Bool8
            | OperandField::Bool8OnOff
            | OperandField::Bool8OffOn
            | OperandField::Int8
            | OperandField::UInt8 => 1,
            OperandField::Int16 | OperandField::UInt16 | OperandField::UInt16MessageIndex => 2,
            OperandField::Int32 | OperandField::UInt32 => 4,
        }
    }

    /// Decode one value of this field type from `bytes`, which must hold at
    /// least `self.size()` bytes. Operands are little-endian.
    fn read(&self, bytes: &[u8]) -> OperandValue {
        match self {
            OperandField::Bool8 => OperandValue::Bool(bytes[0] != 0),
            OperandField::Bool8OnOff => OperandValue::OnOff(bytes[0] != 0),
            OperandField::Bool8OffOn => OperandValue::OffOn(bytes[0] != 0),
            OperandField::Int8 => OperandValue::Int8(bytes[0] as i8),
            OperandField::UInt8 => OperandValue::UInt8(bytes[0]),
            OperandField::Int16 => OperandValue::Int16(i16::from_le_bytes([bytes[0], bytes[1]])),
            OperandField::UInt16 => OperandValue::UInt16(u16::from_le_bytes([bytes[0], bytes[1]])),
            OperandField::UInt16MessageIndex => {
                OperandValue::MessageIndex(u16::from_le_bytes([bytes[0], bytes[1]]))
            }
            OperandField::Int32 => OperandValue::Int32(i32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
            OperandField::UInt32 => OperandValue::UInt32(u32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
        }
    }
}

/// A decoded operand value. The variant also identifies the field type it was
/// decoded as, so a value never separates from its schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandValue {
    Bool(bool),
    OnOff(bool),
    OffOn(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    /// Index into the message table; resolved by the renderer, not here
    MessageIndex(u16),
    Int32(i32),
    UInt32(u32),
}

impl Display for OperandValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            OperandValue::Bool(v) => write!(f, "{}", v),
            OperandValue::OnOff(v) => write!(f, "{}", if *v { "on" } else { "off" }),
            OperandValue::OffOn(v) => write!(f, "{}", if *v { "off" } else { "on" }),
            OperandValue::Int8(v) => write!(f, "{}", v),
            OperandValue::UInt8(v) => write!(f, "{}", v),
            OperandValue::Int16(v) => write!(f, "{}", v),
            OperandValue::UInt16(v) => write!(f, "{}", v),
            OperandValue::MessageIndex(v) => write!(f, "{}", v),
            OperandValue::Int32(v) => write!(f, "{}", v),
            OperandValue::UInt32(v) => write!(f, "{}", v),
        }
    }
}

/// Decoded operand data for one instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Operands {
    /// The opcode takes no operand bytes
    None,
    /// Typed values decoded in schema order
    Fields(Vec<OperandValue>),
    /// Schema is unknown for this opcode; raw operand bytes instead
    Raw(Vec<u8>),
}

/// A decoded script instruction
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Byte offset of the opcode within the script stream
    pub offset: usize,
    /// The raw opcode value
    pub opcode: u8,
    /// Declared operand byte count (total instruction length is 1 + size)
    pub size: usize,
    /// Decoded operand data
    pub operands: Operands,
    /// In-band anomaly report (operand bytes ran short of the schema, or the
    /// schema consumed fewer bytes than declared). Never aborts the walk.
    pub diagnostic: Option<String>,
}

impl Instruction {
    /// Decode one instruction from the script stream at the given offset.
    ///
    /// Operand anomalies are carried in `diagnostic`, never returned as an
    /// error; the only error is an out-of-bounds start offset.
    pub fn decode(data: &[u8], offset: usize, mode: ScriptMode) -> Result<Self, String> {
        if offset >= data.len() {
            return Err(format!("instruction offset {} out of bounds", offset));
        }

        let opcode = data[offset];
        let size = opcode_tables::operand_size(opcode, mode);
        let end = (offset + 1 + size).min(data.len());
        let operand_bytes = &data[offset + 1..end];

        trace!(
            "opcode {:02X} ({}) at {:04}, {} operand bytes declared, {} available",
            opcode,
            opcode_tables::opcode_name(opcode),
            offset,
            size,
            operand_bytes.len()
        );

        let schema = opcode_tables::operand_schema(opcode, mode);
        let (operands, mut diagnostic) = decode_operands(&schema, size, operand_bytes);

        // The stream ended before the declared operand bytes did. For known
        // schemas the field loop already reported the shortfall.
        if operand_bytes.len() < size && diagnostic.is_none() {
            diagnostic = Some(format!(
                "wanted {} operand bytes, but {} remaining",
                size,
                operand_bytes.len()
            ));
        }

        Ok(Instruction {
            offset,
            opcode,
            size,
            operands,
            diagnostic,
        })
    }

    /// Get the symbolic name for this instruction
    pub fn name(&self) -> &'static str {
        opcode_tables::opcode_name(self.opcode)
    }
}

/// Decode operand bytes against a schema. Returns the decoded operands plus
/// an optional anomaly report.
///
/// For a known schema, fields consume bytes in declared order; a field that
/// would read past the available bytes stops decoding with a shortfall
/// report, and bytes left over after the last field are reported too.
fn decode_operands(
    schema: &Schema,
    size: usize,
    bytes: &[u8],
) -> (Operands, Option<String>) {
    match schema {
        Schema::NoOperands => (Operands::None, None),
        Schema::Unknown | Schema::Variable => {
            if size == 0 {
                (Operands::None, None)
            } else {
                (Operands::Raw(bytes.to_vec()), None)
            }
        }
        Schema::Known(fields) => {
            let mut values = Vec::with_capacity(fields.len());
            let mut pos = 0;
            for field in fields.iter() {
                let width = field.size();
                if pos + width > bytes.len() {
                    let report = format!(
                        "wanted {} bytes, but {} remaining bytes",
                        width,
                        bytes.len() - pos
                    );
                    return (Operands::Fields(values), Some(report));
                }
                values.push(field.read(&bytes[pos..pos + width]));
                pos += width;
            }
            let report = if pos < bytes.len() {
                Some(format!("{} remaining bytes", bytes.len() - pos))
            } else {
                None
            };
            (Operands::Fields(values), report)
        }
    }
}

/// Lazy forward walk over a script's instruction stream.
///
/// Each step consumes exactly `1 + operand_size(opcode, mode)` bytes, even
/// when the operands are malformed, so one bad instruction never
/// desynchronizes the rest of the stream. No control flow is followed; this
/// is a strict linear walk from the start of the slice to its end.
pub struct InstructionDecoder<'a> {
    data: &'a [u8],
    cursor: usize,
    mode: ScriptMode,
}

impl<'a> InstructionDecoder<'a> {
    pub fn new(data: &'a [u8], mode: ScriptMode) -> Self {
        InstructionDecoder {
            data,
            cursor: 0,
            mode,
        }
    }
}

impl<'a> Iterator for InstructionDecoder<'a> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if self.cursor >= self.data.len() {
            return None;
        }
        match Instruction::decode(self.data, self.cursor, self.mode) {
            Ok(instruction) => {
                self.cursor += 1 + instruction.size;
                Some(instruction)
            }
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_field_sizes() {
        assert_eq!(OperandField::Bool8.size(), 1);
        assert_eq!(OperandField::Bool8OnOff.size(), 1);
        assert_eq!(OperandField::Int8.size(), 1);
        assert_eq!(OperandField::UInt16.size(), 2);
        assert_eq!(OperandField::UInt16MessageIndex.size(), 2);
        assert_eq!(OperandField::Int32.size(), 4);
        assert_eq!(OperandField::UInt32.size(), 4);
    }

    #[test]
    fn test_decode_no_operands() {
        // 0x16 WaitTask takes no operands
        let data = [0x16];
        let inst = Instruction::decode(&data, 0, ScriptMode::Classic).unwrap();
        assert_eq!(inst.opcode, 0x16);
        assert_eq!(inst.size, 0);
        assert_eq!(inst.operands, Operands::None);
        assert!(inst.diagnostic.is_none());
    }

    #[test]
    fn test_decode_typed_fields_little_endian() {
        // 0x21 PlaySound: one u16 operand
        let data = [0x21, 0x34, 0x12];
        let inst = Instruction::decode(&data, 0, ScriptMode::Classic).unwrap();
        assert_eq!(inst.size, 2);
        assert_eq!(
            inst.operands,
            Operands::Fields(vec![OperandValue::UInt16(0x1234)])
        );
    }

    #[test]
    fn test_decode_signed_fields() {
        // 0x22 PlayMusic: u8, i8, u8
        let data = [0x22, 0x01, 0xFF, 0x02];
        let inst = Instruction::decode(&data, 0, ScriptMode::Classic).unwrap();
        assert_eq!(
            inst.operands,
            Operands::Fields(vec![
                OperandValue::UInt8(1),
                OperandValue::Int8(-1),
                OperandValue::UInt8(2),
            ])
        );
    }

    #[test]
    fn test_decode_display_message_classic() {
        // 0x10 DisplayMessage in classic mode: the third field is a message
        // table index (here, 5)
        let data = [
            0x10, // opcode
            0x00, 0x00, // u8, u8
            0x05, 0x00, // message index 5
            0x00, 0x00, 0x00, // u8, u8, u8
            0x00, 0x00, // i16
            0x00, 0x00, // i16
            0x00, 0x00, // i16
            0x01, // u8
        ];
        let inst = Instruction::decode(&data, 0, ScriptMode::Classic).unwrap();
        assert_eq!(inst.name(), "DisplayMessage");
        assert_eq!(inst.size, 14);
        match &inst.operands {
            Operands::Fields(values) => {
                assert_eq!(values[2], OperandValue::MessageIndex(5));
                assert_eq!(values[9], OperandValue::UInt8(1));
                assert_eq!(values.len(), 10);
            }
            other => panic!("expected typed fields, got {:?}", other),
        }
        assert!(inst.diagnostic.is_none());
    }

    #[test]
    fn test_decode_display_message_enhanced_widens_index() {
        // In enhanced mode the dialog index widens to 32 bits and the operand
        // block grows to 17 bytes
        let mut data = vec![0x10];
        data.extend_from_slice(&[0u8; 17]);
        let inst = Instruction::decode(&data, 0, ScriptMode::Enhanced).unwrap();
        assert_eq!(inst.size, 17);
        match &inst.operands {
            Operands::Fields(values) => {
                assert_eq!(values.len(), 11);
                assert_eq!(values[2], OperandValue::UInt32(0));
            }
            other => panic!("expected typed fields, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_size_shortfall() {
        // 0x21 PlaySound wants 2 operand bytes; only 1 remains
        let data = [0x21, 0x34];
        let inst = Instruction::decode(&data, 0, ScriptMode::Classic).unwrap();
        assert_eq!(inst.size, 2);
        assert_eq!(inst.operands, Operands::Fields(vec![]));
        assert_eq!(
            inst.diagnostic.as_deref(),
            Some("wanted 2 bytes, but 1 remaining bytes")
        );
    }

    #[test]
    fn test_decode_raw_fallback() {
        // Unmapped schemas degrade to raw bytes rather than failing
        let schema = Schema::Unknown;
        let bytes = [0xAA, 0xBB, 0xCC];
        let (operands, diagnostic) = decode_operands(&schema, 3, &bytes);
        assert_eq!(operands, Operands::Raw(vec![0xAA, 0xBB, 0xCC]));
        assert!(diagnostic.is_none());
    }

    #[test]
    fn test_decode_leftover_bytes_reported() {
        // A schema that consumes less than the declared size reports the
        // remainder without failing
        use OperandField::*;
        let schema = Schema::Known(&[UInt8]);
        let bytes = [0x01, 0x02, 0x03];
        let (operands, diagnostic) = decode_operands(&schema, 3, &bytes);
        assert_eq!(operands, Operands::Fields(vec![OperandValue::UInt8(1)]));
        assert_eq!(diagnostic.as_deref(), Some("2 remaining bytes"));
    }

    #[test]
    fn test_walk_consumes_exact_lengths() {
        // WaitTask (0), PlaySound (2), JumpMap (2), WaitTask (0)
        let data = [0x16, 0x21, 0x01, 0x00, 0x13, 0x05, 0x06, 0x16];
        let decoded: Vec<Instruction> =
            InstructionDecoder::new(&data, ScriptMode::Classic).collect();
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded[0].offset, 0);
        assert_eq!(decoded[1].offset, 1);
        assert_eq!(decoded[2].offset, 4);
        assert_eq!(decoded[3].offset, 7);
        let consumed: usize = decoded.iter().map(|i| 1 + i.size).sum();
        assert_eq!(consumed, data.len());
    }

    #[test]
    fn test_walk_advances_past_truncated_instruction() {
        // The final instruction is truncated; the walk still terminates and
        // reports the shortfall in-band
        let data = [0x16, 0x21, 0x01];
        let decoded: Vec<Instruction> =
            InstructionDecoder::new(&data, ScriptMode::Classic).collect();
        assert_eq!(decoded.len(), 2);
        assert!(decoded[1].diagnostic.is_some());
    }

    #[test]
    fn test_decode_out_of_bounds_offset() {
        let data = [0x16];
        assert!(Instruction::decode(&data, 1, ScriptMode::Classic).is_err());
    }
}
