//! End-to-end tests: carve a packed container slot, decode its message
//! block, walk the instruction stream, and render the disassembly.

use ivalice::container::{self, FFTPACK_SLOT_SIZE, GameMode};
use ivalice::disassembler::Disassembler;
use ivalice::instruction::{InstructionDecoder, ScriptMode};
use ivalice::opcode_tables;
use test_log::test;

fn build_slot(script: &[u8], messages: &[u8]) -> Vec<u8> {
    let message_offset = 4 + script.len();
    let mut slot = Vec::with_capacity(FFTPACK_SLOT_SIZE);
    slot.extend_from_slice(&(message_offset as u32).to_le_bytes());
    slot.extend_from_slice(script);
    slot.extend_from_slice(messages);
    slot.resize(FFTPACK_SLOT_SIZE, 0);
    slot
}

#[test]
fn tables_verify_before_anything_else() {
    opcode_tables::verify_tables().unwrap();
}

#[test]
fn fftpack_slot_disassembles_end_to_end() {
    // DisplayMessage showing message 1, then PlaySound, then _EventEnd
    let mut script = vec![0x10, 0x00, 0x00, 0x01, 0x00];
    script.extend_from_slice(&[0x00; 10]);
    script.extend_from_slice(&[0x21, 0x2C, 0x01]);
    script.push(0xDB);
    // two messages: "HI{NewLine}{End}" and "OK{Close}"
    let messages = [
        0x11, 0x12, 0xF8, 0xFE, // H I {NewLine} {End}
        0x18, 0x14, 0xFF, // O K {Close}
    ];
    let container = build_slot(&script, &messages);

    let mode = GameMode::FFTPack;
    let carved = container::carve_fftpack(&container, 0).unwrap();
    let table = carved.messages.as_ref().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].to_string(), "HI{NewLine}{End}");
    assert_eq!(table[1].to_string(), "OK{Close}");

    let output = Disassembler::new(carved.script, mode.script_mode())
        .with_messages(table)
        .disassemble()
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("DisplayMessage"), "{}", lines[0]);
    assert!(lines[0].contains("OK{Close}"), "{}", lines[0]);
    assert!(lines[1].starts_with("PlaySound"), "{}", lines[1]);
    assert!(lines[1].contains(" 300"), "{}", lines[1]);
    assert_eq!(lines[2], "_EventEnd");
}

#[test]
fn walk_covers_every_byte_without_overlap() {
    // a mix of no-operand, short, and long instructions under both dialects
    let script = [
        0x16, // WaitTask
        0x21, 0x01, 0x00, // PlaySound
        0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, // MoveCamera, 16 operand bytes
        0xD1, 0x04, // SeekCodeForward
        0xF2, // _Pad
    ];
    for mode in [ScriptMode::Classic, ScriptMode::Enhanced] {
        let mut expected_offset = 0;
        for instruction in InstructionDecoder::new(&script, mode) {
            assert_eq!(instruction.offset, expected_offset);
            expected_offset += 1 + instruction.size;
        }
        assert_eq!(expected_offset, script.len());
    }
}

#[test]
fn unknown_opcodes_do_not_derail_the_walk() {
    // 0x00 has no known handler; the walk continues at the next byte
    let script = [0x00, 0x16, 0x00, 0xF2];
    let decoded: Vec<_> = InstructionDecoder::new(&script, ScriptMode::Classic).collect();
    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded[1].name(), "WaitTask");
    assert_eq!(decoded[3].name(), "_Pad");
}

#[test]
fn classic_and_enhanced_disagree_only_where_documented() {
    // the dialects differ for the dialog opcodes and 0xEB
    for opcode in 0..=255u8 {
        let classic = opcode_tables::operand_size(opcode, ScriptMode::Classic);
        let enhanced = opcode_tables::operand_size(opcode, ScriptMode::Enhanced);
        match opcode {
            0x10 | 0x51 | 0xEB => assert_ne!(classic, enhanced, "opcode {:#04X}", opcode),
            _ => assert_eq!(classic, enhanced, "opcode {:#04X}", opcode),
        }
    }
}
