//! One-line script disassembly for audit output.
//!
//! Instruction decoding is delegated to the `bitcoin` crate's
//! `Script::instructions()` iterator; this module only decides how each
//! instruction is rendered.

use bitcoin::hex::DisplayHex;
use bitcoin::opcodes::{Class, ClassifyContext, Opcode};
use bitcoin::script::Instruction;
use bitcoin::Script;

use crate::error::EncodeError;

/// Disassemble `script` into space-separated tokens.
///
/// Data pushes render as lowercase hex and the empty push as `0`. Small
/// integer opcodes (`OP_1NEGATE`, `OP_1`..`OP_16`) render as their numeric
/// value; every other opcode renders by its mnemonic (see [`mnemonic`]). A
/// push that runs past the end of the script is an error.
pub fn disassemble(script: &Script) -> Result<String, EncodeError> {
    let tokens = script
        .instructions()
        .map(|instruction| instruction.map(render_instruction))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tokens.join(" "))
}

/// Best-effort variant of [`disassemble`] for log output. A script that fails
/// to decode yields an empty string, same as an empty script.
#[must_use]
pub fn disasm_string(script: &Script) -> String {
    disassemble(script).unwrap_or_else(|err| {
        tracing::debug!(
            error = %err,
            script_len = script.len(),
            "script disassembly failed, using empty placeholder"
        );
        String::new()
    })
}

fn render_instruction(instruction: Instruction<'_>) -> String {
    match instruction {
        Instruction::PushBytes(bytes) if bytes.as_bytes().is_empty() => "0".to_string(),
        Instruction::PushBytes(bytes) => bytes.as_bytes().to_lower_hex_string(),
        Instruction::Op(opcode) => match opcode.classify(ClassifyContext::Legacy) {
            Class::PushNum(n) => n.to_string(),
            _ => mnemonic(opcode),
        },
    }
}

/// Opcode name as bridge tooling prints it. Differs from the `bitcoin`
/// crate's `Display` only where that uses short or placeholder names.
fn mnemonic(opcode: Opcode) -> String {
    match opcode.to_u8() {
        0xb1 => "OP_CHECKLOCKTIMEVERIFY".to_string(),
        0xb2 => "OP_CHECKSEQUENCEVERIFY".to_string(),
        0xfa => "OP_SMALLINTEGER".to_string(),
        0xfb => "OP_PUBKEYS".to_string(),
        0xfd => "OP_PUBKEYHASH".to_string(),
        0xfe => "OP_PUBKEY".to_string(),
        // Undefined opcodes, displayed by the crate as OP_RETURN_<n>.
        code @ (0xbb..=0xf9 | 0xfc) => format!("OP_UNKNOWN{code}"),
        _ => opcode.to_string(),
    }
}
