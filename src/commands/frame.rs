//! Frame and inspect commands

use std::fs;
use std::path::Path;

use mpsse_core::block::{build_block_buffer, num_blocks, parse_blocks};
use mpsse_core::protocol::CMD_SIZE;

use crate::error::CliError;

/// Frame `input` into blocks carrying `opcode` and write them to `output`
pub fn run_frame(
    opcode: u8,
    input: &Path,
    output: &Path,
    transfer_size: usize,
) -> Result<(), CliError> {
    let payload = fs::read(input)?;
    log::debug!("Read {} payload bytes from {:?}", payload.len(), input);

    let framed = build_block_buffer(opcode, &payload, transfer_size)?;
    fs::write(output, &framed)?;

    println!(
        "Framed {} bytes into {} block(s) with opcode 0x{:02X}: {} bytes written to {:?}",
        payload.len(),
        num_blocks(payload.len(), transfer_size),
        opcode,
        framed.len(),
        output
    );

    Ok(())
}

/// Print every block of a framed file
pub fn run_inspect(input: &Path) -> Result<(), CliError> {
    let framed = fs::read(input)?;

    let mut offset = 0usize;
    let mut payload = 0usize;
    for (i, block) in parse_blocks(&framed).enumerate() {
        let block = block?;
        println!(
            "Block {:>4}: offset 0x{:08X}  opcode 0x{:02X}  {:>5} bytes",
            i,
            offset,
            block.opcode,
            block.data.len()
        );
        offset += CMD_SIZE + block.data.len();
        payload += block.data.len();
    }

    println!("{} framed bytes, {} payload bytes", framed.len(), payload);

    Ok(())
}
