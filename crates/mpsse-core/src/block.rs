//! Block buffer framing
//!
//! A payload is split into chunks of at most `transfer_size` bytes. Each
//! chunk becomes one block on the wire:
//!
//! ```text
//! +--------+-------------+-------------+------------------+
//! | opcode | (len-1) LSB | (len-1) MSB | len payload bytes |
//! +--------+-------------+-------------+------------------+
//! ```
//!
//! Blocks are concatenated into a single buffer owned by the caller.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::protocol::{CMD_SIZE, MAX_TRANSFER_SIZE};

/// Number of blocks needed for `len` bytes
pub fn num_blocks(len: usize, transfer_size: usize) -> usize {
    len.div_ceil(transfer_size)
}

/// Total framed length for `len` bytes, or `None` on overflow
pub fn framed_len(len: usize, transfer_size: usize) -> Option<usize> {
    num_blocks(len, transfer_size)
        .checked_mul(CMD_SIZE)?
        .checked_add(len)
}

/// Check that `transfer_size` fits a block header
pub fn check_transfer_size(transfer_size: usize) -> Result<()> {
    if transfer_size == 0 || transfer_size > MAX_TRANSFER_SIZE {
        return Err(Error::InvalidTransferSize(transfer_size));
    }
    Ok(())
}

fn push_header(buf: &mut Vec<u8>, opcode: u8, len: usize) {
    // The length field holds len - 1
    let size = (len - 1) as u16;
    buf.push(opcode);
    buf.extend_from_slice(&size.to_le_bytes());
}

fn alloc_exact(size: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| Error::OutOfMemory)?;
    Ok(buf)
}

/// Frame `payload` into blocks carrying `opcode`
///
/// An empty payload produces an empty buffer. A payload that is an exact
/// multiple of `transfer_size` ends with a full block.
pub fn build_block_buffer(opcode: u8, payload: &[u8], transfer_size: usize) -> Result<Vec<u8>> {
    check_transfer_size(transfer_size)?;

    let total = framed_len(payload.len(), transfer_size).ok_or(Error::OutOfMemory)?;
    let mut buf = alloc_exact(total)?;

    for chunk in payload.chunks(transfer_size) {
        push_header(&mut buf, opcode, chunk.len());
        buf.extend_from_slice(chunk);
    }

    log::trace!(
        "Framed {} bytes into {} block(s), {} bytes total",
        payload.len(),
        num_blocks(payload.len(), transfer_size),
        buf.len()
    );

    Ok(buf)
}

/// Build header-only blocks that clock in `len` bytes
///
/// Read commands carry no payload on the wire; only the headers are sent
/// and the device answers with `len` bytes in total.
pub fn build_read_commands(opcode: u8, len: usize, transfer_size: usize) -> Result<Vec<u8>> {
    check_transfer_size(transfer_size)?;

    let blocks = num_blocks(len, transfer_size);
    let mut buf = alloc_exact(blocks.checked_mul(CMD_SIZE).ok_or(Error::OutOfMemory)?)?;

    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(transfer_size);
        push_header(&mut buf, opcode, chunk);
        remaining -= chunk;
    }

    Ok(buf)
}

/// One decoded block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Opcode byte
    pub opcode: u8,
    /// Chunk bytes
    pub data: &'a [u8],
}

/// Iterator over the blocks of a framed buffer
///
/// Yields `Err(Error::MalformedBlock)` once and stops if the buffer ends
/// inside a block.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Result<Block<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }

        let offset = self.offset;
        if self.buf.len() < CMD_SIZE {
            self.buf = &[];
            return Some(Err(Error::MalformedBlock { offset }));
        }

        let (header, rest) = self.buf.split_at(CMD_SIZE);
        let len = u16::from_le_bytes([header[1], header[2]]) as usize + 1;
        if rest.len() < len {
            self.buf = &[];
            return Some(Err(Error::MalformedBlock { offset }));
        }

        let (data, tail) = rest.split_at(len);
        self.buf = tail;
        self.offset += CMD_SIZE + len;

        Some(Ok(Block {
            opcode: header[0],
            data,
        }))
    }
}

/// Decode a framed buffer into its blocks
pub fn parse_blocks(buf: &[u8]) -> Blocks<'_> {
    Blocks { buf, offset: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{DEFAULT_TRANSFER_SIZE, MPSSE_DO_READ, MPSSE_DO_WRITE};
    use alloc::vec;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + i / 256) as u8).collect()
    }

    fn decode(buf: &[u8]) -> Vec<Block<'_>> {
        parse_blocks(buf).collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_empty_payload() {
        let buf = build_block_buffer(MPSSE_DO_WRITE, &[], DEFAULT_TRANSFER_SIZE).unwrap();
        assert!(buf.is_empty());
        assert_eq!(parse_blocks(&buf).count(), 0);
    }

    #[test]
    fn test_single_byte() {
        let buf = build_block_buffer(0x11, &[0xA5], 16).unwrap();
        assert_eq!(buf, [0x11, 0x00, 0x00, 0xA5]);
    }

    #[test]
    fn test_70000_bytes() {
        let payload = pattern(70_000);
        let buf = build_block_buffer(MPSSE_DO_WRITE, &payload, 65_535).unwrap();
        assert_eq!(buf.len(), 70_006);

        // First header: 65534 = 0xFFFE
        assert_eq!(buf[..3], [MPSSE_DO_WRITE, 0xFE, 0xFF]);
        // Second header: 4464 = 0x1170
        assert_eq!(buf[3 + 65_535..3 + 65_535 + 3], [MPSSE_DO_WRITE, 0x70, 0x11]);

        let blocks = decode(&buf);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].data.len(), 65_535);
        assert_eq!(blocks[1].data.len(), 4_465);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_block() {
        let payload = pattern(48);
        let buf = build_block_buffer(MPSSE_DO_WRITE, &payload, 16).unwrap();
        let blocks = decode(&buf);
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.data.len() == 16));
        assert_eq!(buf.len(), 48 + 9);
    }

    #[test]
    fn test_block_properties() {
        for transfer_size in [1, 2, 3, 7, 64, 255, 256, 4096] {
            for len in [0, 1, 2, 5, 63, 64, 65, 255, 256, 257, 1000, 4097] {
                let payload = pattern(len);
                let buf = build_block_buffer(0x31, &payload, transfer_size).unwrap();
                let expected_blocks = len.div_ceil(transfer_size);

                assert_eq!(buf.len(), len + CMD_SIZE * expected_blocks);
                assert_eq!(num_blocks(len, transfer_size), expected_blocks);
                assert_eq!(framed_len(len, transfer_size), Some(buf.len()));

                let blocks = decode(&buf);
                assert_eq!(blocks.len(), expected_blocks);

                let mut rebuilt = Vec::new();
                let mut offset = 0;
                for block in &blocks {
                    assert_eq!(block.opcode, 0x31);
                    assert!((1..=transfer_size).contains(&block.data.len()));
                    let field = u16::from_le_bytes([buf[offset + 1], buf[offset + 2]]);
                    assert_eq!(field as usize + 1, block.data.len());
                    offset += CMD_SIZE + block.data.len();
                    rebuilt.extend_from_slice(block.data);
                }
                assert_eq!(rebuilt, payload);
            }
        }
    }

    #[test]
    fn test_max_transfer_size() {
        let payload = vec![0x5A; MAX_TRANSFER_SIZE + 1];
        let buf = build_block_buffer(MPSSE_DO_WRITE, &payload, MAX_TRANSFER_SIZE).unwrap();
        assert_eq!(buf[..3], [MPSSE_DO_WRITE, 0xFF, 0xFF]);
        let blocks = decode(&buf);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].data.len(), 1);
    }

    #[test]
    fn test_invalid_transfer_size() {
        assert_eq!(
            build_block_buffer(MPSSE_DO_WRITE, &[1, 2, 3], 0),
            Err(Error::InvalidTransferSize(0))
        );
        assert_eq!(
            build_block_buffer(MPSSE_DO_WRITE, &[1, 2, 3], MAX_TRANSFER_SIZE + 1),
            Err(Error::InvalidTransferSize(MAX_TRANSFER_SIZE + 1))
        );
    }

    #[test]
    fn test_read_commands() {
        let buf = build_read_commands(MPSSE_DO_READ, 10, 4).unwrap();
        assert_eq!(
            buf,
            [
                MPSSE_DO_READ, 3, 0, //
                MPSSE_DO_READ, 3, 0, //
                MPSSE_DO_READ, 1, 0,
            ]
        );
        assert!(build_read_commands(MPSSE_DO_READ, 0, 4).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_memory() {
        assert_eq!(
            build_read_commands(MPSSE_DO_READ, usize::MAX / 4, 1),
            Err(Error::OutOfMemory)
        );
        assert_eq!(framed_len(usize::MAX, 1), None);
    }

    #[test]
    fn test_parse_truncated() {
        let mut buf = build_block_buffer(MPSSE_DO_WRITE, &pattern(10), 4).unwrap();
        buf.pop();
        let results: Vec<_> = parse_blocks(&buf).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert_eq!(results[2], Err(Error::MalformedBlock { offset: 14 }));

        let results: Vec<_> = parse_blocks(&[0x10, 0x00]).collect();
        assert_eq!(results, [Err(Error::MalformedBlock { offset: 0 })]);
    }
}
