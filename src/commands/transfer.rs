//! Device write and read commands

use std::fs::File;
use std::io::Write;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use mpsse_core::{Session, Transport};

/// Chunk size for reads with progress (4 KiB)
const READ_CHUNK_SIZE: usize = 4096;

fn create_progress_bar(total: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Deassert chip select after a transfer, keeping the transfer's error first
fn release_cs<T: Transport, R>(
    session: &mut Session<T>,
    cs: bool,
    result: mpsse_core::Result<R>,
) -> Result<R, Box<dyn std::error::Error>> {
    if cs {
        if let Err(e) = session.stop() {
            if result.is_ok() {
                return Err(e.into());
            }
            log::warn!("Failed to release chip select: {}", e);
        }
    }
    Ok(result?)
}

/// Clock `data` out, optionally framed by chip select
pub fn write_data<T: Transport>(
    session: &mut Session<T>,
    data: &[u8],
    cs: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if cs {
        session.start()?;
    }
    let result = session.write(data);
    release_cs(session, cs, result)
}

fn read_chunks<T: Transport>(
    session: &mut Session<T>,
    len: usize,
    pb: Option<&ProgressBar>,
) -> mpsse_core::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        let chunk = (len - data.len()).min(READ_CHUNK_SIZE);
        data.extend_from_slice(&session.read(chunk)?);
        if let Some(pb) = pb {
            pb.set_position(data.len() as u64);
        }
    }
    Ok(data)
}

/// Clock `len` bytes in, optionally framed by chip select
pub fn read_data<T: Transport>(
    session: &mut Session<T>,
    len: usize,
    cs: bool,
    pb: Option<&ProgressBar>,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if cs {
        session.start()?;
    }
    let result = read_chunks(session, len, pb);
    release_cs(session, cs, result)
}

/// Run the write command
pub fn run_write<T: Transport>(
    session: &mut Session<T>,
    input: &Path,
    cs: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    write_data(session, &data, cs)?;
    println!("Wrote {} bytes from {:?}", data.len(), input);
    Ok(())
}

/// Run the read command
pub fn run_read<T: Transport>(
    session: &mut Session<T>,
    len: usize,
    output: &Path,
    cs: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_progress_bar(len as u64)?;
    let data = read_data(session, len, cs, Some(&pb))?;
    pb.finish_with_message("Read complete");

    let mut file = File::create(output)?;
    file.write_all(&data)?;

    println!("Wrote {} bytes to {:?}", data.len(), output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpsse_core::protocol::{MPSSE_DO_READ, MPSSE_DO_WRITE, MPSSE_READ_NEG, SET_BITS_LOW};
    use mpsse_core::BitOrder;
    use std::collections::VecDeque;

    /// Loopback-free chip model: records writes, answers reads from a queue
    #[derive(Default)]
    struct FakeChip {
        written: Vec<Vec<u8>>,
        rx: VecDeque<u8>,
        /// Refuse writes whose first byte is this opcode
        reject_opcode: Option<u8>,
    }

    impl Transport for FakeChip {
        type Error = std::io::Error;

        fn write_data(&mut self, data: &[u8]) -> std::io::Result<usize> {
            if data.first().copied() == self.reject_opcode {
                return Err(std::io::ErrorKind::BrokenPipe.into());
            }
            self.written.push(data.to_vec());
            Ok(data.len())
        }

        fn read_data(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.rx.len());
            if n == 0 {
                return Err(std::io::ErrorKind::UnexpectedEof.into());
            }
            for (dst, src) in buf.iter_mut().zip(self.rx.drain(..n)) {
                *dst = src;
            }
            Ok(n)
        }

        fn purge_rx(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_with_cs() {
        let mut session = Session::new(FakeChip::default(), BitOrder::Msb);
        write_data(&mut session, &[0xDE, 0xAD], true).unwrap();

        let written = &session.transport_mut().written;
        assert_eq!(written.len(), 3);
        assert_eq!(written[0], [SET_BITS_LOW, 0x01, 0x0B]);
        assert_eq!(written[1], [MPSSE_DO_WRITE, 1, 0, 0xDE, 0xAD]);
        assert_eq!(written[2], [SET_BITS_LOW, 0x09, 0x0B]);
    }

    #[test]
    fn test_write_without_cs() {
        let mut session = Session::new(FakeChip::default(), BitOrder::Msb);
        write_data(&mut session, &[1], false).unwrap();
        assert_eq!(session.transport_mut().written.len(), 1);
    }

    #[test]
    fn test_read_in_chunks() {
        let mut chip = FakeChip::default();
        let expected: Vec<u8> = (0..READ_CHUNK_SIZE + 10).map(|i| i as u8).collect();
        chip.rx.extend(&expected);

        let mut session = Session::new(chip, BitOrder::Msb);
        let data = read_data(&mut session, expected.len(), false, None).unwrap();
        assert_eq!(data, expected);

        let written = &session.transport_mut().written;
        assert_eq!(written.len(), 2);
        assert_eq!(written[0][0], MPSSE_DO_READ | MPSSE_READ_NEG);
        // Second chunk asks for the remaining 10 bytes
        assert_eq!(written[1][1..3], [9, 0]);
    }

    #[test]
    fn test_read_short_fails() {
        let mut chip = FakeChip::default();
        chip.rx.extend([1u8, 2, 3]);
        let mut session = Session::new(chip, BitOrder::Msb);
        assert!(read_data(&mut session, 8, true, None).is_err());

        // Chip select is released after the failed read
        let written = &session.transport_mut().written;
        assert_eq!(written.last().unwrap(), &[SET_BITS_LOW, 0x09, 0x0B]);
    }

    #[test]
    fn test_failed_write_releases_cs() {
        let chip = FakeChip {
            reject_opcode: Some(MPSSE_DO_WRITE),
            ..FakeChip::default()
        };
        let mut session = Session::new(chip, BitOrder::Msb);
        let err = write_data(&mut session, &[0xAA], true).unwrap_err();
        assert_eq!(err.to_string(), mpsse_core::Error::WriteFailed.to_string());

        let written = &session.transport_mut().written;
        assert_eq!(written.len(), 2);
        assert_eq!(written[0], [SET_BITS_LOW, 0x01, 0x0B]);
        assert_eq!(written[1], [SET_BITS_LOW, 0x09, 0x0B]);
    }
}
