//! Session tests against an in-memory endpoint

use std::collections::VecDeque;
use std::fmt;

use mpsse_core::block::parse_blocks;
use mpsse_core::clock::BaseClock;
use mpsse_core::protocol::*;
use mpsse_core::{BitOrder, Error, Session, Transport};

#[derive(Debug)]
struct MockError(&'static str);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records every write and answers reads from a queue, at most
/// `max_read` bytes per call
struct MockChip {
    written: Vec<Vec<u8>>,
    rx: VecDeque<u8>,
    max_read: usize,
    purges: usize,
    short_write: bool,
}

impl MockChip {
    fn new() -> Self {
        MockChip {
            written: Vec::new(),
            rx: VecDeque::new(),
            max_read: usize::MAX,
            purges: 0,
            short_write: false,
        }
    }

    fn respond(&mut self, data: &[u8]) {
        self.rx.extend(data);
    }
}

impl Transport for MockChip {
    type Error = MockError;

    fn write_data(&mut self, data: &[u8]) -> Result<usize, MockError> {
        self.written.push(data.to_vec());
        if self.short_write {
            Ok(data.len() / 2)
        } else {
            Ok(data.len())
        }
    }

    fn read_data(&mut self, buf: &mut [u8]) -> Result<usize, MockError> {
        if self.rx.is_empty() {
            return Err(MockError("no data"));
        }
        let n = buf.len().min(self.rx.len()).min(self.max_read);
        for byte in buf.iter_mut().take(n) {
            *byte = self.rx.pop_front().unwrap();
        }
        Ok(n)
    }

    fn purge_rx(&mut self) -> Result<(), MockError> {
        self.purges += 1;
        Ok(())
    }
}

#[test]
fn test_init_sequence() {
    let mut session = Session::new(MockChip::new(), BitOrder::Msb);
    let actual = session.init(1_000_000).unwrap();
    assert_eq!(actual, 1_000_000);

    let chip = session.transport_mut();
    assert_eq!(
        chip.written,
        vec![
            vec![LOOPBACK_END],
            vec![EN_DIV_5, TCK_DIVISOR, 5, 0],
            vec![SET_BITS_LOW, 0x09, 0x0B],
        ]
    );
}

#[test]
fn test_set_clock_records_setting() {
    let mut session = Session::new(MockChip::new(), BitOrder::Msb);
    assert!(session.clock().is_none());

    assert_eq!(session.set_clock(7_000_000), Ok(7_500_000));
    let clock = session.clock().unwrap();
    assert_eq!(clock.base, BaseClock::SixtyMhz);
    assert_eq!(clock.divisor, 3);

    // A rejected frequency sends nothing and keeps the old setting
    assert_eq!(session.set_clock(0), Err(Error::InvalidFrequency(0)));
    assert_eq!(session.clock().unwrap().frequency, 7_500_000);
    assert_eq!(session.transport_mut().written.len(), 1);
}

#[test]
fn test_start_stop() {
    let mut session = Session::new(MockChip::new(), BitOrder::Msb);
    session.start().unwrap();
    session.stop().unwrap();
    assert_eq!(
        session.into_transport().written,
        vec![
            vec![SET_BITS_LOW, 0x01, 0x0B],
            vec![SET_BITS_LOW, 0x09, 0x0B],
        ]
    );
}

#[test]
fn test_write_frames_in_one_call() {
    let mut session = Session::new(MockChip::new(), BitOrder::Lsb)
        .with_transfer_size(4)
        .unwrap();
    let payload: Vec<u8> = (1..=10).collect();
    session.write(&payload).unwrap();

    let chip = session.into_transport();
    assert_eq!(chip.written.len(), 1);

    let blocks: Vec<_> = parse_blocks(&chip.written[0])
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(blocks.len(), 3);
    assert!(blocks
        .iter()
        .all(|b| b.opcode == MPSSE_DO_WRITE | MPSSE_LSB));
    let rebuilt: Vec<u8> = blocks.iter().flat_map(|b| b.data.iter().copied()).collect();
    assert_eq!(rebuilt, payload);
}

#[test]
fn test_write_empty_is_noop() {
    let mut session = Session::new(MockChip::new(), BitOrder::Msb);
    session.write(&[]).unwrap();
    assert!(session.transport_mut().written.is_empty());
}

#[test]
fn test_short_write_fails() {
    let mut chip = MockChip::new();
    chip.short_write = true;
    let mut session = Session::new(chip, BitOrder::Msb);
    assert_eq!(session.write(&[1, 2, 3, 4]), Err(Error::WriteFailed));
}

#[test]
fn test_read_chunks_and_purges() {
    let mut chip = MockChip::new();
    chip.max_read = 3;
    chip.respond(&[10, 11, 12, 13, 14, 15, 16]);

    let mut session = Session::new(chip, BitOrder::Msb)
        .with_transfer_size(4)
        .unwrap();
    let data = session.read(7).unwrap();
    assert_eq!(data, [10, 11, 12, 13, 14, 15, 16]);

    let chip = session.into_transport();
    assert_eq!(
        chip.written,
        vec![
            vec![MPSSE_DO_READ | MPSSE_READ_NEG, 3, 0, SEND_IMMEDIATE],
            vec![MPSSE_DO_READ | MPSSE_READ_NEG, 2, 0, SEND_IMMEDIATE],
        ]
    );
    // One purge per chunk
    assert_eq!(chip.purges, 2);
}

#[test]
fn test_read_short() {
    let mut chip = MockChip::new();
    chip.respond(&[1, 2]);
    let mut session = Session::new(chip, BitOrder::Msb);
    assert_eq!(
        session.read(5),
        Err(Error::ShortRead {
            expected: 5,
            actual: 2
        })
    );
    assert_eq!(session.transport_mut().purges, 1);
}

#[test]
fn test_transfer_full_duplex() {
    let mut chip = MockChip::new();
    chip.respond(&[0xA0, 0xA1, 0xA2]);
    let mut session = Session::new(chip, BitOrder::Msb)
        .with_transfer_size(2)
        .unwrap();

    let data = session.transfer(&[1, 2, 3]).unwrap();
    assert_eq!(data, [0xA0, 0xA1, 0xA2]);

    let opcode = MPSSE_DO_WRITE | MPSSE_DO_READ | MPSSE_READ_NEG;
    let chip = session.into_transport();
    assert_eq!(
        chip.written,
        vec![
            vec![opcode, 1, 0, 1, 2, SEND_IMMEDIATE],
            vec![opcode, 0, 0, 3, SEND_IMMEDIATE],
        ]
    );
}

#[test]
fn test_invalid_transfer_size() {
    assert!(matches!(
        Session::new(MockChip::new(), BitOrder::Msb).with_transfer_size(0),
        Err(Error::InvalidTransferSize(0))
    ));
}

#[test]
fn test_independent_sessions() {
    let mut a = Session::new(MockChip::new(), BitOrder::Msb);
    let mut b = Session::new(MockChip::new(), BitOrder::Lsb);
    a.write(&[1]).unwrap();
    b.write(&[1]).unwrap();
    assert_eq!(a.transport_mut().written[0][0], MPSSE_DO_WRITE);
    assert_eq!(b.transport_mut().written[0][0], MPSSE_DO_WRITE | MPSSE_LSB);
}
