//! Command frames and bus transfers.

use super::opcode;

/// Longest frame in the table: `SET_RAINBOW` plus seven operands.
pub const MAX_FRAME_LEN: usize = 8;

/// One opcode and its fixed operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    len: u8,
}

impl Frame {
    /// Build a frame from an opcode and its operands.
    ///
    /// The operand count must match [`opcode::operand_count`]; this is
    /// checked in debug builds only. Operands beyond [`MAX_FRAME_LEN`] - 1
    /// are dropped.
    pub fn new(
        opcode: u8,
        operands: &[u8],
    ) -> Self {
        debug_assert_eq!(opcode::operand_count(opcode), Some(operands.len()));
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[0] = opcode;
        let n = operands.len().min(MAX_FRAME_LEN - 1);
        buf[1..=n].copy_from_slice(&operands[..n]);
        Self {
            buf,
            len: (n + 1) as u8,
        }
    }

    pub fn opcode(&self) -> u8 {
        self.buf[0]
    }

    pub fn operands(&self) -> &[u8] {
        &self.buf[1..self.len as usize]
    }

    /// Wire bytes, opcode first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

/// Frames sent inside one chip-select window.
///
/// A transfer carries one frame, or two when sending them back to back is
/// equivalent to sending them separately (set color, then assign it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    head: Frame,
    tail: Option<Frame>,
}

impl Transfer {
    pub fn single(frame: Frame) -> Self {
        Self {
            head: frame,
            tail: None,
        }
    }

    /// Fuse two frames into one transaction.
    pub fn fused(
        first: Frame,
        second: Frame,
    ) -> Self {
        Self {
            head: first,
            tail: Some(second),
        }
    }

    pub fn is_fused(&self) -> bool {
        self.tail.is_some()
    }

    pub fn head(&self) -> &Frame {
        &self.head
    }

    pub fn tail(&self) -> Option<&Frame> {
        self.tail.as_ref()
    }

    /// Frames in transmission order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        core::iter::once(&self.head).chain(self.tail.as_ref())
    }

    /// Total bytes on the wire.
    pub fn wire_len(&self) -> usize {
        self.frames().map(|f| f.as_bytes().len()).sum()
    }
}

impl From<Frame> for Transfer {
    fn from(frame: Frame) -> Self {
        Transfer::single(frame)
    }
}
