//! Latest-wins fingertip hand-off
//!
//! The tracker and the game loop run at unrelated rates and only the newest
//! position is worth anything, so the channel is a single atomic slot:
//! publishing overwrites, taking clears, neither side ever waits.
//!
//! Slot layout (`u64`): bit 63 = present, bits 31..62 = x, bits 0..30 = y.
//! Screen coordinates are non-negative; negative input is clamped to 0.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::IVec2;

const PRESENT: u64 = 1 << 63;
const EMPTY: u64 = 0;
const COORD_MASK: u64 = (1 << 31) - 1;

#[inline]
fn encode(p: IVec2) -> u64 {
    let x = p.x.max(0) as u64 & COORD_MASK;
    let y = p.y.max(0) as u64 & COORD_MASK;
    PRESENT | (x << 31) | y
}

#[inline]
fn decode(bits: u64) -> Option<IVec2> {
    if bits & PRESENT == 0 {
        return None;
    }
    let x = ((bits >> 31) & COORD_MASK) as i32;
    let y = (bits & COORD_MASK) as i32;
    Some(IVec2::new(x, y))
}

/// Single-producer/single-consumer, bounded to one value, lossy
#[derive(Debug, Default)]
pub struct PositionChannel {
    slot: AtomicU64,
    published: AtomicU64,
    overwritten: AtomicU64,
}

impl PositionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `position`, replacing anything not yet taken
    pub fn publish(&self, position: IVec2) {
        let previous = self.slot.swap(encode(position), Ordering::AcqRel);
        self.published.fetch_add(1, Ordering::Relaxed);
        if previous != EMPTY {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Take the newest position published since the last take, if any
    pub fn try_take(&self) -> Option<IVec2> {
        decode(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    /// Positions ever published
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Positions dropped because a newer one arrived first
    pub fn overwritten(&self) -> u64 {
        self.overwritten.load(Ordering::Relaxed)
    }
}
