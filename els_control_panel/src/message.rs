//! Timed message overrides.
//!
//! Messages are chains of [`DisplayFrame`]s held in one static frame store
//! and linked by [`FrameId`]. Chains are fixed data; the backlog panic chain
//! links back to itself and never ends. The only runtime state is the
//! cursor (current frame + remaining ticks) owned by [`MessageSequencer`].
//!
//! ## States
//!
//! - **Idle**: no override, the panel shows live data.
//! - **Displaying**: frame active with ticks remaining; rendered every tick.
//! - **Advancing**: ticks exhausted; the next tick moves to `next` (without
//!   rendering it) or returns to Idle and releases the panel.
//!
//! ## Cross-context writes
//!
//! The motion core raises the backlog panic from its own real-time path.
//! The cursor is packed into one `AtomicU32` so a concurrent
//! [`MessageSequencer::set_message`] is never torn, and
//! [`MessageSequencer::tick`] commits with compare-and-swap so it cannot
//! overwrite a message installed while it was deciding.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use els_common::consts::millis_to_ticks;
use els_common::glyph::{MessageGlyphs, text};
use els_common::panel::ControlPanel;
use static_assertions::const_assert;
use tracing::{error, warn};

/// Index of a frame in a frame store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u16);

impl FrameId {
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One message frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFrame {
    pub glyphs: MessageGlyphs,
    /// Display time [ticks].
    pub duration: u16,
    pub next: Option<FrameId>,
}

impl DisplayFrame {
    /// Frame from text and a display time in milliseconds.
    pub const fn new(message: &str, millis: u32, next: Option<FrameId>) -> Self {
        Self {
            glyphs: text(message),
            duration: millis_to_ticks(millis),
            next,
        }
    }
}

/// Chain heads and members of the standard frame store.
pub mod frames {
    use super::FrameId;

    pub const STARTUP: FrameId = FrameId(0);
    pub const STARTUP_VERSION: FrameId = FrameId(1);
    pub const NO_SETTINGS: FrameId = FrameId(2);
    pub const NO_SETTINGS_2: FrameId = FrameId(3);
    pub const BACKLOG_PANIC: FrameId = FrameId(4);
    pub const BACKLOG_PANIC_2: FrameId = FrameId(5);
    pub const GEAR_DIRECT: FrameId = FrameId(6);
    pub const GEAR_DIRECT_2: FrameId = FrameId(7);
    pub const GEAR_2_TO_1: FrameId = FrameId(8);
    pub const GEAR_2_TO_1_2: FrameId = FrameId(9);
    pub const GEAR_4_TO_1: FrameId = FrameId(10);
    pub const GEAR_4_TO_1_2: FrameId = FrameId(11);
    pub const GEAR_8_TO_1: FrameId = FrameId(12);
    pub const GEAR_8_TO_1_2: FrameId = FrameId(13);
}

pub const FRAME_COUNT: usize = 14;

// Frame index + 1 must fit the upper half of the packed cursor.
const_assert!(FRAME_COUNT < u16::MAX as usize);

/// Standard frame store.
pub static FRAMES: [DisplayFrame; FRAME_COUNT] = {
    use frames::*;
    [
        DisplayFrame::new("LEADSCRW", 1500, Some(STARTUP_VERSION)),
        DisplayFrame::new(concat!("ELS-", env!("CARGO_PKG_VERSION")), 1500, None),
        DisplayFrame::new("   NO   ", 500, Some(NO_SETTINGS_2)),
        DisplayFrame::new("SETTINGS", 500, None),
        DisplayFrame::new("TOO FAST", 500, Some(BACKLOG_PANIC_2)),
        DisplayFrame::new(" RESET  ", 500, Some(BACKLOG_PANIC)),
        DisplayFrame::new("  GEAR  ", 500, Some(GEAR_DIRECT_2)),
        DisplayFrame::new(" DIRECT ", 1000, None),
        DisplayFrame::new("  GEAR  ", 500, Some(GEAR_2_TO_1_2)),
        DisplayFrame::new(" 2 TO 1 ", 1000, None),
        DisplayFrame::new("  GEAR  ", 500, Some(GEAR_4_TO_1_2)),
        DisplayFrame::new(" 4 TO 1 ", 1000, None),
        DisplayFrame::new("  GEAR  ", 500, Some(GEAR_8_TO_1_2)),
        DisplayFrame::new(" 8 TO 1 ", 1000, None),
    ]
};

const IDLE: u32 = 0;

#[inline]
const fn pack(id: FrameId, remaining: u16) -> u32 {
    ((id.0 as u32 + 1) << 16) | remaining as u32
}

#[inline]
const fn unpack(cursor: u32) -> Option<(FrameId, u16)> {
    match cursor >> 16 {
        0 => None,
        hi => Some((FrameId((hi - 1) as u16), cursor as u16)),
    }
}

/// What a committed tick must do to the panel.
enum TickAction {
    Render(FrameId),
    Release,
    None,
}

/// Cursor over a frame store.
#[derive(Debug)]
pub struct MessageSequencer {
    frames: &'static [DisplayFrame],
    cursor: AtomicU32,
}

impl Default for MessageSequencer {
    fn default() -> Self {
        Self::new(&FRAMES)
    }
}

impl MessageSequencer {
    /// Sequencer over `frames`, initially Idle.
    pub const fn new(frames: &'static [DisplayFrame]) -> Self {
        Self {
            frames,
            cursor: AtomicU32::new(IDLE),
        }
    }

    fn frame(&self, id: FrameId) -> Option<&'static DisplayFrame> {
        self.frames.get(id.index())
    }

    /// Install the chain starting at `head`, replacing whatever is showing.
    pub fn set_message(&self, head: FrameId) {
        match self.frame(head) {
            Some(frame) => self.cursor.store(pack(head, frame.duration), Ordering::Release),
            None => {
                warn!(frame = head.index(), "message frame out of range, ignored");
            }
        }
    }

    /// Force Idle and release the panel. Returns whether a message was active.
    pub fn clear<P: ControlPanel>(&self, panel: &mut P) -> bool {
        let was = self.cursor.swap(IDLE, Ordering::AcqRel);
        panel.set_message(None);
        was != IDLE
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.cursor.load(Ordering::Acquire) != IDLE
    }

    /// Frame under the cursor, if any.
    pub fn current(&self) -> Option<FrameId> {
        unpack(self.cursor.load(Ordering::Acquire)).map(|(id, _)| id)
    }

    /// Ticks left on the current frame.
    pub fn remaining(&self) -> u16 {
        unpack(self.cursor.load(Ordering::Acquire)).map_or(0, |(_, r)| r)
    }

    /// Advance one tick; no-op when Idle.
    ///
    /// A frame with ticks left is rendered and counted down. An exhausted
    /// frame hands over to `next`, which is first rendered on the following
    /// tick; at the end of the chain the panel is released.
    pub fn tick<P: ControlPanel>(&self, panel: &mut P) {
        let mut cursor = self.cursor.load(Ordering::Acquire);
        loop {
            let Some((id, remaining)) = unpack(cursor) else {
                return;
            };
            let (next_cursor, action) = if remaining > 0 {
                (pack(id, remaining - 1), TickAction::Render(id))
            } else {
                match self.frame(id).and_then(|f| f.next) {
                    Some(next) => match self.frame(next) {
                        Some(f) => (pack(next, f.duration), TickAction::None),
                        None => (IDLE, TickAction::Release),
                    },
                    None => (IDLE, TickAction::Release),
                }
            };
            match self.cursor.compare_exchange_weak(
                cursor,
                next_cursor,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    match action {
                        TickAction::Render(id) => {
                            if let Some(frame) = self.frame(id) {
                                panel.set_message(Some(&frame.glyphs));
                            }
                        }
                        TickAction::Release => panel.set_message(None),
                        TickAction::None => {}
                    }
                    return;
                }
                Err(actual) => cursor = actual,
            }
        }
    }
}

/// Handle the motion core keeps to raise the step-backlog panic.
#[derive(Debug, Clone)]
pub struct BacklogAlarm {
    messages: Arc<MessageSequencer>,
}

impl BacklogAlarm {
    pub fn new(messages: Arc<MessageSequencer>) -> Self {
        Self { messages }
    }

    /// Show the endless "too fast / reset" alternation. Ticks never end it;
    /// only an explicit clear does.
    pub fn panic_step_backlog(&self) {
        error!("step backlog overrun, motion cannot keep up with the spindle");
        self.messages.set_message(frames::BACKLOG_PANIC);
    }
}
