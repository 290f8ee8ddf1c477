//! Elapsed-time source for the display.
//!
//! The stopwatch never stops: it counts from the last reset and renders
//! `MMSS`, with a point between minutes and seconds on every other second.

use core::fmt::Write;

use heapless::String;
use num_traits::ToPrimitive;

use crate::POINT;

pub const FRAME_CAPACITY: usize = 16;
const MILLIS_PER_SECOND: i128 = 1_000;
const SECONDS_PER_MINUTE: i128 = 60;

/// Characters for one render, left to right.
pub type Frame = String<FRAME_CAPACITY>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopwatch {
    start_ms: i128,
    minutes: u32,
    seconds: u8,
    indicator: bool,
}

impl Stopwatch {
    /// Starts counting at `now`, in milliseconds from any monotonic clock.
    ///
    /// Signed clocks are fine; only the difference between readings matters.
    pub fn new<T>(now: T) -> Self
    where
        T: ToPrimitive,
    {
        let mut stopwatch = Self {
            start_ms: 0,
            minutes: 0,
            seconds: 0,
            indicator: false,
        };
        stopwatch.reset(now);
        stopwatch
    }

    pub fn reset<T>(&mut self, now: T)
    where
        T: ToPrimitive,
    {
        self.start_ms = match now.to_i128() {
            Some(now) => now,
            None => {
                warn!("unusable timestamp, restarting from 0 ms");
                0
            }
        };
        self.minutes = 0;
        self.seconds = 0;
        self.indicator = false;
        debug!("stopwatch reset at {=i128} ms", self.start_ms);
    }

    /// Recomputes minutes and seconds for `now`.
    ///
    /// The indicator flips whenever the seconds value changes, so it blinks
    /// at 1 Hz no matter how often this is polled.
    pub fn update<T>(&mut self, now: T)
    where
        T: ToPrimitive,
    {
        let elapsed_ms = match now.to_i128() {
            Some(now) if now >= self.start_ms => now.saturating_sub(self.start_ms),
            Some(_) => {
                warn!("clock went backwards, holding at zero");
                self.hold_at_zero();
                return;
            }
            None => {
                warn!("unusable timestamp, holding at zero");
                self.hold_at_zero();
                return;
            }
        };

        let total = elapsed_ms / MILLIS_PER_SECOND;
        let minutes = (total / SECONDS_PER_MINUTE).min(u32::MAX as i128) as u32;
        let seconds = (total % SECONDS_PER_MINUTE) as u8;

        if seconds != self.seconds {
            self.indicator = !self.indicator;
        }
        self.minutes = minutes;
        self.seconds = seconds;
    }

    /// Zero-padded minutes, the point when the indicator is on, then seconds.
    ///
    /// Minutes are never wrapped: past 99 the frame simply grows.
    pub fn render(&self) -> Frame {
        let mut frame = Frame::new();
        // u32 minutes, the point and two second digits always fit
        let _ = write!(frame, "{:02}", self.minutes);
        if self.indicator {
            let _ = frame.push(POINT);
        }
        let _ = write!(frame, "{:02}", self.seconds);
        frame
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn indicator(&self) -> bool {
        self.indicator
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.minutes as u64 * SECONDS_PER_MINUTE as u64 + self.seconds as u64
    }

    // indicator keeps its phase
    fn hold_at_zero(&mut self) {
        self.minutes = 0;
        self.seconds = 0;
    }
}
