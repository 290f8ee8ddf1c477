#![no_std]

mod fmt;

mod config;
mod constants;
pub mod stopwatch;
pub mod trigger;

use core::iter::Peekable;
use core::ops::{Deref, DerefMut};
use core::str::Chars;

pub use config::*;
pub use constants::*;
use embedded_hal::digital::OutputPin;
pub use stopwatch::{Frame, Stopwatch};
pub use trigger::{Edge, ResetTrigger};

/// The four output lines of the shift register chain.
pub struct Pins<OE, CLK, LE, SDO> {
    pub output_enable: OE,
    pub clock: CLK,
    pub latch: LE,
    pub data: SDO,
}

/// Seven-segment display behind `NUM_DIGITS` chained shift registers.
///
/// Digits are shifted one byte at a time, bit 7 first, and only become visible
/// when the latch is pulsed after the whole frame went out.
pub struct ShiftDisplay<OE, CLK, LE, SDO, const NUM_DIGITS: usize> {
    pins: Pins<OE, CLK, LE, SDO>,
    config: Config,
    visible: bool,
}

impl<OE, CLK, LE, SDO, E, const NUM_DIGITS: usize> ShiftDisplay<OE, CLK, LE, SDO, NUM_DIGITS>
where
    OE: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LE: OutputPin<Error = E>,
    SDO: OutputPin<Error = E>,
{
    pub fn new(pins: Pins<OE, CLK, LE, SDO>, config: Config) -> Self {
        Self {
            pins,
            config,
            visible: false,
        }
    }

    pub fn destroy(self) -> Pins<OE, CLK, LE, SDO> {
        self.pins
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Puts every line in its idle state and wipes whatever the registers
    /// still hold from a previous run. The display stays hidden.
    pub fn init(&mut self) -> Result<(), ShiftDisplayError<E>> {
        self.disable()?;
        self.pins.latch.set_low()?;
        self.pins.clock.set_low()?;
        self.clear()?;
        debug!("shift display ready, {=usize} digits", NUM_DIGITS);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ShiftDisplayError<E>> {
        for _ in 0..NUM_DIGITS {
            self.shift_glyph(Glyph::BLANK)?;
        }
        self.latch()
    }

    /// Shifts out a whole frame and latches it with a single pulse.
    ///
    /// Every character is resolved before any line moves, so an unsupported
    /// character leaves the registers and the visible digits untouched.
    pub fn render(&mut self, frame: &str) -> Result<(), ShiftDisplayError<E>> {
        let mode = self.config.point_mode;
        if let Some(err) = Slots::new(frame, mode).find_map(Result::err) {
            warn!("cannot render {=char}", err.0);
            return Err(err.into_error());
        }

        for glyph in Slots::new(frame, mode) {
            let glyph = glyph.map_err(UnsupportedChar::into_error::<E>)?;
            self.shift_glyph(glyph)?;
        }
        self.latch()
    }

    /// Shifts a single character without latching it.
    pub fn send_digit(&mut self, c: char, point: bool) -> Result<(), ShiftDisplayError<E>> {
        let glyph = Glyph::lookup(c).map_err(UnsupportedChar::into_error::<E>)?;
        let glyph = if point { glyph.with_point() } else { glyph };
        self.shift_glyph(glyph)
    }

    pub fn latch(&mut self) -> Result<(), ShiftDisplayError<E>> {
        self.pins.latch.set_high()?;
        self.pins.latch.set_low()?;
        Ok(())
    }

    pub fn enable(&mut self) -> Result<(), ShiftDisplayError<E>> {
        self.set_visible(true)
    }

    pub fn disable(&mut self) -> Result<(), ShiftDisplayError<E>> {
        self.set_visible(false)
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), ShiftDisplayError<E>> {
        let level = self.config.output_enable.level(visible);
        self.pins.output_enable.set_state(level.into())?;
        self.visible = visible;
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Blanks the display. Safe to call again on an already blank display.
    pub fn shutdown(&mut self) -> Result<(), ShiftDisplayError<E>> {
        self.disable()?;
        debug!("shift display off");
        Ok(())
    }

    /// Turns the display on for as long as the returned guard lives.
    pub fn visible(
        &mut self,
    ) -> Result<OutputGuard<'_, OE, CLK, LE, SDO, NUM_DIGITS>, ShiftDisplayError<E>> {
        self.enable()?;
        Ok(OutputGuard { display: self })
    }

    fn shift_glyph(&mut self, glyph: Glyph) -> Result<(), ShiftDisplayError<E>> {
        if self.config.verbose {
            trace!("shifting {=u8:b}", glyph.bits());
        }
        // the chain's output pins run in reverse, so the top segment goes first
        for i in (0..SEGMENTS_PER_DIGIT).rev() {
            self.pins.clock.set_low()?;
            self.pins.data.set_state(glyph.segment(i).into())?;
            self.pins.clock.set_high()?;
        }
        Ok(())
    }
}

/// Keeps the display visible; hides it again when dropped.
pub struct OutputGuard<'a, OE, CLK, LE, SDO, const NUM_DIGITS: usize>
where
    OE: OutputPin,
    CLK: OutputPin<Error = OE::Error>,
    LE: OutputPin<Error = OE::Error>,
    SDO: OutputPin<Error = OE::Error>,
{
    display: &'a mut ShiftDisplay<OE, CLK, LE, SDO, NUM_DIGITS>,
}

impl<OE, CLK, LE, SDO, const NUM_DIGITS: usize> Deref
    for OutputGuard<'_, OE, CLK, LE, SDO, NUM_DIGITS>
where
    OE: OutputPin,
    CLK: OutputPin<Error = OE::Error>,
    LE: OutputPin<Error = OE::Error>,
    SDO: OutputPin<Error = OE::Error>,
{
    type Target = ShiftDisplay<OE, CLK, LE, SDO, NUM_DIGITS>;

    fn deref(&self) -> &Self::Target {
        self.display
    }
}

impl<OE, CLK, LE, SDO, const NUM_DIGITS: usize> DerefMut
    for OutputGuard<'_, OE, CLK, LE, SDO, NUM_DIGITS>
where
    OE: OutputPin,
    CLK: OutputPin<Error = OE::Error>,
    LE: OutputPin<Error = OE::Error>,
    SDO: OutputPin<Error = OE::Error>,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.display
    }
}

impl<OE, CLK, LE, SDO, const NUM_DIGITS: usize> Drop
    for OutputGuard<'_, OE, CLK, LE, SDO, NUM_DIGITS>
where
    OE: OutputPin,
    CLK: OutputPin<Error = OE::Error>,
    LE: OutputPin<Error = OE::Error>,
    SDO: OutputPin<Error = OE::Error>,
{
    fn drop(&mut self) {
        if self.display.shutdown().is_err() {
            warn!("output enable did not release");
        }
    }
}

/// Walks a frame slot by slot, applying the configured point handling.
struct Slots<'a> {
    chars: Peekable<Chars<'a>>,
    mode: PointMode,
}

impl<'a> Slots<'a> {
    fn new(frame: &'a str, mode: PointMode) -> Self {
        Self {
            chars: frame.chars().peekable(),
            mode,
        }
    }
}

impl Iterator for Slots<'_> {
    type Item = Result<Glyph, UnsupportedChar>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let glyph = match Glyph::lookup(c) {
            Ok(glyph) => glyph,
            Err(err) => return Some(Err(err)),
        };

        // a point with nothing before it still gets a (blank) slot
        if self.mode == PointMode::Folded && c != POINT && self.chars.peek() == Some(&POINT) {
            self.chars.next();
            return Some(Ok(glyph.with_point()));
        }
        Some(Ok(glyph))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftDisplayError<E> {
    PinError(E),
    UnsupportedChar(char),
}

impl<E> From<E> for ShiftDisplayError<E> {
    fn from(error: E) -> Self {
        ShiftDisplayError::PinError(error)
    }
}

impl UnsupportedChar {
    fn into_error<E>(self) -> ShiftDisplayError<E> {
        ShiftDisplayError::UnsupportedChar(self.0)
    }
}
