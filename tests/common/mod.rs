#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use shift7seg::{Config, Pins, ShiftDisplay};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    OutputEnable,
    Clock,
    Latch,
    Data,
}

pub type Log = Rc<RefCell<Vec<(Line, bool)>>>;

pub struct MockPin {
    pub line: Line,
    log: Log,
    fail: bool,
}

impl MockPin {
    fn set(&mut self, level: bool) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.log.borrow_mut().push((self.line, level));
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

pub type MockDisplay<const N: usize> = ShiftDisplay<MockPin, MockPin, MockPin, MockPin, N>;

pub fn pins(log: &Log, failing: Option<Line>) -> Pins<MockPin, MockPin, MockPin, MockPin> {
    let pin = |line| MockPin {
        line,
        log: log.clone(),
        fail: failing == Some(line),
    };
    Pins {
        output_enable: pin(Line::OutputEnable),
        clock: pin(Line::Clock),
        latch: pin(Line::Latch),
        data: pin(Line::Data),
    }
}

pub fn mock_display<const N: usize>(config: Config) -> (MockDisplay<N>, Log) {
    let log = Log::default();
    (ShiftDisplay::new(pins(&log, None), config), log)
}

pub fn failing_display<const N: usize>(line: Line) -> (MockDisplay<N>, Log) {
    let log = Log::default();
    (ShiftDisplay::new(pins(&log, Some(line)), Config::default()), log)
}

pub fn count(log: &Log, event: (Line, bool)) -> usize {
    log.borrow().iter().filter(|e| **e == event).count()
}

pub fn clock_pulses(log: &Log) -> usize {
    count(log, (Line::Clock, true))
}

pub fn latch_pulses(log: &Log) -> usize {
    count(log, (Line::Latch, true))
}

/// Data level seen by each rising clock edge, in transmission order.
pub fn shifted_bits(log: &Log) -> Vec<bool> {
    let mut data = false;
    let mut bits = Vec::new();
    for (line, level) in log.borrow().iter() {
        match line {
            Line::Data => data = *level,
            Line::Clock if *level => bits.push(data),
            _ => {}
        }
    }
    bits
}

/// Shifted bits regrouped per slot, first bit as bit 7.
pub fn shifted_bytes(log: &Log) -> Vec<u8> {
    shifted_bits(log)
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, bit| acc << 1 | *bit as u8))
        .collect()
}

pub struct MockInput {
    levels: VecDeque<bool>,
}

impl MockInput {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
        }
    }
}

impl ErrorType for MockInput {
    type Error = ErrorKind;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.levels.pop_front().ok_or(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
