#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use core::cell::Cell;

use arduino_hal::prelude::*;
use avr_device::interrupt::Mutex;
use panic_halt as _;
use shift7seg::{Config, Edge, Pins, PointMode, Polarity, ResetTrigger, ShiftDisplay, Stopwatch};

const NUM_DIGITS: usize = 4;
const POLL_MS: u32 = 100;

// TC0 in CTC mode: 16 MHz / 1024 / 125 ticks = one compare match every 8 ms
const PRESCALER: u32 = 1024;
const TIMER_COUNTS: u32 = 125;
const MILLIS_INCREMENT: u64 = (PRESCALER * TIMER_COUNTS / 16_000) as u64;

static MILLIS: Mutex<Cell<u64>> = Mutex::new(Cell::new(0));

fn millis_init(tc0: arduino_hal::pac::TC0) {
    tc0.tccr0a().write(|w| w.wgm0().ctc());
    tc0.ocr0a().write(|w| w.set(TIMER_COUNTS as u8));
    tc0.tccr0b().write(|w| w.cs0().prescale_1024());
    tc0.timsk0().write(|w| w.ocie0a().set_bit());

    avr_device::interrupt::free(|cs| MILLIS.borrow(cs).set(0));
}

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter = MILLIS.borrow(cs);
        counter.set(counter.get() + MILLIS_INCREMENT);
    })
}

fn millis() -> u64 {
    avr_device::interrupt::free(|cs| MILLIS.borrow(cs).get())
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    millis_init(dp.TC0);
    // SAFETY: the only handler touches MILLIS inside a critical section
    unsafe { avr_device::interrupt::enable() };

    let config = Config::new()
        .point_mode(PointMode::Folded)
        .output_enable(Polarity::ActiveHigh);
    let mut display: ShiftDisplay<_, _, _, _, NUM_DIGITS> = ShiftDisplay::new(
        Pins {
            output_enable: pins.d2.into_output(),
            clock: pins.d3.into_output(),
            latch: pins.d4.into_output(),
            data: pins.d5.into_output(),
        },
        config,
    );
    display.init().unwrap();

    // button pulls the line low when pressed
    let mut button = ResetTrigger::new(pins.d6.into_pull_up_input(), Edge::Falling);

    ufmt::uwriteln!(&mut serial, "Diagnostics...").unwrap_infallible();
    let mut lit = display.visible().unwrap();
    for frame in ["PA55", "BCBC", "8.8.8.8."] {
        lit.render(frame).unwrap();
        arduino_hal::delay_ms(500);
    }

    ufmt::uwriteln!(&mut serial, "Counting...").unwrap_infallible();
    let mut stopwatch = Stopwatch::new(millis());
    loop {
        let now = millis();
        if button.poll().unwrap_infallible() {
            ufmt::uwriteln!(&mut serial, "Restart").unwrap_infallible();
            stopwatch.reset(now);
        }
        stopwatch.update(now);
        lit.render(&stopwatch.render()).unwrap();

        arduino_hal::delay_ms(POLL_MS);
    }
}
