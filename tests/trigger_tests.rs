extern crate shift7seg;

mod common;

use common::*;
use embedded_hal::digital::ErrorKind;
use shift7seg::{Edge, ResetTrigger, Stopwatch};

fn fire_pattern(levels: &[bool], edge: Edge) -> Vec<bool> {
    let mut trigger = ResetTrigger::new(MockInput::new(levels), edge);
    levels.iter().map(|_| trigger.poll().unwrap()).collect()
}

#[test]
fn falling_edge_fires_once_per_press() {
    assert_eq!(
        fire_pattern(&[true, true, false, false, true, false], Edge::Falling),
        vec![false, false, true, false, false, true]
    );
}

#[test]
fn rising_edge_fires_once_per_press() {
    assert_eq!(
        fire_pattern(&[false, true, true, false, true], Edge::Rising),
        vec![false, true, false, false, true]
    );
}

#[test]
fn first_sample_only_sets_idle_level() {
    assert_eq!(fire_pattern(&[false, false], Edge::Falling), vec![false, false]);
    assert_eq!(fire_pattern(&[true], Edge::Rising), vec![false]);
}

#[test]
fn read_errors_propagate() {
    let mut trigger = ResetTrigger::new(MockInput::new(&[]), Edge::Falling);
    assert_eq!(trigger.poll(), Err(ErrorKind::Other));
}

#[test]
fn press_restarts_the_stopwatch() {
    let mut trigger = ResetTrigger::new(MockInput::new(&[true, true, false]), Edge::Falling);
    let mut stopwatch = Stopwatch::new(0u64);

    for now in [45_000u64, 46_000, 47_000] {
        if trigger.poll().unwrap() {
            stopwatch.reset(now);
        }
        stopwatch.update(now);
    }

    assert_eq!(stopwatch.render(), "0000");
}
