//! Plugin library used by the native loading tests: full metadata, a few
//! short ticks, then returns.

use std::time::Duration;
use wox_plugin::Plugin;

#[derive(Default)]
pub struct Timer;

impl Plugin for Timer {
    fn run(&self) {
        for _ in 0..3 {
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

wox_plugin::export_plugin!(
    Timer,
    name = "Timer",
    description = "ticks",
    version = "1.0.0",
);
