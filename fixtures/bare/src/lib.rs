//! Plugin library used by the native loading tests: entry point only.

use wox_plugin::Plugin;

#[derive(Default)]
pub struct Bare;

impl Plugin for Bare {
    fn run(&self) {}
}

wox_plugin::export_plugin!(Bare);
