//! Runtime configuration for the shell.
//!
//! Defaults come from [`crate::constants`]; the binary overrides individual
//! fields from its command line.

use std::time::Duration;

use crate::constants::{
    CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y, CASCADE_STEP_X, CASCADE_STEP_Y, CASCADE_WRAP,
    CLOCK_TICK_MS, COMPACT_VIEWPORT_HEIGHT, COMPACT_VIEWPORT_WIDTH, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH, DOUBLE_CLICK_MS, TASKBAR_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    pub taskbar_height: u16,
    pub compact_width: u16,
    pub compact_height: u16,
    pub cascade_origin: (i32, i32),
    pub cascade_step: (i32, i32),
    pub cascade_wrap: usize,
    pub window_size: (u16, u16),
    pub double_click: Duration,
    pub clock_tick: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            taskbar_height: TASKBAR_HEIGHT,
            compact_width: COMPACT_VIEWPORT_WIDTH,
            compact_height: COMPACT_VIEWPORT_HEIGHT,
            cascade_origin: (CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y),
            cascade_step: (CASCADE_STEP_X, CASCADE_STEP_Y),
            cascade_wrap: CASCADE_WRAP,
            window_size: (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            double_click: Duration::from_millis(DOUBLE_CLICK_MS),
            clock_tick: Duration::from_millis(CLOCK_TICK_MS),
        }
    }
}

impl ShellConfig {
    pub fn with_compact_threshold(mut self, width: u16, height: u16) -> Self {
        self.compact_width = width;
        self.compact_height = height;
        self
    }

    pub fn with_window_size(mut self, width: u16, height: u16) -> Self {
        self.window_size = (width.max(1), height.max(1));
        self
    }
}
