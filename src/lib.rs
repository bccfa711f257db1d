//! A desktop-style shell for the terminal: overlapping windows opened from
//! templates, a taskbar with a start menu and clock, and the window manager
//! core that keeps them consistent.

pub mod apps;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod desktop_icons;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod listeners;
pub mod runner;
pub mod scheduler;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
