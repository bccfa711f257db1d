//! Shared crate-wide constants.

/// First stacking value handed out. The counter is pre-incremented, so the
/// first raised window receives `Z_INDEX_BASE + 1`.
pub const Z_INDEX_BASE: u64 = 2;

/// Rows reserved at the bottom of the viewport for the taskbar strip.
///
/// Dragged windows are clamped so their bounding box never overlaps it.
pub const TASKBAR_HEIGHT: u16 = 1;

/// Viewports narrower than this many columns are treated as compact: windows
/// are presented full-screen, placement and dragging are skipped.
pub const COMPACT_VIEWPORT_WIDTH: u16 = 60;

/// Viewports shorter than this many rows are treated as compact.
pub const COMPACT_VIEWPORT_HEIGHT: u16 = 16;

/// Origin of the first cascaded window.
pub const CASCADE_ORIGIN_X: i32 = 6;
pub const CASCADE_ORIGIN_Y: i32 = 2;

/// Per-window cascade step, in columns and rows.
///
/// Terminal cells are roughly twice as tall as they are wide, so the
/// horizontal step is doubled to keep the stagger visually diagonal.
pub const CASCADE_STEP_X: i32 = 2;
pub const CASCADE_STEP_Y: i32 = 1;

/// Number of open windows after which the cascade offset wraps back to zero.
pub const CASCADE_WRAP: usize = 10;

/// Size given to new windows when the template does not ask for one.
pub const DEFAULT_WINDOW_WIDTH: u16 = 52;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 14;

/// Smallest size a window is shrunk to when the viewport cannot fit it.
pub const MIN_WINDOW_WIDTH: u16 = 12;
pub const MIN_WINDOW_HEIGHT: u16 = 4;

/// Maximum delay, in milliseconds, between two title-bar clicks for them to
/// count as a double click.
pub const DOUBLE_CLICK_MS: u64 = 450;

/// Refresh period of the taskbar clock, in milliseconds.
pub const CLOCK_TICK_MS: u64 = 1000;

/// Event-loop poll interval, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 16;
