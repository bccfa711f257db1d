use ratatui::style::Color;

// Fixed desktop palette. Helpers rather than constants so call sites read
// the same as the rest of the rendering code.

pub fn desktop_bg() -> Color {
    Color::Rgb(0, 128, 128)
}
pub fn desktop_fg() -> Color {
    Color::Rgb(200, 230, 230)
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::Gray
}
pub fn taskbar_fg() -> Color {
    Color::Black
}
pub fn taskbar_active_bg() -> Color {
    Color::White
}
pub fn taskbar_active_fg() -> Color {
    Color::Black
}
pub fn taskbar_minimized_fg() -> Color {
    Color::DarkGray
}
pub fn start_button_bg() -> Color {
    Color::Green
}
pub fn start_button_fg() -> Color {
    Color::Black
}

// Start menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Blue
}
pub fn menu_selected_fg() -> Color {
    Color::White
}

// Window chrome
pub fn header_active_bg() -> Color {
    Color::Blue
}
pub fn header_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn window_border() -> Color {
    Color::Gray
}
pub fn window_body_bg() -> Color {
    Color::Black
}
pub fn window_body_fg() -> Color {
    Color::White
}

// Content accents
pub fn prompt_fg() -> Color {
    Color::Green
}
pub fn log_highlight() -> Color {
    Color::Yellow
}
pub fn snake_fg() -> Color {
    Color::LightGreen
}
