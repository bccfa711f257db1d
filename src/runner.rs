use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::Action;
use crate::ui::UiFrame;
use crate::window::WindowManager;

fn is_quit(wm: &WindowManager, event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key)
            if key.kind == KeyEventKind::Press && wm.keybindings().matches(Action::Quit, key)
    )
}

/// Drive the desktop until the quit binding is pressed.
///
/// Input events go straight to the window manager. Quiet intervals advance
/// its clock (timers, shell requests) and redraw the whole desktop.
pub fn run_shell<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    wm: &mut WindowManager,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_, event| {
        match event {
            Some(evt) => {
                if is_quit(wm, &evt) {
                    return Ok(ControlFlow::Quit);
                }
                wm.handle_event(&evt);
            }
            None => {
                wm.tick(Instant::now());
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        wm.render(&mut ui);
                    })
                    .map_err(|e| io::Error::other(e.to_string()))?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    if let Err(err) = event_loop.driver().set_mouse_capture(false) {
        tracing::warn!(error = %err, "failed to release mouse capture");
    }
    tracing::info!(windows = wm.registry().len(), "shell stopped");
    result
}
