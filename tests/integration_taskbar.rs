use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use desk_wm::apps::default_catalog;
use desk_wm::config::ShellConfig;
use desk_wm::taskbar::TaskbarHit;
use desk_wm::ui::UiFrame;
use desk_wm::window::z_order::TaskbarClick;
use desk_wm::window::{WindowId, WindowManager};

const SIZE: (u16, u16) = (100, 30);

fn manager() -> WindowManager {
    WindowManager::with_viewport(
        default_catalog(),
        ShellConfig::default(),
        Rect::new(0, 0, SIZE.0, SIZE.1),
    )
}

fn draw(wm: &mut WindowManager, terminal: &mut Terminal<TestBackend>) -> Buffer {
    terminal
        .draw(|frame| {
            let mut ui = UiFrame::new(frame);
            wm.render(&mut ui);
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
        .collect()
}

fn click(wm: &mut WindowManager, column: u16, row: u16) -> bool {
    wm.handle_event(&Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }))
}

fn find_in_row(buf: &Buffer, y: u16, needle: &str) -> Option<u16> {
    let row = row_text(buf, y);
    row.find(needle)
        .map(|byte| row[..byte].chars().count() as u16)
}

fn find_on_desktop(buf: &Buffer, needle: &str) -> (u16, u16) {
    let bar = buf.area.height - 1;
    (0..bar)
        .find_map(|y| find_in_row(buf, y, needle).map(|x| (x, y)))
        .expect("label on the desktop")
}

fn active_flags(wm: &WindowManager) -> Vec<(WindowId, bool)> {
    wm.taskbar().entries().map(|(id, e)| (id, e.active())).collect()
}

#[test]
fn taskbar_click_toggles_between_two_windows() {
    let mut wm = manager();
    let a = wm.open("about").expect("a");
    let b = wm.open("contact").expect("b");
    assert_eq!(active_flags(&wm), vec![(a, false), (b, true)]);

    assert_eq!(wm.taskbar_click(a), TaskbarClick::Raised);
    assert_eq!(wm.active(), Some(a));
    assert_eq!(active_flags(&wm), vec![(a, true), (b, false)]);

    assert_eq!(wm.taskbar_click(a), TaskbarClick::Minimized);
    assert!(wm.window(a).is_some_and(|w| w.is_minimized()));
    assert_eq!(wm.active(), None);
    assert!(wm.taskbar().entry(a).is_some_and(|e| e.minimized() && !e.active()));

    assert_eq!(wm.taskbar_click(a), TaskbarClick::Raised);
    assert_eq!(wm.active(), Some(a));
    assert!(wm.taskbar().entry(a).is_some_and(|e| !e.minimized() && e.active()));
}

#[test]
fn raise_counter_only_grows() {
    let mut wm = manager();
    let a = wm.open("about").expect("a");
    let b = wm.open("projects").expect("b");
    let mut last = wm.highest_z();
    for id in [a, b, b, a] {
        wm.raise(id);
        assert!(wm.highest_z() > last);
        last = wm.highest_z();
        assert_eq!(wm.window(id).map(|w| w.z_index()), Some(last));
        assert_eq!(active_flags(&wm).iter().filter(|(_, on)| *on).count(), 1);
    }
}

#[test]
fn clicking_rendered_taskbar_entries_routes_to_windows() {
    let mut wm = manager();
    let mut terminal = Terminal::new(TestBackend::new(SIZE.0, SIZE.1)).expect("terminal");
    let about = wm.open("about").expect("about");
    let _contact = wm.open("contact").expect("contact");

    let buf = draw(&mut wm, &mut terminal);
    let bar = SIZE.1 - 1;
    let col = find_in_row(&buf, bar, "About Me").expect("about entry drawn");

    assert!(click(&mut wm, col, bar));
    assert_eq!(wm.active(), Some(about));

    draw(&mut wm, &mut terminal);
    click(&mut wm, col, bar);
    assert!(wm.window(about).is_some_and(|w| w.is_minimized()));

    let buf = draw(&mut wm, &mut terminal);
    // Minimized windows are not drawn: the title row no longer shows it.
    let rect = wm.effective_rect(about).expect("rect");
    let title_row: String = row_text(&buf, rect.y as u16)
        .chars()
        .skip(rect.x as usize)
        .collect();
    assert!(!title_row.contains("About Me"));
    assert!(wm.window_draw_plan().iter().all(|draw| draw.id != about));
}

#[test]
fn start_menu_opens_templates_by_pointer() {
    let mut wm = manager();
    let mut terminal = Terminal::new(TestBackend::new(SIZE.0, SIZE.1)).expect("terminal");
    let bar = SIZE.1 - 1;

    let buf = draw(&mut wm, &mut terminal);
    let start = find_in_row(&buf, bar, "Start").expect("start button");
    click(&mut wm, start, bar);
    assert!(wm.taskbar().menu_open());

    let buf = draw(&mut wm, &mut terminal);
    let (col, row) = (0..bar)
        .rev()
        .find_map(|y| find_in_row(&buf, y, "Recycle Bin").map(|x| (x, y)))
        .expect("menu item drawn");
    click(&mut wm, col, row);
    assert!(!wm.taskbar().menu_open());
    let opened: Vec<_> = wm.registry().list().map(|w| w.title().to_string()).collect();
    assert_eq!(opened, vec!["Recycle Bin"]);
}

#[test]
fn clicking_the_desktop_closes_the_menu() {
    let mut wm = manager();
    let mut terminal = Terminal::new(TestBackend::new(SIZE.0, SIZE.1)).expect("terminal");
    draw(&mut wm, &mut terminal);
    wm.handle_event(&Event::Key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE)));
    assert!(wm.taskbar().menu_open());
    draw(&mut wm, &mut terminal);
    assert!(!click(&mut wm, SIZE.0 - 2, 1));
    assert!(!wm.taskbar().menu_open());
}

#[test]
fn every_window_keeps_a_clickable_entry_on_a_narrow_strip() {
    let mut wm = WindowManager::with_viewport(
        default_catalog(),
        ShellConfig::default(),
        Rect::new(0, 0, 80, 24),
    );
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    let ids: Vec<_> = (0..8).map(|_| wm.open("about").expect("open")).collect();
    draw(&mut wm, &mut terminal);

    let bar = 23;
    let mut reached: Vec<WindowId> = (0..80)
        .filter_map(|col| match wm.taskbar().hit_test(col, bar) {
            Some(TaskbarHit::Entry(id)) => Some(id),
            _ => None,
        })
        .collect();
    reached.dedup();
    assert_eq!(reached, ids);

    // The last entry still toggles its own window.
    let last = *ids.last().expect("eight windows");
    let col = (0..80)
        .find(|col| wm.taskbar().hit_test(*col, bar) == Some(TaskbarHit::Entry(last)))
        .expect("entry for the last window");
    click(&mut wm, col, bar);
    assert!(wm.window(last).is_some_and(|w| w.is_minimized()));
}

#[test]
fn desktop_icons_open_on_double_click() {
    let mut wm = manager();
    let mut terminal = Terminal::new(TestBackend::new(SIZE.0, SIZE.1)).expect("terminal");
    let buf = draw(&mut wm, &mut terminal);

    let (about_col, about_row) = find_on_desktop(&buf, "About Me");
    let (contact_col, contact_row) = find_on_desktop(&buf, "Contact");
    // Single clicks on two different icons only select.
    assert!(click(&mut wm, about_col, about_row));
    assert!(click(&mut wm, contact_col, contact_row));
    assert!(wm.registry().is_empty());
    assert!(wm.icons().selected().is_some());

    let (col, row) = find_on_desktop(&buf, "Snake");
    click(&mut wm, col, row);
    assert!(wm.registry().is_empty());
    click(&mut wm, col, row);
    let opened: Vec<_> = wm.registry().list().map(|w| w.title().to_string()).collect();
    assert_eq!(opened, vec!["Snake"]);
    assert_eq!(wm.taskbar().len(), 1);
    assert_eq!(wm.icons().selected(), None);

    // A click on empty desktop hits nothing.
    draw(&mut wm, &mut terminal);
    assert!(!click(&mut wm, SIZE.0 - 2, SIZE.1 - 3));
}

#[test]
fn compact_desktop_opens_icons_with_one_click() {
    let mut wm = WindowManager::with_viewport(
        default_catalog(),
        ShellConfig::default(),
        Rect::new(0, 0, 50, 14),
    );
    assert!(wm.is_compact());
    let mut terminal = Terminal::new(TestBackend::new(50, 14)).expect("terminal");
    let buf = draw(&mut wm, &mut terminal);
    let (col, row) = find_on_desktop(&buf, "About Me");
    click(&mut wm, col, row);
    let opened: Vec<_> = wm.registry().list().map(|w| w.title().to_string()).collect();
    assert_eq!(opened, vec!["About Me"]);
}
