use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::prelude::Rect;

use desk_wm::apps::default_catalog;
use desk_wm::config::ShellConfig;
use desk_wm::constants::{COMPACT_VIEWPORT_HEIGHT, COMPACT_VIEWPORT_WIDTH, DEFAULT_TICK_MS};
use desk_wm::content::{TemplateCatalog, TemplateId};
use desk_wm::drivers::OutputDriver;
use desk_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use desk_wm::error::ShellError;
use desk_wm::runner::run_shell;
use desk_wm::tracing_sub;
use desk_wm::window::WindowManager;

#[derive(Parser, Debug)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop shell with floating windows, a taskbar and a start menu"
)]
struct Cli {
    /// Template to open at startup. May be repeated.
    #[arg(long = "open", value_name = "TEMPLATE")]
    open: Vec<String>,

    /// Also append log output to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Below this many columns every window is shown full-screen.
    #[arg(long = "compact-width", value_name = "COLS", default_value_t = COMPACT_VIEWPORT_WIDTH)]
    compact_width: u16,

    /// Below this many rows every window is shown full-screen.
    #[arg(long = "compact-height", value_name = "ROWS", default_value_t = COMPACT_VIEWPORT_HEIGHT)]
    compact_height: u16,

    /// Input poll interval in milliseconds.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Print the available templates and exit.
    #[arg(long = "list-templates")]
    list_templates: bool,
}

impl Cli {
    fn config(&self) -> ShellConfig {
        ShellConfig::default().with_compact_threshold(self.compact_width, self.compact_height)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Reject unknown `--open` templates before the terminal is taken over.
    fn startup_templates(&self, catalog: &TemplateCatalog) -> Result<Vec<TemplateId>, ShellError> {
        self.open
            .iter()
            .map(|name| {
                let id = TemplateId::from(name.as_str());
                if catalog.contains(&id) {
                    Ok(id)
                } else {
                    Err(ShellError::UnknownTemplate(name.clone()))
                }
            })
            .collect()
    }
}

fn main() -> Result<(), ShellError> {
    let cli = Cli::parse();
    let catalog = default_catalog();

    if cli.list_templates {
        for template in catalog.iter() {
            println!("{:<12} {} {}", template.id, template.icon, template.title);
        }
        return Ok(());
    }

    let startup = cli.startup_templates(&catalog)?;
    tracing_sub::init(cli.log_file.as_deref())?;

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let size = output.terminal_mut().size()?;
    let mut wm = WindowManager::with_viewport(
        catalog,
        cli.config(),
        Rect::new(0, 0, size.width, size.height),
    );
    for template in startup {
        wm.open(template);
    }
    tracing::info!(windows = wm.registry().len(), "shell started");

    let result = run_shell(
        output.terminal_mut(),
        ConsoleInputDriver::new(),
        &mut wm,
        cli.poll_interval(),
    );
    output.exit()?;
    result.map_err(ShellError::from)
}
