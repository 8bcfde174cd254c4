//! Counter Example - focus, key routing, state and a timer in a terminal.
//!
//! Two counters share the screen with a status line bound to a state and
//! a clock driven by a periodic task:
//! - Tab / Shift+Tab move focus
//! - Enter or '+' increments the focused counter, '-' decrements it
//! - Escape or Ctrl+C quits
//!
//! Run with: cargo run --example counter

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use spark_cells::{
    keyboard, state, App, AppConfig, Component, ComponentBase, ComponentProps, Grid, LayoutSpec,
    Block, RenderScheduler, State, TerminalSink, Text,
};

// =============================================================================
// Counter widget
// =============================================================================

struct Counter {
    base: ComponentBase,
    value: State<i64>,
}

impl Counter {
    fn new(label: &str, scheduler: &RenderScheduler) -> spark_cells::Result<Self> {
        let mut base = ComponentBase::new(ComponentProps {
            height: Some(3),
            border: true,
            label: Some(label.to_string()),
            focusable: true,
            ..Default::default()
        })?;
        let value = state(0);
        let scheduler = scheduler.clone();
        base.bind(&value, move |_| scheduler.request_render());
        Ok(Self { base, value })
    }
}

impl Component for Counter {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn draw(&self) -> Grid {
        let mut grid = self.base.draw_base();
        let marker = if self.base.has_focus() { "▶" } else { " " };
        grid.write_str(1, 1, &format!("{marker} {}", self.value.get()));
        grid
    }

    fn handle_event(&mut self, key: &str) -> bool {
        match key {
            keyboard::ENTER | "+" => self.value.update(|v| v + 1),
            "-" => self.value.update(|v| v - 1),
            _ => false,
        }
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}

// =============================================================================
// Key translation
// =============================================================================

/// Map a crossterm key event onto the normalized key names.
fn translate(key: KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Enter => keyboard::ENTER,
        KeyCode::Esc => keyboard::ESCAPE,
        KeyCode::Backspace => keyboard::BACKSPACE,
        KeyCode::Tab => keyboard::TAB,
        KeyCode::BackTab => keyboard::SHIFT,
        KeyCode::Up => keyboard::ARROW_UP,
        KeyCode::Down => keyboard::ARROW_DOWN,
        KeyCode::Left => keyboard::ARROW_LEFT,
        KeyCode::Right => keyboard::ARROW_RIGHT,
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

// =============================================================================
// Main
// =============================================================================

fn run() -> spark_cells::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let mut sink = TerminalSink::stdout();
    sink.enter_fullscreen()?;

    let mut app = App::new(
        AppConfig {
            border: true,
            label: Some("spark-cells".to_string()),
            gap: 1,
            ..AppConfig::sized(width, height)
        },
        sink,
    )?;

    let scheduler = app.scheduler().clone();
    let line = || ComponentProps {
        height: Some(1),
        ..Default::default()
    };

    let status = state("Tab to move focus, Esc to quit".to_string());
    let status_id = app.insert(Text::bound(line(), &status, &scheduler)?);

    let row = app.insert_layout(
        Block::new(ComponentProps {
            height: Some(3),
            ..Default::default()
        })?,
        LayoutSpec::row().fit().gap(1),
    );
    let left = app.insert(Counter::new("left", &scheduler)?);
    let right = app.insert(Counter::new("right", &scheduler)?);

    let clock = state("0s".to_string());
    let clock_id = app.insert(Text::bound(line(), &clock, &scheduler)?);
    let started = Instant::now();
    let task = app.timers().every(Duration::from_secs(1), move || {
        clock.set(format!("{}s", started.elapsed().as_secs()));
    });
    app.tree_mut().base_mut(clock_id)?.own_task(task);

    app.add_child(status_id)?;
    app.add_child(row)?;
    app.add_child_to(row, left)?;
    app.add_child_to(row, right)?;
    app.add_child(clock_id)?;

    let frame = Duration::from_millis(50);
    let mut last = Instant::now();
    loop {
        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || key.code == KeyCode::Esc {
                        break;
                    }
                    if let Some(name) = translate(key) {
                        if !app.handle_key(&name)? {
                            status.set(format!("unhandled key: {name}"));
                        }
                    }
                }
                Event::Resize(w, h) => app.resize(w, h)?,
                _ => {}
            }
        }
        let now = Instant::now();
        app.tick(now - last)?;
        last = now;
    }

    app.sink_mut().exit_fullscreen()
}

fn main() {
    if let Err(e) = enable_raw_mode() {
        eprintln!("Failed to enter raw mode: {}", e);
        return;
    }
    let result = run();
    let _ = disable_raw_mode();
    if let Err(e) = result {
        eprintln!("counter exited with error: {}", e);
    }
}
