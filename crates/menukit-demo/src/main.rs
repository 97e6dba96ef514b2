#![forbid(unsafe_code)]

//! Interactive terminal demo for the menukit engine.
//!
//! Drives a menu over the reference action tree: arrow keys move the
//! top-level activation, Enter dispatches it, digits 1-9 activate the n-th
//! visible row pointer-style (the only way to reach nested entries), Esc
//! requests a close, `q` quits. Expand/collapse transitions render row by
//! row as their extents grow and shrink.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor;
use crossterm::event as cte;
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{execute, queue};

use menukit_core::event::{Event, KeyCode, KeyEventKind};
use menukit_widgets::action::{Action, ActionTree, IconStyle};
use menukit_widgets::collapse::Extent;
use menukit_widgets::menu::{Menu, MenuEvent, MenuRow};
use menukit_widgets::resolve::DisabledMap;
use menukit_widgets::surface::Placement;

fn reference_tree() -> ActionTree {
    ActionTree::new(vec![
        Action::new("ADD", "Add").with_icon_style(IconStyle::Filled),
        Action::new("download", "Download").with_icon_style(IconStyle::Outlined),
        Action::new("SHARE", "Share")
            .with_icon("share")
            .with_divider()
            .child(
                Action::new("pdf", "PDF")
                    .with_leading_icon_space()
                    .child(Action::new("DELETE", "Delete").with_icon("share").danger())
                    .child(Action::new("DELETE", "Action 1").danger()),
            )
            .child(Action::new("HOME", "Home")),
        Action::new("DELETE", "Delete").with_icon("delete").danger(),
    ])
}

fn main() -> io::Result<()> {
    let mut menu = Menu::new(reference_tree())
        .with_heading("Demo menu")
        .with_show_close(true)
        .with_placement(Placement::BottomEnd)
        .with_disabled(DisabledMap::new().disable_with("ADD", "ADD is disabled"));
    menu.open();

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
    let result = run(&mut menu);
    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(menu: &mut Menu) -> io::Result<()> {
    let mut status = String::from("up/down move, enter dispatch, 1-9 activate row, q quit");
    let mut last = Instant::now();

    loop {
        draw(menu, &status)?;

        if cte::poll(Duration::from_millis(16))? {
            let outbound = match Event::from_crossterm(cte::read()?) {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if key.is_char('q') {
                        return Ok(());
                    }
                    if let KeyCode::Char(c) = key.code {
                        digit_activate(menu, c)
                    } else {
                        menu.handle_event(&Event::Key(key))
                    }
                }
                _ => Vec::new(),
            };

            for event in outbound {
                match event {
                    MenuEvent::Selected { name } => {
                        status = format!("selected: {name}");
                    }
                    MenuEvent::CloseRequested => {
                        menu.close();
                        return Ok(());
                    }
                    MenuEvent::OpenedChanged { path, opened } => {
                        status = format!(
                            "{} {:?}",
                            if opened { "expanded" } else { "collapsed" },
                            path.indices()
                        );
                    }
                }
            }
        }

        let now = Instant::now();
        menu.tick(now - last);
        last = now;
    }
}

/// Pointer-style activation: digit `n` hits the n-th visible row.
fn digit_activate(menu: &mut Menu, c: char) -> Vec<MenuEvent> {
    let Some(digit) = c.to_digit(10) else {
        return Vec::new();
    };
    let Some(index) = (digit as usize).checked_sub(1) else {
        return Vec::new();
    };
    let target = menu.visible_rows().get(index).map(|row| row.path.clone());
    match target {
        Some(path) => menu.activate(&path),
        None => Vec::new(),
    }
}

fn draw(menu: &Menu, status: &str) -> io::Result<()> {
    let mut out = io::stdout();
    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;

    let surface = menu.surface();
    let heading = if menu.show_header() {
        menu.heading().unwrap_or("")
    } else {
        ""
    };
    queue!(
        out,
        Print(format!(
            "{:?} / {:?}  {}  (width {})\r\n\r\n",
            surface.mode,
            surface.placement,
            heading,
            menu.natural_width()
        ))
    )?;

    let rows = menu.visible_rows();
    for row in clip_rows(&rows) {
        queue!(out, Print(render_row(row)))?;
    }

    queue!(out, Print(format!("\r\n{status}\r\n")))?;
    out.flush()
}

fn render_row(row: &MenuRow<'_>) -> String {
    let marker = if row.activated { "\u{203a} " } else { "  " };
    let indent = "  ".repeat(row.depth.saturating_sub(1));
    let gutter = if row.gutter {
        match &row.action.icon {
            Some(icon) => format!("[{icon}] "),
            None => String::from("    "),
        }
    } else {
        String::new()
    };
    let disclosure = match row.extent {
        Some(_) => {
            if row.opened {
                " \u{25be}"
            } else {
                " \u{25b8}"
            }
        }
        None => "",
    };
    let note = match row.tooltip {
        Some(text) => format!("  ({text})"),
        None if row.disabled => String::from("  (disabled)"),
        None => String::new(),
    };
    format!(
        "{marker}{indent}{gutter}{}{disclosure}{note}\r\n",
        row.action.label
    )
}

/// Clip each branch's descendant rows to its rendered extent, so
/// transitions visibly grow and shrink.
fn clip_rows<'a, 'b>(rows: &'b [MenuRow<'a>]) -> Vec<&'b MenuRow<'a>> {
    let mut out = Vec::with_capacity(rows.len());
    // Active fixed-extent regions: (region owner's depth, rows remaining).
    let mut clips: Vec<(usize, u16)> = Vec::new();

    for row in rows {
        while let Some(&(depth, _)) = clips.last() {
            if row.depth <= depth {
                clips.pop();
            } else {
                break;
            }
        }
        if clips.iter().any(|&(_, remaining)| remaining == 0) {
            continue;
        }
        out.push(row);
        for clip in &mut clips {
            clip.1 = clip.1.saturating_sub(1);
        }
        if let Some(Extent::Fixed(rows_left)) = row.extent {
            clips.push((row.depth, rows_left));
        }
    }
    out
}
