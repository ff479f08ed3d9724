use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::plan::Plan;
use crate::ui::app::{App, EditTarget, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::screens::summary;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Rows taken by everything except the role list: tab, status and command
/// bars, the month tabs and header blocks, and the list's own borders.
const CHROME_ROWS: u16 = 11;

pub(crate) fn as_tui(plan: Plan) -> Result<()> {
    let mut app = App::new(plan);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("tui exited with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = (f.area().height.saturating_sub(CHROME_ROWS) as usize).max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('1') => app.screen = Screen::Plan,
        KeyCode::Char('2') => app.screen = Screen::Summary,
        KeyCode::Tab => cycle_screen(app, 1),
        KeyCode::BackTab => cycle_screen(app, -1),
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('l') | KeyCode::Right => app.next_month(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_month(),
        KeyCode::Esc => handle_escape(app),
        KeyCode::Char('E') => commands::cmd_export("", app)?,
        KeyCode::Char('t') => commands::handle_command("theme", app)?,
        _ if app.screen == Screen::Plan => handle_plan_key(key, app)?,
        _ => {}
    }
    Ok(())
}

/// Keys that edit the plan; only live on the plan screen.
fn handle_plan_key(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => adjust_commitment(app, 1),
        KeyCode::Char('-') => adjust_commitment(app, -1),
        KeyCode::Char('>') => adjust_commitment(app, 10),
        KeyCode::Char('<') => adjust_commitment(app, -10),
        KeyCode::Char('J') => app.move_selected_role(1),
        KeyCode::Char('K') => app.move_selected_role(-1),
        KeyCode::Char(' ') => {
            if let Some(month) = app.active_month_key() {
                app.plan.toggle_month_selection(&month);
            }
        }
        KeyCode::Char('c') => begin_role_edit(app, |role_id| EditTarget::Commitment { role_id }),
        KeyCode::Char('r') => begin_role_edit(app, |role_id| EditTarget::HourlyRate { role_id }),
        KeyCode::Char('w') => begin_role_edit(app, |role_id| EditTarget::WorkingHours { role_id }),
        KeyCode::Char('n') => begin_role_edit(app, |role_id| EditTarget::RoleName { role_id }),
        KeyCode::Char('d') => {
            if let Some(month) = app.active_month_key() {
                let current = app.plan.working_days(&month).to_string();
                app.begin_edit(EditTarget::WorkingDays { month }, current);
            }
        }
        KeyCode::Char('R') => {
            if let Some(month) = app.active_month_key() {
                let current = month.clone();
                app.begin_edit(EditTarget::RenameMonth { month }, current);
            }
        }
        KeyCode::Char('a') => app.add_role(),
        KeyCode::Char('A') => app.begin_edit(EditTarget::NewMonth, String::new()),
        KeyCode::Char('x') => commands::cmd_remove_role("", app)?,
        KeyCode::Char('X') => commands::cmd_remove_month("", app)?,
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => {
            app.cancel_edit();
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.edit_input.pop();
        }
        KeyCode::Char(c) => {
            app.edit_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::RemoveRole { id, name } => {
                        if app.plan.remove_role(&id) {
                            app.set_status(format!("Removed role: {name}"));
                        }
                    }
                    PendingAction::RemoveMonth { key } => {
                        if app.plan.remove_month(&key) {
                            app.set_status(format!("Removed month: {key}"));
                        } else {
                            app.set_status("Cannot remove the last month");
                        }
                    }
                }
                app.clamp_cursors();
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn cycle_screen(app: &mut App, step: isize) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
    let next = (idx as isize + step).rem_euclid(screens.len() as isize) as usize;
    app.screen = screens[next];
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Plan => {
            let len = app.plan.roles().len();
            scroll_down(&mut app.role_index, &mut app.role_scroll, len, app.visible_rows);
        }
        Screen::Summary => {
            if app.summary_scroll + 1 < summary::line_count(app) {
                app.summary_scroll += 1;
            }
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Plan => scroll_up(&mut app.role_index, &mut app.role_scroll),
        Screen::Summary => app.summary_scroll = app.summary_scroll.saturating_sub(1),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Plan => scroll_to_top(&mut app.role_index, &mut app.role_scroll),
        Screen::Summary => app.summary_scroll = 0,
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Plan => {
            let len = app.plan.roles().len();
            scroll_to_bottom(&mut app.role_index, &mut app.role_scroll, len, app.visible_rows);
        }
        Screen::Summary => {
            app.summary_scroll = summary::line_count(app).saturating_sub(1);
        }
    }
}

fn handle_escape(app: &mut App) {
    if !app.plan.selected_months().is_empty() {
        app.plan.clear_selection();
        app.set_status("Selection cleared");
    } else {
        app.status_message.clear();
    }
}

fn adjust_commitment(app: &mut App, delta: i16) {
    let (Some(role_id), Some(month)) = (app.selected_role_id(), app.active_month_key()) else {
        return;
    };
    app.plan.adjust_commitment(&role_id, &month, delta);
}

fn begin_role_edit(app: &mut App, target: fn(String) -> EditTarget) {
    let Some(role_id) = app.selected_role_id() else {
        app.set_status("No role selected");
        return;
    };
    let edit = target(role_id.clone());
    let current = commands::current_value(app, &edit, &role_id);
    app.begin_edit(edit, current);
}
