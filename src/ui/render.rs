use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme::{self, Palette};
use super::util::format_amount;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area(), theme::palette(app.dark_mode));
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(p.text_dim)),
                    Span::styled(
                        format!("{s}"),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(p.text_dim),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(p.overlay)))
        .style(Style::default().bg(p.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Plan => super::screens::plan::render(f, area, app),
        Screen::Summary => super::screens::summary::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => p.accent,
        InputMode::Command | InputMode::Editing => p.green,
        InputMode::Confirm => p.red,
    };
    let mode_style = Style::default()
        .fg(p.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let month = app
        .active_month()
        .map(|m| m.label())
        .unwrap_or_default();
    let selection = app.plan.selected_months();
    let selection_info = if selection.is_empty() {
        String::new()
    } else {
        format!(" | {} selected", selection.len())
    };
    let info = format!(
        " {} | {} | total {}{}",
        app.screen,
        month,
        format_amount(app.plan.budget().grand_total()),
        selection_info,
    );

    let right = match app.screen {
        Screen::Plan => " h/l month | +/- commit | space select | ? help ",
        Screen::Summary => " j/k scroll | E export | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, p.status_bar_style()),
        Span::styled(" ".repeat(pad), p.status_bar_style()),
        Span::styled(right, p.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(p.green)),
                Span::styled(&app.command_input, p.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => {
            let prompt = app.edit_target.as_ref().map_or("edit> ", |t| t.prompt());
            (
                Line::from(vec![
                    Span::styled(prompt, Style::default().fg(p.green)),
                    Span::styled(&app.edit_input, p.command_bar_style()),
                ]),
                Some((prompt.chars().count() + app.edit_input.chars().count()) as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(p.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(p.red)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    p.dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, p.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(p.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect, p: &Palette) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " BudgetCalc Help ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Set each role's commitment per month. Hours are working days x",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            " hours/day x commitment, rounded; cost is hours x hourly rate.",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            " Select several months with space to change them all at once.",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", p.section_style())),
        Line::from(Span::styled(
            "  j/k or Up/Down   Select role           1-2        Switch tabs",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  h/l or Lft/Rgt   Prev/Next month       g/G        Top/Bottom",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            Ctrl-q     Quit",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Editing", p.section_style())),
        Line::from(Span::styled(
            "  +/- and >/<      Commitment 1/10       c          Type commitment",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  r / w            Rate / hours per day  d          Working days",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  n / R            Rename role / month   J/K        Move role",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  a / A            Add role / month      x / X      Remove role / month",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  space            Toggle month select   E          Export CSV",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  t                Toggle theme          Esc        Clear selection",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", p.section_style())),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<16} {desc}"),
            p.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(p.text_dim),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(help, popup_area);
}
