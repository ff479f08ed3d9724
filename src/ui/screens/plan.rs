use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{commitment_bar, format_amount, format_hours, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Month tabs
            Constraint::Length(3), // Working days + month total
            Constraint::Min(4),    // Roles
        ])
        .split(area);

    render_month_tabs(f, chunks[0], app);
    render_month_header(f, chunks[1], app);
    render_roles(f, chunks[2], app);
}

fn render_month_tabs(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let titles: Vec<Line> = app
        .plan
        .months()
        .iter()
        .map(|m| {
            if app.plan.is_selected(&m.key) {
                Line::from(vec![
                    Span::styled("●", Style::default().fg(p.yellow)),
                    Span::raw(m.label()),
                ])
            } else {
                Line::from(m.label())
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.month_index)
        .style(p.dim_style())
        .highlight_style(Style::default().fg(p.accent).add_modifier(Modifier::BOLD))
        .divider(Span::styled("│", Style::default().fg(p.overlay)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(p.border_style())
                .title(Span::styled(" Months ", p.dim_style())),
        );
    f.render_widget(tabs, area);
}

fn render_month_header(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let Some(month) = app.active_month() else {
        return;
    };
    let days = app.plan.working_days(&month.key);
    let days = if days.is_blank() {
        "-".to_string()
    } else {
        days.to_string()
    };
    let total = app
        .plan
        .budget()
        .get(&month.key)
        .map(|b| b.total)
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(format!(" Working days in {}: ", month.label()), p.dim_style()),
        Span::styled(
            format!("{days:<4}"),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled("(check manually!)   ", p.dim_style()),
        Span::styled("Month total: ", p.dim_style()),
        Span::styled(
            format_amount(total),
            p.amount_style().add_modifier(Modifier::BOLD),
        ),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style()),
    );
    f.render_widget(header, area);
}

fn render_roles(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(
            format!(" Roles ({}) ", app.plan.roles().len()),
            Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
        ));

    if app.plan.roles().is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No roles yet", p.dim_style())),
            Line::from(Span::styled("Press a or use :add-role", p.dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let Some(month) = app.active_month() else {
        return;
    };
    let period = app.plan.budget().get(&month.key);

    let items: Vec<ListItem> = app
        .plan
        .roles()
        .iter()
        .enumerate()
        .skip(app.role_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, role)| {
            let style = if i == app.role_index {
                p.selected_style()
            } else if i % 2 == 0 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };
            let pct = app.plan.commitment(&role.id, &month.key);
            let rate = app.plan.hourly_rate(&role.id);
            let hours_per_day = app.plan.working_hours(&role.id);
            let hours = period.map(|b| b.hours(&role.id)).unwrap_or_default();
            let amount = period.map(|b| b.amount(&role.id)).unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled("⋮ ", style),
                Span::styled(format!("{:<22}", truncate(&role.name, 21)), style),
                Span::styled(commitment_bar(pct, 20), Style::default().fg(p.accent)),
                Span::styled(format!(" {pct:>3}% "), style),
                Span::styled(format!(" {:>8}/h ", rate.to_string()), p.normal_style()),
                Span::styled(format!(" {:>5} h/d ", hours_per_day.to_string()), p.dim_style()),
                Span::styled(format!(" {:>8} ", format_hours(hours)), p.dim_style()),
                Span::styled(format!("{:>16}", format_amount(amount)), p.amount_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
