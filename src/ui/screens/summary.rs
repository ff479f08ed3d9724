use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::engine::{PeriodBudget, TOTAL_KEY};
use crate::models::Month;
use crate::ui::app::App;
use crate::ui::theme::{self, Palette};
use crate::ui::util::{format_amount, format_hours, truncate};

/// One card per month plus the grand total, stacked and scrollable.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = theme::palette(app.dark_mode);
    let lines = summary_lines(app, p);

    let max_scroll = lines.len().saturating_sub(area.height.saturating_sub(2) as usize);
    let scroll = app.summary_scroll.min(max_scroll);

    let body = Paragraph::new(lines)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(p.border_style())
                .title(Span::styled(
                    " Budget ",
                    Style::default().fg(p.text_dim).add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(body, area);
}

/// Number of rows the summary occupies, for scroll bounds.
pub(crate) fn line_count(app: &App) -> usize {
    let periods = app.plan.months().len() + 1;
    // Title, column header, one line per role, blank spacer.
    periods * (app.plan.roles().len() + 3)
}

fn summary_lines<'a>(app: &'a App, p: &Palette) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(line_count(app));
    for (key, period) in app.plan.budget().periods() {
        let title = if key == TOTAL_KEY {
            "Total".to_string()
        } else {
            Month::new(key).label()
        };
        push_period(&mut lines, app, p, &title, period, key == TOTAL_KEY);
    }
    lines
}

fn push_period<'a>(
    lines: &mut Vec<Line<'a>>,
    app: &'a App,
    p: &Palette,
    title: &str,
    period: &PeriodBudget,
    is_total: bool,
) {
    let title_style = if is_total {
        Style::default().fg(p.yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(format!(" {title:<36}"), title_style),
        Span::styled(
            format!("{:>20}", format_amount(period.total)),
            p.amount_style().add_modifier(Modifier::BOLD),
        ),
    ]));

    let commit_header = if is_total { "Avg %" } else { "%" };
    lines.push(Line::from(Span::styled(
        format!(
            "   {:<24}{:>6}{:>10}{:>18}",
            "Role", commit_header, "Hours", "Amount"
        ),
        p.header_style(),
    )));

    for role in app.plan.roles() {
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<24}", truncate(&role.name, 23)), p.normal_style()),
            Span::styled(
                format!("{:>5}%", period.commitment(&role.id)),
                p.dim_style(),
            ),
            Span::styled(
                format!("{:>10}", format_hours(period.hours(&role.id))),
                p.normal_style(),
            ),
            Span::styled(
                format!("{:>18}", format_amount(period.amount(&role.id))),
                p.amount_style(),
            ),
        ]));
    }
    lines.push(Line::from(""));
}
