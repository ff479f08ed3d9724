use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, EditTarget, InputMode, PendingAction, Screen};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetCalc", cmd_quit, r);
    register_command!("quit", "Quit BudgetCalc", cmd_quit, r);
    register_command!("p", "Go to Plan", cmd_plan, r);
    register_command!("plan", "Go to Plan", cmd_plan, r);
    register_command!("s", "Go to Summary", cmd_summary, r);
    register_command!("summary", "Go to Summary", cmd_summary, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("add-role", "Add a role at default values", cmd_add_role, r);
    register_command!(
        "remove-role",
        "Remove selected role",
        cmd_remove_role,
        r
    );
    register_command!(
        "rename-role",
        "Rename selected role (e.g. :rename-role Tech Lead)",
        cmd_rename_role,
        r
    );
    register_command!(
        "add-month",
        "Add month (e.g. :add-month jan2)",
        cmd_add_month,
        r
    );
    register_command!(
        "rename-month",
        "Rename current month (e.g. :rename-month q1)",
        cmd_rename_month,
        r
    );
    register_command!(
        "remove-month",
        "Remove current month",
        cmd_remove_month,
        r
    );
    register_command!(
        "rate",
        "Set hourly rate of selected role (e.g. :rate 950)",
        cmd_rate,
        r
    );
    register_command!(
        "hours",
        "Set working hours/day of selected role (e.g. :hours 7.5)",
        cmd_hours,
        r
    );
    register_command!(
        "days",
        "Set working days of current month (e.g. :days 19)",
        cmd_days,
        r
    );
    register_command!(
        "commit",
        "Set commitment % of selected role (e.g. :commit 80)",
        cmd_commit,
        r
    );
    register_command!(
        "select",
        "Toggle month in multi-select (e.g. :select feb)",
        cmd_select,
        r
    );
    register_command!(
        "clear-selection",
        "Clear month multi-select",
        cmd_clear_selection,
        r
    );
    register_command!(
        "month",
        "Jump to month (e.g. :month mar)",
        cmd_month,
        r
    );
    register_command!("m", "Jump to month (e.g. :m mar)", cmd_month, r);
    register_command!(
        "export",
        "Export budget_data.csv (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );
    register_command!("e", "Export budget_data.csv", cmd_export, r);
    register_command!("theme", "Toggle dark/light theme", cmd_theme, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_plan(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Plan;
    Ok(())
}

fn cmd_summary(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Summary;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_theme(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.dark_mode = !app.dark_mode;
    let name = if app.dark_mode { "dark" } else { "light" };
    app.set_status(format!("Theme: {name}"));
    Ok(())
}

fn cmd_add_role(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Plan;
    app.add_role();
    Ok(())
}

/// Ask before removing the selected role.
pub(crate) fn cmd_remove_role(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some((id, name)) = app
        .selected_role()
        .map(|r| (r.id.clone(), r.name.clone()))
    else {
        app.set_status("No role selected");
        return Ok(());
    };
    app.confirm_message = format!("Remove role '{name}'?");
    app.pending_action = Some(PendingAction::RemoveRole { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_rename_role(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(role_id) = app.selected_role_id() else {
        app.set_status("No role selected");
        return Ok(());
    };
    if args.is_empty() {
        let current = app.selected_role().map(|r| r.name.clone()).unwrap_or_default();
        app.begin_edit(EditTarget::RoleName { role_id }, current);
    } else if app.plan.rename_role(&role_id, args) {
        app.set_status(format!("Renamed role to {args}"));
    } else {
        app.set_status(format!("Role not found: {role_id}"));
    }
    Ok(())
}

fn cmd_add_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Plan;
    if args.is_empty() {
        app.begin_edit(EditTarget::NewMonth, String::new());
    } else {
        app.add_month(args);
    }
    Ok(())
}

fn cmd_rename_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(month) = app.active_month_key() else {
        return Ok(());
    };
    if args.is_empty() {
        let current = month.clone();
        app.begin_edit(EditTarget::RenameMonth { month }, current);
        return Ok(());
    }
    app.begin_edit(EditTarget::RenameMonth { month }, args.to_string());
    app.commit_edit();
    Ok(())
}

/// Ask before removing the current month. The last month is never offered.
pub(crate) fn cmd_remove_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.plan.months().len() <= 1 {
        app.set_status("Cannot remove the last month");
        return Ok(());
    }
    let Some(key) = app.active_month_key() else {
        return Ok(());
    };
    app.confirm_message = format!("Remove month '{key}'?");
    app.pending_action = Some(PendingAction::RemoveMonth { key });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_rate(args: &str, app: &mut App) -> anyhow::Result<()> {
    edit_selected_role(args, app, |role_id| EditTarget::HourlyRate { role_id })
}

fn cmd_hours(args: &str, app: &mut App) -> anyhow::Result<()> {
    edit_selected_role(args, app, |role_id| EditTarget::WorkingHours { role_id })
}

fn cmd_commit(args: &str, app: &mut App) -> anyhow::Result<()> {
    edit_selected_role(args, app, |role_id| EditTarget::Commitment { role_id })
}

fn cmd_days(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(month) = app.active_month_key() else {
        return Ok(());
    };
    if args.is_empty() {
        let current = app.plan.working_days(&month).to_string();
        app.begin_edit(EditTarget::WorkingDays { month }, current);
    } else if app.plan.set_working_days(&month, args) {
        let days = app.plan.working_days(&month);
        app.set_status(format!("Working days in {month}: {days}"));
    } else {
        app.set_status(format!("Month not found: {month}"));
    }
    Ok(())
}

/// Apply `args` to a field of the selected role, or open the edit line when
/// no value was given.
fn edit_selected_role(
    args: &str,
    app: &mut App,
    target: fn(String) -> EditTarget,
) -> anyhow::Result<()> {
    let Some(role_id) = app.selected_role_id() else {
        app.set_status("No role selected");
        return Ok(());
    };
    let edit = target(role_id.clone());
    let current = current_value(app, &edit, &role_id);
    app.begin_edit(edit, current);
    if !args.is_empty() {
        app.edit_input = args.to_string();
        app.commit_edit();
    }
    Ok(())
}

/// Text an edit line starts with: the field's current value, empty when blank.
pub(crate) fn current_value(app: &App, target: &EditTarget, role_id: &str) -> String {
    match target {
        EditTarget::HourlyRate { .. } => app.plan.hourly_rate(role_id).to_string(),
        EditTarget::WorkingHours { .. } => app.plan.working_hours(role_id).to_string(),
        EditTarget::Commitment { .. } => app
            .active_month_key()
            .map(|m| app.plan.commitment(role_id, &m).to_string())
            .unwrap_or_default(),
        EditTarget::RoleName { .. } => app
            .selected_role()
            .map(|r| r.name.clone())
            .unwrap_or_default(),
        EditTarget::WorkingDays { month } => app.plan.working_days(month).to_string(),
        EditTarget::RenameMonth { month } => month.clone(),
        EditTarget::NewMonth => String::new(),
    }
}

fn cmd_select(args: &str, app: &mut App) -> anyhow::Result<()> {
    let month = if args.is_empty() {
        app.active_month_key()
    } else {
        crate::models::Month::find_by_name(app.plan.months(), args).map(|m| m.key.clone())
    };
    match month {
        Some(key) => {
            app.plan.toggle_month_selection(&key);
            let selected = app.plan.selected_months().join(", ");
            if selected.is_empty() {
                app.set_status("No months selected");
            } else {
                app.set_status(format!("Selected: {selected}"));
            }
        }
        None => app.set_status(format!("Month not found: {args}")),
    }
    Ok(())
}

fn cmd_clear_selection(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.plan.clear_selection();
    app.set_status("Selection cleared");
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    let key = crate::models::Month::normalize(args);
    let found = app.plan.months().iter().position(|m| m.key == key);
    match found {
        Some(index) => {
            app.month_index = index;
            app.screen = Screen::Plan;
        }
        None => {
            let names: Vec<&str> = app.plan.months().iter().map(|m| m.key.as_str()).collect();
            let msg = format!("Month not found. Available: {}", names.join(", "));
            app.set_status(msg);
        }
    }
    Ok(())
}

pub(crate) fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        None
    } else {
        Some(crate::export::resolve_path(args))
    };
    match app.export(path.as_deref()) {
        Ok(written) => app.set_status(format!("Exported to {}", written.display())),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
