use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::path::{Path, PathBuf};

use crate::export;
use crate::models::{Month, NumericInput, Role};
use crate::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Plan,
    Summary,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Plan, Self::Summary]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plan => write!(f, "Plan"),
            Self::Summary => write!(f, "Summary"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// The field an in-place edit writes back to on Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditTarget {
    RoleName { role_id: String },
    HourlyRate { role_id: String },
    WorkingHours { role_id: String },
    Commitment { role_id: String },
    WorkingDays { month: String },
    NewMonth,
    RenameMonth { month: String },
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Self::RoleName { .. } => "name> ",
            Self::HourlyRate { .. } => "rate> ",
            Self::WorkingHours { .. } => "hours/day> ",
            Self::Commitment { .. } => "commitment %> ",
            Self::WorkingDays { .. } => "days> ",
            Self::NewMonth => "new month> ",
            Self::RenameMonth { .. } => "rename month> ",
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    RemoveRole { id: String, name: String },
    RemoveMonth { key: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) dark_mode: bool,

    pub(crate) plan: Plan,

    // Plan screen
    pub(crate) month_index: usize,
    pub(crate) role_index: usize,
    pub(crate) role_scroll: usize,

    // Summary screen
    pub(crate) summary_scroll: usize,

    // In-place editing
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) edit_input: String,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(plan: Plan) -> Self {
        Self {
            running: true,
            screen: Screen::Plan,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            dark_mode: true,

            plan,

            month_index: 0,
            role_index: 0,
            role_scroll: 0,

            summary_scroll: 0,

            edit_target: None,
            edit_input: String::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn active_month(&self) -> Option<&Month> {
        self.plan.months().get(self.month_index)
    }

    pub(crate) fn active_month_key(&self) -> Option<String> {
        self.active_month().map(|m| m.key.clone())
    }

    pub(crate) fn selected_role(&self) -> Option<&Role> {
        self.plan.roles().get(self.role_index)
    }

    pub(crate) fn selected_role_id(&self) -> Option<String> {
        self.selected_role().map(|r| r.id.clone())
    }

    /// Pull cursors back inside the plan after roles or months disappear.
    pub(crate) fn clamp_cursors(&mut self) {
        let months = self.plan.months().len();
        if self.month_index >= months {
            self.month_index = months.saturating_sub(1);
        }
        let roles = self.plan.roles().len();
        if self.role_index >= roles {
            self.role_index = roles.saturating_sub(1);
        }
        if self.role_scroll > self.role_index {
            self.role_scroll = self.role_index;
        }
    }

    pub(crate) fn next_month(&mut self) {
        let len = self.plan.months().len();
        if len > 0 {
            self.month_index = (self.month_index + 1) % len;
        }
    }

    pub(crate) fn prev_month(&mut self) {
        let len = self.plan.months().len();
        if len > 0 {
            self.month_index = if self.month_index == 0 {
                len - 1
            } else {
                self.month_index - 1
            };
        }
    }

    /// Open the edit line for `target`, pre-filled with `initial`.
    pub(crate) fn begin_edit(&mut self, target: EditTarget, initial: String) {
        self.edit_target = Some(target);
        self.edit_input = initial;
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.edit_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Write the edit line back to its target.
    pub(crate) fn commit_edit(&mut self) {
        let Some(target) = self.edit_target.take() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        let input = std::mem::take(&mut self.edit_input);
        self.input_mode = InputMode::Normal;

        match target {
            EditTarget::RoleName { role_id } => {
                self.plan.rename_role(&role_id, &input);
            }
            EditTarget::HourlyRate { role_id } => {
                self.plan.set_hourly_rate(&role_id, &input);
            }
            EditTarget::WorkingHours { role_id } => {
                self.plan.set_working_hours(&role_id, &input);
            }
            EditTarget::Commitment { role_id } => {
                if let Some(month) = self.active_month_key() {
                    let pct = parse_percentage(&input);
                    self.plan.set_commitment(&role_id, &month, pct);
                }
            }
            EditTarget::WorkingDays { month } => {
                self.plan.set_working_days(&month, &input);
            }
            EditTarget::NewMonth => self.add_month(&input),
            EditTarget::RenameMonth { month } => {
                if self.plan.rename_month(&month, &input) {
                    self.set_status(format!("Renamed {month} to {}", Month::normalize(&input)));
                } else {
                    self.set_status(format!(
                        "Cannot rename {month} to '{}': name is empty or taken",
                        input.trim()
                    ));
                }
            }
        }
    }

    pub(crate) fn add_month(&mut self, name: &str) {
        if self.plan.add_month(name) {
            self.month_index = self.plan.months().len() - 1;
            self.set_status(format!("Added month {}", Month::normalize(name)));
        } else {
            self.set_status(format!(
                "Cannot add month '{}': name is empty or taken",
                name.trim()
            ));
        }
    }

    pub(crate) fn add_role(&mut self) {
        let id = self.plan.add_role();
        self.role_index = self.plan.roles().len() - 1;
        self.set_status(format!("Added role {id}"));
    }

    /// Move the selected role one slot up (`-1`) or down (`1`); the cursor follows.
    pub(crate) fn move_selected_role(&mut self, delta: isize) {
        let Some(target) = self.role_index.checked_add_signed(delta) else {
            return;
        };
        if self.plan.move_role(self.role_index, target) {
            self.role_index = target;
            if self.role_index < self.role_scroll {
                self.role_scroll = self.role_index;
            }
        }
    }

    /// Render the CSV and write it to `path`, or to the default download
    /// location when `None`.
    pub(crate) fn export(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.map_or_else(export::default_path, Path::to_path_buf);
        let text = self.plan.to_csv()?;
        export::write_file(&path, &text)?;
        Ok(path)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

/// Slider text input: non-numeric is 0, anything else is clamped to 0–100
/// and rounded half-up to a whole percent.
pub(crate) fn parse_percentage(raw: &str) -> u8 {
    NumericInput::parse(raw.trim().trim_end_matches('%'))
        .or_zero()
        .min(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
