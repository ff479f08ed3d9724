//! The editable budget form: roles, months and their per-cell inputs.
//!
//! Every operation that touches an engine input recomputes the snapshot
//! before returning, so [`Plan::budget`] is never stale. Operations that are
//! refused (duplicate month, removing the last month, ...) leave the plan
//! untouched and return `false`.

use std::collections::HashMap;

use anyhow::Result;

use crate::engine::{self, BudgetSnapshot, Inputs, TOTAL_KEY};
use crate::export;
use crate::models::{defaults, Month, NumericInput, Role};

#[derive(Debug, Clone)]
pub(crate) struct Plan {
    roles: Vec<Role>,
    months: Vec<Month>,
    commitments: HashMap<String, HashMap<String, u8>>,
    hourly_rates: HashMap<String, NumericInput>,
    working_days: HashMap<String, NumericInput>,
    working_hours: HashMap<String, NumericInput>,
    selected_months: Vec<String>,
    budget: BudgetSnapshot,
}

impl Default for Plan {
    fn default() -> Self {
        let months = defaults::month_keys();
        let month_names: Vec<&str> = months.iter().map(String::as_str).collect();
        Self::new(&month_names, defaults::ROLE_NAMES)
    }
}

impl Plan {
    /// A plan with the given months and roles, everything at default values.
    /// Duplicate or empty month names are skipped.
    pub(crate) fn new(month_names: &[&str], role_names: &[&str]) -> Self {
        let mut plan = Self {
            roles: Vec::new(),
            months: Vec::new(),
            commitments: HashMap::new(),
            hourly_rates: HashMap::new(),
            working_days: HashMap::new(),
            working_hours: HashMap::new(),
            selected_months: Vec::new(),
            budget: BudgetSnapshot::default(),
        };
        for name in month_names {
            plan.insert_month(name);
        }
        for name in role_names {
            let id = plan.next_role_id();
            plan.insert_role(Role::new(id, *name));
        }
        plan.recompute();
        plan
    }

    // ── Reads ────────────────────────────────────────────────

    pub(crate) fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub(crate) fn months(&self) -> &[Month] {
        &self.months
    }

    pub(crate) fn budget(&self) -> &BudgetSnapshot {
        &self.budget
    }

    pub(crate) fn commitment(&self, role_id: &str, month: &str) -> u8 {
        self.inputs().commitment(role_id, month)
    }

    pub(crate) fn hourly_rate(&self, role_id: &str) -> NumericInput {
        self.hourly_rates.get(role_id).copied().unwrap_or_default()
    }

    pub(crate) fn working_hours(&self, role_id: &str) -> NumericInput {
        self.working_hours.get(role_id).copied().unwrap_or_default()
    }

    pub(crate) fn working_days(&self, month: &str) -> NumericInput {
        self.working_days.get(month).copied().unwrap_or_default()
    }

    pub(crate) fn selected_months(&self) -> &[String] {
        &self.selected_months
    }

    pub(crate) fn is_selected(&self, month: &str) -> bool {
        self.selected_months.iter().any(|m| m == month)
    }

    pub(crate) fn inputs(&self) -> Inputs<'_> {
        Inputs {
            roles: &self.roles,
            months: &self.months,
            commitments: &self.commitments,
            hourly_rates: &self.hourly_rates,
            working_days: &self.working_days,
            working_hours: &self.working_hours,
        }
    }

    pub(crate) fn to_csv(&self) -> Result<String> {
        export::to_csv(&self.budget, &self.inputs())
    }

    // ── Roles ────────────────────────────────────────────────

    /// Append a role at default values and return its id.
    pub(crate) fn add_role(&mut self) -> String {
        let id = self.next_role_id();
        let role = Role::new(id.clone(), format!("New Role {id}"));
        self.insert_role(role);
        self.recompute();
        id
    }

    pub(crate) fn remove_role(&mut self, id: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r.id != id);
        if self.roles.len() == before {
            return false;
        }
        self.commitments.remove(id);
        self.hourly_rates.remove(id);
        self.working_hours.remove(id);
        self.recompute();
        true
    }

    /// Display name only; ids never change.
    pub(crate) fn rename_role(&mut self, id: &str, name: &str) -> bool {
        match self.roles.iter_mut().find(|r| r.id == id) {
            Some(role) => {
                role.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Move the role at `from` so it ends up at index `to`.
    pub(crate) fn move_role(&mut self, from: usize, to: usize) -> bool {
        if from >= self.roles.len() || to >= self.roles.len() || from == to {
            return false;
        }
        let role = self.roles.remove(from);
        self.roles.insert(to, role);
        true
    }

    pub(crate) fn set_hourly_rate(&mut self, role_id: &str, raw: &str) -> bool {
        if !self.has_role(role_id) {
            return false;
        }
        self.hourly_rates
            .insert(role_id.to_string(), NumericInput::parse(raw));
        self.recompute();
        true
    }

    pub(crate) fn set_working_hours(&mut self, role_id: &str, raw: &str) -> bool {
        if !self.has_role(role_id) {
            return false;
        }
        self.working_hours
            .insert(role_id.to_string(), NumericInput::parse(raw));
        self.recompute();
        true
    }

    // ── Months ───────────────────────────────────────────────

    pub(crate) fn add_month(&mut self, name: &str) -> bool {
        if !self.insert_month(name) {
            tracing::debug!(name, "rejected new month");
            return false;
        }
        self.recompute();
        true
    }

    /// Re-key a month. Its position, days, commitments and selection follow it.
    pub(crate) fn rename_month(&mut self, key: &str, new_name: &str) -> bool {
        let new_key = Month::normalize(new_name);
        if new_key == key {
            return false;
        }
        if !self.month_name_available(&new_key) {
            tracing::debug!(from = key, to = %new_key, "rejected month rename");
            return false;
        }
        let Some(month) = self.months.iter_mut().find(|m| m.key == key) else {
            return false;
        };
        month.key = new_key.clone();

        if let Some(days) = self.working_days.remove(key) {
            self.working_days.insert(new_key.clone(), days);
        }
        for by_month in self.commitments.values_mut() {
            if let Some(pct) = by_month.remove(key) {
                by_month.insert(new_key.clone(), pct);
            }
        }
        for selected in &mut self.selected_months {
            if *selected == key {
                *selected = new_key.clone();
            }
        }
        self.recompute();
        true
    }

    /// Refused when `key` is the only month left.
    pub(crate) fn remove_month(&mut self, key: &str) -> bool {
        if self.months.len() <= 1 {
            tracing::debug!(month = key, "rejected removal of last month");
            return false;
        }
        let before = self.months.len();
        self.months.retain(|m| m.key != key);
        if self.months.len() == before {
            return false;
        }
        self.working_days.remove(key);
        for by_month in self.commitments.values_mut() {
            by_month.remove(key);
        }
        self.selected_months.retain(|m| m != key);
        self.recompute();
        true
    }

    pub(crate) fn set_working_days(&mut self, month: &str, raw: &str) -> bool {
        if !self.has_month(month) {
            return false;
        }
        self.working_days.insert(
            month.to_string(),
            NumericInput::parse_whole(raw, defaults::MAX_WORKING_DAYS),
        );
        self.recompute();
        true
    }

    // ── Commitments ──────────────────────────────────────────

    /// Set a role's commitment, capped at 100. With months selected the value
    /// lands on every selected month instead of just `month`.
    pub(crate) fn set_commitment(&mut self, role_id: &str, month: &str, pct: u8) -> bool {
        if !self.has_role(role_id) {
            return false;
        }
        let pct = pct.min(defaults::MAX_COMMITMENT);
        let targets: Vec<String> = if self.selected_months.is_empty() {
            vec![month.to_string()]
        } else {
            self.selected_months.clone()
        };
        let by_month = self.commitments.entry(role_id.to_string()).or_default();
        let mut changed = false;
        for target in targets {
            if self.months.iter().any(|m| m.key == target) {
                by_month.insert(target, pct);
                changed = true;
            }
        }
        if changed {
            self.recompute();
        }
        changed
    }

    /// Shift a commitment by `delta` points, clamped to 0–100.
    pub(crate) fn adjust_commitment(&mut self, role_id: &str, month: &str, delta: i16) -> bool {
        let current = i16::from(self.commitment(role_id, month));
        let next = (current + delta).clamp(0, i16::from(defaults::MAX_COMMITMENT));
        let Ok(next) = u8::try_from(next) else {
            return false;
        };
        self.set_commitment(role_id, month, next)
    }

    pub(crate) fn toggle_month_selection(&mut self, month: &str) -> bool {
        if !self.has_month(month) {
            return false;
        }
        if self.is_selected(month) {
            self.selected_months.retain(|m| m != month);
        } else {
            self.selected_months.push(month.to_string());
        }
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected_months.clear();
    }

    // ── Internals ────────────────────────────────────────────

    fn recompute(&mut self) {
        self.budget = engine::compute_budget(&self.inputs());
    }

    fn has_role(&self, id: &str) -> bool {
        Role::find_by_id(&self.roles, id).is_some()
    }

    fn has_month(&self, key: &str) -> bool {
        self.months.iter().any(|m| m.key == key)
    }

    fn month_name_available(&self, key: &str) -> bool {
        !key.is_empty() && key != TOTAL_KEY && !self.has_month(key)
    }

    /// `role count + 1`, bumped past any id still in use.
    fn next_role_id(&self) -> String {
        let mut n = self.roles.len() + 1;
        while self.has_role(&n.to_string()) {
            n += 1;
        }
        n.to_string()
    }

    fn insert_role(&mut self, role: Role) {
        let by_month = self
            .months
            .iter()
            .map(|m| (m.key.clone(), defaults::COMMITMENT))
            .collect();
        self.commitments.insert(role.id.clone(), by_month);
        self.hourly_rates
            .insert(role.id.clone(), defaults::HOURLY_RATE.into());
        self.working_hours
            .insert(role.id.clone(), defaults::WORKING_HOURS.into());
        self.roles.push(role);
    }

    fn insert_month(&mut self, name: &str) -> bool {
        let month = Month::new(name);
        if !self.month_name_available(&month.key) {
            return false;
        }
        self.working_days
            .insert(month.key.clone(), defaults::WORKING_DAYS.into());
        for role in &self.roles {
            self.commitments
                .entry(role.id.clone())
                .or_default()
                .insert(month.key.clone(), defaults::COMMITMENT);
        }
        self.months.push(month);
        true
    }
}
