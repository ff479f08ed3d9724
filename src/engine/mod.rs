//! Labor cost derivation: commitment % → hours → amount, per role and month,
//! plus the grand-total row.
//!
//! Everything here is pure. The same [`Inputs`] always produce the same
//! [`BudgetSnapshot`].

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{defaults, Month, NumericInput, Role};

/// Snapshot key of the grand-total row.
pub(crate) const TOTAL_KEY: &str = "total";

/// Borrowed view of everything the budget depends on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Inputs<'a> {
    pub(crate) roles: &'a [Role],
    pub(crate) months: &'a [Month],
    /// role id → month key → percentage
    pub(crate) commitments: &'a HashMap<String, HashMap<String, u8>>,
    pub(crate) hourly_rates: &'a HashMap<String, NumericInput>,
    /// month key → days
    pub(crate) working_days: &'a HashMap<String, NumericInput>,
    /// role id → hours per day
    pub(crate) working_hours: &'a HashMap<String, NumericInput>,
}

impl Inputs<'_> {
    pub(crate) fn commitment(&self, role_id: &str, month: &str) -> u8 {
        self.commitments
            .get(role_id)
            .and_then(|by_month| by_month.get(month))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn days(&self, month: &str) -> Decimal {
        self.working_days
            .get(month)
            .map_or(Decimal::ZERO, |d| d.or_zero())
    }

    /// Missing entry → the 8 hour default; blank entry → 0.
    pub(crate) fn hours_per_day(&self, role_id: &str) -> Decimal {
        self.working_hours
            .get(role_id)
            .map_or(defaults::WORKING_HOURS, |h| h.or_zero())
    }

    pub(crate) fn rate(&self, role_id: &str) -> Decimal {
        self.hourly_rates
            .get(role_id)
            .map_or(Decimal::ZERO, |r| r.or_zero())
    }
}

/// Totals for one period: a month, or the grand total.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct PeriodBudget {
    pub(crate) total: Decimal,
    /// role id → amount
    pub(crate) breakdown: HashMap<String, Decimal>,
    /// role id → hours
    pub(crate) hours: HashMap<String, Decimal>,
    /// role id → percentage (the rounded average across months for the total row)
    pub(crate) commitments: HashMap<String, u8>,
}

impl PeriodBudget {
    pub(crate) fn amount(&self, role_id: &str) -> Decimal {
        self.breakdown.get(role_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn hours(&self, role_id: &str) -> Decimal {
        self.hours.get(role_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn commitment(&self, role_id: &str) -> u8 {
        self.commitments.get(role_id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct BudgetSnapshot {
    /// One entry per month, in month order.
    pub(crate) months: Vec<(String, PeriodBudget)>,
    pub(crate) total: PeriodBudget,
}

impl BudgetSnapshot {
    /// Look up a period by month key, or [`TOTAL_KEY`] for the grand total.
    pub(crate) fn get(&self, key: &str) -> Option<&PeriodBudget> {
        if key == TOTAL_KEY {
            return Some(&self.total);
        }
        self.months
            .iter()
            .find(|(month, _)| month == key)
            .map(|(_, budget)| budget)
    }

    /// Every period keyed as the snapshot exposes it, grand total last.
    pub(crate) fn periods(&self) -> impl Iterator<Item = (&str, &PeriodBudget)> {
        self.months
            .iter()
            .map(|(key, budget)| (key.as_str(), budget))
            .chain(std::iter::once((TOTAL_KEY, &self.total)))
    }

    pub(crate) fn grand_total(&self) -> Decimal {
        self.total.total
    }
}

/// `round(days * hours_per_day * commitment / 100)`, half-up, to whole hours.
///
/// Products saturate at `Decimal::MAX` instead of overflowing.
pub(crate) fn round_hours(days: Decimal, hours_per_day: Decimal, commitment: u8) -> Decimal {
    let exact = days
        .saturating_mul(hours_per_day)
        .saturating_mul(Decimal::from(commitment))
        / Decimal::ONE_HUNDRED;
    exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn compute_budget(inputs: &Inputs<'_>) -> BudgetSnapshot {
    let mut months = Vec::with_capacity(inputs.months.len());
    let mut total = PeriodBudget::default();

    for month in inputs.months {
        let days = inputs.days(&month.key);
        let mut period = PeriodBudget::default();

        for role in inputs.roles {
            let commitment = inputs.commitment(&role.id, &month.key);
            let hours = round_hours(days, inputs.hours_per_day(&role.id), commitment);
            let amount = hours.saturating_mul(inputs.rate(&role.id));

            period.breakdown.insert(role.id.clone(), amount);
            period.hours.insert(role.id.clone(), hours);
            period.commitments.insert(role.id.clone(), commitment);
            period.total = period.total.saturating_add(amount);

            let role_amount = total.breakdown.entry(role.id.clone()).or_default();
            *role_amount = role_amount.saturating_add(amount);
            let role_hours = total.hours.entry(role.id.clone()).or_default();
            *role_hours = role_hours.saturating_add(hours);
        }

        total.total = total.total.saturating_add(period.total);
        months.push((month.key.clone(), period));
    }

    for role in inputs.roles {
        let sum: u32 = inputs
            .months
            .iter()
            .map(|m| u32::from(inputs.commitment(&role.id, &m.key)))
            .sum();
        total
            .commitments
            .insert(role.id.clone(), average_commitment(sum, inputs.months.len()));
        total.breakdown.entry(role.id.clone()).or_default();
        total.hours.entry(role.id.clone()).or_default();
    }

    BudgetSnapshot { months, total }
}

/// Nearest-integer mean, halves rounding up. Zero months average to 0.
fn average_commitment(sum: u32, count: usize) -> u8 {
    let Ok(count) = u32::try_from(count) else {
        return 0;
    };
    if count == 0 {
        return 0;
    }
    let rounded = (sum * 2 + count) / (count * 2);
    u8::try_from(rounded).unwrap_or(u8::MAX)
}
