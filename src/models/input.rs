use rust_decimal::Decimal;
use std::str::FromStr;

/// A numeric form field that remembers whether the user cleared it.
///
/// A blank field renders as empty text but counts as zero wherever it feeds a
/// calculation, so `Blank` and `Value(0)` display differently yet compute the
/// same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum NumericInput {
    #[default]
    Blank,
    Value(Decimal),
}

impl NumericInput {
    /// Parse raw field text. Empty text is blank; anything unparseable is 0;
    /// negatives clamp to 0.
    pub(crate) fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        let value = Decimal::from_str(trimmed).unwrap_or(Decimal::ZERO);
        Self::Value(value.max(Decimal::ZERO))
    }

    /// Parse a whole-number field bounded by `max` (e.g. working days).
    pub(crate) fn parse_whole(raw: &str, max: u8) -> Self {
        match Self::parse(raw) {
            Self::Blank => Self::Blank,
            Self::Value(v) => Self::Value(v.trunc().min(Decimal::from(max))),
        }
    }

    pub(crate) fn value(self) -> Option<Decimal> {
        match self {
            Self::Blank => None,
            Self::Value(v) => Some(v),
        }
    }

    pub(crate) fn or_zero(self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

impl From<u8> for NumericInput {
    fn from(value: u8) -> Self {
        Self::Value(Decimal::from(value))
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}
