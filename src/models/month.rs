/// A named budgeting period. Not tied to the calendar: "q3-crunch" is as
/// valid as "jan".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Month {
    /// Always lowercase; unique within a plan.
    pub(crate) key: String,
}

impl Month {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            key: Self::normalize(name),
        }
    }

    /// The key a user-typed name maps to.
    pub(crate) fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Display label: first letter uppercased, rest lowercase.
    pub(crate) fn label(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Find a month by name (case-insensitive) in a slice.
    pub(crate) fn find_by_name<'a>(months: &'a [Month], name: &str) -> Option<&'a Month> {
        let key = Self::normalize(name);
        months.iter().find(|m| m.key == key)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
