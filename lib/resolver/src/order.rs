use crate::error::InvalidSortOrder;
use std::fmt;
use std::str::FromStr;

/// The order in which decisions are returned, by publication date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// The SPARQL keyword of this order.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = InvalidSortOrder;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("ASC") {
            Ok(Self::Asc)
        } else if trimmed.eq_ignore_ascii_case("DESC") {
            Ok(Self::Desc)
        } else {
            Err(InvalidSortOrder(value.to_owned()))
        }
    }
}

/// How many decisions to keep after the store sorted them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResultLimit {
    #[default]
    Unlimited,
    AtMost(usize),
}

impl ResultLimit {
    /// Interprets the `number` argument of the decision lookup.
    ///
    /// `-1` means no limit. `0` also means no limit: existing callers rely on `0` returning every
    /// decision, so it is not treated as "return nothing". Any other negative count is treated
    /// as no limit as well.
    pub fn from_count(count: i64) -> Self {
        match usize::try_from(count) {
            Ok(0) | Err(_) => Self::Unlimited,
            Ok(limit) => Self::AtMost(limit),
        }
    }

    pub fn apply<T>(self, items: &mut Vec<T>) {
        if let Self::AtMost(limit) = self {
            items.truncate(limit);
        }
    }
}
