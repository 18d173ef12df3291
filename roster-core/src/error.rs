//! Error type shared by catalog lookup, hydration and the share codec.
use std::fmt;
use thiserror::Error;

/// Catalog a failed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vehicle,
    Sponsor,
    Weapon,
    Upgrade,
    Perk,
}

impl Category {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehicle",
            Self::Sponsor => "Sponsor",
            Self::Weapon => "Weapon",
            Self::Upgrade => "Upgrade",
            Self::Perk => "Perk",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("{category} (\"{slug}\") not recognised")]
    NotFound { category: Category, slug: String },
    #[error("short key ({0}) not recognised")]
    UnknownShortKey(String),
    #[error("field ({0}) has no short key")]
    UnknownField(String),
    #[error("{field} value ({value}) is not valid")]
    InvalidValue { field: &'static str, value: String },
    #[error("share string is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("catalog data could not be parsed: {0}")]
    CatalogData(#[from] serde_json::Error),
}

impl RosterError {
    pub(crate) fn not_found(category: Category, slug: impl Into<String>) -> Self {
        Self::NotFound {
            category,
            slug: slug.into(),
        }
    }

    /// True for every unrecognised-key or unrecognised-slug failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::UnknownShortKey(_) | Self::UnknownField(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_category_and_slug() {
        let err = RosterError::not_found(Category::Weapon, "laser");
        assert_eq!(err.to_string(), "Weapon (\"laser\") not recognised");
        assert!(err.is_not_found());
    }

    #[test]
    fn short_key_failures_count_as_not_found() {
        assert!(RosterError::UnknownShortKey("zz".to_string()).is_not_found());
        assert!(RosterError::UnknownField("colour".to_string()).is_not_found());
        let invalid = RosterError::InvalidValue {
            field: "maxCost",
            value: "lots".to_string(),
        };
        assert!(!invalid.is_not_found());
        assert_eq!(invalid.to_string(), "maxCost value (lots) is not valid");
    }
}
