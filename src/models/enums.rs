use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Enum value the backend does not recognize.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {field}: '{value}'")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(FeeStatus {
    Paid => "paid",
    Unpaid => "unpaid",
});

// The backend spells ascending this way; the wire value is load-bearing.
str_enum!(SortOrder {
    Ascending => "accending",
    Descending => "descending",
});

/// `checkStatus` query filter for the appointment list.
str_enum!(CheckFilter {
    All => "all",
    Active => "active",
    Checked => "checked",
});

/// Lifecycle state of an appointment. `Deleted` dominates `Checked`;
/// restore is not a fourth state, it returns a record to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Active,
    Checked,
    Deleted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn fee_status_round_trips() {
        assert_eq!(FeeStatus::from_str("paid").unwrap(), FeeStatus::Paid);
        assert_eq!(FeeStatus::Unpaid.as_str(), "unpaid");
    }

    #[test]
    fn sort_order_uses_backend_spelling() {
        assert_eq!(SortOrder::Ascending.as_str(), "accending");
        assert_eq!(
            SortOrder::from_str("accending").unwrap(),
            SortOrder::Ascending
        );
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = CheckFilter::from_str("archived").unwrap_err();
        assert_eq!(err.field, "CheckFilter");
        assert_eq!(err.value, "archived");
    }
}
