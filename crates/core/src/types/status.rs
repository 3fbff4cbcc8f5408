//! Order status as tracked by the order service and the kitchen screen.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// Lifecycle of a submitted order.
///
/// New orders start as `Pending`; the kitchen moves them to `Cooking` and
/// `Completed`, or turns them down as `Rejected`; the cashier marks them
/// `Paid`.
///
/// The order service stores the status as free text, so any value outside
/// the known set is kept verbatim in `Other` instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Cooking,
    Completed,
    Paid,
    Cancelled,
    Rejected,
    Other(String),
}

impl OrderStatus {
    /// Whether the order still needs work from the kitchen or the cashier.
    ///
    /// Unrecognized statuses count as active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(
            self,
            Self::Completed | Self::Paid | Self::Cancelled | Self::Rejected
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Cooking => "Cooking",
            Self::Completed => "Completed",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = [
            Self::Pending,
            Self::Processing,
            Self::Cooking,
            Self::Completed,
            Self::Paid,
            Self::Cancelled,
            Self::Rejected,
        ];
        let trimmed = s.trim();
        Ok(known
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_string())))
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Processing.is_active());
        assert!(OrderStatus::Cooking.is_active());
        assert!(!OrderStatus::Completed.is_active());
        assert!(!OrderStatus::Paid.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
        assert!(!OrderStatus::Rejected.is_active());
        assert!(OrderStatus::Other("Served".to_string()).is_active());
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [OrderStatus::Pending, OrderStatus::Cooking, OrderStatus::Rejected] {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!("cooking".parse::<OrderStatus>().unwrap(), OrderStatus::Cooking);
        assert_eq!(
            "Served".parse::<OrderStatus>().unwrap(),
            OrderStatus::Other("Served".to_string())
        );
    }

    #[test]
    fn test_unknown_status_survives_serde() {
        let statuses: Vec<OrderStatus> =
            serde_json::from_str(r#"["Rejected", "Served", "Cooking"]"#).unwrap();
        assert_eq!(
            statuses,
            vec![
                OrderStatus::Rejected,
                OrderStatus::Other("Served".to_string()),
                OrderStatus::Cooking,
            ]
        );
        assert_eq!(serde_json::to_string(&statuses).unwrap(), r#"["Rejected","Served","Cooking"]"#);
    }
}
