//! Price alert entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Condition kind an alert watches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Price rises above the threshold.
    PriceAbove,
    /// Price falls below the threshold.
    PriceBelow,
    /// Price gains at least the threshold percent over 24h.
    PercentUp,
    /// Price loses at least the threshold percent over 24h.
    PercentDown,
}

impl AlertType {
    /// Every alert type, in display order.
    pub const ALL: [Self; 4] = [
        Self::PriceAbove,
        Self::PriceBelow,
        Self::PercentUp,
        Self::PercentDown,
    ];

    /// Returns the English label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceAbove => "Price above",
            Self::PriceBelow => "Price below",
            Self::PercentUp => "Change up",
            Self::PercentDown => "Change down",
        }
    }

    /// Returns the locale key of the label.
    #[must_use]
    pub const fn locale_key(self) -> &'static str {
        match self {
            Self::PriceAbove => "alert_type.price_above",
            Self::PriceBelow => "alert_type.price_below",
            Self::PercentUp => "alert_type.percent_up",
            Self::PercentDown => "alert_type.percent_down",
        }
    }

    /// Returns the unit the threshold is expressed in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::PriceAbove | Self::PriceBelow => "USD",
            Self::PercentUp | Self::PercentDown => "%",
        }
    }
}

/// Alert payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    /// Client generated id, reused across retries of the same submission.
    pub request_id: Uuid,
    /// Coin ticker symbol.
    pub symbol: String,
    /// Condition kind.
    pub alert_type: AlertType,
    /// Numeric threshold in the unit of `alert_type`.
    pub threshold: f64,
    /// Re-arm after firing.
    pub repeating: bool,
    /// Free-form note shown with the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Alert stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Backend id.
    pub id: String,
    /// Coin ticker symbol.
    pub symbol: String,
    /// Condition kind.
    pub alert_type: AlertType,
    /// Numeric threshold.
    pub threshold: f64,
    /// Re-arm after firing.
    #[serde(default)]
    pub repeating: bool,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Returns a one-line summary such as `BTC Price above 70000 USD`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} {} {} {}",
            self.symbol,
            self.alert_type.label(),
            self.threshold,
            self.alert_type.unit()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_type_serializes_snake_case() {
        let json = serde_json::to_string(&AlertType::PercentDown).unwrap();
        assert_eq!(json, "\"percent_down\"");
    }

    #[test]
    fn test_alert_deserializes_with_defaults() {
        let json = r#"{
            "id": "a1",
            "symbol": "BTC",
            "alert_type": "price_above",
            "threshold": 70000.0,
            "created_at": "2024-05-01T12:00:00Z"
        }"#;

        let alert: Alert = serde_json::from_str(json).unwrap();

        assert!(!alert.repeating);
        assert!(alert.note.is_none());
        assert_eq!(alert.summary(), "BTC Price above 70000 USD");
    }

    #[test]
    fn test_new_alert_omits_missing_note() {
        let payload = NewAlert {
            request_id: Uuid::nil(),
            symbol: "ETH".to_string(),
            alert_type: AlertType::PercentUp,
            threshold: 5.0,
            repeating: true,
            note: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("note").is_none());
        assert_eq!(value["alert_type"], "percent_up");
    }
}
