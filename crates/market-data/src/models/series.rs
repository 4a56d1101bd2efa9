use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar as served by the backend.
///
/// Points are kept in the order the backend sent them; nothing in this crate
/// re-sorts a series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Trading day (`YYYY-MM-DD` on the wire)
    pub date: NaiveDate,

    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,

    /// Shares traded
    pub volume: u64,
}

impl SeriesPoint {
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserializes_backend_payload() {
        let json = r#"{"date":"2024-01-02","open":185.64,"high":188.44,"low":183.89,"close":185.64,"volume":82488700}"#;
        let point: SeriesPoint = serde_json::from_str(json).unwrap();

        assert_eq!(point.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(point.high, dec!(188.44));
        assert_eq!(point.volume, 82_488_700);
    }

    #[test]
    fn test_integer_prices_are_accepted() {
        let json = r#"{"date":"2024-01-02","open":100,"high":101,"low":99,"close":100,"volume":0}"#;
        let point: SeriesPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.close, dec!(100));
    }
}
