use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Header row of the raw Prestia extraction TSV.
pub const STATEMENT_HEADER: [&str; 6] =
    ["card_last4", "date", "merchant", "currency", "amount", "note"];

/// Header row of the raw USAA clipboard TSV.
pub const CLIP_HEADER: [&str; 4] = ["date", "merchant", "usaa_category", "amount_usd"];

/// Category sentinel for rows that still need a human decision.
pub const REVIEW_CATEGORY: &str = "要確認";

/// One transaction matched from a Prestia statement.
///
/// Amount sign convention: spends are negative, refunds/credits positive.
/// The statement prints debits as positive numbers; the matcher negates them
/// once and nothing downstream may invert the sign again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    pub card_last4: String,
    pub date: NaiveDate,
    pub merchant: String,
    pub currency: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

impl StatementTransaction {
    /// Raw TSV row, columns per [`STATEMENT_HEADER`].
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.card_last4.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.merchant.clone(),
            self.currency.clone(),
            format!("{:.2}", self.amount),
            self.note.clone(),
        ]
    }
}

/// One transaction matched from a USAA clipboard paste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipTransaction {
    pub date: NaiveDate,
    pub merchant: String,
    pub usaa_category: String,
    pub amount_usd: f64,
}

impl ClipTransaction {
    /// Raw TSV row, columns per [`CLIP_HEADER`].
    pub fn raw_row(&self) -> Vec<String> {
        vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.merchant.clone(),
            self.usaa_category.clone(),
            format!("{:.2}", self.amount_usd),
        ]
    }

    /// Spreadsheet-import row: 10 positional columns, no header. Column A is
    /// blank for detail rows; the USAA category rides along in the note
    /// column and the category column stays [`REVIEW_CATEGORY`] until a
    /// human sorts it.
    pub fn numbers_row(&self) -> Vec<String> {
        vec![
            String::new(),
            format!("{}/{}", self.date.month(), self.date.day()),
            self.merchant.clone(),
            "USAA".to_string(),
            format!("{:.2}", self.amount_usd),
            String::new(),
            self.usaa_category.clone(),
            String::new(),
            self.date.format("%Y-%m").to_string(),
            REVIEW_CATEGORY.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_row_formatting() {
        let txn = StatementTransaction {
            card_last4: "1234".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            merchant: "STARBUCKS #4410".to_string(),
            currency: "JPY".to_string(),
            amount: -1280.0,
            note: String::new(),
        };
        assert_eq!(
            txn.to_row(),
            vec!["1234", "2024-01-05", "STARBUCKS #4410", "JPY", "-1280.00", ""]
        );
    }

    #[test]
    fn test_clip_numbers_row_shape() {
        let txn = ClipTransaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            merchant: "H-E-B #455".to_string(),
            usaa_category: "Groceries".to_string(),
            amount_usd: -42.17,
        };
        let row = txn.numbers_row();
        assert_eq!(row.len(), 10);
        assert_eq!(row[1], "3/7");
        assert_eq!(row[3], "USAA");
        assert_eq!(row[4], "-42.17");
        assert_eq!(row[8], "2024-03");
        assert_eq!(row[9], REVIEW_CATEGORY);
    }
}
