//! FILENAME: core/cell-engine/src/value.rs
//! PURPOSE: Scalar cell values and their encoding into the output cell payload.
//! CONTEXT: A grid renders to rows of `CellValue`; each value is mapped to a
//! `CellData` exactly once when the grid data payload is built. Cell formats
//! are opaque JSON objects and are never inspected here.

use serde::{Deserialize, Serialize};

/// An opaque cell format object (e.g. `{"textFormat": {"bold": true}}`).
pub type CellFormat = serde_json::Value;

/// A scalar that can be placed in a rendered grid cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True for text starting with `=`.
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.starts_with('='))
    }

    /// Text used when the value is embedded in formula text or compared as a label.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format!("{}", n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// The entered value of a cell, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedValue {
    StringValue(String),
    NumberValue(f64),
    FormulaValue(String),
}

/// One cell of the output payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_entered_value: Option<ExtendedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_entered_format: Option<CellFormat>,
}

impl CellData {
    /// Encodes a scalar. Text starting with `=` becomes a formula, other text a
    /// string, numbers a number, and `Empty` a payload without any value.
    pub fn from_value(value: &CellValue) -> Self {
        let user_entered_value = match value {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(ExtendedValue::NumberValue(*n)),
            CellValue::Text(s) if s.starts_with('=') => Some(ExtendedValue::FormulaValue(s.clone())),
            CellValue::Text(s) => Some(ExtendedValue::StringValue(s.clone())),
        };
        CellData {
            user_entered_value,
            user_entered_format: None,
        }
    }

    /// Attaches a format, replacing any previous one.
    pub fn with_format(mut self, format: Option<CellFormat>) -> Self {
        if format.is_some() {
            self.user_entered_format = format;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_value() {
        let data = CellData::from_value(&CellValue::text("文字"));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "userEnteredValue": { "stringValue": "文字" } })
        );
    }

    #[test]
    fn test_number_value() {
        let data = CellData::from_value(&CellValue::from(1));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "userEnteredValue": { "numberValue": 1.0 } })
        );
    }

    #[test]
    fn test_formula_value() {
        let data = CellData::from_value(&CellValue::text("=SUM(A1:A2)"));
        assert_eq!(
            data.user_entered_value,
            Some(ExtendedValue::FormulaValue("=SUM(A1:A2)".to_string()))
        );
    }

    #[test]
    fn test_text_with_inner_equals_is_a_string() {
        let data = CellData::from_value(&CellValue::text("a=b"));
        assert_eq!(data.user_entered_value, Some(ExtendedValue::StringValue("a=b".to_string())));
    }

    #[test]
    fn test_empty_value_has_no_entered_value() {
        let data = CellData::from_value(&CellValue::Empty);
        assert_eq!(serde_json::to_value(&data).unwrap(), json!({}));
    }

    #[test]
    fn test_with_format_merges_verbatim() {
        let data = CellData::from_value(&CellValue::text("x"))
            .with_format(Some(json!({ "textDirection": "1" })));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "userEnteredValue": { "stringValue": "x" },
                "userEnteredFormat": { "textDirection": "1" }
            })
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Empty);
        assert_eq!(CellValue::from(Some(2.5)), CellValue::Number(2.5));
    }
}
