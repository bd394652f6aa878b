use serde_json::Value;

use super::error::FilterError;
use super::types::{OrderTerm, SortDirection};
use super::validate_identifier;

pub struct QueryOrder;

impl QueryOrder {
    /// Accepts "created_at desc", ["sort_order asc", "name"], or
    /// { "created_at": "desc" }.
    pub fn validate_and_parse(order: &Value) -> Result<Vec<OrderTerm>, FilterError> {
        let terms = match order {
            Value::String(s) => Self::parse_order_string(s)?,
            Value::Array(arr) => {
                let mut out = Vec::new();
                for v in arr {
                    if let Value::String(s) = v {
                        out.extend(Self::parse_order_string(s)?);
                    }
                }
                out
            }
            Value::Object(obj) => {
                let mut out = Vec::new();
                for (k, v) in obj {
                    let sort = match v.as_str().unwrap_or("asc").to_ascii_lowercase().as_str() {
                        "desc" => SortDirection::Desc,
                        _ => SortDirection::Asc,
                    };
                    out.push(OrderTerm {
                        column: k.clone(),
                        sort,
                    });
                }
                out
            }
            _ => vec![],
        };
        for term in &terms {
            validate_identifier(&term.column, "column")?;
        }
        Ok(terms)
    }

    fn parse_order_string(s: &str) -> Result<Vec<OrderTerm>, FilterError> {
        let mut out = Vec::new();
        for part in s.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.split_whitespace();
            if let Some(col) = it.next() {
                let dir = it.next().unwrap_or("asc");
                let sort = if dir.eq_ignore_ascii_case("desc") {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                out.push(OrderTerm {
                    column: col.to_string(),
                    sort,
                });
            }
        }
        Ok(out)
    }

    pub fn generate(terms: &[OrderTerm]) -> String {
        if terms.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = terms
            .iter()
            .map(|t| format!("\"{}\" {}", t.column, t.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_form() {
        let terms = QueryOrder::validate_and_parse(&json!("sort_order asc, name desc")).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].column, "sort_order");
        assert_eq!(terms[1].sort, SortDirection::Desc);
        assert_eq!(
            QueryOrder::generate(&terms),
            "ORDER BY \"sort_order\" ASC, \"name\" DESC"
        );
    }

    #[test]
    fn parses_object_form() {
        let terms = QueryOrder::validate_and_parse(&json!({"version": "desc"})).unwrap();
        assert_eq!(QueryOrder::generate(&terms), "ORDER BY \"version\" DESC");
    }

    #[test]
    fn rejects_hostile_column() {
        assert!(QueryOrder::validate_and_parse(&json!("name; DROP TABLE x")).is_err());
    }
}
