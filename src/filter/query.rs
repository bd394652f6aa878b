use serde_json::Value;

use super::error::FilterError;
use super::query_order::QueryOrder;
use super::query_where::QueryWhere;
use super::types::{OrderTerm, QuerySpec, SqlResult};
use super::validate_identifier;

/// Builds a single parameterized SELECT from a `QuerySpec`.
///
/// The caller-supplied limit is capped at `max_limit`, taken from the
/// injected application config rather than a process-wide singleton.
pub struct Query {
    table_name: String,
    select_columns: Vec<String>,
    where_data: Option<Value>,
    order_terms: Vec<OrderTerm>,
    limit: Option<i32>,
    offset: Option<i32>,
    max_limit: i32,
}

impl Query {
    pub fn new(table_name: impl Into<String>, max_limit: i32) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        validate_identifier(&table_name, "table")?;
        Ok(Self {
            table_name,
            select_columns: vec![],
            where_data: None,
            order_terms: vec![],
            limit: None,
            offset: None,
            max_limit,
        })
    }

    pub fn assign(&mut self, spec: QuerySpec) -> Result<&mut Self, FilterError> {
        if let Some(select) = spec.select {
            self.select(select)?;
        }
        if let Some(where_clause) = spec.where_clause {
            self.where_clause(where_clause)?;
        }
        if let Some(order) = spec.order {
            self.order(order)?;
        }
        if let Some(limit) = spec.limit {
            self.limit(limit, spec.offset)?;
        }
        Ok(self)
    }

    pub fn select(&mut self, columns: Vec<String>) -> Result<&mut Self, FilterError> {
        for column in &columns {
            if column != "*" {
                validate_identifier(column, "column")?;
            }
        }
        self.select_columns = columns;
        Ok(self)
    }

    pub fn where_clause(&mut self, conditions: Value) -> Result<&mut Self, FilterError> {
        QueryWhere::validate(&conditions)?;
        self.where_data = Some(conditions);
        Ok(self)
    }

    pub fn order(&mut self, order_spec: Value) -> Result<&mut Self, FilterError> {
        self.order_terms = QueryOrder::validate_and_parse(&order_spec)?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: i32, offset: Option<i32>) -> Result<&mut Self, FilterError> {
        if limit < 0 {
            return Err(FilterError::InvalidLimit(
                "limit must be non-negative".to_string(),
            ));
        }
        if let Some(off) = offset {
            if off < 0 {
                return Err(FilterError::InvalidOffset(
                    "offset must be non-negative".to_string(),
                ));
            }
        }
        self.limit = Some(limit.min(self.max_limit));
        self.offset = offset;
        Ok(self)
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let select_clause = self.build_select_clause();
        let (where_clause, params) = if let Some(ref where_data) = self.where_data {
            QueryWhere::generate(where_data, 0)?
        } else {
            (String::new(), vec![])
        };
        let order_clause = QueryOrder::generate(&self.order_terms);
        let limit_clause = self.build_limit_clause();

        let query = [
            format!("SELECT {}", select_clause),
            format!("FROM \"{}\"", self.table_name),
            if where_clause.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", where_clause)
            },
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        Ok(SqlResult { query, params })
    }

    fn build_select_clause(&self) -> String {
        if self.select_columns.is_empty() || self.select_columns.contains(&"*".to_string()) {
            "*".to_string()
        } else {
            self.select_columns
                .iter()
                .map(|c| format!("\"{}\"", c))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_query_selects_everything() {
        let q = Query::new("course_types", 1000).unwrap();
        let sql = q.to_sql().unwrap();
        assert_eq!(sql.query, "SELECT * FROM \"course_types\"");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn full_query_shape() {
        let mut q = Query::new("student_media", 1000).unwrap();
        q.assign(QuerySpec {
            select: Some(vec!["id".into(), "is_favorite".into()]),
            where_clause: Some(json!({"student_id": "s-1"})),
            order: Some(json!("created_at desc")),
            limit: Some(20),
            offset: None,
        })
        .unwrap();
        let sql = q.to_sql().unwrap();
        assert_eq!(
            sql.query,
            "SELECT \"id\", \"is_favorite\" FROM \"student_media\" WHERE \"student_id\" = $1 ORDER BY \"created_at\" DESC LIMIT 20"
        );
        assert_eq!(sql.params, vec![json!("s-1")]);
    }

    #[test]
    fn limit_is_capped() {
        let mut q = Query::new("teachers", 100).unwrap();
        q.limit(5000, Some(10)).unwrap();
        let sql = q.to_sql().unwrap();
        assert!(sql.query.ends_with("LIMIT 100 OFFSET 10"));
    }

    #[test]
    fn negative_limit_rejected() {
        let mut q = Query::new("teachers", 100).unwrap();
        assert!(q.limit(-1, None).is_err());
        assert!(q.limit(1, Some(-5)).is_err());
    }

    #[test]
    fn bad_table_name_rejected() {
        assert!(Query::new("bad-name", 100).is_err());
    }
}
