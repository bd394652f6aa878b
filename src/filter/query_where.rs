use serde_json::Value;

use super::error::FilterError;
use super::types::{WhereCondition, WhereOp};
use super::validate_identifier;

/// Compiles a JSON condition object into a parameterized WHERE clause.
///
/// Supported forms:
///   { "status": "active" }                      implicit equality
///   { "usage_count": { "$gte": 5 } }            comparison operators
///   { "media_type": { "$in": ["audio", "video"] } }
///   { "$or": [ {...}, {...} ] }, { "$not": {...} }
pub struct QueryWhere {
    param_values: Vec<Value>,
    param_index: usize,
    conditions: Vec<WhereCondition>,
}

impl QueryWhere {
    fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    pub fn generate(
        where_data: &Value,
        starting_param_index: usize,
    ) -> Result<(String, Vec<Value>), FilterError> {
        let mut builder = Self::new(starting_param_index);
        builder.build(where_data)
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        if where_data.is_null() {
            return Ok(());
        }
        match where_data {
            Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause(
                "WHERE must be a JSON object".to_string(),
            )),
        }
    }

    fn build(&mut self, where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        self.parse(where_data)?;

        let mut sql_parts = vec![];
        let conditions = self.conditions.clone();
        for condition in &conditions {
            sql_parts.push(self.render(condition)?);
        }
        let where_clause = if sql_parts.is_empty() {
            String::new()
        } else {
            sql_parts.join(" AND ")
        };
        Ok((where_clause, self.param_values.clone()))
    }

    fn parse(&mut self, where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Object(obj) => {
                for (key, value) in obj {
                    if key.starts_with('$') {
                        self.parse_logical(key, value)?;
                    } else {
                        self.parse_field(key, value)?;
                    }
                }
                Ok(())
            }
            _ => Err(FilterError::InvalidWhereClause(
                "WHERE must be a JSON object".to_string(),
            )),
        }
    }

    fn parse_logical(&mut self, op: &str, value: &Value) -> Result<(), FilterError> {
        match op {
            "$and" | "$or" => {
                let arr = value.as_array().ok_or_else(|| {
                    FilterError::InvalidOperatorData(format!("{} requires an array", op))
                })?;
                let mut sql_parts = Vec::new();
                for v in arr {
                    let (sql, params) = Self::generate(v, self.param_index)?;
                    self.param_values.extend(params);
                    self.param_index = self.param_values.len();
                    sql_parts.push(format!("({})", sql));
                }
                let joiner = if op == "$and" { " AND " } else { " OR " };
                self.conditions.push(WhereCondition {
                    column: sql_parts.join(joiner),
                    operator: WhereOp::Raw,
                    data: Value::Null,
                });
                Ok(())
            }
            "$not" => {
                let (sql, params) = Self::generate(value, self.param_index)?;
                self.param_values.extend(params);
                self.param_index = self.param_values.len();
                self.conditions.push(WhereCondition {
                    column: format!("NOT ({})", sql),
                    operator: WhereOp::Raw,
                    data: Value::Null,
                });
                Ok(())
            }
            other => Err(FilterError::UnsupportedOperator(other.to_string())),
        }
    }

    fn parse_field(&mut self, field: &str, value: &Value) -> Result<(), FilterError> {
        validate_identifier(field, "column")?;
        if let Value::Object(obj) = value {
            for (op_key, op_val) in obj {
                let operator = Self::map_operator(op_key)?;
                self.conditions.push(WhereCondition {
                    column: field.to_string(),
                    operator,
                    data: op_val.clone(),
                });
            }
        } else {
            // Implicit equality: { field: value }
            self.conditions.push(WhereCondition {
                column: field.to_string(),
                operator: WhereOp::Eq,
                data: value.clone(),
            });
        }
        Ok(())
    }

    fn map_operator(op_key: &str) -> Result<WhereOp, FilterError> {
        Ok(match op_key {
            "$eq" => WhereOp::Eq,
            "$ne" | "$neq" => WhereOp::Neq,
            "$gt" => WhereOp::Gt,
            "$gte" => WhereOp::Gte,
            "$lt" => WhereOp::Lt,
            "$lte" => WhereOp::Lte,
            "$like" => WhereOp::Like,
            "$ilike" => WhereOp::ILike,
            "$in" => WhereOp::In,
            "$between" => WhereOp::Between,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }

    fn render(&mut self, condition: &WhereCondition) -> Result<String, FilterError> {
        if condition.operator == WhereOp::Raw {
            return Ok(condition.column.clone());
        }

        let quoted = format!("\"{}\"", condition.column);
        let sql = match condition.operator {
            WhereOp::Eq => {
                if condition.data.is_null() {
                    format!("{} IS NULL", quoted)
                } else {
                    format!("{} = {}", quoted, self.param(condition.data.clone()))
                }
            }
            WhereOp::Neq => {
                if condition.data.is_null() {
                    format!("{} IS NOT NULL", quoted)
                } else {
                    format!("{} <> {}", quoted, self.param(condition.data.clone()))
                }
            }
            WhereOp::Gt => format!("{} > {}", quoted, self.param(condition.data.clone())),
            WhereOp::Gte => format!("{} >= {}", quoted, self.param(condition.data.clone())),
            WhereOp::Lt => format!("{} < {}", quoted, self.param(condition.data.clone())),
            WhereOp::Lte => format!("{} <= {}", quoted, self.param(condition.data.clone())),
            WhereOp::Like => format!("{} LIKE {}", quoted, self.param(condition.data.clone())),
            WhereOp::ILike => format!("{} ILIKE {}", quoted, self.param(condition.data.clone())),
            WhereOp::In => match &condition.data {
                Value::Array(values) if values.is_empty() => "1=0".to_string(),
                Value::Array(values) => {
                    let params: Vec<String> =
                        values.iter().map(|v| self.param(v.clone())).collect();
                    format!("{} IN ({})", quoted, params.join(", "))
                }
                other => format!("{} = {}", quoted, self.param(other.clone())),
            },
            WhereOp::Between => match &condition.data {
                Value::Array(values) if values.len() == 2 => format!(
                    "{} BETWEEN {} AND {}",
                    quoted,
                    self.param(values[0].clone()),
                    self.param(values[1].clone())
                ),
                _ => {
                    return Err(FilterError::InvalidOperatorData(
                        "$between requires an array of exactly 2 values".to_string(),
                    ))
                }
            },
            WhereOp::Raw => unreachable!(),
        };
        Ok(sql)
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
