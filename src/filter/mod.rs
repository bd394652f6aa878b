pub mod error;
pub mod query;
pub mod query_order;
pub mod query_where;
pub mod types;

pub use error::FilterError;
pub use query::Query;
pub use types::{QuerySpec, SqlResult};

/// Validate a SQL identifier (collection or column name). Alphanumeric plus
/// underscore, first character alphabetic or underscore.
pub fn validate_identifier(name: &str, what: &str) -> Result<(), FilterError> {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => {
            return Err(FilterError::InvalidIdentifier(format!(
                "{} name cannot be empty",
                what
            )))
        }
    };
    if !(first.is_ascii_alphabetic() || first == '_')
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(FilterError::InvalidIdentifier(format!(
            "invalid {} name: {}",
            what, name
        )));
    }
    Ok(())
}
