//! Conversions between JSON values and SQLite values

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use serde_json::{Map, Number, Value};
use std::path::Path;
use vibe_core::errors::ToolError;

fn db_error(e: rusqlite::Error) -> ToolError {
    ToolError::Database(e.to_string())
}

/// Convert a JSON parameter into a SQLite value
pub fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        // Nested values are stored as their JSON text
        other => SqlValue::Text(other.to_string()),
    }
}

/// Convert a SQLite column value into JSON
pub fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

/// Run `query` against the database at `path`, one JSON object per row
pub fn run_query(path: &Path, query: &str, params: &[Value]) -> Result<Vec<Map<String, Value>>, ToolError> {
    let conn = Connection::open(path).map_err(db_error)?;
    let mut stmt = conn.prepare(query).map_err(db_error)?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt
        .query(params_from_iter(params.iter().map(to_sql)))
        .map_err(db_error)?;

    let mut results = Vec::new();
    while let Some(row) = rows.next().map_err(db_error)? {
        let mut object = Map::new();
        for (index, name) in columns.iter().enumerate() {
            object.insert(name.clone(), from_sql(row.get_ref(index).map_err(db_error)?));
        }
        results.push(object);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_sql() {
        assert_eq!(to_sql(&json!(null)), SqlValue::Null);
        assert_eq!(to_sql(&json!(true)), SqlValue::Integer(1));
        assert_eq!(to_sql(&json!(42)), SqlValue::Integer(42));
        assert_eq!(to_sql(&json!(1.5)), SqlValue::Real(1.5));
        assert_eq!(to_sql(&json!("x")), SqlValue::Text("x".to_string()));
        assert_eq!(to_sql(&json!([1, 2])), SqlValue::Text("[1,2]".to_string()));
    }

    #[test]
    fn test_from_sql() {
        assert_eq!(from_sql(ValueRef::Null), Value::Null);
        assert_eq!(from_sql(ValueRef::Integer(7)), json!(7));
        assert_eq!(from_sql(ValueRef::Real(f64::NAN)), Value::Null);
        assert_eq!(from_sql(ValueRef::Text(b"hi")), json!("hi"));
        assert_eq!(from_sql(ValueRef::Blob(&[1, 2])), json!([1, 2]));
    }
}
