//! Dispatch result adapted to the method's declared return shape.

use crate::error::QueryError;
use crate::query::page::Page;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Affected rows of an update/delete with a non-boolean return type
    Affected(u64),
    /// `count != 0` of an update/delete returning boolean
    Flag(bool),
    Inserted(Value),
    Rows(Vec<Value>),
    Page(Page<Value>),
    BigData(Value),
    Scalar(Value),
    /// `None` when the single-row query matched nothing
    Row(Option<Value>),
}

impl QueryOutput {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            QueryOutput::Affected(count) => Some(*count),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            QueryOutput::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Option<Vec<Value>> {
        match self {
            QueryOutput::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn into_page(self) -> Option<Page<Value>> {
        match self {
            QueryOutput::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn into_row(self) -> Option<Option<Value>> {
        match self {
            QueryOutput::Row(row) => Some(row),
            _ => None,
        }
    }

    /// Plain JSON view of the output. Pages serialize with their request and total.
    pub fn into_value(self) -> Result<Value, QueryError> {
        Ok(match self {
            QueryOutput::Affected(count) => Value::from(count),
            QueryOutput::Flag(flag) => Value::Bool(flag),
            QueryOutput::Inserted(v) | QueryOutput::BigData(v) | QueryOutput::Scalar(v) => v,
            QueryOutput::Rows(rows) => Value::Array(rows),
            QueryOutput::Page(page) => {
                serde_json::to_value(page).map_err(|e| QueryError::Decode(e.to_string()))?
            }
            QueryOutput::Row(row) => row.unwrap_or(Value::Null),
        })
    }

    /// Decodes into a caller type, e.g. `Vec<User>`, `Option<User>`, `bool`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, QueryError> {
        let value = self.into_value()?;
        serde_json::from_value(value).map_err(|e| QueryError::Decode(e.to_string()))
    }

    /// Decodes a page result element-wise.
    pub fn decode_page<T: DeserializeOwned>(self) -> Result<Page<T>, QueryError> {
        let page = match self {
            QueryOutput::Page(page) => page,
            other => {
                return Err(QueryError::Decode(format!(
                    "expected a page result, got {:?}",
                    other
                )))
            }
        };

        let request = page.request().clone();
        let total = page.total_elements();
        let content = page
            .into_content()
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| QueryError::Decode(e.to_string()))?;

        Ok(Page::new(content, request, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::page::PageRequest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
    }

    #[test]
    fn test_decode_rows() {
        let output = QueryOutput::Rows(vec![
            json!({"id": 1, "name": "kim"}),
            json!({"id": 2, "name": "lee"}),
        ]);

        let users: Vec<User> = output.decode().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "lee");
    }

    #[test]
    fn test_decode_absent_row() {
        let user: Option<User> = QueryOutput::Row(None).decode().unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_decode_flag_and_count() {
        assert!(QueryOutput::Flag(true).decode::<bool>().unwrap());
        assert_eq!(QueryOutput::Affected(3).decode::<u64>().unwrap(), 3);
    }

    #[test]
    fn test_decode_page() {
        let page = Page::new(vec![json!({"id": 5, "name": "park"})], PageRequest::of(1, 1), 3);
        let users = QueryOutput::Page(page).decode_page::<User>().unwrap();

        assert_eq!(users.content()[0], User { id: 5, name: "park".into() });
        assert_eq!(users.total_pages(), 3);
    }

    #[test]
    fn test_decode_type_mismatch() {
        let err = QueryOutput::Scalar(json!("abc")).decode::<i64>().unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
    }
}
