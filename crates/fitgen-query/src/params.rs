use crate::errors::QueryError;

/// Parameters for a statement with zero, one or two `?` placeholders.
///
/// Two placeholders receive the same value twice.
pub fn bind_parameters(
    label: &str,
    sql: &str,
    value: Option<i64>,
) -> Result<Vec<i64>, QueryError> {
    let placeholders = sql.matches('?').count();
    match (placeholders, value) {
        (0, _) => Ok(Vec::new()),
        (1 | 2, None) => Err(QueryError::MissingParameter(label.to_string())),
        (1, Some(value)) => Ok(vec![value]),
        (2, Some(value)) => Ok(vec![value, value]),
        (count, _) => Err(QueryError::Unsupported(format!(
            "query '{label}' has {count} placeholders; at most 2 are supported"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_count_drives_binding() {
        assert_eq!(bind_parameters("a", "SELECT 1", Some(3)).unwrap(), Vec::<i64>::new());
        assert_eq!(bind_parameters("b", "WHERE UserID = ?", Some(3)).unwrap(), vec![3]);
        assert_eq!(
            bind_parameters("c", "WHERE a = ? OR b = ?", Some(3)).unwrap(),
            vec![3, 3]
        );
    }

    #[test]
    fn missing_or_excess_parameters_fail() {
        assert!(matches!(
            bind_parameters("b", "WHERE UserID = ?", None),
            Err(QueryError::MissingParameter(_))
        ));
        assert!(matches!(
            bind_parameters("d", "? ? ?", Some(1)),
            Err(QueryError::Unsupported(_))
        ));
    }
}
