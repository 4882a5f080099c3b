use crate::core::Value;

/// Number of `?` placeholders in `soql`.
///
/// Purely lexical: a `?` inside a string literal of the query counts too,
/// see [`bind_parameters`].
#[must_use]
pub fn count_placeholders(soql: &str) -> usize {
    soql.matches('?').count()
}

/// Substitutes each `?` in `soql`, left to right, with the literal form of
/// the correspondingly ordered parameter.
///
/// Parameters beyond the placeholder count are ignored; placeholders beyond
/// the parameter count bind to `NULL`. Pure and idempotent for fixed inputs.
///
/// Known limitation, kept as documented behavior: a literal `?` embedded in
/// a string literal of the source query is indistinguishable from a
/// placeholder and will be substituted as one.
#[must_use]
pub fn bind_parameters(soql: &str, params: &[Value]) -> String {
    let mut result = String::with_capacity(soql.len());
    let mut values = params.iter();
    for (i, piece) in soql.split('?').enumerate() {
        if i > 0 {
            match values.next() {
                Some(value) => result.push_str(&value.to_soql_literal()),
                None => result.push_str("NULL"),
            }
        }
        result.push_str(piece);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_placeholders() {
        assert_eq!(count_placeholders("SELECT Id FROM Account"), 0);
        assert_eq!(
            count_placeholders("SELECT Id FROM Account WHERE a = ? AND b = ?"),
            2
        );
    }

    #[test]
    fn test_bind_in_order() {
        let query = "SELECT Id FROM Contact WHERE AccountId = ? AND LastName = ?";
        let params = vec![
            Value::Text("001xx".to_string()),
            Value::Text("Ivanov".to_string()),
        ];

        let bound = bind_parameters(query, &params);
        assert_eq!(
            bound,
            "SELECT Id FROM Contact WHERE AccountId = '001xx' AND LastName = 'Ivanov'"
        );
        assert_eq!(count_placeholders(&bound), 0);
    }

    #[test]
    fn test_bind_escapes_quotes() {
        let bound = bind_parameters(
            "SELECT Id FROM Contact WHERE LastName = ?",
            &[Value::Text("O'Brien".to_string())],
        );
        assert_eq!(bound, "SELECT Id FROM Contact WHERE LastName = 'O\\'Brien'");
    }

    #[test]
    fn test_missing_parameters_bind_null() {
        let bound = bind_parameters("UPDATE x SET a = ?, b = ?", &[Value::Integer(1)]);
        assert_eq!(bound, "UPDATE x SET a = 1, b = NULL");
    }

    #[test]
    fn test_excess_parameters_ignored() {
        let bound = bind_parameters(
            "SELECT Id FROM Case WHERE n = ?",
            &[Value::Integer(1), Value::Integer(2)],
        );
        assert_eq!(bound, "SELECT Id FROM Case WHERE n = 1");
    }

    #[test]
    fn test_bind_is_idempotent_for_fixed_inputs() {
        let query = "SELECT Id FROM Case WHERE n = ? AND s = ?";
        let params = vec![Value::Integer(3), Value::Text("open".to_string())];
        assert_eq!(
            bind_parameters(query, &params),
            bind_parameters(query, &params)
        );
    }

    // A '?' inside a string literal of the source query is treated as a
    // placeholder. Accepted boundary of the purely lexical binder, not a
    // bug to special-case.
    #[test]
    fn test_question_mark_inside_literal_is_corrupted() {
        let query = "SELECT Id FROM Case WHERE Subject = 'what?' AND n = ?";
        let params = vec![Value::Integer(1), Value::Integer(2)];

        let bound = bind_parameters(query, &params);
        assert_eq!(bound, "SELECT Id FROM Case WHERE Subject = 'what1' AND n = 2");
    }
}
