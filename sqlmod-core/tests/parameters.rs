#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sqlmod_core::{ParameterContract, StatementError, Template, parse_parameters};

    fn parse_error(sql: &str) -> StatementError {
        let error = parse_parameters(sql).expect_err("the statement must be rejected");
        StatementError::find(&error)
            .cloned()
            .expect("a StatementError is expected")
    }

    #[test]
    fn no_parameters() {
        let (sql, contract) = parse_parameters("SELECT * FROM users").unwrap();
        assert_eq!(sql, "SELECT * FROM users");
        assert_eq!(contract, ParameterContract::NoParams);
        assert_eq!(contract.arity(), 0);
    }

    #[test]
    fn numbered_parameters() {
        let (sql, contract) =
            parse_parameters("SELECT * FROM t WHERE a = $1 AND b = $2 AND c = $1").unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE a = $1 AND b = $2 AND c = $1");
        assert_eq!(contract, ParameterContract::FixedArity(2));
        assert!(!contract.is_named());
    }

    #[test]
    fn numbered_parameters_out_of_order() {
        let (_, contract) =
            parse_parameters("INSERT INTO t VALUES ($3, $1, $2, $10, $4, $5, $6, $7, $8, $9)")
                .unwrap();
        assert_eq!(contract, ParameterContract::FixedArity(10));
    }

    #[test]
    fn named_parameters() {
        let (sql, contract) =
            parse_parameters("SELECT * FROM t WHERE a = $a AND b = $b AND c = $a").unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE a = $1 AND b = $2 AND c = $1");
        assert_eq!(
            contract,
            ParameterContract::NamedOrder(vec!["a".into(), "b".into()])
        );
        assert_eq!(contract.arity(), 2);
    }

    #[test]
    fn named_parameters_with_underscores() {
        let template = Template::parse(indoc! {"
            SELECT *
            FROM orders
            WHERE customer_id = $customer_id
              AND placed_at >= $from_date
              AND placed_at < $to_date
              AND customer_id <> $customer_id
        "})
        .unwrap();
        assert_eq!(
            template.sql(),
            indoc! {"
                SELECT *
                FROM orders
                WHERE customer_id = $1
                  AND placed_at >= $2
                  AND placed_at < $3
                  AND customer_id <> $1
            "}
        );
        assert_eq!(
            *template.contract(),
            ParameterContract::NamedOrder(vec![
                "customer_id".into(),
                "from_date".into(),
                "to_date".into()
            ])
        );
    }

    #[test]
    fn named_parameter_followed_by_punctuation() {
        let (sql, contract) = parse_parameters("SELECT $x::INT, $y||'a'").unwrap();
        assert_eq!(sql, "SELECT $1::INT, $2||'a'");
        assert_eq!(
            contract,
            ParameterContract::NamedOrder(vec!["x".into(), "y".into()])
        );
    }

    #[test]
    fn lone_dollar_is_text() {
        let (sql, contract) = parse_parameters("SELECT '$' || name FROM t WHERE id = $1").unwrap();
        assert_eq!(sql, "SELECT '$' || name FROM t WHERE id = $1");
        assert_eq!(contract, ParameterContract::FixedArity(1));
    }

    #[test]
    fn mixed_styles() {
        assert_eq!(
            parse_error("SELECT * FROM t WHERE a = $1 AND b = $b"),
            StatementError::MixedParameterStyles
        );
        assert_eq!(
            parse_error("SELECT * FROM t WHERE a = $a AND b = $1"),
            StatementError::MixedParameterStyles
        );
    }

    #[test]
    fn non_contiguous() {
        assert_eq!(
            parse_error("SELECT $1, $2, $4"),
            StatementError::NonContiguousPositionalParameters(vec![1, 2, 4])
        );
        assert_eq!(
            parse_error("SELECT $2, $3"),
            StatementError::NonContiguousPositionalParameters(vec![2, 3])
        );
        assert_eq!(
            parse_error("SELECT $0"),
            StatementError::NonContiguousPositionalParameters(vec![0])
        );
    }

    #[test]
    fn malformed() {
        for sql in [
            "SELECT $Name",
            "SELECT $a1",
            "SELECT $1a",
            "SELECT $_a",
            "SELECT $a__b",
            "SELECT $a_",
        ] {
            assert!(
                matches!(parse_error(sql), StatementError::MalformedParameter(..)),
                "{sql} must be malformed"
            );
        }
        assert_eq!(
            parse_error("SELECT $snake_Case"),
            StatementError::MalformedParameter("$snake_Case".into())
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            parse_error("SELECT $1, $3").to_string(),
            "Numbered parameters must be contiguous and start at $1, found $1, $3"
        );
    }

    #[test]
    fn idempotent() {
        let sql = "UPDATE t SET a = $value WHERE id = $id";
        let first = parse_parameters(sql).unwrap();
        assert_eq!(parse_parameters(sql).unwrap(), first);
        let (rewritten, _) = first;
        let (again, contract) = parse_parameters(&rewritten).unwrap();
        assert_eq!(again, rewritten);
        assert_eq!(contract, ParameterContract::FixedArity(2));
    }
}
