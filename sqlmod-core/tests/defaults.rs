#[cfg(test)]
mod tests {
    use sqlmod_core::{
        Arguments, AsValue, Database, DefaultValue, Defaults, Error, ParameterContract,
        StatementError, Unit, Value, args, named,
    };
    use std::sync::Arc;

    fn database() -> Database {
        Database::new(Arc::new(Unit::new("defaults")))
    }

    fn error_kind(error: Error) -> StatementError {
        StatementError::find(&error)
            .cloned()
            .expect("a StatementError is expected")
    }

    fn named_contract(names: &[&str]) -> ParameterContract {
        ParameterContract::NamedOrder(names.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn named_constant() {
        let defaults = Defaults::named([("min", DefaultValue::constant(10))]);
        let contract = named_contract(&["id", "min"]);
        let db = database();
        assert_eq!(
            defaults.resolve(&contract, named! { id: 1 }, &db).unwrap(),
            named! { id: 1, min: 10 }
        );
        assert_eq!(
            defaults
                .resolve(&contract, named! { id: 1, min: 20 }, &db)
                .unwrap(),
            named! { id: 1, min: 20 }
        );
        assert_eq!(
            defaults
                .resolve(&contract, named! { id: 1, min: Value::Null }, &db)
                .unwrap(),
            named! { id: 1, min: Value::Null }
        );
    }

    #[test]
    fn named_without_arguments() {
        let defaults = Defaults::named([
            ("a", DefaultValue::constant("x")),
            ("b", DefaultValue::constant("y")),
        ]);
        let contract = named_contract(&["a", "b"]);
        assert_eq!(
            defaults
                .resolve(&contract, Arguments::none(), &database())
                .unwrap(),
            named! { a: "x", b: "y" }
        );
        let error = defaults
            .resolve(&contract, args![1], &database())
            .unwrap_err();
        assert_eq!(
            error_kind(error),
            StatementError::ArgumentStyleMismatch { expected: "named" }
        );
    }

    #[test]
    fn named_deferred_sees_earlier_values() {
        let defaults = Defaults::named([
            ("from", DefaultValue::constant(5)),
            (
                "to",
                DefaultValue::deferred(|args, _| {
                    let from = args.by_name("from").cloned().unwrap_or_default();
                    let from = i64::try_from_value(from)?;
                    Ok((from + 10).into())
                }),
            ),
        ]);
        let contract = named_contract(&["from", "to"]);
        let db = database();
        assert_eq!(
            defaults.resolve(&contract, named! {}, &db).unwrap(),
            named! { from: 5, to: 15i64 }
        );
        assert_eq!(
            defaults.resolve(&contract, named! { from: 1 }, &db).unwrap(),
            named! { from: 1, to: 11i64 }
        );
        assert_eq!(
            defaults
                .resolve(&contract, named! { to: 0 }, &db)
                .unwrap(),
            named! { from: 5, to: 0 }
        );
    }

    #[test]
    fn deferred_sees_the_instance() {
        let defaults = Defaults::named([(
            "unit",
            DefaultValue::deferred(|_, db| Ok(db.unit().name().into())),
        )]);
        assert_eq!(
            defaults
                .resolve(&named_contract(&["unit"]), named! {}, &database())
                .unwrap(),
            named! { unit: "defaults" }
        );
    }

    #[test]
    fn positional() {
        let defaults = Defaults::positional([DefaultValue::constant(100)]);
        let contract = ParameterContract::FixedArity(2);
        let db = database();
        assert_eq!(
            defaults.resolve(&contract, args![1], &db).unwrap(),
            args![1, 100]
        );
        assert_eq!(
            defaults.resolve(&contract, args![1, 2], &db).unwrap(),
            args![1, 2]
        );
        assert_eq!(
            error_kind(defaults.resolve(&contract, args![], &db).unwrap_err()),
            StatementError::ArityMismatch {
                given: 0,
                min: 1,
                max: 2
            }
        );
        assert_eq!(
            error_kind(defaults.resolve(&contract, args![1, 2, 3], &db).unwrap_err()),
            StatementError::ArityMismatch {
                given: 3,
                min: 1,
                max: 2
            }
        );
        assert_eq!(
            error_kind(
                defaults
                    .resolve(&contract, named! { a: 1 }, &db)
                    .unwrap_err()
            ),
            StatementError::ArgumentStyleMismatch {
                expected: "positional"
            }
        );
    }

    #[test]
    fn positional_fills_from_the_right_offset() {
        let defaults = Defaults::positional([
            DefaultValue::constant("b"),
            DefaultValue::constant("c"),
        ]);
        let contract = ParameterContract::FixedArity(3);
        let db = database();
        assert_eq!(
            defaults.resolve(&contract, args!["A"], &db).unwrap(),
            args!["A", "b", "c"]
        );
        assert_eq!(
            defaults.resolve(&contract, args!["A", "B"], &db).unwrap(),
            args!["A", "B", "c"]
        );
        assert_eq!(
            defaults
                .resolve(&contract, args!["A", "B", "C"], &db)
                .unwrap(),
            args!["A", "B", "C"]
        );
    }

    #[test]
    fn positional_deferred_sees_accumulated_arguments() {
        let defaults = Defaults::positional([
            DefaultValue::deferred(|args, _| Ok(args.len().to_string().into())),
            DefaultValue::deferred(|args, _| Ok(args.get(1).cloned().unwrap_or_default())),
        ]);
        let contract = ParameterContract::FixedArity(3);
        assert_eq!(
            defaults
                .resolve(&contract, args!["first"], &database())
                .unwrap(),
            args!["first", "1", "1"]
        );
    }

    #[test]
    fn deferred_error_propagates() {
        let defaults = Defaults::positional([DefaultValue::deferred(|_, _| {
            Err(Error::msg("no default today"))
        })]);
        let error = defaults
            .resolve(&ParameterContract::FixedArity(1), args![], &database())
            .unwrap_err();
        assert_eq!(error.to_string(), "no default today");
    }

    #[test]
    fn validate() {
        let invalid = |defaults: Defaults, contract: ParameterContract| {
            matches!(
                error_kind(defaults.validate(&contract).unwrap_err()),
                StatementError::InvalidConfiguration(..)
            )
        };
        assert!(invalid(
            Defaults::positional([DefaultValue::constant(1)]),
            ParameterContract::NoParams
        ));
        assert!(invalid(
            Defaults::named([("a", DefaultValue::constant(1))]),
            ParameterContract::FixedArity(1)
        ));
        assert!(invalid(
            Defaults::positional([DefaultValue::constant(1)]),
            named_contract(&["a"])
        ));
        assert!(invalid(
            Defaults::positional([DefaultValue::constant(1), DefaultValue::constant(2)]),
            ParameterContract::FixedArity(1)
        ));
        assert!(invalid(
            Defaults::named([("b", DefaultValue::constant(1))]),
            named_contract(&["a"])
        ));
        assert!(invalid(
            Defaults::named([
                ("a", DefaultValue::constant(1)),
                ("a", DefaultValue::constant(2))
            ]),
            named_contract(&["a"])
        ));
        assert!(
            Defaults::positional([DefaultValue::constant(1)])
                .validate(&ParameterContract::FixedArity(1))
                .is_ok()
        );
        assert!(
            Defaults::named([("a", DefaultValue::constant(1))])
                .validate(&named_contract(&["a", "b"]))
                .is_ok()
        );
    }
}
