use sqlmod::{
    AsValue, Configuration, Database, DefaultValue, Defaults, Output, Result, Single,
    StatementError, Unit, Value, args, named,
};

pub fn statements_unit() -> Result<Unit> {
    let mut unit = Unit::new("statements");
    unit.def_statement(
        "insert_user",
        "INSERT INTO sqlmod_users (id, name, email, score) VALUES ($id, $name, $email, $score)",
    )?
    .def_prepared_with(
        "user_by_id",
        "SELECT id, name, email, score FROM sqlmod_users WHERE id = $1",
        Configuration::new().single(Single::Row)?,
    )?
    .def_prepared_with(
        "user_names",
        "SELECT name FROM sqlmod_users ORDER BY id",
        Configuration::new().single(Single::Column)?,
    )?
    .def_statement_with(
        "count_users",
        "SELECT COUNT(*) FROM sqlmod_users",
        Configuration::new().single(Single::RequiredValue)?,
    )?
    .def_statement_with(
        "names_scoring_above",
        "SELECT name FROM sqlmod_users WHERE score > $min ORDER BY id",
        Configuration::new()
            .single(Single::Column)?
            .defaults(Defaults::named([("min", DefaultValue::constant(0))]))?,
    )?
    .def_prepared("rename_user", "UPDATE sqlmod_users SET name = $2 WHERE id = $1")?;
    Ok(unit)
}

pub(crate) fn count_users(db: &mut Database) -> i64 {
    let value = db
        .call("count_users", args![])
        .expect("Failed to count the users")
        .into_value()
        .expect("Expected a value")
        .unwrap_or_default();
    i64::try_from_value(value).expect("Expected an integer count")
}

pub fn statements(db: &mut Database) {
    assert_eq!(count_users(db), 0);

    db.call(
        "insert_user",
        named! { id: 1, name: "Alice", email: "alice@example.com", score: 10 },
    )
    .expect("Failed to insert Alice");
    db.call(
        "insert_user",
        named! { id: 2, name: "Bob", email: Value::Null, score: 3 },
    )
    .expect("Failed to insert Bob");
    assert_eq!(count_users(db), 2);

    let row = db
        .call("user_by_id", args![2])
        .expect("Failed to query user 2")
        .into_row()
        .expect("Expected a row")
        .expect("User 2 is missing");
    assert_eq!(row.names(), ["id", "name", "email", "score"]);
    assert_eq!(
        i32::try_from_value(row.get_column("id").cloned().unwrap_or_default()).unwrap(),
        2
    );
    assert_eq!(
        row.get_column("name").cloned(),
        Some(Value::Varchar(Some("Bob".into())))
    );
    assert!(row.get_column("email").is_some_and(Value::is_null));

    let missing = db
        .call("user_by_id", args![99])
        .expect("Failed to query user 99");
    assert_eq!(missing, Output::Row(None));

    assert_eq!(
        db.call("user_names", args![])
            .expect("Failed to query the names")
            .into_column()
            .expect("Expected a column"),
        [
            Value::Varchar(Some("Alice".into())),
            Value::Varchar(Some("Bob".into()))
        ]
    );

    assert_eq!(
        db.call("names_scoring_above", named! {})
            .expect("Failed to query with the default")
            .into_column()
            .expect("Expected a column")
            .len(),
        2
    );
    assert_eq!(
        db.call("names_scoring_above", named! { min: 5 })
            .expect("Failed to query with an explicit minimum")
            .into_column()
            .expect("Expected a column"),
        [Value::Varchar(Some("Alice".into()))]
    );

    db.call("rename_user", args![2, "Robert"])
        .expect("Failed to rename user 2");
    db.call("rename_user", args![2, "Bob"])
        .expect("Failed to rename user 2 back");

    let error = db
        .call("user_by_id", args![1, 2])
        .expect_err("Two arguments for one parameter must fail");
    assert_eq!(
        StatementError::find(&error),
        Some(&StatementError::ArityMismatch {
            given: 2,
            min: 1,
            max: 1
        })
    );
    let error = db
        .call("insert_user", named! { id: 3, name: "Carol" })
        .expect_err("Missing arguments must fail");
    assert!(matches!(
        StatementError::find(&error),
        Some(StatementError::MissingNamedArgument(..))
    ));
    assert_eq!(count_users(db), 2);
}
