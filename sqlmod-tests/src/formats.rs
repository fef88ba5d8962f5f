use sqlmod::{Configuration, Database, Format, Output, Result, Single, StatementError, Unit, args};

pub fn formats_unit() -> Result<Unit> {
    let mut unit = Unit::new("formats");
    unit.default_settings(Configuration::new().format(Format::Json)?)
        .def_statement_with(
            "users_csv",
            "SELECT id, name, email FROM sqlmod_users ORDER BY id",
            Configuration::new().format(Format::Csv)?,
        )?
        .def_prepared_with(
            "user_json",
            "SELECT id, name, email FROM sqlmod_users WHERE id = $1",
            Configuration::new().single(Single::RequiredRow)?,
        )?
        .def_statement("users_json", "SELECT name, score FROM sqlmod_users ORDER BY id")?
        .def_statement_with(
            "shouted_names",
            "SELECT name FROM sqlmod_users ORDER BY id",
            Configuration::new()
                .single(Single::Column)?
                .without_format()?
                .returning(|output, db| {
                    let count = db
                        .call("count_users", args![])?
                        .into_value()?
                        .unwrap_or_default();
                    let names = output
                        .into_column()?
                        .into_iter()
                        .map(|v| -> Result<String> {
                            Ok(v.as_text()?.unwrap_or_default().to_uppercase())
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Output::Text(format!(
                        "{} of {}",
                        names.join(" "),
                        count.as_text()?.unwrap_or_default()
                    )))
                })?,
        )?;
    Ok(unit)
}

pub fn formats(db: &mut Database) {
    assert_eq!(
        db.call("users_csv", args![])
            .expect("Failed to query the csv")
            .into_text()
            .expect("Expected text"),
        "id,name,email\n1,Alice,alice@example.com\n2,Bob,\n"
    );
    assert_eq!(
        db.call("user_json", args![1])
            .expect("Failed to query the json of user 1")
            .into_text()
            .expect("Expected text"),
        r#"{"id":1,"name":"Alice","email":"alice@example.com"}"#
    );
    assert_eq!(
        db.call("users_json", args![])
            .expect("Failed to query the json of all users")
            .into_text()
            .expect("Expected text"),
        r#"[{"name":"Alice","score":10},{"name":"Bob","score":3}]"#
    );
    let error = db
        .call("user_json", args![42])
        .expect_err("A missing user must fail with row!");
    assert_eq!(
        StatementError::find(&error),
        Some(&StatementError::NoResults)
    );
    assert_eq!(
        db.call("shouted_names", args![])
            .expect("Failed to query the shouted names")
            .into_text()
            .expect("Expected text"),
        "ALICE BOB of 2"
    );
}
