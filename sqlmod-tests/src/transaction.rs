use crate::statements::count_users;
use sqlmod::{Database, Error, Result, StatementError, Unit, named};

pub fn transaction_unit() -> Result<Unit> {
    let mut unit = Unit::new("transaction");
    unit.def_prepared(
        "delete_user",
        "DELETE FROM sqlmod_users WHERE id = $id",
    )?;
    Ok(unit)
}

pub fn transaction(db: &mut Database) {
    let before = count_users(db);

    db.transaction(|db| {
        db.call(
            "insert_user",
            named! { id: 10, name: "Temporary", email: "tmp@example.com", score: 1 },
        )?;
        assert!(db.in_transaction());
        Ok(())
    })
    .expect("Failed to commit the insert");
    assert!(!db.in_transaction());
    assert_eq!(count_users(db), before + 1);

    let error = db
        .transaction(|db| -> Result<()> {
            db.call("delete_user", named! { id: 10 })?;
            assert_eq!(count_users(db), before);
            Err(Error::msg("Changed my mind"))
        })
        .expect_err("The body failure must be returned");
    assert_eq!(error.to_string(), "Changed my mind");
    assert!(!db.in_transaction());
    assert_eq!(count_users(db), before + 1);

    let error = db
        .transaction(|db| db.transaction(|_| Ok(())))
        .expect_err("Nested transactions must fail");
    assert_eq!(
        StatementError::find(&error),
        Some(&StatementError::AlreadyInTransaction)
    );
    assert!(!db.in_transaction());

    db.transaction(|db| db.call("delete_user", named! { id: 10 }))
        .expect("Failed to delete the temporary user");
    assert_eq!(count_users(db), before);
}
