#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sqlmod_core::{AsValue, Value};
    use std::{borrow::Cow, str::FromStr};
    use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
    use uuid::Uuid;

    #[test]
    fn value_null() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some("".into())).is_null());
        assert_eq!(Value::Null.as_text().unwrap(), None);
        assert_eq!(Value::Int32(None).to_json().unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        let var: bool = AsValue::try_from_value(val.clone()).unwrap();
        assert!(var);
        assert_eq!(val.as_text().unwrap().as_deref(), Some("true"));
        assert_eq!(val.to_json().unwrap(), serde_json::json!(true));
        assert!(bool::try_from_value(Value::Int32(Some(1))).is_err());
    }

    #[test]
    fn value_integers() {
        let val: Value = (-32768 as i16).into();
        assert_eq!(val, Value::Int16(Some(-32768)));
        assert_ne!(val, Value::Int32(Some(-32768)));
        assert_eq!(i64::try_from_value(val).unwrap(), -32768);

        let val: Value = 7u8.into();
        assert_eq!(val, Value::Int16(Some(7)));
        let val: Value = 70000u32.into();
        assert_eq!(val, Value::Int64(Some(70000)));
        assert_eq!(u32::try_from_value(val).unwrap(), 70000);

        assert_eq!(i16::try_from_value(Value::Int64(Some(300))).unwrap(), 300);
        assert!(i16::try_from_value(Value::Int64(Some(40000))).is_err());
        assert!(u8::try_from_value(Value::Int32(Some(-1))).is_err());
        assert_eq!(
            i32::try_from_value(Value::Decimal(Some(Decimal::new(4200, 2)))).unwrap(),
            42
        );
        assert!(i32::try_from_value(Value::Decimal(Some(Decimal::new(4201, 2)))).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("1".into()))).is_err());
        assert_eq!(
            Value::Int64(Some(-5)).to_json().unwrap(),
            serde_json::json!(-5)
        );
    }

    #[test]
    fn value_floats() {
        let val: Value = 1.5f64.into();
        assert_eq!(val, Value::Float64(Some(1.5)));
        assert_eq!(val.as_text().unwrap().as_deref(), Some("1.5"));
        assert_eq!(f64::try_from_value(Value::Float32(Some(0.5))).unwrap(), 0.5);
        assert_eq!(f64::try_from_value(Value::Int32(Some(3))).unwrap(), 3.0);
        assert_eq!(
            Value::Float64(Some(f64::NAN)).to_json().unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn value_decimal() {
        let decimal = Decimal::from_str("12345.678").unwrap();
        let val: Value = decimal.into();
        assert_eq!(val, Value::Decimal(Some(decimal)));
        assert_eq!(Decimal::try_from_value(val.clone()).unwrap(), decimal);
        assert_eq!(val.to_json().unwrap(), serde_json::json!("12345.678"));
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(9))).unwrap(),
            Decimal::from(9)
        );
    }

    #[test]
    fn value_text() {
        let val: Value = "hello".into();
        assert_eq!(val, Value::Varchar(Some("hello".into())));
        let val: Value = Cow::Borrowed("world").into();
        assert_eq!(String::try_from_value(val).unwrap(), "world");
        let val: Value = None::<String>.into();
        assert_eq!(val, Value::Varchar(None));
        assert_eq!(Option::<String>::try_from_value(val).unwrap(), None);
        assert_eq!(
            Option::<String>::try_from_value(Value::Null).unwrap(),
            None
        );
        assert!(String::try_from_value(Value::Null).is_err());
    }

    #[test]
    fn value_blob() {
        let val: Value = vec![0xde_u8, 0xad, 0xbe, 0xef].into();
        assert_eq!(val.as_text().unwrap().as_deref(), Some("\\xdeadbeef"));
        assert_eq!(
            Vec::<u8>::try_from_value(val).unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn value_temporal() {
        let date = Date::from_calendar_date(2025, Month::January, 31).unwrap();
        let time = Time::from_hms(13, 45, 0).unwrap();
        assert_eq!(
            Value::from(date).as_text().unwrap().as_deref(),
            Some("2025-01-31")
        );
        assert_eq!(
            Value::from(time).as_text().unwrap().as_deref(),
            Some("13:45:00")
        );
        let timestamp = PrimitiveDateTime::new(date, time);
        assert_eq!(
            Value::from(timestamp).as_text().unwrap().as_deref(),
            Some("2025-01-31 13:45:00")
        );
        let with_offset: OffsetDateTime =
            timestamp.assume_offset(UtcOffset::from_hms(2, 0, 0).unwrap());
        assert_eq!(
            Value::from(with_offset).to_json().unwrap(),
            serde_json::json!("2025-01-31T13:45:00+02:00")
        );
        assert_eq!(
            Date::try_from_value(Value::Date(Some(date))).unwrap(),
            date
        );
    }

    #[test]
    fn value_uuid() {
        let uuid = Uuid::from_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let val: Value = uuid.into();
        assert_eq!(
            val.as_text().unwrap().as_deref(),
            Some("67e55044-10b1-426f-9247-bb680e5fe0c8")
        );
        assert_eq!(Uuid::try_from_value(val).unwrap(), uuid);
    }
}
