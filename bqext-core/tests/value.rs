#[cfg(test)]
mod tests {
    use bqext_core::{AsValue, Value};
    use rust_decimal::Decimal;
    use std::borrow::Cow;
    use time::{Date, Month, OffsetDateTime};

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float64(Some(1.0)), Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::String(None).is_null());
        assert!(!Value::String(Some("".into())).is_null());
        assert!(Value::Int64(None).same_type(&Value::Int64(Some(5))));
        assert!(!Value::Int64(None).same_type(&Value::Float64(None)));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Boolean(None));
        assert_ne!(val, Value::String(Some("true".into())));
        let var: bool = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, true);
        assert!(bool::try_from_value(Value::Int64(Some(1))).is_err());
        assert!(bool::try_from_value(Value::String(Some("true".into()))).is_err());
    }

    #[test]
    fn value_i64() {
        let val: Value = 9_876_543_210_i64.into();
        assert_eq!(val, Value::Int64(Some(9_876_543_210)));
        let var: i64 = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, 9_876_543_210);
        assert_eq!(i64::try_from_value(Value::Numeric(Some(Decimal::new(42, 0)))).unwrap(), 42);
        assert!(i64::try_from_value(Value::Numeric(Some(Decimal::new(425, 1)))).is_err());
        assert!(i64::try_from_value(Value::Float64(Some(1.0))).is_err());
        assert!(i64::try_from_value(Value::String(Some("1".into()))).is_err());
    }

    #[test]
    fn value_narrow_integers() {
        let val: Value = 127_i8.into();
        assert_eq!(val, Value::Int64(Some(127)));
        assert_eq!(i8::try_from_value(val).unwrap(), 127);
        assert!(i8::try_from_value(Value::Int64(Some(128))).is_err());
        assert_eq!(i16::try_from_value(Value::Int64(Some(-32768))).unwrap(), i16::MIN);
        assert!(i16::try_from_value(Value::Int64(Some(40_000))).is_err());
        assert_eq!(i32::try_from_value(Value::Int64(Some(777))).unwrap(), 777);
        assert!(i32::try_from_value(Value::Int64(Some(i64::MAX))).is_err());
        assert_eq!(u8::try_from_value(Value::Int64(Some(255))).unwrap(), 255);
        assert!(u8::try_from_value(Value::Int64(Some(-1))).is_err());
        assert_eq!(u16::try_from_value(Value::Int64(Some(65535))).unwrap(), u16::MAX);
        assert_eq!(
            u32::try_from_value(Value::Int64(Some(4_294_967_295))).unwrap(),
            u32::MAX
        );
        assert!(u32::try_from_value(Value::Int64(Some(4_294_967_296))).is_err());
        assert!(i32::try_from_value(Value::Int64(None)).is_err());
    }

    #[test]
    fn value_u64() {
        let val: Value = 1500_u64.into();
        assert_eq!(val, Value::Int64(Some(1500)));
        assert_eq!(u64::try_from_value(val).unwrap(), 1500);
        assert_eq!(u64::try_from_value(Value::Int64(Some(i64::MAX))).unwrap(), i64::MAX as u64);
        assert!(u64::try_from_value(Value::Int64(Some(-1))).is_err());
        let val: Value = u64::MAX.into();
        assert_eq!(val, Value::Numeric(Some(Decimal::from(u64::MAX))));
        assert_eq!(u64::try_from_value(val).unwrap(), u64::MAX);
        assert!(u64::try_from_value(Value::Numeric(Some(Decimal::new(15, 1)))).is_err());
        assert!(u64::try_from_value(Value::Float64(Some(1.0))).is_err());
        assert!(u64::try_from_value(Value::Int64(None)).is_err());
        assert_eq!(Option::<u64>::try_from_value(Value::Int64(None)).unwrap(), None);
    }

    #[test]
    fn value_floats() {
        let val: Value = 487.25_f64.into();
        assert_eq!(val, Value::Float64(Some(487.25)));
        assert_eq!(f64::try_from_value(val).unwrap(), 487.25);
        assert_eq!(f32::try_from_value(Value::Float64(Some(0.5))).unwrap(), 0.5);
        assert!(f32::try_from_value(Value::Float64(Some(0.1))).is_err());
        assert!(f64::try_from_value(Value::Int64(Some(1))).is_err());
        assert!(f64::try_from_value(Value::Float64(None)).is_err());
    }

    #[test]
    fn value_numeric() {
        let price = Decimal::new(19255, 2);
        let val: Value = price.into();
        assert_eq!(val, Value::Numeric(Some(price)));
        assert_eq!(Decimal::try_from_value(val).unwrap(), price);
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(12))).unwrap(),
            Decimal::new(12, 0)
        );
        assert!(Decimal::try_from_value(Value::Float64(Some(1.5))).is_err());
    }

    #[test]
    fn value_strings() {
        let val: Value = "Hello world!".into();
        assert_eq!(val, Value::String(Some("Hello world!".into())));
        assert_eq!(String::try_from_value(val.clone()).unwrap(), "Hello world!");
        let cow: Cow<'static, str> = AsValue::try_from_value(val).unwrap();
        assert_eq!(cow, "Hello world!");
        assert!(String::try_from_value(Value::Int64(Some(1))).is_err());
        assert!(String::try_from_value(Value::String(None)).is_err());
        assert!(String::try_from_value(Value::Null).is_err());
    }

    #[test]
    fn value_bytes() {
        let val: Value = b"Metadata Bytes".to_vec().into();
        assert_eq!(
            val,
            Value::Bytes(Some(b"Metadata Bytes".to_vec().into_boxed_slice()))
        );
        let bytes: Vec<u8> = AsValue::try_from_value(val).unwrap();
        assert_eq!(bytes, b"Metadata Bytes");
        assert!(Vec::<u8>::try_from_value(Value::String(Some("bytes".into()))).is_err());
    }

    #[test]
    fn value_time() {
        let day = Date::from_calendar_date(2023, Month::January, 1).unwrap();
        let val: Value = day.into();
        assert_eq!(val, Value::Date(Some(day)));
        assert_eq!(Date::try_from_value(val).unwrap(), day);
        let now = OffsetDateTime::UNIX_EPOCH;
        let val: Value = now.into();
        assert_eq!(val.type_name(), "TIMESTAMP");
        assert_eq!(OffsetDateTime::try_from_value(val).unwrap(), now);
        assert!(Date::try_from_value(Value::Timestamp(Some(now))).is_err());
    }

    #[test]
    fn value_option() {
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Int64(None)).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::String(None)).unwrap(),
            None
        );
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int64(Some(5))).unwrap(),
            Some(5)
        );
        assert!(Option::<i32>::try_from_value(Value::String(Some("5".into()))).is_err());
        assert_eq!(Option::<String>::None.as_value(), Value::String(None));
        assert_eq!(Some(3_u8).as_value(), Value::Int64(Some(3)));
        let boxed: Box<i64> = AsValue::try_from_value(Value::Int64(Some(1))).unwrap();
        assert_eq!(*boxed, 1);
    }

    #[test]
    fn value_type_name() {
        assert_eq!(Value::Int64(Some(42)).type_name(), "INT64");
        assert_eq!(Value::Null.type_name(), "NULL");
        assert_eq!(Value::String(None).type_name(), "STRING");
        assert_eq!(Value::String(None).to_string(), "NULL");
        assert_eq!(Value::from("it's").to_string(), "\"it's\"");
        assert_eq!(Value::Bytes(Some([1, 2, 3].into())).to_string(), "3 bytes");
    }
}
