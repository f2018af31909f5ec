use chaincopy::{ChainedTable, PhoneNumber, PhoneNumberError};
use proptest::prelude::*;

#[test]
fn test_display_is_documented_form() {
    let number = PhoneNumber::new(707, 867, 5309).unwrap();
    assert_eq!(number.to_string(), "707-867-5309");
    assert_eq!(format!("call {number}"), "call 707-867-5309");
}

#[test]
fn test_malformed_strings_are_invalid_arguments() {
    let inputs = [
        "",
        "707-867-530",
        "707-867-53090",
        "(707) 867-5309",
        "707.867.5309",
        "7078675309xx",
        " 707-867-5309",
        "707-867-5309 ",
        "70a-867-5309",
        "707-867--309",
    ];
    for input in inputs {
        match input.parse::<PhoneNumber>() {
            Err(PhoneNumberError::InvalidFormat { input: rejected }) => assert_eq!(rejected, input),
            other => panic!("{input:?} parsed as {other:?}"),
        }
    }
}

#[test]
fn test_accessors_match_string_form() {
    let number: PhoneNumber = "012-345-6789".parse().unwrap();
    assert_eq!(
        (number.area_code(), number.prefix(), number.line_number()),
        (12, 345, 6789)
    );
}

#[test]
fn test_serde_uses_string_form() {
    let number = PhoneNumber::new(1, 2, 3).unwrap();
    let json = serde_json::to_string(&number).unwrap();
    assert_eq!(json, r#""001-002-0003""#);
    assert_eq!(serde_json::from_str::<PhoneNumber>(&json).unwrap(), number);

    let err = serde_json::from_str::<PhoneNumber>(r#""1-2-3""#).unwrap_err();
    assert!(err.to_string().contains("expected XXX-YYY-ZZZZ"));
}

#[test]
fn test_phone_numbers_key_a_table() {
    let mut directory = ChainedTable::with_buckets(2);
    directory.insert(PhoneNumber::new(707, 867, 5309).unwrap(), "Jenny");
    directory.insert(PhoneNumber::new(212, 555, 1234).unwrap(), "Office");

    let jenny: PhoneNumber = "707-867-5309".parse().unwrap();
    assert_eq!(directory.get(&jenny), Some(&"Jenny"));

    let json = serde_json::to_string(&directory).unwrap();
    let restored: ChainedTable<PhoneNumber, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.get(&jenny).map(String::as_str), Some("Jenny"));
}

proptest! {
    #[test]
    fn test_display_parses_back(area in 0u16..=999, prefix in 0u16..=999, line in 0u16..=9999) {
        let number = PhoneNumber::new(area, prefix, line).unwrap();
        let text = number.to_string();
        prop_assert_eq!(text.len(), 12);
        prop_assert_eq!(text.parse::<PhoneNumber>(), Ok(number));
    }

    #[test]
    fn test_out_of_range_components_rejected(area in 1000u16..) {
        let rejected = matches!(
            PhoneNumber::new(area, 0, 0),
            Err(PhoneNumberError::OutOfRange { field: "area code", .. })
        );
        prop_assert!(rejected);
    }
}
