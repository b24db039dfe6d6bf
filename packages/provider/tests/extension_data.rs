//! CustomExtensionData value semantics

use proptest::prelude::*;
use tlsprov::extension::alert;
use tlsprov::CustomExtensionData;

#[test]
fn test_alert_display_marks_response_unset() {
    let data = CustomExtensionData::alert(alert::HANDSHAKE_FAILURE);

    assert_eq!(
        data.to_string(),
        "CustomExtensionData{alert=40, response=unset}"
    );
    assert!(data.is_alert());
}

#[test]
fn test_response_display_marks_alert_unset() {
    let data = CustomExtensionData::response(vec![1u8, 2]);

    assert_eq!(
        data.to_string(),
        "CustomExtensionData{alert=unset, response=[1, 2]}"
    );
    assert!(!data.is_alert());
}

#[test]
fn test_empty_response_is_still_a_response() {
    let data = CustomExtensionData::response(Vec::new());

    assert_eq!(data.response_bytes(), Some(&[][..]));
    assert_eq!(data.alert_code(), None);
}

#[test]
fn test_alert_constants() {
    assert_eq!(alert::ILLEGAL_PARAMETER, 47);
    assert_eq!(alert::DECODE_ERROR, 50);
    assert_eq!(alert::INTERNAL_ERROR, 80);
    assert_eq!(alert::UNSUPPORTED_EXTENSION, 110);
}

proptest! {
    #[test]
    fn alert_sets_only_the_alert(code in any::<u8>()) {
        let data = CustomExtensionData::alert(code);
        prop_assert_eq!(data.alert_code(), Some(code));
        prop_assert!(data.response_bytes().is_none());
        let expected = format!("alert={code}, response=unset");
        prop_assert!(data.to_string().contains(&expected));
    }

    #[test]
    fn response_sets_only_the_response(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let data = CustomExtensionData::response(bytes.clone());
        prop_assert_eq!(data.response_bytes(), Some(bytes.as_slice()));
        prop_assert!(data.alert_code().is_none());
        prop_assert!(
            data.to_string().starts_with("CustomExtensionData{alert=unset"),
            "display output did not start with CustomExtensionData{{alert=unset"
        );
    }
}
