use std::path::PathBuf;

use td::error::{exit_codes, Error};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::NotFound("x".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let not_init = Error::NotInitialized(PathBuf::from("/tmp"));
    assert_eq!(not_init.exit_code(), exit_codes::USER_ERROR);

    let corrupt = Error::corrupt("x", "bad yaml");
    assert_eq!(corrupt.exit_code(), exit_codes::OPERATION_FAILED);

    let lock = Error::LockFailed(PathBuf::from(".td/.lock"));
    assert_eq!(lock.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn ambiguous_id_message_and_details() {
    let err = Error::AmbiguousId {
        id: "wr".to_string(),
        candidates: vec!["write-docs".to_string(), "write-tests".to_string()],
    };
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert_eq!(err.to_string(), "Ambiguous task id 'wr': write-docs, write-tests");
    let details = err.details().expect("details");
    assert_eq!(details["id"], "wr");
    assert_eq!(details["candidates"][1], "write-tests");
}

#[test]
fn invalid_config_has_no_details() {
    let err = Error::InvalidConfig("bad".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert!(err.details().is_none());
}

#[test]
fn invalid_names_field_and_value() {
    let err = Error::invalid("state", "blocked");
    assert_eq!(err.to_string(), "Invalid state: 'blocked'");
}
