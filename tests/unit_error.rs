use std::path::PathBuf;

use kan::error::{exit_codes, Error};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let lane = Error::UnknownLane {
        lane: "nowhere".to_string(),
        lanes: "backlog, done".to_string(),
    };
    assert_eq!(lane.exit_code(), exit_codes::USER_ERROR);

    let op = Error::LockFailed(PathBuf::from("kanban.toml.lock"));
    assert_eq!(op.exit_code(), exit_codes::OPERATION_FAILED);

    let io = Error::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
    assert_eq!(io.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn not_found_details_carry_the_id() {
    let err = Error::ItemNotFound("KAN-7".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert!(err.to_string().contains("Item not found"));
    assert_eq!(err.details(), Some(serde_json::json!({ "id": "KAN-7" })));
}

#[test]
fn id_exhaustion_has_no_details() {
    let err = Error::IdExhausted("KAN".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    assert!(err.details().is_none());
}
