//! Tests for the user error taxonomy.

use super::*;
use rstest::rstest;

#[rstest]
#[case(UserError::InvalidUserData, "invalid user data")]
#[case(UserError::InvalidEmail, "invalid email")]
#[case(UserError::UserAlreadyExists, "user already exists")]
#[case(UserError::UserDoesNotExist, "user does not exist")]
#[case(UserError::StorageFailure, "error get user")]
#[case(UserError::SerializationFailure, "error marshal item")]
#[case(UserError::DeserializationFailure, "error unmarshal item")]
#[case(UserError::CreateFailure, "error create user")]
#[case(UserError::UpdateFailure, "error update user")]
#[case(UserError::DeleteFailure, "error delete user")]
fn display_matches_client_message(#[case] error: UserError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn errors_are_comparable_for_assertions() {
    assert_eq!(UserError::UserDoesNotExist, UserError::UserDoesNotExist);
    assert_ne!(UserError::UserDoesNotExist, UserError::StorageFailure);
}
