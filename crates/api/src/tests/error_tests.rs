// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, translate_core_error};
use rinkside::CoreError;
use rinkside_domain::{DomainError, ParticipantId};

#[test]
fn test_code_required_is_authentication_failure() {
    let err: ApiError = translate_core_error(CoreError::SignupCodeRequired);

    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_not_found_errors_name_the_resource() {
    let player: ApiError = CoreError::ParticipantNotFound(ParticipantId::new(7)).into();
    let entry: ApiError = CoreError::WaitlistEntryNotFound(ParticipantId::new(9)).into();

    assert_eq!(
        player,
        ApiError::ResourceNotFound {
            resource_type: String::from("Player"),
            message: String::from("No player with id 7 is on the roster"),
        }
    );
    assert!(matches!(
        entry,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Waitlist entry"
    ));
}

#[test]
fn test_domain_violations_pass_through_core() {
    let err: ApiError = CoreError::DomainViolation(DomainError::InvalidSpotCount {
        count: 40,
        max: 30,
    })
    .into();

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("spots"),
            message: String::from("Spot count 40 must be between 0 and 30"),
        }
    );
}

#[test]
fn test_display_includes_rule() {
    let err: ApiError = DomainError::GoalieLimitReached { max: 2 }.into();

    assert_eq!(
        err.to_string(),
        "Domain rule violation (goalie_limit): Both goalie spots are taken (maximum 2)"
    );
}
