// Unit tests for error mapping - pure domain logic, no store involved
use crate::ai::AiError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn lobby_validation_kinds_map_one_to_one() {
    let cases = [
        (ValidationKind::LobbyNotWaiting, ErrorCode::LobbyNotWaiting),
        (ValidationKind::LobbyFull, ErrorCode::LobbyFull),
        (ValidationKind::LobbyNotReady, ErrorCode::LobbyNotReady),
        (ValidationKind::AlreadyJoined, ErrorCode::AlreadyJoined),
        (ValidationKind::NotInLobby, ErrorCode::NotInLobby),
        (ValidationKind::NotHost, ErrorCode::NotHost),
        (ValidationKind::Banned, ErrorCode::Banned),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "d").into();
        assert_eq!(app.code(), code);
        assert!(app.is_validation());
    }
}

#[test]
fn other_validation_falls_back_to_generic_code() {
    let app: AppError = DomainError::validation_other("bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.detail(), "bad field");
}

#[test]
fn conflicts_and_not_found() {
    let app: AppError = DomainError::conflict(ConflictKind::JoinCodeConflict, "codes").into();
    assert_eq!(app.code().as_str(), "JOIN_CODE_CONFLICT");

    let app: AppError = DomainError::conflict(ConflictKind::Other("x".into()), "x").into();
    assert_eq!(app.code(), ErrorCode::Conflict);

    let app: AppError = DomainError::not_found(NotFoundKind::Lobby, "lobbies/1").into();
    assert_eq!(app.code(), ErrorCode::LobbyNotFound);
    assert!(!app.is_validation());
}

#[test]
fn infra_kinds_map_to_system_codes() {
    let app: AppError = DomainError::infra(InfraErrorKind::StoreUnavailable, "down").into();
    assert!(matches!(app, AppError::StoreUnavailable { .. }));
    assert_eq!(app.code(), ErrorCode::StoreUnavailable);

    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(app.code(), ErrorCode::StoreTimeout);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
}

#[test]
fn serde_and_ai_errors_are_internal() {
    let serde_err = serde_json::from_str::<u8>("nope").unwrap_err();
    let app: AppError = serde_err.into();
    assert_eq!(app.code(), ErrorCode::Internal);

    let app: AppError = AiError::InvalidMove("no such card".into()).into();
    assert_eq!(app.code(), ErrorCode::Internal);
}
