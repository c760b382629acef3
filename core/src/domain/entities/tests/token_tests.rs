//! Unit tests for token entities

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, RefreshRecord, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_MAX_AGE_DAYS,
};

#[test]
fn test_access_token_claims() {
    let account_id = Uuid::new_v4();
    let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let claims = Claims::new_access_token(
        account_id,
        issued_at,
        Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
    )
    .unwrap();

    assert_eq!(claims.sub, account_id.to_string());
    assert_eq!(claims.iat, issued_at.timestamp());
    assert_eq!(claims.exp, issued_at.timestamp() + 15 * 60);
    assert_eq!(claims.account_id().unwrap(), account_id);
}

#[test]
fn test_claims_jti_is_unique() {
    let account_id = Uuid::new_v4();
    let now = Utc::now();
    let a = Claims::new_access_token(account_id, now, Duration::minutes(15)).unwrap();
    let b = Claims::new_access_token(account_id, now, Duration::minutes(15)).unwrap();

    assert_eq!(a.exp, b.exp);
    assert_ne!(a.jti, b.jti);
}

#[test]
fn test_claims_expiry_boundary() {
    let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let claims = Claims::new_access_token(Uuid::new_v4(), issued_at, Duration::minutes(15)).unwrap();
    let expires_at = issued_at + Duration::minutes(15);

    assert!(!claims.is_expired_at(expires_at - Duration::seconds(1)));
    assert!(!claims.is_expired_at(expires_at));
    assert!(claims.is_expired_at(expires_at + Duration::seconds(1)));
}

#[test]
fn test_claims_with_non_uuid_subject() {
    let mut claims = Claims::new_access_token(Uuid::new_v4(), Utc::now(), Duration::minutes(1)).unwrap();
    claims.sub = "acct-1".to_string();
    assert!(claims.account_id().is_err());
}

#[test]
fn test_refresh_record_age_gate() {
    let now = Utc::now();
    let max_age = Duration::days(REFRESH_TOKEN_MAX_AGE_DAYS);
    let account_id = Uuid::new_v4();

    let fresh = RefreshRecord::new(account_id, "s".to_string(), now - Duration::days(6));
    let exact = RefreshRecord::new(account_id, "s".to_string(), now - max_age);
    let stale = RefreshRecord::new(account_id, "s".to_string(), now - Duration::days(8));

    assert!(!fresh.is_expired_at(now, max_age));
    assert!(!exact.is_expired_at(now, max_age));
    assert!(stale.is_expired_at(now, max_age));
    assert_eq!(stale.age_at(now), Duration::days(8));
}

#[test]
fn test_token_pair_serialization_shape() {
    let pair = TokenPair::new("at".to_string(), "rt".to_string(), 900);
    let json = serde_json::to_value(&pair).unwrap();

    assert_eq!(json["access_token"], "at");
    assert_eq!(json["refresh_token"], "rt");
    assert_eq!(json["expires_in"], 900);
}

#[test]
fn test_access_token_claims_reject_overflowing_lifetime() {
    let issued_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let err = Claims::new_access_token(Uuid::new_v4(), issued_at, Duration::seconds(10_000_000_000_000))
        .unwrap_err();
    assert!(matches!(err, crate::errors::TokenError::Signing { .. }));
}
