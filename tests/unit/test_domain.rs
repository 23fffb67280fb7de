use std::str::FromStr;
use warta_api::domain::{shared::pagination::PaginationRequest, user::entity::Role};

#[test]
fn role_parses_only_the_closed_set() {
    assert_eq!(Role::from_str("USER").unwrap(), Role::User);
    assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("DEVELOPER").unwrap(), Role::Developer);
    assert!(Role::from_str("root").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn role_display_matches_the_stored_representation() {
    assert_eq!(Role::Developer.to_string(), "DEVELOPER");
    assert_eq!(format!("from {} to {}", Role::User, Role::Admin), "from USER to ADMIN");
}

#[test]
fn staff_levels_do_not_overlap_downwards() {
    assert!(Role::Admin.is_admin_level());
    assert!(!Role::Admin.is_developer_level());
    assert!(Role::Developer.is_admin_level());
}

#[test]
fn pagination_defaults_are_safe_and_stable() {
    let p = PaginationRequest::default();
    assert_eq!(p.page, 1);
    assert_eq!(p.limit, 10);
    assert_eq!(p.normalized(), (10, 0));
}
