//! Shared proptest generators for the auth gateway payloads.

use proptest::prelude::*;
use rust_common::{CreateUser, LoginCredentials};

/// Generate non-empty display names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,15}( [A-Z][a-z]{0,15})?"
}

/// Generate well-formed email addresses.
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9._]{0,15}", "[a-z]{2,12}", "[a-z]{2,4}")
        .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}"))
}

/// Generate strings that are not email addresses.
pub fn invalid_email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,20}",
        "[a-z]{1,10}@[a-z]{1,10}",
        "@[a-z]{1,10}\\.[a-z]{2,4}",
        "[a-z]{1,10} [a-z]{1,10}@[a-z]{2,8}\\.[a-z]{2,4}",
    ]
}

/// Generate passwords that pass the length rule.
pub fn password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!#%&*+=?^_~-]{6,32}"
}

/// Generate passwords shorter than the length rule allows.
pub fn short_password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{0,5}"
}

/// Generate valid registration payloads.
pub fn create_user_strategy() -> impl Strategy<Value = CreateUser> {
    (name_strategy(), email_strategy(), password_strategy()).prop_map(|(name, email, password)| {
        CreateUser {
            name,
            email,
            password,
        }
    })
}

fn blank_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new()))]
}

/// Generate login payloads with at least one field absent or empty.
pub fn incomplete_credentials_strategy() -> impl Strategy<Value = LoginCredentials> {
    prop_oneof![
        (blank_field(), proptest::option::of(password_strategy()))
            .prop_map(|(email, password)| LoginCredentials { email, password }),
        (proptest::option::of(email_strategy()), blank_field())
            .prop_map(|(email, password)| LoginCredentials { email, password }),
    ]
}
