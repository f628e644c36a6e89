use super::*;

use std::{collections::HashMap, fs};

use shared::protocol::Endpoint;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_and_empty_env_yield_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings =
        load_settings_from(&dir.path().join("flow.toml"), env_from(&[])).expect("settings");

    assert_eq!(settings.users_base_url.as_str(), "http://localhost:8002/");
    assert_eq!(settings.verification_base_url.as_str(), "http://localhost:8003/");
    assert_eq!(settings.payment_encoding, PaymentEncoding::Json);
    assert_eq!(settings.request_timeout, None);
    assert_eq!(settings.routes, RouteTable::default());
}

#[test]
fn file_overrides_defaults_and_env_overrides_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("flow.toml");
    fs::write(
        &path,
        r#"
users_base_url = "http://users.internal:9000"
verification_base_url = "http://otp.internal:9001"
payment_encoding = "query"
request_timeout_secs = 15

[routes]
payment = "/pay"
"#,
    )
    .expect("write config");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("APP__VERIFICATION_BASE_URL", "https://otp.example.com/api/"),
            ("APP__REQUEST_TIMEOUT_SECS", "0"),
        ]),
    )
    .expect("settings");

    assert_eq!(
        settings.users_base_url.as_str(),
        "http://users.internal:9000/"
    );
    assert_eq!(
        settings.verification_base_url.as_str(),
        "https://otp.example.com/api/"
    );
    assert_eq!(settings.payment_encoding, PaymentEncoding::Query);
    assert_eq!(settings.request_timeout, None);
    assert_eq!(settings.routes.payment, "/pay");
    assert_eq!(settings.routes.register, "/");
    assert_eq!(settings.routes.path_for(Step::Payment), "/pay");
}

#[test]
fn payment_shares_the_user_service_and_otp_calls_share_verification() {
    let settings = FlowSettings::default();

    for endpoint in [Endpoint::RegisterUser, Endpoint::ProcessPayment] {
        assert_eq!(endpoint.service(), Service::Users);
        assert_eq!(
            settings.base_url(endpoint.service()).as_str(),
            "http://localhost:8002/"
        );
    }
    for endpoint in [
        Endpoint::VerifyOtp,
        Endpoint::CreateCheckoutSession,
        Endpoint::ResendOtp,
    ] {
        assert_eq!(endpoint.service(), Service::Verification);
        assert_eq!(
            settings.base_url(endpoint.service()).as_str(),
            "http://localhost:8003/"
        );
    }
}

#[test]
fn timeout_from_file_is_kept_when_env_is_silent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("flow.toml");
    fs::write(&path, "request_timeout_secs = 20\n").expect("write config");

    let settings = load_settings_from(&path, env_from(&[])).expect("settings");
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(20)));
}

#[test]
fn invalid_url_in_env_is_reported_with_its_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings_from(
        &dir.path().join("flow.toml"),
        env_from(&[("APP__USERS_BASE_URL", "not a url")]),
    )
    .expect_err("must fail");

    assert!(matches!(
        err,
        ConfigError::InvalidUrl {
            key: "APP__USERS_BASE_URL",
            ..
        }
    ));
}

#[test]
fn unknown_payment_encoding_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings_from(
        &dir.path().join("flow.toml"),
        env_from(&[("APP__PAYMENT_ENCODING", "xml")]),
    )
    .expect_err("must fail");

    assert!(matches!(err, ConfigError::InvalidValue { value, .. } if value == "xml"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("flow.toml");
    fs::write(&path, "users_base_url = [").expect("write config");

    let err = load_settings_from(&path, env_from(&[])).expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
