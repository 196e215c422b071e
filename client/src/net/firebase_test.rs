use super::*;

fn sample_config() -> FirebaseConfig {
    FirebaseConfig {
        api_key: "AIza-test".to_owned(),
        auth_domain: "hr-portal.firebaseapp.com".to_owned(),
        project_id: "hr-portal".to_owned(),
        app_id: None,
    }
}

#[test]
fn meta_content_uses_sdk_field_names() {
    let raw = sample_config().to_meta_content();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "apiKey": "AIza-test",
            "authDomain": "hr-portal.firebaseapp.com",
            "projectId": "hr-portal"
        })
    );
}

#[test]
fn meta_content_parses_back() {
    let mut config = sample_config();
    config.app_id = Some("1:2:web:3".to_owned());
    assert_eq!(FirebaseConfig::from_meta_content(&config.to_meta_content()), Some(config));
}

#[test]
fn meta_content_rejects_garbage() {
    assert_eq!(FirebaseConfig::from_meta_content("{not json"), None);
    assert_eq!(FirebaseConfig::from_meta_content(r#"{"apiKey":"k"}"#), None);
}

#[test]
fn sdk_scripts_load_app_before_auth() {
    let [app, auth] = sdk_script_urls();
    assert!(app.ends_with("/firebase-app-compat.js"));
    assert!(auth.ends_with("/firebase-auth-compat.js"));
    assert!(app.contains(SDK_VERSION));
}

#[test]
fn bootstrap_script_reads_config_meta() {
    let script = bootstrap_script();
    assert!(script.contains("meta[name=\"portal-firebase\"]"));
    assert!(script.contains("firebase.initializeApp"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn firebase_auth_is_unavailable_outside_browser() {
    let auth = FirebaseAuth;
    assert_eq!(futures::executor::block_on(auth.sign_in()), Err(ProviderError::Unavailable));
    assert_eq!(futures::executor::block_on(auth.sign_out()), Err(ProviderError::Unavailable));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn from_document_is_none_outside_browser() {
    assert_eq!(FirebaseConfig::from_document(), None);
}
