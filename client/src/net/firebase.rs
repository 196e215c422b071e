//! Firebase project wiring: credentials hand-off and the Auth provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders `FirebaseConfig` into a `<meta>` tag in the SSR shell
//! and loads the Firebase compat SDK. The inline bootstrap script initializes
//! the SDK from that tag; the hydrated client reads the same tag to build its
//! Firestore REST client. `FirebaseAuth` drives Google popup sign-in through
//! `wasm-bindgen` bindings to the global `firebase` namespace.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::identity::{IdentityProvider, ProviderError};
use super::types::Principal;

/// `name` attribute of the `<meta>` tag carrying the JSON config.
pub const CONFIG_META_NAME: &str = "portal-firebase";

/// Firebase JS SDK release loaded by the shell.
pub const SDK_VERSION: &str = "10.12.2";

/// Web-app credentials passed to `firebase.initializeApp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl FirebaseConfig {
    /// JSON payload for the `<meta>` tag's `content` attribute.
    pub fn to_meta_content(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse the `<meta>` payload back into a config.
    pub fn from_meta_content(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Read the config the server embedded in the current document.
    pub fn from_document() -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            let document = web_sys::window()?.document()?;
            let selector = format!("meta[name=\"{CONFIG_META_NAME}\"]");
            let raw = document.query_selector(&selector).ok().flatten()?.get_attribute("content")?;
            Self::from_meta_content(&raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

/// SDK script URLs the shell must load, in order.
pub fn sdk_script_urls() -> [String; 2] {
    ["app", "auth"].map(|part| format!("https://www.gstatic.com/firebasejs/{SDK_VERSION}/firebase-{part}-compat.js"))
}

/// Inline bootstrap that initializes the SDK from the `<meta>` payload.
pub fn bootstrap_script() -> String {
    format!(
        "(function(){{var m=document.querySelector('meta[name=\"{CONFIG_META_NAME}\"]');\
         if(m&&window.firebase){{firebase.initializeApp(JSON.parse(m.content));}}}})();"
    )
}

#[cfg(feature = "hydrate")]
mod sdk {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        pub type Auth;

        #[wasm_bindgen(catch, js_namespace = firebase, js_name = auth)]
        pub fn auth() -> Result<Auth, JsValue>;

        #[wasm_bindgen(method, catch, js_name = signInWithPopup)]
        pub fn sign_in_with_popup(this: &Auth, provider: &GoogleAuthProvider) -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(method, catch, js_name = signOut)]
        pub fn sign_out(this: &Auth) -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(js_namespace = ["firebase", "auth"])]
        pub type GoogleAuthProvider;

        #[wasm_bindgen(constructor, catch, js_namespace = ["firebase", "auth"])]
        pub fn new() -> Result<GoogleAuthProvider, JsValue>;
    }

    pub fn error_message(err: &JsValue) -> String {
        js_sys::Reflect::get(err, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| format!("{err:?}"))
    }

    fn string_field(obj: &JsValue, name: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &JsValue::from_str(name)).ok().and_then(|v| v.as_string())
    }

    pub fn principal_from_credential(credential: &JsValue) -> super::Principal {
        let user = js_sys::Reflect::get(credential, &JsValue::from_str("user")).unwrap_or(JsValue::UNDEFINED);
        super::Principal { email: string_field(&user, "email"), display_name: string_field(&user, "displayName") }
    }
}

/// Google popup sign-in through Firebase Auth.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirebaseAuth;

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self) -> Result<Principal, ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let auth = sdk::auth().map_err(|_| ProviderError::Unavailable)?;
            let provider = sdk::GoogleAuthProvider::new().map_err(|_| ProviderError::Unavailable)?;
            let promise = auth
                .sign_in_with_popup(&provider)
                .map_err(|e| ProviderError::SignIn(sdk::error_message(&e)))?;
            let credential = wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map_err(|e| ProviderError::SignIn(sdk::error_message(&e)))?;
            Ok(sdk::principal_from_credential(&credential))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ProviderError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let auth = sdk::auth().map_err(|_| ProviderError::Unavailable)?;
            let promise = auth.sign_out().map_err(|e| ProviderError::SignOut(sdk::error_message(&e)))?;
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map_err(|e| ProviderError::SignOut(sdk::error_message(&e)))?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ProviderError::Unavailable)
        }
    }
}
