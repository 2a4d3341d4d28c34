//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands.

mod toolbox;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use ops_hub_core::{DomainError, DomainResult};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

pub use toolbox::*;

/// Invoke `cmd` and decode its answer. A rejected call carries either a
/// serialized `DomainError` or, for IPC-level failures, anything else.
async fn call<A: Serialize, T: DeserializeOwned>(cmd: &str, args: &A) -> DomainResult<T> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| DomainError::Internal(e.to_string()))?;
    match invoke(cmd, js_args).await {
        Ok(value) => serde_wasm_bindgen::from_value(value)
            .map_err(|e| DomainError::Internal(format!("{}: bad response: {}", cmd, e))),
        Err(err) => Err(decode_error(cmd, err)),
    }
}

fn decode_error(cmd: &str, err: JsValue) -> DomainError {
    if let Ok(domain) = serde_wasm_bindgen::from_value::<DomainError>(err.clone()) {
        return domain;
    }
    let text = err
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| "unknown failure".to_string());
    web_sys::console::error_1(&format!("[IPC] {} failed: {}", cmd, text).into());
    DomainError::Internal(text)
}
