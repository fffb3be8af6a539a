//! Request handling: decode → validate → resolve → execute → reply.
//!
//! [`RequestHandler`] turns raw request bytes into an [`ApiReply`]. It knows
//! nothing about HTTP; the infrastructure layer feeds it bodies and maps the
//! reply status onto a status code.
//!
//! Nothing reaches the device until the whole request has been validated and
//! every layout and key name has resolved, so a bad request never presses a
//! key.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use netkey_core::{resolve_key_name, resolve_layout, HidKeyCode};

use crate::application::executor::{CommandError, HidCommandExecutor};
use crate::application::validator::{validate, Schema, KEYCODES_SCHEMA, TYPE_SCHEMA};
use crate::domain::requests::{checked_wait, KeycodeRequest, TypeRequest, KEYCODE_SHAPE_ERROR};
use crate::domain::ApiReply;

/// Message returned when the body is not valid JSON.
pub const INVALID_JSON: &str = "Invalid JSON data";

/// A zero-argument administrative action such as disabling the boot keyboard.
pub type AdminAction = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Routes request bodies to the executor.
#[derive(Clone)]
pub struct RequestHandler {
    executor: Arc<HidCommandExecutor>,
}

impl RequestHandler {
    pub fn new(executor: Arc<HidCommandExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<HidCommandExecutor> {
        &self.executor
    }

    /// Handles the `type` route.
    pub async fn handle_type(&self, raw: &[u8]) -> ApiReply {
        let request: TypeRequest = match decode(raw, &TYPE_SCHEMA) {
            Ok(request) => request,
            Err(reply) => return reply,
        };
        reply_for(self.type_text(request).await)
    }

    /// Handles the `type_keycodes` route.
    pub async fn handle_type_keycodes(&self, raw: &[u8]) -> ApiReply {
        let request: KeycodeRequest = match decode(raw, &KEYCODES_SCHEMA) {
            Ok(request) => request,
            Err(reply) => return reply,
        };
        reply_for(self.type_keycodes(request).await)
    }

    async fn type_text(&self, request: TypeRequest) -> Result<(), CommandError> {
        let delay = wait_duration(request.wait)?;
        let layout = resolve_layout(request.layout.as_deref())?;
        self.executor.type_text(layout, request.data, delay).await
    }

    async fn type_keycodes(&self, request: KeycodeRequest) -> Result<(), CommandError> {
        let delay = wait_duration(request.wait)?;
        let combos = request
            .plan_combos()
            .into_iter()
            .map(|combo| {
                combo
                    .into_iter()
                    .map(resolve_key_name)
                    .collect::<Result<Vec<HidKeyCode>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        match combos.len() {
            0 => Ok(()),
            1 => {
                let keys = combos.into_iter().flatten().collect();
                self.executor.press_combo(keys, delay).await
            }
            _ => self.executor.press_sequence(combos, delay).await,
        }
    }
}

/// Runs an administrative action. Failures become 500 with the error text.
pub fn handle_admin(name: &str, action: &AdminAction) -> ApiReply {
    match action() {
        Ok(()) => {
            debug!("admin action {name} succeeded");
            ApiReply::ok()
        }
        Err(e) => {
            warn!("admin action {name} failed: {e:#}");
            ApiReply::internal_error(format!("{e:#}"))
        }
    }
}

/// Parses JSON, checks it against `schema`, then deserializes it.
fn decode<T: DeserializeOwned>(raw: &[u8], schema: &Schema) -> Result<T, ApiReply> {
    let body: Value =
        serde_json::from_slice(raw).map_err(|_| ApiReply::bad_request(INVALID_JSON))?;

    let errors = validate(&body, schema);
    if !errors.is_empty() {
        debug!(?errors, "request rejected by schema");
        return Err(ApiReply::invalid_fields(errors));
    }

    // The schema has fixed every top-level kind, so what is left is the
    // content of the keycode list.
    serde_json::from_value(body).map_err(|_| ApiReply::bad_request(KEYCODE_SHAPE_ERROR))
}

fn wait_duration(wait: Option<f64>) -> Result<Option<Duration>, CommandError> {
    checked_wait(wait).map_err(|msg| CommandError::InvalidRequest(msg.to_string()))
}

fn reply_for(result: Result<(), CommandError>) -> ApiReply {
    match result {
        Ok(()) => ApiReply::ok(),
        Err(e) if e.is_client_error() => ApiReply::bad_request(e.to_string()),
        Err(e) => ApiReply::internal_error(e.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReplyStatus;
    use netkey_core::device::recording::RecordingDevice;
    use serde_json::json;
    use HidKeyCode::*;

    fn handler() -> (Arc<RecordingDevice>, RequestHandler) {
        let device = Arc::new(RecordingDevice::new());
        let executor = Arc::new(HidCommandExecutor::new(device.clone()));
        (device, RequestHandler::new(executor))
    }

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[tokio::test]
    async fn test_type_success_replies_ok() {
        // Arrange
        let (device, handler) = handler();

        // Act
        let reply = handler.handle_type(&body(json!({"data": "Hi"}))).await;

        // Assert
        assert_eq!(reply, ApiReply::ok());
        assert_eq!(
            device.keyboard_presses(),
            vec![vec![ShiftLeft, KeyH], vec![], vec![KeyI], vec![]]
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let (device, handler) = handler();

        let reply = handler.handle_type(b"{not json").await;

        assert_eq!(reply.status, ReplyStatus::BadRequest);
        assert_eq!(reply.body, json!({"error": "Invalid JSON data"}));
        assert!(device.reports().is_empty());
    }

    #[tokio::test]
    async fn test_missing_data_lists_field_and_touches_nothing() {
        let (device, handler) = handler();

        let reply = handler.handle_type(&body(json!({"layout": "en-US"}))).await;

        assert_eq!(reply.status, ReplyStatus::BadRequest);
        assert_eq!(reply.body, json!({"error": {"data": "Required key not found"}}));
        assert!(device.reports().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_layout_is_client_error() {
        let (device, handler) = handler();

        let reply = handler
            .handle_type(&body(json!({"data": "x", "layout": "xx-XX"})))
            .await;

        assert_eq!(reply.status, ReplyStatus::BadRequest);
        assert_eq!(
            reply.body["error"],
            "Unsupported keyboard layout: xx-XX. Available layouts: \
             (en-US, en-GB, fr-CA, fr-FR, es-ES, de-DE)"
        );
        assert!(device.reports().is_empty());
    }

    #[tokio::test]
    async fn test_negative_wait_is_rejected() {
        let (device, handler) = handler();

        let reply = handler
            .handle_type(&body(json!({"data": "x", "wait": -1})))
            .await;

        assert_eq!(reply.status, ReplyStatus::BadRequest);
        assert_eq!(reply.body["error"], "Key: wait must be a non-negative number");
        assert!(device.reports().is_empty());
    }

    #[tokio::test]
    async fn test_wait_too_large_for_a_duration_is_rejected() {
        // Arrange
        let (device, handler) = handler();

        // Act
        let typed = handler.handle_type(br#"{"data": "a", "wait": 1e20}"#).await;
        let pressed = handler
            .handle_type_keycodes(br#"{"data": ["A"], "wait": 1e20}"#)
            .await;

        // Assert
        for reply in [typed, pressed] {
            assert_eq!(reply.status, ReplyStatus::BadRequest);
            assert_eq!(reply.body["error"], "Key: wait must be a non-negative number");
        }
        assert!(device.reports().is_empty());
    }

    #[tokio::test]
    async fn test_keycodes_single_combo() {
        // Arrange
        let (device, handler) = handler();

        // Act
        let reply = handler
            .handle_type_keycodes(&body(json!({"data": ["CONTROL", "SHIFT", "ESCAPE"]})))
            .await;

        // Assert
        assert_eq!(reply, ApiReply::ok());
        assert_eq!(
            device.keyboard_presses(),
            vec![vec![ControlLeft, ShiftLeft, Escape], vec![]]
        );
    }

    #[tokio::test]
    async fn test_keycodes_mixed_entries_are_sequential_combos() {
        let (device, handler) = handler();

        let reply = handler
            .handle_type_keycodes(&body(json!({
                "data": ["F5", ["SHIFT", "KEYPAD_SEVEN"], ["CONTROL", "SHIFT", "ESCAPE"]]
            })))
            .await;

        assert_eq!(reply, ApiReply::ok());
        assert_eq!(
            device.keyboard_presses(),
            vec![
                vec![F5],
                vec![],
                vec![ShiftLeft, Numpad7],
                vec![],
                vec![ControlLeft, ShiftLeft, Escape],
                vec![],
            ]
        );
    }

    #[tokio::test]
    async fn test_keycodes_separate() {
        let (device, handler) = handler();

        let reply = handler
            .handle_type_keycodes(&body(json!({
                "data": ["KEYPAD_SEVEN", "C", "ESCAPE"],
                "separate": true
            })))
            .await;

        assert_eq!(reply, ApiReply::ok());
        assert_eq!(
            device.keyboard_presses(),
            vec![vec![Numpad7], vec![], vec![KeyC], vec![], vec![Escape], vec![]]
        );
    }

    #[tokio::test]
    async fn test_unknown_key_name_presses_nothing() {
        let (device, handler) = handler();

        let reply = handler
            .handle_type_keycodes(&body(json!({"data": [["A"], ["HYPER"]]})))
            .await;

        assert_eq!(reply.status, ReplyStatus::BadRequest);
        assert_eq!(reply.body["error"], "Unknown key name: HYPER");
        assert!(device.reports().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_keycode_entries() {
        let (_device, handler) = handler();

        let reply = handler
            .handle_type_keycodes(&body(json!({"data": ["A", 7]})))
            .await;

        assert_eq!(reply.status, ReplyStatus::BadRequest);
        assert_eq!(
            reply.body["error"],
            "Key: data must contain key names or lists of key names"
        );
    }

    #[tokio::test]
    async fn test_device_failure_is_internal_error() {
        let (device, handler) = handler();
        device.fail_after(0);

        let reply = handler
            .handle_type_keycodes(&body(json!({"data": ["A"]})))
            .await;

        assert_eq!(reply.status, ReplyStatus::InternalError);
        assert!(handler.executor().pressed_keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_too_many_keys_is_internal_error() {
        let (_device, handler) = handler();

        let reply = handler
            .handle_type_keycodes(&body(json!({"data": ["A", "B", "C", "D", "E", "F", "G"]})))
            .await;

        assert_eq!(reply.status, ReplyStatus::InternalError);
    }

    #[test]
    fn test_admin_action_outcomes() {
        let ok: AdminAction = Arc::new(|| Ok(()));
        let failing: AdminAction = Arc::new(|| Err(anyhow::anyhow!("permission denied")));

        assert_eq!(handle_admin("ok", &ok), ApiReply::ok());

        let reply = handle_admin("failing", &failing);
        assert_eq!(reply.status, ReplyStatus::InternalError);
        assert_eq!(reply.body["error"], "permission denied");
    }
}
