//! Framework-free API reply.
//!
//! Every route answers with a JSON object carrying an `error` field: the
//! string `"OK"` on success, a message, or a field → reason map. The HTTP
//! layer only maps [`ReplyStatus`] to a status code.

use std::collections::BTreeMap;

use serde_json::{json, Value};

/// Outcome class of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    BadRequest,
    InternalError,
}

impl ReplyStatus {
    pub fn code(self) -> u16 {
        match self {
            ReplyStatus::Ok => 200,
            ReplyStatus::BadRequest => 400,
            ReplyStatus::InternalError => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: ReplyStatus,
    pub body: Value,
}

impl ApiReply {
    pub fn ok() -> Self {
        Self {
            status: ReplyStatus::Ok,
            body: json!({ "error": "OK" }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::BadRequest,
            body: json!({ "error": message.into() }),
        }
    }

    /// 400 with one reason per offending field.
    pub fn invalid_fields(errors: BTreeMap<String, String>) -> Self {
        Self {
            status: ReplyStatus::BadRequest,
            body: json!({ "error": errors }),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::InternalError,
            body: json!({ "error": message.into() }),
        }
    }
}
