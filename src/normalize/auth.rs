use serde_json::Value;

use super::resolve::{first_text, resolve_entity, scalar_text, unwrap_envelope};
use super::tables::*;
use crate::model::{MessageRecord, UserRecord};

/// Token and account from a login response. Either may be missing; the caller decides
/// whether that is fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRecord {
    pub token: Option<String>,
    pub user: UserRecord,
}

pub fn login(raw: &Value) -> LoginRecord {
    let root = unwrap_envelope(raw);
    LoginRecord {
        token: root.as_object().and_then(|o| first_text(o, TOKEN_KEYS)),
        user: user(raw),
    }
}

/// Account from login / me. A role missing from the user entity falls back to a root `role`.
pub fn user(raw: &Value) -> UserRecord {
    let root = unwrap_envelope(raw);
    let r = resolve_entity(root, &USER);
    UserRecord {
        id: r.int(&USER_ID),
        name: r.text(&USER_NAME),
        email: r.text(&USER_EMAIL),
        role: r.text(&USER_ROLE).or_else(|| root.as_object().and_then(|o| first_text(o, ROOT_ROLE_KEYS))),
    }
}

pub fn message(raw: &Value) -> MessageRecord {
    let root = unwrap_envelope(raw);
    let message = match root {
        Value::Object(o) => first_text(o, MESSAGE_KEYS),
        Value::String(_) => scalar_text(root),
        _ => None,
    };
    MessageRecord { message }
}
