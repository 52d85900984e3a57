//! Telegram login-widget verification.
//!
//! The widget hands the browser a flat set of fields (`id`, `first_name`,
//! `auth_date`, `hash`, ...). The `hash` is an HMAC-SHA256 over the other
//! fields, keyed with `SHA256(bot_token)`, so only a party that knows the
//! bot token can produce it. See
//! <https://core.telegram.org/widgets/login#checking-authorization>.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::UserId;

/// Default freshness window for `auth_date`, in seconds.
pub const DEFAULT_MAX_AUTH_AGE_SECS: i64 = 300;

/// Field carrying the signature; excluded from the data-check string.
const HASH_FIELD: &str = "hash";

/// Length of a hex-encoded SHA-256 digest.
const HASH_HEX_LENGTH: usize = 64;

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a login payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("not enough arguments: {0} is required")]
    MissingField(&'static str),

    #[error("invalid argument value: {0}")]
    InvalidField(String),

    #[error("data is not from Telegram")]
    BadSignature,

    #[error("data is outdated")]
    Outdated,
}

impl From<LoginError> for CoreError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::MissingField(_) | LoginError::InvalidField(_) => {
                CoreError::Validation(err.to_string())
            }
            LoginError::BadSignature | LoginError::Outdated => {
                CoreError::Unauthorized(err.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The raw key/value pairs received from the login widget.
///
/// Keys are kept sorted, which is exactly the order the data-check string
/// needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginPayload {
    fields: BTreeMap<String, String>,
}

impl LoginPayload {
    #[cfg(test)]
    fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build a payload from a JSON object as posted by the widget callback.
    ///
    /// Strings are taken verbatim, numbers in their decimal form and
    /// booleans as `true`/`false`, which is how the widget renders them when
    /// it signs. Objects, arrays and `null` cannot have been signed and are
    /// rejected.
    pub fn from_json(object: serde_json::Map<String, Value>) -> Result<Self, LoginError> {
        let mut fields = BTreeMap::new();
        for (key, value) in object {
            let rendered = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return Err(LoginError::InvalidField(key)),
            };
            fields.insert(key, rendered);
        }
        Ok(Self { fields })
    }

    /// Look up a raw field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The `\n`-joined, key-sorted `key=value` lines, `hash` excluded.
    pub fn data_check_string(&self) -> String {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != HASH_FIELD)
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn require(&self, key: &'static str) -> Result<&str, LoginError> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .ok_or(LoginError::MissingField(key))
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).map(str::to_owned)
    }
}

/// The verified identity carried by a login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    /// Unix time at which Telegram authenticated the user.
    pub auth_date: i64,
}

// ---------------------------------------------------------------------------
// Signing / verification
// ---------------------------------------------------------------------------

fn mac_for(bot_token: &str) -> HmacSha256 {
    let secret = Sha256::digest(bot_token.as_bytes());
    HmacSha256::new_from_slice(&secret).expect("HMAC accepts any key length")
}

/// Compute the lowercase-hex signature Telegram would attach to
/// `data_check_string` for the given bot.
pub fn sign(bot_token: &str, data_check_string: &str) -> String {
    let mut mac = mac_for(bot_token);
    mac.update(data_check_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check the payload's `hash` against the bot token.
///
/// The comparison runs in constant time. The supplied hash must be the
/// lowercase hex form; uppercase or otherwise malformed hashes are rejected.
pub fn verify_signature(payload: &LoginPayload, bot_token: &str) -> Result<(), LoginError> {
    let supplied = payload.require(HASH_FIELD)?;

    let well_formed = supplied.len() == HASH_HEX_LENGTH
        && supplied
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !well_formed {
        return Err(LoginError::BadSignature);
    }
    let expected = hex::decode(supplied).map_err(|_| LoginError::BadSignature)?;

    let mut mac = mac_for(bot_token);
    mac.update(payload.data_check_string().as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| LoginError::BadSignature)
}

/// Fully verify a login payload and extract the user's profile.
///
/// Checks, in order: required fields are present, the signature matches,
/// the fields parse, and `auth_date` is no older than `max_age_secs`
/// relative to `now` (Unix seconds).
pub fn verify_login(
    payload: &LoginPayload,
    bot_token: &str,
    now: i64,
    max_age_secs: i64,
) -> Result<TelegramProfile, LoginError> {
    payload.require(HASH_FIELD)?;
    let raw_id = payload.require("id")?;
    let first_name = payload.require("first_name")?;
    let raw_auth_date = payload.require("auth_date")?;

    verify_signature(payload, bot_token)?;

    let id: UserId = raw_id
        .parse()
        .map_err(|_| LoginError::InvalidField("id".into()))?;
    let auth_date: i64 = raw_auth_date
        .parse()
        .map_err(|_| LoginError::InvalidField("auth_date".into()))?;

    if now.saturating_sub(auth_date) > max_age_secs {
        return Err(LoginError::Outdated);
    }

    Ok(TelegramProfile {
        id,
        first_name: first_name.to_owned(),
        last_name: payload.optional("last_name"),
        username: payload.optional("username"),
        photo_url: payload.optional("photo_url"),
        auth_date,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    const BOT_TOKEN: &str = "123456:TEST-TOKEN";
    const AUTH_DATE: i64 = 1_700_000_000;
    /// HMAC-SHA256 of the fixture below, computed independently.
    const FIXTURE_HASH: &str = "2f72a46af165bbd42b1ef82145575f563583a3b8550a0a6a1d6e1e7bd4a1f049";

    fn fixture() -> LoginPayload {
        LoginPayload::from_pairs([
            ("id", "42"),
            ("first_name", "Ann"),
            ("username", "ann"),
            ("auth_date", "1700000000"),
            ("hash", FIXTURE_HASH),
        ])
    }

    #[test]
    fn data_check_string_is_sorted_and_skips_hash() {
        assert_eq!(
            fixture().data_check_string(),
            "auth_date=1700000000\nfirst_name=Ann\nid=42\nusername=ann"
        );
    }

    #[test]
    fn sign_matches_known_vector() {
        let payload = fixture();
        assert_eq!(sign(BOT_TOKEN, &payload.data_check_string()), FIXTURE_HASH);
    }

    #[test]
    fn valid_payload_verifies() {
        let profile = verify_login(&fixture(), BOT_TOKEN, AUTH_DATE + 10, 300)
            .expect("fixture should verify");
        assert_eq!(profile.id, 42);
        assert_eq!(profile.first_name, "Ann");
        assert_eq!(profile.username.as_deref(), Some("ann"));
        assert_eq!(profile.last_name, None);
        assert_eq!(profile.auth_date, AUTH_DATE);
    }

    #[test]
    fn wrong_bot_token_is_rejected() {
        let result = verify_login(&fixture(), "654321:OTHER", AUTH_DATE, 300);
        assert_eq!(result, Err(LoginError::BadSignature));
    }

    #[test]
    fn tampered_field_is_rejected() {
        let mut payload = fixture();
        payload.fields.insert("id".into(), "43".into());
        assert_eq!(
            verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300),
            Err(LoginError::BadSignature)
        );
    }

    #[test]
    fn uppercase_hash_is_rejected() {
        let mut payload = fixture();
        payload
            .fields
            .insert("hash".into(), FIXTURE_HASH.to_uppercase());
        assert_eq!(
            verify_signature(&payload, BOT_TOKEN),
            Err(LoginError::BadSignature)
        );
    }

    #[test]
    fn truncated_hash_is_rejected() {
        let mut payload = fixture();
        payload
            .fields
            .insert("hash".into(), FIXTURE_HASH[..62].to_string());
        assert_eq!(
            verify_signature(&payload, BOT_TOKEN),
            Err(LoginError::BadSignature)
        );
    }

    #[test]
    fn freshness_window_boundary() {
        assert!(verify_login(&fixture(), BOT_TOKEN, AUTH_DATE + 300, 300).is_ok());
        assert_eq!(
            verify_login(&fixture(), BOT_TOKEN, AUTH_DATE + 301, 300),
            Err(LoginError::Outdated)
        );
    }

    #[test]
    fn outdated_payload_with_bad_signature_is_still_rejected() {
        let mut payload = fixture();
        payload.fields.insert("first_name".into(), "Eve".into());
        assert!(verify_login(&payload, BOT_TOKEN, AUTH_DATE + 10_000, 300).is_err());
    }

    #[test]
    fn missing_fields_are_reported() {
        let payload = LoginPayload::from_pairs([("id", "42"), ("hash", FIXTURE_HASH)]);
        assert_eq!(
            verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300),
            Err(LoginError::MissingField("first_name"))
        );

        let payload = LoginPayload::from_pairs([("id", "42")]);
        assert_eq!(
            verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300),
            Err(LoginError::MissingField("hash"))
        );
    }

    #[test]
    fn json_numbers_render_like_the_widget() {
        let object = json!({
            "id": 42,
            "first_name": "Ann",
            "username": "ann",
            "auth_date": AUTH_DATE,
            "hash": FIXTURE_HASH,
        });
        let Value::Object(map) = object else {
            unreachable!()
        };
        let payload = LoginPayload::from_json(map).unwrap();
        assert_eq!(payload, fixture());
        assert!(verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300).is_ok());
    }

    #[test]
    fn json_non_scalar_is_rejected() {
        let Value::Object(map) = json!({ "id": [1, 2] }) else {
            unreachable!()
        };
        assert_matches!(
            LoginPayload::from_json(map),
            Err(LoginError::InvalidField(field)) if field == "id"
        );

        let Value::Object(map) = json!({ "id": 42, "photo_url": null }) else {
            unreachable!()
        };
        assert_matches!(
            LoginPayload::from_json(map),
            Err(LoginError::InvalidField(field)) if field == "photo_url"
        );
    }

    #[test]
    fn json_booleans_are_signed_as_words() {
        let Value::Object(mut map) = json!({
            "id": 42,
            "first_name": "Ann",
            "allows_write_to_pm": true,
            "auth_date": AUTH_DATE,
        }) else {
            unreachable!()
        };
        let unsigned = LoginPayload::from_json(map.clone()).unwrap();
        assert_eq!(unsigned.get("allows_write_to_pm"), Some("true"));
        assert_eq!(
            unsigned.data_check_string(),
            "allows_write_to_pm=true\nauth_date=1700000000\nfirst_name=Ann\nid=42"
        );

        let hash = sign(BOT_TOKEN, &unsigned.data_check_string());
        map.insert("hash".into(), Value::String(hash));
        let payload = LoginPayload::from_json(map).unwrap();
        let profile = verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300).unwrap();
        assert_eq!(profile.id, 42);
    }

    #[test]
    fn extreme_auth_date_does_not_overflow() {
        let mut payload = LoginPayload::from_pairs([
            ("id", "42"),
            ("first_name", "Ann"),
            ("auth_date", "-9223372036854775808"),
        ]);
        let hash = sign(BOT_TOKEN, &payload.data_check_string());
        payload.fields.insert("hash".into(), hash);

        assert_eq!(
            verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300),
            Err(LoginError::Outdated)
        );
    }

    #[test]
    fn non_numeric_id_is_invalid_after_signature_check() {
        let mut payload = LoginPayload::from_pairs([
            ("id", "forty-two"),
            ("first_name", "Ann"),
            ("auth_date", "1700000000"),
        ]);
        let hash = sign(BOT_TOKEN, &payload.data_check_string());
        payload.fields.insert("hash".into(), hash);

        assert_eq!(
            verify_login(&payload, BOT_TOKEN, AUTH_DATE, 300),
            Err(LoginError::InvalidField("id".into()))
        );
    }

    #[test]
    fn login_errors_map_to_core_errors() {
        assert_matches!(
            CoreError::from(LoginError::Outdated),
            CoreError::Unauthorized(msg) if msg == "data is outdated"
        );
        assert_matches!(
            CoreError::from(LoginError::MissingField("id")),
            CoreError::Validation(_)
        );
    }
}
