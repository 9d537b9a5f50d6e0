//! Stateless arithmetic captcha for the public lead form.
//!
//! The token binds the expected answer and the issue time with an
//! HMAC-SHA256, so the server keeps no per-visitor state. Format:
//! `<unix_ts>.<hex hmac>`.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde::Serialize;
use sha2::Sha256;

/// Tokens older than this are rejected.
pub const CAPTCHA_TTL_SECS: i64 = 600;

/// Form field that must stay empty; bots tend to fill it.
pub const HONEYPOT_FIELD: &str = "website";

type HmacSha256 = Hmac<Sha256>;

/// A question shown to the visitor plus the token to send back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Captcha {
    pub question: String,
    pub token: String,
}

/// Generate an addition or subtraction question with operands in `1..=20`.
///
/// Subtraction never produces a negative answer.
pub fn generate_captcha(secret: &str, now: i64) -> Captcha {
    let mut rng = rand::rng();
    let mut a: i64 = rng.random_range(1..=20);
    let mut b: i64 = rng.random_range(1..=20);

    let (question, answer) = if rng.random_bool(0.5) {
        (format!("{a} + {b}"), a + b)
    } else {
        if a < b {
            std::mem::swap(&mut a, &mut b);
        }
        (format!("{a} - {b}"), a - b)
    };

    Captcha {
        question,
        token: issue_token(secret, answer, now),
    }
}

/// Token for a known answer issued at `now`.
pub fn issue_token(secret: &str, answer: i64, now: i64) -> String {
    format!("{now}.{}", hex_encode(&sign(secret, answer, now)))
}

/// Check the visitor's answer against a token.
pub fn verify_captcha(secret: &str, answer: &str, token: &str, now: i64) -> bool {
    let Ok(answer) = answer.trim().parse::<i64>() else {
        return false;
    };
    let Some((issued, signature)) = token.split_once('.') else {
        return false;
    };
    let Ok(issued) = issued.parse::<i64>() else {
        return false;
    };
    if issued > now || now - issued > CAPTCHA_TTL_SECS {
        return false;
    }
    let Some(signature) = hex_decode(signature) else {
        return false;
    };

    mac_for(secret, answer, issued).verify_slice(&signature).is_ok()
}

/// `true` when the honeypot field was left empty.
pub fn honeypot_is_clean(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn mac_for(secret: &str, answer: i64, issued: i64) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{answer}:{issued}").as_bytes());
    mac
}

fn sign(secret: &str, answer: i64, issued: i64) -> Vec<u8> {
    mac_for(secret, answer, issued).finalize().into_bytes().to_vec()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
