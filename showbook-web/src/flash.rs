//! One-shot flash messages carried in a cookie
//!
//! A command handler sets the message before redirecting; the next page
//! render takes it and clears the cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Error,
}

impl FlashLevel {
    fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Info => "info",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Cookie value: `<level>:<percent-encoded message>`
    pub fn to_cookie_value(&self) -> String {
        format!("{}:{}", self.level.as_str(), urlencoding::encode(&self.message))
    }

    /// Parse a cookie value; anything unrecognised yields `None`
    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        let (level, encoded) = raw.split_once(':')?;
        let level = match level {
            "info" => FlashLevel::Info,
            "error" => FlashLevel::Error,
            _ => return None,
        };
        let message = urlencoding::decode(encoded).ok()?.into_owned();
        Some(Self { level, message })
    }
}

/// Store `flash` for the next page render
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.to_cookie_value()))
            .path("/")
            .http_only(true),
    )
}

/// Take the pending flash, if any, and clear it
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));
    (jar, Flash::from_cookie_value(&raw))
}
