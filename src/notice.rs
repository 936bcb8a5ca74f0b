use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::render::html_escape;

/// How long a notice stays up before it closes itself.
pub const NOTICE_LIFETIME_MS: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        }
    }
}

/// A one-shot, auto-expiring message shown after an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn at(level: NoticeLevel, message: &str, now: DateTime<Utc>) -> Self {
        Notice {
            message: message.to_string(),
            level,
            expires_at: now + Duration::milliseconds(NOTICE_LIFETIME_MS),
        }
    }

    pub fn new(level: NoticeLevel, message: &str) -> Self {
        Self::at(level, message, Utc::now())
    }

    pub fn success(message: &str) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: &str) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"notice notice-{}\" role=\"status\">{}</div>",
            self.level.as_str(),
            html_escape(&self.message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_five_seconds() {
        let now = Utc::now();
        let notice = Notice::at(NoticeLevel::Info, "saved", now);
        assert!(!notice.is_expired(now));
        assert!(!notice.is_expired(now + Duration::milliseconds(4999)));
        assert!(notice.is_expired(now + Duration::seconds(5)));
    }

    #[test]
    fn notice_html_carries_level() {
        let html = Notice::error("<boom>").to_html();
        assert!(html.contains("notice-error"));
        assert!(html.contains("&lt;boom&gt;"));
    }
}
