//! Log record models for message delivery events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// Delivery status reported for a message.
///
/// The four known statuses are modeled as closed variants; anything else the
/// backend starts emitting lands in `Other` so it is counted rather than
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Sent,
    Error,
    Pending,
    Other(String),
}


impl DeliveryStatus {
    /// The statuses that get a zero-initialized counter in every report.
    pub const KNOWN: [&'static str; 4] = ["delivered", "sent", "error", "pending"];

    /// Parse a raw status value.
    ///
    /// Matching is case-insensitive for the known statuses. A missing or
    /// empty value maps to `Other("unknown")`; unrecognized values are
    /// preserved verbatim.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(s) if !s.trim().is_empty() => s.trim(),
            _ => return Self::Other("unknown".to_string()),
        };

        match raw.to_ascii_lowercase().as_str() {
            "delivered" => Self::Delivered,
            "sent" => Self::Sent,
            "error" => Self::Error,
            "pending" => Self::Pending,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Counting key for this status.
    pub fn key(&self) -> &str {
        match self {
            Self::Delivered => "delivered",
            Self::Sent => "sent",
            Self::Error => "error",
            Self::Pending => "pending",
            Self::Other(label) => label,
        }
    }
}


/// Message content type, inferred from the content preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Image,
    Video,
    Document,
}


impl MessageType {
    /// The full type set; every report carries a counter for each.
    pub const ALL: [MessageType; 4] = [Self::Text, Self::Image, Self::Video, Self::Document];

    /// Classify a content preview by first-match substring scan.
    ///
    /// Priority order is image, video, document. No match or no preview
    /// defaults to text.
    pub fn classify(preview: Option<&str>) -> Self {
        let preview = match preview {
            Some(p) => p.to_ascii_lowercase(),
            None => return Self::Text,
        };

        for (needle, message_type) in [
            ("image", Self::Image),
            ("video", Self::Video),
            ("document", Self::Document),
        ] {
            if preview.contains(needle) {
                return message_type;
            }
        }

        Self::Text
    }

    /// Counting key for this type.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}


/// A single message delivery event from the backend logs.
///
/// Every field except the timestamp degrades gracefully when absent. The
/// timestamp stays optional so a record missing it can still reach the
/// aggregator and be counted as skipped instead of vanishing at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub content_preview: Option<String>,
}


impl LogRecord {
    /// Parsed delivery status for this record.
    pub fn delivery_status(&self) -> DeliveryStatus {
        DeliveryStatus::parse(self.status.as_deref())
    }

    /// Inferred message type for this record.
    pub fn message_type(&self) -> MessageType {
        MessageType::classify(self.content_preview.as_deref())
    }

    /// Recipient identifier, if present and non-empty.
    pub fn recipient_id(&self) -> Option<&str> {
        self.recipient.as_deref().filter(|r| !r.trim().is_empty())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known() {
        assert_eq!(DeliveryStatus::parse(Some("delivered")), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::parse(Some("SENT")), DeliveryStatus::Sent);
        assert_eq!(DeliveryStatus::parse(Some("error")), DeliveryStatus::Error);
        assert_eq!(DeliveryStatus::parse(Some("Pending")), DeliveryStatus::Pending);
    }

    #[test]
    fn test_status_parse_unknown_preserved() {
        let status = DeliveryStatus::parse(Some("throttled"));
        assert_eq!(status, DeliveryStatus::Other("throttled".to_string()));
        assert_eq!(status.key(), "throttled");
    }

    #[test]
    fn test_status_parse_missing_defaults_to_unknown() {
        assert_eq!(DeliveryStatus::parse(None).key(), "unknown");
        assert_eq!(DeliveryStatus::parse(Some("")).key(), "unknown");
        assert_eq!(DeliveryStatus::parse(Some("  ")).key(), "unknown");
    }

    #[test]
    fn test_classify_document_preview() {
        let message_type = MessageType::classify(Some("see attached document.pdf"));
        assert_eq!(message_type, MessageType::Document);
    }

    #[test]
    fn test_classify_priority_order() {
        // "image" wins over "video" when both appear
        let message_type = MessageType::classify(Some("video thumbnail image"));
        assert_eq!(message_type, MessageType::Image);
    }

    #[test]
    fn test_classify_defaults_to_text() {
        assert_eq!(MessageType::classify(None), MessageType::Text);
        assert_eq!(MessageType::classify(Some("hello there")), MessageType::Text);
    }

    #[test]
    fn test_recipient_id_filters_empty() {
        let record = LogRecord {
            timestamp: None,
            status: None,
            recipient: Some("  ".to_string()),
            content_preview: None,
        };
        assert!(record.recipient_id().is_none());
    }
}
