use serde::{Deserialize, Serialize};

use crate::domain::{ToastMode, ToastVariant};

/// Transient user-facing notification. Created and dispatched in one step,
/// never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub variant: ToastVariant,
    pub mode: ToastMode,
    pub message: String,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        variant: ToastVariant,
        mode: ToastMode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            variant,
            mode,
            message: message.into(),
        }
    }
}

/// Structured body carried by remote rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Decodes a rejection payload. Returns `None` when the payload is not
    /// the expected `{"message": ...}` shape.
    pub fn decode(raw: &[u8]) -> Option<Self> {
        serde_json::from_slice(raw).ok()
    }
}
