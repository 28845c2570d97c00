use connector_booking::{Lang, WidgetView};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── API request/response types ──

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Lang,
}

#[derive(Debug, Deserialize)]
pub struct ChooseDateRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct ChooseTimeRequest {
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct SetTimezoneRequest {
    pub timezone: String,
}

/// A session's id alongside its rendered widget.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    /// Whether the last event changed anything; absent on plain reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    #[serde(flatten)]
    pub view: WidgetView,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
