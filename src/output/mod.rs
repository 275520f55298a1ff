pub mod cards;
pub mod locale;
pub mod report;
pub mod status;

use crate::view::RenderPlan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// What the members grid holds: a projection, or the single load-failure message.
#[derive(Clone, Copy, Debug)]
pub enum Frame<'a> {
    Plan(&'a RenderPlan),
    LoadFailed,
}

pub fn render(frame: Frame<'_>, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => cards::render_text(frame).into_bytes(),
        OutputFormat::Json => render_json(frame),
        OutputFormat::Html => report::render_html(frame),
    }
}

pub fn render_json(frame: Frame<'_>) -> Vec<u8> {
    let value = match frame {
        Frame::Plan(plan) => serde_json::to_value(plan).unwrap_or(serde_json::Value::Null),
        Frame::LoadFailed => serde_json::json!({ "error": locale::LOAD_ERROR }),
    };
    let mut out = serde_json::to_vec_pretty(&value).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{project, ViewState};

    #[test]
    fn format_parse_and_inference() {
        assert_eq!(OutputFormat::parse(" HTML "), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(infer_format_from_path("out/roster.JSON"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("roster.htm"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("roster"), None);
    }

    #[test]
    fn json_carries_plan_fields() {
        let plan = project(&[], &[], &ViewState::default());
        let raw = render_json(Frame::Plan(&plan));
        let v: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(v["show_pagination"], serde_json::Value::Bool(false));
        assert_eq!(v["state"]["current_page"], 1);

        let raw = render_json(Frame::LoadFailed);
        let v: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(v["error"], locale::LOAD_ERROR);
    }
}
