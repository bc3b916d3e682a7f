//! Rendering of responses for the command line

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// How responses are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render any serializable value in the chosen format
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to render JSON output")
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .context("Failed to render YAML output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Envelope;
    use serde_json::json;

    #[test]
    fn renders_envelope_as_json() {
        let envelope = Envelope::new(0, None, Some(json!({"id": 1})));
        let text = render(&envelope, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({"code": 0, "msg": null, "data": {"id": 1}}));
    }

    #[test]
    fn renders_envelope_as_yaml() {
        let envelope = Envelope::new(500, Some("duplicate name".to_string()), None::<()>);
        let text = render(&envelope, OutputFormat::Yaml).unwrap();
        assert!(text.contains("code: 500"));
        assert!(text.contains("msg: duplicate name"));
    }
}
