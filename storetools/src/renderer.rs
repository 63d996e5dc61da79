use simple_store_engine::traits::{templates, RenderError, TemplateRenderer};

/// Renders replies for a terminal. Order confirmations are printed as the buyer would read them, everything else as
/// pretty-printed JSON under a heading naming the template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl TemplateRenderer for TerminalRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<Vec<u8>, RenderError> {
        if template == templates::ORDER_PLACED {
            if let Some(message) = context["message"].as_str() {
                return Ok(message.as_bytes().to_vec());
            }
        }
        let body = serde_json::to_string_pretty(context).map_err(|e| RenderError::ExecutionFailed(e.to_string()))?;
        Ok(format!("# {template}\n{body}\n").into_bytes())
    }
}
