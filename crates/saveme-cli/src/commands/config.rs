//! Configuration display command.

use saveme_core::config::AppConfig;
use saveme_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Execute the config command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut shown = config.clone();
    shown.api.token = shown.api.token.as_deref().map(mask_token);

    match format {
        OutputFormat::Json => output::print_json(&shown, "{}"),
        OutputFormat::Table => {
            println!("[api]");
            output::print_kv("base_url", &shown.api.base_url);
            output::print_kv("token", shown.api.token.as_deref().unwrap_or("(none)"));
            output::print_kv("timeout", &format!("{}s", shown.api.timeout_seconds));
            output::print_kv(
                "connect_timeout",
                &format!("{}s", shown.api.connect_timeout_seconds),
            );
            output::print_kv("user_agent", &shown.api.user_agent);
            println!("[browser]");
            output::print_kv(
                "breadcrumb_depth",
                &shown.browser.max_breadcrumb_depth.to_string(),
            );
            output::print_kv("upload_grace", &format!("{}ms", shown.browser.upload_grace_ms));
            output::print_kv(
                "max_concurrent",
                &shown.browser.max_concurrent_requests.to_string(),
            );
            println!("[logging]");
            output::print_kv("level", &shown.logging.level);
            output::print_kv("format", &shown.logging.format);
            output::print_kv("ansi", &shown.logging.ansi.to_string());
        }
    }
    Ok(())
}

/// Keep only the first few characters of a token for display
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    if visible.len() == token.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbG****");
        assert_eq!(mask_token("short"), "****");
    }
}
