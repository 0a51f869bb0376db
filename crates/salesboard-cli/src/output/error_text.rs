use salesboard_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let headline = if error.is_internal() {
        "Salesboard could not use its local store."
    } else {
        "That command needs a small fix."
    };
    let mut lines = vec![
        headline.to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use salesboard_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_user_error_layout() {
        let error = ClientError::new(
            "invalid_argument",
            "amount must be a number",
            vec!["Run `salesboard sale add --help`.".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("That command needs a small fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  amount must be a number"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. Run `salesboard sale add --help`."));
    }

    #[test]
    fn store_errors_use_store_headline() {
        let error = ClientError::store_locked(Path::new("/tmp/sales.db"));
        let rendered = render_error(&error);
        assert!(rendered.starts_with("Salesboard could not use its local store."));
        assert!(rendered.contains("store_locked"));
    }

    #[test]
    fn missing_recovery_steps_suggest_retry() {
        let error = ClientError::new("invalid_argument", "bad", Vec::new());
        assert!(render_error(&error).ends_with("  1. Retry the command."));
    }
}
