//! Confirmation prompt with non-interactive fallback

use super::context::UiContext;
use crate::error::{AzfnError, AzfnResult};

/// Ask for confirmation.
///
/// `--yes` approves without asking; without a terminal the default is used.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> AzfnResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on stdin
    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| AzfnError::Internal(format!("Prompt task failed: {}", e)))?
    .map_err(|e| AzfnError::User(format!("Prompt failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_yes_approves() {
        let ctx = UiContext::non_interactive().with_auto_yes(true);
        assert!(confirm(&ctx, "Delete my-app?", false).await.unwrap());
    }

    #[tokio::test]
    async fn non_interactive_uses_default() {
        let ctx = UiContext::non_interactive();
        assert!(!confirm(&ctx, "Delete my-app?", false).await.unwrap());
        assert!(confirm(&ctx, "Delete my-app?", true).await.unwrap());
    }
}
