use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::commands::settle_session;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    authenticated: bool,
    tab: String,
    username: Option<String>,
    expires_at: Option<String>,
    issued_at: Option<String>,
    note: Option<&'static str>,
}

/// Verify the stored token against the server. A rejected token is cleared.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tab = ctx.config.session.tab.clone();
    if ctx.session.token().is_none() {
        return output(
            &StatusResponse {
                authenticated: false,
                tab,
                username: None,
                expires_at: None,
                issued_at: None,
                note: Some("no stored session"),
            },
            flags.format,
        );
    }

    let api = ctx.connect().await?;
    let status = match settle_session(&api, ctx).await? {
        Some(payload) => StatusResponse {
            authenticated: true,
            tab,
            username: Some(payload.username),
            expires_at: Some(payload.expires_at.to_rfc3339()),
            issued_at: payload.issued_at.map(|at| at.to_rfc3339()),
            note: None,
        },
        None => StatusResponse {
            authenticated: false,
            tab,
            username: None,
            expires_at: None,
            issued_at: None,
            note: Some("stored token was rejected and has been cleared"),
        },
    };
    output(&status, flags.format)
}
