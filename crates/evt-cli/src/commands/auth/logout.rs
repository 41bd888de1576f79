use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
    tab: String,
}

/// Sign out locally. The token is stateless on the server side, so there
/// is nothing to revoke remotely.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.session.sign_out()?;
    output(
        &LogoutResponse {
            cleared: true,
            tab: ctx.config.session.tab.clone(),
        },
        flags.format,
    )
}
