use evt_flow::{Navigation, Navigator};

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenArgs;
use crate::commands::settle_session;
use crate::output::output;

/// Handle `evt open <path>`.
///
/// A restored session starts out verifying, so the guard first answers
/// `pending`; the stored token is then checked and the guard runs again.
pub async fn handle(args: &OpenArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut navigator = Navigator::new(ctx.session.clone());
    let mut outcome = navigator.open(&args.path);

    if matches!(outcome, Navigation::Pending { .. }) {
        let api = ctx.connect().await?;
        settle_session(&api, ctx).await?;
        if let Some(settled) = navigator.resume() {
            outcome = settled;
        }
    }

    output(&outcome, flags.format)
}
