use evt_flow::{ScreenScope, VerificationFlow};
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::VerifyArgs;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct VerifyResponse {
    verified: bool,
    event: String,
}

/// Handle `evt verify`. Digits are typed slot by slot, as on the screen.
pub async fn handle(args: &VerifyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.connect().await?;
    let mut flow = VerificationFlow::new(api, ScreenScope::new(), args.id.trim());

    let code = args.code.trim();
    let slots = flow.code().slots().len();
    if code.chars().count() > slots {
        anyhow::bail!("the code has {slots} digits");
    }
    for digit in code.chars() {
        flow.type_digit(digit)?;
    }

    let event = Spinner::wrap("Verifying…", "Verification failed", flow.submit()).await?;
    output(
        &VerifyResponse {
            verified: true,
            event,
        },
        flags.format,
    )
}
