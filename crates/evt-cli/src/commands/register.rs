use evt_core::Route;
use evt_flow::{ScreenScope, SignInFlow};
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::RegisterArgs;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct RegisterResponse {
    participant_id: String,
    /// Where the code entry screen lives, e.g. `/verification?id=...`.
    next: String,
}

/// Handle `evt register`.
///
/// The event list is fetched first so party size and capacity are checked
/// before anything is sent.
pub async fn handle(args: RegisterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.connect().await?;
    let mut flow = SignInFlow::new(api, ScreenScope::new());
    Spinner::wrap("Loading events…", "Could not load events", flow.load_events()).await?;

    flow.set_name(args.name);
    flow.set_email(args.email);
    flow.set_party_size(args.party_size);
    flow.select_event(args.event);

    let route = Spinner::wrap("Registering…", "Registration failed", flow.submit()).await?;
    let Route::Verification { participant_id } = &route else {
        anyhow::bail!("unexpected landing route {route}");
    };
    output(
        &RegisterResponse {
            participant_id: participant_id.clone(),
            next: route.path(),
        },
        flags.format,
    )
}
