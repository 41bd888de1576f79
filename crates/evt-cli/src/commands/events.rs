use evt_flow::{ScreenScope, SignInFlow};

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::EventsArgs;
use crate::output::output;
use crate::progress::Spinner;

/// Handle `evt events`.
pub async fn handle(args: &EventsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.connect().await?;
    let mut flow = SignInFlow::new(api, ScreenScope::new());
    if let Some(party_size) = args.party_size {
        flow.set_party_size(party_size);
    }

    Spinner::wrap("Loading events…", "Could not load events", flow.load_events()).await?;
    output(&flow.options(), flags.format)
}
