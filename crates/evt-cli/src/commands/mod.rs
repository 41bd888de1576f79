mod auth;
mod events;
mod manage;
mod open;
mod register;
mod verify;

use std::sync::Arc;

use evt_client::{GraphqlClient, TokenPayload};
use evt_core::AuthState;
use evt_flow::{FlowError, LoginFlow, ScreenScope};

use crate::bootstrap::AppContext;
use crate::cli::{Commands, GlobalFlags};
use crate::progress::Spinner;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Events(args) => events::handle(&args, ctx, flags).await,
        Commands::Register(args) => register::handle(args, ctx, flags).await,
        Commands::Verify(args) => verify::handle(&args, ctx, flags).await,
        Commands::Auth { action } => auth::handle(action, ctx, flags).await,
        Commands::Open(args) => open::handle(&args, ctx, flags).await,
        Commands::Manage { action } => manage::handle(action, ctx, flags).await,
    }
}

/// Settle a session restored in the `Verifying` state by asking the server
/// about the stored token.
///
/// A rejected token is cleared and the session ends up unauthenticated;
/// that is not an error here. When the server cannot answer, the token is
/// kept for the next run and the failure is returned. Returns the verified
/// claims, if any.
async fn settle_session(
    api: &Arc<GraphqlClient>,
    ctx: &AppContext,
) -> anyhow::Result<Option<TokenPayload>> {
    if ctx.session.state() != AuthState::Verifying {
        return Ok(None);
    }

    let mut login = LoginFlow::new(Arc::clone(api), ctx.session.clone(), ScreenScope::new(), None);
    let spinner = Spinner::start("Checking stored session…");
    let result = login.mount().await;
    spinner.finish();
    match result {
        Ok(payload) => Ok(payload),
        Err(FlowError::Auth(message)) => {
            tracing::warn!(%message, "stored session discarded");
            Ok(None)
        }
        Err(error @ FlowError::Query(_)) => {
            Err(anyhow::Error::new(error).context("could not verify the stored session"))
        }
        Err(error) => Err(error.into()),
    }
}
