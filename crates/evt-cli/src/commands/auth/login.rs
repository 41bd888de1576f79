use anyhow::Context;
use evt_core::{RedirectTarget, Route};
use evt_flow::{LoginFlow, ScreenScope};
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    tab: String,
    /// Path to continue to: the `--from` target, or `/`.
    landing: String,
}

pub async fn handle(args: AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = args
        .password
        .context("no password given; pass --password or set EVT_PASSWORD")?;
    let from = args.from.as_deref().map(redirect_target);

    let api = ctx.connect().await?;
    let mut flow = LoginFlow::new(api, ctx.session.clone(), ScreenScope::new(), from);
    flow.set_email(args.email);
    flow.set_password(password);

    let landing = Spinner::wrap("Signing in…", "Sign-in failed", flow.submit()).await?;
    output(
        &LoginResponse {
            authenticated: true,
            tab: ctx.config.session.tab.clone(),
            landing: landing.path(),
        },
        flags.format,
    )
}

/// Accept either the intercepted path itself or the login path that carries
/// it (`/login?from=%2Fprotected`), as printed by `evt open`.
fn redirect_target(path: &str) -> RedirectTarget {
    RedirectTarget::from_login_path(path).unwrap_or_else(|| RedirectTarget::new(&Route::parse(path)))
}
