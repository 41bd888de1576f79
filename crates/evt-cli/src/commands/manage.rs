use std::sync::Arc;

use anyhow::Context;
use evt_client::GraphqlClient;
use evt_flow::{EventBoard, ManageFlow, Navigation, Navigator, ScreenScope};
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ManageCommands, ManageCreateArgs, ManageDownloadArgs};
use crate::commands::settle_session;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct CreateResponse {
    created: bool,
    name: String,
    max_participants: i64,
}

#[derive(Serialize)]
struct DownloadResponse {
    url: String,
    opened: bool,
}

/// Handle `evt manage <subcommand>`. Every subcommand goes through the
/// route guard for `/protected` first.
pub async fn handle(action: ManageCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.connect().await?;
    let flow = enter_protected(api, ctx).await?;

    match action {
        ManageCommands::List { watch: false } => list(&flow, flags).await,
        ManageCommands::List { watch: true } => watch(&flow, ctx, flags).await,
        ManageCommands::Create(args) => create(flow, args, flags).await,
        ManageCommands::Download(args) => download(&flow, &args, flags),
    }
}

async fn enter_protected(
    api: Arc<GraphqlClient>,
    ctx: &AppContext,
) -> anyhow::Result<ManageFlow<GraphqlClient>> {
    settle_session(&api, ctx).await?;

    let mut navigator = Navigator::new(ctx.session.clone());
    match navigator.open("/protected") {
        Navigation::Entered { .. } => {}
        Navigation::Redirected { from, .. } => anyhow::bail!(
            "not signed in; run `evt auth login --email <email> --from {}`",
            from.path
        ),
        Navigation::Pending { .. } => anyhow::bail!("session is still being verified"),
    }

    Ok(ManageFlow::new(api, ctx.session.clone(), ScreenScope::new())?)
}

async fn list(flow: &ManageFlow<GraphqlClient>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let board = Spinner::wrap("Loading events…", "Could not load events", flow.refresh()).await?;
    output(&board, flags.format)
}

/// Print the board on every change until Ctrl-C, which unmounts the
/// screen and stops the poller.
async fn watch(
    flow: &ManageFlow<GraphqlClient>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut updates = flow.subscribe();
    let poller = flow.watch(ctx.config.manage.poll_interval());
    let mut last_printed: Option<EventBoard> = None;
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            biased;
            signal = &mut interrupted => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::debug!("interrupted; closing the board");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let board = updates.borrow_and_update().clone();
                if let Some(message) = &board.last_error {
                    tracing::warn!(%message, "refresh failed; showing last known counts");
                }
                if last_printed.as_ref().is_some_and(|last| last.events == board.events) {
                    continue;
                }
                output(&board, flags.format)?;
                last_printed = Some(board);
            }
        }
    }

    flow.unmount();
    poller.await.context("event poller panicked")?;
    Ok(())
}

async fn create(
    mut flow: ManageFlow<GraphqlClient>,
    args: ManageCreateArgs,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = CreateResponse {
        created: true,
        name: args.name.clone(),
        max_participants: args.max_participants,
    };
    flow.set_name(args.name);
    flow.set_max_participants(args.max_participants);

    Spinner::wrap("Creating event…", "Could not create event", flow.create_event()).await?;
    output(&response, flags.format)
}

fn download(
    flow: &ManageFlow<GraphqlClient>,
    args: &ManageDownloadArgs,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let url = flow.download_link(&args.event)?;
    if args.open {
        open::that(&url).with_context(|| format!("failed to open {url}"))?;
    }
    output(
        &DownloadResponse {
            url,
            opened: args.open,
        },
        flags.format,
    )
}
