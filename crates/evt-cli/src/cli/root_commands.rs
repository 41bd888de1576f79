use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, ManageCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List open events with their remaining capacity.
    Events(EventsArgs),
    /// Register a party for an event.
    Register(RegisterArgs),
    /// Confirm a registration with the emailed four-digit code.
    Verify(VerifyArgs),
    /// Staff sign-in.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Resolve a path through the route guard.
    Open(OpenArgs),
    /// Event management (staff only).
    Manage {
        #[command(subcommand)]
        action: ManageCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct EventsArgs {
    /// Mark events that cannot seat a party of this size as disabled.
    #[arg(long)]
    pub party_size: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Number of seats, 1 to 10.
    #[arg(long, allow_negative_numbers = true)]
    pub party_size: i64,
    /// Event id as listed by `evt events`.
    #[arg(long)]
    pub event: String,
}

#[derive(Clone, Debug, Args)]
pub struct VerifyArgs {
    /// Participant id printed by `evt register`.
    #[arg(long)]
    pub id: String,
    /// The four-digit code.
    #[arg(long)]
    pub code: String,
}

#[derive(Clone, Debug, Args)]
pub struct OpenArgs {
    /// Path such as `/protected` or `/verification?id=...`.
    pub path: String,
}
