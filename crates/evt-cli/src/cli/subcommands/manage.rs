use clap::{Args, Subcommand};

/// Event management commands. All of them require a signed-in session.
#[derive(Clone, Debug, Subcommand)]
pub enum ManageCommands {
    /// Show events with participant counts.
    List {
        /// Keep polling until Ctrl-C.
        #[arg(long)]
        watch: bool,
    },
    /// Create an event.
    Create(ManageCreateArgs),
    /// Build the participant export link for an event.
    Download(ManageDownloadArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ManageCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_negative_numbers = true)]
    pub max_participants: i64,
}

#[derive(Clone, Debug, Args)]
pub struct ManageDownloadArgs {
    /// Event uid or relay id.
    #[arg(long)]
    pub event: String,
    /// Open the link in the default browser.
    #[arg(long)]
    pub open: bool,
}
