use clap::{Args, Subcommand};

/// Staff authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Clear the stored token for this tab.
    Logout,
    /// Verify the stored token and show its claims.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Staff email, used as the username.
    #[arg(long)]
    pub email: String,
    /// Password; read from `EVT_PASSWORD` when omitted.
    #[arg(long, env = "EVT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Path to land on after sign-in (as printed by `evt open`).
    #[arg(long)]
    pub from: Option<String>,
}
