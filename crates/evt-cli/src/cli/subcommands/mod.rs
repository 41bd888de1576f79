mod auth;
mod manage;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use manage::{ManageCommands, ManageCreateArgs, ManageDownloadArgs};
