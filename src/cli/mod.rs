//! CLI command handling.
//!
//! Provides subcommands for:
//! - Typing text on the emulator's virtual keyboard (`type`)
//! - Pressing a single named key (`key`)
//! - Querying emulator status over the control channel (`status`)

mod status;
mod typing;

pub use status::run_status_command;
pub use typing::{run_key_command, run_type_command};

use clap::{Args, Parser, Subcommand};

use crate::keystrokes::KEY_DELAY;

#[derive(Parser, Debug)]
#[command(name = "emuctl")]
#[command(about = "Client for the Android Emulator's gRPC control service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emulator gRPC address as host:port (overrides discovery)
    #[arg(long, global = true)]
    pub addr: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Type text on the emulator's virtual keyboard
    Type(TypeArgs),

    /// Press a single named key
    Key(KeyArgs),

    /// Show the emulator's status
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct TypeArgs {
    /// Text to type
    #[arg(default_value = "Hello World")]
    pub text: String,

    /// Pause between keystrokes, in milliseconds
    #[arg(long, default_value_t = KEY_DELAY.as_millis() as u64)]
    pub delay_ms: u64,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// W3C key name, e.g. "Enter" or "Backspace"
    pub name: String,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
