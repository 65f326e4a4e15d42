//! `emuctl type` and `emuctl key` - keystroke commands.

use std::time::Duration;

use anyhow::Context;

use crate::channel;
use crate::cli::{KeyArgs, TypeArgs};
use crate::config::Config;
use crate::keystrokes;

/// Run the type command: one `sendKey` call per character of the text.
pub async fn run_type_command(config: &Config, args: &TypeArgs) -> anyhow::Result<()> {
    let endpoint = channel::resolve(config);
    let mut client = channel::connect(&endpoint)
        .await
        .with_context(|| format!("failed to open emulator channel to {}", endpoint.addr))?;

    keystrokes::type_text(&mut client, &args.text, Duration::from_millis(args.delay_ms))
        .await
        .context("sendKey failed")?;
    Ok(())
}

/// Run the key command: a single named-key press.
pub async fn run_key_command(config: &Config, args: &KeyArgs) -> anyhow::Result<()> {
    let endpoint = channel::resolve(config);
    let mut client = channel::connect(&endpoint)
        .await
        .with_context(|| format!("failed to open emulator channel to {}", endpoint.addr))?;

    keystrokes::press_key(&mut client, &args.name)
        .await
        .context("sendKey failed")?;
    Ok(())
}
