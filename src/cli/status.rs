//! `emuctl status` - query the emulator over the control channel.

use anyhow::Context;
use serde::Serialize;

use crate::channel;
use crate::cli::StatusArgs;
use crate::config::Config;

/// Status report assembled from `getStatus` and the resolved endpoint.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avd: Option<String>,
    pub version: String,
    pub uptime_ms: u64,
    pub booted: bool,
}

/// Run the status command, printing emulator health info.
pub async fn run_status_command(config: &Config, args: &StatusArgs) -> anyhow::Result<()> {
    let endpoint = channel::resolve(config);
    let mut client = channel::connect(&endpoint)
        .await
        .with_context(|| format!("failed to open emulator channel to {}", endpoint.addr))?;

    let status = client
        .get_status(())
        .await
        .context("getStatus failed")?
        .into_inner();

    let report = StatusReport {
        endpoint: endpoint.addr,
        avd: endpoint.avd_name,
        version: status.version,
        uptime_ms: status.uptime,
        booted: status.booted,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Emulator Status");
    println!("===============\n");
    println!("  Endpoint:  {}", report.endpoint);
    if let Some(avd) = &report.avd {
        println!("  AVD:       {avd}");
    }
    println!("  Version:   {}", report.version);
    println!("  Uptime:    {}s", report.uptime_ms / 1000);
    println!("  Booted:    {}", if report.booted { "yes" } else { "no" });

    Ok(())
}
