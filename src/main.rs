// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use musiccast_cec::cec::{LibCecBus, LibCecConfig, command_channel};
use musiccast_cec::{Bridge, DeviceConfig};
use tracing_subscriber::EnvFilter;

/// Present a Yamaha MusicCast receiver on the HDMI-CEC bus as the audio
/// system.
#[derive(Parser, Debug)]
#[command(name = "musiccast-cec", version, about)]
struct Cli {
    /// Receiver input the TV is connected to (e.g. hdmi1).
    #[arg(long, env = "MUSICCAST_INPUT")]
    input: String,

    /// Receiver host name or IP address.
    #[arg(long, env = "MUSICCAST_ADDRESS")]
    address: String,

    /// Volume applied after powering on, in receiver units.
    #[arg(long, default_value_t = DeviceConfig::DEFAULT_TARGET_VOLUME, env = "MUSICCAST_VOLUME")]
    volume: u32,

    /// Time the receiver is given to settle before the volume is applied.
    #[arg(long, default_value_t = 3000, env = "MUSICCAST_SETTLE_MS")]
    settle_ms: u64,

    /// OSD name announced on the CEC bus.
    #[arg(long, default_value = LibCecConfig::DEFAULT_DEVICE_NAME, env = "MUSICCAST_DEVICE_NAME")]
    device_name: String,
}

impl From<&Cli> for DeviceConfig {
    fn from(cli: &Cli) -> Self {
        DeviceConfig::new(cli.input.clone(), cli.address.clone())
            .with_target_volume(cli.volume)
            .with_settle_delay(Duration::from_millis(cli.settle_ms))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = DeviceConfig::from(&cli);
    tracing::info!(
        input = config.input_name(),
        address = config.address(),
        volume = config.target_volume(),
        settle_ms = cli.settle_ms,
        "Starting MusicCast CEC bridge"
    );

    let zone = Arc::new(
        config
            .http_config()
            .into_client()
            .context("invalid receiver address")?,
    );

    let (sender, receiver) = command_channel();
    let bus = Arc::new(
        LibCecBus::open(LibCecConfig::new().with_device_name(&cli.device_name), sender)
            .context("failed to open CEC adapter")?,
    );

    let bridge = Bridge::new(config, zone, Arc::clone(&bus));
    tokio::select! {
        () = bridge.run(receiver) => {
            tracing::warn!("CEC adapter stopped delivering commands");
        }
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            tracing::info!("Shutting down");
        }
    }

    drop(bridge);
    match Arc::try_unwrap(bus) {
        Ok(bus) => bus.close(),
        // A transmit still running holds a reference and closes it on drop
        Err(_) => tracing::warn!("CEC adapter busy, closing after the pending transmit"),
    }
    Ok(())
}
