//! Event loop connecting the channel to the command parser.

use crate::dispatch::CommandParser;
use lapis_core::traits::Channel;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Gateway {
    channel: Arc<dyn Channel>,
    parser: Arc<CommandParser>,
}

impl Gateway {
    pub fn new(channel: Arc<dyn Channel>, parser: Arc<CommandParser>) -> Self {
        Self { channel, parser }
    }

    /// Run until Ctrl-C or until the channel stops delivering messages.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel {}: {e}", self.channel.name()))?;

        info!(
            "Lapis gateway running | channel: {} | commands: {}",
            self.channel.name(),
            self.parser.commands().len()
        );

        loop {
            tokio::select! {
                incoming = rx.recv() => match incoming {
                    Some(msg) => {
                        let parser = self.parser.clone();
                        tokio::spawn(async move {
                            parser.on_message(msg).await;
                        });
                    }
                    None => {
                        info!("channel {} closed", self.channel.name());
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        info!("Shutting down...");
        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel {}: {e}", self.channel.name());
        }
        info!("Shutdown complete.");
        Ok(())
    }
}
