//! Console channel: stdin lines in, replies on stdout.
//!
//! Every line becomes one message from a fixed destination chosen on the
//! command line, which makes it possible to drive the bot locally.

use async_trait::async_trait;
use lapis_core::{
    error::LapisError,
    message::{GroupMessage, MessageContext, OutgoingMessage, PrivateMessage, SenderRole},
    traits::Channel,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

/// Where console messages appear to come from.
#[derive(Debug, Clone, Copy)]
pub enum ConsoleDestination {
    Group {
        group_id: i64,
        sender_id: i64,
        sender_role: SenderRole,
    },
    Private {
        sender_id: i64,
    },
}

impl ConsoleDestination {
    /// Wrap `text` as a message from this destination.
    pub fn message(&self, message_id: i64, text: String) -> MessageContext {
        match *self {
            Self::Group {
                group_id,
                sender_id,
                sender_role,
            } => MessageContext::Group(GroupMessage {
                message_id,
                group_id,
                sender_id,
                sender_role,
                text,
            }),
            Self::Private { sender_id } => MessageContext::Private(PrivateMessage {
                message_id,
                sender_id,
                text,
            }),
        }
    }
}

pub struct ConsoleChannel {
    destination: ConsoleDestination,
    next_message_id: Arc<AtomicI64>,
}

impl ConsoleChannel {
    pub fn new(destination: ConsoleDestination) -> Self {
        Self {
            destination,
            next_message_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    async fn start(&self) -> Result<mpsc::Receiver<MessageContext>, LapisError> {
        let (tx, rx) = mpsc::channel(64);
        let destination = self.destination;
        let next_id = self.next_message_id.clone();

        info!("Console channel reading from stdin as {destination:?}");

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                let id = next_id.fetch_add(1, Ordering::Relaxed);
                if tx.send(destination.message(id, line)).await.is_err() {
                    break;
                }
            }
            info!("console input closed");
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), LapisError> {
        let reply = message
            .reply_to
            .map(|id| format!(" (reply to #{id})"))
            .unwrap_or_default();
        println!("[{:?}]{reply} {}", message.target, message.text);
        Ok(())
    }

    async fn stop(&self) -> Result<(), LapisError> {
        Ok(())
    }
}
