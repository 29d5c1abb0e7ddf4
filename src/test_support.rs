//! Fixtures shared by the unit tests.

use crate::commands::{
    build_commands, GroupCommand, HelpCommand, PrivateCommand, Services, UniversalCommand,
};
use crate::dispatch::CommandParser;
use async_trait::async_trait;
use lapis_core::{
    error::LapisError,
    message::{GroupMessage, MessageContext, OutgoingMessage, PrivateMessage, SenderRole},
    traits::{Channel, SettingsStore},
};
use lapis_settings::SettingsGate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

pub const GROUP_ID: i64 = 1000;
pub const SENDER_ID: i64 = 42;
pub const ADMIN_ID: i64 = 7;

/// In-memory settings store that records every write.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<(String, i64), bool>>,
    pub writes: Mutex<Vec<(String, i64, bool)>>,
}

impl MemoryStore {
    pub fn writes(&self) -> Vec<(String, i64, bool)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str, id: i64, default: bool) -> Result<bool, LapisError> {
        let values = self.values.lock().unwrap();
        Ok(values.get(&(key.to_string(), id)).copied().unwrap_or(default))
    }

    async fn set(&self, key: &str, id: i64, value: bool) -> Result<(), LapisError> {
        self.values
            .lock()
            .unwrap()
            .insert((key.to_string(), id), value);
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), id, value));
        Ok(())
    }
}

/// Channel that forwards every outgoing message to the test. Sends whose
/// text equals `fail_on` are rejected.
pub struct RecordingChannel {
    tx: mpsc::UnboundedSender<OutgoingMessage>,
    fail_on: Option<&'static str>,
}

impl RecordingChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutgoingMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail_on: None }, rx)
    }

    pub fn failing_on(text: &'static str) -> (Self, mpsc::UnboundedReceiver<OutgoingMessage>) {
        let (mut channel, rx) = Self::new();
        channel.fail_on = Some(text);
        (channel, rx)
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn start(&self) -> Result<mpsc::Receiver<MessageContext>, LapisError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), LapisError> {
        if self.fail_on == Some(message.text.as_str()) {
            return Err(LapisError::Channel("send rejected".into()));
        }
        let _ = self.tx.send(message);
        Ok(())
    }

    async fn stop(&self) -> Result<(), LapisError> {
        Ok(())
    }
}

/// Which entry point a recorded handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Passive(String, String),
    NoArgs(String),
    WithArgs(String, String),
}

impl Call {
    pub fn is_passive(&self) -> bool {
        matches!(self, Call::Passive(..))
    }
}

/// Handler that reports each invocation, tagged with its node name.
pub struct Recorder {
    name: String,
    tx: mpsc::UnboundedSender<Call>,
    fail: bool,
}

impl Recorder {
    pub fn new(name: &str, tx: &mpsc::UnboundedSender<Call>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            tx: tx.clone(),
            fail: false,
        })
    }

    /// A recorder whose command entry points report and then fail.
    pub fn failing(name: &str, tx: &mpsc::UnboundedSender<Call>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            tx: tx.clone(),
            fail: true,
        })
    }

    fn record(&self, call: Call) -> Result<(), LapisError> {
        let _ = self.tx.send(call);
        if self.fail {
            return Err(LapisError::Command(format!("{} failed", self.name)));
        }
        Ok(())
    }
}

#[async_trait]
impl GroupCommand for Recorder {
    async fn respond_passively(&self, text: &str, _msg: &GroupMessage) -> Result<(), LapisError> {
        self.record(Call::Passive(self.name.clone(), text.to_string()))
    }

    async fn execute(&self, _msg: &GroupMessage) -> Result<(), LapisError> {
        self.record(Call::NoArgs(self.name.clone()))
    }

    async fn execute_with_args(&self, args: &str, _msg: &GroupMessage) -> Result<(), LapisError> {
        self.record(Call::WithArgs(self.name.clone(), args.to_string()))
    }
}

#[async_trait]
impl PrivateCommand for Recorder {
    async fn respond_passively(
        &self,
        text: &str,
        _msg: &PrivateMessage,
    ) -> Result<(), LapisError> {
        self.record(Call::Passive(self.name.clone(), text.to_string()))
    }

    async fn execute(&self, _msg: &PrivateMessage) -> Result<(), LapisError> {
        self.record(Call::NoArgs(self.name.clone()))
    }

    async fn execute_with_args(
        &self,
        args: &str,
        _msg: &PrivateMessage,
    ) -> Result<(), LapisError> {
        self.record(Call::WithArgs(self.name.clone(), args.to_string()))
    }
}

#[async_trait]
impl UniversalCommand for Recorder {
    async fn respond_passively(
        &self,
        text: &str,
        _msg: &MessageContext,
    ) -> Result<(), LapisError> {
        self.record(Call::Passive(self.name.clone(), text.to_string()))
    }

    async fn execute(&self, _msg: &MessageContext) -> Result<(), LapisError> {
        self.record(Call::NoArgs(self.name.clone()))
    }

    async fn execute_with_args(
        &self,
        args: &str,
        _msg: &MessageContext,
    ) -> Result<(), LapisError> {
        self.record(Call::WithArgs(self.name.clone(), args.to_string()))
    }
}

/// Collect everything received within `window`.
pub async fn collect<T>(rx: &mut mpsc::UnboundedReceiver<T>, window: Duration) -> Vec<T> {
    let mut out = Vec::new();
    let deadline = tokio::time::Instant::now() + window;
    while let Ok(Some(item)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        out.push(item);
    }
    out
}

/// Collect recorded non-passive calls within a short window.
pub async fn commands(rx: &mut mpsc::UnboundedReceiver<Call>) -> Vec<Call> {
    collect(rx, Duration::from_millis(300))
        .await
        .into_iter()
        .filter(|c| !c.is_passive())
        .collect()
}

pub fn group_message(text: &str, role: SenderRole) -> MessageContext {
    group_message_in(GROUP_ID, text, role)
}

pub fn group_message_in(group_id: i64, text: &str, role: SenderRole) -> MessageContext {
    MessageContext::Group(GroupMessage {
        message_id: 1,
        group_id,
        sender_id: SENDER_ID,
        sender_role: role,
        text: text.to_string(),
    })
}

pub fn private_message(text: &str) -> MessageContext {
    MessageContext::Private(PrivateMessage {
        message_id: 2,
        sender_id: SENDER_ID,
        text: text.to_string(),
    })
}

pub fn default_aliases() -> Vec<String> {
    ["lps", "六盘水", "l", "拉", "老婆说", "Lapis", "lapis", "lsp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Everything a parser test needs to observe.
pub struct Harness {
    pub parser: Arc<CommandParser>,
    pub store: Arc<MemoryStore>,
    pub services: Services,
    pub outbox: mpsc::UnboundedReceiver<OutgoingMessage>,
}

fn services_with(channel: RecordingChannel, store: Arc<MemoryStore>) -> Services {
    Services {
        channel: Arc::new(channel),
        settings: SettingsGate::new(store),
        administrator_id: ADMIN_ID,
    }
}

/// Services over a fresh memory store and recording channel.
pub fn test_services() -> (
    Services,
    Arc<MemoryStore>,
    mpsc::UnboundedReceiver<OutgoingMessage>,
) {
    let (channel, replies) = RecordingChannel::new();
    let store = Arc::new(MemoryStore::default());
    (services_with(channel, store.clone()), store, replies)
}

/// Parser over `nodes` built with fresh services.
pub fn harness<F>(nodes: F) -> Harness
where
    F: FnOnce(&Services) -> Vec<crate::commands::CommandNode>,
{
    let (channel, replies) = RecordingChannel::new();
    harness_on(channel, replies, nodes)
}

pub fn harness_on<F>(
    channel: RecordingChannel,
    replies: mpsc::UnboundedReceiver<OutgoingMessage>,
    nodes: F,
) -> Harness
where
    F: FnOnce(&Services) -> Vec<crate::commands::CommandNode>,
{
    let store = Arc::new(MemoryStore::default());
    let services = services_with(channel, store.clone());
    let help = Arc::new(HelpCommand::new(services.clone()));
    let parser = CommandParser::new(
        nodes(&services),
        services.settings.clone(),
        &default_aliases(),
        help,
    )
    .unwrap();
    Harness {
        parser: Arc::new(parser),
        store,
        services,
        outbox: replies,
    }
}

/// Parser over the built-in command tree.
pub fn builtin_harness() -> Harness {
    harness(|services| {
        build_commands(services, Arc::new(HelpCommand::new(services.clone()))).unwrap()
    })
}
