//! Command parser: resolves each inbound message against the command tree.
//!
//! Per message, in order:
//! 1. passive responders over the whole tree,
//! 2. direct (address-less) dispatch, when enabled for the destination,
//! 3. strict dispatch after a bot-address token, with help as the fallback.
//!
//! Every surviving command invocation is spawned as its own task; the
//! parser never waits for one.

mod direct;
mod passive;
mod strict;
mod task;


use crate::commands::{CommandNode, HelpCommand};
use lapis_core::{error::LapisError, message::MessageContext};
use lapis_settings::{SettingsGate, SettingsIdentifierPair};
use regex::Regex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, error};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Per-group toggle for direct dispatch.
pub fn lite_command_toggle() -> SettingsIdentifierPair {
    SettingsIdentifierPair::new("litecommand", "1")
}

/// Build the bot-address matcher: any alias followed by one whitespace char.
pub fn address_regex(aliases: &[String]) -> Result<Regex, LapisError> {
    if aliases.is_empty() {
        return Err(LapisError::Config("no bot-address aliases configured".into()));
    }
    let alternation = aliases
        .iter()
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(?:{alternation})\s"))
        .map_err(|e| LapisError::Config(format!("invalid alias set: {e}")))
}

/// Entry point for inbound messages.
pub struct CommandParser {
    commands: Arc<[CommandNode]>,
    settings: SettingsGate,
    address: Regex,
    help: Arc<HelpCommand>,
}

impl CommandParser {
    pub fn new(
        commands: Vec<CommandNode>,
        settings: SettingsGate,
        aliases: &[String],
        help: Arc<HelpCommand>,
    ) -> Result<Self, LapisError> {
        Ok(Self {
            commands: commands.into(),
            settings,
            address: address_regex(aliases)?,
            help,
        })
    }

    pub fn commands(&self) -> &[CommandNode] {
        &self.commands
    }

    /// Strip one leading bot-address token and the whitespace after it.
    pub fn strip_address<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.address.find(text).map(|m| &text[m.end()..])
    }

    /// Handle one inbound message. Failures (including panics) while parsing
    /// are logged and answered with the unexpected-error notice.
    pub async fn on_message(self: Arc<Self>, msg: MessageContext) {
        let parser = self.clone();
        let task_msg = msg.clone();
        let outcome = tokio::spawn(async move { parser.parse(&task_msg).await }).await;

        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(join_err) => format!("parser task panicked: {join_err}"),
        };
        error!(
            "unexpected error handling message {}: {failure}",
            msg.message_id()
        );
        if let Err(e) = self.help.reply_unexpected_error(&msg).await {
            error!("failed to send error notice: {e}");
        }
    }

    async fn parse(&self, msg: &MessageContext) -> Result<(), LapisError> {
        let text = msg.text();

        self.respond_passively(msg, text, &self.commands).await;

        let direct_enabled = match msg {
            MessageContext::Group(group) => {
                self.settings
                    .get_value(&lite_command_toggle(), group.group_id)
                    .await
            }
            MessageContext::Private(_) => true,
        };
        if direct_enabled {
            self.dispatch_direct(msg, text, &self.commands).await;
        }

        let Some(rest) = self.strip_address(text) else {
            return Ok(());
        };

        if !self.dispatch_strict(msg, rest, &self.commands).await {
            debug!("no command matched {rest:?}, sending help");
            self.help.reply_help(msg).await?;
        }
        Ok(())
    }
}
