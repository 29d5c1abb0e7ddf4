//! Command tree: nodes, head patterns, execution variants, and registration.
//!
//! The tree is assembled once at startup by [`build_commands`] and is
//! read-only afterwards, so it can be shared across message tasks without
//! locking.

mod help;
mod settings;


pub use help::HelpCommand;
pub use settings::SettingsCommand;

use async_trait::async_trait;
use lapis_core::{
    error::LapisError,
    message::{GroupMessage, MessageContext, OutgoingMessage, PrivateMessage},
    traits::Channel,
};
use lapis_settings::{SettingsGate, SettingsIdentifierPair};
use regex::Regex;
use std::sync::Arc;

/// Shared services handed to built-in commands.
#[derive(Clone)]
pub struct Services {
    pub channel: Arc<dyn Channel>,
    pub settings: SettingsGate,
    /// User id always treated as authorized for admin-gated sub-commands.
    pub administrator_id: i64,
}

impl Services {
    pub async fn send(&self, message: OutgoingMessage) -> Result<(), LapisError> {
        self.channel.send(message).await
    }
}

/// A command that only runs in group chats, behind an activation toggle.
#[async_trait]
pub trait GroupCommand: Send + Sync {
    /// React to any group message without consuming it.
    async fn respond_passively(&self, _text: &str, _msg: &GroupMessage) -> Result<(), LapisError> {
        Ok(())
    }

    async fn execute(&self, _msg: &GroupMessage) -> Result<(), LapisError> {
        Ok(())
    }

    async fn execute_with_args(&self, _args: &str, _msg: &GroupMessage) -> Result<(), LapisError> {
        Ok(())
    }
}

/// A command that only runs in private chats.
#[async_trait]
pub trait PrivateCommand: Send + Sync {
    async fn respond_passively(
        &self,
        _text: &str,
        _msg: &PrivateMessage,
    ) -> Result<(), LapisError> {
        Ok(())
    }

    async fn execute(&self, _msg: &PrivateMessage) -> Result<(), LapisError> {
        Ok(())
    }

    async fn execute_with_args(
        &self,
        _args: &str,
        _msg: &PrivateMessage,
    ) -> Result<(), LapisError> {
        Ok(())
    }
}

/// A command that runs anywhere.
#[async_trait]
pub trait UniversalCommand: Send + Sync {
    async fn respond_passively(
        &self,
        _text: &str,
        _msg: &MessageContext,
    ) -> Result<(), LapisError> {
        Ok(())
    }

    async fn execute(&self, _msg: &MessageContext) -> Result<(), LapisError> {
        Ok(())
    }

    async fn execute_with_args(
        &self,
        _args: &str,
        _msg: &MessageContext,
    ) -> Result<(), LapisError> {
        Ok(())
    }
}

/// Handler for pure grouping nodes; never does anything.
pub struct Inert;

impl UniversalCommand for Inert {}

/// Which destinations a node runs in, and its handler.
#[derive(Clone)]
pub enum Execution {
    /// Group chats only, when `gate` is enabled for the group.
    Group {
        handler: Arc<dyn GroupCommand>,
        gate: SettingsIdentifierPair,
    },
    Private(Arc<dyn PrivateCommand>),
    Universal(Arc<dyn UniversalCommand>),
}

/// A head pattern compiled into its two anchored shapes.
#[derive(Debug, Clone)]
pub struct HeadPattern {
    source: String,
    /// `^(head)\s`
    with_args: Regex,
    /// `^(head)$`
    whole: Regex,
}

impl HeadPattern {
    pub fn new(pattern: &str) -> Result<Self, LapisError> {
        let compile = |re: String| {
            Regex::new(&re).map_err(|e| LapisError::Pattern(format!("{pattern}: {e}")))
        };
        Ok(Self {
            source: pattern.to_string(),
            with_args: compile(format!(r"^(?:{pattern})\s"))?,
            whole: compile(format!("^(?:{pattern})$"))?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// If `text` starts with the head followed by a whitespace character,
    /// return what follows that character.
    pub fn strip_with_args<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.with_args.find(text).map(|m| &text[m.end()..])
    }

    /// Whether the head matches all of `text`.
    pub fn matches_whole(&self, text: &str) -> bool {
        self.whole.is_match(text)
    }
}

/// One entry in the command tree.
#[derive(Clone)]
pub struct CommandNode {
    name: String,
    strict_head: Option<HeadPattern>,
    direct_head: Option<HeadPattern>,
    children: Vec<CommandNode>,
    execution: Execution,
}

impl CommandNode {
    pub fn new(name: impl Into<String>, execution: Execution) -> Self {
        Self {
            name: name.into(),
            strict_head: None,
            direct_head: None,
            children: Vec::new(),
            execution,
        }
    }

    pub fn group(
        name: impl Into<String>,
        handler: Arc<dyn GroupCommand>,
        gate: SettingsIdentifierPair,
    ) -> Self {
        Self::new(name, Execution::Group { handler, gate })
    }

    pub fn private(name: impl Into<String>, handler: Arc<dyn PrivateCommand>) -> Self {
        Self::new(name, Execution::Private(handler))
    }

    pub fn universal(name: impl Into<String>, handler: Arc<dyn UniversalCommand>) -> Self {
        Self::new(name, Execution::Universal(handler))
    }

    /// A node that only aggregates children.
    pub fn grouping(name: impl Into<String>) -> Self {
        Self::universal(name, Arc::new(Inert))
    }

    /// Set the head matched after the bot-address token.
    pub fn with_strict_head(mut self, pattern: &str) -> Result<Self, LapisError> {
        self.strict_head = Some(HeadPattern::new(pattern)?);
        Ok(self)
    }

    /// Set the head matched without an address token.
    pub fn with_direct_head(mut self, pattern: &str) -> Result<Self, LapisError> {
        self.direct_head = Some(HeadPattern::new(pattern)?);
        Ok(self)
    }

    /// Append a sub-command. Earlier children win.
    pub fn with_child(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strict_head(&self) -> Option<&HeadPattern> {
        self.strict_head.as_ref()
    }

    pub fn direct_head(&self) -> Option<&HeadPattern> {
        self.direct_head.as_ref()
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn execution(&self) -> &Execution {
        &self.execution
    }
}

/// Register the built-in command tree.
pub fn build_commands(
    services: &Services,
    help: Arc<HelpCommand>,
) -> Result<Vec<CommandNode>, LapisError> {
    Ok(vec![
        CommandNode::universal("help", help).with_strict_head("help|帮助")?,
        CommandNode::group(
            "settings",
            Arc::new(SettingsCommand::new(services.clone())),
            SettingsCommand::activation_toggle(),
        )
        .with_strict_head("settings")?
        .with_direct_head("settings")?,
    ])
}
