//! Help text, the no-match fallback, and the unexpected-error notice.

use super::{Services, UniversalCommand};
use crate::replies;
use async_trait::async_trait;
use lapis_core::{error::LapisError, message::MessageContext};

pub struct HelpCommand {
    services: Services,
}

impl HelpCommand {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Reply with the help text.
    pub async fn reply_help(&self, msg: &MessageContext) -> Result<(), LapisError> {
        self.services.send(msg.reply(replies::HELP)).await
    }

    /// Tell the sender their message could not be handled.
    pub async fn reply_unexpected_error(&self, msg: &MessageContext) -> Result<(), LapisError> {
        self.services.send(msg.reply(replies::UNEXPECTED_ERROR)).await
    }
}

#[async_trait]
impl UniversalCommand for HelpCommand {
    async fn execute(&self, msg: &MessageContext) -> Result<(), LapisError> {
        self.reply_help(msg).await
    }

    async fn execute_with_args(&self, _args: &str, msg: &MessageContext) -> Result<(), LapisError> {
        self.reply_help(msg).await
    }
}
