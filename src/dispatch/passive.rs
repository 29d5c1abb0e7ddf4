//! Passive responders: every node sees every message.

use super::task::Invocation;
use super::{BoxFuture, CommandParser};
use crate::commands::CommandNode;
use lapis_core::message::MessageContext;

impl CommandParser {
    /// Offer `text` to every node in the tree, depth-first, without stopping.
    pub(super) fn respond_passively<'a>(
        &'a self,
        msg: &'a MessageContext,
        text: &'a str,
        nodes: &'a [CommandNode],
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            for node in nodes {
                self.start_task(node, msg, Invocation::Passive(text)).await;

                if !node.children().is_empty() {
                    self.respond_passively(msg, text, node.children()).await;
                }
            }
        })
    }
}
