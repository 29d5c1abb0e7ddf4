//! Direct dispatch: command heads recognised without a bot-address token.

use super::task::Invocation;
use super::{BoxFuture, CommandParser};
use crate::commands::CommandNode;
use lapis_core::message::MessageContext;
use tracing::info;

impl CommandParser {
    /// Try every node's direct head, children before the node itself.
    ///
    /// The first head that matches ends the whole traversal, whether or not
    /// its variant gate then lets the command run. Returns whether a head
    /// matched.
    pub(super) fn dispatch_direct<'a>(
        &'a self,
        msg: &'a MessageContext,
        text: &'a str,
        nodes: &'a [CommandNode],
    ) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            for node in nodes {
                if !node.children().is_empty()
                    && self.dispatch_direct(msg, text, node.children()).await
                {
                    return true;
                }

                let Some(head) = node.direct_head() else {
                    continue;
                };

                if let Some(args) = head.strip_with_args(text) {
                    info!("direct: '{}' with args {args:?}", node.name());
                    self.start_task(node, msg, Invocation::WithArgs(args)).await;
                    return true;
                }

                if head.matches_whole(text) {
                    info!("direct: '{}'", node.name());
                    self.start_task(node, msg, Invocation::NoArgs).await;
                    return true;
                }
            }
            false
        })
    }
}
