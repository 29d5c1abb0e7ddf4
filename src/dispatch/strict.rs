//! Strict dispatch: anchored, depth-first, first match wins.

use super::task::Invocation;
use super::{BoxFuture, CommandParser};
use crate::commands::CommandNode;
use lapis_core::message::MessageContext;
use tracing::info;

impl CommandParser {
    /// Resolve `text` (address token already stripped) against `nodes`.
    ///
    /// A child that matches pre-empts its parent's own handler. Once a node's
    /// head matches, its later siblings are never tried; the result is then
    /// whether a command was actually started.
    pub(super) fn dispatch_strict<'a>(
        &'a self,
        msg: &'a MessageContext,
        text: &'a str,
        nodes: &'a [CommandNode],
    ) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            for node in nodes {
                let children = node.children();

                let Some(head) = node.strict_head() else {
                    // Pure grouping node.
                    if !children.is_empty() && self.dispatch_strict(msg, text, children).await {
                        return true;
                    }
                    continue;
                };

                if let Some(args) = head.strip_with_args(text) {
                    if !children.is_empty() && self.dispatch_strict(msg, args, children).await {
                        return true;
                    }
                    info!("strict: '{}' ({}) with args {args:?}", node.name(), head.as_str());
                    return self.start_task(node, msg, Invocation::WithArgs(args)).await;
                }

                if head.matches_whole(text) {
                    // The head consumed everything; children see the same text.
                    if !children.is_empty() && self.dispatch_strict(msg, text, children).await {
                        return true;
                    }
                    info!("strict: '{}' ({})", node.name(), head.as_str());
                    return self.start_task(node, msg, Invocation::NoArgs).await;
                }
            }
            false
        })
    }
}
