//! Gating and spawning of individual command invocations.

use super::CommandParser;
use crate::commands::{CommandNode, Execution};
use lapis_core::{error::LapisError, message::MessageContext};
use std::future::Future;
use tracing::{debug, error};

/// Which handler entry point to run.
#[derive(Debug, Clone, Copy)]
pub(super) enum Invocation<'a> {
    Passive(&'a str),
    NoArgs,
    WithArgs(&'a str),
}

/// Run `unit` detached. Its failure or panic is logged and goes no further.
fn spawn_unit<F>(name: String, unit: F)
where
    F: Future<Output = Result<(), LapisError>> + Send + 'static,
{
    tokio::spawn(async move {
        match tokio::spawn(unit).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("command '{name}' failed: {e}"),
            Err(join_err) => error!("command '{name}' panicked: {join_err}"),
        }
    });
}

impl CommandParser {
    /// Apply the node's variant gate and, if it passes, spawn the invocation.
    /// Returns whether a task was started.
    pub(super) async fn start_task(
        &self,
        node: &CommandNode,
        msg: &MessageContext,
        invocation: Invocation<'_>,
    ) -> bool {
        let name = node.name().to_string();
        match (node.execution(), msg) {
            (Execution::Group { handler, gate }, MessageContext::Group(group)) => {
                if !self.settings.get_value(gate, group.group_id).await {
                    debug!("'{name}' disabled in group {} by {gate}", group.group_id);
                    return false;
                }
                let handler = handler.clone();
                let group = group.clone();
                match invocation {
                    Invocation::Passive(text) => {
                        let text = text.to_string();
                        spawn_unit(name, async move {
                            handler.respond_passively(&text, &group).await
                        });
                    }
                    Invocation::NoArgs => {
                        spawn_unit(name, async move { handler.execute(&group).await });
                    }
                    Invocation::WithArgs(args) => {
                        let args = args.to_string();
                        spawn_unit(name, async move {
                            handler.execute_with_args(&args, &group).await
                        });
                    }
                }
            }
            (Execution::Private(handler), MessageContext::Private(private)) => {
                let handler = handler.clone();
                let private = private.clone();
                match invocation {
                    Invocation::Passive(text) => {
                        let text = text.to_string();
                        spawn_unit(name, async move {
                            handler.respond_passively(&text, &private).await
                        });
                    }
                    Invocation::NoArgs => {
                        spawn_unit(name, async move { handler.execute(&private).await });
                    }
                    Invocation::WithArgs(args) => {
                        let args = args.to_string();
                        spawn_unit(name, async move {
                            handler.execute_with_args(&args, &private).await
                        });
                    }
                }
            }
            (Execution::Universal(handler), _) => {
                let handler = handler.clone();
                let msg = msg.clone();
                match invocation {
                    Invocation::Passive(text) => {
                        let text = text.to_string();
                        spawn_unit(name, async move {
                            handler.respond_passively(&text, &msg).await
                        });
                    }
                    Invocation::NoArgs => {
                        spawn_unit(name, async move { handler.execute(&msg).await });
                    }
                    Invocation::WithArgs(args) => {
                        let args = args.to_string();
                        spawn_unit(name, async move {
                            handler.execute_with_args(&args, &msg).await
                        });
                    }
                }
            }
            // Scoped to the other kind of chat.
            _ => return false,
        }
        debug!("started '{}' {invocation:?}", node.name());
        true
    }
}
