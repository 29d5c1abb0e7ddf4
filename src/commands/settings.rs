//! Group settings: show the current toggles, or change one (admins only).

use super::{GroupCommand, Services};
use crate::replies;
use async_trait::async_trait;
use lapis_core::{error::LapisError, message::GroupMessage};
use lapis_settings::{catalog, SettingsIdentifierPair};
use tracing::info;

pub struct SettingsCommand {
    services: Services,
}

/// A parsed `prime.identifier true|false` argument.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct SettingsChange {
    pub pair: SettingsIdentifierPair,
    pub value: bool,
}

/// Parse the argument text of a settings change.
pub(super) fn parse_change(args: &str) -> Option<SettingsChange> {
    let mut parts = args.split_whitespace();
    let pair = parts.next()?.parse::<SettingsIdentifierPair>().ok()?;
    let value = match parts.next()? {
        "true" => true,
        "false" => false,
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(SettingsChange { pair, value })
}

impl SettingsCommand {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Toggle that enables this command in a group.
    pub fn activation_toggle() -> SettingsIdentifierPair {
        SettingsIdentifierPair::new("settings", "1")
    }

    fn is_authorized(&self, msg: &GroupMessage) -> bool {
        msg.sender_role.is_privileged() || msg.sender_id == self.services.administrator_id
    }

    /// Text rendering of every catalog toggle for `group_id`.
    async fn render(&self, group_id: i64) -> String {
        let gate = &self.services.settings;
        let mut out = format!("群 {group_id} 的设置：\n");
        for (pair, command, item) in catalog::entries(gate.catalog()) {
            let mark = if gate.get_value(&pair, group_id).await {
                "开"
            } else {
                "关"
            };
            out.push_str(&format!(
                "\n{pair} {}（{}）: {mark}",
                command.display_name, item.display_name
            ));
        }
        out
    }
}

#[async_trait]
impl GroupCommand for SettingsCommand {
    async fn execute(&self, msg: &GroupMessage) -> Result<(), LapisError> {
        let text = self.render(msg.group_id).await;
        self.services.send(msg.reply(text)).await
    }

    async fn execute_with_args(&self, args: &str, msg: &GroupMessage) -> Result<(), LapisError> {
        if !self.is_authorized(msg) {
            return self.services.send(msg.reply(replies::UNAUTHORIZED)).await;
        }

        let Some(change) = parse_change(args) else {
            return self
                .services
                .send(msg.reply(replies::MALFORMED_ARGUMENT))
                .await;
        };

        // Turning this command off from chat would leave no chat path back.
        if change.pair == Self::activation_toggle() && !change.value {
            return self
                .services
                .send(msg.reply(replies::SETTINGS_SELF_DISABLE))
                .await;
        }

        self.services
            .settings
            .store()
            .set(&change.pair.to_string(), msg.group_id, change.value)
            .await?;

        info!(
            "settings: {} set {} = {} in group {}",
            msg.sender_id, change.pair, change.value, msg.group_id
        );

        self.services.send(msg.reply(replies::SETTINGS_CHANGED)).await
    }
}

