//! Static registry of declared settings and their defaults.
//!
//! The catalog only resolves defaults. Per-destination overrides live in the
//! settings store.

use crate::identifier::SettingsIdentifierPair;

/// One toggle under a command's prime identifier.
#[derive(Debug)]
pub struct SettingsItem {
    pub identifier: &'static str,
    pub display_name: &'static str,
    pub default_value: bool,
}

/// All toggles owned by one command (the prime identifier).
#[derive(Debug)]
pub struct CommandSettings {
    pub identifier: &'static str,
    pub display_name: &'static str,
    pub items: &'static [SettingsItem],
}

/// A display grouping of command settings.
#[derive(Debug)]
pub struct SettingsCategory {
    pub display_name: &'static str,
    pub items: &'static [CommandSettings],
}

/// Built-in settings catalog.
pub static CATALOG: &[SettingsCategory] = &[SettingsCategory {
    display_name: "通用",
    items: &[
        CommandSettings {
            identifier: "litecommand",
            display_name: "轻量指令",
            items: &[SettingsItem {
                identifier: "1",
                display_name: "无需前缀直接触发指令",
                default_value: true,
            }],
        },
        CommandSettings {
            identifier: "compress",
            display_name: "图片压缩",
            items: &[SettingsItem {
                identifier: "1",
                display_name: "压缩发送的图片",
                default_value: true,
            }],
        },
    ],
}];

/// Find the declared default for `pair` in `catalog`.
///
/// Scans every category; when a pair is declared more than once the last
/// declaration wins.
pub fn default_for(catalog: &[SettingsCategory], pair: &SettingsIdentifierPair) -> Option<bool> {
    let mut found = None;
    for category in catalog {
        for command in category.items {
            if command.identifier != pair.prime_identifier {
                continue;
            }
            for item in command.items {
                if item.identifier == pair.identifier {
                    found = Some(item.default_value);
                }
            }
        }
    }
    found
}

/// Every declared pair in catalog order, with its display names and default.
pub fn entries(
    catalog: &[SettingsCategory],
) -> impl Iterator<Item = (SettingsIdentifierPair, &'static CommandSettings, &'static SettingsItem)> + '_
{
    catalog.iter().flat_map(|category| {
        category.items.iter().flat_map(|command| {
            command.items.iter().map(move |item| {
                (
                    SettingsIdentifierPair::new(command.identifier, item.identifier),
                    command,
                    item,
                )
            })
        })
    })
}
