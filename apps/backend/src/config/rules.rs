use std::env;
use std::str::FromStr;

use crate::domain::cards_types::Rank;
use crate::domain::state::TableSettings;
use crate::errors::domain::{DomainError, SystemKind};

pub const STARTING_LEVEL_VAR: &str = "UPGRADE_STARTING_LEVEL";
pub const AUTO_DEAL_VAR: &str = "UPGRADE_AUTO_DEAL";
pub const ROOM_MAILBOX_VAR: &str = "UPGRADE_ROOM_MAILBOX";

const DEFAULT_MAILBOX: usize = 128;

/// Table rules and room sizing read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Level both teams start from.
    pub starting_level: Rank,
    /// Deal as soon as all four seats are ready.
    pub auto_deal: bool,
    /// Capacity of each room's mailbox.
    pub room_mailbox: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_level: Rank::Two,
            auto_deal: true,
            room_mailbox: DEFAULT_MAILBOX,
        }
    }
}

impl RulesConfig {
    /// Load from the environment, falling back to defaults for unset vars.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        let room_mailbox = parsed_var(ROOM_MAILBOX_VAR, defaults.room_mailbox, |s| {
            s.parse::<usize>().ok().filter(|n| *n > 0)
        })?;
        Ok(Self {
            starting_level: parsed_var(STARTING_LEVEL_VAR, defaults.starting_level, |s| {
                Rank::from_str(s).ok()
            })?,
            auto_deal: parsed_var(AUTO_DEAL_VAR, defaults.auto_deal, parse_bool)?,
            room_mailbox,
        })
    }

    pub fn table_settings(&self) -> TableSettings {
        TableSettings {
            starting_level: self.starting_level,
            auto_deal: self.auto_deal,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read `name`, returning `default` when unset or blank.
fn parsed_var<T>(
    name: &str,
    default: T,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, DomainError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    parse(raw).ok_or_else(|| {
        DomainError::system(
            SystemKind::Config,
            format!("environment variable '{name}' has invalid value '{raw}'"),
        )
    })
}
