use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::MenuError;

const ENV_PROMPT: &str = "MENUTREE_PROMPT";
const ENV_BACK_TEXT: &str = "MENUTREE_BACK_TEXT";
const ENV_BACK_SELECTORS: &str = "MENUTREE_BACK_SELECTORS";
const ENV_LOG: &str = "MENUTREE_LOG";

/// Presentation defaults shared by every menu a [`MenuTree`](crate::menu::MenuTree) synthesizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub default_prompt: String,
    pub back_text: String,
    pub back_selectors: Vec<String>,
    pub log_filter: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            default_prompt: "Menu>".into(),
            back_text: "[b]ack".into(),
            back_selectors: vec!["b".into(), "back".into()],
            log_filter: "menutree=info".into(),
        }
    }
}

impl MenuConfig {
    /// Parses a JSON document; missing fields fall back to their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, MenuError> {
        serde_json::from_str(raw)
            .map_err(|err| MenuError::creation(format!("invalid menu config: {err}")))
    }

    /// Defaults overlaid with any `MENUTREE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| env::var(key).ok())
    }

    fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prompt) = lookup(ENV_PROMPT) {
            self.default_prompt = prompt;
        }
        if let Some(text) = lookup(ENV_BACK_TEXT) {
            self.back_text = text;
        }
        if let Some(raw) = lookup(ENV_BACK_SELECTORS) {
            let selectors = split_selectors(&raw);
            if !selectors.is_empty() {
                self.back_selectors = selectors;
            }
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        self
    }
}

fn split_selectors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
