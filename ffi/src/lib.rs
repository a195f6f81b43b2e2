//! JSON-string boundary for embedding the engine in the JS host.
//!
//! Every call takes JSON strings in and hands a `{"ok": ..}` envelope back,
//! so the glue code never touches Rust types. The host passes its active
//! system tables with each call; an empty string falls back to the bundled
//! 5e tables.

use engine::{GroupConfig, I18n, Item, RollSelector, SystemConfig, card_buttons, construct_parts};
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;

fn ok(value: Value) -> String {
    json!({"ok": true, "result": value}).to_string()
}

fn err(message: impl std::fmt::Display) -> String {
    json!({"ok": false, "error": message.to_string()}).to_string()
}

fn parse_system(system_json: &str) -> Result<SystemConfig, String> {
    if system_json.trim().is_empty() {
        return Ok(SystemConfig::dnd5e());
    }
    serde_json::from_str(system_json).map_err(|e| format!("invalid_system: {e}"))
}

#[wasm_bindgen]
pub fn version() -> String {
    "rollgroups-ffi 0.1.0".to_string()
}

/// All controls this module contributes to the item's chat card.
#[wasm_bindgen]
pub fn card_buttons_json(item_json: &str, system_json: &str) -> String {
    match card_buttons_internal(item_json, system_json) {
        Ok(value) => ok(value),
        Err(e) => err(e),
    }
}

/// The ordered formula subset a group selector resolves to.
#[wasm_bindgen]
pub fn resolve_group_json(item_json: &str, selector: &str) -> String {
    match resolve_group_internal(item_json, selector) {
        Ok(value) => ok(value),
        Err(e) => err(e),
    }
}

/// The normalized form of a flag payload, as the editor would persist it.
#[wasm_bindgen]
pub fn normalize_config_json(config_json: &str) -> String {
    match normalize_config_internal(config_json) {
        Ok(value) => ok(value),
        Err(e) => err(e),
    }
}

// Internal twins so tests and examples skip the envelope.

pub fn card_buttons_internal(item_json: &str, system_json: &str) -> Result<Value, String> {
    let item: Item = serde_json::from_str(item_json).map_err(|e| format!("invalid_item: {e}"))?;
    let system = parse_system(system_json)?;
    let buttons = card_buttons(&item, &system, &I18n::en());
    serde_json::to_value(&buttons).map_err(|e| e.to_string())
}

pub fn resolve_group_internal(item_json: &str, selector: &str) -> Result<Value, String> {
    let item: Item = serde_json::from_str(item_json).map_err(|e| format!("invalid_item: {e}"))?;
    let selector = RollSelector::parse(selector).ok_or("invalid_selector")?;
    let config = item.group_config();
    let parts = construct_parts(&item, &config, &selector).map_err(|e| e.to_string())?;
    serde_json::to_value(&parts).map_err(|e| e.to_string())
}

pub fn normalize_config_internal(config_json: &str) -> Result<Value, String> {
    let payload: Value =
        serde_json::from_str(config_json).map_err(|e| format!("invalid_config: {e}"))?;
    let normalized = GroupConfig::decode(&payload).normalized(&I18n::en());
    serde_json::to_value(&normalized).map_err(|e| e.to_string())
}
