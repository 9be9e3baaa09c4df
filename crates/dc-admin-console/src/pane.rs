//! Response pane: pure projection of the runner state into display text.
//!
//! Exactly one facet shows at a time: idle hint, loading badge, error
//! message, or pretty-printed JSON result.

use serde_json::Value;

use dc_admin_state::RunnerState;

/// Badge shown in the pane title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneBadge {
    Idle,
    Loading,
    Error,
    Success,
}

impl PaneBadge {
    pub fn label(&self) -> &'static str {
        match self {
            PaneBadge::Idle => "idle",
            PaneBadge::Loading => "in progress",
            PaneBadge::Error => "failed",
            PaneBadge::Success => "success",
        }
    }
}

pub fn badge(state: &RunnerState) -> PaneBadge {
    if state.loading {
        PaneBadge::Loading
    } else if !state.error.is_empty() {
        PaneBadge::Error
    } else if state.result.is_some() {
        PaneBadge::Success
    } else {
        PaneBadge::Idle
    }
}

/// Body lines for the response pane.
pub fn body_lines(state: &RunnerState) -> Vec<String> {
    if state.loading {
        return vec![format!("{} ...", state.label)];
    }
    if !state.error.is_empty() {
        return vec![state.error.clone()];
    }
    match &state.result {
        Some(value) => pretty_lines(value),
        None => vec!["No request sent yet.".to_string()],
    }
}

/// 2-space indented JSON, split into lines for the widget.
pub fn pretty_lines(value: &Value) -> Vec<String> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(_) => vec![value.to_string()],
    }
}

/// Human-readable byte size used by the media listings.
pub fn format_bytes(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{size} B")
    }
}
