//! Per-section validators: server, activity, chatter, presence.

use crate::schema::ChatterboxConfig;

use super::helpers::validate_range;

/// Validate server constraints.
pub(crate) fn validate_server(errors: &mut Vec<String>, config: &ChatterboxConfig) {
    let url = config.server.base_url.trim();
    if url.is_empty() {
        errors.push("server.base_url must not be empty".into());
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "server.base_url = {url} must start with http:// or https://"
        ));
    }
    validate_range(
        errors,
        "server.request_timeout_secs",
        config.server.request_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "server.connect_timeout_secs",
        config.server.connect_timeout_secs,
        1,
        60,
    );
}

/// Validate activity constraints.
pub(crate) fn validate_activity(errors: &mut Vec<String>, config: &ChatterboxConfig) {
    validate_range(
        errors,
        "activity.sleep_after_minutes",
        config.activity.sleep_after_minutes,
        1,
        1440,
    );
    validate_range(
        errors,
        "activity.recent_window_secs",
        config.activity.recent_window_secs,
        5,
        3600,
    );
    validate_range(
        errors,
        "activity.reconcile_interval_secs",
        config.activity.reconcile_interval_secs,
        1,
        60,
    );
}

/// Validate chatter constraints.
pub(crate) fn validate_chatter(errors: &mut Vec<String>, config: &ChatterboxConfig) {
    let chatter = &config.chatter;
    validate_range(
        errors,
        "chatter.active_interval_secs",
        chatter.active_interval_secs,
        1,
        3600,
    );
    validate_range(
        errors,
        "chatter.idle_interval_secs",
        chatter.idle_interval_secs,
        1,
        7200,
    );
    if chatter.idle_interval_secs < chatter.active_interval_secs {
        errors.push(format!(
            "chatter.idle_interval_secs = {} is shorter than chatter.active_interval_secs = {}",
            chatter.idle_interval_secs, chatter.active_interval_secs
        ));
    }
    validate_range(
        errors,
        "chatter.snapshot_limit",
        chatter.snapshot_limit,
        1,
        200,
    );
}

/// Validate presence constraints.
pub(crate) fn validate_presence(errors: &mut Vec<String>, config: &ChatterboxConfig) {
    validate_range(
        errors,
        "presence.interval_secs",
        config.presence.interval_secs,
        1,
        7200,
    );
}
