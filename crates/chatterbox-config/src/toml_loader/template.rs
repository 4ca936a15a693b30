//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Chatterbox Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
base_url = "https://everything2.com"
# request_timeout_secs = 25   # 1-120
# connect_timeout_secs = 10   # 1-60

[activity]
# sleep_after_minutes = 10      # 1-1440, polling stops after this much idle time
# recent_window_secs = 60       # 5-3600, chat switches to the idle interval after this
# reconcile_interval_secs = 5   # 1-60
# store_path = "/path/to/tabs.json"

[chatter]
# active_interval_secs = 45   # 1-3600
# idle_interval_secs = 120    # 1-7200, not shorter than the active interval
# snapshot_limit = 30         # 1-200
# room = 0
# refresh_on_focus = true

[presence]
# interval_secs = 120         # 1-7200
# refresh_on_focus = true

[logging]
# level = "info"              # debug, info, warn, error
"##
    .to_string()
}
