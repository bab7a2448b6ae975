//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# Embedded view host configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[buffer]
# default_width = 800          # 1-16384
# default_height = 600         # 1-16384
# background_color = "#ffffff" # #rrggbb or #rrggbbaa
# kind = "browser"             # browser, plain

[dispatch]
# max_tasks_per_drain = 256    # 1-65536
# poll_interval_ms = 16        # 1-1000

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
}
