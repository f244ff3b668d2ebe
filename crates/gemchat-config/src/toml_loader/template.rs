//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# gemchat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# model = "gemini-2.5-flash"
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# api_key = ""                   # inline key; prefer the environment variable below
# api_key_env = "GEMINI_API_KEY"
# temperature = 0.7              # 0.0-2.0
# top_p = 0.95                   # 0.0-1.0
# top_k = 40                     # 1-100
# max_output_tokens = 2048       # 1-65536
# safety_threshold = "BLOCK_MEDIUM_AND_ABOVE"   # BLOCK_NONE | BLOCK_ONLY_HIGH | BLOCK_MEDIUM_AND_ABOVE | BLOCK_LOW_AND_ABOVE
# connect_timeout_secs = 10      # 1-120
# request_timeout_secs = 120     # 1-600

[retry]
# max_attempts = 3               # 1-10, includes the first request
# base_delay_ms = 1000           # 0-60000, doubles after each failed attempt

[storage]
# data_dir = "/path/to/dir"      # defaults to the platform data directory
# state_key = "chatAppState"
# export_dir = "/path/to/exports"

[logging]
# level = "info"                 # debug | info | warn | error
"##
}
