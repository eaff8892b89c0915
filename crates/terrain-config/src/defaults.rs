use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of columns per indentation level.
pub const DEFAULT_INDENT_WIDTH: u16 = 2;

/// Default checker command line: Terraform's formatter reading stdin.
pub const DEFAULT_CHECKER_COMMAND: &str = "terraform fmt -no-color -";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default indentation width.
#[must_use]
pub const fn default_indent_width() -> u16 {
    DEFAULT_INDENT_WIDTH
}

/// Owned default checker command line.
#[must_use]
pub fn default_checker_command_string() -> String {
    DEFAULT_CHECKER_COMMAND.to_owned()
}
