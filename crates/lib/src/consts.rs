pub const APP_NAME: &str = "autobus";

/// Build file looked up in the working directory when none is given.
pub const DEFAULT_BUILD_FILE: &str = "autobus.toml";
