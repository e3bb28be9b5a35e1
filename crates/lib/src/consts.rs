/// Application name, used for the store directory.
pub const APP_NAME: &str = "subpack";

/// Overrides the store root.
pub const ROOT_ENV: &str = "SUBPACK_ROOT";

/// Overrides the shell profile that sources the env file.
pub const PROFILE_ENV: &str = "SUBPACK_PROFILE";

/// Name of the generated shell snippet inside the store root.
pub const ENV_FILE_NAME: &str = "env";

/// Name of the scratch directory for in-flight downloads.
pub const TMP_DIR_NAME: &str = "tmp";
