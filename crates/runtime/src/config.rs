pub const PROGRAM_NAME: &str = "fattr";
pub const PROGRAM_LOG_LEVEL: &str = "FATTR_LOG_LEVEL";
