pub mod feature_flags;
pub mod fs_atomic;
pub mod redact;
pub mod user_paths;
