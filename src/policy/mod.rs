//! Retention policy document: typed records, loading and validation.

pub mod loader;
pub mod types;
pub mod validate;

pub use loader::{load_file, parse_str};
pub use types::{
    AgeThreshold, DEFAULTS_KEY, Defaults, DiskQuota, OPERATIONS_KEY, Operation, OperationKind,
    PolicyEntry, RAW_REGEX_KEY, RetentionConfig, TimeUnit,
};
pub use validate::{
    PROJECT_NAME_MAX_LEN, PROJECT_NAME_PATTERN, ValidatedConfig, check_project_name,
    check_raw_regex, validate,
};
