pub mod format;
pub mod validate;

pub use format::{format_date, format_optional, truncate_string};
pub use validate::{
    validate_email, validate_max_length, validate_min_length, validate_password,
    validate_required, validate_url, PasswordCheck,
};
