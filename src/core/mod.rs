// Core pipeline exports
pub mod fallback;
pub mod format;
pub mod parser;
pub mod prompt;

pub use fallback::{fallback_response, fill_defaults};
pub use format::{format_measurement, Unit};
pub use parser::{parse_completion, scan_completion, ScannedCompletion};
pub use prompt::build_prompt;
