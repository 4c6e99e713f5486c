//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command
//! and the pure helpers it is built from.

pub mod compare;
pub mod convert;
pub mod formats;
pub mod info;
pub mod verify;

pub use compare::{check_same_layout, execute_compare};
pub use convert::execute_convert;
pub use formats::{execute_formats, format_rows};
pub use info::{execute_info, render_info_json};
pub use verify::{execute_verify, report_rows};
