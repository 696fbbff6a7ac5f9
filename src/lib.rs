#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Keeping format!("{}", x) over format!("{x}") for readability with complex exprs
#![allow(clippy::uninlined_format_args)]
// Telegram user ids are u64 on the wire but i64 in event payloads
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]

pub mod bus;
pub mod channels;
pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod relay;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
