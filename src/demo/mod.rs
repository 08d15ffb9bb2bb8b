//! The demo itself: the federated query sequence and the standalone
//! SQLite check.

mod check;
mod queries;
mod runner;

pub use check::{
    check_sqlite, format_money, run_sections, write_catalog, CheckSection, CHECK_SECTIONS,
};
pub use queries::{federated_queries, DemoQuery};
pub use runner::{run_queries, unreachable_message};
