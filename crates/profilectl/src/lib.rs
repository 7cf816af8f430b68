pub mod cli;
pub mod dispatcher;
pub mod operations;
pub mod output;

pub use cli::{Cli, USAGE};
pub use dispatcher::{Action, DispatchReport, Dispatcher};
