#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod backtrace;
pub mod config;
pub mod error;
pub mod exception_info;
pub mod format;
pub mod heuristics;
pub mod project;
pub mod semantic;
pub mod theme;
pub mod types;

pub use backtrace::BacktraceLocation;
pub use config::{Blacklist, Config, DEFAULT_BLACKLIST, Settings, blacklist_classnames};
pub use error::Error;
pub use exception_info::{ExceptionDetails, ExceptionInfo};
pub use format::{FormatCode, FormatTerminal, FormatWith, NO_BACKTRACE, format_terminal};
pub use heuristics::{Heuristic, HeuristicKind, default_heuristics, first_match};
pub use project::Project;
pub use semantic::{CodeRequest, Emphasis, SemanticNode, SemanticTag};
pub use theme::{AnsiTheme, PlainTheme, Theme, ThemeName};
pub use types::{ExceptionSource, RaiseContext, RawException};
