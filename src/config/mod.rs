mod settings;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::exception_info::ExceptionInfo;
use crate::format::{FormatWith, format_terminal};
use crate::heuristics::{Heuristic, HeuristicKind, default_heuristics, first_match};
use crate::project::Project;
use crate::theme::{AnsiTheme, Theme};
use crate::types::{ExceptionSource, RaiseContext};

pub use settings::Settings;

pub type Blacklist = Box<dyn Fn(&ExceptionInfo<'_>) -> bool + Send + Sync>;

pub const DEFAULT_BLACKLIST: &[&str] = &["SystemExit"];

/// Callers may extend `heuristics`. Serialising mutation of a shared `Config` is their job.
pub struct Config {
    pub heuristics: Vec<&'static dyn HeuristicKind>,
    pub blacklist: Blacklist,
    pub theme: Box<dyn Theme>,
    pub format_with: FormatWith,
    pub project: Project,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heuristics: default_heuristics(),
            blacklist: blacklist_classnames(DEFAULT_BLACKLIST.iter().map(|c| (*c).to_string())),
            theme: Box::new(AnsiTheme),
            format_with: format_terminal,
            project: Project::default(),
        }
    }
}

pub fn blacklist_classnames<I>(classnames: I) -> Blacklist
where
    I: IntoIterator<Item = String>,
{
    let classnames: Vec<String> = classnames.into_iter().collect();
    Box::new(move |einfo: &ExceptionInfo<'_>| classnames.iter().any(|c| *c == einfo.classname))
}

impl Config {
    pub fn accept(&self, exception: &dyn ExceptionSource, ctx: &RaiseContext) -> bool {
        if !ExceptionInfo::parseable(exception, ctx) {
            return false;
        }
        let Ok(einfo) = ExceptionInfo::parse(exception, ctx) else {
            return false;
        };
        if (self.blacklist)(&einfo) {
            tracing::debug!(classname = %einfo.classname, "blacklisted");
            return false;
        }
        first_match(&self.heuristics, &einfo).is_some()
    }

    /// [`Error::NotAccepted`] when [`Config::accept`] is false.
    pub fn heuristic_for<'a>(
        &self,
        exception: &'a dyn ExceptionSource,
        ctx: &RaiseContext,
    ) -> Result<Box<dyn Heuristic + 'a>, Error> {
        if !self.accept(exception, ctx) {
            return Err(Error::NotAccepted {
                classname: exception.class_name().to_string(),
            });
        }
        let einfo = ExceptionInfo::parse(exception, ctx)?;
        let kind = first_match(&self.heuristics, &einfo).ok_or_else(|| Error::NoHeuristic {
            classname: einfo.classname.clone(),
        })?;
        tracing::trace!(heuristic = kind.name(), classname = %einfo.classname, "heuristic chosen");
        Ok(kind.build(einfo, &self.project))
    }

    pub fn format(&self, heuristic: &dyn Heuristic, cwd: &Path) -> String {
        (self.format_with)(self.theme.as_ref(), heuristic, &normalize(cwd))
    }

    pub fn explain(
        &self,
        exception: &dyn ExceptionSource,
        ctx: &RaiseContext,
        cwd: &Path,
    ) -> Result<Option<String>, Error> {
        if !self.accept(exception, ctx) {
            return Ok(None);
        }
        let heuristic = self.heuristic_for(exception, ctx)?;
        Ok(Some(self.format(heuristic.as_ref(), cwd)))
    }
}

fn normalize(cwd: &Path) -> PathBuf {
    std::path::absolute(cwd).unwrap_or_else(|_| cwd.to_path_buf())
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heuristics: Vec<&str> = self.heuristics.iter().map(|h| h.name()).collect();
        f.debug_struct("Config")
            .field("heuristics", &heuristics)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use super::*;
    use crate::format::NO_BACKTRACE;
    use crate::heuristics::{Exception, WrongNumberOfArguments};
    use crate::theme::PlainTheme;
    use crate::types::RawException;

    fn plain() -> Config {
        Config {
            theme: Box::new(PlainTheme),
            ..Config::default()
        }
    }

    #[test]
    fn accepts_ordinary_exceptions() {
        let exception = RawException::new("RuntimeError", "boom");
        assert!(plain().accept(&exception, &RaiseContext::none()));
    }

    #[test]
    fn system_exit_is_rejected() {
        let exception = RawException::new("SystemExit", "exit");
        let config = plain();
        assert!(!config.accept(&exception, &RaiseContext::none()));
        let Err(Error::NotAccepted { classname }) =
            config.heuristic_for(&exception, &RaiseContext::none())
        else {
            panic!("expected NotAccepted");
        };
        assert_eq!(classname, "SystemExit");
    }

    #[test]
    fn unparseable_exceptions_are_rejected() {
        let exception = RawException {
            classname: "RuntimeError".to_string(),
            message: Some("boom".to_string()),
            backtrace: None,
        };
        assert!(!plain().accept(&exception, &RaiseContext::none()));
    }

    #[test]
    fn blacklist_beats_a_matching_heuristic() {
        let exception = RawException::new("ArgumentError", "wrong number of arguments (1 for 2)");
        let mut config = plain();
        assert!(config.accept(&exception, &RaiseContext::none()));

        config.blacklist = blacklist_classnames(["ArgumentError".to_string()]);
        assert!(!config.accept(&exception, &RaiseContext::none()));
    }

    #[test]
    fn missing_catchall_is_a_configuration_error() {
        let exception = RawException::new("RuntimeError", "boom");
        let mut config = plain();
        config.heuristics = vec![&WrongNumberOfArguments as &'static dyn HeuristicKind];
        assert!(!config.accept(&exception, &RaiseContext::none()));

        let einfo = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert!(first_match(&config.heuristics, &einfo).is_none());
    }

    #[test]
    fn heuristics_list_is_extensible_and_ordered() {
        let exception = RawException::new("ArgumentError", "wrong number of arguments (1 for 2)");
        let mut config = plain();
        config.heuristics.insert(0, &Exception);
        let heuristic = config.heuristic_for(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(heuristic.explanation(), "Wrong number of arguments");
        assert!(matches!(
            heuristic.semantic_summary(),
            crate::semantic::SemanticNode::Summary(_)
        ));
    }

    #[test]
    fn explain_renders_a_report() {
        let exception = RawException::new("RuntimeError", "boom");
        let report = plain()
            .explain(&exception, &RaiseContext::none(), Path::new("/home/nobody"))
            .unwrap()
            .unwrap();
        assert!(report.contains("RuntimeError | boom\n"));
        assert!(report.ends_with(NO_BACKTRACE));
    }

    #[test]
    fn explain_skips_rejected_exceptions() {
        let exception = RawException::new("SystemExit", "exit");
        let report = plain()
            .explain(&exception, &RaiseContext::none(), Path::new("/"))
            .unwrap();
        assert_eq!(report, None);
    }

    #[test]
    fn debug_lists_heuristic_names() {
        let debug = format!("{:?}", Config::default());
        assert!(debug.contains("WrongNumberOfArguments"));
        assert!(debug.contains("Exception"));
    }
}
