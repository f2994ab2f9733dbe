pub mod exception;
pub mod load_error;
pub mod no_method_error;
pub mod syntax_error;
pub mod wrong_number_of_arguments;

use crate::backtrace::BacktraceLocation;
use crate::exception_info::ExceptionInfo;
use crate::project::Project;
use crate::semantic::{CodeRequest, Emphasis, SemanticNode};

pub use exception::{Exception, ExceptionHeuristic};
pub use load_error::{LoadError, LoadErrorHeuristic};
pub use no_method_error::{NoMethodError, NoMethodErrorHeuristic};
pub use syntax_error::{SyntaxError, SyntaxErrorHeuristic};
pub use wrong_number_of_arguments::{WrongNumberOfArguments, WrongNumberOfArgumentsHeuristic};

/// Recognises one failure shape and builds its presenter.
///
/// `matches` must be total and cheap: string checks on already-extracted fields, no I/O.
pub trait HeuristicKind: Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, einfo: &ExceptionInfo<'_>) -> bool;

    fn build<'a>(&self, einfo: ExceptionInfo<'a>, project: &Project) -> Box<dyn Heuristic + 'a>;
}

/// A classified exception, able to describe itself as a semantic tree.
pub trait Heuristic {
    fn info(&self) -> &ExceptionInfo<'_>;

    fn project(&self) -> &Project;

    fn explanation(&self) -> String {
        self.info().explanation.clone()
    }

    /// `Classname | explanation` header.
    fn semantic_summary(&self) -> SemanticNode {
        SemanticNode::summary(SemanticNode::Columns(vec![
            SemanticNode::classname(self.info().classname.as_str()),
            SemanticNode::explanation(self.explanation()),
        ]))
    }

    /// Code windows pointing at the frames that explain the failure.
    fn semantic_info(&self) -> SemanticNode;

    /// One single-line window per frame, highlighting the method called from it.
    fn semantic_backtrace(&self) -> SemanticNode {
        let project = self.project();
        let backtrace = &self.info().backtrace;
        SemanticNode::Backtrace(
            backtrace
                .iter()
                .enumerate()
                .map(|(i, location)| {
                    let called = i
                        .checked_sub(1)
                        .and_then(|inner| backtrace.get(inner))
                        .map_or("", BacktraceLocation::method_name);
                    let emphasis = if project.contains(&location.path) {
                        Emphasis::Code
                    } else {
                        Emphasis::Path
                    };
                    SemanticNode::Code(
                        code_at(project, location, 0..=0)
                            .highlight(called)
                            .emphasis(emphasis),
                    )
                })
                .collect(),
        )
    }
}

/// A code request for `location`, with the path resolved against the project.
pub(crate) fn code_at(
    project: &Project,
    location: &BacktraceLocation,
    context: std::ops::RangeInclusive<isize>,
) -> CodeRequest {
    let mut location = location.clone();
    location.path = project.resolve(&location.path);
    CodeRequest::new(location, context)
}

/// The single window shown for the raising frame, or `Null` when there is no frame.
pub(crate) fn raising_frame_info(
    project: &Project,
    einfo: &ExceptionInfo<'_>,
    highlight: &str,
    message: Option<String>,
) -> SemanticNode {
    let Some(location) = einfo.raising_frame() else {
        return SemanticNode::Null;
    };
    let mut request = code_at(project, location, -5..=5).highlight(highlight);
    if let Some(message) = message {
        request = request.message(message);
    }
    SemanticNode::heuristic(SemanticNode::Code(request))
}

/// The default catalog, most specific first. The catchall is last.
pub fn default_heuristics() -> Vec<&'static dyn HeuristicKind> {
    vec![
        &WrongNumberOfArguments as &'static dyn HeuristicKind,
        &NoMethodError,
        &LoadError,
        &SyntaxError,
        &Exception,
    ]
}

/// First heuristic in `heuristics` that matches.
pub fn first_match(
    heuristics: &[&'static dyn HeuristicKind],
    einfo: &ExceptionInfo<'_>,
) -> Option<&'static dyn HeuristicKind> {
    heuristics.iter().copied().find(|kind| kind.matches(einfo))
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use super::*;
    use crate::types::{RaiseContext, RawException};

    fn parse(exception: &RawException) -> ExceptionInfo<'_> {
        ExceptionInfo::parse(exception, &RaiseContext::none()).unwrap()
    }

    #[test]
    fn default_catalog_ends_with_catchall() {
        let names: Vec<_> = default_heuristics().iter().map(|h| h.name()).collect();
        assert_eq!(
            names,
            [
                "WrongNumberOfArguments",
                "NoMethodError",
                "LoadError",
                "SyntaxError",
                "Exception"
            ]
        );
    }

    #[test]
    fn catchall_matches_anything() {
        let exception = RawException::new("Whatever", "");
        assert!(Exception.matches(&parse(&exception)));
    }

    #[test]
    fn earlier_heuristics_win() {
        let exception = RawException::new("ArgumentError", "wrong number of arguments (1 for 2)");
        let einfo = parse(&exception);
        assert!(Exception.matches(&einfo));
        assert!(WrongNumberOfArguments.matches(&einfo));

        let picked = first_match(&default_heuristics(), &einfo).unwrap();
        assert_eq!(picked.name(), "WrongNumberOfArguments");

        let reordered: Vec<&'static dyn HeuristicKind> =
            vec![&Exception as &'static dyn HeuristicKind, &WrongNumberOfArguments];
        assert_eq!(first_match(&reordered, &einfo).unwrap().name(), "Exception");
    }

    #[test]
    fn empty_catalog_matches_nothing() {
        let exception = RawException::new("RuntimeError", "boom");
        assert!(first_match(&[], &parse(&exception)).is_none());
    }

    #[test]
    fn backtrace_highlights_the_inner_frames_method() {
        let exception = RawException::new("RuntimeError", "boom").with_backtrace([
            "/app/lib/a.rb:3:in 'inner'",
            "/app/lib/b.rb:9:in 'outer'",
            "/gems/x/lib/x.rb:1:in 'call'",
        ]);
        let project = Project::new("/app");
        let heuristic = Exception.build(parse(&exception), &project);
        let SemanticNode::Backtrace(frames) = heuristic.semantic_backtrace() else {
            panic!("expected a backtrace node");
        };
        let requests: Vec<_> = frames
            .into_iter()
            .map(|frame| match frame {
                SemanticNode::Code(request) => request,
                other => panic!("expected code, got {other:?}"),
            })
            .collect();

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].highlight.as_deref(), Some(""));
        assert_eq!(requests[1].highlight.as_deref(), Some("inner"));
        assert_eq!(requests[2].highlight.as_deref(), Some("outer"));
        assert_eq!(requests[0].emphasis, Emphasis::Code);
        assert_eq!(requests[2].emphasis, Emphasis::Path);
        assert!(requests.iter().all(|r| r.context == (0..=0)));
    }
}
