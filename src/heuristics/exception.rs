use crate::exception_info::ExceptionInfo;
use crate::heuristics::{Heuristic, HeuristicKind, raising_frame_info};
use crate::project::Project;
use crate::semantic::SemanticNode;

/// Catchall: matches every exception, shows the raising frame.
pub struct Exception;

impl HeuristicKind for Exception {
    fn name(&self) -> &'static str {
        "Exception"
    }

    fn matches(&self, _einfo: &ExceptionInfo<'_>) -> bool {
        true
    }

    fn build<'a>(&self, einfo: ExceptionInfo<'a>, project: &Project) -> Box<dyn Heuristic + 'a> {
        Box::new(ExceptionHeuristic {
            einfo,
            project: project.clone(),
        })
    }
}

pub struct ExceptionHeuristic<'a> {
    einfo: ExceptionInfo<'a>,
    project: Project,
}

impl Heuristic for ExceptionHeuristic<'_> {
    fn info(&self) -> &ExceptionInfo<'_> {
        &self.einfo
    }

    fn project(&self) -> &Project {
        &self.project
    }

    fn semantic_info(&self) -> SemanticNode {
        let highlight = self
            .einfo
            .raising_frame()
            .map_or("", |location| location.method_name());
        raising_frame_info(&self.project, &self.einfo, highlight, None)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::types::{RaiseContext, RawException};

    #[test]
    fn shows_the_raising_frame() {
        let exception = RawException::new("RuntimeError", "boom")
            .with_backtrace(["/app/a.rb:12:in 'Foo#explode'", "/app/b.rb:3:in 'run'"]);
        let einfo = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        let heuristic = Exception.build(einfo, &Project::default());

        assert_eq!(heuristic.explanation(), "boom");
        let SemanticNode::Heuristic(content) = heuristic.semantic_info() else {
            unreachable!("info is a heuristic node");
        };
        let SemanticNode::Code(request) = *content else {
            unreachable!("heuristic wraps a code node");
        };
        assert_eq!(request.location.linenum, 12);
        assert_eq!(request.highlight.as_deref(), Some("explode"));
        assert_eq!(request.context, -5..=5);
        assert_eq!(request.message, None);
    }

    #[test]
    fn no_frames_means_no_info() {
        let exception = RawException::new("RuntimeError", "boom");
        let einfo = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(
            Exception.build(einfo, &Project::default()).semantic_info(),
            SemanticNode::Null
        );
    }
}
