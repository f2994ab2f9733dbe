use crate::backtrace::BacktraceLocation;
use crate::exception_info::{ExceptionDetails, ExceptionInfo};
use crate::heuristics::{Heuristic, HeuristicKind, code_at};
use crate::project::Project;
use crate::semantic::SemanticNode;

/// A file failed to parse. The offending line is named in the message, not the backtrace.
pub struct SyntaxError;

impl HeuristicKind for SyntaxError {
    fn name(&self) -> &'static str {
        "SyntaxError"
    }

    fn matches(&self, einfo: &ExceptionInfo<'_>) -> bool {
        matches!(einfo.details, ExceptionDetails::SyntaxError { .. })
    }

    fn build<'a>(&self, einfo: ExceptionInfo<'a>, project: &Project) -> Box<dyn Heuristic + 'a> {
        Box::new(SyntaxErrorHeuristic {
            einfo,
            project: project.clone(),
        })
    }
}

pub struct SyntaxErrorHeuristic<'a> {
    einfo: ExceptionInfo<'a>,
    project: Project,
}

impl SyntaxErrorHeuristic<'_> {
    pub fn location(&self) -> Option<&BacktraceLocation> {
        match &self.einfo.details {
            ExceptionDetails::SyntaxError { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.einfo.details {
            ExceptionDetails::SyntaxError { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl Heuristic for SyntaxErrorHeuristic<'_> {
    fn info(&self) -> &ExceptionInfo<'_> {
        &self.einfo
    }

    fn project(&self) -> &Project {
        &self.project
    }

    fn explanation(&self) -> String {
        self.reason()
            .map_or_else(|| self.einfo.explanation.clone(), str::to_string)
    }

    fn semantic_info(&self) -> SemanticNode {
        let Some(location) = self.location() else {
            return SemanticNode::Null;
        };
        let mut request = code_at(&self.project, location, -5..=5);
        if let Some(reason) = self.reason() {
            request = request.message(reason);
        }
        SemanticNode::heuristic(SemanticNode::Code(request))
    }
}
