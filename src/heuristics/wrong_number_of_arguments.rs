use crate::exception_info::{ExceptionDetails, ExceptionInfo};
use crate::heuristics::{Heuristic, HeuristicKind, code_at};
use crate::project::Project;
use crate::semantic::SemanticNode;

/// A method was called with the wrong number of arguments.
///
/// Shows the method definition (the raising frame) and the call site (the frame below it).
pub struct WrongNumberOfArguments;

impl HeuristicKind for WrongNumberOfArguments {
    fn name(&self) -> &'static str {
        "WrongNumberOfArguments"
    }

    fn matches(&self, einfo: &ExceptionInfo<'_>) -> bool {
        matches!(einfo.details, ExceptionDetails::WrongNumberOfArguments { .. })
    }

    fn build<'a>(&self, einfo: ExceptionInfo<'a>, project: &Project) -> Box<dyn Heuristic + 'a> {
        Box::new(WrongNumberOfArgumentsHeuristic::new(einfo, project.clone()))
    }
}

pub struct WrongNumberOfArgumentsHeuristic<'a> {
    einfo: ExceptionInfo<'a>,
    project: Project,
    num_expected: usize,
    num_received: usize,
}

impl<'a> WrongNumberOfArgumentsHeuristic<'a> {
    pub fn new(einfo: ExceptionInfo<'a>, project: Project) -> Self {
        let num_expected = einfo.num_expected().unwrap_or_default();
        let num_received = einfo.num_received().unwrap_or_default();
        Self {
            einfo,
            project,
            num_expected,
            num_received,
        }
    }

    pub fn num_expected(&self) -> usize {
        self.num_expected
    }

    pub fn num_received(&self) -> usize {
        self.num_received
    }
}

impl Heuristic for WrongNumberOfArgumentsHeuristic<'_> {
    fn info(&self) -> &ExceptionInfo<'_> {
        &self.einfo
    }

    fn project(&self) -> &Project {
        &self.project
    }

    fn semantic_summary(&self) -> SemanticNode {
        SemanticNode::summary(SemanticNode::Columns(vec![
            SemanticNode::classname(self.einfo.classname.as_str()),
            SemanticNode::explanation(vec![
                SemanticNode::text(format!("{} ", self.explanation())),
                SemanticNode::details(format!(
                    "(expected {}, sent {})",
                    self.num_expected, self.num_received
                )),
            ]),
        ]))
    }

    fn semantic_info(&self) -> SemanticNode {
        let backtrace = &self.einfo.backtrace;
        let Some(definition) = backtrace.first() else {
            return SemanticNode::Null;
        };
        let method = definition.method_name();

        let mut windows = vec![SemanticNode::Code(
            code_at(&self.project, definition, 0..=5)
                .highlight(method)
                .message(format!("EXPECTED {}", self.num_expected)),
        )];
        if let Some(call_site) = backtrace.get(1) {
            windows.push(SemanticNode::Code(
                code_at(&self.project, call_site, -5..=5)
                    .highlight(method)
                    .message(format!("SENT {}", self.num_received)),
            ));
        }
        SemanticNode::heuristic(windows)
    }
}
