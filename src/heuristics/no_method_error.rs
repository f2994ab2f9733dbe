use crate::exception_info::ExceptionInfo;
use crate::heuristics::{Heuristic, HeuristicKind, raising_frame_info};
use crate::project::Project;
use crate::semantic::SemanticNode;

/// A method was called on an object that does not define it.
pub struct NoMethodError;

impl HeuristicKind for NoMethodError {
    fn name(&self) -> &'static str {
        "NoMethodError"
    }

    fn matches(&self, einfo: &ExceptionInfo<'_>) -> bool {
        einfo.classname == "NoMethodError"
    }

    fn build<'a>(&self, einfo: ExceptionInfo<'a>, project: &Project) -> Box<dyn Heuristic + 'a> {
        Box::new(NoMethodErrorHeuristic::new(einfo, project.clone()))
    }
}

pub struct NoMethodErrorHeuristic<'a> {
    einfo: ExceptionInfo<'a>,
    project: Project,
    undefined_method_name: Option<String>,
}

impl<'a> NoMethodErrorHeuristic<'a> {
    pub fn new(einfo: ExceptionInfo<'a>, project: Project) -> Self {
        let undefined_method_name = einfo.undefined_method_name().map(str::to_string);
        Self {
            einfo,
            project,
            undefined_method_name,
        }
    }

    /// `None` when the message did not name the method.
    pub fn undefined_method_name(&self) -> Option<&str> {
        self.undefined_method_name.as_deref()
    }
}

impl Heuristic for NoMethodErrorHeuristic<'_> {
    fn info(&self) -> &ExceptionInfo<'_> {
        &self.einfo
    }

    fn project(&self) -> &Project {
        &self.project
    }

    fn semantic_info(&self) -> SemanticNode {
        match self.undefined_method_name() {
            Some(name) => raising_frame_info(
                &self.project,
                &self.einfo,
                name,
                Some(format!("{name} is undefined")),
            ),
            None => {
                let highlight = self
                    .einfo
                    .raising_frame()
                    .map_or("", |location| location.method_name());
                raising_frame_info(&self.project, &self.einfo, highlight, None)
            }
        }
    }
}
