use crate::exception_info::{ExceptionDetails, ExceptionInfo};
use crate::heuristics::{Heuristic, HeuristicKind, raising_frame_info};
use crate::project::Project;
use crate::semantic::SemanticNode;

/// A `require` could not find the file it was asked for.
pub struct LoadError;

impl HeuristicKind for LoadError {
    fn name(&self) -> &'static str {
        "LoadError"
    }

    fn matches(&self, einfo: &ExceptionInfo<'_>) -> bool {
        einfo.classname == "LoadError"
    }

    fn build<'a>(&self, einfo: ExceptionInfo<'a>, project: &Project) -> Box<dyn Heuristic + 'a> {
        Box::new(LoadErrorHeuristic {
            einfo,
            project: project.clone(),
        })
    }
}

pub struct LoadErrorHeuristic<'a> {
    einfo: ExceptionInfo<'a>,
    project: Project,
}

impl LoadErrorHeuristic<'_> {
    pub fn unloadable_path(&self) -> Option<&str> {
        match &self.einfo.details {
            ExceptionDetails::LoadError { unloadable_path } => Some(unloadable_path),
            _ => None,
        }
    }
}

impl Heuristic for LoadErrorHeuristic<'_> {
    fn info(&self) -> &ExceptionInfo<'_> {
        &self.einfo
    }

    fn project(&self) -> &Project {
        &self.project
    }

    fn explanation(&self) -> String {
        match self.unloadable_path() {
            Some(path) => format!("Couldn't load {path}"),
            None => self.einfo.explanation.clone(),
        }
    }

    fn semantic_info(&self) -> SemanticNode {
        let path = self.unloadable_path().unwrap_or_default();
        let message = self
            .unloadable_path()
            .map(|path| format!("{path} could not be loaded"));
        raising_frame_info(&self.project, &self.einfo, path, message)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::types::{RaiseContext, RawException};

    #[test]
    fn names_the_missing_file() {
        let exception = RawException::new("LoadError", "cannot load such file -- nokogiri")
            .with_backtrace(["/app/boot.rb:2:in 'require'"]);
        let einfo = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert!(LoadError.matches(&einfo));

        let heuristic = LoadError.build(einfo, &Project::default());
        assert_eq!(heuristic.explanation(), "Couldn't load nokogiri");
        let SemanticNode::Heuristic(content) = heuristic.semantic_info() else {
            unreachable!("info is a heuristic node");
        };
        let SemanticNode::Code(request) = *content else {
            unreachable!("heuristic wraps a code node");
        };
        assert_eq!(request.message.as_deref(), Some("nokogiri could not be loaded"));
        assert_eq!(request.highlight.as_deref(), Some("nokogiri"));
    }

    #[test]
    fn unusual_messages_keep_the_original_explanation() {
        let exception = RawException::new("LoadError", "incompatible library version");
        let einfo = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        let heuristic = LoadError.build(einfo, &Project::default());
        assert_eq!(heuristic.explanation(), "incompatible library version");
    }
}
