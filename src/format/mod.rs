pub mod code;

use std::path::Path;

use crate::heuristics::Heuristic;
use crate::semantic::SemanticNode;
use crate::theme::Theme;

pub use code::FormatCode;

pub const NO_BACKTRACE: &str = "No backtrace available";

/// Render entry point: theme, heuristic and normalised working directory in, report out.
pub type FormatWith = fn(&dyn Theme, &dyn Heuristic, &Path) -> String;

/// The default [`FormatWith`]: summary, heuristic-specific info, then the backtrace.
pub fn format_terminal(theme: &dyn Theme, heuristic: &dyn Heuristic, cwd: &Path) -> String {
    FormatTerminal::new(theme, cwd).call(heuristic)
}

/// Interprets a semantic tree into terminal text.
pub struct FormatTerminal<'t> {
    theme: &'t dyn Theme,
    format_code: FormatCode<'t>,
}

impl<'t> FormatTerminal<'t> {
    pub fn new(theme: &'t dyn Theme, cwd: &Path) -> Self {
        Self {
            theme,
            format_code: FormatCode::new(theme, cwd),
        }
    }

    pub fn call(&self, heuristic: &dyn Heuristic) -> String {
        self.format(&SemanticNode::Seq(vec![
            heuristic.semantic_summary(),
            heuristic.semantic_info(),
            heuristic.semantic_backtrace(),
        ]))
    }

    pub fn format(&self, node: &SemanticNode) -> String {
        let theme = self.theme;
        match node {
            SemanticNode::Text(text) => text.clone(),
            SemanticNode::Seq(nodes) => nodes.iter().map(|n| self.format(n)).collect(),
            SemanticNode::Summary(content) | SemanticNode::Heuristic(content) => {
                theme.separator_line() + &self.format(content)
            }
            SemanticNode::Backtrace(frames) if frames.is_empty() => {
                theme.separator_line() + &self.format(&SemanticNode::message(NO_BACKTRACE))
            }
            SemanticNode::Backtrace(frames) => {
                theme.separator_line() + &frames.iter().map(|n| self.format(n)).collect::<String>()
            }
            SemanticNode::Separator => theme.separator_line(),
            SemanticNode::Columns(columns) => {
                let rendered: Vec<String> = columns.iter().map(|c| self.format(c)).collect();
                theme.columns(&rendered)
            }
            SemanticNode::Classname(content) => theme.classname(&self.format(content)),
            SemanticNode::Message(content) => theme.message(&self.format(content)),
            SemanticNode::Explanation(content) => theme.explanation(&self.format(content)),
            SemanticNode::Context(content) => theme.context(&self.format(content)),
            SemanticNode::Details(content) => theme.details(&self.format(content)),
            SemanticNode::Code(request) => self.format_code.call(request),
            SemanticNode::Null => String::new(),
        }
    }
}
