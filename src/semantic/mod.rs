use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::backtrace::BacktraceLocation;
use crate::error::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Emphasis {
    #[default]
    Code,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequest {
    pub location: BacktraceLocation,
    pub highlight: Option<String>,
    /// Inclusive line offsets relative to the location's line, e.g. `-5..=5`.
    pub context: RangeInclusive<isize>,
    pub message: Option<String>,
    pub mark: bool,
    pub emphasis: Emphasis,
}

impl CodeRequest {
    pub fn new(location: BacktraceLocation, context: RangeInclusive<isize>) -> Self {
        Self {
            location,
            highlight: None,
            context,
            message: None,
            mark: true,
            emphasis: Emphasis::Code,
        }
    }

    pub fn highlight(mut self, token: impl Into<String>) -> Self {
        self.highlight = Some(token.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn mark(mut self, mark: bool) -> Self {
        self.mark = mark;
        self
    }

    pub fn emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SemanticTag {
    Summary,
    Heuristic,
    Backtrace,
    Separator,
    Columns,
    Classname,
    Message,
    Explanation,
    Context,
    Details,
    Code,
    Null,
}

impl SemanticTag {
    pub fn parse(name: &str) -> Result<Self, Error> {
        Self::from_str(name).map_err(|_| Error::UnknownTag {
            tag: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticNode {
    Text(String),
    Seq(Vec<SemanticNode>),
    Summary(Box<SemanticNode>),
    Heuristic(Box<SemanticNode>),
    Backtrace(Vec<SemanticNode>),
    Separator,
    Columns(Vec<SemanticNode>),
    Classname(Box<SemanticNode>),
    Message(Box<SemanticNode>),
    Explanation(Box<SemanticNode>),
    Context(Box<SemanticNode>),
    Details(Box<SemanticNode>),
    Code(CodeRequest),
    Null,
}

impl SemanticNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn summary(content: impl Into<Self>) -> Self {
        Self::Summary(Box::new(content.into()))
    }

    pub fn heuristic(content: impl Into<Self>) -> Self {
        Self::Heuristic(Box::new(content.into()))
    }

    pub fn classname(content: impl Into<Self>) -> Self {
        Self::Classname(Box::new(content.into()))
    }

    pub fn message(content: impl Into<Self>) -> Self {
        Self::Message(Box::new(content.into()))
    }

    pub fn explanation(content: impl Into<Self>) -> Self {
        Self::Explanation(Box::new(content.into()))
    }

    pub fn context(content: impl Into<Self>) -> Self {
        Self::Context(Box::new(content.into()))
    }

    pub fn details(content: impl Into<Self>) -> Self {
        Self::Details(Box::new(content.into()))
    }

    /// `code` nodes need a [`CodeRequest`] and cannot be built this way.
    pub fn tagged(tag: &str, children: Vec<SemanticNode>) -> Result<Self, Error> {
        let node = match SemanticTag::parse(tag)? {
            SemanticTag::Summary => Self::Summary(boxed(children)),
            SemanticTag::Heuristic => Self::Heuristic(boxed(children)),
            SemanticTag::Classname => Self::Classname(boxed(children)),
            SemanticTag::Message => Self::Message(boxed(children)),
            SemanticTag::Explanation => Self::Explanation(boxed(children)),
            SemanticTag::Context => Self::Context(boxed(children)),
            SemanticTag::Details => Self::Details(boxed(children)),
            SemanticTag::Backtrace => Self::Backtrace(children),
            SemanticTag::Columns => Self::Columns(children),
            SemanticTag::Separator => Self::Separator,
            SemanticTag::Null => Self::Null,
            SemanticTag::Code => {
                return Err(Error::Parse {
                    reason: "code nodes are built from a CodeRequest".to_string(),
                });
            }
        };
        Ok(node)
    }

    pub fn tag(&self) -> Option<SemanticTag> {
        match self {
            Self::Text(_) | Self::Seq(_) => None,
            Self::Summary(_) => Some(SemanticTag::Summary),
            Self::Heuristic(_) => Some(SemanticTag::Heuristic),
            Self::Backtrace(_) => Some(SemanticTag::Backtrace),
            Self::Separator => Some(SemanticTag::Separator),
            Self::Columns(_) => Some(SemanticTag::Columns),
            Self::Classname(_) => Some(SemanticTag::Classname),
            Self::Message(_) => Some(SemanticTag::Message),
            Self::Explanation(_) => Some(SemanticTag::Explanation),
            Self::Context(_) => Some(SemanticTag::Context),
            Self::Details(_) => Some(SemanticTag::Details),
            Self::Code(_) => Some(SemanticTag::Code),
            Self::Null => Some(SemanticTag::Null),
        }
    }
}

fn boxed(mut children: Vec<SemanticNode>) -> Box<SemanticNode> {
    if children.len() == 1
        && let Some(only) = children.pop()
    {
        return Box::new(only);
    }
    Box::new(SemanticNode::Seq(children))
}

impl From<&str> for SemanticNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SemanticNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<SemanticNode>> for SemanticNode {
    fn from(nodes: Vec<SemanticNode>) -> Self {
        Self::Seq(nodes)
    }
}

impl From<CodeRequest> for SemanticNode {
    fn from(request: CodeRequest) -> Self {
        Self::Code(request)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn tag_names_roundtrip() {
        for name in [
            "summary",
            "heuristic",
            "backtrace",
            "separator",
            "columns",
            "classname",
            "message",
            "explanation",
            "context",
            "details",
            "code",
            "null",
        ] {
            assert_eq!(SemanticTag::parse(name).unwrap().as_ref(), name);
        }
    }

    #[test]
    fn unknown_tag_names_are_rejected() {
        let err = SemanticTag::parse("wat").unwrap_err();
        assert!(matches!(err, Error::UnknownTag { ref tag } if tag == "wat"));
        assert!(SemanticNode::tagged("blink", vec!["x".into()]).is_err());
    }

    #[test]
    fn tagged_builds_typed_nodes() {
        assert_eq!(
            SemanticNode::tagged("message", vec!["hi".into()]).unwrap(),
            SemanticNode::message("hi")
        );
        assert_eq!(
            SemanticNode::tagged("details", vec!["a".into(), "b".into()]).unwrap(),
            SemanticNode::details(vec![SemanticNode::text("a"), SemanticNode::text("b")])
        );
        assert_eq!(
            SemanticNode::tagged("columns", vec!["a".into(), "b".into()]).unwrap(),
            SemanticNode::Columns(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            SemanticNode::tagged("null", vec!["ignored".into()]).unwrap(),
            SemanticNode::Null
        );
        assert!(SemanticNode::tagged("code", Vec::new()).is_err());
    }

    #[test]
    fn nodes_report_their_tag() {
        assert_eq!(SemanticNode::text("x").tag(), None);
        assert_eq!(SemanticNode::Separator.tag(), Some(SemanticTag::Separator));
        let request = CodeRequest::new(BacktraceLocation::new("/a.rb", 1, "m"), -5..=5);
        assert_eq!(SemanticNode::from(request).tag(), Some(SemanticTag::Code));
    }

    #[test]
    fn code_request_defaults() {
        let request = CodeRequest::new(BacktraceLocation::new("/a.rb", 3, "m"), 0..=5);
        assert!(request.mark);
        assert_eq!(request.emphasis, Emphasis::Code);
        assert_eq!(request.highlight, None);
        assert_eq!("path".parse::<Emphasis>().ok(), Some(Emphasis::Path));
    }
}
