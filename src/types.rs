/// Read-only view of a raised exception.
///
/// This is the only place host-specific introspection happens. Classification
/// and rendering see the exception through this trait and never mutate it.
pub trait ExceptionSource {
    /// Class name of the exception (e.g. `"NoMethodError"`).
    fn class_name(&self) -> &str;

    /// The exception message, or `None` if the exception exposes no message.
    fn message(&self) -> Option<&str>;

    /// Raw backtrace frames, innermost first, or `None` if none were captured.
    fn raw_backtrace(&self) -> Option<&[String]>;
}

/// An exception row as reported by a host process.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RawException {
    /// Class name of the exception.
    pub classname: String,
    /// Exception message, if the host could read one.
    #[serde(default)]
    pub message: Option<String>,
    /// Backtrace frames as `"<path>:<linenum>:in '<label>'"` strings, innermost first.
    #[serde(default)]
    pub backtrace: Option<Vec<String>>,
}

impl RawException {
    pub fn new(classname: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            classname: classname.into(),
            message: Some(message.into()),
            backtrace: Some(Vec::new()),
        }
    }

    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = Some(frames.into_iter().map(Into::into).collect());
        self
    }
}

impl ExceptionSource for RawException {
    fn class_name(&self) -> &str {
        &self.classname
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn raw_backtrace(&self) -> Option<&[String]> {
        self.backtrace.as_deref()
    }
}

/// Caller-supplied context captured where the exception was raised.
///
/// Some hosts strip the exception's own backtrace before handing it over
/// (test runners filtering their own frames, for instance). When that happens
/// the frames captured at the raise site are used instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct RaiseContext {
    /// Frames captured at the raise site, innermost first.
    #[serde(default)]
    pub caller_backtrace: Option<Vec<String>>,
}

impl RaiseContext {
    pub fn none() -> Self {
        Self::default()
    }
}
