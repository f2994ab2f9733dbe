mod extract;

use std::fmt;

use crate::backtrace::{self, BacktraceLocation};
use crate::error::Error;
use crate::types::{ExceptionSource, RaiseContext};

/// Shape-specific fields recognised while extracting an exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionDetails {
    /// Nothing beyond classname, message and backtrace.
    Generic,
    WrongNumberOfArguments {
        num_expected: usize,
        num_received: usize,
    },
    NoMethodError {
        undefined_method_name: String,
    },
    LoadError {
        unloadable_path: String,
    },
    /// The offending source location lives in the message, not the backtrace.
    SyntaxError {
        location: BacktraceLocation,
        reason: String,
    },
}

/// Structured description of a raised exception.
///
/// Borrows the original exception for display only; it is never mutated.
pub struct ExceptionInfo<'a> {
    pub exception: &'a dyn ExceptionSource,
    pub classname: String,
    pub explanation: String,
    /// Innermost frame first.
    pub backtrace: Vec<BacktraceLocation>,
    pub details: ExceptionDetails,
}

impl<'a> ExceptionInfo<'a> {
    /// Whether `parse` can describe this exception. Never fails and has no side effects.
    pub fn parseable(exception: &dyn ExceptionSource, ctx: &RaiseContext) -> bool {
        exception.message().is_some() && raw_frames(exception, ctx).is_some()
    }

    /// Extract classname, explanation, backtrace and shape-specific details.
    ///
    /// Calling this on an exception for which [`ExceptionInfo::parseable`] is false is a
    /// contract violation and returns [`Error::Unparseable`].
    pub fn parse(exception: &'a dyn ExceptionSource, ctx: &RaiseContext) -> Result<Self, Error> {
        let classname = exception.class_name().to_string();
        let message = exception.message().ok_or_else(|| Error::Unparseable {
            reason: format!("{classname} has no message"),
        })?;
        let frames = raw_frames(exception, ctx).ok_or_else(|| Error::Unparseable {
            reason: format!("{classname} has no backtrace"),
        })?;

        let details = details_for(&classname, message);
        let explanation = match details {
            ExceptionDetails::WrongNumberOfArguments { .. } => "Wrong number of arguments".to_string(),
            _ => message.to_string(),
        };

        Ok(Self {
            exception,
            classname,
            explanation,
            backtrace: backtrace::parse(frames),
            details,
        })
    }

    pub fn num_expected(&self) -> Option<usize> {
        match self.details {
            ExceptionDetails::WrongNumberOfArguments { num_expected, .. } => Some(num_expected),
            _ => None,
        }
    }

    pub fn num_received(&self) -> Option<usize> {
        match self.details {
            ExceptionDetails::WrongNumberOfArguments { num_received, .. } => Some(num_received),
            _ => None,
        }
    }

    pub fn undefined_method_name(&self) -> Option<&str> {
        match &self.details {
            ExceptionDetails::NoMethodError {
                undefined_method_name,
            } => Some(undefined_method_name),
            _ => None,
        }
    }

    /// The raising frame, if any frame survived parsing.
    pub fn raising_frame(&self) -> Option<&BacktraceLocation> {
        self.backtrace.first()
    }
}

/// The exception's own frames, falling back to those captured at the raise site.
fn raw_frames<'e>(exception: &'e dyn ExceptionSource, ctx: &'e RaiseContext) -> Option<&'e [String]> {
    exception
        .raw_backtrace()
        .or(ctx.caller_backtrace.as_deref())
}

fn details_for(classname: &str, message: &str) -> ExceptionDetails {
    if let Some((num_received, num_expected)) = extract::arity_counts(message) {
        return ExceptionDetails::WrongNumberOfArguments {
            num_expected,
            num_received,
        };
    }

    match classname {
        "NoMethodError" => extract::undefined_method_name(message).map_or(
            ExceptionDetails::Generic,
            |undefined_method_name| ExceptionDetails::NoMethodError {
                undefined_method_name,
            },
        ),
        "LoadError" => extract::unloadable_path(message).map_or(
            ExceptionDetails::Generic,
            |unloadable_path| ExceptionDetails::LoadError { unloadable_path },
        ),
        "SyntaxError" => extract::syntax_location(message).map_or(
            ExceptionDetails::Generic,
            |(location, reason)| ExceptionDetails::SyntaxError { location, reason },
        ),
        _ => ExceptionDetails::Generic,
    }
}

impl PartialEq for ExceptionInfo<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.exception, other.exception)
            && self.classname == other.classname
            && self.explanation == other.explanation
            && self.backtrace == other.backtrace
            && self.details == other.details
    }
}

impl fmt::Debug for ExceptionInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionInfo")
            .field("classname", &self.classname)
            .field("explanation", &self.explanation)
            .field("backtrace", &self.backtrace)
            .field("details", &self.details)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::types::RawException;

    fn some_exception() -> RawException {
        RawException::new("FakeException", "some message")
            .with_backtrace(["/Users/someone/a/b/c.rb:123:in `some_method_name'"])
    }

    #[test]
    fn records_exception_classname_and_message() {
        let exception = some_exception();
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert!(std::ptr::addr_eq(info.exception, &exception));
        assert_eq!(info.classname, "FakeException");
        assert_eq!(info.explanation, "some message");
        assert_eq!(info.details, ExceptionDetails::Generic);
    }

    #[test]
    fn records_backtrace_locations() {
        let exception = some_exception();
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        let linenums: Vec<_> = info.backtrace.iter().map(|l| l.linenum).collect();
        assert_eq!(linenums, [123]);
    }

    #[test]
    fn parse_is_idempotent() {
        let exception = RawException::new("ArgumentError", "wrong number of arguments (1 for 2)")
            .with_backtrace(["/a.rb:1:in 'm'", "/b.rb:2:in 'n'"]);
        let ctx = RaiseContext::none();
        let first = ExceptionInfo::parse(&exception, &ctx).unwrap();
        let second = ExceptionInfo::parse(&exception, &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn arity_messages_carry_counts() {
        let exception = RawException::new("ArgumentError", "wrong number of arguments (1 for 2)");
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(info.num_received(), Some(1));
        assert_eq!(info.num_expected(), Some(2));
        assert_eq!(info.explanation, "Wrong number of arguments");
    }

    #[test]
    fn rubinius_arity_messages_carry_counts() {
        let exception = RawException::new("ArgumentError", "method 'foo': given 3, expected 1");
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(
            info.details,
            ExceptionDetails::WrongNumberOfArguments {
                num_expected: 1,
                num_received: 3
            }
        );
    }

    #[test]
    fn unrecognised_argument_errors_stay_generic() {
        let exception = RawException::new("ArgumentError", "invalid value for Integer(): \"x\"");
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(info.details, ExceptionDetails::Generic);
        assert_eq!(info.num_expected(), None);
    }

    #[test]
    fn no_method_errors_carry_method_name() {
        let exception =
            RawException::new("NoMethodError", "undefined method `upcase' for nil:NilClass");
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(info.undefined_method_name(), Some("upcase"));
    }

    #[test]
    fn syntax_errors_carry_location_from_message() {
        let exception = RawException::new("SyntaxError", "/app/a.rb:4: syntax error, unexpected end");
        let info = ExceptionInfo::parse(&exception, &RaiseContext::none()).unwrap();
        assert_eq!(
            info.details,
            ExceptionDetails::SyntaxError {
                location: BacktraceLocation::new("/app/a.rb", 4, ""),
                reason: "syntax error, unexpected end".to_string(),
            }
        );
    }

    #[test]
    fn parseable_requires_message_and_backtrace() {
        let ctx = RaiseContext::none();
        let no_message = RawException {
            classname: "Weird".to_string(),
            message: None,
            backtrace: Some(Vec::new()),
        };
        let no_backtrace = RawException {
            classname: "Weird".to_string(),
            message: Some("m".to_string()),
            backtrace: None,
        };
        assert!(!ExceptionInfo::parseable(&no_message, &ctx));
        assert!(!ExceptionInfo::parseable(&no_backtrace, &ctx));
        assert!(ExceptionInfo::parseable(&some_exception(), &ctx));
    }

    #[test]
    fn parse_without_parseable_is_a_contract_violation() {
        let no_backtrace = RawException {
            classname: "Weird".to_string(),
            message: Some("m".to_string()),
            backtrace: None,
        };
        assert!(matches!(
            ExceptionInfo::parse(&no_backtrace, &RaiseContext::none()),
            Err(Error::Unparseable { .. })
        ));
    }

    #[test]
    fn raise_context_supplies_missing_backtrace() {
        let stripped = RawException {
            classname: "RuntimeError".to_string(),
            message: Some("boom".to_string()),
            backtrace: None,
        };
        let ctx = RaiseContext {
            caller_backtrace: Some(vec![
                "/test/x_test.rb:8:in 'block (2 levels) in <top>'".to_string(),
            ]),
        };
        assert!(ExceptionInfo::parseable(&stripped, &ctx));
        let info = ExceptionInfo::parse(&stripped, &ctx).unwrap();
        assert_eq!(info.backtrace.len(), 1);
        assert_eq!(info.raising_frame().map(|l| l.linenum), Some(8));
    }
}
