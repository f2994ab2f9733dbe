use std::sync::LazyLock;

use regex::Regex;

use crate::backtrace::BacktraceLocation;

/// MRI / JRuby before 2.3: `wrong number of arguments (1 for 2)`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static ARITY_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^wrong number of arguments.*?\((\d+) for (\d+)\)$").expect("arity pattern")
});

/// Rubinius: `method 'foo': given 1, expected 2`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static ARITY_GIVEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^method '.*?': given (\d+).*? expected (\d+)$").expect("arity pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static UNDEFINED_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^undefined (?:local variable or )?method [`']([^']+)'").expect("method pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static CANNOT_LOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^cannot load such file -- (.+)$").expect("load pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static SYNTAX_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>.+?):(?P<linenum>\d+): (?P<reason>.*)$").expect("syntax pattern")
});

/// Received and expected argument counts, in that order.
pub(crate) fn arity_counts(message: &str) -> Option<(usize, usize)> {
    [&*ARITY_FOR, &*ARITY_GIVEN]
        .into_iter()
        .find_map(|re| {
            let caps = re.captures(message)?;
            let received = caps.get(1)?.as_str().parse().ok()?;
            let expected = caps.get(2)?.as_str().parse().ok()?;
            Some((received, expected))
        })
}

pub(crate) fn undefined_method_name(message: &str) -> Option<String> {
    UNDEFINED_METHOD
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub(crate) fn unloadable_path(message: &str) -> Option<String> {
    CANNOT_LOAD
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Location and reason embedded in the first line of a syntax error message.
pub(crate) fn syntax_location(message: &str) -> Option<(BacktraceLocation, String)> {
    let first_line = message.lines().next()?;
    let caps = SYNTAX_LOCATION.captures(first_line)?;
    let linenum: usize = caps.name("linenum")?.as_str().parse().ok()?;
    if linenum == 0 {
        return None;
    }
    let path = caps.name("path")?.as_str();
    let reason = caps.name("reason")?.as_str().trim().to_string();
    Some((BacktraceLocation::new(path, linenum, ""), reason))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn arity_mri_for_form() {
        assert_eq!(arity_counts("wrong number of arguments (1 for 2)"), Some((1, 2)));
        assert_eq!(
            arity_counts("wrong number of arguments calling `foo` (3 for 0)"),
            Some((3, 0))
        );
    }

    #[test]
    fn arity_rubinius_form() {
        assert_eq!(
            arity_counts("method 'foo': given 4, expected 1"),
            Some((4, 1))
        );
    }

    #[test]
    fn given_expected_wording_is_not_an_arity_count() {
        for message in [
            "wrong number of arguments (given 1, expected 2)",
            "wrong number of arguments (given 0, expected 1+)",
            "wrong number of arguments (given 5, expected 1..2)",
        ] {
            assert_eq!(arity_counts(message), None, "{message:?}");
        }
    }

    #[test]
    fn arity_rejects_other_messages() {
        for message in [
            "",
            "wrong number of arguments",
            "undefined method 'x' for nil",
            "wrong number of arguments (1 for 2) trailing",
            "wrong number of arguments (99999999999999999999999 for 2)",
        ] {
            assert_eq!(arity_counts(message), None, "{message:?}");
        }
    }

    #[test]
    fn undefined_method_names() {
        assert_eq!(
            undefined_method_name("undefined method `upcase' for nil:NilClass").as_deref(),
            Some("upcase")
        );
        assert_eq!(
            undefined_method_name("undefined method 'upcase' for nil").as_deref(),
            Some("upcase")
        );
        assert_eq!(
            undefined_method_name("undefined local variable or method 'x' for main").as_deref(),
            Some("x")
        );
        assert_eq!(undefined_method_name("private method called"), None);
    }

    #[test]
    fn unloadable_paths() {
        assert_eq!(
            unloadable_path("cannot load such file -- nokogiri").as_deref(),
            Some("nokogiri")
        );
        assert_eq!(unloadable_path("no such file"), None);
    }

    #[test]
    fn syntax_locations() {
        let (location, reason) =
            syntax_location("/app/lib/a.rb:12: syntax error, unexpected end\nmore detail").unwrap();
        assert_eq!(location, BacktraceLocation::new("/app/lib/a.rb", 12, ""));
        assert_eq!(reason, "syntax error, unexpected end");
        assert_eq!(syntax_location("syntax errors found"), None);
        assert_eq!(syntax_location("/a.rb:0: bad"), None);
    }
}
