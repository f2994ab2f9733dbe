use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// MRI / JRuby: `/a/b.rb:12:in 'label'` (older interpreters open the label with a backtick).
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static MRI_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>.+?):(?P<linenum>\d+):in [`'](?P<label>.*)'$")
        .expect("MRI frame pattern")
});

/// Rubinius: `Receiver#label at /a/b.rb:12`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static RBX_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<label>\S.*?) at (?P<path>.+?):(?P<linenum>\d+)$").expect("RBX frame pattern")
});

/// Frame with no label at all: `/a/b.rb:12`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static BARE_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>.+?):(?P<linenum>\d+)$").expect("bare frame pattern")
});

/// `block in `, `block (2 levels) in `, `rescue in `, `ensure in `, possibly stacked.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:block(?: \(\d+ levels\))?|rescue|ensure) in )+")
        .expect("label prefix pattern")
});

/// One parsed backtrace frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktraceLocation {
    /// Source file of the frame. May not exist on this machine.
    pub path: PathBuf,
    /// 1-based line number.
    pub linenum: usize,
    /// Enclosing method or frame name, as printed by the interpreter.
    pub label: String,
}

impl BacktraceLocation {
    pub fn new(path: impl Into<PathBuf>, linenum: usize, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            linenum,
            label: label.into(),
        }
    }

    /// Parse a single raw frame in any supported dialect.
    pub fn parse_line(raw: &str) -> Result<Self, Error> {
        let line = raw.trim();
        let caps = MRI_FRAME
            .captures(line)
            .or_else(|| RBX_FRAME.captures(line))
            .or_else(|| BARE_FRAME.captures(line))
            .ok_or_else(|| Error::Parse {
                reason: format!("unrecognised backtrace frame: {line:?}"),
            })?;

        let path = caps.name("path").map_or("", |m| m.as_str());
        let label = caps.name("label").map_or("", |m| m.as_str());
        let digits = caps.name("linenum").map_or("", |m| m.as_str());
        let linenum: usize = digits.parse().map_err(|_| Error::Parse {
            reason: format!("line number out of range in frame: {line:?}"),
        })?;
        if linenum == 0 {
            return Err(Error::Parse {
                reason: format!("line number must be positive in frame: {line:?}"),
            });
        }

        Ok(Self::new(path, linenum, label))
    }

    /// The bare method name inside the label, suitable for finding in source.
    ///
    /// `"block in Foo#bar"` becomes `"bar"`; labels like `"<main>"` come back unchanged.
    pub fn method_name(&self) -> &str {
        let name = LABEL_PREFIX
            .find(&self.label)
            .map_or(self.label.as_str(), |prefix| &self.label[prefix.end()..]);
        if name.starts_with('<') {
            return name;
        }
        match name.rfind(['#', '.']) {
            Some(idx) => &name[idx + 1..],
            None => name,
        }
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Parse raw frames, innermost first. Malformed frames are skipped; the rest keep their order.
pub fn parse<S: AsRef<str>>(raw: &[S]) -> Vec<BacktraceLocation> {
    raw.iter()
        .filter_map(|frame| match BacktraceLocation::parse_line(frame.as_ref()) {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::debug!(frame = frame.as_ref(), error = %e, "skipping backtrace frame");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn parses_mri_frame_with_backtick() {
        let loc = BacktraceLocation::parse_line("/Users/someone/a/b/c.rb:123:in `some_method_name'")
            .unwrap();
        assert_eq!(loc.path, PathBuf::from("/Users/someone/a/b/c.rb"));
        assert_eq!(loc.linenum, 123);
        assert_eq!(loc.label, "some_method_name");
    }

    #[test]
    fn parses_mri_frame_with_quote_and_qualified_label() {
        let loc = BacktraceLocation::parse_line("lib/shop/cart.rb:7:in 'Shop::Cart#total'").unwrap();
        assert_eq!(loc.path, PathBuf::from("lib/shop/cart.rb"));
        assert_eq!(loc.linenum, 7);
        assert_eq!(loc.label, "Shop::Cart#total");
        assert_eq!(loc.method_name(), "total");
    }

    #[test]
    fn parses_rubinius_frame() {
        let loc = BacktraceLocation::parse_line("    Object#__script__ at /tmp/x.rb:3").unwrap();
        assert_eq!(loc.path, PathBuf::from("/tmp/x.rb"));
        assert_eq!(loc.linenum, 3);
        assert_eq!(loc.label, "Object#__script__");
    }

    #[test]
    fn parses_frame_without_label() {
        let loc = BacktraceLocation::parse_line("/tmp/x.rb:42").unwrap();
        assert_eq!(loc.linenum, 42);
        assert_eq!(loc.label, "");
    }

    #[test]
    fn windows_drive_letters_stay_in_path() {
        let loc = BacktraceLocation::parse_line("C:/proj/app.rb:9:in 'run'").unwrap();
        assert_eq!(loc.path, PathBuf::from("C:/proj/app.rb"));
        assert_eq!(loc.linenum, 9);
    }

    #[test]
    fn rejects_zero_and_missing_line_numbers() {
        assert!(matches!(
            BacktraceLocation::parse_line("/tmp/x.rb:0:in 'a'"),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(
            BacktraceLocation::parse_line("not a frame"),
            Err(Error::Parse { .. })
        ));
        assert!(BacktraceLocation::parse_line("/tmp/x.rb:99999999999999999999999").is_err());
    }

    #[test]
    fn malformed_frames_do_not_abort_the_trace() {
        let raw = [
            "/a.rb:1:in 'inner'",
            "garbage",
            "/b.rb:0:in 'zero'",
            "/c.rb:3:in 'outer'",
        ];
        let parsed = parse(&raw);
        let labels: Vec<_> = parsed.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["inner", "outer"]);
    }

    #[test]
    fn method_name_strips_block_prefixes() {
        let loc = BacktraceLocation::new("/a.rb", 1, "block in rescue in Foo.build");
        assert_eq!(loc.method_name(), "build");
        let main = BacktraceLocation::new("/a.rb", 1, "<main>");
        assert_eq!(main.method_name(), "<main>");
        let top = BacktraceLocation::new("/a.rb", 1, "block in <top (required)>");
        assert_eq!(top.method_name(), "<top (required)>");
        let nested = BacktraceLocation::new("/a.rb", 1, "block (2 levels) in Cart#total");
        assert_eq!(nested.method_name(), "total");
        let top_block = BacktraceLocation::new("/a.rb", 1, "block (3 levels) in <top (required)>");
        assert_eq!(top_block.method_name(), "<top (required)>");
    }

    #[test]
    fn file_name_is_basename() {
        let loc = BacktraceLocation::new("/a/b/c.rb", 1, "x");
        assert_eq!(loc.file_name(), "c.rb");
    }
}
