use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::semantic::{CodeRequest, Emphasis};
use crate::theme::Theme;

pub const CODE_NOT_FOUND: &str = "Can't find code\n";

const PATH_EMPHASIS_INDENT: &str = "      ";

/// Renders a window of source lines around a backtrace location.
pub struct FormatCode<'t> {
    theme: &'t dyn Theme,
    cwd: PathBuf,
}

impl<'t> FormatCode<'t> {
    pub fn new(theme: &'t dyn Theme, cwd: impl Into<PathBuf>) -> Self {
        Self {
            theme,
            cwd: cwd.into(),
        }
    }

    /// Path header, newline, then the numbered code (or the not-found placeholder).
    pub fn call(&self, request: &CodeRequest) -> String {
        let theme = self.theme;
        let location = &request.location;
        let path = &location.path;
        let (start_index, end_index) = line_bounds(location.linenum, &request.context);
        let message_offset = location.linenum.saturating_sub(1).checked_sub(start_index);
        let highlight = request.highlight.as_deref().unwrap_or(&location.label);
        let mark_linenum = request.mark.then_some(location.linenum);

        let mut path_line = [
            theme.color_path(&format!("{}/", path_to_dir(&self.cwd, path).display())),
            theme.color_filename(location.file_name()),
            ":".to_string(),
            theme.color_linenum(&location.linenum.to_string()),
        ]
        .concat();

        let mut code = match read_lines(path, start_index, end_index) {
            Some(lines) => {
                let code = remove_indentation(&lines);
                let code = theme.syntax_highlight(&code);
                let code = self.prefix_linenos_to(&code, start_index + 1, mark_linenum);
                match message_offset {
                    Some(offset) => {
                        let code = match request.message.as_deref() {
                            Some(message) => {
                                add_message_to(&code, offset, &theme.screaming_red(message))
                            }
                            None => code,
                        };
                        theme.highlight_text(&code, offset, highlight)
                    }
                    None => code,
                }
            }
            None => CODE_NOT_FOUND.to_string(),
        };

        if request.emphasis == Emphasis::Path {
            path_line = theme.underline(&path_line);
            code = theme.indent(&code, PATH_EMPHASIS_INDENT);
            code = theme.desaturate(&code);
            // desaturating strips the highlight, so put it back
            if let Some(offset) = message_offset {
                code = theme.highlight_text(&code, offset, highlight);
            }
        }

        format!("{path_line}\n{code}")
    }

    fn prefix_linenos_to(&self, code: &str, start_linenum: usize, mark: Option<usize>) -> String {
        let lines: Vec<&str> = code.split_inclusive('\n').collect();
        let max_linenum = (start_linenum + lines.len()).saturating_sub(1);
        // colon plus room for the "-> " arrow
        let width = max_linenum.to_string().len() + 4;

        lines
            .iter()
            .zip(start_linenum..)
            .map(|(line, num)| {
                let formatted = if mark == Some(num) {
                    self.theme
                        .mark_linenum(&format!("{:<width$}", format!("-> {num}:")))
                } else {
                    format!("{:<width$}", format!("   {num}:"))
                };
                format!("{} {line}", self.theme.color_linenum(&formatted))
            })
            .collect()
    }
}

/// Zero-based, inclusive start and end line indexes, clamped below at the first line only.
///
/// Saturates instead of overflowing, so absurd line numbers give an empty window.
pub fn line_bounds(linenum: usize, context: &RangeInclusive<isize>) -> (usize, usize) {
    let line_index = isize::try_from(linenum).unwrap_or(isize::MAX).saturating_sub(1);
    let clamp = |offset: isize| line_index.saturating_add(offset).max(0).unsigned_abs();
    (clamp(*context.start()), clamp(*context.end()))
}

/// Lines `start..=end` of the file, each ending in a newline. Past-EOF lines are simply absent.
fn read_lines(path: &Path, start_index: usize, end_index: usize) -> Option<Vec<String>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "source unavailable");
            return None;
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    let count = (end_index + 1).saturating_sub(start_index);
    Some(
        text.split_inclusive('\n')
            .skip(start_index)
            .take(count)
            .map(|line| {
                if line.ends_with('\n') {
                    line.to_string()
                } else {
                    format!("{line}\n")
                }
            })
            .collect(),
    )
}

/// Strip the shortest leading-whitespace prefix found on any line from every line that has it.
fn remove_indentation(lines: &[String]) -> String {
    let indentation = lines
        .iter()
        .map(|line| {
            let body = line.trim_end_matches('\n');
            let width = body.len() - body.trim_start_matches([' ', '\r', '\t']).len();
            &body[..width]
        })
        .min_by_key(|prefix| prefix.len())
        .unwrap_or_default();

    lines
        .iter()
        .map(|line| line.strip_prefix(indentation).unwrap_or(line))
        .collect()
}

fn add_message_to(code: &str, offset: usize, message: &str) -> String {
    code.split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == offset {
                format!("{} {message}\n", line.trim_end_matches('\n'))
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Directory of `path` relative to `cwd`, or its absolute directory when it lies elsewhere.
fn path_to_dir(cwd: &Path, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let dir = absolute.parent().unwrap_or(Path::new("")).to_path_buf();
    match dir.strip_prefix(cwd) {
        Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
        Ok(relative) => relative.to_path_buf(),
        Err(_) => dir,
    }
}
