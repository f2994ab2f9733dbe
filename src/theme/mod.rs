mod ansi;
mod plain;

pub use ansi::AnsiTheme;
pub use plain::PlainTheme;

use serde::Deserialize;

pub const SEPARATOR_WIDTH: usize = 70;

pub trait Theme: Send + Sync {
    fn white(&self, text: &str) -> String;
    fn bri_red(&self, text: &str) -> String;
    fn dim_red(&self, text: &str) -> String;
    fn none(&self, text: &str) -> String;

    fn classname(&self, text: &str) -> String;
    fn message(&self, text: &str) -> String;
    fn explanation(&self, text: &str) -> String;
    fn context(&self, text: &str) -> String;
    fn details(&self, text: &str) -> String;

    fn separator_line(&self) -> String;
    /// Lay already-rendered columns out side by side, newline included.
    fn columns(&self, columns: &[String]) -> String;

    fn color_path(&self, text: &str) -> String;
    fn color_filename(&self, text: &str) -> String;
    fn color_linenum(&self, text: &str) -> String;
    fn mark_linenum(&self, text: &str) -> String;

    fn syntax_highlight(&self, code: &str) -> String;
    /// Decorate every occurrence of `token` on line `line_index` of `code`.
    fn highlight_text(&self, code: &str, line_index: usize, token: &str) -> String;
    fn underline(&self, text: &str) -> String;
    fn indent(&self, code: &str, prefix: &str) -> String;
    fn desaturate(&self, code: &str) -> String;
    fn screaming_red(&self, text: &str) -> String;
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Ansi,
    Plain,
}

impl ThemeName {
    pub fn build(self) -> Box<dyn Theme> {
        match self {
            Self::Ansi => Box::new(AnsiTheme),
            Self::Plain => Box::new(PlainTheme),
        }
    }
}

pub(crate) fn indent_lines(code: &str, prefix: &str) -> String {
    code.split_inclusive('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect()
}

pub(crate) fn map_line(
    code: &str,
    line_index: usize,
    token: &str,
    decorate: impl Fn(&str) -> String,
) -> String {
    if token.is_empty() {
        return code.to_string();
    }
    code.split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == line_index {
                decorate_visible(line, token, &decorate)
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn decorate_visible(line: &str, token: &str, decorate: &impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for escape in ansi::ESCAPE.find_iter(line) {
        out.push_str(&line[last..escape.start()].replace(token, &decorate(token)));
        out.push_str(escape.as_str());
        last = escape.end();
    }
    out.push_str(&line[last..].replace(token, &decorate(token)));
    out
}
