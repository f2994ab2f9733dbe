use std::sync::LazyLock;

use colored::Colorize;
use regex::{Captures, Regex};

use super::{SEPARATOR_WIDTH, Theme, indent_lines, map_line};

/// SGR escape sequences, as emitted by `colored`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
pub(crate) static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("escape pattern"));

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        (?P<comment>\#.*$)
        | (?P<string>"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*')
        | (?P<symbol>:[A-Za-z_]\w*[?!]?)
        | (?P<number>\b\d[\d_]*(?:\.\d+)?\b)
        | (?P<keyword>\b(?:def|end|class|module|if|elsif|else|unless|while|until|for|in|do|return
            |yield|begin|rescue|ensure|raise|self|nil|true|false|and|or|not|then|case|when
            |require|require_relative|super|lambda|proc|next|break)\b)
        | (?P<constant>\b[A-Z]\w*)
        "#,
    )
    .expect("syntax pattern")
});

/// Terminal colours via `colored`. Honours `NO_COLOR` / `CLICOLOR_FORCE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTheme;

impl Theme for AnsiTheme {
    fn white(&self, text: &str) -> String {
        text.bright_white().to_string()
    }

    fn bri_red(&self, text: &str) -> String {
        text.bright_red().to_string()
    }

    fn dim_red(&self, text: &str) -> String {
        text.red().dimmed().to_string()
    }

    fn none(&self, text: &str) -> String {
        text.clear().to_string()
    }

    fn classname(&self, text: &str) -> String {
        self.white(text)
    }

    fn message(&self, text: &str) -> String {
        self.bri_red(text)
    }

    fn explanation(&self, text: &str) -> String {
        self.bri_red(text)
    }

    fn context(&self, text: &str) -> String {
        text.white().to_string()
    }

    fn details(&self, text: &str) -> String {
        self.dim_red(text)
    }

    fn separator_line(&self) -> String {
        format!("{}\n", "=".repeat(SEPARATOR_WIDTH).as_str().bright_black())
    }

    fn columns(&self, columns: &[String]) -> String {
        let divider = " | ".bright_black().to_string();
        format!("{}\n", columns.join(&divider))
    }

    fn color_path(&self, text: &str) -> String {
        text.cyan().to_string()
    }

    fn color_filename(&self, text: &str) -> String {
        text.bright_cyan().bold().to_string()
    }

    fn color_linenum(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn mark_linenum(&self, text: &str) -> String {
        text.bright_red().bold().to_string()
    }

    fn syntax_highlight(&self, code: &str) -> String {
        code.split_inclusive('\n')
            .map(|line| {
                let (body, newline) = match line.strip_suffix('\n') {
                    Some(body) => (body, "\n"),
                    None => (line, ""),
                };
                let coloured = TOKEN.replace_all(body, |caps: &Captures<'_>| colour_token(caps));
                format!("{coloured}{newline}")
            })
            .collect()
    }

    fn highlight_text(&self, code: &str, line_index: usize, token: &str) -> String {
        map_line(code, line_index, token, |t| t.reversed().to_string())
    }

    fn underline(&self, text: &str) -> String {
        text.underline().to_string()
    }

    fn indent(&self, code: &str, prefix: &str) -> String {
        indent_lines(code, prefix)
    }

    fn desaturate(&self, code: &str) -> String {
        ESCAPE
            .replace_all(code, "")
            .split_inclusive('\n')
            .map(|line| match line.strip_suffix('\n') {
                Some(body) => format!("{}\n", body.dimmed()),
                None => line.dimmed().to_string(),
            })
            .collect()
    }

    fn screaming_red(&self, text: &str) -> String {
        text.on_red().bright_white().bold().to_string()
    }
}

fn colour_token(caps: &Captures<'_>) -> String {
    let whole = caps.get(0).map_or("", |m| m.as_str());
    if caps.name("comment").is_some() {
        whole.bright_black().to_string()
    } else if caps.name("string").is_some() {
        whole.green().to_string()
    } else if caps.name("symbol").is_some() {
        whole.magenta().to_string()
    } else if caps.name("number").is_some() {
        whole.cyan().to_string()
    } else if caps.name("keyword").is_some() {
        whole.blue().bold().to_string()
    } else if caps.name("constant").is_some() {
        whole.yellow().to_string()
    } else {
        whole.to_string()
    }
}
