use super::{SEPARATOR_WIDTH, Theme, indent_lines};

/// No colour at all. Layout (separators, columns, indentation) is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn white(&self, text: &str) -> String {
        text.to_string()
    }

    fn bri_red(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim_red(&self, text: &str) -> String {
        text.to_string()
    }

    fn none(&self, text: &str) -> String {
        text.to_string()
    }

    fn classname(&self, text: &str) -> String {
        text.to_string()
    }

    fn message(&self, text: &str) -> String {
        text.to_string()
    }

    fn explanation(&self, text: &str) -> String {
        text.to_string()
    }

    fn context(&self, text: &str) -> String {
        text.to_string()
    }

    fn details(&self, text: &str) -> String {
        text.to_string()
    }

    fn separator_line(&self) -> String {
        format!("{}\n", "=".repeat(SEPARATOR_WIDTH))
    }

    fn columns(&self, columns: &[String]) -> String {
        format!("{}\n", columns.join(" | "))
    }

    fn color_path(&self, text: &str) -> String {
        text.to_string()
    }

    fn color_filename(&self, text: &str) -> String {
        text.to_string()
    }

    fn color_linenum(&self, text: &str) -> String {
        text.to_string()
    }

    fn mark_linenum(&self, text: &str) -> String {
        text.to_string()
    }

    fn syntax_highlight(&self, code: &str) -> String {
        code.to_string()
    }

    fn highlight_text(&self, code: &str, _line_index: usize, _token: &str) -> String {
        code.to_string()
    }

    fn underline(&self, text: &str) -> String {
        text.to_string()
    }

    fn indent(&self, code: &str, prefix: &str) -> String {
        indent_lines(code, prefix)
    }

    fn desaturate(&self, code: &str) -> String {
        code.to_string()
    }

    fn screaming_red(&self, text: &str) -> String {
        text.to_string()
    }
}
