//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出。没有源码时输出简要格式，
//! 有源码时借助 ariadne 渲染带代码片段的报告。

use crate::diagnostic::Diagnostic;
use crate::span::LineIndex;
use ariadne::{Color, Config, Label, Report, Source};
use colored::*;
use std::io::{self, Write};

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的输出器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断
    pub fn emit(&self, diagnostic: &Diagnostic) {
        if self.use_colors {
            self.emit_colored(diagnostic);
        } else {
            print!("{}", self.render_plain(diagnostic, None));
        }
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
            println!(); // 诊断之间空行
        }
    }

    /// 带源码片段输出到 stderr
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) {
        let stderr = io::stderr();
        if let Err(err) = self.write_with_source(diagnostic, source, stderr.lock()) {
            eprintln!("failed to render diagnostic: {}", err);
        }
    }

    /// 带源码片段写入任意输出
    ///
    /// 没有位置信息的诊断退回简要格式。
    pub fn write_with_source<W: Write>(
        &self,
        diagnostic: &Diagnostic,
        source: &str,
        mut writer: W,
    ) -> io::Result<()> {
        let Some(span) = diagnostic.span.clone() else {
            return writer.write_all(self.render_plain(diagnostic, None).as_bytes());
        };

        let file = diagnostic.file.as_deref().unwrap_or("<input>");
        let span = clamp(span, source.len());

        let mut builder = Report::build(diagnostic.level.report_kind(), file, span.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((file, span))
                    .with_message(&diagnostic.message)
                    .with_color(Color::Red),
            );

        if let Some(code) = diagnostic.code {
            builder = builder.with_code(code);
        }
        for label in &diagnostic.labels {
            builder = builder.with_label(
                Label::new((file, clamp(label.span.clone(), source.len())))
                    .with_message(&label.message)
                    .with_color(Color::Blue),
            );
        }
        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }
        for suggestion in &diagnostic.suggestions {
            match &suggestion.replacement {
                Some(replacement) => builder = builder.with_help(format!(
                    "{} (try: {})",
                    suggestion.message, replacement
                )),
                None => builder = builder.with_help(&suggestion.message),
            }
        }

        builder.finish().write((file, Source::from(source)), writer)
    }

    /// 输出带颜色的诊断
    fn emit_colored(&self, diagnostic: &Diagnostic) {
        // 级别、错误码和消息
        match diagnostic.code {
            Some(code) => println!(
                "{}[{}]: {}",
                diagnostic.level.colored_name(),
                code,
                diagnostic.message.bold()
            ),
            None => println!(
                "{}: {}",
                diagnostic.level.colored_name(),
                diagnostic.message.bold()
            ),
        }

        // 位置信息（如果有）
        if let Some(span) = &diagnostic.span {
            println!(
                "  {} {}",
                "-->".blue().bold(),
                location(diagnostic, span, None)
            );
        }

        // 注释
        for note in &diagnostic.notes {
            println!(
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            );
        }

        // 建议
        for suggestion in &diagnostic.suggestions {
            println!(
                "  {} {}",
                "=".green().bold(),
                format!("help: {}", suggestion.message).green()
            );
            if let Some(replacement) = &suggestion.replacement {
                println!("        try: {}", replacement.green().italic());
            }
        }
    }

    /// 纯文本格式，给出源码时位置显示为行列号
    pub fn render_plain(&self, diagnostic: &Diagnostic, source: Option<&str>) -> String {
        let mut out = match diagnostic.code {
            Some(code) => format!("{}[{}]: {}\n", diagnostic.level, code, diagnostic.message),
            None => format!("{}: {}\n", diagnostic.level, diagnostic.message),
        };

        if let Some(span) = &diagnostic.span {
            out.push_str(&format!("  --> {}\n", location(diagnostic, span, source)));
        }

        for label in &diagnostic.labels {
            out.push_str(&format!(
                "  --> {}: {}\n",
                location(diagnostic, &label.span, source),
                label.message
            ));
        }

        for note in &diagnostic.notes {
            out.push_str(&format!("  = note: {}\n", note));
        }

        for suggestion in &diagnostic.suggestions {
            out.push_str(&format!("  = help: {}\n", suggestion.message));
            if let Some(replacement) = &suggestion.replacement {
                out.push_str(&format!("        try: {}\n", replacement));
            }
        }
        out
    }
}

fn clamp(span: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = span.start.min(len);
    start..span.end.clamp(start, len)
}

fn location(diagnostic: &Diagnostic, span: &std::ops::Range<usize>, source: Option<&str>) -> String {
    let file = diagnostic.file.as_deref().unwrap_or("<input>");
    match source {
        Some(source) => {
            let pos = LineIndex::new(source).line_col(span.start);
            format!("{}:{}:{}", file, pos.line, pos.column)
        }
        None => format!("{}:{:?}", file, span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_creation() {
        let emitter = Emitter::new();
        assert!(emitter.use_colors);

        let emitter_no_color = Emitter::without_colors();
        assert!(!emitter_no_color.use_colors);
    }

    #[test]
    fn test_emit_basic() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("test error");

        // 这个测试只是确保不会panic
        emitter.emit(&diag);
    }

    #[test]
    fn test_render_plain_with_line_col() {
        let emitter = Emitter::without_colors();
        let source = "fun main {\n  let x = @\n}";
        let diag = Diagnostic::error("unrecognized character `@`")
            .with_code("E0003")
            .with_file("main.spk")
            .span(21..22)
            .with_note("only ASCII operators are allowed")
            .suggest("remove it");

        let text = emitter.render_plain(&diag, Some(source));
        assert!(text.starts_with("error[E0003]: unrecognized character `@`\n"));
        assert!(text.contains("  --> main.spk:2:11\n"));
        assert!(text.contains("  = note: only ASCII operators are allowed\n"));
        assert!(text.contains("  = help: remove it\n"));
    }

    #[test]
    fn test_write_with_source() {
        let emitter = Emitter::without_colors();
        let source = "type P = { i32 a, i32 a }";
        let diag = Diagnostic::error("duplicate field `a`")
            .with_code("E0104")
            .with_file("p.spk")
            .span(22..23)
            .with_label(15..16, "first defined here");

        let mut out = Vec::new();
        emitter
            .write_with_source(&diag, source, &mut out)
            .expect("write to vec");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("duplicate field `a`"));
        assert!(text.contains("E0104"));
        assert!(text.contains("p.spk"));
        assert!(text.contains("first defined here"));
    }

    #[test]
    fn test_write_without_span_falls_back() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::warning("empty module");

        let mut out = Vec::new();
        emitter
            .write_with_source(&diag, "", &mut out)
            .expect("write to vec");
        assert_eq!(String::from_utf8(out).expect("utf8"), "warning: empty module\n");
    }

    #[test]
    fn test_span_clamped_to_source() {
        assert_eq!(clamp(3..100, 10), 3..10);
        assert_eq!(clamp(20..30, 10), 10..10);
    }
}
