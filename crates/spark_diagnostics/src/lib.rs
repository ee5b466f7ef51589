//! Spark Diagnostics
//!
//! 统一的诊断系统，为 Spark 前端提供带位置信息的错误报告。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体（级别、错误码、位置、注释、建议）
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning/Note）
//! - [`DiagnosticSink`] - 诊断收集器
//! - [`Emitter`] - 诊断输出器（纯文本 / 彩色 / 源码片段）
//! - [`Span`] / [`LineIndex`] - 源码位置与行列号换算
//!
//! # 示例
//!
//! ```rust
//! use spark_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
//!
//! let source = "type P = { i32 a, i32 a }";
//! let mut sink = DiagnosticSink::new();
//!
//! sink.add(
//!     Diagnostic::error("duplicate field `a`")
//!         .with_code("E0104")
//!         .span(22..23)
//!         .with_label(15..16, "first defined here")
//!         .suggest("rename one of the fields"),
//! );
//!
//! if sink.has_errors() {
//!     let emitter = Emitter::without_colors();
//!     for diag in sink.into_sorted() {
//!         emitter.emit_with_source(&diag, source);
//!     }
//! }
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;
pub mod span;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, SecondaryLabel, Suggestion};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;
pub use span::{LineCol, LineIndex, Span, SpanExt};
