//! DiagnosticLevel - 诊断级别

use ariadne::ReportKind;
use colored::*;
use std::fmt;

/// 诊断级别，Error 会让前端返回失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Note,
}

impl DiagnosticLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }

    /// 终端输出用的彩色名称
    pub fn colored_name(&self) -> ColoredString {
        let name = self.name();
        match self {
            Self::Error => name.red().bold(),
            Self::Warning => name.yellow().bold(),
            Self::Note => name.cyan().bold(),
        }
    }

    /// 源码片段输出时对应的 ariadne 报告类型
    pub fn report_kind(&self) -> ReportKind<'static> {
        match self {
            Self::Error => ReportKind::Error,
            Self::Warning => ReportKind::Warning,
            Self::Note => ReportKind::Advice,
        }
    }

    pub fn is_error(&self) -> bool {
        *self == Self::Error
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let names: Vec<String> = [
            DiagnosticLevel::Error,
            DiagnosticLevel::Warning,
            DiagnosticLevel::Note,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["error", "warning", "note"]);
    }

    #[test]
    fn test_only_errors_fail() {
        assert!(DiagnosticLevel::Error.is_error());
        assert!(!DiagnosticLevel::Warning.is_error());
        assert!(!DiagnosticLevel::Note.is_error());
    }

    #[test]
    fn test_report_kind() {
        assert!(matches!(
            DiagnosticLevel::Error.report_kind(),
            ReportKind::Error
        ));
        assert!(matches!(
            DiagnosticLevel::Note.report_kind(),
            ReportKind::Advice
        ));
    }
}
