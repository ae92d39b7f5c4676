use mqtt_types::{DiagnosticSeverity, LineRange, OffsetRange};
use serde::{Deserialize, Serialize};

/// Stable diagnostic codes emitted by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    EmptyService,
    MissingRequiredMethod,
    UnknownRemoteMethod,
    InvalidMethodSignature,
    ResourceMethodNotAllowed,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyService => "EMPTY_SERVICE",
            Self::MissingRequiredMethod => "MISSING_REQUIRED_METHOD",
            Self::UnknownRemoteMethod => "UNKNOWN_REMOTE_METHOD",
            Self::InvalidMethodSignature => "INVALID_METHOD_SIGNATURE",
            Self::ResourceMethodNotAllowed => "RESOURCE_METHOD_NOT_ALLOWED",
        }
    }

    /// Codes for which the service skeleton templates can be inserted.
    #[must_use]
    pub const fn is_fixable(self) -> bool {
        matches!(self, Self::EmptyService | Self::MissingRequiredMethod)
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finding produced by a rule, located by byte offsets in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    pub span: OffsetRange,
    pub message: String,
}

impl LintDiagnostic {
    #[must_use]
    pub fn new(span: OffsetRange, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A diagnostic as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: DiagnosticSeverity,
    pub range: LineRange,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        severity: DiagnosticSeverity,
        range: LineRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            range,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(code: DiagnosticCode, range: LineRange, message: impl Into<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Error, range, message)
    }

    #[must_use]
    pub fn warning(code: DiagnosticCode, range: LineRange, message: impl Into<String>) -> Self {
        Self::new(code, DiagnosticSeverity::Warning, range, message)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}: {}",
            self.range, self.severity, self.code, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqtt_types::Position;

    #[test]
    fn test_code_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&DiagnosticCode::EmptyService).unwrap(),
            "\"EMPTY_SERVICE\""
        );
        let code: DiagnosticCode = serde_json::from_str("\"MISSING_REQUIRED_METHOD\"").unwrap();
        assert_eq!(code, DiagnosticCode::MissingRequiredMethod);
        assert_eq!(code.to_string(), "MISSING_REQUIRED_METHOD");
    }

    #[test]
    fn test_fixable_codes() {
        assert!(DiagnosticCode::EmptyService.is_fixable());
        assert!(DiagnosticCode::MissingRequiredMethod.is_fixable());
        assert!(!DiagnosticCode::UnknownRemoteMethod.is_fixable());
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let diagnostic = Diagnostic::error(
            DiagnosticCode::EmptyService,
            LineRange::new("main.bal", Position::new(13, 0), Position::new(13, 28)),
            "Service must declare remote function 'onMessage'",
        );
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["code"], "EMPTY_SERVICE");
        assert_eq!(json["severity"], "ERROR");
        assert_eq!(json["range"]["start"]["line"], 13);
        assert_eq!(json["range"]["end"]["character"], 28);

        let back: Diagnostic = serde_json::from_value(json).unwrap();
        assert_eq!(back, diagnostic);
    }
}
