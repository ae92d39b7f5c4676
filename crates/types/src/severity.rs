//! Severity types for diagnostics and validation rules.

use serde::{Deserialize, Serialize};

/// Diagnostic severity level for display.
///
/// Serialized as `"ERROR"` / `"WARNING"`, the form host editors expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticSeverity {
    /// Error - the service will be rejected by the compiler
    Error,
    /// Warning - the service compiles but is likely wrong
    Warning,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Rule severity for analyzer configuration.
///
/// This represents how a validation rule should be reported, as configured
/// by the user. Rules can be turned off, reported as warnings, or as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Rule is disabled
    Off,
    /// Rule violations are reported as warnings
    Warn,
    /// Rule violations are reported as errors (default)
    #[default]
    Error,
}

impl RuleSeverity {
    /// Convert to diagnostic severity for display.
    ///
    /// Returns `None` if the rule is off.
    #[must_use]
    pub const fn to_diagnostic_severity(self) -> Option<DiagnosticSeverity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(DiagnosticSeverity::Warning),
            Self::Error => Some(DiagnosticSeverity::Error),
        }
    }
}

impl std::fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_severity() {
        assert_eq!(format!("{}", DiagnosticSeverity::Error), "error");
        assert_eq!(format!("{}", DiagnosticSeverity::Warning), "warning");
    }

    #[test]
    fn test_diagnostic_severity_wire_form() {
        assert_eq!(
            serde_json::to_string(&DiagnosticSeverity::Error).unwrap(),
            "\"ERROR\""
        );
        assert_eq!(
            serde_json::from_str::<DiagnosticSeverity>("\"WARNING\"").unwrap(),
            DiagnosticSeverity::Warning
        );
    }

    #[test]
    fn test_rule_severity_to_diagnostic() {
        assert_eq!(RuleSeverity::Off.to_diagnostic_severity(), None);
        assert_eq!(
            RuleSeverity::Warn.to_diagnostic_severity(),
            Some(DiagnosticSeverity::Warning)
        );
        assert_eq!(
            RuleSeverity::Error.to_diagnostic_severity(),
            Some(DiagnosticSeverity::Error)
        );
    }

    #[test]
    fn test_rule_severity_default_and_parse() {
        assert_eq!(RuleSeverity::default(), RuleSeverity::Error);
        assert_eq!(
            serde_json::from_str::<RuleSeverity>("\"off\"").unwrap(),
            RuleSeverity::Off
        );
        assert_eq!(format!("{}", RuleSeverity::Warn), "warn");
    }
}
