//! Pattern tables for the code analyzer.
//!
//! Each supported language carries four tables: good-practice patterns,
//! bad-practice patterns, security patterns, and performance patterns,
//! plus a small set of control-flow patterns used for complexity scoring.
//! Only `javascript` and `python` have tables; any other language falls
//! back to neutral scores in the analyzer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Severity of a security finding, in decreasing order of score penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Per-occurrence penalty applied to the overall score.
    pub fn penalty(&self) -> f64 {
        match self {
            Self::High => 0.3,
            Self::Medium => 0.15,
            Self::Low => 0.05,
        }
    }
}

/// A quality rule: positive weights reward the pattern, negative weights
/// penalize it per occurrence.
pub struct QualityPattern {
    pub regex: Regex,
    pub description: &'static str,
    pub weight: f64,
    pub suggestion: Option<&'static str>,
}

pub struct SecurityPattern {
    pub regex: Regex,
    pub severity: Severity,
    pub description: &'static str,
    pub suggestion: &'static str,
}

pub struct PerformancePattern {
    pub regex: Regex,
    pub description: &'static str,
    pub suggestion: &'static str,
}

/// Control-flow construct pattern contributing to the complexity count.
pub struct ComplexityPattern {
    pub regex: Regex,
    pub weight: f64,
}

fn quality(pattern: &str, description: &'static str, weight: f64, suggestion: Option<&'static str>) -> Option<QualityPattern> {
    Regex::new(pattern).ok().map(|regex| QualityPattern { regex, description, weight, suggestion })
}

fn security(pattern: &str, severity: Severity, description: &'static str, suggestion: &'static str) -> Option<SecurityPattern> {
    Regex::new(pattern).ok().map(|regex| SecurityPattern { regex, severity, description, suggestion })
}

fn performance(pattern: &str, description: &'static str, suggestion: &'static str) -> Option<PerformancePattern> {
    Regex::new(pattern).ok().map(|regex| PerformancePattern { regex, description, suggestion })
}

fn complexity(pattern: &str, weight: f64) -> Option<ComplexityPattern> {
    Regex::new(pattern).ok().map(|regex| ComplexityPattern { regex, weight })
}

static JS_GOOD_PATTERNS: LazyLock<Vec<QualityPattern>> = LazyLock::new(|| {
    [
        quality(r"const\s+\w+\s*=", "Using const for immutable variables", 0.1, None),
        quality(r"async\s+function|=>\s*\{", "Using modern async/await syntax", 0.1, None),
        quality(r"(?s)try\s*\{.*catch\s*\(", "Proper error handling", 0.2, None),
        quality(r"(?ms)/\*\*.*?\*/|//.*$", "Code documentation", 0.1, None),
        quality(r"\w+\.map\(|\w+\.filter\(|\w+\.reduce\(", "Using functional programming methods", 0.1, None),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static JS_BAD_PATTERNS: LazyLock<Vec<QualityPattern>> = LazyLock::new(|| {
    [
        quality(r"var\s+\w+", "Using var instead of const/let", -0.1, Some("Use const or let instead of var")),
        quality(r"==\s*[^=]", "Using loose equality", -0.1, Some("Use strict equality (===) instead")),
        quality(r"console\.log\(", "Console.log statements in production code", -0.05, Some("Remove console.log or use proper logging")),
        quality(r"(?s)function\s*\(\s*\)\s*\{.*\}", "Empty functions", -0.1, Some("Implement function body or add TODO comment")),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static JS_SECURITY_PATTERNS: LazyLock<Vec<SecurityPattern>> = LazyLock::new(|| {
    [
        security(r"eval\(", Severity::High, "Use of eval() can lead to code injection", "Avoid eval(), use safer alternatives"),
        security(r"innerHTML\s*=", Severity::Medium, "Direct innerHTML assignment can lead to XSS", "Use textContent or sanitize input"),
        security(r"document\.write\(", Severity::Medium, "document.write can be dangerous", "Use DOM manipulation methods instead"),
        security(r"Math\.random\(\)", Severity::Low, "Math.random() is not cryptographically secure", "Use crypto.getRandomValues() for security purposes"),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static JS_PERFORMANCE_PATTERNS: LazyLock<Vec<PerformancePattern>> = LazyLock::new(|| {
    [
        performance(
            r"for\s*\(\s*var\s+\w+\s*=\s*0;\s*\w+\s*<\s*\w+\.length",
            "Inefficient loop with length check",
            "Cache array length or use for...of",
        ),
        performance(r#"\+\s*['"`]"#, "String concatenation with +", "Use template literals for better performance"),
        performance(r"document\.getElementById\(.*\)", "Repeated DOM queries", "Cache DOM references"),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static JS_COMPLEXITY_PATTERNS: LazyLock<Vec<ComplexityPattern>> = LazyLock::new(|| {
    [
        complexity(r"if\s*\(", 1.0),
        complexity(r"for\s*\(|while\s*\(", 2.0),
        complexity(r"function\s+\w+|const\s+\w+\s*=\s*\(", 1.0),
        complexity(r"class\s+\w+", 3.0),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static PY_GOOD_PATTERNS: LazyLock<Vec<QualityPattern>> = LazyLock::new(|| {
    [
        quality(r#"def\s+\w+\(.*\):\s*""""#, "Function with docstring", 0.2, None),
        quality(r"with\s+open\(", "Using context managers", 0.1, None),
        quality(r"(?s)try:\s*.*except\s+\w+:", "Specific exception handling", 0.2, None),
        quality(r#"if\s+__name__\s*==\s*['"]__main__['"]"#, "Main guard", 0.1, None),
        quality(r"\w+\s*=\s*\[.*for.*in.*\]", "List comprehensions", 0.1, None),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static PY_BAD_PATTERNS: LazyLock<Vec<QualityPattern>> = LazyLock::new(|| {
    [
        quality(r"(?m)except:\s*$", "Bare except clause", -0.2, Some("Catch specific exceptions")),
        quality(r"print\(", "Print statements in production code", -0.05, Some("Use logging instead of print")),
        quality(r"global\s+\w+", "Global variables", -0.1, Some("Avoid global variables when possible")),
        quality(r"import\s+\*", "Wildcard imports", -0.1, Some("Import specific items instead of using *")),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static PY_SECURITY_PATTERNS: LazyLock<Vec<SecurityPattern>> = LazyLock::new(|| {
    [
        security(r"exec\(", Severity::High, "Use of exec() can lead to code injection", "Avoid exec(), validate and sanitize input"),
        security(r"input\(", Severity::Medium, "Direct input() usage without validation", "Validate and sanitize user input"),
        security(r"pickle\.loads?\(", Severity::High, "Pickle can execute arbitrary code", "Use safer serialization like JSON"),
        security(r"subprocess\.call\(", Severity::Medium, "Subprocess calls can be dangerous", "Validate input and use shell=False"),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static PY_PERFORMANCE_PATTERNS: LazyLock<Vec<PerformancePattern>> = LazyLock::new(|| {
    [
        performance(r"\w+\s*\+=\s*\w+", "String concatenation in loop", "Use join() for multiple string concatenations"),
        performance(r"range\(len\(\w+\)\)", "Using range(len()) instead of enumerate", "Use enumerate() for cleaner code"),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static PY_COMPLEXITY_PATTERNS: LazyLock<Vec<ComplexityPattern>> = LazyLock::new(|| {
    [
        complexity(r"if\s+.*:", 1.0),
        complexity(r"for\s+.*:|while\s+.*:", 2.0),
        complexity(r"def\s+\w+", 1.0),
        complexity(r"class\s+\w+", 3.0),
    ]
    .into_iter()
    .flatten()
    .collect()
});

/// The full pattern set for one language.
pub struct LanguagePatterns {
    pub good: &'static [QualityPattern],
    pub bad: &'static [QualityPattern],
    pub security: &'static [SecurityPattern],
    pub performance: &'static [PerformancePattern],
    pub complexity: &'static [ComplexityPattern],
}

/// Tables for a (lowercased) language tag, or `None` for unsupported
/// languages, which the analyzer scores neutrally.
pub fn language_patterns(language: &str) -> Option<LanguagePatterns> {
    match language {
        "javascript" => Some(LanguagePatterns {
            good: &JS_GOOD_PATTERNS,
            bad: &JS_BAD_PATTERNS,
            security: &JS_SECURITY_PATTERNS,
            performance: &JS_PERFORMANCE_PATTERNS,
            complexity: &JS_COMPLEXITY_PATTERNS,
        }),
        "python" => Some(LanguagePatterns {
            good: &PY_GOOD_PATTERNS,
            bad: &PY_BAD_PATTERNS,
            security: &PY_SECURITY_PATTERNS,
            performance: &PY_PERFORMANCE_PATTERNS,
            complexity: &PY_COMPLEXITY_PATTERNS,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_javascript_patterns_compile() {
        let patterns = language_patterns("javascript").expect("javascript tables");
        assert_eq!(patterns.good.len(), 5);
        assert_eq!(patterns.bad.len(), 4);
        assert_eq!(patterns.security.len(), 4);
        assert_eq!(patterns.performance.len(), 3);
        assert_eq!(patterns.complexity.len(), 4);
    }

    #[test]
    fn all_python_patterns_compile() {
        let patterns = language_patterns("python").expect("python tables");
        assert_eq!(patterns.good.len(), 5);
        assert_eq!(patterns.bad.len(), 4);
        assert_eq!(patterns.security.len(), 4);
        assert_eq!(patterns.performance.len(), 2);
        assert_eq!(patterns.complexity.len(), 4);
    }

    #[test]
    fn unsupported_language_has_no_tables() {
        assert!(language_patterns("rust").is_none());
        assert!(language_patterns("").is_none());
    }

    #[test]
    fn eval_is_flagged_high_severity() {
        let patterns = language_patterns("javascript").unwrap();
        let hit = patterns
            .security
            .iter()
            .find(|p| p.regex.is_match("eval(userInput)"))
            .expect("eval pattern");
        assert_eq!(hit.severity, Severity::High);
    }
}
