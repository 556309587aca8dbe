//! Code analyzer: regex-pattern sweeps over submitted source text, plus
//! a handful of heuristic maintainability and readability checks.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::clamp01;
use crate::knowledge::patterns::{language_patterns, LanguagePatterns, Severity};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub score: f64,
    pub details: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    pub severity: Severity,
    pub description: &'static str,
    pub suggestion: &'static str,
    pub occurrences: usize,
    pub lines: Vec<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceIssue {
    pub description: &'static str,
    pub suggestion: &'static str,
    pub occurrences: usize,
    pub lines: Vec<usize>,
    pub impact: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    Unknown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub level: ComplexityLevel,
    pub details: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    pub score: f64,
    pub details: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintainabilityReport {
    pub score: f64,
    pub level: &'static str,
    pub function_length: Factor,
    pub naming: Factor,
    pub comments: Factor,
    pub duplication: Factor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityReport {
    pub score: f64,
    pub level: &'static str,
    pub indentation: Factor,
    pub line_length: Factor,
    pub spacing: Factor,
    pub structure: Factor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPractice {
    pub practice: &'static str,
    pub status: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub category: &'static str,
    pub priority: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalysis {
    pub language: String,
    pub code_length: usize,
    pub line_count: usize,
    pub overall_score: f64,
    pub quality_metrics: QualityMetrics,
    pub security_issues: Vec<SecurityIssue>,
    pub performance_issues: Vec<PerformanceIssue>,
    pub suggestions: Vec<Suggestion>,
    pub strengths: Vec<&'static str>,
    pub complexity: ComplexityReport,
    pub maintainability: MaintainabilityReport,
    pub readability: ReadabilityReport,
    pub best_practices: Vec<BestPractice>,
    pub context: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Analyze a code snippet. Unsupported languages get neutral scores, and
/// empty input yields a default analysis rather than an error.
pub fn analyze_code(code: &str, language: &str, context: &str) -> CodeAnalysis {
    let language = language.to_lowercase();
    let patterns = language_patterns(&language);

    let quality_metrics = quality_metrics(code, patterns.as_ref());
    let security_issues = security_issues(code, patterns.as_ref());
    let performance_issues = performance_issues(code, patterns.as_ref());
    let complexity = complexity(code, patterns.as_ref());
    let maintainability = maintainability(code);
    let readability = readability(code, &language);
    let best_practices = best_practices(code, &language);

    let overall_score = overall_score(
        &quality_metrics,
        &security_issues,
        &performance_issues,
        &maintainability,
        &readability,
    );
    let suggestions = suggestions(
        &quality_metrics,
        &security_issues,
        &performance_issues,
        &complexity,
    );
    let strengths = strengths(
        &quality_metrics,
        &security_issues,
        &maintainability,
        &readability,
        &complexity,
    );

    CodeAnalysis {
        language,
        code_length: code.len(),
        line_count: code.split('\n').count(),
        overall_score,
        quality_metrics,
        security_issues,
        performance_issues,
        suggestions,
        strengths,
        complexity,
        maintainability,
        readability,
        best_practices,
        context: context.to_string(),
        analyzed_at: Utc::now(),
    }
}

/// Line numbers (1-based) on which a pattern fires.
fn matching_lines(code: &str, regex: &Regex) -> Vec<usize> {
    code.lines()
        .enumerate()
        .filter(|(_, line)| regex.is_match(line))
        .map(|(index, _)| index + 1)
        .collect()
}

/// Base 0.5, shifted per occurrence by each pattern's weight.
fn quality_metrics(code: &str, patterns: Option<&LanguagePatterns>) -> QualityMetrics {
    let Some(patterns) = patterns else {
        return QualityMetrics {
            score: 0.5,
            details: vec!["Language not supported for detailed analysis".to_string()],
        };
    };

    let mut score = 0.5;
    let mut details = Vec::new();

    for pattern in patterns.good.iter().chain(patterns.bad.iter()) {
        let occurrences = pattern.regex.find_iter(code).count();
        if occurrences > 0 {
            score += pattern.weight * occurrences as f64;
            let marker = if pattern.weight >= 0.0 { '\u{2713}' } else { '\u{26a0}' };
            details.push(format!("{marker} {} ({occurrences} occurrences)", pattern.description));
        }
    }

    QualityMetrics {
        score: clamp01(score),
        details,
    }
}

fn security_issues(code: &str, patterns: Option<&LanguagePatterns>) -> Vec<SecurityIssue> {
    let Some(patterns) = patterns else {
        return Vec::new();
    };
    patterns
        .security
        .iter()
        .filter_map(|pattern| {
            let occurrences = pattern.regex.find_iter(code).count();
            if occurrences == 0 {
                return None;
            }
            Some(SecurityIssue {
                severity: pattern.severity,
                description: pattern.description,
                suggestion: pattern.suggestion,
                occurrences,
                lines: matching_lines(code, &pattern.regex),
            })
        })
        .collect()
}

fn performance_issues(code: &str, patterns: Option<&LanguagePatterns>) -> Vec<PerformanceIssue> {
    let Some(patterns) = patterns else {
        return Vec::new();
    };
    patterns
        .performance
        .iter()
        .filter_map(|pattern| {
            let occurrences = pattern.regex.find_iter(code).count();
            if occurrences == 0 {
                return None;
            }
            Some(PerformanceIssue {
                description: pattern.description,
                suggestion: pattern.suggestion,
                occurrences,
                lines: matching_lines(code, &pattern.regex),
                impact: performance_impact(pattern.description),
            })
        })
        .collect()
}

fn performance_impact(description: &str) -> &'static str {
    if description.contains("loop") || description.contains("Inefficient") {
        "high"
    } else if description.contains("DOM") || description.contains("quer") {
        "medium"
    } else {
        "low"
    }
}

/// Weighted control-flow count normalized per 10 non-blank lines,
/// bucketed at 1.5 and 3.
fn complexity(code: &str, patterns: Option<&LanguagePatterns>) -> ComplexityReport {
    let Some(patterns) = patterns else {
        return ComplexityReport {
            score: None,
            level: ComplexityLevel::Unknown,
            details: "Language not supported".to_string(),
        };
    };

    let mut raw = 1.0;
    for pattern in patterns.complexity {
        raw += pattern.weight * pattern.regex.find_iter(code).count() as f64;
    }

    let lines_of_code = code.lines().filter(|line| !line.trim().is_empty()).count();
    let normalized = raw / (lines_of_code as f64 / 10.0).max(1.0);

    let level = if normalized > 3.0 {
        ComplexityLevel::High
    } else if normalized > 1.5 {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::Low
    };

    ComplexityReport {
        score: Some(normalized),
        level,
        details: format!("Complexity score: {normalized:.2}"),
    }
}

fn bucket_level(score: f64) -> &'static str {
    if score > 0.7 {
        "high"
    } else if score > 0.4 {
        "medium"
    } else {
        "low"
    }
}

static FUNCTION_BODY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"function\s+\w+[^{]*\{[^}]*\}").ok());
static IDENTIFIER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[a-z][a-zA-Z0-9]*").ok());
static COMMENT_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"//|/\*|\*/|#").ok());

fn maintainability(code: &str) -> MaintainabilityReport {
    let function_length = check_function_length(code);
    let naming = check_naming(code);
    let comments = check_comment_ratio(code);
    let duplication = check_duplication(code);

    let score =
        (function_length.score + naming.score + comments.score + duplication.score) / 4.0;

    MaintainabilityReport {
        score,
        level: bucket_level(score),
        function_length,
        naming,
        comments,
        duplication,
    }
}

fn check_function_length(code: &str) -> Factor {
    let functions: Vec<&str> = FUNCTION_BODY
        .as_ref()
        .map(|regex| regex.find_iter(code).map(|m| m.as_str()).collect())
        .unwrap_or_default();
    let total_lines: usize = functions.iter().map(|f| f.lines().count()).sum();
    let avg = total_lines as f64 / functions.len().max(1) as f64;

    let score = if avg < 20.0 {
        1.0
    } else if avg < 50.0 {
        0.7
    } else {
        0.3
    };
    Factor {
        score,
        details: format!("Average function length: {avg:.1} lines"),
    }
}

fn check_naming(code: &str) -> Factor {
    let has_identifiers = IDENTIFIER
        .as_ref()
        .map(|regex| regex.is_match(code))
        .unwrap_or(false);
    Factor {
        score: if has_identifiers { 0.8 } else { 0.5 },
        details: "Basic naming convention check".to_string(),
    }
}

fn check_comment_ratio(code: &str) -> Factor {
    let total_lines = code.split('\n').count();
    let comment_markers = COMMENT_MARKER
        .as_ref()
        .map(|regex| regex.find_iter(code).count())
        .unwrap_or(0);
    let ratio = comment_markers as f64 / total_lines.max(1) as f64;

    let score = if ratio > 0.1 {
        1.0
    } else if ratio > 0.05 {
        0.7
    } else {
        0.3
    };
    Factor {
        score,
        details: format!("Comment ratio: {:.1}%", ratio * 100.0),
    }
}

fn check_duplication(code: &str) -> Factor {
    let lines: Vec<&str> = code
        .lines()
        .filter(|line| line.trim().len() > 5)
        .collect();
    let mut unique: Vec<&str> = Vec::new();
    for line in &lines {
        if !unique.contains(line) {
            unique.push(line);
        }
    }
    let ratio = if lines.is_empty() {
        0.0
    } else {
        1.0 - unique.len() as f64 / lines.len() as f64
    };

    let score = if ratio < 0.1 {
        1.0
    } else if ratio < 0.2 {
        0.7
    } else {
        0.3
    };
    Factor {
        score,
        details: format!("Duplication ratio: {:.1}%", ratio * 100.0),
    }
}

fn readability(code: &str, language: &str) -> ReadabilityReport {
    let indentation = check_indentation(code);
    let line_length = check_line_length(code);
    let spacing = check_spacing(code);
    let structure = check_structure(code, language);

    let score = (indentation.score + line_length.score + spacing.score + structure.score) / 4.0;

    ReadabilityReport {
        score,
        level: bucket_level(score),
        indentation,
        line_length,
        spacing,
        structure,
    }
}

fn check_indentation(code: &str) -> Factor {
    let mixed = code.lines().any(|line| {
        let leading: Vec<char> = line
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        leading.contains(&' ') && leading.contains(&'\t')
    });
    Factor {
        score: if mixed { 0.3 } else { 0.9 },
        details: if mixed {
            "Mixed tabs and spaces".to_string()
        } else {
            "Consistent indentation".to_string()
        },
    }
}

fn check_line_length(code: &str) -> Factor {
    let total = code.split('\n').count();
    let long = code.split('\n').filter(|line| line.len() > 100).count();
    let ratio = long as f64 / total.max(1) as f64;

    let score = if ratio < 0.1 {
        1.0
    } else if ratio < 0.2 {
        0.7
    } else {
        0.3
    };
    Factor {
        score,
        details: format!("{long} lines exceed 100 characters"),
    }
}

/// Character scan over arithmetic/assignment operators: an operator with
/// whitespace on both sides counts as well spaced, anything else counts
/// against the ratio.
fn check_spacing(code: &str) -> Factor {
    const OPERATORS: [char; 5] = ['+', '-', '*', '/', '='];

    let chars: Vec<char> = code.chars().collect();
    let mut good = 0usize;
    let mut bad = 0usize;

    for (index, c) in chars.iter().enumerate() {
        if !OPERATORS.contains(c) {
            continue;
        }
        // Runs like `===` or `+=` are judged once, at their first char.
        if index > 0 && OPERATORS.contains(&chars[index - 1]) {
            continue;
        }
        let mut end = index;
        while end + 1 < chars.len() && OPERATORS.contains(&chars[end + 1]) {
            end += 1;
        }
        let before_ok = index == 0 || chars[index - 1].is_whitespace();
        let after_ok = end + 1 >= chars.len() || chars[end + 1].is_whitespace();
        if before_ok && after_ok {
            good += 1;
        } else {
            bad += 1;
        }
    }

    let ratio = good as f64 / (good + bad).max(1) as f64;
    let score = if ratio > 0.8 {
        1.0
    } else if ratio > 0.6 {
        0.7
    } else {
        0.3
    };
    Factor {
        score,
        details: "Operator spacing check".to_string(),
    }
}

fn check_structure(code: &str, language: &str) -> Factor {
    let structured = if language == "javascript" {
        code.contains("function") || code.contains("=>")
    } else {
        code.contains("def ")
    };
    Factor {
        score: if structured { 0.8 } else { 0.5 },
        details: "Basic code structure check".to_string(),
    }
}

fn best_practices(code: &str, language: &str) -> Vec<BestPractice> {
    let mut practices = Vec::new();

    if language == "javascript" {
        if code.contains("use strict") {
            practices.push(BestPractice {
                practice: "Strict mode",
                status: "good",
                description: "Using strict mode",
            });
        }
        if code.contains("const ") || code.contains("let ") {
            practices.push(BestPractice {
                practice: "Modern variable declarations",
                status: "good",
                description: "Using const/let instead of var",
            });
        }
        if code.contains("async") && code.contains("await") {
            practices.push(BestPractice {
                practice: "Modern async handling",
                status: "good",
                description: "Using async/await",
            });
        }
    }

    if language == "python" {
        if code.contains(r#"if __name__ == "__main__""#) {
            practices.push(BestPractice {
                practice: "Main guard",
                status: "good",
                description: "Using main guard pattern",
            });
        }
        if code.contains(r#"""""#) || code.contains("'''") {
            practices.push(BestPractice {
                practice: "Documentation",
                status: "good",
                description: "Using docstrings",
            });
        }
    }

    practices
}

/// quality·0.3 + maintainability·0.15 + readability·0.1, minus severity
/// penalties per security occurrence and 0.02 per performance issue.
fn overall_score(
    quality: &QualityMetrics,
    security: &[SecurityIssue],
    performance: &[PerformanceIssue],
    maintainability: &MaintainabilityReport,
    readability: &ReadabilityReport,
) -> f64 {
    let mut score =
        quality.score * 0.3 + maintainability.score * 0.15 + readability.score * 0.1;

    let security_penalty: f64 = security
        .iter()
        .map(|issue| issue.severity.penalty() * issue.occurrences as f64)
        .sum();
    score -= security_penalty;
    score -= performance.len() as f64 * 0.02;

    clamp01(score)
}

fn suggestions(
    quality: &QualityMetrics,
    security: &[SecurityIssue],
    performance: &[PerformanceIssue],
    complexity: &ComplexityReport,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if quality.score < 0.6 {
        suggestions.push(Suggestion {
            category: "code_quality",
            priority: "high",
            message: "Focus on improving code quality by following language best practices"
                .to_string(),
            suggestion: None,
            details: quality
                .details
                .iter()
                .filter(|d| d.starts_with('\u{26a0}'))
                .cloned()
                .collect(),
            lines: Vec::new(),
        });
    }

    for issue in security {
        if issue.severity == Severity::High {
            suggestions.push(Suggestion {
                category: "security",
                priority: "critical",
                message: issue.description.to_string(),
                suggestion: Some(issue.suggestion),
                details: Vec::new(),
                lines: issue.lines.clone(),
            });
        }
    }

    if !performance.is_empty() {
        suggestions.push(Suggestion {
            category: "performance",
            priority: "medium",
            message: format!(
                "Found {} potential performance improvements",
                performance.len()
            ),
            suggestion: None,
            details: performance.iter().map(|i| i.suggestion.to_string()).collect(),
            lines: Vec::new(),
        });
    }

    if complexity.level == ComplexityLevel::High {
        suggestions.push(Suggestion {
            category: "complexity",
            priority: "medium",
            message: "Consider breaking down complex functions into smaller, more manageable pieces"
                .to_string(),
            suggestion: Some("Refactor large functions and reduce nesting levels"),
            details: Vec::new(),
            lines: Vec::new(),
        });
    }

    suggestions
}

fn strengths(
    quality: &QualityMetrics,
    security: &[SecurityIssue],
    maintainability: &MaintainabilityReport,
    readability: &ReadabilityReport,
    complexity: &ComplexityReport,
) -> Vec<&'static str> {
    let mut strengths = Vec::new();

    if quality.score > 0.7 {
        strengths.push("Good adherence to coding standards");
    }
    if security.is_empty() {
        strengths.push("No obvious security vulnerabilities detected");
    }
    if maintainability.score > 0.7 {
        strengths.push("Well-structured and maintainable code");
    }
    if readability.score > 0.7 {
        strengths.push("Clean and readable code style");
    }
    if complexity.level == ComplexityLevel::Low {
        strengths.push("Low complexity, easy to understand");
    }

    strengths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_neutral_defaults() {
        let analysis = analyze_code("", "javascript", "");
        assert_eq!(analysis.quality_metrics.score, 0.5);
        assert!(analysis.security_issues.is_empty());
        assert!(analysis.performance_issues.is_empty());
        assert!((0.0..=1.0).contains(&analysis.overall_score));
        assert_eq!(analysis.line_count, 1);
    }

    #[test]
    fn unsupported_language_scores_neutrally() {
        let analysis = analyze_code("fn main() {}", "rust", "");
        assert_eq!(analysis.quality_metrics.score, 0.5);
        assert_eq!(analysis.complexity.level, ComplexityLevel::Unknown);
        assert!(analysis.complexity.score.is_none());
        assert!(analysis.security_issues.is_empty());
    }

    #[test]
    fn eval_is_reported_with_line_number_and_critical_suggestion() {
        let code = "const x = 1;\neval(userInput);\n";
        let analysis = analyze_code(code, "javascript", "");
        let issue = analysis
            .security_issues
            .iter()
            .find(|i| i.severity == Severity::High)
            .expect("eval issue");
        assert_eq!(issue.lines, vec![2]);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.category == "security" && s.priority == "critical"));
    }

    #[test]
    fn security_issues_drag_the_overall_score_down() {
        let clean = analyze_code("const total = items.map(i => i.price);\n", "javascript", "");
        let risky = analyze_code(
            "const total = items.map(i => i.price);\neval(payload);\n",
            "javascript",
            "",
        );
        assert!(risky.overall_score < clean.overall_score);
    }

    #[test]
    fn good_javascript_earns_quality_credit() {
        let code = "// totals\nconst sum = values.reduce((a, b) => a + b, 0);\n";
        let analysis = analyze_code(code, "javascript", "");
        assert!(analysis.quality_metrics.score > 0.5);
        assert!(!analysis.quality_metrics.details.is_empty());
    }

    #[test]
    fn dense_control_flow_rates_as_complex() {
        let code = "if (a) {}\nif (b) {}\nfor (;;) {}\nwhile (x) {}\nclass Foo {}\n";
        let analysis = analyze_code(code, "javascript", "");
        assert_eq!(analysis.complexity.level, ComplexityLevel::High);
    }

    #[test]
    fn python_main_guard_registers_as_best_practice() {
        let code = "def main():\n    pass\n\nif __name__ == \"__main__\":\n    main()\n";
        let analysis = analyze_code(code, "python", "");
        assert!(analysis
            .best_practices
            .iter()
            .any(|p| p.practice == "Main guard"));
    }

    #[test]
    fn mixed_indentation_hurts_readability() {
        let mixed = analyze_code("def f():\n\t  x = 1\n", "python", "");
        let clean = analyze_code("def f():\n    x = 1\n", "python", "");
        assert!(mixed.readability.indentation.score < clean.readability.indentation.score);
    }

    #[test]
    fn language_tag_is_case_insensitive() {
        let analysis = analyze_code("var x = 1;", "JavaScript", "");
        assert_eq!(analysis.language, "javascript");
        assert!(analysis
            .quality_metrics
            .details
            .iter()
            .any(|d| d.contains("var instead")));
    }
}
