//! Idea scoring engine: ranks the static project templates against a
//! user profile with a weighted composite of match, feasibility, and
//! learning-value scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{clamp01, fuzzy_match, overlap_ratio, Difficulty};
use crate::knowledge::templates::{
    self, IdeaTemplate, AI_TECHS, BACKEND_TECHS, BLOCKCHAIN_TECHS, DATABASE_TECHS, FRONTEND_TECHS,
    IDEA_TEMPLATES, MOBILE_TECHS, REALTIME_TECHS,
};

fn default_experience() -> Difficulty {
    Difficulty::Beginner
}

/// Skills, interests, and experience of the requesting student.
/// Missing arrays default to empty rather than erroring.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub experience: Difficulty,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            interests: Vec::new(),
            experience: default_experience(),
        }
    }
}

/// Optional filters applied before scoring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaPreferences {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// A template enriched with request-scoped scores and derived metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedIdea {
    pub id: Uuid,
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: Vec<&'static str>,
    pub difficulty: Difficulty,
    pub duration: &'static str,
    pub category: &'static str,
    pub match_score: f64,
    pub feasibility_score: f64,
    pub learning_value: f64,
    pub overall_score: f64,
    pub estimated_team_size: u32,
    pub suggested_roles: Vec<&'static str>,
    pub industry_relevance: &'static str,
    pub learning_outcomes: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEcho {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub experience: Difficulty,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSet {
    pub projects: Vec<RankedIdea>,
    pub total_generated: usize,
    pub based_on: ProfileEcho,
    pub generated_at: DateTime<Utc>,
}

const TOP_IDEAS: usize = 8;

/// Rank all templates against the profile and return the top candidates.
pub fn generate_ideas(profile: &UserProfile, preferences: &IdeaPreferences) -> IdeaSet {
    let mut scored: Vec<RankedIdea> = IDEA_TEMPLATES
        .iter()
        .filter(|t| {
            preferences
                .category
                .as_deref()
                .is_none_or(|c| t.category == c)
        })
        .filter(|t| preferences.difficulty.is_none_or(|d| t.difficulty == d))
        .map(|template| score_template(template, profile))
        .collect();

    // Stable sort keeps ranking deterministic when composites tie.
    scored.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(TOP_IDEAS);

    IdeaSet {
        total_generated: scored.len(),
        projects: scored,
        based_on: ProfileEcho {
            skills: profile.skills.clone(),
            interests: profile.interests.clone(),
            experience: profile.experience,
        },
        generated_at: Utc::now(),
    }
}

fn score_template(template: &IdeaTemplate, profile: &UserProfile) -> RankedIdea {
    let match_score = match_score(template, profile);
    let feasibility_score = feasibility_score(profile.experience, template.difficulty);
    let learning_value = learning_value(template, &profile.skills);
    let overall_score = clamp01(match_score * 0.4 + feasibility_score * 0.3 + learning_value * 0.3);

    RankedIdea {
        id: Uuid::new_v4(),
        title: template.title,
        description: template.description,
        technologies: template.technologies.to_vec(),
        difficulty: template.difficulty,
        duration: template.duration,
        category: template.category,
        match_score,
        feasibility_score,
        learning_value,
        overall_score,
        estimated_team_size: estimate_team_size(template),
        suggested_roles: suggest_roles(template),
        industry_relevance: templates::industry_relevance(template.category),
        learning_outcomes: learning_outcomes(template),
    }
}

/// 0.4·skill overlap + 0.3·interest overlap + 0.3·category hit, clamped.
fn match_score(template: &IdeaTemplate, profile: &UserProfile) -> f64 {
    let skill_overlap = overlap_ratio(template.technologies, &profile.skills);

    let interest_hits = profile
        .interests
        .iter()
        .filter(|interest| {
            fuzzy_contains(template.category, interest)
                || fuzzy_contains(template.description, interest)
                || template.technologies.iter().any(|t| fuzzy_contains(t, interest))
        })
        .count();
    let interest_overlap = interest_hits as f64 / profile.interests.len().max(1) as f64;

    let category_hit = profile
        .interests
        .iter()
        .any(|interest| fuzzy_contains(template.category, interest));

    clamp01(skill_overlap * 0.4 + interest_overlap * 0.3 + if category_hit { 0.3 } else { 0.0 })
}

/// One-directional containment: does `haystack` contain `needle`,
/// case-insensitively. Interests match categories this way around only.
fn fuzzy_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Static feasibility table keyed by (experience, template difficulty).
fn feasibility_score(experience: Difficulty, difficulty: Difficulty) -> f64 {
    use Difficulty::*;
    match (experience, difficulty) {
        (Beginner, Beginner) => 1.0,
        (Beginner, Intermediate) => 0.6,
        (Beginner, Advanced) => 0.3,
        (Intermediate, Beginner) => 0.8,
        (Intermediate, Intermediate) => 1.0,
        (Intermediate, Advanced) => 0.7,
        (Advanced, Beginner) => 0.6,
        (Advanced, Intermediate) => 0.9,
        (Advanced, Advanced) => 1.0,
    }
}

/// Fraction of template technologies the user does not already know.
fn learning_value(template: &IdeaTemplate, skills: &[String]) -> f64 {
    if template.technologies.is_empty() {
        return 0.0;
    }
    let new_techs = template
        .technologies
        .iter()
        .filter(|tech| !skills.iter().any(|skill| fuzzy_match(tech, skill)))
        .count();
    clamp01(new_techs as f64 / template.technologies.len() as f64)
}

fn estimate_team_size(template: &IdeaTemplate) -> u32 {
    let base = match template.difficulty {
        Difficulty::Beginner => 2,
        Difficulty::Intermediate => 3,
        Difficulty::Advanced => 4,
    };
    let tech_bonus = template.technologies.len() as u32 / 3;
    (base + tech_bonus).clamp(2, 6)
}

fn uses_any(template: &IdeaTemplate, group: &[&str]) -> bool {
    template.technologies.iter().any(|t| group.contains(t))
}

fn suggest_roles(template: &IdeaTemplate) -> Vec<&'static str> {
    let mut roles = Vec::new();

    if uses_any(template, FRONTEND_TECHS) {
        roles.push("Frontend Developer");
    }
    if uses_any(template, BACKEND_TECHS) {
        roles.push("Backend Developer");
    }
    if uses_any(template, MOBILE_TECHS) {
        roles.push("Mobile Developer");
    }
    if uses_any(template, AI_TECHS) {
        roles.push("AI/ML Engineer");
    }
    if uses_any(template, BLOCKCHAIN_TECHS) {
        roles.push("Blockchain Developer");
    }
    if uses_any(template, DATABASE_TECHS) {
        roles.push("Database Engineer");
    }

    roles.push("Project Manager");
    if roles.len() > 2 {
        roles.push("QA Engineer");
    }

    roles
}

fn learning_outcomes(template: &IdeaTemplate) -> Vec<&'static str> {
    let mut outcomes = Vec::new();

    if uses_any(template, &FRONTEND_TECHS[..3]) {
        outcomes.push("Modern frontend development");
    }
    if uses_any(template, &["Node.js", "Express"]) {
        outcomes.push("Backend API development");
    }
    if uses_any(template, &["MongoDB", "PostgreSQL"]) {
        outcomes.push("Database design and management");
    }
    if uses_any(template, &["TensorFlow", "PyTorch"]) {
        outcomes.push("Machine learning implementation");
    }
    if uses_any(template, REALTIME_TECHS) {
        outcomes.push("Real-time communication");
    }

    outcomes.push("Project management and teamwork");
    outcomes.push("Version control with Git");
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(skills: &[&str], interests: &[&str], experience: Difficulty) -> UserProfile {
        UserProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            experience,
        }
    }

    #[test]
    fn scores_stay_in_unit_range_for_empty_profile() {
        let set = generate_ideas(&UserProfile::default(), &IdeaPreferences::default());
        assert!(!set.projects.is_empty());
        for idea in &set.projects {
            assert!((0.0..=1.0).contains(&idea.match_score));
            assert!((0.0..=1.0).contains(&idea.feasibility_score));
            assert!((0.0..=1.0).contains(&idea.learning_value));
            assert!((0.0..=1.0).contains(&idea.overall_score));
        }
    }

    #[test]
    fn returns_at_most_eight_ideas() {
        let set = generate_ideas(&UserProfile::default(), &IdeaPreferences::default());
        assert!(set.projects.len() <= 8);
        assert_eq!(set.total_generated, set.projects.len());
    }

    #[test]
    fn ranking_is_deterministic_for_identical_input() {
        let p = profile(&["React", "Node.js"], &["web"], Difficulty::Intermediate);
        let prefs = IdeaPreferences::default();
        let first: Vec<_> = generate_ideas(&p, &prefs)
            .projects
            .iter()
            .map(|i| i.title)
            .collect();
        let second: Vec<_> = generate_ideas(&p, &prefs)
            .projects
            .iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn category_filter_limits_candidates() {
        let prefs = IdeaPreferences {
            category: Some("Blockchain".to_string()),
            difficulty: None,
        };
        let set = generate_ideas(&UserProfile::default(), &prefs);
        assert!(set.projects.iter().all(|i| i.category == "Blockchain"));
        assert_eq!(set.projects.len(), 2);
    }

    #[test]
    fn matching_skills_beat_unrelated_skills() {
        let web = profile(&["React", "Node.js", "MongoDB"], &["web development"], Difficulty::Intermediate);
        let set = generate_ideas(&web, &IdeaPreferences::default());
        assert_eq!(set.projects[0].category, "Web Development");
        assert!(set.projects[0].match_score > 0.0);
    }

    #[test]
    fn learning_value_drops_for_known_stacks() {
        let known = profile(
            &["React", "Node.js", "MongoDB", "Stripe API"],
            &[],
            Difficulty::Intermediate,
        );
        let prefs = IdeaPreferences {
            category: Some("Web Development".to_string()),
            difficulty: None,
        };
        let set = generate_ideas(&known, &prefs);
        let ecommerce = set
            .projects
            .iter()
            .find(|i| i.title == "E-Commerce Platform")
            .expect("e-commerce template");
        assert_eq!(ecommerce.learning_value, 0.0);
    }

    #[test]
    fn team_size_clamped_between_two_and_six() {
        let set = generate_ideas(&UserProfile::default(), &IdeaPreferences::default());
        for idea in &set.projects {
            assert!((2..=6).contains(&idea.estimated_team_size));
        }
    }
}
