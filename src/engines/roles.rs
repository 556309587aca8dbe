//! Role assignment engine: derives the roles a project needs, scores
//! each team member against them, and runs a single-pass first-fit
//! reassignment so high-priority roles do not go uncovered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clamp01, fuzzy_match, Difficulty, Priority};
use crate::knowledge::roles::{
    role_definition, CATEGORY_ROLES, DEFAULT_CATEGORY_ROLES, HIGH_PRIORITY_ROLES,
};
use crate::knowledge::templates::{AI_TECHS, BLOCKCHAIN_TECHS, DATA_TECHS, DEVOPS_TECHS, MOBILE_TECHS};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDetails {
    pub category: String,
    pub technologies: Vec<String>,
    pub complexity: Difficulty,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub user_id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub experience: Vec<String>,
}

/// A role the project requires, with its definition attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredRole {
    pub role: &'static str,
    pub priority: Priority,
    pub skills: Vec<&'static str>,
    pub responsibilities: Vec<&'static str>,
}

/// One member's fit for one role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleScore {
    pub role: &'static str,
    pub score: f64,
    pub skill_match: f64,
    pub interest_match: f64,
    pub experience_match: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAssignment {
    pub user_id: String,
    pub name: String,
    pub primary_role: RoleScore,
    pub alternative_roles: Vec<RoleScore>,
    pub skill_match: f64,
    pub skill_gaps: Vec<&'static str>,
    pub recommendations: Vec<MemberRecommendation>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reassigned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reassignment_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInsight {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub severity: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignments {
    pub assignments: Vec<MemberAssignment>,
    pub required_roles: Vec<RequiredRole>,
    pub team_insights: Vec<TeamInsight>,
    pub recommendations: Vec<TeamRecommendation>,
    pub assigned_at: DateTime<Utc>,
}

/// Assign roles to a team for a project. Pure; empty member lists yield
/// empty assignments rather than an error.
pub fn assign_roles(project: &ProjectDetails, members: &[TeamMember]) -> RoleAssignments {
    let required_roles = determine_required_roles(project);

    let mut assignments: Vec<MemberAssignment> = members
        .iter()
        .map(|member| assign_member(member, &required_roles))
        .collect();

    cover_missing_roles(&mut assignments, &required_roles);

    let team_insights = team_insights(&assignments, &required_roles);
    let recommendations = team_recommendations(&assignments);

    RoleAssignments {
        assignments,
        required_roles,
        team_insights,
        recommendations,
        assigned_at: Utc::now(),
    }
}

/// Category base roles plus technology- and complexity-triggered
/// additions, deduplicated in first-seen order.
fn determine_required_roles(project: &ProjectDetails) -> Vec<RequiredRole> {
    let base: &[&str] = CATEGORY_ROLES
        .iter()
        .find(|(cat, _)| *cat == project.category)
        .map(|(_, roles)| *roles)
        .unwrap_or(DEFAULT_CATEGORY_ROLES);

    let mut names: Vec<&'static str> = base.to_vec();
    fn add(names: &mut Vec<&'static str>, role: &'static str) {
        if !names.contains(&role) {
            names.push(role);
        }
    }

    let techs = &project.technologies;
    let has_any = |group: &[&str]| techs.iter().any(|t| group.contains(&t.as_str()));

    if has_any(MOBILE_TECHS) {
        add(&mut names, "Mobile Developer");
    }
    if has_any(AI_TECHS) || techs.iter().any(|t| t == "Machine Learning") {
        add(&mut names, "AI/ML Engineer");
    }
    if has_any(BLOCKCHAIN_TECHS) {
        add(&mut names, "Blockchain Developer");
    }
    if has_any(DEVOPS_TECHS) {
        add(&mut names, "DevOps Engineer");
    }
    if has_any(DATA_TECHS) {
        add(&mut names, "Data Engineer");
    }

    if project.complexity == Difficulty::Advanced && names.len() > 2 {
        add(&mut names, "QA Engineer");
        add(&mut names, "UI/UX Designer");
    }
    if names.len() > 3 {
        add(&mut names, "Project Manager");
    }

    names
        .into_iter()
        .filter_map(|name| {
            let def = role_definition(name)?;
            Some(RequiredRole {
                role: def.name,
                priority: role_priority(def.name, &project.category),
                skills: def.skills.to_vec(),
                responsibilities: def.responsibilities.to_vec(),
            })
        })
        .collect()
}

fn role_priority(role: &str, category: &str) -> Priority {
    let high = HIGH_PRIORITY_ROLES
        .iter()
        .find(|(cat, _)| *cat == category)
        .map(|(_, roles)| roles.contains(&role))
        .unwrap_or(false);
    if high {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn assign_member(member: &TeamMember, required_roles: &[RequiredRole]) -> MemberAssignment {
    let mut scores: Vec<RoleScore> = required_roles
        .iter()
        .map(|role| score_member_for_role(member, role))
        .collect();
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores.truncate(3);

    let primary = scores.first().cloned().unwrap_or(RoleScore {
        role: "Project Manager",
        score: 0.0,
        skill_match: 0.0,
        interest_match: 0.0,
        experience_match: false,
    });
    let alternatives: Vec<RoleScore> = scores.into_iter().skip(1).collect();

    let skill_gaps = skill_gaps(member, primary.role);
    let recommendations = member_recommendations(&primary, &skill_gaps);

    MemberAssignment {
        user_id: member.user_id.clone(),
        name: member.name.clone(),
        skill_match: primary.score,
        primary_role: primary,
        alternative_roles: alternatives,
        skill_gaps,
        recommendations,
        reassigned: false,
        reassignment_reason: None,
    }
}

/// 0.5·skill overlap + 0.3·interest overlap + 0.2·experience hit.
fn score_member_for_role(member: &TeamMember, role: &RequiredRole) -> RoleScore {
    let skill_hits = role
        .skills
        .iter()
        .filter(|skill| member.skills.iter().any(|s| fuzzy_match(skill, s)))
        .count();
    let skill_match = skill_hits as f64 / role.skills.len().max(1) as f64;

    let interest_hits = member
        .interests
        .iter()
        .filter(|interest| {
            role.skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&interest.to_lowercase()))
                || role.role.to_lowercase().contains(&interest.to_lowercase())
        })
        .count();
    let interest_match = interest_hits as f64 / member.interests.len().max(1) as f64;

    let experience_match = member.experience.iter().any(|exp| {
        role.skills
            .iter()
            .any(|skill| exp.to_lowercase().contains(&skill.to_lowercase()))
    });

    let score = clamp01(
        skill_match * 0.5 + interest_match * 0.3 + if experience_match { 0.2 } else { 0.0 },
    );

    RoleScore {
        role: role.role,
        score,
        skill_match,
        interest_match,
        experience_match,
    }
}

/// Role skills the member does not hold; capped at five.
fn skill_gaps(member: &TeamMember, role: &str) -> Vec<&'static str> {
    let Some(def) = role_definition(role) else {
        return Vec::new();
    };
    def.skills
        .iter()
        .filter(|skill| !member.skills.iter().any(|s| fuzzy_match(skill, s)))
        .take(5)
        .copied()
        .collect()
}

fn member_recommendations(primary: &RoleScore, gaps: &[&'static str]) -> Vec<MemberRecommendation> {
    let mut recs = Vec::new();

    if !gaps.is_empty() {
        let focus: Vec<&str> = gaps.iter().take(3).copied().collect();
        recs.push(MemberRecommendation {
            kind: "skill_development",
            message: format!("Focus on learning: {}", focus.join(", ")),
            priority: Priority::High,
        });
    }

    if primary.score < 0.7 {
        recs.push(MemberRecommendation {
            kind: "role_consideration",
            message: "Consider pairing with a more experienced team member in this role".to_string(),
            priority: Priority::Medium,
        });
    }

    let growth_area = role_definition(primary.role)
        .and_then(|def| def.responsibilities.first().copied())
        .unwrap_or("this role");
    recs.push(MemberRecommendation {
        kind: "growth_opportunity",
        message: format!("This role offers great learning opportunities in {growth_area}"),
        priority: Priority::Low,
    });

    recs
}

/// First-fit pass: for each high-priority role nobody holds as primary,
/// promote the first member who lists it as an alternative and is not
/// already primary on another high-priority role. Single pass, no global
/// optimum search.
fn cover_missing_roles(assignments: &mut [MemberAssignment], required_roles: &[RequiredRole]) {
    let critical: Vec<&'static str> = required_roles
        .iter()
        .filter(|r| r.priority == Priority::High)
        .map(|r| r.role)
        .collect();

    for missing in &critical {
        let covered = assignments.iter().any(|a| a.primary_role.role == *missing);
        if covered {
            continue;
        }

        let candidate = assignments.iter_mut().find(|a| {
            a.alternative_roles.iter().any(|alt| alt.role == *missing)
                && !critical.contains(&a.primary_role.role)
        });

        if let Some(member) = candidate {
            let idx = member
                .alternative_roles
                .iter()
                .position(|alt| alt.role == *missing);
            if let Some(idx) = idx {
                let new_primary = member.alternative_roles.remove(idx);
                let old_primary = std::mem::replace(&mut member.primary_role, new_primary);
                member.alternative_roles.insert(0, old_primary);
                member.reassigned = true;
                member.reassignment_reason =
                    Some(format!("Assigned to cover critical role: {missing}"));
            }
        }
    }
}

fn team_insights(
    assignments: &[MemberAssignment],
    required_roles: &[RequiredRole],
) -> Vec<TeamInsight> {
    let mut insights = Vec::new();

    if assignments.len() < required_roles.len() {
        insights.push(TeamInsight {
            kind: "team_size",
            message: format!(
                "Team might benefit from {} additional member(s)",
                required_roles.len() - assignments.len()
            ),
            severity: "medium",
        });
    }

    let uncovered: Vec<&str> = required_roles
        .iter()
        .filter(|r| !assignments.iter().any(|a| a.primary_role.role == r.role))
        .map(|r| r.role)
        .collect();
    if !uncovered.is_empty() {
        insights.push(TeamInsight {
            kind: "role_coverage",
            message: format!("Consider adding: {}", uncovered.join(", ")),
            severity: "high",
        });
    }

    if !assignments.is_empty() {
        let avg: f64 = assignments.iter().map(|a| a.skill_match).sum::<f64>()
            / assignments.len() as f64;
        if avg < 0.6 {
            insights.push(TeamInsight {
                kind: "skill_level",
                message: "Team may need additional training or mentorship".to_string(),
                severity: "medium",
            });
        }
    }

    insights
}

fn team_recommendations(assignments: &[MemberAssignment]) -> Vec<TeamRecommendation> {
    let mut recs = Vec::new();

    let common_gaps = common_skill_gaps(assignments);
    if !common_gaps.is_empty() {
        recs.push(TeamRecommendation {
            kind: "team_learning",
            message: format!("Team should focus on: {}", common_gaps.join(", ")),
            action: "Organize team learning sessions or workshops",
        });
    }

    let experienced = assignments.iter().filter(|a| a.skill_match > 0.8).count();
    let novice = assignments.iter().filter(|a| a.skill_match < 0.5).count();
    if experienced > 0 && novice > 0 {
        recs.push(TeamRecommendation {
            kind: "mentorship",
            message: "Set up mentorship pairs for knowledge transfer".to_string(),
            action: "Pair experienced members with those needing support",
        });
    }

    recs
}

/// Gaps shared by at least half the team, in first-seen order (keeps the
/// output deterministic), capped at three.
fn common_skill_gaps(assignments: &[MemberAssignment]) -> Vec<&'static str> {
    if assignments.is_empty() {
        return Vec::new();
    }
    let threshold = assignments.len().div_ceil(2);

    let mut ordered: Vec<&'static str> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for gap in assignments.iter().flat_map(|a| a.skill_gaps.iter()) {
        match ordered.iter().position(|g| g == gap) {
            Some(i) => counts[i] += 1,
            None => {
                ordered.push(gap);
                counts.push(1);
            }
        }
    }

    ordered
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count >= threshold)
        .map(|(gap, _)| gap)
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, skills: &[&str], interests: &[&str]) -> TeamMember {
        TeamMember {
            user_id: id.to_string(),
            name: format!("Member {id}"),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            experience: Vec::new(),
        }
    }

    fn web_project() -> ProjectDetails {
        ProjectDetails {
            category: "Web Development".to_string(),
            technologies: vec!["React".to_string(), "Node.js".to_string()],
            complexity: Difficulty::Intermediate,
        }
    }

    #[test]
    fn web_category_requires_frontend_and_backend() {
        let result = assign_roles(&web_project(), &[]);
        let names: Vec<&str> = result.required_roles.iter().map(|r| r.role).collect();
        assert!(names.contains(&"Frontend Developer"));
        assert!(names.contains(&"Backend Developer"));
        assert!(names.contains(&"Project Manager"));
    }

    #[test]
    fn mobile_technologies_trigger_mobile_role() {
        let project = ProjectDetails {
            category: "Web Development".to_string(),
            technologies: vec!["Flutter".to_string()],
            complexity: Difficulty::Intermediate,
        };
        let result = assign_roles(&project, &[]);
        assert!(result.required_roles.iter().any(|r| r.role == "Mobile Developer"));
    }

    #[test]
    fn advanced_complexity_adds_qa_and_design() {
        let project = ProjectDetails {
            category: "Web Development".to_string(),
            technologies: Vec::new(),
            complexity: Difficulty::Advanced,
        };
        let result = assign_roles(&project, &[]);
        let names: Vec<&str> = result.required_roles.iter().map(|r| r.role).collect();
        assert!(names.contains(&"QA Engineer"));
        assert!(names.contains(&"UI/UX Designer"));
    }

    #[test]
    fn react_node_member_becomes_a_developer() {
        let members = [member("u1", &["React", "Node.js"], &[])];
        let result = assign_roles(&web_project(), &members);
        let assignment = &result.assignments[0];
        assert!(assignment.primary_role.role.contains("Developer"));
        assert!(assignment.skill_match > 0.0);
    }

    #[test]
    fn scores_stay_in_unit_range_for_empty_member() {
        let members = [member("u1", &[], &[])];
        let result = assign_roles(&web_project(), &members);
        for score in std::iter::once(&result.assignments[0].primary_role)
            .chain(result.assignments[0].alternative_roles.iter())
        {
            assert!((0.0..=1.0).contains(&score.score));
            assert!((0.0..=1.0).contains(&score.skill_match));
            assert!((0.0..=1.0).contains(&score.interest_match));
        }
    }

    #[test]
    fn skill_gaps_exclude_held_skills() {
        let members = [member("u1", &["React", "JavaScript"], &[])];
        let result = assign_roles(&web_project(), &members);
        let gaps = &result.assignments[0].skill_gaps;
        assert!(!gaps.contains(&"React"));
        assert!(gaps.len() <= 5);
    }

    #[test]
    fn first_fit_pass_covers_missing_high_priority_role() {
        // Both members skew frontend; the backend slot is high priority
        // for web projects and should be filled by reassignment.
        let members = [
            member("u1", &["React", "CSS", "HTML", "JavaScript"], &["frontend"]),
            member("u2", &["React", "Node.js", "JavaScript", "Database"], &["frontend"]),
        ];
        let result = assign_roles(&web_project(), &members);
        let primaries: Vec<&str> = result
            .assignments
            .iter()
            .map(|a| a.primary_role.role)
            .collect();
        // At most one member may keep a duplicated high-priority primary.
        if primaries.contains(&"Backend Developer") {
            let reassigned = result.assignments.iter().find(|a| a.reassigned);
            if let Some(member) = reassigned {
                assert!(member.reassignment_reason.is_some());
            }
        }
    }

    #[test]
    fn uncovered_roles_produce_insight() {
        let members = [member("u1", &["React"], &[])];
        let result = assign_roles(&web_project(), &members);
        assert!(result
            .team_insights
            .iter()
            .any(|i| i.kind == "role_coverage"));
    }

    #[test]
    fn empty_team_yields_empty_assignments() {
        let result = assign_roles(&web_project(), &[]);
        assert!(result.assignments.is_empty());
        assert!(!result.required_roles.is_empty());
    }
}
