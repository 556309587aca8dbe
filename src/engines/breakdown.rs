//! Task breakdown engine: expands a category phase template into a
//! dated, role-assigned task list with dependencies and milestones.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Difficulty, Priority};
use crate::knowledge::phases::{
    keywords_for_role, phases_for_category, PhaseTemplate, AI_ML_PHASES, DEFAULT_TASK_HOURS,
    MOBILE_PHASES, TASK_BASE_HOURS,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDetails {
    pub category: String,
    pub complexity: Difficulty,
    pub technologies: Vec<String>,
}

/// Team roles arrive either as bare strings or as `{ "role": ... }`
/// objects; both shapes are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TeamRole {
    Name(String),
    Assignment { role: String },
}

impl TeamRole {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Assignment { role } => role,
        }
    }
}

fn default_duration() -> u32 {
    10
}

fn default_unit() -> TimelineUnit {
    TimelineUnit::Weeks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineUnit {
    Weeks,
    Months,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineRequest {
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default = "default_unit")]
    pub unit: TimelineUnit,
}

impl Default for TimelineRequest {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            unit: default_unit(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTask {
    pub id: String,
    pub title: &'static str,
    pub description: String,
    pub estimated_hours: u32,
    pub priority: Priority,
    pub skills: Vec<&'static str>,
    pub phase: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: &'static str,
    pub description: String,
    pub duration: u32,
    pub tasks: Vec<PhaseTask>,
    pub order: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeAssignee {
    pub role: String,
    pub confidence: f64,
}

/// A task after role assignment, dependency derivation, and scheduling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: PhaseTask,
    pub assigned_to: String,
    pub assignment_confidence: f64,
    pub alternative_assignees: Vec<AlternativeAssignee>,
    pub dependencies: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub tasks: Vec<String>,
    pub criteria: Vec<String>,
    pub phase: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimeline {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration: u32,
    pub unit: TimelineUnit,
    pub total_estimated_hours: u32,
    pub team_size: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSummary {
    pub total_tasks: usize,
    pub total_estimated_hours: u32,
    pub total_milestones: usize,
    pub role_distribution: BTreeMap<String, usize>,
    pub priority_distribution: BTreeMap<&'static str, usize>,
    pub average_task_hours: u32,
    pub estimated_team_weeks: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRecommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdown {
    pub phases: Vec<Phase>,
    pub tasks: Vec<ScheduledTask>,
    pub milestones: Vec<Milestone>,
    pub timeline: ProjectTimeline,
    pub summary: BreakdownSummary,
    pub recommendations: Vec<BreakdownRecommendation>,
    pub generated_at: DateTime<Utc>,
}

/// Expand a project into phases, scheduled tasks, and milestones. `now`
/// anchors every generated date so callers (and tests) control the clock.
pub fn breakdown_project(
    project: &ProjectDetails,
    team_roles: &[TeamRole],
    timeline: &TimelineRequest,
    now: DateTime<Utc>,
) -> ProjectBreakdown {
    let templates = select_templates(&project.category, &project.technologies);
    let phases = generate_phases(&templates, project.complexity);

    let role_names: Vec<&str> = team_roles.iter().map(|r| r.name()).collect();
    let assigned = assign_tasks(&phases, &role_names);
    let tasks = schedule_tasks(assigned, &phases, now);

    let milestones = generate_milestones(&phases, now);
    let project_timeline = calculate_timeline(&tasks, timeline, now);
    let summary = summarize(&tasks, &milestones);
    let recommendations = recommendations(&tasks, team_roles.len());

    ProjectBreakdown {
        phases,
        tasks,
        milestones,
        timeline: project_timeline,
        summary,
        recommendations,
        generated_at: now,
    }
}

/// Base template by category plus extra phase blocks appended when
/// trigger technologies are present. Concatenation, not a topical merge.
fn select_templates(category: &str, technologies: &[String]) -> Vec<&'static PhaseTemplate> {
    let mut phases: Vec<&'static PhaseTemplate> = phases_for_category(category).iter().collect();

    let has = |name: &str| technologies.iter().any(|t| t == name);
    if has("React Native") || has("Flutter") {
        phases.extend(MOBILE_PHASES.iter());
    }
    if has("TensorFlow") || has("PyTorch") || has("OpenAI API") {
        phases.extend(AI_ML_PHASES.iter());
    }

    phases
}

fn complexity_duration_multiplier(complexity: Difficulty) -> f64 {
    match complexity {
        Difficulty::Beginner => 0.8,
        Difficulty::Intermediate => 1.0,
        Difficulty::Advanced => 1.3,
    }
}

fn complexity_hours_multiplier(complexity: Difficulty) -> f64 {
    match complexity {
        Difficulty::Beginner => 0.7,
        Difficulty::Intermediate => 1.0,
        Difficulty::Advanced => 1.5,
    }
}

fn generate_phases(templates: &[&'static PhaseTemplate], complexity: Difficulty) -> Vec<Phase> {
    let multiplier = complexity_duration_multiplier(complexity);

    templates
        .iter()
        .enumerate()
        .map(|(index, template)| Phase {
            id: format!("phase-{}", index + 1),
            name: template.name,
            description: format!("{} phase of the project", template.name),
            duration: (template.duration_weeks * multiplier).ceil() as u32,
            tasks: template
                .tasks
                .iter()
                .enumerate()
                .map(|(task_index, title)| PhaseTask {
                    id: format!("task-{}-{}", index + 1, task_index + 1),
                    title,
                    description: task_description(title, complexity),
                    estimated_hours: estimate_task_hours(title, complexity),
                    priority: task_priority(title, index),
                    skills: required_skills(title),
                    phase: template.name,
                    status: "pending",
                })
                .collect(),
            order: index + 1,
        })
        .collect()
}

fn task_description(title: &str, complexity: Difficulty) -> String {
    let title = title.to_lowercase();
    match complexity {
        Difficulty::Beginner => format!(
            "Basic implementation of {title}. Focus on core functionality with simple, well-documented code."
        ),
        Difficulty::Intermediate => format!(
            "Comprehensive implementation of {title}. Include error handling, optimization, and best practices."
        ),
        Difficulty::Advanced => format!(
            "Advanced implementation of {title}. Include scalability considerations, performance optimization, and industry standards."
        ),
    }
}

/// First matching keyword in the title picks the base estimate, scaled by
/// complexity and rounded up.
fn estimate_task_hours(title: &str, complexity: Difficulty) -> u32 {
    let title = title.to_lowercase();
    let base = TASK_BASE_HOURS
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, hours)| *hours)
        .unwrap_or(DEFAULT_TASK_HOURS);

    (base as f64 * complexity_hours_multiplier(complexity)).ceil() as u32
}

fn task_priority(title: &str, phase_index: usize) -> Priority {
    let title = title.to_lowercase();
    let high = phase_index == 0
        || title.contains("setup")
        || title.contains("planning")
        || title.contains("testing")
        || title.contains("deployment")
        || title.contains("core")
        || title.contains("main");
    if high {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn required_skills(title: &str) -> Vec<&'static str> {
    let title = title.to_lowercase();
    let mut skills = Vec::new();

    if title.contains("ui") || title.contains("frontend") {
        skills.extend(["Frontend Development", "UI/UX Design"]);
    }
    if title.contains("api") || title.contains("backend") {
        skills.extend(["Backend Development", "API Design"]);
    }
    if title.contains("database") {
        skills.extend(["Database Design", "SQL"]);
    }
    if title.contains("testing") {
        skills.extend(["Testing", "Quality Assurance"]);
    }
    if title.contains("deployment") {
        skills.extend(["DevOps", "Cloud Computing"]);
    }

    if skills.is_empty() {
        skills.push("General Development");
    }
    skills
}

struct AssignedTask {
    task: PhaseTask,
    assigned_to: String,
    assignment_confidence: f64,
    alternative_assignees: Vec<AlternativeAssignee>,
}

/// Fraction of a role's keywords present in the task title+description.
/// Roles missing from the keyword table score zero.
fn role_task_match(task: &PhaseTask, role: &str) -> f64 {
    let keywords = keywords_for_role(role);
    if keywords.is_empty() {
        return 0.0;
    }
    let text = format!("{} {}", task.title, task.description).to_lowercase();
    let hits = keywords
        .iter()
        .filter(|keyword| text.contains(&keyword.to_lowercase()))
        .count();
    hits as f64 / keywords.len() as f64
}

fn assign_tasks(phases: &[Phase], role_names: &[&str]) -> Vec<AssignedTask> {
    phases
        .iter()
        .flat_map(|phase| phase.tasks.iter())
        .map(|task| {
            // Strict > keeps the first role on ties, so mapping order is
            // the stable tie-break.
            let mut best: Option<(&str, f64)> = None;
            for &role in role_names {
                let score = role_task_match(task, role);
                if score > best.map(|(_, s)| s).unwrap_or(0.0) {
                    best = Some((role, score));
                }
            }

            let assigned_to = best
                .map(|(role, _)| role)
                .or(role_names.first().copied())
                .unwrap_or("Project Manager")
                .to_string();

            let mut alternatives: Vec<AlternativeAssignee> = role_names
                .iter()
                .filter(|role| **role != assigned_to)
                .map(|role| AlternativeAssignee {
                    role: role.to_string(),
                    confidence: role_task_match(task, role),
                })
                .collect();
            alternatives.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            alternatives.truncate(2);

            AssignedTask {
                assignment_confidence: role_task_match(task, &assigned_to),
                assigned_to,
                alternative_assignees: alternatives,
                task: task.clone(),
            }
        })
        .collect()
}

/// Derive dependencies and dates in one forward pass. Dependencies only
/// ever reference earlier tasks in the flattened order, which keeps the
/// graph acyclic by construction.
fn schedule_tasks(
    assigned: Vec<AssignedTask>,
    phases: &[Phase],
    now: DateTime<Utc>,
) -> Vec<ScheduledTask> {
    let phase_of: Vec<usize> = phases
        .iter()
        .enumerate()
        .flat_map(|(i, phase)| std::iter::repeat_n(i, phase.tasks.len()))
        .collect();

    let mut scheduled: Vec<ScheduledTask> = Vec::with_capacity(assigned.len());

    for (index, item) in assigned.into_iter().enumerate() {
        let mut dependencies: Vec<String> = Vec::new();

        // Everything in the immediately preceding phase blocks this task.
        if phase_of[index] > 0 {
            for (dep_index, dep) in scheduled.iter().enumerate() {
                if phase_of[dep_index] == phase_of[index] - 1 {
                    dependencies.push(dep.task.id.clone());
                }
            }
        }

        // Content-based edges, restricted to earlier tasks.
        let title = item.task.title.to_lowercase();
        let wants: &[&str] = if title.contains("integration") {
            &["setup", "implementation"]
        } else if title.contains("testing") {
            &["development", "implementation"]
        } else {
            &[]
        };
        for dep in scheduled.iter() {
            let dep_title = dep.task.title.to_lowercase();
            if wants.iter().any(|needle| dep_title.contains(needle))
                && !dependencies.contains(&dep.task.id)
            {
                dependencies.push(dep.task.id.clone());
            }
        }

        let start_date = dependencies
            .iter()
            .filter_map(|id| scheduled.iter().find(|t| &t.task.id == id))
            .map(|dep| dep.end_date)
            .max()
            .unwrap_or(now);
        let working_days = item.task.estimated_hours.div_ceil(8);
        let end_date = start_date + Duration::days(i64::from(working_days));

        scheduled.push(ScheduledTask {
            task: item.task,
            assigned_to: item.assigned_to,
            assignment_confidence: item.assignment_confidence,
            alternative_assignees: item.alternative_assignees,
            dependencies,
            start_date,
            end_date,
        });
    }

    scheduled
}

/// One milestone per phase, due at the cumulative phase-duration offset
/// from `now` so later milestones never precede earlier ones.
fn generate_milestones(phases: &[Phase], now: DateTime<Utc>) -> Vec<Milestone> {
    let mut cumulative_weeks: u32 = 0;

    phases
        .iter()
        .enumerate()
        .map(|(index, phase)| {
            cumulative_weeks += phase.duration;
            Milestone {
                id: format!("milestone-{}", index + 1),
                name: format!("{} Complete", phase.name),
                description: format!("Completion of {} phase", phase.name),
                due_date: now + Duration::weeks(i64::from(cumulative_weeks)),
                tasks: phase.tasks.iter().map(|t| t.id.clone()).collect(),
                criteria: vec![
                    format!("All {} tasks completed", phase.name.to_lowercase()),
                    "Code reviewed and approved".to_string(),
                    "Documentation updated".to_string(),
                    "Quality standards met".to_string(),
                ],
                phase: phase.name,
            }
        })
        .collect()
}

const WORKING_HOURS_PER_WEEK: u32 = 40;

fn calculate_timeline(
    tasks: &[ScheduledTask],
    request: &TimelineRequest,
    now: DateTime<Utc>,
) -> ProjectTimeline {
    let total_hours: u32 = tasks.iter().map(|t| t.task.estimated_hours).sum();
    let team_size = distinct_assignees(tasks).len().max(1);

    let hours_driven = total_hours.div_ceil(WORKING_HOURS_PER_WEEK * team_size as u32);
    let duration = request.duration.max(hours_driven);

    let end_date = match request.unit {
        TimelineUnit::Weeks => now + Duration::weeks(i64::from(duration)),
        TimelineUnit::Months => now + Duration::days(i64::from(duration) * 30),
    };

    ProjectTimeline {
        start_date: now,
        end_date,
        duration,
        unit: request.unit,
        total_estimated_hours: total_hours,
        team_size,
    }
}

fn distinct_assignees(tasks: &[ScheduledTask]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for task in tasks {
        if !seen.contains(&task.assigned_to.as_str()) {
            seen.push(&task.assigned_to);
        }
    }
    seen
}

fn summarize(tasks: &[ScheduledTask], milestones: &[Milestone]) -> BreakdownSummary {
    let total_hours: u32 = tasks.iter().map(|t| t.task.estimated_hours).sum();

    let mut role_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for task in tasks {
        *role_distribution.entry(task.assigned_to.clone()).or_insert(0) += 1;
    }

    let mut priority_distribution: BTreeMap<&'static str, usize> = BTreeMap::new();
    for task in tasks {
        *priority_distribution
            .entry(task.task.priority.as_str())
            .or_insert(0) += 1;
    }

    let roles = role_distribution.len().max(1) as u32;
    BreakdownSummary {
        total_tasks: tasks.len(),
        total_estimated_hours: total_hours,
        total_milestones: milestones.len(),
        average_task_hours: (f64::from(total_hours) / tasks.len().max(1) as f64).round() as u32,
        estimated_team_weeks: total_hours.div_ceil(WORKING_HOURS_PER_WEEK * roles),
        role_distribution,
        priority_distribution,
    }
}

fn recommendations(tasks: &[ScheduledTask], team_size: usize) -> Vec<BreakdownRecommendation> {
    let mut recs = Vec::new();
    if tasks.is_empty() {
        return recs;
    }

    if team_size > 0 {
        let fair_share = tasks.len() as f64 / team_size as f64;
        let overloaded: Vec<&str> = distinct_assignees(tasks)
            .into_iter()
            .filter(|role| {
                let count = tasks.iter().filter(|t| t.assigned_to == *role).count();
                count as f64 > fair_share * 1.5
            })
            .collect();
        if !overloaded.is_empty() {
            recs.push(BreakdownRecommendation {
                kind: "workload_balance",
                message: format!("Consider redistributing tasks for: {}", overloaded.join(", ")),
                priority: Priority::Medium,
            });
        }
    }

    let high_priority = tasks
        .iter()
        .filter(|t| t.task.priority == Priority::High)
        .count();
    if high_priority as f64 > tasks.len() as f64 * 0.4 {
        recs.push(BreakdownRecommendation {
            kind: "priority_balance",
            message: "Too many high-priority tasks. Consider reprioritizing some tasks.".to_string(),
            priority: Priority::Medium,
        });
    }

    let total_hours: u32 = tasks.iter().map(|t| t.task.estimated_hours).sum();
    if total_hours > team_size as u32 * 400 {
        recs.push(BreakdownRecommendation {
            kind: "timeline",
            message: "Project timeline may be ambitious. Consider extending deadline or reducing scope."
                .to_string(),
            priority: Priority::High,
        });
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("valid date")
    }

    fn web_project() -> ProjectDetails {
        ProjectDetails {
            category: "Web Development".to_string(),
            complexity: Difficulty::Intermediate,
            technologies: vec!["React".to_string(), "Node.js".to_string()],
        }
    }

    fn web_team() -> Vec<TeamRole> {
        vec![
            TeamRole::Name("Frontend Developer".to_string()),
            TeamRole::Name("Backend Developer".to_string()),
            TeamRole::Name("Project Manager".to_string()),
        ]
    }

    #[test]
    fn web_template_yields_six_phases_of_five_tasks() {
        let result = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        assert_eq!(result.phases.len(), 6);
        assert_eq!(result.tasks.len(), 30);
        assert_eq!(result.milestones.len(), 6);
        assert!(result.phases.iter().all(|p| p.tasks.len() == 5));
    }

    #[test]
    fn mobile_technologies_append_mobile_phases() {
        let mut project = web_project();
        project.technologies.push("Flutter".to_string());
        let result = breakdown_project(&project, &web_team(), &TimelineRequest::default(), now());
        assert_eq!(result.phases.len(), 10);
        assert!(result.phases.iter().any(|p| p.name == "Platform Features"));
    }

    #[test]
    fn advanced_complexity_scales_phase_durations_up() {
        let mut project = web_project();
        project.complexity = Difficulty::Advanced;
        let advanced = breakdown_project(&project, &web_team(), &TimelineRequest::default(), now());
        let baseline = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        let advanced_weeks: u32 = advanced.phases.iter().map(|p| p.duration).sum();
        let baseline_weeks: u32 = baseline.phases.iter().map(|p| p.duration).sum();
        assert!(advanced_weeks > baseline_weeks);
    }

    #[test]
    fn dependency_graph_is_acyclic() {
        let result = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        let order: Vec<&str> = result.tasks.iter().map(|t| t.task.id.as_str()).collect();
        for (index, task) in result.tasks.iter().enumerate() {
            for dep in &task.dependencies {
                let dep_index = order
                    .iter()
                    .position(|id| id == dep)
                    .expect("dependency exists");
                assert!(dep_index < index, "{} depends on later task {}", task.task.id, dep);
            }
        }
    }

    #[test]
    fn no_task_depends_on_itself() {
        let result = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        for task in &result.tasks {
            assert!(!task.dependencies.contains(&task.task.id));
        }
    }

    #[test]
    fn task_starts_no_earlier_than_its_dependencies_end() {
        let result = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        for task in &result.tasks {
            for dep_id in &task.dependencies {
                let dep = result
                    .tasks
                    .iter()
                    .find(|t| &t.task.id == dep_id)
                    .expect("dependency exists");
                assert!(task.start_date >= dep.end_date);
            }
            assert!(task.end_date > task.start_date);
        }
    }

    #[test]
    fn milestone_due_dates_are_monotonic() {
        let result = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        for pair in result.milestones.windows(2) {
            assert!(pair[0].due_date <= pair[1].due_date);
        }
    }

    #[test]
    fn empty_team_falls_back_to_project_manager() {
        let result = breakdown_project(&web_project(), &[], &TimelineRequest::default(), now());
        assert!(result.tasks.iter().all(|t| t.assigned_to == "Project Manager"));
    }

    #[test]
    fn role_objects_and_strings_both_deserialize() {
        let roles: Vec<TeamRole> =
            serde_json::from_str(r#"["QA Engineer", {"role": "Backend Developer"}]"#)
                .expect("valid role list");
        assert_eq!(roles[0].name(), "QA Engineer");
        assert_eq!(roles[1].name(), "Backend Developer");
    }

    #[test]
    fn timeline_stretches_when_hours_exceed_capacity() {
        let request = TimelineRequest {
            duration: 1,
            unit: TimelineUnit::Weeks,
        };
        let result = breakdown_project(&web_project(), &web_team(), &request, now());
        let capacity = result.summary.total_estimated_hours.div_ceil(40 * result.timeline.team_size as u32);
        assert_eq!(result.timeline.duration, capacity.max(1));
    }

    #[test]
    fn summary_distributions_cover_all_tasks() {
        let result = breakdown_project(&web_project(), &web_team(), &TimelineRequest::default(), now());
        let by_role: usize = result.summary.role_distribution.values().sum();
        let by_priority: usize = result.summary.priority_distribution.values().sum();
        assert_eq!(by_role, result.tasks.len());
        assert_eq!(by_priority, result.tasks.len());
    }
}
