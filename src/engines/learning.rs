//! Learning assistant: classifies a free-text question, ranks knowledge
//! base topics by word overlap, and assembles a leveled markdown
//! explanation with a matching code example.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Difficulty;
use crate::knowledge::topics::{
    lookup, Topic, COMMON_PITFALLS, CONCEPT_EXPLANATIONS, EXPRESS_ROUTE_EXAMPLE,
    PRACTICAL_APPLICATIONS, PYTHON_FUNCTION_EXAMPLE, QUESTION_TRIGGERS, REACT_COMPONENT_EXAMPLE,
    RELATED_CONCEPTS, SIMPLE_EXAMPLES, TOPICS,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelpRequest {
    pub query: String,
    pub context: String,
    pub user_level: Difficulty,
}

impl Default for HelpRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            context: String::new(),
            user_level: Difficulty::Intermediate,
        }
    }
}

/// A knowledge base topic scored against the query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTopic {
    pub topic: &'static str,
    pub relevance: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_concepts: Vec<String>,
    pub concepts: Vec<&'static str>,
    pub difficulty: Difficulty,
    pub prerequisites: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLink {
    pub title: &'static str,
    pub url: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    pub language: &'static str,
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningHelp {
    pub query: String,
    pub question_type: &'static str,
    pub relevant_topics: Vec<RankedTopic>,
    pub explanation: String,
    pub code_example: Option<CodeExample>,
    pub resources: Vec<ResourceLink>,
    pub related_concepts: Vec<&'static str>,
    pub next_steps: Vec<&'static str>,
    pub difficulty: Difficulty,
    pub estimated_time: &'static str,
    pub context: String,
    pub generated_at: DateTime<Utc>,
}

/// Answer a learning question from the static knowledge base.
pub fn provide_help(request: &HelpRequest) -> LearningHelp {
    let query = request.query.to_lowercase().trim().to_string();
    let topics = find_relevant_topics(&query);

    LearningHelp {
        question_type: question_type(&query),
        explanation: explanation(&request.query, &topics, request.user_level),
        code_example: code_example(&query, &topics),
        resources: resources(&topics),
        related_concepts: related_concepts(&topics),
        next_steps: next_steps(request.user_level),
        difficulty: assess_difficulty(&topics),
        estimated_time: estimated_time(&topics, request.user_level),
        relevant_topics: topics,
        query: request.query.clone(),
        context: request.context.clone(),
        generated_at: Utc::now(),
    }
}

/// First matching trigger phrase wins; "general" when none match.
fn question_type(query: &str) -> &'static str {
    QUESTION_TRIGGERS
        .iter()
        .find(|(trigger, _)| query.contains(trigger))
        .map(|(_, kind)| *kind)
        .unwrap_or("general")
}

/// Rank topics by word overlap with the query: a direct topic-name hit
/// scores 1.0, otherwise the fraction of concepts any query word touches.
/// Top three, stable on ties.
fn find_relevant_topics(query: &str) -> Vec<RankedTopic> {
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut ranked: Vec<RankedTopic> = TOPICS
        .iter()
        .filter_map(|topic| score_topic(topic, &words))
        .collect();

    ranked.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(3);
    ranked
}

fn word_touches(word: &str, candidate: &str) -> bool {
    candidate.contains(word) || word.contains(candidate)
}

fn score_topic(topic: &'static Topic, words: &[&str]) -> Option<RankedTopic> {
    let name = topic.name.to_lowercase();

    if words.iter().any(|word| word_touches(word, &name)) {
        return Some(ranked(topic, 1.0, Vec::new()));
    }

    let matched: Vec<String> = topic
        .concepts
        .iter()
        .map(|concept| concept.to_lowercase())
        .filter(|concept| words.iter().any(|word| word_touches(word, concept)))
        .collect();

    if matched.is_empty() {
        return None;
    }
    let relevance = matched.len() as f64 / topic.concepts.len() as f64;
    Some(ranked(topic, relevance, matched))
}

fn ranked(topic: &'static Topic, relevance: f64, matched_concepts: Vec<String>) -> RankedTopic {
    RankedTopic {
        topic: topic.name,
        relevance,
        matched_concepts,
        concepts: topic.concepts.to_vec(),
        difficulty: topic.difficulty,
        prerequisites: topic.prerequisites.to_vec(),
    }
}

fn explanation(query: &str, topics: &[RankedTopic], level: Difficulty) -> String {
    match topics.first() {
        Some(primary) => build_explanation(primary, level),
        None => generic_explanation(query),
    }
}

fn build_explanation(topic: &RankedTopic, level: Difficulty) -> String {
    let mut text = format!("## Understanding {}\n\n", topic.topic);
    text.push_str(&format!(
        "{} is a {}-level topic that's essential for modern development. ",
        topic.topic,
        topic.difficulty.as_str()
    ));

    if !topic.prerequisites.is_empty() {
        text.push_str(&format!(
            "Before diving in, make sure you're comfortable with: {}.\n\n",
            topic.prerequisites.join(", ")
        ));
    }

    text.push_str("### Key Concepts:\n\n");
    let concepts_to_show = match level {
        Difficulty::Beginner => 3,
        Difficulty::Intermediate => 5,
        Difficulty::Advanced => topic.concepts.len(),
    };
    for (index, concept) in topic.concepts.iter().take(concepts_to_show).enumerate() {
        let blurb = lookup(CONCEPT_EXPLANATIONS, concept)
            .map(String::from)
            .unwrap_or_else(|| format!("A key concept in {} development", topic.topic));
        text.push_str(&format!("{}. **{}**: {}\n", index + 1, concept, blurb));
    }

    text.push_str("\n### Practical Application:\n\n");
    text.push_str(
        lookup(PRACTICAL_APPLICATIONS, topic.topic)
            .unwrap_or("Apply these concepts to solve real-world problems in your projects."),
    );

    if level != Difficulty::Beginner {
        text.push_str("\n### Common Pitfalls to Avoid:\n\n");
        text.push_str(lookup(COMMON_PITFALLS, topic.topic).unwrap_or(
            "• Not following best practices\n• Ignoring error handling\n• Poor code organization",
        ));
    }

    text
}

fn generic_explanation(query: &str) -> String {
    format!(
        r#"I understand you're asking about "{query}". While I don't have specific information about this exact topic in my knowledge base, I can provide some general guidance:

### Approach for Learning New Topics:

1. **Start with the basics**: Look for fundamental concepts and definitions
2. **Find reliable resources**: Check official documentation, tutorials, and courses
3. **Practice hands-on**: Build small projects to reinforce learning
4. **Join communities**: Connect with others learning the same topic
5. **Ask specific questions**: Break down complex topics into smaller, manageable parts

### Recommended Learning Strategy:

- Begin with understanding the "what" and "why" before diving into "how"
- Look for practical examples and use cases
- Practice regularly and build projects
- Don't hesitate to ask for help when stuck

Would you like me to help you break down your question into more specific areas I can assist with?"#
    )
}

/// Pick a code template by query keywords, falling back to the primary
/// topic's simple example. No topics means no example at all.
fn code_example(query: &str, topics: &[RankedTopic]) -> Option<CodeExample> {
    let primary = topics.first()?;

    if query.contains("component") && primary.topic == "React" {
        return Some(example_from(&REACT_COMPONENT_EXAMPLE));
    }
    if query.contains("api") || query.contains("route") {
        return Some(example_from(&EXPRESS_ROUTE_EXAMPLE));
    }
    if query.contains("function") && primary.topic == "Python" {
        return Some(example_from(&PYTHON_FUNCTION_EXAMPLE));
    }

    SIMPLE_EXAMPLES
        .iter()
        .find(|(topic, _)| *topic == primary.topic)
        .map(|(_, template)| example_from(template))
        .or(Some(CodeExample {
            language: "text",
            code: format!("// Example code for {} would go here", primary.topic),
        }))
}

fn example_from(template: &crate::knowledge::topics::CodeExampleTemplate) -> CodeExample {
    CodeExample {
        language: template.language,
        code: template.code.to_string(),
    }
}

/// Resources across ranked topics, deduplicated by title, capped at five.
fn resources(topics: &[RankedTopic]) -> Vec<ResourceLink> {
    let mut links: Vec<ResourceLink> = Vec::new();
    for ranked in topics {
        let Some(topic) = TOPICS.iter().find(|t| t.name == ranked.topic) else {
            continue;
        };
        for resource in topic.resources {
            if !links.iter().any(|l| l.title == resource.title) {
                links.push(ResourceLink {
                    title: resource.title,
                    url: resource.url,
                    kind: resource.kind,
                });
            }
        }
    }
    links.truncate(5);
    links
}

fn related_concepts(topics: &[RankedTopic]) -> Vec<&'static str> {
    topics
        .first()
        .and_then(|primary| {
            RELATED_CONCEPTS
                .iter()
                .find(|(topic, _)| *topic == primary.topic)
                .map(|(_, related)| related.to_vec())
        })
        .unwrap_or_default()
}

fn next_steps(level: Difficulty) -> Vec<&'static str> {
    match level {
        Difficulty::Beginner => vec![
            "Start with the basics and build a simple project",
            "Practice with hands-on exercises",
            "Join online communities for support",
        ],
        Difficulty::Intermediate => vec![
            "Build a more complex project incorporating these concepts",
            "Explore advanced features and best practices",
            "Consider contributing to open source projects",
        ],
        Difficulty::Advanced => vec![
            "Implement advanced patterns and optimizations",
            "Share knowledge through teaching or mentoring",
            "Stay updated with latest developments in the field",
        ],
    }
}

fn difficulty_score(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Beginner => 1.0,
        Difficulty::Intermediate => 2.0,
        Difficulty::Advanced => 3.0,
    }
}

/// Average topic difficulty bucketed at 1.3 and 2.3.
fn assess_difficulty(topics: &[RankedTopic]) -> Difficulty {
    if topics.is_empty() {
        return Difficulty::Intermediate;
    }
    let avg: f64 = topics.iter().map(|t| difficulty_score(t.difficulty)).sum::<f64>()
        / topics.len() as f64;
    if avg <= 1.3 {
        Difficulty::Beginner
    } else if avg <= 2.3 {
        Difficulty::Intermediate
    } else {
        Difficulty::Advanced
    }
}

/// Topic complexity × per-level pace, bucketed into coarse ranges.
/// Advanced users get the smallest multiplier.
fn estimated_time(topics: &[RankedTopic], level: Difficulty) -> &'static str {
    let Some(primary) = topics.first() else {
        return "2-4 hours";
    };

    let complexity = difficulty_score(primary.difficulty);
    let pace = match level {
        Difficulty::Beginner => 4.0,
        Difficulty::Intermediate => 2.0,
        Difficulty::Advanced => 1.0,
    };

    let hours = complexity * pace;
    if hours <= 2.0 {
        "1-2 hours"
    } else if hours <= 4.0 {
        "2-4 hours"
    } else if hours <= 8.0 {
        "4-8 hours"
    } else {
        "8+ hours"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str, level: Difficulty) -> HelpRequest {
        HelpRequest {
            query: query.to_string(),
            context: String::new(),
            user_level: level,
        }
    }

    #[test]
    fn how_to_questions_classify_as_implementation() {
        let help = provide_help(&request("How to build a React component?", Difficulty::Beginner));
        assert_eq!(help.question_type, "implementation");
    }

    #[test]
    fn what_is_questions_classify_as_concept() {
        let help = provide_help(&request("What is the event loop?", Difficulty::Intermediate));
        assert_eq!(help.question_type, "concept");
    }

    #[test]
    fn unmatched_questions_classify_as_general() {
        let help = provide_help(&request("tell me about rust", Difficulty::Intermediate));
        assert_eq!(help.question_type, "general");
    }

    #[test]
    fn react_query_ranks_react_first() {
        let help = provide_help(&request("how to use react hooks", Difficulty::Intermediate));
        assert_eq!(help.relevant_topics[0].topic, "React");
        assert_eq!(help.relevant_topics[0].relevance, 1.0);
        assert!(help.relevant_topics.len() <= 3);
    }

    #[test]
    fn react_component_query_gets_component_template() {
        let help = provide_help(&request("how to write a react component", Difficulty::Intermediate));
        let example = help.code_example.expect("code example");
        assert_eq!(example.language, "javascript");
        assert!(example.code.contains("useState"));
    }

    #[test]
    fn unknown_topic_gets_generic_explanation_and_no_example() {
        let help = provide_help(&request("quantum flux capacitors", Difficulty::Intermediate));
        assert!(help.relevant_topics.is_empty());
        assert!(help.code_example.is_none());
        assert!(help.explanation.contains("general guidance"));
        assert!(help.resources.is_empty());
    }

    #[test]
    fn beginner_explanation_skips_pitfalls_section() {
        let beginner = provide_help(&request("what is react", Difficulty::Beginner));
        let advanced = provide_help(&request("what is react", Difficulty::Advanced));
        assert!(!beginner.explanation.contains("Common Pitfalls"));
        assert!(advanced.explanation.contains("Common Pitfalls"));
    }

    #[test]
    fn resources_are_deduplicated_and_capped() {
        let help = provide_help(&request(
            "react node.js python database machine learning",
            Difficulty::Intermediate,
        ));
        assert!(help.resources.len() <= 5);
        let mut titles: Vec<&str> = help.resources.iter().map(|r| r.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), help.resources.len());
    }

    #[test]
    fn machine_learning_query_is_advanced_and_slow_for_beginners() {
        let help = provide_help(&request("machine learning", Difficulty::Beginner));
        assert_eq!(help.relevant_topics[0].topic, "Machine Learning");
        assert_eq!(help.estimated_time, "8+ hours");
    }

    #[test]
    fn next_steps_vary_by_level() {
        let beginner = provide_help(&request("react", Difficulty::Beginner));
        let advanced = provide_help(&request("react", Difficulty::Advanced));
        assert_ne!(beginner.next_steps, advanced.next_steps);
        assert_eq!(beginner.next_steps.len(), 3);
    }
}
