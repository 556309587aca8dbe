use axum::http::StatusCode;
use axum_test::TestServer;
use progex_engine::api::create_router;
use progex_engine::api::middleware::EngineConfig;
use serde_json::{json, Value};

fn setup() -> TestServer {
    let app = create_router(EngineConfig::disabled());
    TestServer::new(app).expect("Failed to create test server")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_service_identity() {
        let server = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "ProgexAI AI Engine");
        assert!(body["version"].is_string());
    }
}

mod fallback {
    use super::*;

    #[tokio::test]
    async fn unknown_paths_return_json_envelope() {
        let server = setup();

        let response = server.get("/ai/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "AI endpoint not found");
    }
}

mod generate_ideas {
    use super::*;

    #[tokio::test]
    async fn wraps_ranked_ideas_in_success_envelope() {
        let server = setup();

        let response = server
            .post("/ai/generate-ideas")
            .json(&json!({
                "userProfile": {
                    "skills": ["React", "Node.js"],
                    "interests": ["web development"],
                    "experience": "intermediate"
                },
                "preferences": {}
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let projects = body["ideas"]["projects"].as_array().expect("projects array");
        assert!(!projects.is_empty());
        assert!(projects.len() <= 8);
        for project in projects {
            let score = project["overallScore"].as_f64().expect("score");
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[tokio::test]
    async fn empty_body_fields_default_instead_of_erroring() {
        let server = setup();

        let response = server.post("/ai/generate-ideas").json(&json!({})).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["ideas"]["basedOn"]["experience"], "beginner");
    }
}

mod assign_roles {
    use super::*;

    #[tokio::test]
    async fn react_node_member_is_assigned_a_developer_role() {
        let server = setup();

        let response = server
            .post("/ai/assign-roles")
            .json(&json!({
                "projectDetails": {
                    "category": "Web Development",
                    "technologies": ["React", "Node.js"],
                    "complexity": "intermediate"
                },
                "teamMembers": [{
                    "userId": "u1",
                    "name": "Sam",
                    "skills": ["React", "Node.js"],
                    "interests": [],
                    "experience": []
                }]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let assignment = &body["assignments"]["assignments"][0];
        let role = assignment["primaryRole"]["role"].as_str().expect("role");
        assert!(role.contains("Developer"));
        assert!(assignment["skillMatch"].as_f64().expect("skillMatch") > 0.0);
    }
}

mod breakdown_tasks {
    use super::*;

    #[tokio::test]
    async fn produces_phases_tasks_and_milestones() {
        let server = setup();

        let response = server
            .post("/ai/breakdown-tasks")
            .json(&json!({
                "projectDetails": {
                    "category": "Web Development",
                    "complexity": "intermediate",
                    "technologies": ["React"]
                },
                "teamRoles": ["Frontend Developer", {"role": "Backend Developer"}],
                "timeline": { "duration": 10, "unit": "weeks" }
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let breakdown = &body["breakdown"];
        assert_eq!(breakdown["phases"].as_array().expect("phases").len(), 6);
        assert_eq!(breakdown["tasks"].as_array().expect("tasks").len(), 30);
        assert_eq!(
            breakdown["milestones"].as_array().expect("milestones").len(),
            6
        );
    }
}

mod learning_help {
    use super::*;

    #[tokio::test]
    async fn answers_react_questions_with_topic_and_example() {
        let server = setup();

        let response = server
            .post("/ai/learning-help")
            .json(&json!({
                "query": "How to build a React component?",
                "context": "",
                "userLevel": "beginner"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let assistance = &body["assistance"];
        assert_eq!(assistance["questionType"], "implementation");
        assert_eq!(assistance["relevantTopics"][0]["topic"], "React");
        assert!(assistance["codeExample"]["code"].is_string());
    }
}

mod analyze_code {
    use super::*;

    #[tokio::test]
    async fn empty_code_gets_neutral_scores_not_an_error() {
        let server = setup();

        let response = server
            .post("/ai/analyze-code")
            .json(&json!({ "code": "", "language": "javascript", "context": "" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let score = body["analysis"]["qualityMetrics"]["score"]
            .as_f64()
            .expect("quality score");
        assert_eq!(score, 0.5);
    }

    #[tokio::test]
    async fn flags_eval_as_high_severity() {
        let server = setup();

        let response = server
            .post("/ai/analyze-code")
            .json(&json!({
                "code": "eval(userInput);",
                "language": "javascript",
                "context": ""
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let issues = body["analysis"]["securityIssues"]
            .as_array()
            .expect("issues");
        assert!(issues.iter().any(|i| i["severity"] == "high"));
    }
}

mod analyze_progress {
    use super::*;

    #[tokio::test]
    async fn classifies_timeline_status() {
        let server = setup();

        let response = server
            .post("/ai/analyze-progress")
            .json(&json!({
                "projectData": {
                    "id": "p1",
                    "name": "Demo",
                    "tasks": [
                        { "id": "t1", "status": "completed" },
                        { "id": "t2", "status": "pending" }
                    ],
                    "milestones": []
                },
                "teamData": { "members": [], "communications": [], "activities": [] },
                "timelineData": {
                    "startDate": "2020-01-01T00:00:00Z",
                    "endDate": "2020-01-21T00:00:00Z"
                }
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        // The window is long past, so half-done work reads as behind.
        let status = body["insights"]["timeline"]["status"]
            .as_str()
            .expect("status");
        assert!(status == "behind" || status == "critical");
    }

    #[tokio::test]
    async fn missing_timeline_yields_error_envelope() {
        let server = setup();

        let response = server
            .post("/ai/analyze-progress")
            .json(&json!({
                "projectData": { "tasks": [] },
                "teamData": {}
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to analyze progress");
        assert!(body["message"].is_string());
    }
}

mod rate_limiting {
    use super::*;

    #[tokio::test]
    async fn over_limit_requests_get_429_envelope() {
        let app = create_router(EngineConfig::with_rate_limit(2));
        let server = TestServer::new(app).expect("Failed to create test server");

        for _ in 0..2 {
            let response = server
                .post("/ai/analyze-code")
                .json(&json!({ "code": "", "language": "javascript", "context": "" }))
                .await;
            response.assert_status_ok();
        }

        let response = server
            .post("/ai/analyze-code")
            .json(&json!({ "code": "", "language": "javascript", "context": "" }))
            .await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn health_endpoint_is_not_rate_limited() {
        let app = create_router(EngineConfig::with_rate_limit(1));
        let server = TestServer::new(app).expect("Failed to create test server");

        for _ in 0..3 {
            server.get("/health").await.assert_status_ok();
        }
    }
}
