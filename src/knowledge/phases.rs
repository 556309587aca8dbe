//! Phase/task templates for the task breakdown engine, plus the keyword
//! table that maps tasks to roles.

/// A template phase: a name, a base duration in weeks (scaled by project
/// complexity at expansion time), and its task titles.
pub struct PhaseTemplate {
    pub name: &'static str,
    pub duration_weeks: f64,
    pub tasks: &'static [&'static str],
}

pub const WEB_PHASES: &[PhaseTemplate] = &[
    PhaseTemplate {
        name: "Planning & Setup",
        duration_weeks: 1.0,
        tasks: &[
            "Project initialization and repository setup",
            "Development environment configuration",
            "Project documentation creation",
            "Technology stack finalization",
            "Team roles and responsibilities definition",
        ],
    },
    PhaseTemplate {
        name: "Design & Architecture",
        duration_weeks: 1.5,
        tasks: &[
            "UI/UX wireframes and mockups",
            "Database schema design",
            "API endpoint planning",
            "System architecture documentation",
            "Design system creation",
        ],
    },
    PhaseTemplate {
        name: "Backend Development",
        duration_weeks: 3.0,
        tasks: &[
            "Database setup and configuration",
            "Authentication system implementation",
            "Core API endpoints development",
            "Business logic implementation",
            "Data validation and error handling",
        ],
    },
    PhaseTemplate {
        name: "Frontend Development",
        duration_weeks: 3.0,
        tasks: &[
            "Component library setup",
            "User interface implementation",
            "API integration",
            "State management setup",
            "Responsive design implementation",
        ],
    },
    PhaseTemplate {
        name: "Integration & Testing",
        duration_weeks: 1.5,
        tasks: &[
            "Frontend-backend integration",
            "Unit testing implementation",
            "Integration testing",
            "User acceptance testing",
            "Performance optimization",
        ],
    },
    PhaseTemplate {
        name: "Deployment & Launch",
        duration_weeks: 1.0,
        tasks: &[
            "Production environment setup",
            "CI/CD pipeline configuration",
            "Application deployment",
            "Monitoring and logging setup",
            "Documentation finalization",
        ],
    },
];

pub const AI_ML_PHASES: &[PhaseTemplate] = &[
    PhaseTemplate {
        name: "Research & Planning",
        duration_weeks: 1.5,
        tasks: &[
            "Problem definition and scope",
            "Data requirements analysis",
            "Algorithm research and selection",
            "Technology stack evaluation",
            "Project timeline planning",
        ],
    },
    PhaseTemplate {
        name: "Data Collection & Preparation",
        duration_weeks: 2.0,
        tasks: &[
            "Data source identification",
            "Data collection and aggregation",
            "Data cleaning and preprocessing",
            "Feature engineering",
            "Data validation and quality checks",
        ],
    },
    PhaseTemplate {
        name: "Model Development",
        duration_weeks: 3.0,
        tasks: &[
            "Baseline model implementation",
            "Model architecture design",
            "Training pipeline setup",
            "Hyperparameter tuning",
            "Model evaluation and validation",
        ],
    },
    PhaseTemplate {
        name: "Integration & API",
        duration_weeks: 2.0,
        tasks: &[
            "Model serving infrastructure",
            "API endpoint development",
            "Frontend integration",
            "Real-time prediction setup",
            "Performance monitoring",
        ],
    },
    PhaseTemplate {
        name: "Testing & Optimization",
        duration_weeks: 1.5,
        tasks: &[
            "Model accuracy testing",
            "Performance benchmarking",
            "Edge case handling",
            "Model optimization",
            "A/B testing setup",
        ],
    },
];

pub const MOBILE_PHASES: &[PhaseTemplate] = &[
    PhaseTemplate {
        name: "Planning & Design",
        duration_weeks: 1.5,
        tasks: &[
            "Platform strategy definition",
            "User journey mapping",
            "UI/UX design for mobile",
            "Technical architecture planning",
            "Development environment setup",
        ],
    },
    PhaseTemplate {
        name: "Core Development",
        duration_weeks: 4.0,
        tasks: &[
            "Navigation and routing setup",
            "Core screens implementation",
            "State management integration",
            "API integration",
            "Local storage implementation",
        ],
    },
    PhaseTemplate {
        name: "Platform Features",
        duration_weeks: 2.0,
        tasks: &[
            "Device-specific features integration",
            "Push notifications setup",
            "Camera and media handling",
            "Location services integration",
            "Offline functionality",
        ],
    },
    PhaseTemplate {
        name: "Testing & Optimization",
        duration_weeks: 1.5,
        tasks: &[
            "Device testing across platforms",
            "Performance optimization",
            "Memory management",
            "Battery usage optimization",
            "App store preparation",
        ],
    },
];

/// Select the base phase template for a category. Web Development doubles
/// as the fallback for unknown categories.
pub fn phases_for_category(category: &str) -> &'static [PhaseTemplate] {
    match category {
        "AI/ML" => AI_ML_PHASES,
        "Mobile Development" => MOBILE_PHASES,
        _ => WEB_PHASES,
    }
}

/// Keywords used to match a task's title+description to a role. Order is
/// the stable tie-break when two roles score equally.
pub const ROLE_TASK_KEYWORDS: &[(&str, &[&str])] = &[
    ("Frontend Developer", &["UI/UX", "Component", "Interface", "Design", "Responsive"]),
    ("Backend Developer", &["API", "Database", "Server", "Authentication", "Business logic"]),
    ("Mobile Developer", &["Mobile", "Navigation", "Platform", "Device", "App store"]),
    ("AI/ML Engineer", &["Model", "Algorithm", "Training", "Data", "Machine learning"]),
    ("DevOps Engineer", &["Deployment", "CI/CD", "Infrastructure", "Monitoring", "Environment"]),
    ("QA Engineer", &["Testing", "Quality", "Validation", "Bug", "Performance"]),
    ("UI/UX Designer", &["Design", "Wireframes", "Mockups", "User experience", "Prototyping"]),
    ("Project Manager", &["Planning", "Documentation", "Timeline", "Coordination", "Management"]),
];

pub fn keywords_for_role(role: &str) -> &'static [&'static str] {
    ROLE_TASK_KEYWORDS
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// Base hour estimates keyed by the first matching keyword in a task
/// title. Checked in order; 16 hours when nothing matches.
pub const TASK_BASE_HOURS: &[(&str, u32)] = &[
    ("setup", 8),
    ("design", 16),
    ("implementation", 24),
    ("development", 32),
    ("testing", 16),
    ("integration", 20),
    ("deployment", 12),
    ("documentation", 8),
];

pub const DEFAULT_TASK_HOURS: u32 = 16;
