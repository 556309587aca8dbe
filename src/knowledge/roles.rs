//! Role definitions and per-category role requirements for the role
//! assignment engine.

/// A team role with the skills it demands and what it is responsible for.
pub struct RoleDefinition {
    pub name: &'static str,
    pub skills: &'static [&'static str],
    pub responsibilities: &'static [&'static str],
}

pub const ROLE_DEFINITIONS: &[RoleDefinition] = &[
    RoleDefinition {
        name: "Frontend Developer",
        skills: &["React", "Vue.js", "Angular", "HTML", "CSS", "JavaScript", "TypeScript", "UI/UX"],
        responsibilities: &[
            "User interface development",
            "User experience design",
            "Frontend architecture",
            "Component development",
        ],
    },
    RoleDefinition {
        name: "Backend Developer",
        skills: &["Node.js", "Python", "Java", "Express", "Django", "Flask", "API Development", "Database"],
        responsibilities: &[
            "Server-side logic",
            "API development",
            "Database design",
            "Backend architecture",
        ],
    },
    RoleDefinition {
        name: "Full Stack Developer",
        skills: &["React", "Node.js", "JavaScript", "Python", "Database", "API Development"],
        responsibilities: &[
            "End-to-end development",
            "Frontend and backend integration",
            "System architecture",
        ],
    },
    RoleDefinition {
        name: "Mobile Developer",
        skills: &["React Native", "Flutter", "Swift", "Kotlin", "iOS", "Android"],
        responsibilities: &[
            "Mobile app development",
            "Cross-platform development",
            "Mobile UI/UX",
        ],
    },
    RoleDefinition {
        name: "AI/ML Engineer",
        skills: &["Python", "TensorFlow", "PyTorch", "Machine Learning", "Data Science", "OpenAI API", "NLTK"],
        responsibilities: &[
            "ML model development",
            "AI integration",
            "Data processing",
            "Algorithm optimization",
        ],
    },
    RoleDefinition {
        name: "DevOps Engineer",
        skills: &["Docker", "Kubernetes", "AWS", "CI/CD", "Linux", "Cloud Computing"],
        responsibilities: &[
            "Deployment automation",
            "Infrastructure management",
            "Monitoring and scaling",
        ],
    },
    RoleDefinition {
        name: "Data Engineer",
        skills: &["Python", "SQL", "ETL", "Data Warehousing", "Apache Spark", "Database"],
        responsibilities: &[
            "Data pipeline development",
            "Data architecture",
            "Data processing",
        ],
    },
    RoleDefinition {
        name: "QA Engineer",
        skills: &["Testing", "Automation", "Selenium", "Jest", "Quality Assurance"],
        responsibilities: &[
            "Test planning",
            "Automated testing",
            "Quality assurance",
            "Bug tracking",
        ],
    },
    RoleDefinition {
        name: "UI/UX Designer",
        skills: &["Design", "Figma", "Adobe XD", "Prototyping", "User Research"],
        responsibilities: &[
            "User interface design",
            "User experience research",
            "Prototyping",
            "Design systems",
        ],
    },
    RoleDefinition {
        name: "Project Manager",
        skills: &["Project Management", "Agile", "Scrum", "Communication", "Leadership"],
        responsibilities: &[
            "Project planning",
            "Team coordination",
            "Timeline management",
            "Stakeholder communication",
        ],
    },
    RoleDefinition {
        name: "Blockchain Developer",
        skills: &["Solidity", "Web3.js", "Ethereum", "Smart Contracts", "Blockchain"],
        responsibilities: &[
            "Smart contract development",
            "DApp development",
            "Blockchain integration",
        ],
    },
    RoleDefinition {
        name: "Security Engineer",
        skills: &["Cybersecurity", "Penetration Testing", "Security Auditing", "Encryption"],
        responsibilities: &[
            "Security assessment",
            "Vulnerability testing",
            "Security implementation",
        ],
    },
];

/// Look up a role definition by name.
pub fn role_definition(name: &str) -> Option<&'static RoleDefinition> {
    ROLE_DEFINITIONS.iter().find(|r| r.name == name)
}

/// Base roles required per project category.
pub const CATEGORY_ROLES: &[(&str, &[&str])] = &[
    ("Web Development", &["Frontend Developer", "Backend Developer", "Project Manager"]),
    ("Mobile Development", &["Mobile Developer", "Backend Developer", "UI/UX Designer"]),
    ("AI/ML", &["AI/ML Engineer", "Backend Developer", "Data Engineer"]),
    ("Blockchain", &["Blockchain Developer", "Frontend Developer", "Security Engineer"]),
    ("Full Stack", &["Full Stack Developer", "UI/UX Designer", "DevOps Engineer"]),
    ("IoT", &["Backend Developer", "Frontend Developer", "DevOps Engineer"]),
    ("Data Science", &["Data Engineer", "AI/ML Engineer", "Backend Developer"]),
];

/// Fallback when the category has no entry in [`CATEGORY_ROLES`].
pub const DEFAULT_CATEGORY_ROLES: &[&str] = &["Frontend Developer", "Backend Developer"];

/// Roles considered high priority for a given category; everything else
/// is medium priority.
pub const HIGH_PRIORITY_ROLES: &[(&str, &[&str])] = &[
    ("Web Development", &["Frontend Developer", "Backend Developer"]),
    ("Mobile Development", &["Mobile Developer"]),
    ("AI/ML", &["AI/ML Engineer"]),
    ("Blockchain", &["Blockchain Developer"]),
];
