//! Project idea templates and the technology groups used to derive
//! suggested roles and learning outcomes from a template's stack.

use crate::engines::Difficulty;

/// A hand-authored project idea. Immutable for the process lifetime.
pub struct IdeaTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub difficulty: Difficulty,
    pub duration: &'static str,
    pub category: &'static str,
}

pub const IDEA_TEMPLATES: &[IdeaTemplate] = &[
    // Web Development
    IdeaTemplate {
        title: "E-Commerce Platform",
        description: "Build a full-stack e-commerce platform with payment integration",
        technologies: &["React", "Node.js", "MongoDB", "Stripe API"],
        difficulty: Difficulty::Intermediate,
        duration: "8-10 weeks",
        category: "Web Development",
    },
    IdeaTemplate {
        title: "Social Media Dashboard",
        description: "Create a comprehensive social media management tool",
        technologies: &["Vue.js", "Express", "PostgreSQL", "Social Media APIs"],
        difficulty: Difficulty::Intermediate,
        duration: "6-8 weeks",
        category: "Web Development",
    },
    IdeaTemplate {
        title: "Real-time Chat Application",
        description: "Develop a real-time messaging platform with video calls",
        technologies: &["React", "Socket.io", "WebRTC", "Node.js"],
        difficulty: Difficulty::Advanced,
        duration: "10-12 weeks",
        category: "Web Development",
    },
    // AI/ML
    IdeaTemplate {
        title: "Smart Study Assistant",
        description: "AI-powered personalized learning and study recommendation system",
        technologies: &["Python", "TensorFlow", "FastAPI", "React"],
        difficulty: Difficulty::Advanced,
        duration: "10-14 weeks",
        category: "AI/ML",
    },
    IdeaTemplate {
        title: "Image Recognition App",
        description: "Mobile app for object detection and classification",
        technologies: &["React Native", "TensorFlow Lite", "Python", "Firebase"],
        difficulty: Difficulty::Intermediate,
        duration: "8-10 weeks",
        category: "AI/ML",
    },
    IdeaTemplate {
        title: "Chatbot for Customer Service",
        description: "Intelligent chatbot with natural language processing",
        technologies: &["Python", "NLTK", "React", "Node.js", "OpenAI API"],
        difficulty: Difficulty::Intermediate,
        duration: "6-8 weeks",
        category: "AI/ML",
    },
    // Mobile Development
    IdeaTemplate {
        title: "Fitness Tracking App",
        description: "Comprehensive fitness and health monitoring application",
        technologies: &["React Native", "Firebase", "HealthKit", "Node.js"],
        difficulty: Difficulty::Intermediate,
        duration: "8-10 weeks",
        category: "Mobile Development",
    },
    IdeaTemplate {
        title: "Campus Navigation System",
        description: "AR-powered campus navigation with indoor mapping",
        technologies: &["React Native", "ARCore/ARKit", "Google Maps API", "Node.js"],
        difficulty: Difficulty::Advanced,
        duration: "12-14 weeks",
        category: "Mobile Development",
    },
    // Blockchain
    IdeaTemplate {
        title: "Decentralized Voting System",
        description: "Secure blockchain-based voting platform",
        technologies: &["Solidity", "Web3.js", "React", "Ethereum"],
        difficulty: Difficulty::Advanced,
        duration: "10-12 weeks",
        category: "Blockchain",
    },
    IdeaTemplate {
        title: "NFT Marketplace",
        description: "Platform for creating, buying, and selling NFTs",
        technologies: &["Solidity", "React", "IPFS", "Web3.js"],
        difficulty: Difficulty::Advanced,
        duration: "12-16 weeks",
        category: "Blockchain",
    },
    // IoT
    IdeaTemplate {
        title: "Smart Home Automation",
        description: "IoT-based home automation system with mobile control",
        technologies: &["Arduino", "Raspberry Pi", "React Native", "MQTT"],
        difficulty: Difficulty::Intermediate,
        duration: "10-12 weeks",
        category: "IoT",
    },
    IdeaTemplate {
        title: "Environmental Monitoring System",
        description: "IoT sensors for monitoring air quality and weather",
        technologies: &["Arduino", "Python", "React", "InfluxDB"],
        difficulty: Difficulty::Intermediate,
        duration: "8-10 weeks",
        category: "IoT",
    },
];

// Technology groups. Role suggestion, learning outcomes, and the role
// assigner's tech-triggered roles all key off these.

pub const FRONTEND_TECHS: &[&str] = &["React", "Vue.js", "Angular", "HTML", "CSS"];
pub const BACKEND_TECHS: &[&str] = &["Node.js", "Express", "Django", "Flask", "FastAPI"];
pub const MOBILE_TECHS: &[&str] = &["React Native", "Flutter", "Swift", "Kotlin"];
pub const AI_TECHS: &[&str] = &["TensorFlow", "PyTorch", "OpenAI API", "NLTK"];
pub const BLOCKCHAIN_TECHS: &[&str] = &["Solidity", "Web3.js", "Ethereum"];
pub const DATABASE_TECHS: &[&str] = &["MongoDB", "PostgreSQL", "MySQL", "Firebase"];
pub const DEVOPS_TECHS: &[&str] = &["Docker", "Kubernetes", "AWS", "CI/CD"];
pub const DATA_TECHS: &[&str] = &["SQL", "MongoDB", "PostgreSQL", "Data Warehousing"];
pub const REALTIME_TECHS: &[&str] = &["Socket.io", "WebRTC"];

/// Industry relevance blurb per category. Unknown categories get a
/// neutral line rather than an error.
pub fn industry_relevance(category: &str) -> &'static str {
    match category {
        "Web Development" => "Very High - Core industry skill",
        "AI/ML" => "Extremely High - Fastest growing field",
        "Mobile Development" => "High - Essential for modern apps",
        "Blockchain" => "High - Emerging technology",
        "IoT" => "High - Growing market",
        "Data Science" => "Very High - Data-driven decisions",
        _ => "Medium - Good learning opportunity",
    }
}
