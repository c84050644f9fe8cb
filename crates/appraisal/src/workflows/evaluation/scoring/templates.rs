//! Static narrative tables keyed by dimension and classification.

use super::{Classification, Dimension};

pub(crate) const BALANCED_STRENGTHS: &str = "Balanced profile across every dimension.";
pub(crate) const BALANCED_DEVELOPMENT: &str =
    "Keep developing every dimension in a balanced way.";
pub(crate) const BALANCED_MOTIVATORS: &str = "Balance across the different aspects of the work";
pub(crate) const BALANCED_STRESSORS: &str =
    "Balanced profile with no specific stressors identified";
pub(crate) const BALANCED_TEAM_CONTRIBUTION: &str =
    "Contributes to the team in a balanced way, adapting to what the group needs.";
pub(crate) const OPEN_CAREER_PATHS: &str =
    "Explore different areas to find the one that best matches personal interests and values.";
pub(crate) const ADAPTIVE_COMMUNICATION: &str =
    "Adapts communication to the context, balancing objectivity and empathy.";

pub(crate) fn profile_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::PeopleInterest => "People-oriented",
        Dimension::DataInterest => "Data-oriented",
        Dimension::ThingsInterest => "Hands-on",
        Dimension::Stability => "Steady",
        Dimension::Flexibility => "Flexible",
        Dimension::Autonomy => "Autonomous",
    }
}

pub(crate) fn description(dimension: Dimension, classification: Classification) -> &'static str {
    use Classification::{High, Low, Medium};
    match (dimension, classification) {
        (Dimension::PeopleInterest, High) => {
            "Strong interest in working with people, with high empathy and communication. Energized by collaborative settings and builds relationships easily."
        }
        (Dimension::PeopleInterest, Medium) => {
            "Works well both in a team and alone. Social skills fit most contexts of interaction."
        }
        (Dimension::PeopleInterest, Low) => {
            "Prefers independent work with less social interaction and is most comfortable with tasks that need individual focus."
        }
        (Dimension::DataInterest, High) => {
            "Strong affinity for data, numbers, and structured information. Logical and organized, with sharp attention to detail."
        }
        (Dimension::DataInterest, Medium) => {
            "Handles data when needed while balancing analysis with other work. Analytical capacity fits most situations."
        }
        (Dimension::DataInterest, Low) => {
            "Prefers practical or interpersonal work over analysis and is most comfortable with tasks that avoid detailed data work."
        }
        (Dimension::ThingsInterest, High) => {
            "Strong interest in practical, hands-on work with tools, equipment, and physical technology. Values tangible results."
        }
        (Dimension::ThingsInterest, Medium) => {
            "Takes on practical work when needed, balancing hands-on and conceptual tasks."
        }
        (Dimension::ThingsInterest, Low) => {
            "Prefers conceptual and abstract work to manual tasks and is more comfortable with ideas than with physical objects."
        }
        (Dimension::Stability, High) => {
            "Values stability and predictability. Prefers structured environments with well-defined routines and established processes."
        }
        (Dimension::Stability, Medium) => {
            "Balances stability and change, working well in structured settings and in situations that need some flexibility."
        }
        (Dimension::Stability, Low) => {
            "Comfortable with change and novelty. Rigid routines feel tedious and dynamic environments are preferred."
        }
        (Dimension::Flexibility, High) => {
            "Highly flexible and adaptable. Handles change, the unexpected, and ambiguity well, and copes with pressure and tight deadlines."
        }
        (Dimension::Flexibility, Medium) => {
            "Adapts when needed but prefers some planning, balancing flexibility with structure."
        }
        (Dimension::Flexibility, Low) => {
            "Prefers following well-defined plans over improvising and may be uncomfortable with ambiguity or frequent changes."
        }
        (Dimension::Autonomy, High) => {
            "Highly independent and self-managed. Prefers to decide on methods and manage time without close supervision."
        }
        (Dimension::Autonomy, Medium) => {
            "Works autonomously or with guidance, balancing independence and collaboration."
        }
        (Dimension::Autonomy, Low) => {
            "Prefers clear direction and supervision, with frequent feedback."
        }
    }
}

pub(crate) fn strengths(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::PeopleInterest => &[
            "Excellent at teamwork and collaboration",
            "Strong communication and empathy",
            "Builds relationships easily",
            "Skilled at teaching and developing others",
        ],
        Dimension::DataInterest => &[
            "Strong analytical and logical reasoning",
            "Attention to detail and precision",
            "Organizes and structures information well",
            "Comfortable with technology and systems",
        ],
        Dimension::ThingsInterest => &[
            "Well-developed practical skills",
            "Delivers tangible results",
            "Comfortable with tools and equipment",
            "Practical, solution-oriented thinking",
        ],
        Dimension::Stability => &[
            "Values stability and security",
            "Consistent and reliable",
            "Follows established processes",
            "Thrives in structured environments",
        ],
        Dimension::Flexibility => &[
            "High flexibility and adaptability",
            "Handles change and the unexpected",
            "Works well under pressure",
            "Manages multiple responsibilities",
        ],
        Dimension::Autonomy => &[
            "High autonomy and self-management",
            "Works independently",
            "Shows initiative and proactivity",
            "Manages time and resources well",
        ],
    }
}

pub(crate) fn development_areas(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::PeopleInterest => &[
            "Build interpersonal communication skills",
            "Practice teamwork and collaboration",
            "Seek networking opportunities",
            "Work on empathy and active listening",
        ],
        Dimension::DataInterest => &[
            "Build analytical and logical thinking",
            "Practice organization and attention to detail",
            "Improve skills with data and technology",
            "Take courses on analysis and structured methods",
        ],
        Dimension::ThingsInterest => &[
            "Build practical, hands-on skills",
            "Seek activities with tangible outcomes",
            "Explore physical tools and technologies",
            "Practice hands-on problem solving",
        ],
        Dimension::Stability => &[
            "Build tolerance for change",
            "Step outside the comfort zone gradually",
            "Seek experiences that challenge established routines",
            "Stay open to new approaches",
        ],
        Dimension::Flexibility => &[
            "Build mental flexibility",
            "Practice improvising and adapting",
            "Work on tolerance for ambiguity",
            "Seek situations that require quick adjustments",
        ],
        Dimension::Autonomy => &[
            "Build autonomy and self-management",
            "Practice independent decision making",
            "Work on personal organization and time management",
            "Seek projects that require self-driven initiative",
        ],
    }
}

pub(crate) fn work_style(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::PeopleInterest => {
            "Works best in collaborative environments with frequent contact with colleagues and clients, on projects built around teamwork and constant communication."
        }
        Dimension::DataInterest => {
            "Works best in organized, structured environments with access to data, on tasks that require analysis, planning, and attention to detail."
        }
        Dimension::ThingsInterest => {
            "Works best in practical environments with access to tools and equipment, on tasks that produce concrete results."
        }
        Dimension::Stability => {
            "Works best in stable, predictable environments with well-defined processes and established routines."
        }
        Dimension::Flexibility => {
            "Works best in dynamic environments with variety and change, where quick adaptation and improvisation are needed."
        }
        Dimension::Autonomy => {
            "Works best with autonomy and freedom to set personal methods and schedules, in environments that value initiative."
        }
    }
}

/// Communication style is only templated for the dimensions that shape it, in this order.
pub(crate) fn communication_style(dimension: Dimension) -> Option<&'static str> {
    match dimension {
        Dimension::PeopleInterest => Some(
            "Open, empathetic, and collaborative communicator who values dialogue, active listening, and consensus.",
        ),
        Dimension::DataInterest => Some(
            "Objective, precise, data-driven communicator who values clear, structured, documented information.",
        ),
        Dimension::Autonomy => Some(
            "Direct and independent communicator who prefers objective exchanges without constant validation.",
        ),
        Dimension::ThingsInterest | Dimension::Stability | Dimension::Flexibility => None,
    }
}

pub(crate) const COMMUNICATION_PRIORITY: [Dimension; 3] = [
    Dimension::PeopleInterest,
    Dimension::DataInterest,
    Dimension::Autonomy,
];

pub(crate) fn motivator(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::PeopleInterest => "Working with people and making a difference in their lives",
        Dimension::DataInterest => "Solving complex problems and achieving precision",
        Dimension::ThingsInterest => "Creating tangible results and seeing the practical impact",
        Dimension::Stability => "Working in stable environments with well-defined processes",
        Dimension::Flexibility => "Facing new challenges and adapting to constant change",
        Dimension::Autonomy => "Having the freedom to make decisions and control the work",
    }
}

pub(crate) fn stressor(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::PeopleInterest => "Environments with heavy social interaction and frequent meetings",
        Dimension::DataInterest => "Tasks that require detailed analysis of data and numbers",
        Dimension::ThingsInterest => "Manual work or tasks that require practical technical skills",
        Dimension::Stability => "Rigid environments and repetitive routines",
        Dimension::Flexibility => "Frequent changes and ambiguous situations",
        Dimension::Autonomy => "Lack of clear direction and having to decide alone",
    }
}

pub(crate) fn team_contribution(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::PeopleInterest => {
            "Eases communication, builds relationships, and fosters a collaborative environment."
        }
        Dimension::DataInterest => {
            "Brings analysis, organization, and attention to detail so decisions rest on data."
        }
        Dimension::ThingsInterest => {
            "Brings practical solutions, technical skills, and a focus on tangible results."
        }
        Dimension::Stability => {
            "Brings stability, reliability, and consistency in how processes are run."
        }
        Dimension::Flexibility => {
            "Brings flexibility, adaptability, and the ability to handle the unexpected."
        }
        Dimension::Autonomy => {
            "Brings initiative, proactivity, and the ability to work independently."
        }
    }
}

pub(crate) fn career_areas(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::PeopleInterest => {
            "Recommended areas: Human Resources, Sales, Customer Service, Education, Psychology, Social Work, Public Relations"
        }
        Dimension::DataInterest => {
            "Recommended areas: Data Analysis, Finance, Accounting, Auditing, Research, Statistics, Business Intelligence"
        }
        Dimension::ThingsInterest => {
            "Recommended areas: Engineering, Maintenance, Production, Construction, Product Design, Hardware, Electronics"
        }
        Dimension::Stability => {
            "Recommended areas: Public Administration, Banking, Security, Quality, Compliance, Auditing, Operations"
        }
        Dimension::Flexibility => {
            "Recommended areas: Startups, Consulting, Project Management, Innovation, Digital Transformation, Change Management"
        }
        Dimension::Autonomy => {
            "Recommended areas: Entrepreneurship, Independent Consulting, Academic Research, Freelancing, Software Development"
        }
    }
}

pub(crate) const PEOPLE_AND_DATA_COMBINATION: &str =
    "Combination: interpersonal and analytical strengths together suit People Management, HR Consulting, Organizational Psychology, or Business Partner roles.";
pub(crate) const STRUCTURE_COMBINATION: &str =
    "Combination: stability with a preference for structure suits Compliance, Auditing, Quality, or Process roles.";
pub(crate) const CHANGE_COMBINATION: &str =
    "Combination: openness to change with high flexibility suits Startups, Innovation, Change Management, or Consulting.";
