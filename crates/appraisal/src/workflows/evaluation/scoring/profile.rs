use serde::{Deserialize, Serialize};

use super::templates;
use super::{Classification, Dimension, DimensionScore};

/// Deterministic narrative composed from classification outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub label: String,
    pub description: String,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
    pub work_style: String,
    pub communication_style: String,
    pub motivators: Vec<String>,
    pub stressors: Vec<String>,
    pub team_contribution: String,
    pub career_recommendations: Vec<String>,
}

/// Builds the profile from canonical-order dimension scores and the dominant dimension.
pub fn synthesize(scores: &[DimensionScore], dominant: Dimension) -> Profile {
    let high: Vec<Dimension> = with_classification(scores, Classification::High).collect();
    let low: Vec<Dimension> = with_classification(scores, Classification::Low).collect();

    let label = profile_label(&high, dominant);

    Profile {
        description: description(&label, scores),
        strengths: collect_or(
            high.iter()
                .flat_map(|&dimension| templates::strengths(dimension).iter().copied()),
            templates::BALANCED_STRENGTHS,
        ),
        development_areas: collect_or(
            low.iter()
                .flat_map(|&dimension| templates::development_areas(dimension).iter().copied()),
            templates::BALANCED_DEVELOPMENT,
        ),
        work_style: templates::work_style(dominant).to_string(),
        communication_style: communication_style(scores),
        motivators: collect_or(
            high.iter().map(|&dimension| templates::motivator(dimension)),
            templates::BALANCED_MOTIVATORS,
        ),
        stressors: collect_or(
            low.iter().map(|&dimension| templates::stressor(dimension)),
            templates::BALANCED_STRESSORS,
        ),
        team_contribution: team_contribution(&high),
        career_recommendations: career_recommendations(scores, &high),
        label,
    }
}

/// No High dimension falls back to the dominant one; several High dimensions compose the
/// first two in canonical order.
pub fn profile_label(high: &[Dimension], dominant: Dimension) -> String {
    match high {
        [] => templates::profile_label(dominant).to_string(),
        [single] => templates::profile_label(*single).to_string(),
        [first, second, ..] => format!(
            "{} + {}",
            templates::profile_label(*first),
            templates::profile_label(*second)
        ),
    }
}

fn with_classification(
    scores: &[DimensionScore],
    classification: Classification,
) -> impl Iterator<Item = Dimension> + '_ {
    scores
        .iter()
        .filter(move |score| score.classification == classification)
        .map(|score| score.dimension)
}

fn classification_of(scores: &[DimensionScore], dimension: Dimension) -> Option<Classification> {
    scores
        .iter()
        .find(|score| score.dimension == dimension)
        .map(|score| score.classification)
}

fn collect_or<'a>(lines: impl Iterator<Item = &'a str>, fallback: &str) -> Vec<String> {
    let collected: Vec<String> = lines.map(str::to_string).collect();
    if collected.is_empty() {
        vec![fallback.to_string()]
    } else {
        collected
    }
}

fn description(label: &str, scores: &[DimensionScore]) -> String {
    let mut sections = vec![format!("Profile: {label}")];
    sections.extend(
        scores
            .iter()
            .filter(|score| score.classification != Classification::Medium)
            .map(|score| templates::description(score.dimension, score.classification).to_string()),
    );
    sections.join("\n\n")
}

fn communication_style(scores: &[DimensionScore]) -> String {
    templates::COMMUNICATION_PRIORITY
        .iter()
        .find(|&&dimension| classification_of(scores, dimension) == Some(Classification::High))
        .and_then(|&dimension| templates::communication_style(dimension))
        .unwrap_or(templates::ADAPTIVE_COMMUNICATION)
        .to_string()
}

fn team_contribution(high: &[Dimension]) -> String {
    if high.is_empty() {
        return templates::BALANCED_TEAM_CONTRIBUTION.to_string();
    }
    high.iter()
        .map(|&dimension| templates::team_contribution(dimension))
        .collect::<Vec<_>>()
        .join(" ")
}

fn career_recommendations(scores: &[DimensionScore], high: &[Dimension]) -> Vec<String> {
    let mut recommendations: Vec<String> = high
        .iter()
        .map(|&dimension| templates::career_areas(dimension).to_string())
        .collect();

    let is = |dimension, classification| {
        classification_of(scores, dimension) == Some(classification)
    };

    if is(Dimension::PeopleInterest, Classification::High)
        && is(Dimension::DataInterest, Classification::High)
    {
        recommendations.push(templates::PEOPLE_AND_DATA_COMBINATION.to_string());
    }
    if is(Dimension::Stability, Classification::High)
        && is(Dimension::Flexibility, Classification::Low)
    {
        recommendations.push(templates::STRUCTURE_COMBINATION.to_string());
    }
    if is(Dimension::Stability, Classification::Low)
        && is(Dimension::Flexibility, Classification::High)
    {
        recommendations.push(templates::CHANGE_COMBINATION.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(templates::OPEN_CAREER_PATHS.to_string());
    }
    recommendations
}
