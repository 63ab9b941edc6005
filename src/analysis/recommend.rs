use crate::analysis::normalize::round_to_tenth;
use crate::models::alternative::Alternative;
use crate::models::eco_score::{Catalog, ComponentScore, ProductImpact};

pub const DEFAULT_ALTERNATIVES: usize = 5;

/// Axes named in an improvement description, at most.
const MAX_NAMED_AXES: usize = 2;

/// Rank better-scoring peers of `reference_name` within its category.
///
/// Returns `None` when the reference is not in the catalog. An empty list means
/// the reference is already the best in its category.
pub fn find_alternatives(
    catalog: &Catalog,
    reference_name: &str,
    limit: Option<usize>,
) -> Option<Vec<Alternative>> {
    let reference = catalog.get(reference_name)?;
    let limit = limit.unwrap_or(DEFAULT_ALTERNATIVES);

    let mut candidates: Vec<&ProductImpact> = catalog
        .in_category(&reference.category)
        .filter(|p| p.name != reference.name && p.eco_score > reference.eco_score)
        .collect();

    // sort_by is stable, so equal scores keep catalog order.
    candidates.sort_by(|a, b| b.eco_score.total_cmp(&a.eco_score));
    candidates.truncate(limit);

    Some(
        candidates
            .into_iter()
            .map(|candidate| Alternative {
                name: candidate.name.clone(),
                eco_score: candidate.eco_score,
                score_diff: round_to_tenth(candidate.eco_score - reference.eco_score),
                improvement: describe_improvement(reference, candidate),
            })
            .collect(),
    )
}

/// Explain why `candidate` beats `reference`, from the per-axis score deltas.
pub fn describe_improvement(reference: &ProductImpact, candidate: &ProductImpact) -> String {
    let mut gains: Vec<(f64, String)> = reference
        .components
        .iter()
        .zip(candidate.components.iter())
        .filter_map(|((axis, before), (_, after))| {
            let gained = penalty(before) - penalty(after);
            (gained > 1e-9).then(|| (gained, axis_phrase(axis, before, after)))
        })
        .collect();
    gains.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut parts: Vec<String> = gains
        .into_iter()
        .take(MAX_NAMED_AXES)
        .map(|(_, phrase)| phrase)
        .collect();

    let dropped: Vec<&str> = reference
        .flags
        .labels()
        .into_iter()
        .filter(|label| !candidate.flags.labels().contains(label))
        .collect();
    if !dropped.is_empty() {
        parts.push(format!("free of {}", dropped.join(" and ")));
    }

    if parts.is_empty() {
        return "Higher overall eco score".to_string();
    }

    let mut text = parts.join("; ");
    if let Some(first) = text.get(..1) {
        text = first.to_uppercase() + &text[1..];
    }
    text
}

/// Points lost on one axis.
fn penalty(component: &ComponentScore) -> f64 {
    component.normalized * component.weight * 100.0
}

fn axis_phrase(axis: &str, before: &ComponentScore, after: &ComponentScore) -> String {
    let saved = before.raw_value - after.raw_value;
    match axis {
        "carbon" => format!("{saved:.2} kg less CO2e"),
        "water" => format!("{saved:.1} L less water"),
        "energy" => format!("{saved:.1} MJ less energy"),
        _ => format!(
            "lower-waste materials ({:.1} vs {:.1})",
            after.raw_value, before.raw_value
        ),
    }
}
