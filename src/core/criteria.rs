use crate::models::{Car, IdentificationOutcome, IdentifiedCarInfo, SearchCriteria, SearchParams};
use crate::core::filters::{matches_make, matches_model};

/// Build criteria from the search page query string
///
/// An embedded `aiScanResult` wins over the individual parameters when it
/// parses; otherwise it is logged and ignored.
pub fn criteria_from_params(params: &SearchParams) -> SearchCriteria {
    if let Some(raw) = params.ai_scan_result.as_deref().filter(|r| !r.trim().is_empty()) {
        match parse_scan_result(raw) {
            Some(outcome) => {
                let info = outcome.car_info;
                return SearchCriteria {
                    make: info.make,
                    model: info.model,
                    year: info.year,
                    color: info.color,
                    query: info.description,
                    exact_match_id: None,
                }
                .normalized();
            }
            None => tracing::warn!("Ignoring malformed aiScanResult parameter"),
        }
    }

    SearchCriteria {
        make: params.make.clone(),
        model: params.model.clone(),
        year: params.year.clone(),
        color: params.color.clone(),
        query: params.q.clone(),
        exact_match_id: params.exact_match_id.clone(),
    }
    .normalized()
}

/// The parameter may still be percent-encoded once more by the client
fn parse_scan_result(raw: &str) -> Option<IdentificationOutcome> {
    if let Ok(outcome) = serde_json::from_str::<IdentificationOutcome>(raw) {
        return Some(outcome);
    }
    let decoded = urlencoding::decode(raw).ok()?;
    serde_json::from_str(&decoded).ok()
}

/// Build criteria from a structured identification
///
/// The description only becomes a keyword query when neither make nor model
/// was identified. With both make and model, an inventory car of that make
/// and model (and year, when one was identified) is pinned as exact match.
pub fn criteria_from_identification(info: &IdentifiedCarInfo, inventory: &[Car]) -> SearchCriteria {
    let mut criteria = SearchCriteria {
        make: info.make.clone(),
        model: info.model.clone(),
        year: info.year.clone(),
        color: info.color.clone(),
        query: None,
        exact_match_id: None,
    }
    .normalized();

    if criteria.make().is_none() && criteria.model().is_none() {
        criteria.query = info
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
    }

    let exact_match_id = match (criteria.make(), criteria.model()) {
        (Some(make), Some(model)) => {
            let year = criteria.year.as_deref();
            inventory
                .iter()
                .find(|car| {
                    matches_make(car, make)
                        && matches_model(car, model)
                        && year.map_or(true, |y| car.year.to_string() == y)
                })
                .map(|car| car.id.clone())
        }
        _ => None,
    };
    criteria.exact_match_id = exact_match_id;

    criteria
}
