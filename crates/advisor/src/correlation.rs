use crate::responses::CorrelationAnalysis;
use core_types::TradingPlan;
use std::collections::BTreeSet;

/// Distinct assets referenced by a set of plans, uppercased and sorted.
pub fn plan_assets(plans: &[TradingPlan]) -> Vec<String> {
    plans
        .iter()
        .map(|p| p.asset.trim().to_uppercase())
        .filter(|asset| !asset.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Answers the correlation question locally when it is trivially safe.
///
/// Returns `Some` when fewer than two distinct assets are involved, so the
/// caller can skip asking the assistant.
pub fn correlation_precheck(assets: &[String]) -> Option<CorrelationAnalysis> {
    let distinct: BTreeSet<&str> = assets.iter().map(String::as_str).collect();
    if distinct.len() < 2 {
        return Some(CorrelationAnalysis {
            has_risk: false,
            correlated_pairs: Vec::new(),
            explanation: "Fewer than two assets are being monitored; there is no correlation risk."
                .to_string(),
        });
    }
    None
}

/// The question put to the assistant, including the reply shape that
/// `parse_correlation` expects.
pub fn correlation_prompt(assets: &[String]) -> String {
    let distinct: BTreeSet<&str> = assets.iter().map(String::as_str).collect();
    let list: Vec<&str> = distinct.into_iter().collect();
    format!(
        "Check whether the following assets are strongly positively correlated, which would \
         concentrate risk: {}.\n\
         Reply with JSON only:\n\
         {{\"hasRisk\": boolean, \"correlatedPairs\": [\"Asset A & Asset B\"], \"explanation\": string}}",
        list.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::PlanTimeframe;

    fn plan(asset: &str) -> TradingPlan {
        TradingPlan {
            id: format!("plan-{asset}"),
            timeframe: PlanTimeframe::Week,
            asset: asset.to_string(),
            scenario: "Buy the pullback into support.".to_string(),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 10, 21, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn plan_assets_are_distinct() {
        let plans = vec![plan("xauusd"), plan("BTCUSD"), plan("XAUUSD "), plan("  ")];
        assert_eq!(plan_assets(&plans), vec!["BTCUSD", "XAUUSD"]);
    }

    #[test]
    fn single_asset_needs_no_check() {
        let result = correlation_precheck(&["XAUUSD".to_string(), "XAUUSD".to_string()]).unwrap();
        assert!(!result.has_risk);
        assert!(result.correlated_pairs.is_empty());
        assert!(correlation_precheck(&[]).is_some());
    }

    #[test]
    fn two_assets_go_to_the_assistant() {
        let assets = vec!["XAUUSD".to_string(), "XAGUSD".to_string()];
        assert!(correlation_precheck(&assets).is_none());

        let prompt = correlation_prompt(&assets);
        assert!(prompt.contains("XAGUSD, XAUUSD."));
        assert!(prompt.contains("\"correlatedPairs\""));
    }
}
