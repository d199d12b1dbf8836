use crate::core_types::{Bib, SeriesResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub bib: Bib,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: String,
    pub total: f64,
}

/// Totals are kept on the 0.1 grid so equal scores compare equal.
pub fn add_points(total: f64, points: f64) -> f64 {
    ((total + points) * 10.0).round() / 10.0
}

/// Ranking order: descending total, ties broken by descending bib.
pub fn order_by_total_then_bib(standings: &mut [Standing]) {
    standings.sort_by(|a, b| b.total.total_cmp(&a.total).then(b.bib.cmp(&a.bib)));
}

/// Running totals per bib in first-appearance order.
pub fn totals_by_bib(series: &[SeriesResult]) -> Vec<Standing> {
    let mut order: Vec<Bib> = Vec::new();
    let mut totals: HashMap<Bib, f64> = HashMap::new();
    for s in series {
        for j in &s.jumps {
            let slot = totals.entry(j.bib).or_insert_with(|| {
                order.push(j.bib);
                0.0
            });
            *slot = add_points(*slot, j.result.points);
        }
    }
    order
        .into_iter()
        .map(|bib| Standing {
            bib,
            total: totals[&bib],
        })
        .collect()
}

/// Competition ranks for an already ordered list; equal totals share a rank.
pub fn shared_ranks(ordered_totals: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(ordered_totals.len());
    for (i, total) in ordered_totals.iter().enumerate() {
        if i > 0 && *total == ordered_totals[i - 1] {
            ranks.push(ranks[i - 1]);
        } else {
            ranks.push(i + 1);
        }
    }
    ranks
}

/// Leading `advance` entries of a ranked list, extended over any tie at the
/// boundary.
pub fn cut_with_ties(ranked: &[Standing], advance: usize) -> &[Standing] {
    let advance = advance.min(ranked.len());
    if advance == 0 {
        return &ranked[..0];
    }
    let boundary = ranked[advance - 1].total;
    let mut end = advance;
    while end < ranked.len() && ranked[end].total == boundary {
        end += 1;
    }
    &ranked[..end]
}
