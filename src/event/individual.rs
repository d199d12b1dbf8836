//! Training, trial, qualification and individual competition share one
//! machine; they differ only in series count and what happens between series.

use super::standings::{add_points, cut_with_ties, order_by_total_then_bib, Standing};
use super::{EventKind, EventResult, EventRunner, IndividualEventInput};
use crate::core_types::{Bib, SeriesResult, StartListEntry};
use crate::error::SjResult;
use crate::start_list::{ensure_unique_bibs, individual_next_round};
use std::collections::HashMap;
use tracing::info;

fn ranked(order: &[StartListEntry], totals: &HashMap<Bib, f64>) -> Vec<Standing> {
    let mut standings: Vec<Standing> = order
        .iter()
        .map(|e| Standing {
            bib: e.bib,
            total: totals.get(&e.bib).copied().unwrap_or(0.0),
        })
        .collect();
    order_by_total_then_bib(&mut standings);
    standings
}

/// `limit` is the qualification advance count or the final-round size.
pub(crate) fn run(
    runner: &mut EventRunner,
    kind: EventKind,
    event: &IndividualEventInput,
    num_series: usize,
    limit: Option<usize>,
) -> SjResult<EventResult> {
    ensure_unique_bibs(&event.start_list)?;

    let mut order = event.start_list.clone();
    let mut totals: HashMap<Bib, f64> = HashMap::new();
    let mut completed: Vec<SeriesResult> = Vec::with_capacity(num_series);

    for series_index in 0..num_series {
        let mut series = SeriesResult::new(event.start_gate);
        let points = runner.run_group(
            kind,
            &event.hill,
            &event.scoring,
            series_index,
            &mut series,
            &completed,
            &order,
        );
        for (entry, p) in order.iter().zip(points) {
            let t = totals.entry(entry.bib).or_insert(0.0);
            *t = add_points(*t, p);
        }
        completed.push(series);
        info!("  {} series {} done ({} jumps)", kind, series_index + 1, order.len());

        let is_last = series_index + 1 == num_series;
        match kind {
            EventKind::Qualification => {
                let standings = ranked(&order, &totals);
                let advance = limit.unwrap_or(standings.len());
                let qualified_bibs: Vec<Bib> = cut_with_ties(&standings, advance)
                    .iter()
                    .map(|s| s.bib)
                    .collect();
                info!(
                    "  Qualification: {} of {} advance",
                    qualified_bibs.len(),
                    standings.len()
                );
                return Ok(EventResult::Qualification {
                    series: completed,
                    qualified_bibs,
                    standings,
                });
            }
            EventKind::Individual if !is_last => {
                let standings = ranked(&order, &totals);
                let size = limit.unwrap_or(standings.len()).min(standings.len());
                let by_bib: HashMap<Bib, &StartListEntry> =
                    order.iter().map(|e| (e.bib, e)).collect();
                // Leader of round one jumps last.
                order = standings[..size]
                    .iter()
                    .rev()
                    .map(|s| by_bib[&s.bib].clone())
                    .collect();
            }
            EventKind::Training if !is_last => {
                order = individual_next_round(&order, &totals);
            }
            _ => {}
        }
    }

    Ok(match kind {
        EventKind::Individual => {
            let finalists = ranked(&order, &totals);
            let finalist_bibs: std::collections::HashSet<Bib> =
                finalists.iter().map(|s| s.bib).collect();
            let eliminated = ranked(&event.start_list, &totals)
                .into_iter()
                .filter(|s| !finalist_bibs.contains(&s.bib));
            let standings: Vec<Standing> = finalists.iter().copied().chain(eliminated).collect();
            EventResult::Individual {
                series: completed,
                final_order: standings.iter().map(|s| s.bib).collect(),
                standings,
            }
        }
        EventKind::Trial => EventResult::Trial { series: completed },
        _ => EventResult::Training { series: completed },
    })
}
