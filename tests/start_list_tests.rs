mod common;

use common::{field, jumper, teams};
use skijump::core_types::{StartListEntry, TeamEntry};
use skijump::error::SkiJumpError;
use skijump::random::shuffle;
use skijump::start_list::*;
use std::collections::HashMap;

#[test]
fn test_first_round_puts_unranked_first() {
    let jumpers = field(8);
    let ranks: HashMap<String, u32> = [("J02", 3), ("J05", 1), ("J07", 2)]
        .into_iter()
        .map(|(id, r)| (id.to_string(), r))
        .collect();

    let mut rng = fastrand::Rng::with_seed(3);
    let list = individual_first_round(&jumpers, &ranks, |xs| shuffle(&mut rng, xs));

    assert_eq!(list.len(), 8);
    let ids: Vec<&str> = list.iter().map(|e| e.jumper.id.as_str()).collect();
    assert!(ids[..5].iter().all(|id| !ranks.contains_key(*id)));
    assert_eq!(&ids[5..], &["J02", "J07", "J05"]);
    let bibs: Vec<u32> = list.iter().map(|e| e.bib).collect();
    assert_eq!(bibs, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_first_round_keeps_caller_shuffle() {
    let jumpers = field(4);
    let list = individual_first_round(&jumpers, &HashMap::new(), |xs| xs.reverse());
    let ids: Vec<&str> = list.iter().map(|e| e.jumper.id.as_str()).collect();
    assert_eq!(ids, vec!["J04", "J03", "J02", "J01"]);
}

#[test]
fn test_next_round_weakest_first_lower_bib_on_ties() {
    let entries: Vec<StartListEntry> = (1..=4)
        .map(|b| StartListEntry::individual(b, jumper(&format!("J{}", b), 5.0)))
        .collect();
    let totals: HashMap<u32, f64> = [(1, 120.0), (2, 95.5), (3, 120.0), (4, 130.2)]
        .into_iter()
        .collect();
    let order: Vec<u32> = individual_next_round(&entries, &totals)
        .iter()
        .map(|e| e.bib)
        .collect();
    assert_eq!(order, vec![2, 1, 3, 4]);
}

#[test]
fn test_team_lineup_bibs() {
    let mut squads = teams(3, 2, false);
    // Rank order differs from input order.
    squads[0].nations_cup_rank = Some(3);
    squads[2].nations_cup_rank = Some(1);

    let lineups = team_lineups(&squads, &DUET_SLOTS).unwrap();
    let ids: Vec<&str> = lineups.iter().map(|l| l.team_id.as_str()).collect();
    assert_eq!(ids, vec!["T03", "T02", "T01"]);

    for (index, lineup) in lineups.iter().enumerate() {
        for (slot, entry) in lineup.entries.iter().enumerate() {
            assert_eq!(entry.bib as usize, slot * 3 + index + 1);
            assert_eq!(entry.slot_in_team, Some(slot));
            assert_eq!(entry.team_id.as_deref(), Some(lineup.team_id.as_str()));
        }
    }
    assert_eq!(lineups[1].base_bib(), 2);
}

#[test]
fn test_mixed_team_slots_alternate_gender() {
    let lineups = team_lineups(&teams(2, 4, true), &MIXED_TEAM_SLOTS).unwrap();
    for lineup in &lineups {
        let women: Vec<bool> = lineup.entries.iter().map(|e| e.jumper.is_women).collect();
        assert_eq!(women, vec![true, false, true, false]);
    }
}

#[test]
fn test_mixed_team_without_women_is_rejected() {
    let err = team_lineups(&teams(2, 4, false), &MIXED_TEAM_SLOTS).unwrap_err();
    assert!(matches!(err, SkiJumpError::Validation(_)));
}

#[test]
fn test_unranked_teams_go_last() {
    let mut squads = teams(3, 2, false);
    squads[0].nations_cup_rank = None;
    let ordered: Vec<&str> = teams_by_nations_cup(&squads)
        .iter()
        .map(|t| t.team_id.as_str())
        .collect();
    assert_eq!(ordered, vec!["T02", "T03", "T01"]);
}

#[test]
fn test_group_lists_weakest_team_first() {
    let lineups = team_lineups(&teams(3, 2, false), &DUET_SLOTS).unwrap();
    let totals: HashMap<String, f64> = [("T01", 250.0), ("T02", 180.5), ("T03", 250.0)]
        .into_iter()
        .map(|(t, p)| (t.to_string(), p))
        .collect();

    let duet: Vec<Option<String>> = get_duet_group_start_list(&lineups, 1, &totals)
        .into_iter()
        .map(|e| e.team_id)
        .collect();
    assert_eq!(
        duet,
        vec![Some("T02".into()), Some("T01".into()), Some("T03".into())]
    );

    let mixed = get_mixed_team_group_start_list(&lineups, 0, &totals);
    assert_eq!(mixed[0].bib, 2);
    assert!(mixed.iter().all(|e| e.slot_in_team == Some(0)));
}

#[test]
fn test_as_built_group_follows_lineup_order() {
    let lineups = team_lineups(&teams(4, 2, false), &DUET_SLOTS).unwrap();
    let bibs: Vec<u32> = as_built_group(&lineups, 0).iter().map(|e| e.bib).collect();
    assert_eq!(bibs, vec![1, 2, 3, 4]);
}

#[test]
fn test_team_trial_is_team_major() {
    let list = team_trial_start_list(&teams(3, 4, false));
    assert_eq!(list.len(), 12);
    assert_eq!(
        list.iter().map(|e| e.bib).collect::<Vec<_>>(),
        (1..=12).collect::<Vec<_>>()
    );
    assert!(list[..4].iter().all(|e| e.team_id.as_deref() == Some("T01")));
    assert!(list[8..].iter().all(|e| e.team_id.as_deref() == Some("T03")));
}

#[test]
fn test_duplicate_bibs_rejected() {
    let mut list = common::entries(&field(3));
    list[2].bib = 1;
    assert!(matches!(
        ensure_unique_bibs(&list),
        Err(SkiJumpError::Validation(_))
    ));
}

#[test]
fn test_team_entries_serialize_camel_case() {
    let squads: Vec<TeamEntry> = teams(1, 2, true);
    let json = serde_json::to_string(&squads).unwrap();
    assert!(json.contains("nationsCupRank"));
    assert!(json.contains("isWomen"));
}
