//! Bracket normalization and standings shaping.
//!
//! The backend computes match results and advancement; this module only
//! reshapes its flat payloads into the tree/table structures the UI renders.

use std::collections::BTreeMap;

use crate::wire::RawBracketMatch;
use crate::{BracketRound, BrParticipant, GroupStanding, Seed, SeedStatus, SeedTeam};

/// A 12-round tree already means 4096 entrants; a larger `total_rounds` is a
/// bogus payload and would explode the padding math.
const MAX_ROUNDS: u32 = 12;

/// Reshape a flat match list into ordered rounds for an elimination tree.
///
/// Matches are grouped by their 1-based `round` tag and sorted by `position`
/// within each round. Round `r` (0-indexed) must hold exactly
/// `2^(total_rounds - r - 1)` seeds; any shortfall is padded with
/// TBD-vs-TBD placeholder seeds so the tree always has its full shape.
///
/// An empty match list yields an empty Vec — callers surface that as a
/// "bracket not available yet" state instead of rendering an empty tree.
pub fn normalize(matches: &[RawBracketMatch], total_rounds: u32) -> Vec<BracketRound> {
    if matches.is_empty() || total_rounds == 0 {
        return Vec::new();
    }
    let total_rounds = total_rounds.min(MAX_ROUNDS);

    let mut by_round: BTreeMap<u32, Vec<&RawBracketMatch>> = BTreeMap::new();
    for m in matches {
        let round = m.round.unwrap_or(1).saturating_sub(1);
        if round < total_rounds {
            by_round.entry(round).or_default().push(m);
        }
    }

    (0..total_rounds)
        .map(|r| {
            let mut supplied = by_round.remove(&r).unwrap_or_default();
            supplied.sort_by_key(|m| m.position.unwrap_or(u32::MAX));

            let expected = 1usize << (total_rounds - r - 1);
            let mut seeds: Vec<Seed> = supplied.iter().take(expected).map(|m| map_match(m)).collect();
            while seeds.len() < expected {
                seeds.push(placeholder_seed(r, seeds.len()));
            }

            BracketRound { title: round_title(r, total_rounds), seeds }
        })
        .collect()
}

/// Group and sort lower-bracket matches without power-of-two padding.
/// Lower-bracket rounds alternate in size, so the server's match list is
/// taken as complete; only ordering and titling are applied.
pub fn normalize_lower(matches: &[RawBracketMatch], lower_rounds: u32) -> Vec<BracketRound> {
    if matches.is_empty() || lower_rounds == 0 {
        return Vec::new();
    }

    let mut by_round: BTreeMap<u32, Vec<&RawBracketMatch>> = BTreeMap::new();
    for m in matches {
        let round = m.round.unwrap_or(1).saturating_sub(1);
        if round < lower_rounds {
            by_round.entry(round).or_default().push(m);
        }
    }

    (0..lower_rounds)
        .map(|r| {
            let mut supplied = by_round.remove(&r).unwrap_or_default();
            supplied.sort_by_key(|m| m.position.unwrap_or(u32::MAX));
            let title = if r + 1 == lower_rounds {
                "LB Finals".to_owned()
            } else {
                format!("LB Round {}", r + 1)
            };
            BracketRound { title, seeds: supplied.iter().map(|m| map_match(m)).collect() }
        })
        .collect()
}

/// The winner of the final round's single seed, or `None` when no team is
/// flagged or the flagged slot is still a TBD placeholder. The server's
/// winner flag is trusted verbatim.
pub fn champion(rounds: &[BracketRound]) -> Option<&SeedTeam> {
    let team = rounds.last()?.seeds.first()?.teams.iter().find(|t| t.winner)?;
    if team.is_tbd() { None } else { Some(team) }
}

/// Rank round-robin standings by wins, descending. The sort is stable and
/// wins-only: teams with equal wins keep the server's order regardless of
/// draws or losses.
pub fn rank_standings(standings: &mut [GroupStanding]) {
    standings.sort_by(|a, b| b.wins.cmp(&a.wins));
}

/// Rank a battle-royale leaderboard by combined points, descending (stable).
pub fn rank_leaderboard(participants: &mut [BrParticipant]) {
    participants.sort_by(|a, b| b.total_points.cmp(&a.total_points));
}

fn round_title(r: u32, total_rounds: u32) -> String {
    match total_rounds - r {
        1 => "Finals".to_owned(),
        2 => "Semi Finals".to_owned(),
        3 => "Quarter Finals".to_owned(),
        d => format!("Round of {}", 1u32 << d),
    }
}

fn map_match(m: &RawBracketMatch) -> Seed {
    let mut teams = [SeedTeam::tbd(), SeedTeam::tbd()];
    for (slot, raw) in m.teams.iter().take(2).enumerate() {
        teams[slot] = SeedTeam {
            id: raw.id,
            name: raw.name.clone().unwrap_or_else(|| "TBD".to_owned()),
            score: raw.score.unwrap_or(0),
            winner: raw.winner.unwrap_or(false),
            avatar: raw.avatar.clone(),
        };
    }

    let status = if teams.iter().any(|t| t.winner) { SeedStatus::Played } else { SeedStatus::Pending };

    Seed { id: m.id.unwrap_or(0), status, teams }
}

/// Placeholder seeds fill bracket slots the server has not created yet.
/// The synthetic id is negative so it can never collide with a match id.
fn placeholder_seed(round: u32, slot: usize) -> Seed {
    Seed {
        id: -(i64::from(round) * 1000 + slot as i64 + 1),
        status: SeedStatus::Pending,
        teams: [SeedTeam::tbd(), SeedTeam::tbd()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::RawSeedTeam;

    fn raw_match(id: i64, round: u32, position: u32, teams: Vec<(&str, u32, bool)>) -> RawBracketMatch {
        RawBracketMatch {
            id: Some(id),
            round: Some(round),
            position: Some(position),
            teams: teams
                .into_iter()
                .map(|(name, score, winner)| RawSeedTeam {
                    id: None,
                    name: Some(name.to_owned()),
                    score: Some(score),
                    winner: Some(winner),
                    avatar: None,
                })
                .collect(),
        }
    }

    #[test]
    fn every_round_has_power_of_two_seed_count() {
        let matches = vec![
            raw_match(1, 1, 0, vec![("Alpha", 2, true), ("Beta", 0, false)]),
            raw_match(2, 2, 0, vec![("Alpha", 1, false), ("Gamma", 2, true)]),
        ];
        let rounds = normalize(&matches, 4);
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[0].seeds.len(), 8);
        assert_eq!(rounds[1].seeds.len(), 4);
        assert_eq!(rounds[2].seeds.len(), 2);
        assert_eq!(rounds[3].seeds.len(), 1);
    }

    #[test]
    fn final_only_bracket_pads_earlier_rounds_with_tbd() {
        // total_rounds=3, only the final supplied, with a flagged winner.
        let matches = vec![raw_match(9, 3, 0, vec![("Alpha", 3, true), ("Beta", 1, false)])];
        let rounds = normalize(&matches, 3);

        assert_eq!(rounds[0].seeds.len(), 4);
        assert_eq!(rounds[1].seeds.len(), 2);
        assert_eq!(rounds[2].seeds.len(), 1);

        for seed in rounds[0].seeds.iter().chain(rounds[1].seeds.iter()) {
            assert!(seed.id < 0, "padded seeds must carry synthetic ids");
            assert_eq!(seed.status, SeedStatus::Pending);
            for team in &seed.teams {
                assert_eq!(team.name, "TBD");
                assert_eq!(team.score, 0);
                assert!(!team.winner);
            }
        }

        let final_seed = &rounds[2].seeds[0];
        assert_eq!(final_seed.id, 9);
        assert_eq!(final_seed.status, SeedStatus::Played);
        assert!(final_seed.teams[0].winner);
    }

    #[test]
    fn seeds_are_ordered_by_position_within_a_round() {
        let matches = vec![
            raw_match(2, 1, 1, vec![("C", 0, false), ("D", 0, false)]),
            raw_match(1, 1, 0, vec![("A", 0, false), ("B", 0, false)]),
        ];
        let rounds = normalize(&matches, 2);
        assert_eq!(rounds[0].seeds[0].id, 1);
        assert_eq!(rounds[0].seeds[1].id, 2);
    }

    #[test]
    fn round_titles_are_positional_from_the_end() {
        let matches = vec![raw_match(1, 5, 0, vec![("A", 0, false), ("B", 0, false)])];
        let rounds = normalize(&matches, 5);
        assert_eq!(rounds[0].title, "Round of 32");
        assert_eq!(rounds[1].title, "Round of 16");
        assert_eq!(rounds[2].title, "Quarter Finals");
        assert_eq!(rounds[3].title, "Semi Finals");
        assert_eq!(rounds[4].title, "Finals");
    }

    #[test]
    fn empty_match_list_yields_no_rounds() {
        assert!(normalize(&[], 4).is_empty());
    }

    #[test]
    fn absurd_round_counts_are_clamped() {
        let matches = vec![raw_match(1, 1, 0, vec![("A", 0, false), ("B", 0, false)])];
        let rounds = normalize(&matches, 500);
        assert_eq!(rounds.len(), 12);
        assert_eq!(rounds[0].seeds.len(), 2048);
    }

    #[test]
    fn champion_is_the_flagged_winner_of_the_final() {
        let matches = vec![raw_match(9, 3, 0, vec![("Alpha", 3, true), ("Beta", 1, false)])];
        let rounds = normalize(&matches, 3);
        let champ = champion(&rounds).expect("final has a flagged winner");
        assert_eq!(champ.name, "Alpha");
        assert_eq!(champ.score, 3);
    }

    #[test]
    fn champion_is_none_without_a_winner_flag() {
        let matches = vec![raw_match(9, 2, 0, vec![("Alpha", 1, false), ("Beta", 1, false)])];
        let rounds = normalize(&matches, 2);
        assert!(champion(&rounds).is_none());
    }

    #[test]
    fn champion_is_none_when_the_flagged_team_is_tbd() {
        // A server glitch can flag a placeholder; that must not crown TBD.
        let matches = vec![raw_match(9, 1, 0, vec![("TBD", 0, true), ("Beta", 0, false)])];
        let rounds = normalize(&matches, 1);
        assert!(champion(&rounds).is_none());
    }

    #[test]
    fn standings_sort_is_a_permutation_ordered_by_wins() {
        let mut standings: Vec<GroupStanding> = [1u32, 3, 2]
            .iter()
            .enumerate()
            .map(|(i, &wins)| GroupStanding {
                team_id: i as u32,
                team_name: format!("T{i}"),
                wins,
                draws: 0,
                losses: 0,
                logo: None,
            })
            .collect();

        rank_standings(&mut standings);

        let wins: Vec<u32> = standings.iter().map(|s| s.wins).collect();
        assert_eq!(wins, vec![3, 2, 1]);
        let mut ids: Vec<u32> = standings.iter().map(|s| s.team_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2], "no team dropped or duplicated");
    }

    #[test]
    fn equal_wins_preserve_server_order() {
        let mut standings: Vec<GroupStanding> = (0..3)
            .map(|i| GroupStanding {
                team_id: i,
                team_name: format!("T{i}"),
                wins: 2,
                draws: i, // draws must not influence the order
                losses: 0,
                logo: None,
            })
            .collect();

        rank_standings(&mut standings);
        let ids: Vec<u32> = standings.iter().map(|s| s.team_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn recompute_total_sums_kills_and_placement() {
        let mut p = BrParticipant {
            participant_id: 7,
            name: "Nomad".to_owned(),
            total_kills: 14,
            total_placement_points: 22,
            total_points: 0,
            ..Default::default()
        };
        p.recompute_total();
        assert_eq!(p.total_points, 36);
    }

    #[test]
    fn leaderboard_ranks_by_total_points_descending() {
        let mut participants: Vec<BrParticipant> = [10u32, 40, 25]
            .iter()
            .enumerate()
            .map(|(i, &pts)| BrParticipant {
                participant_id: i as u32,
                total_points: pts,
                ..Default::default()
            })
            .collect();

        rank_leaderboard(&mut participants);
        let pts: Vec<u32> = participants.iter().map(|p| p.total_points).collect();
        assert_eq!(pts, vec![40, 25, 10]);
    }

    #[test]
    fn lower_bracket_keeps_server_shape_without_padding() {
        let matches = vec![
            raw_match(1, 1, 0, vec![("A", 0, false), ("B", 0, false)]),
            raw_match(2, 1, 1, vec![("C", 0, false), ("D", 0, false)]),
            raw_match(3, 2, 0, vec![("E", 0, false), ("F", 0, false)]),
        ];
        let rounds = normalize_lower(&matches, 2);
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].seeds.len(), 2);
        assert_eq!(rounds[1].seeds.len(), 1);
        assert_eq!(rounds[0].title, "LB Round 1");
        assert_eq!(rounds[1].title, "LB Finals");
    }
}
