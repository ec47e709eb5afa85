use serde::{Deserialize, Serialize};

use crate::grouping::PositionGroups;
use crate::player::Player;

/// Sort key standing in for a missing average so unranked players sort last
pub const UNRANKED_SORT_KEY: f64 = 9999.0;

/// One player's merged ranking as returned to callers
///
/// `None` ranks serialize as `null`. The wire names follow the sites the
/// ranks come from (`rotopat_rank`, `fantasypros_rank`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRanking {
    pub name: String,
    pub nfl_rank: Option<u32>,
    #[serde(rename = "rotopat_rank")]
    pub roto_rank: Option<u32>,
    #[serde(rename = "fantasypros_rank")]
    pub ecr_rank: Option<u32>,
    /// Mean of the available ranks, rounded to two decimals
    pub average_rank: Option<f64>,
}

impl From<&Player> for MergedRanking {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            nfl_rank: player.nfl_rank,
            roto_rank: player.roto_rank,
            ecr_rank: player.ecr_rank,
            average_rank: player.average_rank().map(round_to_hundredths),
        }
    }
}

/// Full report: every position mapped to its sorted rankings
pub type RankingReport = PositionGroups<MergedRanking>;

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sort players best-first and build their merged records.
///
/// The sort is stable and uses the unrounded average, so equal averages
/// (including every unranked player) keep roster order.
pub fn rank_players(mut players: Vec<Player>) -> Vec<MergedRanking> {
    players.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
    players.iter().map(MergedRanking::from).collect()
}

fn sort_key(player: &Player) -> f64 {
    player.average_rank().unwrap_or(UNRANKED_SORT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, ranks: [Option<u32>; 3]) -> Player {
        Player {
            nfl_rank: ranks[0],
            roto_rank: ranks[1],
            ecr_rank: ranks[2],
            ..Player::new(name, "WR")
        }
    }

    #[test]
    fn test_sort_places_unranked_last_and_stable() {
        let players = vec![
            player("first unranked", [None, None, None]),
            player("three", [Some(3), None, None]),
            player("one and a half", [Some(1), Some(2), None]),
            player("second unranked", [None, None, None]),
        ];

        let ranked = rank_players(players);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one and a half", "three", "first unranked", "second unranked"]);
        assert_eq!(ranked[0].average_rank, Some(1.5));
        assert_eq!(ranked[1].average_rank, Some(3.0));
        assert_eq!(ranked[2].average_rank, None);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let ranked = rank_players(vec![
            player("b", [Some(4), None, None]),
            player("a", [Some(2), Some(6), None]),
        ]);
        assert_eq!(ranked[0].name, "b");
        assert_eq!(ranked[1].name, "a");
    }

    #[test]
    fn test_average_rounded_for_display() {
        let record = MergedRanking::from(&player("x", [Some(1), Some(2), Some(2)]));
        assert_eq!(record.average_rank, Some(1.67));
        assert_eq!(record.nfl_rank, Some(1));
    }

    #[test]
    fn test_ranked_player_with_huge_rank_still_beats_unranked() {
        let ranked = rank_players(vec![
            player("unranked", [None, None, None]),
            player("deep", [Some(500), None, None]),
        ]);
        assert_eq!(ranked[0].name, "deep");
    }

    #[test]
    fn test_serialized_form_uses_null_for_missing() {
        let record = MergedRanking::from(&player("Test Player A", [None, None, None]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Test Player A",
                "nfl_rank": null,
                "rotopat_rank": null,
                "fantasypros_rank": null,
                "average_rank": null
            })
        );
    }
}
