use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::decimal_to_f64;
use super::participant::ParticipantResponse;
use crate::services::leaderboard::{Leaderboard, RankedParticipant};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based position, absent for participants that cannot be ranked yet
    pub rank: Option<i64>,
    pub progress: Option<f64>,
    pub participant: ParticipantResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub leader: Option<LeaderboardEntry>,
    pub participant_count: usize,
    /// Sum of every participant's contributions
    pub prize_pool: f64,
    pub entries: Vec<LeaderboardEntry>,
}

impl From<&RankedParticipant> for LeaderboardEntry {
    fn from(ranked: &RankedParticipant) -> Self {
        Self {
            rank: ranked.rank,
            progress: ranked.progress.map(decimal_to_f64),
            participant: ParticipantResponse::from(&ranked.participant),
        }
    }
}

impl From<Leaderboard> for LeaderboardResponse {
    fn from(board: Leaderboard) -> Self {
        Self {
            leader: board.leader().map(LeaderboardEntry::from),
            participant_count: board.participant_count,
            prize_pool: decimal_to_f64(board.prize_pool),
            entries: board.entries.iter().map(LeaderboardEntry::from).collect(),
        }
    }
}
