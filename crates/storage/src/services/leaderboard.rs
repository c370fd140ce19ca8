use rust_decimal::Decimal;

use crate::models::TrackedParticipant;

/// Ranking score for participants that cannot be ranked yet.
pub const SENTINEL_PROGRESS: Decimal = Decimal::NEGATIVE_ONE;

#[derive(Debug, Clone)]
pub struct RankedParticipant {
    /// 1-based position; `None` for participants without a goal or weigh-ins.
    pub rank: Option<i64>,
    pub progress: Option<Decimal>,
    pub participant: TrackedParticipant,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub entries: Vec<RankedParticipant>,
    pub leader_id: Option<i32>,
    pub participant_count: usize,
    pub prize_pool: Decimal,
}

impl Leaderboard {
    pub fn leader(&self) -> Option<&RankedParticipant> {
        let leader_id = self.leader_id?;
        self.entries.iter().find(|e| e.participant.id() == leader_id)
    }
}

/// Score used for ordering. Participants without a goal, without weigh-ins,
/// or with a degenerate goal get [`SENTINEL_PROGRESS`].
pub fn ranking_score(participant: &TrackedParticipant) -> Decimal {
    if participant.participant.weight_goal <= Decimal::ZERO || !participant.has_weight_history() {
        return SENTINEL_PROGRESS;
    }

    participant.progress().unwrap_or(SENTINEL_PROGRESS)
}

fn is_rankable(participant: &TrackedParticipant) -> bool {
    ranking_score(participant) != SENTINEL_PROGRESS
}

/// Orders participants by progress, highest first.
///
/// The sort is stable, so ties and all unrankable participants keep their
/// input order, and unrankable ones always come last.
pub fn rank_participants(participants: Vec<TrackedParticipant>) -> Vec<RankedParticipant> {
    let mut scored: Vec<(Decimal, TrackedParticipant)> = participants
        .into_iter()
        .map(|p| (ranking_score(&p), p))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut next_rank = 1;
    scored
        .into_iter()
        .map(|(score, participant)| {
            if score == SENTINEL_PROGRESS {
                RankedParticipant {
                    rank: None,
                    progress: None,
                    participant,
                }
            } else {
                let rank = next_rank;
                next_rank += 1;
                RankedParticipant {
                    rank: Some(rank),
                    progress: Some(score),
                    participant,
                }
            }
        })
        .collect()
}

/// The first participant holding the strictly highest progress among the
/// rankable ones.
pub fn find_leader(participants: &[TrackedParticipant]) -> Option<&TrackedParticipant> {
    let mut leader: Option<(&TrackedParticipant, Decimal)> = None;

    for participant in participants.iter().filter(|p| is_rankable(p)) {
        let score = ranking_score(participant);
        match leader {
            Some((_, best)) if score <= best => {}
            _ => leader = Some((participant, score)),
        }
    }

    leader.map(|(participant, _)| participant)
}

pub fn build_leaderboard(participants: Vec<TrackedParticipant>) -> Leaderboard {
    let leader_id = find_leader(&participants).map(TrackedParticipant::id);
    let participant_count = participants.len();
    let prize_pool = participants.iter().map(TrackedParticipant::money_added).sum();

    Leaderboard {
        entries: rank_participants(participants),
        leader_id,
        participant_count,
        prize_pool,
    }
}
