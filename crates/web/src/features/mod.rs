pub mod leaderboard;
pub mod participants;
