pub mod leaderboard;
pub mod progress;
pub mod tracker;
