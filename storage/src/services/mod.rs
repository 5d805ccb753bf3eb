pub mod leaderboard;
pub mod recompute;
pub mod refresh;
pub mod scoring;
pub mod season;
