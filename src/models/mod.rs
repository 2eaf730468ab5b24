//! Core data models for season analytics.

mod game;
mod head_to_head;
mod highlights;
mod ids;
mod magic;
mod series;
mod standings;
mod streak;
mod team_record;

pub use game::*;
pub use head_to_head::*;
pub use highlights::*;
pub use ids::*;
pub use magic::*;
pub use series::*;
pub use standings::*;
pub use streak::*;
pub use team_record::*;
