pub mod nesting;

pub use nesting::{score_if, IfScore, ScoreOptions};
