pub mod history;
pub mod outcome;
pub mod rank;
pub mod round;

pub use history::History;
pub use outcome::{Outcome, ValueClass};
pub use rank::{Rank, RankConvention};
pub use round::Round;
