pub mod feed;
pub mod random;

pub use feed::{Listing, SimulatedFeed, top_21_stocks};
pub use random::{RngSource, ScriptedSource, random_source};
