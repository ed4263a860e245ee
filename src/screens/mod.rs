//! Screens shipped with the crate.

pub mod persoon;

pub use persoon::{PersoonDto, PersoonScreen};
