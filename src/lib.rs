pub mod card;
pub mod export;
pub mod share;
pub mod state;
pub mod statgen;
