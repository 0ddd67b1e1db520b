#![no_std]

extern crate alloc;

pub use board::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use hint::*;
pub use persist::*;
pub use rules::*;
pub use types::*;
pub use wordbank::*;

mod board;
mod engine;
mod error;
mod game;
mod generator;
mod hint;
mod persist;
mod rules;
mod types;
mod wordbank;
