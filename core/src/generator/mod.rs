use alloc::string::String;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, words: &[String], rules: &Rules) -> Result<Board>;
}
