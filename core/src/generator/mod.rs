use crate::*;
pub use random::*;

mod random;

pub trait MineFieldGenerator {
    fn generate(self, config: GameConfig) -> MineField;
}
