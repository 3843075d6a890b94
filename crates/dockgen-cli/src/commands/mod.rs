mod generate;

pub use generate::{GenerateArgs, Target, generate};
