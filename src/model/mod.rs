pub mod matrix;
pub mod settings;

pub use matrix::{ScoreMatrix, SermonRow, sermon_key_for};
