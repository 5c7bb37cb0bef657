pub mod alert;
pub mod score;
