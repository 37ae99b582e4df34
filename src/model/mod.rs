pub mod history;
pub mod item;
pub mod movie;
pub mod outcome;
