pub mod drive;
pub mod inventory;
pub mod recipes;
pub mod session;
pub mod shopping;
pub mod tour;
pub mod tour_script;
