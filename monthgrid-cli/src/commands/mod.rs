pub mod input;
pub mod interactive;
pub mod show;
