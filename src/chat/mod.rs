pub mod dm;
pub mod forum;
