pub mod catalog;
pub mod participant;
pub mod refresh;
pub mod results;
pub mod roster;
pub mod season;
pub mod selection;
