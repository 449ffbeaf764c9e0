pub mod catalog;
pub mod helpers;
pub mod wizard;
