pub mod demo_catalog;
pub mod recommendations;
