pub(crate) mod common;
pub mod dashboard;
pub mod demo;
pub mod sales;
