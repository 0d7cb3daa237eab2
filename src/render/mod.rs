pub mod composite;
pub mod simple;
