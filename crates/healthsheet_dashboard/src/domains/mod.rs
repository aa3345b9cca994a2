pub mod goals;
pub mod nutrition;
pub mod weight;
