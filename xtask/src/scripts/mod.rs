pub mod fixture;
pub mod lint;
