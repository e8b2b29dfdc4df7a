pub mod aggregate;
pub mod output;
