pub mod candidates;
pub mod interviews;
pub mod screening;
