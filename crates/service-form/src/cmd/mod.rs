pub mod check;
pub mod load;
pub mod schema;
pub mod submission;
