pub mod assignments;
pub mod auth;
pub mod discussion;
pub mod resources;
pub mod students;
pub mod weeks;
