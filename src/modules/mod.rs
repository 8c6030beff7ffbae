pub mod auth;
pub mod course_modules;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod profiles;
pub mod students;
pub mod videos;
