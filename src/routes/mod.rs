pub mod auth;

pub mod courses;

pub mod teachers;

pub mod students;

pub mod system;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use frontend::configure_frontend_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
