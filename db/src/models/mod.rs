pub mod announcement;
pub mod assignment;
pub mod classroom;
pub mod enrollment;
pub mod material;
pub mod student;
pub mod submission;
pub mod teacher;
pub mod user;
