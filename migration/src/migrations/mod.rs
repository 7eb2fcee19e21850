pub mod m20250810_000001_create_users;
pub mod m20250810_000002_create_teachers;
pub mod m20250810_000003_create_students;
pub mod m20250810_000004_create_classrooms;
pub mod m20250810_000005_create_enrollments;
pub mod m20250810_000006_create_assignments;
pub mod m20250810_000007_create_submissions;
pub mod m20250810_000008_create_materials;
pub mod m20250810_000009_create_announcements;
