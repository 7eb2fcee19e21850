use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m20250810_000001_create_users::Migration),
            Box::new(migrations::m20250810_000002_create_teachers::Migration),
            Box::new(migrations::m20250810_000003_create_students::Migration),
            Box::new(migrations::m20250810_000004_create_classrooms::Migration),
            Box::new(migrations::m20250810_000005_create_enrollments::Migration),
            Box::new(migrations::m20250810_000006_create_assignments::Migration),
            Box::new(migrations::m20250810_000007_create_submissions::Migration),
            Box::new(migrations::m20250810_000008_create_materials::Migration),
            Box::new(migrations::m20250810_000009_create_announcements::Migration),
        ]
    }
}
