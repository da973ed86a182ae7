//! `SeaORM` entity definitions.

pub mod charity_projects;
pub mod donations;
