//! Schema versioning.
//!
//! Version 1 is the first published schema, so no upgrade steps exist yet.
//! A step for version `n` goes in [`migrate_one_version`] and must leave the
//! project at version `n + 1`.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

/// Oldest version a project file can carry.
pub const FIRST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    Err(ProjectError::Migration {
        what: format!(
            "No migration path from version {} (schema starts at {})",
            project.version, FIRST_VERSION
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_schema_version_rejected() {
        let mut project = Project::new("old");
        project.version = 0;
        let err = migrate_to_latest(project).unwrap_err();
        assert!(matches!(err, ProjectError::Migration { .. }));
        assert!(err.to_string().contains("version 0"));
    }

    #[test]
    fn latest_is_untouched() {
        let project = Project::new("current");
        let migrated = migrate_to_latest(project.clone()).unwrap();
        assert_eq!(migrated, project);
    }
}
