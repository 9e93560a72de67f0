//! Resource Endpoints
//!
//! The fixed set of Basecamp Classic resources this client reads.

use std::fmt;

/// A readable API resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// All projects visible to the user
    Projects,

    /// One project
    Project(u64),

    /// Files attached to a project, optionally starting at an offset
    Files { project_id: u64, offset: Option<u32> },

    /// Messages posted in a project
    Messages(u64),

    /// All to-do lists
    TodoLists,

    /// Items of one to-do list
    TodoItems(u64),

    /// People visible to (and including) the user
    People,

    /// Companies visible to the user
    Companies,
}

impl Endpoint {
    /// Path relative to the account's base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::Projects => "projects.xml".to_string(),
            Endpoint::Project(id) => format!("projects/{}.xml", id),
            Endpoint::Files {
                project_id,
                offset: Some(offset),
            } => format!("projects/{}/attachments.xml?n={}", project_id, offset),
            Endpoint::Files {
                project_id,
                offset: None,
            } => format!("projects/{}/attachments.xml", project_id),
            Endpoint::Messages(project_id) => format!("projects/{}/posts.xml", project_id),
            Endpoint::TodoLists => "todo_lists.xml".to_string(),
            Endpoint::TodoItems(list_id) => format!("todo_lists/{}/todo_items.xml", list_id),
            Endpoint::People => "people.xml".to_string(),
            Endpoint::Companies => "companies.xml".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_paths() {
        assert_eq!(Endpoint::Projects.path(), "projects.xml");
        assert_eq!(Endpoint::TodoLists.path(), "todo_lists.xml");
        assert_eq!(Endpoint::People.path(), "people.xml");
        assert_eq!(Endpoint::Companies.path(), "companies.xml");
    }

    #[test]
    fn test_parameterized_paths() {
        assert_eq!(Endpoint::Project(42).path(), "projects/42.xml");
        assert_eq!(Endpoint::Messages(7).path(), "projects/7/posts.xml");
        assert_eq!(
            Endpoint::TodoItems(310).path(),
            "todo_lists/310/todo_items.xml"
        );
    }

    #[test]
    fn test_files_with_offset() {
        let endpoint = Endpoint::Files {
            project_id: 7,
            offset: Some(3),
        };
        assert_eq!(endpoint.path(), "projects/7/attachments.xml?n=3");
    }

    #[test]
    fn test_files_without_offset_omits_parameter() {
        let endpoint = Endpoint::Files {
            project_id: 7,
            offset: None,
        };
        assert_eq!(endpoint.path(), "projects/7/attachments.xml");
    }

    #[test]
    fn test_zero_offset_is_sent() {
        let endpoint = Endpoint::Files {
            project_id: 7,
            offset: Some(0),
        };
        assert_eq!(endpoint.to_string(), "projects/7/attachments.xml?n=0");
    }
}
