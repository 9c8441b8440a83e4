// src/project.rs
// Project context resolution from the transcript path

use serde::Serialize;

/// Value used when the project cannot be determined
pub const UNKNOWN: &str = "unknown";

/// Project identity derived from a transcript path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext {
    pub name: String,
    pub path: String,
    pub transcript_path: String,
}

impl ProjectContext {
    /// Resolve the project from the first marker segment in `transcript_path`.
    ///
    /// `.../Projects/myapp/src/x.py` resolves to name `myapp` and path
    /// `.../Projects/myapp`. Best-effort: with no usable marker, both fields
    /// are `"unknown"`.
    pub fn resolve<S: AsRef<str>>(transcript_path: &str, markers: &[S]) -> Self {
        let segments: Vec<&str> = transcript_path.split('/').collect();
        let mut name = UNKNOWN.to_string();
        let mut path = UNKNOWN.to_string();

        if let Some(i) = segments
            .iter()
            .position(|seg| markers.iter().any(|m| m.as_ref() == *seg))
            && let Some(project) = segments.get(i + 1)
            && !project.is_empty()
        {
            name = (*project).to_string();
            path = segments[..i + 2].join("/");
        }

        Self {
            name,
            path,
            transcript_path: transcript_path.to_string(),
        }
    }

    /// Whether a project name was found
    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: &[&str] = &["Documents", "Projects", "workspace", "code"];

    #[test]
    fn resolves_project_after_marker() {
        let ctx = ProjectContext::resolve("/Users/dev/Projects/myapp/src/x.py", MARKERS);
        assert_eq!(ctx.name, "myapp");
        assert_eq!(ctx.path, "/Users/dev/Projects/myapp");
        assert_eq!(ctx.transcript_path, "/Users/dev/Projects/myapp/src/x.py");
        assert!(ctx.is_known());
    }

    #[test]
    fn relative_path_with_marker() {
        let ctx = ProjectContext::resolve("workspace/tool/notes.jsonl", MARKERS);
        assert_eq!(ctx.name, "tool");
        assert_eq!(ctx.path, "workspace/tool");
    }

    #[test]
    fn no_marker_is_unknown() {
        let ctx = ProjectContext::resolve("/home/dev/.claude/projects/abc/session.jsonl", MARKERS);
        assert_eq!(ctx.name, "unknown");
        assert_eq!(ctx.path, "unknown");
        assert!(!ctx.is_known());
    }

    #[test]
    fn marker_match_is_case_sensitive() {
        let ctx = ProjectContext::resolve("/home/dev/projects/app/s.jsonl", MARKERS);
        assert!(!ctx.is_known());
    }

    #[test]
    fn marker_in_last_segment_is_unknown() {
        let ctx = ProjectContext::resolve("/home/dev/code", MARKERS);
        assert_eq!(ctx.name, "unknown");
        assert_eq!(ctx.path, "unknown");
    }

    #[test]
    fn empty_segment_after_marker_is_unknown() {
        for path in ["/home/dev/Projects//session.jsonl", "/home/dev/code/"] {
            let ctx = ProjectContext::resolve(path, MARKERS);
            assert_eq!(ctx.name, "unknown", "{path}");
            assert_eq!(ctx.path, "unknown", "{path}");
            assert!(!ctx.is_known());
        }
    }

    #[test]
    fn first_marker_wins() {
        let ctx = ProjectContext::resolve("/home/Documents/alpha/code/beta/t.jsonl", MARKERS);
        assert_eq!(ctx.name, "alpha");
        assert_eq!(ctx.path, "/home/Documents/alpha");
    }

    #[test]
    fn empty_path_is_unknown() {
        let ctx = ProjectContext::resolve("", MARKERS);
        assert!(!ctx.is_known());
        assert_eq!(ctx.transcript_path, "");
    }

    #[test]
    fn custom_markers() {
        let markers = vec!["repos".to_string()];
        let ctx = ProjectContext::resolve("/srv/repos/engine/log.jsonl", &markers);
        assert_eq!(ctx.name, "engine");
    }
}
