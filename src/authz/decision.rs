//! Pure allow/deny decision over a permitted set. No I/O.

use std::fmt;

use super::resource_path::ResourcePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The policy service granted nothing for the action.
    NoGrants,
    /// Grants exist, but the target is not one of them.
    NotGranted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub reason: DenialReason,
    pub action: String,
    pub acting_on: Option<ResourcePath>,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, &self.acting_on) {
            (DenialReason::NotGranted, Some(path)) => write!(
                f,
                "User is not allowed to {} on resource path: {}",
                self.action, path
            ),
            _ => write!(
                f,
                "User is not allowed to {} on any resource path",
                self.action
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(Denial),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Exact string membership only: `/programs/x/projects/*` does not match
/// `/programs/x/projects/y` unless the policy service expanded it already.
pub fn decide(permitted: &[String], target: &ResourcePath, action: &str) -> AccessDecision {
    if permitted.is_empty() {
        return AccessDecision::Denied(Denial {
            reason: DenialReason::NoGrants,
            action: action.to_string(),
            acting_on: None,
        });
    }

    if permitted.iter().any(|p| p == target.as_str()) {
        return AccessDecision::Allowed;
    }

    AccessDecision::Denied(Denial {
        reason: DenialReason::NotGranted,
        action: action.to_string(),
        acting_on: Some(target.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::resource_path::derive_project_path;

    fn grants(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn empty_grant_set_is_denied_without_target() {
        let target = derive_project_path("ohsu-test").unwrap();
        let decision = decide(&[], &target, "read");

        let AccessDecision::Denied(denial) = decision else {
            panic!("expected denial");
        };
        assert_eq!(denial.reason, DenialReason::NoGrants);
        assert_eq!(denial.acting_on, None);
        assert_eq!(
            denial.to_string(),
            "User is not allowed to read on any resource path"
        );
    }

    #[test]
    fn exact_member_is_allowed() {
        let target = derive_project_path("ohsu-test").unwrap();
        let permitted = grants(&["/programs/other/projects/x", "/programs/ohsu/projects/test"]);
        assert!(decide(&permitted, &target, "read").is_allowed());
    }

    #[test]
    fn mismatch_names_action_and_target() {
        let target = derive_project_path("ohsu-test").unwrap();
        let permitted = grants(&["/programs/other/projects/test"]);

        let AccessDecision::Denied(denial) = decide(&permitted, &target, "create") else {
            panic!("expected denial");
        };
        assert_eq!(denial.reason, DenialReason::NotGranted);
        let message = denial.to_string();
        assert!(message.contains("create"));
        assert!(message.contains("/programs/ohsu/projects/test"));
    }

    #[test]
    fn no_prefix_or_wildcard_matching() {
        let target = derive_project_path("x-y").unwrap();
        let permitted = grants(&["/programs/x/projects/*", "/programs/x", "/programs/x/projects"]);
        assert!(!decide(&permitted, &target, "read").is_allowed());
    }

    #[test]
    fn duplicates_are_immaterial() {
        let target = derive_project_path("x-y").unwrap();
        let permitted = grants(&["/programs/x/projects/y", "/programs/x/projects/y"]);
        assert!(decide(&permitted, &target, "read").is_allowed());
    }
}
