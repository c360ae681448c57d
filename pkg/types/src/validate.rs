use anyhow::{Result, bail};

use crate::rbac::{
    ClusterRoleBinding, RBAC_API_GROUP, RoleBinding, RoleRef, RoleRefKind, Subject, SubjectKind,
};

/// Validate a Kubernetes-style resource name.
/// Rules: lowercase `[a-z0-9-]`, max 63 chars, no leading/trailing hyphens.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.len() > 63 {
        bail!("name '{}' exceeds 63 characters (got {})", name, name.len());
    }
    if name.starts_with('-') || name.ends_with('-') {
        bail!("name '{}' must not start or end with a hyphen", name);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!(
            "name '{}' must contain only lowercase letters, digits, and hyphens [a-z0-9-]",
            name
        );
    }
    Ok(())
}

/// Validate a single subject reference.
///
/// ServiceAccount subjects are namespaced and carry no API group;
/// User and Group subjects are the opposite. Subject names are not held
/// to resource-name rules: identities like `system:masters` or email
/// addresses are legal.
pub fn validate_subject(subject: &Subject) -> Result<()> {
    if subject.name.is_empty() {
        bail!("subject name must not be empty");
    }
    match subject.kind {
        SubjectKind::ServiceAccount => {
            match &subject.namespace {
                Some(ns) => validate_name(ns)?,
                None => bail!(
                    "ServiceAccount subject '{}' requires a namespace",
                    subject.name
                ),
            }
            if matches!(&subject.api_group, Some(group) if !group.is_empty()) {
                bail!(
                    "ServiceAccount subject '{}' must not set an apiGroup",
                    subject.name
                );
            }
        }
        SubjectKind::User | SubjectKind::Group => {
            if subject.namespace.is_some() {
                bail!(
                    "{:?} subject '{}' must not set a namespace",
                    subject.kind,
                    subject.name
                );
            }
            if let Some(group) = &subject.api_group {
                if group != RBAC_API_GROUP {
                    bail!(
                        "{:?} subject '{}' has unsupported apiGroup '{}'",
                        subject.kind,
                        subject.name,
                        group
                    );
                }
            }
        }
    }
    Ok(())
}

fn validate_role_ref(role_ref: &RoleRef) -> Result<()> {
    // Role names may contain characters resource names cannot
    // (e.g. `system:node`), so only require them to be present.
    if role_ref.name.is_empty() {
        bail!("role ref name must not be empty");
    }
    if role_ref.api_group != RBAC_API_GROUP {
        bail!(
            "role ref '{}' has unsupported apiGroup '{}'",
            role_ref.name,
            role_ref.api_group
        );
    }
    Ok(())
}

/// Validate a namespaced role binding before it is recorded.
pub fn validate_role_binding(rb: &RoleBinding) -> Result<()> {
    validate_name(&rb.name)?;
    validate_name(&rb.namespace)?;
    validate_role_ref(&rb.role_ref)?;
    for subject in &rb.subjects {
        validate_subject(subject)?;
    }
    Ok(())
}

/// Validate a cluster role binding before it is recorded.
pub fn validate_cluster_role_binding(crb: &ClusterRoleBinding) -> Result<()> {
    validate_name(&crb.name)?;
    if crb.role_ref.kind != RoleRefKind::ClusterRole {
        bail!(
            "cluster role binding '{}' must reference a ClusterRole",
            crb.name
        );
    }
    validate_role_ref(&crb.role_ref)?;
    for subject in &crb.subjects {
        validate_subject(subject)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn role_ref(kind: RoleRefKind, name: &str) -> RoleRef {
        RoleRef {
            kind,
            name: name.to_string(),
            api_group: RBAC_API_GROUP.to_string(),
        }
    }

    fn binding(name: &str, namespace: &str, subjects: Vec<Subject>) -> RoleBinding {
        RoleBinding {
            uid: String::new(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            labels: HashMap::new(),
            role_ref: role_ref(RoleRefKind::Role, "viewer"),
            subjects,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_names() {
        assert!(validate_name("nginx").is_ok());
        assert!(validate_name("view-binding").is_ok());
        assert!(validate_name("app-123").is_ok());
        assert!(validate_name("a").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("View-Binding").is_err());
        assert!(validate_name("view_binding").is_err());
        assert!(validate_name("-leading").is_err());
        assert!(validate_name("trailing-").is_err());
        assert!(validate_name(&"a".repeat(64)).is_err());
    }

    #[test]
    fn service_account_subject_needs_namespace() {
        let mut subject = Subject {
            kind: SubjectKind::ServiceAccount,
            name: "deployer".to_string(),
            namespace: None,
            api_group: None,
        };
        assert!(validate_subject(&subject).is_err());

        subject.namespace = Some("default".to_string());
        assert!(validate_subject(&subject).is_ok());

        subject.api_group = Some(RBAC_API_GROUP.to_string());
        assert!(validate_subject(&subject).is_err());
    }

    #[test]
    fn user_subject_rejects_namespace_and_foreign_group() {
        let mut subject = Subject {
            kind: SubjectKind::User,
            name: "system:masters".to_string(),
            namespace: None,
            api_group: Some(RBAC_API_GROUP.to_string()),
        };
        assert!(validate_subject(&subject).is_ok());

        subject.namespace = Some("default".to_string());
        assert!(validate_subject(&subject).is_err());

        subject.namespace = None;
        subject.api_group = Some("apps".to_string());
        assert!(validate_subject(&subject).is_err());
    }

    #[test]
    fn role_binding_checks_name_and_namespace() {
        assert!(validate_role_binding(&binding("view-binding", "default", vec![])).is_ok());
        assert!(validate_role_binding(&binding("View-Binding", "default", vec![])).is_err());
        assert!(validate_role_binding(&binding("view-binding", "Bad_NS", vec![])).is_err());
    }

    #[test]
    fn role_binding_rejects_foreign_role_ref_group() {
        let mut rb = binding("view-binding", "default", vec![]);
        rb.role_ref.api_group = "apps".to_string();
        assert!(validate_role_binding(&rb).is_err());
    }

    #[test]
    fn cluster_role_binding_requires_cluster_role_ref() {
        let mut crb = ClusterRoleBinding {
            uid: String::new(),
            name: "cluster-admins".to_string(),
            labels: HashMap::new(),
            role_ref: role_ref(RoleRefKind::ClusterRole, "cluster-admin"),
            subjects: vec![],
            created_at: Utc::now(),
        };
        assert!(validate_cluster_role_binding(&crb).is_ok());

        crb.role_ref.kind = RoleRefKind::Role;
        assert!(validate_cluster_role_binding(&crb).is_err());
    }
}
