use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rbac::{ClusterRoleBinding, RoleBinding, RoleRef, Subject};

/// Snapshot of a role binding shaped for an API response body.
///
/// Constructed transiently when a stored binding is translated into a
/// response and discarded after serialization. Wire fields are `name`,
/// `namespace`, `roleRef`, `subjects`, `creationDate`; `subjects` always
/// renders as an array (empty list means `[]`, never null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBindingView {
    pub name: String,
    pub namespace: String,
    pub role_ref: RoleRef,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub creation_date: DateTime<Utc>,
}

impl From<&RoleBinding> for RoleBindingView {
    fn from(rb: &RoleBinding) -> Self {
        Self {
            name: rb.name.clone(),
            namespace: rb.namespace.clone(),
            role_ref: rb.role_ref.clone(),
            subjects: rb.subjects.clone(),
            creation_date: rb.created_at,
        }
    }
}

/// Cluster-scoped analogue of [`RoleBindingView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBindingView {
    pub name: String,
    pub role_ref: RoleRef,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub creation_date: DateTime<Utc>,
}

impl From<&ClusterRoleBinding> for ClusterRoleBindingView {
    fn from(crb: &ClusterRoleBinding) -> Self {
        Self {
            name: crb.name.clone(),
            role_ref: crb.role_ref.clone(),
            subjects: crb.subjects.clone(),
            creation_date: crb.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{RBAC_API_GROUP, RoleRefKind, SubjectKind};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn viewer_role_ref() -> RoleRef {
        RoleRef {
            kind: RoleRefKind::Role,
            name: "viewer".to_string(),
            api_group: RBAC_API_GROUP.to_string(),
        }
    }

    fn user(name: &str) -> Subject {
        Subject {
            kind: SubjectKind::User,
            name: name.to_string(),
            namespace: None,
            api_group: Some(RBAC_API_GROUP.to_string()),
        }
    }

    fn service_account(namespace: &str, name: &str) -> Subject {
        Subject {
            kind: SubjectKind::ServiceAccount,
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
            api_group: None,
        }
    }

    #[test]
    fn wire_field_names_match_contract() {
        let view = RoleBindingView {
            name: "edit-binding".to_string(),
            namespace: "staging".to_string(),
            role_ref: viewer_role_ref(),
            subjects: vec![user("alice")],
            creation_date: fixed_time(),
        };
        let json = serde_json::to_value(&view).unwrap();

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["creationDate", "name", "namespace", "roleRef", "subjects"]);
        assert_eq!(json["roleRef"]["kind"], "Role");
        assert_eq!(json["roleRef"]["name"], "viewer");
        assert_eq!(json["roleRef"]["apiGroup"], RBAC_API_GROUP);
    }

    #[test]
    fn empty_subjects_render_as_empty_array() {
        let view = RoleBindingView {
            name: "view-binding".to_string(),
            namespace: "default".to_string(),
            role_ref: viewer_role_ref(),
            subjects: Vec::new(),
            creation_date: fixed_time(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["subjects"], serde_json::json!([]));
    }

    #[test]
    fn creation_date_is_rfc3339() {
        let view = RoleBindingView {
            name: "view-binding".to_string(),
            namespace: "default".to_string(),
            role_ref: viewer_role_ref(),
            subjects: Vec::new(),
            creation_date: fixed_time(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["creationDate"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn subject_order_survives_round_trip() {
        let view = RoleBindingView {
            name: "mixed-binding".to_string(),
            namespace: "default".to_string(),
            role_ref: viewer_role_ref(),
            subjects: vec![
                user("carol"),
                service_account("default", "deployer"),
                user("alice"),
            ],
            creation_date: fixed_time(),
        };
        let encoded = serde_json::to_string(&view).unwrap();
        let decoded: RoleBindingView = serde_json::from_str(&encoded).unwrap();

        let names: Vec<&str> = decoded.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["carol", "deployer", "alice"]);
    }

    #[test]
    fn round_trip_identity() {
        let view = RoleBindingView {
            name: "edit-binding".to_string(),
            namespace: "staging".to_string(),
            role_ref: viewer_role_ref(),
            subjects: vec![user("alice"), service_account("staging", "ci")],
            creation_date: fixed_time(),
        };
        let encoded = serde_json::to_string(&view).unwrap();
        let decoded: RoleBindingView = serde_json::from_str(&encoded).unwrap();
        assert_eq!(view, decoded);
    }

    #[test]
    fn projection_drops_internal_fields() {
        let rb = RoleBinding {
            uid: "2b1c3c74-8de1-4a0f-9f53-1f2b17b3a111".to_string(),
            name: "view-binding".to_string(),
            namespace: "default".to_string(),
            labels: [("team".to_string(), "platform".to_string())].into(),
            role_ref: viewer_role_ref(),
            subjects: vec![user("alice")],
            created_at: fixed_time(),
        };
        let json = serde_json::to_value(RoleBindingView::from(&rb)).unwrap();
        assert!(json.get("uid").is_none());
        assert!(json.get("labels").is_none());
        assert_eq!(json["creationDate"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn cluster_view_has_no_namespace_field() {
        let crb = ClusterRoleBinding {
            uid: String::new(),
            name: "cluster-admins".to_string(),
            labels: Default::default(),
            role_ref: RoleRef {
                kind: RoleRefKind::ClusterRole,
                name: "cluster-admin".to_string(),
                api_group: RBAC_API_GROUP.to_string(),
            },
            subjects: vec![user("root")],
            created_at: fixed_time(),
        };
        let json = serde_json::to_value(ClusterRoleBindingView::from(&crb)).unwrap();
        assert!(json.get("namespace").is_none());
        assert_eq!(json["roleRef"]["kind"], "ClusterRole");
    }
}
