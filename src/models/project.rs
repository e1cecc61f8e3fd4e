use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "liveUrl", default)]
    pub live_url: Option<String>,
    #[serde(rename = "githubUrl", default)]
    pub github_url: Option<String>,
    pub featured: bool,
    pub order: i64,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

impl Project {
    /// Tag names for display, in server order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|t| t.name.as_str())
            .collect()
    }
}

/// Create/update payload. Tags are sent as bare names; the server resolves
/// or creates them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "liveUrl", skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(rename = "githubUrl", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_with_tags() {
        let json = r#"{"id":3,"title":"Portfolio","description":"This site","featured":true,"order":1,"tags":[{"id":1,"name":"rust"},{"id":2,"name":"web"}]}"#;
        let project: Project = serde_json::from_str(json).expect("Failed to parse project JSON");
        assert!(project.featured);
        assert_eq!(project.tag_names(), vec!["rust", "web"]);
    }

    #[test]
    fn test_project_form_skips_unset_fields() {
        let form = ProjectForm {
            title: "New".to_string(),
            description: "Desc".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&form).expect("Failed to serialize project form");
        assert!(json.get("featured").is_none());
        assert!(json.get("tags").is_none());
        assert_eq!(json["title"], "New");
    }
}
