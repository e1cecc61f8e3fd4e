//! Typed resource services over the REST collections.
//!
//! Every entity follows the same create=POST, read=GET, update=PUT
//! (partial body), delete=DELETE convention, so one generic `Resource<T>`
//! covers them all; `PortfolioApi` groups the typed instances and the few
//! endpoint-specific calls (message filters, tag name payloads).

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::models::{
    About, Certificate, Experience, Message, Project, Service, Skill, SkillCategory, SocialLink,
    Tag,
};

use super::{ApiClient, ApiError, ApiResponse};

/// Thin façade over one REST collection. No retries, no caching - the
/// client pipeline handles auth recovery, and callers own cache policy.
pub struct Resource<T> {
    client: ApiClient,
    path: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path,
            _entity: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Resource<T> {
    fn new(client: ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<T>>, ApiError> {
        self.client.get(self.path, &[]).await
    }

    pub async fn list_with(
        &self,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<Vec<T>>, ApiError> {
        self.client.get(self.path, query).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<T>, ApiError> {
        self.client
            .get(&format!("{}/{}", self.path, id), &[])
            .await
    }

    pub async fn create<B: Serialize>(&self, data: &B) -> Result<ApiResponse<T>, ApiError> {
        self.client.post(self.path, data).await
    }

    /// Partial update: the body carries only the fields to change.
    pub async fn update<B: Serialize>(
        &self,
        id: i64,
        data: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.client
            .put(&format!("{}/{}", self.path, id), data)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, ApiError> {
        self.client.delete(&format!("{}/{}", self.path, id)).await
    }
}

/// All resource services of the portfolio API, one per entity.
#[derive(Clone)]
pub struct PortfolioApi {
    pub about: Resource<About>,
    pub social_links: Resource<SocialLink>,
    pub projects: Resource<Project>,
    pub tags: Resource<Tag>,
    pub skills: Resource<Skill>,
    pub skill_categories: Resource<SkillCategory>,
    pub services: Resource<Service>,
    pub experience: Resource<Experience>,
    pub certificates: Resource<Certificate>,
    pub messages: Resource<Message>,
}

impl PortfolioApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            about: Resource::new(client.clone(), "/about"),
            social_links: Resource::new(client.clone(), "/social-links"),
            projects: Resource::new(client.clone(), "/projects"),
            tags: Resource::new(client.clone(), "/tags"),
            skills: Resource::new(client.clone(), "/skills"),
            skill_categories: Resource::new(client.clone(), "/skill-categories"),
            services: Resource::new(client.clone(), "/services"),
            experience: Resource::new(client.clone(), "/experience"),
            certificates: Resource::new(client.clone(), "/certificates"),
            messages: Resource::new(client, "/messages"),
        }
    }

    /// Contact messages not yet marked read.
    pub async fn unread_messages(&self) -> Result<ApiResponse<Vec<Message>>, ApiError> {
        self.messages
            .list_with(&[("unread", "true".to_string())])
            .await
    }

    pub async fn mark_message_read(&self, id: i64) -> Result<ApiResponse<Message>, ApiError> {
        self.messages
            .update(id, &serde_json::json!({ "read": true }))
            .await
    }

    pub async fn featured_projects(&self) -> Result<ApiResponse<Vec<Project>>, ApiError> {
        self.projects
            .list_with(&[("featured", "true".to_string())])
            .await
    }

    pub async fn projects_by_tag(&self, tag_id: i64) -> Result<ApiResponse<Vec<Project>>, ApiError> {
        self.projects
            .list_with(&[("tagId", tag_id.to_string())])
            .await
    }

    /// Tags are created and renamed with a bare name payload.
    pub async fn create_tag(&self, name: &str) -> Result<ApiResponse<Tag>, ApiError> {
        self.tags.create(&serde_json::json!({ "name": name })).await
    }

    pub async fn rename_tag(&self, id: i64, name: &str) -> Result<ApiResponse<Tag>, ApiError> {
        self.tags
            .update(id, &serde_json::json!({ "name": name }))
            .await
    }
}
