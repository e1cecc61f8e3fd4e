//! Wire types for the portfolio REST API.
//!
//! All entities use camelCase field names on the wire and carry optional
//! `createdAt`/`updatedAt` ISO timestamps set by the server. `*Form` types
//! are the create payloads; partial updates are built by the caller from
//! the same shapes.

pub mod about;
pub mod auth;
pub mod experience;
pub mod message;
pub mod project;
pub mod service;
pub mod skill;

pub use about::{About, AboutForm, SocialLink, SocialLinkForm};
pub use auth::{
    AuthPayload, LoginCredentials, RefreshPayload, RegisterCredentials, RegisterPayload, Role,
    User,
};
pub use experience::{Certificate, CertificateForm, Experience, ExperienceForm};
pub use message::{Message, MessageForm};
pub use project::{Project, ProjectForm, Tag};
pub use service::{Service, ServiceForm};
pub use skill::{Skill, SkillCategory, SkillCategoryForm, SkillForm, SkillLevel};
