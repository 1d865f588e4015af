//! Agent card served for discovery

use serde::{Deserialize, Serialize};

/// Capability advertised by an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSkill {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Discovery document describing a hosted agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.skills.push(AgentSkill {
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
        });
        self
    }
}
