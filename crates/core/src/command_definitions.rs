use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CLI_PREFIX;

/// Whether a grammar node is matched literally or captures any token.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Command,
    Option,
}

impl Display for NodeType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::Command => formatter.write_str("command"),
            NodeType::Option => formatter.write_str("option"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DescriptionDefinition {
    pub language: String,
    pub name: Option<String>,
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CommandDefinition {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub handler: Option<String>,
    pub examples: Option<String>,
    pub descriptions: Vec<DescriptionDefinition>,
    pub commands: IndexMap<String, CommandDefinition>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    pub version: String,
    pub copyright: String,
    pub released_at: String,
    pub case_sensitive: bool,
    pub cli_prefix: String,
    pub preferred_language: Option<String>,
    pub debug: bool,
    pub commands: IndexMap<String, CommandDefinition>,
}

impl ApplicationConfig {
    /// The prompt printed in front of every input line.
    #[must_use]
    pub fn prompt_prefix(&self) -> &str {
        if self.cli_prefix.is_empty() {
            DEFAULT_CLI_PREFIX
        } else {
            &self.cli_prefix
        }
    }

    /// Option nodes and partial words are compared case-insensitively unless
    /// the configuration asks for case sensitivity.
    #[must_use]
    pub fn ignore_case(&self) -> bool {
        !self.case_sensitive
    }
}
