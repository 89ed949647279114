//! Core data models shared by the search path and the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is searching. Decided by the route that received the request,
/// never by the client payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Students only ever see active posts.
    Student,
    /// Authors (professors) search across every status.
    Author,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Student => f.write_str("student"),
            Audience::Author => f.write_str("author"),
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" | "aluno" => Ok(Audience::Student),
            "author" | "professor" => Ok(Audience::Author),
            other => Err(format!(
                "unknown audience '{}'. Use student or author.",
                other
            )),
        }
    }
}

/// Publication status of a post as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PostStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "inativo")]
    Inactive,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Active => "ativo",
            PostStatus::Inactive => "inativo",
        }
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ativo" => Ok(PostStatus::Active),
            "inativo" => Ok(PostStatus::Inactive),
            other => Err(format!("unknown post status: '{}'", other)),
        }
    }
}

/// A post as returned by a store query.
///
/// `score` carries the similarity for fuzzy searches and is absent for
/// exact (substring) searches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_parses_route_names() {
        assert_eq!("aluno".parse::<Audience>().unwrap(), Audience::Student);
        assert_eq!("professor".parse::<Audience>().unwrap(), Audience::Author);
        assert!("admin".parse::<Audience>().is_err());
    }

    #[test]
    fn test_status_serializes_as_stored_value() {
        let json = serde_json::to_string(&PostStatus::Inactive).unwrap();
        assert_eq!(json, "\"inativo\"");
        assert_eq!(PostStatus::Active.as_str(), "ativo");
    }
}
