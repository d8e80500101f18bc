//! Response types (Serialize)

use serde::Serialize;
use wortschatz_core::Topic;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    pub topics: Vec<Topic>,
    pub count: usize,
}

impl From<Vec<Topic>> for TopicListResponse {
    fn from(topics: Vec<Topic>) -> Self {
        Self { count: topics.len(), topics }
    }
}
