use std::path::Path;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::fs;

use backend_domain::{Holder, RosterRepository};

/// Reads holder rosters exported by the accounts service. The format follows
/// the file extension: `.json` is JSON, everything else is YAML.
pub struct RosterFileRepository;

impl RosterFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RosterFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn parse_holders(path: &Path, content: &str) -> anyhow::Result<Vec<Holder>> {
    let holders: Vec<Holder> = if is_json(path) {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };
    let mut normalized = Vec::with_capacity(holders.len());
    for mut holder in holders {
        holder.full_name = holder.full_name.trim().to_string();
        if holder.full_name.is_empty() {
            return Err(anyhow!("holder {} has an empty full_name", holder.user_id));
        }
        normalized.push(holder);
    }
    Ok(normalized)
}

#[async_trait]
impl RosterRepository for RosterFileRepository {
    async fn load_holders(&self, path: &str) -> anyhow::Result<Vec<Holder>> {
        let file_path = Path::new(path);
        if !file_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(file_path).await?;
        parse_holders(file_path, &content)
    }
}
