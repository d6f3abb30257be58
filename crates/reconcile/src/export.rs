//! Network snapshot export.
//!
//! Dumps the fetched lists in the flat files the visualization tooling
//! reads: one CSV per list, an edge list, and a JSON classification of every
//! account relative to the acting one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use graph_client::{FollowSet, Username};

use crate::driver::Snapshot;

/// How an account relates to the acting account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// Follows us and we follow them
    Mutual,
    /// Follows us only
    Follower,
    /// Followed by us only
    Following,
}

/// One classified account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkNode {
    pub login: Username,
    pub relationship: Relationship,
}

/// Classified view of a [`Snapshot`], ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkGraph {
    pub account: String,
    pub date: String,
    pub mutual: usize,
    pub followers_only: usize,
    pub following_only: usize,
    pub nodes: Vec<NetworkNode>,
}

impl NetworkGraph {
    /// Classify every account in `snapshot`, sorted by login.
    pub fn build(account: &str, date: &str, snapshot: &Snapshot) -> Self {
        let all: FollowSet = snapshot
            .followers
            .union(&snapshot.following)
            .cloned()
            .collect();

        let nodes: Vec<NetworkNode> = all
            .into_iter()
            .map(|login| {
                let relationship = match (
                    snapshot.followers.contains(&login),
                    snapshot.following.contains(&login),
                ) {
                    (true, true) => Relationship::Mutual,
                    (true, false) => Relationship::Follower,
                    _ => Relationship::Following,
                };
                NetworkNode {
                    login,
                    relationship,
                }
            })
            .collect();

        let count = |r: Relationship| nodes.iter().filter(|n| n.relationship == r).count();

        Self {
            account: account.to_string(),
            date: date.to_string(),
            mutual: count(Relationship::Mutual),
            followers_only: count(Relationship::Follower),
            following_only: count(Relationship::Following),
            nodes,
        }
    }
}

/// Write the four snapshot files into `out_dir`, dated today.
///
/// # Returns
/// The paths written, in the order followers, following, network CSV,
/// network JSON.
pub fn export_snapshot(out_dir: &Path, account: &str, snapshot: &Snapshot) -> Result<Vec<PathBuf>> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    export_snapshot_dated(out_dir, account, snapshot, &today)
}

/// Same as [`export_snapshot`] with an explicit date stamp.
pub fn export_snapshot_dated(
    out_dir: &Path,
    account: &str,
    snapshot: &Snapshot,
    date: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let followers_path = out_dir.join(format!("followers_{}.csv", date));
    write_file(&followers_path, &username_csv(&snapshot.followers))?;

    let following_path = out_dir.join(format!("following_{}.csv", date));
    write_file(&following_path, &username_csv(&snapshot.following))?;

    let network_path = out_dir.join(format!("network_{}.csv", date));
    write_file(&network_path, &edge_csv(account, snapshot))?;

    let graph = NetworkGraph::build(account, date, snapshot);
    let json_path = out_dir.join(format!("network_{}.json", date));
    let json = serde_json::to_string_pretty(&graph).context("Failed to serialize network graph")?;
    write_file(&json_path, &json)?;

    info!(
        "Exported network snapshot for {} ({} mutual, {} followers only, {} following only) to {}",
        account,
        graph.mutual,
        graph.followers_only,
        graph.following_only,
        out_dir.display()
    );

    Ok(vec![followers_path, following_path, network_path, json_path])
}

fn username_csv(users: &FollowSet) -> String {
    let mut out = String::from("username\n");
    for user in users {
        out.push_str(user);
        out.push('\n');
    }
    out
}

fn edge_csv(account: &str, snapshot: &Snapshot) -> String {
    let mut out = String::from("source,target,relationship\n");
    for user in &snapshot.following {
        out.push_str(&format!("{},{},following\n", account, user));
    }
    for user in &snapshot.followers {
        out.push_str(&format!("{},{},following\n", user, account));
    }
    out
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
