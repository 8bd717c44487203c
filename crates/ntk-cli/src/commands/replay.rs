//! `ntk replay`: feed recorded OCR frames through a roster.
//!
//! The first frame seeds the roster; frame `k` is reconciled at
//! `start + k * interval`. The final roster is printed one row per line as
//! `<index>\t<identifier or ->\t<full|partial>`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use ntk_roster::{snapshot_from_rows, Listing, ListingId, SnapshotList};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::resolve_config;

pub type Frame = Vec<Option<ListingId>>;

pub fn run(
    frames_path: &Path,
    config_paths: &[String],
    interval_secs: u64,
    start: Option<&str>,
) -> Result<()> {
    let config = resolve_config(config_paths)?;
    let start = match start {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("--start must be RFC 3339, got {raw}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let raw = fs::read_to_string(frames_path)
        .with_context(|| format!("failed to read frames: {}", frames_path.display()))?;
    let frames = parse_frames(&raw)?;

    info!(
        frames = frames.len(),
        config_hash = config.config_hash.as_deref().unwrap_or("defaults"),
        "replaying frames"
    );

    let list = replay_frames(frames, config.roster, start, interval_secs)?;

    for line in render_roster(list.entries()) {
        println!("{line}");
    }
    Ok(())
}

/// One frame per non-blank line.
pub fn parse_frames(raw: &str) -> Result<Vec<Frame>> {
    let mut frames = Vec::new();
    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame: Frame = serde_json::from_str(line).with_context(|| {
            format!(
                "frame {} is not a JSON array of string / integer / null rows",
                lineno + 1
            )
        })?;
        frames.push(frame);
    }
    if frames.is_empty() {
        bail!("no frames to replay");
    }
    Ok(frames)
}

pub fn replay_frames(
    frames: Vec<Frame>,
    config: ntk_roster::RosterConfig,
    start: DateTime<Utc>,
    interval_secs: u64,
) -> Result<SnapshotList> {
    let mut frames = frames.into_iter();
    let Some(first) = frames.next() else {
        bail!("no frames to replay");
    };

    let mut list = SnapshotList::from_rows_at(first, config, start);
    for (k, frame) in frames.enumerate() {
        let now = u64::try_from(k + 1)
            .ok()
            .and_then(|k| k.checked_mul(interval_secs))
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|step| start.checked_add_signed(step))
            .context("replay clock overflow")?;

        let outcome = list.reconcile_at(snapshot_from_rows(frame, now), now);
        debug!(frame = k + 1, path = ?outcome.path, len = list.len(), "frame reconciled");
    }
    Ok(list)
}

pub fn render_roster(entries: &[Listing]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let id = entry
                .id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let lock = if entry.is_full_match() {
                "full"
            } else {
                "partial"
            };
            format!("{index}\t{id}\t{lock}")
        })
        .collect()
}
