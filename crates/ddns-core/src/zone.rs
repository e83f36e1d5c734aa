//! Zone name derivation
//!
//! Maps a record name to the zone that should contain it. This is a label
//! count heuristic, not a public-suffix lookup:
//!
//! - exactly 3 labels (`home.example.com`) → last 2 (`example.com`)
//! - anything else (`home.example.co.uk`) → last 3 (`example.co.uk`)
//!
//! It picks the wrong zone for deeper names under single-label TLDs
//! (`a.b.example.com` → `b.example.com`), and names with fewer than three
//! labels are returned whole.

/// Derive the zone name for `record_name`
pub fn zone_name(record_name: &str) -> String {
    let labels: Vec<&str> = record_name.split('.').collect();
    let keep = if labels.len() == 3 { 2 } else { 3 };
    let start = labels.len().saturating_sub(keep);
    labels[start..].join(".")
}
