//! Writing the final state as JSON.
//!
//! The layout puts one entry per line with each value compact:
//!
//! ```text
//! {
//!  "red": [[0,0],"LIVE",null,1,1],
//!  ...
//!  "axe": [[2,2],false]
//! }
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::simulation::Snapshot;

/// Write `snapshot` to `out`.
pub fn write_snapshot<W: Write>(snapshot: &Snapshot, mut out: W) -> Result<()> {
    let entries = snapshot.entries()?;
    writeln!(out, "{{")?;
    for (i, (key, value)) in entries.iter().enumerate() {
        let sep = if i + 1 < entries.len() { "," } else { "" };
        writeln!(out, " {}: {}{sep}", serde_json::to_string(key)?, serde_json::to_string(value)?)?;
    }
    writeln!(out, "}}")?;
    out.flush()?;
    Ok(())
}

/// Render `snapshot` to a string.
pub fn render_snapshot(snapshot: &Snapshot) -> Result<String> {
    let mut buf = Vec::new();
    write_snapshot(snapshot, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write `snapshot` to a file, or to stdout when `path` is `-`.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if path == Path::new("-") {
        return write_snapshot(snapshot, io::stdout().lock());
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_snapshot(snapshot, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "saved final state");
    Ok(())
}
