use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};
use tracing::debug;

use crate::filter::FilteredView;
use crate::metrics::{cumulative_by_date, keyword_frequency, monthly_volume, rating_summary};

/// Write all chart-ready JSON files for the analytics tab into `out_dir`.
pub fn write_all_viz(
    out_dir: &Path,
    view: &FilteredView,
    keyword_groups: &[(&str, &[&str])],
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    // 1) Cumulative review count over time
    let cumulative = cumulative_by_date(view);
    write_json(out_dir.join("viz.cumulative.json"), &cumulative)?;

    // 2) Monthly task volume
    let monthly = monthly_volume(view);
    write_json(out_dir.join("viz.monthly.json"), &monthly)?;

    // 3) Keyword/sentiment tallies
    let keywords = keyword_frequency(view, keyword_groups);
    write_json(out_dir.join("viz.keywords.json"), &keywords)?;

    // 4) Index with headline counts
    let idx = json!({
        "version": 1,
        "counts": {
            "records": view.len(),
            "dated": cumulative.len(),
        },
        "rating": rating_summary(view),
        "files": [
            "viz.cumulative.json",
            "viz.monthly.json",
            "viz.keywords.json"
        ]
    });
    write_json(out_dir.join("viz.index.json"), &idx)?;

    debug!(
        "Viz export complete - dir={:?}, records={}",
        out_dir,
        view.len()
    );
    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}
