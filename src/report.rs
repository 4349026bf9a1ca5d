use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Summary;

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed creating output directory {:?}", dir))?;
        }
    }
    Ok(())
}

/// Pretty-prints `summary` as JSON (2-space indent) into `writer`.
pub fn write_summary_to<W: Write>(writer: W, summary: &Summary) -> Result<()> {
    serde_json::to_writer_pretty(writer, summary).context("failed to serialize summary")?;
    Ok(())
}

/// Persists `summary` at `path`, creating the parent directory first.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    ensure_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("failed to create summary file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_summary_to(&mut writer, summary)?;
    writer
        .flush()
        .with_context(|| format!("failed to write summary file {}", path.display()))?;
    Ok(())
}

fn pct(n: u64, d: u64) -> String {
    if d == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", n as f64 / d as f64 * 100.0)
}

/// Condensed console view of `summary`.
pub fn render_console(summary: &Summary, output_path: &Path) -> String {
    let total = summary.input.total_transactions;
    let relay = &summary.by_to.relay;
    let helper = &summary.by_to.weth_helper;

    format!(
        "\n=== Summary ===\n\
         Total transactions: {total}\n\
         {} (to == {}): {} ({})\n\
         {}  (to == {}): {} ({})\n\
         OTHER unique 'to' addresses: {}\n\
         Summary JSON written to: {}\n",
        relay.name,
        relay.address,
        relay.count,
        pct(relay.count, total),
        helper.name,
        helper.address,
        helper.count,
        pct(helper.count, total),
        summary.by_to.other.to_addresses.unique_count,
        output_path.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ByToStats;
    use crate::config::{AddressBook, ADDR_RAILGUN_RELAY, ADDR_WETH_HELPER};
    use crate::models::Record;
    use crate::summary::build_summary;
    use serde_json::{json, Value};

    fn sample_summary() -> Summary {
        let book = AddressBook::default();
        let mut stats = ByToStats::new();
        for value in [
            json!({"to": ADDR_RAILGUN_RELAY, "transactionHash": "0xaa"}),
            json!({"to": ADDR_WETH_HELPER, "transactionHash": "0xbb"}),
            json!({"to": "0xDead", "transactionHash": "0xcc"}),
        ] {
            let record: Record = serde_json::from_value(value).unwrap();
            stats.observe(&book, &record);
        }
        build_summary("test", Path::new("data/_raw_test.ndjson"), &book, &stats)
    }

    #[test]
    fn json_layout_matches_report_shape() {
        let mut buf = Vec::new();
        write_summary_to(&mut buf, &sample_summary()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("{\n  \"mode\": \"test\",\n  \"input\": {"));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["input"]["total_transactions"], 3);
        assert_eq!(value["by_to"]["relay"]["name"], "Railgun:Relay");
        assert_eq!(value["by_to"]["relay"]["percentage"], 33.33);
        assert_eq!(value["by_to"]["weth_helper"]["address"], ADDR_WETH_HELPER);
        assert_eq!(
            value["by_to"]["other"]["to_addresses"],
            json!({
                "unique_count": 1,
                "unique": ["0xDead"],
                "frequencies": [{"address": "0xDead", "count": 1}]
            })
        );
        assert_eq!(value["by_to"]["other"]["transaction_hashes"], json!(["0xcc"]));
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("external_test.json");
        write_summary(&path, &sample_summary()).unwrap();
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["mode"], "test");
    }

    #[test]
    fn write_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let path = blocker.join("external_test.json");
        assert!(write_summary(&path, &sample_summary()).is_err());
    }

    #[test]
    fn console_lines() {
        let rendered = render_console(&sample_summary(), Path::new("data/external_test.json"));
        let expected = format!(
            "\n=== Summary ===\n\
             Total transactions: 3\n\
             Railgun:Relay (to == {ADDR_RAILGUN_RELAY}): 1 (33.33%)\n\
             WETH Helper  (to == {ADDR_WETH_HELPER}): 1 (33.33%)\n\
             OTHER unique 'to' addresses: 1\n\
             Summary JSON written to: data/external_test.json\n"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn console_and_artifact_agree_on_ties() {
        let book = AddressBook::default();
        let mut stats = ByToStats::new();
        let relay: Record = serde_json::from_value(json!({"to": ADDR_RAILGUN_RELAY})).unwrap();
        stats.observe(&book, &relay);
        for i in 0..31 {
            let other: Record = serde_json::from_value(json!({"to": format!("0x{i}")})).unwrap();
            stats.observe(&book, &other);
        }
        let summary = build_summary("test", Path::new("in"), &book, &stats);
        assert_eq!(summary.by_to.relay.percentage, 3.12);

        let rendered = render_console(&summary, Path::new("out.json"));
        assert!(rendered.contains(&format!("(to == {ADDR_RAILGUN_RELAY}): 1 (3.12%)\n")));
    }

    #[test]
    fn console_zero_total() {
        let summary = build_summary(
            "v2",
            Path::new("in"),
            &AddressBook::default(),
            &ByToStats::new(),
        );
        let rendered = render_console(&summary, Path::new("out.json"));
        assert!(rendered.contains("Total transactions: 0\n"));
        assert!(rendered.contains("): 0 (0.00%)\n"));
        assert!(rendered.contains("OTHER unique 'to' addresses: 0\n"));
    }
}
