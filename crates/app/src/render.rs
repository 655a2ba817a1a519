use common::catalog::{Catalog, FileRecord};
use common::format::{format_date, format_file_size, format_identifier, gateway_url, DateFormat};
use common::session::Address;
use url::Url;

pub const NO_FILES: &str = "No files yet. Your files will appear here once you upload them.";

const HEADERS: [&str; 6] = ["Date", "Name", "CID", "Pin Status", "Size", "Link"];

/// Stats block followed by the file table
pub fn render_dashboard(
    address: Option<&Address>,
    catalog: &Catalog,
    gateway: &Url,
    date_format: DateFormat,
) -> String {
    let mut lines = Vec::new();

    if let Some(address) = address {
        lines.push(format!("Your Address: {}", address));
    }
    lines.push(format!("Number of Files Stored: {} files", catalog.len()));
    lines.push(format!("Total Size: {}", catalog.formatted_total_size()));

    if !catalog.failures().is_empty() {
        lines.push(format!(
            "Could not load {} upload(s):",
            catalog.failures().len()
        ));
        for failure in catalog.failures() {
            lines.push(format!("  - {}: {}", failure.identifier, failure.error));
        }
    }

    lines.push(String::new());
    if catalog.is_empty() {
        lines.push(NO_FILES.to_string());
    } else {
        let rows: Vec<[String; 6]> = catalog
            .files()
            .iter()
            .map(|record| row(record, gateway, date_format))
            .collect();
        lines.extend(table(&rows));
    }

    lines.join("\n")
}

fn row(record: &FileRecord, gateway: &Url, date_format: DateFormat) -> [String; 6] {
    let date = record
        .last_modified
        .map(|ts| format_date(ts, date_format))
        .unwrap_or_else(|| "-".to_string());
    let link = gateway_url(gateway, &record.cid)
        .map(|url| url.to_string())
        .unwrap_or_default();

    [
        date,
        record.name.clone(),
        format_identifier(&record.cid),
        record.pin_status.to_string(),
        format_file_size(record.size),
        link,
    ]
}

fn table(rows: &[[String; 6]]) -> Vec<String> {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![format_line(HEADERS), rule];
    for row in rows {
        lines.push(format_line(row.each_ref().map(String::as_str)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog::CatalogBuilder;
    use common::testkit::MemoryStorage;

    fn gateway() -> Url {
        Url::parse("https://ipfs.io").unwrap()
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let catalog = CatalogBuilder::new(MemoryStorage::new()).build(&[]).await;
        let out = render_dashboard(
            Some(&Address::new("0xabc")),
            &catalog,
            &gateway(),
            DateFormat::Date,
        );

        assert!(out.contains("Your Address: 0xabc"));
        assert!(out.contains("Number of Files Stored: 0 files"));
        assert!(out.contains("Total Size: 0.00 B"));
        assert!(out.ends_with(NO_FILES));
    }

    #[tokio::test]
    async fn test_table_rows() {
        let storage = MemoryStorage::new();
        let root = storage.insert_root("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi", vec![("report.pdf", 2048)]);
        storage.pin(&root);
        let catalog = CatalogBuilder::new(storage).build(&[root]).await;

        let out = render_dashboard(None, &catalog, &gateway(), DateFormat::Date);
        let lines: Vec<_> = out.lines().collect();

        assert!(!out.contains("Your Address"));
        assert!(lines.iter().any(|l| l.starts_with("Date")));
        let row = lines.iter().find(|l| l.contains("report.pdf")).unwrap();
        assert!(row.starts_with('-'));
        assert!(row.contains("bafybe...rt.pdf"));
        assert!(row.contains("Pinned"));
        assert!(row.contains("2.00 KB"));
        assert!(row.contains("https://ipfs.io/ipfs/bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi-report.pdf"));
    }

    #[tokio::test]
    async fn test_failures_are_listed() {
        let storage = MemoryStorage::new();
        let root = storage.insert_root("bafybroken", vec![("a", 1)]);
        storage.fail_lookups_for(&root);
        let catalog = CatalogBuilder::new(storage).build(&[root]).await;

        let out = render_dashboard(None, &catalog, &gateway(), DateFormat::Date);
        assert!(out.contains("Could not load 1 upload(s):"));
        assert!(out.contains("  - bafybroken: "));
        assert!(out.ends_with(NO_FILES));
    }
}
