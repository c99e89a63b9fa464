use super::{DirectoryPageSource, FetchError, HttpPageSource, PageSource};

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

#[tokio::test]
async fn test_directory_source_reads_numbered_pages() -> Result<()> {
    let directory = TempDir::new()?;
    fs::write(directory.path().join("1.json"), r#"{
        "totalCount": 2,
        "page": 1,
        "transactions": [
            {"Date": "2013-12-22", "Ledger": "Phone & Internet Expense", "Amount": "-110.71", "Company": "SHAW CABLESYSTEMS CALGARY AB"},
            {"Date": "2013-12-21", "Ledger": "Travel Expense, Nonlocal", "Amount": -8.1, "Company": "BLACK TOP CABS VANCOUVER BC"}
        ]
    }"#)?;

    let source = DirectoryPageSource::new(directory.path());
    let page = source.fetch_page(1).await?;

    assert_eq!(page.total_count, Some(2));
    assert_eq!(page.transactions.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_directory_source_reports_missing_page() -> Result<()> {
    let directory = TempDir::new()?;
    let source = DirectoryPageSource::new(directory.path());

    assert!(matches!(source.fetch_page(7).await, Err(FetchError::NotFound { page: 7 })));

    Ok(())
}

#[tokio::test]
async fn test_directory_source_reports_undecodable_page() -> Result<()> {
    let directory = TempDir::new()?;
    fs::write(directory.path().join("1.json"), "<html>Service Unavailable</html>")?;

    let source = DirectoryPageSource::new(directory.path());

    assert!(matches!(source.fetch_page(1).await, Err(FetchError::Decode { page: 1, .. })));

    Ok(())
}

#[tokio::test]
async fn test_later_pages_may_omit_total_count() -> Result<()> {
    let directory = TempDir::new()?;
    fs::write(directory.path().join("2.json"), r#"{"page": 2, "transactions": []}"#)?;

    let page = DirectoryPageSource::new(directory.path()).fetch_page(2).await?;

    assert_eq!(page.total_count, None);
    assert!(page.transactions.is_empty());

    Ok(())
}

#[test]
fn test_http_source_builds_page_urls() {
    let source = HttpPageSource::new("http://resttest.bench.co/transactions/");

    assert_eq!(source.page_url(3), "http://resttest.bench.co/transactions/3.json");
}
