use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;

/// A source document normalized to a single text string.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub file_name: String,
    pub content: String,
}

/// Reads every supported file in `dir` (non-recursive) into one normalized
/// text document per file. Files that fail to parse are logged and skipped
/// so a single bad document cannot prevent the index from being built.
pub async fn load_documents(dir: &Path) -> Result<Vec<RawDocument>> {
    if !dir.exists() {
        anyhow::bail!("Documents directory does not exist: {}", dir.display());
    }

    let mut documents = Vec::new();
    let mut dir_entries = tokio::fs::read_dir(dir)
        .await
        .context("Failed to read documents directory")?;

    while let Some(entry) = dir_entries
        .next_entry()
        .await
        .context("Failed to read directory entry")?
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = match path.file_name().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping file with non-UTF-8 name: {:?}", path);
                continue;
            }
        };

        match parse_file(&path) {
            Ok(Some(content)) => {
                info!("Loaded document: {}", file_name);
                documents.push(RawDocument { file_name, content });
            }
            Ok(None) => {
                debug!("Skipping unsupported file: {}", file_name);
            }
            Err(e) => {
                warn!("Failed to parse {}: {:#}", file_name, e);
            }
        }
    }

    Ok(documents)
}

/// Parses a single file by extension. Returns `Ok(None)` for unsupported
/// extensions.
fn parse_file(path: &Path) -> Result<Option<String>> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let content = match extension.as_deref() {
        Some("txt") | Some("md") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?,
        Some("json") => parse_json(path)?,
        Some("csv") => parse_csv(path)?,
        Some("pdf") => parse_pdf(path)?,
        Some("docx") => parse_docx(path)?,
        _ => return Ok(None),
    };

    Ok(Some(content))
}

/// Collects every string value in the JSON document, depth-first, and joins
/// them into one text block.
fn parse_json(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let mut fragments = Vec::new();
    collect_strings(&value, &mut fragments);

    if fragments.is_empty() {
        anyhow::bail!("JSON file contains no string values: {}", path.display());
    }
    Ok(fragments.join("\n"))
}

fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => out.push(s.clone()),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}

/// Renders each CSV record as `header: value` lines, one paragraph per row.
fn parse_csv(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    let headers = reader
        .headers()
        .with_context(|| format!("Invalid CSV headers in {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Invalid CSV record in {}", path.display()))?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| format!("{}: {}", header, field))
            .collect::<Vec<_>>()
            .join("\n");
        rows.push(row);
    }

    if rows.is_empty() {
        anyhow::bail!("CSV file contains no records: {}", path.display());
    }
    Ok(rows.join("\n\n"))
}

fn parse_pdf(path: &Path) -> Result<String> {
    let text = pdf_extract::extract_text(path)
        .with_context(|| format!("Failed to extract PDF text from {}", path.display()))?;
    Ok(text)
}

/// Extracts paragraph run text from a .docx document.
fn parse_docx(path: &Path) -> Result<String> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read docx file: {}", path.display()))?;
    let docx = docx_rs::read_docx(&raw)
        .map_err(|e| anyhow::anyhow!("Failed to parse docx {}: {:?}", path.display(), e))?;

    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for paragraph_child in paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn should_fail_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = load_documents(&missing).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn should_load_text_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("guide.txt"),
            "Medical colleges in Karachi require MDCAT scores.",
        )
        .unwrap();

        let docs = load_documents(dir.path()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "guide.txt");
        assert!(docs[0].content.contains("MDCAT"));
    }

    #[tokio::test]
    async fn should_flatten_json_string_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("programs.json"),
            r#"{"field": "Computer Science", "universities": ["NUST", "FAST"], "seats": 120}"#,
        )
        .unwrap();

        let docs = load_documents(dir.path()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.contains("Computer Science"));
        assert!(docs[0].content.contains("NUST"));
        assert!(docs[0].content.contains("FAST"));
        // Numbers are not text fragments
        assert!(!docs[0].content.contains("120"));
    }

    #[tokio::test]
    async fn should_render_csv_rows_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("unis.csv"),
            "name,city\nNED University,Karachi\nLUMS,Lahore\n",
        )
        .unwrap();

        let docs = load_documents(dir.path()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.contains("name: NED University"));
        assert!(docs[0].content.contains("city: Lahore"));
    }

    #[tokio::test]
    async fn should_skip_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("photo.png"), [0u8, 1, 2]).unwrap();
        fs::write(dir.path().join("notes.txt"), "advice").unwrap();

        let docs = load_documents(dir.path()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "notes.txt");
    }

    #[tokio::test]
    async fn should_skip_unparseable_files_and_continue() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{not valid json").unwrap();
        fs::write(dir.path().join("ok.txt"), "still loaded").unwrap();

        let docs = load_documents(dir.path()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "ok.txt");
    }

    #[tokio::test]
    async fn should_load_multiple_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();
        fs::write(dir.path().join("b.md"), "second").unwrap();

        let mut docs = load_documents(dir.path()).await.unwrap();
        docs.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "first");
        assert_eq!(docs[1].content, "second");
    }
}
