use crate::error::AlbaranError;
use crate::extraction::{PageContent, PdfExtractor, WordToken};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Runs `pdftotext -layout` for the page text that header patterns read and
/// `pdftotext -bbox` for word boxes.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, AlbaranError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| AlbaranError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| AlbaranError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext("-layout", &tmp_path)?;
        let xml = run_pdftotext("-bbox", &tmp_path)?;

        // pdftotext uses form feed \x0c as page separator
        let page_texts: Vec<&str> = text.split('\x0c').collect();
        let bbox_pages = parse_bbox_pages(&xml)?;

        let pages = bbox_pages
            .into_iter()
            .enumerate()
            .map(|(i, page)| PageContent {
                page_number: i + 1,
                width: page.width,
                height: page.height,
                text: page_texts.get(i).copied().unwrap_or_default().to_string(),
                words: page.words,
            })
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(mode: &str, pdf_path: &Path) -> Result<String, AlbaranError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AlbaranError::PdftotextNotFound
            } else {
                AlbaranError::Extraction(format!("pdftotext {} failed: {}", mode, e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(AlbaranError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Clone, Default)]
struct BboxPage {
    width: f64,
    height: f64,
    words: Vec<WordToken>,
}

/// Parse the XHTML emitted by `pdftotext -bbox` into pages of word tokens.
fn parse_bbox_pages(xml: &str) -> Result<Vec<BboxPage>, AlbaranError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages = Vec::new();
    let mut current: Option<BboxPage> = None;
    let mut pending: Option<WordToken> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => {
                    if let Some(page) = current.take() {
                        pages.push(page);
                    }
                    current = Some(page_from_tag(&e)?);
                }
                b"word" => pending = Some(word_from_tag(&e)?),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"page" {
                    if let Some(page) = current.take() {
                        pages.push(page);
                    }
                    pages.push(page_from_tag(&e)?);
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(word) = pending.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| AlbaranError::BboxXml(e.to_string()))?;
                    word.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"word" => {
                    if let (Some(mut word), Some(page)) = (pending.take(), current.as_mut()) {
                        word.text = word.text.trim().to_string();
                        if !word.text.is_empty() {
                            page.words.push(word);
                        }
                    }
                }
                b"page" => {
                    if let Some(page) = current.take() {
                        pages.push(page);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(AlbaranError::BboxXml(e.to_string())),
            _ => {}
        }
    }

    if let Some(page) = current.take() {
        pages.push(page);
    }

    Ok(pages)
}

fn page_from_tag(tag: &BytesStart) -> Result<BboxPage, AlbaranError> {
    Ok(BboxPage {
        width: attr_f64(tag, b"width")?,
        height: attr_f64(tag, b"height")?,
        words: Vec::new(),
    })
}

fn word_from_tag(tag: &BytesStart) -> Result<WordToken, AlbaranError> {
    Ok(WordToken {
        x0: attr_f64(tag, b"xMin")?,
        y0: attr_f64(tag, b"yMin")?,
        x1: attr_f64(tag, b"xMax")?,
        y1: attr_f64(tag, b"yMax")?,
        text: String::new(),
    })
}

fn attr_f64(tag: &BytesStart, name: &[u8]) -> Result<f64, AlbaranError> {
    let attr = tag
        .try_get_attribute(name)
        .map_err(|e| AlbaranError::BboxXml(e.to_string()))?
        .ok_or_else(|| {
            AlbaranError::BboxXml(format!(
                "<{}> is missing attribute '{}'",
                String::from_utf8_lossy(tag.name().as_ref()),
                String::from_utf8_lossy(name)
            ))
        })?;
    let raw = String::from_utf8_lossy(&attr.value);
    raw.trim().parse().map_err(|_| {
        AlbaranError::BboxXml(format!(
            "attribute '{}' is not a number: {}",
            String::from_utf8_lossy(name),
            raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="RF625A"/>
</head>
<body>
<doc>
  <page width="595.276000" height="841.890000">
    <word xMin="20.000000" yMin="100.100000" xMax="52.000000" yMax="108.000000">297243</word>
    <word xMin="56.000000" yMin="100.100000" xMax="80.000000" yMax="108.000000">POLLO</word>
    <word xMin="84.000000" yMin="100.200000" xMax="99.000000" yMax="108.000000">P&amp;G</word>
  </page>
  <page width="595.276000" height="841.890000">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_pages() {
        let pages = parse_bbox_pages(SAMPLE).unwrap();
        assert_eq!(pages.len(), 2);
        assert!((pages[0].width - 595.276).abs() < 0.001);
        assert_eq!(pages[0].words.len(), 3);
        assert_eq!(pages[0].words[0].text, "297243");
        assert_eq!(pages[0].words[0].x0, 20.0);
        assert_eq!(pages[0].words[2].text, "P&G");
        assert!(pages[1].words.is_empty());
    }

    #[test]
    fn test_missing_coordinate_is_an_error() {
        let xml = r#"<doc><page width="100" height="100"><word xMin="1" yMin="2" xMax="3">X</word></page></doc>"#;
        assert!(matches!(
            parse_bbox_pages(xml),
            Err(AlbaranError::BboxXml(_))
        ));
    }
}
