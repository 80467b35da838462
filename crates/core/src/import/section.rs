use crate::errors::CoreError;

/// A data line of the holdings section, with its position among the
/// non-blank lines of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// The holdings section of a decoded statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub header: &'a str,
    pub rows: Vec<SectionLine<'a>>,
}

/// Non-blank lines of `text`, split on `\r\n` or `\n`.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Locate the holdings section.
///
/// The first line containing `marker` opens the section, the next line is
/// the header, and data runs until a line starting with `footer_prefix` or
/// the end of the document.
pub fn extract<'a>(text: &'a str, marker: &str, footer_prefix: &str) -> Result<Section<'a>, CoreError> {
    let lines = content_lines(text);

    let start = lines
        .iter()
        .position(|line| line.contains(marker))
        .ok_or_else(|| CoreError::SectionNotFound {
            marker: marker.to_string(),
        })?;

    let header = *lines.get(start + 1).ok_or(CoreError::HeaderNotFound)?;

    let rows = lines
        .iter()
        .enumerate()
        .skip(start + 2)
        .take_while(|(_, line)| footer_prefix.is_empty() || !line.starts_with(footer_prefix))
        .map(|(index, text)| SectionLine { index, text: *text })
        .collect();

    Ok(Section { header, rows })
}
