//! File-level options from an `@fbt {...}` docblock.

use serde::Deserialize;

use crate::compiler::CompileError;

const DOCBLOCK_TAG: &str = "@fbt";

/// Defaults applied to every phrase of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOptions {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Parse the `@fbt` docblock of a source file.
///
/// Returns `None` when the file has no such docblock. The JSON object after
/// the tag may span several comment lines; leading `*` markers are ignored.
pub fn parse_docblock(source: &str) -> Result<Option<FileOptions>, CompileError> {
    let Some(start) = source.find(DOCBLOCK_TAG) else {
        return Ok(None);
    };
    let rest = &source[start + DOCBLOCK_TAG.len()..];
    let json: String = rest
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            trimmed.strip_prefix('*').unwrap_or(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let json = json.trim_start();
    if !json.starts_with('{') {
        return Ok(None);
    }
    let mut values = serde_json::Deserializer::from_str(json).into_iter::<FileOptions>();
    match values.next() {
        Some(Ok(options)) => Ok(Some(options)),
        Some(Err(source)) => Err(CompileError::Docblock { source }),
        None => Ok(None),
    }
}
