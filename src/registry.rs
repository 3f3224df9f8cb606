//! IANA language-subtag registry parsing.
//!
//! The registry is plain text: a file-date header, then records separated by
//! `%%` lines. Each record is a run of `Key: value` fields; long values wrap
//! onto continuation lines indented with whitespace.

use itertools::Itertools;

use crate::error::{ImportError, Result};

const DELIMITER: &str = "%%";

/// Lines of file-level header before the first record.
const HEADER_LINES: usize = 2;

/// One record from the registry, as ordered `Key: value` fields.
///
/// The registry repeats keys (a subtag may carry several `Description`
/// fields); lookups return the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlock {
    fields: Vec<(String, String)>,
}

impl RecordBlock {
    fn from_lines(lines: &[&str]) -> Result<Self> {
        let mut fields: Vec<(String, String)> = Vec::new();

        for line in lines {
            if line.starts_with(' ') || line.starts_with('\t') {
                // Continuation of the previous field's value.
                match fields.last_mut() {
                    Some((_, value)) => {
                        value.push(' ');
                        value.push_str(line.trim());
                    }
                    None => {
                        return Err(ImportError::Registry(format!(
                            "continuation line outside any field: {:?}",
                            line
                        )))
                    }
                }
                continue;
            }

            let (key, value) = line.split_once(": ").ok_or_else(|| {
                ImportError::Registry(format!("line is not a `Key: value` pair: {:?}", line))
            })?;
            fields.push((key.to_string(), value.trim_end().to_string()));
        }

        Ok(Self { fields })
    }

    /// First value recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A (tag, description) pair ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    pub tag: String,
    pub description: String,
}

impl LanguageEntry {
    /// Extract the tag and description from a parsed record.
    ///
    /// Most records name their tag in a `Subtag` field; grandfathered and
    /// redundant records use `Tag` instead. Descriptions are lowercased
    /// before storage.
    pub fn from_block(block: &RecordBlock) -> Result<Self> {
        let tag = block
            .get("Subtag")
            .or_else(|| block.get("Tag"))
            .ok_or_else(|| {
                ImportError::Registry(format!("record has no Subtag or Tag field: {:?}", block))
            })?;

        let description = block.get("Description").ok_or_else(|| {
            ImportError::Registry(format!("record has no Description field: {:?}", block))
        })?;

        Ok(Self {
            tag: tag.to_string(),
            description: description.to_lowercase(),
        })
    }
}

/// Parse a whole registry file into record blocks.
///
/// The two header lines (file date and its trailing delimiter) are skipped;
/// the rest of the file is partitioned on `%%` lines.
pub fn parse_registry(input: &str) -> Result<Vec<RecordBlock>> {
    let lines = input.lines().skip(HEADER_LINES);
    let grouped = lines.group_by(|line| line.trim_end() == DELIMITER);

    let mut blocks = Vec::new();
    for (is_delimiter, group) in &grouped {
        if is_delimiter {
            continue;
        }
        let block_lines: Vec<&str> = group.filter(|line| !line.trim().is_empty()).collect();
        if block_lines.is_empty() {
            continue;
        }
        blocks.push(RecordBlock::from_lines(&block_lines)?);
    }

    Ok(blocks)
}

/// Parse the registry and extract one [`LanguageEntry`] per record.
pub fn parse_language_entries(input: &str) -> Result<Vec<LanguageEntry>> {
    parse_registry(input)?
        .iter()
        .map(LanguageEntry::from_block)
        .collect()
}
