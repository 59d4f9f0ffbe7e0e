//! Durable per-camera privacy flag, kept in a small sectioned INI file:
//!
//! ```ini
//! [General]
//! version = 1
//!
//! [front-door]
//! is_private = true
//! ```
//!
//! Reads never fail: a missing or corrupt file is an empty record, and an
//! empty record means "not private". Lines the parser does not understand
//! are carried through a rewrite untouched, as are comments and indented
//! continuation lines.

use crate::camera::camera_entity::PrivacyState;
use crate::common::file_utils;
use crate::errors::AppError;
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const GENERAL_SECTION: &str = "General";
pub const VERSION_KEY: &str = "version";
pub const FORMAT_VERSION: u32 = 1;
const PRIVACY_KEY: &str = "is_private";
const CONTINUATION_INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum IniLine {
    Entry { key: String, value: String },
    Verbatim(String), // comment or unparseable text, written back as read
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IniSection {
    name: String,
    lines: Vec<IniLine>,
}

/// Ordered sections and keys, so a rewrite keeps whatever it did not touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    preamble: Vec<String>, // verbatim lines ahead of the first header
    sections: Vec<IniSection>,
    unparsed_lines: usize,
}

impl IniDocument {
    pub fn parse(text: &str) -> Self {
        let mut document = IniDocument::default();
        let mut current: Option<usize> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') || line.starts_with(';') {
                document.push_verbatim(current, raw_line);
                continue;
            }
            if raw_line.starts_with(|c: char| c == ' ' || c == '\t') && document.extend_last_value(current, line) {
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                match header.strip_suffix(']').map(str::trim) {
                    Some(name) if !name.is_empty() => {
                        current = Some(document.section_index_or_insert(name));
                    }
                    _ => document.push_unparsed(current, raw_line),
                }
                continue;
            }
            let parsed = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .map(|(key, value)| (key.trim(), value.trim()))
                .filter(|(key, _)| !key.is_empty());
            match (parsed, current) {
                (Some((key, value)), Some(section)) => document.sections[section].set(key, value),
                _ => document.push_unparsed(current, raw_line),
            }
        }
        document
    }

    /// Number of lines kept verbatim because they were not comments, headers or entries.
    pub fn unparsed_lines(&self) -> usize {
        self.unparsed_lines
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .lines
            .iter()
            .find_map(|line| match line {
                IniLine::Entry { key: k, value } if k.eq_ignore_ascii_case(key) => Some(value.as_str()),
                _ => None,
            })
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let idx = self.section_index_or_insert(section);
        self.sections[idx].set(key, value);
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s.name == section)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for (idx, section) in self.sections.iter().enumerate() {
            if idx > 0 || !self.preamble.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section.name));
            for line in &section.lines {
                match line {
                    IniLine::Entry { key, value } => {
                        let value = value.replace('\n', &format!("\n{}", CONTINUATION_INDENT));
                        out.push_str(&format!("{} = {}\n", key, value));
                    }
                    IniLine::Verbatim(text) => {
                        out.push_str(text);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    fn push_verbatim(&mut self, current: Option<usize>, raw_line: &str) {
        match current {
            Some(idx) => self.sections[idx].lines.push(IniLine::Verbatim(raw_line.to_string())),
            None => self.preamble.push(raw_line.to_string()),
        }
    }

    fn push_unparsed(&mut self, current: Option<usize>, raw_line: &str) {
        self.unparsed_lines += 1;
        self.push_verbatim(current, raw_line);
    }

    // Indented text continues the value of the entry right above it.
    fn extend_last_value(&mut self, current: Option<usize>, text: &str) -> bool {
        let Some(idx) = current else {
            return false;
        };
        match self.sections[idx].lines.last_mut() {
            Some(IniLine::Entry { value, .. }) => {
                value.push('\n');
                value.push_str(text);
                true
            }
            _ => false,
        }
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return idx;
        }
        self.sections.push(IniSection {
            name: name.to_string(),
            lines: Vec::new(),
        });
        self.sections.len() - 1
    }
}

impl IniSection {
    fn set(&mut self, key: &str, value: &str) {
        let existing = self.lines.iter_mut().find_map(|line| match line {
            IniLine::Entry { key: k, value } if k.eq_ignore_ascii_case(key) => Some(value),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = value.to_string(),
            None => self.lines.push(IniLine::Entry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn section_for(camera_name: &str) -> String {
    camera_name.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // A missing file is an empty record. Anything else that stops us from
    // reading the text is an error, so `save` never clobbers what it could not see.
    fn read_document(&self) -> Result<IniDocument, AppError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("State file '{}' does not exist yet.", self.path.display());
                return Ok(IniDocument::default());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(AppError::StateFormat(format!("'{}' is not UTF-8 text: {}", self.path.display(), e)));
            }
            Err(e) => return Err(e.into()),
        };
        let document = IniDocument::parse(&text);
        if document.unparsed_lines() > 0 {
            warn!(
                "State file '{}' has {} unrecognised line(s); keeping them as they are.",
                self.path.display(),
                document.unparsed_lines()
            );
        }
        Ok(document)
    }

    pub fn load(&self, camera_name: &str) -> PrivacyState {
        let document = self.read_document().unwrap_or_else(|e| {
            warn!("Could not read state file '{}': {}. Treating it as empty.", self.path.display(), e);
            IniDocument::default()
        });
        let is_private = match document.get(&section_for(camera_name), PRIVACY_KEY) {
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                warn!("Ignoring non-boolean privacy value '{}' for camera '{}'.", raw, camera_name);
                false
            }),
            None => false,
        };
        PrivacyState { is_private }
    }

    pub fn save(&self, camera_name: &str, is_private: bool) -> Result<(), AppError> {
        let mut document = self.read_document()?;
        if !document.has_section(GENERAL_SECTION) || document.get(GENERAL_SECTION, VERSION_KEY).is_none() {
            document.set(GENERAL_SECTION, VERSION_KEY, &FORMAT_VERSION.to_string());
        }
        document.set(&section_for(camera_name), PRIVACY_KEY, if is_private { "true" } else { "false" });
        file_utils::write_atomically(&self.path, &document.render())?;
        info!("💾 Stored privacy={} for camera '{}' in {}", is_private, camera_name, self.path.display());
        Ok(())
    }
}
