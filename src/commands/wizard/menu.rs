//! Interactive prompts
//!
//! Thin wrappers over dialoguer. Every prompt that can be dismissed returns
//! `Ok(None)` on Esc so callers treat cancellation as a normal early return.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{Confirm, Editor, Input, Select};

use crate::ui::theme::MastermindTheme;

use super::state::{MenuItem, Screen};

pub struct Prompter {
    theme: MastermindTheme,
}

impl Prompter {
    pub fn new(theme: MastermindTheme) -> Self {
        Self { theme }
    }

    /// Show the menu for `screen`; `None` when dismissed
    pub fn menu(&self, screen: &Screen, items: &[MenuItem]) -> Result<Option<usize>> {
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        self.select(&screen.title(), &labels, 0)
    }

    pub fn select<T: std::fmt::Display>(
        &self,
        prompt: &str,
        items: &[T],
        default: usize,
    ) -> Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?)
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?
            .unwrap_or(false))
    }

    /// Free text; an empty answer is `None`
    pub fn text(&self, prompt: &str) -> Result<Option<String>> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        let value = value.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }

    /// Free text that falls back to `default` when left empty
    pub fn text_with_default(&self, prompt: &str, default: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    /// Text checked by `validate` before it is accepted
    pub fn validated_text<F>(&self, prompt: &str, validate: F) -> Result<String>
    where
        F: Fn(&str) -> std::result::Result<(), String>,
    {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| validate(input))
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    /// Open `content` in `$EDITOR`; `None` when the editor was closed unsaved
    pub fn edit(&self, content: &str, extension: &str) -> Result<Option<String>> {
        Ok(Editor::new().extension(extension).edit(content)?)
    }

    /// Walk directories starting at `start` until a `.sql` file is picked
    pub fn pick_sql_file(&self, start: &Path) -> Result<Option<PathBuf>> {
        let mut dir = start.to_path_buf();
        loop {
            let entries = browse(&dir)?;
            let labels: Vec<String> = entries.iter().map(BrowseEntry::label).collect();
            let prompt = format!("Select a .sql file ({})", dir.display());
            let Some(index) = self.select(&prompt, &labels, 0)? else {
                return Ok(None);
            };
            match &entries[index] {
                BrowseEntry::Parent(path) | BrowseEntry::Directory(path) => dir = path.clone(),
                BrowseEntry::SqlFile(path) => return Ok(Some(path.clone())),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseEntry {
    Parent(PathBuf),
    Directory(PathBuf),
    SqlFile(PathBuf),
}

impl BrowseEntry {
    pub fn label(&self) -> String {
        match self {
            BrowseEntry::Parent(_) => "..".to_string(),
            BrowseEntry::Directory(path) => format!("{}/", file_name(path)),
            BrowseEntry::SqlFile(path) => file_name(path),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Entries shown when browsing `dir`: parent, sub-directories, then `.sql`
/// files, each group sorted by name. Hidden entries are skipped.
pub fn browse(dir: &Path) -> io::Result<Vec<BrowseEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_dir() {
            dirs.push(path);
        } else if path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();

    let parent = dir
        .parent()
        .map(|p| BrowseEntry::Parent(p.to_path_buf()));
    Ok(parent
        .into_iter()
        .chain(dirs.into_iter().map(BrowseEntry::Directory))
        .chain(files.into_iter().map(BrowseEntry::SqlFile))
        .collect())
}
