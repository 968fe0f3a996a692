// Studio shell input parsing

use std::path::PathBuf;

use picpro_images::expand_home;

/// One line typed into the studio shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    /// Pick a file, like the upload area's file picker
    Open(PathBuf),
    /// Raw drag-and-drop text pasted by the terminal
    Drop(String),
    Generate,
    Reset,
    /// Save the result, optionally into another directory
    Download(Option<PathBuf>),
    Status,
    Preview,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellInput {
    /// Parse a line. A line that is only a path (what most terminals paste
    /// when a file is dragged onto them) counts as a drop.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ShellInput::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "open" | "pick" if !rest.is_empty() => ShellInput::Open(expand_home(unquote(rest))),
            "drop" if !rest.is_empty() => ShellInput::Drop(rest.to_string()),
            "generate" | "gen" | "g" => ShellInput::Generate,
            "reset" | "again" => ShellInput::Reset,
            "download" | "save" => {
                if rest.is_empty() {
                    ShellInput::Download(None)
                } else {
                    ShellInput::Download(Some(expand_home(unquote(rest))))
                }
            }
            "status" => ShellInput::Status,
            "preview" | "show" => ShellInput::Preview,
            "help" | "?" => ShellInput::Help,
            "quit" | "exit" | "q" => ShellInput::Quit,
            _ if looks_like_drop(line) => ShellInput::Drop(line.to_string()),
            _ => ShellInput::Unknown(word.to_string()),
        }
    }
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

fn looks_like_drop(line: &str) -> bool {
    let line = line.trim_start_matches(['"', '\'']);
    line.starts_with('/')
        || line.starts_with("file://")
        || line.starts_with("~/")
        || line.starts_with("./")
        || line.as_bytes().get(1) == Some(&b':')
}

/// Help text for the shell
pub fn help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("open <path>", "choose a photo"),
        ("drop <text>", "drop files (or paste a dragged path directly)"),
        ("generate", "create the professional headshot"),
        ("reset", "start over with another photo"),
        ("download [dir]", "save the result"),
        ("status", "show the current step"),
        ("preview", "describe the original and the result"),
        ("help", "show this list"),
        ("quit", "leave the studio"),
    ]
}
