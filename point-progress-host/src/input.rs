//! Command input: one command per stdin line, words or raw key sequences.

use std::io::BufRead;

/// A navigation command read from the host's input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Next,
    Previous,
    /// Jump straight to a stage.
    Stage(u32),
    /// Click at frame coordinates.
    Click { x: f32, y: f32 },
    /// Print the widget state as JSON.
    Save,
    Quit,
    Unknown,
}

impl Command {
    /// Parses one line. Arrow-key escape sequences are accepted as well as words.
    pub fn parse(line: &str) -> Command {
        let bytes = line.trim_end_matches(['\r', '\n']).as_bytes();

        if bytes.len() >= 3 && bytes[0] == 0x1b && bytes[1] == b'[' {
            return match bytes[2] {
                b'C' => Command::Next,
                b'D' => Command::Previous,
                _ => Command::Unknown,
            };
        }
        if bytes == [0x1b] {
            return Command::Quit;
        }

        let word = line.trim().to_ascii_lowercase();
        if let Some(rest) = word.strip_prefix("click ") {
            return parse_click(rest).unwrap_or(Command::Unknown);
        }
        match word.as_str() {
            "n" | "next" | ">" => Command::Next,
            "p" | "prev" | "previous" | "<" => Command::Previous,
            "s" | "save" => Command::Save,
            "q" | "quit" | "exit" => Command::Quit,
            _ => word.parse().map(Command::Stage).unwrap_or(Command::Unknown),
        }
    }
}

fn parse_click(args: &str) -> Option<Command> {
    let mut coords = args.split_whitespace().map(str::parse::<f32>);
    let x = coords.next()?.ok()?;
    let y = coords.next()?.ok()?;
    if coords.next().is_some() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Command::Click { x, y })
}

pub struct CommandReader<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Blocks for the next non-empty line. `None` at end of input.
    pub fn next_command(&mut self) -> std::io::Result<Option<Command>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if !self.line.trim().is_empty() {
                return Ok(Some(Command::parse(&self.line)));
            }
        }
    }
}
