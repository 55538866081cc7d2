use anyhow::Result;
use chrono::Local;
use colored::*;
use std::{fs::{self, File}, io::Write, path::PathBuf};

/// Devlog writer for search progress. Each event lands in a numbered file
/// under `dir` and is echoed to the console; `disabled()` swallows everything.
pub struct DevLogger {
    dir: Option<PathBuf>,
    color: bool,
    max_logs: usize,
    counter: usize,
}

impl DevLogger {
    pub fn new(dir: impl Into<PathBuf>, color: bool, max_logs: usize) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir: Some(dir), color, max_logs, counter: 0 })
    }

    /// Quiet logger for library callers and tests.
    pub fn disabled() -> Self {
        Self { dir: None, color: false, max_logs: 0, counter: 0 }
    }

    pub fn log(&mut self, title: &str, details: &str) -> Result<()> {
        let Some(dir) = &self.dir else { return Ok(()) };
        if self.max_logs != 0 && self.counter >= self.max_logs { return Ok(()); }
        self.counter += 1;
        let mut path = dir.clone();
        path.push(format!("devlog({}).txt", self.counter));

        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut f = File::create(&path)?;
        writeln!(f, "[{}] {}\n\n{}", ts, title, details)?;

        if self.color {
            println!("{} {}\n{}", "➤".blue().bold(), title.bold(), details);
        } else {
            println!("➤ {}\n{}", title, details);
        }
        Ok(())
    }
}
