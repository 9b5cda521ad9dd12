use std::io::{self, BufRead, Write};

use log::info;
use unicode_width::UnicodeWidthStr;

use crate::command::{Command, MENU, parse_id};
use crate::config::Config;
use crate::error::AddError;
use crate::storage::TaskFile;
use crate::store::TaskStore;
use crate::task::Task;

const STATUS_WIDTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Exited,
}

/// One interactive session: the store, its backing file, and the
/// terminal (or whatever stands in for it).
pub struct App<R, W> {
    store: TaskStore,
    file: TaskFile,
    input: R,
    out: W,
    state: State,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Load the task file and greet. A file that can't be read is reported
    /// and the session starts empty.
    pub fn new(config: &Config, input: R, mut out: W) -> io::Result<Self> {
        let file = TaskFile::new(config.tasks_file());
        let tasks = match file.load() {
            Ok(loaded) => {
                if loaded.existed {
                    writeln!(
                        out,
                        "📂 Loaded {} tasks from {}",
                        loaded.tasks.len(),
                        file.path().display()
                    )?;
                }
                loaded.tasks
            }
            Err(e) => {
                writeln!(out, "❌ Error loading: {e}")?;
                Vec::new()
            }
        };

        let store = TaskStore::new(tasks);
        info!("session started, next id {}", store.next_id());
        Ok(Self {
            store,
            file,
            input,
            out,
            state: State::Running,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Loop until the user saves and exits, or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state() == State::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Show the menu, read one choice and act on it.
    pub fn step(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- TO-DO MENU ---")?;
        for (key, label) in MENU {
            writeln!(self.out, "{key}) {label}")?;
        }

        let command = match self.prompt("Choose: ")? {
            Some(line) => Command::parse(&line),
            None => {
                // stdin closed; don't spin, and don't drop the session's edits
                writeln!(self.out)?;
                info!("end of input, saving and exiting");
                Command::SaveAndExit
            }
        };
        self.execute(command)
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Add => self.add(),
            Command::List => self.list(),
            Command::Toggle => self.toggle(),
            Command::Delete => self.delete(),
            Command::SaveAndExit => self.save_and_exit(),
            Command::Invalid(_) => writeln!(self.out, "❌ Invalid choice."),
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let text = self.prompt("Task description: ")?.unwrap_or_default();
        match self.store.add(&text) {
            Ok(task) => writeln!(self.out, "✅ Added task #{}", task.id),
            Err(AddError::EmptyText) => writeln!(self.out, "⚠️ Empty task ignored."),
            Err(e @ AddError::IdsExhausted) => writeln!(self.out, "❌ Cannot add task: {e}."),
        }
    }

    fn list(&mut self) -> io::Result<()> {
        if self.store.is_empty() {
            return writeln!(self.out, "(No tasks yet)");
        }

        writeln!(self.out)?;
        writeln!(self.out, "ID  Status  Created At          Task")?;
        writeln!(self.out, "{}", "-".repeat(47))?;
        for task in self.store.tasks() {
            writeln!(self.out, "{}", format_row(task))?;
        }
        Ok(())
    }

    fn toggle(&mut self) -> io::Result<()> {
        let id = self.prompt_id("Enter task ID to toggle: ")?;
        match id.and_then(|id| self.store.toggle(id)) {
            Some(task) if task.done => writeln!(self.out, "✅ Marked done: #{}", task.id),
            Some(task) => writeln!(self.out, "↩️ Marked undone: #{}", task.id),
            None => writeln!(self.out, "⚠️ Task not found."),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let id = self.prompt_id("Enter task ID to delete: ")?;
        let Some(id) = id.and_then(|id| self.store.find_by_id(id)).map(|t| t.id) else {
            return writeln!(self.out, "⚠️ Task not found.");
        };
        self.store.delete(id);
        writeln!(self.out, "🗑️ Deleted task #{id}")
    }

    fn save_and_exit(&mut self) -> io::Result<()> {
        match self.file.save(self.store.tasks()) {
            Ok(()) => writeln!(self.out, "💾 Saved to {}", self.file.path().display())?,
            Err(e) => writeln!(self.out, "❌ Error saving: {e}")?,
        }
        writeln!(self.out, "👋 Bye!")?;
        self.state = State::Exited;
        Ok(())
    }

    fn prompt_id(&mut self, prompt: &str) -> io::Result<Option<u32>> {
        Ok(self.prompt(prompt)?.as_deref().and_then(parse_id))
    }

    /// Print `prompt` without a newline and read the reply, trimmed.
    /// `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn format_row(task: &Task) -> String {
    format!(
        "{:<3} {} {:<19} {}",
        task.id,
        pad_to_width(task.status_glyph(), STATUS_WIDTH),
        task.created_at_display(),
        task.text
    )
}

/// Left-align by terminal columns rather than chars; emoji take two.
fn pad_to_width(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(s));
    format!("{s}{}", " ".repeat(fill))
}
