/// Menu entries, in the order they are shown.
pub const MENU: &[(&str, &str)] = &[
    ("1", "Add task"),
    ("2", "List tasks"),
    ("3", "Toggle done/undone"),
    ("4", "Delete task"),
    ("5", "Save & Exit"),
];

/// A menu choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    Toggle,
    Delete,
    SaveAndExit,
    Invalid(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Command::Add,
            "2" => Command::List,
            "3" => Command::Toggle,
            "4" => Command::Delete,
            "5" => Command::SaveAndExit,
            other => Command::Invalid(other.into()),
        }
    }
}

/// Read a task id typed at a prompt. Anything that isn't a valid id
/// yields `None`, which no task can match.
pub fn parse_id(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}
