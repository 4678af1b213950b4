use crate::core::grading::normalize;

pub const MENU_PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Exit,
    Log,
    HardestCard,
    ResetStats,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        let command = match normalize(input).as_str() {
            "add" => Self::Add,
            "remove" => Self::Remove,
            "import" => Self::Import,
            "export" => Self::Export,
            "ask" => Self::Ask,
            "exit" => Self::Exit,
            "log" => Self::Log,
            "hardest card" => Self::HardestCard,
            "reset stats" => Self::ResetStats,
            _ => return None,
        };
        Some(command)
    }
}
