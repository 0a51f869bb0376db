use crate::cli::{Commands, SaleCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Sale { command } => match command {
            SaleCommand::Add { json, .. }
            | SaleCommand::List { json }
            | SaleCommand::Delete { json, .. } => *json,
        },
        Commands::Dashboard { json, .. } | Commands::Demo { json, .. } => *json,
    };
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
