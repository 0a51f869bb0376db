use salesboard_client::commands;
use salesboard_client::sales::SaleDraft;
use salesboard_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, SaleCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Sale { command } => match command {
            SaleCommand::Add {
                customer,
                amount,
                category,
                quantity,
                date,
                json: _,
            } => commands::sales::add(SaleDraft {
                customer_name: customer.clone(),
                amount: *amount,
                category: *category,
                quantity: *quantity,
                date: *date,
            }),
            SaleCommand::List { .. } => commands::sales::list(),
            SaleCommand::Delete { id, .. } => commands::sales::delete(*id),
        },
        Commands::Dashboard { range, .. } => commands::dashboard::run(*range),
        Commands::Demo { range, .. } => commands::demo::run(*range),
    }
}
