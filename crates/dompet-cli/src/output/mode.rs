use crate::cli::{Commands, RecurringCommand, TemplateCommand, TransactionCommand, WalletCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Wallet { command } => match command {
            WalletCommand::Add { json, .. } | WalletCommand::List { json } => *json,
        },
        Commands::Template { command } => match command {
            TemplateCommand::Add { json, .. }
            | TemplateCommand::List { json, .. }
            | TemplateCommand::Pause { json, .. }
            | TemplateCommand::Resume { json, .. } => *json,
        },
        Commands::Transaction { command } => match command {
            TransactionCommand::List { json, .. } => *json,
        },
        Commands::Recurring { command } => match command {
            RecurringCommand::Run { json, .. } | RecurringCommand::Generate { json, .. } => *json,
        },
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_selects_json_for_every_command_group() {
        let cases: [&[&str]; 4] = [
            &["dompet", "wallet", "list", "--json"],
            &["dompet", "template", "pause", "tpl_1", "--json"],
            &["dompet", "transaction", "list", "--json"],
            &["dompet", "recurring", "generate", "tpl_1", "--json"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn text_is_the_default() {
        let parsed = parse_from(["dompet", "recurring", "run"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
