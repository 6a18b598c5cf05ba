use dompet_client::commands;
use dompet_client::commands::templates::TemplateCreateOptions;
use dompet_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    Cli, Commands, RecurringCommand, TemplateCommand, TransactionCommand, WalletCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let user = cli.user.as_str();
    match &cli.command {
        Commands::Wallet { command } => match command {
            WalletCommand::Add { name, .. } => commands::wallets::create(user, name),
            WalletCommand::List { .. } => commands::wallets::list(user),
        },
        Commands::Template { command } => match command {
            TemplateCommand::Add {
                description,
                kind,
                amount,
                source_wallet_id,
                target_wallet_id,
                category,
                frequency,
                day,
                ..
            } => commands::templates::create_with_options(TemplateCreateOptions {
                user_id: user.to_string(),
                description: description.clone(),
                amount: *amount,
                kind: kind.clone(),
                category: category.clone(),
                source_wallet_id: source_wallet_id.clone(),
                target_wallet_id: target_wallet_id.clone(),
                frequency: frequency.clone(),
                day_of_month: *day,
                home_override: None,
            }),
            TemplateCommand::List { as_of, .. } => {
                commands::templates::list_with_options(commands::templates::TemplateListOptions {
                    user_id: user.to_string(),
                    as_of: *as_of,
                    home_override: None,
                })
            }
            TemplateCommand::Pause { template_id, .. } => {
                commands::templates::set_active(user, template_id, false)
            }
            TemplateCommand::Resume { template_id, .. } => {
                commands::templates::set_active(user, template_id, true)
            }
        },
        Commands::Transaction { command } => match command {
            TransactionCommand::List { wallet, limit, .. } => {
                commands::transactions::list(user, wallet.as_deref(), *limit)
            }
        },
        Commands::Recurring { command } => match command {
            RecurringCommand::Run { as_of, .. } => commands::recurring::process(user, *as_of),
            RecurringCommand::Generate { template_id, at, .. } => {
                commands::recurring::generate(user, template_id, *at)
            }
        },
    }
}
