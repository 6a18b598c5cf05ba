mod support;

use dompet_client::commands::templates::{self, TemplateListOptions, TemplateStateOptions};
use dompet_client::commands::transactions::{self, TransactionListOptions};
use dompet_client::commands::wallets::{self, WalletCreateOptions};
use serde_json::Value;
use support::ledger_testkit::{
    USER, add_template, add_wallet, payload, run_at, temp_home_in_tmp, template_options,
};

#[test]
fn wallet_names_are_unique_per_user_ignoring_case() {
    let temp = temp_home_in_tmp("dompet-wallet-unique");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        add_wallet(&home, "Cash");

        let duplicate = wallets::create_with_options(WalletCreateOptions {
            user_id: USER.to_string(),
            name: "  cash ".to_string(),
            home_override: Some(&home),
        });
        assert!(duplicate.is_err());
        if let Err(error) = duplicate {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("already exists"));
        }

        let other_user = wallets::create_with_options(WalletCreateOptions {
            user_id: "someone-else".to_string(),
            name: "Cash".to_string(),
            home_override: Some(&home),
        });
        assert!(other_user.is_ok());

        let empty = wallets::create_with_options(WalletCreateOptions {
            user_id: USER.to_string(),
            name: "   ".to_string(),
            home_override: Some(&home),
        });
        assert!(empty.is_err());
    }
}

#[test]
fn template_add_applies_materialization_rules() {
    let temp = temp_home_in_tmp("dompet-template-validation");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let bank = add_wallet(&home, "BCA");

        let mut same_wallet = template_options(&home, "Loop", "transfer", 1000, &bank, 1);
        same_wallet.target_wallet_id = Some(bank.clone());
        let result = templates::create_with_options(same_wallet);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert_eq!(error.message, "Target wallet must differ from source wallet");
        }

        let result = templates::create_with_options(template_options(&home, "Rent", "outcome", 0, &bank, 1));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.message, "Amount must be positive");
        }

        let result = templates::create_with_options(template_options(&home, "Rent", "outcome", 10, &bank, 32));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.message, "Day of month must be between 1 and 31");
        }

        let result = templates::create_with_options(template_options(&home, "Rent", "refund", 10, &bank, 1));
        assert!(result.is_err());

        let mut no_day = template_options(&home, "Rent", "outcome", 10, &bank, 1);
        no_day.day_of_month = None;
        assert!(templates::create_with_options(no_day).is_err());

        let result = templates::create_with_options(template_options(&home, "Rent", "outcome", 10, "wal_nope", 1));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "wallet_not_found");
        }
    }
}

#[test]
fn template_list_reports_next_due_dates_and_pause_state() {
    let temp = temp_home_in_tmp("dompet-template-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let bank = add_wallet(&home, "BCA");
        let rent = add_template(template_options(&home, "Rent", "outcome", 10, &bank, 15));
        let mut weekly = template_options(&home, "Groceries", "outcome", 20, &bank, 1);
        weekly.frequency = "weekly".to_string();
        weekly.day_of_month = None;
        add_template(weekly);

        let paused = templates::set_active_with_options(TemplateStateOptions {
            user_id: USER.to_string(),
            template_id: rent.clone(),
            is_active: false,
            home_override: Some(&home),
        });
        let paused = payload(paused);
        assert_eq!(paused["command"], "template pause");
        assert_eq!(paused["data"]["is_active"], false);

        let list = payload(templates::list_with_options(TemplateListOptions {
            user_id: USER.to_string(),
            as_of: chrono::NaiveDate::from_ymd_opt(2024, 3, 10),
            home_override: Some(&home),
        }));
        let rows = list["data"]["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 2);
        let find = |description: &str| {
            rows.iter()
                .find(|row| row["description"] == description)
                .cloned()
                .unwrap_or(Value::Null)
        };
        assert_eq!(find("Rent")["next_due_at"], Value::Null);
        assert_eq!(find("Groceries")["next_due_at"], "2024-03-10");
        assert_eq!(find("Groceries")["frequency"], "weekly");

        let resumed = payload(templates::set_active_with_options(TemplateStateOptions {
            user_id: USER.to_string(),
            template_id: rent,
            is_active: true,
            home_override: Some(&home),
        }));
        assert_eq!(resumed["command"], "template resume");
        assert_eq!(resumed["data"]["is_active"], true);
    }
}

#[test]
fn pausing_an_unknown_template_fails() {
    let temp = temp_home_in_tmp("dompet-template-missing");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = templates::set_active_with_options(TemplateStateOptions {
            user_id: USER.to_string(),
            template_id: "tpl_missing".to_string(),
            is_active: false,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "template_not_found");
        }
    }
}

#[test]
fn templates_of_another_user_cannot_be_paused() {
    let temp = temp_home_in_tmp("dompet-template-owner");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let bank = add_wallet(&home, "BCA");
        let rent = add_template(template_options(&home, "Rent", "outcome", 10, &bank, 15));

        let result = templates::set_active_with_options(TemplateStateOptions {
            user_id: "someone-else".to_string(),
            template_id: rent,
            is_active: false,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "template_not_found");
        }

        let list = payload(templates::list_with_options(TemplateListOptions {
            user_id: USER.to_string(),
            as_of: None,
            home_override: Some(&home),
        }));
        assert_eq!(list["data"]["rows"][0]["is_active"], true);
    }
}

#[test]
fn transaction_list_is_newest_first_and_honors_limit() {
    let temp = temp_home_in_tmp("dompet-transaction-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let bank = add_wallet(&home, "BCA");
        add_template(template_options(&home, "Internet", "outcome", 350_000, &bank, 5));
        run_at(&home, "2024-01-05T08:00:00");
        run_at(&home, "2024-02-05T08:00:00");
        run_at(&home, "2024-03-05T08:00:00");

        let limited = payload(transactions::list_with_options(TransactionListOptions {
            user_id: USER.to_string(),
            wallet_id: None,
            limit: Some(2),
            home_override: Some(&home),
        }));
        assert_eq!(limited["data"]["returned"], 2);
        let rows = limited["data"]["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows[0]["posted_at"], "2024-03-05");
        assert_eq!(rows[1]["posted_at"], "2024-02-05");

        let unknown_wallet = transactions::list_with_options(TransactionListOptions {
            user_id: USER.to_string(),
            wallet_id: Some("wal_nope".to_string()),
            limit: None,
            home_override: Some(&home),
        });
        assert!(unknown_wallet.is_err());
        if let Err(error) = unknown_wallet {
            assert_eq!(error.code, "wallet_not_found");
        }

        let zero = transactions::list_with_options(TransactionListOptions {
            user_id: USER.to_string(),
            wallet_id: None,
            limit: Some(0),
            home_override: Some(&home),
        });
        assert!(zero.is_err());
    }
}
