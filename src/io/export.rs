use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::BankService;
use crate::domain::{format_cents, AccountStatus};

/// Point-in-time listing of every account in the bank
#[derive(Debug, Clone, Serialize)]
pub struct AccountsSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub accounts: Vec<AccountStatus>,
}

/// Exporter for rendering the account listing in machine-readable formats
pub struct Exporter<'a> {
    service: &'a BankService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BankService) -> Self {
        Self { service }
    }

    /// Export accounts to CSV format
    pub fn export_accounts_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let accounts = self.service.list_accounts();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "account_number",
            "name",
            "age",
            "gender",
            "phone",
            "balance",
            "opened_at",
        ])?;

        for account in &accounts {
            csv_writer.write_record([
                account.id.to_string(),
                account.name.clone(),
                account.age.to_string(),
                account.gender.to_string(),
                account.phone.to_string(),
                format_cents(account.balance),
                account.opened_at.to_rfc3339(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(accounts.len())
    }

    /// Export accounts as a pretty-printed JSON snapshot
    pub fn export_accounts_json<W: Write>(&self, mut writer: W) -> Result<AccountsSnapshot> {
        let snapshot = AccountsSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            accounts: self.service.list_accounts(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    fn bank() -> BankService {
        let mut bank = BankService::new();
        bank.create_account("Alice".into(), 30, Gender::Male, 5551234);
        bank.create_account("Smith, Bea".into(), 52, Gender::Female, 42);
        bank
    }

    #[test]
    fn test_export_accounts_csv() {
        let bank = bank();
        let mut out = Vec::new();
        let count = Exporter::new(&bank).export_accounts_csv(&mut out).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "account_number,name,age,gender,phone,balance,opened_at"
        );
        assert!(lines[1].starts_with("1000,Alice,30,Male,5551234,1000.00,"));
        assert!(lines[2].starts_with("1001,\"Smith, Bea\",52,Female,42,1000.00,"));
    }

    #[test]
    fn test_export_accounts_json() {
        let mut bank = bank();
        bank.credit(1000, 25_000).unwrap();
        let mut out = Vec::new();
        let snapshot = Exporter::new(&bank).export_accounts_json(&mut out).unwrap();
        assert_eq!(snapshot.accounts.len(), 2);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["accounts"][0]["id"], 1000);
        assert_eq!(value["accounts"][1]["gender"], "Female");
        assert_eq!(value["accounts"][0]["balance"], "1248.00");
        assert_eq!(value["accounts"][1]["balance"], "1000.00");
    }
}
