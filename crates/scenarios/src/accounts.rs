//! Picking scenario accounts out of the live chart of accounts.

use anyhow::{Context, bail};
use motor_vouchers::Account;

/// Which account a scenario line needs.
#[derive(Debug, Clone, Copy)]
pub struct AccountPick {
    pub role: &'static str,
    /// Code prefixes tried in order.
    pub prefixes: &'static [&'static str],
    /// Position in the listing used when no prefix matches.
    pub fallback: usize,
}

pub const RECEIVABLE: AccountPick = AccountPick { role: "receivable", prefixes: &["1305", "13"], fallback: 0 };
pub const CASH: AccountPick = AccountPick { role: "cash", prefixes: &["1105", "1110", "11"], fallback: 0 };
pub const REVENUE: AccountPick = AccountPick { role: "revenue", prefixes: &["4135", "41", "4"], fallback: 1 };
pub const TAX_PAYABLE: AccountPick = AccountPick { role: "tax payable", prefixes: &["2408", "24"], fallback: 2 };
pub const EXPENSE: AccountPick = AccountPick { role: "expense", prefixes: &["5195", "51", "5"], fallback: 1 };

pub fn pick<'a>(accounts: &'a [Account], want: AccountPick) -> anyhow::Result<&'a Account> {
    if accounts.is_empty() {
        bail!("the chart of accounts is empty; cannot pick a {} account", want.role);
    }
    want.prefixes
        .iter()
        .find_map(|prefix| accounts.iter().find(|a| a.code.starts_with(prefix)))
        .or_else(|| accounts.get(want.fallback))
        .with_context(|| {
            format!(
                "no {} account: nothing matches {:?} and only {} accounts are listed",
                want.role,
                want.prefixes,
                accounts.len()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use motor_core::AccountId;

    fn chart() -> Vec<Account> {
        [(1, "110505", "Caja general"), (2, "130505", "Clientes"), (3, "413524", "Ventas"), (4, "240805", "IVA")]
            .into_iter()
            .map(|(id, code, name)| Account { id: AccountId::new(id), code: code.to_string(), name: name.to_string() })
            .collect()
    }

    #[test]
    fn picks_by_prefix() {
        let accounts = chart();
        assert_eq!(pick(&accounts, RECEIVABLE).unwrap().code, "130505");
        assert_eq!(pick(&accounts, TAX_PAYABLE).unwrap().code, "240805");
        assert_eq!(pick(&accounts, CASH).unwrap().code, "110505");
    }

    #[test]
    fn falls_back_to_position() {
        let accounts = chart();
        // No "5..." accounts: fallback index 1.
        assert_eq!(pick(&accounts, EXPENSE).unwrap().code, "130505");
    }

    #[test]
    fn empty_chart_is_an_error() {
        let err = pick(&[], REVENUE).unwrap_err();
        assert!(err.to_string().contains("revenue"));
    }

    #[test]
    fn short_chart_without_match_is_an_error() {
        let accounts = vec![Account { id: AccountId::new(1), code: "9".to_string(), name: "Orden".to_string() }];
        assert!(pick(&accounts, TAX_PAYABLE).is_err());
    }
}
