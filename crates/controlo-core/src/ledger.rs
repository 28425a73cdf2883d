//! In-memory ledger: the owning `TransactionStore` implementation
//!
//! Holds transactions in insertion order together with categories, budgets and
//! wallets. All mutation goes through this type; the analytics and heuristic
//! engines only ever see it through the read-only `TransactionStore` trait.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{
    is_valid_amount, Balance, Categories, NewReceipt, NewTransaction, Period, Receipt, Transaction,
    TransactionType, TransactionUpdate, Wallet,
};
use crate::store::TransactionStore;

/// Id of the wallet that always exists and cannot be deleted
pub const MAIN_WALLET_ID: &str = "main";

/// Category assigned to both legs of a wallet transfer
pub const TRANSFER_CATEGORY: &str = "Transferência";

const DEFAULT_INCOME_CATEGORIES: &[&str] = &[
    "Salário",
    "Freelance",
    "Investimentos",
    "Rendimentos",
    "Vendas",
    "Presentes",
    "Reembolsos",
    "Outros",
];

const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Alimentação",
    "Transporte",
    "Moradia",
    "Água/Luz/Gás",
    "Internet/Telefone",
    "Saúde",
    "Educação",
    "Lazer",
    "Vestuário",
    "Supermercado",
    "Restaurantes",
    "Assinaturas",
    "Seguros",
    "Impostos",
    "Manutenção",
    "Viagens",
    "Presentes",
    "Outros",
];

const DEFAULT_WALLET_ICON: &str = "💳";
const DEFAULT_WALLET_COLOR: &str = "#00d4ff";

pub fn default_categories() -> Categories {
    Categories {
        income: DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        expense: DEFAULT_EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn default_wallet() -> Wallet {
    Wallet {
        id: MAIN_WALLET_ID.to_string(),
        name: "Carteira Principal".to_string(),
        icon: "💰".to_string(),
        color: DEFAULT_WALLET_COLOR.to_string(),
        created_at: None,
    }
}

/// Hex SHA-256 of receipt image bytes
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn default_category_names(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => DEFAULT_INCOME_CATEGORIES,
        TransactionType::Expense => DEFAULT_EXPENSE_CATEGORIES,
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    categories: Categories,
    budgets: BTreeMap<String, f64>,
    wallets: Vec<Wallet>,
    active_wallet: String,
    receipts: Vec<Receipt>,
    /// Mixed into generated ids so two ids minted in the same instant differ
    sequence: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Empty ledger with default categories and the main wallet
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
            budgets: BTreeMap::new(),
            wallets: vec![default_wallet()],
            active_wallet: MAIN_WALLET_ID.to_string(),
            receipts: Vec::new(),
            sequence: 0,
        }
    }

    /// Rebuild a ledger from previously exported parts
    ///
    /// An empty wallet list is replaced by the main wallet, matching what a
    /// fresh ledger would hold.
    pub fn from_parts(
        transactions: Vec<Transaction>,
        categories: Categories,
        budgets: BTreeMap<String, f64>,
        wallets: Vec<Wallet>,
        active_wallet: Option<String>,
        receipts: Vec<Receipt>,
    ) -> Self {
        let wallets = if wallets.is_empty() {
            vec![default_wallet()]
        } else {
            wallets
        };
        Self {
            transactions,
            categories,
            budgets,
            wallets,
            active_wallet: active_wallet.unwrap_or_else(|| MAIN_WALLET_ID.to_string()),
            receipts,
            sequence: 0,
        }
    }

    fn next_id(&mut self, seed: &str) -> String {
        loop {
            self.sequence += 1;
            let mut hasher = Sha256::new();
            hasher.update(
                Utc::now()
                    .timestamp_nanos_opt()
                    .unwrap_or_default()
                    .to_le_bytes(),
            );
            hasher.update(self.sequence.to_le_bytes());
            hasher.update(seed.as_bytes());
            let id = hex::encode(&hasher.finalize()[..8]);

            let taken = self.transactions.iter().any(|t| t.id == id)
                || self.wallets.iter().any(|w| w.id == id)
                || self.receipts.iter().any(|r| r.id == id);
            if !taken {
                return id;
            }
        }
    }

    // ========== Transactions ==========

    pub fn add_transaction(&mut self, new: NewTransaction) -> Transaction {
        let id = self.next_id(&format!("{}:{}:{}", new.category, new.amount, new.date));
        let transaction = Transaction {
            id,
            kind: new.kind,
            amount: new.amount,
            category: new.category,
            date: new.date,
            note: new.note,
            created_at: Utc::now(),
            updated_at: None,
            is_recurring: new.is_recurring,
            frequency: new.frequency,
            last_processed: if new.is_recurring { Some(new.date) } else { None },
            wallet_id: new.wallet_id,
            is_transfer: new.is_transfer,
            source_recurring_id: new.source_recurring_id,
        };

        debug!(
            id = %transaction.id,
            kind = transaction.kind.as_str(),
            amount = transaction.amount,
            category = %transaction.category,
            "Transaction added"
        );
        self.transactions.push(transaction.clone());
        transaction
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn update_transaction(&mut self, id: &str, update: TransactionUpdate) -> Result<&Transaction> {
        if let Some(amount) = update.amount.filter(|a| !is_valid_amount(*a)) {
            return Err(Error::InvalidData(format!(
                "amount must be a positive number, got {}",
                amount
            )));
        }
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))?;

        if let Some(kind) = update.kind {
            transaction.kind = kind;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(category) = update.category {
            transaction.category = category;
        }
        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(note) = update.note {
            transaction.note = Some(note);
        }
        if let Some(last_processed) = update.last_processed {
            transaction.last_processed = Some(last_processed);
        }
        transaction.updated_at = Some(Utc::now());

        Ok(transaction)
    }

    /// Returns true if a transaction was removed. Receipts linked to it are
    /// kept but unlinked.
    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return false;
        }
        for receipt in self
            .receipts
            .iter_mut()
            .filter(|r| r.transaction_id.as_deref() == Some(id))
        {
            receipt.transaction_id = None;
        }
        true
    }

    // ========== Recurring ==========

    pub fn recurring_templates(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.is_recurring).collect()
    }

    /// Materialize the next due occurrence of every recurring template
    ///
    /// At most one occurrence per template is created per call; templates
    /// without a `last_processed` date or a frequency are skipped.
    pub fn process_recurring(&mut self, today: NaiveDate) -> Vec<Transaction> {
        let due: Vec<(usize, NaiveDate)> = self
            .transactions
            .iter()
            .enumerate()
            .filter_map(|(index, t)| {
                if !t.is_recurring {
                    return None;
                }
                let next = t.frequency?.next_after(t.last_processed?)?;
                (next <= today).then_some((index, next))
            })
            .collect();

        let mut created = Vec::with_capacity(due.len());
        for (index, next) in due {
            let template = self.transactions[index].clone();
            let note = match template.note.as_deref() {
                Some(note) if !note.is_empty() => format!("{} (Recorrente)", note),
                _ => "Transação Recorrente".to_string(),
            };

            let occurrence = NewTransaction {
                kind: template.kind,
                amount: template.amount,
                category: template.category.clone(),
                date: next,
                note: Some(note),
                is_recurring: false,
                frequency: None,
                wallet_id: template.wallet_id.clone(),
                is_transfer: false,
                source_recurring_id: Some(template.id.clone()),
            };
            created.push(self.add_transaction(occurrence));

            let template = &mut self.transactions[index];
            template.last_processed = Some(next);
            template.updated_at = Some(Utc::now());
        }

        if !created.is_empty() {
            info!(created = created.len(), "Processed recurring transactions");
        }
        created
    }

    // ========== Categories ==========

    /// Returns false for empty or duplicate names
    pub fn add_category(&mut self, kind: TransactionType, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let list = self.categories.of_mut(kind);
        if list.iter().any(|c| c == name) {
            return false;
        }
        list.push(name.to_string());
        true
    }

    /// Built-in categories cannot be removed
    pub fn remove_category(&mut self, kind: TransactionType, name: &str) -> bool {
        if Self::is_default_category(kind, name) {
            return false;
        }
        let list = self.categories.of_mut(kind);
        match list.iter().position(|c| c == name) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_default_category(kind: TransactionType, name: &str) -> bool {
        default_category_names(kind).contains(&name)
    }

    pub fn all_categories(&self) -> &Categories {
        &self.categories
    }

    // ========== Budgets ==========

    /// A non-positive or non-finite amount clears the budget
    pub fn set_budget(&mut self, category: &str, amount: f64) {
        if is_valid_amount(amount) {
            self.budgets.insert(category.to_string(), amount);
        } else {
            self.budgets.remove(category);
        }
    }

    pub fn remove_budget(&mut self, category: &str) -> bool {
        self.budgets.remove(category).is_some()
    }

    // ========== Wallets ==========

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn wallet(&self, id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    /// The active wallet, or the first wallet if the active id is stale
    pub fn active_wallet(&self) -> &Wallet {
        self.wallet(&self.active_wallet)
            .unwrap_or_else(|| &self.wallets[0])
    }

    pub fn active_wallet_id(&self) -> &str {
        &self.active_wallet
    }

    pub fn set_active_wallet(&mut self, id: &str) -> Result<()> {
        if self.wallet(id).is_none() {
            return Err(Error::NotFound(format!("wallet {}", id)));
        }
        self.active_wallet = id.to_string();
        Ok(())
    }

    pub fn add_wallet(&mut self, name: &str, icon: Option<&str>, color: Option<&str>) -> Wallet {
        let wallet = Wallet {
            id: self.next_id(name),
            name: name.to_string(),
            icon: icon.unwrap_or(DEFAULT_WALLET_ICON).to_string(),
            color: color.unwrap_or(DEFAULT_WALLET_COLOR).to_string(),
            created_at: Some(Utc::now()),
        };
        self.wallets.push(wallet.clone());
        wallet
    }

    pub fn update_wallet(
        &mut self,
        id: &str,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<&Wallet> {
        let wallet = self
            .wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::NotFound(format!("wallet {}", id)))?;
        if let Some(name) = name {
            wallet.name = name.to_string();
        }
        if let Some(icon) = icon {
            wallet.icon = icon.to_string();
        }
        if let Some(color) = color {
            wallet.color = color.to_string();
        }
        Ok(wallet)
    }

    /// The main wallet and the last remaining wallet cannot be deleted;
    /// deleting the active wallet switches to the first one (main)
    pub fn delete_wallet(&mut self, id: &str) -> bool {
        if id == MAIN_WALLET_ID || self.wallets.len() <= 1 {
            return false;
        }
        let before = self.wallets.len();
        self.wallets.retain(|w| w.id != id);
        if self.wallets.len() == before {
            return false;
        }
        if self.active_wallet == id {
            self.active_wallet = self.wallets[0].id.clone();
        }
        true
    }

    /// Totals over transactions without a wallet or assigned to `wallet_id`
    pub fn wallet_balance(&self, wallet_id: &str) -> Balance {
        let mut balance = Balance::default();
        for t in self
            .transactions
            .iter()
            .filter(|t| t.wallet_id.as_deref().map_or(true, |w| w == wallet_id))
        {
            match t.kind {
                TransactionType::Income => balance.income += t.amount,
                TransactionType::Expense => balance.expense += t.amount,
            }
        }
        balance.balance = balance.income - balance.expense;
        balance
    }

    /// Move money between wallets as an expense/income pair
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: f64,
        note: Option<&str>,
        date: NaiveDate,
    ) -> Result<(Transaction, Transaction)> {
        if !is_valid_amount(amount) {
            return Err(Error::InvalidData(format!(
                "transfer amount must be a positive number, got {}",
                amount
            )));
        }
        let from_name = self
            .wallet(from)
            .ok_or_else(|| Error::NotFound(format!("wallet {}", from)))?
            .name
            .clone();
        let to_name = self
            .wallet(to)
            .ok_or_else(|| Error::NotFound(format!("wallet {}", to)))?
            .name
            .clone();
        let suffix = note
            .filter(|n| !n.is_empty())
            .map(|n| format!(": {}", n))
            .unwrap_or_default();

        let mut outgoing =
            NewTransaction::new(TransactionType::Expense, amount, TRANSFER_CATEGORY, date)
                .with_note(format!("Transferência para {}{}", to_name, suffix))
                .with_wallet(from);
        outgoing.is_transfer = true;

        let mut incoming =
            NewTransaction::new(TransactionType::Income, amount, TRANSFER_CATEGORY, date)
                .with_note(format!("Transferência de {}{}", from_name, suffix))
                .with_wallet(to);
        incoming.is_transfer = true;

        let expense = self.add_transaction(outgoing);
        let income = self.add_transaction(incoming);
        info!(from, to, amount, "Wallet transfer recorded");
        Ok((expense, income))
    }

    // ========== Receipts ==========

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn receipt(&self, id: &str) -> Option<&Receipt> {
        self.receipts.iter().find(|r| r.id == id)
    }

    pub fn receipt_by_hash(&self, content_hash: &str) -> Option<&Receipt> {
        self.receipts.iter().find(|r| r.content_hash == content_hash)
    }

    /// Store a receipt; a linked transaction must exist
    pub fn add_receipt(&mut self, new: NewReceipt) -> Result<Receipt> {
        if let Some(tx_id) = new.transaction_id.as_deref() {
            if self.transaction(tx_id).is_none() {
                return Err(Error::NotFound(format!("transaction {}", tx_id)));
            }
        }
        let receipt = Receipt {
            id: self.next_id(&new.content_hash),
            date: new.date,
            transaction_id: new.transaction_id,
            note: new.note,
            image_path: new.image_path,
            content_hash: new.content_hash,
            created_at: Utc::now(),
        };
        debug!(id = %receipt.id, path = %receipt.image_path, "Receipt added");
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }

    /// Returns the removed receipt so its image can be cleaned up
    pub fn delete_receipt(&mut self, id: &str) -> Option<Receipt> {
        let index = self.receipts.iter().position(|r| r.id == id)?;
        Some(self.receipts.remove(index))
    }

    pub fn link_receipt(&mut self, receipt_id: &str, transaction_id: &str) -> Result<&Receipt> {
        if self.transaction(transaction_id).is_none() {
            return Err(Error::NotFound(format!("transaction {}", transaction_id)));
        }
        let receipt = self
            .receipts
            .iter_mut()
            .find(|r| r.id == receipt_id)
            .ok_or_else(|| Error::NotFound(format!("receipt {}", receipt_id)))?;
        receipt.transaction_id = Some(transaction_id.to_string());
        Ok(receipt)
    }

    /// Receipts dated in `period`, in the order they were added
    pub fn receipts_by_month(&self, period: Period) -> Vec<&Receipt> {
        self.receipts
            .iter()
            .filter(|r| period.contains(r.date))
            .collect()
    }

    /// All receipts keyed by month, newest first within each month
    pub fn receipts_grouped(&self) -> BTreeMap<Period, Vec<&Receipt>> {
        let mut grouped: BTreeMap<Period, Vec<&Receipt>> = BTreeMap::new();
        for receipt in &self.receipts {
            grouped.entry(Period::of(receipt.date)).or_default().push(receipt);
        }
        for receipts in grouped.values_mut() {
            receipts.sort_by(|a, b| b.date.cmp(&a.date));
        }
        grouped
    }

    pub fn receipts_for_transaction(&self, transaction_id: &str) -> Vec<&Receipt> {
        self.receipts
            .iter()
            .filter(|r| r.transaction_id.as_deref() == Some(transaction_id))
            .collect()
    }
}

impl TransactionStore for Ledger {
    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn categories(&self, kind: TransactionType) -> &[String] {
        self.categories.of(kind)
    }

    fn budgets(&self) -> &BTreeMap<String, f64> {
        &self.budgets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut ledger = Ledger::new();
        let a = ledger.add_transaction(NewTransaction::new(
            TransactionType::Expense,
            10.0,
            "Alimentação",
            date(2024, 1, 1),
        ));
        let b = ledger.add_transaction(NewTransaction::new(
            TransactionType::Expense,
            10.0,
            "Alimentação",
            date(2024, 1, 1),
        ));
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 16);
        assert_eq!(ledger.transactions().len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_transaction(NewTransaction::new(
            TransactionType::Expense,
            10.0,
            "Lazer",
            date(2024, 1, 1),
        ));

        let updated = ledger
            .update_transaction(
                &tx.id,
                TransactionUpdate {
                    amount: Some(25.0),
                    note: Some("cinema".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.note.as_deref(), Some("cinema"));
        assert!(updated.updated_at.is_some());

        assert!(ledger
            .update_transaction("missing", TransactionUpdate::default())
            .is_err());

        assert!(ledger.delete_transaction(&tx.id));
        assert!(!ledger.delete_transaction(&tx.id));
        assert!(ledger.transaction(&tx.id).is_none());
    }

    #[test]
    fn test_process_recurring_creates_one_occurrence() {
        let mut ledger = Ledger::new();
        let template = ledger.add_transaction(
            NewTransaction::new(TransactionType::Expense, 9.99, "Assinaturas", date(2024, 1, 1))
                .with_note("Netflix")
                .recurring(Frequency::Weekly),
        );
        assert_eq!(template.last_processed, Some(date(2024, 1, 1)));

        // Several weeks overdue, but only one occurrence per call
        let created = ledger.process_recurring(date(2024, 2, 1));
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].date, date(2024, 1, 8));
        assert_eq!(created[0].note.as_deref(), Some("Netflix (Recorrente)"));
        assert!(!created[0].is_recurring);
        assert_eq!(created[0].source_recurring_id.as_deref(), Some(template.id.as_str()));
        assert_eq!(
            ledger.transaction(&template.id).unwrap().last_processed,
            Some(date(2024, 1, 8))
        );

        let created = ledger.process_recurring(date(2024, 2, 1));
        assert_eq!(created[0].date, date(2024, 1, 15));
    }

    #[test]
    fn test_process_recurring_not_yet_due() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(
            NewTransaction::new(TransactionType::Income, 1500.0, "Salário", date(2024, 1, 31))
                .recurring(Frequency::Monthly),
        );
        let created = ledger.process_recurring(date(2024, 2, 29));
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].date, date(2024, 2, 29));
        assert!(ledger.process_recurring(date(2024, 3, 27)).is_empty());

        let created = ledger.process_recurring(date(2024, 3, 29));
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].date, date(2024, 3, 29));
        assert_eq!(created[0].note.as_deref(), Some("Transação Recorrente"));
    }

    #[test]
    fn test_categories() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_category(TransactionType::Expense, "  Animais  "));
        assert!(!ledger.add_category(TransactionType::Expense, "Animais"));
        assert!(!ledger.add_category(TransactionType::Expense, "   "));
        assert!(ledger
            .categories(TransactionType::Expense)
            .contains(&"Animais".to_string()));

        assert!(!ledger.remove_category(TransactionType::Expense, "Alimentação"));
        assert!(ledger.remove_category(TransactionType::Expense, "Animais"));
        assert!(!ledger.remove_category(TransactionType::Expense, "Animais"));
    }

    #[test]
    fn test_budgets() {
        let mut ledger = Ledger::new();
        ledger.set_budget("Lazer", 100.0);
        assert_eq!(ledger.budgets().get("Lazer"), Some(&100.0));
        ledger.set_budget("Lazer", 0.0);
        assert!(ledger.budgets().get("Lazer").is_none());
        ledger.set_budget("Lazer", 50.0);
        assert!(ledger.remove_budget("Lazer"));
        assert!(!ledger.remove_budget("Lazer"));
    }

    #[test]
    fn test_wallet_lifecycle() {
        let mut ledger = Ledger::new();
        let savings = ledger.add_wallet("Poupança", None, Some("#22c55e"));
        assert_eq!(savings.icon, DEFAULT_WALLET_ICON);
        assert_eq!(ledger.wallets().len(), 2);

        ledger.set_active_wallet(&savings.id).unwrap();
        assert_eq!(ledger.active_wallet().name, "Poupança");
        assert!(ledger.set_active_wallet("nope").is_err());

        ledger
            .update_wallet(&savings.id, Some("Reserva"), None, None)
            .unwrap();
        assert_eq!(ledger.wallet(&savings.id).unwrap().name, "Reserva");

        assert!(!ledger.delete_wallet(MAIN_WALLET_ID));
        assert!(ledger.delete_wallet(&savings.id));
        assert_eq!(ledger.active_wallet_id(), MAIN_WALLET_ID);
    }

    #[test]
    fn test_transfer_and_wallet_balance() {
        let mut ledger = Ledger::new();
        let savings = ledger.add_wallet("Poupança", None, None);
        ledger.add_transaction(
            NewTransaction::new(TransactionType::Income, 1000.0, "Salário", date(2024, 1, 1))
                .with_wallet(MAIN_WALLET_ID),
        );
        // Unassigned transactions count towards every wallet
        ledger.add_transaction(NewTransaction::new(
            TransactionType::Expense,
            50.0,
            "Lazer",
            date(2024, 1, 2),
        ));

        let (out, inc) = ledger
            .transfer(MAIN_WALLET_ID, &savings.id, 300.0, Some("reserva"), date(2024, 1, 3))
            .unwrap();
        assert!(out.is_transfer && inc.is_transfer);
        assert_eq!(out.category, TRANSFER_CATEGORY);
        assert_eq!(out.note.as_deref(), Some("Transferência para Poupança: reserva"));
        assert_eq!(inc.note.as_deref(), Some("Transferência de Carteira Principal: reserva"));

        let main = ledger.wallet_balance(MAIN_WALLET_ID);
        assert_eq!(main.income, 1000.0);
        assert_eq!(main.expense, 350.0);
        assert_eq!(main.balance, 650.0);

        let other = ledger.wallet_balance(&savings.id);
        assert_eq!(other.balance, 250.0);

        assert!(ledger
            .transfer(MAIN_WALLET_ID, &savings.id, 0.0, None, date(2024, 1, 3))
            .is_err());
        assert!(ledger
            .transfer(MAIN_WALLET_ID, "ghost", 10.0, None, date(2024, 1, 3))
            .is_err());
    }

    #[test]
    fn test_transfer_rejects_non_finite_amounts() {
        let mut ledger = Ledger::new();
        let savings = ledger.add_wallet("Poupança", None, None);
        for amount in [f64::NAN, f64::INFINITY, -1.0] {
            let err = ledger
                .transfer(MAIN_WALLET_ID, &savings.id, amount, None, date(2024, 1, 3))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidData(_)));
        }
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_update_and_budget_reject_non_finite_amounts() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_transaction(NewTransaction::new(
            TransactionType::Expense,
            10.0,
            "Lazer",
            date(2024, 1, 1),
        ));
        let update = TransactionUpdate {
            amount: Some(f64::INFINITY),
            ..Default::default()
        };
        assert!(ledger.update_transaction(&tx.id, update).is_err());
        assert_eq!(ledger.transaction(&tx.id).unwrap().amount, 10.0);

        ledger.set_budget("Lazer", 100.0);
        ledger.set_budget("Lazer", f64::INFINITY);
        assert!(ledger.budgets().get("Lazer").is_none());
    }

    #[test]
    fn test_receipts_link_group_and_delete() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_transaction(NewTransaction::new(
            TransactionType::Expense,
            42.0,
            "Restaurantes",
            date(2024, 3, 9),
        ));

        let early = ledger
            .add_receipt(NewReceipt::new("r/a.jpg", content_hash(b"a"), date(2024, 3, 2)))
            .unwrap();
        let late = ledger
            .add_receipt(
                NewReceipt::new("r/b.jpg", content_hash(b"b"), date(2024, 3, 9))
                    .with_transaction(&tx.id)
                    .with_note("jantar"),
            )
            .unwrap();
        let april = ledger
            .add_receipt(NewReceipt::new("r/c.jpg", content_hash(b"c"), date(2024, 4, 1)))
            .unwrap();

        assert!(ledger
            .add_receipt(NewReceipt::new("r/d.jpg", "d", date(2024, 3, 1)).with_transaction("ghost"))
            .is_err());
        assert_eq!(ledger.receipt_by_hash(&content_hash(b"b")).unwrap().id, late.id);

        let march = Period::new(2024, 3).unwrap();
        let ids: Vec<&str> = ledger
            .receipts_by_month(march)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, [early.id.as_str(), late.id.as_str()]);

        let grouped = ledger.receipts_grouped();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&march][0].id, late.id);
        assert_eq!(grouped[&Period::new(2024, 4).unwrap()][0].id, april.id);

        ledger.link_receipt(&early.id, &tx.id).unwrap();
        assert_eq!(ledger.receipts_for_transaction(&tx.id).len(), 2);
        assert!(ledger.link_receipt("missing", &tx.id).is_err());
        assert!(ledger.link_receipt(&early.id, "ghost").is_err());

        // Deleting the transaction keeps the receipts but drops the link
        assert!(ledger.delete_transaction(&tx.id));
        assert!(ledger.receipts_for_transaction(&tx.id).is_empty());
        assert_eq!(ledger.receipts().len(), 3);

        let removed = ledger.delete_receipt(&april.id).unwrap();
        assert_eq!(removed.image_path, "r/c.jpg");
        assert!(ledger.delete_receipt(&april.id).is_none());
    }

    #[test]
    fn test_content_hash() {
        assert_eq!(
            content_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
