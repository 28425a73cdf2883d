//! Integration tests for controlo-core
//!
//! These tests exercise the quick entry → ledger → analytics → insights
//! workflow and the backup file round trip.

use chrono::NaiveDate;
use controlo_core::{
    ai::{AnomalyDetector, QuickEntryParser},
    analytics::{AggregationEngine, BudgetEngine},
    export::{load_ledger, save_ledger},
    insights::{InsightContext, InsightEngine, InsightKind},
    models::{BudgetStatus, NewTransaction, Period, TransactionType},
    Ledger, LocalePack, TransactionStore,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 3, 20)
}

fn add_expense(ledger: &mut Ledger, amount: f64, category: &str, on: NaiveDate) {
    ledger.add_transaction(NewTransaction::new(
        TransactionType::Expense,
        amount,
        category,
        on,
    ));
}

/// Six expenses: five in March 2024 (two on the weekend) and one in February
fn march_history() -> Ledger {
    let mut ledger = Ledger::new();
    add_expense(&mut ledger, 10.0, "Lazer", date(2024, 2, 5));
    add_expense(&mut ledger, 100.0, "Alimentação", date(2024, 3, 2));
    add_expense(&mut ledger, 50.0, "Alimentação", date(2024, 3, 3));
    add_expense(&mut ledger, 20.0, "Transporte", date(2024, 3, 4));
    add_expense(&mut ledger, 30.0, "Transporte", date(2024, 3, 5));
    add_expense(&mut ledger, 10.0, "Saúde", date(2024, 3, 6));
    ledger
}

// =============================================================================
// Quick entry workflow
// =============================================================================

#[test]
fn test_quick_entry_to_monthly_totals() {
    let locale = LocalePack::embedded();
    let mut ledger = Ledger::new();

    for text in [
        "Gastei 50 em almoço ontem",
        "uber 12,5",
        "Recebi 1500 de salário",
    ] {
        let entry = QuickEntryParser::with_today(&ledger, &locale, today())
            .parse(text)
            .expect("entry should parse");
        ledger.add_transaction(NewTransaction::from(entry));
    }

    let txs = ledger.transactions();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].category, "Alimentação");
    assert_eq!(txs[0].date, date(2024, 3, 19));
    assert_eq!(txs[1].category, "Transporte");
    assert_eq!(txs[1].amount, 12.5);
    assert_eq!(txs[2].kind, TransactionType::Income);
    assert_eq!(txs[2].note.as_deref(), Some("Recebi 1500 de salário"));

    let engine = AggregationEngine::with_today(&ledger, today());
    let totals = engine.monthly_totals(engine.current_period());
    assert_eq!(totals.income, 1500.0);
    assert_eq!(totals.expense, 62.5);
    assert_eq!(totals.balance, 1437.5);
}

#[test]
fn test_quick_entry_learns_from_notes() {
    let locale = LocalePack::embedded();
    let mut ledger = Ledger::new();
    ledger.add_transaction(
        NewTransaction::new(TransactionType::Expense, 25.0, "Lazer", date(2024, 3, 1))
            .with_note("padel"),
    );

    let entry = QuickEntryParser::with_today(&ledger, &locale, today())
        .parse("padel 25")
        .unwrap();
    assert_eq!(entry.category, "Lazer");

    let unknown = QuickEntryParser::with_today(&ledger, &locale, today())
        .parse("xyz 25")
        .unwrap();
    assert_eq!(unknown.category, "Outros");
}

// =============================================================================
// Insights
// =============================================================================

#[test]
fn test_insights_from_history() {
    let ledger = march_history();
    let locale = LocalePack::embedded();
    let ctx = InsightContext::with_today(&ledger, &locale, today());

    let insights = InsightEngine::new().generate(&ctx);
    let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InsightKind::BusiestWeekday,
            InsightKind::TopCategory,
            InsightKind::WeekendShare,
        ]
    );

    assert_eq!(insights[0].text, "Seu dia mais gastador é Sábado");
    assert_eq!(insights[0].detail, "Média de 100,00 $ por sábado");
    assert_eq!(insights[1].text, "Alimentação é sua maior categoria");
    assert_eq!(insights[1].detail, "68% dos seus gastos");
    assert_eq!(insights[2].text, "68% dos seus gastos são no fim de semana");
}

#[test]
fn test_growth_insight_fills_skipped_slot() {
    // No weekend spending, so the growth rule takes the third slot
    let mut ledger = Ledger::new();
    add_expense(&mut ledger, 10.0, "Lazer", date(2024, 2, 5));
    for day in [4, 5, 6, 7, 8] {
        add_expense(&mut ledger, 10.0, "Lazer", date(2024, 3, day));
    }
    let locale = LocalePack::embedded();
    let ctx = InsightContext::with_today(&ledger, &locale, today());

    let insights = InsightEngine::new().generate(&ctx);
    assert_eq!(insights.len(), 3);
    assert_eq!(insights[2].kind, InsightKind::TransactionGrowth);
    assert_eq!(insights[2].text, "Este mês você tem 400% mais transações");
    assert_eq!(insights[2].detail, "5 transações vs 1 no mês passado");
}

// =============================================================================
// Budgets and anomalies
// =============================================================================

#[test]
fn test_budgets_and_anomaly_warning() {
    let mut ledger = march_history();
    ledger.set_budget("Alimentação", 160.0);
    ledger.set_budget("Transporte", 40.0);

    let progress = BudgetEngine::new(&ledger).budget_progress(Period::of(today()));
    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].category, "Transporte");
    assert_eq!(progress[0].status, BudgetStatus::Exceeded);
    assert_eq!(progress[1].status, BudgetStatus::Warning);
    assert_eq!(progress[1].remaining, 10.0);

    // Build enough history for one category, then check a large entry against it
    for day in 10..13 {
        add_expense(&mut ledger, 50.0, "Alimentação", date(2024, 3, day));
    }
    let anomaly = AnomalyDetector::new(&ledger)
        .check(200.0, "Alimentação", TransactionType::Expense)
        .expect("200 is well above the 60 average");
    assert_eq!(anomaly.avg, 60.0);
    assert_eq!(anomaly.diff_percent, 233);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_ledger_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("controlo.json");

    let mut ledger = march_history();
    ledger.set_budget("Lazer", 75.0);
    let wallet = ledger.add_wallet("Poupança", None, None);
    ledger.set_active_wallet(&wallet.id).unwrap();
    save_ledger(&ledger, &path).unwrap();

    let restored = load_ledger(&path).unwrap();
    assert_eq!(restored.transactions(), ledger.transactions());
    assert_eq!(restored.budgets().get("Lazer"), Some(&75.0));
    assert_eq!(restored.active_wallet().name, "Poupança");

    let locale = LocalePack::embedded();
    let before = AggregationEngine::with_today(&ledger, today()).last_6_months(&locale);
    let after = AggregationEngine::with_today(&restored, today()).last_6_months(&locale);
    assert_eq!(before, after);
}

#[test]
fn test_locale_override_changes_parsing() {
    let locale = LocalePack::from_toml_str(
        r#"
        [parser]
        fallback_category = "Diversos"

        [[parser.categories]]
        name = "Desporto"
        keywords = ["padel", "ginásio"]
        "#,
    )
    .unwrap();
    let ledger = Ledger::new();
    let parser = QuickEntryParser::with_today(&ledger, &locale, today());

    assert_eq!(parser.parse("padel 10").unwrap().category, "Desporto");
    // The override replaces the whole category table
    assert_eq!(parser.parse("almoço 10").unwrap().category, "Diversos");
    // Untouched keys keep their defaults
    assert_eq!(parser.parse("almoço 10 ontem").unwrap().date, date(2024, 3, 19));
}
