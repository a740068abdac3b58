use fraudwatch::api::{CreateTransactionResponse, FraudCheck, SubmitOutcome, Transaction};
use fraudwatch::core::{FetchData, FetchEvent, FetchTarget};
use fraudwatch::{App, Config, Loadable, View};

use crossterm::event::{KeyCode, KeyEvent};
use fraudwatch::api::Account;

fn test_app() -> App {
    // Unroutable backend: requests are issued but never applied in tests
    let config = Config {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    App::new(config).unwrap()
}

fn tx(id: i64) -> Transaction {
    Transaction {
        transaction_id: id,
        transaction_date: "2025-11-02T14:30:00".to_string(),
        amount: 1500.0,
        currency: Some("RUB".to_string()),
        status: "completed".to_string(),
        is_flagged: false,
        fraud_score: Some(0.1),
        flagged_reason: None,
        sender_account: None,
        receiver_account: None,
        sender_first_name: "Иван".to_string(),
        sender_last_name: "Петров".to_string(),
        receiver_first_name: "Анна".to_string(),
        receiver_last_name: "Сидорова".to_string(),
    }
}

fn account(id: i64, balance: f64) -> Account {
    Account {
        account_id: id,
        account_number: format!("40817810{:012}", id),
        account_type: None,
        balance,
        currency: Some("RUB".to_string()),
        client_id: id * 10,
        first_name: "Тест".to_string(),
        last_name: format!("Клиент{}", id),
        risk_level: 0.0,
        is_blocked: false,
    }
}

#[tokio::test]
async fn test_switch_view_activates_exactly_one() {
    let mut app = test_app();

    for view in View::ALL {
        app.switch_view(view);
        assert_eq!(app.view, view);
    }
}

#[tokio::test]
async fn test_switch_view_triggers_loader() {
    let mut app = test_app();

    app.switch_view(View::Transactions);
    assert!(app.transactions.is_loading());
    assert!(app.scheduler.is_in_flight(FetchTarget::Transactions));
}

#[tokio::test]
async fn test_loaderless_view_fetches_nothing() {
    let mut app = test_app();

    app.switch_view(View::Reports);
    assert_eq!(app.view, View::Reports);
    assert_eq!(app.transactions, Loadable::Idle);
    assert!(!app.scheduler.is_in_flight(FetchTarget::Transactions));
}

#[tokio::test]
async fn test_digit_key_switches_view() {
    let mut app = test_app();

    app.handle_key(KeyEvent::from(KeyCode::Char('3')));
    assert_eq!(app.view, View::Flagged);
}

#[tokio::test]
async fn test_stale_response_is_fenced() {
    let mut app = test_app();

    let stale = app.scheduler.force_begin(FetchTarget::Transactions);
    let current = app.scheduler.force_begin(FetchTarget::Transactions);

    app.apply_event(FetchEvent::Loaded {
        target: FetchTarget::Transactions,
        seq: stale,
        data: FetchData::Transactions(vec![tx(1)]),
    });
    assert_eq!(app.transactions, Loadable::Idle);

    app.apply_event(FetchEvent::Loaded {
        target: FetchTarget::Transactions,
        seq: current,
        data: FetchData::Transactions(vec![tx(1), tx(2)]),
    });
    match &app.transactions {
        Loadable::Loaded(rows) => assert_eq!(rows.len(), 2),
        other => panic!("expected loaded rows, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_skips_in_flight_target() {
    let mut app = test_app();

    app.switch_view(View::Transactions);
    // A reload while the fetch is pending must not issue a second request
    assert!(app.scheduler.begin(FetchTarget::Transactions).is_none());
}

#[tokio::test]
async fn test_same_account_never_submits() {
    let mut app = test_app();

    app.accounts = Loadable::Loaded(vec![account(1, 5000.0), account(2, 100.0)]);
    app.form.sender_idx = Some(0);
    app.form.receiver_idx = Some(0);
    app.form.amount = "50".to_string();

    app.submit_form();

    assert!(!app.scheduler.is_in_flight(FetchTarget::Submit));
    assert!(!app.form.is_submitting());
    assert!(!app.notifications.active().is_empty());
}

#[tokio::test]
async fn test_over_balance_never_submits() {
    let mut app = test_app();

    app.accounts = Loadable::Loaded(vec![account(1, 500.0), account(2, 100.0)]);
    app.form.sender_idx = Some(0);
    app.form.receiver_idx = Some(1);
    app.form.amount = "10000".to_string();

    app.submit_form();

    assert!(!app.scheduler.is_in_flight(FetchTarget::Submit));
    assert!(!app.form.is_submitting());
}

#[tokio::test]
async fn test_valid_form_submits() {
    let mut app = test_app();

    app.accounts = Loadable::Loaded(vec![account(1, 5000.0), account(2, 100.0)]);
    app.form.sender_idx = Some(0);
    app.form.receiver_idx = Some(1);
    app.form.amount = "1000".to_string();

    app.submit_form();

    assert!(app.form.is_submitting());
    assert!(app.scheduler.is_in_flight(FetchTarget::Submit));
}

#[tokio::test]
async fn test_accepted_submission_clears_form_and_reloads_once() {
    let mut app = test_app();

    app.accounts = Loadable::Loaded(vec![account(1, 5000.0), account(2, 100.0)]);
    app.form.sender_idx = Some(0);
    app.form.receiver_idx = Some(1);
    app.form.amount = "1000".to_string();
    app.form.description = "аренда".to_string();
    app.submit_form();

    let seq = app
        .scheduler
        .force_begin(FetchTarget::Submit);
    let response = CreateTransactionResponse {
        success: true,
        transaction_id: 99,
        transaction_date: Some("2025-11-02T15:00:00".to_string()),
        status: "completed".to_string(),
        message: "Транзакция успешно выполнена".to_string(),
        fraud_check: FraudCheck {
            score: 0.1,
            is_flagged: false,
            reason: None,
            flags: vec![],
        },
    };
    app.apply_event(FetchEvent::Loaded {
        target: FetchTarget::Submit,
        seq,
        data: FetchData::Submission(SubmitOutcome::Accepted(response)),
    });

    // Submit control re-enabled, fields cleared
    assert!(!app.form.is_submitting());
    assert!(app.form.amount.is_empty());
    assert!(app.form.description.is_empty());

    // Exactly one reload of accounts and one of recent transactions
    assert!(app.scheduler.is_in_flight(FetchTarget::Accounts));
    assert!(app.scheduler.is_in_flight(FetchTarget::RecentTransactions));
    assert!(app.scheduler.begin(FetchTarget::Accounts).is_none());
    assert!(app.scheduler.begin(FetchTarget::RecentTransactions).is_none());
}

#[tokio::test]
async fn test_rejected_submission_keeps_fields_and_reenables() {
    let mut app = test_app();

    app.accounts = Loadable::Loaded(vec![account(1, 5000.0), account(2, 100.0)]);
    app.form.sender_idx = Some(0);
    app.form.receiver_idx = Some(1);
    app.form.amount = "1000".to_string();
    app.submit_form();

    let seq = app.scheduler.force_begin(FetchTarget::Submit);
    app.apply_event(FetchEvent::Loaded {
        target: FetchTarget::Submit,
        seq,
        data: FetchData::Submission(SubmitOutcome::Rejected {
            error: "Transaction blocked".to_string(),
            reason: Some("Sender client is blocked".to_string()),
        }),
    });

    assert!(!app.form.is_submitting());
    assert_eq!(app.form.amount, "1000");
    assert!(!app.scheduler.is_in_flight(FetchTarget::Accounts));
}

#[tokio::test]
async fn test_transport_failure_reenables_submit() {
    let mut app = test_app();

    app.accounts = Loadable::Loaded(vec![account(1, 5000.0), account(2, 100.0)]);
    app.form.sender_idx = Some(0);
    app.form.receiver_idx = Some(1);
    app.form.amount = "1000".to_string();
    app.submit_form();

    let seq = app.scheduler.force_begin(FetchTarget::Submit);
    app.apply_event(FetchEvent::Failed {
        target: FetchTarget::Submit,
        seq,
        error: "Ошибка при выполнении транзакции".to_string(),
    });

    assert!(!app.form.is_submitting());
    assert!(!app.notifications.active().is_empty());
}

#[tokio::test]
async fn test_detail_popup_opens_and_closes() {
    let mut app = test_app();

    app.switch_view(View::Transactions);
    let seq = app.scheduler.force_begin(FetchTarget::Transactions);
    app.apply_event(FetchEvent::Loaded {
        target: FetchTarget::Transactions,
        seq,
        data: FetchData::Transactions(vec![tx(7)]),
    });

    app.handle_key(KeyEvent::from(KeyCode::Enter));
    assert!(app.popup.is_some());
    assert!(app.scheduler.is_in_flight(FetchTarget::TransactionDetail));

    app.handle_key(KeyEvent::from(KeyCode::Esc));
    assert!(app.popup.is_none());
}

#[tokio::test]
async fn test_error_failure_renders_error_state() {
    let mut app = test_app();

    let seq = app.scheduler.force_begin(FetchTarget::Clients);
    app.apply_event(FetchEvent::Failed {
        target: FetchTarget::Clients,
        seq,
        error: "Ошибка загрузки данных".to_string(),
    });

    assert_eq!(
        app.clients,
        Loadable::Error("Ошибка загрузки данных".to_string())
    );
}
