mod common;

use std::sync::Arc;

use common::{invoice, test_config, PageScript, ScriptedPage, ScriptedSolver};
use invoice_lookup::services::portal_selectors::INVOICE_NUMBER_INPUT;
use invoice_lookup::{process_invoices, InvoiceFlow, OutcomeStatus};

#[tokio::test]
async fn test_one_outcome_per_invoice_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let flow = InvoiceFlow::new(&test_config(dir.path()), Arc::new(ScriptedSolver::fixed()));
    let page = ScriptedPage::new([
        PageScript::Success,
        PageScript::CaptchaIncorrect,
        PageScript::Success,
        PageScript::Success,
    ]);
    let invoices = vec![invoice("1"), invoice("2"), invoice("3")];

    let outcomes = process_invoices(&page, &flow, &invoices, true).await;

    assert_eq!(outcomes.len(), 3);
    let numbers: Vec<_> = outcomes.iter().map(|o| o.invoice.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3"]);
    assert!(outcomes.iter().all(|o| o.status == OutcomeStatus::Ok));
    assert_eq!(outcomes[1].attempts, 2);
}

#[tokio::test]
async fn test_stops_after_first_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let flow = InvoiceFlow::new(&test_config(dir.path()), Arc::new(ScriptedSolver::fixed()));
    let page = ScriptedPage::new([PageScript::Success, PageScript::NotFound]);
    let invoices = vec![invoice("1"), invoice("2"), invoice("3"), invoice("4")];

    let outcomes = process_invoices(&page, &flow, &invoices, true).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, OutcomeStatus::Ok);
    assert_eq!(outcomes[1].status, OutcomeStatus::NotFound);
    assert_eq!(outcomes[1].invoice, "2");

    // 后面的发票从未填写到页面上
    assert_eq!(page.typed_into(&INVOICE_NUMBER_INPUT), vec!["1", "2"]);
}

#[tokio::test]
async fn test_continues_past_not_found_when_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let flow = InvoiceFlow::new(&test_config(dir.path()), Arc::new(ScriptedSolver::fixed()));
    let page = ScriptedPage::new([PageScript::NotFound, PageScript::Success]);
    let invoices = vec![invoice("1"), invoice("2")];

    let outcomes = process_invoices(&page, &flow, &invoices, false).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, OutcomeStatus::NotFound);
    assert_eq!(outcomes[1].status, OutcomeStatus::Ok);
}

#[tokio::test]
async fn test_failed_invoice_does_not_stop_batch() {
    let dir = tempfile::tempdir().unwrap();
    let flow = InvoiceFlow::new(&test_config(dir.path()), Arc::new(ScriptedSolver::fixed()));
    let mut script = vec![PageScript::CaptchaIncorrect; 3];
    script.push(PageScript::Success);
    let page = ScriptedPage::new(script);
    let invoices = vec![invoice("1"), invoice("2")];

    let outcomes = process_invoices(&page, &flow, &invoices, true).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, OutcomeStatus::Error);
    assert_eq!(outcomes[1].status, OutcomeStatus::Ok);
}

#[tokio::test]
async fn test_empty_batch() {
    let dir = tempfile::tempdir().unwrap();
    let flow = InvoiceFlow::new(&test_config(dir.path()), Arc::new(ScriptedSolver::fixed()));
    let page = ScriptedPage::succeeding();

    assert!(process_invoices(&page, &flow, &[], true).await.is_empty());
}
