use assert_float_eq::assert_float_absolute_eq;

use split_bill_rs::interface::render_result;
use split_bill_rs::models::Theme;
use split_bill_rs::{Action, Session};

fn filled(session: Session, entries: &[(&str, f64)]) -> Session {
    let mut session = session;
    for (name, price) in entries {
        session = session.apply(Action::AddItem);
        let id = session.items().last().unwrap().id;
        session = session
            .apply(Action::UpdateName(id, name.to_string()))
            .apply(Action::UpdatePrice(id, *price));
    }
    session
}

#[test]
fn test_form_flow_with_surcharge() {
    let session = Session::new();
    let blank_ids: Vec<_> = session.items().iter().map(|i| i.id).collect();
    let session = blank_ids
        .into_iter()
        .fold(session, |s, id| s.apply(Action::RemoveItem(id)));
    assert!(session.items().is_empty());

    let session = filled(session, &[("Coffee", 20000.0), ("Tea", 10000.0)])
        .apply(Action::SetTotalPaid(33000.0))
        .apply(Action::Calculate);

    let rows = session.result().unwrap();
    assert_eq!(rows.len(), 2);
    assert_float_absolute_eq!(rows[0].final_price, 22000.0, 1e-6);
    assert_float_absolute_eq!(rows[1].final_price, 11000.0, 1e-6);

    let text = render_result(rows, &session.summary());
    assert!(text.contains("Surcharge of Rp 3.000 (10.0%)"));
}

#[test]
fn test_blank_rows_are_placeholder_items() {
    let session = filled(Session::new(), &[("Cake", 15000.0)]).apply(Action::Calculate);
    let rows = session.result().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Item");
    assert_eq!(rows[0].percentage, 0.0);
    assert_eq!(rows[2].name, "Cake");
    assert_eq!(rows[2].percentage, 100.0);
}

#[test]
fn test_reset_after_calculation() {
    let session = filled(Session::new(), &[("Coffee", 20000.0)])
        .apply(Action::SetTotalPaid(27000.0))
        .apply(Action::Calculate)
        .apply(Action::ToggleTheme)
        .apply(Action::Reset);

    assert_eq!(session.items().len(), 2);
    assert!(session.items().iter().all(|i| i.name.is_empty() && i.price == 0.0));
    assert_eq!(session.total_paid(), 0.0);
    assert!(session.result().is_none());
    assert_eq!(session.theme(), Theme::Light);
}

#[test]
fn test_edits_do_not_clear_previous_result() {
    let session = filled(Session::new(), &[("Coffee", 20000.0)]).apply(Action::Calculate);
    let before = session.result().unwrap().to_vec();

    let id = session.items()[0].id;
    let session = session
        .apply(Action::AddItem)
        .apply(Action::UpdatePrice(id, 5000.0));
    assert_eq!(session.result().unwrap(), before.as_slice());

    // The rows and their summary still describe the same calculation.
    let summary = session.result_summary().unwrap();
    let original: f64 = before.iter().map(|r| r.original_price).sum();
    assert_float_absolute_eq!(summary.subtotal, original, 1e-6);
    assert_float_absolute_eq!(session.summary().subtotal, original + 5000.0, 1e-6);
}
