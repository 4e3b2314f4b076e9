#![forbid(unsafe_code)]

use kf_app::{AppConfig, AppError, Session, read_attachment};
use kf_core::DATA_FILE_NAME;
use kf_core::form::{CostFormValues, FormField};
use kf_core::taxonomy::{CostType, TaxonomyAction, default_taxonomy};
use std::path::Path;

fn config(root: &Path) -> AppConfig {
    AppConfig {
        data_dir: root.join("data"),
        export_dir: root.join("out"),
        log_filter: "debug".to_string(),
    }
}

fn read_persisted(root: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(root.join("data").join(DATA_FILE_NAME)).expect("read data");
    serde_json::from_str(&text).expect("parse data")
}

fn form() -> CostFormValues {
    CostFormValues {
        project_name: "Projekt Alfa".to_string(),
        agreement_number: "UMO-9".to_string(),
        cost_type: Some(CostType::Direct),
        direct_group: Some("INNE".to_string()),
        cost_category: "3.6".to_string(),
        notes: Some("Wyjazd na konferencję".to_string()),
        ..CostFormValues::default()
    }
}

#[test]
fn first_start_uses_default_taxonomy() {
    let root = tempfile::tempdir().expect("temp dir");
    let session = Session::start(&config(root.path()));
    assert_eq!(session.taxonomy(), &default_taxonomy());
    assert_eq!(session.form_defaults(), CostFormValues::default());
    assert!(!session.data_path().exists());
}

#[test]
fn every_accepted_action_is_persisted() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut session = Session::start(&config(root.path()));

    session
        .apply(&TaxonomyAction::AddGroup {
            section: CostType::Direct,
            name: "TESTY".to_string(),
        })
        .expect("add group");
    let state = session
        .apply(&TaxonomyAction::AddItem {
            section: CostType::Direct,
            group: "TESTY".to_string(),
            label: "Pierwszy test".to_string(),
        })
        .expect("add item");
    assert_eq!(state.direct.find_item("TESTY", "T.1").expect("item").label, "Pierwszy test");

    let persisted = read_persisted(root.path());
    assert_eq!(
        persisted["categories"]["DIRECT"]["groups"]["TESTY"][0]["id"],
        "T.1"
    );

    let restarted = Session::start(&config(root.path()));
    assert_eq!(restarted.taxonomy(), session.taxonomy());
}

#[test]
fn rejected_action_does_not_touch_disk() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut session = Session::start(&config(root.path()));

    let rejection = session
        .apply(&TaxonomyAction::DeleteItem {
            section: CostType::Indirect,
            group: "PODSTAWOWE".to_string(),
            item_id: "nope".to_string(),
        })
        .expect_err("unknown item");
    assert_eq!(rejection.code(), "UNKNOWN_ITEM");
    assert!(!session.data_path().exists());
}

#[test]
fn submit_writes_pdf_and_remembers_project() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut session = Session::start(&config(root.path()));

    let submission = session.submit(&form(), None).expect("submit");
    assert_eq!(submission.file_name, "koszt-UMO-9.pdf");
    assert!(!submission.merged);
    assert_eq!(submission.path, root.path().join("out").join("koszt-UMO-9.pdf"));
    assert_eq!(submission.next_form.project_name, "Projekt Alfa");
    assert_eq!(submission.next_form.cost_type, None);

    let bytes = std::fs::read(&submission.path).expect("read export");
    let doc = lopdf::Document::load_mem(&bytes).expect("load export");
    assert_eq!(doc.get_pages().len(), 1);

    let persisted = read_persisted(root.path());
    assert_eq!(persisted["lastProjectName"], "Projekt Alfa");
    assert_eq!(persisted["lastAgreementNumber"], "UMO-9");

    let restarted = Session::start(&config(root.path()));
    assert_eq!(restarted.form_defaults().agreement_number, "UMO-9");
}

#[test]
fn submit_with_attachment_merges_pages() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut session = Session::start(&config(root.path()));

    let first = session.submit(&form(), None).expect("first submit");
    let invoice = read_attachment(&first.path).expect("read invoice");
    let merged = session.submit(&form(), Some(invoice)).expect("merged submit");
    assert!(merged.merged);
    assert_eq!(merged.file_name, "koszt-UMO-9-z-faktura.pdf");

    let bytes = std::fs::read(&merged.path).expect("read merged");
    let doc = lopdf::Document::load_mem(&bytes).expect("load merged");
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn invalid_form_is_reported_per_field() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut session = Session::start(&config(root.path()));

    let mut values = form();
    values.cost_category.clear();
    match session.submit(&values, None) {
        Err(AppError::InvalidForm(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, FormField::CostCategory);
        }
        other => panic!("expected invalid form, got {other:?}"),
    }
    assert!(!root.path().join("out").exists());
}

#[test]
fn missing_attachment_path_is_skipped() {
    let root = tempfile::tempdir().expect("temp dir");
    assert!(read_attachment(&root.path().join("missing.pdf")).is_none());
}

#[test]
fn blocked_data_dir_starts_on_defaults() {
    let root = tempfile::tempdir().expect("temp dir");
    let blocker = root.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write blocker");
    let config = AppConfig {
        data_dir: blocker.join("data"),
        ..config(root.path())
    };

    let mut session = Session::start(&config);
    assert_eq!(session.taxonomy(), &default_taxonomy());

    let state = session
        .apply(&TaxonomyAction::AddGroup {
            section: CostType::Indirect,
            name: "DODATKOWE".to_string(),
        })
        .expect("accepted in memory");
    assert!(state.indirect.group("DODATKOWE").is_some());

    let outcome = session.save();
    assert!(!outcome.success);
    assert!(outcome.error.is_some());
}

#[test]
fn legacy_data_is_rewritten_at_start() {
    let root = tempfile::tempdir().expect("temp dir");
    let data_dir = root.path().join("data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");
    let legacy = serde_json::json!({
        "categories": {
            "INDIRECT": {
                "label": "KOSZTY POŚREDNIE",
                "items": [{ "id": "P1", "label": "Koszty OA" }]
            }
        },
        "lastProjectName": "Beta"
    });
    std::fs::write(data_dir.join(DATA_FILE_NAME), legacy.to_string()).expect("write legacy");

    let session = Session::start(&config(root.path()));
    assert_eq!(session.form_defaults().project_name, "Beta");

    let persisted = read_persisted(root.path());
    assert!(persisted["categories"]["INDIRECT"].get("items").is_none());
    assert_eq!(
        persisted["categories"]["INDIRECT"]["groups"]["PODSTAWOWE"][0]["label"],
        "Koszty OA"
    );
    assert_eq!(persisted["lastAgreementNumber"], "");
}
