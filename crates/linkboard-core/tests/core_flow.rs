mod support;

use linkboard_core::render::EMPTY_COLUMN_PLACEHOLDER;
use linkboard_core::{
    Affordance, ColumnBody, FormMode, Intent, LinkField, Method, RemoteClient, TargetDescriptor,
    classify,
};
use support::{FakeCatalog, board};

fn seeded() -> std::rc::Rc<FakeCatalog> {
    let fake = FakeCatalog::with_categories(&["Favorites", "Reading"]);
    fake.insert_link_with_id(5, "docs", 1);
    fake.insert_link_with_id(9, "blog", 2);
    fake
}

#[tokio::test]
async fn load_renders_columns_and_preselects_first_category() {
    let fake = seeded();
    let board = board(&fake);

    board.load().await.expect("load board");

    let view = board.view();
    let titles: Vec<&str> = view.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Favorites", "Reading"]);
    assert_eq!(view.columns[0].rows()[0].link_id, 5);

    let form = board.form();
    assert_eq!(form.mode(), FormMode::Adding);
    assert_eq!(form.fields().category_id, "1");
    assert_eq!(form.submit_label(), "Add Link");
    assert!(board.message().is_none());
}

#[tokio::test]
async fn create_category_adds_an_empty_column() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.set_category_draft("  Tools ");
    let draft = board.category_draft();
    board.create_category(&draft).await.expect("create category");

    let snapshot = board.snapshot();
    let tools = snapshot
        .categories
        .iter()
        .find(|category| category.name == "Tools")
        .expect("Tools category present");
    assert_eq!(tools.id, 3);

    let column = board.view().columns.pop().expect("a column");
    assert_eq!(column.category_id, tools.id);
    assert_eq!(
        column.body,
        ColumnBody::Placeholder(EMPTY_COLUMN_PLACEHOLDER.to_string())
    );
    assert_eq!(board.category_draft(), "");
}

#[tokio::test]
async fn rejected_category_keeps_draft_and_surfaces_message() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.set_category_draft("Favorites");
    let err = board
        .create_category("Favorites")
        .await
        .expect_err("duplicate name");

    assert_eq!(err.message(), "Category already exists.");
    assert_eq!(board.message().as_deref(), Some("Category already exists."));
    assert_eq!(board.category_draft(), "Favorites");
    assert_eq!(board.snapshot().categories.len(), 2);
}

#[tokio::test]
async fn begin_edit_then_cancel_restores_adding() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    assert!(board.begin_edit(9));
    let form = board.form();
    assert_eq!(form.mode(), FormMode::Editing(9));
    assert_eq!(form.fields().name, "blog");
    assert_eq!(form.fields().category_id, "2");
    assert!(form.cancel_visible());

    board.cancel_edit();
    let form = board.form();
    assert_eq!(form.mode(), FormMode::Adding);
    assert_eq!(form.fields().name, "");
    assert_eq!(form.fields().category_id, "1");
    assert!(!form.cancel_visible());
}

#[tokio::test]
async fn begin_edit_of_missing_link_stays_put() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    assert!(!board.begin_edit(404));
    assert_eq!(board.mode(), FormMode::Adding);
}

#[tokio::test]
async fn submit_in_adding_mode_creates_link() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.set_field(LinkField::Name, "  Rust ");
    board.set_field(LinkField::Url, " https://rust-lang.org ");
    board.set_field(LinkField::Category, "2");
    board.submit_link().await.expect("create link");

    assert!(fake.calls().contains(&(Method::Post, "/api/links".to_string())));
    let view = board.view();
    let reading = &view.columns[1];
    let labels: Vec<&str> = reading.rows().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["blog", "Rust"]);
    assert_eq!(reading.rows()[1].href, "https://rust-lang.org");

    let form = board.form();
    assert_eq!(form.mode(), FormMode::Adding);
    assert_eq!(form.fields().name, "");
    assert_eq!(form.fields().category_id, "1");
}

#[tokio::test]
async fn submit_in_editing_mode_updates_link() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.begin_edit(5);
    board.set_field(LinkField::Name, "docs.rs");
    board.set_field(LinkField::Category, "2");
    board.submit_link().await.expect("update link");

    assert!(fake.calls().contains(&(Method::Put, "/api/links/5".to_string())));
    let view = board.view();
    assert!(view.columns[0].rows().is_empty());
    let moved = &view.columns[1].rows()[0];
    assert_eq!(moved.link_id, 5);
    assert_eq!(moved.label, "docs.rs");
    assert_eq!(board.mode(), FormMode::Adding);
}

#[tokio::test]
async fn failing_update_leaves_form_untouched() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");
    let before = board.snapshot();

    board.begin_edit(5);
    board.set_field(LinkField::Name, "typed name");
    board.set_field(LinkField::Category, "77");
    let err = board.submit_link().await.expect_err("unknown category");

    assert_eq!(err.message(), "Selected category does not exist.");
    assert_eq!(
        board.message().as_deref(),
        Some("Selected category does not exist.")
    );
    let form = board.form();
    assert_eq!(form.mode(), FormMode::Editing(5));
    assert_eq!(form.fields().name, "typed name");
    assert_eq!(form.fields().category_id, "77");
    assert_eq!(*board.snapshot(), *before);
}

#[tokio::test]
async fn missing_fields_are_reported_by_the_service() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.set_field(LinkField::Name, "   ");
    board.set_field(LinkField::Url, "https://example.com");
    let err = board.submit_link().await.expect_err("blank name");

    assert_eq!(err.message(), "Name, URL and category are required.");
    assert_eq!(board.form().fields().name, "   ");
}

#[tokio::test]
async fn deleting_the_edited_link_resets_the_form() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.begin_edit(5);
    assert_eq!(board.mode(), FormMode::Editing(5));

    board.delete_link(5).await.expect("delete link");

    let ids: Vec<i64> = board.snapshot().links.iter().map(|link| link.id).collect();
    assert_eq!(ids, [9]);
    assert_eq!(board.mode(), FormMode::Adding);
    assert_eq!(board.form().fields().name, "");
}

#[tokio::test]
async fn deleting_another_link_keeps_edit_mode() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    board.begin_edit(5);
    board.set_field(LinkField::Name, "half typed");
    board.delete_link(9).await.expect("delete link");

    let form = board.form();
    assert_eq!(form.mode(), FormMode::Editing(5));
    assert_eq!(form.fields().name, "half typed");
}

#[tokio::test]
async fn category_with_links_cannot_be_deleted() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    let err = board.delete_category(1).await.expect_err("category in use");
    assert_eq!(err.message(), "Move or delete links first.");
    assert_eq!(board.view().columns.len(), 2);

    board.delete_link(5).await.expect("delete link");
    assert!(board.message().is_none());
    board.delete_category(1).await.expect("delete empty category");

    let titles: Vec<String> = board.view().columns.into_iter().map(|c| c.title).collect();
    assert_eq!(titles, ["Reading"]);
    assert_eq!(board.form().fields().category_id, "2");
}

#[tokio::test]
async fn board_clicks_dispatch_exactly_one_operation() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    let edit = [
        TargetDescriptor::untagged(),
        TargetDescriptor::tagged(Affordance::EditLink, 9),
    ];
    board.dispatch(classify(&edit)).await.expect("edit");
    assert_eq!(board.mode(), FormMode::Editing(9));

    let calls_before = fake.calls().len();
    board.dispatch(Intent::None).await.expect("ignored click");
    assert_eq!(fake.calls().len(), calls_before);

    let delete = [TargetDescriptor::tagged(Affordance::DeleteLink, 9)];
    board.dispatch(classify(&delete)).await.expect("delete");
    assert_eq!(fake.link_ids(), [5]);
    assert_eq!(board.mode(), FormMode::Adding);
}

#[tokio::test]
async fn transport_failure_is_surfaced_and_success_clears_it() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    fake.fail_transport(Method::Delete, "/api/links/9", "connection refused");
    let err = board.delete_link(9).await.expect_err("no response");
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(board.message().as_deref(), Some("connection refused"));
    assert_eq!(board.snapshot().links.len(), 2);

    board.delete_link(9).await.expect("retry by hand");
    assert!(board.message().is_none());
}

#[tokio::test]
async fn unknown_route_yields_generic_message() {
    let fake = seeded();
    let board = board(&fake);
    board.load().await.expect("load board");

    let err = board.delete_category(0).await.expect_err("not found");
    assert_eq!(err.message(), "Category not found.");

    let err = board
        .api()
        .remote()
        .call("/api/nowhere", Method::Get, None)
        .await
        .expect_err("no such route");
    assert_eq!(err.message(), linkboard_core::remote::GENERIC_FAILURE_MESSAGE);
}
