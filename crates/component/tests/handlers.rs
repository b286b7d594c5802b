//! End-to-end IQ dispatch tests against a real database:
//! - Update / query / unregister round trips
//! - Validation failures leaving state untouched
//! - Storage faults mapped to `internal-server-error`

use assert_matches::assert_matches;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use channelpush_component::config::ComponentConfig;
use channelpush_component::router::{REGISTER_NS, SETTINGS_NS};
use channelpush_component::stanza::{Element, ErrorCondition, Iq, IqType, StanzaError};
use channelpush_component::state::Component;
use channelpush_db::repositories::NotificationSettingsRepo;

const ALICE: &str = "alice@example.org/balcony";
const ALICE_BARE: &str = "alice@example.org";
const COMPONENT: &str = "push.localhost";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn component(pool: SqlitePool) -> Component {
    Component::new(
        pool,
        ComponentConfig {
            domain: COMPONENT.to_string(),
            database_url: "sqlite::memory:".to_string(),
        },
    )
}

fn settings_payload(fields: &[(&str, &str)]) -> Element {
    let mut settings = Element::new("notificationSettings");
    for (name, value) in fields {
        settings.add_child(Element::new(*name).with_text(*value));
    }
    Element::new("query")
        .with_attr("xmlns", SETTINGS_NS)
        .with_child(settings)
}

fn update_iq(fields: &[(&str, &str)]) -> Iq {
    Iq::request(IqType::Set, ALICE, COMPONENT, "iq-1", settings_payload(fields))
}

fn query_iq(fields: &[(&str, &str)]) -> Iq {
    Iq::request(IqType::Get, ALICE, COMPONENT, "iq-2", settings_payload(fields))
}

fn register_iq(payload: Element) -> Iq {
    Iq::request(IqType::Set, ALICE, COMPONENT, "iq-3", payload)
}

fn settings_container(response: &Iq) -> &Element {
    response
        .payload
        .as_ref()
        .expect("result should carry a query payload")
        .child("notificationSettings")
        .expect("query payload should carry a settings container")
}

fn field_text<'a>(container: &'a Element, name: &str) -> &'a str {
    container
        .child(name)
        .unwrap_or_else(|| panic!("missing field {name}"))
        .text()
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_creates_row_and_echoes_merged_settings(pool: SqlitePool) {
    let component = component(pool.clone());

    let response = component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;

    assert_eq!(response.kind, IqType::Result);
    let container = settings_container(&response);
    assert_eq!(field_text(container, "type"), "channel");
    assert_eq!(field_text(container, "postAfterMe"), "true");
    assert_eq!(field_text(container, "postMentionedMe"), "false");
    assert_eq!(field_text(container, "postOnMyChannel"), "false");
    assert_eq!(field_text(container, "postOnSubscribedChannel"), "false");
    assert_eq!(field_text(container, "followMyChannel"), "false");
    assert_eq!(field_text(container, "followRequest"), "false");

    // Rows are keyed by the bare sender address.
    let row = NotificationSettingsRepo::get_by_category(&pool, ALICE_BARE, "channel")
        .await
        .unwrap()
        .expect("row should have been created");
    assert!(row.post_after_me);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_preserves_fields_it_does_not_specify(pool: SqlitePool) {
    let component = component(pool.clone());
    component
        .handle_iq(&update_iq(&[
            ("type", "channel"),
            ("postAfterMe", "true"),
            ("followRequest", "true"),
        ]))
        .await;

    let response = component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "false")]))
        .await;

    assert_eq!(response.kind, IqType::Result);
    let container = settings_container(&response);
    assert_eq!(field_text(container, "postAfterMe"), "false");
    assert_eq!(field_text(container, "followRequest"), "true");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_without_settings_container_is_unsupported(pool: SqlitePool) {
    let component = component(pool.clone());
    let bare_query = Element::new("query").with_attr("xmlns", SETTINGS_NS);

    let response = component
        .handle_iq(&Iq::request(IqType::Set, ALICE, COMPONENT, "iq-1", bare_query))
        .await;

    assert_eq!(response.kind, IqType::Error);
    assert_matches!(
        response.error,
        Some(StanzaError {
            condition: ErrorCondition::FeatureNotImplemented
        })
    );
    let rows = NotificationSettingsRepo::list_for_owner(&pool, ALICE_BARE)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_without_category_is_unsupported(pool: SqlitePool) {
    let component = component(pool.clone());

    let response = component
        .handle_iq(&update_iq(&[("postAfterMe", "true")]))
        .await;

    assert_eq!(response.kind, IqType::Error);
    assert_matches!(
        response.error,
        Some(StanzaError {
            condition: ErrorCondition::FeatureNotImplemented
        })
    );
    let rows = NotificationSettingsRepo::list_for_owner(&pool, ALICE_BARE)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_query_returns_one_container_per_category(pool: SqlitePool) {
    let component = component(pool);
    component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;
    component
        .handle_iq(&update_iq(&[("type", "media"), ("followRequest", "true")]))
        .await;

    let response = component.handle_iq(&query_iq(&[])).await;

    assert_eq!(response.kind, IqType::Result);
    let payload = response.payload.as_ref().unwrap();
    assert_eq!(payload.children().len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_query_by_category_returns_that_category(pool: SqlitePool) {
    let component = component(pool);
    component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;
    component
        .handle_iq(&update_iq(&[("type", "media"), ("followRequest", "true")]))
        .await;

    let response = component.handle_iq(&query_iq(&[("type", "media")])).await;

    let payload = response.payload.as_ref().unwrap();
    assert_eq!(payload.children().len(), 1);
    let container = settings_container(&response);
    assert_eq!(field_text(container, "type"), "media");
    assert_eq!(field_text(container, "followRequest"), "true");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_query_with_nothing_stored_returns_empty_container(pool: SqlitePool) {
    let component = component(pool);

    let response = component.handle_iq(&query_iq(&[])).await;

    assert_eq!(response.kind, IqType::Result);
    let container = settings_container(&response);
    assert!(container.children().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_query_for_absent_category_returns_empty_container(pool: SqlitePool) {
    let component = component(pool);
    component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;

    let response = component.handle_iq(&query_iq(&[("type", "media")])).await;

    assert_eq!(response.kind, IqType::Result);
    let container = settings_container(&response);
    assert!(container.children().is_empty());
}

// ---------------------------------------------------------------------------
// Unregister
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_unregister_without_remove_marker_leaves_rows_untouched(pool: SqlitePool) {
    let component = component(pool.clone());
    component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;

    let payload = Element::new("query").with_attr("xmlns", REGISTER_NS);
    let response = component.handle_iq(&register_iq(payload)).await;

    assert_eq!(response.kind, IqType::Error);
    assert_matches!(
        response.error,
        Some(StanzaError {
            condition: ErrorCondition::FeatureNotImplemented
        })
    );
    let rows = NotificationSettingsRepo::list_for_owner(&pool, ALICE_BARE)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unregister_removes_every_category_and_is_idempotent(pool: SqlitePool) {
    let component = component(pool.clone());
    component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;
    component
        .handle_iq(&update_iq(&[("type", "media"), ("followRequest", "true")]))
        .await;

    let payload = Element::new("query")
        .with_attr("xmlns", REGISTER_NS)
        .with_child(Element::new("remove"));
    let response = component.handle_iq(&register_iq(payload.clone())).await;

    assert_eq!(response.kind, IqType::Result);
    assert!(response.payload.is_none());
    let rows = NotificationSettingsRepo::list_for_owner(&pool, ALICE_BARE)
        .await
        .unwrap();
    assert!(rows.is_empty());

    // Nothing left to delete is still success.
    let response = component.handle_iq(&register_iq(payload)).await;
    assert_eq!(response.kind, IqType::Result);
}

// ---------------------------------------------------------------------------
// Dispatch and failure mapping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_namespace_is_unsupported(pool: SqlitePool) {
    let component = component(pool);
    let payload = Element::new("query").with_attr("xmlns", "jabber:iq:version");

    let response = component
        .handle_iq(&Iq::request(IqType::Get, ALICE, COMPONENT, "iq-9", payload))
        .await;

    assert_eq!(response.kind, IqType::Error);
    assert_matches!(
        response.error,
        Some(StanzaError {
            condition: ErrorCondition::FeatureNotImplemented
        })
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_storage_fault_maps_to_internal_server_error(
    pool_opts: SqlitePoolOptions,
    connect_opts: SqliteConnectOptions,
) {
    let pool = pool_opts.connect_with(connect_opts.clone()).await.unwrap();
    let component = component(pool.clone());
    component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "true")]))
        .await;

    // Simulate a storage fault: every statement on a closed pool errors.
    pool.close().await;
    let response = component
        .handle_iq(&update_iq(&[("type", "channel"), ("postAfterMe", "false")]))
        .await;

    assert_eq!(response.kind, IqType::Error);
    assert_matches!(
        response.error,
        Some(StanzaError {
            condition: ErrorCondition::InternalServerError
        })
    );

    // A fresh connection sees the pre-update row unchanged.
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_opts)
        .await
        .unwrap();
    let row = NotificationSettingsRepo::get_by_category(&pool, ALICE_BARE, "channel")
        .await
        .unwrap()
        .expect("row should survive the failed update");
    assert!(row.post_after_me);
}
