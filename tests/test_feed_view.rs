mod helpers;

use helpers::{sample_api, test_notes};
use minix::application::{Document, FeedView, Settled, Target};
use minix::domain::NoteUpsert;
use minix::util::testing::{ApiCall, Endpoint, MockNotesApi};

#[tokio::test]
async fn given_service_with_notes_when_mounting_then_loads_feed_for_user() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();

    // Act
    let view = FeedView::mount(mock.clone(), 1, &document).await;

    // Assert
    assert!(!view.is_loading());
    assert_eq!(view.notes().len(), 3);
    assert_eq!(mock.calls(), vec![ApiCall::ListByUser(1)]);
}

#[tokio::test]
async fn given_whitespace_draft_when_submitting_then_sends_nothing_and_keeps_draft() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.set_composer("   \n ");

    // Act
    let settled = view.submit_create().await;

    // Assert
    assert_eq!(settled, Settled::Skipped);
    assert_eq!(view.composer(), "   \n ");
    assert_eq!(mock.calls(), vec![ApiCall::ListByUser(1)]);
}

#[tokio::test]
async fn given_draft_when_submitting_then_creates_reloads_and_clears() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.set_composer("Hello world");

    // Act
    let settled = view.submit_create().await;

    // Assert
    assert_eq!(settled, Settled::Applied);
    assert_eq!(view.composer(), "");
    assert_eq!(
        mock.calls(),
        vec![
            ApiCall::ListByUser(1),
            ApiCall::Upsert(NoteUpsert::create("Hello world")),
            ApiCall::ListByUser(1),
        ]
    );
    assert_eq!(view.notes().len(), 4);
}

#[tokio::test]
async fn given_create_failure_when_submitting_then_keeps_draft_without_reload() {
    // Arrange
    let mock = sample_api().with_upsert_failure().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.set_composer("Hello world");

    // Act
    let settled = view.submit_create().await;

    // Assert
    assert_eq!(settled, Settled::Failed);
    assert_eq!(view.composer(), "Hello world");
    assert_eq!(mock.calls().len(), 2);
}

#[tokio::test]
async fn given_tagged_note_when_entering_edit_then_seeds_hashtags_and_hides_chips() {
    // Arrange
    let document = Document::new();
    let mut view = FeedView::mount(sample_api().build(), 1, &document).await;

    // Act
    let started = view.begin_edit(test_notes::TAGGED);

    // Assert
    assert!(started);
    assert_eq!(view.editing(), Some(test_notes::TAGGED));
    assert_eq!(view.edit_draft(), "Hello #a #b");
    assert!(!view.tags_visible(test_notes::TAGGED));
    assert!(view.tags_visible(test_notes::MULTILINE));
}

#[tokio::test]
async fn given_edit_in_progress_when_cancelling_then_restores_chips_without_request() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.begin_edit(test_notes::TAGGED);
    view.set_edit_draft("changed");

    // Act
    view.cancel_edit();

    // Assert
    assert_eq!(view.editing(), None);
    assert_eq!(view.edit_draft(), "");
    assert!(view.tags_visible(test_notes::TAGGED));
    assert_eq!(mock.calls(), vec![ApiCall::ListByUser(1)]);
}

#[tokio::test]
async fn given_edit_when_submitting_then_stores_blob_verbatim_and_reloads() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.begin_edit(test_notes::TAGGED);

    // Act
    let settled = view.submit_edit().await;

    // Assert
    assert_eq!(settled, Settled::Applied);
    assert_eq!(view.editing(), None);
    assert!(view.tags_visible(test_notes::TAGGED));
    assert_eq!(
        mock.calls()[1],
        ApiCall::Upsert(NoteUpsert::edit(test_notes::TAGGED, "Hello #a #b"))
    );
    assert_eq!(mock.calls().len(), 3);
    let edited = view.note(test_notes::TAGGED).expect("note still listed");
    assert_eq!(edited.notes, "Hello #a #b");
}

#[tokio::test]
async fn given_edit_failure_when_submitting_then_exits_edit_without_reload() {
    // Arrange
    let mock = sample_api().with_upsert_failure().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.begin_edit(test_notes::TAGGED);

    // Act
    let settled = view.submit_edit().await;

    // Assert
    assert_eq!(settled, Settled::Failed);
    assert_eq!(view.editing(), None);
    assert!(view.tags_visible(test_notes::TAGGED));
    assert_eq!(mock.calls().len(), 2);
}

#[tokio::test]
async fn given_note_when_deleting_then_issues_delete_and_reloads() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;

    // Act
    let settled = view.delete(test_notes::TAGGED).await;

    // Assert
    assert_eq!(settled, Settled::Applied);
    assert_eq!(mock.calls()[1], ApiCall::Delete(test_notes::TAGGED));
    assert!(view.note(test_notes::TAGGED).is_none());
}

#[tokio::test]
async fn given_delete_failure_when_deleting_then_menu_stays_open() {
    // Arrange
    let mock = sample_api().with_delete_failure().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    view.toggle_menu(test_notes::TAGGED);

    // Act
    let settled = view.delete(test_notes::TAGGED).await;

    // Assert
    assert_eq!(settled, Settled::Failed);
    assert!(view.is_menu_open(test_notes::TAGGED));
    assert_eq!(view.notes().len(), 3);
    assert_eq!(mock.calls().len(), 2);
}

#[tokio::test]
async fn given_open_menus_when_clicking_outside_then_closes_all_at_once() {
    // Arrange
    let document = Document::new();
    let mut view = FeedView::mount(sample_api().build(), 1, &document).await;
    view.toggle_menu(test_notes::TAGGED);
    view.toggle_menu(test_notes::MULTILINE);
    assert_eq!(view.open_menus().len(), 2);

    // Act
    document.pointer_down(Target::Outside);
    let handled = view.pump_pointer_events();

    // Assert
    assert_eq!(handled, 1);
    assert!(view.open_menus().is_empty());
}

#[tokio::test]
async fn given_menu_when_toggling_twice_then_other_menus_unaffected() {
    let document = Document::new();
    let mut view = FeedView::mount(sample_api().build(), 1, &document).await;
    view.toggle_menu(test_notes::MULTILINE);

    view.toggle_menu(test_notes::TAGGED);
    assert_eq!(view.open_menus(), vec![test_notes::TAGGED, test_notes::MULTILINE]);
    view.toggle_menu(test_notes::TAGGED);

    assert_eq!(view.open_menus(), vec![test_notes::MULTILINE]);
}

#[tokio::test]
async fn given_reload_failure_when_loading_then_keeps_previous_notes() {
    // Arrange
    let mock = sample_api().build();
    let document = Document::new();
    let mut view = FeedView::mount(mock.clone(), 1, &document).await;
    mock.set_failing(Endpoint::List, true);

    // Act
    let settled = view.load().await;

    // Assert
    assert_eq!(settled, Settled::Failed);
    assert_eq!(view.notes().len(), 3);
}

#[tokio::test]
async fn given_two_views_on_one_document_when_one_unmounts_then_other_still_listens() {
    let document = Document::new();
    let first = FeedView::mount(MockNotesApi::builder().build(), 1, &document).await;
    let mut second = FeedView::mount(sample_api().build(), 1, &document).await;
    second.toggle_menu(test_notes::TAGGED);

    first.unmount();
    let delivered = document.pointer_down(Target::Outside);
    second.pump_pointer_events();

    assert_eq!(delivered, 1);
    assert!(!second.is_menu_open(test_notes::TAGGED));
}
