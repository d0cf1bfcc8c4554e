use super::*;
use crate::analysis::{AnalysisError, SAMPLE_SIZE};
use crate::db::MemoryRepository;
use crate::import::{ImportError, ImportForm};
use crate::testing::{FakeAnalyzer, FakeExtractor, ScriptedRandom, deck_named, png};
use crate::viewer::{Key, ViewMode};

type TestStore = DeckStore<MemoryRepository, ScriptedRandom>;

const ARCHIVE: &[u8] = b"zip";

fn loaded_store(decks: Vec<Deck>) -> TestStore {
    let mut store = DeckStore::new(MemoryRepository::with_decks(decks), ScriptedRandom::default());
    store.load();
    store
}

fn card_names(store: &TestStore, id: &DeckId) -> Vec<String> {
    store.collection().get(id).unwrap().cards.iter().map(|c| c.name.clone()).collect()
}

fn press(store: &mut TestStore, key: Key) -> Option<NavCommand> {
    store.handle_input(InputEvent::Key(key))
}

#[test]
fn test_select_shuffles_and_enters_browse() {
    let mut deck = deck_named("Tarot", 3);
    deck.start_shuffled = true;
    deck.start_in_browse = true;
    let id = deck.id;
    let mut store = DeckStore::new(MemoryRepository::with_decks(vec![deck]), ScriptedRandom::new([0, 0]));
    store.load();

    assert!(store.select_deck(&id));

    assert_eq!(store.view(), ViewState::Browse { deck: id, index: 0 });
    assert_eq!(card_names(&store, &id), ["card1.png", "card2.png", "card0.png"]);
    assert_eq!(store.repository().save_count(), 1);
}

#[test]
fn test_select_plain_deck_opens_grid_of_cards() {
    let deck = deck_named("Plain", 2);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.set_query("card1");

    assert!(store.select_deck(&id));
    assert_eq!(store.view().mode(), ViewMode::DeckOpen);
    assert_eq!(store.query(), "");
    assert_eq!(store.repository().save_count(), 0);
}

#[test]
fn test_select_unknown_deck_is_ignored() {
    let mut store = loaded_store(vec![]);
    assert!(!store.select_deck(&DeckId::generate()));
    assert_eq!(store.view(), ViewState::Grid);
}

#[test]
fn test_browse_in_empty_deck_stays_in_deck_view() {
    let mut deck = deck_named("Empty", 0);
    deck.start_in_browse = true;
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);

    store.select_deck(&id);
    assert_eq!(store.view(), ViewState::DeckOpen { deck: id });
}

#[test]
fn test_navigation_clamps_at_both_ends() {
    let deck = deck_named("Nav", 3);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.select_deck(&id);
    store.open_card(0);

    for _ in 0..5 {
        store.next();
    }
    assert_eq!(store.view().active_index(), Some(2));
    for _ in 0..5 {
        store.previous();
    }
    assert_eq!(store.view().active_index(), Some(0));
}

#[test]
fn test_open_card_out_of_range_is_ignored() {
    let deck = deck_named("Nav", 2);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.select_deck(&id);

    store.open_card(5);
    assert_eq!(store.view(), ViewState::DeckOpen { deck: id });
}

#[test]
fn test_keys_only_act_on_open_card() {
    let deck = deck_named("Keys", 3);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.select_deck(&id);

    assert_eq!(press(&mut store, Key::ArrowRight), None);
    assert_eq!(store.view(), ViewState::DeckOpen { deck: id });

    store.open_card(0);
    store.enter_browse();
    assert_eq!(press(&mut store, Key::ArrowRight), Some(NavCommand::Next));
    assert_eq!(press(&mut store, Key::Space), Some(NavCommand::Flip));
    assert!(store.active_card().unwrap().is_flipped);
    assert_eq!(store.active_card().unwrap().name, "card1.png");

    assert_eq!(press(&mut store, Key::Escape), Some(NavCommand::Escape));
    assert_eq!(store.view(), ViewState::Detail { deck: id, index: 1 });
    press(&mut store, Key::Escape);
    assert_eq!(store.view(), ViewState::DeckOpen { deck: id });
}

#[test]
fn test_swipe_navigates_open_card() {
    let deck = deck_named("Swipe", 3);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]).with_swipe_threshold(30.0);
    store.select_deck(&id);
    store.open_card(1);

    store.handle_input(InputEvent::TouchStart { x: 200.0 });
    store.handle_input(InputEvent::TouchMove { x: 150.0 });
    assert_eq!(store.handle_input(InputEvent::TouchEnd), Some(NavCommand::Next));
    assert_eq!(store.view().active_index(), Some(2));

    store.handle_input(InputEvent::TouchStart { x: 100.0 });
    store.handle_input(InputEvent::TouchMove { x: 120.0 });
    assert_eq!(store.handle_input(InputEvent::TouchEnd), None);
    assert_eq!(store.view().active_index(), Some(2));
}

#[test]
fn test_shuffle_with_open_card_restarts() {
    let deck = deck_named("Shuffle", 4);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.select_deck(&id);
    store.open_card(3);

    store.shuffle(&id);
    assert_eq!(store.view(), ViewState::Detail { deck: id, index: 0 });
    assert_eq!(store.repository().save_count(), 1);
}

#[test]
fn test_mutations_before_load_are_not_saved() {
    let mut store = DeckStore::new(MemoryRepository::new(), ScriptedRandom::default());
    let extractor = FakeExtractor::with_images(vec![png("a.png")]);
    store
        .import_archive(&extractor, Some(ARCHIVE), ImportForm::new(DeckSettings::named("Early")))
        .unwrap();
    assert_eq!(store.collection().len(), 1);
    assert_eq!(store.repository().save_count(), 0);

    store.load();
    assert!(store.collection().is_empty());
}

#[test]
fn test_every_change_after_load_saves_latest_snapshot() {
    let deck = deck_named("Saved", 2);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);

    store.set_title(&id, 0, "First");
    store.add_tag(&id, 1, "moon");
    assert_eq!(store.repository().save_count(), 2);

    let stored = store.repository().stored();
    assert_eq!(stored[0].cards[0].title, "First");
    assert!(stored[0].cards[1].tags.contains("moon"));
}

#[test]
fn test_noop_mutations_do_not_save() {
    let deck = deck_named("Quiet", 1);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);

    store.add_tag(&id, 0, "  ");
    store.remove_tag(&id, 0, "missing");
    store.set_title(&id, 7, "nowhere");
    store.clear_analysis(&id);
    assert_eq!(store.repository().save_count(), 0);
}

#[test]
fn test_load_runs_once() {
    let repo = MemoryRepository::with_decks(vec![deck_named("a", 1)]);
    let mut store = DeckStore::new(repo, ScriptedRandom::default());
    store.load();
    let id = store.collection().decks()[0].id;
    store.delete_deck(&id);
    store.load();
    assert!(store.collection().is_empty());
}

#[test]
fn test_failed_load_starts_empty() {
    let repo = MemoryRepository::with_decks(vec![deck_named("hidden", 1)]);
    repo.set_fail_load(true);
    let mut store = DeckStore::new(repo, ScriptedRandom::default());

    store.load();
    assert!(store.is_loaded());
    assert!(store.collection().is_empty());
}

#[test]
fn test_failed_save_keeps_state() {
    let deck = deck_named("Unsaved", 1);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.repository().set_fail_save(true);

    store.set_note(&id, 0, "still here");
    assert_eq!(store.collection().get(&id).unwrap().cards[0].note, "still here");
    assert_eq!(store.repository().save_count(), 0);
}

#[test]
fn test_delete_selected_deck_returns_to_grid() {
    let deck = deck_named("Doomed", 2);
    let id = deck.id;
    let mut store = loaded_store(vec![deck, deck_named("Survivor", 1)]);
    store.select_deck(&id);
    store.open_card(1);

    assert!(store.delete_deck(&id));
    assert_eq!(store.view(), ViewState::Grid);
    assert_eq!(store.collection().len(), 1);
    assert!(!store.delete_deck(&id));
}

#[test]
fn test_update_settings_validates() {
    let deck = deck_named("Named", 1);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);

    assert_eq!(
        store.update_deck_settings(&id, DeckSettings::named(" ")),
        Err(FormError::MissingName)
    );
    assert_eq!(store.repository().save_count(), 0);

    store.update_deck_settings(&id, DeckSettings::named("Renamed")).unwrap();
    assert_eq!(store.collection().get(&id).unwrap().name, "Renamed");
}

#[test]
fn test_visible_cards_follow_query() {
    let deck = deck_named("Search", 3);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    assert!(store.visible_cards().is_empty());

    store.select_deck(&id);
    store.add_tag(&id, 2, "sun");
    store.set_query("SUN");
    assert_eq!(&*store.visible_cards(), &[2]);

    store.set_query("");
    assert_eq!(&*store.visible_cards(), &[0, 1, 2]);
}

#[test]
fn test_import_prepends_new_deck() {
    let mut store = loaded_store(vec![deck_named("Old", 1)]);
    let extractor = FakeExtractor::with_images(vec![png("front1.png"), png("front2.png"), png("cardback.png")]);

    let id = store
        .import_archive(&extractor, Some(ARCHIVE), ImportForm::new(DeckSettings::named("Test")))
        .unwrap();

    assert_eq!(store.collection().decks()[0].id, id);
    assert_eq!(card_names(&store, &id), ["front1.png", "front2.png"]);
    assert!(!store.is_importing());
    assert_eq!(store.repository().stored().len(), 2);
}

#[test]
fn test_import_failures_leave_collection_untouched() {
    let mut store = loaded_store(vec![deck_named("Old", 1)]);
    let before = store.collection().clone();
    let form = || ImportForm::new(DeckSettings::named("New"));

    let empty = FakeExtractor::with_images(vec![]);
    assert!(matches!(store.import_archive(&empty, Some(ARCHIVE), form()), Err(ImportError::NoImages)));
    assert!(matches!(
        store.import_archive(&FakeExtractor::corrupt(), Some(ARCHIVE), form()),
        Err(ImportError::Archive(_))
    ));
    assert!(matches!(store.import_archive(&empty, None, form()), Err(ImportError::MissingArchive)));
    assert!(matches!(
        store.import_archive(&empty, Some(ARCHIVE), ImportForm::default()),
        Err(ImportError::Form(_))
    ));

    assert!(store.collection().same_snapshot(&before));
    assert!(!store.is_importing());
    assert_eq!(store.repository().save_count(), 0);
}

#[test]
fn test_second_import_is_rejected_while_busy() {
    let mut store = loaded_store(vec![]);
    let ticket = store.begin_import().unwrap();
    assert!(store.is_importing());
    assert!(matches!(store.begin_import(), Err(ImportError::Busy)));

    let id = store
        .complete_import(ticket, Ok(vec![png("a.png")]), ImportForm::new(DeckSettings::named("A")))
        .unwrap();
    assert!(!store.is_importing());
    assert!(store.collection().contains(&id));

    let ticket = store.begin_import().unwrap();
    store.abandon_import(ticket);
    assert!(!store.is_importing());
}

#[test]
fn test_analysis_stores_text() {
    let deck = deck_named("Critique", 8);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    let analyzer = FakeAnalyzer::replying("## Theme\nGood");

    store.analyze_deck(&id, &analyzer).unwrap();

    assert_eq!(store.collection().get(&id).unwrap().analysis.as_deref(), Some("## Theme\nGood"));
    assert_eq!(analyzer.calls()[0].2, SAMPLE_SIZE);
    assert!(!store.is_analyzing(&id));
    assert_eq!(store.repository().save_count(), 1);
}

#[test]
fn test_failed_analysis_keeps_previous_text() {
    let deck = deck_named("Keep", 1);
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);
    store.analyze_deck(&id, &FakeAnalyzer::replying("first")).unwrap();

    let failure = store.analyze_deck(&id, &FakeAnalyzer::failing("quota"));
    assert_eq!(failure, Err(AnalysisError::Failed("quota".into())));
    let blank = store.analyze_deck(&id, &FakeAnalyzer::replying(""));
    assert_eq!(blank, Err(AnalysisError::EmptyResponse));

    assert_eq!(store.collection().get(&id).unwrap().analysis.as_deref(), Some("first"));
    assert!(!store.is_analyzing(&id));
}

#[test]
fn test_analysis_preconditions() {
    let empty = deck_named("Empty", 0);
    let full = deck_named("Full", 2);
    let (empty_id, full_id) = (empty.id, full.id);
    let mut store = loaded_store(vec![empty, full]);

    let unknown = DeckId::generate();
    assert_eq!(store.begin_analysis(&unknown).unwrap_err(), AnalysisError::UnknownDeck(unknown));
    assert_eq!(store.begin_analysis(&empty_id).unwrap_err(), AnalysisError::EmptyDeck);

    let request = store.begin_analysis(&full_id).unwrap();
    assert!(store.is_analyzing(&full_id));
    assert_eq!(store.begin_analysis(&full_id).unwrap_err(), AnalysisError::InProgress(full_id));

    store.delete_deck(&full_id);
    assert_eq!(
        store.complete_analysis(request, Ok("late".into())),
        Err(AnalysisError::UnknownDeck(full_id))
    );
    assert!(!store.is_analyzing(&full_id));
}

#[test]
fn test_clear_analysis() {
    let mut deck = deck_named("Clear", 1);
    deck.analysis = Some("old".into());
    let id = deck.id;
    let mut store = loaded_store(vec![deck]);

    store.clear_analysis(&id);
    assert_eq!(store.collection().get(&id).unwrap().analysis, None);
    assert_eq!(store.repository().save_count(), 1);
}
