//! End-to-end keyboard scenarios, first against the bare machine and then
//! through the application driven by a scripted key source.

use std::collections::BTreeMap;

use projectionist::config::Config;
use projectionist::db::MemorySongs;
use projectionist::input::{Effect, Key, KeyInput, KeySnapshot, KeyboardMachine, ScriptedKeys};
use projectionist::paging::{build_display_pages, current_verse_for_page, total_verses};
use projectionist::ui::{event_loop, App, LoadStatus};
use projectionist::Song;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn lines(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

#[test]
fn control_digits_then_release_loads_the_song() {
    let mut machine = KeyboardMachine::new();
    let snapshot = KeySnapshot::default();

    machine.key_down(Key::Control, true, &snapshot, None);
    for digit in ['2', '9', '4'] {
        let transition = machine.key_down(Key::Char(digit), true, &snapshot, None);
        assert!(transition.effects.is_empty());
        assert!(transition.prevent_default);
    }
    assert_eq!(machine.digit_buffer(), "294");

    let released = machine.key_up(Key::Control);
    assert_eq!(released.effects, vec![Effect::LoadSong(294)]);
    assert_eq!(machine.digit_buffer(), "");
}

#[test]
fn zero_then_right_arrow_leaves_the_chorus_for_the_next_verse() {
    let stanzas = vec![lines("v", 3), lines("c", 3), lines("w", 3)];
    let is_chorus = vec![false, true, false];
    // Single language, capacity 8: the chorus merges onto verse 1's page.
    let pagination = build_display_pages(&stanzas, 1, &is_chorus);
    assert_eq!(pagination.total_pages(), 2);

    let mut machine = KeyboardMachine::new();
    let mut snapshot = KeySnapshot {
        total_pages: pagination.total_pages(),
        current_page: 0,
        stanza_index_by_page: &pagination.stanza_index_by_page,
        first_stanza_index_by_page: &pagination.first_stanza_index_by_page,
        chorus_start_line_index_by_page: &pagination.chorus_start_line_index_by_page,
        is_chorus: &is_chorus,
        chorus_only: None,
        total_verses: total_verses(&is_chorus),
        current_verse: current_verse_for_page(0, &pagination.stanza_index_by_page, &is_chorus),
    };
    assert_eq!(snapshot.current_verse, 1);

    let zero = machine.key_down(Key::Char('0'), false, &snapshot, None);
    assert_eq!(
        zero.effects,
        vec![Effect::ChorusOnlyChange(Some(1)), Effect::ScrollToChorus]
    );

    snapshot.chorus_only = Some(projectionist::input::ChorusOnlyPosition {
        verse: 1,
        sub_page_count: 1,
        sub_page: 0,
    });
    let right = machine.key_down(Key::ArrowRight, false, &snapshot, None);
    let verse_two_page = pagination.first_page_of_stanza(2);
    assert_eq!(verse_two_page, Some(1));
    assert_eq!(
        right.effects,
        vec![Effect::ChorusOnlyChange(None), Effect::Navigate(1)]
    );
    assert!(right.prevent_default);
}

#[test]
fn scripted_session_through_the_event_loop() {
    let hymn = Song {
        source_id: 1,
        sequence_number: 294,
        titles: BTreeMap::from([(1, "Amazing Grace".to_string())]),
        stanzas: vec![lines("a", 8), lines("c", 2), lines("b", 3)],
        is_chorus: vec![false, true, false],
        languages: vec![1],
    };
    let other = Song {
        sequence_number: 12,
        stanzas: vec![lines("x", 2)],
        is_chorus: vec![false],
        languages: vec![1],
        ..hymn.clone()
    };
    let config = Config::default();
    let mut app = App::new(Box::new(MemorySongs::new([hymn, other])), &config);
    app.load_song(config.initial_song);
    assert_eq!(app.status(), &LoadStatus::Loaded);

    let mut script = vec![
        KeyInput::down(Key::ArrowRight, false),
        KeyInput::down(Key::ArrowRight, false),
        KeyInput::down(Key::Char('0'), false),
    ];
    script.extend([
        KeyInput::down(Key::Control, true),
        KeyInput::down(Key::Char('1'), true),
        KeyInput::down(Key::Char('2'), true),
        KeyInput::up(Key::Control),
        KeyInput::down(Key::Char('q'), false),
    ]);
    let mut keys = ScriptedKeys::new(script);
    let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();

    event_loop(&mut terminal, &mut app, &mut keys).unwrap();

    assert!(keys.is_exhausted());
    assert_eq!(app.song().sequence_number, 12);
    assert_eq!(app.current_page(), 0);
    assert_eq!(app.chorus_only_for_verse(), None);
}
