use std::sync::Once;

use blog_core::{update, BlogState, Msg, SectionInput, DEFAULT_MODEL};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[test]
fn new_state_is_empty() {
    init_logging();
    let state = BlogState::new();

    assert_eq!(state.input().title, "");
    assert!(state.input().sections.is_empty());
    assert!(state.output().sections.is_empty());
    assert!(state.output().images.is_empty());
}

#[test]
fn adding_a_section_appends_one_default_entry() {
    init_logging();
    let (state, _) = update(BlogState::new(), Msg::SectionAdded);
    let (state, _) = update(
        state,
        Msg::SectionTitleChanged {
            index: 0,
            title: "Beaches".to_string(),
        },
    );

    let (mut state, effects) = update(state, Msg::SectionAdded);

    assert!(effects.is_empty());
    assert_eq!(state.input().sections.len(), 2);
    assert_eq!(
        state.input().sections[1],
        SectionInput {
            title: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    );
    assert_eq!(DEFAULT_MODEL, "gemini");
    assert!(state.consume_dirty());
}

#[test]
fn edits_are_accepted_without_validation() {
    init_logging();
    let (state, _) = update(BlogState::new(), Msg::TitleChanged(String::new()));
    let (state, _) = update(state, Msg::SectionAdded);
    let (state, _) = update(state, Msg::SectionAdded);
    let (state, _) = update(
        state,
        Msg::SectionTitleChanged {
            index: 0,
            title: "Food".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::SectionTitleChanged {
            index: 1,
            title: "Food".to_string(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::SectionModelChanged {
            index: 1,
            model: "no-such-model".to_string(),
        },
    );

    assert!(effects.is_empty());
    let sections = &state.input().sections;
    assert_eq!(sections[0].title, "Food");
    assert_eq!(sections[1].title, "Food");
    assert_eq!(sections[0].model, "gemini");
    assert_eq!(sections[1].model, "no-such-model");
}

#[test]
fn title_change_marks_dirty_and_shows_in_view() {
    init_logging();
    let (mut state, _) = update(BlogState::new(), Msg::TitleChanged("Goa".to_string()));

    assert_eq!(state.view().title, "Goa");
    assert!(state.view().dirty);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn out_of_range_edits_are_ignored() {
    init_logging();
    let (mut state, _) = update(BlogState::new(), Msg::SectionAdded);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::SectionTitleChanged {
            index: 5,
            title: "nope".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::SectionModelChanged {
            index: 1,
            model: "gpt".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.input().sections.len(), 1);
}

#[test]
fn view_lists_section_inputs_in_order() {
    init_logging();
    let (state, _) = update(BlogState::new(), Msg::SectionAdded);
    let (state, _) = update(state, Msg::SectionAdded);
    let (state, _) = update(
        state,
        Msg::SectionModelChanged {
            index: 1,
            model: "gpt".to_string(),
        },
    );

    let view = state.view();
    let models: Vec<_> = view.inputs.iter().map(|s| s.model.as_str()).collect();
    let indices: Vec<_> = view.inputs.iter().map(|s| s.index).collect();
    assert_eq!(models, vec!["gemini", "gpt"]);
    assert_eq!(indices, vec![0, 1]);
    assert!(view.sections.is_empty());
}
