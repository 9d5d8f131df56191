use crate::view_model::Notice;
use crate::{BlogState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BlogState, msg: Msg) -> (BlogState, Vec<Effect>) {
    let effects = match msg {
        Msg::TitleChanged(title) => {
            state.set_title(title);
            Vec::new()
        }
        Msg::SectionAdded => {
            state.push_section();
            Vec::new()
        }
        Msg::SectionTitleChanged { index, title } => {
            state.set_section_title(index, title);
            Vec::new()
        }
        Msg::SectionModelChanged { index, model } => {
            state.set_section_model(index, model);
            Vec::new()
        }
        Msg::GenerateSectionClicked { index } => match state.begin_section(index) {
            Some(job) => vec![Effect::GenerateSection(job)],
            None => Vec::new(),
        },
        Msg::GenerateAllClicked => {
            let jobs: Vec<_> = (0..state.input().sections.len())
                .filter_map(|index| state.begin_section(index))
                .collect();
            if jobs.is_empty() {
                Vec::new()
            } else {
                vec![Effect::GenerateAll { jobs }]
            }
        }
        Msg::GenerateImagesClicked => {
            let location = state.begin_images();
            vec![Effect::FetchImages { location }]
        }
        Msg::DownloadClicked => {
            let job = state.begin_download();
            vec![Effect::DownloadDocument(job)]
        }
        Msg::SectionGenerated { ticket, result } => {
            state.apply_section_result(ticket, result);
            Vec::new()
        }
        Msg::BatchSettled { succeeded, failed } => {
            state.set_notice(Notice::BatchSettled { succeeded, failed });
            Vec::new()
        }
        Msg::ImagesFetched(result) => {
            state.apply_images(result);
            Vec::new()
        }
        Msg::DocumentSaved(result) => {
            state.apply_download(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
