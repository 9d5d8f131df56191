use blog_core::{update, BlogState, DocumentJob, Effect, Msg, Notice};

fn urls(groups: &[&[&str]]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|url| url.to_string()).collect())
        .collect()
}

#[test]
fn generate_images_requests_current_title() {
    let (state, _) = update(BlogState::new(), Msg::TitleChanged("Goa & Kerala".to_string()));
    let (state, effects) = update(state, Msg::GenerateImagesClicked);

    assert_eq!(
        effects,
        vec![Effect::FetchImages {
            location: "Goa & Kerala".to_string()
        }]
    );
    assert!(state.view().images_pending);
}

#[test]
fn images_are_replaced_wholesale() {
    let (state, _) = update(BlogState::new(), Msg::GenerateImagesClicked);
    let (state, _) = update(
        state,
        Msg::ImagesFetched(Ok(urls(&[&["a1", "a2"], &["b1"]]))),
    );
    assert_eq!(state.output().images, urls(&[&["a1", "a2"], &["b1"]]));

    let (state, _) = update(state, Msg::GenerateImagesClicked);
    let (state, _) = update(state, Msg::ImagesFetched(Ok(urls(&[&["c1"]]))));

    assert_eq!(state.output().images, urls(&[&["c1"]]));
    let view = state.view();
    assert!(!view.images_pending);
    assert_eq!(view.notice, Some(Notice::ImagesLoaded { groups: 1 }));
}

#[test]
fn failed_image_fetch_keeps_previous_images() {
    let (state, _) = update(BlogState::new(), Msg::ImagesFetched(Ok(urls(&[&["a1"]]))));
    let (state, _) = update(state, Msg::GenerateImagesClicked);
    let (state, _) = update(state, Msg::ImagesFetched(Err("network error".to_string())));

    assert_eq!(state.output().images, urls(&[&["a1"]]));
    assert_eq!(
        state.view().notice,
        Some(Notice::ImagesFailed("network error".to_string()))
    );
}

#[test]
fn download_pairs_section_titles_with_bodies_in_order() {
    let (state, _) = update(BlogState::new(), Msg::TitleChanged("Goa".to_string()));
    let (state, _) = update(state, Msg::SectionAdded);
    let (state, _) = update(state, Msg::SectionAdded);
    let (state, _) = update(
        state,
        Msg::SectionTitleChanged {
            index: 0,
            title: "Beaches".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::SectionTitleChanged {
            index: 1,
            title: "Food".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::GenerateAllClicked);
    let second_ticket = match &effects[0] {
        Effect::GenerateAll { jobs } => jobs[1].ticket,
        other => panic!("unexpected effect {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::SectionGenerated {
            ticket: second_ticket,
            result: Ok(Some("Fish curry".to_string())),
        },
    );
    let (state, _) = update(state, Msg::ImagesFetched(Ok(urls(&[&["img"]]))));

    let (state, effects) = update(state, Msg::DownloadClicked);

    assert_eq!(
        effects,
        vec![Effect::DownloadDocument(DocumentJob {
            title: "Goa".to_string(),
            body: vec![
                ("Beaches".to_string(), None),
                ("Food".to_string(), Some("Fish curry".to_string())),
            ],
            image_links: urls(&[&["img"]]),
        })]
    );
    assert!(state.view().download_pending);
}

#[test]
fn download_body_only_covers_requested_slots() {
    let (state, _) = update(BlogState::new(), Msg::SectionAdded);
    let (state, _) = update(state, Msg::SectionAdded);
    let (state, _) = update(state, Msg::GenerateSectionClicked { index: 0 });

    let (_state, effects) = update(state, Msg::DownloadClicked);

    match &effects[0] {
        Effect::DownloadDocument(job) => {
            assert_eq!(job.body, vec![(String::new(), None)]);
            assert!(job.image_links.is_empty());
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn download_outcome_is_reported() {
    let (state, _) = update(BlogState::new(), Msg::DownloadClicked);
    let (state, _) = update(
        state,
        Msg::DocumentSaved(Ok("output/Goa--1a2b3c4d.pdf".to_string())),
    );
    let view = state.view();
    assert!(!view.download_pending);
    assert_eq!(
        view.notice,
        Some(Notice::DocumentSaved("output/Goa--1a2b3c4d.pdf".to_string()))
    );

    let (state, _) = update(state, Msg::DownloadClicked);
    let (state, _) = update(state, Msg::DocumentSaved(Err("http status 502".to_string())));
    assert_eq!(
        state.view().notice,
        Some(Notice::DownloadFailed("http status 502".to_string()))
    );
}
