#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the blog title.
    TitleChanged(String),
    /// User clicked Add; appends an empty section with the default model.
    SectionAdded,
    /// User edited the title of the section at `index`.
    SectionTitleChanged { index: usize, title: String },
    /// User picked another model for the section at `index`.
    SectionModelChanged { index: usize, model: String },
    /// User asked to (re)generate a single section.
    GenerateSectionClicked { index: usize },
    /// User clicked Create Blog.
    GenerateAllClicked,
    /// User clicked Generate Images.
    GenerateImagesClicked,
    /// User clicked Download.
    DownloadClicked,
    /// Engine completion for one section request. `Ok(None)` is a `null` body.
    SectionGenerated {
        ticket: crate::Ticket,
        result: Result<Option<String>, String>,
    },
    /// Every request of a Create Blog batch has settled.
    BatchSettled { succeeded: usize, failed: usize },
    /// Engine completion for an image search.
    ImagesFetched(Result<Vec<Vec<String>>, String>),
    /// Engine completion for a download; `Ok` holds where the document landed.
    DocumentSaved(Result<String, String>),
    /// Input that changes nothing, such as a blank command line.
    NoOp,
}
