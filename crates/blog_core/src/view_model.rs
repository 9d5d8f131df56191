/// Text shown in place of a section body that is absent.
pub const PENDING_PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogViewModel {
    pub title: String,
    pub inputs: Vec<SectionInputView>,
    pub sections: Vec<SectionSlotView>,
    pub images: Vec<Vec<String>>,
    pub images_pending: bool,
    pub download_pending: bool,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInputView {
    pub index: usize,
    pub title: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSlotView {
    pub index: usize,
    pub title: String,
    pub content: Option<String>,
    pub pending: bool,
    pub failure: Option<String>,
}

impl SectionSlotView {
    /// The body if present and non-empty, otherwise the placeholder.
    pub fn display_text(&self) -> &str {
        match self.content.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => PENDING_PLACEHOLDER,
        }
    }
}

/// Outcome of the most recent batch, image or download action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BatchSettled { succeeded: usize, failed: usize },
    ImagesLoaded { groups: usize },
    ImagesFailed(String),
    DocumentSaved(String),
    DownloadFailed(String),
}
