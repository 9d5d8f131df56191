use crate::Ticket;

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    GenerateSection(SectionJob),
    /// Every job runs concurrently; the platform reports each completion and
    /// then a single settlement summary.
    GenerateAll { jobs: Vec<SectionJob> },
    FetchImages { location: String },
    DownloadDocument(DocumentJob),
}

/// One request for the body of a single section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionJob {
    pub index: usize,
    pub ticket: Ticket,
    pub model: String,
    pub blog_title: String,
    pub section_title: String,
}

/// Snapshot of everything the document renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentJob {
    pub title: String,
    /// `(section title, generated body)` in section order.
    pub body: Vec<(String, Option<String>)>,
    pub image_links: Vec<Vec<String>>,
}
