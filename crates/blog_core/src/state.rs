use crate::view_model::{BlogViewModel, Notice, SectionInputView, SectionSlotView};
use crate::{DocumentJob, SectionJob};

/// Model assigned to freshly added sections.
pub const DEFAULT_MODEL: &str = "gemini";

/// Identifies one issued section request. Tickets increase monotonically.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInput {
    pub title: String,
    pub model: String,
}

impl Default for SectionInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogInput {
    pub title: String,
    pub sections: Vec<SectionInput>,
}

/// Output storage for one section. `content == None` is the absent marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputSlot {
    pub content: Option<String>,
    pub failure: Option<String>,
    ticket: Option<Ticket>,
    pending: bool,
}

impl OutputSlot {
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogOutput {
    /// Index-aligned with `BlogInput::sections`; never longer than it.
    pub sections: Vec<OutputSlot>,
    pub images: Vec<Vec<String>>,
}

impl BlogOutput {
    pub fn section_contents(&self) -> Vec<Option<&str>> {
        self.sections
            .iter()
            .map(|slot| slot.content.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogState {
    input: BlogInput,
    output: BlogOutput,
    next_ticket: Ticket,
    images_pending: bool,
    download_pending: bool,
    notice: Option<Notice>,
    dirty: bool,
}

impl Default for BlogState {
    fn default() -> Self {
        Self {
            input: BlogInput::default(),
            output: BlogOutput::default(),
            next_ticket: 1,
            images_pending: false,
            download_pending: false,
            notice: None,
            dirty: false,
        }
    }
}

impl BlogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &BlogInput {
        &self.input
    }

    pub fn output(&self) -> &BlogOutput {
        &self.output
    }

    pub fn view(&self) -> BlogViewModel {
        let inputs = self
            .input
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| SectionInputView {
                index,
                title: section.title.clone(),
                model: section.model.clone(),
            })
            .collect();
        let sections = self
            .input
            .sections
            .iter()
            .zip(&self.output.sections)
            .enumerate()
            .map(|(index, (input, slot))| SectionSlotView {
                index,
                title: input.title.clone(),
                content: slot.content.clone(),
                pending: slot.pending,
                failure: slot.failure.clone(),
            })
            .collect();

        BlogViewModel {
            title: self.input.title.clone(),
            inputs,
            sections,
            images: self.output.images.clone(),
            images_pending: self.images_pending,
            download_pending: self.download_pending,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.input.title = title;
        self.mark_dirty();
    }

    pub(crate) fn push_section(&mut self) {
        self.input.sections.push(SectionInput::default());
        self.mark_dirty();
    }

    pub(crate) fn set_section_title(&mut self, index: usize, title: String) -> bool {
        let Some(section) = self.input.sections.get_mut(index) else {
            return false;
        };
        section.title = title;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_section_model(&mut self, index: usize, model: String) -> bool {
        let Some(section) = self.input.sections.get_mut(index) else {
            return false;
        };
        section.model = model;
        self.mark_dirty();
        true
    }

    /// Clears the slot at `index`, issues a fresh ticket for it and returns the
    /// job to run. `None` when no section exists at `index`.
    pub(crate) fn begin_section(&mut self, index: usize) -> Option<SectionJob> {
        let section = self.input.sections.get(index)?.clone();
        if self.output.sections.len() <= index {
            self.output.sections.resize_with(index + 1, OutputSlot::default);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let slot = &mut self.output.sections[index];
        slot.content = None;
        slot.failure = None;
        slot.ticket = Some(ticket);
        slot.pending = true;
        self.mark_dirty();

        Some(SectionJob {
            index,
            ticket,
            model: section.model,
            blog_title: self.input.title.clone(),
            section_title: section.title,
        })
    }

    /// Applies a completion to the slot currently waiting on `ticket`.
    /// Completions for superseded tickets are dropped.
    pub(crate) fn apply_section_result(
        &mut self,
        ticket: Ticket,
        result: Result<Option<String>, String>,
    ) -> bool {
        let Some(slot) = self
            .output
            .sections
            .iter_mut()
            .find(|slot| slot.pending && slot.ticket == Some(ticket))
        else {
            return false;
        };

        slot.pending = false;
        match result {
            Ok(body) => slot.content = body,
            Err(message) => slot.failure = Some(message),
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn begin_images(&mut self) -> String {
        self.images_pending = true;
        self.mark_dirty();
        self.input.title.clone()
    }

    pub(crate) fn apply_images(&mut self, result: Result<Vec<Vec<String>>, String>) {
        self.images_pending = false;
        let notice = match result {
            Ok(groups) => {
                let notice = Notice::ImagesLoaded {
                    groups: groups.len(),
                };
                self.output.images = groups;
                notice
            }
            Err(message) => Notice::ImagesFailed(message),
        };
        self.set_notice(notice);
    }

    /// Captures the document request from the current snapshot.
    pub(crate) fn begin_download(&mut self) -> DocumentJob {
        self.download_pending = true;
        self.mark_dirty();

        let body = self
            .input
            .sections
            .iter()
            .zip(&self.output.sections)
            .map(|(input, slot)| (input.title.clone(), slot.content.clone()))
            .collect();

        DocumentJob {
            title: self.input.title.clone(),
            body,
            image_links: self.output.images.clone(),
        }
    }

    pub(crate) fn apply_download(&mut self, result: Result<String, String>) {
        self.download_pending = false;
        let notice = match result {
            Ok(location) => Notice::DocumentSaved(location),
            Err(message) => Notice::DownloadFailed(message),
        };
        self.set_notice(notice);
    }
}
