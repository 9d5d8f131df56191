use blog_core::{BlogViewModel, Notice};

use super::constants::RULE;

/// Renders the whole form and its output as terminal lines.
pub(crate) fn render(view: &BlogViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let title = if view.title.is_empty() {
        "(untitled)"
    } else {
        view.title.as_str()
    };
    lines.push(RULE.to_string());
    lines.push(format!("Location: {title}"));

    lines.push(format!("Sections ({}):", view.inputs.len()));
    for input in &view.inputs {
        let section_title = if input.title.is_empty() {
            "(no title)"
        } else {
            input.title.as_str()
        };
        lines.push(format!(
            "  {}. [{}] {}",
            input.index + 1,
            input.model,
            section_title
        ));
    }

    lines.push(RULE.to_string());
    lines.push(format!("# {}", view.title));
    if view.images_pending {
        lines.push("Images: fetching...".to_string());
    }
    for (group_index, group) in view.images.iter().enumerate() {
        lines.push(format!("Images {}: {}", group_index + 1, group.join(" ")));
    }

    for slot in &view.sections {
        lines.push(String::new());
        lines.push(format!("## {}. {}", slot.index + 1, slot.title));
        lines.extend(slot.display_text().lines().map(str::to_string));
        if let Some(failure) = &slot.failure {
            lines.push(format!("  ! generation failed: {failure}"));
        }
        lines.push(RULE.to_string());
    }

    if view.download_pending {
        lines.push("Download: rendering document...".to_string());
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("Status: {}", notice_text(notice)));
    }

    lines
}

fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::BatchSettled { succeeded, failed } => {
            format!("blog generated: {succeeded} sections ok, {failed} failed")
        }
        Notice::ImagesLoaded { groups } => format!("loaded {groups} image groups"),
        Notice::ImagesFailed(message) => format!("image search failed: {message}"),
        Notice::DocumentSaved(location) => format!("document saved to {location}"),
        Notice::DownloadFailed(message) => format!("download failed: {message}"),
    }
}
