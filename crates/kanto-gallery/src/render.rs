use crate::state::{GalleryState, PokemonSummary};

pub const IMAGE_PENDING_LINE: &str = "[artwork pending]";
pub const IMAGE_UNAVAILABLE_LINE: &str = "[image unavailable]";
const SKELETON_LINE: &str = "[ ..... ]";
const CARD_WIDTH: usize = 60;

/// Uppercases the first character for display.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders the catalog as a card grid. No invariant beyond "render whatever
/// is currently in state": unresolved artwork renders the pending
/// placeholder, a recorded lookup failure renders the unavailable line, and
/// the reveal flag swaps artwork lines for skeletons.
pub fn render_gallery(state: &GalleryState) -> String {
    let mut out = String::new();
    if let Some(message) = state.error() {
        out.push_str(&format!("error: {message}\n"));
        return out;
    }

    for summary in state.catalog() {
        out.push_str(&render_card(state, summary));
        out.push('\n');
    }
    out
}

fn render_card(state: &GalleryState, summary: &PokemonSummary) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{} #{}", capitalize(&summary.name), summary.id));
    lines.push(artwork_line(state, &summary.name));
    lines.extend(wrap_text(&summary.description, CARD_WIDTH - 4));

    let mut card = String::new();
    card.push_str(&format!("+{}+\n", "-".repeat(CARD_WIDTH - 2)));
    for line in lines {
        card.push_str(&format!("| {:<width$} |\n", line, width = CARD_WIDTH - 4));
    }
    card.push_str(&format!("+{}+", "-".repeat(CARD_WIDTH - 2)));
    card
}

fn artwork_line(state: &GalleryState, name: &str) -> String {
    if state.is_revealing() {
        return SKELETON_LINE.to_string();
    }
    if let Some(url) = state.artwork_url(name) {
        return url.to_string();
    }
    if state.artwork_error(name).is_some() {
        return IMAGE_UNAVAILABLE_LINE.to_string();
    }
    IMAGE_PENDING_LINE.to_string()
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
