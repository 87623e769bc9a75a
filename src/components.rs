//! Pure Yew view components for the conversion form.
//!
//! Stateless pieces that render from props: the difficulty badge and the
//! three-state preview panel. All decisions about which state to show are
//! made upstream; these components only draw.

use cf_to_pdf::{badge_text, ConvertMode, DifficultyBand, PreviewState, ProblemPreview};
use yew::prelude::*;

/// Color-coded difficulty badge. A rating of 0 renders the gray
/// "Unknown" badge.
#[derive(Properties, PartialEq)]
pub struct DifficultyBadgeProps {
    pub rating: u32,
}

#[function_component(DifficultyBadge)]
pub fn difficulty_badge(props: &DifficultyBadgeProps) -> Html {
    let band = DifficultyBand::for_rating(props.rating);
    html! {
        <span class="badge-difficulty"
            style={format!("background-color: {};", band.color())}>
            { badge_text(props.rating) }
        </span>
    }
}

/// Renders the content panel of a successful preview.
fn render_preview_content(preview: &ProblemPreview) -> Html {
    html! {
        <div class="preview-content">
            <h4 class="preview-title">{ &preview.title }</h4>
            <DifficultyBadge rating={preview.rating} />
            if let Some(ref time_limit) = preview.time_limit {
                <div class="preview-time">{ format!("time limit: {}", time_limit) }</div>
            }
            if let Some(ref memory_limit) = preview.memory_limit {
                <div class="preview-memory">{ format!("memory limit: {}", memory_limit) }</div>
            }
        </div>
    }
}

/// The preview area below the identifier fields. Exactly one of the
/// loading, content, and error panels is visible; before the first
/// request nothing is rendered at all.
#[derive(Properties, PartialEq)]
pub struct PreviewPanelProps {
    pub state: PreviewState,
}

#[function_component(PreviewPanel)]
pub fn preview_panel(props: &PreviewPanelProps) -> Html {
    let inner = match &props.state {
        PreviewState::Hidden => return html! {},
        PreviewState::Loading => html! {
            <div class="preview-loading">{ "Fetching problem details…" }</div>
        },
        PreviewState::Ready(preview) => render_preview_content(preview),
        PreviewState::Failed(message) => html! {
            <div class="preview-error">
                <p>{ "Unable to fetch this problem from Codeforces. \
                      Please verify the Contest ID and Problem ID." }</p>
                if let Some(message) = message {
                    <p class="preview-error-detail">{ message }</p>
                }
            </div>
        },
    };
    html! {
        <div id="problem-preview" class="problem-preview">
            { inner }
        </div>
    }
}

/// `<option>` list for the conversion-mode select.
pub fn mode_options(selected: ConvertMode) -> Html {
    ConvertMode::ALL
        .iter()
        .map(|mode| {
            html! {
                <option value={mode.form_value()} selected={*mode == selected}>
                    { mode.label() }
                </option>
            }
        })
        .collect::<Html>()
}
