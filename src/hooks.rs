use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callbacks for one validated identifier field.
///
/// The field keeps raw text and a committed canonical value separately:
/// typing only updates the text, and the canonical value changes when the
/// input is committed (change event / Enter) or set programmatically by
/// the URL extractor.
#[derive(Clone)]
pub struct ValidatedField {
    /// Current raw text of the input element.
    pub text: String,
    /// Last committed canonical value; empty until a commit succeeds.
    pub value: String,
    /// Validation message of the last failed commit.
    pub error: Option<String>,
    /// `oninput` handler keeping the text state in sync.
    pub on_text_input: Callback<InputEvent>,
    /// Validate and commit the current text.
    pub on_commit: Callback<()>,
    /// Programmatically set the canonical value, e.g. from a URL match.
    /// Updates the text and clears any error.
    pub set_value: Callback<String>,
}

/// Hook backing a validated identifier field.
///
/// `validate` maps raw text to the canonical form (trimmed, upper-cased)
/// or a user-facing message.
#[hook]
pub fn use_validated_field(
    validate: Rc<dyn Fn(&str) -> Result<String, String>>,
) -> ValidatedField {
    let text = use_state(String::new);
    let value = use_state(String::new);
    let error = use_state(|| None::<String>);

    let on_text_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_commit = {
        let text = text.clone();
        let value = value.clone();
        let error = error.clone();
        let validate = validate.clone();
        Callback::from(move |_| match validate(&text) {
            Ok(canonical) => {
                value.set(canonical.clone());
                // Echo the canonical form back into the input.
                text.set(canonical);
                error.set(None);
            }
            Err(message) => {
                error.set(Some(message));
            }
        })
    };

    let set_value = {
        let text = text.clone();
        let value = value.clone();
        let error = error.clone();
        Callback::from(move |new_value: String| {
            text.set(new_value.clone());
            value.set(new_value);
            error.set(None);
        })
    };

    ValidatedField {
        text: (*text).clone(),
        value: (*value).clone(),
        error: (*error).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}
