//! Yew application for the Codeforces-to-PDF conversion form.
//! Wires the URL extractor, the preview flow, and the submission gate.

use std::rc::Rc;

use cf_to_pdf::{api, ConvertMode, PreviewState, ProblemRef};
use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod utils;

use components::{mode_options, PreviewPanel};
use config::*;
use hooks::use_validated_field;
use utils::{extract_problem_url, validate_contest_id, validate_problem_code};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Blocking prompt, used for the missing-input and gate messages.
fn alert(message: &str) {
    let _ = gloo_utils::window().alert_with_message(message);
}

/// Create a debounced callback that cancels any previous pending call.
fn debounce<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Replacing the handle drops (and thereby cancels) the old timer.
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let url_text = use_state(String::new);
    let contest = use_validated_field(Rc::new(validate_contest_id));
    let problem = use_validated_field(Rc::new(validate_problem_code));
    let mode = use_state(ConvertMode::default);
    let all_problems = use_state(|| false);

    let preview = use_state(PreviewState::default);
    // Generation counter of the preview flow. Each request captures the
    // value at dispatch; a response whose generation is no longer current
    // was superseded and is dropped.
    let preview_gen = use_mut_ref(|| 0u32);
    // Identifier pair and mode staged into the form's hidden fields by
    // the last successful preview.
    let staged = use_state(|| None::<(ProblemRef, ConvertMode)>);

    let debounce_timer = use_state(|| None::<Timeout>);
    let form_ref = use_node_ref();

    // Validate the identifier pair and run one availability check.
    let run_preview = {
        let preview = preview.clone();
        let preview_gen = preview_gen.clone();
        let staged = staged.clone();
        let mode = mode.clone();
        Callback::from(move |(contest_raw, problem_raw): (String, String)| {
            let problem_ref = match ProblemRef::new(&contest_raw, &problem_raw) {
                Ok(p) => p,
                Err(err) => {
                    alert(&err.to_string());
                    return;
                }
            };
            info!("previewing problem {}", problem_ref);

            *preview_gen.borrow_mut() += 1;
            let generation = *preview_gen.borrow();
            preview.set(PreviewState::Loading);
            staged.set(None);

            let preview = preview.clone();
            let preview_gen = preview_gen.clone();
            let staged = staged.clone();
            let mode_at_request = *mode;
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = api::check_availability(&problem_ref.to_request()).await;
                if *preview_gen.borrow() != generation {
                    debug!("dropping superseded preview response for {}", problem_ref);
                    return;
                }
                let next = PreviewState::resolve(outcome, &problem_ref);
                if next.download_enabled() {
                    staged.set(Some((problem_ref, mode_at_request)));
                }
                preview.set(next);
            });
        })
    };

    // Parse problem URLs as they are typed or pasted, filling the
    // identifier fields and scheduling an automatic preview.
    let on_url_input = {
        let url_text = url_text.clone();
        let contest = contest.clone();
        let problem = problem.clone();
        let run_preview = run_preview.clone();
        let debounce_timer = debounce_timer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let url = input.value();
            url_text.set(url.clone());
            if url.trim().is_empty() {
                return;
            }
            if let Some((contest_id, code)) = extract_problem_url(&url) {
                info!("recognized problem URL: contest {} problem {}", contest_id, code);
                contest.set_value.emit(contest_id.clone());
                problem.set_value.emit(code.clone());
                debounce(
                    &debounce_timer,
                    run_preview.clone(),
                    (contest_id, code),
                    URL_DEBOUNCE_MS,
                );
            }
        })
    };

    let on_preview_click = {
        let contest = contest.clone();
        let problem = problem.clone();
        let run_preview = run_preview.clone();
        Callback::from(move |_: MouseEvent| {
            run_preview.emit((contest.text.clone(), problem.text.clone()));
        })
    };

    let on_mode_change = {
        let mode = mode.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            mode.set(ConvertMode::from_form_value(&select.value()));
        })
    };

    let on_all_problems_change = {
        let all_problems = all_problems.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            all_problems.set(input.checked());
        })
    };

    // Submission gate: a pasted URL that has not been resolved into
    // identifiers yet cancels the post, re-runs extraction, triggers a
    // preview, and re-submits after a settle delay. Best-effort timing,
    // matching the original form's behavior.
    let on_submit = {
        let url_text = url_text.clone();
        let contest = contest.clone();
        let problem = problem.clone();
        let all_problems = all_problems.clone();
        let run_preview = run_preview.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            let url = url_text.trim().to_string();
            let identifiers_missing = contest.text.trim().is_empty()
                || (!*all_problems && problem.text.trim().is_empty());
            if url.is_empty() || !identifiers_missing {
                return;
            }
            e.prevent_default();
            alert(URL_PROCESSING_PROMPT);

            let Some((contest_id, code)) = extract_problem_url(&url) else {
                return;
            };
            contest.set_value.emit(contest_id.clone());
            problem.set_value.emit(code.clone());

            let run_preview = run_preview.clone();
            let form = form_ref.cast::<HtmlFormElement>();
            Timeout::new(URL_DEBOUNCE_MS, move || {
                run_preview.emit((contest_id, code));
                // Give the preview time to land before posting the form.
                Timeout::new(SUBMIT_SETTLE_MS, move || {
                    if let Some(form) = form {
                        let _ = form.submit();
                    }
                })
                .forget();
            })
            .forget();
        })
    };

    let (staged_contest, staged_problem, staged_mode) = match &*staged {
        Some((p, m)) => (p.contest_id.clone(), p.problem.clone(), m.form_value()),
        None => (String::new(), String::new(), ""),
    };

    html! {
        <div class="container">
            <h1>{ "Codeforces to PDF" }</h1>

            <div class="form-group">
                <label for="problem_url">{ "Problem URL:" }</label>
                <input
                    type="text"
                    id="problem_url"
                    placeholder="https://codeforces.com/contest/1234/problem/A"
                    value={(*url_text).clone()}
                    oninput={on_url_input}
                />
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label for="contest_id">{ "Contest ID:" }</label>
                    <input
                        type="text"
                        id="contest_id"
                        value={contest.text.clone()}
                        class={if contest.error.is_some() { "invalid" } else { "" }}
                        oninput={contest.on_text_input.clone()}
                        onchange={contest.on_commit.reform(|_| ())}
                    />
                    if let Some(ref err) = contest.error {
                        <div class="input-error">{ err }</div>
                    }
                </div>

                <div class="form-group">
                    <label for="problem">{ "Problem ID:" }</label>
                    <input
                        type="text"
                        id="problem"
                        value={problem.text.clone()}
                        class={if problem.error.is_some() { "invalid" } else { "" }}
                        oninput={problem.on_text_input.clone()}
                        onchange={problem.on_commit.reform(|_| ())}
                    />
                    if let Some(ref err) = problem.error {
                        <div class="input-error">{ err }</div>
                    }
                </div>

                <div class="form-group">
                    <label for="mode">{ "Mode:" }</label>
                    <select id="mode" onchange={on_mode_change}>
                        { mode_options(*mode) }
                    </select>
                </div>
            </div>

            <div class="form-group checkbox-group">
                <label>
                    <input type="checkbox"
                        checked={*all_problems}
                        onchange={on_all_problems_change}
                    />
                    { "Download the entire contest" }
                </label>
            </div>

            <button type="button" id="preview-btn" onclick={on_preview_click}>
                { "Preview" }
            </button>

            <PreviewPanel state={(*preview).clone()} />

            <form ref={form_ref}
                id="convert-form"
                action={CONVERT_ACTION}
                method="post"
                onsubmit={on_submit}>
                <input type="hidden" name="contest_id" value={staged_contest} />
                <input type="hidden" name="problem" value={staged_problem} />
                <input type="hidden" name="mode" value={staged_mode} />
                <input type="hidden" name="all_problems"
                    value={if *all_problems { "true" } else { "false" }} />
                <button type="submit"
                    id="download-btn"
                    disabled={!preview.download_enabled()}>
                    { "Download PDF" }
                </button>
            </form>
        </div>
    }
}

/// Entry point: initializes the panic hook and the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
