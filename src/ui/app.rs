/// Shortener page: URL form, short-link result card, AI insights panel

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::api::ApiClient;
use crate::poll::{PollSchedule, Tick, POLL_INTERVAL_MS};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use uuid::Uuid;

/// AI insights panel states
#[derive(Clone, PartialEq)]
enum InsightState {
    Hidden,
    Analyzing,
    Ready { category: String, summary: String },
    TimedOut,
}

/// Inline notice shown instead of a blocking alert
#[derive(Clone, PartialEq)]
struct Notice {
    kind: AlertType,
    text: String,
}

impl Notice {
    fn success(text: &str) -> Self {
        Notice {
            kind: AlertType::Success,
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        Notice {
            kind: AlertType::Danger,
            text: text.to_string(),
        }
    }
}

/// Bookkeeping for one round of insight polling.
///
/// The live flag is the staleness guard: it is cleared on terminal success,
/// on timeout, and on drop (a new submit drops the previous session), and
/// every stats response checks it before touching the display.
struct PollSession {
    id: Uuid,
    live: Rc<Cell<bool>>,
    timer: Rc<Cell<Option<i32>>>,
    _tick: Closure<dyn FnMut()>,
}

impl Drop for PollSession {
    fn drop(&mut self) {
        if self.live.get() {
            log::debug!("poll session {} cancelled", self.id);
        }
        self.live.set(false);
        clear_timer(&self.timer);
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let url_input = use_state(|| String::new());
    let short_link = use_state(|| None::<String>);
    let insights = use_state(|| InsightState::Hidden);
    let notice = use_state(|| None::<Notice>);
    let poll_session = use_mut_ref(|| None::<PollSession>);

    // URL input handler
    let on_url_input = {
        let url_input = url_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url_input.set(input.value());
            }
        })
    };

    // Shorten handler
    let on_shorten = {
        let url_input = url_input.clone();
        let short_link = short_link.clone();
        let insights = insights.clone();
        let notice = notice.clone();
        let poll_session = poll_session.clone();

        Callback::from(move |_| {
            let url = (*url_input).clone();
            if url.is_empty() {
                return;
            }

            // Reset UI and cancel any in-flight poll session
            notice.set(None);
            short_link.set(None);
            insights.set(InsightState::Hidden);
            poll_session.borrow_mut().take();

            let short_link = short_link.clone();
            let insights = insights.clone();
            let notice = notice.clone();
            let poll_session = poll_session.clone();

            spawn_local(async move {
                let api = match ApiClient::from_window() {
                    Ok(api) => Rc::new(api),
                    Err(e) => {
                        log::error!("Shorten request failed: {}", e);
                        notice.set(Some(Notice::error("Error shortening URL")));
                        return;
                    }
                };

                match api.shorten(&url).await {
                    Ok(response) => {
                        let short_url = api.short_url(&response.short_code);
                        short_link.set(Some(short_url));
                        start_poll(api, response.short_code, poll_session, insights);
                    }
                    Err(e) => {
                        log::error!("Shorten request failed: {}", e);
                        notice.set(Some(Notice::error("Error shortening URL")));
                    }
                }
            });
        })
    };

    // Copy short link handler
    let on_copy = {
        let short_link = short_link.clone();
        let notice = notice.clone();

        Callback::from(move |_| {
            if let Some(href) = (*short_link).clone() {
                let notice = notice.clone();
                spawn_local(async move {
                    match copy_to_clipboard(&href).await {
                        Ok(()) => {
                            notice.set(Some(Notice::success("Copied!")));
                        }
                        Err(e) => {
                            log::error!("Copy failed: {}", e);
                        }
                    }
                });
            }
        })
    };

    // Reset handler: clears the input and hides the result card.
    // Deliberately leaves any running poll session alone.
    let on_reset = {
        let url_input = url_input.clone();
        let short_link = short_link.clone();

        Callback::from(move |_| {
            url_input.set(String::new());
            short_link.set(None);
        })
    };

    html! {
        <div class="page">
            <h1 class="page-title">{"LinkLens"}</h1>

            // Inline notice (replaces blocking alerts)
            if let Some(n) = (*notice).clone() {
                <Alert r#type={n.kind} title={n.text} inline={true}>
                </Alert>
            }

            // Shorten form
            <div class="shorten-form">
                <input
                    type="text"
                    placeholder="Paste a long URL..."
                    value={(*url_input).clone()}
                    oninput={on_url_input}
                    class="url-input"
                />
                <Button onclick={on_shorten} variant={ButtonVariant::Primary}>
                    {"Shorten"}
                </Button>
            </div>

            // Result card
            if let Some(href) = (*short_link).clone() {
                <div class="result-card">
                    <a class="short-link" href={href.clone()} target="_blank">{href}</a>
                    <div class="result-actions">
                        <Button onclick={on_copy.clone()} variant={ButtonVariant::Secondary}>
                            {"Copy"}
                        </Button>
                        <Button onclick={on_reset.clone()} variant={ButtonVariant::Secondary}>
                            {"Reset"}
                        </Button>
                    </div>
                </div>
            }

            // AI insights panel
            {match &*insights {
                InsightState::Hidden => html! {},
                InsightState::Analyzing => html! {
                    <div class="ai-box">
                        <Spinner />
                        <p class="ai-category">{"Analyzing..."}</p>
                        <p class="ai-summary">{"Gemini is reading the website..."}</p>
                    </div>
                },
                InsightState::Ready { category, summary } => html! {
                    <div class="ai-box">
                        <p class="ai-category">{category.clone()}</p>
                        <p class="ai-summary">{summary.clone()}</p>
                    </div>
                },
                InsightState::TimedOut => html! {
                    <div class="ai-box">
                        <p class="ai-summary">{"Analysis timed out (or AI disabled)."}</p>
                    </div>
                },
            }}
        </div>
    }
}

/// Arm a 2s repeating timer that polls stats until insights arrive or the
/// attempt cap is hit. The new session replaces (and thereby cancels) any
/// previous one held in `poll_session`.
fn start_poll(
    api: Rc<ApiClient>,
    short_code: String,
    poll_session: Rc<RefCell<Option<PollSession>>>,
    insights: UseStateHandle<InsightState>,
) {
    insights.set(InsightState::Analyzing);

    let session_id = Uuid::new_v4();
    let live = Rc::new(Cell::new(true));
    let timer = Rc::new(Cell::new(None::<i32>));

    let tick = {
        let live = live.clone();
        let timer = timer.clone();
        let insights = insights.clone();
        let mut schedule = PollSchedule::new();

        Closure::wrap(Box::new(move || {
            match schedule.tick() {
                Tick::GiveUp => {
                    live.set(false);
                    clear_timer(&timer);
                    insights.set(InsightState::TimedOut);
                    log::warn!("poll session {} gave up waiting for insights", session_id);
                }
                Tick::Poll { attempt } => {
                    let api = api.clone();
                    let live = live.clone();
                    let timer = timer.clone();
                    let insights = insights.clone();
                    let short_code = short_code.clone();

                    spawn_local(async move {
                        match api.stats(&short_code).await {
                            Ok(stats) => {
                                if !live.get() {
                                    log::debug!(
                                        "discarding stats response for stale session {}",
                                        session_id
                                    );
                                    return;
                                }

                                if let Some(ai) = stats.ai_insights {
                                    live.set(false);
                                    clear_timer(&timer);
                                    insights.set(InsightState::Ready {
                                        category: ai.category_text().to_string(),
                                        summary: ai.summary_text().to_string(),
                                    });
                                }
                                // No insights yet: keep polling on the next tick
                            }
                            Err(e) => {
                                // Transient; the attempt cap bounds retries
                                log::error!("Polling error on attempt {}: {}", attempt, e);
                            }
                        }
                    });
                }
            }
        }) as Box<dyn FnMut()>)
    };

    let window = match web_sys::window() {
        Some(window) => window,
        None => {
            log::error!("browser window unavailable, insights polling disabled");
            return;
        }
    };

    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref::<js_sys::Function>(),
        POLL_INTERVAL_MS as i32,
    ) {
        Ok(handle) => {
            timer.set(Some(handle));
            *poll_session.borrow_mut() = Some(PollSession {
                id: session_id,
                live,
                timer,
                _tick: tick,
            });
        }
        Err(e) => {
            log::error!("Failed to arm poll timer: {:?}", e);
        }
    }
}

/// Clear the interval if it is still armed; safe to call more than once.
fn clear_timer(timer: &Rc<Cell<Option<i32>>>) {
    if let Some(handle) = timer.take() {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(handle);
        }
    }
}

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "no browser window".to_string())?;
    let clipboard = window.navigator().clipboard();

    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|e| format!("clipboard write failed: {:?}", e))?;

    Ok(())
}
