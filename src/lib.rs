pub mod api;
pub mod classify;
pub mod comparison;
pub mod config;
pub mod geometry;
pub mod history;
pub mod pan;
pub mod pan_surface;
pub mod session;
pub mod suggest;

use api::{fetch_teams, reset_game, submit_guess};
use classify::{Category, ResultBlock};
use config::{load_config, GameConfig};
use gloo_timers::callback::Timeout;
use history::HistoryEntry;
use log::{debug, error, warn};
use pan::{PanButtons, PanDirection};
use pan_surface::PanSurface;
use session::{GuessSession, SubmitOutcome};
use suggest::TeamsCache;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Default)]
pub struct AppProps {
    #[prop_or_default]
    pub config: GameConfig,
}

#[derive(Clone, PartialEq)]
enum StatusLine {
    Idle,
    Rejected(String),
    Solved(u32),
    Error(String),
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();

    let teams = use_state(TeamsCache::default);
    let session = use_mut_ref(GuessSession::new);
    let session_changed = use_force_update();
    let suggestions = use_state(Vec::<String>::new);
    let suggestions_open = use_state(|| false);
    let hide_timer = use_mut_ref(|| None::<Timeout>);
    let status = use_state(|| StatusLine::Idle);
    let pan_buttons = use_state_eq(PanButtons::default);

    let input_ref = use_node_ref();
    let viewport_ref = use_node_ref();
    let track_ref = use_node_ref();

    let surface = {
        let viewport_ref = viewport_ref.clone();
        let track_ref = track_ref.clone();
        let pan_buttons = pan_buttons.clone();
        let step = config.pan_step;
        use_state(move || {
            PanSurface::new(
                step,
                viewport_ref,
                track_ref,
                Callback::from(move |buttons: PanButtons| pan_buttons.set(buttons)),
            )
        })
    };

    {
        let teams = teams.clone();
        let config = config.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_teams(&config).await {
                        Ok(names) => teams.set(TeamsCache::new(names)),
                        Err(err) => warn!("Autocomplete unavailable: {}", err),
                    }
                });
                || ()
            },
            (),
        );
    }

    let (revision, feed_empty) = {
        let session = session.borrow();
        (session.feed().revision(), session.feed().is_empty())
    };

    {
        let surface = (*surface).clone();
        use_effect_with_deps(
            move |&(_, empty): &(u64, bool)| {
                if empty {
                    surface.collapse();
                } else {
                    surface.schedule_resync();
                }
                || ()
            },
            (revision, feed_empty),
        );
    }

    {
        let surface = (*surface).clone();
        use_effect_with_deps(
            move |_| {
                let listeners = surface.listen();
                surface.schedule_resync();
                move || drop(listeners)
            },
            (),
        );
    }

    let on_submit = {
        let config = config.clone();
        let session = session.clone();
        let session_changed = session_changed.clone();
        let input_ref = input_ref.clone();
        let suggestions_open = suggestions_open.clone();
        let status = status.clone();

        Callback::from(move |_: ()| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let Some(ticket) = session.borrow_mut().begin(&input.value()) else {
                return;
            };
            suggestions_open.set(false);

            let config = config.clone();
            let session = session.clone();
            let session_changed = session_changed.clone();
            let input_ref = input_ref.clone();
            let status = status.clone();

            spawn_local(async move {
                let data = match submit_guess(&config, &ticket.guess).await {
                    Ok(data) => data,
                    Err(err) => {
                        error!("Guess '{}' failed: {}", ticket.guess, err);
                        status.set(StatusLine::Error(
                            "Could not reach the server. Try again.".to_string(),
                        ));
                        return;
                    }
                };

                let outcome = session.borrow_mut().resolve(&ticket, &data);
                match outcome {
                    SubmitOutcome::Stale => {
                        debug!("Dropping superseded response for '{}'", ticket.guess);
                        return;
                    }
                    SubmitOutcome::Rejected { message } => {
                        status.set(StatusLine::Rejected(message));
                    }
                    SubmitOutcome::Accepted {
                        solved: true,
                        attempts,
                    } => status.set(StatusLine::Solved(attempts)),
                    SubmitOutcome::Accepted { .. } => status.set(StatusLine::Idle),
                }
                session_changed.force_update();
                clear_and_focus(&input_ref);
            });
        })
    };

    let on_reset = {
        let config = config.clone();
        let session = session.clone();
        let session_changed = session_changed.clone();
        let input_ref = input_ref.clone();
        let suggestions_open = suggestions_open.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            let config = config.clone();
            let session = session.clone();
            let session_changed = session_changed.clone();
            let input_ref = input_ref.clone();
            let suggestions_open = suggestions_open.clone();
            let status = status.clone();

            spawn_local(async move {
                if let Err(err) = reset_game(&config).await {
                    warn!("Server reset failed, clearing local state anyway: {}", err);
                }
                session.borrow_mut().reset();
                suggestions_open.set(false);
                status.set(StatusLine::Idle);
                session_changed.force_update();
                clear_and_focus(&input_ref);
            });
        })
    };

    let on_input = {
        let teams = teams.clone();
        let suggestions = suggestions.clone();
        let suggestions_open = suggestions_open.clone();
        let limit = config.suggestion_limit;
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let matches = teams.suggest(input.value().trim(), limit);
            suggestions_open.set(!matches.is_empty());
            suggestions.set(matches);
        })
    };

    let on_keydown = {
        let on_submit = on_submit.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                on_submit.emit(());
            }
        })
    };

    let on_blur = {
        let suggestions_open = suggestions_open.clone();
        let hide_timer = hide_timer.clone();
        let delay = config.suggestion_hide_delay_ms;
        Callback::from(move |_: FocusEvent| {
            let suggestions_open = suggestions_open.clone();
            let timeout = Timeout::new(delay, move || suggestions_open.set(false));
            *hide_timer.borrow_mut() = Some(timeout);
        })
    };

    let on_pick = {
        let input_ref = input_ref.clone();
        let suggestions_open = suggestions_open.clone();
        Callback::from(move |team: String| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.set_value(&team);
                let _ = input.focus();
            }
            suggestions_open.set(false);
        })
    };

    let submit_click = {
        let on_submit = on_submit.clone();
        Callback::from(move |_: MouseEvent| on_submit.emit(()))
    };

    let pan_left = {
        let surface = (*surface).clone();
        Callback::from(move |_: MouseEvent| surface.step(PanDirection::Left))
    };
    let pan_right = {
        let surface = (*surface).clone();
        Callback::from(move |_: MouseEvent| surface.step(PanDirection::Right))
    };
    let pointer_down = {
        let surface = (*surface).clone();
        Callback::from(move |event: PointerEvent| surface.pointer_down(&event))
    };
    let pointer_move = {
        let surface = (*surface).clone();
        Callback::from(move |event: PointerEvent| surface.pointer_move(&event))
    };
    let pointer_end = {
        let surface = (*surface).clone();
        Callback::from(move |event: PointerEvent| surface.pointer_end(&event))
    };
    let mouse_down = {
        let surface = (*surface).clone();
        Callback::from(move |event: MouseEvent| surface.mouse_down(&event))
    };

    let session_view = session.borrow();
    let attempts = session_view.attempts();
    let history_items = session_view
        .feed()
        .entries()
        .map(render_entry)
        .collect::<Html>();
    drop(session_view);

    html! {
        <div class="game">
            <div class="guess-row">
                <div class="guess-field">
                    <input id="guess"
                        ref={input_ref}
                        type="text"
                        autocomplete="off"
                        placeholder="Guess a team"
                        oninput={on_input}
                        onkeydown={on_keydown}
                        onblur={on_blur} />
                    { render_suggestions(*suggestions_open, &suggestions, &on_pick) }
                </div>
                <button id="submit" onclick={submit_click}>{ "Guess" }</button>
                <button id="reset" onclick={on_reset}>{ "Reset" }</button>
            </div>
            <p class="attempts">{ format!("Attempts: {attempts}") }</p>
            { render_status(&status) }
            <div class="history">
                <button id="history-left" class="history-nav"
                    disabled={!pan_buttons.left_enabled}
                    onclick={pan_left}>{ "‹" }</button>
                <div class="history-scroll"
                    ref={viewport_ref}
                    onpointerdown={pointer_down}
                    onpointermove={pointer_move}
                    onpointerup={pointer_end.clone()}
                    onpointercancel={pointer_end.clone()}
                    onpointerleave={pointer_end}
                    onmousedown={mouse_down}>
                    <div id="history" class="history-list" ref={track_ref}>
                        { history_items }
                    </div>
                </div>
                <button id="history-right" class="history-nav"
                    disabled={!pan_buttons.right_enabled}
                    onclick={pan_right}>{ "›" }</button>
            </div>
        </div>
    }
}

fn clear_and_focus(input_ref: &NodeRef) {
    if let Some(input) = input_ref.cast::<HtmlInputElement>() {
        input.set_value("");
        let _ = input.focus();
    }
}

fn render_suggestions(open: bool, suggestions: &[String], on_pick: &Callback<String>) -> Html {
    if !open || suggestions.is_empty() {
        return html! {};
    }

    html! {
        <div id="suggestions" class="suggestions">
            { for suggestions.iter().map(|team| {
                let on_click = {
                    let on_pick = on_pick.clone();
                    let team = team.clone();
                    Callback::from(move |_: MouseEvent| on_pick.emit(team.clone()))
                };
                html! {
                    <div class="suggestions__item" key={team.clone()} onclick={on_click}>
                        { team }
                    </div>
                }
            }) }
        </div>
    }
}

fn render_status(status: &StatusLine) -> Html {
    match status {
        StatusLine::Idle => html! {},
        StatusLine::Rejected(message) => html! { <p class="status status--warn">{ message }</p> },
        StatusLine::Solved(attempts) => {
            let noun = if *attempts == 1 { "guess" } else { "guesses" };
            html! { <p class="status status--solved">{ format!("Solved in {attempts} {noun}!") }</p> }
        }
        StatusLine::Error(message) => html! { <p class="status status--error">{ message }</p> },
    }
}

fn render_entry(entry: &HistoryEntry) -> Html {
    let ResultBlock { school, cells } = &entry.block;

    let logo = match &school.logo_url {
        Some(url) => html! { <img class="result-logo" src={url.clone()} alt={school.name.clone()} /> },
        None => html! {},
    };

    html! {
        <div class="history-item" key={entry.id}>
            <div class="history-grid">
                <div class={classes!("result-box", "result-box--wide", school.category.css_class())}>
                    <p class="eyebrow">{ "School" }</p>
                    <div class="school-row">
                        { logo }
                        <p class="result-box__value result-box__value--school">{ &school.name }</p>
                    </div>
                </div>
                { for cells.iter().map(|cell| render_box(
                    cell.label(),
                    &cell.text,
                    cell.category,
                    cell.attribute.is_narrow(),
                )) }
            </div>
        </div>
    }
}

fn render_box(label: &str, value: &str, category: Category, narrow: bool) -> Html {
    html! {
        <div class={classes!(
            "result-box",
            category.css_class(),
            if narrow { Some("result-box--narrow") } else { None }
        )}>
            <p class="eyebrow">{ label }</p>
            <p class="result-box__value">{ value }</p>
        </div>
    }
}

#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    let config = load_config();
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
