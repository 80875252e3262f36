use super::{
    controls_panel::ControlsPanel, game_over_overlay::GameOverOverlay, hud::Hud,
    leaderboard_panel::SubmitStatus, map_view::MapView, results_panel::ResultsPanel,
};
use crate::data::{LOCATIONS_PATH, fetch_locations, resolve_url};
use crate::leaderboard::{DEFAULT_LIMIT, LeaderboardConfig, LeaderboardStore, ScoreRow};
use crate::model::{GameAction, GameCoords, GameState, Phase, pick_location};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const SHOW_ACTUAL_KEY: &str = "dg_setting_show_actual";

fn load_show_actual() -> bool {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(v)) = store.get_item(SHOW_ACTUAL_KEY) {
                return !(v == "0" || v == "false");
            }
        }
    }
    true // default ON
}

fn random_pick(count: usize) -> usize {
    pick_location(&mut rand::thread_rng(), count)
}

#[function_component(App)]
pub fn app() -> Html {
    let game = use_reducer(GameState::default);
    let store = use_memo((), |_| LeaderboardStore::new(LeaderboardConfig::from_env()));
    let show_actual = use_state(load_show_actual);
    let submit_status = use_state(|| SubmitStatus::Idle);
    let top_scores = use_state(Vec::<ScoreRow>::new);
    let game_ref = use_mut_ref(|| game.clone());
    *game_ref.borrow_mut() = game.clone();

    // Load the location catalogue, then start round one
    {
        let dispatcher = game.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let page = web_sys::window()
                    .and_then(|w| w.location().href().ok())
                    .unwrap_or_default();
                let loaded = match resolve_url(&page, LOCATIONS_PATH) {
                    Ok(url) => fetch_locations(&url).await,
                    Err(e) => Err(e),
                };
                match loaded {
                    Ok(locations) => {
                        let pick = random_pick(locations.len());
                        dispatcher.dispatch(GameAction::LocationsLoaded(locations));
                        dispatcher.dispatch(GameAction::NextRound { pick });
                    }
                    Err(e) => {
                        log::error!("could not load locations: {}", e);
                        dispatcher.dispatch(GameAction::LocationsFailed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }
    // Seconds timer + Space to submit
    {
        let dispatcher = game.dispatcher();
        let game_ref = game_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let second_tick = {
                let dispatcher = dispatcher.clone();
                Closure::wrap(Box::new(move || {
                    dispatcher.dispatch(GameAction::TickSecond);
                }) as Box<dyn FnMut()>)
            };
            let keydown_cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                if e.code() != "Space" || !game_ref.borrow().can_submit() {
                    return;
                }
                e.prevent_default();
                dispatcher.dispatch(GameAction::Submit);
            }) as Box<dyn FnMut(_)>);
            let tick_id = window.as_ref().and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    second_tick.as_ref().unchecked_ref(),
                    1000,
                )
                .ok()
            });
            if let Some(w) = &window {
                let _ = w.add_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
            }
            move || {
                if let Some(w) = &window {
                    let _ = w.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                    if let Some(id) = tick_id {
                        w.clear_interval_with_handle(id);
                    }
                }
                let _keep_alive = (&second_tick, &keydown_cb);
            }
        });
    }
    // Persist the marker setting
    {
        let flag = *show_actual;
        use_effect_with(flag, move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item(SHOW_ACTUAL_KEY, if flag { "1" } else { "0" });
                }
            }
            || ()
        });
    }
    // Game over: show the current top scores
    {
        let over = game.phase == Phase::GameOver;
        let store = store.clone();
        let top_scores = top_scores.clone();
        let submit_status = submit_status.clone();
        use_effect_with(over, move |over| {
            if *over {
                submit_status.set(SubmitStatus::Idle);
                if store.is_enabled() {
                    spawn_local(async move {
                        top_scores.set(store.fetch_top_scores(DEFAULT_LIMIT).await);
                    });
                }
            }
            || ()
        });
    }

    let on_guess = {
        let game = game.clone();
        Callback::from(move |g: GameCoords| game.dispatch(GameAction::PlaceGuess(g)))
    };
    let on_submit = {
        let game = game.clone();
        Callback::from(move |()| game.dispatch(GameAction::Submit))
    };
    let on_next = {
        let game = game.clone();
        Callback::from(move |()| {
            let pick = random_pick(game.locations.len());
            game.dispatch(GameAction::NextRound { pick });
        })
    };
    let on_restart = {
        let game = game.clone();
        Callback::from(move |()| {
            let pick = random_pick(game.locations.len());
            game.dispatch(GameAction::Restart { pick });
        })
    };
    let on_toggle_actual = {
        let show_actual = show_actual.clone();
        Callback::from(move |()| show_actual.set(!*show_actual))
    };
    let on_submit_score = {
        let store = store.clone();
        let submit_status = submit_status.clone();
        let top_scores = top_scores.clone();
        let score = game.total_score;
        let secs = game.total_elapsed_secs;
        let biome = game.last_biome().unwrap_or("All").to_string();
        Callback::from(move |username: String| {
            if *submit_status != SubmitStatus::Idle {
                return;
            }
            submit_status.set(SubmitStatus::Sending);
            let store = store.clone();
            let submit_status = submit_status.clone();
            let top_scores = top_scores.clone();
            let biome = biome.clone();
            spawn_local(async move {
                store.submit_score(&username, &biome, score, secs).await;
                top_scores.set(store.fetch_top_scores(DEFAULT_LIMIT).await);
                submit_status.set(SubmitStatus::Done);
            });
        })
    };

    let round = game.round.as_ref();
    let photo_style = match round {
        Some(r) => format!(
            "position:absolute; inset:0; background:#0e1116 url('{}') center / cover no-repeat;",
            r.location.image
        ),
        None => "position:absolute; inset:0; background:#0e1116;".to_string(),
    };
    let status_text = match &game.phase {
        Phase::Loading => Some("Loading locations...".to_string()),
        Phase::LoadFailed(reason) => Some(format!("Could not load locations: {}", reason)),
        _ => None,
    };
    let results = match (&game.phase, round) {
        (Phase::Revealed, Some(r)) => r.result.map(|result| {
            html! { <ResultsPanel biome={r.location.biome.clone()} {result} /> }
        }),
        _ => None,
    };

    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden; color:#e6edf3; font-family:sans-serif;">
        <div id="photo" style={photo_style}></div>
        <Hud
            round={game.round_number()}
            total_rounds={game.total_rounds}
            total_score={game.total_score}
            round_secs={round.map(|r| r.elapsed_secs).unwrap_or(0)}
            total_secs={game.total_elapsed_secs}
        />
        <ControlsPanel
            can_submit={game.can_submit()}
            can_advance={game.can_advance()}
            on_submit={on_submit}
            on_next={on_next}
            show_actual={*show_actual}
            on_toggle_actual={on_toggle_actual}
            notice={game.notice.clone()}
        />
        { results.unwrap_or_default() }
        <div style="position:absolute; right:12px; bottom:12px; width:40vw; height:45vh; min-width:280px; min-height:220px; border:2px solid #30363d; border-radius:8px; overflow:hidden; background:#082235; z-index:5;">
            <MapView
                round_id={game.round_id}
                actual={game.revealed_location()}
                show_actual={*show_actual}
                can_guess={game.can_submit()}
                on_guess={on_guess}
            />
        </div>
        if let Some(text) = status_text {
            <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.8); padding:16px 24px; border-radius:8px; z-index:20;">{ text }</div>
        }
        <GameOverOverlay
            show={game.phase == Phase::GameOver}
            total_score={game.total_score}
            max_score={game.max_total_score()}
            total_secs={game.total_elapsed_secs}
            restart={on_restart}
            leaderboard_enabled={store.is_enabled()}
            submit_status={(*submit_status).clone()}
            top_scores={(*top_scores).clone()}
            on_submit_score={on_submit_score}
        />
    </div>}
}
