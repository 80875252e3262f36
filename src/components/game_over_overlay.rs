use super::leaderboard_panel::{LeaderboardPanel, SubmitStatus};
use crate::leaderboard::ScoreRow;
use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub total_score: u32,
    pub max_score: u32,
    pub total_secs: u64,
    pub restart: Callback<()>,
    pub leaderboard_enabled: bool,
    pub submit_status: SubmitStatus,
    pub top_scores: Vec<ScoreRow>,
    pub on_submit_score: Callback<String>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #58a6ff; padding:24px 32px; border-radius:12px; text-align:center; min-width:360px; z-index:20;">
            <h2 style="margin:0 0 12px 0; color:#58a6ff;">{"Game Over!"}</h2>
            <p style="margin:4px 0;">{"Your total score: "}<strong>{ props.total_score }</strong>{ format!(" / {}", props.max_score) }</p>
            <p style="margin:4px 0;">{ format!("Total Time: {}", format_time(props.total_secs)) }</p>
            <LeaderboardPanel
                enabled={props.leaderboard_enabled}
                status={props.submit_status.clone()}
                top_scores={props.top_scores.clone()}
                on_submit={props.on_submit_score.clone()}
            />
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={restart_btn}>{"Play Again"}</button>
            </div>
        </div>
    }
}
