use crate::leaderboard::ScoreRow;
use crate::util::format_time;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Done,
}

#[derive(Properties, PartialEq, Clone)]
pub struct LeaderboardPanelProps {
    pub enabled: bool,
    pub status: SubmitStatus,
    pub top_scores: Vec<ScoreRow>,
    pub on_submit: Callback<String>,
}

#[function_component]
pub fn LeaderboardPanel(props: &LeaderboardPanelProps) -> Html {
    let username = use_state(String::new);
    if !props.enabled {
        return html! {
            <div style="font-size:11px; opacity:0.6; margin-top:12px;">{"Leaderboard offline"}</div>
        };
    }
    let oninput = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let submit_cb = {
        let cb = props.on_submit.clone();
        let username = username.clone();
        Callback::from(move |_| cb.emit((*username).clone()))
    };
    let form = match props.status {
        SubmitStatus::Idle => html! {
            <div style="display:flex; gap:8px; justify-content:center;">
                <input type="text" placeholder="Your name" maxlength="32" value={(*username).clone()} {oninput} />
                <button onclick={submit_cb}>{"Submit Score"}</button>
            </div>
        },
        SubmitStatus::Sending => html! { <div style="font-size:12px; opacity:0.8;">{"Saving..."}</div> },
        SubmitStatus::Done => html! {},
    };
    html! {
        <div style="margin-top:16px; display:flex; flex-direction:column; gap:8px;">
            { form }
            if !props.top_scores.is_empty() {
                <table style="width:100%; font-size:12px; border-collapse:collapse;">
                    <tr style="opacity:0.7;">
                        <th>{"#"}</th><th>{"Name"}</th><th>{"Biome"}</th><th>{"Score"}</th><th>{"Time"}</th>
                    </tr>
                    { for props.top_scores.iter().enumerate().map(|(i, row)| html! {
                        <tr>
                            <td>{ i + 1 }</td>
                            <td>{ row.username.clone() }</td>
                            <td>{ row.biome.clone() }</td>
                            <td style="text-align:right; font-variant-numeric:tabular-nums;">{ row.score }</td>
                            <td style="text-align:right;">{ format_time(row.time) }</td>
                        </tr>
                    }) }
                </table>
            }
        </div>
    }
}
