use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub can_submit: bool,
    pub can_advance: bool,
    pub on_submit: Callback<()>,
    pub on_next: Callback<()>,
    pub show_actual: bool,
    pub on_toggle_actual: Callback<()>,
    pub notice: Option<String>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let submit_cb = {
        let cb = props.on_submit.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let next_cb = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_cb = {
        let cb = props.on_toggle_actual.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px; z-index:10;">
        <button onclick={submit_cb} disabled={!props.can_submit}>{"Submit Guess"}</button>
        <button onclick={next_cb} disabled={!props.can_advance}>{"Next Round"}</button>
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer; font-size:12px;">
            <input type="checkbox" checked={props.show_actual} onclick={toggle_cb} />
            <span>{"Show actual location"}</span>
        </label>
        <div style="font-size:11px; opacity:0.7;">{"Hotkey: Space submits"}</div>
        { if let Some(txt) = &props.notice { html!{ <div style="font-size:12px; line-height:1.2; background:#1c2128; border:1px solid #f0883e; color:#f0883e; padding:4px 6px; border-radius:6px;">{ txt.clone() }</div> } } else { html!{} } }
    </div>}
}
