use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudProps {
    pub round: u32,
    pub total_rounds: u32,
    pub total_score: u32,
    pub round_secs: u64,
    pub total_secs: u64,
}

#[function_component]
pub fn Hud(props: &HudProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:210px; display:flex; flex-direction:column; gap:8px; font-size:14px; z-index:10;">
            <div style={row_style}>
                <span style={label_style}>{"Round"}</span>
                <span style={value_style}>{ format!("{} / {}", props.round, props.total_rounds) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ props.total_score }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Round time"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format_time(props.round_secs) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Total time"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format_time(props.total_secs) }</span>
            </div>
        </div>
    }
}
