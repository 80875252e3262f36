use crate::model::RoundResult;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultsPanelProps {
    pub biome: String,
    pub result: RoundResult,
}

#[function_component]
pub fn ResultsPanel(props: &ResultsPanelProps) -> Html {
    let r = props.result;
    html! {
        <div style="position:absolute; top:50%; left:12px; transform:translateY(-50%); background:rgba(0,0,0,0.8); border:1px solid #30363d; border-radius:8px; padding:12px 16px; min-width:200px; z-index:10;">
            <div style="font-size:16px; font-weight:700; margin-bottom:6px;">{ props.biome.clone() }</div>
            <div>{ format!("Distance: {}m", r.distance.round() as i64) }</div>
            <div>{ format!("Score this round: {}", r.score) }</div>
            <div style="opacity:0.75; font-size:12px;">{ format!("Accuracy: {:.1}%", r.accuracy_percent) }</div>
        </div>
    }
}
