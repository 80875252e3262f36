use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    /// Refit the whole map.
    pub on_center: Callback<()>,
}

const BUTTON_STYLE: &str = "min-width:28px; height:28px; padding:0 6px; background:rgba(22,27,34,0.9); color:#e6edf3; border:1px solid #30363d; border-radius:6px; cursor:pointer;";

/// Zoom buttons overlaid on the map's top-left corner.
#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let zoom_in = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zoom_out = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let center = {
        let cb = props.on_center.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:8px; left:8px; display:flex; flex-direction:column; gap:4px; z-index:6;">
        <button style={BUTTON_STYLE} title="Zoom in" onclick={zoom_in}>{"+"}</button>
        <button style={BUTTON_STYLE} title="Zoom out" onclick={zoom_out}>{"-"}</button>
        <button style={BUTTON_STYLE} title="Show whole map" onclick={center}>{"Center"}</button>
    </div>}
}
