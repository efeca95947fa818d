use yew::prelude::*;

use crate::tooltip::Topic;

#[derive(Properties, PartialEq)]
pub struct InfoModalProps {
    pub topic: Topic,
    pub on_close: Callback<()>,
}

#[function_component(InfoModal)]
pub fn info_modal(props: &InfoModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_close.emit(());
        })
    };

    // Clicks inside the dialog must not reach the backdrop.
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="info-backdrop" onclick={close.clone()}>
            <div class="info-dialog" role="dialog" aria-modal="true" onclick={keep_open}>
                <button class="info-close" aria-label="Close" onclick={close}>{"×"}</button>
                <h2>{props.topic.title()}</h2>
                <p>{props.topic.body()}</p>
            </div>
        </div>
    }
}
