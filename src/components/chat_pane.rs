use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::state::{Bubble, Header, Speaker};

#[derive(Properties, PartialEq)]
pub struct ChatPaneProps {
    pub header: Header,
    pub bubbles: Vec<Bubble>,
    pub on_send: Callback<String>,
    pub on_clear: Callback<()>,
}

fn render_bubble(bubble: &Bubble) -> Html {
    let (align, background) = match bubble.speaker {
        Speaker::User => ("flex-end", "#007bff; color:white"),
        Speaker::Bot => ("flex-start", "#f1f3f5; color:#222"),
    };
    html! {
        <div key={bubble.id} class={bubble.speaker.class()} style={format!("display:flex; justify-content:{};", align)}>
            <div class="bubble" style={format!("max-width:70%; padding:0.6em 0.9em; border-radius:10px; white-space:pre-wrap; background:{};", background)}>
                if bubble.typing {
                    <span class="typing">
                        <span class="dot"></span><span class="dot"></span><span class="dot"></span>
                    </span>
                } else {
                    { &bubble.text }
                }
                if let Some(meta) = &bubble.meta {
                    <div class="meta" style="margin-top:0.4em; font-size:0.75em; opacity:0.75;">{ meta }</div>
                }
            </div>
        </div>
    }
}

#[function_component(ChatPane)]
pub fn chat_pane(props: &ChatPaneProps) -> Html {
    let chat_ref = use_node_ref();
    let draft = use_state(String::new);

    // Keep the newest bubble in view.
    {
        let chat_ref = chat_ref.clone();
        let last = props.bubbles.last().map(|b| b.id);
        use_effect_with(last, move |_| {
            if let Some(chat) = chat_ref.cast::<Element>() {
                chat.set_scroll_top(chat.scroll_height());
            }
            || ()
        });
    }

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            draft.set(target.value());
        })
    };

    // Whitespace-only input stays in the box and is never sent.
    let submit = {
        let draft = draft.clone();
        let on_send = props.on_send.clone();
        Callback::from(move |_: ()| {
            let text = (*draft).clone();
            if text.trim().is_empty() {
                return;
            }
            draft.set(String::new());
            on_send.emit(text);
        })
    };

    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                submit.emit(());
            }
        })
    };

    let on_send_click = Callback::from(move |_: MouseEvent| submit.emit(()));

    let on_clear_click = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <div style="flex:1; display:flex; flex-direction:column; min-width:0;">
            <div style="display:flex; justify-content:space-between; align-items:center; padding:1em 1.5em; border-bottom:1px solid #ddd;">
                <div>
                    <div id="activeChatName" style="font-weight:bold; font-size:1.1em; color:#333;">{ &props.header.name }</div>
                    <div id="activeChatMeta" style="font-size:0.8em; color:#888;">{ &props.header.meta }</div>
                </div>
                <button id="clearChat" onclick={on_clear_click} style="padding:0.4em 0.9em; border:1px solid #ccc; border-radius:4px; background:white; cursor:pointer;">
                    { "Clear view" }
                </button>
            </div>
            <div id="chat" ref={chat_ref} style="flex:1; overflow-y:auto; padding:1em 1.5em; display:flex; flex-direction:column; gap:0.6em;">
                { for props.bubbles.iter().map(render_bubble) }
            </div>
            <div style="display:flex; gap:0.5em; padding:1em 1.5em; border-top:1px solid #ddd;">
                <input
                    id="input"
                    type="text"
                    placeholder="Ask something about your PDFs..."
                    value={(*draft).clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    style="flex:1; padding:0.6em; border:1px solid #ccc; border-radius:4px;"
                />
                <button id="send" onclick={on_send_click} style="padding:0.6em 1.2em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                    { "Send" }
                </button>
            </div>
        </div>
    }
}
