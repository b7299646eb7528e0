use std::rc::Rc;

use web_sys::File;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::HttpBackend;
use crate::client::ChatClient;
use crate::components::{ChatPane, SessionList, UploadPanel};
use crate::config::ClientConfig;
use crate::storage::LocalSessionStore;

pub type BrowserClient = ChatClient<HttpBackend, LocalSessionStore>;

#[function_component(App)]
pub fn app() -> Html {
    let trigger = use_force_update();
    let client = use_state(move || {
        let config = ClientConfig::from_env();
        let store = LocalSessionStore::new(config.storage_key.clone());
        Rc::new(BrowserClient::new(HttpBackend::new(config), store, move || {
            trigger.force_update()
        }))
    });
    let client: Rc<BrowserClient> = (*client).clone();

    // Boot on mount
    {
        let client = client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Err(e) = client.boot().await {
                    log::error!("boot failed, no session available: {}", e);
                }
            });
            || ()
        });
    }

    let on_select = {
        let client = client.clone();
        Callback::from(move |session_id: String| {
            let client = client.clone();
            spawn_local(async move {
                if let Err(e) = client.select_session(&session_id).await {
                    log::error!("could not load session {}: {}", session_id, e);
                }
            });
        })
    };

    let on_new_chat = {
        let client = client.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            spawn_local(async move {
                if let Err(e) = client.create_session().await {
                    log::error!("could not create session: {}", e);
                }
            });
        })
    };

    let on_send = {
        let client = client.clone();
        Callback::from(move |text: String| {
            let client = client.clone();
            spawn_local(async move { client.send_message(&text).await });
        })
    };

    let on_clear = {
        let client = client.clone();
        Callback::from(move |_: ()| client.clear_view())
    };

    let on_upload = {
        let client = client.clone();
        Callback::from(move |files: Vec<File>| {
            let client = client.clone();
            spawn_local(async move { client.upload(files).await });
        })
    };

    let state = client.snapshot();

    html! {
        <div style="display:flex; flex-direction:row; height:100vh; font-family:Arial,sans-serif;">
            if !state.booted {
                <div id="pageLoader" style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(255,255,255,0.9); z-index:10; color:#0056b3;">
                    <strong>{ "Loading chats..." }</strong>
                </div>
            }
            <div style="width:320px; min-width:280px; padding:1.5em; background:#f8f9fa; border-right:1px solid #ddd; display:flex; flex-direction:column; gap:1em; overflow-y:auto;">
                <h1 style="margin:0; font-size:1.3em; color:#333;">{ "PDF Chat" }</h1>
                <button id="newChat" onclick={on_new_chat} style="width:100%; padding:0.6em 0; background:#198754; color:white; border:none; border-radius:4px; cursor:pointer;">
                    { "+ New chat" }
                </button>
                <SessionList
                    sessions={state.sessions.clone()}
                    active_id={state.active_session_id.clone()}
                    {on_select}
                />
                <label style="font-weight:bold; color:#555;">{ "PDFs" }</label>
                <UploadPanel pdf_list={state.pdf_list.clone()} {on_upload} />
            </div>
            <ChatPane
                header={state.header.clone()}
                bubbles={state.bubbles.clone()}
                {on_send}
                {on_clear}
            />
        </div>
    }
}
