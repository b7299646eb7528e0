use yew::prelude::*;

use crate::state::{format_date, session_meta, EMPTY_SESSION_LIST};
use crate::types::SessionSummary;

#[derive(Properties, PartialEq)]
pub struct SessionListProps {
    pub sessions: Vec<SessionSummary>,
    pub active_id: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component(SessionList)]
pub fn session_list(props: &SessionListProps) -> Html {
    if props.sessions.is_empty() {
        return html! {
            <div class="hint" style="color:#888; font-size:0.9em;">{ EMPTY_SESSION_LIST }</div>
        };
    }

    html! {
        <div id="sessionList" style="display:flex; flex-direction:column; gap:0.5em; overflow-y:auto;">
            { for props.sessions.iter().map(|session| {
                let active = props.active_id.as_deref() == Some(session.id.as_str());
                let on_click = {
                    let id = session.id.clone();
                    let on_select = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
                };
                html! {
                    <div
                        onclick={on_click}
                        class={classes!("session-item", active.then_some("active"))}
                        style={format!(
                            "display:flex; justify-content:space-between; padding:0.6em 0.75em; border-radius:6px; cursor:pointer; border:1px solid {};{}",
                            if active { "#007bff" } else { "#ddd" },
                            if active { " background:#e7f3ff;" } else { " background:white;" }
                        )}
                    >
                        <div class="session-left">
                            <div class="session-name" style="font-weight:bold; color:#333;">{ &session.name }</div>
                            <div class="session-meta" style="font-size:0.8em; color:#666;">{ session_meta(session) }</div>
                        </div>
                        <div class="session-right" style="font-size:0.75em; color:#888;">
                            { format_date(&session.created_at) }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
