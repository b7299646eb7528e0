use web_sys::{DragEvent, File, FileList, HtmlInputElement};
use yew::prelude::*;

use crate::state::EMPTY_PDF_LIST;

fn files_of(list: Option<FileList>) -> Vec<File> {
    match list {
        Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
        None => Vec::new(),
    }
}

#[derive(Properties, PartialEq)]
pub struct UploadPanelProps {
    pub pdf_list: Vec<String>,
    pub on_upload: Callback<Vec<File>>,
}

/// File picker, dropzone and the PDFs indexed for the active chat.
#[function_component(UploadPanel)]
pub fn upload_panel(props: &UploadPanelProps) -> Html {
    let selected = use_state(Vec::<File>::new);
    let dragover = use_state(|| false);

    let on_file_change = {
        let selected = selected.clone();
        Callback::from(move |event: Event| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            selected.set(files_of(target.files()));
        })
    };

    let on_dragover = {
        let dragover = dragover.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragover.set(true);
        })
    };

    let on_dragleave = {
        let dragover = dragover.clone();
        Callback::from(move |_: DragEvent| dragover.set(false))
    };

    let on_drop = {
        let dragover = dragover.clone();
        let selected = selected.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragover.set(false);
            let dropped = files_of(event.data_transfer().and_then(|dt| dt.files()));
            if !dropped.is_empty() {
                selected.set(dropped);
            }
        })
    };

    let on_click = {
        let selected = selected.clone();
        let on_upload = props.on_upload.clone();
        Callback::from(move |_: MouseEvent| on_upload.emit((*selected).clone()))
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:0.75em;">
            <div
                id="dropzone"
                class={classes!("dropzone", (*dragover).then_some("dragover"))}
                ondragover={on_dragover}
                ondragleave={on_dragleave}
                ondrop={on_drop}
                style={format!(
                    "padding:1em; border:2px dashed {}; border-radius:6px; text-align:center; color:#555;",
                    if *dragover { "#007bff" } else { "#ccc" }
                )}
            >
                <input type="file" id="pdfs" accept="application/pdf" multiple=true onchange={on_file_change} style="width:100%;" />
                <div style="margin-top:0.5em; font-size:0.85em;">
                    { match selected.len() {
                        0 => "Drop PDFs here or choose files".to_string(),
                        n => format!("{} file(s) selected", n),
                    }}
                </div>
            </div>
            <button id="upload" onclick={on_click} style="width:100%; padding:0.6em 0; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                { "Upload & Index" }
            </button>
            <div id="pdfList" style="display:flex; flex-direction:column; gap:0.25em;">
                { if props.pdf_list.is_empty() {
                    html! { <div class="hint" style="color:#888; font-size:0.9em;">{ EMPTY_PDF_LIST }</div> }
                } else {
                    html! {
                        <>
                            { for props.pdf_list.iter().map(|name| html! {
                                <div class="pdf-item" style="font-size:0.9em; padding:0.3em 0.5em; background:white; border:1px solid #eee; border-radius:4px;">
                                    { name }
                                </div>
                            }) }
                        </>
                    }
                }}
            </div>
        </div>
    }
}
