#![cfg(target_arch = "wasm32")]

use portal_core::{
    CardSection, CardTone, ChatMessage, MessageBody, Modal, RichCard, Sender, Toast, ToastKind,
    ToastPhase, UploadedFile,
};
use portal_engine::{PortalController, QUICK_PROMPTS};
use web_sys::{console, DragEvent, HtmlInputElement, KeyboardEvent, SubmitEvent};
use yew::prelude::*;
use yew::TargetCast;

use crate::host::{scroll_to_section, PortalHost};
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct PortalViewProps {
    pub host: PortalHost,
}

#[function_component(PortalView)]
pub fn portal_view(props: &PortalViewProps) -> Html {
    let host = props.host.clone();
    let force_update = use_force_update();

    {
        let host = host.clone();
        use_effect_with((), move |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            host.set_redraw(Some(Callback::from(move |_| force_update.force_update())));
            move || host.set_redraw(None)
        });
    }

    let controller = host.controller();

    html! {
        <div class="portal-root">
            { render_nav() }
            { render_upload(&host, &controller) }
            { render_booking(&host) }
            { render_store(&host) }
            <button
                type="button"
                class="portal-launcher"
                aria-label="Open medical assistant"
                onclick={ on(&host, |h| h.dispatch(PortalController::toggle_chatbot)) }
            >
                {"💬"}
            </button>
            { render_chatbot(&host, &controller) }
            { render_video_call(&host, &controller) }
            { render_toasts(&host, controller.toasts()) }
        </div>
    }
}

/// Click handler that forwards to the host, ignoring the event.
fn on<F>(host: &PortalHost, action: F) -> Callback<MouseEvent>
where
    F: Fn(&PortalHost) + 'static,
{
    let host = host.clone();
    Callback::from(move |_: MouseEvent| action(&host))
}

fn render_nav() -> Html {
    let links = [
        ("upload", "Reports"),
        ("appointments", "Appointments"),
        ("store", "Pharmacy"),
    ];

    html! {
        <nav class="portal-nav">
            <span class="portal-brand">{"MediCare Pro"}</span>
            <ul>
                {
                    for links.into_iter().map(|(id, label)| {
                        let onclick = Callback::from(move |event: MouseEvent| {
                            event.prevent_default();
                            scroll_to_section(id);
                        });
                        html! {
                            <li><a href={format!("#{id}")} {onclick}>{ label }</a></li>
                        }
                    })
                }
            </ul>
        </nav>
    }
}

fn render_upload(host: &PortalHost, controller: &PortalController) -> Html {
    let ondragover = {
        let host = host.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            host.set_drag_active(true);
        })
    };
    let ondragleave = {
        let host = host.clone();
        Callback::from(move |_: DragEvent| host.set_drag_active(false))
    };
    let ondrop = {
        let host = host.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            host.upload(event.data_transfer().and_then(|transfer| transfer.files()));
        })
    };
    let onchange = {
        let host = host.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let files = input.files();
            host.upload(files);
            input.set_value("");
        })
    };

    html! {
        <section id="upload" class="portal-section">
            <header class="portal-section-header">
                <h2>{"AI report analysis"}</h2>
                <p>{"Upload lab results, X-rays or ECGs for an instant summary."}</p>
            </header>
            <div
                id="dropZone"
                class={classes!("portal-dropzone", controller.is_drag_active().then_some("dragover"))}
                {ondragover}
                {ondragleave}
                {ondrop}
                onclick={ on(host, PortalHost::open_file_picker) }
            >
                <span class="portal-dropzone-icon">{"☁️"}</span>
                <p>{"Drag and drop your reports here, or click to browse"}</p>
                <p class="portal-muted">{"PDF, JPG or PNG up to 10MB"}</p>
            </div>
            <input
                id="fileInput"
                ref={host.file_input().clone()}
                type="file"
                multiple=true
                accept=".pdf,.jpg,.jpeg,.png"
                class="hidden"
                {onchange}
            />
            <div
                id="uploadedFiles"
                class={classes!("portal-uploads", (!controller.has_uploads()).then_some("hidden"))}
            >
                <h3>{"Uploaded files"}</h3>
                <div id="filesList">
                    { for controller.files().iter().map(|file| render_file(host, file)) }
                </div>
            </div>
        </section>
    }
}

fn render_file(host: &PortalHost, file: &UploadedFile) -> Html {
    let icon = match file.mime_type.icon() {
        "pdf" => "📄",
        _ => "🖼️",
    };
    let onremove = {
        let host = host.clone();
        let name = file.name.clone();
        Callback::from(move |_: MouseEvent| {
            host.dispatch(|controller| controller.remove_file(&name));
        })
    };

    html! {
        <div class="portal-file" data-type={file.mime_type.as_mime()}>
            <div class="portal-file-info">
                <span class="portal-file-icon" data-icon={file.mime_type.icon()}>{ icon }</span>
                <div>
                    <p class="portal-file-name">{ file.name.clone() }</p>
                    <p class="portal-muted">{ file.display_size() }</p>
                </div>
            </div>
            <div class="portal-file-actions">
                <span class="portal-file-status">{"✓ Uploaded"}</span>
                <button type="button" class="portal-icon-button" aria-label="Remove file" onclick={onremove}>
                    {"🗑"}
                </button>
            </div>
        </div>
    }
}

fn render_store(host: &PortalHost) -> Html {
    html! {
        <section id="store" class="portal-section">
            <header class="portal-section-header">
                <h2>{"Pharmacy"}</h2>
                <p>{"Ask the assistant about a medicine before you order it."}</p>
            </header>
            <button
                type="button"
                class="portal-button"
                onclick={ on(host, |h| {
                    h.dispatch(|c| c.ask_assistant("I need medicine information"))
                }) }
            >
                {"💊 Medicine information"}
            </button>
        </section>
    }
}

fn render_booking(host: &PortalHost) -> Html {
    let onsubmit = {
        let host = host.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            host.submit_booking();
        })
    };

    html! {
        <section id="appointments" class="portal-section">
            <header class="portal-section-header">
                <h2>{"Book an appointment"}</h2>
                <p>{"Pick a department and we will confirm instantly."}</p>
            </header>
            <form id="appointmentForm" class="portal-form" ref={host.appointment_form().clone()} {onsubmit}>
                <label>
                    <span>{"Full name"}</span>
                    <input type="text" name="name" placeholder="Jane Doe" />
                </label>
                <label>
                    <span>{"Phone"}</span>
                    <input type="tel" name="phone" placeholder="+1 555 0100" />
                </label>
                <label>
                    <span>{"Preferred date"}</span>
                    <input type="date" name="date" />
                </label>
                <label>
                    <span>{"Department"}</span>
                    <select name="department">
                        <option value="general">{"General medicine"}</option>
                        <option value="cardiology">{"Cardiology"}</option>
                        <option value="radiology">{"Radiology"}</option>
                        <option value="pediatrics">{"Pediatrics"}</option>
                    </select>
                </label>
                <label class="portal-form-wide">
                    <span>{"Reason for visit"}</span>
                    <textarea name="reason" rows="3" />
                </label>
                <button type="submit" class="portal-button portal-form-wide">{"Book appointment"}</button>
            </form>
        </section>
    }
}

fn render_chatbot(host: &PortalHost, controller: &PortalController) -> Html {
    let open = controller.is_open(Modal::Chatbot);
    let onkeypress = {
        let host = host.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                host.submit_chat();
            }
        })
    };

    html! {
        <div id="chatbotModal" class={classes!("portal-chatbot", (!open).then_some("hidden"))}>
            <header class="portal-chatbot-header">
                <div>
                    <h3>{"AI Medical Assistant"}</h3>
                    <span class="portal-status">{"Online"}</span>
                </div>
                <button
                    type="button"
                    class="portal-icon-button"
                    aria-label="Close assistant"
                    onclick={ on(host, |h| h.dispatch(PortalController::close_chatbot)) }
                >
                    {"×"}
                </button>
            </header>
            <div id="chatMessages" class="portal-chat-log" ref={host.chat_log().clone()} aria-live="polite">
                { for controller.transcript().iter().map(|message| render_message(host, message)) }
                {
                    if controller.is_typing() {
                        html! {
                            <div id="typingIndicator" class="portal-message">
                                <div class="portal-typing"><span></span><span></span><span></span></div>
                            </div>
                        }
                    } else {
                        Html::default()
                    }
                }
            </div>
            <div class="portal-quick-prompts">
                {
                    for QUICK_PROMPTS.iter().map(|prompt| {
                        let host = host.clone();
                        let onclick = Callback::from(move |_: MouseEvent| {
                            host.dispatch(|controller| controller.quick_message(prompt));
                        });
                        html! { <button type="button" class="portal-chip" {onclick}>{ *prompt }</button> }
                    })
                }
            </div>
            <div class="portal-chat-input">
                <input
                    id="chatInput"
                    ref={host.chat_input().clone()}
                    type="text"
                    placeholder="Describe your symptoms or ask a question..."
                    {onkeypress}
                />
                <button type="button" class="portal-button" onclick={ on(host, PortalHost::submit_chat) }>
                    {"Send"}
                </button>
            </div>
        </div>
    }
}

fn render_message(host: &PortalHost, message: &ChatMessage) -> Html {
    let sender = match message.sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    };
    let content = match &message.body {
        MessageBody::PlainText(text) => html! { <p class="portal-message-text">{ text.clone() }</p> },
        MessageBody::Rich(card) => render_card(host, card),
    };

    html! {
        <div class="portal-message" data-sender={sender}>
            <div class="portal-bubble">{ content }</div>
        </div>
    }
}

fn render_card(host: &PortalHost, card: &RichCard) -> Html {
    html! {
        <div class="portal-card" data-tone={tone_level(card.tone)}>
            <h4>{ format!("{} {}", card.icon, card.title) }</h4>
            { card.summary.as_ref().map(|summary| html! { <p>{ summary.clone() }</p> }).unwrap_or_default() }
            { for card.sections.iter().map(render_section) }
            { card.notice.as_ref().map(|notice| html! { <div class="portal-card-notice">{ notice.clone() }</div> }).unwrap_or_default() }
            <div class="portal-card-footer">
                {
                    card.badge.map(|urgency| html! {
                        <span class="portal-badge" data-level={urgency.level()}>
                            { format!("{} Priority", urgency.label()) }
                        </span>
                    }).unwrap_or_default()
                }
                {
                    for card.actions.iter().map(|button| {
                        let host = host.clone();
                        let action = button.action;
                        let onclick = Callback::from(move |_: MouseEvent| {
                            host.dispatch(|controller| controller.run_action(action));
                        });
                        html! { <button type="button" class="portal-card-action" {onclick}>{ button.label.clone() }</button> }
                    })
                }
            </div>
        </div>
    }
}

fn render_section(section: &CardSection) -> Html {
    html! {
        <div class="portal-card-section">
            <strong>{ section.heading.clone() }</strong>
            { section.body.as_ref().map(|body| html! { <p>{ body.clone() }</p> }).unwrap_or_default() }
            {
                if section.items.is_empty() {
                    Html::default()
                } else {
                    html! { <ul>{ for section.items.iter().map(|item| html! { <li>{ item.clone() }</li> }) }</ul> }
                }
            }
        </div>
    }
}

fn render_video_call(host: &PortalHost, controller: &PortalController) -> Html {
    let open = controller.is_open(Modal::VideoCall);

    html! {
        <div id="videoCallModal" class={classes!("portal-overlay", (!open).then_some("hidden"))}>
            <div class="portal-video">
                <div class="portal-video-stage">
                    <span class="portal-video-avatar">{"👩‍⚕️"}</span>
                    <p>{"Video consultation"}</p>
                    <p class="portal-muted">{"A doctor will join shortly."}</p>
                </div>
                <button
                    type="button"
                    class="portal-button portal-button-danger"
                    onclick={ on(host, |h| h.dispatch(PortalController::end_video_call)) }
                >
                    {"End call"}
                </button>
            </div>
        </div>
    }
}

fn render_toasts(host: &PortalHost, toasts: &[Toast]) -> Html {
    html! {
        <div class="portal-toasts">
            { for toasts.iter().map(|toast| render_toast(host, toast)) }
        </div>
    }
}

fn render_toast(host: &PortalHost, toast: &Toast) -> Html {
    let id = toast.id;
    let ondismiss = {
        let host = host.clone();
        Callback::from(move |_: MouseEvent| {
            host.update(|controller| {
                controller.dismiss_toast(id);
            });
        })
    };
    let phase = match toast.phase {
        ToastPhase::Entering => "entering",
        ToastPhase::Shown => "shown",
        ToastPhase::Leaving => "leaving",
    };

    html! {
        <div class="portal-toast" data-kind={toast_level(toast.kind)} data-phase={phase} key={id.0}>
            <span>{ toast.message.clone() }</span>
            <button type="button" aria-label="Dismiss" onclick={ondismiss}>{"×"}</button>
        </div>
    }
}

fn tone_level(tone: CardTone) -> &'static str {
    match tone {
        CardTone::Info => "info",
        CardTone::Danger => "danger",
        CardTone::Success => "success",
        CardTone::Caution => "caution",
        CardTone::Accent => "accent",
    }
}

fn toast_level(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "success",
        ToastKind::Error => "error",
        ToastKind::Info => "info",
        ToastKind::Warning => "warning",
    }
}
