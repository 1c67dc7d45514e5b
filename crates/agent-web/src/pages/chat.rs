//! Chat Page

use leptos::prelude::*;

use crate::api::{self, ChatMessage};
use crate::components::{MessageBubble, SampleQuestions};

const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

#[component]
pub fn ChatPage() -> impl IntoView {
    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let (input, set_input) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (session_id, set_session_id) = signal(None::<String>);
    let (title, set_title) = signal(String::new());
    let (config_error, set_config_error) = signal(None::<String>);

    // Open a session up front; a refusal here means the server has no API key
    leptos::task::spawn_local(async move {
        match api::create_session().await {
            Ok(view) => {
                set_session_id.set(Some(view.session_id));
                set_title.set(view.title);
                set_messages.set(view.messages);
            }
            Err(e) => set_config_error.set(Some(e)),
        }
    });

    let submit = move |text: String| {
        let text = text.trim().to_string();
        let Some(id) = session_id.get() else {
            return;
        };
        if text.is_empty() || loading.get() {
            return;
        }

        set_messages.update(|msgs| msgs.push(ChatMessage::user(text.clone())));
        set_input.set(String::new());
        set_loading.set(true);

        leptos::task::spawn_local(async move {
            let reply = match api::send_chat(&id, &text).await {
                Ok(reply) => {
                    set_session_id.set(Some(reply.session_id));
                    ChatMessage::assistant(reply.message, reply.debug.filter(|_| reply.failed))
                }
                Err(e) => ChatMessage::assistant(APOLOGY, Some(e)),
            };
            set_messages.update(|msgs| msgs.push(reply));
            if title.get_untracked().starts_with("Session ") {
                set_title.set(text.chars().take(50).collect());
            }
            set_loading.set(false);
        });
    };

    let send = move || submit(input.get());

    let clear = move |_| {
        let Some(id) = session_id.get() else {
            return;
        };
        leptos::task::spawn_local(async move {
            match api::clear_session(&id).await {
                Ok(view) => {
                    set_title.set(view.title);
                    set_messages.set(view.messages);
                }
                Err(e) => set_messages.update(|msgs| msgs.push(ChatMessage::assistant(APOLOGY, Some(e)))),
            }
        });
    };

    let pick = Callback::new(move |question: String| submit(question));

    view! {
        <Show
            when=move || config_error.get().is_none()
            fallback=move || view! {
                <div class="config-error">
                    <h2>"❌ Assistant not configured"</h2>
                    <p>{move || config_error.get().unwrap_or_default()}</p>
                    <ol>
                        <li>"Sign up for free at https://console.groq.com/"</li>
                        <li>"Get your API key"</li>
                        <li>"Create a .env file and add: GROQ_API_KEY=your_key_here"</li>
                        <li>"Restart the server"</li>
                    </ol>
                </div>
            }
        >
            <div class="chat">
                <aside class="sidebar">
                    <h2 class="title">{move || title.get()}</h2>
                    <SampleQuestions on_pick=pick />
                    <button class="btn" on:click=clear disabled=move || loading.get()>
                        "🗑️ Clear Chat"
                    </button>
                </aside>

                <section class="chat-main">
                    <header>
                        <h1>"🤖 Conversational Knowledge Bot"</h1>
                        <p class="caption">"Powered by: Groq LLM + DuckDuckGo + Wikipedia"</p>
                    </header>

                    <div class="messages">
                        <For
                            each=move || messages.get().into_iter().enumerate()
                            key=|(i, msg)| format!("{i}-{}", msg.role)
                            children=move |(_, msg)| view! { <MessageBubble message=msg /> }
                        />
                        <Show when=move || loading.get()>
                            <div class="message loading">"Thinking..."</div>
                        </Show>
                    </div>

                    <div class="input-area">
                        <textarea
                            placeholder="Ask me anything..."
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" && !ev.shift_key() {
                                    ev.prevent_default();
                                    send();
                                }
                            }
                        />
                        <button on:click=move |_| send() disabled=move || loading.get()>
                            {move || if loading.get() { "..." } else { "Send" }}
                        </button>
                    </div>
                </section>
            </div>
        </Show>
    }
}
