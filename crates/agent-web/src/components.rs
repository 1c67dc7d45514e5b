//! UI Components

use leptos::prelude::*;

use crate::api::ChatMessage;

/// Message bubble component
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let class = format!("message message-{}", message.role);
    let label = if message.role == "user" { "👤 You" } else { "🤖 Bot" };

    view! {
        <div class=class>
            <span class="role">{label}</span>
            <p class="content">{message.content.clone()}</p>
            {message.debug.map(|detail| view! { <DebugPanel detail=detail /> })}
        </div>
    }
}

/// Collapsible error detail under a failed answer
#[component]
pub fn DebugPanel(detail: String) -> impl IntoView {
    view! {
        <details class="debug">
            <summary>"Debug info"</summary>
            <pre>{detail}</pre>
        </details>
    }
}

/// Clickable sample questions
#[component]
pub fn SampleQuestions(on_pick: Callback<String>) -> impl IntoView {
    view! {
        <h2>"💡 Sample Questions"</h2>
        <ul class="samples">
            {crate::SAMPLE_QUESTIONS
                .iter()
                .map(|q| {
                    let question = (*q).to_string();
                    view! {
                        <li>
                            <button class="link" on:click=move |_| on_pick.run(question.clone())>
                                {*q}
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
