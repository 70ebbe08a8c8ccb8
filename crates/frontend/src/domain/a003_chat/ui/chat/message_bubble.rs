use crate::shared::icons::icon;
use contracts::domain::a003_chat::{ChatRole, Transcript, TurnId, TurnStatus};
use leptos::prelude::*;

/// Реплика переписки; ответ ассистента перерисовывается по мере прихода токенов
#[component]
#[allow(non_snake_case)]
pub fn MessageBubble(id: TurnId, transcript: RwSignal<Transcript>) -> impl IntoView {
    let turn = Memo::new(move |_| {
        transcript.with(|t| t.turns().iter().find(|turn| turn.id == id).cloned())
    });

    move || {
        turn.get().map(|turn| {
            let is_user = turn.role == ChatRole::User;
            let attachments = turn.attachments.clone();
            let (failure, streaming) = match &turn.status {
                TurnStatus::Failed { message } => (Some(message.clone()), false),
                TurnStatus::Streaming => (None, true),
                TurnStatus::Complete => (None, false),
            };
            let waiting = streaming && turn.content.is_empty();

            view! {
                <div style=if is_user {
                    "align-self: flex-end; max-width: 75%;"
                } else {
                    "align-self: flex-start; max-width: 75%;"
                }>
                    <div style=if is_user {
                        "background: var(--colorBrandBackground2); padding: 10px 14px; border-radius: 12px;"
                    } else {
                        "background: var(--colorNeutralBackground1); border: 1px solid var(--colorNeutralStroke2); padding: 10px 14px; border-radius: 12px;"
                    }>
                        <div style="white-space: pre-wrap;">
                            {if waiting { "…".to_string() } else { turn.content.clone() }}
                        </div>
                        {(!attachments.is_empty()).then(|| {
                            view! {
                                <div style="font-size: 12px; opacity: 0.75; margin-top: 6px; display: flex; flex-wrap: wrap; gap: 6px;">
                                    {attachments
                                        .into_iter()
                                        .map(|name| view! { <span>{icon("document")} " " {name}</span> })
                                        .collect_view()}
                                </div>
                            }
                        })}
                        {failure.map(|message| {
                            view! {
                                <div style="font-size: 12px; margin-top: 6px; color: var(--colorPaletteRedForeground1); display: flex; align-items: center; gap: 4px;">
                                    {icon("alert")}
                                    <span>{message}</span>
                                </div>
                            }
                        })}
                    </div>
                </div>
            }
        })
    }
}
