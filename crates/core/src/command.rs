//! Rule-based interpretation of recognized voice commands.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A side effect the runtime (or an external collaborator) should carry out.
///
/// `OpenApp` and `Search` are signals only; actually launching an
/// application or running a search is the collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffect {
    OpenApp { name: String },
    Search { query: String },
    Shutdown,
    StopListening,
}

/// The interpreter's verdict for one utterance: something to say, something
/// to do, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAction {
    pub reply: Option<String>,
    pub effect: Option<SideEffect>,
}

impl CommandAction {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            effect: None,
        }
    }
}

/// Interprets one lowercased utterance against the current local time.
pub fn interpret(utterance: &str) -> CommandAction {
    interpret_at(utterance, Local::now())
}

/// Pure variant of [`interpret`] with an injected clock.
///
/// Matching is substring-based in a fixed priority order; the first matching
/// rule wins. The order is observable behavior ("hello, what time is it"
/// greets instead of telling the time) and must not be rearranged.
pub fn interpret_at(utterance: &str, now: DateTime<Local>) -> CommandAction {
    if utterance.contains("hello") {
        CommandAction::reply("Hello there! How can I assist you today?")
    } else if utterance.contains("time") {
        CommandAction::reply(format!("The current time is {}", now.format("%H:%M")))
    } else if utterance.contains("date") {
        CommandAction::reply(format!("Today's date is {}", now.format("%B %d, %Y")))
    } else if utterance.contains("stop listening") {
        CommandAction {
            reply: Some("Voice control deactivated.".to_string()),
            effect: Some(SideEffect::StopListening),
        }
    } else if utterance.contains("exit") || utterance.contains("quit") {
        CommandAction {
            reply: None,
            effect: Some(SideEffect::Shutdown),
        }
    } else if utterance.contains("open") {
        let name = after_first(utterance, "open ");
        CommandAction {
            reply: Some(format!("Opening {name}")),
            effect: Some(SideEffect::OpenApp {
                name: name.to_string(),
            }),
        }
    } else if utterance.contains("search") {
        let query = after_first(utterance, "search ");
        CommandAction {
            reply: Some(format!("Searching for {query}")),
            effect: Some(SideEffect::Search {
                query: query.to_string(),
            }),
        }
    } else {
        CommandAction::reply(format!(
            "I heard you say: {utterance}. This is a basic implementation. More commands can be added."
        ))
    }
}

/// Everything after the first occurrence of `marker`, or `""` when the
/// marker is absent (the rule may have been triggered by a spaceless match
/// like "reopen").
fn after_first<'a>(utterance: &'a str, marker: &str) -> &'a str {
    utterance
        .find(marker)
        .map(|at| &utterance[at + marker.len()..])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 42).unwrap()
    }

    fn interpret_fixed(utterance: &str) -> CommandAction {
        interpret_at(utterance, fixed_now())
    }

    #[test]
    fn greeting_replies_without_side_effect() {
        let action = interpret_fixed("hello assistant");
        assert_eq!(
            action.reply.as_deref(),
            Some("Hello there! How can I assist you today?")
        );
        assert_eq!(action.effect, None);
    }

    #[test]
    fn greeting_outranks_time() {
        let action = interpret_fixed("hello, what time is it");
        assert_eq!(
            action.reply.as_deref(),
            Some("Hello there! How can I assist you today?")
        );
    }

    #[test]
    fn time_is_formatted_as_hours_and_minutes() {
        let action = interpret_fixed("what time is it");
        assert_eq!(action.reply.as_deref(), Some("The current time is 09:07"));
        assert_eq!(action.effect, None);
    }

    #[test]
    fn date_is_formatted_long_form() {
        let action = interpret_fixed("what is the date");
        assert_eq!(action.reply.as_deref(), Some("Today's date is March 05, 2024"));
    }

    #[test]
    fn stop_listening_pairs_reply_with_effect() {
        let action = interpret_fixed("please stop listening now");
        assert_eq!(action.reply.as_deref(), Some("Voice control deactivated."));
        assert_eq!(action.effect, Some(SideEffect::StopListening));
    }

    #[test]
    fn exit_and_quit_request_shutdown_silently() {
        for utterance in ["exit", "quit the assistant"] {
            let action = interpret_fixed(utterance);
            assert_eq!(action.reply, None);
            assert_eq!(action.effect, Some(SideEffect::Shutdown));
        }
    }

    #[test]
    fn open_extracts_the_application_name() {
        let action = interpret_fixed("please open calculator");
        assert_eq!(action.reply.as_deref(), Some("Opening calculator"));
        assert_eq!(
            action.effect,
            Some(SideEffect::OpenApp {
                name: "calculator".to_string()
            })
        );
    }

    #[test]
    fn open_takes_everything_after_the_first_marker() {
        let action = interpret_fixed("open notes to open a file");
        assert_eq!(
            action.effect,
            Some(SideEffect::OpenApp {
                name: "notes to open a file".to_string()
            })
        );
    }

    #[test]
    fn open_without_a_spaced_marker_yields_an_empty_name() {
        let action = interpret_fixed("open");
        assert_eq!(action.reply.as_deref(), Some("Opening "));
        assert_eq!(
            action.effect,
            Some(SideEffect::OpenApp {
                name: String::new()
            })
        );
    }

    #[test]
    fn search_extracts_the_query() {
        let action = interpret_fixed("search cats");
        assert_eq!(action.reply.as_deref(), Some("Searching for cats"));
        assert_eq!(
            action.effect,
            Some(SideEffect::Search {
                query: "cats".to_string()
            })
        );
    }

    #[test]
    fn open_outranks_search() {
        let action = interpret_fixed("open search engine");
        assert_eq!(
            action.effect,
            Some(SideEffect::OpenApp {
                name: "search engine".to_string()
            })
        );
    }

    #[test]
    fn unmatched_utterances_are_echoed() {
        let action = interpret_fixed("make me a sandwich");
        assert_eq!(
            action.reply.as_deref(),
            Some(
                "I heard you say: make me a sandwich. This is a basic implementation. \
                 More commands can be added."
            )
        );
        assert_eq!(action.effect, None);
    }

    #[test]
    fn side_effects_serialize_with_a_type_tag() {
        let effect = SideEffect::OpenApp {
            name: "calculator".to_string(),
        };
        let value = serde_json::to_value(&effect).unwrap();
        assert_eq!(value["type"], "open_app");
        assert_eq!(value["name"], "calculator");

        let round_tripped: SideEffect = serde_json::from_value(value).unwrap();
        assert_eq!(round_tripped, effect);
    }
}
