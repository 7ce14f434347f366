//! Plain-text rendering of a status response.

use std::fmt::Write;

use mcsearch_protocol::{Players, StatusResponse, TextComponent};
use once_cell::sync::Lazy;
use regex::Regex;

/// `§` followed by a color (`0-9`, `a-f`) or style (`k-o`, `r`) code.
static FORMATTING_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)§[0-9a-fk-or]").expect("formatting code pattern is valid"));

pub fn strip_formatting_codes(text: &str) -> String {
    FORMATTING_CODE.replace_all(text, "").into_owned()
}

pub fn render_description(description: &TextComponent) -> String {
    match description {
        TextComponent::Plain(text) => strip_formatting_codes(text),
        TextComponent::Object(_) | TextComponent::List(_) => {
            strip_formatting_codes(&description.raw_text())
        }
    }
}

/// `online/max`, followed by one numbered line per sampled player when
/// anyone is online.
pub fn render_players(players: &Players) -> String {
    let mut out = format!("{}/{}", players.online, players.max);

    if players.online != 0
        && let Some(sample) = &players.sample
    {
        out.push('\n');
        for (index, player) in sample.iter().enumerate() {
            let _ = writeln!(out, "{}.{}", index + 1, strip_formatting_codes(&player.name));
        }
    }

    out
}

pub fn render_full(response: &StatusResponse, host: &str, port: u16) -> String {
    format!(
        "({})\nMotd:{}\n地址:{}:{}",
        render_players(&response.players),
        render_description(&response.description),
        host,
        port
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcsearch_protocol::{ComponentObject, PlayerSample};

    fn players(online: i64, max: i64, names: Option<&[&str]>) -> Players {
        Players {
            online,
            max,
            sample: names.map(|names| {
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| PlayerSample {
                        name: name.to_string(),
                        id: i.to_string(),
                    })
                    .collect()
            }),
        }
    }

    #[test]
    fn test_strip_formatting_codes() {
        assert_eq!(strip_formatting_codes("§aHello§r World"), "Hello World");
        assert_eq!(strip_formatting_codes("plain text"), "plain text");
        assert_eq!(strip_formatting_codes("§L§KBold§0"), "Bold");
        assert_eq!(strip_formatting_codes("§x§zkept§"), "§x§zkept§");
        assert_eq!(strip_formatting_codes("§§aa"), "§a");
    }

    #[test]
    fn test_render_players_empty_server() {
        assert_eq!(render_players(&players(0, 20, None)), "0/20");
        assert_eq!(render_players(&players(0, 20, Some(&["Ghost"]))), "0/20");
    }

    #[test]
    fn test_render_players_with_sample() {
        assert_eq!(
            render_players(&players(2, 20, Some(&["§cAlice", "Bob"]))),
            "2/20\n1.Alice\n2.Bob\n"
        );
    }

    #[test]
    fn test_render_players_online_without_sample() {
        assert_eq!(render_players(&players(7, 50, None)), "7/50");
        assert_eq!(render_players(&players(7, 50, Some(&[]))), "7/50\n");
    }

    #[test]
    fn test_render_description_variants() {
        let plain = TextComponent::Plain("§6Gold §lServer".to_string());
        assert_eq!(render_description(&plain), "Gold Server");

        let object = TextComponent::Object(ComponentObject {
            text: "§aWelcome".to_string(),
            extra: vec![
                TextComponent::Plain(" to ".to_string()),
                TextComponent::Object(ComponentObject {
                    text: "§bthe §rnetwork".to_string(),
                    extra: vec![],
                }),
            ],
        });
        assert_eq!(render_description(&object), "Welcome to the network");

        // Codes split across segments are joined before stripping
        let split = TextComponent::List(vec![
            TextComponent::Plain("§".to_string()),
            TextComponent::Plain("eYellow".to_string()),
        ]);
        assert_eq!(render_description(&split), "Yellow");
    }

    #[test]
    fn test_render_full() {
        let response = StatusResponse {
            version: None,
            players: players(1, 5, Some(&["X"])),
            description: TextComponent::Plain("Hi".to_string()),
            favicon: None,
            enforces_secure_chat: None,
        };

        assert_eq!(
            render_full(&response, "mc.example.com", 25565),
            "(1/5\n1.X\n)\nMotd:Hi\n地址:mc.example.com:25565"
        );
    }
}
