// ✉️ Email Intents - mailto links for community requests
// Nothing is sent or stored server-side; the client opens its mail app

use serde::{Deserialize, Serialize};

pub const PORTAL_EMAIL: &str = "portalgames.id@gmail.com";

const PLAYTEST_CLOSING: &str =
    "Saya ingin menjadwalkan sesi playtest bersama komunitas Portal Games.";

/// Playtest session request submitted from the community page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytestRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    /// Game title; may be blank for a not-yet-named project
    #[serde(default)]
    pub game: String,

    #[serde(default)]
    pub goal: String,
}

impl PlaytestRequest {
    pub fn subject(&self) -> String {
        let game = self.game.trim();
        let game = if game.is_empty() { "Game Baru" } else { game };
        format!("[Portal Games] Request Playtest - {}", game)
    }

    pub fn body(&self) -> String {
        format!(
            "Nama: {}\nEmail: {}\nJudul Game: {}\nTujuan Playtest: {}\n\n{}",
            self.name, self.email, self.game, self.goal, PLAYTEST_CLOSING
        )
    }

    pub fn mailto_url(&self) -> String {
        compose(PORTAL_EMAIL, &self.subject(), Some(&self.body()))
    }
}

/// "Submit your game" link shown on the personal games section
pub fn submit_game_mailto() -> String {
    compose(PORTAL_EMAIL, "Submit Game Portal Games", None)
}

fn compose(to: &str, subject: &str, body: Option<&str>) -> String {
    let mut url = format!("mailto:{}?subject={}", to, urlencoding::encode(subject));
    if let Some(body) = body {
        url.push_str("&body=");
        url.push_str(&urlencoding::encode(body));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlaytestRequest {
        PlaytestRequest {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            game: "Robo Puzzle Lab".to_string(),
            goal: "Uji level 3 & 4".to_string(),
        }
    }

    #[test]
    fn test_playtest_subject() {
        assert_eq!(
            request().subject(),
            "[Portal Games] Request Playtest - Robo Puzzle Lab"
        );

        let unnamed = PlaytestRequest {
            game: "  ".to_string(),
            ..request()
        };
        assert_eq!(unnamed.subject(), "[Portal Games] Request Playtest - Game Baru");
    }

    #[test]
    fn test_playtest_mailto_is_encoded() {
        let url = request().mailto_url();

        assert!(url.starts_with("mailto:portalgames.id@gmail.com?subject="));
        assert!(url.contains("subject=%5BPortal%20Games%5D%20Request%20Playtest%20-%20Robo%20Puzzle%20Lab"));
        assert!(url.contains("&body=Nama%3A%20Sari%0AEmail%3A%20sari%40example.com%0A"));
        assert!(url.contains("Uji%20level%203%20%26%204"));
        assert_eq!(url.matches('&').count(), 1);
    }

    #[test]
    fn test_playtest_body_decodes_back() {
        let url = request().mailto_url();
        let encoded = url.split("&body=").nth(1).unwrap();
        let body = urlencoding::decode(encoded).unwrap();

        assert_eq!(body, request().body());
        assert!(body.ends_with(PLAYTEST_CLOSING));
    }

    #[test]
    fn test_submit_game_mailto() {
        assert_eq!(
            submit_game_mailto(),
            "mailto:portalgames.id@gmail.com?subject=Submit%20Game%20Portal%20Games"
        );
    }
}
