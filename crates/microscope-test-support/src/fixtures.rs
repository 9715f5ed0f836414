//! Roster and authoring-script fixtures.

use microscope_core::player::Player;

/// Builds a roster from names, deriving an email from each name.
#[must_use]
pub fn roster(names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .map(|name| Player::new(*name, format!("{}@example.com", name.to_lowercase())))
        .collect()
}

/// The "Doom of the Gods" sample chronicle as an authoring script.
///
/// Rounds 1–5 are materialized before the "Well of Fate" focus, so round 6
/// is the first to carry it.
pub const SAMPLE_SCRIPT: &str = r#"
name: Doom of the Gods
setup:
  players:
    - { name: Addie, email: addie@addie.io }
    - { name: Bors, email: Bors@bors.com }
    - { name: Cat, email: cat@cat.aww }
  palette:
    permitted:
      - Gods can be killed
      - All worlds physically connected
      - Intelligent Swords
    forbidden:
      - Raising the dead
      - Mortal wizards
rounds:
  - focus: { lens: Addie, text: Romance of Goorash and Svetka }
  - legacy: { player: Cat, text: Sword of Storms }
  - materialize: 5
  - focus: { lens: Addie, text: Well of Fate }
periods:
  - name: Allfather creates mortal world
    tone: light
    round: 0
    descriptions:
      - The Allfather shapes the mortal world from the bones of the first giant.
  - name: Flourishing Kingdoms of Men
    tone: light
    round: 1
    events:
      - name: Goorash saves Svetka from Black Beast
        tone: light
        round: 1
      - name: Marriage of Svetka Interrupted
        tone: dark
        round: 4
        scenes:
          - question: What dowry does Svetka bring?
            answer: Storm of Swords
            tone: dark
            round: 4
          - question: ""
            tone: dark
            round: 5
      - name: Goorash wins Sword of Storms
        tone: light
        round: 2
      - name: Svetka mourns death of Goorash
        tone: dark
        round: 3
  - name: Death of the Gods
    tone: dark
    round: 0
    events:
      - name: Allfather hides Last Flame, Reveals plans to crow
        tone: light
        round: 6
        scenes:
          - question: Why does the Allfather hide the Last Flame?
            setting: High Fane of the Last Flame
            answer: So the mortal carry their own fate
            tone: light
            round: 6
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_keeps_order_and_derives_email() {
        let players = roster(&["Addie", "Bors"]);

        assert_eq!(players[0], Player::new("Addie", "addie@example.com"));
        assert_eq!(players[1].name, "Bors");
    }
}
