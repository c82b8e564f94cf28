//! Offline, best-effort extraction of a rival's tendencies from its source text.
//!
//! The analyzer looks for random-guarded numeric thresholds, e.g.
//! `if random.random() < 0.7:` inside a reaction routine, and adopts them as
//! probabilities. Anything it cannot make sense of leaves the defaults intact.

use super::{DEFAULT_COMBO_CHANCE, DEFAULT_VETO_CHANCE, OpponentProfile};

const COMBO_WINDOW: usize = 2;
const VETO_MARKERS: [&str; 3] = ["react", "nope", "veto"];

#[derive(Debug)]
struct Block<'a> {
    name: String,
    lines: Vec<&'a str>,
}

pub fn analyze_source(source: &str) -> OpponentProfile {
    let blocks = split_blocks(source);

    let veto = blocks
        .iter()
        .filter(|block| is_veto_block(block))
        .flat_map(|block| block.lines.iter())
        .find_map(|line| random_threshold(line));

    let combo = blocks.iter().find_map(combo_threshold);

    OpponentProfile::new(
        veto.unwrap_or(DEFAULT_VETO_CHANCE),
        combo.unwrap_or(DEFAULT_COMBO_CHANCE),
    )
}

fn split_blocks(source: &str) -> Vec<Block<'_>> {
    let mut blocks = vec![Block {
        name: String::new(),
        lines: Vec::new(),
    }];
    for line in source.lines() {
        if let Some(name) = function_name(line) {
            blocks.push(Block {
                name,
                lines: Vec::new(),
            });
        }
        if let Some(current) = blocks.last_mut() {
            current.lines.push(line);
        }
    }
    blocks
}

fn function_name(line: &str) -> Option<String> {
    let mut rest = line.trim_start();
    for prefix in ["pub(crate) ", "pub ", "async "] {
        rest = rest.strip_prefix(prefix).unwrap_or(rest);
    }
    let rest = rest
        .strip_prefix("def ")
        .or_else(|| rest.strip_prefix("fn "))?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() { None } else { Some(name) }
}

fn is_veto_block(block: &Block<'_>) -> bool {
    let name = block.name.to_ascii_lowercase();
    if VETO_MARKERS.iter().any(|marker| name.contains(marker)) {
        return true;
    }
    !block.name.is_empty()
        && block.lines.iter().any(|line| {
            let lower = line.to_ascii_lowercase();
            lower.contains("nope") || lower.contains("veto")
        })
}

fn combo_threshold(block: &Block<'_>) -> Option<f32> {
    block
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.to_ascii_lowercase().contains("combo"))
        .find_map(|(idx, _)| {
            let start = idx.saturating_sub(COMBO_WINDOW);
            let end = (idx + COMBO_WINDOW + 1).min(block.lines.len());
            block.lines[start..end]
                .iter()
                .find_map(|line| random_threshold(line))
        })
}

/// Probability that a random-guarded branch on this line is taken.
fn random_threshold(line: &str) -> Option<f32> {
    let lower = line.to_ascii_lowercase();
    if let Some(pos) = lower.find("gen_bool(") {
        let literal = &lower[pos + "gen_bool(".len()..];
        return parse_probability(literal);
    }

    let anchor = ["random", "rng", "rand"]
        .iter()
        .filter_map(|token| lower.find(token))
        .min()?;
    let tail = &lower[anchor..];
    let bytes = tail.as_bytes();
    for (idx, &byte) in bytes.iter().enumerate() {
        if byte != b'<' && byte != b'>' {
            continue;
        }
        let mut rest = &tail[idx + 1..];
        rest = rest.strip_prefix('=').unwrap_or(rest);
        let Some(value) = parse_probability(rest) else {
            continue;
        };
        return Some(if byte == b'<' { value } else { 1.0 - value });
    }
    None
}

fn parse_probability(text: &str) -> Option<f32> {
    let literal: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !literal.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    literal
        .parse::<f32>()
        .ok()
        .filter(|value| (0.0..=1.0).contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PY_RIVAL: &str = r#"
class NopeHappyBot(Bot):
    def take_turn(self, view):
        combos = self.find_combos(view.my_hand)
        if combos and random.random() < 0.65:
            return PlayComboAction(cards=combos[0])
        return DrawCardAction()

    def react(self, view, triggering_event):
        nope = self.first_nope(view.my_hand)
        if nope and random.random() < 0.8:
            return PlayCardAction(card=nope)
        return None
"#;

    #[test]
    fn extracts_python_thresholds() {
        let profile = analyze_source(PY_RIVAL);
        assert!((profile.veto_chance() - 0.8).abs() < 1e-6);
        assert!((profile.combo_chance() - 0.65).abs() < 1e-6);
    }

    #[test]
    fn greater_than_guard_is_inverted() {
        let source = "def react(self, view, event):\n    if random.random() > 0.3:\n        return nope\n";
        let profile = analyze_source(source);
        assert!((profile.veto_chance() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn rust_generic_syntax_does_not_confuse_parser() {
        let source = "fn react(&mut self) -> Option<Action> {\n    if rng.r#gen::<f32>() < 0.4 { return nope; }\n    None\n}\n";
        let profile = analyze_source(source);
        assert!((profile.veto_chance() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn gen_bool_is_read_directly() {
        let source = "fn react(&mut self) {\n    if self.rng.gen_bool(0.25) { veto() }\n}\n";
        assert!((analyze_source(source).veto_chance() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn unparseable_source_keeps_defaults() {
        assert_eq!(analyze_source(""), OpponentProfile::default());
        assert_eq!(
            analyze_source("def react(self):\n    return None if random.random() < 7 else x\n"),
            OpponentProfile::default()
        );
        assert_eq!(analyze_source("\u{0}\u{1} garbage <<<>>>"), OpponentProfile::default());
    }

    #[test]
    fn deterministic_bot_without_random_keeps_defaults() {
        let source = "def react(self, view, event):\n    if len(view.my_hand) <= 3:\n        return nope\n";
        assert_eq!(analyze_source(source), OpponentProfile::default());
    }
}
