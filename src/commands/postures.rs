use super::Session;
use crate::formatting::formatter_for;
use crate::scoring::{Posture, ScoringEngine};
use anyhow::Result;

/// Text listing of each category's weight and suggestions.
pub fn describe_postures(engine: &ScoringEngine) -> Vec<String> {
    let mut lines = Vec::new();
    for (category, weight) in engine.weights().iter() {
        lines.push(format!("{} (weight x{:.2})", category, weight));
        for tip in engine.advice_table().suggestions(&Posture::from(category)) {
            lines.push(format!("  - {}", tip));
        }
    }
    lines.push(String::new());
    lines.push(
        "Unlisted postures score with weight x1.00 and receive the Neutral suggestions.".to_string(),
    );
    lines
}

pub fn handle_postures(session: &Session) -> Result<()> {
    let formatter = formatter_for(session.formatting);
    println!("{}", formatter.header("Posture Types"));
    for line in describe_postures(session.store.engine()) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_every_category_with_weight() {
        let lines = describe_postures(&ScoringEngine::standard());
        assert_eq!(lines[0], "Neutral (weight x1.00)");
        assert!(lines.contains(&"Repetitive Upper Limb (weight x1.35)".to_string()));
        assert!(lines.contains(&"  - Use jigs or mechanical aids to reduce repetition.".to_string()));
        // 6 categories x (1 heading + 2 tips) + blank + footnote
        assert_eq!(lines.len(), 20);
    }
}
