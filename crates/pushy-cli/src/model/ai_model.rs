use std::{fs, path::Path};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use pushy_evaluator::personality::{AiWeights, Personality};
use serde::{Deserialize, Serialize};

use crate::util;

/// Trained weights as written by `train-ai`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub weights: AiWeights,
}

impl AiModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("AI model", path)
    }

    /// Writes the model as pretty JSON to `path`, or to stdout without a path.
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize AI model")?;
        match path {
            Some(path) => fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write AI model file: {}", path.display())),
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }

    pub fn personality(&self) -> Personality {
        Personality::Fixed(self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_json_layout() {
        let json = r#"{
            "name": "two-player",
            "trained_at": "2025-01-02T03:04:05Z",
            "final_fitness": 0.75,
            "weights": {
                "self_lives": 553.0,
                "diff_lives": 8371.0,
                "square_threshold": 3.0,
                "self_spread_below_threshold": 5646.0,
                "self_spread_above_threshold": 3791.0,
                "opponent_spread": 8583.0,
                "self_in_danger": 6187.0,
                "opponent_in_danger_below_threshold": 680.0,
                "opponent_in_danger_above_threshold": 9157.0
            }
        }"#;
        let model: AiModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.name, "two-player");
        assert_eq!(model.weights, AiWeights::TWO_PLAYER);
        assert_eq!(model.personality(), Personality::Fixed(AiWeights::TWO_PLAYER));

        let back: AiModel = serde_json::from_str(&serde_json::to_string(&model).unwrap()).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn test_saved_model_opens_again() {
        let model = AiModel {
            name: "saved".to_owned(),
            trained_at: "2025-06-07T08:09:10Z".parse().unwrap(),
            final_fitness: 0.5,
            weights: AiWeights::MULTIPLAYER_POOL[1],
        };
        let path = std::env::temp_dir().join(format!("pushy-{}-model.json", std::process::id()));
        model.save(Some(&path)).unwrap();
        let opened = AiModel::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(opened, model);
    }
}
