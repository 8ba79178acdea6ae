//! Option lists for the workout feature menus.
//!
//! The built-in lists can be replaced per list from the `[menus]` section of
//! the config file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Labels offered by each step of the feature menu
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureMenus {
    #[serde(default = "default_exercises")]
    pub exercises: Vec<String>,

    #[serde(default = "default_weights")]
    pub weights: Vec<String>,

    #[serde(default = "default_reps")]
    pub reps: Vec<String>,

    #[serde(default = "default_rest_times")]
    pub rest_times: Vec<String>,

    #[serde(default = "default_periods")]
    pub periods: Vec<String>,
}

impl Default for FeatureMenus {
    fn default() -> Self {
        Self {
            exercises: default_exercises(),
            weights: default_weights(),
            reps: default_reps(),
            rest_times: default_rest_times(),
            periods: default_periods(),
        }
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_exercises() -> Vec<String> {
    labels(&[
        "Squat",
        "Bench Press",
        "Deadlift",
        "Overhead Press",
        "Barbell Row",
        "Pull-up",
        "Lunge",
    ])
}

fn default_weights() -> Vec<String> {
    labels(&[
        "Bodyweight", "5kg", "10kg", "15kg", "20kg", "30kg", "40kg", "50kg",
    ])
}

fn default_reps() -> Vec<String> {
    labels(&["5", "8", "10", "12", "15"])
}

fn default_rest_times() -> Vec<String> {
    labels(&["30s", "60s", "90s", "120s"])
}

fn default_periods() -> Vec<String> {
    labels(&["1 week", "2 weeks", "4 weeks", "8 weeks"])
}

impl FeatureMenus {
    /// Each menu step as (prompt, options), in the order they are asked
    pub fn steps(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Choose an exercise:", self.exercises.as_slice()),
            ("Choose a weight:", self.weights.as_slice()),
            ("Choose the number of reps:", self.reps.as_slice()),
            ("Choose a rest time between sets:", self.rest_times.as_slice()),
            ("Choose how long to keep this workout:", self.periods.as_slice()),
        ]
    }

    /// Validate the option lists
    ///
    /// Returns a list of problems found. Labels end up as table cells, so
    /// they must be non-blank, unique within their menu and free of commas.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let named = [
            ("exercises", &self.exercises),
            ("weights", &self.weights),
            ("reps", &self.reps),
            ("rest_times", &self.rest_times),
            ("periods", &self.periods),
        ];

        for (name, options) in named {
            if options.is_empty() {
                errors.push(format!("Menu '{}' has no options", name));
                continue;
            }

            let mut seen = HashSet::new();
            for option in options.iter() {
                if option.trim().is_empty() {
                    errors.push(format!("Menu '{}' has a blank option", name));
                } else if option.contains(',') {
                    errors.push(format!(
                        "Menu '{}' option '{}' contains a comma",
                        name, option
                    ));
                }
                if !seen.insert(option.as_str()) {
                    errors.push(format!(
                        "Menu '{}' lists option '{}' more than once",
                        name, option
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menus_are_valid() {
        let menus = FeatureMenus::default();
        let errors = menus.validate();
        assert!(errors.is_empty(), "Default menus invalid: {:?}", errors);
    }

    #[test]
    fn test_default_menus_contain_common_picks() {
        let menus = FeatureMenus::default();
        assert!(menus.exercises.contains(&"Squat".to_string()));
        assert!(menus.weights.contains(&"20kg".to_string()));
        assert!(menus.reps.contains(&"10".to_string()));
        assert!(menus.rest_times.contains(&"60s".to_string()));
        assert!(menus.periods.contains(&"2 weeks".to_string()));
    }

    #[test]
    fn test_steps_order() {
        let menus = FeatureMenus::default();
        let steps = menus.steps();
        assert_eq!(steps[0].1, menus.exercises.as_slice());
        assert_eq!(steps[4].1, menus.periods.as_slice());
    }

    #[test]
    fn test_validate_reports_problems() {
        let menus = FeatureMenus {
            exercises: vec![],
            weights: vec!["5kg".into(), "5kg".into()],
            reps: vec![" ".into()],
            rest_times: vec!["30s, 60s".into()],
            ..FeatureMenus::default()
        };

        let errors = menus.validate();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("'exercises' has no options"));
        assert!(errors[1].contains("more than once"));
        assert!(errors[2].contains("blank option"));
        assert!(errors[3].contains("contains a comma"));
    }
}
