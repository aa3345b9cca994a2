//! Goal evaluation: percentage-of-goal, energy-weighted macro ratios, and
//! the fixed advisory rules.
//!
//! Pure and deterministic for identical inputs.

use crate::types::{Alert, DailyTotals, GoalReport, Goals, MacroBreakdown, Severity};

/// Physiological energy factors (Atwater), kcal per gram. Domain
/// constants, not configuration.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Fixed absolute carbohydrate alert threshold in grams.
pub const CARB_ALERT_THRESHOLD_G: f64 = 120.0;

/// Calories below this fraction of the target trigger the under-eating
/// advisory.
const UNDER_EATING_FRACTION: f64 = 0.5;

fn percent_of(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    actual / target * 100.0
}

/// Macro ratio by energy contribution, not raw gram weight: a gram of fat
/// carries materially more energy than a gram of protein or carbohydrate.
fn macro_breakdown(totals: &DailyTotals) -> MacroBreakdown {
    let protein_kcal = totals.protein_g * KCAL_PER_G_PROTEIN;
    let carbs_kcal = totals.carbs_g * KCAL_PER_G_CARBS;
    let fat_kcal = totals.fat_g * KCAL_PER_G_FAT;
    let sum = protein_kcal + carbs_kcal + fat_kcal;
    if sum <= 0.0 {
        return MacroBreakdown::default();
    }
    MacroBreakdown {
        protein_pct: protein_kcal / sum * 100.0,
        carbs_pct: carbs_kcal / sum * 100.0,
        fat_pct: fat_kcal / sum * 100.0,
    }
}

/// Evaluate all alert rules in declaration order; rules 1-2 are mutually
/// exclusive, rules 3-4 are independent additions. No short-circuit: every
/// applicable alert is returned.
fn alerts(totals: &DailyTotals, goals: &Goals) -> Vec<Alert> {
    let mut out = Vec::new();

    if totals.calories > goals.target_cal {
        out.push(Alert {
            severity: Severity::Blocking,
            title: "Calories over target".into(),
            message: format!(
                "You are {:.0} kcal over your {:.0} kcal daily target.",
                totals.calories - goals.target_cal,
                goals.target_cal
            ),
        });
    } else if totals.calories < goals.target_cal * UNDER_EATING_FRACTION {
        out.push(Alert {
            severity: Severity::Advisory,
            title: "Eating well under target".into(),
            message: format!(
                "Only {:.0} kcal logged against a {:.0} kcal target; sustained under-eating risks lean mass loss.",
                totals.calories, goals.target_cal
            ),
        });
    }

    if totals.protein_g < goals.target_protein {
        out.push(Alert {
            severity: Severity::Advisory,
            title: "Protein below target".into(),
            message: format!(
                "{:.0} g short of your {:.0} g protein target.",
                goals.target_protein - totals.protein_g,
                goals.target_protein
            ),
        });
    }

    if totals.carbs_g > CARB_ALERT_THRESHOLD_G {
        out.push(Alert {
            severity: Severity::Advisory,
            title: "Elevated carbohydrate intake".into(),
            message: format!(
                "{:.0} g of carbohydrate logged today (threshold {:.0} g).",
                totals.carbs_g, CARB_ALERT_THRESHOLD_G
            ),
        });
    }

    out
}

/// Translate daily totals and configured goals into progress metrics and
/// advisories.
pub fn evaluate_goals(totals: &DailyTotals, goals: &Goals) -> GoalReport {
    GoalReport {
        cal_percent: percent_of(totals.calories, goals.target_cal),
        protein_percent: percent_of(totals.protein_g, goals.target_protein),
        macros: macro_breakdown(totals),
        alerts: alerts(totals, goals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> DailyTotals {
        DailyTotals {
            calories,
            protein_g,
            carbs_g,
            fat_g,
            water_ml: 0.0,
        }
    }

    #[test]
    fn percentages_track_targets() {
        let goals = Goals {
            target_cal: 2000.0,
            target_protein: 100.0,
            ..Goals::default()
        };
        let report = evaluate_goals(&totals(1500.0, 75.0, 0.0, 0.0), &goals);
        assert_eq!(report.cal_percent, 75.0);
        assert_eq!(report.protein_percent, 75.0);
    }

    #[test]
    fn zero_target_guards_against_division_by_zero() {
        let goals = Goals {
            target_cal: 0.0,
            target_protein: 0.0,
            ..Goals::default()
        };
        let report = evaluate_goals(&totals(1500.0, 75.0, 0.0, 0.0), &goals);
        assert_eq!(report.cal_percent, 0.0);
        assert_eq!(report.protein_percent, 0.0);
    }

    #[test]
    fn macro_ratio_is_energy_weighted_not_mass_weighted() {
        // protein 50 g -> 200 kcal, carbs 50 g -> 200 kcal, fat 10 g -> 90 kcal
        let report = evaluate_goals(&totals(0.0, 50.0, 50.0, 10.0), &Goals::default());
        let sum = 200.0 + 200.0 + 90.0;
        assert!((report.macros.fat_pct - 90.0 / sum * 100.0).abs() < 1e-9);
        // By mass fat would be 10/110 = 9.1%; by energy it is 18.4%.
        let mass_share = 10.0 / 110.0 * 100.0;
        assert!(report.macros.fat_pct > mass_share);
    }

    #[test]
    fn empty_day_has_all_zero_macro_breakdown() {
        let report = evaluate_goals(&DailyTotals::default(), &Goals::default());
        assert_eq!(report.macros, MacroBreakdown::default());
    }

    #[test]
    fn calorie_excess_and_carb_alerts_appear_together_in_order() {
        let goals = Goals {
            target_cal: 2000.0,
            target_protein: 60.0,
            ..Goals::default()
        };
        let report = evaluate_goals(&totals(2400.0, 80.0, 150.0, 60.0), &goals);
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.alerts[0].severity, Severity::Blocking);
        assert!(report.alerts[0].message.contains("400 kcal"));
        assert_eq!(report.alerts[1].title, "Elevated carbohydrate intake");
    }

    #[test]
    fn excess_and_under_eating_are_mutually_exclusive() {
        let goals = Goals {
            target_cal: 2000.0,
            target_protein: 0.0,
            ..Goals::default()
        };
        let report = evaluate_goals(&totals(600.0, 10.0, 0.0, 0.0), &goals);
        let titles: Vec<_> = report.alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Eating well under target"]);
    }

    #[test]
    fn protein_deficit_states_the_gram_shortfall() {
        let goals = Goals {
            target_cal: 2000.0,
            target_protein: 100.0,
            ..Goals::default()
        };
        let report = evaluate_goals(&totals(1800.0, 70.0, 0.0, 0.0), &goals);
        let protein_alert = report
            .alerts
            .iter()
            .find(|a| a.title == "Protein below target")
            .expect("protein alert");
        assert!(protein_alert.message.contains("30 g short"));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let goals = Goals::default();
        let day = totals(2200.0, 40.0, 130.0, 70.0);
        assert_eq!(evaluate_goals(&day, &goals), evaluate_goals(&day, &goals));
    }
}
