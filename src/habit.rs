use crate::models::{BenefitResult, HabitProfile, HabitType, RiskReductions};

const CIGARETTE_BASELINE: f64 = 20.0;
const DRINK_BASELINE_ML: f64 = 200.0;
const DAYS_PER_PERIOD: f64 = 30.0;

struct HabitWeights {
    life_per_period: f64,
    risks: RiskReductions,
}

const SMOKING: HabitWeights = HabitWeights {
    life_per_period: 0.5,
    risks: RiskReductions { cancer: 40.0, heart: 30.0, stroke: 25.0, respiratory: 35.0 },
};

const DRINKING: HabitWeights = HabitWeights {
    life_per_period: 0.3,
    risks: RiskReductions { cancer: 15.0, heart: 20.0, stroke: 25.0, respiratory: 10.0 },
};

/// Pure function of the profile. Risk values are not capped at 100.
pub fn calculate_benefits(profile: &HabitProfile) -> BenefitResult {
    let (daily_cost, index, weights) = match profile.habit_type {
        HabitType::Smoking => {
            let per_pack = f64::from(profile.cigarettes_per_pack.max(1));
            let per_day = f64::from(profile.cigarettes_per_day);
            (
                per_day / per_pack * profile.cigarette_price,
                per_day / CIGARETTE_BASELINE,
                &SMOKING,
            )
        }
        HabitType::Drinking => {
            let ml = f64::from(profile.drinks_per_day);
            (ml / 1000.0 * profile.drink_price, ml / DRINK_BASELINE_ML, &DRINKING)
        }
    };

    let period = f64::from(profile.quit_period_days);

    BenefitResult {
        money_saved: round_to(daily_cost * DAYS_PER_PERIOD * period, 2),
        life_increase_months: round_to(index * period * weights.life_per_period, 1),
        risk_reductions: RiskReductions {
            cancer: round_to(index * weights.risks.cancer, 1),
            heart: round_to(index * weights.risks.heart, 1),
            stroke: round_to(index * weights.risks.stroke, 1),
            respiratory: round_to(index * weights.risks.respiratory, 1),
        },
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
