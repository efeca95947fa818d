//! Age to cost estimate.
//!
//! Everything here is a pure function of the age. The card recomputes the
//! metrics on every render, so nothing is cached.

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 100;
pub const DEFAULT_AGE: u8 = 30;

pub const BASE_HOURS: f64 = 15.0;
pub const MAX_HOURS: f64 = 40.0;
pub const HOURLY_RATE: u32 = 285;

/// Family cost at which the cost color reaches full red.
pub const COST_COLOR_CEILING: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifeStage {
    YoungProfessional,
    MidCareer,
    PeakEarning,
    PreRetirement,
    GoldenYears,
}

impl LifeStage {
    /// Lower bound (inclusive) of each bucket, in order.
    const BUCKETS: [(u8, LifeStage); 5] = [
        (MIN_AGE, LifeStage::YoungProfessional),
        (30, LifeStage::MidCareer),
        (40, LifeStage::PeakEarning),
        (55, LifeStage::PreRetirement),
        (70, LifeStage::GoldenYears),
    ];

    pub fn for_age(age: u8) -> Self {
        let age = clamp_age(age);
        Self::BUCKETS
            .iter()
            .rev()
            .find(|(from, _)| age >= *from)
            .map(|(_, stage)| *stage)
            .unwrap_or(LifeStage::YoungProfessional)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifeStage::YoungProfessional => "Young Professional",
            LifeStage::MidCareer => "Mid-Career",
            LifeStage::PeakEarning => "Peak Earning",
            LifeStage::PreRetirement => "Pre-Retirement",
            LifeStage::GoldenYears => "Golden Years",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Estimate {
    pub age: u8,
    pub attorney_hours: u32,
    pub attorney_cost: u32,
    pub family_cost: u32,
    pub life_stage: LifeStage,
}

impl Estimate {
    pub fn for_age(age: u8) -> Self {
        let age = clamp_age(age);
        let attorney_hours = attorney_hours(age);
        let attorney_cost = attorney_hours * HOURLY_RATE;

        Self {
            age,
            attorney_hours,
            attorney_cost,
            family_cost: attorney_cost * 2,
            life_stage: LifeStage::for_age(age),
        }
    }

    pub fn family_cost_color(&self) -> String {
        cost_color(self.family_cost)
    }
}

pub fn clamp_age(age: u8) -> u8 {
    age.clamp(MIN_AGE, MAX_AGE)
}

fn attorney_hours(age: u8) -> u32 {
    let age_factor = (f64::from(age) / 30.0).powf(1.5);
    (BASE_HOURS * age_factor).min(MAX_HOURS).round() as u32
}

/// Hue runs from 60 (yellow-green) at zero cost to 0 (red) at the ceiling.
pub fn cost_color(cost: u32) -> String {
    let share = (f64::from(cost) / f64::from(COST_COLOR_CEILING)).min(1.0);
    let hue = ((1.0 - share) * 60.0).round() as u32;
    format!("hsl({}, 70%, 45%)", hue)
}

pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_age_estimate() {
        let estimate = Estimate::for_age(30);
        assert_eq!(estimate.attorney_hours, 15);
        assert_eq!(estimate.attorney_cost, 4_275);
        assert_eq!(estimate.family_cost, 8_550);
        assert_eq!(estimate.life_stage.label(), "Mid-Career");
    }

    #[test]
    fn youngest_age_estimate() {
        let estimate = Estimate::for_age(18);
        assert_eq!(estimate.attorney_hours, 7);
        assert_eq!(estimate.attorney_cost, 1_995);
        assert_eq!(estimate.family_cost, 3_990);
        assert_eq!(estimate.life_stage, LifeStage::YoungProfessional);
    }

    #[test]
    fn oldest_age_hits_hour_cap() {
        let estimate = Estimate::for_age(100);
        assert_eq!(estimate.attorney_hours, 40);
        assert_eq!(estimate.attorney_cost, 11_400);
        assert_eq!(estimate.family_cost, 22_800);
        assert_eq!(estimate.life_stage, LifeStage::GoldenYears);
    }

    #[test]
    fn formula_holds_across_domain() {
        let mut previous_hours = 0;
        for age in MIN_AGE..=MAX_AGE {
            let estimate = Estimate::for_age(age);
            let expected = (15.0 * (f64::from(age) / 30.0).powf(1.5)).min(40.0).round() as u32;
            assert_eq!(estimate.attorney_hours, expected, "age {}", age);
            assert_eq!(estimate.attorney_cost, expected * 285);
            assert_eq!(estimate.family_cost, estimate.attorney_cost * 2);
            assert!(estimate.attorney_hours >= previous_hours);
            assert!(estimate.attorney_hours <= 40);
            previous_hours = estimate.attorney_hours;
        }
    }

    #[test]
    fn estimate_is_deterministic() {
        assert_eq!(Estimate::for_age(47), Estimate::for_age(47));
    }

    #[test]
    fn out_of_range_ages_are_clamped() {
        assert_eq!(Estimate::for_age(3), Estimate::for_age(18));
        assert_eq!(Estimate::for_age(130), Estimate::for_age(100));
        assert_eq!(Estimate::for_age(0).age, 18);
    }

    #[test]
    fn life_stage_boundaries() {
        let cases = [
            (29, LifeStage::YoungProfessional),
            (30, LifeStage::MidCareer),
            (39, LifeStage::MidCareer),
            (40, LifeStage::PeakEarning),
            (54, LifeStage::PeakEarning),
            (55, LifeStage::PreRetirement),
            (69, LifeStage::PreRetirement),
            (70, LifeStage::GoldenYears),
        ];
        for (age, stage) in cases {
            assert_eq!(LifeStage::for_age(age), stage, "age {}", age);
        }
    }

    #[test]
    fn life_stages_are_ordered_and_contiguous() {
        let mut previous = LifeStage::for_age(MIN_AGE);
        for age in MIN_AGE + 1..=MAX_AGE {
            let stage = LifeStage::for_age(age);
            assert!(stage >= previous, "stage went backwards at {}", age);
            previous = stage;
        }
        assert_eq!(previous, LifeStage::GoldenYears);
    }

    #[test]
    fn cost_color_runs_from_green_to_red() {
        assert_eq!(cost_color(0), "hsl(60, 70%, 45%)");
        assert_eq!(cost_color(5_000), "hsl(30, 70%, 45%)");
        assert_eq!(cost_color(8_550), "hsl(9, 70%, 45%)");
        assert_eq!(cost_color(22_800), "hsl(0, 70%, 45%)");
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(285), "$285");
        assert_eq!(format_usd(4_275), "$4,275");
        assert_eq!(format_usd(22_800), "$22,800");
        assert_eq!(format_usd(1_234_567), "$1,234,567");
    }
}
