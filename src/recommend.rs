//! Recommendation engine: a declarative rule set evaluated against the
//! device snapshot and dashboard aggregates.
//!
//! Each rule is a descriptor (predicate, savings formula, message
//! template) with a fixed id, priority, and category. Rules are
//! independent and evaluated in one pass over the declaration order;
//! adding a rule means appending a descriptor, never touching the
//! evaluation or ranking logic.

use serde::Serialize;

use crate::aggregate::DashboardSnapshot;
use crate::catalog::{Device, DeviceKind};
use crate::tariff::round2;

/// What kind of action a recommendation proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Efficiency,
    Timing,
    Upgrade,
}

/// Recommendation urgency, ordered high > medium > low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// One actionable cost-saving suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Stable id, unique within a response and across polls for the
    /// same input state.
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    /// Human-readable description embedding the estimated saving.
    pub description: String,
    /// Estimated monthly saving (currency, >= 0).
    pub potential_savings: f64,
    /// Device category the suggestion targets; not required to match a
    /// live device.
    pub category: DeviceKind,
    /// Imperative instruction.
    pub action: String,
}

/// Engine output: ranked recommendations plus their exact savings sum.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    pub total_potential_savings: f64,
}

/// State a rule predicate and savings formula may inspect.
pub struct RuleContext<'a> {
    pub devices: &'a [Device],
    pub snapshot: &'a DashboardSnapshot,
    pub rate_per_kwh: f64,
}

impl RuleContext<'_> {
    /// Estimated monthly running cost of a steady draw at `kw`.
    fn monthly_running_cost(&self, kw: f64) -> f64 {
        kw * 24.0 * 30.0 * self.rate_per_kwh
    }

    /// The active device of `kind` with the largest instantaneous draw.
    fn heaviest_active(&self, kind: DeviceKind) -> Option<&Device> {
        self.devices
            .iter()
            .filter(|d| d.kind == kind && d.is_active())
            .max_by(|a, b| {
                a.current_consumption
                    .partial_cmp(&b.current_consumption)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// The appliance with the largest rated power at or above `min_watts`.
    fn heaviest_rated_appliance(&self, min_watts: u32) -> Option<&Device> {
        self.devices
            .iter()
            .filter(|d| d.kind == DeviceKind::Appliance && d.power_rating >= min_watts)
            .max_by_key(|d| d.power_rating)
    }
}

/// Declarative rule descriptor.
struct Rule {
    id: u32,
    kind: RecommendationKind,
    priority: Priority,
    category: DeviceKind,
    title: &'static str,
    action: &'static str,
    matches: fn(&RuleContext) -> bool,
    monthly_savings: fn(&RuleContext) -> f64,
    describe: fn(f64) -> String,
}

/// Minimum active cooling draw (kW) before the setpoint rule fires.
const COOLING_DRAW_THRESHOLD_KW: f64 = 1.0;
/// Household draw (kW) above which loads are considered stacked.
const STACKED_LOAD_THRESHOLD_KW: f64 = 2.0;
/// Rated power (watts) above which an appliance is worth time-shifting.
const SHIFTABLE_APPLIANCE_MIN_W: u32 = 500;
/// Flat estimate for the category-driven LED upgrade.
const LED_UPGRADE_SAVINGS: f64 = 120.0;

/// The fixed, ordered rule set. Declaration order is the tie-break
/// order within a priority rank.
const RULES: &[Rule] = &[
    Rule {
        id: 1,
        kind: RecommendationKind::Efficiency,
        priority: Priority::High,
        category: DeviceKind::Cooling,
        title: "Optimize AC Temperature",
        action: "Increase the AC setpoint by 2\u{b0}C",
        matches: |ctx| {
            ctx.heaviest_active(DeviceKind::Cooling)
                .is_some_and(|d| d.current_consumption >= COOLING_DRAW_THRESHOLD_KW)
        },
        monthly_savings: |ctx| {
            ctx.heaviest_active(DeviceKind::Cooling)
                .map_or(0.0, |d| 0.05 * ctx.monthly_running_cost(d.current_consumption))
        },
        describe: |savings| {
            format!(
                "Set your AC to 24\u{b0}C instead of 22\u{b0}C to save \u{20b9}{savings:.2}/month"
            )
        },
    },
    Rule {
        id: 2,
        kind: RecommendationKind::Timing,
        priority: Priority::High,
        category: DeviceKind::Appliance,
        title: "Stagger Simultaneous Loads",
        action: "Avoid running heavy appliances at the same time",
        matches: |ctx| ctx.snapshot.current_consumption > STACKED_LOAD_THRESHOLD_KW,
        monthly_savings: |ctx| 0.02 * 30.0 * ctx.snapshot.monthly_cost,
        describe: |savings| {
            format!(
                "Spreading heavy loads across the day can save \u{20b9}{savings:.2}/month"
            )
        },
    },
    Rule {
        id: 3,
        kind: RecommendationKind::Timing,
        priority: Priority::Medium,
        category: DeviceKind::Appliance,
        title: "Shift Washing Schedule",
        action: "Use the timer function for night operation",
        matches: |ctx| ctx.heaviest_rated_appliance(SHIFTABLE_APPLIANCE_MIN_W).is_some(),
        monthly_savings: |ctx| {
            // 2 h/day at rated power, 30% of it recoverable off-peak
            ctx.heaviest_rated_appliance(SHIFTABLE_APPLIANCE_MIN_W)
                .map_or(0.0, |d| {
                    0.30 * d.power_rating_kw() * 2.0 * 30.0 * ctx.rate_per_kwh
                })
        },
        describe: |savings| {
            format!(
                "Run heavy appliances during off-peak hours (11 PM - 6 AM) to save \u{20b9}{savings:.2}/month"
            )
        },
    },
    Rule {
        id: 4,
        kind: RecommendationKind::Efficiency,
        priority: Priority::Low,
        category: DeviceKind::Entertainment,
        title: "Cut Standby Drain",
        action: "Switch entertainment devices off at the wall",
        matches: |ctx| ctx.heaviest_active(DeviceKind::Entertainment).is_some(),
        monthly_savings: |ctx| {
            ctx.heaviest_active(DeviceKind::Entertainment)
                .map_or(0.0, |d| 0.25 * ctx.monthly_running_cost(d.current_consumption))
        },
        describe: |savings| {
            format!(
                "Powering entertainment devices fully off can save \u{20b9}{savings:.2}/month"
            )
        },
    },
    Rule {
        id: 5,
        kind: RecommendationKind::Upgrade,
        priority: Priority::Low,
        category: DeviceKind::Lighting,
        title: "LED Bulb Replacement",
        action: "Upgrade to LED lighting",
        // category-driven: applies even with no monitored lighting device
        matches: |_ctx| true,
        monthly_savings: |_ctx| LED_UPGRADE_SAVINGS,
        describe: |savings| {
            format!(
                "Replace remaining incandescent bulbs with LEDs to save \u{20b9}{savings:.2}/month"
            )
        },
    },
];

/// Evaluates the fixed rule set against the device snapshot and
/// dashboard aggregates.
///
/// Matching rules each emit exactly one recommendation. Results are
/// sorted by priority (high, medium, low) with a stable sort, so ties
/// keep rule-declaration order. `total_potential_savings` is the exact
/// sum of the emitted estimates. No match yields an empty set with a
/// zero total, not an error.
pub fn recommend(
    devices: &[Device],
    snapshot: &DashboardSnapshot,
    rate_per_kwh: f64,
) -> RecommendationSet {
    let ctx = RuleContext {
        devices,
        snapshot,
        rate_per_kwh,
    };
    evaluate(RULES, &ctx)
}

fn evaluate(rules: &[Rule], ctx: &RuleContext) -> RecommendationSet {
    let mut recommendations: Vec<Recommendation> = rules
        .iter()
        .filter(|rule| (rule.matches)(ctx))
        .map(|rule| {
            let savings = round2((rule.monthly_savings)(ctx));
            Recommendation {
                id: rule.id,
                kind: rule.kind,
                priority: rule.priority,
                title: rule.title.to_string(),
                description: (rule.describe)(savings),
                potential_savings: savings,
                category: rule.category,
                action: rule.action.to_string(),
            }
        })
        .collect();

    // stable: equal-priority rules keep declaration order
    recommendations.sort_by_key(|r| r.priority.rank());

    let total_potential_savings = round2(
        recommendations
            .iter()
            .map(|r| r.potential_savings)
            .sum(),
    );

    RecommendationSet {
        recommendations,
        total_potential_savings,
    }
}
