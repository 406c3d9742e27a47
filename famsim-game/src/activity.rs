//! Activity catalog: wire tags, dispatch behavior and the fixed option menus
//! of the parameterized activities.

use crate::i18n::{fmt_yuan, t, tr_pairs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Rest,
    Work,
    Exercise,
    Study,
    JobHunting,
    Socialize,
    Investment,
    StartBusiness,
    ManageBusiness,
    Date,
    PlasticSurgery,
    MentalHealth,
    Charity,
    Status,
    Family,
}

/// How a triggered activity is handled by the flow orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Read-only view computed from the current state; no engine call.
    Detail,
    /// Submitted straight away with empty parameters.
    Immediate,
    /// Needs an option menu (and possibly a text prompt) first.
    Parameterized,
}

impl ActivityKind {
    /// Display order of the activity buttons.
    pub const ALL: [Self; 15] = [
        Self::Rest,
        Self::Work,
        Self::Exercise,
        Self::Study,
        Self::JobHunting,
        Self::Socialize,
        Self::Investment,
        Self::StartBusiness,
        Self::ManageBusiness,
        Self::Date,
        Self::PlasticSurgery,
        Self::MentalHealth,
        Self::Charity,
        Self::Status,
        Self::Family,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Work => "work",
            Self::Exercise => "exercise",
            Self::Study => "study",
            Self::JobHunting => "job_hunting",
            Self::Socialize => "socialize",
            Self::Investment => "investment",
            Self::StartBusiness => "start_business",
            Self::ManageBusiness => "manage_business",
            Self::Date => "date",
            Self::PlasticSurgery => "plastic_surgery",
            Self::MentalHealth => "mental_health",
            Self::Charity => "charity",
            Self::Status => "status",
            Self::Family => "family",
        }
    }

    #[must_use]
    pub const fn behavior(self) -> Behavior {
        match self {
            Self::Status | Self::Family => Behavior::Detail,
            Self::Study
            | Self::Investment
            | Self::StartBusiness
            | Self::ManageBusiness
            | Self::MentalHealth
            | Self::PlasticSurgery
            | Self::Charity => Behavior::Parameterized,
            Self::Rest
            | Self::Work
            | Self::Exercise
            | Self::Socialize
            | Self::JobHunting
            | Self::Date => Behavior::Immediate,
        }
    }

    /// Whether the chosen option is followed by a numeric amount prompt.
    #[must_use]
    pub const fn needs_amount(self) -> bool {
        matches!(self, Self::Investment | Self::Charity)
    }

    #[must_use]
    pub const fn needs_business_name(self) -> bool {
        matches!(self, Self::StartBusiness)
    }

    #[must_use]
    pub fn label(self) -> String {
        t(&format!("activity.{}", self.as_str()))
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// A single parameter value as submitted to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(i64),
    Text(String),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Parameter mapping built up by the dialog chain, serialized as a flat
/// JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ActivityParams(BTreeMap<String, ParamValue>);

impl ActivityParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ParamValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Request submitted for `run activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRequest {
    pub activity_type: ActivityKind,
    #[serde(default)]
    pub params: ActivityParams,
}

impl ActivityRequest {
    #[must_use]
    pub const fn new(activity_type: ActivityKind, params: ActivityParams) -> Self {
        Self {
            activity_type,
            params,
        }
    }

    #[must_use]
    pub fn immediate(activity_type: ActivityKind) -> Self {
        Self::new(activity_type, ActivityParams::new())
    }
}

/// Generates a menu enum with its engine wire value and label key.
macro_rules! menu_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $menu:literal, $param:literal {
            $($variant:ident => ($wire:literal, $key:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            /// Parameter key the choice is submitted under.
            pub const PARAM: &'static str = $param;

            /// Literal the engine expects for this choice.
            #[must_use]
            pub const fn wire_value(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            #[must_use]
            pub const fn label_key(self) -> &'static str {
                match self {
                    $(Self::$variant => concat!("menu.", $menu, ".", $key)),+
                }
            }

            #[must_use]
            pub fn params(self) -> ActivityParams {
                ActivityParams::new().with(Self::PARAM, self.wire_value())
            }
        }
    };
}

menu_enum! {
    StudyFocus, "study", "focus" {
        Expertise => ("专业知识", "expertise"),
        FinancialAcumen => ("财商", "financial_acumen"),
        EmotionalIntelligence => ("情商", "emotional_intelligence"),
        Leadership => ("领导", "leadership"),
        BusinessVision => ("商业", "business_vision"),
    }
}

menu_enum! {
    InvestmentType, "investment", "type" {
        Stocks => ("股票", "stocks"),
        Funds => ("基金", "funds"),
        Bonds => ("债券", "bonds"),
        RealEstate => ("房产", "real_estate"),
        Other => ("其他", "other"),
    }
}

menu_enum! {
    BusinessType, "start_business", "type" {
        Tech => ("科技", "tech"),
        FoodService => ("餐饮", "food_service"),
        Retail => ("零售", "retail"),
        Education => ("教育", "education"),
        Consulting => ("咨询", "consulting"),
    }
}

menu_enum! {
    ManagementFocus, "manage_business", "focus" {
        Marketing => ("市场推广", "marketing"),
        Hiring => ("人才招聘", "hiring"),
        Research => ("产品研发", "research"),
        CostControl => ("成本控制", "cost_control"),
        Strategy => ("战略调整", "strategy"),
        Financing => ("融资扩张", "financing"),
    }
}

menu_enum! {
    MentalHealthCare, "mental_health", "type" {
        SelfRegulation => ("自我调节", "self_regulation"),
        TalkToFriend => ("朋友倾诉", "talk_to_friend"),
        Counseling => ("专业心理咨询", "counseling"),
    }
}

menu_enum! {
    SurgeryTier, "plastic_surgery", "type" {
        Minor => ("微整形", "minor"),
        Facial => ("面部整形", "facial"),
        Full => ("全面改造", "full"),
    }
}

menu_enum! {
    CharityProgram, "charity", "type" {
        EducationFund => ("教育基金会", "education_fund"),
        MedicalAid => ("医疗救助", "medical_aid"),
        PovertyRelief => ("扶贫项目", "poverty_relief"),
        Environment => ("环保组织", "environment"),
    }
}

pub const COUNSELING_COST: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl SurgeryTier {
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Minor => 20_000,
            Self::Facial => 50_000,
            Self::Full => 150_000,
        }
    }

    #[must_use]
    pub const fn risk(self) -> RiskLevel {
        match self {
            Self::Minor => RiskLevel::Low,
            Self::Facial => RiskLevel::Medium,
            Self::Full => RiskLevel::High,
        }
    }

    /// Appearance gain range the engine rolls within.
    #[must_use]
    pub const fn effect_range(self) -> (u8, u8) {
        match self {
            Self::Minor => (5, 15),
            Self::Facial => (10, 25),
            Self::Full => (20, 40),
        }
    }
}

impl CharityProgram {
    /// Smallest donation the engine accepts for the program.
    #[must_use]
    pub const fn minimum(self) -> u32 {
        match self {
            Self::EducationFund => 1_000,
            Self::MedicalAid => 5_000,
            Self::PovertyRelief => 10_000,
            Self::Environment => 3_000,
        }
    }
}

/// One entry of an option menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub params: ActivityParams,
}

/// Option menu shown before a parameterized activity is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityMenu {
    pub activity: ActivityKind,
    pub title: String,
    pub prompt: String,
    pub options: Vec<MenuOption>,
}

impl ActivityMenu {
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&MenuOption> {
        self.options.get(index)
    }
}

fn options_of<T: Copy>(
    all: &[T],
    label: impl Fn(T) -> String,
    params: impl Fn(T) -> ActivityParams,
) -> Vec<MenuOption> {
    all.iter()
        .map(|&item| MenuOption {
            label: label(item),
            params: params(item),
        })
        .collect()
}

fn cost_label(key: &str, cost: u32) -> String {
    tr_pairs(key, &[("cost", &fmt_yuan(f64::from(cost), 0))])
}

/// Build the fixed option menu of a parameterized activity; `None` for the
/// other behaviors.
#[must_use]
pub fn menu_for(activity: ActivityKind) -> Option<ActivityMenu> {
    let options = match activity {
        ActivityKind::Study => options_of(StudyFocus::ALL, |o| t(o.label_key()), StudyFocus::params),
        ActivityKind::Investment => {
            options_of(InvestmentType::ALL, |o| t(o.label_key()), InvestmentType::params)
        }
        ActivityKind::StartBusiness => {
            options_of(BusinessType::ALL, |o| t(o.label_key()), BusinessType::params)
        }
        ActivityKind::ManageBusiness => {
            options_of(ManagementFocus::ALL, |o| t(o.label_key()), ManagementFocus::params)
        }
        ActivityKind::MentalHealth => options_of(
            MentalHealthCare::ALL,
            |o| match o {
                MentalHealthCare::Counseling => cost_label(o.label_key(), COUNSELING_COST),
                _ => t(o.label_key()),
            },
            MentalHealthCare::params,
        ),
        ActivityKind::PlasticSurgery => options_of(
            SurgeryTier::ALL,
            |o| cost_label(o.label_key(), o.cost()),
            SurgeryTier::params,
        ),
        ActivityKind::Charity => options_of(
            CharityProgram::ALL,
            |o| {
                tr_pairs(
                    o.label_key(),
                    &[("minimum", &fmt_yuan(f64::from(o.minimum()), 0))],
                )
            },
            CharityProgram::params,
        ),
        _ => return None,
    };

    let base = format!("menu.{}", activity.as_str());
    Some(ActivityMenu {
        activity,
        title: t(&format!("{base}.title")),
        prompt: t(&format!("{base}.prompt")),
        options,
    })
}
