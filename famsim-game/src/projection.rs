//! Pure projection of a [`GameState`] into what the front end shows.
//!
//! Nothing here keeps state between calls: the orchestrator re-runs
//! [`project`] after every snapshot replacement and throws the old view away.

use crate::activity::ActivityKind;
use crate::dialog::DetailSection;
use crate::i18n::{fmt_fixed, fmt_number, fmt_yuan, t, tr_pairs};
use crate::state::{FamilyMember, GameState, Player};
use std::collections::HashSet;

pub const START_BUSINESS_MIN_ASSETS: f64 = 50_000.0;
pub const INVESTMENT_MIN_ASSETS: f64 = 1_000.0;
pub const PLASTIC_SURGERY_MIN_ASSETS: f64 = 20_000.0;

const HUNDRED_MILLION: f64 = 100_000_000.0;
const TEN_THOUSAND: f64 = 10_000.0;

/// Color band of an attribute bar, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Danger,
    Warning,
    Neutral,
    Good,
}

impl Severity {
    #[must_use]
    pub fn for_value(value: f64) -> Self {
        let value = clamp_gauge(value);
        if value < 25.0 {
            Self::Danger
        } else if value < 50.0 {
            Self::Warning
        } else if value < 75.0 {
            Self::Neutral
        } else {
            Self::Good
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Neutral => "neutral",
            Self::Good => "good",
        }
    }
}

fn clamp_gauge(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBar {
    pub key: &'static str,
    pub label: String,
    /// Raw value as sent by the engine.
    pub value: f64,
    /// Bar fill in percent, clamped to `[0, 100]`.
    pub width_percent: f64,
    pub severity: Severity,
}

impl AttributeBar {
    /// Rounded value shown next to the bar.
    #[must_use]
    pub fn display_value(&self) -> String {
        fmt_fixed(self.value.round(), 0)
    }
}

#[must_use]
pub fn attribute_bar(key: &'static str, value: f64) -> AttributeBar {
    AttributeBar {
        key,
        label: t(&format!("attr.{key}")),
        value,
        width_percent: clamp_gauge(value),
        severity: Severity::for_value(value),
    }
}

/// Gauges shown on the character card, in display order.
pub const CARD_ATTRIBUTES: [&str; 6] = [
    "health",
    "energy",
    "appearance",
    "intelligence",
    "emotional_intelligence",
    "financial_intelligence",
];

fn gauge(player: &Player, key: &str) -> f64 {
    match key {
        "health" => player.health,
        "energy" => player.energy,
        "appearance" => player.appearance,
        "charm" => player.charm,
        "intelligence" => player.intelligence,
        "emotional_intelligence" => player.emotional_intelligence,
        "financial_intelligence" => player.financial_intelligence,
        "luck" => player.luck,
        "happiness" => player.happiness,
        "stress_level" => player.stress_level,
        _ => 0.0,
    }
}

/// Whether `activity` may be triggered by `player`.
#[must_use]
pub fn is_enabled(activity: ActivityKind, player: &Player) -> bool {
    match activity {
        ActivityKind::Work => !player.is_unemployed(),
        ActivityKind::StartBusiness => {
            !player.owns_business() && player.assets >= START_BUSINESS_MIN_ASSETS
        }
        ActivityKind::ManageBusiness => player.owns_business(),
        ActivityKind::Investment => player.assets >= INVESTMENT_MIN_ASSETS,
        ActivityKind::PlasticSurgery => player.assets >= PLASTIC_SURGERY_MIN_ASSETS,
        _ => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityButton {
    pub kind: ActivityKind,
    pub label: String,
    pub enabled: bool,
}

#[must_use]
pub fn activity_buttons(player: &Player) -> Vec<ActivityButton> {
    ActivityKind::ALL
        .iter()
        .map(|&kind| ActivityButton {
            kind,
            label: kind.label(),
            enabled: is_enabled(kind, player),
        })
        .collect()
}

/// Three-tier money display: `1.50亿`, `2.5万`, `999`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount >= HUNDRED_MILLION {
        format!(
            "{}{}",
            fmt_fixed(amount / HUNDRED_MILLION, 2),
            t("money.hundred_million")
        )
    } else if amount >= TEN_THOUSAND {
        format!(
            "{}{}",
            fmt_fixed(amount / TEN_THOUSAND, 1),
            t("money.ten_thousand")
        )
    } else {
        fmt_fixed(amount, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub day: String,
    pub season: String,
    pub economy: String,
    pub fortune: String,
    pub prestige: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    fn new(label_key: &str, value: String) -> Self {
        Self {
            label: t(label_key),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine {
    pub date: String,
    pub text: String,
}

/// Everything the game screen shows for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub header: Header,
    pub name: String,
    pub basic_info: String,
    pub bars: Vec<AttributeBar>,
    pub status: Vec<LabeledValue>,
    /// Newest first.
    pub events: Vec<EventLine>,
    pub activities: Vec<ActivityButton>,
}

impl GameView {
    #[must_use]
    pub fn activity(&self, kind: ActivityKind) -> Option<&ActivityButton> {
        self.activities.iter().find(|button| button.kind == kind)
    }
}

/// Project a snapshot; `None` when it carries no player.
#[must_use]
pub fn project(state: &GameState) -> Option<GameView> {
    let player = state.player.as_ref()?;

    let header = Header {
        day: tr_pairs("header.day", &[("day", &state.current_day.to_string())]),
        season: t(&state.current_season.i18n_key()),
        economy: tr_pairs(
            "header.economy",
            &[("status", &t(&state.economy_status.i18n_key()))],
        ),
        fortune: format_money(state.family_fortune),
        prestige: fmt_fixed(state.family_prestige, 1),
    };

    let bars = CARD_ATTRIBUTES
        .iter()
        .map(|&key| attribute_bar(key, gauge(player, key)))
        .collect();

    let status = vec![
        LabeledValue::new("status.job", player.job.clone()),
        LabeledValue::new("status.salary", format!("¥{}", fmt_number(player.salary))),
        LabeledValue::new("status.assets", fmt_yuan(player.assets, 0)),
        LabeledValue::new("status.education", player.education_level.clone()),
        LabeledValue::new("status.relationship", player.relationship_status.clone()),
    ];

    let events = state
        .events
        .iter()
        .rev()
        .map(|record| EventLine {
            date: record.date.clone(),
            text: record.event.clone(),
        })
        .collect();

    Some(GameView {
        header,
        name: player.name.clone(),
        basic_info: tr_pairs(
            "card.basic_info",
            &[("gender", &player.gender), ("age", &player.age.to_string())],
        ),
        bars,
        status,
        events,
        activities: activity_buttons(player),
    })
}

/// Relationship bucket of a family member, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FamilyBucket {
    Spouse,
    Child,
    Parent,
    Sibling,
    Other,
}

impl FamilyBucket {
    pub const ALL: [Self; 5] = [
        Self::Spouse,
        Self::Child,
        Self::Parent,
        Self::Sibling,
        Self::Other,
    ];

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Spouse => "family.spouse",
            Self::Child => "family.children",
            Self::Parent => "family.parents",
            Self::Sibling => "family.siblings",
            Self::Other => "family.other",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Spouse => 0,
            Self::Child => 1,
            Self::Parent => 2,
            Self::Sibling => 3,
            Self::Other => 4,
        }
    }
}

/// Name-keyed lookup of the player's relations. Names are lookup keys only;
/// a name that matches nobody simply classifies nobody.
struct Relations<'a> {
    player_name: &'a str,
    spouse_name: Option<&'a str>,
    parents: HashSet<&'a str>,
}

impl<'a> Relations<'a> {
    fn of(player: &'a Player) -> Self {
        Self {
            player_name: player.name.as_str(),
            spouse_name: player.spouse_name(),
            parents: player.parents.iter().map(String::as_str).collect(),
        }
    }

    fn classify(&self, member: &FamilyMember) -> FamilyBucket {
        let member_parents = member.parents.as_deref().unwrap_or_default();
        if self.spouse_name == Some(member.name.as_str()) {
            FamilyBucket::Spouse
        } else if member_parents.iter().any(|p| p == self.player_name) {
            FamilyBucket::Child
        } else if self.parents.contains(member.name.as_str()) {
            FamilyBucket::Parent
        } else if member_parents
            .iter()
            .any(|p| self.parents.contains(p.as_str()))
        {
            FamilyBucket::Sibling
        } else {
            FamilyBucket::Other
        }
    }
}

/// Bucket a single member relative to `player`.
#[must_use]
pub fn classify_member(player: &Player, member: &FamilyMember) -> FamilyBucket {
    Relations::of(player).classify(member)
}

/// Family members partitioned by relationship; every member lands in
/// exactly one bucket, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FamilyPartition<'a> {
    buckets: [Vec<&'a FamilyMember>; 5],
}

impl<'a> FamilyPartition<'a> {
    #[must_use]
    pub fn bucket(&self, bucket: FamilyBucket) -> &[&'a FamilyMember] {
        &self.buckets[bucket.slot()]
    }

    /// Non-empty buckets in display order.
    pub fn non_empty(&self) -> impl Iterator<Item = (FamilyBucket, &[&'a FamilyMember])> + '_ {
        FamilyBucket::ALL
            .into_iter()
            .map(|bucket| (bucket, self.bucket(bucket)))
            .filter(|(_, members)| !members.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[must_use]
pub fn categorize_family<'a>(player: &Player, members: &'a [FamilyMember]) -> FamilyPartition<'a> {
    let relations = Relations::of(player);
    let mut partition = FamilyPartition::default();
    for member in members {
        partition.buckets[relations.classify(member).slot()].push(member);
    }
    partition
}

/// Read-only dialog content for the detail activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub sections: Vec<DetailSection>,
}

fn section(heading_key: &str, lines: Vec<String>) -> DetailSection {
    DetailSection {
        heading: t(heading_key),
        lines,
    }
}

fn detail_line(label: &str, value: &str) -> String {
    tr_pairs("details.line", &[("label", label), ("value", value)])
}

fn gauge_line(player: &Player, key: &str) -> String {
    detail_line(&t(&format!("attr.{key}")), &fmt_number(gauge(player, key)))
}

/// The `status` activity: the full character sheet.
#[must_use]
pub fn character_details(state: &GameState) -> Option<DetailView> {
    let player = state.player.as_ref()?;
    let mut sections = vec![DetailSection {
        heading: tr_pairs(
            "details.heading",
            &[
                ("name", &player.name),
                ("gender", &player.gender),
                ("age", &player.age.to_string()),
            ],
        ),
        lines: Vec::new(),
    }];

    sections.push(section(
        "details.basic",
        [
            "health",
            "energy",
            "appearance",
            "charm",
            "intelligence",
            "emotional_intelligence",
            "financial_intelligence",
            "luck",
        ]
        .iter()
        .map(|key| gauge_line(player, key))
        .collect(),
    ));

    sections.push(section(
        "details.physical",
        vec![
            tr_pairs("details.height", &[("value", &fmt_number(player.height))]),
            tr_pairs("details.weight", &[("value", &fmt_number(player.weight))]),
            tr_pairs("details.body_type", &[("value", &player.weight_status)]),
        ],
    ));

    sections.push(section(
        "details.mental",
        vec![
            gauge_line(player, "happiness"),
            gauge_line(player, "stress_level"),
            tr_pairs("details.mental_state", &[("value", &player.mental_state)]),
        ],
    ));

    sections.push(section(
        "details.economy",
        vec![
            detail_line(&t("status.job"), &player.job),
            detail_line(&t("status.salary"), &format!("¥{}", fmt_number(player.salary))),
            detail_line(&t("status.assets"), &fmt_yuan(player.assets, 2)),
            detail_line(&t("status.debt"), &fmt_yuan(player.debt, 2)),
        ],
    ));

    if player.has_business
        && let Some(business) = &player.business
    {
        sections.push(section(
            "details.business",
            vec![
                detail_line(&t("details.business_name"), &business.name),
                detail_line(&t("details.business_type"), &business.kind),
                detail_line(&t("details.business_scale"), &fmt_number(business.scale)),
                detail_line(
                    &t("details.business_profit"),
                    &format!("¥{}", fmt_number(business.profit)),
                ),
                detail_line(
                    &t("details.business_value"),
                    &format!("¥{}", fmt_number(business.value)),
                ),
                detail_line(
                    &t("details.business_employees"),
                    &business.employees.to_string(),
                ),
                detail_line(
                    &t("details.business_reputation"),
                    &fmt_number(business.reputation),
                ),
            ],
        ));
    }

    let holdings: Vec<String> = player
        .investments
        .iter()
        .filter(|(_, amount)| **amount > 0.0)
        .map(|(kind, amount)| detail_line(kind, &fmt_yuan(*amount, 2)))
        .collect();
    if !holdings.is_empty() {
        sections.push(section("details.investments", holdings));
    }

    sections.push(section(
        "details.network",
        player
            .network
            .iter()
            .map(|(kind, level)| {
                tr_pairs(
                    "details.network_line",
                    &[("kind", kind), ("level", &fmt_number(*level))],
                )
            })
            .collect(),
    ));

    Some(DetailView {
        title: t("details.title"),
        sections,
    })
}

/// The `family` activity: members by relationship plus a summary.
#[must_use]
pub fn family_tree(state: &GameState) -> Option<DetailView> {
    let player = state.player.as_ref()?;
    let partition = categorize_family(player, &state.family_members);

    let mut sections: Vec<DetailSection> = partition
        .non_empty()
        .map(|(bucket, members)| {
            section(
                bucket.label_key(),
                members
                    .iter()
                    .map(|member| {
                        tr_pairs(
                            "family.member",
                            &[
                                ("name", &member.name),
                                ("gender", &member.gender),
                                ("age", &member.age.to_string()),
                                ("job", &member.job),
                            ],
                        )
                    })
                    .collect(),
            )
        })
        .collect();

    sections.push(section(
        "family.summary",
        vec![
            tr_pairs(
                "family.size",
                &[("count", &(state.family_members.len() + 1).to_string())],
            ),
            tr_pairs(
                "family.fortune",
                &[("amount", &fmt_yuan(state.family_fortune, 2))],
            ),
            tr_pairs(
                "family.prestige",
                &[("value", &fmt_fixed(state.family_prestige, 1))],
            ),
        ],
    ));

    Some(DetailView {
        title: t("family.title"),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Business, EventRecord, SpouseSummary};

    fn member(name: &str, parents: Option<&[&str]>) -> FamilyMember {
        FamilyMember {
            name: name.to_string(),
            gender: "女性".into(),
            age: 30,
            job: "教师".into(),
            parents: parents.map(|ps| ps.iter().map(|p| (*p).to_string()).collect()),
        }
    }

    fn player() -> Player {
        Player {
            name: "张伟".into(),
            gender: "男性".into(),
            age: 30,
            job: "程序员".into(),
            assets: 60_000.0,
            parents: vec!["Alice".into(), "Bob".into()],
            spouse: Some(SpouseSummary {
                name: "王芳".into(),
                ..SpouseSummary::default()
            }),
            ..Player::default()
        }
    }

    #[test]
    fn severity_steps() {
        assert_eq!(Severity::for_value(0.0), Severity::Danger);
        assert_eq!(Severity::for_value(24.9), Severity::Danger);
        assert_eq!(Severity::for_value(25.0), Severity::Warning);
        assert_eq!(Severity::for_value(49.9), Severity::Warning);
        assert_eq!(Severity::for_value(50.0), Severity::Neutral);
        assert_eq!(Severity::for_value(74.9), Severity::Neutral);
        assert_eq!(Severity::for_value(75.0), Severity::Good);
        assert_eq!(Severity::for_value(100.0), Severity::Good);
        assert_eq!(Severity::for_value(-10.0), Severity::Danger);
        assert_eq!(Severity::for_value(140.0), Severity::Good);
    }

    #[test]
    fn severity_never_decreases() {
        let mut previous = Severity::Danger;
        for step in 0..=1000 {
            let current = Severity::for_value(f64::from(step) / 10.0);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn bars_clamp_width() {
        let bar = attribute_bar("health", 120.0);
        assert!((bar.width_percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(bar.label, "健康");
        assert_eq!(attribute_bar("energy", -5.0).width_percent, 0.0);
        assert_eq!(attribute_bar("luck", 49.6).display_value(), "50");
    }

    #[test]
    fn money_tiers() {
        assert_eq!(format_money(150_000_000.0), "1.50亿");
        assert_eq!(format_money(100_000_000.0), "1.00亿");
        assert_eq!(format_money(25_000.0), "2.5万");
        assert_eq!(format_money(10_000.0), "1.0万");
        assert_eq!(format_money(999.0), "999");
        assert_eq!(format_money(9_999.0), "9999");
    }

    #[test]
    fn eligibility_rules() {
        let mut p = player();
        assert!(is_enabled(ActivityKind::Work, &p));
        p.job = crate::state::JOB_UNEMPLOYED.into();
        assert!(!is_enabled(ActivityKind::Work, &p));

        p.assets = 49_999.0;
        assert!(!is_enabled(ActivityKind::StartBusiness, &p));
        p.assets = 50_000.0;
        assert!(is_enabled(ActivityKind::StartBusiness, &p));
        assert!(!is_enabled(ActivityKind::ManageBusiness, &p));

        p.has_business = true;
        assert!(!is_enabled(ActivityKind::StartBusiness, &p));
        assert!(is_enabled(ActivityKind::ManageBusiness, &p));

        p.assets = 999.0;
        assert!(!is_enabled(ActivityKind::Investment, &p));
        assert!(!is_enabled(ActivityKind::PlasticSurgery, &p));
        assert!(is_enabled(ActivityKind::Status, &p));
    }

    #[test]
    fn family_partition_follows_precedence() {
        let p = player();
        let members = vec![
            member("李明", Some(&["Alice", "Bob"])),
            member("张小伟", Some(&["张伟", "王芳"])),
            member("王芳", Some(&["Alice"])),
            member("Alice", None),
            member("赵六", None),
        ];
        let partition = categorize_family(&p, &members);
        assert_eq!(partition.len(), members.len());
        assert_eq!(partition.bucket(FamilyBucket::Sibling)[0].name, "李明");
        assert_eq!(partition.bucket(FamilyBucket::Child)[0].name, "张小伟");
        assert_eq!(
            partition.bucket(FamilyBucket::Spouse)[0].name,
            "王芳",
            "spouse wins over sibling"
        );
        assert_eq!(partition.bucket(FamilyBucket::Parent)[0].name, "Alice");
        assert_eq!(partition.bucket(FamilyBucket::Other)[0].name, "赵六");
    }

    #[test]
    fn siblings_need_both_parent_lists() {
        let mut p = player();
        p.parents.clear();
        assert_eq!(
            classify_member(&p, &member("李明", Some(&["Alice"]))),
            FamilyBucket::Other
        );
    }

    #[test]
    fn projection_reflects_snapshot() {
        let state = GameState {
            current_day: 3,
            family_fortune: 25_000.0,
            family_prestige: 12.34,
            events: vec![
                EventRecord {
                    date: "第1天".into(),
                    event: "开始".into(),
                },
                EventRecord {
                    date: "第2天".into(),
                    event: "工作".into(),
                },
            ],
            player: Some(player()),
            ..GameState::default()
        };
        let view = project(&state).unwrap();
        assert_eq!(view.header.day, "第3天");
        assert_eq!(view.header.season, "春季");
        assert_eq!(view.header.economy, "经济正常");
        assert_eq!(view.header.fortune, "2.5万");
        assert_eq!(view.header.prestige, "12.3");
        assert_eq!(view.basic_info, "男性 | 30岁");
        assert_eq!(view.bars.len(), CARD_ATTRIBUTES.len());
        assert_eq!(view.events[0].date, "第2天");
        assert_eq!(view.status[2].value, "¥60000");
        assert_eq!(view.activities.len(), ActivityKind::ALL.len());

        assert!(project(&GameState::default()).is_none());
    }

    #[test]
    fn projection_is_pure() {
        let state = GameState {
            player: Some(player()),
            ..GameState::default()
        };
        assert_eq!(project(&state), project(&state));
    }

    #[test]
    fn details_include_optional_sections() {
        let mut p = player();
        p.investments.insert("股票".into(), 1000.0);
        p.investments.insert("债券".into(), 0.0);
        p.network.insert("商业".into(), 10.0);
        let state = GameState {
            player: Some(p.clone()),
            ..GameState::default()
        };
        let view = character_details(&state).unwrap();
        let headings: Vec<_> = view.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings[0], "张伟 (男性, 30岁)");
        assert!(headings.contains(&"投资组合"));
        assert!(!headings.contains(&"企业信息"));
        let investments = view.sections.iter().find(|s| s.heading == "投资组合").unwrap();
        assert_eq!(investments.lines, vec!["股票: ¥1000.00".to_string()]);
        let network = view.sections.last().unwrap();
        assert_eq!(network.lines, vec!["商业圈: 10".to_string()]);

        p.has_business = true;
        p.business = Some(Business {
            name: "张伟的科技公司".into(),
            kind: "科技".into(),
            ..Business::default()
        });
        let state = GameState {
            player: Some(p),
            ..GameState::default()
        };
        let view = character_details(&state).unwrap();
        assert!(view.sections.iter().any(|s| s.heading == "企业信息"));
    }

    #[test]
    fn family_tree_summary_counts_player() {
        let state = GameState {
            family_fortune: 5000.0,
            family_prestige: 50.0,
            family_members: vec![member("王芳", None)],
            player: Some(player()),
            ..GameState::default()
        };
        let view = family_tree(&state).unwrap();
        assert_eq!(view.title, "家族成员");
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[0].heading, "配偶");
        assert_eq!(
            view.sections[1].lines,
            vec![
                "家族成员: 2人".to_string(),
                "家族财富: ¥5000.00".to_string(),
                "家族声望: 50.0".to_string(),
            ]
        );
    }
}
