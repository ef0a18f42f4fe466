//! Static theme registry

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Theme used whenever a requested id is unknown.
pub const DEFAULT_THEME_ID: &str = "general";

/// How the model is asked to score a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFormat {
    /// Numeric score from 0 to 10
    Numeric,
    /// Categorical short/medium/long-term answer
    Horizon,
}

impl ScoreFormat {
    /// Placeholder shown to the model inside the JSON template.
    pub fn placeholder(self) -> &'static str {
        match self {
            ScoreFormat::Numeric => "0-10",
            ScoreFormat::Horizon => "\"短期/中期/長期\"",
        }
    }
}

/// A named evaluation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub key: &'static str,
    pub label: &'static str,
    pub format: ScoreFormat,
}

/// A meeting theme and the dimensions it is evaluated on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub dimensions: &'static [Dimension],
    pub description: &'static str,
}

impl ThemeDefinition {
    /// Dimension keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dimensions.iter().map(|d| d.key)
    }

    /// Ordered `key -> label` view, serialized as a JSON object.
    pub fn dimension_map(&self) -> DimensionMap {
        DimensionMap(self.dimensions)
    }
}

/// Serializes dimensions as an ordered `{ key: label }` object.
#[derive(Debug, Clone, Copy)]
pub struct DimensionMap(&'static [Dimension]);

impl Serialize for DimensionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for dimension in self.0 {
            map.serialize_entry(dimension.key, dimension.label)?;
        }
        map.end()
    }
}

const fn numeric(key: &'static str, label: &'static str) -> Dimension {
    Dimension {
        key,
        label,
        format: ScoreFormat::Numeric,
    }
}

const fn horizon(key: &'static str, label: &'static str) -> Dimension {
    Dimension {
        key,
        label,
        format: ScoreFormat::Horizon,
    }
}

const GENERAL: ThemeDefinition = ThemeDefinition {
    id: DEFAULT_THEME_ID,
    display_name: "その他 (汎用)",
    dimensions: &[
        numeric("cost_concern", "コスト"),
        numeric("quality", "品質"),
        numeric("efficiency_focus", "効率性"),
        numeric("people_focus", "人材"),
        numeric("risk", "リスク"),
    ],
    description: "汎用的な評価視点",
};

static THEMES: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "equipment_investment",
        display_name: "設備投資・設備導入",
        dimensions: &[
            numeric("cost_concern", "コスト重視度"),
            numeric("safety_concern", "安全性重視度"),
            numeric("efficiency_focus", "効率性重視度"),
            numeric("people_focus", "人材育成重視度"),
            horizon("time_horizon", "時間軸"),
        ],
        description: "設備投資や新規導入の検討に適した視点",
    },
    ThemeDefinition {
        id: "hr_evaluation",
        display_name: "人事評価・採用",
        dimensions: &[
            numeric("performance", "成果・実績"),
            numeric("skill_development", "能力開発"),
            numeric("team_contribution", "チーム貢献"),
            numeric("leadership", "リーダーシップ"),
            horizon("potential", "将来性"),
        ],
        description: "人事評価や採用判断に適した視点",
    },
    ThemeDefinition {
        id: "product_development",
        display_name: "新製品開発",
        dimensions: &[
            numeric("market_fit", "市場性"),
            numeric("technical_feasibility", "技術実現性"),
            numeric("competitive_advantage", "競合優位性"),
            numeric("profitability", "収益性"),
            numeric("brand_fit", "ブランド適合性"),
        ],
        description: "新製品・サービス開発に適した視点",
    },
    ThemeDefinition {
        id: "budget_planning",
        display_name: "予算策定・コスト削減",
        dimensions: &[
            numeric("priority", "優先度"),
            numeric("roi", "費用対効果"),
            numeric("risk", "リスク"),
            numeric("feasibility", "実行可能性"),
            numeric("strategic_alignment", "戦略整合性"),
        ],
        description: "予算や投資判断に適した視点",
    },
    ThemeDefinition {
        id: "process_improvement",
        display_name: "業務改善・プロセス改革",
        dimensions: &[
            numeric("efficiency", "効率性"),
            numeric("quality", "品質向上"),
            numeric("workload", "従業員負担"),
            numeric("implementation", "導入難易度"),
            numeric("sustainability", "持続可能性"),
        ],
        description: "業務プロセスの改善に適した視点",
    },
    GENERAL,
];

/// All themes in catalog order.
pub fn all() -> &'static [ThemeDefinition] {
    THEMES
}

/// Exact match on theme id.
pub fn find(theme_id: &str) -> Option<&'static ThemeDefinition> {
    THEMES.iter().find(|theme| theme.id == theme_id)
}

/// Resolve a theme id, falling back to `general` for anything unknown.
pub fn lookup(theme_id: &str) -> &'static ThemeDefinition {
    find(theme_id).unwrap_or_else(general)
}

fn general() -> &'static ThemeDefinition {
    &GENERAL
}
