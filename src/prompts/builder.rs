use crate::prompts::HistoryEntry;
use crate::themes::{self, ThemeDefinition};
use crate::{MeetingMindError, Result};

/// Theme detection needs at least one statement.
pub const MIN_DETECTION_ENTRIES: usize = 1;

/// Theme detection only looks at the opening statements.
pub const DETECTION_SAMPLE_SIZE: usize = 2;

/// Gap analysis compares at least two statements.
pub const MIN_GAP_ENTRIES: usize = 2;

/// Topic classification needs enough statements to form groups.
pub const MIN_TOPIC_ENTRIES: usize = 3;

/// Build the multi-dimension scoring prompt for a single statement.
pub fn build_analysis_prompt(transcript: &str, theme: &ThemeDefinition) -> String {
    let labels = theme
        .dimensions
        .iter()
        .map(|d| format!("- {}: {}", d.key, d.label))
        .collect::<Vec<_>>()
        .join("\n");

    let dimension_lines = theme
        .dimensions
        .iter()
        .map(|d| format!("  \"{}\": {}", d.key, d.format.placeholder()))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "発言を分析してJSON形式で返してください。

発言: {transcript}

評価視点: {name}
{labels}

{{
  \"topic\": \"トピック\",
  \"stance\": \"賛成/反対/中立/条件付き賛成/条件付き反対\",
  \"dimensions\": {{
{dimension_lines}
  }},
  \"key_points\": [\"要点1\", \"要点2\"],
  \"confidence\": 0-10
}}

ルール: 言及なし=低スコア、必ず要点1つ以上\n",
        name = theme.display_name,
    )
}

/// Build the prompt that classifies a meeting into one of the catalog themes.
pub fn build_theme_detection_prompt(history: &[HistoryEntry]) -> Result<String> {
    ensure_entries("theme detection", history, MIN_DETECTION_ENTRIES)?;

    let combined = history
        .iter()
        .take(DETECTION_SAMPLE_SIZE)
        .map(|h| h.transcript.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let choices = themes::all()
        .iter()
        .enumerate()
        .map(|(i, theme)| format!("{}. {} ({})", i + 1, theme.id, short_name(theme)))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "以下の会議発言から、会議のテーマを判定してください。

発言:
{combined}

以下のテーマから最も適切なものを1つ選んでください:
{choices}

以下のJSON形式で返してください:
{{
  \"theme\": \"テーマID (上記から1つ)\",
  \"confidence\": 0-10の数値,
  \"reason\": \"このテーマを選んだ理由\"
}}

判断基準:
- 設備、機械、導入などの言及 → equipment_investment
- 人事、評価、採用、人材などの言及 → hr_evaluation
- 製品、開発、新規事業などの言及 → product_development
- 予算、コスト、削減などの言及 → budget_planning
- 業務、プロセス、効率化などの言及 → process_improvement
- 上記に当てはまらない → general\n"
    ))
}

/// Build the prompt that looks for under-discussed dimensions.
pub fn build_gap_analysis_prompt(
    history: &[HistoryEntry],
    theme: &ThemeDefinition,
) -> Result<String> {
    ensure_entries("gap analysis", history, MIN_GAP_ENTRIES)?;

    let history_text = history
        .iter()
        .enumerate()
        .map(|(i, h)| format!("発言{}: {}", i + 1, h.transcript))
        .collect::<Vec<_>>()
        .join("\n");

    let dimension_list = theme
        .dimensions
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {} ({})", i + 1, d.key, d.label))
        .collect::<Vec<_>>()
        .join("\n");

    let coverage_format = theme
        .keys()
        .map(|key| format!("\"{key}\": 0-10の数値"))
        .collect::<Vec<_>>()
        .join(",\n    ");

    Ok(format!(
        "あなたは会議ファシリテーターです。以下の発言履歴を分析して、議論が不足している視点を指摘してください。

【会議テーマ】
{name}

【これまでの発言】
{history_text}

以下の視点で評価してください:
{dimension_list}

必ず以下のJSON形式で返してください:
{{
  \"coverage\": {{
    {coverage_format}
  }},
  \"missing_perspectives\": [\"不足している視点1\", \"不足している視点2\"],
  \"suggestions\": [\"具体的な質問提案1\", \"具体的な質問提案2\"],
  \"overall_balance\": 0-10の数値
}}

ルール:
- coverage: 各視点がどれだけ議論されているか (0=未議論, 10=十分議論)
- missing_perspectives: coverageが3以下の視点をリストアップ (視点名とその説明を含める)
- suggestions: 不足視点について議論を促す具体的な質問
- overall_balance: 議論全体のバランス (0=極端に偏っている, 10=完璧にバランス)\n",
        name = theme.display_name,
    ))
}

/// Build the prompt that groups statements into 3-5 topics.
pub fn build_topic_classification_prompt(history: &[HistoryEntry]) -> Result<String> {
    ensure_entries("topic classification", history, MIN_TOPIC_ENTRIES)?;

    let speeches = history
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{}. {}", i + 1, h.transcript))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "以下の会議発言を、3-5個の主要トピックにグループ化してください。

【発言一覧】
{speeches}

各発言の内容を分析し、意味的に関連する発言を同じトピックにまとめてください。
トピック名は具体的で分かりやすいものにしてください（例: マネジメント、業績評価、人材育成など）。

以下のJSON形式で返してください:
{{
  \"topics\": [
    {{
      \"name\": \"トピック名\",
      \"description\": \"このトピックの簡潔な説明\",
      \"speech_indices\": [0, 2, 5]
    }},
    {{
      \"name\": \"別のトピック名\",
      \"description\": \"説明\",
      \"speech_indices\": [1, 3]
    }}
  ]
}}

ルール:
- トピック数は3-5個
- 全ての発言を必ずどこかのトピックに含める
- speech_indices は0から始まる発言番号の配列
- 似た内容の発言は同じトピックにまとめる\n"
    ))
}

fn ensure_entries(task: &'static str, history: &[HistoryEntry], required: usize) -> Result<()> {
    if history.len() < required {
        return Err(MeetingMindError::InsufficientHistory {
            task,
            required,
            actual: history.len(),
        });
    }
    Ok(())
}

// `general` reads better as "その他" in the detection menu.
fn short_name(theme: &ThemeDefinition) -> &'static str {
    if theme.id == themes::DEFAULT_THEME_ID {
        "その他"
    } else {
        theme.display_name
    }
}
