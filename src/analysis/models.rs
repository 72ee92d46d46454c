//! Insight record produced by transcript analysis.
//!
//! Every field defaults when the model leaves it out or sends `null`, so
//! rendering never has to guard against missing keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured insights extracted from one demo transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecord {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub technical_requirements: Vec<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub pain_points: PainPoints,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub buying_signals: BuyingSignals,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub stakeholders: Stakeholders,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub timeline_info: TimelineInfo,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub pricing_discussion: PricingDiscussion,

    #[serde(default, deserialize_with = "lenient::action_items")]
    pub next_steps: Vec<ActionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainPoints {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub operational: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub technical: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub financial: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub clinical: Vec<String>,
    /// Pain point text to High/Medium/Low
    #[serde(default, deserialize_with = "lenient::text_map")]
    pub priority_level: BTreeMap<String, String>,
}

impl PainPoints {
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Operational", self.operational.as_slice()),
            ("Technical", self.technical.as_slice()),
            ("Financial", self.financial.as_slice()),
            ("Clinical", self.clinical.as_slice()),
        ]
    }

    /// Priority of a pain point; unranked points count as Medium.
    pub fn priority_of(&self, point: &str) -> Priority {
        self.priority_level
            .get(point)
            .map(|label| Priority::from_label(label))
            .unwrap_or(Priority::Medium)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyingSignals {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub budget_indicators: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub timeline_urgency: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub decision_process: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub competitor_mentions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub positive_signals: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub concerns: Vec<String>,
}

impl BuyingSignals {
    pub fn categories(&self) -> [(&'static str, &[String]); 6] {
        [
            ("Budget Indicators", self.budget_indicators.as_slice()),
            ("Timeline Urgency", self.timeline_urgency.as_slice()),
            ("Decision Process", self.decision_process.as_slice()),
            ("Competitor Mentions", self.competitor_mentions.as_slice()),
            ("Positive Signals", self.positive_signals.as_slice()),
            ("Concerns", self.concerns.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholders {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub decision_makers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub technical_reviewers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub end_users: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub other_stakeholders: Vec<String>,
}

impl Stakeholders {
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Decision Makers", self.decision_makers.as_slice()),
            ("Technical Reviewers", self.technical_reviewers.as_slice()),
            ("End Users", self.end_users.as_slice()),
            ("Other Stakeholders", self.other_stakeholders.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub implementation_phases: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub key_milestones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingDiscussion {
    #[serde(default, deserialize_with = "lenient::text")]
    pub model_discussed: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub budget_constraints: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub competitor_pricing: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub volume_considerations: String,
}

impl PricingDiscussion {
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("Model Discussed", self.model_discussed.as_str()),
            ("Budget Constraints", self.budget_constraints.as_str()),
            ("Competitor Pricing", self.competitor_pricing.as_str()),
            ("Volume Considerations", self.volume_considerations.as_str()),
        ]
    }
}

/// A follow-up task agreed on during the demo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub owner: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub deadline: String,
    /// High/Medium/Low as reported by the model; not validated
    #[serde(default, deserialize_with = "lenient::text")]
    pub priority: String,
}

impl ActionItem {
    pub fn priority(&self) -> Priority {
        Priority::from_label(&self.priority)
    }
}

/// Urgency bucket used when rendering pain points and action items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Anything that is not High or Medium renders as Low.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("high") {
            Self::High
        } else if label.eq_ignore_ascii_case("medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }
}

mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    use super::ActionItem;

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(into_text).unwrap_or_default())
    }

    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None => Vec::new(),
            Some(Value::Array(items)) => items.into_iter().filter_map(into_text).collect(),
            Some(other) => into_text(other).into_iter().collect(),
        })
    }

    pub fn text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(key, value)| into_text(value).map(|v| (key, v)))
                .collect(),
            _ => BTreeMap::new(),
        })
    }

    pub fn action_items<'de, D>(deserializer: D) -> Result<Vec<ActionItem>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = match Option::<Value>::deserialize(deserializer)? {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => vec![other],
        };

        let mut steps = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Null => {}
                Value::Object(_) => {
                    steps.push(serde_json::from_value(item).map_err(D::Error::custom)?);
                }
                other => {
                    if let Some(action) = into_text(other) {
                        steps.push(ActionItem {
                            action,
                            ..ActionItem::default()
                        });
                    }
                }
            }
        }
        Ok(steps)
    }

    fn into_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_default_to_empty() {
        let record: InsightRecord =
            serde_json::from_value(json!({"technical_requirements": ["HL7 feed"]})).unwrap();

        assert_eq!(record.technical_requirements, vec!["HL7 feed"]);
        assert!(record.pain_points.operational.is_empty());
        assert!(record.buying_signals.concerns.is_empty());
        assert_eq!(record.timeline_info.start_date, "");
        assert!(record.next_steps.is_empty());
    }

    #[test]
    fn nulls_and_non_string_entries_are_tolerated() {
        let record: InsightRecord = serde_json::from_value(json!({
            "technical_requirements": null,
            "pain_points": null,
            "stakeholders": {
                "decision_makers": [{"name": "Dr. Smith", "role": "CMIO"}, "CFO"],
                "end_users": "Nurses"
            },
            "timeline_info": {"start_date": 2025, "dependencies": null},
            "pricing_discussion": {"model_discussed": null, "budget_constraints": 50000},
            "next_steps": ["Send proposal", null, {"action": "Book security review", "priority": "High"}]
        }))
        .unwrap();

        assert!(record.technical_requirements.is_empty());
        assert_eq!(record.pain_points, PainPoints::default());
        assert_eq!(
            record.stakeholders.decision_makers,
            vec![r#"{"name":"Dr. Smith","role":"CMIO"}"#, "CFO"]
        );
        assert_eq!(record.stakeholders.end_users, vec!["Nurses"]);
        assert_eq!(record.timeline_info.start_date, "2025");
        assert_eq!(record.pricing_discussion.model_discussed, "");
        assert_eq!(record.pricing_discussion.budget_constraints, "50000");
        assert_eq!(record.next_steps.len(), 2);
        assert_eq!(record.next_steps[0].action, "Send proposal");
        assert_eq!(record.next_steps[0].owner, "");
        assert_eq!(record.next_steps[1].priority(), Priority::High);
    }

    #[test]
    fn pain_point_priority_defaults_to_medium() {
        let record: InsightRecord = serde_json::from_value(json!({
            "pain_points": {
                "financial": ["budget is tight", "license costs"],
                "priority_level": {"budget is tight": "High", "license costs": "whenever"}
            }
        }))
        .unwrap();

        let pain = &record.pain_points;
        assert_eq!(pain.priority_of("budget is tight"), Priority::High);
        assert_eq!(pain.priority_of("license costs"), Priority::Low);
        assert_eq!(pain.priority_of("unranked"), Priority::Medium);
    }

    #[test]
    fn serializes_fields_in_declaration_order() {
        let text = serde_json::to_string(&InsightRecord::default()).unwrap();
        let order = [
            "technical_requirements",
            "pain_points",
            "buying_signals",
            "stakeholders",
            "timeline_info",
            "pricing_discussion",
            "next_steps",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|key| text.find(&format!("\"{key}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn priority_labels_are_case_insensitive() {
        assert_eq!(Priority::from_label(" high "), Priority::High);
        assert_eq!(Priority::from_label("MEDIUM"), Priority::Medium);
        assert_eq!(Priority::from_label("Low"), Priority::Low);
        assert_eq!(Priority::from_label(""), Priority::Low);
        assert_eq!(Priority::High.marker(), "🔴");
    }
}
