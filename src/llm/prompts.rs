//! Prompt templates for transcript analysis and email drafting.

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert sales analyst specializing in healthcare technology demos. \
Extract detailed insights with a focus on pain points, buying signals, and actionable next steps.";

pub const EMAIL_SYSTEM_PROMPT: &str =
    "You are a professional sales representative crafting a strategic follow-up email.";

const ANALYSIS_SCHEMA: &str = r#"Analyze this sales demo transcript and extract comprehensive insights.

Return your response as a valid JSON object (not a string) with these exact keys. Ensure all values are properly formatted as arrays or objects as specified:

technical_requirements: [
    List specific technical details including:
    - EHR systems and versions
    - Integration requirements
    - Security/compliance needs
    - Infrastructure specifications
]

pain_points: {
    "operational": [List of operational challenges mentioned],
    "technical": [List of technical challenges],
    "financial": [List of cost/budget related issues],
    "clinical": [List of clinical workflow challenges],
    "priority_level": Map of each pain point to High/Medium/Low based on urgency in discussion
}

buying_signals: {
    "budget_indicators": [Phrases indicating budget availability/constraints],
    "timeline_urgency": [Mentions of urgent needs or deadlines],
    "decision_process": [Information about approval process],
    "competitor_mentions": [Any competing solutions discussed],
    "positive_signals": [Encouraging comments/reactions],
    "concerns": [Expressed doubts or worries]
}

stakeholders: {
    "decision_makers": [List with roles and influence level],
    "technical_reviewers": [Technical stakeholders],
    "end_users": [Who will use the system],
    "other_stakeholders": [Additional involved parties]
}

timeline_info: {
    "start_date": Exact date mentioned,
    "implementation_phases": [List of phases with dates],
    "dependencies": [Prerequisites or blockers],
    "key_milestones": [Important timeline events]
}

pricing_discussion: {
    "model_discussed": Pricing model details,
    "budget_constraints": Any mentioned limits,
    "competitor_pricing": Any mentioned competitive prices,
    "volume_considerations": Volume-related details
}

next_steps: [
    List each action item with:
    {
        "action": Specific task,
        "owner": Responsible party,
        "deadline": Due date,
        "priority": High/Medium/Low
    }
]"#;

/// Build the analysis prompt for an already-cleaned transcript.
pub fn build_analysis_prompt(transcript: &str) -> String {
    format!("{ANALYSIS_SCHEMA}\n\nTRANSCRIPT:\n{transcript}\n")
}

/// Build the follow-up email prompt.
///
/// `insights_json` is the record serialized as indented JSON.
pub fn build_email_prompt(contact_name: &str, focus: &str, insights_json: &str) -> String {
    format!(
        "Write a strategic follow-up email to {contact_name}.\n\
\n\
Requirements:\n\
1. Address key pain points identified and how we solve them\n\
2. Reference specific technical requirements discussed\n\
3. Acknowledge timeline needs\n\
4. Include clear next steps with ownership\n\
5. Maintain urgency while being professional\n\
\n\
Style Guide:\n\
- Clear and concise\n\
- Professional but conversational\n\
- Action-oriented\n\
- Value-focused\n\
\n\
Template Focus: {focus}\n\
\n\
INSIGHTS:\n\
{insights_json}"
    )
}
